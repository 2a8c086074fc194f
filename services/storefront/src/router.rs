use axum::{
    Router,
    routing::{delete, get, patch, post, put},
};
use tower_http::trace::TraceLayer;

use bakehouse_core::health::{healthz, readyz};
use bakehouse_core::middleware::request_id_layer;

use crate::handlers::{
    auth::{
        complete_register, get_me, initiate_register, login, resend_register_otp, send_email_otp,
        send_phone_otp, update_profile, verify_email, verify_phone,
    },
    orders::{
        create_order, get_order, list_all_orders, list_my_orders, list_orders, order_stats,
        update_order_status,
    },
    reviews::{
        check_review, delete_review, list_order_reviews, list_product_reviews, submit_review,
    },
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Registration + auth
        .route("/auth/initiate-register", post(initiate_register))
        .route("/auth/complete-register", post(complete_register))
        .route("/auth/resend-register-otp", post(resend_register_otp))
        .route("/auth/login", post(login))
        .route("/auth/me", get(get_me))
        .route("/auth/profile", put(update_profile))
        // Channel verification
        .route("/auth/send-email-otp", post(send_email_otp))
        .route("/auth/verify-email", post(verify_email))
        .route("/auth/send-phone-otp", post(send_phone_otp))
        .route("/auth/verify-phone", post(verify_phone))
        // Orders
        .route("/orders", post(create_order))
        .route("/orders", get(list_orders))
        .route("/orders/my-orders", get(list_my_orders))
        .route("/orders/all", get(list_all_orders))
        .route("/orders/stats", get(order_stats))
        .route("/orders/{id}/status", patch(update_order_status))
        .route("/orders/{id}", get(get_order))
        // Reviews
        .route("/reviews", post(submit_review))
        .route("/reviews/product/{product_id}", get(list_product_reviews))
        .route("/reviews/check/{order_id}/{product_id}", get(check_review))
        .route("/reviews/order/{order_id}", get(list_order_reviews))
        .route("/reviews/{id}", delete(delete_review))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
