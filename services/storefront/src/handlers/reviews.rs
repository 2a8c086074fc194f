use axum::extract::{Path, Query, State};
use axum::{Json, http::StatusCode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bakehouse_domain::pagination::PageRequest;

use crate::domain::types::Review;
use crate::error::StorefrontError;
use crate::session::OptionalSession;
use crate::state::AppState;
use crate::usecase::review::{
    CheckReviewUseCase, DeleteReviewUseCase, ListOrderReviewsUseCase, ListProductReviewsUseCase,
    SubmitReviewInput, SubmitReviewUseCase,
};

#[derive(Serialize)]
pub struct ReviewResponse {
    pub id: String,
    pub product_id: String,
    pub order_id: String,
    pub customer_name: String,
    pub rating: u8,
    pub title: Option<String>,
    pub comment: Option<String>,
    pub verified: bool,
    #[serde(serialize_with = "bakehouse_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.id.to_string(),
            product_id: review.product_id.to_string(),
            order_id: review.order_id.to_string(),
            customer_name: review.customer_name,
            rating: review.rating,
            title: review.title,
            comment: review.comment,
            verified: review.verified,
            created_at: review.created_at,
        }
    }
}

// ── POST /reviews ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SubmitReviewRequest {
    pub product_id: Uuid,
    pub order_id: Uuid,
    pub rating: u8,
    pub title: Option<String>,
    pub comment: Option<String>,
}

pub async fn submit_review(
    session: OptionalSession,
    State(state): State<AppState>,
    Json(body): Json<SubmitReviewRequest>,
) -> Result<(StatusCode, Json<ReviewResponse>), StorefrontError> {
    let usecase = SubmitReviewUseCase {
        reviews: state.review_repo(),
        orders: state.order_repo(),
        catalog: state.catalog(),
    };
    let review = usecase
        .execute(
            session.account_id(),
            SubmitReviewInput {
                product_id: body.product_id,
                order_id: body.order_id,
                rating: body.rating,
                title: body.title,
                comment: body.comment,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(review.into())))
}

// ── DELETE /reviews/{id} ─────────────────────────────────────────────────────

/// Guests may delete guest reviews; owned reviews need the owning session.
pub async fn delete_review(
    session: OptionalSession,
    State(state): State<AppState>,
    Path(review_id): Path<Uuid>,
) -> Result<StatusCode, StorefrontError> {
    let usecase = DeleteReviewUseCase {
        reviews: state.review_repo(),
        catalog: state.catalog(),
    };
    usecase
        .execute(review_id, session.account_id(), session.is_admin())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /reviews/check/{order_id}/{product_id} ───────────────────────────────

#[derive(Serialize)]
pub struct ReviewCheckResponse {
    pub reviewed: bool,
    pub review: Option<ReviewResponse>,
}

pub async fn check_review(
    State(state): State<AppState>,
    Path((order_id, product_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ReviewCheckResponse>, StorefrontError> {
    let usecase = CheckReviewUseCase {
        reviews: state.review_repo(),
    };
    let review = usecase.execute(order_id, product_id).await?;
    Ok(Json(ReviewCheckResponse {
        reviewed: review.is_some(),
        review: review.map(ReviewResponse::from),
    }))
}

// ── GET /reviews/order/{order_id} ────────────────────────────────────────────

/// Map of product id to the review already written for it in this order.
pub async fn list_order_reviews(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<Json<std::collections::HashMap<String, ReviewResponse>>, StorefrontError> {
    let usecase = ListOrderReviewsUseCase {
        reviews: state.review_repo(),
    };
    let reviews = usecase.execute(order_id).await?;
    Ok(Json(
        reviews
            .into_iter()
            .map(|(product_id, review)| (product_id.to_string(), ReviewResponse::from(review)))
            .collect(),
    ))
}

// ── GET /reviews/product/{product_id} ────────────────────────────────────────

pub async fn list_product_reviews(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Vec<ReviewResponse>>, StorefrontError> {
    let usecase = ListProductReviewsUseCase {
        reviews: state.review_repo(),
    };
    let reviews = usecase.execute(product_id, page).await?;
    Ok(Json(reviews.into_iter().map(ReviewResponse::from).collect()))
}
