use axum::extract::{Path, Query, State};
use axum::{Json, http::StatusCode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bakehouse_domain::pagination::PageRequest;

use crate::domain::types::{FulfillmentStatus, Order, OrderItem, PaymentStatus};
use crate::error::StorefrontError;
use crate::session::{OptionalSession, Session};
use crate::state::AppState;
use crate::usecase::order::{
    CreateOrderInput, CreateOrderItemInput, CreateOrderUseCase, GetOrderUseCase,
    ListAllOrdersUseCase, ListGuestOrdersUseCase, ListMyOrdersUseCase, OrderStatsUseCase,
    UpdateOrderStatusInput, UpdateOrderStatusUseCase,
};

#[derive(Serialize)]
pub struct OrderItemResponse {
    pub product_id: String,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
    pub image: Option<String>,
}

#[derive(Serialize)]
pub struct OrderResponse {
    pub id: String,
    pub order_number: String,
    pub account_id: Option<String>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub customer_postal_code: String,
    pub items: Vec<OrderItemResponse>,
    pub subtotal: Decimal,
    pub delivery_fee: Decimal,
    pub total: Decimal,
    pub payment_id: Option<String>,
    pub payment_status: &'static str,
    pub status: &'static str,
    #[serde(serialize_with = "bakehouse_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "bakehouse_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id.to_string(),
            order_number: order.order_number,
            account_id: order.account_id.map(|id| id.to_string()),
            customer_name: order.customer_name,
            customer_email: order.customer_email,
            customer_phone: order.customer_phone,
            customer_address: order.customer_address,
            customer_postal_code: order.customer_postal_code,
            items: order.items.into_iter().map(OrderItemResponse::from).collect(),
            subtotal: order.subtotal,
            delivery_fee: order.delivery_fee,
            total: order.total,
            payment_id: order.payment_id,
            payment_status: order.payment_status.as_str(),
            status: order.status.as_str(),
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            product_id: item.product_id.to_string(),
            name: item.name,
            price: item.price,
            quantity: item.quantity,
            image: item.image,
        }
    }
}

// ── POST /orders ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateOrderItemRequest {
    pub product_id: Uuid,
    pub quantity: u32,
}

#[derive(Deserialize)]
pub struct CreateOrderRequest {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub customer_postal_code: String,
    pub items: Vec<CreateOrderItemRequest>,
    pub delivery_fee: Option<Decimal>,
    pub payment_id: Option<String>,
    pub payment_status: Option<String>,
}

pub async fn create_order(
    session: OptionalSession,
    State(state): State<AppState>,
    Json(body): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), StorefrontError> {
    let payment_status = body
        .payment_status
        .as_deref()
        .map(|s| {
            PaymentStatus::parse(s).ok_or(StorefrontError::Validation("unknown payment status"))
        })
        .transpose()?;

    let usecase = CreateOrderUseCase {
        orders: state.order_repo(),
        sequence: state.order_sequence(),
        catalog: state.catalog(),
        mailer: state.mailer(),
    };
    let order = usecase
        .execute(
            session.account_id(),
            CreateOrderInput {
                customer_name: body.customer_name,
                customer_email: body.customer_email,
                customer_phone: body.customer_phone,
                customer_address: body.customer_address,
                customer_postal_code: body.customer_postal_code,
                items: body
                    .items
                    .into_iter()
                    .map(|i| CreateOrderItemInput {
                        product_id: i.product_id,
                        quantity: i.quantity,
                    })
                    .collect(),
                delivery_fee: body.delivery_fee,
                payment_id: body.payment_id,
                payment_status,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(order.into())))
}

// ── GET /orders/{id} ─────────────────────────────────────────────────────────

/// Public order tracking by id, no session needed.
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<Json<OrderResponse>, StorefrontError> {
    let usecase = GetOrderUseCase {
        orders: state.order_repo(),
    };
    let order = usecase.execute(order_id).await?;
    Ok(Json(order.into()))
}

// ── GET /orders ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct OrderListFilter {
    pub phone: Option<String>,
}

/// Logged-in callers get their own orders; guests can look up their guest
/// orders by the phone number used at checkout.
pub async fn list_orders(
    session: OptionalSession,
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
    Query(filter): Query<OrderListFilter>,
) -> Result<Json<Vec<OrderResponse>>, StorefrontError> {
    let orders = match (session.account_id(), filter.phone) {
        (Some(account_id), _) => {
            let usecase = ListMyOrdersUseCase {
                orders: state.order_repo(),
            };
            usecase.execute(account_id, page).await?
        }
        (None, Some(phone)) => {
            let usecase = ListGuestOrdersUseCase {
                orders: state.order_repo(),
            };
            usecase.execute(&phone, page).await?
        }
        (None, None) => return Err(StorefrontError::Unauthorized("missing bearer token")),
    };
    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}

// ── GET /orders/my-orders ────────────────────────────────────────────────────

pub async fn list_my_orders(
    session: Session,
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Vec<OrderResponse>>, StorefrontError> {
    let usecase = ListMyOrdersUseCase {
        orders: state.order_repo(),
    };
    let orders = usecase.execute(session.account_id, page).await?;
    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}

// ── GET /orders/all ──────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct OrderPageResponse {
    pub orders: Vec<OrderResponse>,
    pub total: u64,
    pub pages: u64,
}

#[derive(Deserialize)]
pub struct AdminOrderFilter {
    pub status: Option<String>,
}

pub async fn list_all_orders(
    session: Session,
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
    Query(filter): Query<AdminOrderFilter>,
) -> Result<Json<OrderPageResponse>, StorefrontError> {
    if !session.is_admin() {
        return Err(StorefrontError::Forbidden("admin only"));
    }
    let status = filter
        .status
        .as_deref()
        .map(|s| {
            FulfillmentStatus::parse(s).ok_or(StorefrontError::Validation("unknown order status"))
        })
        .transpose()?;
    let usecase = ListAllOrdersUseCase {
        orders: state.order_repo(),
    };
    let output = usecase.execute(status, page).await?;
    Ok(Json(OrderPageResponse {
        orders: output.orders.into_iter().map(OrderResponse::from).collect(),
        total: output.total,
        pages: output.pages,
    }))
}

// ── PATCH /orders/{id}/status ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: String,
    pub payment_status: Option<String>,
}

pub async fn update_order_status(
    session: Session,
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(body): Json<UpdateOrderStatusRequest>,
) -> Result<Json<OrderResponse>, StorefrontError> {
    if !session.is_admin() {
        return Err(StorefrontError::Forbidden("admin only"));
    }
    let status = FulfillmentStatus::parse(&body.status)
        .ok_or(StorefrontError::Validation("unknown order status"))?;
    let payment_status = body
        .payment_status
        .as_deref()
        .map(|s| {
            PaymentStatus::parse(s).ok_or(StorefrontError::Validation("unknown payment status"))
        })
        .transpose()?;

    let usecase = UpdateOrderStatusUseCase {
        orders: state.order_repo(),
    };
    let order = usecase
        .execute(
            order_id,
            UpdateOrderStatusInput {
                status,
                payment_status,
            },
        )
        .await?;
    Ok(Json(order.into()))
}

// ── GET /orders/stats ────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct OrderStatsResponse {
    pub total_orders: u64,
    pub paid_orders: u64,
    pub pending_orders: u64,
    pub delivered_orders: u64,
    pub total_revenue: Decimal,
    pub recent_orders: Vec<OrderResponse>,
}

pub async fn order_stats(
    session: Session,
    State(state): State<AppState>,
) -> Result<Json<OrderStatsResponse>, StorefrontError> {
    if !session.is_admin() {
        return Err(StorefrontError::Forbidden("admin only"));
    }
    let usecase = OrderStatsUseCase {
        orders: state.order_repo(),
    };
    let stats = usecase.execute().await?;
    Ok(Json(OrderStatsResponse {
        total_orders: stats.total_orders,
        paid_orders: stats.paid_orders,
        pending_orders: stats.pending_orders,
        delivered_orders: stats.delivered_orders,
        total_revenue: stats.total_revenue,
        recent_orders: stats
            .recent_orders
            .into_iter()
            .map(OrderResponse::from)
            .collect(),
    }))
}
