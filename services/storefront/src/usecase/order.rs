use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use bakehouse_domain::pagination::PageRequest;
use bakehouse_domain::validate::{is_valid_email, is_valid_phone, is_valid_postal_code};

use crate::domain::repository::{CatalogPort, NotificationGateway, OrderRepository, OrderSequence};
use crate::domain::types::{
    FulfillmentStatus, Order, OrderItem, OrderStats, PaymentStatus, format_order_number,
};
use crate::error::StorefrontError;

/// Flat delivery fee applied when the client does not send one.
pub fn default_delivery_fee() -> Decimal {
    Decimal::new(500, 2)
}

// ── CreateOrder ──────────────────────────────────────────────────────────────

pub struct CreateOrderItemInput {
    pub product_id: Uuid,
    pub quantity: u32,
}

pub struct CreateOrderInput {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub customer_postal_code: String,
    pub items: Vec<CreateOrderItemInput>,
    pub delivery_fee: Option<Decimal>,
    pub payment_id: Option<String>,
    pub payment_status: Option<PaymentStatus>,
}

pub struct CreateOrderUseCase<O, S, C, N>
where
    O: OrderRepository,
    S: OrderSequence,
    C: CatalogPort,
    N: NotificationGateway,
{
    pub orders: O,
    pub sequence: S,
    pub catalog: C,
    pub mailer: N,
}

impl<O, S, C, N> CreateOrderUseCase<O, S, C, N>
where
    O: OrderRepository,
    S: OrderSequence,
    C: CatalogPort,
    N: NotificationGateway,
{
    pub async fn execute(
        &self,
        account_id: Option<Uuid>,
        input: CreateOrderInput,
    ) -> Result<Order, StorefrontError> {
        if input.customer_name.trim().is_empty() {
            return Err(StorefrontError::Validation("customer name must not be empty"));
        }
        let email = input.customer_email.trim().to_lowercase();
        if !is_valid_email(&email) {
            return Err(StorefrontError::Validation("invalid email address"));
        }
        if !is_valid_phone(&input.customer_phone) {
            return Err(StorefrontError::Validation("invalid phone number"));
        }
        if input.customer_address.trim().is_empty() {
            return Err(StorefrontError::Validation("delivery address must not be empty"));
        }
        if !is_valid_postal_code(&input.customer_postal_code) {
            return Err(StorefrontError::Validation("invalid postal code"));
        }
        if input.items.is_empty() {
            return Err(StorefrontError::Validation(
                "order must contain at least one item",
            ));
        }
        if input.items.iter().any(|i| i.quantity == 0) {
            return Err(StorefrontError::Validation(
                "item quantity must be at least 1",
            ));
        }
        let delivery_fee = input.delivery_fee.unwrap_or_else(default_delivery_fee);
        if delivery_fee < Decimal::ZERO {
            return Err(StorefrontError::Validation("delivery fee must not be negative"));
        }

        // Snapshot name/price/image from the catalog so later product edits
        // never rewrite past orders.
        let mut items = Vec::with_capacity(input.items.len());
        for item in &input.items {
            let snapshot = self
                .catalog
                .line_item_snapshot(item.product_id)
                .await?
                .ok_or(StorefrontError::NotFound("product not found"))?;
            items.push(OrderItem {
                product_id: item.product_id,
                name: snapshot.name,
                price: snapshot.price,
                quantity: item.quantity,
                image: snapshot.image,
            });
        }

        let subtotal: Decimal = items
            .iter()
            .map(|i| i.price * Decimal::from(i.quantity))
            .sum();

        let seq = self.sequence.next_order_number().await?;
        let now = Utc::now();
        let order = Order {
            id: Uuid::new_v4(),
            order_number: format_order_number(seq),
            account_id,
            customer_name: input.customer_name.trim().to_owned(),
            customer_email: email,
            customer_phone: input.customer_phone,
            customer_address: input.customer_address.trim().to_owned(),
            customer_postal_code: input.customer_postal_code,
            items,
            subtotal,
            delivery_fee,
            total: subtotal + delivery_fee,
            payment_id: input.payment_id,
            payment_status: input.payment_status.unwrap_or(PaymentStatus::Paid),
            status: FulfillmentStatus::Confirmed,
            created_at: now,
            updated_at: now,
        };

        self.orders.create(&order).await?;

        // Confirmation mail is best-effort.
        if let Err(e) = self
            .mailer
            .send_order_confirmation(
                &order.customer_email,
                &order.customer_name,
                &order.order_number,
                order.total,
            )
            .await
        {
            tracing::warn!(error = %e, order_number = %order.order_number,
                "failed to send order confirmation email");
        }

        Ok(order)
    }
}

// ── GetOrder ─────────────────────────────────────────────────────────────────

/// Public order tracking: anyone holding the order id may read it.
pub struct GetOrderUseCase<O: OrderRepository> {
    pub orders: O,
}

impl<O: OrderRepository> GetOrderUseCase<O> {
    pub async fn execute(&self, order_id: Uuid) -> Result<Order, StorefrontError> {
        self.orders
            .find_by_id(order_id)
            .await?
            .ok_or(StorefrontError::NotFound("order not found"))
    }
}

// ── ListMyOrders ─────────────────────────────────────────────────────────────

pub struct ListMyOrdersUseCase<O: OrderRepository> {
    pub orders: O,
}

impl<O: OrderRepository> ListMyOrdersUseCase<O> {
    pub async fn execute(
        &self,
        account_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<Order>, StorefrontError> {
        self.orders.list_for_account(account_id, page.clamped()).await
    }
}

// ── ListGuestOrders ──────────────────────────────────────────────────────────

/// Guest order lookup. Only orders without an owning account are returned,
/// so knowing a customer's phone number never exposes their account history.
pub struct ListGuestOrdersUseCase<O: OrderRepository> {
    pub orders: O,
}

impl<O: OrderRepository> ListGuestOrdersUseCase<O> {
    pub async fn execute(
        &self,
        phone: &str,
        page: PageRequest,
    ) -> Result<Vec<Order>, StorefrontError> {
        if !is_valid_phone(phone) {
            return Err(StorefrontError::Validation("invalid phone number"));
        }
        self.orders.list_for_phone(phone, page.clamped()).await
    }
}

// ── ListAllOrders ────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct ListAllOrdersOutput {
    pub orders: Vec<Order>,
    pub total: u64,
    pub pages: u64,
}

pub struct ListAllOrdersUseCase<O: OrderRepository> {
    pub orders: O,
}

impl<O: OrderRepository> ListAllOrdersUseCase<O> {
    pub async fn execute(
        &self,
        status: Option<FulfillmentStatus>,
        page: PageRequest,
    ) -> Result<ListAllOrdersOutput, StorefrontError> {
        let page = page.clamped();
        let (orders, total) = self.orders.list_all(status, page).await?;
        Ok(ListAllOrdersOutput {
            orders,
            total,
            pages: page.pages_for(total),
        })
    }
}

// ── UpdateOrderStatus ────────────────────────────────────────────────────────

pub struct UpdateOrderStatusInput {
    pub status: FulfillmentStatus,
    pub payment_status: Option<PaymentStatus>,
}

pub struct UpdateOrderStatusUseCase<O: OrderRepository> {
    pub orders: O,
}

impl<O: OrderRepository> UpdateOrderStatusUseCase<O> {
    pub async fn execute(
        &self,
        order_id: Uuid,
        input: UpdateOrderStatusInput,
    ) -> Result<Order, StorefrontError> {
        let mut order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or(StorefrontError::NotFound("order not found"))?;

        if !order.status.can_transition_to(input.status) {
            return Err(StorefrontError::InvalidTransition);
        }

        let now = Utc::now();
        self.orders
            .update_status(order.id, input.status, input.payment_status, now)
            .await?;

        order.status = input.status;
        if let Some(ps) = input.payment_status {
            order.payment_status = ps;
        }
        order.updated_at = now;
        Ok(order)
    }
}

// ── OrderStats ───────────────────────────────────────────────────────────────

pub struct OrderStatsUseCase<O: OrderRepository> {
    pub orders: O,
}

impl<O: OrderRepository> OrderStatsUseCase<O> {
    pub async fn execute(&self) -> Result<OrderStats, StorefrontError> {
        self.orders.stats().await
    }
}
