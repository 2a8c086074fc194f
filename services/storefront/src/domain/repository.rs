#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use bakehouse_domain::pagination::PageRequest;

use crate::domain::types::{
    Account, FulfillmentStatus, LineItemSnapshot, Order, OrderStats, OtpSlot, PaymentStatus,
    Review,
};
use crate::error::StorefrontError;

/// Which per-channel OTP slot an update targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpChannel {
    Registration,
    Email,
    Phone,
}

/// Repository for customer accounts and their activation state.
pub trait AccountRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, StorefrontError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StorefrontError>;
    async fn create(&self, account: &Account) -> Result<(), StorefrontError>;

    /// Overwrite an inactive (pending) account with fresh registration data.
    async fn replace_pending(&self, account: &Account) -> Result<(), StorefrontError>;

    /// Write or clear one OTP slot. Writing a new slot replaces any prior code
    /// on the same channel.
    async fn set_otp(
        &self,
        id: Uuid,
        channel: OtpChannel,
        slot: Option<&OtpSlot>,
    ) -> Result<(), StorefrontError>;

    /// Flip the account to active + email-verified and clear the
    /// registration slot in one update.
    async fn activate(&self, id: Uuid) -> Result<(), StorefrontError>;

    /// Mark one channel verified and clear its slot in one update.
    async fn mark_verified(&self, id: Uuid, channel: OtpChannel) -> Result<(), StorefrontError>;

    async fn update_profile(
        &self,
        id: Uuid,
        name: Option<&str>,
        phone: Option<&str>,
        address: Option<&str>,
        postal_code: Option<&str>,
    ) -> Result<(), StorefrontError>;
}

/// Monotonic counter backing order-number assignment.
pub trait OrderSequence: Send + Sync {
    /// Atomically increment and return the next sequence value. Two
    /// concurrent calls never observe the same value.
    async fn next_order_number(&self) -> Result<i64, StorefrontError>;
}

/// Repository for orders.
pub trait OrderRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, StorefrontError>;
    async fn create(&self, order: &Order) -> Result<(), StorefrontError>;

    async fn list_for_account(
        &self,
        account_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<Order>, StorefrontError>;

    /// Guest orders (no owning account) placed with this phone number.
    async fn list_for_phone(
        &self,
        phone: &str,
        page: PageRequest,
    ) -> Result<Vec<Order>, StorefrontError>;

    async fn list_all(
        &self,
        status: Option<FulfillmentStatus>,
        page: PageRequest,
    ) -> Result<(Vec<Order>, u64), StorefrontError>;

    async fn update_status(
        &self,
        id: Uuid,
        status: FulfillmentStatus,
        payment_status: Option<PaymentStatus>,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StorefrontError>;

    async fn stats(&self) -> Result<OrderStats, StorefrontError>;
}

/// Repository for product reviews.
pub trait ReviewRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Review>, StorefrontError>;
    async fn find_by_product_and_order(
        &self,
        product_id: Uuid,
        order_id: Uuid,
    ) -> Result<Option<Review>, StorefrontError>;
    async fn create(&self, review: &Review) -> Result<(), StorefrontError>;
    /// Delete a review. Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, StorefrontError>;

    async fn list_for_product(
        &self,
        product_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<Review>, StorefrontError>;

    /// All reviews attached to one order (at most one per product).
    async fn list_for_order(&self, order_id: Uuid) -> Result<Vec<Review>, StorefrontError>;

    /// All ratings currently stored for a product, for aggregate recompute.
    async fn ratings_for_product(&self, product_id: Uuid) -> Result<Vec<u8>, StorefrontError>;
}

/// Read side of the product catalog plus the denormalized rating aggregate.
pub trait CatalogPort: Send + Sync {
    /// Snapshot name/price/image for a product, or `None` if unknown.
    async fn line_item_snapshot(
        &self,
        product_id: Uuid,
    ) -> Result<Option<LineItemSnapshot>, StorefrontError>;

    async fn set_rating_aggregate(
        &self,
        product_id: Uuid,
        average_rating: f64,
        review_count: u32,
    ) -> Result<(), StorefrontError>;
}

/// Outbound email. Failures are reported but callers treat delivery as
/// best-effort except where a flow cannot proceed without the message.
pub trait NotificationGateway: Send + Sync {
    async fn send_registration_otp(
        &self,
        to: &str,
        name: &str,
        code: &str,
    ) -> Result<(), StorefrontError>;

    async fn send_email_otp(&self, to: &str, name: &str, code: &str)
    -> Result<(), StorefrontError>;

    async fn send_welcome(&self, to: &str, name: &str) -> Result<(), StorefrontError>;

    async fn send_order_confirmation(
        &self,
        to: &str,
        name: &str,
        order_number: &str,
        total: Decimal,
    ) -> Result<(), StorefrontError>;
}
