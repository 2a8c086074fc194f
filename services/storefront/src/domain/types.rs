use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use bakehouse_domain::role::Role;

use crate::error::StorefrontError;

/// One-time code length in digits.
pub const OTP_LEN: usize = 6;

/// One-time code time-to-live in minutes.
pub const OTP_TTL_MINS: i64 = 10;

/// A single outstanding one-time code with its expiry.
///
/// One slot per channel: issuing a new code silently replaces any prior one,
/// which is exactly the desired "resend" behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpSlot {
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

/// Check a submitted code against a slot: absent or mismatched code is
/// `InvalidCode`; a matching code past its expiry is `Expired`.
pub fn verify_otp(
    slot: Option<&OtpSlot>,
    submitted: &str,
    now: DateTime<Utc>,
) -> Result<(), StorefrontError> {
    let slot = slot.ok_or(StorefrontError::InvalidCode)?;
    if slot.code != submitted {
        return Err(StorefrontError::InvalidCode);
    }
    if slot.expires_at < now {
        return Err(StorefrontError::Expired);
    }
    Ok(())
}

/// Customer account with activation state and per-channel OTP slots.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    /// Stored lowercased; unique among active accounts.
    pub email: String,
    /// Absent for federated-identity-only accounts.
    pub password_hash: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub role: Role,
    pub is_active: bool,
    pub is_email_verified: bool,
    pub is_phone_verified: bool,
    pub registration_otp: Option<OtpSlot>,
    pub email_otp: Option<OtpSlot>,
    pub phone_otp: Option<OtpSlot>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payment state supplied by the upstream payment flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "paid" => Some(Self::Paid),
            "failed" => Some(Self::Failed),
            "refunded" => Some(Self::Refunded),
            _ => None,
        }
    }
}

/// Fulfillment state of an order.
///
/// Transitions follow a forward-progressing graph; `Cancelled` is reachable
/// from any non-terminal state. `Delivered` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FulfillmentStatus {
    Pending,
    Confirmed,
    Preparing,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl FulfillmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Preparing => "preparing",
            Self::OutForDelivery => "out_for_delivery",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "preparing" => Some(Self::Preparing),
            "out_for_delivery" => Some(Self::OutForDelivery),
            "delivered" => Some(Self::Delivered),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Whether `next` is a legal transition from this state.
    pub fn can_transition_to(self, next: Self) -> bool {
        if next == Self::Cancelled {
            return !self.is_terminal();
        }
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed)
                | (Self::Confirmed, Self::Preparing)
                | (Self::Preparing, Self::OutForDelivery)
                | (Self::OutForDelivery, Self::Delivered)
        )
    }
}

/// Snapshot of one purchased product inside an order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub product_id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
    pub image: Option<String>,
}

/// A purchase event, possibly from a guest.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: Uuid,
    pub order_number: String,
    pub account_id: Option<Uuid>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub customer_postal_code: String,
    pub items: Vec<OrderItem>,
    pub subtotal: Decimal,
    pub delivery_fee: Decimal,
    pub total: Decimal,
    pub payment_id: Option<String>,
    pub payment_status: PaymentStatus,
    pub status: FulfillmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn contains_product(&self, product_id: Uuid) -> bool {
        self.items.iter().any(|i| i.product_id == product_id)
    }
}

/// Format a sequence value as a human-readable order number (`ORD-0001`).
pub fn format_order_number(seq: i64) -> String {
    format!("ORD-{seq:04}")
}

/// A rating+text attached to exactly one (product, order) pair.
#[derive(Debug, Clone)]
pub struct Review {
    pub id: Uuid,
    pub product_id: Uuid,
    pub order_id: Uuid,
    pub account_id: Option<Uuid>,
    /// Snapshot from the order, not the live account.
    pub customer_name: String,
    pub rating: u8,
    pub title: Option<String>,
    pub comment: Option<String>,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

/// Line-item data read from the catalog at order-creation time.
#[derive(Debug, Clone)]
pub struct LineItemSnapshot {
    pub name: String,
    pub price: Decimal,
    pub image: Option<String>,
}

/// Admin dashboard aggregates.
#[derive(Debug, Clone)]
pub struct OrderStats {
    pub total_orders: u64,
    pub paid_orders: u64,
    pub pending_orders: u64,
    pub delivered_orders: u64,
    pub total_revenue: Decimal,
    pub recent_orders: Vec<Order>,
}
