use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use bakehouse_domain::pagination::PageRequest;
use bakehouse_domain::role::Role;

use bakehouse_storefront::domain::repository::{
    AccountRepository, CatalogPort, NotificationGateway, OrderRepository, OrderSequence,
    OtpChannel, ReviewRepository,
};
use bakehouse_storefront::domain::types::{
    Account, FulfillmentStatus, LineItemSnapshot, Order, OrderItem, OrderStats, OtpSlot,
    PaymentStatus, Review,
};
use bakehouse_storefront::error::StorefrontError;
use bakehouse_storefront::usecase::password::hash_password;

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn pending_account(email: &str) -> Account {
    let now = Utc::now();
    Account {
        id: Uuid::new_v4(),
        name: "Priya".into(),
        email: email.to_owned(),
        password_hash: Some(hash_password("sourdough").unwrap()),
        phone: None,
        address: None,
        postal_code: None,
        role: Role::User,
        is_active: false,
        is_email_verified: false,
        is_phone_verified: false,
        registration_otp: Some(OtpSlot {
            code: "123456".into(),
            expires_at: now + Duration::minutes(10),
        }),
        email_otp: None,
        phone_otp: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn active_account(email: &str) -> Account {
    let mut account = pending_account(email);
    account.is_active = true;
    account.is_email_verified = true;
    account.registration_otp = None;
    account
}

pub fn test_product() -> (Uuid, LineItemSnapshot) {
    (
        Uuid::new_v4(),
        LineItemSnapshot {
            name: "Sourdough Loaf".into(),
            price: Decimal::new(650, 2),
            image: None,
        },
    )
}

pub fn delivered_order(account_id: Option<Uuid>, product_id: Uuid) -> Order {
    let now = Utc::now();
    let price = Decimal::new(650, 2);
    Order {
        id: Uuid::new_v4(),
        order_number: "ORD-0001".into(),
        account_id,
        customer_name: "Priya".into(),
        customer_email: "priya@example.com".into(),
        customer_phone: "9876543210".into(),
        customer_address: "12 Baker Street".into(),
        customer_postal_code: "560001".into(),
        items: vec![OrderItem {
            product_id,
            name: "Sourdough Loaf".into(),
            price,
            quantity: 2,
            image: None,
        }],
        subtotal: price * Decimal::from(2u32),
        delivery_fee: Decimal::new(500, 2),
        total: price * Decimal::from(2u32) + Decimal::new(500, 2),
        payment_id: None,
        payment_status: PaymentStatus::Paid,
        status: FulfillmentStatus::Delivered,
        created_at: now,
        updated_at: now,
    }
}

// ── MockAccountRepo ──────────────────────────────────────────────────────────

/// Single-account in-memory repository; every flow under test touches at
/// most one account.
#[derive(Clone)]
pub struct MockAccountRepo {
    account: Arc<Mutex<Option<Account>>>,
}

impl MockAccountRepo {
    pub fn empty() -> Self {
        Self {
            account: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with(account: Account) -> Self {
        Self {
            account: Arc::new(Mutex::new(Some(account))),
        }
    }

    pub fn snapshot(&self) -> Option<Account> {
        self.account.lock().unwrap().clone()
    }
}

impl AccountRepository for MockAccountRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, StorefrontError> {
        Ok(self
            .account
            .lock()
            .unwrap()
            .clone()
            .filter(|a| a.id == id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StorefrontError> {
        Ok(self
            .account
            .lock()
            .unwrap()
            .clone()
            .filter(|a| a.email == email))
    }

    async fn create(&self, account: &Account) -> Result<(), StorefrontError> {
        *self.account.lock().unwrap() = Some(account.clone());
        Ok(())
    }

    async fn replace_pending(&self, account: &Account) -> Result<(), StorefrontError> {
        *self.account.lock().unwrap() = Some(account.clone());
        Ok(())
    }

    async fn set_otp(
        &self,
        id: Uuid,
        channel: OtpChannel,
        slot: Option<&OtpSlot>,
    ) -> Result<(), StorefrontError> {
        let mut guard = self.account.lock().unwrap();
        if let Some(a) = guard.as_mut().filter(|a| a.id == id) {
            match channel {
                OtpChannel::Registration => a.registration_otp = slot.cloned(),
                OtpChannel::Email => a.email_otp = slot.cloned(),
                OtpChannel::Phone => a.phone_otp = slot.cloned(),
            }
            a.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn activate(&self, id: Uuid) -> Result<(), StorefrontError> {
        let mut guard = self.account.lock().unwrap();
        if let Some(a) = guard.as_mut().filter(|a| a.id == id) {
            a.is_active = true;
            a.is_email_verified = true;
            a.registration_otp = None;
            a.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn mark_verified(&self, id: Uuid, channel: OtpChannel) -> Result<(), StorefrontError> {
        let mut guard = self.account.lock().unwrap();
        if let Some(a) = guard.as_mut().filter(|a| a.id == id) {
            match channel {
                OtpChannel::Registration | OtpChannel::Email => {
                    a.is_email_verified = true;
                    a.email_otp = None;
                }
                OtpChannel::Phone => {
                    a.is_phone_verified = true;
                    a.phone_otp = None;
                }
            }
            a.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        name: Option<&str>,
        phone: Option<&str>,
        address: Option<&str>,
        postal_code: Option<&str>,
    ) -> Result<(), StorefrontError> {
        let mut guard = self.account.lock().unwrap();
        if let Some(a) = guard.as_mut().filter(|a| a.id == id) {
            if let Some(name) = name {
                a.name = name.to_owned();
            }
            if let Some(phone) = phone {
                a.phone = Some(phone.to_owned());
                a.is_phone_verified = false;
            }
            if let Some(address) = address {
                a.address = Some(address.to_owned());
            }
            if let Some(postal_code) = postal_code {
                a.postal_code = Some(postal_code.to_owned());
            }
            a.updated_at = Utc::now();
        }
        Ok(())
    }
}

// ── MockMailer ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct SentMail {
    pub kind: &'static str,
    pub to: String,
    pub detail: String,
}

#[derive(Clone, Default)]
pub struct MockMailer {
    sent: Arc<Mutex<Vec<SentMail>>>,
    pub fail: bool,
}

impl MockMailer {
    pub fn failing() -> Self {
        Self {
            sent: Arc::default(),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }

    fn record(&self, kind: &'static str, to: &str, detail: String) -> Result<(), StorefrontError> {
        if self.fail {
            return Err(StorefrontError::Internal(anyhow::anyhow!("smtp down")));
        }
        self.sent.lock().unwrap().push(SentMail {
            kind,
            to: to.to_owned(),
            detail,
        });
        Ok(())
    }
}

impl NotificationGateway for MockMailer {
    async fn send_registration_otp(
        &self,
        to: &str,
        _name: &str,
        code: &str,
    ) -> Result<(), StorefrontError> {
        self.record("registration_otp", to, code.to_owned())
    }

    async fn send_email_otp(
        &self,
        to: &str,
        _name: &str,
        code: &str,
    ) -> Result<(), StorefrontError> {
        self.record("email_otp", to, code.to_owned())
    }

    async fn send_welcome(&self, to: &str, _name: &str) -> Result<(), StorefrontError> {
        self.record("welcome", to, String::new())
    }

    async fn send_order_confirmation(
        &self,
        to: &str,
        _name: &str,
        order_number: &str,
        _total: Decimal,
    ) -> Result<(), StorefrontError> {
        self.record("order_confirmation", to, order_number.to_owned())
    }
}

// ── MockOrderSequence ────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockOrderSequence {
    counter: Arc<Mutex<i64>>,
}

impl OrderSequence for MockOrderSequence {
    async fn next_order_number(&self) -> Result<i64, StorefrontError> {
        let mut counter = self.counter.lock().unwrap();
        *counter += 1;
        Ok(*counter)
    }
}

// ── MockOrderRepo ────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockOrderRepo {
    orders: Arc<Mutex<Vec<Order>>>,
}

impl MockOrderRepo {
    pub fn with(orders: Vec<Order>) -> Self {
        Self {
            orders: Arc::new(Mutex::new(orders)),
        }
    }

    pub fn all(&self) -> Vec<Order> {
        self.orders.lock().unwrap().clone()
    }
}

impl OrderRepository for MockOrderRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, StorefrontError> {
        Ok(self
            .orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.id == id)
            .cloned())
    }

    async fn create(&self, order: &Order) -> Result<(), StorefrontError> {
        self.orders.lock().unwrap().push(order.clone());
        Ok(())
    }

    async fn list_for_account(
        &self,
        account_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<Order>, StorefrontError> {
        let orders = self.orders.lock().unwrap();
        Ok(orders
            .iter()
            .filter(|o| o.account_id == Some(account_id))
            .skip(page.offset() as usize)
            .take(page.per_page as usize)
            .cloned()
            .collect())
    }

    async fn list_for_phone(
        &self,
        phone: &str,
        page: PageRequest,
    ) -> Result<Vec<Order>, StorefrontError> {
        let orders = self.orders.lock().unwrap();
        Ok(orders
            .iter()
            .filter(|o| o.account_id.is_none() && o.customer_phone == phone)
            .skip(page.offset() as usize)
            .take(page.per_page as usize)
            .cloned()
            .collect())
    }

    async fn list_all(
        &self,
        status: Option<FulfillmentStatus>,
        page: PageRequest,
    ) -> Result<(Vec<Order>, u64), StorefrontError> {
        let orders = self.orders.lock().unwrap();
        let matching: Vec<&Order> = orders
            .iter()
            .filter(|o| status.is_none_or(|s| o.status == s))
            .collect();
        let total = matching.len() as u64;
        let page_items = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.per_page as usize)
            .cloned()
            .collect();
        Ok((page_items, total))
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: FulfillmentStatus,
        payment_status: Option<PaymentStatus>,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StorefrontError> {
        let mut orders = self.orders.lock().unwrap();
        if let Some(o) = orders.iter_mut().find(|o| o.id == id) {
            o.status = status;
            if let Some(ps) = payment_status {
                o.payment_status = ps;
            }
            o.updated_at = updated_at;
        }
        Ok(())
    }

    async fn stats(&self) -> Result<OrderStats, StorefrontError> {
        let orders = self.orders.lock().unwrap();
        let paid: Vec<&Order> = orders
            .iter()
            .filter(|o| o.payment_status == PaymentStatus::Paid)
            .collect();
        Ok(OrderStats {
            total_orders: orders.len() as u64,
            paid_orders: paid.len() as u64,
            pending_orders: orders
                .iter()
                .filter(|o| o.status == FulfillmentStatus::Pending)
                .count() as u64,
            delivered_orders: orders
                .iter()
                .filter(|o| o.status == FulfillmentStatus::Delivered)
                .count() as u64,
            total_revenue: paid.iter().map(|o| o.total).sum(),
            recent_orders: orders.iter().rev().take(5).cloned().collect(),
        })
    }
}

// ── MockReviewRepo ───────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockReviewRepo {
    reviews: Arc<Mutex<Vec<Review>>>,
}

impl MockReviewRepo {
    pub fn with(reviews: Vec<Review>) -> Self {
        Self {
            reviews: Arc::new(Mutex::new(reviews)),
        }
    }

    pub fn all(&self) -> Vec<Review> {
        self.reviews.lock().unwrap().clone()
    }
}

impl ReviewRepository for MockReviewRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Review>, StorefrontError> {
        Ok(self
            .reviews
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn find_by_product_and_order(
        &self,
        product_id: Uuid,
        order_id: Uuid,
    ) -> Result<Option<Review>, StorefrontError> {
        Ok(self
            .reviews
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.product_id == product_id && r.order_id == order_id)
            .cloned())
    }

    async fn create(&self, review: &Review) -> Result<(), StorefrontError> {
        self.reviews.lock().unwrap().push(review.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StorefrontError> {
        let mut reviews = self.reviews.lock().unwrap();
        let before = reviews.len();
        reviews.retain(|r| r.id != id);
        Ok(reviews.len() < before)
    }

    async fn list_for_product(
        &self,
        product_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<Review>, StorefrontError> {
        let reviews = self.reviews.lock().unwrap();
        Ok(reviews
            .iter()
            .filter(|r| r.product_id == product_id)
            .skip(page.offset() as usize)
            .take(page.per_page as usize)
            .cloned()
            .collect())
    }

    async fn list_for_order(&self, order_id: Uuid) -> Result<Vec<Review>, StorefrontError> {
        Ok(self
            .reviews
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.order_id == order_id)
            .cloned()
            .collect())
    }

    async fn ratings_for_product(&self, product_id: Uuid) -> Result<Vec<u8>, StorefrontError> {
        Ok(self
            .reviews
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.product_id == product_id)
            .map(|r| r.rating)
            .collect())
    }
}

// ── MockCatalog ──────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockCatalog {
    products: Arc<Mutex<HashMap<Uuid, LineItemSnapshot>>>,
    aggregates: Arc<Mutex<HashMap<Uuid, (f64, u32)>>>,
}

impl MockCatalog {
    pub fn with(products: Vec<(Uuid, LineItemSnapshot)>) -> Self {
        Self {
            products: Arc::new(Mutex::new(products.into_iter().collect())),
            aggregates: Arc::default(),
        }
    }

    pub fn aggregate(&self, product_id: Uuid) -> Option<(f64, u32)> {
        self.aggregates.lock().unwrap().get(&product_id).copied()
    }
}

impl CatalogPort for MockCatalog {
    async fn line_item_snapshot(
        &self,
        product_id: Uuid,
    ) -> Result<Option<LineItemSnapshot>, StorefrontError> {
        Ok(self.products.lock().unwrap().get(&product_id).cloned())
    }

    async fn set_rating_aggregate(
        &self,
        product_id: Uuid,
        average_rating: f64,
        review_count: u32,
    ) -> Result<(), StorefrontError> {
        self.aggregates
            .lock()
            .unwrap()
            .insert(product_id, (average_rating, review_count));
        Ok(())
    }
}
