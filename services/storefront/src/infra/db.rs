use anyhow::Context as _;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DbBackend, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Statement,
    TransactionTrait,
};
use uuid::Uuid;

use bakehouse_domain::pagination::PageRequest;
use bakehouse_domain::role::Role;
use bakehouse_storefront_schema::{accounts, order_items, orders, products, reviews};

use crate::domain::repository::{
    AccountRepository, CatalogPort, OrderRepository, OrderSequence, OtpChannel, ReviewRepository,
};
use crate::domain::types::{
    Account, FulfillmentStatus, LineItemSnapshot, Order, OrderItem, OrderStats, OtpSlot,
    PaymentStatus, Review,
};
use crate::error::StorefrontError;

// ── Account repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAccountRepository {
    pub db: DatabaseConnection,
}

impl AccountRepository for DbAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, StorefrontError> {
        let model = accounts::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find account by id")?;
        Ok(model.map(account_from_model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StorefrontError> {
        let model = accounts::Entity::find()
            .filter(accounts::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find account by email")?;
        Ok(model.map(account_from_model))
    }

    async fn create(&self, account: &Account) -> Result<(), StorefrontError> {
        account_to_active_model(account)
            .insert(&self.db)
            .await
            .context("create account")?;
        Ok(())
    }

    async fn replace_pending(&self, account: &Account) -> Result<(), StorefrontError> {
        account_to_active_model(account)
            .update(&self.db)
            .await
            .context("replace pending account")?;
        Ok(())
    }

    async fn set_otp(
        &self,
        id: Uuid,
        channel: OtpChannel,
        slot: Option<&OtpSlot>,
    ) -> Result<(), StorefrontError> {
        let code = slot.map(|s| s.code.clone());
        let expires = slot.map(|s| s.expires_at);
        let mut am = accounts::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        match channel {
            OtpChannel::Registration => {
                am.registration_otp = Set(code);
                am.registration_otp_expires = Set(expires);
            }
            OtpChannel::Email => {
                am.email_otp = Set(code);
                am.email_otp_expires = Set(expires);
            }
            OtpChannel::Phone => {
                am.phone_otp = Set(code);
                am.phone_otp_expires = Set(expires);
            }
        }
        am.updated_at = Set(Utc::now());
        am.update(&self.db).await.context("set account otp")?;
        Ok(())
    }

    async fn activate(&self, id: Uuid) -> Result<(), StorefrontError> {
        accounts::ActiveModel {
            id: Set(id),
            is_active: Set(true),
            is_email_verified: Set(true),
            registration_otp: Set(None),
            registration_otp_expires: Set(None),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("activate account")?;
        Ok(())
    }

    async fn mark_verified(&self, id: Uuid, channel: OtpChannel) -> Result<(), StorefrontError> {
        let mut am = accounts::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        match channel {
            OtpChannel::Registration => {
                am.is_email_verified = Set(true);
                am.registration_otp = Set(None);
                am.registration_otp_expires = Set(None);
            }
            OtpChannel::Email => {
                am.is_email_verified = Set(true);
                am.email_otp = Set(None);
                am.email_otp_expires = Set(None);
            }
            OtpChannel::Phone => {
                am.is_phone_verified = Set(true);
                am.phone_otp = Set(None);
                am.phone_otp_expires = Set(None);
            }
        }
        am.updated_at = Set(Utc::now());
        am.update(&self.db).await.context("mark channel verified")?;
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
        let mut am = accounts::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(name) = name {
            am.name = Set(name.to_owned());
        }
        if let Some(phone) = phone {
            am.phone = Set(Some(phone.to_owned()));
            // A changed number has to be re-verified.
            am.is_phone_verified = Set(false);
        }
        if let Some(address) = address {
            am.address = Set(Some(address.to_owned()));
        }
        if let Some(postal_code) = postal_code {
            am.postal_code = Set(Some(postal_code.to_owned()));
        }
        am.updated_at = Set(Utc::now());
        am.update(&self.db).await.context("update profile")?;
        Ok(())
    }
}

fn otp_slot(code: Option<String>, expires: Option<DateTime<Utc>>) -> Option<OtpSlot> {
    match (code, expires) {
        (Some(code), Some(expires_at)) => Some(OtpSlot { code, expires_at }),
        _ => None,
    }
}

fn account_from_model(model: accounts::Model) -> Account {
    Account {
        id: model.id,
        name: model.name,
        email: model.email,
        password_hash: model.password_hash,
        phone: model.phone,
        address: model.address,
        postal_code: model.postal_code,
        role: Role::from_u8(model.role as u8).unwrap_or_default(),
        is_active: model.is_active,
        is_email_verified: model.is_email_verified,
        is_phone_verified: model.is_phone_verified,
        registration_otp: otp_slot(model.registration_otp, model.registration_otp_expires),
        email_otp: otp_slot(model.email_otp, model.email_otp_expires),
        phone_otp: otp_slot(model.phone_otp, model.phone_otp_expires),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn account_to_active_model(account: &Account) -> accounts::ActiveModel {
    accounts::ActiveModel {
        id: Set(account.id),
        name: Set(account.name.clone()),
        email: Set(account.email.clone()),
        password_hash: Set(account.password_hash.clone()),
        phone: Set(account.phone.clone()),
        address: Set(account.address.clone()),
        postal_code: Set(account.postal_code.clone()),
        role: Set(account.role.as_u8() as i16),
        is_active: Set(account.is_active),
        is_email_verified: Set(account.is_email_verified),
        is_phone_verified: Set(account.is_phone_verified),
        registration_otp: Set(account.registration_otp.as_ref().map(|s| s.code.clone())),
        registration_otp_expires: Set(account.registration_otp.as_ref().map(|s| s.expires_at)),
        email_otp: Set(account.email_otp.as_ref().map(|s| s.code.clone())),
        email_otp_expires: Set(account.email_otp.as_ref().map(|s| s.expires_at)),
        phone_otp: Set(account.phone_otp.as_ref().map(|s| s.code.clone())),
        phone_otp_expires: Set(account.phone_otp.as_ref().map(|s| s.expires_at)),
        created_at: Set(account.created_at),
        updated_at: Set(account.updated_at),
    }
}

// ── Order sequence ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOrderSequence {
    pub db: DatabaseConnection,
}

impl OrderSequence for DbOrderSequence {
    async fn next_order_number(&self) -> Result<i64, StorefrontError> {
        // Single-statement fetch-and-increment; Postgres row locking makes
        // concurrent calls serialize on the counter row.
        let row = self
            .db
            .query_one(Statement::from_string(
                DbBackend::Postgres,
                "UPDATE order_sequences SET last_number = last_number + 1 \
                 WHERE id = 1 RETURNING last_number",
            ))
            .await
            .context("advance order sequence")?
            .context("order sequence row missing")?;
        let value: i64 = row
            .try_get("", "last_number")
            .context("read order sequence value")?;
        Ok(value)
    }
}

// ── Order repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOrderRepository {
    pub db: DatabaseConnection,
}

impl OrderRepository for DbOrderRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, StorefrontError> {
        let Some(model) = orders::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find order by id")?
        else {
            return Ok(None);
        };
        let items = order_items::Entity::find()
            .filter(order_items::Column::OrderId.eq(id))
            .all(&self.db)
            .await
            .context("load order items")?;
        Ok(Some(order_from_model(model, items)?))
    }

    async fn create(&self, order: &Order) -> Result<(), StorefrontError> {
        let txn = self.db.begin().await.context("begin order transaction")?;

        orders::ActiveModel {
            id: Set(order.id),
            order_number: Set(order.order_number.clone()),
            account_id: Set(order.account_id),
            customer_name: Set(order.customer_name.clone()),
            customer_email: Set(order.customer_email.clone()),
            customer_phone: Set(order.customer_phone.clone()),
            customer_address: Set(order.customer_address.clone()),
            customer_postal_code: Set(order.customer_postal_code.clone()),
            subtotal: Set(order.subtotal),
            delivery_fee: Set(order.delivery_fee),
            total: Set(order.total),
            payment_id: Set(order.payment_id.clone()),
            payment_status: Set(order.payment_status.as_str().to_owned()),
            status: Set(order.status.as_str().to_owned()),
            created_at: Set(order.created_at),
            updated_at: Set(order.updated_at),
        }
        .insert(&txn)
        .await
        .context("insert order")?;

        for item in &order.items {
            order_items::ActiveModel {
                id: Set(Uuid::new_v4()),
                order_id: Set(order.id),
                product_id: Set(item.product_id),
                name: Set(item.name.clone()),
                price: Set(item.price),
                quantity: Set(item.quantity as i32),
                image: Set(item.image.clone()),
            }
            .insert(&txn)
            .await
            .context("insert order item")?;
        }

        txn.commit().await.context("commit order transaction")?;
        Ok(())
    }

    async fn list_for_account(
        &self,
        account_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<Order>, StorefrontError> {
        let models = orders::Entity::find()
            .filter(orders::Column::AccountId.eq(account_id))
            .order_by_desc(orders::Column::CreatedAt)
            .offset(page.offset())
            .limit(u64::from(page.per_page))
            .all(&self.db)
            .await
            .context("list orders for account")?;
        self.attach_items(models).await
    }

    async fn list_for_phone(
        &self,
        phone: &str,
        page: PageRequest,
    ) -> Result<Vec<Order>, StorefrontError> {
        let models = orders::Entity::find()
            .filter(orders::Column::AccountId.is_null())
            .filter(orders::Column::CustomerPhone.eq(phone))
            .order_by_desc(orders::Column::CreatedAt)
            .offset(page.offset())
            .limit(u64::from(page.per_page))
            .all(&self.db)
            .await
            .context("list guest orders by phone")?;
        self.attach_items(models).await
    }

    async fn list_all(
        &self,
        status: Option<FulfillmentStatus>,
        page: PageRequest,
    ) -> Result<(Vec<Order>, u64), StorefrontError> {
        let mut query = orders::Entity::find();
        if let Some(status) = status {
            query = query.filter(orders::Column::Status.eq(status.as_str()));
        }
        let total = query
            .clone()
            .count(&self.db)
            .await
            .context("count orders")?;
        let models = query
            .order_by_desc(orders::Column::CreatedAt)
            .offset(page.offset())
            .limit(u64::from(page.per_page))
            .all(&self.db)
            .await
            .context("list all orders")?;
        Ok((self.attach_items(models).await?, total))
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: FulfillmentStatus,
        payment_status: Option<PaymentStatus>,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StorefrontError> {
        let mut am = orders::ActiveModel {
            id: Set(id),
            status: Set(status.as_str().to_owned()),
            updated_at: Set(updated_at),
            ..Default::default()
        };
        if let Some(ps) = payment_status {
            am.payment_status = Set(ps.as_str().to_owned());
        }
        am.update(&self.db).await.context("update order status")?;
        Ok(())
    }

    async fn stats(&self) -> Result<OrderStats, StorefrontError> {
        let total_orders = orders::Entity::find()
            .count(&self.db)
            .await
            .context("count all orders")?;
        let paid_orders = orders::Entity::find()
            .filter(orders::Column::PaymentStatus.eq(PaymentStatus::Paid.as_str()))
            .count(&self.db)
            .await
            .context("count paid orders")?;
        let pending_orders = orders::Entity::find()
            .filter(orders::Column::Status.eq(FulfillmentStatus::Pending.as_str()))
            .count(&self.db)
            .await
            .context("count pending orders")?;
        let delivered_orders = orders::Entity::find()
            .filter(orders::Column::Status.eq(FulfillmentStatus::Delivered.as_str()))
            .count(&self.db)
            .await
            .context("count delivered orders")?;

        let revenue: Option<Decimal> = orders::Entity::find()
            .select_only()
            .column_as(orders::Column::Total.sum(), "revenue")
            .filter(orders::Column::PaymentStatus.eq(PaymentStatus::Paid.as_str()))
            .into_tuple()
            .one(&self.db)
            .await
            .context("sum paid order totals")?
            .flatten();

        let recent_models = orders::Entity::find()
            .order_by_desc(orders::Column::CreatedAt)
            .limit(5)
            .all(&self.db)
            .await
            .context("load recent orders")?;
        let recent_orders = self.attach_items(recent_models).await?;

        Ok(OrderStats {
            total_orders,
            paid_orders,
            pending_orders,
            delivered_orders,
            total_revenue: revenue.unwrap_or(Decimal::ZERO),
            recent_orders,
        })
    }
}

impl DbOrderRepository {
    /// Fetch items for a page of orders in one query and zip them back.
    async fn attach_items(
        &self,
        models: Vec<orders::Model>,
    ) -> Result<Vec<Order>, StorefrontError> {
        let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
        let mut items_by_order: std::collections::HashMap<Uuid, Vec<order_items::Model>> =
            std::collections::HashMap::new();
        if !ids.is_empty() {
            let items = order_items::Entity::find()
                .filter(order_items::Column::OrderId.is_in(ids))
                .all(&self.db)
                .await
                .context("load order items")?;
            for item in items {
                items_by_order.entry(item.order_id).or_default().push(item);
            }
        }
        models
            .into_iter()
            .map(|m| {
                let items = items_by_order.remove(&m.id).unwrap_or_default();
                order_from_model(m, items)
            })
            .collect()
    }
}

fn order_from_model(
    model: orders::Model,
    items: Vec<order_items::Model>,
) -> Result<Order, StorefrontError> {
    let status = FulfillmentStatus::parse(&model.status).ok_or_else(|| {
        StorefrontError::Internal(anyhow::anyhow!("unknown order status: {}", model.status))
    })?;
    let payment_status = PaymentStatus::parse(&model.payment_status).ok_or_else(|| {
        StorefrontError::Internal(anyhow::anyhow!(
            "unknown payment status: {}",
            model.payment_status
        ))
    })?;
    Ok(Order {
        id: model.id,
        order_number: model.order_number,
        account_id: model.account_id,
        customer_name: model.customer_name,
        customer_email: model.customer_email,
        customer_phone: model.customer_phone,
        customer_address: model.customer_address,
        customer_postal_code: model.customer_postal_code,
        items: items
            .into_iter()
            .map(|i| OrderItem {
                product_id: i.product_id,
                name: i.name,
                price: i.price,
                quantity: i.quantity as u32,
                image: i.image,
            })
            .collect(),
        subtotal: model.subtotal,
        delivery_fee: model.delivery_fee,
        total: model.total,
        payment_id: model.payment_id,
        payment_status,
        status,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Review repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbReviewRepository {
    pub db: DatabaseConnection,
}

impl ReviewRepository for DbReviewRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Review>, StorefrontError> {
        let model = reviews::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find review by id")?;
        Ok(model.map(review_from_model))
    }

    async fn find_by_product_and_order(
        &self,
        product_id: Uuid,
        order_id: Uuid,
    ) -> Result<Option<Review>, StorefrontError> {
        let model = reviews::Entity::find()
            .filter(reviews::Column::ProductId.eq(product_id))
            .filter(reviews::Column::OrderId.eq(order_id))
            .one(&self.db)
            .await
            .context("find review by product and order")?;
        Ok(model.map(review_from_model))
    }

    async fn create(&self, review: &Review) -> Result<(), StorefrontError> {
        reviews::ActiveModel {
            id: Set(review.id),
            product_id: Set(review.product_id),
            order_id: Set(review.order_id),
            account_id: Set(review.account_id),
            customer_name: Set(review.customer_name.clone()),
            rating: Set(review.rating as i16),
            title: Set(review.title.clone()),
            comment: Set(review.comment.clone()),
            verified: Set(review.verified),
            created_at: Set(review.created_at),
        }
        .insert(&self.db)
        .await
        .context("create review")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StorefrontError> {
        let result = reviews::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete review")?;
        Ok(result.rows_affected > 0)
    }

    async fn list_for_product(
        &self,
        product_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<Review>, StorefrontError> {
        let models = reviews::Entity::find()
            .filter(reviews::Column::ProductId.eq(product_id))
            .order_by_desc(reviews::Column::CreatedAt)
            .offset(page.offset())
            .limit(u64::from(page.per_page))
            .all(&self.db)
            .await
            .context("list reviews for product")?;
        Ok(models.into_iter().map(review_from_model).collect())
    }

    async fn list_for_order(&self, order_id: Uuid) -> Result<Vec<Review>, StorefrontError> {
        let models = reviews::Entity::find()
            .filter(reviews::Column::OrderId.eq(order_id))
            .all(&self.db)
            .await
            .context("list reviews for order")?;
        Ok(models.into_iter().map(review_from_model).collect())
    }

    async fn ratings_for_product(&self, product_id: Uuid) -> Result<Vec<u8>, StorefrontError> {
        let ratings: Vec<i16> = reviews::Entity::find()
            .select_only()
            .column(reviews::Column::Rating)
            .filter(reviews::Column::ProductId.eq(product_id))
            .into_tuple()
            .all(&self.db)
            .await
            .context("load ratings for product")?;
        Ok(ratings.into_iter().map(|r| r as u8).collect())
    }
}

fn review_from_model(model: reviews::Model) -> Review {
    Review {
        id: model.id,
        product_id: model.product_id,
        order_id: model.order_id,
        account_id: model.account_id,
        customer_name: model.customer_name,
        rating: model.rating as u8,
        title: model.title,
        comment: model.comment,
        verified: model.verified,
        created_at: model.created_at,
    }
}

// ── Catalog port ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCatalog {
    pub db: DatabaseConnection,
}

impl CatalogPort for DbCatalog {
    async fn line_item_snapshot(
        &self,
        product_id: Uuid,
    ) -> Result<Option<LineItemSnapshot>, StorefrontError> {
        let model = products::Entity::find_by_id(product_id)
            .one(&self.db)
            .await
            .context("find product")?;
        Ok(model.map(|p| LineItemSnapshot {
            name: p.name,
            price: p.price,
            image: p.image,
        }))
    }

    async fn set_rating_aggregate(
        &self,
        product_id: Uuid,
        average_rating: f64,
        review_count: u32,
    ) -> Result<(), StorefrontError> {
        products::ActiveModel {
            id: Set(product_id),
            average_rating: Set(average_rating),
            review_count: Set(review_count as i32),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("write rating aggregate")?;
        Ok(())
    }
}
