use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use bakehouse_domain::pagination::PageRequest;
use bakehouse_domain::rating::average_to_one_decimal;

use crate::domain::repository::{CatalogPort, OrderRepository, ReviewRepository};
use crate::domain::types::{FulfillmentStatus, Review};
use crate::error::StorefrontError;

/// Recompute a product's denormalized rating aggregate from its stored
/// reviews and write it to the catalog. Called after every review
/// insert or delete; an empty review set resets the aggregate to zero.
pub async fn recompute_rating_aggregate<R, C>(
    reviews: &R,
    catalog: &C,
    product_id: Uuid,
) -> Result<(), StorefrontError>
where
    R: ReviewRepository,
    C: CatalogPort,
{
    let ratings = reviews.ratings_for_product(product_id).await?;
    let average = average_to_one_decimal(&ratings);
    let count = u32::try_from(ratings.len()).unwrap_or(u32::MAX);
    catalog.set_rating_aggregate(product_id, average, count).await
}

// ── SubmitReview ─────────────────────────────────────────────────────────────

pub struct SubmitReviewInput {
    pub product_id: Uuid,
    pub order_id: Uuid,
    pub rating: u8,
    pub title: Option<String>,
    pub comment: Option<String>,
}

pub struct SubmitReviewUseCase<R, O, C>
where
    R: ReviewRepository,
    O: OrderRepository,
    C: CatalogPort,
{
    pub reviews: R,
    pub orders: O,
    pub catalog: C,
}

impl<R, O, C> SubmitReviewUseCase<R, O, C>
where
    R: ReviewRepository,
    O: OrderRepository,
    C: CatalogPort,
{
    pub async fn execute(
        &self,
        requester: Option<Uuid>,
        input: SubmitReviewInput,
    ) -> Result<Review, StorefrontError> {
        if !(1..=5).contains(&input.rating) {
            return Err(StorefrontError::Validation(
                "rating must be between 1 and 5",
            ));
        }
        if input.title.as_ref().is_some_and(|t| t.chars().count() > 100) {
            return Err(StorefrontError::Validation(
                "title must be at most 100 characters",
            ));
        }
        if input
            .comment
            .as_ref()
            .is_some_and(|c| c.chars().count() > 500)
        {
            return Err(StorefrontError::Validation(
                "comment must be at most 500 characters",
            ));
        }

        let order = self
            .orders
            .find_by_id(input.order_id)
            .await?
            .ok_or(StorefrontError::NotFound("order not found"))?;

        if order.status != FulfillmentStatus::Delivered {
            return Err(StorefrontError::Precondition(
                "order has not been delivered yet",
            ));
        }
        if !order.contains_product(input.product_id) {
            return Err(StorefrontError::Precondition(
                "product is not part of this order",
            ));
        }

        if self
            .reviews
            .find_by_product_and_order(input.product_id, input.order_id)
            .await?
            .is_some()
        {
            return Err(StorefrontError::Conflict(
                "this order already has a review for this product",
            ));
        }

        let review = Review {
            id: Uuid::new_v4(),
            product_id: input.product_id,
            order_id: input.order_id,
            // Attributed to the signed-in caller when there is one, else
            // to whoever owns the order.
            account_id: requester.or(order.account_id),
            // Name comes from the order snapshot, not the live account.
            customer_name: order.customer_name.clone(),
            rating: input.rating,
            title: input.title,
            comment: input.comment,
            verified: true,
            created_at: Utc::now(),
        };

        self.reviews.create(&review).await?;
        recompute_rating_aggregate(&self.reviews, &self.catalog, input.product_id).await?;
        Ok(review)
    }
}

// ── DeleteReview ─────────────────────────────────────────────────────────────

pub struct DeleteReviewUseCase<R, C>
where
    R: ReviewRepository,
    C: CatalogPort,
{
    pub reviews: R,
    pub catalog: C,
}

impl<R, C> DeleteReviewUseCase<R, C>
where
    R: ReviewRepository,
    C: CatalogPort,
{
    pub async fn execute(
        &self,
        review_id: Uuid,
        requester: Option<Uuid>,
        requester_is_admin: bool,
    ) -> Result<(), StorefrontError> {
        let review = self
            .reviews
            .find_by_id(review_id)
            .await?
            .ok_or(StorefrontError::NotFound("review not found"))?;

        // Guest reviews are deletable by anyone; owned reviews only by
        // their owner or an admin.
        if !requester_is_admin {
            if let Some(owner) = review.account_id {
                if requester != Some(owner) {
                    return Err(StorefrontError::Forbidden("not your review"));
                }
            }
        }

        self.reviews.delete(review.id).await?;
        recompute_rating_aggregate(&self.reviews, &self.catalog, review.product_id).await
    }
}

// ── CheckReview ──────────────────────────────────────────────────────────────

/// Look up the review already written for one (order, product) pair, if any.
pub struct CheckReviewUseCase<R: ReviewRepository> {
    pub reviews: R,
}

impl<R: ReviewRepository> CheckReviewUseCase<R> {
    pub async fn execute(
        &self,
        order_id: Uuid,
        product_id: Uuid,
    ) -> Result<Option<Review>, StorefrontError> {
        self.reviews
            .find_by_product_and_order(product_id, order_id)
            .await
    }
}

// ── ListOrderReviews ─────────────────────────────────────────────────────────

/// Reviews already written against one order, keyed by product. Clients use
/// this to show which line items can still be reviewed. An unknown order id
/// simply yields an empty map.
pub struct ListOrderReviewsUseCase<R: ReviewRepository> {
    pub reviews: R,
}

impl<R: ReviewRepository> ListOrderReviewsUseCase<R> {
    pub async fn execute(
        &self,
        order_id: Uuid,
    ) -> Result<HashMap<Uuid, Review>, StorefrontError> {
        let reviews = self.reviews.list_for_order(order_id).await?;
        Ok(reviews.into_iter().map(|r| (r.product_id, r)).collect())
    }
}

// ── ListProductReviews ───────────────────────────────────────────────────────

pub struct ListProductReviewsUseCase<R: ReviewRepository> {
    pub reviews: R,
}

impl<R: ReviewRepository> ListProductReviewsUseCase<R> {
    pub async fn execute(
        &self,
        product_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<Review>, StorefrontError> {
        self.reviews.list_for_product(product_id, page.clamped()).await
    }
}
