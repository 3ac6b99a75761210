//! Review submission and product rating aggregation
//!
//! Submitting a review is four store calls in sequence: persist the review,
//! append its id to the product, reload the product's reviews, and store the
//! recomputed average. The steps are not atomic. A failure part-way leaves
//! the review persisted with a stale reference list or average, which the
//! next submission for the same product repairs since the average is always
//! computed from every review on record.

use mercato_core::{average_score, NewReview, ProductId, Review};

use crate::error::{Error, Result};
use crate::store::MarketStore;

pub struct ReviewAggregation<'a> {
    store: &'a dyn MarketStore,
}

impl<'a> ReviewAggregation<'a> {
    pub fn new(store: &'a dyn MarketStore) -> Self {
        Self { store }
    }

    /// Persist a review and refresh the product's aggregate.
    pub async fn submit(&self, input: NewReview) -> Result<Review> {
        if self.store.get_user(input.user_id).await?.is_none() {
            return Err(Error::invalid_reference("user", vec![input.user_id]));
        }
        if self.store.get_product(input.product_id).await?.is_none() {
            return Err(Error::invalid_reference("product", vec![input.product_id]));
        }

        let review = self.store.insert_review(&input).await?;

        if !self
            .store
            .append_review_ref(review.product_id, review.id)
            .await?
        {
            tracing::warn!(
                review_id = review.id,
                product_id = review.product_id,
                "product vanished before review reference was appended"
            );
        }

        let average = self.recompute_average(review.product_id).await?;
        tracing::info!(
            review_id = review.id,
            product_id = review.product_id,
            score = review.score.get(),
            average,
            "review recorded"
        );

        Ok(review)
    }

    /// Recompute a product's average from every review on record and store it.
    pub async fn recompute_average(&self, product_id: ProductId) -> Result<f64> {
        let reviews = self.store.reviews_for_product(product_id).await?;
        let average = average_score(reviews.iter().map(|r| r.score));
        if !self.store.set_average_score(product_id, average).await? {
            return Err(Error::not_found("product", product_id));
        }
        tracing::debug!(product_id, reviews = reviews.len(), average, "average score refreshed");
        Ok(average)
    }
}
