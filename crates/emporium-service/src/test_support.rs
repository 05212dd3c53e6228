//! Shared in-memory doubles for service-layer tests.
//!
//! The store double counts reads and writes so tests can assert how often
//! the source of truth was consulted; the cache double records entries in a
//! plain map and can be told to fail specific operations.

use crate::cache::Cache;
use async_trait::async_trait;
use emporium_core::{EmporiumError, EmporiumResult, Product, ProductId, Review, ReviewId};
use emporium_repository::{ProductRepository, ReviewRepository};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// In-memory store double implementing both repository traits.
#[derive(Default)]
pub(crate) struct MockStore {
    products: Mutex<HashMap<i64, Product>>,
    reviews: Mutex<HashMap<i64, Review>>,
    next_product_id: AtomicI64,
    next_review_id: AtomicI64,
    pub product_reads: AtomicUsize,
    pub product_writes: AtomicUsize,
    pub review_reads: AtomicUsize,
    fail_product_writes: AtomicBool,
}

impl MockStore {
    pub(crate) fn new() -> Self {
        Self {
            next_product_id: AtomicI64::new(1),
            next_review_id: AtomicI64::new(1),
            ..Self::default()
        }
    }

    /// Makes every subsequent product write fail with a database error.
    pub(crate) fn fail_product_writes(&self) {
        self.fail_product_writes.store(true, Ordering::SeqCst);
    }

    /// Inserts a review directly, bypassing the service layer.
    pub(crate) fn insert_review_directly(&self, review: Review) -> Review {
        let id = self.next_review_id.fetch_add(1, Ordering::SeqCst);
        let mut stored = review;
        stored.id = ReviewId::new(id);
        self.reviews
            .lock()
            .unwrap()
            .insert(id, stored.clone());
        stored
    }

    /// Overwrites a product's stored average rating, bypassing the
    /// service layer.
    pub(crate) fn poison_average_rating(&self, id: ProductId, value: f64) {
        let mut products = self.products.lock().unwrap();
        let product = products
            .get_mut(&id.into_inner())
            .expect("product must exist");
        product.average_rating = value;
    }

    pub(crate) fn stored_average_rating(&self, id: ProductId) -> f64 {
        self.products
            .lock()
            .unwrap()
            .get(&id.into_inner())
            .expect("product must exist")
            .average_rating
    }

    pub(crate) fn contains_review(&self, id: ReviewId) -> bool {
        self.reviews.lock().unwrap().contains_key(&id.into_inner())
    }

    pub(crate) fn contains_product(&self, id: ProductId) -> bool {
        self.products.lock().unwrap().contains_key(&id.into_inner())
    }
}

#[async_trait]
impl ProductRepository for MockStore {
    async fn create(&self, product: &Product) -> EmporiumResult<Product> {
        if self.fail_product_writes.load(Ordering::SeqCst) {
            return Err(EmporiumError::Database("simulated write failure".to_string()));
        }
        self.product_writes.fetch_add(1, Ordering::SeqCst);
        let id = self.next_product_id.fetch_add(1, Ordering::SeqCst);
        let mut stored = product.clone();
        stored.id = ProductId::new(id);
        self.products.lock().unwrap().insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: ProductId) -> EmporiumResult<Option<Product>> {
        self.product_reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.products.lock().unwrap().get(&id.into_inner()).cloned())
    }

    async fn find_all_with_reviews(&self) -> EmporiumResult<Vec<Product>> {
        self.product_reads.fetch_add(1, Ordering::SeqCst);
        let mut products: Vec<Product> = self.products.lock().unwrap().values().cloned().collect();
        products.sort_by_key(|p| p.id.into_inner());

        let reviews = self.reviews.lock().unwrap();
        for product in &mut products {
            let mut owned: Vec<Review> = reviews
                .values()
                .filter(|r| r.product_id == product.id)
                .cloned()
                .collect();
            owned.sort_by_key(|r| r.id.into_inner());
            product.reviews = owned;
        }
        Ok(products)
    }

    async fn update(&self, product: &Product) -> EmporiumResult<Product> {
        if self.fail_product_writes.load(Ordering::SeqCst) {
            return Err(EmporiumError::Database("simulated write failure".to_string()));
        }
        self.product_writes.fetch_add(1, Ordering::SeqCst);
        let mut products = self.products.lock().unwrap();
        let id = product.id.into_inner();
        if !products.contains_key(&id) {
            return Err(EmporiumError::not_found("Product", product.id));
        }
        products.insert(id, product.clone());
        Ok(product.clone())
    }

    async fn delete(&self, id: ProductId) -> EmporiumResult<bool> {
        let removed = self
            .products
            .lock()
            .unwrap()
            .remove(&id.into_inner())
            .is_some();
        if removed {
            self.reviews
                .lock()
                .unwrap()
                .retain(|_, r| r.product_id != id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl ReviewRepository for MockStore {
    async fn create(&self, review: &Review) -> EmporiumResult<Review> {
        let id = self.next_review_id.fetch_add(1, Ordering::SeqCst);
        let mut stored = review.clone();
        stored.id = ReviewId::new(id);
        self.reviews.lock().unwrap().insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: ReviewId) -> EmporiumResult<Option<Review>> {
        self.review_reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.reviews.lock().unwrap().get(&id.into_inner()).cloned())
    }

    async fn find_by_product_id(&self, product_id: ProductId) -> EmporiumResult<Vec<Review>> {
        self.review_reads.fetch_add(1, Ordering::SeqCst);
        let mut owned: Vec<Review> = self
            .reviews
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.product_id == product_id)
            .cloned()
            .collect();
        owned.sort_by_key(|r| r.id.into_inner());
        Ok(owned)
    }

    async fn update(&self, review: &Review) -> EmporiumResult<Review> {
        let mut reviews = self.reviews.lock().unwrap();
        let id = review.id.into_inner();
        if !reviews.contains_key(&id) {
            return Err(EmporiumError::not_found("Review", review.id));
        }
        reviews.insert(id, review.clone());
        Ok(review.clone())
    }

    async fn delete(&self, id: ReviewId) -> EmporiumResult<bool> {
        Ok(self
            .reviews
            .lock()
            .unwrap()
            .remove(&id.into_inner())
            .is_some())
    }
}

/// In-memory cache double. Entries never expire; the recorded TTL of the
/// most recent write is kept for assertions.
#[derive(Default)]
pub(crate) struct MockCache {
    entries: Mutex<HashMap<String, String>>,
    pub set_calls: AtomicUsize,
    pub last_ttl: Mutex<Option<Duration>>,
    fail_sets: AtomicBool,
    fail_deletes: AtomicBool,
}

impl MockCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent set fail with a cache error.
    pub(crate) fn fail_sets(&self) {
        self.fail_sets.store(true, Ordering::SeqCst);
    }

    /// Makes every subsequent delete fail with a cache error.
    pub(crate) fn fail_deletes(&self) {
        self.fail_deletes.store(true, Ordering::SeqCst);
    }

    /// Seeds a raw entry, bypassing the service layer.
    pub(crate) fn prime(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    pub(crate) fn entry(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }
}

#[async_trait]
impl Cache for MockCache {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn get_raw(&self, key: &str) -> EmporiumResult<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Option<Duration>) -> EmporiumResult<()> {
        if self.fail_sets.load(Ordering::SeqCst) {
            return Err(EmporiumError::Cache("simulated set failure".to_string()));
        }
        self.set_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_ttl.lock().unwrap() = ttl;
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> EmporiumResult<bool> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(EmporiumError::Cache("simulated delete failure".to_string()));
        }
        Ok(self.entries.lock().unwrap().remove(key).is_some())
    }
}
