use std::sync::RwLock;

use futures::future::{BoxFuture, FutureExt};

use crate::errors::BackendError;
use crate::review::Review;
use crate::store::ReviewStore;

/// An in-memory store with no backing file, for tests.
#[derive(Default)]
pub struct MockStore {
    reviews: RwLock<Vec<Review>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reviews(reviews: Vec<Review>) -> Self {
        MockStore {
            reviews: RwLock::new(reviews),
        }
    }
}

impl ReviewStore for MockStore {
    fn snapshot(&self) -> Vec<Review> {
        self.reviews.read().unwrap().clone()
    }

    fn count(&self) -> usize {
        self.reviews.read().unwrap().len()
    }

    fn append(&self, review: Review) -> BoxFuture<Result<(), BackendError>> {
        mock_append(self, review).boxed()
    }
}

async fn mock_append(store: &MockStore, review: Review) -> Result<(), BackendError> {
    store.reviews.write().unwrap().push(review);

    Ok(())
}
