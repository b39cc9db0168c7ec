use std::sync::Arc;

use log::Logger;

use crate::sentiment::SentimentScorer;
use crate::store::ReviewStore;

pub type SharedStore = dyn ReviewStore + Send + Sync;

/// Everything a request handler needs, cloned into each filter.
#[derive(Clone)]
pub struct Environment {
    pub logger: Arc<Logger>,
    pub store: Arc<SharedStore>,
    pub scorer: Arc<SentimentScorer>,
}

impl Environment {
    pub fn new(logger: Arc<Logger>, store: Arc<SharedStore>, scorer: Arc<SentimentScorer>) -> Self {
        Self {
            logger,
            store,
            scorer,
        }
    }
}
