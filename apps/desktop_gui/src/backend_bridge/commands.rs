//! Backend commands queued from UI to backend worker.

use shared::{domain::ProductQuery, protocol::PredictionEndpoint};

pub enum BackendCommand {
    Predict {
        generation: u64,
        endpoint: PredictionEndpoint,
        query: ProductQuery,
    },
}
