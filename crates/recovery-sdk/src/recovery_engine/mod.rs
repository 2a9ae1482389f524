//! RecoveryEngine - serving entry point

mod engine;
mod types;

pub use engine::RecoveryEngine;
pub use types::{PredictionRequest, ServingModel};
