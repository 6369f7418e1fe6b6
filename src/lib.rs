// src/lib.rs

pub mod core;
pub mod errors;
pub mod persistence;
pub mod recorder;

pub use crate::core::engine::PredictorEngine;
pub use crate::core::predict::PredictionEngine;
pub use crate::core::scoring::ScoringConfig;
pub use crate::core::store::VocabularyStore;
pub use crate::core::types::{PredictionRequest, VocabularyEntry, WordOrigin, WordWheel};
pub use crate::errors::InvalidWordError;
pub use crate::recorder::UsageRecorder;
