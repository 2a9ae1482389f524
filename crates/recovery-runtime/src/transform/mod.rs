//! Train/serve transforms
//!
//! Alignment, categorical encoding and numeric normalization, bundled into
//! the persisted [`TransformArtifact`].

pub mod aligner;
pub mod artifact;
pub mod encoder;
pub mod matrix;
pub mod normalizer;

pub use aligner::{align, MISSING_COLUMN_FILL};
pub use artifact::{TransformArtifact, TransformFit};
pub use encoder::{CategoricalEncoder, CodeTable, UNSEEN_CODE};
pub use matrix::Matrix;
pub use normalizer::{ColumnStats, NumericNormalizer, SCALE_FLOOR};
