//! Source-aware feature engineer
//!
//! Maps raw records from any registered source dataset onto the canonical
//! schema. Each source is a [`SourceMapping`] registered under its
//! descriptor id; an unknown descriptor is a schema error for that record
//! only.

use super::derived::add_derived_features;
use super::lending_club::LendingClubMapping;
use super::uci_credit_card::UciCreditCardMapping;
use crate::error::Result;
use recovery_core::{
    CanonicalRecord, CoreError, Frame, Label, LabeledRecord, RawRecord,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Identifies which dataset a raw record comes from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceDescriptor {
    id: String,
}

impl SourceDescriptor {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn lending_club() -> Self {
        Self::new(LendingClubMapping::ID)
    }

    pub fn uci_credit_card() -> Self {
        Self::new(UciCreditCardMapping::ID)
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for SourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// A raw record tagged with its source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcedRecord {
    pub source: SourceDescriptor,
    pub record: RawRecord,
}

impl SourcedRecord {
    pub fn new(source: SourceDescriptor, record: RawRecord) -> Self {
        Self { source, record }
    }
}

/// Per-source mapping onto the canonical schema.
///
/// `map` must be total: every canonical field is populated, falling back to
/// the field's declared default, and no computation may produce a
/// non-finite value.
pub trait SourceMapping: Send + Sync {
    /// Descriptor id the mapping is registered under
    fn id(&self) -> &'static str;

    /// Canonical features of a raw record
    fn map(&self, raw: &RawRecord) -> CanonicalRecord;

    /// Training outcome of a raw record
    fn label(&self, raw: &RawRecord) -> Label;
}

/// Registry of source mappings
#[derive(Clone)]
pub struct FeatureEngineer {
    mappings: HashMap<String, Arc<dyn SourceMapping>>,
}

impl FeatureEngineer {
    /// Engineer with the built-in sources registered
    pub fn new() -> Self {
        Self::empty()
            .with_mapping(LendingClubMapping)
            .with_mapping(UciCreditCardMapping)
    }

    /// Engineer with no sources registered
    pub fn empty() -> Self {
        Self {
            mappings: HashMap::new(),
        }
    }

    /// Register a mapping, replacing any mapping with the same id
    pub fn with_mapping(mut self, mapping: impl SourceMapping + 'static) -> Self {
        self.mappings
            .insert(mapping.id().to_string(), Arc::new(mapping));
        self
    }

    /// Registered descriptor ids, sorted
    pub fn sources(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.mappings.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    fn mapping(&self, source: &SourceDescriptor) -> Result<&Arc<dyn SourceMapping>> {
        self.mappings
            .get(source.id())
            .ok_or_else(|| CoreError::Schema(source.id().to_string()).into())
    }

    /// Map one raw record onto the canonical schema
    pub fn map(&self, raw: &RawRecord, source: &SourceDescriptor) -> Result<CanonicalRecord> {
        Ok(self.mapping(source)?.map(raw))
    }

    /// Map one raw record and attach its training label
    pub fn map_labeled(&self, raw: &RawRecord, source: &SourceDescriptor) -> Result<LabeledRecord> {
        let mapping = self.mapping(source)?;
        Ok(LabeledRecord::new(mapping.map(raw), mapping.label(raw)))
    }

    /// Map a batch; a failing record does not affect the others
    pub fn map_batch(&self, records: &[SourcedRecord]) -> Vec<Result<LabeledRecord>> {
        records
            .iter()
            .map(|r| self.map_labeled(&r.record, &r.source))
            .collect()
    }

    /// Canonical training frame with label and derived columns.
    ///
    /// Records with an unknown source are skipped with a warning.
    pub fn build_training_frame(&self, records: &[SourcedRecord]) -> Result<Frame> {
        let mut labeled = Vec::with_capacity(records.len());
        let mut skipped = 0usize;

        for (index, result) in self.map_batch(records).into_iter().enumerate() {
            match result {
                Ok(record) => labeled.push(record),
                Err(e) => {
                    skipped += 1;
                    tracing::warn!(index, error = %e, "Skipping record");
                }
            }
        }

        let mut frame = Frame::from_labeled_records(&labeled);
        add_derived_features(&mut frame)?;

        tracing::info!(
            rows = frame.n_rows(),
            columns = frame.n_cols(),
            skipped,
            "Built training frame"
        );
        Ok(frame)
    }
}

impl Default for FeatureEngineer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FeatureEngineer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureEngineer")
            .field("sources", &self.sources())
            .finish()
    }
}
