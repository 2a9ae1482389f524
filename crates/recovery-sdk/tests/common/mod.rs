//! Common test utilities for SDK integration tests

#![allow(dead_code)]

use recovery_core::{RawRecord, Value};
use recovery_runtime::model::LogisticParams;
use recovery_runtime::transform::Matrix;
use recovery_runtime::{
    ClassProbabilities, Classifier, ClassifierConfig, SourceDescriptor, SourcedRecord,
};
use recovery_sdk::{EngineConfig, ServingModel, Trainer};
use std::collections::HashMap;
use std::sync::Arc;

/// Classifier that reports the same recovered probability for every row
#[derive(Debug)]
pub struct FixedProbability(pub f64);

impl Classifier for FixedProbability {
    fn name(&self) -> &str {
        "fixed_probability"
    }

    fn fit(&mut self, _x: &Matrix, _y: &[u8]) -> recovery_runtime::Result<()> {
        Ok(())
    }

    fn predict_proba(&self, x: &Matrix) -> recovery_runtime::Result<Vec<ClassProbabilities>> {
        Ok(vec![
            ClassProbabilities {
                not_recovered: 1.0 - self.0,
                recovered: self.0,
            };
            x.n_rows()
        ])
    }
}

pub fn loan(status: &str, amount: f64, grade: &str, paid: f64) -> SourcedRecord {
    let mut raw = RawRecord::new();
    raw.insert("loan_status".into(), Value::from(status));
    raw.insert("loan_amnt".into(), Value::Number(amount));
    raw.insert("funded_amnt".into(), Value::Number(amount));
    raw.insert("out_prncp".into(), Value::Number(amount - paid.min(amount)));
    raw.insert("total_pymnt".into(), Value::Number(paid));
    raw.insert("total_rec_prncp".into(), Value::Number(paid * 0.8));
    raw.insert("grade".into(), Value::from(grade));
    raw.insert("dti".into(), Value::Number(amount / 1000.0));
    raw.insert("total_acc".into(), Value::Number((amount / 1000.0).round()));
    SourcedRecord::new(SourceDescriptor::lending_club(), raw)
}

pub fn statement(limit: f64, pay_0: f64, default_flag: f64) -> SourcedRecord {
    let mut raw = RawRecord::new();
    raw.insert("LIMIT_BAL".into(), Value::Number(limit));
    raw.insert("PAY_0".into(), Value::Number(pay_0));
    raw.insert("BILL_AMT1".into(), Value::Number(limit * 0.3));
    raw.insert("PAY_AMT1".into(), Value::Number(limit * 0.01));
    raw.insert("default payment next month".into(), Value::Number(default_flag));
    SourcedRecord::new(SourceDescriptor::uci_credit_card(), raw)
}

/// Labelled records from both sources, both outcomes well represented
pub fn training_records() -> Vec<SourcedRecord> {
    let mut records = Vec::new();
    for i in 0..40 {
        let amount = 2000.0 + 500.0 * i as f64;
        if i % 3 == 0 {
            records.push(loan("Charged Off", amount, "E", amount * 0.1));
        } else {
            records.push(loan("Fully Paid", amount, "B", amount * 0.9));
        }
        records.push(statement(
            20_000.0 + 1000.0 * i as f64,
            (i % 4) as f64,
            (i % 2) as f64,
        ));
    }
    records
}

pub fn logistic_config() -> EngineConfig {
    EngineConfig::new()
        .with_classifier(ClassifierConfig::LogisticRegression(LogisticParams::default()))
}

/// Model with a real fitted artifact and a fixed-probability classifier
pub fn fixed_model(probability: f64) -> ServingModel {
    let (bundle, _) = Trainer::new(logistic_config())
        .fit(&training_records())
        .unwrap();
    ServingModel::new(
        bundle.transform,
        Arc::new(FixedProbability(probability)),
        bundle.metadata,
    )
    .unwrap()
}

/// Model fitted end to end with logistic regression
pub fn trained_model() -> ServingModel {
    let (bundle, _) = Trainer::new(logistic_config())
        .fit(&training_records())
        .unwrap();
    ServingModel::from_bundle(bundle).unwrap()
}

pub fn features(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

pub fn api_case() -> HashMap<String, f64> {
    features(&[
        ("debt_amount", 5000.0),
        ("days_past_due", 45.0),
        ("credit_score", 650.0),
        ("payment_attempts", 3.0),
        ("communication_count", 5.0),
    ])
}
