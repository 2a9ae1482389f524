//! Offline jobs

use crate::config::WorkerConfig;
use anyhow::{Context, Result};
use recovery_sdk::{RecoveryEngineBuilder, RiskDecision, SourcedRecord, Trainer, TrainingOutcome};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::info;

/// One output line of a scoring job
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScoredLine {
    Decision {
        line: usize,
        #[serde(flatten)]
        decision: RiskDecision,
    },
    Failed {
        line: usize,
        error: String,
    },
}

impl ScoredLine {
    /// 1-based line number in the input file
    pub fn line(&self) -> usize {
        match self {
            ScoredLine::Decision { line, .. } | ScoredLine::Failed { line, .. } => *line,
        }
    }
}

/// Scoring input split into parsed cases and rejected lines
#[derive(Debug, Default)]
struct CaseInput {
    cases: Vec<HashMap<String, f64>>,
    /// Input line of each entry in `cases`
    lines: Vec<usize>,
    rejected: Vec<ScoredLine>,
}

/// Parse scoring input line by line; a bad line is rejected on its own
fn parse_cases(content: &str) -> CaseInput {
    let mut input = CaseInput::default();
    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str(line) {
            Ok(case) => {
                input.cases.push(case);
                input.lines.push(index + 1);
            }
            Err(e) => input.rejected.push(ScoredLine::Failed {
                line: index + 1,
                error: format!("invalid JSON line: {}", e),
            }),
        }
    }
    input
}

/// Parse a JSON-lines file, skipping blank lines
pub async fn read_json_lines<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let mut items = Vec::new();
    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let item = serde_json::from_str(line)
            .with_context(|| format!("{}:{}: invalid JSON line", path.display(), index + 1))?;
        items.push(item);
    }
    Ok(items)
}

/// Fit on the input records and publish the bundle
pub async fn run_train(config: &WorkerConfig) -> Result<TrainingOutcome> {
    let records: Vec<SourcedRecord> = read_json_lines(&config.input).await?;
    info!(records = records.len(), input = %config.input.display(), "Loaded training records");

    let store = config.engine.store.build()?;
    let outcome = Trainer::new(config.engine.clone())
        .train(&records, store.as_ref())
        .await?;

    let metadata = &outcome.bundle.metadata;
    info!(
        handle = %outcome.handle,
        model = %metadata.model_name,
        features = metadata.num_features,
        training_samples = metadata.training_samples,
        test_samples = metadata.test_samples,
        "✓ Training complete"
    );
    if let Some(metrics) = &metadata.metrics {
        info!(
            accuracy = metrics.accuracy,
            roc_auc = ?metrics.roc_auc,
            f1 = metrics.f1_score,
            "Held-out evaluation"
        );
    }
    Ok(outcome)
}

/// Score every input line against the published bundle
pub async fn run_score(config: &WorkerConfig) -> Result<Vec<ScoredLine>> {
    let engine = RecoveryEngineBuilder::new()
        .with_config(config.engine.clone())
        .require_model(true)
        .build()
        .await?;
    let model = engine.model_info()?;
    info!(model_version = %model.model_version, model = %model.model_name, "Loaded model");

    let content = fs::read_to_string(&config.input)
        .await
        .with_context(|| format!("Failed to read {}", config.input.display()))?;
    let input = parse_cases(&content);

    let mut scored: Vec<ScoredLine> = engine
        .predict_batch(&input.cases)?
        .into_iter()
        .zip(input.lines)
        .map(|(result, line)| match result {
            Ok(decision) => ScoredLine::Decision { line, decision },
            Err(e) => ScoredLine::Failed {
                line,
                error: e.to_string(),
            },
        })
        .chain(input.rejected)
        .collect();
    scored.sort_by_key(ScoredLine::line);

    match &config.output {
        Some(path) => {
            let file = fs::File::create(path)
                .await
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_lines(BufWriter::new(file), &scored).await?;
        }
        None => write_lines(tokio::io::stdout(), &scored).await?,
    }

    let failed = scored
        .iter()
        .filter(|s| matches!(s, ScoredLine::Failed { .. }))
        .count();
    info!(cases = scored.len(), failed, "✓ Scoring complete");
    Ok(scored)
}

async fn write_lines<W: tokio::io::AsyncWrite + Unpin>(mut out: W, lines: &[ScoredLine]) -> Result<()> {
    for line in lines {
        let mut buf = serde_json::to_vec(line)?;
        buf.push(b'\n');
        out.write_all(&buf).await?;
    }
    out.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JobKind;
    use recovery_sdk::{EngineConfig, RiskCategory};
    use tempfile::TempDir;

    fn training_lines() -> String {
        let mut lines = Vec::new();
        for i in 0..40 {
            let amount = 2000.0 + 500.0 * i as f64;
            let (status, grade, paid) = if i % 3 == 0 {
                ("Charged Off", "E", amount * 0.1)
            } else {
                ("Fully Paid", "B", amount * 0.9)
            };
            lines.push(
                serde_json::json!({
                    "source": "lending_club",
                    "record": {
                        "loan_status": status,
                        "grade": grade,
                        "loan_amnt": amount,
                        "funded_amnt": amount,
                        "total_pymnt": paid,
                        "dti": amount / 1000.0
                    }
                })
                .to_string(),
            );
        }
        lines.join("\n")
    }

    fn config(dir: &TempDir, job: JobKind, input: &str) -> WorkerConfig {
        WorkerConfig {
            job,
            input: dir.path().join(input),
            output: Some(dir.path().join("decisions.jsonl")),
            engine: EngineConfig::new()
                .with_artifact_dir(dir.path().join("artifacts").to_string_lossy()),
        }
    }

    #[tokio::test]
    async fn test_read_json_lines_reports_bad_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cases.jsonl");
        fs::write(&path, "{\"credit_score\": 700}\n\nnot json\n")
            .await
            .unwrap();

        let err = read_json_lines::<HashMap<String, f64>>(&path)
            .await
            .unwrap_err();
        assert!(format!("{:#}", err).contains(":3: invalid JSON line"));
    }

    #[tokio::test]
    async fn test_train_then_score() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("train.jsonl"), training_lines())
            .await
            .unwrap();
        fs::write(
            dir.path().join("cases.jsonl"),
            "{\"debt_amount\": 5000, \"days_past_due\": 45, \"credit_score\": 650}\n{}\n",
        )
        .await
        .unwrap();

        let outcome = run_train(&config(&dir, JobKind::Train, "train.jsonl"))
            .await
            .unwrap();
        assert_eq!(outcome.bundle.metadata.model_name, "gradient_boosting");

        let scored = run_score(&config(&dir, JobKind::Score, "cases.jsonl"))
            .await
            .unwrap();
        assert_eq!(scored.len(), 2);
        for line in &scored {
            match line {
                ScoredLine::Decision { decision, .. } => {
                    assert!((0.0..=1.0).contains(&decision.recovery_probability));
                    assert!(matches!(
                        decision.risk_category,
                        RiskCategory::LowRisk | RiskCategory::MediumRisk | RiskCategory::HighRisk
                    ));
                }
                ScoredLine::Failed { error, .. } => panic!("unexpected failure: {}", error),
            }
        }

        let written = fs::read_to_string(dir.path().join("decisions.jsonl"))
            .await
            .unwrap();
        assert_eq!(written.lines().count(), 2);
        assert!(written.contains("\"risk_category\""));
    }

    #[test]
    fn test_parse_cases_keeps_line_numbers() {
        let input = parse_cases("{\"credit_score\": 700}\n\n{\"debt_amount\": null}\n{}\n");

        assert_eq!(input.cases.len(), 2);
        assert_eq!(input.lines, vec![1, 4]);
        assert_eq!(input.rejected.len(), 1);
        assert_eq!(input.rejected[0].line(), 3);
    }

    #[tokio::test]
    async fn test_bad_score_line_fails_alone() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("train.jsonl"), training_lines())
            .await
            .unwrap();
        fs::write(
            dir.path().join("cases.jsonl"),
            "{\"debt_amount\":5000,\"days_past_due\":45}\n{\"debt_amount\":null}\n{\"credit_score\":700}\n",
        )
        .await
        .unwrap();

        run_train(&config(&dir, JobKind::Train, "train.jsonl"))
            .await
            .unwrap();
        let scored = run_score(&config(&dir, JobKind::Score, "cases.jsonl"))
            .await
            .unwrap();

        assert_eq!(scored.iter().map(ScoredLine::line).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(matches!(scored[0], ScoredLine::Decision { .. }));
        match &scored[1] {
            ScoredLine::Failed { error, .. } => assert!(error.contains("invalid JSON line")),
            other => panic!("expected a failed line, got {:?}", other),
        }
        assert!(matches!(scored[2], ScoredLine::Decision { .. }));

        let written = fs::read_to_string(dir.path().join("decisions.jsonl"))
            .await
            .unwrap();
        assert_eq!(written.lines().count(), 3);
        assert!(written.lines().nth(1).unwrap().contains("\"error\""));
    }

    #[tokio::test]
    async fn test_score_without_published_model_fails() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("cases.jsonl"), "{}\n").await.unwrap();

        assert!(run_score(&config(&dir, JobKind::Score, "cases.jsonl"))
            .await
            .is_err());
    }
}
