//! Offline training job
//!
//! One-shot, single-writer batch: read train/test CSVs, fit the classifier,
//! tune the decision threshold on the held-out set, and persist the model
//! artifact plus a metrics sidecar for audit/regression tracking.
//!
//! Usage: train [TRAIN_CSV] [TEST_CSV] [OUTPUT_DIR]

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use serde_json::json;

use suraksha_core::logic::dataset;
use suraksha_core::logic::model::{threshold, train};
use suraksha_core::logic::model::store;
use suraksha_core::EngineError;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let train_csv = arg_path(&args, 1, "data/engineered/train.csv");
    let test_csv = arg_path(&args, 2, "data/engineered/test.csv");
    let output_dir = arg_path(&args, 3, "models");

    match run(&train_csv, &test_csv, &output_dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Training failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn arg_path(args: &[String], idx: usize, default: &str) -> PathBuf {
    args.get(idx).map(PathBuf::from).unwrap_or_else(|| PathBuf::from(default))
}

fn run(train_csv: &Path, test_csv: &Path, output_dir: &Path) -> Result<(), EngineError> {
    let train_rows = dataset::read_labeled(train_csv)?;
    let test_rows = dataset::read_labeled(test_csv)?;

    let train_texts: Vec<String> = train_rows.iter().map(|r| r.text.clone()).collect();
    let train_labels: Vec<u8> = train_rows.iter().map(|r| r.label).collect();

    log::info!("Fitting on {} rows...", train_texts.len());
    let mut model = train::fit(&train_texts, &train_labels, &train::TrainConfig::default());

    let test_labels: Vec<u8> = test_rows.iter().map(|r| r.label).collect();
    let probs: Vec<f64> = test_rows.iter().map(|r| model.predict_proba(&r.text)).collect();

    let report = threshold::tune_threshold(&test_labels, &probs);
    model.threshold = report.threshold;

    let preds: Vec<bool> = probs.iter().map(|&p| p >= model.threshold).collect();
    let cm = threshold::confusion_matrix(&test_labels, &preds);

    log::info!(
        "Tuned threshold={:.2} precision={:.3} recall={:.3} f1={:.3}",
        report.threshold,
        report.precision,
        report.recall,
        report.f1
    );
    log::info!(
        "Confusion matrix: tn={} fp={} fn={} tp={}",
        cm.true_negative,
        cm.false_positive,
        cm.false_negative,
        cm.true_positive
    );

    let model_path = output_dir.join("phishing_model.json");
    store::save(&model, &model_path)?;

    let metrics = json!({
        "best_threshold": report,
        "confusion_matrix": cm,
    });
    let metrics_path = output_dir.join("model_metrics.json");
    let pretty = serde_json::to_string_pretty(&metrics)
        .map_err(|e| EngineError::Artifact(format!("metrics serialize failed: {}", e)))?;
    std::fs::write(&metrics_path, pretty)?;
    log::info!("Metrics saved to {}", metrics_path.display());

    Ok(())
}
