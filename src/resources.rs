use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use anyhow::{Context, Result};

use crate::data::loader;
use crate::data::model::SalaryDataset;
use crate::gbm::GradientBoostingModel;

// ---------------------------------------------------------------------------
// Artifact locations
// ---------------------------------------------------------------------------

/// Fixed artifact paths, relative to the process working directory.
pub const MODEL_PATH: &str = "gradient_boosting_model.json";
pub const DATASET_PATH: &str = "salary_dataset.csv";

// ---------------------------------------------------------------------------
// Resources – the model and dataset, loaded together
// ---------------------------------------------------------------------------

pub struct Resources {
    pub model: GradientBoostingModel,
    pub dataset: SalaryDataset,
}

impl Resources {
    fn load(model_path: &Path, dataset_path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(model_path)
            .with_context(|| format!("reading model artifact {}", model_path.display()))?;
        let model = GradientBoostingModel::from_json(&text)
            .with_context(|| format!("loading model artifact {}", model_path.display()))?;

        let dataset = loader::load_file(dataset_path)
            .with_context(|| format!("loading dataset {}", dataset_path.display()))?;

        log::info!(
            "loaded model ({} trees, {} features) and dataset ({} records, {} columns)",
            model.trees.len(),
            model.n_features(),
            dataset.len(),
            dataset.column_names.len()
        );
        Ok(Resources { model, dataset })
    }
}

// ---------------------------------------------------------------------------
// ResourceCache – load once, serve forever
// ---------------------------------------------------------------------------

/// One-time loader for both artifacts. The first access performs file I/O
/// and deserialization; every later access returns the same shared instance
/// without touching the filesystem. A failed load is cached too, so a broken
/// artifact is reported on every render without being re-read.
pub struct ResourceCache {
    model_path: PathBuf,
    dataset_path: PathBuf,
    slot: OnceLock<Result<Arc<Resources>, Arc<anyhow::Error>>>,
}

impl ResourceCache {
    pub fn new() -> Self {
        Self::with_paths(MODEL_PATH, DATASET_PATH)
    }

    pub fn with_paths(model_path: impl Into<PathBuf>, dataset_path: impl Into<PathBuf>) -> Self {
        ResourceCache {
            model_path: model_path.into(),
            dataset_path: dataset_path.into(),
            slot: OnceLock::new(),
        }
    }

    /// The cached resources, loading them on first call.
    pub fn resources(&self) -> Result<Arc<Resources>, Arc<anyhow::Error>> {
        self.slot
            .get_or_init(|| {
                Resources::load(&self.model_path, &self.dataset_path)
                    .map(Arc::new)
                    .map_err(|e| {
                        log::error!("resource load failed: {e:#}");
                        Arc::new(e)
                    })
            })
            .clone()
    }
}

impl Default for ResourceCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODEL_ARTIFACT: &str = r#"{
        "feature_names": ["Age", "Year of Experience"],
        "init_prediction": 50000.0,
        "learning_rate": 1.0,
        "trees": [
            {
                "nodes": [
                    {"feature": 1, "threshold": 10.0, "left": 1, "right": 2},
                    {"value": -5000.0},
                    {"value": 9000.0}
                ]
            }
        ]
    }"#;

    const DATASET_CSV: &str = "Age,Year of Experience,Current Salary\n\
                               25,2,40000\n\
                               40,15,90000\n";

    fn write_artifacts(tag: &str) -> (PathBuf, PathBuf) {
        let dir = std::env::temp_dir().join(format!(
            "salary-dash-resources-{}-{tag}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let model_path = dir.join("gradient_boosting_model.json");
        let dataset_path = dir.join("salary_dataset.csv");
        std::fs::write(&model_path, MODEL_ARTIFACT).unwrap();
        std::fs::write(&dataset_path, DATASET_CSV).unwrap();
        (model_path, dataset_path)
    }

    #[test]
    fn second_access_returns_the_same_instance_without_rereading() {
        let (model_path, dataset_path) = write_artifacts("idempotent");
        let cache = ResourceCache::with_paths(&model_path, &dataset_path);

        let first = cache.resources().unwrap();
        assert_eq!(first.dataset.len(), 2);

        // Remove the files: a second access must still succeed from cache.
        std::fs::remove_file(&model_path).unwrap();
        std::fs::remove_file(&dataset_path).unwrap();

        let second = cache.resources().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn missing_artifacts_fail_and_stay_failed() {
        let cache = ResourceCache::with_paths(
            "salary-dash-no-such-model.json",
            "salary-dash-no-such-dataset.csv",
        );
        let first = cache.resources();
        assert!(first.is_err());

        let second = cache.resources();
        let (Err(a), Err(b)) = (first, second) else {
            panic!("expected both accesses to fail");
        };
        assert!(Arc::ptr_eq(&a, &b));
    }
}
