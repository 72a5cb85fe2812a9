pub mod utils;
pub mod models;
pub mod pipeline;
pub mod search;
pub mod api;

use std::path::PathBuf;
use std::sync::Arc;

use crate::pipeline::skin::SkinToneClassifier;
use crate::search::VideoSearch;

#[derive(Clone)]
pub struct AppPaths {
    pub data: PathBuf,
    pub uploads: PathBuf,
    pub models: PathBuf,
}

impl AppPaths {
    pub fn new(data: PathBuf) -> Self {
        let uploads = data.join("uploads");
        let models = data.join("models");
        Self { data, uploads, models }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub started_at: std::time::Instant,
    pub paths: AppPaths,
    pub classifier: Arc<dyn SkinToneClassifier>,
    pub search: Arc<dyn VideoSearch>,
}

impl AppState {
    pub fn new(
        paths: AppPaths,
        classifier: Arc<dyn SkinToneClassifier>,
        search: Arc<dyn VideoSearch>,
    ) -> Self {
        Self {
            started_at: std::time::Instant::now(),
            paths,
            classifier,
            search,
        }
    }
}
