use std::net::SocketAddr;
use std::sync::Arc;

use glowmatch_backend::api::routes;
#[cfg(feature = "skin-analysis")]
use glowmatch_backend::pipeline::face::{OnnxSkinClassifier, SkinAnalyzer};
#[cfg(not(feature = "skin-analysis"))]
use glowmatch_backend::pipeline::skin::DefaultClassifier;
use glowmatch_backend::pipeline::skin::SkinToneClassifier;
use glowmatch_backend::search::youtube::YoutubeSearch;
use glowmatch_backend::utils::config::Config;
use glowmatch_backend::utils::logging;
use glowmatch_backend::{AppPaths, AppState};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();
    let cfg = Config::from_env();
    let paths = AppPaths::new(cfg.data.clone());
    std::fs::create_dir_all(&paths.uploads)?;

    #[cfg(feature = "skin-analysis")]
    let classifier: Arc<dyn SkinToneClassifier> = {
        let classifier = OnnxSkinClassifier::new(paths.models.clone());
        let shared = classifier.analyzer();
        tokio::spawn(async move {
            // Initialize a fresh instance, then swap it in, so requests
            // arriving during the model download degrade instead of
            // blocking on the lock.
            let models_dir = { shared.lock().models_dir.clone() };
            let mut analyzer = SkinAnalyzer::new(models_dir);
            if let Err(e) = analyzer.initialize().await {
                tracing::error!("Failed to initialize skin analyzer: {}", e);
            } else {
                *shared.lock() = analyzer;
            }
        });
        Arc::new(classifier)
    };
    #[cfg(not(feature = "skin-analysis"))]
    let classifier: Arc<dyn SkinToneClassifier> = Arc::new(DefaultClassifier);

    if cfg.youtube_api_key.is_empty() {
        warn!("GLOW_YOUTUBE_API_KEY is not set; video searches will return no results");
    }
    let search = Arc::new(YoutubeSearch::new(
        cfg.youtube_api_key.clone(),
        cfg.search_endpoint.clone(),
    ));

    let state = Arc::new(AppState::new(paths, classifier, search));
    let app = routes::router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
