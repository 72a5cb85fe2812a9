use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::serve;
use base64::{engine::general_purpose, Engine as _};
use glowmatch_backend::api::routes;
use glowmatch_backend::models::video::VideoResult;
use glowmatch_backend::pipeline::skin::SkinToneClassifier;
use glowmatch_backend::search::{SearchError, VideoSearch};
use glowmatch_backend::{AppPaths, AppState};
use parking_lot::Mutex;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Classifier fake answering with a fixed term.
pub struct FixedClassifier(pub &'static str);

impl SkinToneClassifier for FixedClassifier {
    fn classify(&self, _image_path: &Path) -> String {
        self.0.to_string()
    }
}

/// Search fake returning canned results and recording the last query.
pub struct CannedSearch {
    pub results: Vec<VideoResult>,
    pub last_query: Mutex<Option<String>>,
}

impl CannedSearch {
    pub fn new(results: Vec<VideoResult>) -> Arc<Self> {
        Arc::new(Self {
            results,
            last_query: Mutex::new(None),
        })
    }
}

impl VideoSearch for CannedSearch {
    fn search(&self, query: &str, _limit: u32) -> Result<Vec<VideoResult>, SearchError> {
        *self.last_query.lock() = Some(query.to_string());
        Ok(self.results.clone())
    }
}

pub fn sample_videos(n: usize) -> Vec<VideoResult> {
    (0..n)
        .map(|i| VideoResult {
            title: format!("Tutorial {i}"),
            thumbnail: format!("https://i.ytimg.com/vi/vid{i}/mqdefault.jpg"),
            url: format!("https://www.youtube.com/watch?v=vid{i}"),
        })
        .collect()
}

/// Create a temporary data directory for one test.
pub fn setup_test_data() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let data = tmp.path().join("glow-data");
    std::fs::create_dir_all(&data).unwrap();
    (tmp, data)
}

/// Minimal valid JPEG (1x1 pixel).
pub fn test_image_bytes() -> Vec<u8> {
    general_purpose::STANDARD.decode("/9j/4AAQSkZJRgABAQAAAQABAAD/2wBDAP//////////////////////////////////////////////////////////////////////////////////////2wBDAf//////////////////////////////////////////////////////////////////////////////////////wAARCABkAGQDAREAAhEBAxEB/8QAFQABAQAAAAAAAAAAAAAAAAAAAAb/xAAUEAEAAAAAAAAAAAAAAAAAAAAA/8QAFQEBAQAAAAAAAAAAAAAAAAAAAgP/xAAUEQEAAAAAAAAAAAAAAAAAAAAA/9oADAMBAAIRAxEAPwB3AAAAAP/Z").unwrap()
}

pub fn create_test_app_state(
    data: PathBuf,
    classifier: Arc<dyn SkinToneClassifier>,
    search: Arc<dyn VideoSearch>,
) -> Arc<AppState> {
    Arc::new(AppState::new(AppPaths::new(data), classifier, search))
}

/// Bind an ephemeral port and serve the app on it.
pub async fn spawn_server(state: Arc<AppState>) -> u16 {
    let addr = SocketAddr::from(([127, 0, 0, 1], 0));
    let listener = TcpListener::bind(&addr).await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let app = routes::router(state);
    tokio::spawn(async move {
        serve(listener, app).await.unwrap();
    });
    port
}

/// Helper to make HTTP requests to a test server.
pub struct TestClient {
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestClient {
    pub fn new(port: u16) -> Self {
        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            client: reqwest::Client::new(),
        }
    }

    pub async fn get(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        self.client.get(&format!("{}{}", self.base_url, path)).send().await
    }

    pub async fn post_form(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> reqwest::Result<reqwest::Response> {
        self.client
            .post(&format!("{}{}", self.base_url, path))
            .multipart(form)
            .send()
            .await
    }
}

/// A filled submission form with the standard test preferences.
pub fn submission_form(image: Option<(&str, Vec<u8>)>, manual_skin: &str) -> reqwest::multipart::Form {
    let mut form = reqwest::multipart::Form::new()
        .text("event", "wedding")
        .text("skin_type", "oily")
        .text("style", "natural")
        .text("duration", "10 minutes")
        .text("focus_area", "eyes")
        .text("manual_skin", manual_skin.to_string());
    if let Some((name, bytes)) = image {
        form = form.part(
            "image",
            reqwest::multipart::Part::bytes(bytes).file_name(name.to_string()),
        );
    }
    form
}
