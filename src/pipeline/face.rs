use anyhow::{Context, Result};
use image::DynamicImage;
use ort::session::Session;
use ort::value::Value;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use crate::pipeline::skin::{self, SkinToneClassifier, DEFAULT_TERM};

// Face-attribute model (ONNX export of the single-batch race classifier)
const ATTR_MODEL_URL_HF: &str =
    "https://huggingface.co/garavv/deepface-race-onnx/resolve/main/race_model_single_batch.onnx";
const ATTR_MODEL_URL_GH: &str =
    "https://github.com/serengil/deepface_models/releases/download/v1.0/race_model_single_batch.onnx";
const ATTR_MODEL_FILE: &str = "race_model_single_batch.onnx";

const ATTR_INPUT_SIZE: u32 = 224;

// Class order of the attribute model's output vector.
const ATTR_LABELS: [&str; 6] = [
    "asian",
    "indian",
    "black",
    "white",
    "middle eastern",
    "latino hispanic",
];

/// Owns the attribute model session. The session stays `None` until
/// `initialize` succeeds; callers treat an unloaded session as a
/// classification failure, not a fatal condition.
pub struct SkinAnalyzer {
    pub models_dir: PathBuf,
    session: Option<Mutex<Session>>,
}

impl SkinAnalyzer {
    pub fn new(models_dir: PathBuf) -> Self {
        Self {
            models_dir,
            session: None,
        }
    }

    pub fn model_loaded(&self) -> bool {
        self.session.is_some()
    }

    pub async fn initialize(&mut self) -> Result<()> {
        std::fs::create_dir_all(&self.models_dir)
            .context("Failed to create models directory")?;

        let auto_dl = std::env::var("GLOW_SKIN_AUTO_DOWNLOAD")
            .map(|v| !matches!(v.as_str(), "0" | "false" | "FALSE"))
            .unwrap_or(true);
        if auto_dl {
            if let Err(e) = self.download_model().await {
                warn!("Attribute model auto-download failed: {}", e);
            }
        } else {
            info!("Attribute model auto-download disabled by user.");
        }

        if let Err(e) = self.load_model() {
            warn!("Attribute model not loaded: {}", e);
        }
        Ok(())
    }

    async fn download_model(&self) -> Result<()> {
        let model_path = self.models_dir.join(ATTR_MODEL_FILE);
        if model_path.exists() {
            return Ok(());
        }

        let client = reqwest::Client::new();
        info!("Downloading face-attribute model...");
        if let Err(e) = self.download_file(&client, ATTR_MODEL_URL_HF, &model_path).await {
            warn!("Failed to download from Hugging Face: {}. Trying GitHub...", e);
            self.download_file(&client, ATTR_MODEL_URL_GH, &model_path).await?;
        }
        Ok(())
    }

    async fn download_file(&self, client: &reqwest::Client, url: &str, path: &Path) -> Result<()> {
        let response = client
            .get(url)
            .send()
            .await
            .context(format!("Failed to download model from {}", url))?;
        if !response.status().is_success() {
            anyhow::bail!("Failed to download model: HTTP {}", response.status());
        }
        let bytes = response.bytes().await.context("Failed to read response body")?;

        // ONNX files are at least a few KB; anything smaller is an error page.
        if bytes.len() < 1024 {
            anyhow::bail!(
                "Downloaded file is suspiciously small ({} bytes), may be corrupted",
                bytes.len()
            );
        }
        std::fs::write(path, &bytes).context(format!("Failed to write file: {:?}", path))?;

        info!("Downloaded model to {:?} ({} bytes)", path, bytes.len());
        Ok(())
    }

    fn load_model(&mut self) -> Result<()> {
        let model_path = self.models_dir.join(ATTR_MODEL_FILE);
        if !model_path.exists() {
            anyhow::bail!("Attribute model missing; expected it at {:?}", model_path);
        }

        let session = Session::builder()?
            .commit_from_file(&model_path)
            .context("Failed to create attribute model session")?;
        self.session = Some(Mutex::new(session));
        info!("Attribute model loaded: {:?}", model_path);
        Ok(())
    }

    // Resize to 224x224 (NHWC, unit-range floats). The whole frame goes
    // in; no face detector runs first, so face-less photos still produce
    // a score vector.
    fn preprocess(&self, image: &DynamicImage) -> ([i64; 4], Vec<f32>) {
        let resized = image.resize_exact(
            ATTR_INPUT_SIZE,
            ATTR_INPUT_SIZE,
            image::imageops::FilterType::Triangle,
        );
        let rgb = resized.to_rgb8();
        let side = ATTR_INPUT_SIZE as usize;
        let mut data = Vec::with_capacity(side * side * 3);
        for y in 0..ATTR_INPUT_SIZE {
            for x in 0..ATTR_INPUT_SIZE {
                let p = rgb.get_pixel(x, y);
                for c in 0..3 {
                    data.push(p[c] as f32 / 255.0);
                }
            }
        }
        ([1, ATTR_INPUT_SIZE as i64, ATTR_INPUT_SIZE as i64, 3], data)
    }

    /// Run the attribute model and return the lower-cased top-scoring
    /// label. Fails if the session is not loaded or inference errors.
    pub fn dominant_label(&self, image: &DynamicImage) -> Result<String> {
        let mut session_guard = self
            .session
            .as_ref()
            .context("Attribute model not loaded")?
            .lock();
        let (shape, data) = self.preprocess(image);

        let input_name = session_guard.inputs[0].name.clone();
        let input = Value::from_array((shape.to_vec(), data))
            .context("Failed to create attribute input tensor")?;
        let outputs = session_guard
            .run(ort::inputs![input_name => input])
            .context("Attribute inference failed")?;

        let mut scores: Option<Vec<f32>> = None;
        for (_key, val) in outputs.iter() {
            if let Ok((_, data)) = val.try_extract_tensor::<f32>() {
                if data.len() >= ATTR_LABELS.len() {
                    scores = Some(data.to_vec());
                    break;
                }
            }
        }
        let scores = scores.context("No class scores in model output")?;

        let mut best = 0usize;
        let mut best_score = f32::NEG_INFINITY;
        for (i, &s) in scores.iter().take(ATTR_LABELS.len()).enumerate() {
            if s > best_score {
                best = i;
                best_score = s;
            }
        }
        info!("Attribute inference: dominant={} score={:.4}", ATTR_LABELS[best], best_score);
        Ok(ATTR_LABELS[best].to_ascii_lowercase())
    }
}

/// Production classifier: decodes the stored upload, asks the analyzer
/// for the dominant label, and resolves it through the vocabulary. Every
/// failure path collapses to the default term.
pub struct OnnxSkinClassifier {
    inner: Arc<Mutex<SkinAnalyzer>>,
}

impl OnnxSkinClassifier {
    pub fn new(models_dir: PathBuf) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SkinAnalyzer::new(models_dir))),
        }
    }

    /// Shared handle to the analyzer, used by startup code to swap in an
    /// initialized instance once models are ready.
    pub fn analyzer(&self) -> Arc<Mutex<SkinAnalyzer>> {
        self.inner.clone()
    }

    pub fn model_loaded(&self) -> bool {
        self.inner.lock().model_loaded()
    }

    fn dominant(&self, image_path: &Path) -> Result<String> {
        // Sniff the format from content; the stored extension is
        // client-supplied and untrusted.
        let image = image::io::Reader::open(image_path)
            .context(format!("Failed to open image {:?}", image_path))?
            .with_guessed_format()
            .context("Failed to probe image format")?
            .decode()
            .context("Failed to decode image")?;
        let analyzer = self.inner.lock();
        analyzer.dominant_label(&image)
    }
}

impl SkinToneClassifier for OnnxSkinClassifier {
    fn classify(&self, image_path: &Path) -> String {
        match self.dominant(image_path) {
            Ok(label) => skin::term_for_label(&label).to_string(),
            Err(e) => {
                warn!("Skin classification failed for {:?}: {:#}", image_path, e);
                DEFAULT_TERM.to_string()
            }
        }
    }
}
