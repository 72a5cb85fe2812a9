use std::path::Path as StdPath;
use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::Json;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::api::render;
use crate::models::submission::Submission;
use crate::pipeline::skin::DEFAULT_TERM;
use crate::search::{query, SEARCH_RESULT_LIMIT};
use crate::AppState;

pub async fn health() -> impl IntoResponse {
    let body = serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "skin_analysis": cfg!(feature = "skin-analysis"),
    });
    (StatusCode::OK, Json(body))
}

pub async fn home_page() -> impl IntoResponse {
    Html(render::index_page())
}

/// One submission: store the upload, resolve a skin term, compose the
/// query, search, render. Classifier and search failures degrade
/// silently; only a failed upload write surfaces as an error.
pub async fn submit(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut form = Submission::default();
    let mut image: Option<Vec<u8>> = None;
    let mut client_name = String::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                warn!("Malformed multipart body: {}", e);
                break;
            }
        };
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => {
                client_name = field.file_name().unwrap_or_default().to_string();
                match field.bytes().await {
                    Ok(data) if !data.is_empty() => image = Some(data.to_vec()),
                    Ok(_) => {}
                    Err(e) => warn!("Failed to read uploaded file: {}", e),
                }
            }
            "event" => form.event = field.text().await.unwrap_or_default(),
            "skin_type" => form.skin_type = field.text().await.unwrap_or_default(),
            "style" => form.style = field.text().await.unwrap_or_default(),
            "duration" => form.duration = field.text().await.unwrap_or_default(),
            "focus_area" => form.focus_area = field.text().await.unwrap_or_default(),
            "manual_skin" => form.manual_skin = field.text().await.unwrap_or_default(),
            _ => {}
        }
    }

    // No usable upload: show the blank form again.
    let Some(data) = image else {
        return Html(render::index_page()).into_response();
    };

    if let Err(e) = tokio::fs::create_dir_all(&state.paths.uploads).await {
        error!("Failed to create upload directory {:?}: {}", state.paths.uploads, e);
        return (StatusCode::INTERNAL_SERVER_ERROR, "upload storage unavailable").into_response();
    }
    // Never store under the client-supplied name; only a sanitized
    // extension is carried over.
    let stored_name = format!("{}.{}", Uuid::new_v4(), storage_extension(&client_name));
    let stored_path = state.paths.uploads.join(&stored_name);
    if let Err(e) = tokio::fs::write(&stored_path, &data).await {
        error!("Failed to store upload {:?}: {}", stored_path, e);
        return (StatusCode::INTERNAL_SERVER_ERROR, "upload storage unavailable").into_response();
    }
    info!("Stored upload {} ({} bytes, client name {:?})", stored_name, data.len(), client_name);

    let skin_term = if !form.manual_skin.is_empty() {
        form.manual_skin.clone()
    } else {
        let classifier = state.classifier.clone();
        let path = stored_path.clone();
        tokio::task::spawn_blocking(move || classifier.classify(&path))
            .await
            .unwrap_or_else(|e| {
                warn!("Classifier task failed: {}", e);
                DEFAULT_TERM.to_string()
            })
    };

    let search_query = query::compose(&skin_term, &form);
    let searcher = state.search.clone();
    let q = search_query.clone();
    let videos = match tokio::task::spawn_blocking(move || searcher.search(&q, SEARCH_RESULT_LIMIT)).await {
        Ok(Ok(videos)) => videos,
        Ok(Err(e)) => {
            warn!("Video search failed: {}", e);
            Vec::new()
        }
        Err(e) => {
            warn!("Search task failed: {}", e);
            Vec::new()
        }
    };

    Html(render::results_page(&search_query, &videos)).into_response()
}

fn storage_extension(client_name: &str) -> String {
    StdPath::new(client_name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.len() <= 8 && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_else(|| "bin".to_string())
}
