use std::env;
use std::path::PathBuf;

use crate::search::youtube::DEFAULT_SEARCH_ENDPOINT;

#[derive(Clone, Debug)]
pub struct Config {
    pub data: PathBuf,
    pub port: u16,
    pub youtube_api_key: String,
    pub search_endpoint: String,
}

impl Config {
    pub fn from_env() -> Self {
        let data = env::var("GLOW_DATA").unwrap_or_else(|_| "/glow-data".to_string());
        let port = env::var("GLOW_PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(9172);
        let youtube_api_key = env::var("GLOW_YOUTUBE_API_KEY").unwrap_or_default();
        let search_endpoint = env::var("GLOW_SEARCH_ENDPOINT")
            .unwrap_or_else(|_| DEFAULT_SEARCH_ENDPOINT.to_string());
        Self {
            data: PathBuf::from(data),
            port,
            youtube_api_key,
            search_endpoint,
        }
    }
}
