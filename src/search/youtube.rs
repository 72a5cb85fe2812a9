use serde::Deserialize;
use tracing::info;

use crate::models::video::VideoResult;
use crate::search::{SearchError, VideoSearch};

pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://www.googleapis.com/youtube/v3/search";

const WATCH_URL_BASE: &str = "https://www.youtube.com/watch?v=";

/// Video search over the YouTube Data v3 search endpoint. Key and
/// endpoint are injected at construction so tests can point the client
/// at a local stub.
pub struct YoutubeSearch {
    api_key: String,
    endpoint: String,
}

// Projection of the API response; everything not rendered is ignored.
// `items` defaults so API error bodies decode to an empty page.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: ItemId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
struct ItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    title: String,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Deserialize, Default)]
struct Thumbnails {
    medium: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

impl YoutubeSearch {
    pub fn new(api_key: String, endpoint: String) -> Self {
        Self { api_key, endpoint }
    }

    fn results_from(response: SearchResponse) -> Vec<VideoResult> {
        response
            .items
            .into_iter()
            .filter_map(|item| {
                // Search can return channels/playlists; only items with a
                // video id and a medium thumbnail are renderable.
                let id = item.id.video_id?;
                let thumbnail = item.snippet.thumbnails.medium?.url;
                Some(VideoResult {
                    title: item.snippet.title,
                    thumbnail,
                    url: format!("{}{}", WATCH_URL_BASE, id),
                })
            })
            .collect()
    }
}

impl VideoSearch for YoutubeSearch {
    fn search(&self, query: &str, limit: u32) -> Result<Vec<VideoResult>, SearchError> {
        let client = reqwest::blocking::Client::new();
        let limit = limit.to_string();
        let response = client
            .get(&self.endpoint)
            .query(&[
                ("part", "snippet"),
                ("q", query),
                ("key", self.api_key.as_str()),
                ("type", "video"),
                ("maxResults", limit.as_str()),
            ])
            .send()
            .map_err(SearchError::Request)?;

        let parsed: SearchResponse = response.json().map_err(SearchError::Decode)?;
        let results = Self::results_from(parsed);
        info!("Video search returned {} result(s)", results.len());
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Vec<VideoResult> {
        let response: SearchResponse = serde_json::from_str(body).unwrap();
        YoutubeSearch::results_from(response)
    }

    fn item(id: &str, title: &str) -> String {
        format!(
            r#"{{"id": {{"kind": "youtube#video", "videoId": "{id}"}},
                 "snippet": {{"title": "{title}",
                              "thumbnails": {{"medium": {{"url": "https://i.ytimg.com/vi/{id}/mqdefault.jpg"}}}}}}}}"#
        )
    }

    #[test]
    fn test_five_items_parse_in_order() {
        let items: Vec<String> = (0..5).map(|i| item(&format!("id{i}"), &format!("Video {i}"))).collect();
        let body = format!(r#"{{"items": [{}]}}"#, items.join(","));
        let results = parse(&body);
        assert_eq!(results.len(), 5);
        for (i, r) in results.iter().enumerate() {
            assert_eq!(r.title, format!("Video {i}"));
            assert_eq!(r.url, format!("https://www.youtube.com/watch?v=id{i}"));
            assert_eq!(r.thumbnail, format!("https://i.ytimg.com/vi/id{i}/mqdefault.jpg"));
        }
    }

    #[test]
    fn test_empty_items() {
        assert!(parse(r#"{"items": []}"#).is_empty());
    }

    #[test]
    fn test_missing_items_key() {
        // Shape of an API error body: no "items" at all.
        assert!(parse(r#"{"error": {"code": 403, "message": "quota exceeded"}}"#).is_empty());
    }

    #[test]
    fn test_item_without_video_id_is_skipped() {
        let body = format!(
            r#"{{"items": [{{"id": {{"kind": "youtube#channel", "channelId": "c1"}},
                             "snippet": {{"title": "A channel", "thumbnails": {{}}}}}}, {}]}}"#,
            item("abc", "Kept")
        );
        let results = parse(&body);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Kept");
    }

    #[test]
    fn test_item_without_medium_thumbnail_is_skipped() {
        let body = r#"{"items": [{"id": {"videoId": "x"},
                                   "snippet": {"title": "t", "thumbnails": {"default": {"url": "u"}}}}]}"#;
        assert!(parse(body).is_empty());
    }
}
