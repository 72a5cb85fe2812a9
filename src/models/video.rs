use serde::{Serialize, Deserialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct VideoResult {
    pub title: String,
    pub thumbnail: String,
    pub url: String,
}
