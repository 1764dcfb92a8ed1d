//! Video embed metadata lookup (oEmbed)

use serde::Deserialize;
use serde_json::json;

use shoji_core::Result;

use crate::client::{CachePolicy, FetchClient, FetchRequest};

pub const VIMEO_OEMBED_ENDPOINT: &str = "https://vimeo.com/api/oembed.json";

/// The subset of the oEmbed response the UI consumes.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct EmbedMetadata {
    pub thumbnail_url: String,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub title: Option<String>,
    /// Seconds, present for videos.
    #[serde(default)]
    pub duration: Option<f64>,
}

/// Resolves video URLs to embed metadata through an oEmbed endpoint.
/// Lookups always bypass caches so freshly uploaded videos resolve.
#[derive(Clone)]
pub struct VideoLookup {
    client: FetchClient,
    endpoint: String,
}

impl VideoLookup {
    pub fn new(client: FetchClient) -> Self {
        Self {
            client,
            endpoint: VIMEO_OEMBED_ENDPOINT.to_string(),
        }
    }

    pub fn with_endpoint(client: FetchClient, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub async fn lookup(&self, video_url: &str) -> Result<EmbedMetadata> {
        let request = FetchRequest::get(&self.endpoint)
            .body(json!({ "url": video_url }))
            .cache(CachePolicy::NoStore);
        self.client.fetch_json(request).await
    }
}
