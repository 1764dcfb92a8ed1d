//! HTTP plumbing for the UI: a [`FetchClient`] with cache hints, uniform
//! error mapping and an observable in-flight flag, plus an oEmbed lookup
//! for video metadata.
//!
//! Failures collapse into two [`UiError`](shoji_core::UiError) variants:
//! `Http` for non-2xx responses (with the server's message extracted from
//! JSON bodies) and `Transport` for everything below HTTP.

pub mod client;
pub mod oembed;

pub use client::{CachePolicy, FetchClient, FetchRequest};
pub use oembed::{EmbedMetadata, VideoLookup, VIMEO_OEMBED_ENDPOINT};
