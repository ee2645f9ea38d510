pub mod config;
pub mod logger;
pub mod error;
pub mod front_matter;
pub mod markdown;
pub mod body_encoding;
pub mod post;
pub mod post_id;
pub mod post_store;
pub mod publisher;
pub mod git_sync;
pub mod stats;
pub mod prompt;
pub mod text_utils;
pub mod util;
mod test_data;

/// Commented sample written by `postpub init`
pub const SAMPLE_CONFIG: &str = include_str!("../postpub.toml");
