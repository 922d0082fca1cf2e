/// Command-line and environment configuration
use clap::Parser;
use std::time::Duration;

use crate::state::data::Category;

/// Provider used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "https://app.devopsguru.engineer";

/// Animal Album - browse animal photos by category
#[derive(Parser, Debug, Clone)]
#[command(name = "animal-album", version)]
#[command(about = "Browse animal photos by category")]
pub struct Config {
    /// Base URL of the data provider (records are read from {base}/data/{category})
    #[arg(long, env = "ANIMAL_ALBUM_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Start on this category instead of a random one
    #[arg(short, long)]
    pub category: Option<Category>,

    /// Bounding box of card thumbnails, in pixels
    #[arg(long, default_value_t = 384)]
    pub thumbnail_size: u32,

    /// Give up on HTTP requests after this many seconds (no limit by default)
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// URL of the record list for one category
    pub fn data_url(&self, category: Category) -> String {
        format!("{}/data/{}", self.base_url.trim_end_matches('/'), category.token())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
