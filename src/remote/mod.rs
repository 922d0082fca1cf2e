/// Remote data module
///
/// This module handles:
/// - Fetching record lists from the data provider (client.rs)
/// - Downloading record images and generating card thumbnails (thumbnail.rs)

pub mod client;
pub mod thumbnail;
