/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - The category / fetch / popup state machine (gallery.rs)
/// - Downloaded card and popup images (images.rs)

pub mod data;
pub mod gallery;
pub mod images;
