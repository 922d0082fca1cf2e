use iced::widget::image::Handle;
use image::imageops::FilterType;
use image::RgbaImage;
use thiserror::Error;
use tokio::task;

use super::client::{FetchError, ProviderClient};
use crate::state::images::LoadedImage;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("download failed: {0}")]
    Download(#[from] FetchError),
    #[error("could not decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("task join error: {0}")]
    Join(#[from] task::JoinError),
}

/// Download a record image and prepare both the card thumbnail and the
/// full-size popup handle
pub async fn load_image(
    client: ProviderClient,
    url: String,
    thumbnail_size: u32,
) -> Result<LoadedImage, ImageError> {
    let bytes = client.fetch_bytes(&url).await?;

    // Decoding and resizing are CPU-bound
    task::spawn_blocking(move || build_image(bytes, thumbnail_size)).await?
}

fn build_image(bytes: Vec<u8>, thumbnail_size: u32) -> Result<LoadedImage, ImageError> {
    let thumbnail = make_thumbnail(&bytes, thumbnail_size)?;
    Ok(LoadedImage {
        thumbnail,
        full: Handle::from_bytes(bytes),
    })
}

/// Card thumbnail as an RGBA handle
pub fn make_thumbnail(bytes: &[u8], size: u32) -> Result<Handle, ImageError> {
    let rgba = shrink(bytes, size)?;
    let (width, height) = rgba.dimensions();
    Ok(Handle::from_rgba(width, height, rgba.into_raw()))
}

/// Decode `bytes` and shrink them to fit a `size` x `size` box.
/// Images already smaller than the box are kept at their size.
fn shrink(bytes: &[u8], size: u32) -> Result<RgbaImage, ImageError> {
    let img = image::load_from_memory(bytes)?;

    let img = if img.width() > size || img.height() > size {
        img.resize(size, size, FilterType::Lanczos3)
    } else {
        img
    };

    Ok(img.to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use clap::Parser;
    use image::{DynamicImage, ImageFormat, RgbImage};
    use std::io::Cursor;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::new(width, height));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_large_image_fits_box() {
        let thumbnail = shrink(&png(800, 400), 200).unwrap();
        assert_eq!(thumbnail.dimensions(), (200, 100));
    }

    #[test]
    fn test_small_image_is_not_upscaled() {
        let thumbnail = shrink(&png(40, 30), 200).unwrap();
        assert_eq!(thumbnail.dimensions(), (40, 30));
    }

    #[test]
    fn test_build_image_succeeds() {
        let bytes = png(10, 10);
        assert!(build_image(bytes, 200).is_ok());
    }

    #[test]
    fn test_garbage_fails_to_decode() {
        let err = make_thumbnail(b"definitely not a jpeg", 200).unwrap_err();
        assert!(matches!(err, ImageError::Decode(_)));
    }

    #[tokio::test]
    async fn test_load_image_downloads_and_decodes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/images/cats/4"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(png(600, 300)))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/images/cats/5"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let config = Config::try_parse_from(["animal-album", "--base-url", &server.uri()]).unwrap();
        let client = ProviderClient::new(&config).unwrap();

        let found = format!("{}/images/cats/4", server.uri());
        assert!(load_image(client.clone(), found, 128).await.is_ok());

        let missing = format!("{}/images/cats/5", server.uri());
        let err = load_image(client, missing, 128).await.unwrap_err();
        assert!(matches!(err, ImageError::Download(FetchError::Status(_))));
    }
}
