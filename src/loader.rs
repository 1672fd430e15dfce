//! 画像ファイルの読み込みとエンコード

use crate::error::{PlantAiError, Result};
use image::{imageops::FilterType, DynamicImage, GenericImageView, ImageFormat};
use plant_ai_common::encoding::mime_type_from_extension;
use plant_ai_common::ImageData;
use std::io::Cursor;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub file_name: String,
    pub image: ImageData,
    /// 縮小して再エンコードしたか
    pub resized: bool,
}

/// 画像を読み込み、長辺が max_size を超える場合は縮小してJPEGで再エンコードする
///
/// デコードできない形式（HEIC等）はそのまま送る
pub fn load_image(path: &Path, max_size: u32) -> Result<LoadedImage> {
    if !path.is_file() {
        return Err(PlantAiError::FileNotFound(path.display().to_string()));
    }

    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_string())
        .unwrap_or_default();
    let mime_type = mime_type_from_extension(&ext)
        .ok_or_else(|| PlantAiError::UnsupportedImage(path.display().to_string()))?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let bytes = std::fs::read(path)?;
    if bytes.is_empty() {
        return Err(PlantAiError::ImageLoad(format!("空のファイルです: {}", file_name)));
    }

    let decoded = match image::load_from_memory(&bytes) {
        Ok(img) => Some(img),
        Err(e) => {
            tracing::debug!(file = %file_name, error = %e, "could not decode image; sending as-is");
            None
        }
    };

    if let Some(img) = decoded.filter(|img| needs_resize(img, max_size)) {
        let jpeg = downscale_to_jpeg(&img, max_size)?;
        tracing::debug!(
            file = %file_name,
            original_bytes = bytes.len(),
            resized_bytes = jpeg.len(),
            "image downscaled"
        );
        return Ok(LoadedImage {
            file_name,
            image: ImageData::from_bytes(&jpeg, "image/jpeg"),
            resized: true,
        });
    }

    Ok(LoadedImage {
        file_name,
        image: ImageData::from_bytes(&bytes, mime_type),
        resized: false,
    })
}

fn needs_resize(img: &DynamicImage, max_size: u32) -> bool {
    let (width, height) = img.dimensions();
    max_size > 0 && width.max(height) > max_size
}

fn downscale_to_jpeg(img: &DynamicImage, max_size: u32) -> Result<Vec<u8>> {
    let resized = img.resize(max_size, max_size, FilterType::Triangle);
    // JPEGはアルファを持てないのでRGBに落とす
    let rgb = DynamicImage::ImageRgb8(resized.to_rgb8());

    let mut buffer = Cursor::new(Vec::new());
    rgb.write_to(&mut buffer, ImageFormat::Jpeg)
        .map_err(|e| PlantAiError::ImageLoad(format!("JPEGエンコード失敗: {}", e)))?;
    Ok(buffer.into_inner())
}
