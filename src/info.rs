use crate::constants::{ImageMime, FALLBACK_MIME_TYPE};
use crate::datauri::decode_data_uri;
use crate::error::{Result, SqueezeError};
use crate::preview::PreviewDescriptor;
use crate::utils::{base64_payload_size, format_file_size};
use image::ImageReader;
use std::io::Cursor;

/// Build a preview descriptor for a data URI without fully decoding the image
///
/// Size comes from the payload measurement; dimensions and format come from a
/// header-only probe of the decoded bytes. Dimensions stay `None` when the
/// container cannot be probed.
///
/// # Arguments
/// * `uri` - The data URI to describe
/// * `filename` - Display filename for the descriptor
///
/// # Returns
/// * `Ok(PreviewDescriptor)` - Populated descriptor ready for display
/// * `Err(SqueezeError)` - If the URI is malformed or not valid base64
pub fn describe_data_uri(uri: &str, filename: &str) -> Result<PreviewDescriptor> {
    let size = base64_payload_size(uri);
    let payload = decode_data_uri(uri, filename)?;

    let reader = ImageReader::new(Cursor::new(payload.bytes.as_slice()))
        .with_guessed_format()
        .map_err(SqueezeError::Io)?;
    let sniffed = reader.format();
    let dimensions = reader.into_dimensions().ok();

    let mime = if payload.mime == FALLBACK_MIME_TYPE {
        sniffed
            .and_then(ImageMime::from_image_format)
            .map(|m| m.mime_type().to_string())
    } else {
        Some(payload.mime)
    };

    Ok(PreviewDescriptor {
        base64: uri.to_string(),
        filename: filename.to_string(),
        size,
        width: dimensions.map(|(w, _)| w),
        height: dimensions.map(|(_, h)| h),
        mime,
    })
}

pub fn print_image_info(uri: &str, filename: &str) -> Result<()> {
    let descriptor = describe_data_uri(uri, filename)?;

    crate::info!("📋 Basic Information:");
    crate::info!("  📁 Filename: {}", descriptor.filename);
    if let (Some(width), Some(height)) = (descriptor.width, descriptor.height) {
        crate::info!("  📏 Dimensions: {}x{} pixels", width, height);
    }
    crate::info!(
        "  📦 Payload size: {} bytes ({})",
        descriptor.size,
        format_file_size(descriptor.size)
    );
    if let Some(mime) = &descriptor.mime {
        crate::info!("  🎭 MIME type: {}", mime);
    }

    if let (Some(width), Some(height)) = (descriptor.width, descriptor.height) {
        let total_pixels = width as u64 * height as u64;
        let aspect_ratio = width as f64 / height as f64;
        crate::info!("  🔢 Total pixels: {}", total_pixels);
        crate::info!("  📐 Aspect ratio: {:.2}:1", aspect_ratio);
    }

    crate::info!("\n💡 Compression Suggestions:");

    if descriptor.size > 5 * 1024 * 1024 {
        crate::info!("  🎯 Large payload (>5MB): consider a tight size budget (0.5-1 MB)");
    } else if descriptor.size > 1024 * 1024 {
        crate::info!("  🎯 Medium payload (1-5MB): the default 1 MB budget applies well");
    } else {
        crate::info!("  🎯 Small payload (<1MB): already within the default budget");
    }

    if let (Some(width), Some(height)) = (descriptor.width, descriptor.height) {
        if width > 1920 || height > 1080 {
            crate::info!("  📏 Large dimensions: consider bounding the longer edge to 1920px");
        } else if width > 1280 || height > 720 {
            crate::info!("  📏 HD dimensions: consider bounding to 1280px for web use");
        }
    }

    match descriptor.mime.as_deref() {
        Some("image/png") => {
            crate::info!("  🎭 PNG format: oxipng optimization applies on compression");
        }
        Some("image/jpeg") => {
            crate::info!("  🎭 JPEG format: the quality ladder trades size for quality");
        }
        Some("image/webp") => {
            crate::info!("  🎭 WebP format: already well compressed, only downscaling reduces it");
        }
        _ => {}
    }

    Ok(())
}
