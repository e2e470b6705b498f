use crate::constants::{
    AVIF_ENCODE_SPEED, DEFAULT_FILENAME, DEFAULT_MAX_DIMENSION, DEFAULT_MAX_SIZE_MB,
    DEFAULT_USE_WORKER_THREAD, INITIAL_QUALITY, LIBDEFLATER_HIGH_LEVEL, LIBDEFLATER_LOW_LEVEL,
    MAX_IMAGE_DIMENSION, MAX_SQUEEZE_ROUNDS, MIN_QUALITY, QUALITY_STEP, DOWNSCALE_PERCENT,
    ZOPFLI_ITERATIONS,
};
use crate::datauri::{decode_data_uri, encode_data_uri, BinaryPayload};
use crate::error::{Result, SqueezeError};
use crate::preview::CompressResult;
use image::codecs::avif::AvifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, GenericImageView, ImageReader};
use oxipng::Deflaters;
use std::io::Cursor;
use std::num::NonZeroU8;

pub use crate::constants::ImageMime;

#[derive(Debug, Clone)]
pub struct CompressionOptions {
    /// Target upper bound on output size, in megabytes.
    pub max_size_mb: f64,
    /// Upper bound on the longer image edge, in pixels.
    pub max_width_or_height: u32,
    /// Run the engine on a blocking worker thread instead of inline.
    pub use_worker_thread: bool,
}

impl Default for CompressionOptions {
    fn default() -> Self {
        Self {
            max_size_mb: DEFAULT_MAX_SIZE_MB,
            max_width_or_height: DEFAULT_MAX_DIMENSION,
            use_worker_thread: DEFAULT_USE_WORKER_THREAD,
        }
    }
}

impl CompressionOptions {
    pub fn new(
        max_size_mb: Option<f64>,
        max_width_or_height: Option<u32>,
        use_worker_thread: Option<bool>,
    ) -> Result<Self> {
        let max_size_mb = max_size_mb.unwrap_or(DEFAULT_MAX_SIZE_MB);
        if !max_size_mb.is_finite() || max_size_mb <= 0.0 {
            return Err(SqueezeError::InvalidSizeBudget(max_size_mb));
        }

        let max_width_or_height = max_width_or_height.unwrap_or(DEFAULT_MAX_DIMENSION);
        if max_width_or_height == 0 {
            return Err(SqueezeError::InvalidDimensionLimit(max_width_or_height));
        }

        Ok(Self {
            max_size_mb,
            max_width_or_height,
            use_worker_thread: use_worker_thread.unwrap_or(DEFAULT_USE_WORKER_THREAD),
        })
    }

    /// The size target expressed in bytes.
    pub fn byte_budget(&self) -> u64 {
        (self.max_size_mb * 1024.0 * 1024.0) as u64
    }
}

/// Compress an image carried as a base64 data URI.
///
/// Decodes the URI, hands the tagged payload to the compression engine and
/// re-encodes the result as a new data URI. With `use_worker_thread` set the
/// engine runs on a blocking worker so callers stay responsive during large
/// compressions.
///
/// # Arguments
/// * `uri` - The data URI to compress
/// * `filename` - Display filename for the payload (default: "image.png")
/// * `options` - Compression options
///
/// # Returns
/// * `Ok(String)` - The compressed image as a base64 data URI
/// * `Err(SqueezeError)` - If decode, compression or re-encode fails
pub async fn compress_data_uri(
    uri: &str,
    filename: Option<&str>,
    options: CompressionOptions,
) -> Result<String> {
    let filename = filename.unwrap_or(DEFAULT_FILENAME);
    let payload = decode_data_uri(uri, filename)?;

    let compressed = if options.use_worker_thread {
        let opts = options.clone();
        tokio::task::spawn_blocking(move || squeeze_payload(payload, &opts))
            .await
            .map_err(|e| SqueezeError::WorkerFailed(e.to_string()))??
    } else {
        squeeze_payload(payload, &options)?
    };

    Ok(encode_data_uri(&compressed))
}

/// Blocking wrapper around [`compress_data_uri`] for synchronous callers.
pub fn compress_data_uri_sync(
    uri: &str,
    filename: Option<&str>,
    options: CompressionOptions,
) -> Result<String> {
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| SqueezeError::WorkerFailed(format!("Failed to create runtime: {}", e)))?;

    runtime.block_on(compress_data_uri(uri, filename, options))
}

/// Compress and map the outcome into a [`CompressResult`] for display callers.
pub async fn compress_to_result(
    uri: &str,
    filename: Option<&str>,
    options: CompressionOptions,
) -> CompressResult {
    compress_data_uri(uri, filename, options).await.into()
}

/// Run the compression engine over an in-memory payload.
///
/// Decodes the image, bounds its longer edge to `max_width_or_height` and
/// re-encodes it under the byte budget. The output payload carries the MIME
/// type of the encoded format and the input's filename.
pub fn squeeze_payload(payload: BinaryPayload, options: &CompressionOptions) -> Result<BinaryPayload> {
    let (img, mime) = load_payload_image(&payload)?;
    let img = bound_dimensions(img, options.max_width_or_height);
    let bytes = encode_under_budget(img, mime, options.byte_budget())?;
    Ok(BinaryPayload::new(bytes, mime.mime_type(), payload.filename))
}

/// Decode a payload's bytes into an image, resolving its format.
///
/// The declared MIME type wins; payloads with an unrecognized MIME fall back
/// to the container format sniffed from the bytes.
pub fn load_payload_image(payload: &BinaryPayload) -> Result<(DynamicImage, ImageMime)> {
    let reader = ImageReader::new(Cursor::new(payload.bytes.as_slice()))
        .with_guessed_format()
        .map_err(SqueezeError::Io)?;
    let sniffed = reader.format();

    let img = reader.decode()?;

    let (width, height) = img.dimensions();
    if width > MAX_IMAGE_DIMENSION || height > MAX_IMAGE_DIMENSION {
        return Err(SqueezeError::InvalidDimensions(
            width,
            height,
            MAX_IMAGE_DIMENSION,
        ));
    }

    let mime = ImageMime::from_mime_type(&payload.mime)
        .or_else(|| sniffed.and_then(ImageMime::from_image_format))
        .ok_or_else(|| SqueezeError::UnsupportedFormat(payload.mime.clone()))?;

    Ok((img, mime))
}

/// Shrink an image so neither edge exceeds `max_edge`, preserving aspect ratio.
pub fn bound_dimensions(img: DynamicImage, max_edge: u32) -> DynamicImage {
    let (width, height) = img.dimensions();
    if width.max(height) <= max_edge {
        return img;
    }
    crate::verbose!("Resizing {}x{} to fit within {}px", width, height, max_edge);
    img.resize(max_edge, max_edge, image::imageops::FilterType::Lanczos3)
}

/// Encode `img` as `mime`, working the output under `budget` bytes.
///
/// Lossy formats walk a descending quality ladder; once the ladder is
/// exhausted (and for lossless formats from the start) the image is
/// progressively downscaled. If the budget is unreachable within the round
/// limit, the smallest attempt is returned rather than an error.
fn encode_under_budget(mut img: DynamicImage, mime: ImageMime, budget: u64) -> Result<Vec<u8>> {
    let mut quality = INITIAL_QUALITY;
    let mut best: Option<Vec<u8>> = None;

    for round in 0..MAX_SQUEEZE_ROUNDS {
        let encoded = encode_image(&img, mime, quality)?;
        if encoded.len() as u64 <= budget {
            return Ok(encoded);
        }
        crate::verbose!(
            "Round {}: {} bytes over budget {} (quality {})",
            round + 1,
            encoded.len(),
            budget,
            quality
        );
        if best.as_ref().map_or(true, |b| encoded.len() < b.len()) {
            best = Some(encoded);
        }

        if mime.is_lossy() && quality > MIN_QUALITY {
            quality = quality.saturating_sub(QUALITY_STEP).max(MIN_QUALITY);
        } else {
            let (width, height) = img.dimensions();
            let new_width = (width * DOWNSCALE_PERCENT / 100).max(1);
            let new_height = (height * DOWNSCALE_PERCENT / 100).max(1);
            if new_width == width && new_height == height {
                break;
            }
            img = img.resize_exact(new_width, new_height, image::imageops::FilterType::Lanczos3);
        }
    }

    best.ok_or_else(|| SqueezeError::ReencodeFailed("no encoding produced".to_string()))
}

/// Encode an image into the given format's byte representation.
pub fn encode_image(img: &DynamicImage, mime: ImageMime, quality: u8) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());

    match mime {
        ImageMime::Jpeg => {
            let encoder = JpegEncoder::new_with_quality(&mut buf, quality);
            img.to_rgb8()
                .write_with_encoder(encoder)
                .map_err(|e| SqueezeError::ReencodeFailed(format!("JPEG encode failed: {}", e)))?;
        }
        ImageMime::Png => {
            img.write_to(&mut buf, image::ImageFormat::Png)
                .map_err(|e| SqueezeError::ReencodeFailed(format!("PNG encode failed: {}", e)))?;
            return optimize_png(buf.get_ref(), quality);
        }
        ImageMime::WebP => {
            // The image crate's WebP encoder is lossless only; size targeting
            // happens through downscaling.
            let encoder = WebPEncoder::new_lossless(&mut buf);
            img.write_with_encoder(encoder)
                .map_err(|e| SqueezeError::ReencodeFailed(format!("WebP encode failed: {}", e)))?;
        }
        ImageMime::Avif => {
            let encoder = AvifEncoder::new_with_speed_quality(&mut buf, AVIF_ENCODE_SPEED, quality);
            img.write_with_encoder(encoder)
                .map_err(|e| SqueezeError::ReencodeFailed(format!("AVIF encode failed: {}", e)))?;
        }
        ImageMime::Gif | ImageMime::Bmp | ImageMime::Tiff => {
            img.write_to(&mut buf, mime.to_image_format()).map_err(|e| {
                SqueezeError::ReencodeFailed(format!("{} encode failed: {}", mime.extension(), e))
            })?;
        }
    }

    Ok(buf.into_inner())
}

fn optimize_png(data: &[u8], quality: u8) -> Result<Vec<u8>> {
    let mut oxipng_options = oxipng::Options::from_preset(4);
    oxipng_options.force = true;

    if quality >= 90 {
        oxipng_options.deflate = Deflaters::Zopfli {
            iterations: NonZeroU8::new(ZOPFLI_ITERATIONS).unwrap(),
        };
    } else if quality >= 70 {
        oxipng_options.deflate = Deflaters::Libdeflater {
            compression: LIBDEFLATER_HIGH_LEVEL,
        };
    } else {
        oxipng_options.deflate = Deflaters::Libdeflater {
            compression: LIBDEFLATER_LOW_LEVEL,
        };
    }

    oxipng::optimize_from_memory(data, &oxipng_options)
        .map_err(|e| SqueezeError::PngOptimization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::base64_payload_size;
    use image::RgbImage;

    fn gradient_image(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        }))
    }

    // Encodes with the image crate's stock PNG encoder, leaving oxipng room
    // to shrink it during compression.
    fn png_data_uri(img: &DynamicImage) -> String {
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
        encode_data_uri(&BinaryPayload::new(buf.into_inner(), "image/png", "test.png"))
    }

    #[test]
    fn test_compression_options_default() {
        let options = CompressionOptions::default();
        assert_eq!(options.max_size_mb, 1.0);
        assert_eq!(options.max_width_or_height, 1920);
        assert!(options.use_worker_thread);
    }

    #[test]
    fn test_compression_options_new_defaults() {
        let options = CompressionOptions::new(None, None, None).unwrap();
        assert_eq!(options.max_size_mb, 1.0);
        assert_eq!(options.max_width_or_height, 1920);
        assert!(options.use_worker_thread);
    }

    #[test]
    fn test_compression_options_invalid_budget() {
        let result = CompressionOptions::new(Some(0.0), None, None);
        assert!(matches!(result, Err(SqueezeError::InvalidSizeBudget(_))));

        let result = CompressionOptions::new(Some(-1.0), None, None);
        assert!(matches!(result, Err(SqueezeError::InvalidSizeBudget(_))));
    }

    #[test]
    fn test_compression_options_invalid_dimension() {
        let result = CompressionOptions::new(None, Some(0), None);
        assert!(matches!(result, Err(SqueezeError::InvalidDimensionLimit(0))));
    }

    #[test]
    fn test_byte_budget() {
        let options = CompressionOptions::new(Some(2.0), None, None).unwrap();
        assert_eq!(options.byte_budget(), 2 * 1024 * 1024);
    }

    #[test]
    fn test_bound_dimensions_shrinks_longer_edge() {
        let img = gradient_image(400, 200);
        let bounded = bound_dimensions(img, 100);
        let (w, h) = bounded.dimensions();
        assert_eq!(w, 100);
        assert_eq!(h, 50);
    }

    #[test]
    fn test_bound_dimensions_leaves_small_images() {
        let img = gradient_image(50, 80);
        let bounded = bound_dimensions(img, 100);
        assert_eq!(bounded.dimensions(), (50, 80));
    }

    #[test]
    fn test_load_payload_image_prefers_declared_mime() {
        let bytes = encode_image(&gradient_image(10, 10), ImageMime::Png, 50).unwrap();
        let payload = BinaryPayload::new(bytes, "image/png", "a.png");
        let (_, mime) = load_payload_image(&payload).unwrap();
        assert_eq!(mime, ImageMime::Png);
    }

    #[test]
    fn test_load_payload_image_sniffs_unknown_mime() {
        let bytes = encode_image(&gradient_image(10, 10), ImageMime::Png, 50).unwrap();
        let payload = BinaryPayload::new(bytes, "application/octet-stream", "a.bin");
        let (_, mime) = load_payload_image(&payload).unwrap();
        assert_eq!(mime, ImageMime::Png);
    }

    #[test]
    fn test_load_payload_image_rejects_garbage() {
        let payload = BinaryPayload::new(b"not an image".to_vec(), "image/png", "a.png");
        assert!(load_payload_image(&payload).is_err());
    }

    #[test]
    fn test_squeeze_payload_respects_dimension_bound() {
        let bytes = encode_image(&gradient_image(300, 120), ImageMime::Png, 50).unwrap();
        let payload = BinaryPayload::new(bytes, "image/png", "wide.png");
        let options = CompressionOptions::new(Some(10.0), Some(150), Some(false)).unwrap();

        let compressed = squeeze_payload(payload, &options).unwrap();
        let (img, _) = load_payload_image(&compressed).unwrap();
        let (w, h) = img.dimensions();
        assert!(w <= 150 && h <= 150);
        assert_eq!(compressed.mime, "image/png");
        assert_eq!(compressed.filename, "wide.png");
    }

    #[test]
    fn test_encode_image_jpeg_magic() {
        let data = encode_image(&gradient_image(10, 10), ImageMime::Jpeg, 80).unwrap();
        assert_eq!(&data[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_encode_image_png_magic() {
        let data = encode_image(&gradient_image(10, 10), ImageMime::Png, 50).unwrap();
        assert_eq!(&data[0..8], &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_encode_image_webp_riff_container() {
        let data = encode_image(&gradient_image(10, 10), ImageMime::WebP, 80).unwrap();
        assert_eq!(&data[0..4], b"RIFF");
    }

    #[tokio::test]
    async fn test_compress_data_uri_small_image() {
        let uri = png_data_uri(&gradient_image(64, 64));
        let original_size = base64_payload_size(&uri);

        let options = CompressionOptions::new(Some(10.0), Some(1920), Some(true)).unwrap();
        let compressed = compress_data_uri(&uri, None, options).await.unwrap();

        assert!(compressed.starts_with("data:image/png;base64,"));
        // Round-trips through Decode and stays within the original's size.
        let payload = decode_data_uri(&compressed, "out.png").unwrap();
        assert!(!payload.is_empty());
        assert!(base64_payload_size(&compressed) <= original_size);
    }

    #[tokio::test]
    async fn test_compress_data_uri_default_filename() {
        let uri = png_data_uri(&gradient_image(16, 16));
        let compressed = compress_data_uri(&uri, None, CompressionOptions::default())
            .await
            .unwrap();
        let payload = decode_data_uri(&compressed, "x").unwrap();
        assert_eq!(payload.mime, "image/png");
    }

    #[tokio::test]
    async fn test_compress_data_uri_malformed_input() {
        let result = compress_data_uri("nonsense", None, CompressionOptions::default()).await;
        assert!(matches!(result, Err(SqueezeError::MalformedDataUri(_))));
    }

    #[tokio::test]
    async fn test_compress_data_uri_inline_engine() {
        let uri = png_data_uri(&gradient_image(32, 32));
        let options = CompressionOptions::new(None, None, Some(false)).unwrap();
        assert!(compress_data_uri(&uri, Some("inline.png"), options).await.is_ok());
    }

    #[tokio::test]
    async fn test_compress_to_result_maps_errors() {
        let result = compress_to_result("not-a-uri", None, CompressionOptions::default()).await;
        assert!(!result.success);
        assert!(result.url.is_none());
        assert!(result.error.unwrap().contains("data:"));
    }

    #[tokio::test]
    async fn test_compress_to_result_success() {
        let uri = png_data_uri(&gradient_image(16, 16));
        let result = compress_to_result(&uri, None, CompressionOptions::default()).await;
        assert!(result.success);
        assert!(result.url.unwrap().starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_compress_data_uri_sync() {
        let uri = png_data_uri(&gradient_image(16, 16));
        let compressed = compress_data_uri_sync(&uri, None, CompressionOptions::default()).unwrap();
        assert!(compressed.starts_with("data:image/png;base64,"));
    }
}
