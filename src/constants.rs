pub const DEFAULT_MAX_SIZE_MB: f64 = 1.0;
pub const DEFAULT_MAX_DIMENSION: u32 = 1920;
pub const DEFAULT_USE_WORKER_THREAD: bool = true;
pub const DEFAULT_FILENAME: &str = "image.png";

pub const INITIAL_QUALITY: u8 = 85;
pub const MIN_QUALITY: u8 = 20;
pub const QUALITY_STEP: u8 = 10;

// Scale factor applied per downscale round, as a percentage of the current edge.
pub const DOWNSCALE_PERCENT: u32 = 80;
pub const MAX_SQUEEZE_ROUNDS: usize = 10;

pub const ZOPFLI_ITERATIONS: u8 = 15;
pub const LIBDEFLATER_HIGH_LEVEL: u8 = 12;
pub const LIBDEFLATER_LOW_LEVEL: u8 = 8;

pub const AVIF_ENCODE_SPEED: u8 = 4;

/// Decoded payloads above this size are rejected before any image work.
pub const MAX_PAYLOAD_SIZE: u64 = 100 * 1024 * 1024;
/// Neither image edge may exceed this after decoding.
pub const MAX_IMAGE_DIMENSION: u32 = 16384;

pub const PROGRESS_SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";

pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageMime {
    Jpeg,
    Png,
    WebP,
    Avif,
    Gif,
    Bmp,
    Tiff,
}

impl ImageMime {
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        match mime.to_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Some(ImageMime::Jpeg),
            "image/png" => Some(ImageMime::Png),
            "image/webp" => Some(ImageMime::WebP),
            "image/avif" => Some(ImageMime::Avif),
            "image/gif" => Some(ImageMime::Gif),
            "image/bmp" => Some(ImageMime::Bmp),
            "image/tiff" => Some(ImageMime::Tiff),
            _ => None,
        }
    }

    pub fn from_image_format(format: image::ImageFormat) -> Option<Self> {
        match format {
            image::ImageFormat::Jpeg => Some(ImageMime::Jpeg),
            image::ImageFormat::Png => Some(ImageMime::Png),
            image::ImageFormat::WebP => Some(ImageMime::WebP),
            image::ImageFormat::Avif => Some(ImageMime::Avif),
            image::ImageFormat::Gif => Some(ImageMime::Gif),
            image::ImageFormat::Bmp => Some(ImageMime::Bmp),
            image::ImageFormat::Tiff => Some(ImageMime::Tiff),
            _ => None,
        }
    }

    pub fn to_image_format(self) -> image::ImageFormat {
        match self {
            ImageMime::Jpeg => image::ImageFormat::Jpeg,
            ImageMime::Png => image::ImageFormat::Png,
            ImageMime::WebP => image::ImageFormat::WebP,
            ImageMime::Avif => image::ImageFormat::Avif,
            ImageMime::Gif => image::ImageFormat::Gif,
            ImageMime::Bmp => image::ImageFormat::Bmp,
            ImageMime::Tiff => image::ImageFormat::Tiff,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ImageMime::Jpeg => "jpg",
            ImageMime::Png => "png",
            ImageMime::WebP => "webp",
            ImageMime::Avif => "avif",
            ImageMime::Gif => "gif",
            ImageMime::Bmp => "bmp",
            ImageMime::Tiff => "tiff",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageMime::Jpeg => "image/jpeg",
            ImageMime::Png => "image/png",
            ImageMime::WebP => "image/webp",
            ImageMime::Avif => "image/avif",
            ImageMime::Gif => "image/gif",
            ImageMime::Bmp => "image/bmp",
            ImageMime::Tiff => "image/tiff",
        }
    }

    /// Whether the encoder for this format takes a quality parameter.
    pub fn is_lossy(&self) -> bool {
        matches!(self, ImageMime::Jpeg | ImageMime::Avif)
    }
}
