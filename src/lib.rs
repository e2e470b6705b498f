pub mod cli;
pub mod constants;
pub mod datauri;
pub mod error;
pub mod info;
pub mod logger;
pub mod preview;
pub mod processing;
pub mod utils;

pub use datauri::{decode_data_uri, encode_data_uri, split_data_uri, BinaryPayload};
pub use error::{Result, SqueezeError};
pub use info::{describe_data_uri, print_image_info};
pub use preview::{CompressResult, PreviewDescriptor};
pub use processing::{
    compress_data_uri, compress_data_uri_sync, compress_to_result, squeeze_payload,
    CompressionOptions, ImageMime,
};
pub use utils::{base64_payload_size, calculate_compression_ratio, format_file_size};
