/// Utility functions for common operations
///
/// This module contains the size helpers shared by the pipeline and the CLI:
/// payload measurement, human-readable formatting and compression ratios.
use indicatif::{ProgressBar, ProgressStyle};

/// Compute the decoded byte count of a base64 data URI without decoding it
///
/// Everything strictly after the first comma is treated as payload. A string
/// with no comma is counted from index 0, header included; callers that pass
/// bare payloads rely on this.
///
/// # Arguments
/// * `base64` - The data URI (or bare base64 payload) to measure
///
/// # Returns
/// * Exact decoded byte count of the payload
pub fn base64_payload_size(base64: &str) -> u64 {
    let payload_start = base64.find(',').map_or(0, |i| i + 1);
    let raw_length = (base64.len() - payload_start) as u64;
    let padding: u64 = if base64.ends_with("==") {
        2
    } else if base64.ends_with('=') {
        1
    } else {
        0
    };
    (raw_length * 3 / 4).saturating_sub(padding)
}

/// Format file size in human-readable format
///
/// Divides by 1024 until the value fits its unit, keeping at most two decimal
/// places and trimming trailing zeros (`1536` -> `"1.5 KB"`, `1024` -> `"1 KB"`).
///
/// # Arguments
/// * `bytes` - Size in bytes
///
/// # Returns
/// * Human-readable size string (e.g., "1.5 KB", "512 Bytes")
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["Bytes", "KB", "MB", "GB", "TB", "PB"];
    const THRESHOLD: f64 = 1024.0;

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;
    while size >= THRESHOLD && unit_index < UNITS.len() - 1 {
        size /= THRESHOLD;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{} {}", trim_trailing_zeros(size), UNITS[unit_index])
    }
}

fn trim_trailing_zeros(value: f64) -> String {
    let rendered = format!("{:.2}", value);
    rendered
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Calculate compression ratio as a percentage
///
/// # Arguments
/// * `original_size` - Original payload size in bytes
/// * `compressed_size` - Compressed payload size in bytes
///
/// # Returns
/// * Compression ratio as percentage (positive means reduction, negative means increase)
pub fn calculate_compression_ratio(original_size: u64, compressed_size: u64) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    ((original_size as f64 - compressed_size as f64) / original_size as f64) * 100.0
}

/// Create a progress spinner with consistent styling
pub fn create_progress_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template(crate::constants::PROGRESS_SPINNER_TEMPLATE)
            .expect("Invalid progress template"),
    );
    pb.set_message(message.to_string());
    pb
}

/// Print compression result with formatted output
pub fn print_compression_result(original_size: u64, compressed_size: u64) {
    let ratio = calculate_compression_ratio(original_size, compressed_size);

    crate::info!(
        "📈 Compressed size: {} bytes ({})",
        compressed_size,
        format_file_size(compressed_size)
    );
    crate::info!("🎯 Compression ratio: {:.1}%", ratio);

    if ratio > 0.0 {
        crate::info!("✅ Successfully reduced payload size by {:.1}%", ratio);
    } else {
        crate::warn!("File size increased by {:.1}%", ratio.abs());
    }
}
