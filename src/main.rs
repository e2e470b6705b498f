use clap::Parser;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use uri_squeeze::cli::{Args, Commands};
use uri_squeeze::error::Result;
use uri_squeeze::info::print_image_info;
use uri_squeeze::preview::CompressResult;
use uri_squeeze::processing::{compress_data_uri_sync, CompressionOptions};
use uri_squeeze::utils::{
    base64_payload_size, create_progress_spinner, format_file_size, print_compression_result,
};
use uri_squeeze::{info, logger};

fn main() -> Result<()> {
    let args = Args::parse();

    logger::set_quiet_mode(args.quiet);
    logger::set_verbose_mode(args.verbose);

    match args.command {
        Commands::Compress {
            input,
            output,
            max_size_mb,
            max_dimension,
            filename,
            no_worker,
            json,
        } => {
            run_compress(
                &input,
                output,
                max_size_mb,
                max_dimension,
                filename,
                no_worker,
                json,
            )?;
        }
        Commands::Measure { input } => {
            let uri = read_data_uri(&input)?;
            let size = base64_payload_size(&uri);
            println!("{} bytes ({})", size, format_file_size(size));
        }
        Commands::Info { input, filename } => {
            let uri = read_data_uri(&input)?;
            print_image_info(&uri, filename.as_deref().unwrap_or("image.png"))?;
        }
    }

    Ok(())
}

fn run_compress(
    input: &Path,
    output: Option<PathBuf>,
    max_size_mb: Option<f64>,
    max_dimension: Option<u32>,
    filename: Option<String>,
    no_worker: bool,
    json: bool,
) -> Result<()> {
    let uri = read_data_uri(input)?;
    let original_size = base64_payload_size(&uri);

    info!("🗜️  Compressing data URI from {:?}", input);
    info!(
        "📊 Original size: {} bytes ({})",
        original_size,
        format_file_size(original_size)
    );

    let pb = create_progress_spinner("Compressing image...");
    let outcome = CompressionOptions::new(max_size_mb, max_dimension, Some(!no_worker))
        .and_then(|options| compress_data_uri_sync(&uri, filename.as_deref(), options));
    match &outcome {
        Ok(_) => pb.finish_with_message("✅ Compression complete"),
        Err(_) => pb.finish_and_clear(),
    }

    if json {
        let result = CompressResult::from(outcome);
        println!("{}", serde_json::to_string(&result)?);
        return Ok(());
    }

    let compressed = outcome?;
    let compressed_size = base64_payload_size(&compressed);
    print_compression_result(original_size, compressed_size);

    match output {
        Some(path) => {
            fs::write(&path, &compressed)?;
            info!("📁 Output written to {:?}", path);
        }
        None => println!("{}", compressed),
    }

    Ok(())
}

fn read_data_uri(input: &Path) -> Result<String> {
    let raw = if input == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };
    Ok(raw.trim().to_string())
}
