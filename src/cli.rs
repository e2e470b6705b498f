use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "uri-squeeze",
    about = "Compress and inspect images carried as base64 data URIs",
    long_about = "uri-squeeze works on images encoded as base64 data URIs (data:<mime>;base64,<payload>). \
                  It measures payload sizes without decoding them, reports image details for preview \
                  purposes, and compresses payloads under a size budget with optional dimension bounding. \
                  PNG output is optimized with oxipng; lossy formats walk a descending quality ladder.",
    version = "0.1.0",
    after_help = "EXAMPLES:\n  \
    uri-squeeze compress photo.uri compressed.uri -s 0.5 -d 1280\n  \
    cat photo.uri | uri-squeeze compress - --json\n  \
    uri-squeeze measure photo.uri\n  \
    uri-squeeze info photo.uri -f photo.png"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short = 'q', long, global = true, help = "Suppress informational output")]
    pub quiet: bool,

    #[arg(short = 'v', long, global = true, help = "Enable verbose output")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(
        about = "Compress a data URI image under a size budget",
        long_about = "Compress the image carried by a data URI. The payload is decoded, bounded to the \
                      maximum dimension, re-encoded under the size budget and written back out as a \
                      new data URI."
    )]
    Compress {
        #[arg(help = "File holding the data URI, or '-' for stdin")]
        input: PathBuf,

        #[arg(help = "Output file for the compressed data URI (stdout if omitted)")]
        output: Option<PathBuf>,

        #[arg(
            short = 's',
            long = "max-size-mb",
            help = "Target upper bound on output size in MB (default: 1.0)",
            long_help = "Target upper bound on the compressed payload size, in megabytes. \
                         If the budget cannot be met within the round limit, the smallest \
                         attempt is returned."
        )]
        max_size_mb: Option<f64>,

        #[arg(
            short = 'd',
            long = "max-dimension",
            help = "Maximum width or height in pixels (default: 1920)",
            long_help = "Upper bound on the longer image edge. Larger images are downscaled \
                         with aspect ratio preserved before encoding."
        )]
        max_dimension: Option<u32>,

        #[arg(
            short = 'f',
            long,
            help = "Display filename for the payload (default: image.png)"
        )]
        filename: Option<String>,

        #[arg(
            long = "no-worker",
            help = "Run the compression engine inline instead of on a worker thread"
        )]
        no_worker: bool,

        #[arg(
            long,
            help = "Emit the outcome as a JSON result record instead of failing the process",
            long_help = "Print a {success, url, error} JSON record. Compression failures are \
                         reported inside the record and the process exits successfully."
        )]
        json: bool,
    },

    #[command(
        about = "Measure the decoded byte size of a data URI payload",
        long_about = "Compute the exact decoded byte count of the base64 payload without \
                      materializing the binary."
    )]
    Measure {
        #[arg(help = "File holding the data URI, or '-' for stdin")]
        input: PathBuf,
    },

    #[command(
        about = "Display image information for a data URI",
        long_about = "Decode the payload header and report filename, dimensions, payload size, \
                      MIME type and compression suggestions."
    )]
    Info {
        #[arg(help = "File holding the data URI, or '-' for stdin")]
        input: PathBuf,

        #[arg(short = 'f', long, help = "Display filename for the report")]
        filename: Option<String>,
    },
}
