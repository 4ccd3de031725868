//! OxiPack CLI
//!
//! Compresses a file with LZ77 + Huffman or RLE and reports the ratio.

mod commands;
mod utils;

use clap::{ArgAction, Args, Parser, Subcommand};
use commands::{cmd_compress, cmd_decompress, cmd_menu};
use oxipack::{ArtifactFormat, Lz77Config, Method, PipelineOptions, RlePolicy};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oxipack")]
#[command(author, version, about = "Pure Rust LZ77 + Huffman and RLE compressor")]
#[command(long_about = "
OxiPack compresses a file with one of two methods and writes two artifacts:
the compressed form and a reconstruction of the input.

Methods: lz77huffman, rle

Examples:
  oxipack compress notes.txt
  oxipack compress notes.txt -m rle --json
  oxipack compress notes.txt --framed -o notes.oxpk
  oxipack decompress notes.oxpk -m lz77huffman -o restored.txt
  oxipack menu notes.txt
")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file and write both artifacts
    #[command(alias = "c")]
    Compress {
        /// File to compress
        input: PathBuf,

        /// Compression method (lz77huffman, rle)
        #[arg(short, long, default_value = "lz77huffman")]
        method: Method,

        #[command(flatten)]
        codec: CodecArgs,
    },

    /// Reconstruct a file from a compressed artifact
    #[command(alias = "d")]
    Decompress {
        /// Compressed artifact
        artifact: PathBuf,

        /// Method the artifact was produced with
        #[arg(short, long)]
        method: Method,

        /// Output file
        #[arg(short, long, default_value = "decompressed.txt")]
        output: PathBuf,
    },

    /// Pick methods interactively until Exit is chosen
    #[command(alias = "m")]
    Menu {
        /// File to compress
        input: PathBuf,

        #[command(flatten)]
        codec: CodecArgs,
    },
}

/// Options shared by `compress` and `menu`.
#[derive(Args, Debug, Clone)]
struct CodecArgs {
    /// Compressed artifact path
    #[arg(short, long, default_value = "compressed.txt")]
    output: PathBuf,

    /// Reconstructed input path
    #[arg(short, long, default_value = "decompressed.txt")]
    decompressed: PathBuf,

    /// LZ77 search window in bytes
    #[arg(long, default_value_t = 256)]
    window: usize,

    /// LZ77 maximum match length
    #[arg(long, default_value_t = 15)]
    lookahead: usize,

    /// Prefix the LZ77 + Huffman artifact with a header so it can be decompressed
    #[arg(long)]
    framed: bool,

    /// Refuse RLE input containing ASCII digits
    #[arg(long)]
    strict_rle: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

impl CodecArgs {
    fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            lz77: Lz77Config::new(self.window, self.lookahead),
            artifact: if self.framed {
                ArtifactFormat::Framed
            } else {
                ArtifactFormat::Bare
            },
            rle_policy: if self.strict_rle {
                RlePolicy::Strict
            } else {
                RlePolicy::Lenient
            },
        }
    }
}

fn log_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = TermLogger::init(
        log_level(cli.verbose, cli.quiet),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Warning: logging unavailable: {}", e);
    }

    let result = match cli.command {
        Commands::Compress {
            input,
            method,
            codec,
        } => cmd_compress(&input, method, &codec),
        Commands::Decompress {
            artifact,
            method,
            output,
        } => cmd_decompress(&artifact, method, &output),
        Commands::Menu { input, codec } => cmd_menu(&input, &codec),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
