//! svg2turtle CLI
//!
//! Usage:
//!   svg2turtle [OPTIONS] [FILE]
//!
//! Options:
//!   -c, --config <FILE>         Settings file (TOML format)
//!   -f, --format <FORMAT>       Output format: text or python
//!   -o, --output <FILE>         Write to a file instead of stdout
//!   --segments <N>              Split every curve into N segments
//!   --segment-length <LEN>      Split curves into segments of about LEN units
//!   --headings                  Emit setheading before each move
//!   --no-flip                   Keep the SVG y axis pointing down
//!   --strict                    Fail on the first malformed path
//!   -v, --verbose               Debug logging on stderr
//!   -h, --help                  Print help

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use svg2turtle::{
    convert_file, convert_with_config, render, ConvertConfig, ConvertError, OutputFormat,
    Sampling, Settings,
};

#[derive(Parser)]
#[command(name = "svg2turtle")]
#[command(about = "Convert SVG path data into turtle graphics commands")]
struct Cli {
    /// Input SVG file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Settings file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Write output to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Split every curve into this many segments
    #[arg(long, conflicts_with = "segment_length")]
    segments: Option<usize>,

    /// Split curves into segments of roughly this length
    #[arg(long)]
    segment_length: Option<f64>,

    /// Emit setheading before each move
    #[arg(long)]
    headings: bool,

    /// Keep the SVG y axis pointing down
    #[arg(long)]
    no_flip: bool,

    /// Fail on the first malformed path instead of skipping it
    #[arg(long)]
    strict: bool,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    // Load settings
    let settings = match &cli.config {
        Some(path) => match Settings::from_file(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error loading settings '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };

    let config = apply_flags(&cli, settings.apply(ConvertConfig::default()));
    let format = cli.format.unwrap_or_else(|| settings.format());

    // Convert
    let result = match &cli.input {
        Some(path) => convert_file(path, &config),
        None => {
            let mut buffer = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buffer) {
                eprintln!("Error reading from stdin: {}", e);
                std::process::exit(1);
            }
            convert_with_config(&buffer, &config)
        }
    };

    let drawing = match result {
        Ok(drawing) => drawing,
        Err(ConvertError::Parse {
            element,
            data,
            errors,
        }) => {
            for error in &errors {
                eprint!("{}", error.format(&data, &element));
            }
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let rendered = render(&drawing, format);
    match &cli.output {
        Some(path) => {
            if let Err(e) = fs::write(path, rendered) {
                eprintln!("Error writing '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        }
        None => print!("{}", rendered),
    }
}

/// Command-line flags take precedence over the settings file
fn apply_flags(cli: &Cli, mut config: ConvertConfig) -> ConvertConfig {
    if let Some(segments) = cli.segments {
        config.emit.sampling = Sampling::Fixed { segments };
    }
    if let Some(segment_length) = cli.segment_length {
        config.emit.sampling = Sampling::Adaptive { segment_length };
    }
    if cli.headings {
        config.emit.headings = true;
    }
    if cli.no_flip {
        config.flip_y = false;
    }
    if cli.strict {
        config.strict = true;
    }
    config
}
