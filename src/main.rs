use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use dotenvy::dotenv;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Direction {
    /// Binary meta file to JSON
    #[value(alias = "bin2json")]
    BinToText,
    /// JSON to binary meta file
    #[value(alias = "json2bin")]
    TextToBin,
}

#[derive(Debug, Parser)]
#[command(version, about = "Convert tile meta files between binary and JSON")]
struct Args {
    /// Conversion direction
    #[arg(value_enum)]
    direction: Direction,

    /// Read from this file instead of stdin
    #[arg(long, short = 'i', env = "TILE_META_INPUT")]
    input: Option<PathBuf>,

    /// Write to this file instead of stdout
    #[arg(long, short = 'o', env = "TILE_META_OUTPUT")]
    output: Option<PathBuf>,
}

fn read_input(path: Option<&PathBuf>) -> Result<Vec<u8>> {
    match path {
        Some(p) => fs::read(p).with_context(|| format!("read {:?}", p)),
        None => {
            let mut buf = Vec::new();
            io::stdin().lock().read_to_end(&mut buf).context("read stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&PathBuf>, bytes: &[u8]) -> Result<()> {
    match path {
        Some(p) => fs::write(p, bytes).with_context(|| format!("write {:?}", p)),
        None => {
            let mut out = io::stdout().lock();
            out.write_all(bytes).context("write stdout")?;
            out.flush().context("flush stdout")
        }
    }
}

fn main() -> Result<()> {
    // Load environment variables from .env if present
    let _ = dotenv();
    // stdout carries converted data, so logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();
    let input = read_input(args.input.as_ref())?;
    debug!(bytes = input.len(), direction = ?args.direction, "input read");

    let output = match args.direction {
        Direction::BinToText => {
            let text = tile_meta::bin_to_text(&input).context("decode meta file")?;
            info!(bytes = text.len(), "decoded");
            text.into_bytes()
        }
        Direction::TextToBin => {
            let text = std::str::from_utf8(&input).context("input is not UTF-8 text")?;
            let bytes = tile_meta::text_to_bin(text).context("encode meta file")?;
            info!(bytes = bytes.len(), "encoded");
            bytes
        }
    };

    write_output(args.output.as_ref(), &output)
}
