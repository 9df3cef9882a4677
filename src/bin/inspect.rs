use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tile_meta::{MetaRecord, MetaTable};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(about = "Summarize a binary tile meta file")]
struct Args {
    /// Meta file to read
    #[arg(long, short = 'i')]
    input: PathBuf,

    /// Print only the record for this tile hash
    #[arg(long)]
    tile: Option<u32>,

    /// Number of records to list
    #[arg(long, default_value_t = 20)]
    top: usize,
}

fn fmt_color(c: &[u8; 4]) -> String {
    format!("#{:02x}{:02x}{:02x}{:02x}", c[0], c[1], c[2], c[3])
}

fn fmt_record(i: usize, r: &MetaRecord) -> String {
    format!(
        "{:>4}: tile={:>10} bg={} win={} obj={} z=[{} {} {} {} {}] flags={:#010x}",
        i,
        r.tile_hash,
        fmt_color(&r.bg_color),
        fmt_color(&r.win_color),
        fmt_color(&r.obj_color),
        r.bg_for_z,
        r.bg_back_z,
        r.win_z,
        r.obj_z,
        r.obj_behind_z,
        r.flags
    )
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();
    let bytes = std::fs::read(&args.input).with_context(|| format!("open {:?}", args.input))?;
    let table = MetaTable::from_bytes(&bytes).with_context(|| format!("decode {:?}", args.input))?;
    tracing::debug!(records = table.len(), "loaded");

    if let Some(hash) = args.tile {
        let Some(r) = table.get(hash) else {
            bail!("no meta for tile {}", hash);
        };
        let idx = table.records().iter().position(|x| x == r).unwrap_or_default();
        println!("{}", fmt_record(idx, r));
        return Ok(());
    }

    println!("version {} | {} records | {} bytes", tile_meta::codec::SUPPORTED_VERSION, table.len(), bytes.len());
    for (i, r) in table.records().iter().take(args.top).enumerate() {
        println!("{}", fmt_record(i, r));
    }
    if table.len() > args.top {
        println!("... {} more", table.len() - args.top);
    }
    Ok(())
}
