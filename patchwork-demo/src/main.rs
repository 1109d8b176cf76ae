//! Patchwork demo
//!
//! Loads a contact record, applies a partial JSON patch to it and prints the
//! updated record.
//!
//! Usage:
//!   patchwork-demo --record contact.json --patch patch.json
//!   echo '{"name":"Grace"}' | patchwork-demo --record contact.json --patch -

use anyhow::{Context, Result, bail};
use clap::Parser;
use patchwork_demo::{apply_patch, parse_contact, updater_config};
use patchwork_json::JsonUpdater;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "patchwork-demo")]
#[command(about = "Apply a partial JSON patch to a contact record")]
struct Args {
    /// Contact record as JSON (`-` for stdin)
    #[arg(short, long)]
    record: PathBuf,

    /// Patch fragment as JSON (`-` for stdin)
    #[arg(short, long)]
    patch: PathBuf,

    /// Fail on keys that are not contact fields
    #[arg(long)]
    reject_unknown: bool,

    /// Treat explicit nulls as absent keys
    #[arg(long)]
    skip_nulls: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Ok(BufReader::new(file))
}

fn main() -> Result<()> {
    let args = Args::parse();
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();

    if is_stdin(&args.record) && is_stdin(&args.patch) {
        bail!("only one of --record and --patch can read from stdin");
    }

    let contact = if is_stdin(&args.record) {
        parse_contact(io::stdin().lock())?
    } else {
        parse_contact(open(&args.record)?)?
    };
    debug!(id = contact.id(), "loaded contact");

    let updater = JsonUpdater::new(updater_config(args.reject_unknown, args.skip_nulls));
    let updated = if is_stdin(&args.patch) {
        apply_patch(&updater, &contact, &mut io::stdin().lock())?
    } else {
        let mut patch = open(&args.patch)?;
        apply_patch(&updater, &contact, &mut patch)?
    };

    if updated == contact {
        info!("patch left the contact unchanged");
    }
    println!(
        "{}",
        serde_json::to_string_pretty(&updated).context("failed to render contact")?
    );
    Ok(())
}
