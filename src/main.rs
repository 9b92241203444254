use std::env;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context, Result};
use clap::Parser;
use pexels_downloader::{create_destination, Downloader};
use tracing::{error, info};

const DEFAULT_DESTINATION: &str = "output";

/// Flags also accepted with a single dash (`-key abc`, `-dst=out`).
const SINGLE_DASH_FLAGS: [&str; 3] = ["key", "dst", "query"];

#[derive(Parser)]
#[command(name = "pexels-downloader")]
#[command(about = "Download every photo of a Pexels search", long_about = None)]
#[command(after_help = "Flags may also be written with a single dash, e.g. -key <KEY>.")]
struct Cli {
    /// Authorization key
    #[arg(long, env = "PEXELS_API_KEY", hide_env_values = true)]
    key: String,

    /// Folder to save photos (default: ./output)
    #[arg(long)]
    dst: Option<PathBuf>,

    /// Query for search
    #[arg(long, default_value = "people")]
    query: String,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse_from(long_flags(env::args_os()));

    if let Err(e) = run(cli) {
        error!("{e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    if cli.key.is_empty() {
        bail!("no key provided");
    }

    let dst = cli.dst.unwrap_or_else(|| {
        info!("using default destination {DEFAULT_DESTINATION:?} at work directory");
        PathBuf::from(DEFAULT_DESTINATION)
    });

    let dst = create_destination(&dst)
        .with_context(|| format!("cannot create destination directory {}", dst.display()))?;

    let downloader = Downloader::new(dst, cli.key);

    let summary = downloader.run(&cli.query)?;

    info!("done, total count is {}", summary.photos);

    Ok(())
}

/// Rewrites `-key`, `-dst` and `-query` (with or without `=value`) to their
/// `--` form. The value following a rewritten flag is left untouched.
fn long_flags(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    let mut value_next = false;

    args.into_iter()
        .map(|arg| {
            if std::mem::take(&mut value_next) {
                return arg;
            }

            let Some(text) = arg.to_str() else {
                return arg;
            };

            let (flag, single_dash) = match text.strip_prefix("--") {
                Some(flag) => (flag, false),
                None => match text.strip_prefix('-') {
                    Some(flag) => (flag, true),
                    None => return arg,
                },
            };

            let (name, inline_value) = match flag.split_once('=') {
                Some((name, _)) => (name, true),
                None => (flag, false),
            };

            if !SINGLE_DASH_FLAGS.contains(&name) {
                return arg;
            }

            value_next = !inline_value;

            if single_dash {
                OsString::from(format!("--{flag}"))
            } else {
                arg
            }
        })
        .collect()
}
