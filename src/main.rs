//! udon5e CLI - Converts dndjp D&D 5e character sheets for Udonarium.
//!
//! This is the main entry point for the udon5e command-line application.

use std::fs;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use udon5e::prelude::*;
use udon5e::scrape::decode_with_label;
use udon5e_server::ServerConfig;

/// udon5e - dndjp character sheets to Udonarium characters
#[derive(Parser)]
#[command(name = "udon5e")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert saved sheet pages to Udonarium zip archives
    Convert {
        /// Saved sheet pages
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, env = "OUTPUT_FOLDER")]
        output: PathBuf,

        /// Write the bare XML sheet instead of a zip archive
        #[arg(long)]
        xml: bool,

        /// Text encoding of the saved pages
        #[arg(short, long, default_value = "shift_jis")]
        encoding: String,

        #[command(flatten)]
        palette: PaletteArgs,
    },

    /// Fetch a sheet from the site and write its zip archive
    Fetch {
        /// Sheet URL (https://dndjp.sakura.ne.jp/OUTPUT.php?ID=...)
        #[arg(short, long)]
        url: String,

        /// Output directory
        #[arg(short, long, env = "OUTPUT_FOLDER")]
        output: PathBuf,

        #[command(flatten)]
        palette: PaletteArgs,
    },

    /// Print the record extracted from a saved sheet page as JSON
    Extract {
        /// Saved sheet page
        #[arg(short, long)]
        input: PathBuf,

        /// Text encoding of the saved page
        #[arg(short, long, default_value = "shift_jis")]
        encoding: String,
    },

    /// Print the chat palette for a saved sheet page
    Palette {
        /// Saved sheet page
        #[arg(short, long)]
        input: PathBuf,

        /// Text encoding of the saved page
        #[arg(short, long, default_value = "shift_jis")]
        encoding: String,

        #[command(flatten)]
        palette: PaletteArgs,
    },

    /// Run the HTTP service
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value_t = 3000)]
        port: u16,

        /// Address to bind
        #[arg(short, long, env = "BIND_ADDR", default_value = "0.0.0.0")]
        bind: IpAddr,

        /// Timeout for each sheet download, in seconds
        #[arg(long, env = "FETCH_TIMEOUT_SECS")]
        fetch_timeout_secs: Option<u64>,
    },
}

/// Chat palette options shared by the converting commands.
#[derive(Args)]
struct PaletteArgs {
    /// Write sheet numbers instead of resource references
    #[arg(long)]
    simple_palette: bool,

    /// Roll command style: "default" for 1d20, anything else for AT/AR
    #[arg(long, default_value = "")]
    roll_command: String,
}

impl PaletteArgs {
    fn options(&self) -> ConvertOptions {
        ConvertOptions {
            use_computed_values: self.simple_palette,
            roll_command: self.roll_command.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,udon5e=debug".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    load_env(dotenvy::dotenv());

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            xml,
            encoding,
            palette,
        } => {
            cmd_convert(&input, &output, xml, &encoding, &palette.options())?;
        }
        Commands::Fetch {
            url,
            output,
            palette,
        } => {
            cmd_fetch(&url, &output, &palette.options()).await?;
        }
        Commands::Extract { input, encoding } => {
            cmd_extract(&input, &encoding)?;
        }
        Commands::Palette {
            input,
            encoding,
            palette,
        } => {
            cmd_palette(&input, &encoding, &palette.options())?;
        }
        Commands::Serve {
            port,
            bind,
            fetch_timeout_secs,
        } => {
            let config = ServerConfig {
                bind,
                port,
                fetch_timeout: fetch_timeout_secs.map(Duration::from_secs),
            };
            udon5e_server::serve(config)
                .await
                .context("Server failed")?;
        }
    }

    Ok(())
}

/// Settings in a .env file fill in the environment before clap reads it.
/// Variables already set in the process win.
fn load_env(loaded: dotenvy::Result<PathBuf>) {
    match loaded {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "failed to load .env"),
    }
}

fn cmd_convert(
    inputs: &[PathBuf],
    output: &Path,
    xml_only: bool,
    encoding: &str,
    options: &ConvertOptions,
) -> Result<()> {
    fs::create_dir_all(output).context("Failed to create output directory")?;

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    for input in inputs {
        pb.set_message(input.display().to_string());

        let page = fs::read(input)
            .with_context(|| format!("Failed to read {}", input.display()))?;
        let conversion = convert_bytes(&page, encoding, options)
            .with_context(|| format!("Failed to convert {}", input.display()))?;
        tracing::debug!(input = %input.display(), name = %conversion.record.name, "converted page");

        let (file_name, contents) = if xml_only {
            (conversion.entry_name.clone(), conversion.xml.into_bytes())
        } else {
            (conversion.archive_file_name(), conversion.archive)
        };
        let output_path = output.join(file_name.replace(['/', '\\'], "_"));
        fs::write(&output_path, contents)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;

        pb.inc(1);
    }

    pb.finish_with_message("Done");
    println!(
        "Converted {} sheets in {:?}",
        inputs.len(),
        start.elapsed()
    );

    Ok(())
}

async fn cmd_fetch(url: &str, output: &Path, options: &ConvertOptions) -> Result<()> {
    let url = SheetUrl::parse(url).context("Not a character sheet URL")?;

    println!("Fetching: {}", url);
    let page = SheetFetcher::new()?
        .fetch(&url)
        .await
        .context("Failed to fetch sheet")?;

    let conversion = convert(&page, options).context("Failed to convert sheet")?;

    fs::create_dir_all(output).context("Failed to create output directory")?;
    let output_path = output.join(conversion.archive_file_name());
    fs::write(&output_path, &conversion.archive).context("Failed to write archive")?;

    println!(
        "Wrote {} ({} bytes)",
        output_path.display(),
        conversion.archive.len()
    );

    Ok(())
}

fn cmd_extract(input: &Path, encoding: &str) -> Result<()> {
    let record = extract_html(&read_page(input, encoding)?);
    let json = serde_json::to_string_pretty(&record).context("Failed to serialize record")?;
    println!("{}", json);

    Ok(())
}

fn cmd_palette(input: &Path, encoding: &str, options: &ConvertOptions) -> Result<()> {
    let record = extract_html(&read_page(input, encoding)?);
    println!(
        "{}",
        build_chat_palette(&record, options.use_computed_values, &options.roll_command)
    );

    Ok(())
}

fn read_page(input: &Path, encoding: &str) -> Result<String> {
    let bytes = fs::read(input).context("Failed to read input file")?;
    Ok(decode_with_label(&bytes, encoding)?)
}
