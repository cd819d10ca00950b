//! Dezoomify extension CLI: run the detection logic outside the browser

use clap::{Parser, Subcommand};
use colored::*;
use dezoomify_extension::parser::har::parse_har_from_file;
use dezoomify_extension::parser::manifest::parse_manifest_from_file;
use dezoomify_extension::parser::options::parse_options_from_file;
use dezoomify_extension::{scan_capture, Manifest, Options, UrlClassifier};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SCAN_TAB_ID: i64 = 1;

#[derive(Parser)]
#[command(name = "dezoomify-extension")]
#[command(about = "Detect zoomable images the way the Dezoomify extension does", long_about = None)]
#[command(version)]
struct Cli {
    /// Options file (json5); defaults apply to missing fields
    #[arg(long, global = true)]
    options: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify request URLs and print their viewer link
    Classify {
        /// Request URLs, as seen in the network panel
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Replay a HAR capture and list the images that would be opened
    Scan {
        /// HAR file exported from the browser's network panel
        har: PathBuf,

        /// Page the capture was recorded on, if the HAR does not name it
        #[arg(short, long)]
        page: Option<String>,

        /// Extension manifest; a built-in one is used otherwise
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },
}

const BUILTIN_MANIFEST: &str = r#"{
    "manifest_version": 2,
    "name": "Dezoomify",
    "version": "0.0.0",
    "browser_action": { "default_title": "Dezoomify" }
}"#;

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dezoomify_extension=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}", "❌ Failed!".red().bold());
        eprintln!("{}", format!("Error: {:#}", e).red());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let options = match &cli.options {
        Some(path) => parse_options_from_file(path)?,
        None => Options::default(),
    };

    match cli.command {
        Commands::Classify { urls } => {
            let classifier = UrlClassifier::new(options.viewer_url.clone());
            for url in urls {
                let classification = classifier.classify(&url);
                match classification.format {
                    Some(format) => {
                        println!("{} {}", "✔".green().bold(), url);
                        println!("  - Format: {}", format.to_string().bold());
                        println!("  - Descriptor: {}", classification.normalized);
                        println!("  - Viewer: {}", options.viewer_link(&classification.normalized).blue());
                    }
                    None => println!("{} {}", "✘".dimmed(), url.dimmed()),
                }
            }
        }

        Commands::Scan { har, page, manifest } => {
            let manifest: Manifest = match manifest {
                Some(path) => parse_manifest_from_file(path)?,
                None => dezoomify_extension::parser::manifest::parse_manifest_from_str(BUILTIN_MANIFEST)?,
            };
            let capture = parse_har_from_file(&har, SCAN_TAB_ID)?;
            let page_url = page
                .or_else(|| capture.page_url.clone())
                .ok_or_else(|| anyhow::anyhow!("The capture does not name its page, pass --page"))?;

            println!("{}", format!("Scanning {} requests from {}", capture.requests.len(), page_url).bold());
            let links = scan_capture(manifest, options, &capture, &page_url, SCAN_TAB_ID)?;

            if links.is_empty() {
                println!("{}", "No zoomable image found.".yellow());
            } else {
                println!("{}", format!("Found {} zoomable image(s):", links.len()).green().bold());
                for link in links {
                    println!("  - {}", link);
                }
            }
        }
    }

    Ok(())
}
