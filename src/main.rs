// Command-line front end: inline one page and write the result.

use anyhow::{Context, Result};
use clap::Parser;
use inliner::{InlineOptions, Inliner};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "inliner")]
#[command(
    version,
    about = "Inline every stylesheet, script and (optionally) image of a web page into one HTML file"
)]
struct Cli {
    #[arg(value_name = "SOURCE", help = "Page URL or path to a local HTML file")]
    source: String,

    #[arg(long, help = "Embed <img> sources and CSS url() references as data URIs")]
    images: bool,

    #[arg(long, help = "Keep inlined scripts as they are instead of minifying them")]
    no_uglify: bool,

    #[arg(long, help = "Collapse whitespace runs outside <pre> and <textarea>")]
    collapse_whitespace: bool,

    #[arg(long, help = "Strip comments and whitespace from inlined CSS")]
    compress_css: bool,

    #[arg(
        long,
        value_name = "SECS",
        default_value_t = 30,
        help = "Per-request timeout in seconds (0 disables it)"
    )]
    timeout: u64,

    #[arg(long, short, value_name = "PATH", help = "Output file path (stdout if omitted)")]
    output: Option<PathBuf>,

    #[arg(long, short, help = "Enable debug logging")]
    verbose: bool,
}

impl Cli {
    fn options(&self) -> Result<InlineOptions> {
        let timeout = (self.timeout > 0).then(|| Duration::from_secs(self.timeout));
        let options = InlineOptions::builder()
            .uglify(!self.no_uglify)
            .images(self.images)
            .collapse_whitespace(self.collapse_whitespace)
            .compress_css(self.compress_css)
            .request_timeout(timeout)
            .build()?;
        Ok(options)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .init();

    let inliner = Inliner::new(cli.options()?);
    let html = inliner
        .inline(&cli.source)
        .await
        .with_context(|| format!("failed to inline {}", cli.source))?;

    match &cli.output {
        Some(path) => {
            tokio::fs::write(path, html.as_bytes())
                .await
                .with_context(|| format!("failed to write {}", path.display()))?;
            log::info!("Wrote {} bytes to {}", html.len(), path.display());
        }
        None => println!("{html}"),
    }

    Ok(())
}
