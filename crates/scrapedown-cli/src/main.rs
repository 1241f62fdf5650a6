//! Command-line front end for scrapedown.
//!
//! Reads HTML from a file, stdin or a URL, linearizes it into Markdown or
//! plain text, and writes the result to stdout or a file. With `--summarize`
//! the rendered text is piped through a completion endpoint first.

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context as _, Result};
use clap::{Parser, ValueEnum};
use scrapedown::{CompletionClient, Fetcher, OutputFormat, RenderOptions, convert_html};

/// Linearize a web page into Markdown or plain text.
#[derive(Parser)]
#[command(name = "scrapedown", version, about, long_about = None)]
struct Cli {
    /// HTML file to read, or `-` for stdin (default: stdin)
    #[arg(value_name = "INPUT", conflicts_with = "url")]
    input: Option<PathBuf>,

    /// Fetch the page from a URL instead of reading a file
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Write the result to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Save to a uniquely named file in the current directory
    #[arg(long, conflicts_with = "output")]
    save: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Markdown)]
    format: Format,

    /// Keep `nav` subtrees in the output
    #[arg(long)]
    include_nav: bool,

    /// User-Agent header for --url fetches
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Request timeout in seconds for --url fetches
    #[arg(long, value_name = "SECS", default_value_t = 10)]
    timeout: u64,

    /// Pipe the rendered text through a completion endpoint
    #[arg(long)]
    summarize: bool,

    /// Bearer token for --summarize (falls back to SCRAPEDOWN_API_KEY)
    #[arg(long, value_name = "KEY")]
    api_key: Option<String>,

    /// Completion endpoint for --summarize
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Instruction prepended to the rendered text when summarizing
    #[arg(long, value_name = "TEXT", default_value = scrapedown::completion::DEFAULT_QUERY)]
    query: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Markdown,
    Text,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Markdown => Self::Markdown,
            Format::Text => Self::PlainText,
        }
    }
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Markdown => "md",
            Format::Text => "txt",
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let html = read_input(&cli)?;
    let options = RenderOptions { format: cli.format.into(), include_nav: cli.include_nav };
    let mut rendered = convert_html(&html, &options)?;

    if cli.summarize {
        let api_key = cli
            .api_key
            .clone()
            .or_else(|| std::env::var("SCRAPEDOWN_API_KEY").ok())
            .context("--summarize needs --api-key or the SCRAPEDOWN_API_KEY environment variable")?;
        let client = match &cli.api_url {
            Some(api_url) => CompletionClient::with_api_url(api_key, api_url),
            None => CompletionClient::new(api_key),
        };
        rendered = client.summarize(&cli.query, &rendered)?;
        rendered.push('\n');
    }

    match &cli.output {
        Some(path) => fs::write(path, &rendered)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None if cli.save => {
            let path = PathBuf::from(format!("{}.{}", uuid::Uuid::new_v4(), cli.format.extension()));
            fs::write(&path, &rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("saved {}", path.display());
        }
        None => print!("{rendered}"),
    }

    Ok(())
}

fn read_input(cli: &Cli) -> Result<String> {
    if let Some(url) = &cli.url {
        let mut fetcher = Fetcher::with_timeout(Duration::from_secs(cli.timeout));
        if let Some(user_agent) = &cli.user_agent {
            fetcher = fetcher.user_agent(user_agent.clone());
        }
        return Ok(fetcher.fetch(url)?);
    }

    match &cli.input {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}
