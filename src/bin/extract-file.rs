//! Runs the top-article extractor over a saved copy of the listing page.

use clap::Parser;
use coindesk_top_watch::{coindesk, coindesk::CoindeskExtractor, Extractor};
use reqwest::Url;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "extract-file")]
#[command(about = "Extract the top article from a saved HTML file")]
struct Cli {
    file: PathBuf,

    /// Only look at the first N bytes, as a ranged fetch would
    #[arg(long)]
    max_bytes: Option<usize>,

    /// Page the file was saved from; relative links resolve against it
    #[arg(long, default_value = coindesk::DEFAULT_TARGET_URL)]
    page_url: Url,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut bytes = std::fs::read(&cli.file)?;
    if let Some(max) = cli.max_bytes {
        bytes.truncate(max);
    }
    let html = String::from_utf8_lossy(&bytes);

    let extractor = CoindeskExtractor::new(&cli.page_url);
    match extractor.extract_str(&html) {
        Ok(sighting) => println!("{}", sighting),
        Err(e) => {
            eprintln!("{} ({} bytes read)", e, bytes.len());
            std::process::exit(1);
        }
    }
    Ok(())
}
