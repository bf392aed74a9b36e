//! zonecache - fetch a remote text resource through a local TTL cache
//!
//! Prints the resource body to stdout, downloading it only when the cached
//! copy is missing or older than the TTL.

use clap::Parser;
use std::process::ExitCode;

use zonecache::cli::Cli;
use zonecache::logging::init_logging;
use zonecache::{FetchError, Fetcher};

async fn run(cli: &Cli) -> Result<(), FetchError> {
    let config = cli.to_config()?;
    let fetcher = Fetcher::new(&config)?;
    let fetched = fetcher.fetch_entry(&cli.uri).await?;

    if cli.json {
        let json = serde_json::json!({
            "uri": fetched.uri,
            "path": fetched.path,
            "source": fetched.source,
            "bytes": fetched.content.len(),
            "content": fetched.content,
        });
        println!("{}", json);
    } else {
        print!("{}", fetched.content);
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("zonecache: {}", e);
            ExitCode::FAILURE
        }
    }
}
