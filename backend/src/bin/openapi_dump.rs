//! Emit the OpenAPI document as pretty JSON, to stdout or a file.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use backend::doc::ApiDoc;
use clap::Parser;
use color_eyre::eyre::Context;
use utoipa::OpenApi;

/// `openapi-dump` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "openapi-dump",
    about = "Print the Chirp OpenAPI document",
    version
)]
struct CliArgs {
    /// Write to this file instead of stdout.
    #[arg(long, short, value_name = "path")]
    output: Option<PathBuf>,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = CliArgs::parse();
    let document = ApiDoc::openapi()
        .to_pretty_json()
        .context("serialising OpenAPI document")?;
    match args.output {
        Some(path) => fs::write(&path, document)
            .with_context(|| format!("writing {}", path.display()))?,
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{document}").context("writing to stdout")?;
        }
    }
    Ok(())
}
