//! Command-line converter: crossdown markdown in, HTML out.

mod vars;

use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossdown_engine::{Dialect, Variables};

#[derive(Parser)]
#[command(name = "crossdown", version, about = "Convert crossdown markdown to HTML")]
struct Cli {
    /// Input markdown file; reads stdin when omitted
    input: Option<PathBuf>,

    /// Write HTML here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Set a variable for inline code resolution (repeatable)
    #[arg(long = "var", value_name = "NAME=VALUE")]
    vars: Vec<String>,

    /// TOML file with a [variables] table; --var entries override it
    #[arg(long, value_name = "FILE")]
    vars_file: Option<PathBuf>,

    /// Print collected metadata to stderr
    #[arg(long)]
    show_meta: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let file_variables = match &cli.vars_file {
        Some(path) => {
            let loaded = vars::load(path)?;
            log::debug!("loaded {} variables from {}", loaded.len(), path.display());
            loaded
        }
        None => Variables::new(),
    };
    let variables = vars::merge(file_variables, &cli.vars)?;

    let text = match &cli.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => io::read_to_string(io::stdin()).context("Failed to read stdin")?,
    };
    log::debug!(
        "converting {} bytes with {} variables",
        text.len(),
        variables.len()
    );

    let dialect = Dialect::new();
    let rendered = dialect.convert(&text, &variables);
    log::debug!("rendered {} bytes of html", rendered.html.len());

    match &cli.output {
        Some(path) => fs::write(path, &rendered.html)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => print!("{}", rendered.html),
    }

    if cli.show_meta {
        for (key, values) in &rendered.metadata {
            eprintln!("{key}: {}", values.join(", "));
        }
    }

    Ok(())
}
