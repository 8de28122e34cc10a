use anyhow::Result;
use clap::Parser;
use search_console::build_index;
use search_console::config::Args;
use search_console::session::SearchConsole;
use tracing_subscriber::{fmt, EnvFilter};

use std::io;

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let args = Args::parse();
    let index = build_index(&args)?;

    let stdin = io::stdin();
    let console = SearchConsole::new(&index, stdin.lock(), io::stdout().lock())
        .with_mode(args.output_mode())
        .with_exit_word(args.exit_word.clone());

    if args.queries.is_empty() {
        let (end, _) = console.run()?;
        tracing::info!(?end, "session finished");
    } else {
        console.run_queries(&args.queries)?;
    }
    Ok(())
}
