use clap::Parser;

use crate::session::OutputMode;

#[derive(Parser, Debug, Clone)]
#[command(name = "search-console")]
#[command(about = "Index a small corpus and answer term queries", long_about = None)]
pub struct Args {
    /// Corpus file or directory (.jsonl, .json, or one document per line)
    #[arg(long)]
    pub corpus: Option<String>,
    /// Also index the built-in sample documents when --corpus is given
    #[arg(long, default_value_t = false)]
    pub with_sample: bool,
    /// Run these queries and exit instead of prompting
    #[arg(long = "query", value_name = "TERM")]
    pub queries: Vec<String>,
    /// Print one JSON object per query
    #[arg(long, default_value_t = false)]
    pub json: bool,
    /// Word that ends the interactive loop
    #[arg(long, default_value = "exit")]
    pub exit_word: String,
}

impl Args {
    pub fn output_mode(&self) -> OutputMode {
        if self.json { OutputMode::Json } else { OutputMode::Text }
    }
}
