use anyhow::Result;
use search_core::Searchable;
use serde::Serialize;

use std::collections::HashSet;
use std::io::{self, BufRead, Write};
use std::time::Instant;

pub const PROMPT: &str = "Enter search term (type '{exit}' to quit):";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Text,
    Json,
}

#[derive(Serialize)]
pub struct SearchResponse<'a> {
    pub query: &'a str,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: &'a [String],
}

/// Why a session loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    ExitWord,
    InvalidInput,
}

/// Interactive read-search-print loop over owned input and output streams.
pub struct SearchConsole<'e, R, W> {
    engine: &'e dyn Searchable,
    input: R,
    output: W,
    mode: OutputMode,
    exit_word: String,
}

impl<'e, R: BufRead, W: Write> SearchConsole<'e, R, W> {
    pub fn new(engine: &'e dyn Searchable, input: R, output: W) -> Self {
        Self { engine, input, output, mode: OutputMode::Text, exit_word: "exit".into() }
    }

    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_exit_word(mut self, word: impl Into<String>) -> Self {
        self.exit_word = word.into();
        self
    }

    /// Print the indexed documents, then answer queries until the exit word,
    /// an empty line, end of input or a line that is not valid UTF-8. Output is flushed before returning.
    pub fn run(mut self) -> Result<(SessionEnd, W)> {
        if self.mode == OutputMode::Text {
            self.print_indexed_documents()?;
        }
        let end = self.run_loop();
        self.output.flush()?;
        Ok((end?, self.output))
    }

    /// Answer each query once, without prompting.
    pub fn run_queries<S: AsRef<str>>(mut self, queries: &[S]) -> Result<W> {
        for q in queries {
            self.answer(q.as_ref())?;
        }
        self.output.flush()?;
        Ok(self.output)
    }

    fn run_loop(&mut self) -> Result<SessionEnd> {
        let prompt = PROMPT.replace("{exit}", &self.exit_word);
        loop {
            if self.mode == OutputMode::Text {
                writeln!(self.output, "\n{prompt}")?;
                self.output.flush()?;
            }
            let mut line = String::new();
            let read = match self.input.read_line(&mut line) {
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                    tracing::warn!(error = %e, "unreadable input line");
                    0
                }
                Err(e) => return Err(e.into()),
            };
            let query = line.trim_end_matches(['\r', '\n']);
            if read == 0 || query.is_empty() {
                tracing::debug!("empty input, ending session");
                if self.mode == OutputMode::Text {
                    writeln!(self.output, "Error: Invalid input. Exiting...")?;
                }
                return Ok(SessionEnd::InvalidInput);
            }
            if query.trim().eq_ignore_ascii_case(&self.exit_word) {
                if self.mode == OutputMode::Text {
                    writeln!(self.output, "Exiting...")?;
                }
                return Ok(SessionEnd::ExitWord);
            }
            self.answer(query)?;
        }
    }

    fn print_indexed_documents(&mut self) -> Result<()> {
        writeln!(self.output, "Indexed documents:")?;
        for doc in self.engine.list_indexed_documents() {
            writeln!(self.output, "{doc}")?;
        }
        Ok(())
    }

    fn answer(&mut self, query: &str) -> Result<()> {
        let start = Instant::now();
        let results = search_all(self.engine, query);
        let elapsed = start.elapsed();
        tracing::debug!(query, total_hits = results.len(), took_s = elapsed.as_secs_f64(), "answered query");
        match self.mode {
            OutputMode::Json => {
                let resp = SearchResponse {
                    query,
                    took_s: elapsed.as_secs_f64(),
                    total_hits: results.len(),
                    results: &results,
                };
                serde_json::to_writer(&mut self.output, &resp)?;
                writeln!(self.output)?;
            }
            OutputMode::Text if results.is_empty() => {
                writeln!(self.output, "No matching documents found.")?;
            }
            OutputMode::Text => {
                writeln!(self.output, "Matching documents:")?;
                for doc in &results {
                    writeln!(self.output, "{doc}")?;
                }
            }
        }
        Ok(())
    }
}

/// Search each whitespace separated word and union the hits in first-seen order.
pub fn search_all(engine: &dyn Searchable, query: &str) -> Vec<String> {
    let mut words = query.split_whitespace();
    match (words.next(), words.next()) {
        (None, _) => Vec::new(),
        (Some(term), None) => engine.search(term),
        _ => {
            let mut seen: HashSet<String> = HashSet::new();
            query
                .split_whitespace()
                .flat_map(|term| engine.search(term))
                .filter(|doc| seen.insert(doc.clone()))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Canned;

    impl Searchable for Canned {
        fn search(&self, term: &str) -> Vec<String> {
            match term {
                "a" => vec!["one".into(), "two".into()],
                "b" => vec!["two".into(), "three".into()],
                _ => Vec::new(),
            }
        }
        fn list_indexed_documents(&self) -> Vec<String> {
            vec!["one".into(), "two".into(), "three".into()]
        }
    }

    #[test]
    fn multi_word_queries_union_in_first_seen_order() {
        assert_eq!(search_all(&Canned, "a b"), vec!["one", "two", "three"]);
        assert_eq!(search_all(&Canned, "b a"), vec!["two", "three", "one"]);
        assert!(search_all(&Canned, "   ").is_empty());
    }

    #[test]
    fn exit_word_is_case_insensitive() {
        let console = SearchConsole::new(&Canned, "a\n  EXIT \n".as_bytes(), Vec::new());
        let (end, out) = console.run().unwrap();
        assert_eq!(end, SessionEnd::ExitWord);
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("Indexed documents:\none\ntwo\nthree\n"));
        assert!(out.contains("Matching documents:\none\ntwo\n"));
        assert!(out.ends_with("Exiting...\n"));
    }

    #[test]
    fn blank_line_is_a_query_not_an_exit() {
        let console = SearchConsole::new(&Canned, "   \na\nexit\n".as_bytes(), Vec::new());
        let (end, out) = console.run().unwrap();
        assert_eq!(end, SessionEnd::ExitWord);
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("No matching documents found.\n"));
        assert!(out.contains("Matching documents:\none\ntwo\n"));
        assert!(!out.contains("Invalid input"));
    }

    #[test]
    fn invalid_utf8_ends_the_session_cleanly() {
        let input: &[u8] = b"a\n\xff\xfe\nb\n";
        let console = SearchConsole::new(&Canned, input, Vec::new());
        let (end, out) = console.run().unwrap();
        assert_eq!(end, SessionEnd::InvalidInput);
        let out = String::from_utf8(out).unwrap();
        assert!(out.ends_with("Error: Invalid input. Exiting...\n"));
        assert_eq!(out.matches("Matching documents:").count(), 1);
    }
}
