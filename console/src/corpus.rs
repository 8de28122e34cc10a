use anyhow::{Context, Result};
use search_core::Indexable;
use serde::Deserialize;
use walkdir::WalkDir;

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// A source of documents that can feed any [`Indexable`].
pub trait CorpusSource {
    /// Index every document and return how many were submitted.
    fn index_into(&self, target: &mut dyn Indexable) -> Result<usize>;
}

pub const SAMPLE_DOCUMENTS: [&str; 3] = [
    "the brown fox jumped over the brown dog",
    "the lazy brown dog sat in the corner",
    "the red fox bit the lazy dog",
];

/// The built-in three document corpus.
#[derive(Debug, Default, Clone, Copy)]
pub struct SampleCorpus;

impl CorpusSource for SampleCorpus {
    fn index_into(&self, target: &mut dyn Indexable) -> Result<usize> {
        for doc in SAMPLE_DOCUMENTS {
            target.index(doc);
        }
        Ok(SAMPLE_DOCUMENTS.len())
    }
}

#[derive(Debug, Deserialize)]
struct InputDoc {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    body: String,
}

/// Documents read from a file, or from every file under a directory.
///
/// `.jsonl` holds one `{"body": ...}` object per line, `.json` an array of them
/// or a single object. Anything else is plain text with one document per line.
#[derive(Debug, Clone)]
pub struct FileCorpus {
    root: PathBuf,
}

impl FileCorpus {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }

    fn files(&self) -> Result<Vec<PathBuf>> {
        if self.root.is_file() {
            return Ok(vec![self.root.clone()]);
        }
        if !self.root.is_dir() {
            anyhow::bail!("corpus path {} does not exist", self.root.display());
        }
        let mut files: Vec<PathBuf> = WalkDir::new(&self.root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .collect();
        files.sort();
        Ok(files)
    }
}

impl CorpusSource for FileCorpus {
    fn index_into(&self, target: &mut dyn Indexable) -> Result<usize> {
        let mut count = 0;
        for file in self.files()? {
            let n = match file.extension().and_then(|s| s.to_str()) {
                Some("jsonl") => index_jsonl(&file, target),
                Some("json") => index_json(&file, target),
                _ => index_lines(&file, target),
            }
            .with_context(|| format!("failed to read corpus file {}", file.display()))?;
            tracing::info!(file = %file.display(), num_docs = n, "loaded corpus file");
            count += n;
        }
        Ok(count)
    }
}

fn ingest_doc(doc: InputDoc, target: &mut dyn Indexable) {
    tracing::debug!(id = ?doc.id, title = ?doc.title, "indexing document");
    target.index(&doc.body);
}

fn index_jsonl(file: &Path, target: &mut dyn Indexable) -> Result<usize> {
    let reader = BufReader::new(File::open(file)?);
    let mut count = 0;
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let doc: InputDoc = serde_json::from_str(&line)
            .with_context(|| format!("line {}", lineno + 1))?;
        ingest_doc(doc, target);
        count += 1;
    }
    Ok(count)
}

fn index_json(file: &Path, target: &mut dyn Indexable) -> Result<usize> {
    let reader = BufReader::new(File::open(file)?);
    let json: serde_json::Value = serde_json::from_reader(reader)?;
    let docs: Vec<InputDoc> = match json {
        serde_json::Value::Array(arr) => arr
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<_, _>>()?,
        obj @ serde_json::Value::Object(_) => vec![serde_json::from_value(obj)?],
        _ => anyhow::bail!("expected a JSON object or array of objects"),
    };
    let count = docs.len();
    for doc in docs {
        ingest_doc(doc, target);
    }
    Ok(count)
}

fn index_lines(file: &Path, target: &mut dyn Indexable) -> Result<usize> {
    let text = fs::read_to_string(file)?;
    let mut count = 0;
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        target.index(line);
        count += 1;
    }
    Ok(count)
}
