//! Load lemmatization tables mapping inflected word forms to lemmas.
//!
//! The on-disk format is line-oriented: each line carries two fields,
//! `lemma` then `inflected-form`, separated by a tab or, failing that,
//! a single space. Lines that do not split into exactly two fields
//! under either delimiter are skipped; an unreadable source is a
//! construction error. Callers choose between a memory-mapped file or
//! an owned buffer at runtime via [`LoadMode`], or inject any reader
//! with [`LemmaTable::from_reader`].
//!
//! # Example
//! ```no_run
//! use wordlist_lemmas::{LemmaTable, LoadMode};
//!
//! # fn main() -> anyhow::Result<()> {
//! let lemmas = LemmaTable::load_with_mode("data/lemmatization-en.txt", LoadMode::Mmap)?;
//! assert_eq!(lemmas.resolve("running"), "run");
//! # Ok(()) }
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, Read};
use std::path::Path;

use anyhow::{Context, Result};
use memmap2::Mmap;

/// Strategy for loading the lemma file.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LoadMode {
    /// Memory-map the file (fast, zero-copy during parsing).
    Mmap,
    /// Read the file into an owned buffer (portable fallback).
    Owned,
}

enum Buffer {
    Mmap(Mmap),
    Owned(Vec<u8>),
}

impl Buffer {
    fn as_slice(&self) -> &[u8] {
        match self {
            Buffer::Mmap(m) => m.as_ref(),
            Buffer::Owned(v) => v.as_slice(),
        }
    }
}

/// Immutable mapping from inflected word form to canonical lemma.
///
/// Built once at construction and never mutated afterwards.
#[derive(Debug, Default)]
pub struct LemmaTable {
    map: HashMap<String, String>,
}

impl LemmaTable {
    /// An empty table: every lookup passes the word through unchanged.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load a lemma file, memory-mapping it by default.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with_mode(path, LoadMode::Mmap)
    }

    /// Load a lemma file choosing between mmap and an owned buffer.
    pub fn load_with_mode(path: impl AsRef<Path>, mode: LoadMode) -> Result<Self> {
        let path = path.as_ref();
        let buffer = match mode {
            LoadMode::Mmap => {
                let file =
                    File::open(path).with_context(|| format!("open {}", path.display()))?;
                unsafe { Mmap::map(&file) }
                    .map(Buffer::Mmap)
                    .with_context(|| format!("mmap {}", path.display()))?
            }
            LoadMode::Owned => {
                let mut file =
                    File::open(path).with_context(|| format!("open {}", path.display()))?;
                let mut buf = Vec::new();
                file.read_to_end(&mut buf)
                    .with_context(|| format!("read {}", path.display()))?;
                Buffer::Owned(buf)
            }
        };
        Ok(Self::parse(buffer.as_slice()))
    }

    /// Build a table from any buffered reader.
    ///
    /// This is the injection point for callers that resolve the data
    /// source themselves (bundled bytes, network fetch, test fixture).
    pub fn from_reader(mut reader: impl BufRead) -> Result<Self> {
        let mut buf = Vec::new();
        reader
            .read_to_end(&mut buf)
            .context("read lemma source")?;
        Ok(Self::parse(&buf))
    }

    fn parse(bytes: &[u8]) -> Self {
        let mut map = HashMap::new();
        for raw_line in bytes.split(|b| *b == b'\n') {
            let line = strip_cr(raw_line);
            if line.is_empty() {
                continue;
            }
            let Ok(line_str) = std::str::from_utf8(line) else {
                continue;
            };
            let Some((lemma, inflected)) = split_record(line_str) else {
                continue;
            };
            map.insert(inflected.to_string(), lemma.to_string());
        }
        Self { map }
    }

    /// Look up the lemma for an inflected form, if the table has one.
    pub fn lemma(&self, word: &str) -> Option<&str> {
        self.map.get(word).map(String::as_str)
    }

    /// Resolve a word through the table, passing unknown words through.
    pub fn resolve<'a>(&'a self, word: &'a str) -> &'a str {
        self.lemma(word).unwrap_or(word)
    }

    /// Number of inflected forms in the table.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Split a record on tab first, then on a single space.
///
/// Either delimiter must produce exactly two fields or the line is
/// rejected.
fn split_record(line: &str) -> Option<(&str, &str)> {
    for delim in ['\t', ' '] {
        let mut fields = line.split(delim);
        if let (Some(a), Some(b), None) = (fields.next(), fields.next(), fields.next())
            && !a.is_empty()
            && !b.is_empty()
        {
            return Some((a, b));
        }
    }
    None
}

fn strip_cr(line: &[u8]) -> &[u8] {
    if line.ends_with(b"\r") {
        &line[..line.len() - 1]
    } else {
        line
    }
}
