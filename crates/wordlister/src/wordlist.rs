//! Shared frequency table and the `Wordlist` facade.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use tracing::debug;
use wordlist_html::{Sanitizer, TagStripper};
use wordlist_lemmas::LemmaTable;
use wordlist_morph::{EnglishMorph, Morphology};

use crate::pipeline;

/// Canonical-token occurrence counts plus a running total.
///
/// Counts only grow; `total` equals the sum of all counts whenever the
/// table is observed from outside a locked section.
#[derive(Debug, Default)]
pub struct FrequencyTable {
    counts: HashMap<String, u64>,
    total: u64,
}

impl FrequencyTable {
    /// Add one occurrence of `token` and bump the running total.
    pub fn increment(&mut self, token: &str) {
        *self.counts.entry(token.to_string()).or_insert(0) += 1;
        self.total += 1;
    }

    /// Copy of the raw counts.
    pub fn snapshot(&self) -> HashMap<String, u64> {
        self.counts.clone()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Token probabilities, `count / total`.
    ///
    /// An empty table yields an empty map rather than dividing by zero.
    pub fn distribution(&self) -> HashMap<String, f64> {
        if self.total == 0 {
            return HashMap::new();
        }
        let total = self.total as f64;
        self.counts
            .iter()
            .map(|(token, count)| (token.clone(), *count as f64 / total))
            .collect()
    }
}

/// Frequency-weighted vocabulary accumulated from token streams.
///
/// Owns one lemma table and one lock-guarded [`FrequencyTable`]; safe
/// to share across threads. The lock is held per token operation, so
/// concurrent ingestions interleave without lost updates (a reader may
/// observe a partially ingested document).
pub struct Wordlist {
    lemmas: LemmaTable,
    morph: Arc<dyn Morphology>,
    sanitizer: Arc<dyn Sanitizer>,
    table: Mutex<FrequencyTable>,
}

impl Wordlist {
    /// Build a wordlist over `lemmas` with the default collaborators.
    pub fn new(lemmas: LemmaTable) -> Self {
        Self::with_collaborators(lemmas, Arc::new(EnglishMorph::default()), Arc::new(TagStripper))
    }

    /// Build a wordlist with explicit morphology and sanitizer
    /// implementations.
    pub fn with_collaborators(
        lemmas: LemmaTable,
        morph: Arc<dyn Morphology>,
        sanitizer: Arc<dyn Sanitizer>,
    ) -> Self {
        Self {
            lemmas,
            morph,
            sanitizer,
            table: Mutex::new(FrequencyTable::default()),
        }
    }

    /// Run every token through the normalization chain and count the
    /// survivors.
    ///
    /// Tokens are processed strictly one at a time; each increment
    /// takes the lock independently, so concurrent callers interleave
    /// safely against the same wordlist.
    pub fn ingest<I>(&self, tokens: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for raw in tokens {
            if let Some(token) =
                pipeline::normalize(raw.as_ref(), &self.lemmas, self.morph.as_ref())
            {
                self.table.lock().unwrap().increment(&token);
            }
        }
    }

    /// Sanitize an HTML document to plain text and ingest its
    /// whitespace-delimited tokens. Non-HTML input degrades to plain
    /// tokenization.
    pub fn ingest_html(&self, page: &[u8]) {
        let text = self.sanitizer.sanitize(page);
        debug!("sanitized document: {} bytes of text", text.len());
        self.ingest(text.split_whitespace());
    }

    /// The counted vocabulary expanded with each token's plural form
    /// whenever it differs. Unordered, no duplicates.
    pub fn vocabulary(&self) -> Vec<String> {
        let counts = self.table.lock().unwrap().snapshot();
        let mut words = HashSet::with_capacity(counts.len() * 2);
        for token in counts.into_keys() {
            let plural = self.morph.plural(&token);
            if plural != token {
                words.insert(plural);
            }
            words.insert(token);
        }
        words.into_iter().collect()
    }

    /// Copy of the raw counts.
    pub fn snapshot(&self) -> HashMap<String, u64> {
        self.table.lock().unwrap().snapshot()
    }

    /// Probability of each counted token; empty before any ingestion.
    pub fn distribution(&self) -> HashMap<String, f64> {
        self.table.lock().unwrap().distribution()
    }

    /// Count for one canonical token.
    pub fn count(&self, token: &str) -> u64 {
        self.table
            .lock()
            .unwrap()
            .counts
            .get(token)
            .copied()
            .unwrap_or(0)
    }

    /// Total number of counted occurrences across all tokens.
    pub fn total(&self) -> u64 {
        self.table.lock().unwrap().total
    }
}
