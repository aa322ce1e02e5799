//! `word_list` — load and preprocess the candidate word list.
//!
//! Input is one word per line. Words are uppercased, deduplicated, and sorted
//! by length then alphabetically, so a given list always yields the same
//! candidate pool regardless of file ordering. Malformed input is limited to
//! blank lines, which are skipped silently.
//!
//! Words are stored as `Rc<str>` so that domains and assignments share one
//! allocation per word across the whole single-threaded solving session.

use std::rc::Rc;

/// A processed, ready-to-use word list.
#[derive(Debug, Clone)]
pub struct WordList {
    /// Uppercase words, deduplicated, sorted by (length, alphabetical).
    pub words: Vec<Rc<str>>,
}

impl WordList {
    /// Parse a raw word list from an in-memory string.
    #[must_use]
    pub fn parse_from_str(contents: &str) -> WordList {
        let mut words: Vec<String> = contents
            .lines()
            .filter_map(|raw_line| {
                let line = raw_line.trim();
                if line.is_empty() {
                    None
                } else {
                    Some(line.to_uppercase())
                }
            })
            .collect();

        // Alphabetical sort first: dedup only removes adjacent duplicates.
        words.sort();
        words.dedup();
        words.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));

        WordList {
            words: words.into_iter().map(Rc::from).collect(),
        }
    }

    /// Read a word list from a file path and parse it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file at `path` cannot be read.
    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> std::io::Result<WordList> {
        let path_ref = path.as_ref();
        let data = std::fs::read_to_string(path_ref).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!(
                    "failed to read word list from '{}': {}",
                    path_ref.display(),
                    e
                ),
            )
        })?;
        Ok(Self::parse_from_str(&data))
    }
}
