//! The completion word list: reserved keywords plus every identifier in
//! the document, case-insensitively sorted.

use crate::lexer::is_word_char;
use std::collections::HashSet;

/// Immutable snapshot of the known words. Rebuilt wholesale before each
/// completion request and swapped in; never patched incrementally, so a
/// reader can never observe a half-built list.
#[derive(Debug, Clone, Default)]
pub struct VocabularyIndex {
    words: Vec<String>,
}

impl VocabularyIndex {
    /// Full recompute from the document text: split on non-word characters,
    /// drop purely numeric tokens, union with the reserved keywords.
    /// Distinct casings stay distinct; ordering is case-insensitive with a
    /// case-sensitive tiebreak, so rebuilding unchanged text is idempotent.
    pub fn rebuild(document_text: &str, reserved_keywords: &[&str]) -> Self {
        let mut seen: HashSet<String> = HashSet::new();

        for token in document_text.split(|c: char| !is_word_char(c)) {
            if token.is_empty() || token.chars().all(char::is_numeric) {
                continue;
            }
            seen.insert(token.to_string());
        }
        for keyword in reserved_keywords {
            seen.insert((*keyword).to_string());
        }

        let mut words: Vec<String> = seen.into_iter().collect();
        words.sort_by(|a, b| {
            a.to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b))
        });
        Self { words }
    }

    /// Words whose case-insensitive form starts with `prefix`, in index
    /// order. Callers must not pass an empty prefix; completion is only
    /// offered once a word character precedes the cursor.
    pub fn matches_prefix(&self, prefix: &str) -> Vec<&str> {
        let folded = prefix.to_lowercase();
        self.words
            .iter()
            .filter(|word| word.to_lowercase().starts_with(&folded))
            .map(String::as_str)
            .collect()
    }

    /// All words in index order.
    pub fn words(&self) -> &[String] {
        &self.words
    }
}
