use crate::address::TextAddress;
use crate::lexer;
use crate::vocabulary::VocabularyIndex;

/// One suggested completion: the word to splice in and the character span
/// of the current line it overwrites. Built per request, consumed
/// immediately; nothing survives into the next request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionCandidate {
    pub text: String,
    pub span_start: usize,
    pub span_end: usize,
}

/// Everything one completion request produced: the prefix it matched on,
/// the dotted names leading up to it, and the ranked candidates.
#[derive(Debug, Clone, Default)]
pub struct CompletionResult {
    pub prefix: String,
    pub parents: Vec<String>,
    pub candidates: Vec<CompletionCandidate>,
}

/// Matches the word at the cursor against a vocabulary snapshot. Holds the
/// reserved keyword list; the vocabulary itself is rebuilt from the
/// document on every request so it can never go stale.
pub struct CompletionEngine {
    keywords: Vec<&'static str>,
}

impl CompletionEngine {
    pub fn new(keywords: &[&'static str]) -> Self {
        Self {
            keywords: keywords.to_vec(),
        }
    }

    pub fn rebuild_vocabulary(&self, document_text: &str) -> VocabularyIndex {
        VocabularyIndex::rebuild(document_text, &self.keywords)
    }

    /// Candidates for the word ending at the cursor, in vocabulary order.
    /// An empty prefix yields no candidates, and a candidate identical to
    /// the prefix is dropped since applying it would change nothing.
    pub fn compute_candidates(
        &self,
        address: &TextAddress,
        vocabulary: &VocabularyIndex,
    ) -> CompletionResult {
        let before_cursor = address.text_before_cursor();
        let prefix = lexer::current_word(&before_cursor);
        if prefix.is_empty() {
            return CompletionResult::default();
        }

        let cursor = address.character_index(false);
        let span_start = cursor - prefix.chars().count();
        let candidates = vocabulary
            .matches_prefix(&prefix)
            .into_iter()
            .filter(|word| *word != prefix)
            .map(|word| CompletionCandidate {
                text: word.to_string(),
                span_start,
                span_end: cursor,
            })
            .collect();

        CompletionResult {
            parents: lexer::parent_chain(&before_cursor),
            prefix,
            candidates,
        }
    }

    /// Splice the chosen candidate into the buffer: the in-progress word
    /// is deleted character by character, then the candidate inserted, so
    /// the cursor ends immediately after the new text.
    pub fn apply_candidate(&self, address: &mut TextAddress, candidate: &CompletionCandidate) {
        address.delete_current_word();
        address.insert(&candidate.text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::EditBuffer;
    use crate::host::HostBuffer;
    use crate::keywords::PYTHON_KEYWORDS;

    fn engine() -> CompletionEngine {
        CompletionEngine::new(&["def", "import"])
    }

    fn at_line_end(lines: &[&str]) -> EditBuffer {
        let mut buffer = EditBuffer::from_lines(lines.iter().map(|s| s.to_string()).collect());
        let last = lines.len() - 1;
        let mut address = TextAddress::new(&mut buffer);
        address.set_cursor_position(last, usize::MAX, false);
        buffer
    }

    #[test]
    fn test_candidates_in_vocabulary_order() {
        let engine = engine();
        let mut host = at_line_end(&["imagine important items", "im"]);
        let vocabulary = engine.rebuild_vocabulary(&host.text());
        let address = TextAddress::new(&mut host);

        let result = engine.compute_candidates(&address, &vocabulary);
        assert_eq!(result.prefix, "im");
        let texts: Vec<&str> = result.candidates.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["imagine", "import", "important"]);
        for candidate in &result.candidates {
            assert_eq!(candidate.span_start, 0);
            assert_eq!(candidate.span_end, 2);
        }
    }

    #[test]
    fn test_empty_prefix_yields_nothing() {
        let engine = engine();
        let mut host = at_line_end(&["words here", "obj."]);
        let vocabulary = engine.rebuild_vocabulary(&host.text());
        let address = TextAddress::new(&mut host);

        let result = engine.compute_candidates(&address, &vocabulary);
        assert!(result.candidates.is_empty());
        assert_eq!(result.prefix, "");
    }

    #[test]
    fn test_sole_occurrence_does_not_match_itself() {
        let engine = CompletionEngine::new(&["def", "import"]);
        let mut host = at_line_end(&["import os", "def run():", "    os.pat"]);
        let vocabulary = engine.rebuild_vocabulary(&host.text());
        let address = TextAddress::new(&mut host);

        let result = engine.compute_candidates(&address, &vocabulary);
        assert_eq!(result.prefix, "pat");
        assert!(result.candidates.is_empty());
        assert_eq!(result.parents, vec!["os"]);
    }

    #[test]
    fn test_different_casing_still_offered() {
        let engine = CompletionEngine::new(&[]);
        let mut host = at_line_end(&["Value value", "val"]);
        let vocabulary = engine.rebuild_vocabulary(&host.text());
        let address = TextAddress::new(&mut host);

        let result = engine.compute_candidates(&address, &vocabulary);
        let texts: Vec<&str> = result.candidates.iter().map(|c| c.text.as_str()).collect();
        // "val" from line 2 equals the prefix and is dropped; both casings
        // of the full word remain.
        assert_eq!(texts, vec!["Value", "value"]);
    }

    #[test]
    fn test_apply_candidate_round_trip() {
        let engine = CompletionEngine::new(&[]);
        let mut host = at_line_end(&["foo food", "fo"]);
        let vocabulary = engine.rebuild_vocabulary(&host.text());
        let result = {
            let address = TextAddress::new(&mut host);
            engine.compute_candidates(&address, &vocabulary)
        };
        let chosen = result
            .candidates
            .iter()
            .find(|c| c.text == "foo")
            .expect("foo should be offered");

        let mut address = TextAddress::new(&mut host);
        engine.apply_candidate(&mut address, chosen);
        assert_eq!(address.current_line(), "foo");
        assert_eq!(address.character_index(false), 3);
    }

    #[test]
    fn test_parent_chain_reported() {
        let engine = CompletionEngine::new(&[]);
        let mut host = at_line_end(&["bpy bpy.context.scene", "bpy.context.sce"]);
        let vocabulary = engine.rebuild_vocabulary(&host.text());
        let address = TextAddress::new(&mut host);

        let result = engine.compute_candidates(&address, &vocabulary);
        assert_eq!(result.parents, vec!["bpy", "context"]);
        assert_eq!(result.prefix, "sce");
        let texts: Vec<&str> = result.candidates.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["scene"]);
    }

    #[test]
    fn test_full_keyword_list_matches() {
        let engine = CompletionEngine::new(PYTHON_KEYWORDS);
        let mut host = at_line_end(&["wh"]);
        let vocabulary = engine.rebuild_vocabulary(&host.text());
        let address = TextAddress::new(&mut host);

        let result = engine.compute_candidates(&address, &vocabulary);
        let texts: Vec<&str> = result.candidates.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["while"]);
    }
}
