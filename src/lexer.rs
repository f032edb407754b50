//! Word-boundary scanning over a single line of text.
//!
//! All indices are character indices, matching the cursor coordinates the
//! host reports. Plain left-to-right/right-to-left scans with an explicit
//! word-character predicate; no pattern engine on this per-keystroke path.

pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Start of the maximal word-character run ending just before `char_index`.
/// Returns `char_index` itself when the preceding character is not a word
/// character, and 0 when the entire prefix is word characters.
pub fn word_start_index(text: &str, char_index: usize) -> usize {
    let chars: Vec<char> = text.chars().collect();
    let end = char_index.min(chars.len());
    let mut start = end;
    while start > 0 && is_word_char(chars[start - 1]) {
        start -= 1;
    }
    start
}

/// The maximal trailing run of word characters in `text_before_cursor`.
/// Empty when the character immediately before the cursor is not a word
/// character: "bpy.context.sce" -> "sce", "foo(" -> "".
pub fn current_word(text_before_cursor: &str) -> String {
    let chars: Vec<char> = text_before_cursor.chars().collect();
    let start = word_start_index(text_before_cursor, chars.len());
    chars[start..].iter().collect()
}

/// The word directly before the trailing `<word>.<partial>` tail, if the
/// text ends in one: "bpy.context.sce" -> Some("context"), "foo(bar" -> None.
pub fn parent_word(text: &str) -> Option<String> {
    let chars: Vec<char> = text.chars().collect();
    // Skip the (possibly empty) partial word at the very end.
    let mut i = chars.len();
    while i > 0 && is_word_char(chars[i - 1]) {
        i -= 1;
    }
    if i == 0 || chars[i - 1] != '.' {
        return None;
    }
    // The run before the dot is the parent; it must be non-empty.
    let dot = i - 1;
    let mut start = dot;
    while start > 0 && is_word_char(chars[start - 1]) {
        start -= 1;
    }
    if start == dot {
        return None;
    }
    Some(chars[start..dot].iter().collect())
}

/// All dot-separated names preceding the current word, outermost first:
/// "bpy.context.sce" -> ["bpy", "context"]. Computed fresh per request.
pub fn parent_chain(text_before_cursor: &str) -> Vec<String> {
    let mut parents = Vec::new();
    let mut text: String = text_before_cursor.to_string();
    while let Some(parent) = parent_word(&text) {
        // Strip the trailing word and the dot before it, exposing the
        // next segment of the chain.
        let keep = text.chars().count() - current_word(&text).chars().count() - 1;
        text = text.chars().take(keep).collect();
        parents.push(parent);
    }
    parents.reverse();
    parents
}
