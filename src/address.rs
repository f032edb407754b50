use crate::host::{CursorMove, HostBuffer};
use crate::lexer;

/// Line/character addressing over a host buffer that only offers
/// single-step movement primitives. Movement is issued as repeated single
/// steps so the host sees the same granularity an interactive user would
/// produce; the step counts are computed up front from plain integer
/// arithmetic.
///
/// Queries degrade to empty/default values when the host has no line at
/// the cursor, and mutations become no-ops; completion is an optional
/// assist, so nothing here returns an error.
pub struct TextAddress<'a> {
    host: &'a mut dyn HostBuffer,
}

impl<'a> TextAddress<'a> {
    pub fn new(host: &'a mut dyn HostBuffer) -> Self {
        Self { host }
    }

    pub fn current_line(&self) -> String {
        self.host
            .line(self.host.line_index(false))
            .unwrap_or_default()
            .to_string()
    }

    pub fn set_current_line(&mut self, text: &str) {
        self.host.activate();
        let index = self.host.line_index(false);
        self.host.set_line(index, text);
    }

    pub fn line_index(&self, select_end: bool) -> usize {
        self.host.line_index(select_end)
    }

    pub fn character_index(&self, select_end: bool) -> usize {
        self.host.character_index(select_end)
    }

    pub fn line_count(&self) -> usize {
        self.host.line_count()
    }

    /// The current line up to the cursor; the text every completion
    /// request starts from.
    pub fn text_before_cursor(&self) -> String {
        let line = self.current_line();
        let index = self.character_index(false);
        line.chars().take(index).collect()
    }

    pub fn current_word(&self) -> String {
        lexer::current_word(&self.text_before_cursor())
    }

    /// Move horizontally to `target`, clamped to the line length: snap to
    /// line end, then step left until at or before the target. Guarded so
    /// it terminates even against a host whose left step refuses to move
    /// or wraps to the previous line.
    pub fn set_character_index(&mut self, target: usize, extend: bool) {
        self.host.activate();
        self.host.move_cursor(CursorMove::LineEnd, extend);
        let line = self.host.line_index(extend);
        let mut index = self.host.character_index(extend);
        while index > target {
            self.host.move_cursor(CursorMove::CharLeft, extend);
            let stepped = self.host.character_index(extend);
            if stepped >= index || self.host.line_index(extend) != line {
                break;
            }
            index = stepped;
        }
    }

    /// Move vertically to `target` (clamped to the document) with
    /// |current - target| single steps, up or down.
    pub fn set_line_index(&mut self, target: usize, extend: bool) {
        self.host.activate();
        let target = target.min(self.host.line_count().saturating_sub(1));
        let current = self.host.line_index(extend);
        let movement = if target > current {
            CursorMove::LineDown
        } else {
            CursorMove::LineUp
        };
        let amount = current.abs_diff(target);
        for _ in 0..amount {
            self.host.move_cursor(movement, extend);
        }
    }

    pub fn set_cursor_position(&mut self, line: usize, character: usize, extend: bool) {
        self.set_line_index(line, extend);
        self.set_character_index(character, extend);
    }

    /// Anchor goes to the start with a plain move, the active end to the
    /// end with an extending move, so the anchor is preserved afterwards.
    pub fn set_selection(
        &mut self,
        start_line: usize,
        start_char: usize,
        end_line: usize,
        end_char: usize,
    ) {
        self.set_cursor_position(start_line, start_char, false);
        self.set_cursor_position(end_line, end_char, true);
    }

    /// Same-line selection; operands are swapped when reversed so the
    /// selection is always stored low-to-high.
    pub fn set_selection_in_line(&mut self, start: usize, end: usize) {
        let line = self.line_index(false);
        let (start, end) = if start > end { (end, start) } else { (start, end) };
        self.set_selection(line, start, line, end);
    }

    /// Remove the maximal word-character run immediately before the
    /// cursor, one deletion at a time to match the host's undo
    /// granularity.
    pub fn delete_current_word(&mut self) {
        let length = self.current_word().chars().count();
        self.host.activate();
        for _ in 0..length {
            self.host.delete_before_cursor();
        }
    }

    pub fn insert(&mut self, text: &str) {
        self.host.activate();
        self.host.insert(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::EditBuffer;

    fn buffer(lines: &[&str]) -> EditBuffer {
        EditBuffer::from_lines(lines.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_current_line_and_text_before_cursor() {
        let mut host = buffer(&["import os", "os.pat"]);
        let mut address = TextAddress::new(&mut host);
        address.set_cursor_position(1, 3, false);
        assert_eq!(address.current_line(), "os.pat");
        assert_eq!(address.text_before_cursor(), "os.");
        assert_eq!(address.current_word(), "");
    }

    #[test]
    fn test_set_character_index_exact() {
        let mut host = buffer(&["abcdef"]);
        let mut address = TextAddress::new(&mut host);
        address.set_character_index(4, false);
        assert_eq!(address.character_index(false), 4);
        address.set_character_index(0, false);
        assert_eq!(address.character_index(false), 0);
    }

    #[test]
    fn test_set_character_index_clamps_to_line_end() {
        let mut host = buffer(&["short"]);
        let mut address = TextAddress::new(&mut host);
        address.set_character_index(99, false);
        assert_eq!(address.character_index(false), 5);
    }

    #[test]
    fn test_set_character_index_does_not_leave_line() {
        // Column 0 is the stopping point even though the host's left step
        // would wrap to the previous line.
        let mut host = buffer(&["first", "second"]);
        let mut address = TextAddress::new(&mut host);
        address.set_line_index(1, false);
        address.set_character_index(0, false);
        assert_eq!(address.line_index(false), 1);
        assert_eq!(address.character_index(false), 0);
    }

    #[test]
    fn test_set_line_index_steps_and_clamps() {
        let mut host = buffer(&["a", "b", "c"]);
        let mut address = TextAddress::new(&mut host);
        address.set_line_index(2, false);
        assert_eq!(address.line_index(false), 2);
        address.set_line_index(0, false);
        assert_eq!(address.line_index(false), 0);
        address.set_line_index(50, false);
        assert_eq!(address.line_index(false), 2);
    }

    #[test]
    fn test_set_selection_in_line_swaps_reversed_operands() {
        let mut host = buffer(&["abcdef"]);
        let mut address = TextAddress::new(&mut host);
        address.set_selection_in_line(5, 2);
        assert_eq!(address.character_index(false), 2);
        assert_eq!(address.character_index(true), 5);
    }

    #[test]
    fn test_selection_extension_preserves_anchor() {
        let mut host = buffer(&["abcdef", "ghijkl"]);
        let mut address = TextAddress::new(&mut host);
        address.set_selection(0, 2, 1, 4);
        assert_eq!(address.line_index(false), 0);
        assert_eq!(address.character_index(false), 2);
        assert_eq!(address.line_index(true), 1);
        assert_eq!(address.character_index(true), 4);
    }

    #[test]
    fn test_delete_current_word() {
        let mut host = buffer(&["foo.bar baz"]);
        let mut address = TextAddress::new(&mut host);
        address.set_character_index(7, false);
        address.delete_current_word();
        assert_eq!(address.current_line(), "foo. baz");
        assert_eq!(address.character_index(false), 4);
    }

    #[test]
    fn test_delete_current_word_stops_at_non_word() {
        let mut host = buffer(&["foo."]);
        let mut address = TextAddress::new(&mut host);
        address.set_character_index(4, false);
        address.delete_current_word();
        assert_eq!(address.current_line(), "foo.");
    }

    #[test]
    fn test_empty_host_degrades_to_defaults() {
        let mut host = EditBuffer::from_lines(Vec::new());
        let mut address = TextAddress::new(&mut host);
        assert_eq!(address.current_line(), "");
        assert_eq!(address.text_before_cursor(), "");
        assert_eq!(address.character_index(false), 0);
        address.set_current_line("ignored");
        address.set_character_index(3, false);
        address.delete_current_word();
        assert_eq!(address.line_count(), 0);
    }
}
