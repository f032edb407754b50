/// Primitive cursor movement verbs offered by a host buffer.
///
/// Horizontal moves may shift the character index by more than one
/// (a host that renders tabs as multiple cells is free to do so), and
/// CharLeft at column 0 may wrap to the previous line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    LineBegin,
    LineEnd,
    CharLeft,
    CharRight,
    LineUp,
    LineDown,
}

/// Capability handle for the active text buffer.
///
/// Everything the completion core needs from its host: line-addressed
/// reads and writes, cursor/selection coordinates, and single-step
/// movement and edit primitives. Out-of-range queries return `None` or
/// a default instead of panicking, so a host with no open buffer simply
/// makes every operation a no-op.
pub trait HostBuffer {
    fn line_count(&self) -> usize;
    fn line(&self, index: usize) -> Option<&str>;
    fn set_line(&mut self, index: usize, text: &str);

    /// Cursor line index, or the selection-active-end line when `select_end`.
    fn line_index(&self, select_end: bool) -> usize;
    /// Cursor character index (in chars, not bytes), or the
    /// selection-active-end index when `select_end`.
    fn character_index(&self, select_end: bool) -> usize;

    /// Single movement step. With `extend` the selection active end moves
    /// and the anchor stays put; without it the selection collapses.
    fn move_cursor(&mut self, movement: CursorMove, extend: bool);

    /// Delete the single character before the cursor.
    fn delete_before_cursor(&mut self);

    /// Insert literal text at the cursor; `\n` starts a new line.
    fn insert(&mut self, text: &str);

    /// Make this buffer the one receiving edits. Hosts with a single
    /// buffer may treat this as a no-op.
    fn activate(&mut self);

    /// Full document text, used for vocabulary rebuilds.
    fn text(&self) -> String;
}
