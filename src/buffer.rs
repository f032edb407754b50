use crate::host::{CursorMove, HostBuffer};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineEnding {
    Unix,    // \n (LF)
    Windows, // \r\n (CRLF)
    Mac,     // \r (CR)
}

impl LineEnding {
    pub fn system_default() -> Self {
        if cfg!(windows) {
            LineEnding::Windows
        } else {
            LineEnding::Unix
        }
    }

    pub fn detect(content: &str) -> Self {
        if content.contains("\r\n") {
            LineEnding::Windows
        } else if content.contains('\r') {
            LineEnding::Mac
        } else {
            LineEnding::Unix
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Unix => "\n",
            LineEnding::Windows => "\r\n",
            LineEnding::Mac => "\r",
        }
    }
}

/// In-memory line store backing the editor, and the concrete `HostBuffer`
/// the completion core talks to. Keeps a cursor (the selection anchor) and
/// a separate selection active end; the two coincide when nothing is
/// selected.
#[derive(Clone)]
pub struct EditBuffer {
    lines: Vec<String>,
    cursor_line: usize,
    cursor_char: usize,
    select_line: usize,
    select_char: usize,
    pub filename: Option<PathBuf>,
    pub modified: bool,
    line_ending: LineEnding,
}

impl EditBuffer {
    pub fn new() -> Self {
        Self::from_lines(vec![String::new()])
    }

    pub fn from_lines(lines: Vec<String>) -> Self {
        Self {
            lines,
            cursor_line: 0,
            cursor_char: 0,
            select_line: 0,
            select_char: 0,
            filename: None,
            modified: false,
            line_ending: LineEnding::system_default(),
        }
    }

    pub fn from_file(filename: PathBuf) -> Result<Self, io::Error> {
        let content = fs::read_to_string(&filename)?;
        let line_ending = LineEnding::detect(&content);
        let normalized = content.replace("\r\n", "\n").replace('\r', "\n");

        // A trailing newline shows up as a final empty line, which is
        // what the cursor model wants anyway.
        let lines: Vec<String> = normalized.split('\n').map(String::from).collect();

        let mut buffer = Self::from_lines(lines);
        buffer.filename = Some(filename);
        buffer.line_ending = line_ending;
        Ok(buffer)
    }

    pub fn save(&mut self) -> Result<(), io::Error> {
        let path = match &self.filename {
            Some(path) => path.clone(),
            None => return Err(io::Error::new(io::ErrorKind::InvalidInput, "no file name")),
        };
        self.save_as(&path)
    }

    pub fn save_as(&mut self, path: &Path) -> Result<(), io::Error> {
        let content = self.lines.join(self.line_ending.as_str());
        fs::write(path, content)?;
        self.filename = Some(path.to_path_buf());
        self.modified = false;
        Ok(())
    }

    fn line_len(&self, index: usize) -> usize {
        self.lines.get(index).map_or(0, |line| line.chars().count())
    }

    fn byte_index(line: &str, char_index: usize) -> usize {
        line.char_indices()
            .nth(char_index)
            .map_or(line.len(), |(i, _)| i)
    }

    fn clamp_cursor(&mut self) {
        if self.lines.is_empty() {
            self.cursor_line = 0;
            self.cursor_char = 0;
            return;
        }
        self.cursor_line = self.cursor_line.min(self.lines.len() - 1);
        self.cursor_char = self.cursor_char.min(self.line_len(self.cursor_line));
    }

    fn collapse_selection(&mut self) {
        self.select_line = self.cursor_line;
        self.select_char = self.cursor_char;
    }

    /// Apply one movement step to a (line, char) coordinate pair.
    fn step(&self, line: usize, ch: usize, movement: CursorMove) -> (usize, usize) {
        match movement {
            CursorMove::LineBegin => (line, 0),
            CursorMove::LineEnd => (line, self.line_len(line)),
            CursorMove::CharLeft => {
                if ch > 0 {
                    (line, ch - 1)
                } else if line > 0 {
                    // Wrap to the end of the previous line, like the host
                    // editors this models.
                    (line - 1, self.line_len(line - 1))
                } else {
                    (0, 0)
                }
            }
            CursorMove::CharRight => {
                if ch < self.line_len(line) {
                    (line, ch + 1)
                } else if line + 1 < self.lines.len() {
                    (line + 1, 0)
                } else {
                    (line, ch)
                }
            }
            CursorMove::LineUp => {
                let target = line.saturating_sub(1);
                (target, ch.min(self.line_len(target)))
            }
            CursorMove::LineDown => {
                let target = (line + 1).min(self.lines.len().saturating_sub(1));
                (target, ch.min(self.line_len(target)))
            }
        }
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_line, self.cursor_char)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn display_name(&self) -> String {
        self.filename
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "[No Name]".to_string())
    }
}

impl HostBuffer for EditBuffer {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    fn set_line(&mut self, index: usize, text: &str) {
        if let Some(line) = self.lines.get_mut(index) {
            *line = text.to_string();
            self.modified = true;
            self.clamp_cursor();
            self.collapse_selection();
        }
    }

    fn line_index(&self, select_end: bool) -> usize {
        if select_end {
            self.select_line
        } else {
            self.cursor_line
        }
    }

    fn character_index(&self, select_end: bool) -> usize {
        if select_end {
            self.select_char
        } else {
            self.cursor_char
        }
    }

    fn move_cursor(&mut self, movement: CursorMove, extend: bool) {
        if self.lines.is_empty() {
            return;
        }
        if extend {
            let (line, ch) = self.step(self.select_line, self.select_char, movement);
            self.select_line = line;
            self.select_char = ch;
        } else {
            let (line, ch) = self.step(self.cursor_line, self.cursor_char, movement);
            self.cursor_line = line;
            self.cursor_char = ch;
            self.collapse_selection();
        }
    }

    fn delete_before_cursor(&mut self) {
        if self.cursor_char > 0 {
            let line = &self.lines[self.cursor_line];
            let byte = Self::byte_index(line, self.cursor_char - 1);
            let mut updated = line.clone();
            updated.remove(byte);
            self.lines[self.cursor_line] = updated;
            self.cursor_char -= 1;
            self.modified = true;
        } else if self.cursor_line > 0 {
            // Join with the previous line.
            let current = self.lines.remove(self.cursor_line);
            self.cursor_line -= 1;
            self.cursor_char = self.line_len(self.cursor_line);
            self.lines[self.cursor_line].push_str(&current);
            self.modified = true;
        }
        self.collapse_selection();
    }

    fn insert(&mut self, text: &str) {
        if self.lines.is_empty() {
            self.lines.push(String::new());
            self.cursor_line = 0;
            self.cursor_char = 0;
        }
        for (i, piece) in text.split('\n').enumerate() {
            if i > 0 {
                // Split the current line at the cursor.
                let line = self.lines[self.cursor_line].clone();
                let byte = Self::byte_index(&line, self.cursor_char);
                let tail = line[byte..].to_string();
                self.lines[self.cursor_line] = line[..byte].to_string();
                self.lines.insert(self.cursor_line + 1, tail);
                self.cursor_line += 1;
                self.cursor_char = 0;
            }
            if !piece.is_empty() {
                let line = &self.lines[self.cursor_line];
                let byte = Self::byte_index(line, self.cursor_char);
                let mut updated = line.clone();
                updated.insert_str(byte, piece);
                self.lines[self.cursor_line] = updated;
                self.cursor_char += piece.chars().count();
            }
        }
        self.modified = true;
        self.collapse_selection();
    }

    fn activate(&mut self) {
        // Single-buffer host: always active.
    }

    fn text(&self) -> String {
        self.lines.join("\n")
    }
}
