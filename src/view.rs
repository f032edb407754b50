use crate::buffer::EditBuffer;
use crate::completion::CompletionCandidate;
use crate::host::HostBuffer;
use crossterm::{
    cursor, queue,
    style::{Color, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{size, Clear, ClearType},
};
use std::io::{self, stdout, Write};
use unicode_width::UnicodeWidthStr;

const MENU_MAX_ROWS: usize = 8;
const MENU_MAX_WIDTH: usize = 30;

/// What the renderer needs to draw the completion popup.
pub struct MenuView<'a> {
    pub candidates: &'a [CompletionCandidate],
    pub selected: usize,
}

pub struct View {
    scroll_offset: usize,
}

impl View {
    pub fn new() -> Self {
        Self { scroll_offset: 0 }
    }

    pub fn render(
        &mut self,
        buffer: &EditBuffer,
        menu: Option<&MenuView>,
        status: &str,
    ) -> io::Result<()> {
        let (width, height) = size()?;
        let width = width as usize;
        let text_rows = (height as usize).saturating_sub(1);
        if text_rows == 0 {
            return Ok(());
        }

        let (cursor_line, cursor_char) = buffer.cursor();
        self.adjust_scroll(cursor_line, text_rows);

        let mut out = stdout();
        queue!(out, cursor::Hide)?;

        for row in 0..text_rows {
            let line_index = self.scroll_offset + row;
            let text = buffer.line(line_index).unwrap_or("");
            let clipped = clip_to_width(text, width);
            queue!(out, cursor::MoveTo(0, row as u16), Clear(ClearType::CurrentLine))?;
            write!(out, "{}", clipped)?;
        }

        self.render_status(&mut out, buffer, status, width, text_rows)?;

        let cursor_row = cursor_line.saturating_sub(self.scroll_offset);
        let cursor_col = display_column(buffer.line(cursor_line).unwrap_or(""), cursor_char);

        if let Some(menu) = menu {
            self.render_menu(&mut out, menu, cursor_row, cursor_col, width, text_rows)?;
        }

        queue!(
            out,
            cursor::MoveTo(cursor_col.min(width.saturating_sub(1)) as u16, cursor_row as u16),
            cursor::Show
        )?;
        out.flush()
    }

    fn adjust_scroll(&mut self, cursor_line: usize, text_rows: usize) {
        if cursor_line < self.scroll_offset {
            self.scroll_offset = cursor_line;
        } else if cursor_line >= self.scroll_offset + text_rows {
            self.scroll_offset = cursor_line + 1 - text_rows;
        }
    }

    fn render_status(
        &self,
        out: &mut impl Write,
        buffer: &EditBuffer,
        status: &str,
        width: usize,
        row: usize,
    ) -> io::Result<()> {
        let (line, col) = buffer.cursor();
        let modified = if buffer.modified { " [+]" } else { "" };
        let left = format!("{}{}  {}", buffer.display_name(), modified, status);
        let right = format!("{}:{}", line + 1, col + 1);

        let mut bar = clip_to_width(&left, width.saturating_sub(right.width() + 1));
        let pad = width.saturating_sub(bar.width() + right.width());
        bar.push_str(&" ".repeat(pad));
        bar.push_str(&right);

        queue!(
            out,
            cursor::MoveTo(0, row as u16),
            Clear(ClearType::CurrentLine),
            SetBackgroundColor(Color::DarkGrey),
            SetForegroundColor(Color::White)
        )?;
        write!(out, "{}", clip_to_width(&bar, width))?;
        queue!(out, ResetColor)?;
        Ok(())
    }

    /// Popup under the cursor (above it when there is no room below),
    /// showing a window of the candidate list around the selection.
    fn render_menu(
        &self,
        out: &mut impl Write,
        menu: &MenuView,
        cursor_row: usize,
        cursor_col: usize,
        width: usize,
        text_rows: usize,
    ) -> io::Result<()> {
        let rows = menu.candidates.len().min(MENU_MAX_ROWS);
        if rows == 0 {
            return Ok(());
        }

        let menu_width = menu
            .candidates
            .iter()
            .map(|c| c.text.width())
            .max()
            .unwrap_or(0)
            .min(MENU_MAX_WIDTH)
            + 2;
        let col = cursor_col.min(width.saturating_sub(menu_width));

        let below = text_rows.saturating_sub(cursor_row + 1);
        let start_row = if below >= rows {
            cursor_row + 1
        } else {
            cursor_row.saturating_sub(rows)
        };

        // Keep the selection inside the visible window.
        let first = if menu.selected >= rows {
            menu.selected + 1 - rows
        } else {
            0
        };

        for (i, candidate) in menu.candidates.iter().skip(first).take(rows).enumerate() {
            let highlighted = first + i == menu.selected;
            if highlighted {
                queue!(
                    out,
                    SetBackgroundColor(Color::Blue),
                    SetForegroundColor(Color::White)
                )?;
            } else {
                queue!(
                    out,
                    SetBackgroundColor(Color::Grey),
                    SetForegroundColor(Color::Black)
                )?;
            }
            let text = clip_to_width(&candidate.text, menu_width - 2);
            let pad = menu_width.saturating_sub(text.width() + 2);
            queue!(out, cursor::MoveTo(col as u16, (start_row + i) as u16))?;
            write!(out, " {}{} ", text, " ".repeat(pad))?;
        }
        queue!(out, ResetColor)?;
        Ok(())
    }
}

fn clip_to_width(text: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > max_width {
            break;
        }
        used += w;
        result.push(c);
    }
    result
}

/// Screen column of a character index, accounting for wide characters.
fn display_column(line: &str, char_index: usize) -> usize {
    line.chars()
        .take(char_index)
        .map(|c| unicode_width::UnicodeWidthChar::width(c).unwrap_or(0))
        .sum()
}
