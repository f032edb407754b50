use crate::address::TextAddress;
use crate::buffer::EditBuffer;
use crate::completion::{CompletionEngine, CompletionResult};
use crate::host::{CursorMove, HostBuffer};
use crate::view::{MenuView, View};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use std::io::{self, stdout};

const TAB_WIDTH: usize = 4;

/// Candidate list currently offered to the user, plus which entry is
/// highlighted. Discarded as soon as the request is accepted or
/// dismissed; the next trigger recomputes everything from the buffer.
struct CompletionMenu {
    result: CompletionResult,
    selected: usize,
}

pub struct Controller {
    buffer: EditBuffer,
    engine: CompletionEngine,
    view: View,
    menu: Option<CompletionMenu>,
    status_message: String,
    quit: bool,
}

impl Controller {
    pub fn new(buffer: EditBuffer, keywords: &[&'static str]) -> Self {
        Self {
            buffer,
            engine: CompletionEngine::new(keywords),
            view: View::new(),
            menu: None,
            status_message: String::from("Tab or Ctrl+Space completes, Ctrl+S saves, Ctrl+Q quits"),
            quit: false,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen)?;

        let result = self.event_loop();

        execute!(stdout(), LeaveAlternateScreen)?;
        disable_raw_mode()?;
        result
    }

    fn event_loop(&mut self) -> io::Result<()> {
        while !self.quit {
            let menu_view = self.menu.as_ref().map(|menu| MenuView {
                candidates: &menu.result.candidates,
                selected: menu.selected,
            });
            self.view
                .render(&self.buffer, menu_view.as_ref(), &self.status_message)?;

            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    self.handle_key(key);
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.menu.is_some() {
            self.handle_menu_key(key);
        } else {
            self.handle_edit_key(key);
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Down => {
                if let Some(menu) = &mut self.menu {
                    menu.selected = (menu.selected + 1) % menu.result.candidates.len();
                }
            }
            KeyCode::Up => {
                if let Some(menu) = &mut self.menu {
                    let count = menu.result.candidates.len();
                    menu.selected = (menu.selected + count - 1) % count;
                }
            }
            KeyCode::Enter | KeyCode::Tab => self.accept_candidate(),
            KeyCode::Esc => {
                self.menu = None;
                self.status_message.clear();
            }
            _ => {
                // Anything else dismisses the menu and is handled as a
                // normal edit key.
                self.menu = None;
                self.handle_edit_key(key);
            }
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        self.status_message.clear();

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('q') => self.quit = true,
                KeyCode::Char('s') => self.save(),
                // Ctrl+Space arrives as Char(' ') or Null depending on the
                // terminal.
                KeyCode::Char(' ') | KeyCode::Null => self.trigger_completion(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char(c) => {
                let mut address = TextAddress::new(&mut self.buffer);
                address.insert(&c.to_string());
            }
            KeyCode::Enter => {
                let mut address = TextAddress::new(&mut self.buffer);
                address.insert("\n");
            }
            KeyCode::Backspace => self.buffer.delete_before_cursor(),
            KeyCode::Tab => {
                // Tab completes when a word is in progress, indents
                // otherwise.
                if TextAddress::new(&mut self.buffer).current_word().is_empty() {
                    let mut address = TextAddress::new(&mut self.buffer);
                    address.insert(&" ".repeat(TAB_WIDTH));
                } else {
                    self.trigger_completion();
                }
            }
            KeyCode::Left => self.buffer.move_cursor(CursorMove::CharLeft, false),
            KeyCode::Right => self.buffer.move_cursor(CursorMove::CharRight, false),
            KeyCode::Up => self.buffer.move_cursor(CursorMove::LineUp, false),
            KeyCode::Down => self.buffer.move_cursor(CursorMove::LineDown, false),
            KeyCode::Home => self.buffer.move_cursor(CursorMove::LineBegin, false),
            KeyCode::End => self.buffer.move_cursor(CursorMove::LineEnd, false),
            _ => {}
        }
    }

    /// Rebuild the vocabulary from the document as it is right now, then
    /// match the word at the cursor. Nothing from an earlier request is
    /// reused.
    fn trigger_completion(&mut self) {
        let vocabulary = self.engine.rebuild_vocabulary(&self.buffer.text());
        let address = TextAddress::new(&mut self.buffer);
        let result = self.engine.compute_candidates(&address, &vocabulary);

        if result.prefix.is_empty() {
            self.status_message = String::from("Nothing to complete here");
        } else if result.candidates.is_empty() {
            self.status_message = format!("No completions for '{}'", result.prefix);
        } else {
            self.status_message = format!(
                "{} completion(s) for '{}'",
                result.candidates.len(),
                result.prefix
            );
            self.menu = Some(CompletionMenu { result, selected: 0 });
        }
    }

    fn accept_candidate(&mut self) {
        if let Some(menu) = self.menu.take() {
            if let Some(candidate) = menu.result.candidates.get(menu.selected) {
                let mut address = TextAddress::new(&mut self.buffer);
                self.engine.apply_candidate(&mut address, candidate);
                self.status_message = format!("Completed '{}'", candidate.text);
            }
        }
    }

    fn save(&mut self) {
        match self.buffer.save() {
            Ok(()) => self.status_message = format!("Saved {}", self.buffer.display_name()),
            Err(err) => self.status_message = format!("Save failed: {}", err),
        }
    }
}
