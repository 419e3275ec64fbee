//! Terminal session setup
//!
//! `TerminalGuard::enter` puts the terminal in game mode; dropping the guard
//! puts it back, including on early return and panic unwinding.

use std::io::{self, Write};

use crossterm::{cursor, event, execute, terminal};

pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    /// Raw mode, alternate screen, hidden cursor and mouse reporting
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = Self { _private: () };

        let mut out = io::stdout();
        execute!(
            out,
            terminal::EnterAlternateScreen,
            terminal::DisableLineWrap,
            cursor::Hide,
            event::EnableMouseCapture,
            terminal::Clear(terminal::ClearType::All),
        )?;
        out.flush()?;

        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = io::stdout();
        let _ = execute!(
            out,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::EnableLineWrap,
            terminal::LeaveAlternateScreen,
        );
        let _ = terminal::disable_raw_mode();
    }
}
