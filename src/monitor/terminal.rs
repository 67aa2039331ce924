//! Terminal control: frame repaint and cursor/raw-mode restoration

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{execute, queue};
use std::io::{self, Write};
use tracing::{debug, warn};

/// Repaint `frame` from the top-left corner.
///
/// Every line clears the rest of its row and everything below the frame is
/// cleared, so a shorter frame never leaves stale output behind.
pub fn draw_frame<W: Write>(out: &mut W, frame: &str) -> io::Result<()> {
    queue!(out, MoveTo(0, 0))?;
    for line in frame.lines() {
        queue!(out, Print(line), Clear(ClearType::UntilNewLine), Print("\r\n"))?;
    }
    queue!(out, Clear(ClearType::FromCursorDown))?;
    out.flush()
}

/// Hides the cursor on creation and restores the terminal when dropped
#[derive(Debug)]
pub struct TerminalGuard {
    raw_mode_was_enabled: Option<bool>,
    restored: bool,
}

impl TerminalGuard {
    /// Hide the cursor and remember the raw-mode state, if it can be read
    pub fn acquire() -> io::Result<Self> {
        let raw_mode_was_enabled = match terminal::is_raw_mode_enabled() {
            Ok(enabled) => Some(enabled),
            Err(e) => {
                debug!(error = %e, "Raw mode state unavailable");
                None
            }
        };
        execute!(io::stdout(), Hide)?;
        debug!(raw_mode = ?raw_mode_was_enabled, "Terminal prepared");

        Ok(Self {
            raw_mode_was_enabled,
            restored: false,
        })
    }

    /// Show the cursor and reapply the saved raw-mode state. Safe to call twice.
    pub fn restore(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;

        execute!(io::stdout(), Show)?;
        if let Some(was_enabled) = self.raw_mode_was_enabled {
            let enabled = terminal::is_raw_mode_enabled()?;
            if enabled != was_enabled {
                if was_enabled {
                    terminal::enable_raw_mode()?;
                } else {
                    terminal::disable_raw_mode()?;
                }
            }
        }
        debug!("Terminal restored");
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!(error = %e, "Failed to restore terminal");
        }
    }
}
