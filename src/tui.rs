//! Terminal lifecycle: raw mode and the alternate screen on stderr,
//! restored when the guard drops and on panic.

use std::io::{self, Stderr};
use std::ops::{Deref, DerefMut};

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

/// Owns the terminal for the lifetime of the client.
///
/// Entering installs a panic hook so the unwind path also restores the
/// shell; dropping tears down raw mode and the alternate screen. Derefs to
/// the underlying [`Terminal`] for drawing.
pub struct TerminalGuard {
    inner: Terminal<CrosstermBackend<Stderr>>,
}

impl TerminalGuard {
    pub fn enter() -> Result<Self> {
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = leave();
            original_hook(panic_info);
        }));

        enable_raw_mode()?;
        execute!(io::stderr(), EnterAlternateScreen, EnableMouseCapture)?;

        Ok(Self {
            inner: Terminal::new(CrosstermBackend::new(io::stderr()))?,
        })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = leave();
    }
}

impl Deref for TerminalGuard {
    type Target = Terminal<CrosstermBackend<Stderr>>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for TerminalGuard {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

fn leave() -> io::Result<()> {
    execute!(io::stderr(), DisableMouseCapture, LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}
