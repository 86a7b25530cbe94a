use std::io;
use std::panic;
use std::sync::Once;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::warn;

use crate::config::GridSize;
use crate::game::Game;
use crate::renderer;

/// Concrete terminal type used by the runtime.
pub type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

static PANIC_HOOK: Once = Once::new();

/// Raw mode, released when dropped.
struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Alternate-screen ratatui terminal for one game session.
///
/// Dropping it leaves the alternate screen first, then raw mode.
pub struct TerminalSession {
    terminal: AppTerminal,
    _raw_mode: RawMode,
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        PANIC_HOOK.call_once(install_panic_hook);

        let raw_mode = RawMode::enable()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide).inspect_err(|_| leave_screen())?;

        let terminal =
            Terminal::new(CrosstermBackend::new(stdout)).inspect_err(|_| leave_screen())?;

        Ok(Self {
            terminal,
            _raw_mode: raw_mode,
        })
    }

    /// Returns false (and logs) when the terminal cannot show a whole board.
    pub fn fits(&self, bounds: GridSize) -> io::Result<bool> {
        let size = self.terminal.size()?;
        let (width, height) = renderer::min_frame_size(bounds);
        let fits = size.width >= width && size.height >= height;

        if !fits {
            warn!(
                have_width = size.width,
                have_height = size.height,
                need_width = width,
                need_height = height,
                "terminal too small, board will be clipped"
            );
        }
        Ok(fits)
    }

    /// Draws one frame of `game`.
    pub fn draw(&mut self, game: &Game, started: bool) -> io::Result<()> {
        self.terminal
            .draw(|frame| renderer::render(frame, game, started))
            .map(|_| ())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        leave_screen();
    }
}

fn leave_screen() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, Show, LeaveAlternateScreen);
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        leave_screen();
        let _ = disable_raw_mode();
        default_hook(panic_info);
    }));
}
