use std::io;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    terminal,
};

/// Blocks until the user presses ESC (or Enter/q). Ctrl-C and Ctrl-D
/// fall through as interruptions so the shell loop can handle them.
pub fn wait_for_escape() -> io::Result<()> {
    terminal::enable_raw_mode()?;
    let outcome = loop {
        let event = event::read()?;
        let Event::Key(key) = event else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('C') => {
                    break Err(io::Error::new(io::ErrorKind::Interrupted, "interrupted"));
                }
                KeyCode::Char('d') | KeyCode::Char('D') => break Ok(()),
                _ => continue,
            }
        }
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('Q') => {
                break Ok(())
            }
            _ => continue,
        }
    };
    terminal::disable_raw_mode().ok();
    outcome
}
