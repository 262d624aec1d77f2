mod picker;
mod ui;

pub use picker::Picker;

use crate::actions::SwitcherSession;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;

/// Run the heading switcher until the user picks an item or dismisses it.
///
/// # Returns
///
/// The chosen item's index in the session's list, or `None` if dismissed.
pub fn run(terminal: &mut DefaultTerminal, picker: Picker) -> Result<Option<usize>> {
    let mut picker = picker;

    loop {
        terminal.draw(|frame| ui::render(frame, &mut picker))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return Ok(None),
            KeyCode::Char('c') if ctrl => return Ok(None),
            KeyCode::Enter => return Ok(picker.selected_index()),
            KeyCode::Down | KeyCode::Tab => picker.next(),
            KeyCode::Char('n') if ctrl => picker.next(),
            KeyCode::Up | KeyCode::BackTab => picker.previous(),
            KeyCode::Char('p') if ctrl => picker.previous(),
            KeyCode::Backspace => picker.backspace(),
            KeyCode::Char(c) if !ctrl => picker.input(c),
            _ => {}
        }
    }
}

/// Take over the terminal, run the switcher for `session`, then restore it.
pub fn pick(session: SwitcherSession) -> Result<Option<usize>> {
    let mut terminal = ratatui::init();
    let result = run(&mut terminal, Picker::new(session));
    ratatui::restore();
    result
}
