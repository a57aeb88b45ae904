use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    NextTab,
    PrevTab,
    SelectUp,
    SelectDown,
    Decrease,      // ←/h: previous option / smaller value
    Increase,      // →/l: next option / larger value
    Add,           // a: add drive / spare / vdev depending on the row
    AddVdev,       // A: append a vdev from the configured defaults
    Remove,        // d: remove the selected drive / spare / vdev
    Edit,          // e / Enter: edit the selected text or size
    ToggleUnit,    // u: flip a drive between TB and GB
    ToggleUniform, // m: uniform sizing for the selected vdev
    ToggleSlog,    // s
    ToggleL2arc,   // c
    Copy,          // y: copy the command for the current tab
    CycleTheme,
    ShowHelp,
    Back,
    JumpTop,
    JumpBottom,
    None,
}

/// Keys while a text field is being edited.
#[derive(Debug, Clone, PartialEq)]
pub enum EditAction {
    Insert(char),
    Backspace,
    Commit,
    Cancel,
    Quit,
    None,
}

pub fn handle_key(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _)
        | (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        (KeyCode::Tab, _)     => Action::NextTab,
        (KeyCode::BackTab, _) => Action::PrevTab,

        // Navigation: arrow keys and vim hjkl
        (KeyCode::Up,   _) | (KeyCode::Char('k'), _) => Action::SelectUp,
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => Action::SelectDown,
        (KeyCode::Left, _) | (KeyCode::Char('h'), _) => Action::Decrease,
        (KeyCode::Right, _) | (KeyCode::Char('l'), _) => Action::Increase,

        (KeyCode::Char('a'), _) => Action::Add,
        (KeyCode::Char('A'), _) => Action::AddVdev,
        (KeyCode::Char('d'), _)
        | (KeyCode::Delete, _)  => Action::Remove,
        (KeyCode::Char('e'), _)
        | (KeyCode::Char('/'), _)
        | (KeyCode::Enter, _)   => Action::Edit,
        (KeyCode::Char('u'), _) => Action::ToggleUnit,
        (KeyCode::Char('m'), _) => Action::ToggleUniform,
        (KeyCode::Char('s'), _) => Action::ToggleSlog,
        (KeyCode::Char('c'), _) => Action::ToggleL2arc,
        (KeyCode::Char('y'), _) => Action::Copy,

        (KeyCode::Char('t'), _) => Action::CycleTheme,
        (KeyCode::Char('?'), _)
        | (KeyCode::F(1), _)   => Action::ShowHelp,
        (KeyCode::Esc, _)      => Action::Back,

        (KeyCode::Char('g'), _) | (KeyCode::Home, _) => Action::JumpTop,
        (KeyCode::Char('G'), _) | (KeyCode::End,  _) => Action::JumpBottom,

        _ => Action::None,
    }
}

pub fn handle_edit_key(key: KeyEvent) -> EditAction {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => EditAction::Quit,
        (KeyCode::Char(c), _)  => EditAction::Insert(c),
        (KeyCode::Backspace, _) => EditAction::Backspace,
        (KeyCode::Enter, _)    => EditAction::Commit,
        (KeyCode::Esc, _)      => EditAction::Cancel,
        _ => EditAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn vim_keys_navigate() {
        assert_eq!(handle_key(key(KeyCode::Char('j'))), Action::SelectDown);
        assert_eq!(handle_key(key(KeyCode::Char('h'))), Action::Decrease);
        assert_eq!(handle_key(key(KeyCode::Right)), Action::Increase);
    }

    #[test]
    fn ctrl_c_quits_everywhere() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(ctrl_c), Action::Quit);
        assert_eq!(handle_edit_key(ctrl_c), EditAction::Quit);
        assert_eq!(handle_key(key(KeyCode::Char('c'))), Action::ToggleL2arc);
    }

    #[test]
    fn edit_mode_takes_letters_literally() {
        assert_eq!(handle_edit_key(key(KeyCode::Char('q'))), EditAction::Insert('q'));
        assert_eq!(handle_edit_key(key(KeyCode::Enter)), EditAction::Commit);
    }
}
