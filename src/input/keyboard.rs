use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// User intents derived from keyboard input
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    // Navigation
    MoveUp,
    MoveDown,

    // Actions
    StartCleanup,
    Cancel,
    Rescan,
    Dismiss,
    Quit,
}

/// Screens that interpret keys differently
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewMode {
    /// Scanning in progress, only quitting is possible
    Busy,
    Repositories,
    Cleaning,
    /// Report or error screen
    Outcome,
}

/// Case-insensitive character match
fn is_char(code: &KeyCode, expected: char) -> bool {
    matches!(code, KeyCode::Char(c) if c.eq_ignore_ascii_case(&expected))
}

/// Map a key event to a user intent for the current screen
pub fn map_key_to_intent(key: &KeyEvent, mode: ViewMode) -> Option<Intent> {
    let code = &key.code;

    if key.modifiers.contains(KeyModifiers::CONTROL) && is_char(code, 'c') {
        return Some(if mode == ViewMode::Cleaning { Intent::Cancel } else { Intent::Quit });
    }
    if is_char(code, 'q') {
        return Some(Intent::Quit);
    }

    match mode {
        ViewMode::Busy => None,
        ViewMode::Repositories => {
            if *code == KeyCode::Up || is_char(code, 'k') {
                return Some(Intent::MoveUp);
            }
            if *code == KeyCode::Down || is_char(code, 'j') {
                return Some(Intent::MoveDown);
            }
            if is_char(code, 'c') {
                return Some(Intent::StartCleanup);
            }
            if is_char(code, 'r') {
                return Some(Intent::Rescan);
            }
            if *code == KeyCode::Esc {
                return Some(Intent::Quit);
            }
            None
        }
        ViewMode::Cleaning => {
            if *code == KeyCode::Esc || is_char(code, 'x') {
                return Some(Intent::Cancel);
            }
            None
        }
        ViewMode::Outcome => {
            if *code == KeyCode::Esc || *code == KeyCode::Enter {
                return Some(Intent::Dismiss);
            }
            if is_char(code, 'r') {
                return Some(Intent::Rescan);
            }
            None
        }
    }
}
