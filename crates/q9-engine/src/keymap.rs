//! Raw key → session action resolution.
//!
//! Two layouts: the numeric keypad (keysym-based, with optional
//! overrides from the config `key` table) and an alternate letter
//! layout driven entirely by the config `altkey` table. In the letter
//! layout, unmapped keys inside the reserved `a`–`z` range are swallowed
//! so stray presses never type literal letters into the host.

use q9_core::AppConfig;
use q9_session::Command;

// X11 keysym values for the keypad keys the engine understands.
pub mod keysym {
    pub const KP_0: u32 = 0xffb0;
    pub const KP_9: u32 = 0xffb9;
    pub const KP_DECIMAL: u32 = 0xffae;
    pub const KP_MULTIPLY: u32 = 0xffaa;
    pub const KP_ADD: u32 = 0xffab;
    pub const KP_SUBTRACT: u32 = 0xffad;
    pub const KP_DIVIDE: u32 = 0xffaf;
    pub const PAGE_UP: u32 = 0xff55;
    pub const PAGE_DOWN: u32 = 0xff56;
}

/// Action ids used by the config `key`/`altkey` tables. 0–9 are the
/// digits; commands follow.
const ID_CANCEL: i32 = 10;
const ID_RELATE: i32 = 11;
const ID_HOMOPHONE: i32 = 12;
const ID_SHORTCUT: i32 = 13;
const ID_OPEN_CLOSE: i32 = 14;
const ID_NEXT_PAGE: i32 = 15;
const ID_PREV_PAGE: i32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Digit(u8),
    Command(Command),
    /// Consume the key without acting on it (reserved letter range).
    Swallow,
}

/// Resolve a keysym against the active layout. `None` means the key is
/// not ours and should pass through to the host unmodified.
pub fn resolve(sym: u32, config: &AppConfig) -> Option<KeyAction> {
    if config.system.use_numpad {
        resolve_numpad(sym, config)
    } else {
        resolve_letters(sym, config)
    }
}

fn resolve_numpad(sym: u32, config: &AppConfig) -> Option<KeyAction> {
    // Config overrides by keysym name take precedence.
    if let Some(name) = keypad_name(sym) {
        if let Some(&id) = config.key.get(name) {
            return action_from_id(id);
        }
    }

    match sym {
        keysym::KP_0..=keysym::KP_9 => Some(KeyAction::Digit((sym - keysym::KP_0) as u8)),
        keysym::KP_DECIMAL => Some(KeyAction::Command(Command::Cancel)),
        keysym::KP_ADD => Some(KeyAction::Command(Command::Relate)),
        keysym::KP_MULTIPLY => Some(KeyAction::Command(Command::Homophone)),
        keysym::KP_SUBTRACT => Some(KeyAction::Command(Command::Shortcut)),
        keysym::KP_DIVIDE => Some(KeyAction::Command(Command::OpenClose)),
        keysym::PAGE_UP => Some(KeyAction::Command(Command::PrevPage)),
        keysym::PAGE_DOWN => Some(KeyAction::Command(Command::NextPage)),
        _ => None,
    }
}

fn resolve_letters(sym: u32, config: &AppConfig) -> Option<KeyAction> {
    // Letter keysyms are their ASCII values.
    let ch = char::from_u32(sym).filter(|c| c.is_ascii_lowercase())?;
    match config.altkey.get(&ch.to_string()) {
        Some(&id) => action_from_id(id),
        // Reserved range: consume so the letter is never typed.
        None => Some(KeyAction::Swallow),
    }
}

fn action_from_id(id: i32) -> Option<KeyAction> {
    match id {
        0..=9 => Some(KeyAction::Digit(id as u8)),
        ID_CANCEL => Some(KeyAction::Command(Command::Cancel)),
        ID_RELATE => Some(KeyAction::Command(Command::Relate)),
        ID_HOMOPHONE => Some(KeyAction::Command(Command::Homophone)),
        ID_SHORTCUT => Some(KeyAction::Command(Command::Shortcut)),
        ID_OPEN_CLOSE => Some(KeyAction::Command(Command::OpenClose)),
        ID_NEXT_PAGE => Some(KeyAction::Command(Command::NextPage)),
        ID_PREV_PAGE => Some(KeyAction::Command(Command::PrevPage)),
        _ => None,
    }
}

fn keypad_name(sym: u32) -> Option<&'static str> {
    Some(match sym {
        keysym::KP_0 => "KP_0",
        0xffb1 => "KP_1",
        0xffb2 => "KP_2",
        0xffb3 => "KP_3",
        0xffb4 => "KP_4",
        0xffb5 => "KP_5",
        0xffb6 => "KP_6",
        0xffb7 => "KP_7",
        0xffb8 => "KP_8",
        keysym::KP_9 => "KP_9",
        keysym::KP_DECIMAL => "KP_Decimal",
        keysym::KP_MULTIPLY => "KP_Multiply",
        keysym::KP_ADD => "KP_Add",
        keysym::KP_SUBTRACT => "KP_Subtract",
        keysym::KP_DIVIDE => "KP_Divide",
        keysym::PAGE_UP => "Page_Up",
        keysym::PAGE_DOWN => "Page_Down",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numpad_config() -> AppConfig {
        AppConfig::default()
    }

    fn letter_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.system.use_numpad = false;
        for (name, id) in [("q", 1), ("w", 2), ("e", 3), ("x", ID_CANCEL)] {
            config.altkey.insert(name.to_string(), id);
        }
        config
    }

    #[test]
    fn test_numpad_digits() {
        let config = numpad_config();
        assert_eq!(resolve(keysym::KP_0, &config), Some(KeyAction::Digit(0)));
        assert_eq!(resolve(keysym::KP_0 + 7, &config), Some(KeyAction::Digit(7)));
        assert_eq!(resolve(keysym::KP_9, &config), Some(KeyAction::Digit(9)));
    }

    #[test]
    fn test_numpad_commands() {
        let config = numpad_config();
        assert_eq!(
            resolve(keysym::KP_DECIMAL, &config),
            Some(KeyAction::Command(Command::Cancel))
        );
        assert_eq!(
            resolve(keysym::KP_DIVIDE, &config),
            Some(KeyAction::Command(Command::OpenClose))
        );
        assert_eq!(
            resolve(keysym::PAGE_DOWN, &config),
            Some(KeyAction::Command(Command::NextPage))
        );
    }

    #[test]
    fn test_numpad_ignores_plain_keys() {
        let config = numpad_config();
        assert_eq!(resolve('a' as u32, &config), None);
        assert_eq!(resolve('5' as u32, &config), None);
    }

    #[test]
    fn test_numpad_config_override() {
        let mut config = numpad_config();
        // Swap decimal to open/close.
        config.key.insert("KP_Decimal".into(), ID_OPEN_CLOSE);
        assert_eq!(
            resolve(keysym::KP_DECIMAL, &config),
            Some(KeyAction::Command(Command::OpenClose))
        );
    }

    #[test]
    fn test_letter_layout_mapping() {
        let config = letter_config();
        assert_eq!(resolve('q' as u32, &config), Some(KeyAction::Digit(1)));
        assert_eq!(
            resolve('x' as u32, &config),
            Some(KeyAction::Command(Command::Cancel))
        );
    }

    #[test]
    fn test_letter_layout_swallows_unmapped_letters() {
        let config = letter_config();
        assert_eq!(resolve('z' as u32, &config), Some(KeyAction::Swallow));
    }

    #[test]
    fn test_letter_layout_passes_non_letters() {
        let config = letter_config();
        assert_eq!(resolve('5' as u32, &config), None);
        assert_eq!(resolve(keysym::KP_0 + 5, &config), None);
    }
}
