//! Line protocol between the engine and the presentation process.
//!
//! UTF-8 text, one command per line, `\n`-terminated. Multi-item
//! payloads are `|`-joined `id:text` pairs; an empty text means a
//! disabled/blank element.

use std::fmt;
use std::path::PathBuf;

/// Controller → presentation process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    /// Load layout/config from the path; the presentation side derives
    /// its asset/data directory from the parent.
    Init(PathBuf),
    Show,
    Hide,
    /// Return all interactive elements to their base appearance.
    Reset,
    Quit,
    CheckFocus,
    /// Label text per element id.
    UpdateButtons(Vec<(u8, String)>),
    /// Switch the base imagery set.
    SetImages(i32),
    /// Overlay related-word text on the base imagery.
    SetRelated(Vec<(u8, String)>),
    SetStatus(String),
}

fn write_items(f: &mut fmt::Formatter<'_>, items: &[(u8, String)]) -> fmt::Result {
    for (i, (id, text)) in items.iter().enumerate() {
        if i > 0 {
            f.write_str("|")?;
        }
        write!(f, "{id}:{text}")?;
    }
    Ok(())
}

impl fmt::Display for UiCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UiCommand::Init(path) => write!(f, "INIT {}", path.display()),
            UiCommand::Show => f.write_str("SHOW"),
            UiCommand::Hide => f.write_str("HIDE"),
            UiCommand::Reset => f.write_str("RESET"),
            UiCommand::Quit => f.write_str("QUIT"),
            UiCommand::CheckFocus => f.write_str("CHECK_FOCUS"),
            UiCommand::UpdateButtons(items) => {
                f.write_str("UPDATE_BUTTONS ")?;
                write_items(f, items)
            }
            UiCommand::SetImages(n) => write!(f, "SET_IMAGES {n}"),
            UiCommand::SetRelated(items) => {
                f.write_str("SET_RELATED ")?;
                write_items(f, items)
            }
            UiCommand::SetStatus(text) => write!(f, "SET_STATUS {text}"),
        }
    }
}

/// Presentation process → controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiReply {
    /// Element `<id>` was activated.
    Click(u8),
    FocusTrue,
    FocusFalse,
}

impl UiReply {
    /// Parse one reply line. `None` for anything unrecognized; the
    /// caller logs and ignores (protocol desync is never fatal).
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        match line {
            "FOCUS_TRUE" => Some(UiReply::FocusTrue),
            "FOCUS_FALSE" => Some(UiReply::FocusFalse),
            _ => {
                let id = line.strip_prefix("CLICK ")?.trim().parse().ok()?;
                Some(UiReply::Click(id))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_commands() {
        assert_eq!(UiCommand::Show.to_string(), "SHOW");
        assert_eq!(UiCommand::Hide.to_string(), "HIDE");
        assert_eq!(UiCommand::Reset.to_string(), "RESET");
        assert_eq!(UiCommand::Quit.to_string(), "QUIT");
        assert_eq!(UiCommand::CheckFocus.to_string(), "CHECK_FOCUS");
        assert_eq!(
            UiCommand::Init(PathBuf::from("/tmp/config.json")).to_string(),
            "INIT /tmp/config.json"
        );
        assert_eq!(UiCommand::SetImages(10).to_string(), "SET_IMAGES 10");
        assert_eq!(
            UiCommand::SetStatus("速選1".into()).to_string(),
            "SET_STATUS 速選1"
        );
    }

    #[test]
    fn test_update_buttons_encoding() {
        let cmd = UiCommand::UpdateButtons(vec![
            (1, "你".into()),
            (2, "好".into()),
            (3, String::new()),
        ]);
        assert_eq!(cmd.to_string(), "UPDATE_BUTTONS 1:你|2:好|3:");
    }

    #[test]
    fn test_set_related_encoding() {
        let cmd = UiCommand::SetRelated(vec![(1, "好".into()), (2, "們".into())]);
        assert_eq!(cmd.to_string(), "SET_RELATED 1:好|2:們");
    }

    #[test]
    fn test_reply_parse() {
        assert_eq!(UiReply::parse("CLICK 3"), Some(UiReply::Click(3)));
        assert_eq!(UiReply::parse("CLICK 10"), Some(UiReply::Click(10)));
        assert_eq!(UiReply::parse("FOCUS_TRUE"), Some(UiReply::FocusTrue));
        assert_eq!(UiReply::parse("FOCUS_FALSE"), Some(UiReply::FocusFalse));
        assert_eq!(UiReply::parse("  CLICK 0 \n"), Some(UiReply::Click(0)));
    }

    #[test]
    fn test_reply_parse_rejects_garbage() {
        assert_eq!(UiReply::parse(""), None);
        assert_eq!(UiReply::parse("CLICK"), None);
        assert_eq!(UiReply::parse("CLICK x"), None);
        assert_eq!(UiReply::parse("FOCUS"), None);
        assert_eq!(UiReply::parse("SOMETHING ELSE"), None);
    }
}
