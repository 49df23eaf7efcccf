//! Derive the presentation update for a session snapshot.

use q9_session::DecodeSession;

use crate::protocol::UiCommand;

/// Related words never overflow the nine buttons.
const MAX_RELATED: usize = 9;

/// Full (non-base) presentation update: status line, then either the
/// candidate button labels or the imagery set with an optional related
/// overlay. The base state is handled by the controller with `RESET`.
pub(crate) fn render(session: &DecodeSession) -> Vec<UiCommand> {
    let mut commands = vec![UiCommand::SetStatus(session.status_prefix().to_string())];

    if session.in_selection() {
        let page = session.page_candidates();
        let items = (1..=9u8)
            .map(|id| {
                let text = page
                    .get(usize::from(id) - 1)
                    .cloned()
                    .unwrap_or_default();
                (id, text)
            })
            .collect();
        commands.push(UiCommand::UpdateButtons(items));
    } else {
        commands.push(UiCommand::SetImages(session.image_type()));
        if !session.related_words().is_empty() {
            let items = session
                .related_words()
                .iter()
                .take(MAX_RELATED)
                .enumerate()
                .map(|(i, word)| (i as u8 + 1, word.clone()))
                .collect();
            commands.push(UiCommand::SetRelated(items));
        }
    }

    commands
}
