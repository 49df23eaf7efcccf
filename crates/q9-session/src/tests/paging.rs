use super::*;
use crate::Command;

#[test]
fn test_total_pages_is_ceil_over_nine() {
    let mut session = make_session();
    press(&mut session, &[4, 5, 6]); // 12 candidates
    assert_eq!(session.total_pages(), 2);
    assert_eq!(session.page_candidates().len(), 9);
}

#[test]
fn test_zero_cycles_through_all_pages() {
    let mut session = make_session();
    press(&mut session, &[4, 5, 6]);

    assert_eq!(session.page(), 0);
    session.process_digit(0);
    assert_eq!(session.page(), 1);
    assert_eq!(session.page_candidates(), ["癸", "子", "丑"]);

    // Exactly total_pages steps return to page 0.
    session.process_digit(0);
    assert_eq!(session.page(), 0);
    assert_eq!(session.page_candidates().len(), 9);
}

#[test]
fn test_prev_page_wraps_to_last() {
    let mut session = make_session();
    press(&mut session, &[4, 5, 6]);

    assert!(session.process_command(Command::PrevPage));
    assert_eq!(session.page(), 1);
    assert!(session.process_command(Command::NextPage));
    assert_eq!(session.page(), 0);
}

#[test]
fn test_page_commands_are_noops_outside_selection() {
    let mut session = make_session();
    assert!(!session.process_command(Command::NextPage));
    assert!(!session.process_command(Command::PrevPage));

    press(&mut session, &[4]);
    assert!(!session.process_command(Command::NextPage));
    assert_eq!(session.input_code(), "4");
}

#[test]
fn test_selection_on_second_page() {
    let mut session = make_session();
    press(&mut session, &[4, 5, 6]);
    session.process_digit(0); // page 1: 癸 子 丑

    assert!(session.process_digit(2));
    assert_eq!(session.take_commit().expect("commit").text, "子");
}

#[test]
fn test_empty_slot_on_last_page_is_a_noop() {
    let mut session = make_session();
    press(&mut session, &[4, 5, 6]);
    session.process_digit(0); // page 1 has three candidates

    assert!(!session.process_digit(7));
    assert!(!session.has_commit());
}
