mod paging;

use std::sync::Arc;

use q9_core::TableStore;

use super::DecodeSession;

pub(super) fn make_test_store() -> Arc<TableStore> {
    Arc::new(TableStore::from_entries(
        vec![
            (123, "你好您"),
            (10, "十"),
            (12, "中"),
            (789, "尼呢"),
            // 12 candidates: two pages
            (456, "甲乙丙丁戊己庚辛壬癸子丑"),
            (1, "「」『』（）"),
            (1000, "的了是"),
            (1001, "一二三"),
        ],
        vec![("你", vec!["好", "們", "的"]), ("早", vec!["安", "上"])],
        vec![("你", vec!["妳", "尼", "泥"])],
    ))
}

pub(super) fn make_session() -> DecodeSession {
    DecodeSession::new(make_test_store())
}

/// Press a sequence of digit keys.
pub(super) fn press(session: &mut DecodeSession, digits: &[u8]) {
    for &d in digits {
        session.process_digit(d);
    }
}
