//! Keyed lookup store backing the decode state machine.
//!
//! The store answers four query shapes: code → candidate list, character
//! → related list, character → homophone list, and character → reverse
//! code list. The key space is overloaded by convention: code `1` holds
//! the bracket glyph set, `1000` the general shortcuts, `1000+n`
//! (n = 1..9) the per-category shortcuts, and everything else is a
//! literal 1–3 digit candidate code. That convention is fixed by the
//! candidate data and must not change.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Code holding the bracket-pair glyph set.
pub const BRACKET_CODE: u32 = 1;
/// Code holding the general shortcut set; `SHORTCUT_BASE + n` holds the
/// category set for digit `n`.
pub const SHORTCUT_BASE: u32 = 1000;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("data parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid code key: {0:?}")]
    InvalidCode(String),
}

/// The relational queries the session needs.
///
/// Implementations must preserve stored order: homophone lists are
/// stored with closer phonetic matches first, and candidate lists in
/// their display order.
pub trait LookupStore: Send + Sync {
    /// Candidate characters for a numeric code, in display order.
    fn words(&self, code: u32) -> Vec<String>;

    /// Characters related to `word` (the post-commit suggestion row).
    fn related(&self, word: &str) -> Vec<String>;

    /// Homophones of `word`, closer phonetic matches first.
    /// Empty for anything that is not a single character.
    fn homophones(&self, word: &str) -> Vec<String>;

    /// Every code whose candidate list contains `word`, ascending.
    fn codes(&self, word: &str) -> Vec<u32>;

    /// Map each traditional character to its simplified form; characters
    /// without a mapping pass through unchanged.
    fn to_simplified(&self, text: &str) -> String;
}

/// Raw data file layout. Candidate strings are stored as one string per
/// code; the candidate list is its sequence of scalars.
#[derive(Debug, Deserialize)]
struct TableData {
    #[serde(default)]
    words: HashMap<String, String>,
    #[serde(default)]
    related: HashMap<String, Vec<String>>,
    #[serde(default)]
    homophones: HashMap<String, Vec<String>>,
    #[serde(default)]
    simplified: HashMap<String, String>,
}

/// In-memory table store.
pub struct TableStore {
    // BTreeMap so reverse-code scans come out in ascending code order.
    words: BTreeMap<u32, String>,
    related: HashMap<String, Vec<String>>,
    homophones: HashMap<String, Vec<String>>,
    simplified: HashMap<char, char>,
}

impl TableStore {
    /// Load from a JSON data file.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let text = fs::read_to_string(path)?;
        let data: TableData = serde_json::from_str(&text)?;

        let mut words = BTreeMap::new();
        for (key, value) in data.words {
            let code: u32 = key
                .parse()
                .map_err(|_| StoreError::InvalidCode(key.clone()))?;
            words.insert(code, value);
        }

        let mut simplified = HashMap::new();
        for (trad, simp) in data.simplified {
            if let (Some(t), Some(s)) = (trad.chars().next(), simp.chars().next()) {
                simplified.insert(t, s);
            }
        }

        tracing::debug!(
            codes = words.len(),
            related = data.related.len(),
            "lookup store loaded"
        );

        Ok(Self {
            words,
            related: data.related,
            homophones: data.homophones,
            simplified,
        })
    }

    /// Build a store directly from entries. Test constructor.
    pub fn from_entries(
        words: Vec<(u32, &str)>,
        related: Vec<(&str, Vec<&str>)>,
        homophones: Vec<(&str, Vec<&str>)>,
    ) -> Self {
        Self {
            words: words.into_iter().map(|(c, w)| (c, w.to_string())).collect(),
            related: related
                .into_iter()
                .map(|(w, rs)| (w.to_string(), rs.iter().map(|r| r.to_string()).collect()))
                .collect(),
            homophones: homophones
                .into_iter()
                .map(|(w, hs)| (w.to_string(), hs.iter().map(|h| h.to_string()).collect()))
                .collect(),
            simplified: HashMap::new(),
        }
    }

    /// Add traditional → simplified mappings. Test helper.
    pub fn with_simplified(mut self, pairs: Vec<(char, char)>) -> Self {
        self.simplified.extend(pairs);
        self
    }
}

impl LookupStore for TableStore {
    fn words(&self, code: u32) -> Vec<String> {
        match self.words.get(&code) {
            Some(s) => s.chars().map(|c| c.to_string()).collect(),
            None => Vec::new(),
        }
    }

    fn related(&self, word: &str) -> Vec<String> {
        self.related.get(word).cloned().unwrap_or_default()
    }

    fn homophones(&self, word: &str) -> Vec<String> {
        if !crate::unicode::is_single_scalar(word) {
            return Vec::new();
        }
        self.homophones.get(word).cloned().unwrap_or_default()
    }

    fn codes(&self, word: &str) -> Vec<u32> {
        self.words
            .iter()
            .filter(|(_, chars)| chars.contains(word))
            .map(|(code, _)| *code)
            .collect()
    }

    fn to_simplified(&self, text: &str) -> String {
        text.chars()
            .map(|c| self.simplified.get(&c).copied().unwrap_or(c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn make_store() -> TableStore {
        TableStore::from_entries(
            vec![(123, "你好您"), (45, "我"), (1, "「」『』")],
            vec![("你", vec!["好", "們"])],
            vec![("你", vec!["妳", "尼"])],
        )
        .with_simplified(vec![('們', '们')])
    }

    #[test]
    fn test_words_splits_scalars() {
        let store = make_store();
        assert_eq!(store.words(123), vec!["你", "好", "您"]);
        assert_eq!(store.words(45), vec!["我"]);
        assert!(store.words(999).is_empty());
    }

    #[test]
    fn test_related_and_homophones() {
        let store = make_store();
        assert_eq!(store.related("你"), vec!["好", "們"]);
        assert!(store.related("好").is_empty());
        assert_eq!(store.homophones("你"), vec!["妳", "尼"]);
    }

    #[test]
    fn test_homophones_reject_multi_scalar() {
        let store = make_store();
        assert!(store.homophones("你好").is_empty());
    }

    #[test]
    fn test_reverse_codes_ascending() {
        let store = TableStore::from_entries(
            vec![(500, "你我"), (123, "你好"), (45, "他")],
            vec![],
            vec![],
        );
        assert_eq!(store.codes("你"), vec![123, 500]);
        assert!(store.codes("不").is_empty());
    }

    #[test]
    fn test_to_simplified() {
        let store = make_store();
        assert_eq!(store.to_simplified("你們好"), "你们好");
        assert_eq!(store.to_simplified(""), "");
    }

    #[test]
    fn test_load_from_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "words": {{ "123": "你好", "1": "「」" }},
                "related": {{ "你": ["好"] }},
                "homophones": {{ "你": ["妳"] }},
                "simplified": {{ "關": "关" }}
            }}"#
        )
        .unwrap();

        let store = TableStore::load(file.path()).unwrap();
        assert_eq!(store.words(123), vec!["你", "好"]);
        assert_eq!(store.words(BRACKET_CODE), vec!["「", "」"]);
        assert_eq!(store.related("你"), vec!["好"]);
        assert_eq!(store.to_simplified("關"), "关");
    }

    #[test]
    fn test_load_rejects_bad_code_key() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "words": {{ "abc": "你" }} }}"#).unwrap();
        assert!(matches!(
            TableStore::load(file.path()),
            Err(StoreError::InvalidCode(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            TableStore::load(Path::new("/nonexistent/q9/data.json")),
            Err(StoreError::Io(_))
        ));
    }
}
