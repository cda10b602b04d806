//! High-score model and its plain-text record format (`NAME,score` per line).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of characters in a player tag.
pub const TAG_LEN: usize = 3;

/// How many entries the menu shows.
pub const MENU_TOP_N: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseScoreError {
    BadTag(String),
    MissingSeparator,
    BadScore(String),
}

impl fmt::Display for ParseScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadTag(t) => write!(f, "tag must be {TAG_LEN} letters, got {t:?}"),
            Self::MissingSeparator => write!(f, "expected `name,score`"),
            Self::BadScore(s) => write!(f, "invalid score {s:?}"),
        }
    }
}

impl std::error::Error for ParseScoreError {}

/// Three upper-case ASCII letters identifying a player on the leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlayerTag([u8; TAG_LEN]);

impl PlayerTag {
    pub fn as_str(&self) -> &str {
        // Constructed only from ASCII letters.
        std::str::from_utf8(&self.0).unwrap_or("???")
    }
}

impl FromStr for PlayerTag {
    type Err = ParseScoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != TAG_LEN || !bytes.iter().all(u8::is_ascii_alphabetic) {
            return Err(ParseScoreError::BadTag(s.to_string()));
        }
        let mut tag = [0u8; TAG_LEN];
        for (dst, src) in tag.iter_mut().zip(bytes) {
            *dst = src.to_ascii_uppercase();
        }
        Ok(Self(tag))
    }
}

impl TryFrom<String> for PlayerTag {
    type Error = ParseScoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PlayerTag> for String {
    fn from(tag: PlayerTag) -> Self {
        tag.as_str().to_string()
    }
}

impl fmt::Display for PlayerTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One leaderboard record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: PlayerTag,
    pub score: u32,
}

impl HighScoreEntry {
    pub fn new(name: PlayerTag, score: u32) -> Self {
        Self { name, score }
    }

    /// Parse a single `NAME,score` record. Surrounding whitespace is ignored.
    pub fn parse_line(line: &str) -> Result<Self, ParseScoreError> {
        let (name, score) = line
            .trim()
            .split_once(',')
            .ok_or(ParseScoreError::MissingSeparator)?;
        let name = name.trim().parse()?;
        let score = score
            .trim()
            .parse::<u32>()
            .map_err(|_| ParseScoreError::BadScore(score.trim().to_string()))?;
        Ok(Self { name, score })
    }

    pub fn to_line(&self) -> String {
        format!("{},{}", self.name, self.score)
    }
}

/// Leaderboard kept sorted by score, highest first. Equal scores keep their
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreTable {
    entries: Vec<HighScoreEntry>,
}

impl HighScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(mut entries: Vec<HighScoreEntry>) -> Self {
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        Self { entries }
    }

    /// Insert a score, returning its 1-based rank.
    pub fn insert(&mut self, entry: HighScoreEntry) -> usize {
        let pos = self
            .entries
            .iter()
            .position(|e| entry.score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        pos + 1
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    /// The best `n` entries.
    pub fn top(&self, n: usize) -> &[HighScoreEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse the record file contents. Blank lines are ignored; malformed
    /// lines are reported to `on_skip` with their 1-based line number and
    /// left out of the table.
    pub fn parse_records(
        text: &str,
        mut on_skip: impl FnMut(usize, &ParseScoreError),
    ) -> Self {
        let mut entries = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match HighScoreEntry::parse_line(line) {
                Ok(entry) => entries.push(entry),
                Err(e) => on_skip(idx + 1, &e),
            }
        }
        Self::from_entries(entries)
    }

    /// Render the table as one `NAME,score` line per entry.
    pub fn to_records(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&entry.to_line());
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(s: &str) -> PlayerTag {
        s.parse().unwrap()
    }

    #[test]
    fn tag_uppercases_letters() {
        assert_eq!(tag("amy").as_str(), "AMY");
        assert_eq!(tag("BoB").to_string(), "BOB");
    }

    #[test]
    fn tag_rejects_wrong_length_or_non_letters() {
        for bad in ["", "AB", "ABCD", "A1C", "A C", "ÄBC"] {
            assert!(bad.parse::<PlayerTag>().is_err(), "{bad:?} should fail");
        }
    }

    #[test]
    fn parse_line_accepts_record() {
        let e = HighScoreEntry::parse_line("BOB,150\n").unwrap();
        assert_eq!(e, HighScoreEntry::new(tag("BOB"), 150));
        assert_eq!(e.to_line(), "BOB,150");
    }

    #[test]
    fn parse_line_errors() {
        assert_eq!(
            HighScoreEntry::parse_line("BOB150"),
            Err(ParseScoreError::MissingSeparator)
        );
        assert!(matches!(
            HighScoreEntry::parse_line("BOB,lots"),
            Err(ParseScoreError::BadScore(_))
        ));
        assert!(matches!(
            HighScoreEntry::parse_line("BOBBY,10"),
            Err(ParseScoreError::BadTag(_))
        ));
    }

    #[test]
    fn from_entries_sorts_descending() {
        let table = HighScoreTable::from_entries(vec![
            HighScoreEntry::new(tag("BOB"), 150),
            HighScoreEntry::new(tag("AMY"), 300),
        ]);
        let names: Vec<&str> = table.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["AMY", "BOB"]);
    }

    #[test]
    fn insert_returns_rank_and_keeps_order() {
        let mut table = HighScoreTable::new();
        assert_eq!(table.insert(HighScoreEntry::new(tag("BOB"), 150)), 1);
        assert_eq!(table.insert(HighScoreEntry::new(tag("AMY"), 300)), 1);
        assert_eq!(table.insert(HighScoreEntry::new(tag("CAT"), 10)), 3);
        // Ties go after the existing entry.
        assert_eq!(table.insert(HighScoreEntry::new(tag("DAN"), 150)), 3);

        let scores: Vec<u32> = table.entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![300, 150, 150, 10]);
        assert_eq!(table.entries()[1].name.as_str(), "BOB");
        assert_eq!(table.entries()[2].name.as_str(), "DAN");
    }

    #[test]
    fn top_clamps_to_length() {
        let mut table = HighScoreTable::new();
        assert!(table.top(MENU_TOP_N).is_empty());
        for (i, name) in ["AAA", "BBB", "CCC", "DDD", "EEE", "FFF"].iter().enumerate() {
            table.insert(HighScoreEntry::new(tag(name), i as u32 * 10));
        }
        assert_eq!(table.top(MENU_TOP_N).len(), MENU_TOP_N);
        assert_eq!(table.top(MENU_TOP_N)[0].name.as_str(), "FFF");
        assert_eq!(table.top(100).len(), 6);
    }

    #[test]
    fn records_roundtrip_sorted() {
        let table = HighScoreTable::from_entries(vec![
            HighScoreEntry::new(tag("BOB"), 150),
            HighScoreEntry::new(tag("AMY"), 300),
        ]);
        let text = table.to_records();
        assert_eq!(text, "AMY,300\nBOB,150\n");

        let back = HighScoreTable::parse_records(&text, |_, _| panic!("no skips expected"));
        assert_eq!(back, table);
    }

    #[test]
    fn parse_records_skips_bad_lines() {
        let mut skipped = Vec::new();
        let table = HighScoreTable::parse_records("BOB,150\n\ngarbage\nAMY,300\nZZ,1\n", |n, _| {
            skipped.push(n)
        });
        assert_eq!(skipped, vec![3, 5]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.entries()[0].name.as_str(), "AMY");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn table_always_sorted_descending(scores in proptest::collection::vec(0u32..10_000, 0..40)) {
                let mut table = HighScoreTable::new();
                for s in &scores {
                    table.insert(HighScoreEntry::new(tag("ZED"), *s));
                }
                prop_assert_eq!(table.len(), scores.len());
                prop_assert!(table.entries().windows(2).all(|w| w[0].score >= w[1].score));
            }
        }
    }
}
