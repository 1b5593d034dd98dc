//! Suggestion sink and per-invocation session state.
//!
//! Decoded text fragments end up here. The sink contract is a single
//! append operation in stream order; [`SuggestionSession`] is the
//! standard implementation, an explicit object scoped to one generation
//! invocation rather than ambient state shared across them.

use std::fmt;

/// Consumer of emitted text fragments.
///
/// The decoding side knows nothing about the sink beyond this one
/// operation; fragments arrive exactly in stream order.
pub trait SuggestionSink {
    /// Append one text fragment to the current suggestion.
    fn append(&mut self, text: &str);
}

/// Category label of a suggestion entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionKind {
    PlotTwist,
    CharacterDevelopment,
    NarrativeTechnique,
    EmotionalDepth,
    ConflictBuilding,
}

impl SuggestionKind {
    const ALL: [SuggestionKind; 5] = [
        SuggestionKind::PlotTwist,
        SuggestionKind::CharacterDevelopment,
        SuggestionKind::NarrativeTechnique,
        SuggestionKind::EmotionalDepth,
        SuggestionKind::ConflictBuilding,
    ];
}

impl fmt::Display for SuggestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SuggestionKind::PlotTwist => "Plot twist",
            SuggestionKind::CharacterDevelopment => "Character development",
            SuggestionKind::NarrativeTechnique => "Narrative technique",
            SuggestionKind::EmotionalDepth => "Emotional depth",
            SuggestionKind::ConflictBuilding => "Conflict building",
        };
        f.write_str(label)
    }
}

const TITLES: [&str; 5] = [
    "Possible plot development",
    "Character arc suggestion",
    "Deepening the conflict",
    "Emotional turning point",
    "Narrative innovation",
];

/// One suggestion accumulated from stream fragments.
#[derive(Debug, Clone)]
pub struct SuggestionEntry {
    pub kind: SuggestionKind,
    pub title: String,
    pub body: String,
}

/// Ordered, append-only collection of suggestions for one generation.
///
/// The first fragment of a session opens an entry; every later
/// fragment extends it. Create a fresh session per invocation and drop
/// it when the results are no longer needed.
#[derive(Debug, Default)]
pub struct SuggestionSession {
    entries: Vec<SuggestionEntry>,
    next_label: usize,
}

impl SuggestionSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new entry; subsequent appends extend it.
    ///
    /// Kind and title labels cycle through the fixed sets so repeated
    /// entries stay visually distinct.
    pub fn begin_entry(&mut self) {
        let idx = self.next_label % TITLES.len();
        self.next_label += 1;

        self.entries.push(SuggestionEntry {
            kind: SuggestionKind::ALL[idx],
            title: TITLES[idx].to_string(),
            body: String::new(),
        });
    }

    pub fn entries(&self) -> &[SuggestionEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SuggestionSink for SuggestionSession {
    fn append(&mut self, text: &str) {
        if self.entries.is_empty() {
            self.begin_entry();
        }
        if let Some(entry) = self.entries.last_mut() {
            entry.body.push_str(text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_append_opens_an_entry() {
        let mut session = SuggestionSession::new();
        assert!(session.is_empty());

        session.append("A storm ");
        session.append("approaches.");

        assert_eq!(session.entries().len(), 1);
        assert_eq!(session.entries()[0].body, "A storm approaches.");
    }

    #[test]
    fn appends_preserve_fragment_order() {
        let mut session = SuggestionSession::new();
        for fragment in ["one", " two", " three"] {
            session.append(fragment);
        }
        assert_eq!(session.entries()[0].body, "one two three");
    }

    #[test]
    fn explicit_entries_split_the_stream() {
        let mut session = SuggestionSession::new();
        session.append("first body");
        session.begin_entry();
        session.append("second body");

        let entries = session.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].body, "first body");
        assert_eq!(entries[1].body, "second body");
    }

    #[test]
    fn labels_cycle_deterministically() {
        let mut session = SuggestionSession::new();
        for _ in 0..6 {
            session.begin_entry();
        }

        let entries = session.entries();
        assert_eq!(entries[0].kind, SuggestionKind::PlotTwist);
        assert_eq!(entries[4].kind, SuggestionKind::ConflictBuilding);
        assert_eq!(entries[5].kind, SuggestionKind::PlotTwist);
        assert_eq!(entries[0].title, entries[5].title);
    }
}
