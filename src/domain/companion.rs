// src/domain/companion.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Subject category of a companion, used for icon and color lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Maths,
    Language,
    Science,
    History,
    Coding,
    Economics,
}

impl Subject {
    pub const ALL: [Subject; 6] = [
        Subject::Maths,
        Subject::Language,
        Subject::Science,
        Subject::History,
        Subject::Coding,
        Subject::Economics,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::Maths => "maths",
            Subject::Language => "language",
            Subject::Science => "science",
            Subject::History => "history",
            Subject::Coding => "coding",
            Subject::Economics => "economics",
        }
    }

    /// Display label, e.g. `Maths`
    pub fn label(&self) -> String {
        let raw = self.as_str();
        let mut chars = raw.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Background color used behind the subject icon
    pub fn color(&self) -> &'static str {
        match self {
            Subject::Science => "#E5D0FF",
            Subject::Maths => "#FFDA6E",
            Subject::Language => "#BDE7FF",
            Subject::Coding => "#FFC8E4",
            Subject::History => "#FFECC8",
            Subject::Economics => "#C8FFDF",
        }
    }

    pub fn icon_path(&self) -> String {
        format!("/icons/{}.svg", self.as_str())
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Subject {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Subject::ALL
            .into_iter()
            .find(|subject| subject.as_str() == s)
            .ok_or_else(|| format!("unknown subject: {s}"))
    }
}

/// A stored tutoring companion. Columns beyond these are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Companion {
    pub id: String,
    pub subject: Subject,
    pub name: String,
    pub topic: String,
    /// Session length in minutes
    pub duration: u32,
}
