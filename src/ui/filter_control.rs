// src/ui/filter_control.rs
use crate::domain::Subject;
use crate::ui::url_query::{form_url_query, query_value, remove_keys_from_url_query, to_url};

/// Option value that stands for "no filter" in select controls
pub const ALL_SENTINEL: &str = "all";

pub const SUBJECT_KEY: &str = "subject";
pub const TOPIC_KEY: &str = "topic";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterKind {
    /// Fixed option list headed by the "all" sentinel
    Select { options: Vec<FilterOption> },
    /// Free-text search box
    Search,
}

/// What the user asked the control to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterIntent {
    Select(String),
    Reset,
}

/// A filter widget bound to one URL query key.
///
/// The control holds no selection of its own: the displayed value is always
/// read from the query string, and user input turns into a new URL.
#[derive(Debug, Clone)]
pub struct FilterControl {
    pub key: &'static str,
    pub placeholder: &'static str,
    pub kind: FilterKind,
}

impl FilterControl {
    pub fn subject() -> Self {
        let mut options = vec![FilterOption {
            value: ALL_SENTINEL.to_string(),
            label: "All Subjects".to_string(),
        }];
        options.extend(Subject::ALL.iter().map(|subject| FilterOption {
            value: subject.as_str().to_string(),
            label: subject.label(),
        }));

        Self {
            key: SUBJECT_KEY,
            placeholder: "Select subject",
            kind: FilterKind::Select { options },
        }
    }

    pub fn topic() -> Self {
        Self {
            key: TOPIC_KEY,
            placeholder: "Search companions...",
            kind: FilterKind::Search,
        }
    }

    /// Current filter value from the URL, `None` when unfiltered
    pub fn value(&self, query: &str) -> Option<String> {
        query_value(query, self.key)
            .map(|v| v.trim().to_string())
            .filter(|v| !self.is_unfiltered(v))
    }

    /// Value to show as selected; select controls fall back to the sentinel
    pub fn displayed(&self, query: &str) -> String {
        match (self.value(query), &self.kind) {
            (Some(value), _) => value,
            (None, FilterKind::Select { .. }) => ALL_SENTINEL.to_string(),
            (None, FilterKind::Search) => String::new(),
        }
    }

    /// Apply an intent and return the URL to navigate to
    pub fn dispatch(&self, pathname: &str, query: &str, intent: FilterIntent) -> String {
        to_url(pathname, &self.apply(query, intent))
    }

    fn apply(&self, query: &str, intent: FilterIntent) -> String {
        match intent {
            FilterIntent::Select(value) if !self.is_unfiltered(value.trim()) => {
                form_url_query(query, self.key, value.trim())
            }
            FilterIntent::Select(_) | FilterIntent::Reset => {
                remove_keys_from_url_query(query, &[self.key])
            }
        }
    }

    fn is_unfiltered(&self, value: &str) -> bool {
        value.is_empty() || (matches!(self.kind, FilterKind::Select { .. }) && value == ALL_SENTINEL)
    }
}

/// Rewrite a library query so each filter key appears at most once and
/// never with an empty or sentinel value. Unrelated keys are untouched.
pub fn canonical_query(query: &str) -> String {
    let query = query.strip_prefix('?').unwrap_or(query);
    [FilterControl::subject(), FilterControl::topic()]
        .iter()
        .fold(query.to_string(), |acc, control| {
            let intent = match control.value(&acc) {
                Some(value) => FilterIntent::Select(value),
                None => FilterIntent::Reset,
            };
            control.apply(&acc, intent)
        })
}
