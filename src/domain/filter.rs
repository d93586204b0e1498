// src/domain/filter.rs
use crate::domain::Companion;

/// Optional subject/topic constraints for a companion listing.
///
/// Empty or whitespace-only values normalize to `None`, which matches every row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanionFilter {
    pub subject: Option<String>,
    pub topic: Option<String>,
}

impl CompanionFilter {
    pub fn new(subject: Option<&str>, topic: Option<&str>) -> Self {
        Self {
            subject: normalize(subject),
            topic: normalize(topic),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.subject.is_none() && self.topic.is_none()
    }

    /// Row-level semantics of the filter: exact subject, case-insensitive
    /// substring of topic or name.
    pub fn matches(&self, companion: &Companion) -> bool {
        let subject_ok = self
            .subject
            .as_deref()
            .map_or(true, |subject| companion.subject.as_str() == subject);

        let topic_ok = self.topic.as_deref().map_or(true, |topic| {
            let needle = topic.to_lowercase();
            companion.topic.to_lowercase().contains(&needle)
                || companion.name.to_lowercase().contains(&needle)
        });

        subject_ok && topic_ok
    }
}

fn normalize(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Subject;
    use rstest::rstest;

    fn companion(subject: Subject, name: &str, topic: &str) -> Companion {
        Companion {
            id: "1".to_string(),
            subject,
            name: name.to_string(),
            topic: topic.to_string(),
            duration: 30,
        }
    }

    #[test]
    fn given_empty_strings_when_building_filter_then_matches_all() {
        let filter = CompanionFilter::new(Some(""), Some("   "));
        assert!(filter.is_empty());
        assert!(filter.matches(&companion(Subject::History, "Clio", "Rome")));
    }

    #[rstest]
    #[case(Some("maths"), None, true)]
    #[case(Some("science"), None, false)]
    #[case(None, Some("DERIV"), true)]
    #[case(None, Some("count"), true)] // matches the name
    #[case(Some("maths"), Some("poetry"), false)]
    #[case(None, Some("D_rivatives"), false)] // no wildcards
    #[case(None, Some("%"), false)]
    fn test_matches(
        #[case] subject: Option<&str>,
        #[case] topic: Option<&str>,
        #[case] expected: bool,
    ) {
        let row = companion(Subject::Maths, "Countsy the Number Wizard", "Derivatives");
        assert_eq!(CompanionFilter::new(subject, topic).matches(&row), expected);
    }
}
