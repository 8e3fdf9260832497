use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of the source that produced a suggestion.
///
/// Web sources get different shortcut limits than other sources, so the
/// distinction travels with every suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceId {
    pub name: String,
    pub web: bool,
}

impl SourceId {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            web: false,
        }
    }

    pub fn web(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            web: true,
        }
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// One immutable suggestion record, produced by a corpus or reconstituted
/// from the shortcut store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub source: SourceId,
    pub shortcut_id: Option<String>,
    /// Primary display text.
    pub text1: String,
    /// Secondary display text.
    pub text2: Option<String>,
    pub icon1: Option<String>,
    pub icon2: Option<String>,
    pub format: Option<String>,
    pub spinner_while_refreshing: bool,
    pub intent_action: Option<String>,
    pub intent_data: Option<String>,
    pub intent_extra_data: Option<String>,
    /// Query to run when the suggestion is picked, if it is a query suggestion.
    pub suggestion_query: Option<String>,
    pub log_type: Option<String>,
    /// True when this record came back out of the shortcut store.
    pub is_shortcut: bool,
}

impl Suggestion {
    pub fn new(source: SourceId, text1: impl Into<String>) -> Self {
        Self {
            source,
            shortcut_id: None,
            text1: text1.into(),
            text2: None,
            icon1: None,
            icon2: None,
            format: None,
            spinner_while_refreshing: false,
            intent_action: None,
            intent_data: None,
            intent_extra_data: None,
            suggestion_query: None,
            log_type: None,
            is_shortcut: false,
        }
    }

    pub fn shortcut_id(mut self, id: impl Into<String>) -> Self {
        self.shortcut_id = Some(id.into());
        self
    }

    pub fn text2(mut self, text: impl Into<String>) -> Self {
        self.text2 = Some(text.into());
        self
    }

    pub fn icon1(mut self, icon: impl Into<String>) -> Self {
        self.icon1 = Some(icon.into());
        self
    }

    pub fn icon2(mut self, icon: impl Into<String>) -> Self {
        self.icon2 = Some(icon.into());
        self
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn spinner_while_refreshing(mut self, spinner: bool) -> Self {
        self.spinner_while_refreshing = spinner;
        self
    }

    pub fn intent_action(mut self, action: impl Into<String>) -> Self {
        self.intent_action = Some(action.into());
        self
    }

    pub fn intent_data(mut self, data: impl Into<String>) -> Self {
        self.intent_data = Some(data.into());
        self
    }

    pub fn intent_extra_data(mut self, extra: impl Into<String>) -> Self {
        self.intent_extra_data = Some(extra.into());
        self
    }

    pub fn suggestion_query(mut self, query: impl Into<String>) -> Self {
        self.suggestion_query = Some(query.into());
        self
    }

    pub fn log_type(mut self, log_type: impl Into<String>) -> Self {
        self.log_type = Some(log_type.into());
        self
    }

    pub fn is_shortcut(mut self, is_shortcut: bool) -> Self {
        self.is_shortcut = is_shortcut;
        self
    }

    /// De-duplication key: (source name, shortcut id), defined only for
    /// suggestions that carry a shortcut id.
    pub fn dedup_key(&self) -> Option<(&str, &str)> {
        self.shortcut_id
            .as_deref()
            .map(|id| (self.source.name.as_str(), id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let s = Suggestion::new(SourceId::web("websearch"), "rust")
            .shortcut_id("s1")
            .text2("search the web")
            .suggestion_query("rust")
            .log_type("WEB");
        assert_eq!(s.source.name, "websearch");
        assert!(s.source.web);
        assert_eq!(s.shortcut_id.as_deref(), Some("s1"));
        assert_eq!(s.dedup_key(), Some(("websearch", "s1")));
    }

    #[test]
    fn no_dedup_key_without_shortcut_id() {
        let s = Suggestion::new(SourceId::new("apps"), "calculator");
        assert_eq!(s.dedup_key(), None);
    }

    #[test]
    fn serializes_round_trip() {
        let s = Suggestion::new(SourceId::new("contacts"), "alice").shortcut_id("c9");
        let json = serde_json::to_string(&s).unwrap();
        let back: Suggestion = serde_json::from_str(&json).unwrap();
        assert_eq!(s, back);
    }
}
