// goal.rs — Goal record, its enumerated fields, and creation input.
//
// Recurrence and tag are closed enumerations. Clients pick a value either
// by name ("weekly") or by its position in the ordered option list, the
// way a dropdown is stepped through. Positions past the end clamp to the
// last option.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An ordered, closed set of selectable values.
///
/// `options()` must be non-empty; its order is the selection order.
pub trait OptionSet: Copy + Sized + 'static {
    /// Field name used in errors and option listings.
    const FIELD: &'static str;

    /// All values, in selection order.
    fn options() -> &'static [Self];

    /// Stable lowercase name (the serialized form).
    fn name(&self) -> &'static str;

    /// Human-readable label for dropdowns.
    fn label(&self) -> &'static str;

    /// Map a zero-based position to a value, clamping to the last option.
    fn from_position(position: usize) -> Self {
        let options = Self::options();
        options[position.min(options.len() - 1)]
    }

    /// Look up a value by name, ignoring ASCII case and surrounding whitespace.
    fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::options()
            .iter()
            .copied()
            .find(|o| o.name().eq_ignore_ascii_case(name))
    }
}

/// How often a goal repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recurrence {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl OptionSet for Recurrence {
    const FIELD: &'static str = "recurrence";

    fn options() -> &'static [Self] {
        &[
            Recurrence::Daily,
            Recurrence::Weekly,
            Recurrence::Monthly,
            Recurrence::Yearly,
        ]
    }

    fn name(&self) -> &'static str {
        match self {
            Recurrence::Daily => "daily",
            Recurrence::Weekly => "weekly",
            Recurrence::Monthly => "monthly",
            Recurrence::Yearly => "yearly",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Recurrence::Daily => "Daily",
            Recurrence::Weekly => "Weekly",
            Recurrence::Monthly => "Monthly",
            Recurrence::Yearly => "Yearly",
        }
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Category label attached to a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tag {
    Personal,
    Work,
    Health,
    Learning,
    Finance,
}

impl OptionSet for Tag {
    const FIELD: &'static str = "tag";

    fn options() -> &'static [Self] {
        &[
            Tag::Personal,
            Tag::Work,
            Tag::Health,
            Tag::Learning,
            Tag::Finance,
        ]
    }

    fn name(&self) -> &'static str {
        match self {
            Tag::Personal => "personal",
            Tag::Work => "work",
            Tag::Health => "health",
            Tag::Learning => "learning",
            Tag::Finance => "finance",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Tag::Personal => "Personal",
            Tag::Work => "Work",
            Tag::Health => "Health",
            Tag::Learning => "Learning",
            Tag::Finance => "Finance",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of an option listing, as rendered into a dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionEntry {
    pub index: usize,
    pub name: String,
    pub label: String,
}

/// List every value of `T` with its selection position.
pub fn option_entries<T: OptionSet>() -> Vec<OptionEntry> {
    T::options()
        .iter()
        .enumerate()
        .map(|(index, o)| OptionEntry {
            index,
            name: o.name().to_string(),
            label: o.label().to_string(),
        })
        .collect()
}

/// A stored goal. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    /// Assigned by the store; never reused.
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub recurrence: Recurrence,
    pub tag: Tag,
    /// Set once, when the store accepted the record.
    pub created_at: DateTime<Utc>,
}

impl Goal {
    /// Stamp a validated draft with a fresh identity and creation time.
    pub fn from_draft(draft: GoalDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            description: draft.description,
            recurrence: draft.recurrence,
            tag: draft.tag,
            created_at: Utc::now(),
        }
    }
}

/// Validated creation input, ready for the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalDraft {
    pub title: String,
    pub description: String,
    pub recurrence: Recurrence,
    pub tag: Tag,
}

/// Unvalidated creation input, as submitted by a client.
///
/// Recurrence and tag may each be given by name or by position, not both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewGoal {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_index: Option<usize>,
}

impl NewGoal {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_recurrence(mut self, name: impl Into<String>) -> Self {
        self.recurrence = Some(name.into());
        self
    }

    pub fn with_recurrence_index(mut self, index: usize) -> Self {
        self.recurrence_index = Some(index);
        self
    }

    pub fn with_tag(mut self, name: impl Into<String>) -> Self {
        self.tag = Some(name.into());
        self
    }

    pub fn with_tag_index(mut self, index: usize) -> Self {
        self.tag_index = Some(index);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_selects_in_order() {
        assert_eq!(Recurrence::from_position(0), Recurrence::Daily);
        assert_eq!(Recurrence::from_position(2), Recurrence::Monthly);
        assert_eq!(Tag::from_position(1), Tag::Work);
    }

    #[test]
    fn position_past_end_clamps_to_last() {
        assert_eq!(Recurrence::from_position(4), Recurrence::Yearly);
        assert_eq!(Recurrence::from_position(usize::MAX), Recurrence::Yearly);
        assert_eq!(Tag::from_position(20), Tag::Finance);
    }

    #[test]
    fn parse_ignores_case_and_whitespace() {
        assert_eq!(Recurrence::parse(" Weekly "), Some(Recurrence::Weekly));
        assert_eq!(Tag::parse("HEALTH"), Some(Tag::Health));
        assert_eq!(Tag::parse("hobby"), None);
        assert_eq!(Recurrence::parse(""), None);
    }

    #[test]
    fn serialized_names_match_option_names() {
        for r in Recurrence::options() {
            let json = serde_json::to_string(r).unwrap();
            assert_eq!(json, format!("\"{}\"", r.name()));
        }
        for t in Tag::options() {
            let json = serde_json::to_string(t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.name()));
        }
    }

    #[test]
    fn option_entries_carry_positions() {
        let entries = option_entries::<Recurrence>();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[2].index, 2);
        assert_eq!(entries[2].name, "monthly");
        assert_eq!(entries[2].label, "Monthly");
    }

    #[test]
    fn goal_uses_camel_case_fields() {
        let goal = Goal::from_draft(GoalDraft {
            title: "Run".to_string(),
            description: String::new(),
            recurrence: Recurrence::Daily,
            tag: Tag::Health,
        });
        let json = serde_json::to_value(&goal).unwrap();
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["recurrence"], "daily");
        assert_eq!(json["tag"], "health");
    }

    #[test]
    fn new_goal_accepts_index_fields() {
        let input: NewGoal = serde_json::from_str(
            r#"{"title":"T","description":"D","recurrenceIndex":2,"tagIndex":1}"#,
        )
        .unwrap();
        assert_eq!(input.recurrence_index, Some(2));
        assert_eq!(input.tag_index, Some(1));
        assert!(input.recurrence.is_none());
    }

    #[test]
    fn new_goal_missing_fields_default() {
        let input: NewGoal = serde_json::from_str("{}").unwrap();
        assert_eq!(input, NewGoal::default());
    }
}
