//! Genre definitions: questions, trope sets and the answers that filter them.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::{slug::slugify, theme::GenreTheme};

/// A themed ruleset the game is played against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Genre {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub trope_sets: Vec<TropeSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<GenreTheme>,
}

impl Genre {
    /// Every trope of every set, in set order. Identifiers may repeat across sets.
    pub fn all_tropes(&self) -> impl Iterator<Item = &Trope> {
        self.trope_sets.iter().flat_map(|set| set.tropes.iter())
    }

    /// `true` when some set other than `exclude` already uses this filter combination.
    pub fn has_duplicate_filters(&self, filters: &Filters, exclude: Option<usize>) -> bool {
        let id = TropeSet::derive_id(filters);
        self.trope_sets
            .iter()
            .enumerate()
            .any(|(idx, set)| Some(idx) != exclude && set.id == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    /// Exactly one answer.
    Single,
    /// Zero or more answers.
    Multiple,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub text: String,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub id: String,
    pub text: String,
    /// Token compared against trope set filters.
    pub value: String,
}

/// A filter or answer value: either one token or a set of tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Scalar(String),
    Set(Vec<String>),
}

/// A user's answer has the same shape as a filter value.
pub type Answer = FilterValue;

/// Answers keyed by question id.
pub type Answers = IndexMap<String, Answer>;

/// Filter criteria keyed by question id.
pub type Filters = IndexMap<String, FilterValue>;

impl FilterValue {
    /// View the value as a list, coercing a scalar into a one-element slice.
    pub fn as_slice(&self) -> &[String] {
        match self {
            FilterValue::Scalar(token) => std::slice::from_ref(token),
            FilterValue::Set(tokens) => tokens,
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.as_slice().iter().any(|t| t == token)
    }

    /// An answer that still needs input: an empty multiple-choice selection.
    pub fn is_empty(&self) -> bool {
        matches!(self, FilterValue::Set(tokens) if tokens.is_empty())
    }

    /// Whether an answer satisfies this filter value.
    ///
    /// A set filter needs any overlap with the answer; a scalar filter must be
    /// one of the answer's tokens (list answer) or equal it exactly (scalar answer).
    /// An unanswered question never satisfies a filter; earlier releases skipped
    /// such filters instead.
    pub fn is_satisfied_by(&self, answer: Option<&Answer>) -> bool {
        let Some(answer) = answer else {
            return false;
        };
        match self {
            FilterValue::Set(tokens) => tokens.iter().any(|token| answer.contains(token)),
            FilterValue::Scalar(token) => match answer {
                FilterValue::Set(values) => values.contains(token),
                FilterValue::Scalar(value) => value == token,
            },
        }
    }
}

impl From<&str> for FilterValue {
    fn from(token: &str) -> Self {
        FilterValue::Scalar(token.to_owned())
    }
}

impl<const N: usize> From<[&str; N]> for FilterValue {
    fn from(tokens: [&str; N]) -> Self {
        FilterValue::Set(tokens.iter().map(|t| (*t).to_owned()).collect())
    }
}

/// A filtered bucket of tropes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TropeSet {
    pub id: String,
    #[serde(default, deserialize_with = "defined_filters")]
    pub filters: Filters,
    #[serde(default)]
    pub tropes: Vec<Trope>,
}

/// Filter maps may carry `null` for "no constraint"; those entries are dropped.
fn defined_filters<'de, D>(deserializer: D) -> Result<Filters, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = IndexMap::<String, Option<FilterValue>>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key, value)))
        .collect())
}

impl TropeSet {
    /// Create a set whose id is derived from its filters.
    pub fn new(filters: Filters, tropes: Vec<Trope>) -> Self {
        Self {
            id: Self::derive_id(&filters),
            filters,
            tropes,
        }
    }

    /// The id a set with these filters gets: every filter token slugified, in order,
    /// joined with `-`. A set without filters is `default`.
    pub fn derive_id(filters: &Filters) -> String {
        let parts: Vec<String> = filters
            .values()
            .flat_map(FilterValue::as_slice)
            .map(|token| slugify(token))
            .collect();
        if parts.is_empty() {
            "default".to_owned()
        } else {
            parts.join("-")
        }
    }

    /// `true` when every filter of this set is satisfied by `answers`.
    ///
    /// Keys absent from the filter map impose no constraint.
    pub fn matches(&self, answers: &Answers) -> bool {
        self.filters
            .iter()
            .all(|(key, value)| value.is_satisfied_by(answers.get(key)))
    }
}

/// A single narrative item that can appear on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trope {
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citation: Option<String>,
}

impl Trope {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            description: None,
            citation: None,
        }
    }
}
