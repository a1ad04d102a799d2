use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Category of a detected entity.
///
/// Model labels follow the OntoNotes scheme used by Chinese BERT NER models;
/// `Phone` and `Email` come from the pattern matchers. Unknown labels are kept
/// verbatim so they can still be listed in the sensitive set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityLabel {
    Person,
    Org,
    Norp,
    Phone,
    Email,
    Gpe,
    Loc,
    Fac,
    Date,
    Time,
    Money,
    Other(String),
}

impl EntityLabel {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Person => "PERSON",
            Self::Org => "ORG",
            Self::Norp => "NORP",
            Self::Phone => "PHONE",
            Self::Email => "EMAIL",
            Self::Gpe => "GPE",
            Self::Loc => "LOC",
            Self::Fac => "FAC",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Money => "MONEY",
            Self::Other(s) => s,
        }
    }
}

impl FromStr for EntityLabel {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Ok(match upper.as_str() {
            "PERSON" | "PER" => Self::Person,
            "ORG" => Self::Org,
            "NORP" => Self::Norp,
            "PHONE" => Self::Phone,
            "EMAIL" => Self::Email,
            "GPE" => Self::Gpe,
            "LOC" => Self::Loc,
            "FAC" => Self::Fac,
            "DATE" => Self::Date,
            "TIME" => Self::Time,
            "MONEY" => Self::Money,
            _ => Self::Other(upper),
        })
    }
}

impl From<String> for EntityLabel {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(label) => label,
            Err(never) => match never {},
        }
    }
}

impl From<EntityLabel> for String {
    fn from(label: EntityLabel) -> Self {
        label.as_str().to_string()
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which detector produced a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanSource {
    Model,
    Pattern,
}

/// A labeled byte range `[start, end)` into the text it was detected in.
///
/// Offsets always refer to the exact string instance that was scanned and
/// lie on `char` boundaries of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySpan {
    pub label: EntityLabel,
    pub start: usize,
    pub end: usize,
    pub confidence: f64,
    pub source: SpanSource,
}

impl EntitySpan {
    pub fn new(
        label: EntityLabel,
        start: usize,
        end: usize,
        confidence: f64,
        source: SpanSource,
    ) -> Self {
        Self {
            label,
            start,
            end,
            confidence,
            source,
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn overlaps(&self, other: &EntitySpan) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// The covered substring, if the offsets are valid for `text`.
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        if self.start >= self.end {
            return None;
        }
        text.get(self.start..self.end)
    }
}

/// Raw per-token output of a sequence-labeling model, before aggregation.
///
/// `label` is the model's tag, usually BIO-prefixed (`B-PERSON`, `I-ORG`, `O`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledToken {
    pub label: String,
    pub start: usize,
    pub end: usize,
    pub score: f64,
}

impl LabeledToken {
    pub fn new(label: impl Into<String>, start: usize, end: usize, score: f64) -> Self {
        Self {
            label: label.into(),
            start,
            end,
            score,
        }
    }
}
