//! Simplex labels, attribute maps and relabelings.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Globally unique name of a simplex.
///
/// Integer and string labels can be mixed within one complex. Integers order
/// before strings so canonical orderings are total.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    /// Integer label.
    Int(i64),
    /// String label.
    Name(String),
}

impl Label {
    /// Builds the label used for auto-named simplices, `"{order}d{sequence}"`.
    pub fn generated(order: usize, sequence: u64) -> Self {
        Label::Name(format!("{order}d{sequence}"))
    }

    /// Returns the integer payload if this is an integer label.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Label::Int(value) => Some(*value),
            Label::Name(_) => None,
        }
    }

    /// Returns the string payload if this is a string label.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Label::Int(_) => None,
            Label::Name(name) => Some(name),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Int(value) => write!(f, "{value}"),
            Label::Name(name) => f.write_str(name),
        }
    }
}

impl From<i64> for Label {
    fn from(value: i64) -> Self {
        Label::Int(value)
    }
}

impl From<i32> for Label {
    fn from(value: i32) -> Self {
        Label::Int(i64::from(value))
    }
}

impl From<u32> for Label {
    fn from(value: u32) -> Self {
        Label::Int(i64::from(value))
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Label::Name(value.to_owned())
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Label::Name(value)
    }
}

impl From<&Label> for Label {
    fn from(value: &Label) -> Self {
        value.clone()
    }
}

/// Client attributes attached to a simplex. Opaque to the core.
pub type Attributes = BTreeMap<String, serde_json::Value>;

/// Builds a label vector from anything convertible into [`Label`].
pub fn labels<I, L>(items: I) -> Vec<Label>
where
    I: IntoIterator<Item = L>,
    L: Into<Label>,
{
    items.into_iter().map(Into::into).collect()
}

/// A relabeling of simplices, either an explicit (possibly partial) map or a function.
///
/// Labels missing from a map keep their names. Consumers call the renaming at
/// most once per label, so a function may hand out fresh names on each call.
pub enum Renaming<'a> {
    /// Partial old-to-new mapping.
    Map(BTreeMap<Label, Label>),
    /// Total renaming function.
    Function(Box<dyn FnMut(&Label) -> Label + 'a>),
}

impl<'a> Renaming<'a> {
    /// Wraps a function as a renaming.
    pub fn function(f: impl FnMut(&Label) -> Label + 'a) -> Self {
        Renaming::Function(Box::new(f))
    }

    /// Builds a map renaming from old/new pairs.
    pub fn from_pairs<I, A, B>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<Label>,
        B: Into<Label>,
    {
        Renaming::Map(
            pairs
                .into_iter()
                .map(|(old, new)| (old.into(), new.into()))
                .collect(),
        )
    }

    /// Applies the renaming to a single label.
    pub fn apply(&mut self, label: &Label) -> Label {
        match self {
            Renaming::Map(map) => map.get(label).cloned().unwrap_or_else(|| label.clone()),
            Renaming::Function(f) => f(label),
        }
    }

    /// Applies the renaming to every label, calling it exactly once per label.
    pub fn resolve<'l, I>(&mut self, labels: I) -> BTreeMap<Label, Label>
    where
        I: IntoIterator<Item = &'l Label>,
    {
        let mut resolved = BTreeMap::new();
        for label in labels {
            if !resolved.contains_key(label) {
                let renamed = self.apply(label);
                resolved.insert(label.clone(), renamed);
            }
        }
        resolved
    }
}

impl fmt::Debug for Renaming<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Renaming::Map(map) => f.debug_tuple("Map").field(map).finish(),
            Renaming::Function(_) => f.write_str("Function(..)"),
        }
    }
}
