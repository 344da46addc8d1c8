use serde::Serialize;
use std::fmt;

/// Page-builder shortcodes removed when no other list is configured.
///
/// Order matters: names are stripped one after another in this order.
pub const DEFAULT_MARKERS: [&str; 10] = [
    "vc_row",
    "vc_column",
    "vc_button",
    "fusion_builder_container",
    "fusion_builder_row",
    "fusion_builder_column",
    "fusion_text",
    "fsn_row",
    "fsn_column",
    "fsn_text",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarkerError {
    #[error("Marker name is empty")]
    Empty,
    #[error("Marker name '{name}' contains invalid character {invalid:?}")]
    InvalidCharacter { name: String, invalid: char },
}

/// The name of a shortcode tag, e.g. `vc_row` for `[vc_row]...[/vc_row]`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MarkerName(String);

impl MarkerName {
    /// Validate and wrap a shortcode name.
    ///
    /// Brackets, slashes and whitespace are not allowed in a name.
    pub fn new(name: impl Into<String>) -> Result<Self, MarkerError> {
        let name = name.into();
        if name.is_empty() {
            return Err(MarkerError::Empty);
        }
        if let Some(invalid) = name
            .chars()
            .find(|c| matches!(c, '[' | ']' | '/') || c.is_whitespace())
        {
            return Err(MarkerError::InvalidCharacter { name, invalid });
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MarkerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MarkerName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Ordered, duplicate-free list of marker names.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct MarkerSet {
    names: Vec<MarkerName>,
}

impl MarkerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from raw names, keeping the first occurrence of duplicates
    pub fn parse<I, S>(names: I) -> Result<Self, MarkerError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for name in names {
            set.push(MarkerName::new(name)?);
        }
        Ok(set)
    }

    /// Append a name unless it is already present.
    ///
    /// Returns false if the name was a duplicate.
    pub fn push(&mut self, name: MarkerName) -> bool {
        if self.names.contains(&name) {
            return false;
        }
        self.names.push(name);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &MarkerName> {
        self.names.iter()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n.as_str() == name)
    }
}

/// The reference page-builder markers from [`DEFAULT_MARKERS`]
pub fn default_markers() -> MarkerSet {
    MarkerSet {
        names: DEFAULT_MARKERS
            .iter()
            .map(|name| MarkerName(name.to_string()))
            .collect(),
    }
}

impl<'a> IntoIterator for &'a MarkerSet {
    type Item = &'a MarkerName;
    type IntoIter = std::slice::Iter<'a, MarkerName>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}
