//! Shortcode removal.
//!
//! Each configured marker name is processed in order over the whole text:
//! paired tags `[name ...]inner[/name]` are replaced by `inner`, then any
//! remaining `[name ...]` tags are deleted. Closing tags with no opening tag
//! and markers that are not configured are left untouched.

mod pattern;

use crate::markers::MarkerSet;
use pattern::MarkerPatterns;

/// Removes a fixed, ordered set of shortcode markers from text.
#[derive(Debug, Clone)]
pub struct Stripper {
    markers: MarkerSet,
    patterns: Vec<MarkerPatterns>,
}

impl Stripper {
    pub fn new(markers: MarkerSet) -> Self {
        let patterns = markers.iter().map(MarkerPatterns::new).collect();
        Self { markers, patterns }
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    /// Strip all configured markers, returning the text unchanged if clean
    pub fn strip(&self, text: &str) -> String {
        self.strip_changed(text).unwrap_or_else(|| text.to_string())
    }

    /// Strip all configured markers, or `None` if the text contains none.
    ///
    /// Removing a tag can join the surrounding text into a new tag (for
    /// example `[[vc_row]vc_row]`), so the whole ordered sequence is repeated
    /// until a pass changes nothing. Every change shortens the text, so this
    /// always terminates, and the result is a fixed point.
    pub fn strip_changed(&self, text: &str) -> Option<String> {
        let mut stripped: Option<String> = None;

        loop {
            let mut changed = false;
            for patterns in &self.patterns {
                let source = stripped.as_deref().unwrap_or(text);
                if let Some(next) = patterns.strip(source) {
                    stripped = Some(next);
                    changed = true;
                }
            }
            if !changed {
                return stripped;
            }
        }
    }
}

impl Default for Stripper {
    fn default() -> Self {
        Self::new(crate::markers::default_markers())
    }
}

/// One-off convenience wrapper around [`Stripper`]
pub fn strip(text: &str, markers: &MarkerSet) -> String {
    Stripper::new(markers.clone()).strip(text)
}
