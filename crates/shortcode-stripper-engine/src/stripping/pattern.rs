use crate::markers::MarkerName;
use regex::Regex;
use std::borrow::Cow;

/// Compiled matchers for a single marker name.
///
/// The opening tag is `[name` followed by an optional attribute run and `]`.
/// An attribute run must start with a character that cannot continue a
/// shortcode name, so `vc_row` never matches `[vc_row_inner]` or
/// `[vc_row-inner]`.
#[derive(Debug, Clone)]
pub(crate) struct MarkerPatterns {
    paired: Regex,
    standalone: Regex,
}

impl MarkerPatterns {
    pub(crate) fn new(name: &MarkerName) -> Self {
        let escaped = regex::escape(name.as_str());
        let opening = format!(r"\[{escaped}(?:[^\]\w-][^\]]*)?\]");

        // Marker names are validated and escaped, so these always compile
        let paired = Regex::new(&format!(r"(?s){opening}(.*?)\[/{escaped}\]"))
            .expect("Invalid paired marker regex");
        let standalone = Regex::new(&opening).expect("Invalid standalone marker regex");

        Self { paired, standalone }
    }

    /// Remove every instance of this marker from `text`.
    ///
    /// Paired tags are unwrapped until none are left, then any leftover
    /// opening tags are deleted. Returns `None` when nothing matched.
    pub(crate) fn strip(&self, text: &str) -> Option<String> {
        let mut stripped: Option<String> = None;

        loop {
            let source = stripped.as_deref().unwrap_or(text);
            let next = match self.paired.replace_all(source, "${1}") {
                Cow::Borrowed(_) => break,
                Cow::Owned(next) => next,
            };
            stripped = Some(next);
        }

        let source = stripped.as_deref().unwrap_or(text);
        let next = match self.standalone.replace_all(source, "") {
            Cow::Borrowed(_) => None,
            Cow::Owned(next) => Some(next),
        };

        next.or(stripped)
    }
}
