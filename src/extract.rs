//! Link extraction from published document text.

use std::collections::BTreeSet;

use regex::Regex;

use crate::{Category, Result};

/// One rule-set to mirror, identified by category and base name.
///
/// Ordering is category first, then name, so a `BTreeSet<MirrorTarget>`
/// iterates deterministically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MirrorTarget {
    /// Category directory the rule-set is published under
    pub category: Category,
    /// Base name without extension
    pub name: String,
}

impl MirrorTarget {
    /// Create a new mirror target.
    pub fn new(category: Category, name: impl Into<String>) -> Self {
        Self {
            category,
            name: name.into(),
        }
    }
}

/// Extraction of mirror targets from free-form document text.
///
/// Matching a README with a regex is fragile; the trait keeps the matching
/// rule swappable without touching the fetch/write pipeline.
pub trait LinkExtractor {
    /// Extract the deduplicated set of targets referenced by `text`.
    fn extract(&self, text: &str) -> BTreeSet<MirrorTarget>;
}

/// Regex-based link extractor.
///
/// Scans for `https://<host>/<path>` where `<path>` is made of
/// alphanumerics, `_`, `-`, and `/`, ending in `.conf` or `.txt`. The same
/// rule-set is routinely linked several times under different aliases and
/// formats; duplicates collapse in the target set.
pub struct RegexLinkExtractor {
    pattern: Regex,
}

impl RegexLinkExtractor {
    /// Build an extractor for links on the given host.
    pub fn for_host(host: &str) -> Result<Self> {
        let pattern = Regex::new(&format!(
            r"https://{}/([A-Za-z0-9_/-]+\.(?:conf|txt))",
            regex::escape(host)
        ))?;
        Ok(Self { pattern })
    }
}

impl LinkExtractor for RegexLinkExtractor {
    fn extract(&self, text: &str) -> BTreeSet<MirrorTarget> {
        let mut targets = BTreeSet::new();

        for caps in self.pattern.captures_iter(text) {
            let path = &caps[1];
            let segments: Vec<&str> = path.split('/').collect();
            if segments.len() < 3 {
                continue;
            }

            // .../<category>/<name>.<ext>
            let file_name = segments[segments.len() - 1];
            let name = match file_name.rsplit_once('.') {
                Some((stem, _)) => stem,
                None => file_name,
            };
            let Some(category) = Category::parse(segments[segments.len() - 2]) else {
                continue;
            };

            targets.insert(MirrorTarget::new(category, name));
        }

        targets
    }
}
