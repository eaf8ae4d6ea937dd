//! Ignore matching: skip source files that match any operator-supplied glob.
//!
//! Patterns use shell-glob syntax via [`glob::Pattern`] with default match
//! options, so `*` also crosses path separators (`*.tmp.pdf` matches
//! `in/sub/x.tmp.pdf`) and matching is case-sensitive.

use crate::error::Pdf2TxtError;
use glob::Pattern;
use std::path::Path;

/// A compiled set of ignore patterns. Empty set ⇒ never ignores.
#[derive(Debug, Clone, Default)]
pub struct IgnoreMatcher {
    patterns: Vec<Pattern>,
}

impl IgnoreMatcher {
    /// Compile `patterns`, failing on the first invalid one.
    pub fn new<I, S>(patterns: I) -> Result<Self, Pdf2TxtError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| {
                let p = p.as_ref();
                Pattern::new(p).map_err(|e| Pdf2TxtError::InvalidPattern {
                    pattern: p.to_string(),
                    detail: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// True if `path` matches any pattern.
    pub fn matches(&self, path: &Path) -> bool {
        self.patterns.iter().any(|p| p.matches_path(path))
    }

    /// True if either the full source path or its path relative to
    /// `input_root` matches any pattern.
    pub fn is_ignored(&self, path: &Path, input_root: &Path) -> bool {
        if self.patterns.is_empty() {
            return false;
        }
        self.matches(path)
            || path
                .strip_prefix(input_root)
                .map(|rel| self.matches(rel))
                .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_never_ignores() {
        let m = IgnoreMatcher::new(Vec::<String>::new()).unwrap();
        assert!(m.is_empty());
        assert!(!m.is_ignored(Path::new("in/a.pdf"), Path::new("in")));
    }

    #[test]
    fn star_crosses_directories() {
        let m = IgnoreMatcher::new(["*.tmp.pdf"]).unwrap();
        assert!(m.matches(Path::new("in/sub/skip.tmp.pdf")));
        assert!(!m.matches(Path::new("in/sub/report.pdf")));
    }

    #[test]
    fn relative_path_is_also_tested() {
        let m = IgnoreMatcher::new(["drafts/*"]).unwrap();
        assert!(m.is_ignored(Path::new("/data/in/drafts/a.pdf"), Path::new("/data/in")));
        assert!(!m.is_ignored(Path::new("/data/in/final/a.pdf"), Path::new("/data/in")));
    }

    #[test]
    fn any_pattern_matches() {
        let m = IgnoreMatcher::new(["*.bak.pdf", "*secret*"]).unwrap();
        assert!(m.matches(Path::new("x/top-secret.pdf")));
        assert!(m.matches(Path::new("x/old.bak.pdf")));
        assert!(!m.matches(Path::new("x/public.pdf")));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let m = IgnoreMatcher::new(["*.TMP.pdf"]).unwrap();
        assert!(!m.matches(Path::new("a.tmp.pdf")));
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let err = IgnoreMatcher::new(["[unclosed"]).unwrap_err();
        assert!(matches!(err, Pdf2TxtError::InvalidPattern { .. }));
    }
}
