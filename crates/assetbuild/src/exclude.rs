//! Development-only file filtering.
//!
//! Matching is a case-sensitive substring test against the full path string,
//! not an extension comparison: `notes.map.bak` is excluded by `.map`.

use std::path::Path;

/// Substrings that mark a path as development-only.
pub const EXCLUDED_PATTERNS: [&str; 18] = [
    ".pdn",
    ".map",
    ".prt",
    ".log",
    ".pts",
    ".texinfo.json",
    ".ssv",
    "save\\",
    "save/",
    "save0",
    "scrnshot",
    "screenshot",
    "screenshots",
    ".skp",
    ".skb",
    ".mtl",
    ".obj",
    ".fbx",
];

/// Ordered set of exclusion substrings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExclusionSet {
    patterns: &'static [&'static str],
}

impl Default for ExclusionSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ExclusionSet {
    /// The fixed pattern list every run uses.
    #[must_use]
    pub const fn builtin() -> Self {
        Self {
            patterns: &EXCLUDED_PATTERNS,
        }
    }

    /// Patterns in match order.
    #[must_use]
    pub const fn patterns(&self) -> &'static [&'static str] {
        self.patterns
    }

    /// First pattern contained in `path`, if any.
    #[must_use]
    pub fn matching_pattern(&self, path: &Path) -> Option<&'static str> {
        let text = path.to_string_lossy();
        self.patterns
            .iter()
            .copied()
            .find(|pattern| text.contains(pattern))
    }

    /// Whether `path` must be left out of the build.
    #[must_use]
    pub fn is_excluded(&self, path: &Path) -> bool {
        self.matching_pattern(path).is_some()
    }
}
