//! Exclude pattern matching with `globset`.
//!
//! Patterns containing glob syntax (`*`, `?`, `[`, `{`) are matched as globs
//! against the whole path. Plain patterns match the path itself and anything
//! below it, so `Assets/Generated` excludes `Assets/Generated/mesh.asset`.
//! The compiled set is kept until a different pattern list comes in.

use crate::core::collaborators::PathMatcher;
use crate::core::error::OverlayError;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::cell::RefCell;

const GLOB_CHARS: &[char] = &['*', '?', '[', '{'];

#[derive(Debug, Default)]
pub struct GlobPathMatcher {
    compiled: RefCell<Option<(Vec<String>, GlobSet)>>,
}

impl GlobPathMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile every usable pattern into one set.
    ///
    /// An invalid pattern is left out of the set and reported in the returned
    /// errors; the remaining patterns still apply.
    pub fn compile(patterns: &[String]) -> (GlobSet, Vec<OverlayError>) {
        let mut builder = GlobSetBuilder::new();
        let mut errors = Vec::new();
        for pattern in patterns {
            let pattern = normalize(pattern);
            if pattern.is_empty() {
                continue;
            }
            match globs_for(pattern) {
                Ok(globs) => {
                    for glob in globs {
                        builder.add(glob);
                    }
                }
                Err(e) => errors.push(OverlayError::invalid_exclude_pattern(pattern, e)),
            }
        }

        let set = builder.build().unwrap_or_else(|e| {
            errors.push(OverlayError::invalid_exclude_pattern(patterns.join(", "), e));
            GlobSet::empty()
        });
        (set, errors)
    }
}

impl PathMatcher for GlobPathMatcher {
    fn should_exclude(&self, patterns: &[String], path: &str) -> bool {
        let mut compiled = self.compiled.borrow_mut();
        let stale =
            !matches!(compiled.as_ref(), Some((cached, _)) if cached.as_slice() == patterns);
        if stale {
            let (set, errors) = Self::compile(patterns);
            for e in errors {
                log::warn!("Ignoring exclude pattern: {e}");
            }
            *compiled = Some((patterns.to_vec(), set));
        }

        compiled
            .as_ref()
            .is_some_and(|(_, set)| set.is_match(normalize(path)))
    }
}

/// Globs of one pattern: itself when it has glob syntax, else itself and its subtree
fn globs_for(pattern: &str) -> std::result::Result<Vec<Glob>, globset::Error> {
    if pattern.contains(GLOB_CHARS) {
        Ok(vec![Glob::new(pattern)?])
    } else {
        [pattern.to_string(), format!("{pattern}/**")]
            .iter()
            .map(|glob| Glob::new(glob))
            .collect()
    }
}

fn normalize(path: &str) -> &str {
    path.trim().trim_end_matches('/')
}
