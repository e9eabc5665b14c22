//! SiteRegistry: first-match-wins lookup over an ordered pattern table.
//!
//! Every non-fallback token is compiled into one Aho-Corasick automaton and
//! searched with overlapping semantics, so all tokens present in a destination
//! are seen in a single pass. The winner is the token with the LOWEST table
//! index, not the leftmost or the longest occurrence.

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use serde::Serialize;

use crate::pattern::{default_patterns, SitePattern};

// =============================================================================
// Errors
// =============================================================================

/// Pattern table validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryError {
    MissingFallback,
    DuplicateFallback(usize),
    EmptyToken(usize),
    Build(String),
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::MissingFallback => write!(f, "Pattern table has no fallback entry"),
            RegistryError::DuplicateFallback(count) => {
                write!(f, "Pattern table has {} fallback entries, expected exactly one", count)
            }
            RegistryError::EmptyToken(index) => write!(f, "Pattern {} has an empty token", index),
            RegistryError::Build(msg) => write!(f, "Failed to build automaton: {}", msg),
        }
    }
}

impl std::error::Error for RegistryError {}

// =============================================================================
// SiteMatch
// =============================================================================

/// Result of a lookup
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SiteMatch<'a> {
    /// Position of the winning pattern in the table
    pub index: usize,
    pub pattern: &'a SitePattern,
    pub is_fallback: bool,
}

// =============================================================================
// SiteRegistry
// =============================================================================

/// Immutable, shared pattern table
#[derive(Debug, Clone)]
pub struct SiteRegistry {
    patterns: Vec<SitePattern>,
    fallback_index: usize,
    /// None when the table holds only the fallback
    automaton: Option<AhoCorasick>,
    /// Automaton pattern id -> table index
    table_index: Vec<usize>,
}

impl Default for SiteRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl SiteRegistry {
    /// Validate and compile a pattern table
    pub fn new(patterns: Vec<SitePattern>) -> Result<Self, RegistryError> {
        let fallbacks: Vec<usize> = patterns
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_fallback())
            .map(|(i, _)| i)
            .collect();

        let fallback_index = match fallbacks.as_slice() {
            [] => return Err(RegistryError::MissingFallback),
            [only] => *only,
            many => return Err(RegistryError::DuplicateFallback(many.len())),
        };

        let mut tokens: Vec<&str> = Vec::with_capacity(patterns.len());
        let mut table_index: Vec<usize> = Vec::with_capacity(patterns.len());
        for (i, pattern) in patterns.iter().enumerate() {
            if pattern.token.is_empty() {
                return Err(RegistryError::EmptyToken(i));
            }
            if i != fallback_index {
                tokens.push(pattern.token.as_str());
                table_index.push(i);
            }
        }

        let automaton = if tokens.is_empty() {
            None
        } else {
            // Standard semantics are required for overlapping search
            let built = AhoCorasickBuilder::new()
                .match_kind(MatchKind::Standard)
                .build(&tokens)
                .map_err(|e| RegistryError::Build(e.to_string()))?;
            Some(built)
        };

        Ok(Self {
            patterns,
            fallback_index,
            automaton,
            table_index,
        })
    }

    /// Registry over the theme's default table
    pub fn with_defaults() -> Self {
        let patterns = default_patterns();
        let fallback_index = patterns.len() - 1;
        let table_index: Vec<usize> = (0..fallback_index).collect();
        let automaton = AhoCorasickBuilder::new()
            .match_kind(MatchKind::Standard)
            .build(patterns[..fallback_index].iter().map(|p| p.token.as_str()))
            .ok();

        Self {
            patterns,
            fallback_index,
            automaton,
            table_index,
        }
    }

    /// Lowest-index non-fallback pattern whose token occurs in `haystack`
    pub fn find(&self, haystack: &str) -> Option<SiteMatch<'_>> {
        let automaton = self.automaton.as_ref()?;

        let mut best: Option<usize> = None;
        for mat in automaton.find_overlapping_iter(haystack) {
            let index = self.table_index[mat.pattern().as_usize()];
            if best.map_or(true, |b| index < b) {
                best = Some(index);
                if index == 0 {
                    break;
                }
            }
        }

        best.map(|index| SiteMatch {
            index,
            pattern: &self.patterns[index],
            is_fallback: false,
        })
    }

    /// Total lookup: `find`, or the fallback pattern
    pub fn lookup(&self, haystack: &str) -> SiteMatch<'_> {
        self.find(haystack).unwrap_or_else(|| self.fallback_match())
    }

    pub fn fallback(&self) -> &SitePattern {
        &self.patterns[self.fallback_index]
    }

    fn fallback_match(&self) -> SiteMatch<'_> {
        SiteMatch {
            index: self.fallback_index,
            pattern: self.fallback(),
            is_fallback: true,
        }
    }

    pub fn patterns(&self) -> &[SitePattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
