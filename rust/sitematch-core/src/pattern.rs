//! Site pattern descriptors and the default table.

use serde::{Deserialize, Serialize};

/// Token of the catch-all pattern. It is never searched for in a destination.
pub const FALLBACK_TOKEN: &str = "external-default";

// =============================================================================
// SitePattern
// =============================================================================

/// Static descriptor for a known destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SitePattern {
    /// Substring or scheme prefix to find in an href ("github.com", "mailto:")
    pub token: String,
    /// Decorative glyph
    pub icon: String,
    /// Human-readable site name
    pub label: String,
    /// Brand colour, any CSS colour value
    pub color: String,
}

impl SitePattern {
    pub fn new(token: &str, icon: &str, label: &str, color: &str) -> Self {
        Self {
            token: token.to_string(),
            icon: icon.to_string(),
            label: label.to_string(),
            color: color.to_string(),
        }
    }

    /// True for the catch-all entry
    pub fn is_fallback(&self) -> bool {
        self.token == FALLBACK_TOKEN
    }
}

// =============================================================================
// Default Table
// =============================================================================

/// The theme's pattern table. Order is significant: earlier entries win.
pub fn default_patterns() -> Vec<SitePattern> {
    vec![
        SitePattern::new("github.com", "🐙", "GitHub", "hsl(210, 12%, 16%)"),
        SitePattern::new("twitter.com", "🗑️", "Twitter/X (dumpster fire)", "hsl(203, 89%, 53%)"),
        SitePattern::new("x.com", "🗑️", "Twitter/X (dumpster fire)", "hsl(203, 89%, 53%)"),
        SitePattern::new("linkedin.com", "💼", "LinkedIn", "hsl(210, 90%, 40%)"),
        SitePattern::new("instagram.com", "📸", "Instagram", "hsl(340, 75%, 54%)"),
        SitePattern::new("youtube.com", "📺", "YouTube", "hsl(0, 100%, 50%)"),
        SitePattern::new("twitch.tv", "🎥", "Twitch", "hsl(261, 43%, 45%)"),
        SitePattern::new("discord.com", "👾", "Discord", "hsl(235, 86%, 65%)"),
        SitePattern::new("reddit.com", "👽", "Reddit", "hsl(16, 100%, 50%)"),
        SitePattern::new("bsky.app", "🦋", "Bluesky", "hsl(203, 89%, 53%)"),
        SitePattern::new("spotify.com", "🎵", "Spotify", "hsl(141, 73%, 42%)"),
        SitePattern::new("lu.ma", "🎟️", "Lu.ma Events", "hsl(280, 87%, 65%)"),
        SitePattern::new("mailto:", "✉️", "Email", "hsl(345, 83%, 56%)"),
        SitePattern::new(".rss", "📡", "RSS Feed", "hsl(25, 86%, 64%)"),
        SitePattern::new("mastodon", "🐘", "Mastodon", "hsl(282, 56%, 55%)"),
        SitePattern::new("substack.com", "📝", "Substack", "hsl(40, 100%, 50%)"),
        SitePattern::new("medium.com", "📚", "Medium", "hsl(0, 0%, 0%)"),
        SitePattern::new(FALLBACK_TOKEN, "🔗", "External Link", "hsl(240, 100%, 47%)"),
    ]
}
