//! Feature records shown on the Features tab.

use serde::Serialize;

/// Number of columns the feature grid lays out in.
pub const GRID_COLUMNS: usize = 2;

/// One card of the feature grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureRecord {
    /// Stable ordering key.
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    /// Display glyph.
    pub icon: &'static str,
    /// Display color token.
    pub color: &'static str,
}

static FEATURES: [FeatureRecord; 4] = [
    FeatureRecord {
        id: 1,
        title: "Cross-Platform",
        description: "Write once, run on iOS and Android",
        icon: "📱",
        color: "#667eea",
    },
    FeatureRecord {
        id: 2,
        title: "Native Performance",
        description: "Bridge to native modules for optimal speed",
        icon: "⚡",
        color: "#764ba2",
    },
    FeatureRecord {
        id: 3,
        title: "Hot Reloading",
        description: "See changes instantly during development",
        icon: "🔥",
        color: "#f093fb",
    },
    FeatureRecord {
        id: 4,
        title: "Rich Ecosystem",
        description: "Vast library of third-party packages",
        icon: "🌟",
        color: "#4facfe",
    },
];

/// All feature records, ordered by id.
#[must_use]
pub fn features() -> &'static [FeatureRecord] {
    &FEATURES
}
