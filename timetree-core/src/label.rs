//! TimeTree label ids and their lookup tables.
//!
//! TimeTree tags every event with a `label_id` in `1..=9`, sent as a string.
//! Three independent tables key off it: the palette used for the exported
//! COLOR property, the palette the TimeTree app itself shows, and a
//! human-readable name used for CATEGORIES. They disagree on purpose (label 1
//! is "Red" by name but teal in the app palette) and must not be merged.

use std::fmt;

/// Palette used for the exported COLOR property.
const EXPORT_COLORS: [&str; 9] = [
    "#FF6B6B", // Red
    "#4ECDC4", // Teal
    "#45B7D1", // Blue
    "#96CEB4", // Green
    "#FFEAA7", // Yellow
    "#DDA0DD", // Plum
    "#FFB347", // Orange
    "#98D8C8", // Mint
    "#F7DC6F", // Light Yellow
];

/// Palette of the TimeTree app.
const APP_COLORS: [&str; 9] = [
    "#08808F", // Teal
    "#6C5E58", // Grey
    "#1963A4", // Blue
    "#AF3D19", // Deep Orange
    "#2C377C", // Dark Blue
    "#A62E2E", // Plum
    "#681D7B", // Orchid
    "#B46604", // Orange
    "#5B8232", // Green
];

const CATEGORY_NAMES: [&str; 9] = [
    "Red",
    "Teal",
    "Blue",
    "Green",
    "Yellow",
    "Plum",
    "Orange",
    "Mint",
    "Light Yellow",
];

/// A validated TimeTree label id (always within `1..=9`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Label(u8);

impl Label {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 9;

    /// Parse a raw `label_id`. Returns `None` for anything that is not an
    /// integer in `1..=9`.
    pub fn parse(raw: &str) -> Option<Self> {
        let id: i64 = raw.trim().parse().ok()?;
        Self::from_id(id)
    }

    pub fn from_id(id: i64) -> Option<Self> {
        u8::try_from(id)
            .ok()
            .filter(|id| (Self::MIN..=Self::MAX).contains(id))
            .map(Label)
    }

    pub fn id(self) -> u8 {
        self.0
    }

    fn index(self) -> usize {
        usize::from(self.0 - Self::MIN)
    }

    /// Hex color written to the exported COLOR property.
    pub fn export_color(self) -> &'static str {
        EXPORT_COLORS[self.index()]
    }

    /// Hex color the TimeTree app uses for this label.
    pub fn app_color(self) -> &'static str {
        APP_COLORS[self.index()]
    }

    /// Human-readable name, suitable for CATEGORIES.
    pub fn category_name(self) -> &'static str {
        CATEGORY_NAMES[self.index()]
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_one_through_nine() {
        for id in 1..=9 {
            let label = Label::parse(&id.to_string()).expect("label in range");
            assert_eq!(label.id(), id);
        }
    }

    #[test]
    fn test_parse_rejects_out_of_range_and_garbage() {
        assert_eq!(Label::parse("0"), None);
        assert_eq!(Label::parse("10"), None);
        assert_eq!(Label::parse("-3"), None);
        assert_eq!(Label::parse("invalid"), None);
        assert_eq!(Label::parse(""), None);
        assert_eq!(Label::parse("3.5"), None);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(Label::parse(" 4 ").map(Label::id), Some(4));
    }

    #[test]
    fn test_tables_stay_distinct() {
        let first = Label::parse("1").unwrap();
        assert_eq!(first.export_color(), "#FF6B6B");
        assert_eq!(first.app_color(), "#08808F");
        assert_eq!(first.category_name(), "Red");

        let last = Label::parse("9").unwrap();
        assert_eq!(last.export_color(), "#F7DC6F");
        assert_eq!(last.app_color(), "#5B8232");
        assert_eq!(last.category_name(), "Light Yellow");
    }
}
