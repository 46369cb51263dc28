//! Legend entries for the names currently on the chart.

use crate::chart::color::Rgb;

/// One legend row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    pub name: String,
    pub color: Rgb,
}

/// Ordered legend rows plus label styling.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Legend {
    pub entries: Vec<LegendEntry>,
    /// Label fill, chosen to stay readable on the page background.
    pub text_color: Rgb,
}

impl Legend {
    pub fn color_of(&self, name: &str) -> Option<Rgb> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.color)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }
}
