//! Colors and the cumulative ordinal color scale.
//!
//! # Invariants
//! - A name keeps the palette slot it was first assigned for the life of
//!   the scale; removing every expense with that name does not free it.
//! - Slots wrap around the palette once it is exhausted.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};

/// ColorBrewer Set2 categorical palette.
pub const SET2: [&str; 8] = [
    "#66c2a5", "#fc8d62", "#8da0cb", "#e78ac3", "#a6d854", "#ffd92f", "#e5c494", "#b3b3b3",
];

/// 8-bit sRGB color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Self = Self::new(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses any CSS color string (`#333`, `white`, `rgb(1, 2, 3)`, ...).
    /// Alpha is dropped.
    pub fn parse(value: &str) -> Option<Self> {
        let [r, g, b, _] = csscolorparser::parse(value.trim()).ok()?.to_rgba8();
        Some(Self::new(r, g, b))
    }

    /// Per-channel linear blend; `t` is clamped to `[0, 1]`.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        Self::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

impl Display for Rgb {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Name-to-color scale with an append-only domain.
#[derive(Debug, Clone)]
pub struct OrdinalColorScale {
    palette: Vec<Rgb>,
    slots: HashMap<String, usize>,
    domain: Vec<String>,
}

impl OrdinalColorScale {
    /// Builds a scale from a palette.
    ///
    /// Unparseable entries are skipped; an empty result falls back to Set2.
    pub fn new<S: AsRef<str>>(palette: &[S]) -> Self {
        let mut parsed: Vec<Rgb> = palette.iter().filter_map(|c| Rgb::parse(c.as_ref())).collect();
        if parsed.is_empty() {
            parsed = SET2.iter().filter_map(|c| Rgb::parse(c)).collect();
        }
        Self {
            palette: parsed,
            slots: HashMap::new(),
            domain: Vec::new(),
        }
    }

    /// Registers every name not seen before, in iteration order.
    pub fn extend<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        for name in names {
            self.slot_for(name);
        }
    }

    /// Returns the color for `name`, registering it on first use.
    pub fn color(&mut self, name: &str) -> Rgb {
        let slot = self.slot_for(name);
        self.palette[slot % self.palette.len()]
    }

    /// Color for a name already in the domain.
    pub fn peek(&self, name: &str) -> Option<Rgb> {
        self.slots
            .get(name)
            .map(|slot| self.palette[slot % self.palette.len()])
    }

    /// Every name ever registered, in first-seen order.
    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    fn slot_for(&mut self, name: &str) -> usize {
        if let Some(slot) = self.slots.get(name) {
            return *slot;
        }
        let slot = self.domain.len();
        self.domain.push(name.to_string());
        self.slots.insert(name.to_string(), slot);
        slot
    }
}

impl Default for OrdinalColorScale {
    fn default() -> Self {
        Self::new(&SET2[..])
    }
}

#[cfg(test)]
mod tests {
    use super::{OrdinalColorScale, Rgb, SET2};

    #[test]
    fn parse_accepts_css_colors() {
        assert_eq!(Rgb::parse("#333"), Some(Rgb::new(0x33, 0x33, 0x33)));
        assert_eq!(Rgb::parse("#66c2a5"), Some(Rgb::new(0x66, 0xc2, 0xa5)));
        assert_eq!(Rgb::parse("white"), Some(Rgb::new(255, 255, 255)));
        assert_eq!(Rgb::parse(" black "), Some(Rgb::new(0, 0, 0)));
        assert_eq!(Rgb::parse("rgb(10, 20, 30)"), Some(Rgb::new(10, 20, 30)));
        assert_eq!(Rgb::parse("#12345"), None);
        assert_eq!(Rgb::parse("not-a-color"), None);
        assert_eq!(Rgb::new(0x66, 0xc2, 0xa5).to_string(), "#66c2a5");
    }

    #[test]
    fn lerp_hits_endpoints_and_midpoint() {
        let black = Rgb::new(0, 0, 0);
        let white = Rgb::new(255, 255, 255);
        assert_eq!(black.lerp(white, 0.0), black);
        assert_eq!(black.lerp(white, 1.0), white);
        assert_eq!(black.lerp(white, 0.5), Rgb::new(128, 128, 128));
    }

    #[test]
    fn same_names_get_same_colors_across_calls() {
        let mut scale = OrdinalColorScale::default();
        let first: Vec<_> = ["Rent", "Food", "Rent"].iter().map(|n| scale.color(n)).collect();
        let second: Vec<_> = ["Rent", "Food", "Rent"].iter().map(|n| scale.color(n)).collect();
        assert_eq!(first, second);
        assert_eq!(first[0], first[2]);
        assert_eq!(first[0].to_string(), SET2[0]);
        assert_eq!(first[1].to_string(), SET2[1]);
    }

    #[test]
    fn slots_are_never_reclaimed_and_wrap() {
        let mut scale = OrdinalColorScale::default();
        let names: Vec<String> = (0..9).map(|i| format!("n{i}")).collect();
        scale.extend(names.iter().map(String::as_str));
        assert_eq!(scale.color("n8"), scale.color("n0"));
        assert_eq!(scale.domain().len(), 9);
        assert_eq!(scale.peek("n1").unwrap().to_string(), SET2[1]);
        assert_eq!(scale.peek("missing"), None);
    }
}
