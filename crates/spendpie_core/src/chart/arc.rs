//! Donut arc path generation.
//!
//! Produces SVG path data relative to the chart center. Angle `0` points up
//! and angles grow clockwise, so a point sits at `(r·sin a, -r·cos a)`.

use crate::chart::pie::Span;
use std::f64::consts::{PI, TAU};
use std::fmt::Write;

const EPSILON: f64 = 1e-9;

/// Annulus sector generator with fixed radii.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcGenerator {
    pub inner_radius: f64,
    pub outer_radius: f64,
}

impl ArcGenerator {
    pub fn new(inner_radius: f64, outer_radius: f64) -> Self {
        Self {
            inner_radius: inner_radius.min(outer_radius).max(0.0),
            outer_radius: outer_radius.max(0.0),
        }
    }

    /// SVG `d` attribute for the sector covering `span`.
    pub fn path(&self, span: Span) -> String {
        let (a0, a1) = if span.end >= span.start {
            (span.start, span.end)
        } else {
            (span.end, span.start)
        };
        let width = a1 - a0;
        let (ro, ri) = (self.outer_radius, self.inner_radius);
        let mut d = String::new();

        if width <= EPSILON {
            let (ox, oy) = point(ro, a0);
            let (ix, iy) = point(ri, a0);
            let _ = write!(d, "M{},{}L{},{}Z", num(ox), num(oy), num(ix), num(iy));
            return d;
        }

        if width >= TAU - EPSILON {
            ring(&mut d, ro, true);
            if ri > EPSILON {
                ring(&mut d, ri, false);
            }
            d.push('Z');
            return d;
        }

        let large_arc = u8::from(width > PI);
        let (x0, y0) = point(ro, a0);
        let (x1, y1) = point(ro, a1);
        let _ = write!(
            d,
            "M{},{}A{},{},0,{},1,{},{}",
            num(x0),
            num(y0),
            num(ro),
            num(ro),
            large_arc,
            num(x1),
            num(y1)
        );

        if ri > EPSILON {
            let (x2, y2) = point(ri, a1);
            let (x3, y3) = point(ri, a0);
            let _ = write!(
                d,
                "L{},{}A{},{},0,{},0,{},{}Z",
                num(x2),
                num(y2),
                num(ri),
                num(ri),
                large_arc,
                num(x3),
                num(y3)
            );
        } else {
            d.push_str("L0,0Z");
        }
        d
    }

    /// Point at the middle of the band, used to anchor tooltips.
    pub fn centroid(&self, span: Span) -> (f64, f64) {
        point((self.inner_radius + self.outer_radius) / 2.0, span.mid_angle())
    }
}

fn ring(d: &mut String, r: f64, clockwise: bool) {
    let sweep = u8::from(clockwise);
    let (r_text, top, bottom) = (num(r), num(-r), num(r));
    let _ = write!(
        d,
        "M0,{top}A{r_text},{r_text},0,1,{sweep},0,{bottom}A{r_text},{r_text},0,1,{sweep},0,{top}"
    );
}

fn point(radius: f64, angle: f64) -> (f64, f64) {
    (radius * angle.sin(), -radius * angle.cos())
}

/// Formats a coordinate with at most three decimals and no negative zero.
fn num(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    let text = format!("{rounded:.3}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
