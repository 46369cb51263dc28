//! SVG serialization of a sampled chart frame.

use crate::chart::color::Rgb;
use crate::chart::renderer::ChartFrame;
use crate::chart::tooltip::escape_html;
use crate::config::ChartConfig;
use std::fmt::Write;

/// Label font size; rows are spaced by the swatch diameter plus padding.
const LEGEND_FONT_PX: f64 = 12.0;

impl ChartFrame {
    /// Serializes the frame as a standalone SVG document.
    pub fn to_svg(&self, config: &ChartConfig) -> String {
        let (width, height) = config.canvas_size();
        let (cx, cy) = config.center();
        let (lx, ly) = config.legend_origin();
        let stroke = Rgb::parse(&config.stroke_color).unwrap_or(Rgb::WHITE);
        let mut svg = String::new();

        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}">"#
        );
        let _ = writeln!(svg, r#"  <g transform="translate({cx},{cy})">"#);
        for segment in &self.segments {
            let _ = writeln!(
                svg,
                r#"    <path class="arc" data-id="{}" d="{}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
                escape_html(segment.id.as_str()),
                segment.path,
                segment.fill,
                stroke,
                config.stroke_width
            );
        }
        svg.push_str("  </g>\n");

        let _ = writeln!(svg, r#"  <g class="legend" transform="translate({lx},{ly})">"#);
        let radius = config.legend_shape_radius;
        let row_height = radius * 2.0 + config.legend_shape_padding;
        for (row, entry) in self.legend.entries.iter().enumerate() {
            let y = row as f64 * row_height;
            let _ = writeln!(
                svg,
                r#"    <g class="cell" transform="translate(0,{y})"><circle class="swatch" r="{radius}" fill="{}"/><text class="label" x="{}" y="{}" fill="{}">{}</text></g>"#,
                entry.color,
                radius + 10.0,
                LEGEND_FONT_PX / 3.0,
                self.legend.text_color,
                escape_html(&entry.name)
            );
        }
        svg.push_str("  </g>\n");
        svg.push_str("</svg>\n");
        svg
    }
}
