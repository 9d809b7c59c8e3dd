//! Paint style of path elements
//!
//! Only the properties a turtle can reproduce are tracked: fill, stroke and
//! stroke width. Values come from presentation attributes and the inline
//! `style` attribute and are inherited from ancestor elements.

use tracing::debug;

use super::colors::named_color;

/// Pen color used when nothing else applies
pub const BLACK: &str = "#000000";

/// A paint value as understood by the turtle backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Paint {
    /// `none` or `transparent`
    None,
    /// `#rrggbb` or `#rgb`
    Color(String),
}

impl Paint {
    /// Parse an SVG paint value.
    ///
    /// Named colors and `rgb(r, g, b)` are converted to hex. Paint servers
    /// (`url(...)`), `currentColor` and other unsupported values fall back
    /// to black.
    pub fn parse(value: &str) -> Paint {
        let lower = value.trim().to_ascii_lowercase();

        if lower == "none" || lower == "transparent" {
            return Paint::None;
        }
        if let Some(hex) = lower.strip_prefix('#') {
            if matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Paint::Color(lower);
            }
        }
        if let Some(color) = parse_rgb(&lower) {
            return Paint::Color(color);
        }
        if let Some(hex) = named_color(&lower) {
            return Paint::Color(hex.to_string());
        }

        debug!(value, "unsupported paint, using black");
        Paint::Color(BLACK.to_string())
    }

    pub fn color(&self) -> Option<&str> {
        match self {
            Paint::None => None,
            Paint::Color(c) => Some(c.as_str()),
        }
    }
}

/// `rgb(r, g, b)` with integer or percentage channels
fn parse_rgb(value: &str) -> Option<String> {
    let inner = value.strip_prefix("rgb(")?.strip_suffix(')')?;
    let channels: Vec<u8> = inner
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| {
            if let Some(pct) = s.strip_suffix('%') {
                pct.parse::<f64>()
                    .ok()
                    .map(|p| (p.clamp(0.0, 100.0) * 2.55).round() as u8)
            } else {
                s.parse::<f64>().ok().map(|v| v.clamp(0.0, 255.0).round() as u8)
            }
        })
        .collect::<Option<Vec<_>>>()?;

    match channels.as_slice() {
        [r, g, b] => Some(format!("#{:02x}{:02x}{:02x}", r, g, b)),
        _ => None,
    }
}

/// Resolved paint style of one path element
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PaintStyle {
    pub fill: Option<Paint>,
    pub stroke: Option<Paint>,
    pub stroke_width: Option<f64>,
}

impl PaintStyle {
    /// Apply one element's presentation attributes, then its `style`
    /// declarations, on top of the inherited style
    pub fn apply_element(&mut self, node: roxmltree::Node<'_, '_>) {
        for name in ["fill", "stroke", "stroke-width"] {
            if let Some(value) = node.attribute(name) {
                self.set(name, value);
            }
        }
        if let Some(style) = node.attribute("style") {
            for declaration in style.split(';') {
                if let Some((key, value)) = declaration.split_once(':') {
                    self.set(key.trim(), value.trim());
                }
            }
        }
    }

    fn set(&mut self, property: &str, value: &str) {
        // Keep the inherited value
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("inherit") {
            return;
        }
        match property {
            "fill" => self.fill = Some(Paint::parse(value)),
            "stroke" => self.stroke = Some(Paint::parse(value)),
            "stroke-width" => {
                if let Some(width) = super::parse_length(value) {
                    self.stroke_width = Some(width);
                }
            }
            _ => {}
        }
    }

    /// Fill color, if the shape is filled
    pub fn fill_color(&self) -> Option<&str> {
        self.fill.as_ref().and_then(Paint::color)
    }

    /// Pen color: the stroke, else the fill, else black
    pub fn pen_color(&self) -> &str {
        let stroke = match &self.stroke {
            Some(paint) => paint.color(),
            None => None,
        };
        stroke.or_else(|| self.fill_color()).unwrap_or(BLACK)
    }

    /// Pen width, defaulting to 1
    pub fn pen_width(&self) -> f64 {
        self.stroke_width.unwrap_or(1.0)
    }
}
