//! SVG document reading
//!
//! Collects every `path` element of a document in document order, together
//! with the transform and paint style it inherits from its ancestors, and
//! the canvas geometry declared on the root element.

mod colors;
mod style;
mod transform;

pub use style::{Paint, PaintStyle};
pub use transform::{parse_transform, TransformError};

use std::path::Path;

use tracing::{debug, warn};

use crate::error::InputError;
use crate::geometry::{Point, Transform};

/// Containers whose children are never rendered directly
const NON_RENDERED: &[&str] = &["defs", "clipPath", "mask", "marker", "pattern", "symbol"];

/// The `viewBox` rectangle of the root element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    /// Parse `min-x min-y width height`, separated by whitespace and/or commas
    pub fn parse(value: &str) -> Option<ViewBox> {
        let numbers = value
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<f64>().ok())
            .collect::<Option<Vec<_>>>()?;

        match numbers.as_slice() {
            &[min_x, min_y, width, height]
                if numbers.iter().all(|n| n.is_finite()) && width > 0.0 && height > 0.0 =>
            {
                Some(ViewBox {
                    min_x,
                    min_y,
                    width,
                    height,
                })
            }
            _ => None,
        }
    }
}

/// A `path` element with everything it inherits resolved
#[derive(Debug, Clone, PartialEq)]
pub struct PathElement {
    pub id: Option<String>,
    /// Raw path data from the `d` attribute
    pub data: String,
    /// Accumulated transform of the element and its ancestors
    pub transform: Transform,
    pub style: PaintStyle,
}

impl PathElement {
    /// Name for log messages: the id, or the position in the document
    pub fn label(&self, index: usize) -> String {
        match &self.id {
            Some(id) => format!("#{}", id),
            None => format!("path {}", index + 1),
        }
    }
}

/// The parts of an SVG document that can be drawn by a turtle
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SvgDocument {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub view_box: Option<ViewBox>,
    pub paths: Vec<PathElement>,
}

impl SvgDocument {
    /// Read an SVG file
    pub fn from_file(path: &Path) -> Result<Self, InputError> {
        let content = std::fs::read_to_string(path).map_err(|e| InputError::io(path, e))?;
        Self::from_str(&content)
    }

    /// Parse SVG source text
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, InputError> {
        let doc = roxmltree::Document::parse(content)?;
        let root = doc.root_element();
        if root.tag_name().name() != "svg" {
            return Err(InputError::NotSvg {
                root: root.tag_name().name().to_string(),
            });
        }

        let mut document = SvgDocument {
            width: root.attribute("width").and_then(parse_length),
            height: root.attribute("height").and_then(parse_length),
            view_box: root.attribute("viewBox").and_then(|v| {
                let parsed = ViewBox::parse(v);
                if parsed.is_none() {
                    warn!(view_box = v, "ignoring malformed viewBox");
                }
                parsed
            }),
            paths: Vec::new(),
        };

        collect_paths(
            root,
            Transform::identity(),
            &PaintStyle::default(),
            &mut document.paths,
        );

        debug!(
            paths = document.paths.len(),
            width = ?document.width,
            height = ?document.height,
            view_box = ?document.view_box,
            "read svg document"
        );
        Ok(document)
    }

    /// Canvas rectangle as (top-left, bottom-right) in SVG user space.
    ///
    /// Uses the viewBox, else `0 0 width height`; None when neither is given.
    pub fn canvas_bounds(&self) -> Option<(Point, Point)> {
        if let Some(vb) = self.view_box {
            return Some((
                Point::new(vb.min_x, vb.min_y),
                Point::new(vb.min_x + vb.width, vb.min_y + vb.height),
            ));
        }
        match (self.width, self.height) {
            (Some(w), Some(h)) if w > 0.0 && h > 0.0 => {
                Some((Point::ORIGIN, Point::new(w, h)))
            }
            _ => None,
        }
    }
}

fn collect_paths(
    node: roxmltree::Node<'_, '_>,
    inherited: Transform,
    inherited_style: &PaintStyle,
    out: &mut Vec<PathElement>,
) {
    let transform = match node.attribute("transform") {
        Some(value) => match parse_transform(value) {
            Ok(own) => inherited.then(&own),
            Err(e) => {
                warn!(transform = value, error = %e, "ignoring malformed transform");
                inherited
            }
        },
        None => inherited,
    };

    let mut style = inherited_style.clone();
    style.apply_element(node);

    if node.tag_name().name() == "path" {
        if let Some(data) = node.attribute("d") {
            out.push(PathElement {
                id: node.attribute("id").map(str::to_string),
                data: data.to_string(),
                transform,
                style: style.clone(),
            });
        }
    }

    for child in node.children().filter(|n| n.is_element()) {
        if NON_RENDERED.contains(&child.tag_name().name()) {
            continue;
        }
        collect_paths(child, transform, &style, out);
    }
}

/// Parse a length, stripping an absolute unit suffix.
///
/// Percentages and unknown units yield None.
pub fn parse_length(value: &str) -> Option<f64> {
    let value = value.trim();
    let number = ["px", "pt", "mm", "cm", "in"]
        .iter()
        .find_map(|unit| value.strip_suffix(unit))
        .unwrap_or(value)
        .trim_end();
    number.parse::<f64>().ok().filter(|n| n.is_finite())
}
