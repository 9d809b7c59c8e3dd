//! svg2turtle - Replay SVG path artwork with turtle graphics
//!
//! This library reads the `path` elements of an SVG document, parses their
//! path data and translates it into pen-and-turtle primitives (pen up, pen
//! down, go to, set heading) that a turtle backend can execute.
//!
//! # Example
//!
//! ```rust
//! use svg2turtle::{path_to_turtle, EmitConfig, Point, TurtleCommand};
//!
//! let commands = path_to_turtle("M 0 0 L 10 0", &EmitConfig::default()).unwrap();
//! assert_eq!(
//!     commands,
//!     vec![
//!         TurtleCommand::PenUp,
//!         TurtleCommand::MoveTo(Point::new(0.0, 0.0)),
//!         TurtleCommand::PenDown,
//!         TurtleCommand::MoveTo(Point::new(10.0, 0.0)),
//!     ]
//! );
//! ```

pub mod config;
pub mod document;
pub mod drawing;
pub mod error;
pub mod geometry;
pub mod output;
pub mod parser;
pub mod turtle;

use std::path::Path;

use thiserror::Error;
use tracing::{debug, info, warn};

pub use config::{Settings, SettingsError};
pub use document::{PaintStyle, PathElement, SvgDocument};
pub use drawing::{Drawing, Shape, WorldBounds};
pub use error::{InputError, ParseError};
pub use geometry::{Point, Transform};
pub use output::{render, OutputFormat};
pub use parser::{parse as parse_path_data, PathCommand};
pub use turtle::{replay, CursorState, EmitConfig, Emitter, Sampling, Turtle, TurtleCommand};

/// Errors that can occur while converting a document
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Malformed path data, reported in strict mode
    #[error("{}: parse errors: {}", .element, format_parse_errors(.errors))]
    Parse {
        /// Element id, or its position in the document
        element: String,
        /// The offending path data
        data: String,
        errors: Vec<ParseError>,
    },

    /// The document could not be read
    #[error(transparent)]
    Input(#[from] InputError),
}

fn format_parse_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Configuration for converting a whole document
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertConfig {
    /// Curve sampling and heading emission
    pub emit: EmitConfig,
    /// Mirror the y axis so the drawing is upright on a y-up turtle canvas
    pub flip_y: bool,
    /// Fraction of the world size added on every side
    pub margin: f64,
    /// Abort on the first malformed path instead of skipping it
    pub strict: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            emit: EmitConfig::default(),
            flip_y: true,
            margin: 0.02,
            strict: false,
        }
    }
}

impl ConvertConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the emitter configuration
    pub fn with_emit(mut self, emit: EmitConfig) -> Self {
        self.emit = emit;
        self
    }

    /// Enable or disable the y-axis flip
    pub fn with_flip_y(mut self, flip_y: bool) -> Self {
        self.flip_y = flip_y;
        self
    }

    /// Set the world margin fraction
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Enable or disable strict mode
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Translate a single path-data string, starting at the origin
///
/// # Example
///
/// ```rust
/// use svg2turtle::{path_to_turtle, EmitConfig};
///
/// assert!(path_to_turtle("", &EmitConfig::default()).unwrap().is_empty());
/// assert!(path_to_turtle("X 1 1", &EmitConfig::default()).is_err());
/// ```
pub fn path_to_turtle(
    data: &str,
    config: &EmitConfig,
) -> Result<Vec<TurtleCommand>, Vec<ParseError>> {
    let commands = parse_path_data(data)?;
    Ok(turtle::emit(&commands, config))
}

/// Convert SVG source with default configuration
///
/// # Example
///
/// ```rust
/// use svg2turtle::convert;
///
/// let drawing = convert(r#"<svg viewBox="0 0 10 10"><path d="M 0 0 H 10"/></svg>"#).unwrap();
/// assert_eq!(drawing.shapes.len(), 1);
/// ```
pub fn convert(svg: &str) -> Result<Drawing, ConvertError> {
    convert_with_config(svg, &ConvertConfig::default())
}

/// Convert SVG source with custom configuration
///
/// # Example
///
/// ```rust
/// use svg2turtle::{convert_with_config, ConvertConfig, EmitConfig};
///
/// let config = ConvertConfig::new()
///     .with_emit(EmitConfig::new().with_fixed_segments(4))
///     .with_flip_y(false);
///
/// let drawing = convert_with_config(
///     r#"<svg><path d="M 0 0 Q 5 5 10 0"/></svg>"#,
///     &config,
/// ).unwrap();
/// // Pen up, move, pen down, then one move per segment
/// assert_eq!(drawing.shapes[0].commands.len(), 3 + 4);
/// ```
pub fn convert_with_config(svg: &str, config: &ConvertConfig) -> Result<Drawing, ConvertError> {
    let document = SvgDocument::from_str(svg)?;
    convert_document(&document, config)
}

/// Read and convert an SVG file
pub fn convert_file(path: &Path, config: &ConvertConfig) -> Result<Drawing, ConvertError> {
    let document = SvgDocument::from_file(path)?;
    convert_document(&document, config)
}

/// Convert an already parsed document
pub fn convert_document(
    document: &SvgDocument,
    config: &ConvertConfig,
) -> Result<Drawing, ConvertError> {
    let flip = if config.flip_y {
        Transform::flip_y()
    } else {
        Transform::identity()
    };
    let emitter = Emitter::new(config.emit.clone());

    // The turtle keeps its position and heading from one shape to the next
    let mut cursor = CursorState::default();
    let mut shapes = Vec::with_capacity(document.paths.len());
    for (index, element) in document.paths.iter().enumerate() {
        let commands = match parse_path_data(&element.data) {
            Ok(commands) => commands,
            Err(errors) if config.strict => {
                return Err(ConvertError::Parse {
                    element: element.label(index),
                    data: element.data.clone(),
                    errors,
                });
            }
            Err(errors) => {
                warn!(
                    element = %element.label(index),
                    errors = %format_parse_errors(&errors),
                    "skipping path with malformed data"
                );
                continue;
            }
        };

        // Each path starts from the origin of its own coordinate system
        cursor = cursor.next_path();
        let turtle = emitter
            .clone()
            .with_transform(flip.then(&element.transform))
            .emit(&commands, &mut cursor);
        if turtle.is_empty() {
            debug!(element = %element.label(index), "path draws nothing");
            continue;
        }

        shapes.push(Shape {
            id: element.id.clone(),
            style: element.style.clone(),
            commands: turtle,
        });
    }

    let mut drawing = Drawing {
        world: WorldBounds::default(),
        shapes,
    };
    let world = document
        .canvas_bounds()
        .and_then(|(top_left, bottom_right)| {
            WorldBounds::from_corners(top_left, bottom_right, &flip)
        })
        .or_else(|| drawing.bounds())
        .unwrap_or_default();
    drawing.world = world.with_margin(config.margin);

    info!(
        paths = document.paths.len(),
        shapes = drawing.shapes.len(),
        "converted document"
    );
    Ok(drawing)
}
