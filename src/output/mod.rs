//! Writers that serialize a drawing for a turtle backend
//!
//! Both writers implement [`Turtle`](crate::turtle::Turtle) and are fed with
//! [`replay`](crate::turtle::replay), the same way an in-process backend
//! would be.

pub mod python;
pub mod text;

use serde::Deserialize;

use crate::drawing::Drawing;

pub use python::PythonWriter;
pub use text::TextWriter;

/// Output format of the command writers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One turtle command per line
    #[default]
    Text,
    /// Script for Python's `turtle` module
    Python,
}

/// Serialize a drawing in the given format
pub fn render(drawing: &Drawing, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => TextWriter::render(drawing),
        OutputFormat::Python => PythonWriter::render(drawing),
    }
}

/// Format a coordinate with at most three decimals
pub(crate) fn fmt_num(value: f64) -> String {
    let s = format!("{:.3}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Make an element id safe to place in a single-line comment
pub(crate) fn comment_text(value: &str) -> String {
    value.escape_debug().to_string()
}
