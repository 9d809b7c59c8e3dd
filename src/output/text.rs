//! Plain command listing

use crate::drawing::{Drawing, Shape};
use crate::turtle::{replay, Turtle};

use super::{comment_text, fmt_num};

/// Writes one turtle command per line
#[derive(Debug, Default)]
pub struct TextWriter {
    lines: Vec<String>,
}

impl TextWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render a whole drawing: the world line, then each shape
    pub fn render(drawing: &Drawing) -> String {
        let mut writer = Self::new();
        let w = &drawing.world;
        writer.lines.push(format!(
            "world {} {} {} {}",
            fmt_num(w.min_x),
            fmt_num(w.min_y),
            fmt_num(w.max_x),
            fmt_num(w.max_y)
        ));
        for shape in &drawing.shapes {
            writer.add_shape(shape);
        }
        writer.finish()
    }

    pub fn add_shape(&mut self, shape: &Shape) {
        let style = &shape.style;
        self.lines.push(format!(
            "# shape {} stroke={} fill={} width={}",
            shape.id.as_deref().map_or_else(|| "-".to_string(), comment_text),
            style.pen_color(),
            style.fill_color().unwrap_or("none"),
            fmt_num(style.pen_width())
        ));
        replay(&shape.commands, self);
    }

    pub fn finish(self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}

impl Turtle for TextWriter {
    fn pen_up(&mut self) {
        self.lines.push("penup".to_string());
    }

    fn pen_down(&mut self) {
        self.lines.push("pendown".to_string());
    }

    fn goto(&mut self, x: f64, y: f64) {
        self.lines.push(format!("goto {} {}", fmt_num(x), fmt_num(y)));
    }

    fn set_heading(&mut self, degrees: f64) {
        self.lines.push(format!("setheading {}", fmt_num(degrees)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Paint, PaintStyle};
    use crate::drawing::WorldBounds;
    use crate::geometry::Point;
    use crate::turtle::TurtleCommand;

    #[test]
    fn test_render_listing() {
        let drawing = Drawing {
            world: WorldBounds {
                min_x: -1.0,
                min_y: -11.0,
                max_x: 11.0,
                max_y: 1.0,
            },
            shapes: vec![Shape {
                id: Some("tri".to_string()),
                style: PaintStyle {
                    fill: Some(Paint::Color("#ff0000".to_string())),
                    stroke: None,
                    stroke_width: Some(2.5),
                },
                commands: vec![
                    TurtleCommand::PenUp,
                    TurtleCommand::MoveTo(Point::new(0.0, -0.0)),
                    TurtleCommand::PenDown,
                    TurtleCommand::SetHeading(0.0),
                    TurtleCommand::MoveTo(Point::new(10.0, 0.0)),
                    TurtleCommand::SetHeading(225.0),
                    TurtleCommand::MoveTo(Point::new(0.0, -10.0 / 3.0)),
                ],
            }],
        };

        insta::assert_snapshot!(TextWriter::render(&drawing).trim_end(), @r###"
        world -1 -11 11 1
        # shape tri stroke=#ff0000 fill=#ff0000 width=2.5
        penup
        goto 0 0
        pendown
        setheading 0
        goto 10 0
        setheading 225
        goto 0 -3.333
        "###);
    }

    #[test]
    fn test_anonymous_shape_header() {
        let mut writer = TextWriter::new();
        writer.add_shape(&Shape {
            id: None,
            style: PaintStyle::default(),
            commands: vec![],
        });
        assert_eq!(writer.finish(), "# shape - stroke=#000000 fill=none width=1\n");
    }

    #[test]
    fn test_id_with_line_break_stays_in_header() {
        let mut writer = TextWriter::new();
        writer.add_shape(&Shape {
            id: Some("a\npendown".to_string()),
            style: PaintStyle::default(),
            commands: vec![],
        });
        let listing = writer.finish();
        assert_eq!(listing.lines().count(), 1);
        assert!(listing.starts_with("# shape a\\npendown stroke="));
    }
}
