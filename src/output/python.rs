//! Script for Python's standard `turtle` module
//!
//! The generated script sizes the window to the aspect ratio of the world
//! bounds, draws at full speed with batched screen updates and leaves the
//! window open when done.

use crate::drawing::{Drawing, Shape, WorldBounds};
use crate::turtle::{replay, Turtle};

use super::{comment_text, fmt_num};

/// Screen updates are batched over this many drawing steps
const TRACER_BATCH: u32 = 10;

/// Writes a runnable Python turtle script
#[derive(Debug, Default)]
pub struct PythonWriter {
    lines: Vec<String>,
    /// `begin_fill` is deferred until the shape's first position is reached
    fill_pending: bool,
}

impl PythonWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render a whole drawing as a script
    pub fn render(drawing: &Drawing) -> String {
        let mut writer = Self::new();
        writer.add_prelude(&drawing.world);
        for shape in &drawing.shapes {
            writer.add_shape(shape);
        }
        writer.add_epilogue();
        writer.finish()
    }

    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn add_prelude(&mut self, world: &WorldBounds) {
        let aspect = world.aspect();
        self.push("import turtle as t");
        self.push("");
        self.push("window = t.Screen()");
        self.push("side = min(window.window_width(), window.window_height())");
        // Longer world side spans the full window side; the ratio keeps full
        // precision so thin worlds never round to zero
        if aspect > 1.0 {
            self.push(format!(
                "window.setup(side, max(1, round(side * {})))",
                1.0 / aspect
            ));
        } else {
            self.push(format!(
                "window.setup(max(1, round(side * {})), side)",
                aspect
            ));
        }
        self.push("t.reset()");
        self.push("t.speed(0)");
        self.push(format!(
            "t.setworldcoordinates({}, {}, {}, {})",
            fmt_num(world.min_x),
            fmt_num(world.min_y),
            fmt_num(world.max_x),
            fmt_num(world.max_y)
        ));
        self.push(format!("t.tracer(n={}, delay=0)", TRACER_BATCH));
    }

    pub fn add_shape(&mut self, shape: &Shape) {
        let style = &shape.style;
        let pen = style.pen_color();
        let fill = style.fill_color();

        self.push("");
        if let Some(id) = &shape.id {
            self.push(format!("# {}", comment_text(id)));
        }
        self.push(format!("t.pensize({})", fmt_num(style.pen_width())));
        self.push(format!(
            "t.color({}, {})",
            py_str(pen),
            py_str(fill.unwrap_or(pen))
        ));

        self.fill_pending = fill.is_some();
        replay(&shape.commands, self);
        if fill.is_some() && !self.fill_pending {
            self.push("t.end_fill()");
        }
        self.fill_pending = false;
        self.push("t.penup()");
    }

    pub fn add_epilogue(&mut self) {
        self.push("");
        self.push("t.tracer(n=1, delay=0)");
        self.push("t.penup()");
        self.push("t.done()");
    }

    pub fn finish(self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}

impl Turtle for PythonWriter {
    fn pen_up(&mut self) {
        self.push("t.penup()");
    }

    fn pen_down(&mut self) {
        self.push("t.pendown()");
    }

    fn goto(&mut self, x: f64, y: f64) {
        self.push(format!("t.goto({}, {})", fmt_num(x), fmt_num(y)));
        if self.fill_pending {
            self.push("t.begin_fill()");
            self.fill_pending = false;
        }
    }

    fn set_heading(&mut self, degrees: f64) {
        self.push(format!("t.setheading({})", fmt_num(degrees)));
    }
}

/// Quote a color for a Python string literal
fn py_str(value: &str) -> String {
    format!("{:?}", value)
}
