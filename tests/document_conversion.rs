//! Integration tests for converting whole SVG documents

use std::path::Path;

use svg2turtle::{
    convert, convert_file, convert_with_config, render, ConvertConfig, ConvertError, EmitConfig,
    InputError, OutputFormat, Point, Settings, TurtleCommand, WorldBounds,
};

const HOUSE: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="200px" height="100px" viewBox="0 0 200 100">
  <title>House</title>
  <g id="house" fill="#cc3333" stroke="black" stroke-width="2">
    <path id="walls" d="M 50 50 h 100 v 50 h -100 z"/>
    <path id="roof" style="fill: rgb(0, 0, 255)" d="M 40 50 L 100 10 L 160 50 Z"/>
  </g>
  <g transform="translate(150 0) scale(2)">
    <path id="sun" fill="none" stroke="orange" d="M 10 10 h 5"/>
  </g>
  <rect x="0" y="0" width="10" height="10"/>
</svg>"##;

fn last_move(commands: &[TurtleCommand]) -> Option<Point> {
    commands.iter().rev().find_map(|c| match c {
        TurtleCommand::MoveTo(p) => Some(*p),
        _ => None,
    })
}

#[test]
fn test_convert_document() {
    let drawing = convert(HOUSE).expect("Should convert");

    let ids: Vec<_> = drawing
        .shapes
        .iter()
        .map(|s| s.id.as_deref().unwrap_or(""))
        .collect();
    assert_eq!(ids, vec!["walls", "roof", "sun"]);

    let walls = &drawing.shapes[0];
    assert_eq!(walls.style.fill_color(), Some("#cc3333"));
    assert_eq!(walls.style.pen_color(), "#000000");
    assert_eq!(walls.style.pen_width(), 2.0);
    // Closed back to the start, y axis flipped
    assert_eq!(last_move(&walls.commands), Some(Point::new(50.0, -50.0)));

    let roof = &drawing.shapes[1];
    assert_eq!(roof.style.fill_color(), Some("#0000ff"));

    let sun = &drawing.shapes[2];
    assert_eq!(sun.style.fill_color(), None);
    assert_eq!(sun.style.pen_color(), "#ffa500");
    assert_eq!(last_move(&sun.commands), Some(Point::new(180.0, -20.0)));
}

#[test]
fn test_world_bounds_follow_view_box() {
    let drawing = convert(HOUSE).unwrap();
    let world = drawing.world;
    assert!((world.min_x - -4.0).abs() < 1e-9);
    assert!((world.max_x - 204.0).abs() < 1e-9);
    assert!((world.min_y - -102.0).abs() < 1e-9);
    assert!((world.max_y - 2.0).abs() < 1e-9);
}

#[test]
fn test_no_flip_keeps_svg_coordinates() {
    let config = ConvertConfig::new().with_flip_y(false).with_margin(0.0);
    let drawing = convert_with_config(HOUSE, &config).unwrap();
    assert_eq!(
        last_move(&drawing.shapes[2].commands),
        Some(Point::new(180.0, 20.0))
    );
    assert_eq!(
        drawing.world,
        WorldBounds {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 200.0,
            max_y: 100.0
        }
    );
}

#[test]
fn test_text_output() {
    let config = ConvertConfig::new().with_emit(EmitConfig::new().with_fixed_segments(2));
    let drawing = convert_with_config(HOUSE, &config).unwrap();
    let text = render(&drawing, OutputFormat::Text);

    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines[0], "world -4 -102 204 2");
    assert_eq!(lines[1], "# shape walls stroke=#000000 fill=#cc3333 width=2");
    assert_eq!(&lines[2..5], &["penup", "goto 50 -50", "pendown"]);
    assert!(text.contains("# shape sun stroke=#ffa500 fill=none width=1"));
}

#[test]
fn test_python_output() {
    let drawing = convert(HOUSE).unwrap();
    let script = render(&drawing, OutputFormat::Python);

    assert!(script.starts_with("import turtle as t\n"));
    assert!(script.contains("t.setworldcoordinates(-4, -102, 204, 2)"));
    assert!(script.contains("window.setup(side, max(1, round(side * 0.5)))"));
    assert_eq!(script.matches("t.begin_fill()").count(), 2);
    assert_eq!(script.matches("t.end_fill()").count(), 2);
    assert!(script.contains("t.color(\"#ffa500\", \"#ffa500\")"));
    assert!(script.trim_end().ends_with("t.done()"));
}

#[test]
fn test_settings_drive_conversion() {
    let settings = Settings::from_str(
        r#"
        [sampling]
        mode = "fixed"
        segments = 3

        [output]
        headings = true
        margin = 0.0
        "#,
    )
    .unwrap();
    let config = settings.apply(ConvertConfig::default());
    let drawing = convert_with_config(
        r#"<svg width="10" height="10"><path d="M 0 0 Q 5 5 10 0"/></svg>"#,
        &config,
    )
    .unwrap();

    let commands = &drawing.shapes[0].commands;
    let moves = commands
        .iter()
        .filter(|c| matches!(c, TurtleCommand::MoveTo(_)))
        .count();
    assert_eq!(moves, 1 + 3);
    assert!(commands
        .iter()
        .any(|c| matches!(c, TurtleCommand::SetHeading(_))));
}

#[test]
fn test_convert_file() {
    let path = std::env::temp_dir().join(format!("svg2turtle-test-{}.svg", std::process::id()));
    std::fs::write(&path, HOUSE).unwrap();
    let drawing = convert_file(&path, &ConvertConfig::default());
    std::fs::remove_file(&path).unwrap();
    assert_eq!(drawing.unwrap().shapes.len(), 3);
}

#[test]
fn test_missing_file() {
    let err = convert_file(
        Path::new("/nonexistent/drawing.svg"),
        &ConvertConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ConvertError::Input(InputError::Io { .. })));
    assert!(err.to_string().contains("/nonexistent/drawing.svg"));
}

#[test]
fn test_strict_parse_error_renders_report() {
    let err = convert_with_config(
        r#"<svg><path id="broken" d="M 0 0 X 1 1"/></svg>"#,
        &ConvertConfig::new().with_strict(true),
    )
    .unwrap_err();

    match err {
        ConvertError::Parse {
            element,
            data,
            errors,
        } => {
            assert_eq!(element, "#broken");
            let report = errors[0].format(&data, &element);
            assert!(report.contains("Unknown command letter 'X'"));
        }
        other => panic!("Expected parse error, got {:?}", other),
    }
}
