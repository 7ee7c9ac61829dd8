use std::f64::consts::{FRAC_PI_2, PI, TAU};

use approx::assert_relative_eq;
use chart_cairo::ChartError;
use chart_cairo::core::{Color, FontFace, FontSlant, NormalizedColor};
use chart_cairo::render::{
    Canvas, CanvasCommand, CanvasRenderer, DEFAULT_DPI, RecordingCanvas, Renderer, RendererConfig,
};

fn recording_renderer() -> CanvasRenderer<RecordingCanvas> {
    CanvasRenderer::new(RecordingCanvas::new(), RendererConfig::default()).expect("renderer")
}

#[test]
fn single_line_stroke_issues_exact_command_sequence() {
    let mut renderer = recording_renderer();
    renderer.set_stroke_color(Color::rgba(0, 0, 0, 255));
    renderer.move_to(0.0, 0.0);
    renderer.line_to(10.0, 10.0);
    renderer.stroke().expect("stroke");

    assert_eq!(
        renderer.canvas().commands(),
        vec![
            CanvasCommand::MoveTo { x: 0.0, y: 0.0 },
            CanvasCommand::LineTo { x: 10.0, y: 10.0 },
            CanvasCommand::SetSourceRgba(NormalizedColor::rgba(0.0, 0.0, 0.0, 1.0)),
            CanvasCommand::Stroke,
        ]
    );
}

#[test]
fn fill_stroke_preserves_path_between_paints() {
    let mut renderer = recording_renderer();
    renderer.set_fill_color(Color::rgb(255, 0, 0));
    renderer.set_stroke_color(Color::rgb(0, 0, 255));
    renderer.move_to(0.0, 0.0);
    renderer.line_to(5.0, 0.0);
    renderer.line_to(5.0, 5.0);
    renderer.close();
    renderer.fill_stroke().expect("fill stroke");

    let commands = renderer.canvas().commands();
    let paints: Vec<_> = commands
        .iter()
        .skip_while(|command| !matches!(command, CanvasCommand::SetSourceRgba(_)))
        .cloned()
        .collect();
    assert_eq!(
        paints,
        vec![
            CanvasCommand::SetSourceRgba(NormalizedColor::rgba(1.0, 0.0, 0.0, 1.0)),
            CanvasCommand::FillPreserve,
            CanvasCommand::SetSourceRgba(NormalizedColor::rgba(0.0, 0.0, 1.0, 1.0)),
            CanvasCommand::Stroke,
        ]
    );
}

#[test]
fn fill_uses_fill_color_not_stroke_color() {
    let mut renderer = recording_renderer();
    renderer.set_fill_color(Color::rgba(0, 255, 0, 0));
    renderer.set_stroke_color(Color::BLACK);
    renderer.circle(3.0, 1.0, 1.0);
    renderer.fill().expect("fill");

    let commands = renderer.canvas().commands();
    assert!(commands.contains(&CanvasCommand::SetSourceRgba(NormalizedColor::rgba(
        0.0, 1.0, 0.0, 0.0
    ))));
    assert_eq!(commands.last(), Some(&CanvasCommand::Fill));
}

#[test]
fn circle_starts_a_sub_path_with_a_full_turn() {
    let mut renderer = recording_renderer();
    renderer.circle(4.0, 10.0, 20.0);
    assert_eq!(
        renderer.canvas().commands(),
        vec![
            CanvasCommand::NewSubPath,
            CanvasCommand::Arc {
                xc: 10.0,
                yc: 20.0,
                radius: 4.0,
                angle1: 0.0,
                angle2: TAU,
            },
        ]
    );
}

#[test]
fn quad_curve_uses_current_point_for_first_control() {
    let mut renderer = recording_renderer();
    renderer.move_to(0.0, 0.0);
    renderer.quad_curve_to(30.0, 60.0, 60.0, 0.0).expect("quad");

    let commands = renderer.canvas().commands();
    assert_eq!(
        commands[1],
        CanvasCommand::CurveTo {
            x1: 20.0,
            y1: 40.0,
            x2: 40.0,
            y2: 40.0,
            x3: 60.0,
            y3: 0.0,
        }
    );
}

#[test]
fn quad_curve_without_current_point_starts_at_control() {
    let mut renderer = recording_renderer();
    renderer.quad_curve_to(3.0, 3.0, 9.0, 0.0).expect("quad");

    let commands = renderer.canvas().commands();
    assert_eq!(commands[0], CanvasCommand::MoveTo { x: 3.0, y: 3.0 });
    match commands[1] {
        CanvasCommand::CurveTo { x1, y1, x3, y3, .. } => {
            assert_relative_eq!(x1, 3.0);
            assert_relative_eq!(y1, 3.0);
            assert_eq!((x3, y3), (9.0, 0.0));
        }
        ref other => panic!("expected curve, got {other:?}"),
    }
}

#[test]
fn positive_arc_is_scoped_and_clockwise() {
    let mut renderer = recording_renderer();
    renderer.move_to(50.0, 50.0);
    renderer
        .arc_to(50.0, 50.0, 20.0, 20.0, 0.0, FRAC_PI_2)
        .expect("arc");

    let commands = renderer.canvas().commands();
    assert_eq!(
        &commands[1..],
        &[
            CanvasCommand::Save,
            CanvasCommand::Translate { x: 50.0, y: 50.0 },
            CanvasCommand::Arc {
                xc: 0.0,
                yc: 0.0,
                radius: 20.0,
                angle1: 0.0,
                angle2: FRAC_PI_2,
            },
            CanvasCommand::Restore,
        ]
    );
    assert_eq!(renderer.canvas().state_depth(), 0);

    let end = renderer
        .canvas()
        .current_point()
        .expect("point")
        .expect("has point");
    assert_relative_eq!(end.x, 50.0, epsilon = 1e-9);
    assert_relative_eq!(end.y, 70.0, epsilon = 1e-9);
}

#[test]
fn negative_arc_uses_negative_winding() {
    let mut renderer = recording_renderer();
    renderer.arc_to(0.0, 0.0, 10.0, 10.0, PI, -FRAC_PI_2).expect("arc");

    let commands = renderer.canvas().commands();
    assert!(commands.iter().any(|command| matches!(
        command,
        CanvasCommand::ArcNegative { angle1, angle2, .. }
            if *angle1 == PI && (*angle2 - FRAC_PI_2).abs() < 1e-12
    )));
    assert!(
        !commands
            .iter()
            .any(|command| matches!(command, CanvasCommand::Arc { .. }))
    );
}

#[test]
fn elliptical_arc_scales_y_inside_the_saved_scope() {
    let mut renderer = recording_renderer();
    renderer
        .arc_to(10.0, 10.0, 20.0, 10.0, 0.0, PI)
        .expect("arc");

    let commands = renderer.canvas().commands();
    assert!(commands.contains(&CanvasCommand::Scale { x: 1.0, y: 0.5 }));
    assert_eq!(commands.first(), Some(&CanvasCommand::Save));
    assert_eq!(commands.last(), Some(&CanvasCommand::Restore));
}

#[test]
fn text_applies_font_color_and_rotation_inside_saved_scope() {
    let mut renderer = recording_renderer();
    renderer.set_font_color(Color::rgb(255, 255, 255));
    renderer.set_font_size(14.0);
    renderer.set_text_rotation(FRAC_PI_2);
    renderer.text("label", 30.0, 40.0).expect("text");

    let commands = renderer.canvas().commands();
    assert_eq!(commands[0], CanvasCommand::Save);
    assert_eq!(
        commands[1],
        CanvasCommand::SetSourceRgba(NormalizedColor::rgba(1.0, 1.0, 1.0, 1.0))
    );
    assert_eq!(commands[2], CanvasCommand::Translate { x: 30.0, y: 40.0 });
    assert_eq!(commands[3], CanvasCommand::Rotate { radians: FRAC_PI_2 });
    assert_eq!(commands[4], CanvasCommand::MoveTo { x: 0.0, y: 0.0 });
    assert!(matches!(
        &commands[5],
        CanvasCommand::ShowText { text, size, .. } if text == "label" && *size == 14.0
    ));
    assert_eq!(commands[6], CanvasCommand::Restore);
    assert_eq!(renderer.canvas().state_depth(), 0);
}

#[test]
fn reset_style_clears_rotation_for_later_text() {
    let mut renderer = recording_renderer();
    renderer.set_text_rotation(PI / 3.0);
    renderer.reset_style();
    renderer.text("flat", 0.0, 0.0).expect("text");

    assert_eq!(renderer.style().text_rotation, 0.0);
    assert!(
        !renderer
            .canvas()
            .commands()
            .iter()
            .any(|command| matches!(command, CanvasCommand::Rotate { .. }))
    );
}

#[test]
fn reset_style_restores_defaults_but_keeps_font() {
    let config = RendererConfig::default()
        .with_stroke_width(3.0)
        .with_default_colors(Color::BLACK, Color::WHITE, Color::BLACK);
    let mut renderer = CanvasRenderer::new(RecordingCanvas::new(), config).expect("renderer");
    let face = FontFace::new("Serif").with_slant(FontSlant::Italic);
    renderer.set_font(&face);
    renderer.set_font_size(22.0);
    renderer.set_stroke_color(Color::rgb(1, 2, 3));
    renderer.set_stroke_width(9.0);
    renderer.set_stroke_dash_array(&[4.0, 2.0]);
    renderer.reset_style();

    let style = renderer.style();
    assert_eq!(style.stroke_color, Color::BLACK);
    assert_eq!(style.fill_color, Color::WHITE);
    assert_eq!(style.stroke_width, 3.0);
    assert!(style.dash_array.is_empty());
    assert_eq!(style.font, face);
    assert_eq!(style.font_size, 22.0);

    let commands = renderer.canvas().commands();
    assert_eq!(
        &commands[commands.len() - 2..],
        &[
            CanvasCommand::SetLineWidth(3.0),
            CanvasCommand::SetDash {
                dashes: Default::default(),
                offset: 0.0,
            },
        ]
    );
}

#[test]
fn set_font_changes_the_face_used_by_text() {
    let mut renderer = recording_renderer();
    let face = FontFace::new("Monospace").bold();
    renderer.set_font(&face);
    renderer.text("abc", 0.0, 0.0).expect("text");

    assert!(renderer.canvas().commands().iter().any(|command| matches!(
        command,
        CanvasCommand::ShowText { face: used, .. } if *used == face
    )));
}

#[test]
fn dash_array_is_forwarded() {
    let mut renderer = recording_renderer();
    renderer.set_stroke_dash_array(&[5.0, 3.0, 1.0]);
    match &renderer.canvas().commands()[0] {
        CanvasCommand::SetDash { dashes, offset } => {
            assert_eq!(dashes.as_slice(), &[5.0, 3.0, 1.0]);
            assert_eq!(*offset, 0.0);
        }
        other => panic!("expected dash command, got {other:?}"),
    }
}

#[test]
fn measure_text_is_unrotated_without_rotation() {
    let mut renderer = recording_renderer();
    renderer.set_font_size(10.0);
    let measured = renderer.measure_text("abcd").expect("measure");
    assert_relative_eq!(measured.width(), 24.0);
    assert_relative_eq!(measured.height(), 10.0);
    assert_eq!(measured.left, 0.0);
    assert_eq!(measured.top, 0.0);
}

#[test]
fn measure_text_rebounds_rotated_extent() {
    let mut renderer = recording_renderer();
    renderer.set_font_size(10.0);
    renderer.set_text_rotation(FRAC_PI_2);
    let measured = renderer.measure_text("abcd").expect("measure");
    assert_relative_eq!(measured.width(), 10.0, epsilon = 1e-9);
    assert_relative_eq!(measured.height(), 24.0, epsilon = 1e-9);
}

#[test]
fn failed_text_still_restores_state() {
    let canvas = RecordingCanvas::new().failing_text();
    let mut renderer = CanvasRenderer::new(canvas, RendererConfig::default()).expect("renderer");
    renderer.set_text_rotation(1.0);

    let err = renderer.text("boom", 1.0, 2.0).expect_err("text must fail");
    assert!(matches!(err, ChartError::Backend(_)));
    assert_eq!(renderer.canvas().state_depth(), 0);
    assert_eq!(renderer.canvas().max_state_depth(), 1);
    assert_eq!(
        renderer.canvas().commands().last(),
        Some(&CanvasCommand::Restore)
    );
}

#[test]
fn dpi_is_constant_and_save_writes_nothing() {
    let mut renderer = recording_renderer();
    renderer.set_dpi(300.0);
    renderer.set_class_name("series");
    assert_eq!(renderer.dpi(), DEFAULT_DPI);

    let mut out = Vec::new();
    renderer.save(&mut out).expect("save");
    assert!(out.is_empty());
    assert!(renderer.canvas().commands().is_empty());
}

#[test]
fn text_baseline_ignores_rotation() {
    let mut renderer = recording_renderer();
    renderer.set_font_size(10.0);
    let flat = renderer.text_baseline("label").expect("baseline");
    renderer.set_text_rotation(FRAC_PI_2);
    assert_eq!(renderer.text_baseline("label").expect("baseline"), flat);
    assert_relative_eq!(flat, 8.0);
    assert!(renderer.canvas().commands().is_empty());
}

#[test]
fn invalid_config_is_rejected_at_construction() {
    let config = RendererConfig::default().with_font_family("  ");
    let err = CanvasRenderer::new(RecordingCanvas::new(), config).expect_err("must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}
