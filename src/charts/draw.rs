use crate::core::{ChartBox, Color, Viewport};
use crate::error::ChartResult;
use crate::render::Renderer;

pub(crate) const BACKGROUND_COLOR: Color = Color::WHITE;
pub(crate) const AXIS_COLOR: Color = Color::rgb(51, 51, 51);
pub(crate) const TEXT_COLOR: Color = Color::rgb(51, 51, 51);
pub(crate) const GRID_COLOR: Color = Color::rgb(239, 239, 239);
pub(crate) const TITLE_FONT_SIZE: f64 = 18.0;
pub(crate) const LABEL_FONT_SIZE: f64 = 10.0;
pub(crate) const CANVAS_PADDING: f64 = 20.0;
pub(crate) const LABEL_GAP: f64 = 6.0;

pub(crate) fn viewport_box(viewport: Viewport) -> ChartBox {
    ChartBox::from_size(f64::from(viewport.width), f64::from(viewport.height))
}

pub(crate) fn rect_path(renderer: &mut dyn Renderer, area: ChartBox) {
    renderer.move_to(area.left, area.top);
    renderer.line_to(area.right, area.top);
    renderer.line_to(area.right, area.bottom);
    renderer.line_to(area.left, area.bottom);
    renderer.close();
}

pub(crate) fn fill_background(renderer: &mut dyn Renderer, viewport: Viewport) -> ChartResult<()> {
    renderer.set_fill_color(BACKGROUND_COLOR);
    rect_path(renderer, viewport_box(viewport));
    renderer.fill()?;
    renderer.reset_style();
    Ok(())
}

pub(crate) fn stroke_line(
    renderer: &mut dyn Renderer,
    from: (f64, f64),
    to: (f64, f64),
    color: Color,
    width: f64,
) -> ChartResult<()> {
    renderer.set_stroke_color(color);
    renderer.set_stroke_width(width);
    renderer.move_to(from.0, from.1);
    renderer.line_to(to.0, to.1);
    renderer.stroke()?;
    renderer.reset_style();
    Ok(())
}

pub(crate) fn label_style(renderer: &mut dyn Renderer, size: f64, color: Color) {
    renderer.set_font_size(size);
    renderer.set_font_color(color);
}

/// Draws `body` horizontally centered on `center_x` with its top at `top`.
pub(crate) fn text_centered(
    renderer: &mut dyn Renderer,
    body: &str,
    center_x: f64,
    top: f64,
) -> ChartResult<ChartBox> {
    let measured = renderer.measure_text(body)?;
    let left = center_x - measured.width() / 2.0;
    text_top_aligned(renderer, body, left, top)?;
    Ok(measured.moved_to(left, top))
}

/// Draws `body` with the top of its unrotated extent at `top`.
pub(crate) fn text_top_aligned(
    renderer: &mut dyn Renderer,
    body: &str,
    left: f64,
    top: f64,
) -> ChartResult<()> {
    let baseline = renderer.text_baseline(body)?;
    renderer.text(body, left, top + baseline)
}

/// Draws unrotated `body` vertically centered on `center_y`.
pub(crate) fn text_middle_aligned(
    renderer: &mut dyn Renderer,
    body: &str,
    left: f64,
    center_y: f64,
) -> ChartResult<()> {
    let height = renderer.measure_text(body)?.height();
    text_top_aligned(renderer, body, left, center_y - height / 2.0)
}

/// Title band at the top of the canvas; returns the y just below it.
pub(crate) fn draw_title(
    renderer: &mut dyn Renderer,
    title: &str,
    viewport: Viewport,
) -> ChartResult<f64> {
    if title.is_empty() {
        return Ok(CANVAS_PADDING);
    }
    label_style(renderer, TITLE_FONT_SIZE, TEXT_COLOR);
    let drawn = text_centered(
        renderer,
        title,
        f64::from(viewport.width) / 2.0,
        CANVAS_PADDING,
    )?;
    renderer.reset_style();
    Ok(drawn.bottom + CANVAS_PADDING / 2.0)
}

/// Rectangle path with quadratic-curve corners.
pub(crate) fn rounded_box_path(
    renderer: &mut dyn Renderer,
    area: ChartBox,
    radius: f64,
) -> ChartResult<()> {
    let radius = radius.min(area.width() / 2.0).min(area.height() / 2.0).max(0.0);
    renderer.move_to(area.left + radius, area.top);
    renderer.line_to(area.right - radius, area.top);
    renderer.quad_curve_to(area.right, area.top, area.right, area.top + radius)?;
    renderer.line_to(area.right, area.bottom - radius);
    renderer.quad_curve_to(area.right, area.bottom, area.right - radius, area.bottom)?;
    renderer.line_to(area.left + radius, area.bottom);
    renderer.quad_curve_to(area.left, area.bottom, area.left, area.bottom - radius)?;
    renderer.line_to(area.left, area.top + radius);
    renderer.quad_curve_to(area.left, area.top, area.left + radius, area.top)?;
    renderer.close();
    Ok(())
}

pub(crate) fn format_value(value: f64) -> String {
    format!("{value:.2}")
}

#[cfg(test)]
mod tests {
    use super::{text_centered, text_middle_aligned};
    use crate::render::{CanvasCommand, CanvasRenderer, RecordingCanvas, Renderer, RendererConfig};

    fn anchors(renderer: &CanvasRenderer<RecordingCanvas>) -> Vec<(f64, f64)> {
        renderer
            .canvas()
            .commands()
            .into_iter()
            .filter_map(|command| match command {
                CanvasCommand::Translate { x, y } => Some((x, y)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn top_aligned_text_sits_on_its_baseline() {
        let mut renderer =
            CanvasRenderer::new(RecordingCanvas::new(), RendererConfig::default()).expect("renderer");
        renderer.set_font_size(10.0);
        let drawn = text_centered(&mut renderer, "abcd", 50.0, 20.0).expect("text");

        assert_eq!(drawn.top, 20.0);
        assert_eq!(drawn.bottom, 30.0);
        // Recording metrics put the baseline at 0.8 of the size, above the bottom.
        assert_eq!(anchors(&renderer), vec![(38.0, 28.0)]);
    }

    #[test]
    fn middle_aligned_text_is_centered_on_the_extent() {
        let mut renderer =
            CanvasRenderer::new(RecordingCanvas::new(), RendererConfig::default()).expect("renderer");
        renderer.set_font_size(20.0);
        text_middle_aligned(&mut renderer, "x", 0.0, 100.0).expect("text");

        assert_eq!(anchors(&renderer), vec![(0.0, 106.0)]);
    }
}
