use std::io::Write;

use cairo::{Content, Context, Format, ImageSurface, Rectangle, RecordingSurface, SvgSurface};
use pango::FontDescription;

use crate::core::{FontFace, FontSlant, FontWeight, NormalizedColor, Point, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::canvas::{Canvas, TextExtents};
use crate::render::{CanvasRenderer, Renderer, RendererConfig, RendererProvider};

/// Where a [`CairoCanvas`] sends its pixels once the chart is drawn.
pub trait CairoOutput {
    fn kind(&self) -> &'static str;
    fn export(&self, context: &Context, writer: &mut dyn Write) -> ChartResult<()>;
}

/// Host-owned surface already shown on screen; exporting writes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowOutput;

impl CairoOutput for WindowOutput {
    fn kind(&self) -> &'static str {
        "window"
    }

    fn export(&self, _context: &Context, _writer: &mut dyn Write) -> ChartResult<()> {
        Ok(())
    }
}

/// Owned ARGB32 image surface, exported as PNG.
#[derive(Debug)]
pub struct PngOutput {
    surface: ImageSurface,
}

impl PngOutput {
    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }
}

impl CairoOutput for PngOutput {
    fn kind(&self) -> &'static str {
        "png"
    }

    fn export(&self, _context: &Context, writer: &mut dyn Write) -> ChartResult<()> {
        self.surface.flush();
        let mut writer = writer;
        self.surface
            .write_to_png(&mut writer)
            .map_err(|err| ChartError::Backend(format!("failed to encode png: {err}")))
    }
}

/// Owned recording surface, replayed onto an SVG stream on export.
///
/// Recording first keeps `save` repeatable; an SVG surface can only be
/// finished once.
#[derive(Debug)]
pub struct SvgOutput {
    surface: RecordingSurface,
    width: f64,
    height: f64,
}

impl CairoOutput for SvgOutput {
    fn kind(&self) -> &'static str {
        "svg"
    }

    fn export(&self, _context: &Context, writer: &mut dyn Write) -> ChartResult<()> {
        self.surface.flush();
        let svg = SvgSurface::for_stream(self.width, self.height, Vec::<u8>::new())
            .map_err(|err| map_backend_error("failed to create svg surface", err))?;
        {
            let replay = Context::new(&svg)
                .map_err(|err| map_backend_error("failed to create svg context", err))?;
            replay
                .set_source_surface(&self.surface, 0.0, 0.0)
                .map_err(|err| map_backend_error("failed to set recording source", err))?;
            replay
                .paint()
                .map_err(|err| map_backend_error("failed to replay recording", err))?;
        }
        let stream = svg.finish_output_stream().map_err(|err| {
            ChartError::Backend(format!("failed to finish svg stream: {}", err.error))
        })?;
        let bytes = stream
            .downcast::<Vec<u8>>()
            .map_err(|_| ChartError::Backend("svg stream has an unexpected type".to_owned()))?;
        writer.write_all(&bytes)?;
        Ok(())
    }
}

/// Cairo + Pango + PangoCairo canvas.
///
/// Path, transform and paint calls go straight to the cairo context; text is
/// laid out with Pango so font family, weight and slant are honored. The
/// output parameter decides what `write_output` produces.
#[derive(Debug)]
pub struct CairoCanvas<O: CairoOutput> {
    context: Context,
    output: O,
}

pub type WindowRenderer = CanvasRenderer<CairoCanvas<WindowOutput>>;
pub type PngRenderer = CanvasRenderer<CairoCanvas<PngOutput>>;
pub type SvgRenderer = CanvasRenderer<CairoCanvas<SvgOutput>>;

impl CairoCanvas<WindowOutput> {
    /// Draws into a context owned by the host toolkit, typically the one
    /// handed to a GTK draw callback. The surface is never created,
    /// resized or finished here.
    #[must_use]
    pub fn on_context(context: &Context) -> Self {
        Self {
            context: context.clone(),
            output: WindowOutput,
        }
    }
}

impl CairoCanvas<PngOutput> {
    pub fn png(width: u32, height: u32) -> ChartResult<Self> {
        let (width, height) = surface_size(width, height)?;
        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        let context = Context::new(&surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        Ok(Self {
            context,
            output: PngOutput { surface },
        })
    }
}

impl CairoCanvas<SvgOutput> {
    pub fn svg(width: u32, height: u32) -> ChartResult<Self> {
        let (width, height) = surface_size(width, height)?;
        let (width, height) = (f64::from(width), f64::from(height));
        let surface = RecordingSurface::create(
            Content::ColorAlpha,
            Some(Rectangle::new(0.0, 0.0, width, height)),
        )
        .map_err(|err| map_backend_error("failed to create recording surface", err))?;
        let context = Context::new(&surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        Ok(Self {
            context,
            output: SvgOutput {
                surface,
                width,
                height,
            },
        })
    }
}

impl<O: CairoOutput> CairoCanvas<O> {
    #[must_use]
    pub fn backend_name(&self) -> String {
        format!("cairo+pango+pangocairo/{}", self.output.kind())
    }

    #[must_use]
    pub fn output(&self) -> &O {
        &self.output
    }

    fn layout(&self, face: &FontFace, size: f64, text: &str) -> pango::Layout {
        let layout = pangocairo::functions::create_layout(&self.context);
        layout.set_font_description(Some(&font_description(face, size)));
        layout.set_text(text);
        layout
    }
}

impl<O: CairoOutput> Canvas for CairoCanvas<O> {
    fn save(&mut self) -> ChartResult<()> {
        self.context
            .save()
            .map_err(|err| map_backend_error("failed to save context state", err))
    }

    fn restore(&mut self) -> ChartResult<()> {
        self.context
            .restore()
            .map_err(|err| map_backend_error("failed to restore context state", err))
    }

    fn translate(&mut self, tx: f64, ty: f64) {
        self.context.translate(tx, ty);
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.context.scale(sx, sy);
    }

    fn rotate(&mut self, radians: f64) {
        self.context.rotate(radians);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.context.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.context.line_to(x, y);
    }

    fn curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) {
        self.context.curve_to(x1, y1, x2, y2, x3, y3);
    }

    fn arc(&mut self, xc: f64, yc: f64, radius: f64, angle1: f64, angle2: f64) {
        self.context.arc(xc, yc, radius, angle1, angle2);
    }

    fn arc_negative(&mut self, xc: f64, yc: f64, radius: f64, angle1: f64, angle2: f64) {
        self.context.arc_negative(xc, yc, radius, angle1, angle2);
    }

    fn new_sub_path(&mut self) {
        self.context.new_sub_path();
    }

    fn close_path(&mut self) {
        self.context.close_path();
    }

    fn current_point(&self) -> ChartResult<Option<Point>> {
        let has_point = self
            .context
            .has_current_point()
            .map_err(|err| map_backend_error("failed to query current point", err))?;
        if !has_point {
            return Ok(None);
        }
        let (x, y) = self
            .context
            .current_point()
            .map_err(|err| map_backend_error("failed to query current point", err))?;
        Ok(Some(Point::new(x, y)))
    }

    fn set_source_rgba(&mut self, color: NormalizedColor) {
        self.context
            .set_source_rgba(color.red, color.green, color.blue, color.alpha);
    }

    fn set_line_width(&mut self, width: f64) {
        self.context.set_line_width(width);
    }

    fn set_dash(&mut self, dashes: &[f64], offset: f64) {
        self.context.set_dash(dashes, offset);
    }

    fn stroke(&mut self) -> ChartResult<()> {
        self.context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke path", err))
    }

    fn fill(&mut self) -> ChartResult<()> {
        self.context
            .fill()
            .map_err(|err| map_backend_error("failed to fill path", err))
    }

    fn fill_preserve(&mut self) -> ChartResult<()> {
        self.context
            .fill_preserve()
            .map_err(|err| map_backend_error("failed to fill path", err))
    }

    fn show_text(&mut self, face: &FontFace, size: f64, text: &str) -> ChartResult<()> {
        let layout = self.layout(face, size, text);
        let baseline = f64::from(layout.baseline()) / f64::from(pango::SCALE);
        let (x, y) = self
            .context
            .current_point()
            .map_err(|err| map_backend_error("failed to query text origin", err))?;
        // Pango places the layout's top-left corner at the current point.
        self.context.move_to(x, y - baseline);
        pangocairo::functions::show_layout(&self.context, &layout);
        self.context
            .status()
            .map_err(|err| map_backend_error("failed to draw text", err))
    }

    fn text_extents(&mut self, face: &FontFace, size: f64, text: &str) -> ChartResult<TextExtents> {
        let layout = self.layout(face, size, text);
        let (width, height) = layout.pixel_size();
        Ok(TextExtents {
            width: f64::from(width),
            height: f64::from(height),
            baseline: f64::from(layout.baseline()) / f64::from(pango::SCALE),
        })
    }

    fn write_output(&mut self, writer: &mut dyn Write) -> ChartResult<()> {
        self.output.export(&self.context, writer)
    }
}

/// Renders through a context supplied by the host toolkit.
///
/// The requested size is only logged: the host already sized the surface.
#[derive(Debug, Clone)]
pub struct CairoContextProvider {
    context: Context,
    config: RendererConfig,
}

impl CairoContextProvider {
    #[must_use]
    pub fn new(context: &Context, config: RendererConfig) -> Self {
        Self {
            context: context.clone(),
            config,
        }
    }
}

impl RendererProvider for CairoContextProvider {
    fn renderer(&self, width: u32, height: u32) -> ChartResult<Box<dyn Renderer>> {
        let canvas = CairoCanvas::on_context(&self.context);
        let renderer = CanvasRenderer::new(canvas, self.config.clone())?.with_span(
            tracing::trace_span!("renderer", backend = "cairo-window", width, height),
        );
        Ok(Box::new(renderer))
    }
}

/// Renders into a fresh image surface per request; `save` writes PNG bytes.
#[derive(Debug, Clone, Default)]
pub struct PngRendererProvider {
    config: RendererConfig,
}

impl PngRendererProvider {
    #[must_use]
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }
}

impl RendererProvider for PngRendererProvider {
    fn renderer(&self, width: u32, height: u32) -> ChartResult<Box<dyn Renderer>> {
        let canvas = CairoCanvas::png(width, height)?;
        let renderer = CanvasRenderer::new(canvas, self.config.clone())?.with_span(
            tracing::trace_span!("renderer", backend = "cairo-png", width, height),
        );
        Ok(Box::new(renderer))
    }
}

/// Renders into a fresh recording surface per request; `save` writes SVG.
#[derive(Debug, Clone, Default)]
pub struct SvgRendererProvider {
    config: RendererConfig,
}

impl SvgRendererProvider {
    #[must_use]
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }
}

impl RendererProvider for SvgRendererProvider {
    fn renderer(&self, width: u32, height: u32) -> ChartResult<Box<dyn Renderer>> {
        let canvas = CairoCanvas::svg(width, height)?;
        let renderer = CanvasRenderer::new(canvas, self.config.clone())?.with_span(
            tracing::trace_span!("renderer", backend = "cairo-svg", width, height),
        );
        Ok(Box::new(renderer))
    }
}

fn font_description(face: &FontFace, size: f64) -> FontDescription {
    let mut description = FontDescription::new();
    description.set_family(&face.family);
    description.set_weight(match face.weight {
        FontWeight::Normal => pango::Weight::Normal,
        FontWeight::Bold => pango::Weight::Bold,
    });
    description.set_style(match face.slant {
        FontSlant::Normal => pango::Style::Normal,
        FontSlant::Italic => pango::Style::Italic,
        FontSlant::Oblique => pango::Style::Oblique,
    });
    description.set_absolute_size(size * f64::from(pango::SCALE));
    description
}

fn surface_size(width: u32, height: u32) -> ChartResult<(i32, i32)> {
    let viewport = Viewport::new(width, height).validate()?;
    match (i32::try_from(viewport.width), i32::try_from(viewport.height)) {
        (Ok(width), Ok(height)) => Ok((width, height)),
        _ => Err(ChartError::InvalidViewport { width, height }),
    }
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::Backend(format!("{prefix}: {err}"))
}
