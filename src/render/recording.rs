use std::cell::RefCell;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::core::{FontFace, NormalizedColor, Point, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::canvas::{Canvas, TextExtents};
use crate::render::{CanvasRenderer, Renderer, RendererConfig, RendererProvider};

/// Advance of one glyph relative to the font size for the synthetic metrics.
const GLYPH_ADVANCE_RATIO: f64 = 0.6;
const BASELINE_RATIO: f64 = 0.8;

/// One call received by a [`RecordingCanvas`], with its user-space arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasCommand {
    Save,
    Restore,
    Translate {
        x: f64,
        y: f64,
    },
    Scale {
        x: f64,
        y: f64,
    },
    Rotate {
        radians: f64,
    },
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    CurveTo {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x3: f64,
        y3: f64,
    },
    Arc {
        xc: f64,
        yc: f64,
        radius: f64,
        angle1: f64,
        angle2: f64,
    },
    ArcNegative {
        xc: f64,
        yc: f64,
        radius: f64,
        angle1: f64,
        angle2: f64,
    },
    NewSubPath,
    ClosePath,
    SetSourceRgba(NormalizedColor),
    SetLineWidth(f64),
    SetDash {
        dashes: SmallVec<[f64; 4]>,
        offset: f64,
    },
    Stroke,
    Fill,
    FillPreserve,
    ShowText {
        text: String,
        face: FontFace,
        size: f64,
    },
}

#[derive(Debug, Default)]
struct LogState {
    commands: Vec<CanvasCommand>,
    surfaces: Vec<Viewport>,
}

/// Shared command log, so recordings stay readable after the renderer that
/// produced them has been dropped.
#[derive(Debug, Clone, Default)]
pub struct CommandLog {
    state: Rc<RefCell<LogState>>,
}

impl CommandLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn commands(&self) -> Vec<CanvasCommand> {
        self.state.borrow().commands.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.borrow().commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.borrow().commands.is_empty()
    }

    #[must_use]
    pub fn count(&self, predicate: impl Fn(&CanvasCommand) -> bool) -> usize {
        self.state
            .borrow()
            .commands
            .iter()
            .filter(|command| predicate(command))
            .count()
    }

    /// Strings passed to `show_text`, in draw order.
    #[must_use]
    pub fn texts(&self) -> Vec<String> {
        self.state
            .borrow()
            .commands
            .iter()
            .filter_map(|command| match command {
                CanvasCommand::ShowText { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Sizes requested from a [`RecordingProvider`] sharing this log.
    #[must_use]
    pub fn surfaces(&self) -> Vec<Viewport> {
        self.state.borrow().surfaces.clone()
    }

    pub fn clear(&self) {
        let mut state = self.state.borrow_mut();
        state.commands.clear();
        state.surfaces.clear();
    }

    fn push(&self, command: CanvasCommand) {
        self.state.borrow_mut().commands.push(command);
    }

    fn push_surface(&self, viewport: Viewport) {
        self.state.borrow_mut().surfaces.push(viewport);
    }
}

/// User-to-device transform, laid out like cairo's matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Affine {
    xx: f64,
    yx: f64,
    xy: f64,
    yy: f64,
    x0: f64,
    y0: f64,
}

impl Affine {
    const IDENTITY: Self = Self {
        xx: 1.0,
        yx: 0.0,
        xy: 0.0,
        yy: 1.0,
        x0: 0.0,
        y0: 0.0,
    };

    fn translate(&mut self, tx: f64, ty: f64) {
        self.x0 += self.xx * tx + self.xy * ty;
        self.y0 += self.yx * tx + self.yy * ty;
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.xx *= sx;
        self.yx *= sx;
        self.xy *= sy;
        self.yy *= sy;
    }

    fn rotate(&mut self, radians: f64) {
        let (sin, cos) = radians.sin_cos();
        let Self { xx, yx, xy, yy, .. } = *self;
        self.xx = xx * cos + xy * sin;
        self.yx = yx * cos + yy * sin;
        self.xy = -xx * sin + xy * cos;
        self.yy = -yx * sin + yy * cos;
    }

    fn to_device(self, point: Point) -> Point {
        Point::new(
            self.xx * point.x + self.xy * point.y + self.x0,
            self.yx * point.x + self.yy * point.y + self.y0,
        )
    }

    fn to_user(self, point: Point) -> ChartResult<Point> {
        let det = self.xx * self.yy - self.xy * self.yx;
        if det == 0.0 || !det.is_finite() {
            return Err(ChartError::Backend("invalid transform matrix".to_owned()));
        }
        let dx = point.x - self.x0;
        let dy = point.y - self.y0;
        Ok(Point::new(
            (self.yy * dx - self.xy * dy) / det,
            (-self.yx * dx + self.xx * dy) / det,
        ))
    }
}

/// Headless canvas that records every call instead of rasterizing.
///
/// It tracks the current point through the transform stack and answers text
/// measurements with fixed-pitch metrics, which keeps layouts deterministic
/// in tests and diagnostics.
#[derive(Debug)]
pub struct RecordingCanvas {
    log: CommandLog,
    transform: Affine,
    saved: Vec<Affine>,
    max_state_depth: usize,
    /// Device-space current point.
    current: Option<Point>,
    subpath_start: Option<Point>,
    fail_text: bool,
}

impl Default for RecordingCanvas {
    fn default() -> Self {
        Self::with_log(CommandLog::new())
    }
}

impl RecordingCanvas {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_log(log: CommandLog) -> Self {
        Self {
            log,
            transform: Affine::IDENTITY,
            saved: Vec::new(),
            max_state_depth: 0,
            current: None,
            subpath_start: None,
            fail_text: false,
        }
    }

    /// Makes every later `show_text` fail with a backend error.
    #[must_use]
    pub fn failing_text(mut self) -> Self {
        self.fail_text = true;
        self
    }

    #[must_use]
    pub fn log(&self) -> &CommandLog {
        &self.log
    }

    #[must_use]
    pub fn commands(&self) -> Vec<CanvasCommand> {
        self.log.commands()
    }

    /// Number of saves not yet matched by a restore.
    #[must_use]
    pub fn state_depth(&self) -> usize {
        self.saved.len()
    }

    #[must_use]
    pub fn max_state_depth(&self) -> usize {
        self.max_state_depth
    }

    fn set_current(&mut self, user: Point) {
        self.current = Some(self.transform.to_device(user));
    }

    fn arc_end(xc: f64, yc: f64, radius: f64, angle: f64) -> Point {
        let (sin, cos) = angle.sin_cos();
        Point::new(xc + radius * cos, yc + radius * sin)
    }

    fn clear_path(&mut self) {
        self.current = None;
        self.subpath_start = None;
    }

    fn measure(size: f64, text: &str) -> TextExtents {
        TextExtents {
            width: text.chars().count() as f64 * size * GLYPH_ADVANCE_RATIO,
            height: size,
            baseline: size * BASELINE_RATIO,
        }
    }
}

impl Canvas for RecordingCanvas {
    fn save(&mut self) -> ChartResult<()> {
        self.log.push(CanvasCommand::Save);
        self.saved.push(self.transform);
        self.max_state_depth = self.max_state_depth.max(self.saved.len());
        Ok(())
    }

    fn restore(&mut self) -> ChartResult<()> {
        self.log.push(CanvasCommand::Restore);
        self.transform = self.saved.pop().ok_or_else(|| {
            ChartError::Backend("restore without a matching save".to_owned())
        })?;
        Ok(())
    }

    fn translate(&mut self, tx: f64, ty: f64) {
        self.log.push(CanvasCommand::Translate { x: tx, y: ty });
        self.transform.translate(tx, ty);
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.log.push(CanvasCommand::Scale { x: sx, y: sy });
        self.transform.scale(sx, sy);
    }

    fn rotate(&mut self, radians: f64) {
        self.log.push(CanvasCommand::Rotate { radians });
        self.transform.rotate(radians);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.log.push(CanvasCommand::MoveTo { x, y });
        self.set_current(Point::new(x, y));
        self.subpath_start = self.current;
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.log.push(CanvasCommand::LineTo { x, y });
        if self.current.is_none() {
            self.subpath_start = Some(self.transform.to_device(Point::new(x, y)));
        }
        self.set_current(Point::new(x, y));
    }

    fn curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) {
        self.log.push(CanvasCommand::CurveTo {
            x1,
            y1,
            x2,
            y2,
            x3,
            y3,
        });
        if self.current.is_none() {
            self.subpath_start = Some(self.transform.to_device(Point::new(x1, y1)));
        }
        self.set_current(Point::new(x3, y3));
    }

    fn arc(&mut self, xc: f64, yc: f64, radius: f64, angle1: f64, angle2: f64) {
        self.log.push(CanvasCommand::Arc {
            xc,
            yc,
            radius,
            angle1,
            angle2,
        });
        if self.current.is_none() {
            self.subpath_start = Some(
                self.transform
                    .to_device(Self::arc_end(xc, yc, radius, angle1)),
            );
        }
        self.set_current(Self::arc_end(xc, yc, radius, angle2));
    }

    fn arc_negative(&mut self, xc: f64, yc: f64, radius: f64, angle1: f64, angle2: f64) {
        self.log.push(CanvasCommand::ArcNegative {
            xc,
            yc,
            radius,
            angle1,
            angle2,
        });
        if self.current.is_none() {
            self.subpath_start = Some(
                self.transform
                    .to_device(Self::arc_end(xc, yc, radius, angle1)),
            );
        }
        self.set_current(Self::arc_end(xc, yc, radius, angle2));
    }

    fn new_sub_path(&mut self) {
        self.log.push(CanvasCommand::NewSubPath);
        self.current = None;
    }

    fn close_path(&mut self) {
        self.log.push(CanvasCommand::ClosePath);
        self.current = self.subpath_start;
    }

    fn current_point(&self) -> ChartResult<Option<Point>> {
        self.current
            .map(|device| self.transform.to_user(device))
            .transpose()
    }

    fn set_source_rgba(&mut self, color: NormalizedColor) {
        self.log.push(CanvasCommand::SetSourceRgba(color));
    }

    fn set_line_width(&mut self, width: f64) {
        self.log.push(CanvasCommand::SetLineWidth(width));
    }

    fn set_dash(&mut self, dashes: &[f64], offset: f64) {
        self.log.push(CanvasCommand::SetDash {
            dashes: SmallVec::from_slice(dashes),
            offset,
        });
    }

    fn stroke(&mut self) -> ChartResult<()> {
        self.log.push(CanvasCommand::Stroke);
        self.clear_path();
        Ok(())
    }

    fn fill(&mut self) -> ChartResult<()> {
        self.log.push(CanvasCommand::Fill);
        self.clear_path();
        Ok(())
    }

    fn fill_preserve(&mut self) -> ChartResult<()> {
        self.log.push(CanvasCommand::FillPreserve);
        Ok(())
    }

    fn show_text(&mut self, face: &FontFace, size: f64, text: &str) -> ChartResult<()> {
        if self.fail_text {
            return Err(ChartError::Backend(format!(
                "recording canvas refused text `{text}`"
            )));
        }
        self.log.push(CanvasCommand::ShowText {
            text: text.to_owned(),
            face: face.clone(),
            size,
        });
        if let Some(current) = self.current_point()? {
            let advance = Self::measure(size, text).width;
            self.set_current(Point::new(current.x + advance, current.y));
        }
        Ok(())
    }

    fn text_extents(&mut self, _face: &FontFace, size: f64, text: &str) -> ChartResult<TextExtents> {
        Ok(Self::measure(size, text))
    }
}

/// Provider handing out recording renderers that all append to one log.
#[derive(Debug, Clone, Default)]
pub struct RecordingProvider {
    log: CommandLog,
    config: RendererConfig,
}

impl RecordingProvider {
    #[must_use]
    pub fn new(config: RendererConfig) -> Self {
        Self {
            log: CommandLog::new(),
            config,
        }
    }

    #[must_use]
    pub fn log(&self) -> &CommandLog {
        &self.log
    }
}

impl RendererProvider for RecordingProvider {
    fn renderer(&self, width: u32, height: u32) -> ChartResult<Box<dyn Renderer>> {
        let viewport = Viewport::new(width, height).validate()?;
        self.log.push_surface(viewport);
        let canvas = RecordingCanvas::with_log(self.log.clone());
        let renderer = CanvasRenderer::new(canvas, self.config.clone())?
            .with_span(tracing::trace_span!("renderer", backend = "recording", width, height));
        Ok(Box::new(renderer))
    }
}
