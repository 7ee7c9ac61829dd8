use chart_cairo::charts::{
    Annotation, BarChart, ContinuousSeries, DonutChart, LineChart, PieChart, Value,
};
use chart_cairo::core::{Color, Viewport};
use chart_cairo::render::{
    CanvasCommand, CanvasRenderer, CommandLog, RecordingCanvas, RecordingProvider, Renderer,
};
use chart_cairo::{Chart, ChartError, ChartResult, RendererConfig};

fn values(pairs: &[(f64, &str)]) -> Vec<Value> {
    pairs
        .iter()
        .map(|(value, label)| Value::new(*value, *label))
        .collect()
}

fn assert_balanced(log: &CommandLog) {
    let saves = log.count(|command| matches!(command, CanvasCommand::Save));
    let restores = log.count(|command| matches!(command, CanvasCommand::Restore));
    assert_eq!(saves, restores, "every save must be restored");
}

fn render(chart: &dyn Chart) -> (RecordingProvider, ChartResult<()>) {
    let provider = RecordingProvider::new(RendererConfig::default());
    let mut sink = Vec::new();
    let result = chart.render(&provider, &mut sink);
    assert!(sink.is_empty(), "recording renderers write no bytes");
    (provider, result)
}

#[test]
fn bar_chart_fills_one_box_per_bar() {
    let chart = BarChart::new(
        "Weekly",
        Viewport::new(1024, 500),
        values(&[(3.0, "Mon"), (5.0, "Tue"), (2.0, "Wed")]),
    )
    .with_bar_width(60.0)
    .with_padding_top(40.0);

    let (provider, result) = render(&chart);
    result.expect("bar chart renders");
    let log = provider.log();

    assert_eq!(log.surfaces(), vec![Viewport::new(1024, 500)]);
    assert_eq!(
        log.count(|command| matches!(command, CanvasCommand::FillPreserve)),
        3
    );
    let texts = log.texts();
    assert_eq!(texts.first().map(String::as_str), Some("Weekly"));
    for label in ["Mon", "Tue", "Wed"] {
        assert!(texts.iter().any(|text| text == label), "missing {label}");
    }
    assert_balanced(log);
}

#[test]
fn crowded_bar_labels_are_rotated() {
    let labels = ["a long label name"; 6];
    let bars = labels
        .iter()
        .enumerate()
        .map(|(index, label)| Value::new(index as f64 + 1.0, *label))
        .collect();
    let chart = BarChart::new("", Viewport::new(200, 500), bars);

    let (provider, result) = render(&chart);
    result.expect("bar chart renders");
    let log = provider.log();
    assert_eq!(
        log.count(|command| matches!(command, CanvasCommand::Rotate { .. })),
        6
    );
    assert_balanced(log);
}

#[test]
fn pie_chart_draws_one_arc_and_label_per_slice() {
    let chart = PieChart::new(
        Viewport::new(512, 512),
        values(&[(1.0, "a"), (2.0, "b"), (3.0, "c")]),
    );

    let (provider, result) = render(&chart);
    result.expect("pie chart renders");
    let log = provider.log();

    assert_eq!(log.count(|command| matches!(command, CanvasCommand::Arc { .. })), 3);
    assert_eq!(
        log.count(|command| matches!(command, CanvasCommand::ArcNegative { .. })),
        0
    );
    assert_eq!(log.texts(), vec!["a", "b", "c"]);
    assert_balanced(log);
}

#[test]
fn donut_chart_adds_the_hole() {
    let chart = DonutChart::new(
        Viewport::new(512, 512),
        values(&[(1.0, "a"), (2.0, "b"), (3.0, "c")]),
    )
    .with_title("Share");

    let (provider, result) = render(&chart);
    result.expect("donut chart renders");
    let log = provider.log();

    assert_eq!(log.count(|command| matches!(command, CanvasCommand::Arc { .. })), 4);
    assert_eq!(log.count(|command| matches!(command, CanvasCommand::NewSubPath)), 1);
    assert_eq!(log.texts(), vec!["Share", "a", "b", "c"]);
    assert_balanced(log);
}

#[test]
fn line_chart_annotations_use_rounded_boxes() {
    let series = ContinuousSeries::new(
        "values",
        vec![1.0, 2.0, 3.0, 4.0, 5.0],
        vec![1.0, 2.0, 3.0, 4.0, 5.0],
    );
    let chart = LineChart::new(Viewport::new(1024, 500), vec![series]).with_annotations(vec![
        Annotation::new(1.0, 1.0, "One"),
        Annotation::new(2.0, 2.0, "Two"),
    ]);

    let (provider, result) = render(&chart);
    result.expect("line chart renders");
    let log = provider.log();

    assert_eq!(
        log.count(|command| matches!(command, CanvasCommand::CurveTo { .. })),
        8
    );
    let texts = log.texts();
    assert!(texts.iter().any(|text| text == "One"));
    assert!(texts.iter().any(|text| text == "Two"));
    assert_balanced(log);
}

#[test]
fn explicit_series_color_overrides_palette() {
    let color = Color::rgb(12, 34, 56);
    let series = ContinuousSeries::new("tinted", vec![0.0, 1.0], vec![0.0, 1.0]).with_color(color);
    let chart = LineChart::new(Viewport::new(400, 300), vec![series]);

    let (provider, result) = render(&chart);
    result.expect("line chart renders");
    let expected = CanvasCommand::SetSourceRgba(color.normalized());
    assert_eq!(provider.log().count(|command| *command == expected), 1);
}

#[test]
fn invalid_data_is_rejected_before_any_surface_is_requested() {
    let empty_bars = BarChart::new("", Viewport::new(100, 100), Vec::new());
    let (provider, result) = render(&empty_bars);
    assert!(matches!(result, Err(ChartError::InvalidData(_))));
    assert!(provider.log().surfaces().is_empty());
    assert!(provider.log().is_empty());

    let negative = PieChart::new(Viewport::new(100, 100), values(&[(-1.0, "x"), (2.0, "y")]));
    assert!(matches!(render(&negative).1, Err(ChartError::InvalidData(_))));

    let zeros = PieChart::new(Viewport::new(100, 100), values(&[(0.0, "x"), (0.0, "y")]));
    assert!(matches!(render(&zeros).1, Err(ChartError::InvalidData(_))));

    let full_hole = DonutChart::new(Viewport::new(100, 100), values(&[(1.0, "x")]))
        .with_hole_ratio(1.0);
    assert!(matches!(render(&full_hole).1, Err(ChartError::InvalidData(_))));

    let mismatched = LineChart::new(
        Viewport::new(100, 100),
        vec![ContinuousSeries::new("broken", vec![1.0, 2.0], vec![1.0])],
    );
    assert!(matches!(render(&mismatched).1, Err(ChartError::InvalidData(_))));
}

#[test]
fn zero_sized_viewport_is_rejected() {
    let chart = BarChart::new("", Viewport::new(0, 300), values(&[(1.0, "x")]));
    assert!(matches!(
        render(&chart).1,
        Err(ChartError::InvalidViewport {
            width: 0,
            height: 300
        })
    ));
}

#[test]
fn closures_can_provide_renderers() {
    let log = CommandLog::new();
    let shared = log.clone();
    let provider = move |width: u32, height: u32| -> ChartResult<Box<dyn Renderer>> {
        Viewport::new(width, height).validate()?;
        let canvas = RecordingCanvas::with_log(shared.clone());
        Ok(Box::new(CanvasRenderer::new(
            canvas,
            RendererConfig::default(),
        )?))
    };

    let chart = PieChart::new(Viewport::new(300, 300), values(&[(1.0, "only")]));
    chart
        .render(&provider, &mut std::io::sink())
        .expect("closure provider renders");
    assert_eq!(log.texts(), vec!["only"]);
    assert_balanced(&log);
}
