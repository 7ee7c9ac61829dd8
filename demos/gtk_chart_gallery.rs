#[cfg(feature = "gtk4-adapter")]
fn main() -> gtk4::glib::ExitCode {
    use std::rc::Rc;

    use chart_cairo::charts::{
        Annotation, BarChart, Chart, ContinuousSeries, DonutChart, LineChart, PieChart, Value,
    };
    use chart_cairo::core::{Color, Viewport};
    use chart_cairo::platform_gtk::GtkChartView;
    use chart_cairo::render::RendererConfig;
    use gtk4 as gtk;
    use gtk4::prelude::*;

    fn bar_chart() -> BarChart {
        BarChart::new(
            "Test Bar Chart",
            Viewport::new(1024, 500),
            vec![
                Value::new(5.25, "Blue"),
                Value::new(4.88, "Green"),
                Value::new(4.74, "Gray"),
                Value::new(3.22, "Orange"),
                Value::new(3.0, "Test"),
                Value::new(2.27, "??"),
                Value::new(1.0, "!!"),
            ],
        )
        .with_bar_width(60.0)
        .with_padding_top(40.0)
    }

    fn annotated_line() -> LineChart {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        LineChart::new(
            Viewport::new(1024, 500),
            vec![
                ContinuousSeries::new("linear", values.clone(), values)
                    .with_color(Color::rgb(0, 116, 217)),
            ],
        )
        .with_annotations(vec![
            Annotation::new(1.0, 1.0, "One"),
            Annotation::new(2.0, 2.0, "Two"),
            Annotation::new(3.0, 3.0, "Three"),
            Annotation::new(4.0, 4.0, "Four"),
            Annotation::new(5.0, 5.0, "Five"),
        ])
    }

    fn donut() -> DonutChart {
        DonutChart::new(
            Viewport::new(512, 512),
            vec![
                Value::new(5.0, "Blue"),
                Value::new(5.0, "Green"),
                Value::new(4.0, "Gray"),
                Value::new(4.0, "Orange"),
                Value::new(3.0, "Deep Blue"),
                Value::new(3.0, "test"),
            ],
        )
    }

    fn pie() -> PieChart {
        PieChart::new(
            Viewport::new(512, 512),
            vec![
                Value::new(5.0, "Blue"),
                Value::new(5.0, "Green"),
                Value::new(4.0, "Gray"),
                Value::new(4.0, "Orange"),
                Value::new(3.0, "Deep Blue"),
                Value::new(3.0, "??"),
                Value::new(1.0, "!!"),
            ],
        )
    }

    let _ = chart_cairo::telemetry::init_default_tracing();

    let app = gtk::Application::builder()
        .application_id("rs.chart_cairo.examples.gtk_chart_gallery")
        .build();

    app.connect_activate(|app| {
        let charts: Vec<Rc<dyn Chart>> = vec![
            Rc::new(bar_chart()),
            Rc::new(annotated_line()),
            Rc::new(donut()),
            Rc::new(pie()),
        ];

        let flow_box = gtk::FlowBox::builder()
            .valign(gtk::Align::Start)
            .selection_mode(gtk::SelectionMode::None)
            .build();
        for chart in charts {
            match GtkChartView::new(chart, RendererConfig::default()) {
                Ok(view) => flow_box.insert(view.drawing_area(), -1),
                Err(err) => {
                    tracing::error!(error = %err, "failed to build chart view");
                    std::process::exit(1);
                }
            }
        }

        let scrolled = gtk::ScrolledWindow::builder()
            .hscrollbar_policy(gtk::PolicyType::Never)
            .vscrollbar_policy(gtk::PolicyType::Automatic)
            .child(&flow_box)
            .build();

        let window = gtk::ApplicationWindow::builder()
            .application(app)
            .title("chart-cairo | gallery")
            .default_width(1100)
            .default_height(800)
            .child(&scrolled)
            .build();
        window.set_size_request(300, 600);
        window.present();
    });

    app.run()
}

#[cfg(not(feature = "gtk4-adapter"))]
fn main() {
    println!("run with: cargo run --features desktop --example gtk_chart_gallery");
}
