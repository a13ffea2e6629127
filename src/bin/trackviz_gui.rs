use std::collections::VecDeque;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use egui_plot::{Arrows, Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

use trackviz::config::{
    AlignConfig, BoundaryPolicy, ColumnScheme, ConfigOverrides, PlotConfig, TrackVizConfig,
    WhiskerLength,
};
use trackviz::track::load_track;
use trackviz::view::TrackView;
use trackviz::whisker::Whisker;

const MAX_LOG_LINES: usize = 500;
const MIN_WHISKER_DEG: f64 = 1e-7;
const MAX_WHISKER_DEG: f64 = 1e-2;

#[derive(Parser, Debug)]
#[command(name = "trackviz_gui")]
#[command(about = "GPS track viewer with heading whiskers", long_about = None)]
struct Args {
    /// CSV track file
    file: PathBuf,

    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    #[arg(long, allow_hyphen_values = true)]
    shift: Option<i32>,

    #[arg(short = 'b', long, value_enum)]
    boundary: Option<BoundaryPolicy>,

    #[arg(long, value_enum)]
    columns: Option<ColumnScheme>,

    #[arg(long)]
    whisker_length: Option<WhiskerLength>,

    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

struct GuiLogger {
    tx: Sender<String>,
    max_level: log::LevelFilter,
}

impl log::Log for GuiLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            let msg = format!("[{}] {}", record.level(), record.args());
            let _ = self.tx.send(msg);
        }
    }

    fn flush(&self) {}
}

struct TrackVizApp {
    log_rx: Receiver<String>,
    log_lines: VecDeque<String>,
    title: String,
    view: TrackView,
    align: AlignConfig,
    plot: PlotConfig,
    show_aligned: bool,
    show_recorded: bool,
    show_points: bool,
}

impl TrackVizApp {
    fn new(
        _cc: &eframe::CreationContext<'_>,
        log_rx: Receiver<String>,
        title: String,
        view: TrackView,
        config: TrackVizConfig,
    ) -> Self {
        Self {
            log_rx,
            log_lines: VecDeque::new(),
            title,
            view,
            align: config.align,
            plot: config.plot,
            show_aligned: true,
            show_recorded: false,
            show_points: true,
        }
    }

    fn drain_logs(&mut self) {
        while let Ok(line) = self.log_rx.try_recv() {
            self.log_lines.push_back(line);
            if self.log_lines.len() > MAX_LOG_LINES {
                self.log_lines.pop_front();
            }
        }
    }

    fn draw_controls(&mut self, ui: &mut egui::Ui) {
        let before = self.align;

        egui::Grid::new("align_controls")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                ui.label(egui::RichText::new("Shift:").color(egui::Color32::LIGHT_GRAY));
                ui.add(egui::DragValue::new(&mut self.align.shift).range(-10..=10));
                ui.end_row();

                ui.label(egui::RichText::new("Boundary:").color(egui::Color32::LIGHT_GRAY));
                egui::ComboBox::from_id_salt("boundary_policy")
                    .selected_text(boundary_label(self.align.boundary))
                    .show_ui(ui, |ui| {
                        for policy in [
                            BoundaryPolicy::RepeatEdge,
                            BoundaryPolicy::Drop,
                            BoundaryPolicy::KeepOriginal,
                        ] {
                            ui.selectable_value(
                                &mut self.align.boundary,
                                policy,
                                boundary_label(policy),
                            );
                        }
                    });
                ui.end_row();

                ui.label(egui::RichText::new("Whisker:").color(egui::Color32::LIGHT_GRAY));
                if ui
                    .add(
                        egui::Slider::new(
                            &mut self.plot.whisker_length_deg,
                            MIN_WHISKER_DEG..=MAX_WHISKER_DEG,
                        )
                        .logarithmic(true)
                        .suffix("°"),
                    )
                    .changed()
                {
                    self.view.set_whisker_length(self.plot.whisker_length_deg);
                }
                ui.end_row();
            });

        ui.add_space(4.0);
        ui.checkbox(&mut self.show_aligned, "Aligned headings");
        ui.checkbox(&mut self.show_recorded, "Recorded headings");
        ui.checkbox(&mut self.show_points, "GPS points");

        if self.align != before {
            self.view.realign(&self.align);
            log::info!(
                "Re-aligned: shift {:+}, boundary {:?}, {} whiskers",
                self.align.shift,
                self.align.boundary,
                self.view.aligned().len()
            );
        }
    }

    fn draw_summary(&self, ui: &mut egui::Ui) {
        let Some(summary) = self.view.summary() else {
            ui.label(egui::RichText::new("No points").color(egui::Color32::DARK_GRAY));
            return;
        };

        egui::Grid::new("track_summary")
            .num_columns(2)
            .show(ui, |ui| {
                let row = |ui: &mut egui::Ui, label: &str, value: String| {
                    ui.label(egui::RichText::new(label).color(egui::Color32::LIGHT_GRAY));
                    ui.label(
                        egui::RichText::new(value)
                            .monospace()
                            .color(egui::Color32::WHITE),
                    );
                    ui.end_row();
                };
                row(ui, "Points:", summary.points.to_string());
                row(
                    ui,
                    "Latitude:",
                    format!("{:.6} .. {:.6}", summary.latitude.min, summary.latitude.max),
                );
                row(
                    ui,
                    "Longitude:",
                    format!(
                        "{:.6} .. {:.6}",
                        summary.longitude.min, summary.longitude.max
                    ),
                );
                row(
                    ui,
                    "Heading:",
                    format!("{:.1}° .. {:.1}°", summary.heading.min, summary.heading.max),
                );
                row(
                    ui,
                    "Heading std dev:",
                    format!("{:.1}°", summary.heading.std_dev),
                );
                row(
                    ui,
                    "Mean heading:",
                    summary
                        .heading_circular_mean
                        .map_or("---".to_string(), |m| format!("{:.1}°", m)),
                );
            });
    }

    fn draw_histogram(&self, ui: &mut egui::Ui) {
        let histogram = self.view.histogram();
        let width = histogram.bin_width().unwrap_or(1.0);
        let bars: Vec<Bar> = histogram
            .bars()
            .map(|(centre, count)| Bar::new(centre, count as f64).width(width))
            .collect();

        Plot::new("heading_histogram")
            .height(180.0)
            .x_axis_label("Heading (degrees)")
            .y_axis_label("Frequency")
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(
                    BarChart::new("Heading Distribution", bars)
                        .color(egui::Color32::from_rgb(100, 200, 255)),
                );
            });
    }

    fn draw_track(&self, ui: &mut egui::Ui) {
        let track: PlotPoints = self
            .view
            .recorded()
            .iter()
            .map(|s| [s.position.longitude, s.position.latitude])
            .collect();

        Plot::new("track_plot")
            .data_aspect(1.0)
            .x_axis_label("Longitude")
            .y_axis_label("Latitude")
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new("Track", track)
                        .color(egui::Color32::GRAY.gamma_multiply(0.5))
                        .width(0.5),
                );

                if self.show_points {
                    let points: PlotPoints = self
                        .view
                        .recorded()
                        .iter()
                        .map(|s| [s.position.longitude, s.position.latitude])
                        .collect();
                    plot_ui.points(
                        Points::new("GPS Points", points)
                            .radius(self.plot.point_radius)
                            .color(egui::Color32::from_rgb(255, 80, 80).gamma_multiply(0.7)),
                    );
                }

                if self.show_recorded {
                    let (origins, tips) = whisker_points(&self.view.recorded_whiskers());
                    plot_ui.arrows(
                        Arrows::new("Recorded heading", origins, tips)
                            .color(egui::Color32::from_rgb(255, 200, 50).gamma_multiply(0.6)),
                    );
                }

                if self.show_aligned {
                    let (origins, tips) = whisker_points(&self.view.aligned_whiskers());
                    plot_ui.arrows(
                        Arrows::new("Heading", origins, tips)
                            .color(egui::Color32::from_rgb(80, 120, 255).gamma_multiply(0.6)),
                    );
                }
            });
    }
}

fn whisker_points(whiskers: &[Whisker]) -> (PlotPoints<'static>, PlotPoints<'static>) {
    let origins = whiskers
        .iter()
        .map(|w| [w.start.longitude, w.start.latitude])
        .collect();
    let tips = whiskers
        .iter()
        .map(|w| [w.end.longitude, w.end.latitude])
        .collect();
    (origins, tips)
}

fn boundary_label(policy: BoundaryPolicy) -> &'static str {
    match policy {
        BoundaryPolicy::RepeatEdge => "Repeat edge",
        BoundaryPolicy::Drop => "Drop",
        BoundaryPolicy::KeepOriginal => "Keep original",
    }
}

impl eframe::App for TrackVizApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_logs();

        if ctx.input(|i| i.key_pressed(egui::Key::Q)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        egui::TopBottomPanel::top("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(&self.title)
                        .color(egui::Color32::WHITE)
                        .strong(),
                );
                ui.separator();
                ui.label(egui::RichText::new("Shift:").color(egui::Color32::LIGHT_GRAY));
                ui.label(
                    egui::RichText::new(format!("{:+}", self.view.aligner().shift()))
                        .color(egui::Color32::WHITE)
                        .strong(),
                );
                ui.separator();
                ui.label(egui::RichText::new("Whiskers:").color(egui::Color32::LIGHT_GRAY));
                ui.label(
                    egui::RichText::new(format!(
                        "{} / {}",
                        self.view.aligned().len(),
                        self.view.recorded().len()
                    ))
                    .color(egui::Color32::WHITE),
                );
            });
        });

        egui::TopBottomPanel::bottom("debug_log")
            .resizable(true)
            .default_height(120.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new("Log")
                            .color(egui::Color32::LIGHT_GRAY)
                            .strong(),
                    );
                    if ui.small_button("Clear").clicked() {
                        self.log_lines.clear();
                    }
                });
                egui::ScrollArea::vertical()
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for line in &self.log_lines {
                            ui.label(
                                egui::RichText::new(line)
                                    .font(egui::FontId::monospace(11.0))
                                    .color(egui::Color32::from_rgb(180, 180, 180)),
                            );
                        }
                    });
            });

        egui::SidePanel::left("controls_panel")
            .default_width(320.0)
            .resizable(false)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.label(egui::RichText::new("Alignment").strong());
                self.draw_controls(ui);
                ui.separator();
                ui.label(egui::RichText::new("Track Statistics").strong());
                self.draw_summary(ui);
                ui.separator();
                self.draw_histogram(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_track(ui);
        });
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    let (tx, rx) = crossbeam_channel::unbounded::<String>();
    let logger = GuiLogger {
        tx,
        max_level: log_level,
    };
    log::set_boxed_logger(Box::new(logger)).ok();
    log::set_max_level(log_level);

    let mut config = match &args.config {
        Some(path) => TrackVizConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => TrackVizConfig::default(),
    };
    config.apply_overrides(&ConfigOverrides {
        shift: args.shift,
        boundary: args.boundary,
        columns: args.columns,
        whisker_length: args.whisker_length,
    });
    config.plot.whisker_length_deg = config
        .plot
        .whisker_length_deg
        .clamp(MIN_WHISKER_DEG, MAX_WHISKER_DEG);

    let samples = load_track(&args.file, &config.columns)
        .with_context(|| format!("Failed to load track {}", args.file.display()))?;
    let view = TrackView::new(samples, &config)?;

    let title = args
        .file
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| args.file.display().to_string());

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 850.0])
            .with_min_inner_size([800.0, 500.0])
            .with_title("GPS Track with Headings"),
        ..Default::default()
    };

    eframe::run_native(
        "trackviz",
        native_options,
        Box::new(move |cc| Ok(Box::new(TrackVizApp::new(cc, rx, title, view, config)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {}", e))?;

    Ok(())
}
