use egui::{Align, Layout, Pos2, RichText, Vec2};
use log::{debug, error};

use crate::loader::{Loader, Outcome};
use crate::probe;
use crate::report::{render, SystemReport};
use crate::settings::Settings;
use crate::{LOADING_WINDOW_SIZE, REPORT_WINDOW_SIZE};

enum Screen {
    Loading,
    Report { report: SystemReport, text: String },
    Failed(String),
}

/// What the user asked for on the current frame.
enum Action {
    Refresh,
}

pub struct SystemInfoApp {
    settings: Settings,
    screen: Screen,
    loader: Option<Loader>,
    /// Set on every screen switch; the next frame resizes and recenters.
    fit_window: bool,
}

impl SystemInfoApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings = Settings::load(cc.storage);
        cc.egui_ctx.set_visuals(settings.visuals());
        Self::with_settings(settings)
    }

    fn with_settings(settings: Settings) -> Self {
        Self {
            settings,
            screen: Screen::Loading,
            loader: None,
            fit_window: true,
        }
    }

    /// Start gathering on a background thread and show the loading screen.
    pub fn start_gathering(&mut self, ctx: &egui::Context) {
        let repaint_ctx = ctx.clone();
        self.loader = Some(Loader::spawn(probe::gather, move || repaint_ctx.request_repaint()));
        self.switch_to(Screen::Loading);
    }

    fn switch_to(&mut self, screen: Screen) {
        self.screen = screen;
        self.fit_window = true;
    }

    fn finish(&mut self, outcome: Outcome) {
        self.loader = None;
        let screen = match outcome {
            Ok(report) => {
                let text = render(&report);
                Screen::Report { report, text }
            }
            Err(message) => Screen::Failed(message),
        };
        self.switch_to(screen);
    }

    fn window_size(&self) -> Vec2 {
        match self.screen {
            Screen::Loading | Screen::Failed(_) => Vec2::from(LOADING_WINDOW_SIZE),
            Screen::Report { .. } => Vec2::from(REPORT_WINDOW_SIZE),
        }
    }
}

impl eframe::App for SystemInfoApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.settings.store(storage);
    }

    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        if let Some(outcome) = self.loader.as_ref().and_then(Loader::poll) {
            self.finish(outcome);
        }

        if self.fit_window {
            self.fit_window = false;
            center_window(frame, self.window_size());
        }

        let action = match &self.screen {
            Screen::Loading => {
                loading_frame(ctx);
                None
            }
            Screen::Report { report, text } => report_frame(ctx, &mut self.settings, report, text),
            Screen::Failed(message) => failed_frame(ctx, message),
        };

        match action {
            Some(Action::Refresh) => {
                debug!("refresh requested");
                self.start_gathering(ctx);
            }
            None => {}
        }
    }
}

fn loading_frame(ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(32.0);
            ui.heading("Analyzing System...");
            ui.add_space(12.0);
            ui.spinner();
            ui.add_space(12.0);
            ui.label("Please wait!");
        });
    });
}

fn report_frame(
    ctx: &egui::Context,
    settings: &mut Settings,
    report: &SystemReport,
    text: &str,
) -> Option<Action> {
    let mut action = None;

    egui::TopBottomPanel::bottom("report_controls").show(ctx, |ui| {
        ui.horizontal(|ui| {
            if ui.button("Refresh").clicked() {
                action = Some(Action::Refresh);
            }
            if ui.button("Copy report").clicked() {
                ui.output_mut(|o| o.copied_text = text.to_owned());
            }
            if ui.button("Copy JSON").clicked() {
                match serde_json::to_string_pretty(report) {
                    Ok(json) => ui.output_mut(|o| o.copied_text = json),
                    Err(err) => error!("failed to serialize report: {err}"),
                }
            }

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.checkbox(&mut settings.dark_mode, "Dark mode").changed() {
                    ctx.set_visuals(settings.visuals());
                }
                ui.checkbox(&mut settings.monospace, "Monospace");
            });
        });
    });

    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::both()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.label(settings.report_text(text));
            });
    });

    action
}

fn failed_frame(ctx: &egui::Context, message: &str) -> Option<Action> {
    let mut action = None;

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(24.0);
            ui.heading("Could not analyze the system");
            ui.add_space(8.0);
            ui.label(RichText::new(message).color(ui.visuals().error_fg_color));
            ui.add_space(12.0);
            if ui.button("Retry").clicked() {
                action = Some(Action::Refresh);
            }
        });
    });

    action
}

/// Resize to `size` (at most 90% of the monitor) and center on the monitor.
fn center_window(frame: &mut eframe::Frame, size: Vec2) {
    let (size, position) = fitted_rect(size, frame.info().window_info.monitor_size);

    frame.set_window_size(size);
    if let Some(position) = position {
        frame.set_window_pos(position);
    }
}

/// Window size clamped to the monitor, and the position that centers it.
fn fitted_rect(size: Vec2, monitor: Option<Vec2>) -> (Vec2, Option<Pos2>) {
    match monitor {
        Some(monitor) => {
            let size = size.min(monitor * 0.9);
            (size, Some(((monitor - size) / 2.0).to_pos2()))
        }
        None => (size, None),
    }
}
