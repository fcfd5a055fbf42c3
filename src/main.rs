#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use system_information::{icon, SystemInfoApp, LOADING_WINDOW_SIZE, WINDOW_TITLE};

fn main() -> eframe::Result<()> {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let native_options = eframe::NativeOptions {
        initial_window_size: Some(LOADING_WINDOW_SIZE.into()),
        resizable: false,
        centered: true,
        icon_data: Some(icon::window_icon()),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        native_options,
        Box::new(|cc| {
            let mut app = SystemInfoApp::new(cc);

            app.start_gathering(&cc.egui_ctx);

            Box::new(app)
        }),
    )
}
