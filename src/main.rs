mod animation;
mod app;
mod controller;
mod error;
mod files;
mod instance;
mod launch;
mod loader;
mod metadata;
mod navigation;
mod settings;
mod triage;
mod view;

use std::process::ExitCode;

use crate::instance::Instance;
use crate::settings::WindowSettings;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli_args = std::env::args().skip(1).collect::<Vec<_>>();
    let (launch_path, launch_error) = match launch::parse_launch_request_from_args(&cli_args) {
        Ok(request) => (request.path().cloned(), None),
        Err(err) => (None, Some(format!("Launch args error: {err}"))),
    };

    let forwarded_paths = launch_path.iter().cloned().collect::<Vec<_>>();
    let listener = match instance::acquire(instance::instance_addr(), &forwarded_paths) {
        Instance::Forwarded => return ExitCode::SUCCESS,
        Instance::Primary(listener) => listener,
    };

    let settings_path = settings::settings_file_path();
    let window = settings_path
        .as_deref()
        .and_then(settings::load_settings)
        .unwrap_or_default();

    match run(launch_path, launch_error, listener, settings_path, window) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("Viewer exited with error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(
    launch_path: Option<std::path::PathBuf>,
    launch_error: Option<String>,
    listener: Option<std::net::TcpListener>,
    settings_path: Option<std::path::PathBuf>,
    window: WindowSettings,
) -> eframe::Result<()> {
    let mut viewport = eframe::egui::ViewportBuilder::default()
        .with_title(controller::APP_TITLE)
        .with_inner_size(window.inner_size())
        .with_maximized(window.maximized)
        .with_drag_and_drop(true)
        .with_resizable(true);
    if let Some(position) = window.position() {
        viewport = viewport.with_position(position);
    }

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        controller::APP_TITLE,
        native_options,
        Box::new(move |cc| {
            let repaint = cc.egui_ctx.clone();
            let forwarded =
                listener.map(|listener| instance::listen(listener, move || repaint.request_repaint()));
            Ok(Box::new(app::ViewerApp::new(
                cc,
                launch_path,
                launch_error,
                forwarded,
                settings_path,
                window,
            )))
        }),
    )
}
