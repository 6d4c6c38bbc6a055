use columnar::{ColumnarApp, Config};
use eframe::egui;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

/// Directory to open: the first argument when it is one, otherwise home.
/// The result is absolute so every listed path is too.
fn start_directory(arg: Option<OsString>) -> PathBuf {
    if let Some(arg) = arg {
        let path = PathBuf::from(arg);
        if path.is_dir() {
            return absolute_dir(path);
        }
        log::warn!("{} is not a directory, starting at home", path.display());
    }
    directories::UserDirs::new()
        .map(|ud| ud.home_dir().to_path_buf())
        .or_else(|| env::current_dir().ok())
        .map(absolute_dir)
        .unwrap_or_else(|| PathBuf::from("/"))
}

fn absolute_dir(path: PathBuf) -> PathBuf {
    fs::canonicalize(&path)
        .or_else(|_| std::path::absolute(&path))
        .unwrap_or(path)
}

fn main() -> eframe::Result<()> {
    env_logger::init();

    if let Err(e) = Config::create_default() {
        log::warn!("could not write default config: {}", e);
    }
    let config = Config::load();
    let start = start_directory(env::args_os().nth(1));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 650.0])
            .with_title("Columnar")
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Columnar",
        options,
        Box::new(move |cc| Ok(Box::new(ColumnarApp::new(cc, config, start)))),
    )
}
