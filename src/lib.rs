pub mod app;
pub mod config;
pub mod entry;
pub mod error;
mod input;
pub mod io;
pub mod preview;
pub mod state;
pub mod style;
pub mod view;
pub mod watcher;

pub use app::ColumnarApp;
pub use config::Config;
