mod app;
mod cli;
mod effects;
mod input;
mod logging;
mod picker;
mod ui;
mod uploader;

pub use app::run_app;
