mod app;
mod cli;
mod config;
mod effects;
mod input;
mod ui;

pub use app::run_app;
pub use cli::Cli;
pub use config::AppConfig;
