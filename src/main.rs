#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod carousel;
mod config;
mod core;
mod i18n;
mod ui;

use std::path::PathBuf;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    app::run(args);
}
