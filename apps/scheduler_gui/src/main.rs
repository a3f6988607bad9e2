mod backend_bridge;
mod controller;
mod ui;

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use clap::Parser;
use client_core::{config::load_settings, HttpSchedulerClient};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::{commands::BackendCommand, runtime::launch};
use crate::controller::coordinator::{ControllerSettings, SchedulerController};
use crate::controller::events::UiEvent;
use crate::ui::SchedulerApp;

#[derive(Parser, Debug)]
struct Args {
    /// Scheduling service base URL; overrides config and environment.
    #[arg(long)]
    api_url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut settings = load_settings().context("failed to load scheduler settings")?;
    if let Some(api_url) = args.api_url {
        settings.api_base_url = api_url;
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let client = HttpSchedulerClient::new(
        &settings.api_base_url,
        Duration::from_secs(settings.request_timeout_secs),
    )
    .context("failed to build scheduling service client")?;
    tracing::info!(api = %settings.api_base_url, "starting scheduler gui");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    launch(cmd_rx, ui_tx, Arc::new(client));

    let mut controller = SchedulerController::new(cmd_tx, ControllerSettings::from(&settings));
    controller.check_health();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Course Scheduler")
            .with_inner_size([960.0, 900.0])
            .with_min_inner_size([640.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Course Scheduler",
        options,
        Box::new(move |_cc| Ok(Box::new(SchedulerApp::new(controller, ui_rx)))),
    )
    .map_err(|err| anyhow::anyhow!("failed to run scheduler gui: {err}"))
}
