use anyhow::Result;
use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use servicesquad::config::ClientConfig;
use servicesquad::ui::ServiceSquadApp;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "servicesquad=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting ServiceSquad client...");

    let config = ClientConfig::from_env()?;
    tracing::info!("Using backend at {}", config.server_url);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 720.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("ServiceSquad"),
        ..Default::default()
    };

    eframe::run_native(
        "ServiceSquad",
        options,
        Box::new(move |cc| {
            let app = ServiceSquadApp::new(cc, config, runtime)?;
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run eframe: {}", e))?;

    Ok(())
}
