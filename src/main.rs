//! FISH Probe Designer - Probe Design Tool
//!
//! Desktop front end for sliding-window FISH probe design by GC content
//! and melting temperature.

use mimalloc::MiMalloc;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod app;

use app::ProbeDesignApp;

fn main() -> eframe::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("fish_probe_design=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 760.0])
            .with_min_inner_size([600.0, 500.0])
            .with_title("FISH Probe Design Tool"),
        ..Default::default()
    };

    eframe::run_native(
        "FISH Probe Design Tool",
        native_options,
        Box::new(|cc| Ok(Box::new(ProbeDesignApp::new(cc)))),
    )
}
