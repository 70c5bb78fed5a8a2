mod app;
mod convert;
mod messages;
mod panels;
mod progress;
mod states;
mod worker;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("Vista"),
        ..Default::default()
    };

    eframe::run_native(
        "Vista",
        options,
        Box::new(|cc| Ok(Box::new(app::VistaApp::new(&cc.egui_ctx)))),
    )
}
