use std::sync::mpsc;
use std::time::Instant;

use vista_core::config::GuardrailConfig;
use vista_core::ingest::{ImagePipeline, ImageSource};

use crate::messages::{WorkerCommand, WorkerResult};
use crate::progress::ChannelLoadReporter;

pub fn spawn_worker(
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
    config: GuardrailConfig,
) -> mpsc::Sender<WorkerCommand> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    std::thread::Builder::new()
        .name("vista-worker".into())
        .spawn(move || {
            worker_loop(cmd_rx, result_tx, ctx, config);
        })
        .expect("Failed to spawn worker thread");

    cmd_tx
}

fn send(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, result: WorkerResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

fn send_log(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, msg: impl Into<String>) {
    send(tx, ctx, WorkerResult::Log { message: msg.into() });
}

fn send_config_error(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, msg: impl Into<String>) {
    send(tx, ctx, WorkerResult::ConfigError { message: msg.into() });
}

fn worker_loop(
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
    config: GuardrailConfig,
) {
    let mut pipeline = match ImagePipeline::new(config) {
        Ok(p) => p,
        Err(e) => {
            send_config_error(&tx, &ctx, format!("Invalid guardrails, using defaults: {e}"));
            match ImagePipeline::new(GuardrailConfig::default()) {
                Ok(p) => p,
                Err(_) => return,
            }
        }
    };

    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            WorkerCommand::Load { source } => {
                handle_load(&mut pipeline, source, &tx, &ctx);
            }
            WorkerCommand::SetConfig { config } => {
                handle_set_config(&mut pipeline, config, &tx, &ctx);
            }
        }
    }
}

fn handle_load(
    pipeline: &mut ImagePipeline,
    source: ImageSource,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    send_log(tx, ctx, format!("Loading {source}"));
    let reporter = ChannelLoadReporter::new(tx.clone(), ctx.clone());
    let start = Instant::now();

    match pipeline.load_reported(source, &reporter) {
        Ok(loaded) => send(
            tx,
            ctx,
            WorkerResult::Loaded {
                working: loaded.working,
                metadata: loaded.metadata,
                elapsed: start.elapsed(),
            },
        ),
        Err(e) => send(tx, ctx, WorkerResult::LoadFailed { message: e.to_string() }),
    }
}

fn handle_set_config(
    pipeline: &mut ImagePipeline,
    config: GuardrailConfig,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    if let Err(e) = pipeline.set_config(config) {
        send_config_error(tx, ctx, e.to_string());
        return;
    }
    send_log(
        tx,
        ctx,
        format!(
            "Guardrails: display {} px, max side {} px, max total {} px",
            config.display_max_dim, config.hard_max_dim, config.hard_max_pixels
        ),
    );

    if let Some(current) = pipeline.current() {
        send(
            tx,
            ctx,
            WorkerResult::WorkingRebuilt {
                working: current.working.clone(),
                metadata: current.metadata.clone(),
            },
        );
    }
}
