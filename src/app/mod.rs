mod wiring;

use crate::{cli, context, rest};
use anyhow::Result;
use std::path::Path;
use tokio_util::sync::CancellationToken;

pub use wiring::{build_chat, build_dashboard, build_state, init_store};

pub struct App {
    pub ctx: context::Context,
}

impl App {
    pub fn from_cli() -> Result<(Self, cli::Cli)> {
        let cli = crate::cli::parse();
        let ctx = context::Context::from_cli(&cli);

        crate::tracing::init(ctx.config.log_file.as_deref().map(Path::new));
        log::info!("🚀 Starting civic-sphere");
        log::info!("🌍 Region: {}", ctx.config.region);

        Ok((Self { ctx }, cli))
    }
}

pub async fn run_daemon(app: App) -> Result<()> {
    let cfg = &app.ctx.config;
    log::info!("🌐 REST API: http://{}", cfg.api_listen);
    if let Some(path) = cfg.log_file.as_deref() {
        log::info!("📝 Log file: {}", path);
    }

    let state = wiring::build_state(cfg)?;
    let shutdown = CancellationToken::new();

    let api_addr = cfg.api_listen;
    let rest_shutdown = shutdown.clone();
    let mut rest_handle = tokio::spawn(async move {
        if let Err(e) = rest::serve(api_addr, state, rest_shutdown).await {
            log::error!("REST server error: {}", e);
        }
    });

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            log::info!("🧨 Ctrl-C received, shutting down");
        }
        _ = &mut rest_handle => {},
    }

    shutdown.cancel();
    if let Err(e) = rest_handle.await {
        log::error!("REST server error: {}", e);
        return Err(e.into());
    }

    log::info!("✅ Shutdown complete");
    Ok(())
}

pub async fn run() -> Result<()> {
    let (app, cli) = App::from_cli()?;

    if let Some(cmd) = &cli.cmd {
        // one-shot command mode
        cmd.run(&app.ctx)?;
        return Ok(());
    }

    run_daemon(app).await
}
