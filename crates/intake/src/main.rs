mod cli;
mod client;
mod config;
mod headless;
mod logging;
mod runtime;
mod state;
mod ui;

use crate::cli::{Args, Command};
use crate::client::{PredictClient, RiskPredictor};
use crate::config::{resolve_settings, IntakeConfig, API_URL_ENV};
use crate::logging::{init_tracing, LogEcho};
use crate::runtime::spawn_effect_worker;
use crate::state::{Action, Effect};
use crate::ui::terminal::IntakeTerminal;
use crate::ui::{draw_ui, handle_key_event, restore_terminal, setup_terminal, AppState};
use anyhow::Context;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = IntakeConfig::load(&args.config)?;
    let env_api_url = std::env::var(API_URL_ENV).ok();
    let settings = resolve_settings(
        args.api_url.as_deref(),
        args.timeout_secs,
        env_api_url.as_deref(),
        &config,
    );
    let client = PredictClient::new(&settings.api_url, settings.timeout)
        .with_context(|| format!("invalid api url {}", settings.api_url))?;

    if let Some(Command::Predict(predict)) = &args.command {
        let _file_guard = init_tracing(&args.log_dir, LogEcho::Stderr, "warn")?;
        info!(endpoint = %client.endpoint(), "headless predict");
        let mut stdout = std::io::stdout();
        return headless::run_predict(predict, &client, &mut stdout).await;
    }

    let echo = if args.log_to_stderr {
        LogEcho::Stderr
    } else {
        LogEcho::None
    };
    let _file_guard = init_tracing(&args.log_dir, echo, "info")?;
    info!(
        endpoint = %client.endpoint(),
        timeout = ?settings.timeout,
        "intake console starting"
    );

    let predictor: Arc<dyn RiskPredictor> = Arc::new(client);
    let (action_tx, action_rx) = mpsc::channel::<Action>(32);
    let (effect_tx, effect_rx) = mpsc::channel::<Effect>(8);
    let worker = spawn_effect_worker(predictor, effect_rx, action_tx);

    let mut terminal = setup_terminal()?;
    let mut app = AppState::new(settings.api_url);
    let outcome = run_ui(&mut terminal, &mut app, action_rx, &effect_tx);
    restore_terminal(&mut terminal)?;

    drop(effect_tx);
    worker.abort();
    info!("intake console stopped");
    outcome
}

fn run_ui(
    terminal: &mut IntakeTerminal,
    app: &mut AppState,
    mut action_rx: mpsc::Receiver<Action>,
    effect_tx: &mpsc::Sender<Effect>,
) -> anyhow::Result<()> {
    let tick_rate = Duration::from_millis(100);
    loop {
        while let Ok(action) = action_rx.try_recv() {
            app.apply(action, effect_tx);
        }

        terminal.draw(|frame| draw_ui(frame, app))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_key_event(key, app, effect_tx) {
                    return Ok(());
                }
            }
        }
    }
}
