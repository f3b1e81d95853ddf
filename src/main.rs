use noema_dash::api::RunApiClient;
use noema_dash::app::{App, AppMessage};
use noema_dash::cli::{parse_args, run_cli_command, run_report, CliCommand};
use noema_dash::config::DashConfig;
use noema_dash::logging::init_logging;
use noema_dash::poller::spawn_poller;
use noema_dash::terminal::{setup_panic_hook, TerminalManager};
use noema_dash::ui;

use color_eyre::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::Terminal;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;

/// Render-loop wakeup for the waiting spinner.
const FRAME_INTERVAL: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    color_eyre::install()?;

    let command = parse_args(std::env::args());
    if let Some(result) = run_cli_command(&command) {
        return result;
    }

    let runtime = tokio::runtime::Runtime::new()?;

    match command {
        CliCommand::Report { path, overrides } => {
            let config = overrides.resolve()?;
            init_logging(config.log_file.as_deref())?;
            let written = runtime.block_on(run_report(&config, &path))?;
            println!("Report written to {}", written.display());
            Ok(())
        }
        CliCommand::RunTui(overrides) => {
            let config = overrides.resolve()?;
            init_logging(config.log_file.as_deref())?;
            runtime.block_on(run_dashboard(config))
        }
        // Handled by run_cli_command
        CliCommand::Version | CliCommand::Help | CliCommand::Invalid(_) => Ok(()),
    }
}

async fn run_dashboard(config: DashConfig) -> Result<()> {
    info!(
        "Starting dashboard for {} (every {:?}, metric {})",
        config.base_url, config.poll_interval, config.metric
    );

    let client = RunApiClient::from_config(&config)?;
    let mut app = App::new(&config);
    let poller = spawn_poller(
        client,
        config.poll_interval,
        config.narrative_limit,
        app.message_tx.clone(),
    );

    // SIGINT from outside the terminal (raw mode turns Ctrl+C into a key event)
    let quit_tx = app.message_tx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = quit_tx.send(AppMessage::Quit);
        }
    });

    setup_panic_hook();
    let mut term_manager = TerminalManager::new()?;
    let size = term_manager.terminal().size()?;
    app.update_terminal_dimensions(size.width, size.height);

    let result = run_app(term_manager.terminal(), &mut app).await;

    term_manager.restore();
    poller.abort();
    info!(
        "Dashboard stopped after {} successful and {} failed polls",
        app.successful_polls, app.failed_polls
    );

    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();

    // Take the message receiver from the app (we need ownership for select!)
    let mut message_rx: Option<mpsc::UnboundedReceiver<AppMessage>> = app.message_rx.take();

    loop {
        if app.should_quit {
            return Ok(());
        }

        if app.needs_redraw {
            terminal.draw(|f| ui::render(f, app))?;
            app.needs_redraw = false;
        }

        let timeout = tokio::time::sleep(FRAME_INTERVAL);

        tokio::select! {
            _ = timeout => {
                app.tick();
            }

            event_result = event_stream.next() => {
                match event_result {
                    Some(Ok(Event::Resize(width, height))) => {
                        app.update_terminal_dimensions(width, height);
                    }
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        match key.code {
                            KeyCode::Char('q') | KeyCode::Esc => app.quit(),
                            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                                app.quit();
                            }
                            _ => {}
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    // stdin closed
                    None => app.quit(),
                }
            }

            Some(msg) = async {
                match message_rx.as_mut() {
                    Some(rx) => rx.recv().await,
                    None => std::future::pending().await,
                }
            } => {
                app.handle_message(msg);
            }
        }
    }
}
