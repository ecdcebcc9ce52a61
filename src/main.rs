use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::unbounded_channel;
use tracing::{debug, info};

use gitsweep::cleaner::{
    spinner, CancellationToken, CleanupSession, IndicatifProgress, MaintenanceCommand, NoopProgress,
    ProgressHandle, ProgressReporter,
};
use gitsweep::cli::Cli;
use gitsweep::config::Settings;
use gitsweep::input::map_key_to_intent;
use gitsweep::logging;
use gitsweep::view;
use gitsweep::viewmodel::{Action, AppViewModel, WorkerEvent};
use gitsweep::worker::Workers;

/// How long the UI waits for a key before draining worker events
const TICK: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.console_mode() {
        logging::init_console(cli.verbose);
    } else {
        let log_path = logging::init_file(cli.verbose)?;
        eprintln!("Logging to: {}", log_path.display());
    }

    let settings = Settings::resolve(&cli)?;
    debug!(?settings, "settings resolved");

    if cli.console_mode() {
        run_console(&cli, &settings).await
    } else {
        run_tui(&cli, &settings).await
    }
}

/// Discover repositories and take the baseline snapshot on a worker thread
async fn open_session(root: PathBuf, marker: String) -> Result<CleanupSession> {
    let session = tokio::task::spawn_blocking(move || {
        let session = CleanupSession::open(&root, &marker)?;
        session.repositories();
        Ok::<_, gitsweep::error::FinderError>(session)
    })
    .await
    .context("Scan worker stopped unexpectedly")??;
    Ok(session)
}

async fn run_console(cli: &Cli, settings: &Settings) -> Result<()> {
    let pb = (!cli.json).then(|| spinner("Searching for repositories"));
    let session = open_session(cli.root.clone(), settings.marker.clone()).await;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    let session = Arc::new(session?);

    if cli.json && cli.list {
        let paths: Vec<String> = session
            .repositories()
            .to_sorted_vec()
            .iter()
            .map(|r| r.to_string())
            .collect();
        println!("{}", serde_json::to_string_pretty(&paths)?);
        return Ok(());
    }
    if !cli.json {
        println!("{}", session.listing());
    }
    if cli.list {
        return Ok(());
    }
    if !cli.yes {
        eprintln!("Nothing cleaned. Pass --yes to run `{}` in each repository.",
            settings.command.join(" "));
        return Ok(());
    }

    let command = settings.maintenance_command()?;
    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("Cancelling after the current repository...");
            signal_cancel.cancel();
        }
    });

    let reporter: Box<dyn ProgressReporter> = if cli.json {
        Box::new(NoopProgress)
    } else {
        Box::new(IndicatifProgress)
    };
    let handle: Arc<dyn ProgressHandle> =
        Arc::from(reporter.start("Cleaning", session.repositories().len() as u64));

    let worker_session = Arc::clone(&session);
    let worker_handle = Arc::clone(&handle);
    let result = tokio::task::spawn_blocking(move || {
        worker_session.run(&command, |update| worker_handle.update(update), &cancel)
    })
    .await
    .context("Cleanup worker stopped unexpectedly")?;
    handle.finish();

    let report = result?;
    info!(cleaned = report.repositories_cleaned, "cleanup finished");
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report.to_json())?);
    } else {
        println!("Cleaning done!");
        println!();
        println!("Cleaning report:");
        println!("{}", report);
    }
    Ok(())
}

async fn run_tui(cli: &Cli, settings: &Settings) -> Result<()> {
    let command: Arc<dyn MaintenanceCommand> = Arc::new(settings.maintenance_command()?);
    let (tx, mut rx) = unbounded_channel();
    let mut app = AppViewModel::new(&cli.root);
    let mut workers = Workers::new(tx);

    workers.scan(cli.root.clone(), settings.marker.clone());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let outcome = event_loop(&mut terminal, &mut app, &mut rx, |app, action| {
        match action {
            Action::StartCleanup => {
                if let Some(session) = app.session() {
                    workers.clean(Arc::clone(session), Arc::clone(&command));
                }
            }
            Action::CancelCleanup => workers.cancel(),
            Action::Rescan => {
                workers.scan(app.root().to_path_buf(), settings.marker.clone());
            }
            Action::Redraw | Action::Quit => {}
        }
    });

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    workers.shutdown(|message| eprintln!("{}", message)).await;
    while let Ok(event) = rx.try_recv() {
        app.apply(event);
    }

    if let Some(report) = app.report() {
        println!("{}", report);
    } else if let Some(message) = app.message() {
        eprintln!("{}", message);
    }
    outcome
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppViewModel,
    rx: &mut tokio::sync::mpsc::UnboundedReceiver<WorkerEvent>,
    mut dispatch: impl FnMut(&AppViewModel, Action),
) -> Result<()> {
    loop {
        while let Ok(event) = rx.try_recv() {
            app.apply(event);
        }

        terminal.draw(|f| view::render(f, app))?;

        if !event::poll(TICK)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(intent) = map_key_to_intent(&key, app.input_view_mode()) {
                let action = app.handle_intent(intent);
                if action == Action::Quit {
                    return Ok(());
                }
                dispatch(app, action);
            }
        }
    }
}
