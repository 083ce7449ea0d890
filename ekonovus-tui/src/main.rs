//! Terminal UI for ekonovus that shows the waste collection schedule of one address.

mod app;
mod cli;
mod input;
mod ui;

use std::{
    fs::File,
    io::{self, Write as _},
    sync::{Arc, Mutex},
    time::Duration as StdDuration,
};

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ekonovus_core::{
    model::{Address, WasteObjectFilter},
    service::ScheduleService,
};
use ekonovus_provider_powerbi as powerbi;
use ratatui::{Terminal, backend::CrosstermBackend};
use reqwest::Client;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::cli::Cli;
use crate::input::Action;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    // HTTP + service setup
    let client = Client::builder().user_agent("ekonovus/0.1").build()?;
    let service = Arc::new(powerbi::service(client, cli.powerbi_config()));
    let address = cli.address();
    let filter = cli.filter();

    if cli.print {
        return print_schedule(&service, &address, &filter).await;
    }

    // App state
    let app = App::new(service, address, filter);

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let res = run(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn init_tracing(cli: &Cli) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(cli.log_level.into())
        .from_env_lossy();

    // Logging to the terminal would draw over the UI
    if let Some(path) = &cli.log_file {
        let file = File::create(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    } else if cli.print {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }

    Ok(())
}

async fn print_schedule(
    service: &ScheduleService,
    address: &Address,
    filter: &WasteObjectFilter,
) -> Result<()> {
    let events = service.fetch(address, filter).await?;

    let mut out = io::stdout().lock();
    for event in &events {
        writeln!(
            out,
            "{}\t{}\t{}",
            event.date.format("%Y-%m-%d"),
            event.waste_type,
            event.icon.as_deref().unwrap_or("-")
        )?;
    }

    Ok(())
}

async fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    // Load the schedule as soon as the UI is up
    let mut pending = Some(Action::Reload);

    loop {
        // Draw current UI
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Poll for input (non-blocking, small timeout to keep CPU low)
        let action = if let Some(action) = pending.take() {
            action
        } else if event::poll(StdDuration::from_millis(100))?
            && let CEvent::Key(key) = event::read()?
        {
            input::handle_key_event(key, &mut app, Local::now().date_naive())
        } else {
            Action::None
        };

        match action {
            Action::Quit => break,
            Action::None => {}
            Action::Reload => {
                app.is_loading = true;
                app.error_message = None;
                terminal.draw(|frame| ui::draw(frame, &app))?;

                let res = app.service.fetch(&app.address, &app.filter).await;

                app.is_loading = false;
                match res {
                    Ok(events) => {
                        app.set_events(events);
                    }
                    Err(err) => {
                        tracing::error!(%err, "failed to load schedule");
                        app.set_events(Vec::new());
                        app.error_message = Some(format!("Failed to load schedule: {err}"));
                    }
                }
            }
        }
    }

    Ok(())
}
