//! Celina demo entrypoint.
//!
//! Draws a one-line status bar and a growing tick counter, quitting on `q`
//! or Ctrl-C. Exercises the whole tick pipeline end to end: config loading,
//! layout, input decoding, and the differential renderer.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Result;
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;

use celina::app::{App, Config};
use celina::events::{Event, KeyCode};
use celina::geometry::Rect;
use celina::layout::{split, Constraint, Direction, Layout};
use celina::style::Style;
use celina::terminal::{terminal_size_or_default, CrosstermBackend};

#[derive(Parser, Debug)]
#[command(name = "celina-demo", version, about = "Celina framework demo")]
struct Args {
    /// Optional path to a TOML config file (defaults to built-in values).
    #[arg(long = "config")]
    config: Option<PathBuf>,
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_path = PathBuf::from("celina-demo.log");
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }
    let file_appender = tracing_appender::rolling::never(".", "celina-demo.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(writer)
        .try_init()
    {
        Ok(()) => Some(guard),
        Err(_) => None,
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = configure_logging();

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let initial_area = terminal_size_or_default();
    let backend = Box::new(CrosstermBackend::new());
    let source = celina::events::stdin();

    let mut app = App::new(config, backend, source, initial_area);

    let mut ticks: u64 = 0;
    let last_key = Rc::new(RefCell::new(String::from("none")));

    let last_key_for_event = Rc::clone(&last_key);
    app.on_event(move |event, ctl| {
        if let Event::Key(key) = event {
            *last_key_for_event.borrow_mut() = format!("{:?}", key.code);
            if matches!(key.code, KeyCode::Char('q')) {
                ctl.quit();
            }
        }
        true
    });

    app.on_render(move |buffer| {
        ticks += 1;
        let area = Rect::new(0, 0, buffer.area().width, buffer.area().height);
        let rows = split(&Layout::new(Direction::Vertical, vec![Constraint::Length(1), Constraint::Fill(1)]), area);
        let status = format!("celina-demo | tick {ticks} | last key: {} | q to quit", last_key.borrow());
        buffer.set_string(rows[0].x, rows[0].y, &status, Style::default(), "");
    });

    app.run()?;
    Ok(())
}
