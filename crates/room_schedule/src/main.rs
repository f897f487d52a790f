use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use room_schedule::config::DEFAULT_CONFIG_PATH;
use room_schedule::render;
use room_schedule::view::NO_LESSONS_NOTICE;
use room_schedule::{AppConfig, MinuteTicker, ScheduleCache, ScheduleClient, ScheduleView, SelectOutcome};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Classroom schedule display simulator", long_about = None)]
struct Cli {
    /// JSON config file holding the room id
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Date to display (DD.MM.YYYY); defaults to today
    #[arg(short, long, value_parser = parse_date)]
    date: Option<NaiveDate>,

    /// Render once and exit instead of running the clock loop
    #[arg(long)]
    once: bool,
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%d.%m.%Y").map_err(|e| format!("expected DD.MM.YYYY: {e}"))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    let client = ScheduleClient::with_config(config.client_config())
        .context("building schedule client")?;
    let cache = ScheduleCache::with_room(client, config.room_id.clone());
    info!(room_id = %config.room_id, "Schedule display starting");

    let mut view = ScheduleView::new();
    let now = Local::now().naive_local();
    let date = cli.date.unwrap_or_else(|| now.date());

    if view.select_date(&cache, date, now).await == SelectOutcome::NoLessons {
        warn!(date = %date, "{}", NO_LESSONS_NOTICE);
    }
    draw(&view, now)?;

    if cli.once {
        return Ok(());
    }

    let mut ticker = MinuteTicker::new();
    ticker.poll(now);
    let mut interval = tokio::time::interval(Duration::from_secs(1));

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down");
                return Ok(());
            }
        }

        let now = Local::now().naive_local();
        if ticker.poll(now) {
            view.refresh(&cache, now).await;
            draw(&view, now)?;
        } else if view.tick(now) {
            draw(&view, now)?;
        }
    }
}

fn draw(view: &ScheduleView, now: chrono::NaiveDateTime) -> Result<()> {
    let mut stdout = io::stdout().lock();
    // clear the terminal and home the cursor
    write!(stdout, "\x1b[2J\x1b[H{}", render::screen(view, now))?;
    stdout.flush()?;
    Ok(())
}
