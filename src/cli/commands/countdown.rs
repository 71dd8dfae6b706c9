use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::board::ClassBoard;
use crate::core::countdown::{CountdownTimer, SystemClock};
use crate::core::store::ClassScheduleStore;
use crate::errors::AppResult;
use crate::models::countdown::CountdownSnapshot;
use crate::models::schedule::ScheduleRecord;
use crate::storage::SqliteStorage;
use crate::ui::messages::{error, info};
use crate::ui::render::countdown_line;
use crate::utils::date::format_date_str_es;
use crate::utils::time::format_range;
use std::io::{self, Write};
use std::sync::Arc;

fn describe(record: &ScheduleRecord) -> String {
    format!(
        "📚 {} · {} · {}",
        record.title,
        format_date_str_es(&record.date),
        format_range(&record.start_time, &record.end_time)
    )
}

/// Redraw the countdown in place on the current terminal line.
fn draw(snap: &CountdownSnapshot, cfg: &Config) -> io::Result<()> {
    let mut out = io::stdout();
    write!(out, "\r\x1b[2K{}", countdown_line(snap, cfg.urgent_threshold_minutes))?;
    out.flush()
}

/// Handle the `countdown` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Countdown { once, follow } = cmd else {
        return Ok(());
    };

    let store = super::open_store(cfg)?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    rt.block_on(run(store, cfg, *once, *follow))
}

async fn run(
    store: ClassScheduleStore<SqliteStorage>,
    cfg: &Config,
    once: bool,
    follow: bool,
) -> AppResult<()> {
    println!("{}", describe(&store.current()));

    let timer = CountdownTimer::new(Arc::new(SystemClock), cfg.tick_interval());
    let mut board = ClassBoard::new(store, timer);
    let mut updates = board.countdown();

    if let Err(e) = board.start() {
        println!("{}", countdown_line(&board.timer().snapshot(), cfg.urgent_threshold_minutes));
        return Err(e);
    }

    if once {
        println!("{}", countdown_line(&board.timer().snapshot(), cfg.urgent_threshold_minutes));
        return Ok(());
    }

    let mut reload = tokio::time::interval(cfg.follow_interval());
    reload.tick().await;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snap = updates.borrow_and_update().clone();
                draw(&snap, cfg)?;

                if snap.phase.is_terminal() && !follow {
                    println!();
                    break;
                }
            }
            _ = reload.tick(), if follow => {
                match board.reload() {
                    Ok(true) => {
                        println!();
                        info(format!("Schedule changed: {}", describe(&board.store().current())));
                    }
                    Ok(false) => {}
                    Err(e) => {
                        println!();
                        error(e);
                    }
                }
            }
            _ = &mut ctrl_c => {
                board.stop();
                println!();
                break;
            }
        }
    }

    Ok(())
}
