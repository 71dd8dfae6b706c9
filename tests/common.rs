#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, Local, TimeDelta};
use classclock::core::countdown::Clock;
use classclock::models::schedule::ScheduleRecord;
use std::env;
use std::fs;
use std::path::PathBuf;
use tokio::time::Instant;

pub fn ccl() -> Command {
    cargo_bin_cmd!("classclock")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_classclock.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Initialize a fresh DB through the CLI
pub fn init_db(db_path: &str) {
    ccl()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// A valid record starting `days_ahead` days from today.
pub fn future_record(days_ahead: i64) -> ScheduleRecord {
    let date = (Local::now() + TimeDelta::days(days_ahead)).date_naive();
    ScheduleRecord {
        title: "Estructuras de Datos".to_string(),
        topic: "Árboles y grafos".to_string(),
        subtitle: "Recorridos, balanceo y caminos mínimos".to_string(),
        date: date.format("%Y-%m-%d").to_string(),
        start_time: "18:00".to_string(),
        end_time: "19:30".to_string(),
        join_link: "https://meet.google.com/abc-defg-hij".to_string(),
    }
}

/// Wall clock that advances with tokio's (pausable) clock.
pub struct TokioClock {
    base: DateTime<Local>,
    origin: Instant,
}

impl TokioClock {
    pub fn new(base: DateTime<Local>) -> Self {
        Self {
            base,
            origin: Instant::now(),
        }
    }
}

impl Clock for TokioClock {
    fn now(&self) -> DateTime<Local> {
        let passed = Instant::now() - self.origin;
        self.base + TimeDelta::from_std(passed).expect("elapsed fits in TimeDelta")
    }
}
