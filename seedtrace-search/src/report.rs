//! JSON report shapes written by the CLI subcommands.

use anyhow::{Context, Result};
use seedtrace_core::search::{CalendarMatch, SeedMatch};
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Clone, Debug, Serialize)]
pub struct SeedMatchRecord {
    pub seed: u32,
    pub seed_hex: String,
    pub draws: Vec<u32>,
}

impl From<&SeedMatch> for SeedMatchRecord {
    fn from(found: &SeedMatch) -> Self {
        Self {
            seed: found.seed,
            seed_hex: format!("{:#010x}", found.seed),
            draws: found.draws.clone(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct DirectSearchReport {
    pub generated_unix_s: u64,
    pub start_hex: String,
    pub end_hex: String,
    pub bound: u32,
    pub target: Vec<u32>,
    pub match_count: usize,
    pub matches: Vec<SeedMatchRecord>,
}

#[derive(Clone, Debug, Serialize)]
pub struct CalendarMatchRecord {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub date_code_hex: String,
    pub time_code_hex: String,
    pub seed_hex: String,
    pub start_state_hex: String,
    pub draws: Vec<u32>,
}

impl From<&CalendarMatch> for CalendarMatchRecord {
    fn from(found: &CalendarMatch) -> Self {
        Self {
            year: found.params.year,
            month: found.params.month,
            day: found.params.day,
            hour: found.params.hour,
            minute: found.params.minute,
            second: found.params.second,
            date_code_hex: format!("{:#010x}", found.date_code),
            time_code_hex: format!("{:#010x}", found.time_code),
            seed_hex: format!("{:#010x}", found.seed),
            start_state_hex: format!("{:#010x}", found.start_state),
            draws: found.draws.clone(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct CalendarSearchReport {
    pub generated_unix_s: u64,
    pub base_hex: String,
    pub jump_steps: u32,
    pub bound: u32,
    pub candidate_dates: usize,
    pub candidate_times: usize,
    pub match_count: usize,
    pub matches: Vec<CalendarMatchRecord>,
}

#[derive(Clone, Debug, Serialize)]
pub struct EncounterReport {
    pub generated_unix_s: u64,
    pub seed_hex: String,
    pub rounds: u32,
    pub extended: u32,
    pub direct: u32,
    pub companion: u32,
    pub saturated_rounds: u32,
    pub config_gaps: u32,
    pub mood_first: u32,
    pub mood_second: u32,
}

pub fn now_unix_s() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed creating {}", parent.display()))?;
    }
    let encoded = serde_json::to_vec_pretty(value)?;
    fs::write(path, encoded).with_context(|| format!("failed writing {}", path.display()))
}
