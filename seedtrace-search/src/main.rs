//! Seed-recovery CLI: brute-force and calendar-structured searches over the
//! target generator, backward state tracing, encoder inspection, and
//! encounter-round simulation.

mod driver;
mod report;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};

use driver::{run_calendar_search, run_direct_search, CalendarSearchConfig, DirectSearchConfig};
use report::{
    now_unix_s, write_json, CalendarMatchRecord, CalendarSearchReport, DirectSearchReport,
    EncounterReport, SeedMatchRecord,
};
use seedtrace_core::calendar::{encode_date, encode_time};
use seedtrace_core::encounter::{simulate_round, EncounterConfig, Mood, Selection, SlotRegistry};
use seedtrace_core::reverse::{closest_backtrace_pair, previous_states};
use seedtrace_core::search::{CalendarSpace, CompositeQuery, PrefixTarget, SequenceQuery};
use seedtrace_core::Lcg;

#[derive(Parser)]
#[command(name = "seedtrace")]
#[command(about = "Recover and replay seeds of the target LCG")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Brute-force a seed range against an observed draw sequence.
    Direct {
        /// First candidate seed, hex or decimal.
        #[arg(long, value_parser = parse_u32, default_value = "0x0")]
        start: u32,
        /// Last candidate seed, inclusive.
        #[arg(long, value_parser = parse_u32, default_value = "0xffffffff")]
        end: u32,
        /// Bound every observed draw was taken with.
        #[arg(long, default_value_t = 16)]
        bound: u32,
        /// Observed draws, comma separated.
        #[arg(long, value_delimiter = ',', required = true)]
        target: Vec<u32>,
        /// Worker thread count (default: rayon's choice).
        #[arg(long)]
        jobs: Option<usize>,
        /// Write a JSON report here in addition to stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Search the date/time seed space for a draw-prefix condition.
    Calendar {
        /// Base constant added to both encoder outputs.
        #[arg(long, value_parser = parse_u32, default_value = "0x7e9056a0")]
        base: u32,
        /// Jump applied to the derived seed before drawing.
        #[arg(long, default_value_t = 22)]
        jump_steps: u32,
        /// Bound for the prefix draws.
        #[arg(long, default_value_t = 16)]
        bound: u32,
        /// Accept candidates whose first N draws are all zero.
        #[arg(long, default_value_t = 5, conflicts_with = "target")]
        zero_prefix: usize,
        /// Accept candidates matching this exact prefix instead.
        #[arg(long, value_delimiter = ',')]
        target: Option<Vec<u32>>,
        #[arg(long, default_value_t = 2000)]
        year_start: i32,
        #[arg(long, default_value_t = 2099)]
        year_end: i32,
        #[arg(long, default_value_t = 1)]
        month_start: u32,
        #[arg(long, default_value_t = 12)]
        month_end: u32,
        #[arg(long, default_value_t = 1)]
        day_start: u32,
        #[arg(long, default_value_t = 31)]
        day_end: u32,
        #[arg(long, default_value_t = 0)]
        hour_start: u32,
        #[arg(long, default_value_t = 23)]
        hour_end: u32,
        #[arg(long, default_value_t = 0)]
        minute_start: u32,
        #[arg(long, default_value_t = 59)]
        minute_end: u32,
        /// The target observation fixes seconds; sweep only if asked.
        #[arg(long, default_value_t = 10)]
        second_start: u32,
        #[arg(long, default_value_t = 10)]
        second_end: u32,
        #[arg(long)]
        jobs: Option<usize>,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Walk one or two observed states backward.
    Backtrace {
        #[arg(value_parser = parse_u32)]
        seed: u32,
        /// Second observed state for closest-ancestor analysis.
        #[arg(long, value_parser = parse_u32)]
        other: Option<u32>,
        #[arg(long, default_value_t = 23)]
        steps: u32,
        /// Trail entries to ignore from the recent end in pair analysis.
        #[arg(long, default_value_t = 0)]
        skip: u32,
    },
    /// Print the date and time encoder outputs for one timestamp.
    Encode {
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    },
    /// Simulate encounter rounds from a seed with a JSON table config.
    Encounter {
        /// Path to the EncounterConfig JSON file.
        config: PathBuf,
        #[arg(long, value_parser = parse_u32)]
        seed: u32,
        #[arg(long, default_value_t = 100)]
        rounds: u32,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn parse_u32(raw: &str) -> Result<u32, String> {
    let parsed = if let Some(hex) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16)
    } else {
        raw.parse()
    };
    parsed.map_err(|err| format!("invalid 32-bit value '{raw}': {err}"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    match Cli::parse().command {
        Command::Direct {
            start,
            end,
            bound,
            target,
            jobs,
            out,
        } => cmd_direct(start, end, bound, target, jobs, out),
        Command::Calendar {
            base,
            jump_steps,
            bound,
            zero_prefix,
            target,
            year_start,
            year_end,
            month_start,
            month_end,
            day_start,
            day_end,
            hour_start,
            hour_end,
            minute_start,
            minute_end,
            second_start,
            second_end,
            jobs,
            out,
        } => {
            let prefix = match target {
                Some(target) => PrefixTarget::Exact(target),
                None => PrefixTarget::AllZero { len: zero_prefix },
            };
            let space = CalendarSpace::new(
                year_start..=year_end,
                month_start..=month_end,
                day_start..=day_end,
                hour_start..=hour_end,
                minute_start..=minute_end,
                second_start..=second_end,
            )?;
            let query = CompositeQuery::new(base, jump_steps, bound, prefix)?;
            cmd_calendar(space, query, jobs, out)
        }
        Command::Backtrace {
            seed,
            other,
            steps,
            skip,
        } => cmd_backtrace(seed, other, steps, skip),
        Command::Encode {
            year,
            month,
            day,
            hour,
            minute,
            second,
        } => {
            println!("date: {:#010x}", encode_date(year, month, day)?);
            println!("time: {:#010x}", encode_time(hour, minute, second)?);
            Ok(())
        }
        Command::Encounter {
            config,
            seed,
            rounds,
            out,
        } => cmd_encounter(&config, seed, rounds, out),
    }
}

fn cmd_direct(
    start: u32,
    end: u32,
    bound: u32,
    target: Vec<u32>,
    jobs: Option<usize>,
    out: Option<PathBuf>,
) -> Result<()> {
    let query = SequenceQuery::new(bound, target)?;
    let matches = run_direct_search(&DirectSearchConfig {
        start,
        end,
        query: query.clone(),
        jobs,
    })?;

    for found in &matches {
        println!("{:#010x}  draws {:?}", found.seed, found.draws);
    }
    println!("{} match(es) in {start:#010x}..={end:#010x}", matches.len());

    if let Some(path) = out {
        let report = DirectSearchReport {
            generated_unix_s: now_unix_s(),
            start_hex: format!("{start:#010x}"),
            end_hex: format!("{end:#010x}"),
            bound,
            target: query.target().to_vec(),
            match_count: matches.len(),
            matches: matches.iter().map(SeedMatchRecord::from).collect(),
        };
        write_json(&path, &report)?;
    }
    Ok(())
}

fn cmd_calendar(
    space: CalendarSpace,
    query: CompositeQuery,
    jobs: Option<usize>,
    out: Option<PathBuf>,
) -> Result<()> {
    let candidate_dates = space.dates().len();
    let candidate_times = space.times().len();
    let base = query.base;
    let jump_steps = query.jump_steps;
    let bound = query.bound.get();

    let matches = run_calendar_search(&CalendarSearchConfig { space, query, jobs })?;

    for found in &matches {
        println!(
            "{:#010x}  {}-{:02}-{:02} {:02}:{:02}:{:02}  date {:#010x} time {:#010x}",
            found.seed,
            found.params.year,
            found.params.month,
            found.params.day,
            found.params.hour,
            found.params.minute,
            found.params.second,
            found.date_code,
            found.time_code,
        );
    }
    println!(
        "{} match(es) over {candidate_dates} dates x {candidate_times} times",
        matches.len()
    );

    if let Some(path) = out {
        let report = CalendarSearchReport {
            generated_unix_s: now_unix_s(),
            base_hex: format!("{base:#010x}"),
            jump_steps,
            bound,
            candidate_dates,
            candidate_times,
            match_count: matches.len(),
            matches: matches.iter().map(CalendarMatchRecord::from).collect(),
        };
        write_json(&path, &report)?;
    }
    Ok(())
}

fn cmd_backtrace(seed: u32, other: Option<u32>, steps: u32, skip: u32) -> Result<()> {
    for (index, state) in previous_states(seed, steps).enumerate() {
        println!("{index:>3} steps back: {state:#010x}");
    }

    if let Some(other) = other {
        let pair = closest_backtrace_pair(seed, other, steps, skip)
            .ok_or_else(|| anyhow!("skip {skip} leaves no trail entries to compare"))?;
        println!(
            "closest ancestors: {:#010x} / {:#010x}, distance {:#x}",
            pair.state_a, pair.state_b, pair.distance
        );
    }
    Ok(())
}

fn cmd_encounter(config_path: &Path, seed: u32, rounds: u32, out: Option<PathBuf>) -> Result<()> {
    let raw = fs::read(config_path)
        .with_context(|| format!("failed reading {}", config_path.display()))?;
    let config: EncounterConfig = serde_json::from_slice(&raw)
        .with_context(|| format!("invalid encounter config {}", config_path.display()))?;
    config.validate()?;

    let mut engine = Lcg::new(seed);
    let mut registry = SlotRegistry::new();

    let mut extended = 0u32;
    let mut direct = 0u32;
    let mut companion = 0u32;
    let mut saturated_rounds = 0u32;
    let mut config_gaps = 0u32;
    let mut mood_first = 0u32;
    let mut mood_second = 0u32;

    for round in 0..rounds {
        let outcome = simulate_round(&mut engine, &config, &mut registry)?;
        if outcome.config_gaps > 0 {
            tracing::warn!(
                round,
                gaps = outcome.config_gaps,
                "resolver keys outside the configured domain fell back to zero"
            );
        }
        config_gaps += outcome.config_gaps;
        match outcome.mood {
            Mood::First => mood_first += 1,
            Mood::Second => mood_second += 1,
            Mood::Neutral => {}
        }
        match outcome.selection {
            Selection::Extended { .. } => extended += 1,
            Selection::Direct { .. } => direct += 1,
            Selection::Companion { saturated, .. } => {
                companion += 1;
                if saturated {
                    saturated_rounds += 1;
                }
            }
        }
    }

    println!(
        "{rounds} rounds from {seed:#010x}: {extended} extended, {direct} direct, \
         {companion} companion ({saturated_rounds} saturated), {config_gaps} config gaps"
    );
    for (index, slot) in registry.slots().iter().enumerate() {
        if slot.is_empty() {
            println!("slot {index}: empty");
        } else {
            println!(
                "slot {index}: id {} x{} (source category {})",
                slot.occupant_id, slot.occupant_count, slot.source_category
            );
        }
    }

    if let Some(path) = out {
        let report = EncounterReport {
            generated_unix_s: now_unix_s(),
            seed_hex: format!("{seed:#010x}"),
            rounds,
            extended,
            direct,
            companion,
            saturated_rounds,
            config_gaps,
            mood_first,
            mood_second,
        };
        write_json(&path, &report)?;
    }
    Ok(())
}
