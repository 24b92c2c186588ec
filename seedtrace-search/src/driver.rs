//! Parallel drivers over the core's sequential search primitives. Every
//! worker owns a private engine; the only shared state is the immutable
//! query. Chunks are collected in submission order, so parallel output is
//! byte-identical to a sequential pass.

use anyhow::{anyhow, Context, Result};
use rayon::prelude::*;
use seedtrace_core::search::{
    search_calendar_date, search_seed_range, CalendarMatch, CalendarSpace, CompositeQuery,
    SeedMatch, SequenceQuery,
};

const DEFAULT_CHUNK_SPAN: u32 = 1 << 20;

pub struct DirectSearchConfig {
    pub start: u32,
    pub end: u32,
    pub query: SequenceQuery,
    pub jobs: Option<usize>,
}

pub struct CalendarSearchConfig {
    pub space: CalendarSpace,
    pub query: CompositeQuery,
    pub jobs: Option<usize>,
}

fn with_pool<T, F>(jobs: Option<usize>, run: F) -> Result<T>
where
    T: Send,
    F: FnOnce() -> T + Send,
{
    match jobs {
        Some(jobs) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build()
                .context("failed to build rayon threadpool")?;
            Ok(pool.install(run))
        }
        None => Ok(run()),
    }
}

/// Inclusive sub-ranges covering `start..=end`, in ascending order.
fn partition_range(start: u32, end: u32, span: u32) -> Vec<(u32, u32)> {
    let mut chunks = Vec::new();
    let mut cursor = start;
    loop {
        let remaining = end - cursor;
        let chunk_end = if remaining < span {
            end
        } else {
            cursor + (span - 1)
        };
        chunks.push((cursor, chunk_end));
        if chunk_end == end {
            break;
        }
        cursor = chunk_end + 1;
    }
    chunks
}

pub fn run_direct_search(config: &DirectSearchConfig) -> Result<Vec<SeedMatch>> {
    if config.start > config.end {
        return Err(anyhow!(
            "seed range start {:#010x} exceeds end {:#010x}",
            config.start,
            config.end
        ));
    }

    let chunks = partition_range(config.start, config.end, DEFAULT_CHUNK_SPAN);
    let per_chunk: Vec<Vec<SeedMatch>> = with_pool(config.jobs, || {
        chunks
            .par_iter()
            .map(|&(start, end)| search_seed_range(start..=end, &config.query))
            .collect()
    })?;

    Ok(per_chunk.into_iter().flatten().collect())
}

pub fn run_calendar_search(config: &CalendarSearchConfig) -> Result<Vec<CalendarMatch>> {
    let dates = config.space.dates();
    let times = config.space.times();
    if dates.is_empty() || times.is_empty() {
        return Ok(Vec::new());
    }

    let per_date: Vec<Result<Vec<CalendarMatch>>> = with_pool(config.jobs, || {
        dates
            .par_iter()
            .map(|&date| {
                search_calendar_date(date, &times, &config.query).map_err(|err| {
                    anyhow!(
                        "candidate evaluation failed for {}-{:02}-{:02}: {err}",
                        date.0,
                        date.1,
                        date.2
                    )
                })
            })
            .collect()
    })?;

    let mut matches = Vec::new();
    for result in per_date {
        matches.extend(result?);
    }
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use seedtrace_core::search::{search_calendar_space, PrefixTarget};
    use seedtrace_core::Lcg;

    fn draws_from(seed: u32, bound: u32, len: usize) -> Vec<u32> {
        let mut engine = Lcg::new(seed);
        (0..len)
            .map(|_| engine.next_bounded(bound).unwrap())
            .collect()
    }

    #[test]
    fn partition_covers_range_without_gaps() {
        let chunks = partition_range(0, 10, 4);
        assert_eq!(chunks, vec![(0, 3), (4, 7), (8, 10)]);

        let chunks = partition_range(5, 5, 4);
        assert_eq!(chunks, vec![(5, 5)]);

        // Full-space endpoints must not overflow.
        let chunks = partition_range(u32::MAX - 2, u32::MAX, 2);
        assert_eq!(chunks, vec![(u32::MAX - 2, u32::MAX - 1), (u32::MAX, u32::MAX)]);
    }

    #[test]
    fn parallel_direct_search_equals_sequential() {
        let query = SequenceQuery::new(16, draws_from(0x0003_2100, 16, 3)).unwrap();
        let sequential = search_seed_range(0..=0x0004_0000, &query);

        let parallel = run_direct_search(&DirectSearchConfig {
            start: 0,
            end: 0x0004_0000,
            query: query.clone(),
            jobs: Some(3),
        })
        .unwrap();

        assert_eq!(parallel, sequential);
        assert!(parallel.iter().any(|found| found.seed == 0x0003_2100));
    }

    #[test]
    fn rejects_inverted_seed_range() {
        let query = SequenceQuery::new(16, vec![0]).unwrap();
        let result = run_direct_search(&DirectSearchConfig {
            start: 10,
            end: 5,
            query,
            jobs: None,
        });
        assert!(result.is_err());
    }

    #[test]
    fn parallel_calendar_search_equals_sequential() {
        let query =
            CompositeQuery::new(0x7E90_56A0, 22, 16, PrefixTarget::AllZero { len: 3 }).unwrap();
        let space =
            CalendarSpace::new(2024..=2024, 1..=3, 1..=28, 0..=23, 0..=10, 10..=10).unwrap();

        let sequential = search_calendar_space(&space, &query).unwrap();
        let parallel = run_calendar_search(&CalendarSearchConfig {
            space,
            query,
            jobs: Some(4),
        })
        .unwrap();

        assert_eq!(parallel, sequential);
    }
}
