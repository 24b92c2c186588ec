//! Sequential seed-recovery primitives. Both search modes are brute force
//! over a bounded discrete space and carry no shared mutable state: every
//! candidate evaluation owns a private engine, so callers are free to
//! partition the space across workers (the CLI crate does exactly that).

use std::num::NonZeroU32;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::calendar::{days_in_month, encode_date, encode_time};
use crate::error::DomainError;
use crate::rng::Lcg;

/// A target sequence of bounded draws, as observed from the generator's
/// output. `bound` is the bound every draw was taken with.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceQuery {
    bound: NonZeroU32,
    target: Vec<u32>,
}

impl SequenceQuery {
    pub fn new(bound: u32, target: Vec<u32>) -> Result<Self, DomainError> {
        let bound = NonZeroU32::new(bound).ok_or(DomainError::ZeroBound)?;
        Ok(Self { bound, target })
    }

    pub fn bound(&self) -> u32 {
        self.bound.get()
    }

    pub fn target(&self) -> &[u32] {
        &self.target
    }

    pub fn len(&self) -> usize {
        self.target.len()
    }

    pub fn is_empty(&self) -> bool {
        self.target.is_empty()
    }
}

/// One accepted candidate: the seed plus the full draw sequence it produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedMatch {
    pub seed: u32,
    pub draws: Vec<u32>,
}

/// Tests one candidate seed against the query, short-circuiting on the first
/// mismatching draw. Returns the generated sequence on acceptance.
pub fn match_seed(seed: u32, query: &SequenceQuery) -> Option<Vec<u32>> {
    let mut engine = Lcg::new(seed);
    let mut draws = Vec::with_capacity(query.target.len());
    for &expected in &query.target {
        let draw = engine.next_in(query.bound);
        if draw != expected {
            return None;
        }
        draws.push(draw);
    }
    Some(draws)
}

/// Brute-force direct search over an inclusive seed range, ascending order,
/// reporting every match. "No match" is an empty vector, not an error.
pub fn search_seed_range(range: RangeInclusive<u32>, query: &SequenceQuery) -> Vec<SeedMatch> {
    let mut matches = Vec::new();
    for seed in range {
        if let Some(draws) = match_seed(seed, query) {
            matches.push(SeedMatch { seed, draws });
        }
    }
    matches
}

/// Acceptance condition on the drawn prefix of a composite candidate. Both
/// variants know the expected value at each position, so evaluation can
/// short-circuit the same way the direct search does.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrefixTarget {
    /// The prefix must equal this sequence exactly.
    Exact(Vec<u32>),
    /// The first `len` draws must all be zero.
    AllZero { len: usize },
}

impl PrefixTarget {
    pub fn len(&self) -> usize {
        match self {
            Self::Exact(target) => target.len(),
            Self::AllZero { len } => *len,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn expected_at(&self, index: usize) -> u32 {
        match self {
            Self::Exact(target) => target[index],
            Self::AllZero { .. } => 0,
        }
    }
}

/// One point of the composite date/time search space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarParams {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

/// Inclusive per-field ranges for the composite search. Field validity is
/// checked once at construction; enumeration order is fixed lexicographic
/// (year, month, day, hour, minute, second) so runs are reproducible.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarSpace {
    years: RangeInclusive<i32>,
    months: RangeInclusive<u32>,
    days: RangeInclusive<u32>,
    hours: RangeInclusive<u32>,
    minutes: RangeInclusive<u32>,
    seconds: RangeInclusive<u32>,
}

impl CalendarSpace {
    pub fn new(
        years: RangeInclusive<i32>,
        months: RangeInclusive<u32>,
        days: RangeInclusive<u32>,
        hours: RangeInclusive<u32>,
        minutes: RangeInclusive<u32>,
        seconds: RangeInclusive<u32>,
    ) -> Result<Self, DomainError> {
        if *years.start() < 2000 {
            return Err(DomainError::YearOutOfRange {
                year: *years.start(),
            });
        }
        if *years.end() > 2099 {
            return Err(DomainError::YearOutOfRange { year: *years.end() });
        }
        if *months.start() < 1 {
            return Err(DomainError::MonthOutOfRange {
                month: *months.start(),
            });
        }
        if *months.end() > 12 {
            return Err(DomainError::MonthOutOfRange {
                month: *months.end(),
            });
        }
        if *days.start() < 1 {
            return Err(DomainError::DayOutOfRange {
                year: *years.start(),
                month: *months.start(),
                day: *days.start(),
            });
        }
        if *days.end() > 31 {
            return Err(DomainError::DayOutOfRange {
                year: *years.start(),
                month: *months.start(),
                day: *days.end(),
            });
        }
        if *hours.end() > 23 {
            return Err(DomainError::HourOutOfRange {
                hour: *hours.end(),
            });
        }
        if *minutes.end() > 59 {
            return Err(DomainError::MinuteOutOfRange {
                minute: *minutes.end(),
            });
        }
        if *seconds.end() > 59 {
            return Err(DomainError::SecondOutOfRange {
                second: *seconds.end(),
            });
        }
        Ok(Self {
            years,
            months,
            days,
            hours,
            minutes,
            seconds,
        })
    }

    /// Valid (year, month, day) triples in enumeration order. Cross-product
    /// days that do not exist in their month (for example April 31) are
    /// skipped rather than reported as errors.
    pub fn dates(&self) -> Vec<(i32, u32, u32)> {
        let mut dates = Vec::new();
        for year in self.years.clone() {
            for month in self.months.clone() {
                let last = days_in_month(year, month);
                for day in self.days.clone() {
                    if day <= last {
                        dates.push((year, month, day));
                    }
                }
            }
        }
        dates
    }

    /// (hour, minute, second) triples in enumeration order.
    pub fn times(&self) -> Vec<(u32, u32, u32)> {
        let mut times = Vec::new();
        for hour in self.hours.clone() {
            for minute in self.minutes.clone() {
                for second in self.seconds.clone() {
                    times.push((hour, minute, second));
                }
            }
        }
        times
    }
}

/// Composite search query: candidate seed = `base + encode_date + encode_time`
/// (wrapping), optionally jumped forward before drawing the prefix.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeQuery {
    pub base: u32,
    pub jump_steps: u32,
    pub bound: NonZeroU32,
    pub target: PrefixTarget,
}

impl CompositeQuery {
    pub fn new(
        base: u32,
        jump_steps: u32,
        bound: u32,
        target: PrefixTarget,
    ) -> Result<Self, DomainError> {
        let bound = NonZeroU32::new(bound).ok_or(DomainError::ZeroBound)?;
        Ok(Self {
            base,
            jump_steps,
            bound,
            target,
        })
    }
}

/// An accepted composite candidate: the parameter tuple, both encoder
/// outputs, the derived seed, the post-jump start state, and the drawn
/// prefix that satisfied the target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarMatch {
    pub params: CalendarParams,
    pub date_code: u32,
    pub time_code: u32,
    pub seed: u32,
    pub start_state: u32,
    pub draws: Vec<u32>,
}

/// Evaluates a single composite candidate. `DomainError` here means the
/// parameters themselves were invalid; rejection is `Ok(None)`.
pub fn evaluate_calendar_candidate(
    params: CalendarParams,
    query: &CompositeQuery,
) -> Result<Option<CalendarMatch>, DomainError> {
    let date_code = encode_date(params.year, params.month, params.day)?;
    let time_code = encode_time(params.hour, params.minute, params.second)?;
    let seed = query.base.wrapping_add(date_code).wrapping_add(time_code);

    let mut engine = Lcg::new(seed);
    let start_state = engine.jump(query.jump_steps);

    let mut draws = Vec::with_capacity(query.target.len());
    for index in 0..query.target.len() {
        let draw = engine.next_in(query.bound);
        if draw != query.target.expected_at(index) {
            return Ok(None);
        }
        draws.push(draw);
    }

    Ok(Some(CalendarMatch {
        params,
        date_code,
        time_code,
        seed,
        start_state,
        draws,
    }))
}

/// All composite matches for one date across the given times, in time order.
pub fn search_calendar_date(
    date: (i32, u32, u32),
    times: &[(u32, u32, u32)],
    query: &CompositeQuery,
) -> Result<Vec<CalendarMatch>, DomainError> {
    let (year, month, day) = date;
    let mut matches = Vec::new();
    for &(hour, minute, second) in times {
        let params = CalendarParams {
            year,
            month,
            day,
            hour,
            minute,
            second,
        };
        if let Some(found) = evaluate_calendar_candidate(params, query)? {
            matches.push(found);
        }
    }
    Ok(matches)
}

/// Sequential composite search over the whole space, reporting every match
/// in enumeration order.
pub fn search_calendar_space(
    space: &CalendarSpace,
    query: &CompositeQuery,
) -> Result<Vec<CalendarMatch>, DomainError> {
    let times = space.times();
    let mut matches = Vec::new();
    for date in space.dates() {
        matches.extend(search_calendar_date(date, &times, query)?);
    }
    Ok(matches)
}
