use core::fmt;

/// Input that is outside the domain an operation requires. These are always
/// surfaced to the caller, never clamped. Unsupported jump sizes are a
/// documented no-op instead (see [`crate::rng::Lcg::jump`]), and an empty
/// search result is an empty collection, not an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DomainError {
    ZeroBound,
    YearOutOfRange { year: i32 },
    MonthOutOfRange { month: u32 },
    DayOutOfRange { year: i32, month: u32, day: u32 },
    HourOutOfRange { hour: u32 },
    MinuteOutOfRange { minute: u32 },
    SecondOutOfRange { second: u32 },
    EmptyWeightTable,
    OffsetOutOfRange { offset: usize, table_len: usize },
    LengthMismatch { field: &'static str, expected: usize, actual: usize },
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroBound => write!(f, "bounded draw requires a bound > 0"),
            Self::YearOutOfRange { year } => {
                write!(f, "year out of range: {year} (supported 2000..=2099)")
            }
            Self::MonthOutOfRange { month } => {
                write!(f, "month out of range: {month} (allowed 1..=12)")
            }
            Self::DayOutOfRange { year, month, day } => {
                write!(f, "day out of range: {day} for {year}-{month:02}")
            }
            Self::HourOutOfRange { hour } => {
                write!(f, "hour out of range: {hour} (allowed 0..=23)")
            }
            Self::MinuteOutOfRange { minute } => {
                write!(f, "minute out of range: {minute} (allowed 0..=59)")
            }
            Self::SecondOutOfRange { second } => {
                write!(f, "second out of range: {second} (allowed 0..=59)")
            }
            Self::EmptyWeightTable => write!(f, "weight table sums to zero"),
            Self::OffsetOutOfRange { offset, table_len } => {
                write!(f, "table offset {offset} out of range for length {table_len}")
            }
            Self::LengthMismatch {
                field,
                expected,
                actual,
            } => write!(
                f,
                "configuration field '{field}' has length {actual}, expected {expected}"
            ),
        }
    }
}

impl std::error::Error for DomainError {}
