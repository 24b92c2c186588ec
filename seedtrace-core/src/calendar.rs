//! Calendar and clock encoders. The target derives its seed by adding a
//! fixed base constant to one encoded date word and one encoded time word,
//! so the composite search enumerates these codes instead of raw seeds.
//!
//! Both encoders pack decimal fields through the adjustment
//! `x + (x / 10) * 6`, which turns a two-digit decimal value into the byte
//! whose hex digits spell it (24 -> 0x24).

use crate::error::DomainError;

const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a month. Requires `month` in `1..=12`.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    if month == 2 && is_leap_year(year) {
        29
    } else {
        DAYS_IN_MONTH[(month - 1) as usize]
    }
}

/// Day-of-week index, 0 = Sunday .. 6 = Saturday (Sakamoto's method).
fn day_of_week(year: i32, month: u32, day: u32) -> u32 {
    const OFFSETS: [i32; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];
    let y = if month < 3 { year - 1 } else { year };
    let adjusted = y + y / 4 - y / 100 + y / 400 + OFFSETS[(month - 1) as usize] + day as i32;
    (adjusted % 7) as u32
}

fn decimal_to_hex_digits(value: u32) -> u32 {
    value + (value / 10) * 6
}

/// Encodes a calendar date into the seed-offset word
/// `weekday << 24 | day << 16 | month << 8 | (year - 2000)`, with every
/// decimal field routed through the digit adjustment first.
pub fn encode_date(year: i32, month: u32, day: u32) -> Result<u32, DomainError> {
    if !(2000..=2099).contains(&year) {
        return Err(DomainError::YearOutOfRange { year });
    }
    if !(1..=12).contains(&month) {
        return Err(DomainError::MonthOutOfRange { month });
    }
    if day < 1 || day > days_in_month(year, month) {
        return Err(DomainError::DayOutOfRange { year, month, day });
    }

    let weekday = day_of_week(year, month, day);
    let year2 = decimal_to_hex_digits((year - 2000) as u32);

    Ok((weekday & 0xFF) << 24
        | (decimal_to_hex_digits(day) & 0xFF) << 16
        | (decimal_to_hex_digits(month) & 0xFF) << 8
        | (year2 & 0xFF))
}

/// Encodes a time of day into the seed-offset word
/// `second << 16 | minute << 8 | hour`. Hours 0..=11 are digit-adjusted;
/// 12..=19 map to `0x52..=0x59` and 20..=23 to `0x60..=0x63`, matching the
/// target's split hour table.
pub fn encode_time(hour: u32, minute: u32, second: u32) -> Result<u32, DomainError> {
    if hour > 23 {
        return Err(DomainError::HourOutOfRange { hour });
    }
    if minute > 59 {
        return Err(DomainError::MinuteOutOfRange { minute });
    }
    if second > 59 {
        return Err(DomainError::SecondOutOfRange { second });
    }

    let hour_code = match hour {
        0..=11 => decimal_to_hex_digits(hour),
        12..=19 => hour - 12 + 0x52,
        _ => hour - 20 + 0x60,
    };

    Ok(decimal_to_hex_digits(second) << 16 | decimal_to_hex_digits(minute) << 8 | hour_code)
}
