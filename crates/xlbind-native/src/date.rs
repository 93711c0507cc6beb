//! Date serial numbers
//!
//! Dates are stored as fractional day counts. The 1900 system keeps the
//! historical phantom 1900-02-29 (serial 60); the 1904 system counts from
//! 1904-01-01.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};

use crate::error::{NativeError, Result};

const MS_PER_DAY: f64 = 86_400_000.0;

/// Calendar components of a date serial
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateParts {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub millisecond: u32,
}

impl DateParts {
    /// Midnight of a calendar day
    pub fn ymd(year: i32, month: u32, day: u32) -> Self {
        Self {
            year,
            month,
            day,
            hour: 0,
            minute: 0,
            second: 0,
            millisecond: 0,
        }
    }
}

fn epoch(date1904: bool) -> NaiveDateTime {
    let (y, m, d) = if date1904 { (1904, 1, 1) } else { (1899, 12, 30) };
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Convert calendar components to a serial number
pub fn pack(parts: DateParts, date1904: bool) -> Result<f64> {
    if !date1904 && (parts.year, parts.month, parts.day) == (1900, 2, 29) {
        return Ok(60.0 + time_fraction(&parts)?);
    }

    let date = NaiveDate::from_ymd_opt(parts.year, parts.month, parts.day)
        .ok_or(NativeError::InvalidDate)?;
    let days = (date - epoch(date1904).date()).num_days();
    // Serials before the phantom leap day are one lower than the plain count
    let days = if !date1904 && days < 61 { days - 1 } else { days };
    if days < 0 {
        return Err(NativeError::InvalidDate);
    }
    Ok(days as f64 + time_fraction(&parts)?)
}

fn time_fraction(parts: &DateParts) -> Result<f64> {
    if parts.hour > 23 || parts.minute > 59 || parts.second > 59 || parts.millisecond > 999 {
        return Err(NativeError::InvalidDate);
    }
    let ms = ((parts.hour * 60 + parts.minute) * 60 + parts.second) * 1000 + parts.millisecond;
    Ok(f64::from(ms) / MS_PER_DAY)
}

/// Convert a serial number to calendar components
pub fn unpack(serial: f64, date1904: bool) -> Result<DateParts> {
    if !serial.is_finite() || serial < 0.0 || serial > 2_958_466.0 {
        return Err(NativeError::InvalidDate);
    }

    let mut days = serial.trunc() as i64;
    let ms = ((serial - serial.trunc()) * MS_PER_DAY).round() as i64;

    if !date1904 {
        if days == 60 {
            return Ok(with_time(DateParts::ymd(1900, 2, 29), ms));
        }
        if days < 60 {
            days += 1;
        }
    }

    let stamp = epoch(date1904) + Duration::days(days) + Duration::milliseconds(ms);
    Ok(DateParts {
        year: stamp.year(),
        month: stamp.month(),
        day: stamp.day(),
        hour: stamp.hour(),
        minute: stamp.minute(),
        second: stamp.second(),
        millisecond: stamp.nanosecond() / 1_000_000,
    })
}

fn with_time(mut parts: DateParts, ms: i64) -> DateParts {
    let ms = ms.clamp(0, MS_PER_DAY as i64 - 1) as u32;
    parts.hour = ms / 3_600_000;
    parts.minute = ms / 60_000 % 60;
    parts.second = ms / 1000 % 60;
    parts.millisecond = ms % 1000;
    parts
}
