//! Excel serial numbers to calendar date-times, and their display format.
//!
//! Serials in the 1900 system count days from 1899-12-31, with serial 1 being
//! 1900-01-01. Lotus 1-2-3 treated 1900 as a leap year, so serial 60 names a
//! 1900-02-29 that never existed: serials below 60 are shifted one day and the
//! phantom day collapses onto 1900-02-28. The 1904 system starts at
//! 1904-01-01 with serial 0. The fractional part is the time of day.

use chrono::Duration;
use chrono::NaiveDate;
use chrono::NaiveDateTime;

/// Text shown in place of a serial that does not name a representable date.
pub const INVALID_DATE: &str = "Fecha Inválida";

/// Days between 1899-12-30 and 1904-01-01
const EPOCH_1904_OFFSET: i64 = 1_462;

const SECONDS_PER_DAY: f64 = 86_400f64;

/// Converts an Excel serial to a date-time, or `None` when it is not finite
/// or falls outside the range chrono can represent.
pub fn serial_to_datetime(serial: f64, is_1904: bool) -> Option<NaiveDateTime> {
    if !serial.is_finite() {
        return None;
    }
    let whole = serial.trunc();
    if whole.abs() > i32::MAX as f64 {
        return None;
    }
    let days = whole as i64;
    let offset = if is_1904 {
        EPOCH_1904_OFFSET
    } else if days < 60 {
        1
    } else {
        0
    };
    let seconds = ((serial - whole) * SECONDS_PER_DAY).round() as i64;
    NaiveDate::from_ymd_opt(1899, 12, 30)?
        .checked_add_signed(Duration::try_days(days + offset)?)?
        .and_hms_opt(0, 0, 0)?
        .checked_add_signed(Duration::try_seconds(seconds)?)
}

/// Formats as `DD/MM/YYYY HH:MM`.
pub fn format_date_time(datetime: &NaiveDateTime) -> String {
    datetime.format("%d/%m/%Y %H:%M").to_string()
}

/// Formats a 1900-system serial, falling back to [`INVALID_DATE`].
pub fn format_serial(serial: f64) -> String {
    serial_to_datetime(serial, false)
        .map(|datetime| format_date_time(&datetime))
        .unwrap_or_else(|| INVALID_DATE.to_owned())
}
