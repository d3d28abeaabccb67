use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::{
    types::{ArtistData, DatePrecision, ReleaseDate},
    warning,
};

pub const ARTIST_SEPARATOR: &str = ", ";

/// Expands a partial-precision release date into a full `YYYY-MM-DD` string.
///
/// Returns `None` when the precision is not one of day, month or year.
pub fn complete_release_date(date: &ReleaseDate) -> Option<String> {
    match date.precision {
        DatePrecision::Day => Some(date.raw.clone()),
        DatePrecision::Month => Some(format!("{}-01", date.raw)),
        DatePrecision::Year => Some(format!("{}-01-01", date.raw)),
        DatePrecision::Unknown => None,
    }
}

pub fn parse_release_date(date: &ReleaseDate) -> Result<NaiveDate, String> {
    let completed = complete_release_date(date)
        .ok_or_else(|| format!("unsupported release date precision for \"{}\"", date.raw))?;

    NaiveDate::parse_from_str(&completed, "%Y-%m-%d")
        .map_err(|e| format!("cannot parse release date \"{}\": {}", completed, e))
}

/// Decides whether a release counts as new.
///
/// A release is new when it happened less than `threshold_days` before `now`.
/// A threshold reaching past the earliest representable date makes every
/// parseable release new. Freshness is advisory: a date that cannot be parsed
/// is logged and treated as not new.
///
/// # Example
///
/// ```
/// let date = ReleaseDate::new("2024-01", DatePrecision::Month);
/// // completed to 2024-01-01, which is within 90 days of 2024-01-20
/// assert!(is_new(&date, 90, now));
/// ```
pub fn is_new(date: &ReleaseDate, threshold_days: u32, now: DateTime<Utc>) -> bool {
    match parse_release_date(date) {
        Ok(released) => {
            let released_at = released.and_time(chrono::NaiveTime::MIN).and_utc();
            match Duration::try_days(i64::from(threshold_days))
                .and_then(|threshold| now.checked_sub_signed(threshold))
            {
                Some(cutoff) => cutoff < released_at,
                // the cutoff lies before any representable date
                None => true,
            }
        }
        Err(e) => {
            warning!("Cannot classify release freshness: {}", e);
            false
        }
    }
}

pub fn join_artists(artists: &[ArtistData]) -> String {
    artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(ARTIST_SEPARATOR)
}

pub fn is_single(album_type: &str) -> bool {
    album_type == "single"
}
