use crate::domain::model::FlyOver;
use chrono::{DateTime, TimeZone};
use std::fmt::Display;

const RISE_TIME_FORMAT: &str = "%a %b %d %Y %H:%M:%S %z";

/// `Next pass at <time> for <duration> seconds!`, or `None` when the element
/// lacks a usable `risetime` or `duration`.
pub fn format_flyover<Tz>(pass: &FlyOver, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let rise_at: DateTime<Tz> = pass.rise_at()?.with_timezone(tz);
    let duration = pass.duration()?;

    Some(format!(
        "Next pass at {} for {} seconds!",
        rise_at.format(RISE_TIME_FORMAT),
        duration
    ))
}

pub fn format_flyovers<Tz>(passes: &[FlyOver], tz: &Tz) -> Vec<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    passes
        .iter()
        .filter_map(|pass| {
            let line = format_flyover(pass, tz);
            if line.is_none() {
                tracing::warn!("⚠️ Skipping malformed pass: {}", pass.as_value());
            }
            line
        })
        .collect()
}
