use chrono::{DateTime, TimeZone};
use flyover_core::PassWindow;
use serde::Serialize;
use std::fmt::Display;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// `Next pass is Sun Sep 09 2001 for 600 seconds!`, dated in `tz`.
pub fn pass_line<Tz>(window: &PassWindow, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match DateTime::from_timestamp(window.risetime, 0) {
        Some(utc) => format!(
            "Next pass is {} for {} seconds!",
            utc.with_timezone(tz).format("%a %b %d %Y"),
            window.duration
        ),
        // Outside chrono's range; show the raw timestamp rather than drop the pass.
        None => format!(
            "Next pass is at unix time {} for {} seconds!",
            window.risetime, window.duration
        ),
    }
}
