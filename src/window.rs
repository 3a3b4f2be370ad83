use anyhow::{Context, Result};
use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use clap::ValueEnum;

// Query windows for the scheduler listing endpoint.

pub const LISTING_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const LOOKUP_FORMAT: &str = "%Y-%m-%d";

/// Relative lookback accepted by the failed-jobs mode.
#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum)]
pub enum TimePeriod {
  #[value(name = "fifteenMinutes", alias = "15m")]
  FifteenMinutes,
  #[value(name = "thirtyMinutes", alias = "30m")]
  ThirtyMinutes,
  #[value(name = "oneHour", alias = "1h")]
  OneHour,
  #[value(name = "twoHours", alias = "2h")]
  TwoHours,
  #[value(name = "fourHours", alias = "4h")]
  FourHours,
  #[value(name = "eightHours", alias = "8h")]
  EightHours,
  #[value(name = "twelveHours", alias = "12h")]
  TwelveHours,
  #[value(name = "oneDay", alias = "1d")]
  OneDay,
}

impl TimePeriod {
  pub fn duration(self) -> Duration {
    match self {
      TimePeriod::FifteenMinutes => Duration::minutes(15),
      TimePeriod::ThirtyMinutes => Duration::minutes(30),
      TimePeriod::OneHour => Duration::hours(1),
      TimePeriod::TwoHours => Duration::hours(2),
      TimePeriod::FourHours => Duration::hours(4),
      TimePeriod::EightHours => Duration::hours(8),
      TimePeriod::TwelveHours => Duration::hours(12),
      TimePeriod::OneDay => Duration::days(1),
    }
  }

  /// Parse a keyword (canonical name or short alias), case-sensitive.
  pub fn parse(raw: &str) -> Option<Self> {
    <TimePeriod as ValueEnum>::from_str(raw, false).ok()
  }

  /// Canonical keywords, for usage text.
  pub fn keywords() -> Vec<String> {
    TimePeriod::value_variants()
      .iter()
      .filter_map(|p| p.to_possible_value())
      .map(|v| v.get_name().to_string())
      .collect()
  }
}

/// An absolute window, stored at the offset of the zone it was computed in.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TimeWindow {
  pub start: DateTime<FixedOffset>,
  pub end: DateTime<FixedOffset>,
  pub zone: String,
}

impl TimeWindow {
  pub fn span(&self) -> Duration {
    self.end - self.start
  }

  /// Render (start, end) with a strftime pattern in the window's own zone.
  pub fn render(&self, pattern: &str) -> (String, String) {
    (self.start.format(pattern).to_string(), self.end.format(pattern).to_string())
  }
}

/// Window for the failed-jobs listing: `[now - period, now]` in `zone`.
pub fn failed_jobs_window(period: TimePeriod, zone: Tz, now: DateTime<Utc>) -> TimeWindow {
  let end = now.with_timezone(&zone);
  let start = end - period.duration();

  TimeWindow {
    start: start.fixed_offset(),
    end: end.fixed_offset(),
    zone: zone.name().to_string(),
  }
}

/// 24-hour lookback used when searching for a single job, anchored to local time.
pub fn lookup_window(now: DateTime<Utc>) -> TimeWindow {
  let end = now.with_timezone(&Local);
  let start = end - Duration::hours(24);

  TimeWindow {
    start: start.fixed_offset(),
    end: end.fixed_offset(),
    zone: "local".to_string(),
  }
}

/// Parse a `--now-override` string. Accepts RFC3339 or a naive `%Y-%m-%dT%H:%M:%S` read as UTC.
pub fn parse_now_override(s: Option<&str>) -> Option<DateTime<Utc>> {
  s.and_then(|raw| {
    DateTime::parse_from_rfc3339(raw)
      .ok()
      .map(|dt| dt.with_timezone(&Utc))
      .or_else(|| {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
          .ok()
          .map(|ndt| Utc.from_utc_datetime(&ndt))
      })
  })
}

pub fn effective_now(override_now: Option<DateTime<Utc>>) -> DateTime<Utc> {
  override_now.unwrap_or_else(Utc::now)
}

pub fn parse_zone(name: &str) -> Result<Tz> {
  name
    .parse::<Tz>()
    .map_err(anyhow::Error::msg)
    .with_context(|| format!("unknown timezone {name:?}"))
}

/// True when the string is an ISO-8601 instant, naive datetime, or plain date.
pub fn is_iso_datetime(raw: &str) -> bool {
  DateTime::parse_from_rfc3339(raw).is_ok()
    || NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
    || NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M").is_ok()
    || NaiveDate::parse_from_str(raw, "%Y-%m-%d").is_ok()
}
