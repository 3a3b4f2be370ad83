// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Parse both command lines and resolve them into one typed EffectiveConfig
// role: cli/resolver
// inputs: positional contract of ctable-jobs and ctable-calendar, plus --zone/--base-url/--timeout-secs and hidden flags
// outputs: EffectiveConfig { token, invocation, base_url, timeout, zone, now_override }
// side_effects: none
// invariants:
// - the invocation mode is fixed here and never re-derived downstream
// - calendar start/end are validated as ISO-8601 but forwarded byte-for-byte
// - an unknown calendar choice is not an error (it becomes CalendarView::Unrecognized)
// errors: FeedError::Usage with the usage line for the failing mode
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::time::Duration;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use clap::Parser;

use crate::calendar::{CalendarQuery, CalendarView};
use crate::calendar_api::DEFAULT_CALENDAR_BASE;
use crate::error::FeedError;
use crate::scheduler_api::DEFAULT_SCHEDULER_BASE;
use crate::window::{TimePeriod, is_iso_datetime, parse_now_override, parse_zone};

pub const JOBS_USAGE: &str = "Usage: ctable-jobs <login_token> <choice> <TIME/JOBIDNUMBER>";
pub const CALENDAR_USAGE: &str = "Usage: ctable-calendar <login_token> <start_iso> <end_iso> <mailbox> <choice> [timezone]";

#[derive(Parser, Debug)]
#[command(
    name = "ctable-jobs",
    version,
    about = "List failed scheduler jobs, fetch a job's log, or restart it",
    long_about = None
)]
pub struct JobsCli {
  /// Scheduler login token (sent as the Authorization header)
  #[arg(required_unless_present = "gen_man")]
  pub token: Option<String>,

  /// 1 (failed), 2 (log) or 3 (restart)
  #[arg(required_unless_present = "gen_man")]
  pub mode: Option<String>,

  /// Time period for mode 1 (e.g. oneHour, 15m); job id for modes 2 and 3
  pub target: Option<String>,

  /// IANA timezone the failed-jobs window and row times are expressed in
  #[arg(long, default_value = "Asia/Kolkata")]
  pub zone: String,

  /// Scheduler API base URL
  #[arg(long, default_value = DEFAULT_SCHEDULER_BASE)]
  pub base_url: String,

  /// Per-request timeout in seconds
  #[arg(long, default_value_t = 30)]
  pub timeout_secs: u64,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,

  /// Override the "now" instant the windows are anchored to (hidden; tests only)
  #[arg(long = "now-override", hide = true)]
  pub now_override: Option<String>,
}

#[derive(Parser, Debug)]
#[command(
    name = "ctable-calendar",
    version,
    about = "Summarize a mailbox's meetings in a time range",
    long_about = None
)]
pub struct CalendarCli {
  /// Calendar API bearer token
  #[arg(required_unless_present = "gen_man")]
  pub token: Option<String>,

  /// Range start, ISO-8601 (forwarded unchanged)
  #[arg(required_unless_present = "gen_man")]
  pub start: Option<String>,

  /// Range end, ISO-8601 (forwarded unchanged)
  #[arg(required_unless_present = "gen_man")]
  pub end: Option<String>,

  /// Mailbox whose calendar is read
  #[arg(required_unless_present = "gen_man")]
  pub mailbox: Option<String>,

  /// 1 (subjects), 2 (attendees) or 3 (both)
  #[arg(required_unless_present = "gen_man")]
  pub choice: Option<String>,

  /// IANA timezone used to display meeting times
  #[arg(default_value = "UTC")]
  pub timezone: String,

  /// Calendar API base URL
  #[arg(long, default_value = DEFAULT_CALENDAR_BASE)]
  pub base_url: String,

  /// Per-request timeout in seconds
  #[arg(long, default_value_t = 30)]
  pub timeout_secs: u64,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,
}

#[derive(Clone, Debug)]
pub enum Invocation {
  FailedJobs { period: TimePeriod },
  JobLog { job_id: i64 },
  RestartJob { job_id: i64 },
  Calendar(CalendarQuery),
}

impl Invocation {
  pub fn name(&self) -> &'static str {
    match self {
      Invocation::FailedJobs { .. } => "failed-jobs",
      Invocation::JobLog { .. } => "job-log",
      Invocation::RestartJob { .. } => "restart-job",
      Invocation::Calendar(_) => "calendar",
    }
  }
}

#[derive(Clone, Debug)]
pub struct EffectiveConfig {
  pub token: String,
  pub invocation: Invocation,
  pub base_url: String,
  pub timeout: Duration,
  /// Zone of the failed-jobs window (jobs) or of displayed meeting times (calendar).
  pub zone: Tz,
  pub now_override: Option<DateTime<Utc>>,
}

fn usage(detail: impl std::fmt::Display, line: &str) -> FeedError {
  FeedError::Usage(format!("{detail}\n{line}"))
}

fn required(value: Option<String>, what: &str, line: &str) -> Result<String, FeedError> {
  value.ok_or_else(|| usage(format_args!("missing {what}"), line))
}

fn zone_arg(name: &str, line: &str) -> Result<Tz, FeedError> {
  parse_zone(name).map_err(|e| usage(format_args!("{e:#}"), line))
}

fn job_id_arg(target: Option<String>) -> Result<i64, FeedError> {
  let line = "Usage: ctable-jobs <login_token> <choice> <JOBIDNUMBER>";
  let raw = required(target, "job id", line)?;
  raw
    .trim()
    .parse::<i64>()
    .map_err(|_| usage(format_args!("job id must be an integer, got {raw:?}"), line))
}

pub fn normalize_jobs(cli: JobsCli) -> Result<EffectiveConfig, FeedError> {
  let token = required(cli.token, "login token", JOBS_USAGE)?;
  let mode = required(cli.mode, "choice", JOBS_USAGE)?;

  let invocation = match mode.trim() {
    "1" | "failed" => {
      let line = "Usage: ctable-jobs <login_token> 1 <TIME>";
      let raw = required(cli.target, "time period", line)?;
      let period = TimePeriod::parse(&raw).ok_or_else(|| {
        usage(
          format_args!("Invalid time period {raw:?}. Choose from {}.", TimePeriod::keywords().join(", ")),
          line,
        )
      })?;
      Invocation::FailedJobs { period }
    }
    "2" | "log" => Invocation::JobLog { job_id: job_id_arg(cli.target)? },
    "3" | "restart" => Invocation::RestartJob { job_id: job_id_arg(cli.target)? },
    other => return Err(usage(format_args!("Invalid choice {other:?}; use 1 (failed), 2 (log) or 3 (restart)"), JOBS_USAGE)),
  };

  let now_override = match cli.now_override.as_deref() {
    Some(raw) => Some(parse_now_override(Some(raw)).ok_or_else(|| usage(format_args!("invalid --now-override {raw:?}"), JOBS_USAGE))?),
    None => None,
  };

  Ok(EffectiveConfig {
    token,
    invocation,
    base_url: cli.base_url,
    timeout: Duration::from_secs(cli.timeout_secs),
    zone: zone_arg(&cli.zone, JOBS_USAGE)?,
    now_override,
  })
}

pub fn normalize_calendar(cli: CalendarCli) -> Result<EffectiveConfig, FeedError> {
  let token = required(cli.token, "login token", CALENDAR_USAGE)?;
  let start = required(cli.start, "start datetime", CALENDAR_USAGE)?;
  let end = required(cli.end, "end datetime", CALENDAR_USAGE)?;
  let mailbox = required(cli.mailbox, "mailbox", CALENDAR_USAGE)?;
  let choice = required(cli.choice, "choice", CALENDAR_USAGE)?;

  for (what, raw) in [("start", &start), ("end", &end)] {
    if !is_iso_datetime(raw) {
      return Err(usage(format_args!("{what} must be an ISO-8601 datetime, got {raw:?}"), CALENDAR_USAGE));
    }
  }

  let zone = zone_arg(&cli.timezone, CALENDAR_USAGE)?;

  Ok(EffectiveConfig {
    token,
    invocation: Invocation::Calendar(CalendarQuery {
      mailbox,
      start,
      end,
      view: CalendarView::parse(&choice),
      zone,
    }),
    base_url: cli.base_url,
    timeout: Duration::from_secs(cli.timeout_secs),
    zone,
    now_override: None,
  })
}
