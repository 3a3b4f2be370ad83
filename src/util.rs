// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Timestamp parsing/formatting, log text sanitization, tracing setup and man page rendering
// role: utilities/helpers
// inputs: Upstream timestamp strings; log bodies; clap CommandFactory
// outputs: Zone-formatted strings, sanitized text, troff man page text
// side_effects: init_tracing installs a global subscriber writing to stderr
// invariants:
// - parse_instant never panics; naive timestamps are read as UTC
// - sanitize_log output contains no double quotes and no whitespace runs
// - tracing output never goes to stdout (stdout carries wire lines only)
// errors: render_man_page surfaces IO errors; everything else is infallible
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use clap::CommandFactory;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing_subscriber::EnvFilter;

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];
const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parse an upstream timestamp. Explicit offsets (`Z`, `+05:30`, `+0530`) are kept.
///
/// Timestamps without an offset are read as UTC, not as host-local time.
pub fn parse_instant(raw: &str) -> Option<DateTime<FixedOffset>> {
  let raw = raw.trim();

  if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
    return Some(dt);
  }

  if let Some(dt) = OFFSET_FORMATS.iter().find_map(|fmt| DateTime::parse_from_str(raw, fmt).ok()) {
    return Some(dt);
  }

  NAIVE_FORMATS
    .iter()
    .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    .map(|ndt| Utc.from_utc_datetime(&ndt).fixed_offset())
}

/// Convert an upstream timestamp into `zone` and format it; None when unparseable.
pub fn format_in_zone(raw: &str, zone: Tz, pattern: &str) -> Option<String> {
  parse_instant(raw).map(|dt| dt.with_timezone(&zone).format(pattern).to_string())
}

static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));

/// Strip double quotes, collapse whitespace runs to one space, trim.
pub fn sanitize_log(text: &str) -> String {
  let unquoted = text.replace('"', "");
  RE_WHITESPACE.replace_all(&unquoted, " ").trim().to_string()
}

/// Lines as the size-advisory policy counts them (split on `\n`, trailing piece included).
pub fn line_count(text: &str) -> usize {
  text.split('\n').count()
}

/// Install the stderr subscriber once. `CTB_LOG` wins over `RUST_LOG`; default is `warn`.
pub fn init_tracing() {
  let filter = EnvFilter::try_from_env("CTB_LOG")
    .or_else(|_| EnvFilter::try_from_default_env())
    .unwrap_or_else(|_| EnvFilter::new("warn"));

  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .try_init();
}

/// Render a section-1 man page for a clap `CommandFactory` implementor.
pub fn render_man_page<T: CommandFactory>() -> anyhow::Result<String> {
  let cmd = T::command();
  let man = clap_mangen::Man::new(cmd);
  let mut buf: Vec<u8> = Vec::new();

  man.render(&mut buf)?;

  Ok(String::from_utf8_lossy(&buf).to_string())
}
