// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Calendar-view endpoint for one mailbox behind a trait seam
// role: upstream/calendar-api
// inputs: base URL, bearer token, timeout; mailbox and raw ISO start/end strings
// outputs: ApiReply
// side_effects: Network calls (HTTP backend); reads CTB_TEST_CALENDAR_* env vars (env backend)
// invariants: start/end are forwarded untouched; only the default page of events is requested
// errors: Transport failures only; statuses are returned to callers
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::time::Duration;

use crate::error::FeedError;
use crate::http::{ApiReply, HeaderProfile, HttpClient, env_mock_present, env_reply};

pub const DEFAULT_CALENDAR_BASE: &str = "https://graph.microsoft.com/v1.0";
pub const EVENT_FIELDS: &str = "subject,id,start,end,organizer,attendees";

pub trait CalendarApi {
  fn calendar_view(&self, mailbox: &str, start: &str, end: &str) -> Result<ApiReply, FeedError>;
}

pub struct CalendarHttpApi {
  base: String,
  client: HttpClient,
}

impl CalendarHttpApi {
  pub fn new(base: &str, token: &str, timeout: Duration) -> Self {
    Self {
      base: base.trim_end_matches('/').to_string(),
      client: HttpClient::new(token, HeaderProfile::Bearer, timeout),
    }
  }

  fn view_url(&self, mailbox: &str) -> String {
    format!("{}/users/{}/calendarView", self.base, mailbox)
  }
}

pub fn view_query(start: &str, end: &str) -> Vec<(&'static str, String)> {
  vec![
    ("startDateTime", start.to_string()),
    ("endDateTime", end.to_string()),
    ("$select", EVENT_FIELDS.to_string()),
  ]
}

impl CalendarApi for CalendarHttpApi {
  fn calendar_view(&self, mailbox: &str, start: &str, end: &str) -> Result<ApiReply, FeedError> {
    self.client.get(&self.view_url(mailbox), &view_query(start, end))
  }
}

struct CalendarEnvApi;

impl CalendarApi for CalendarEnvApi {
  fn calendar_view(&self, mailbox: &str, start: &str, end: &str) -> Result<ApiReply, FeedError> {
    tracing::debug!(mailbox, start, end, "env calendar: view");
    Ok(env_reply("CALENDAR"))
  }
}

pub fn calendar_backend(base: &str, token: &str, timeout: Duration) -> Box<dyn CalendarApi> {
  if env_mock_present("CALENDAR") {
    tracing::info!("using env-backed calendar responses");
    Box::new(CalendarEnvApi)
  } else {
    Box::new(CalendarHttpApi::new(base, token, timeout))
  }
}
