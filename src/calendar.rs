// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Calendar mode: fetch a mailbox's events in a window and build the subject/attendee views
// role: processing/calendar
// inputs: CalendarApi backend, CalendarQuery (mailbox, raw ISO range, view, display zone)
// outputs: One frame per selected view, or a notice frame when there is nothing to show
// side_effects: One upstream call through the CalendarApi seam
// invariants:
// - events whose subject contains "canceled" (any case) never reach any view
// - event datetimes are read as UTC and displayed in the query's zone
// - an unrecognized view makes no upstream call
// errors: FeedError::CalendarStatus for non-200 replies (body echoed)
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::Datelike;
use chrono_tz::Tz;
use serde_json::{Value, json};

use crate::calendar_api::CalendarApi;
use crate::error::FeedError;
use crate::ext::serde_json::{JsonFetch, NOT_AVAILABLE};
use crate::model::{AttendeeRow, SubjectRow};
use crate::render::{Frame, Tag};
use crate::util::parse_instant;

/// Which table(s) the caller asked for.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CalendarView {
  Subjects,
  Attendees,
  Both,
  Unrecognized(String),
}

impl CalendarView {
  pub fn parse(raw: &str) -> Self {
    match raw.trim() {
      "1" => CalendarView::Subjects,
      "2" => CalendarView::Attendees,
      "3" => CalendarView::Both,
      other => CalendarView::Unrecognized(other.to_string()),
    }
  }
}

#[derive(Clone, Debug)]
pub struct CalendarQuery {
  pub mailbox: String,
  pub start: String,
  pub end: String,
  pub view: CalendarView,
  pub zone: Tz,
}

pub fn ordinal_suffix(day: u32) -> &'static str {
  if (11..=13).contains(&(day % 100)) {
    return "th";
  }
  match day % 10 {
    1 => "st",
    2 => "nd",
    3 => "rd",
    _ => "th",
  }
}

/// `"<Month> <day><suffix> HH:MM-HH:MM"` in `zone`.
pub fn meeting_time(start: &str, end: &str, zone: Tz) -> Option<String> {
  let start = parse_instant(start)?.with_timezone(&zone);
  let end = parse_instant(end)?.with_timezone(&zone);

  Some(format!(
    "{} {}{} {}-{}",
    start.format("%B"),
    start.day(),
    ordinal_suffix(start.day()),
    start.format("%H:%M"),
    end.format("%H:%M")
  ))
}

pub fn is_canceled(subject: &str) -> bool {
  subject.to_lowercase().contains("canceled")
}

/// Both views for the given events, in upstream order, canceled events removed.
pub fn event_rows(events: &[Value], zone: Tz) -> (Vec<SubjectRow>, Vec<AttendeeRow>) {
  let mut subjects = Vec::with_capacity(events.len());
  let mut attendees = Vec::with_capacity(events.len());

  for event in events {
    let subject = event.fetch("subject").to_or_default::<String>();

    if is_canceled(&subject) {
      tracing::debug!(%subject, "skipping canceled event");
      continue;
    }

    let start = event.fetch("start.dateTime").to_or_default::<String>();
    let end = event.fetch("end.dateTime").to_or_default::<String>();
    let when = meeting_time(&start, &end, zone).unwrap_or_else(|| NOT_AVAILABLE.to_string());

    let emails: Vec<String> = event
      .fetch("attendees")
      .to::<Vec<Value>>()
      .unwrap_or_default()
      .iter()
      .filter_map(|a| a.fetch("emailAddress.address").to::<String>())
      .collect();

    subjects.push(SubjectRow {
      subject: subject.clone(),
      meeting_time: when,
      organizer_email: event.fetch("organizer.emailAddress.address").to::<String>(),
    });
    attendees.push(AttendeeRow { subject, attendees_emails: emails.join(";") });
  }

  (subjects, attendees)
}

fn no_meetings(start: &str) -> Value {
  let date = start.split('T').next().unwrap_or(start);
  json!({ "Meetings": format!("No meetings available in the specified date ({date})") })
}

pub fn meetings(api: &dyn CalendarApi, query: &CalendarQuery) -> Result<Vec<Frame>, FeedError> {
  if let CalendarView::Unrecognized(raw) = &query.view {
    tracing::warn!(choice = %raw, "unrecognized calendar view");
    let rows: [Value; 0] = [];
    return Ok(vec![Frame::table(Tag::Table, &rows, || json!({ "Meetings": "Wrong Choice" }))?]);
  }

  let reply = api.calendar_view(&query.mailbox, &query.start, &query.end)?;
  if !reply.is_ok() {
    let (body, json) = match reply.json() {
      Some(v) => (v.to_string(), true),
      None => (reply.body.clone(), false),
    };
    return Err(FeedError::CalendarStatus { status: reply.status, body, json });
  }

  let events = reply
    .json()
    .and_then(|v| v.fetch("value").to::<Vec<Value>>())
    .unwrap_or_default();

  let (subjects, attendees) = event_rows(&events, query.zone);
  tracing::info!(events = events.len(), kept = subjects.len(), zone = %query.zone, "calendar view fetched");

  if subjects.is_empty() {
    let rows: [Value; 0] = [];
    return Ok(vec![Frame::table(Tag::Table, &rows, || no_meetings(&query.start))?]);
  }

  let subjects_frame = || Frame::table(Tag::Subjects, &subjects, || no_meetings(&query.start));
  let attendees_frame = || Frame::table(Tag::Attendees, &attendees, || no_meetings(&query.start));

  let frames = match query.view {
    CalendarView::Subjects => vec![subjects_frame()?],
    CalendarView::Attendees => vec![attendees_frame()?],
    CalendarView::Both => vec![subjects_frame()?, attendees_frame()?],
    CalendarView::Unrecognized(_) => Vec::new(),
  };

  Ok(frames)
}
