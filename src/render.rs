// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Turn a mode's structured result into the delimiter-wrapped lines the bot consumes
// role: output/emitter
// inputs: Result<Vec<Frame>, FeedError> plus the mode's FailurePolicy
// outputs: Emission (framed lines or a plain diagnostic) written to any io::Write
// invariants:
// - a frame line is exactly ##gbStart##<tag>##splitKeyValue##<payload>##gbEnd##
// - an empty table is never emitted as []; it carries a single notice object instead
// - failures without a frame policy produce no ##gbStart## marker at all
// errors: Serialization failures degrade to a plain diagnostic; IO errors bubble from write_to
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::io::Write;

use serde::Serialize;
use serde_json::Value;

use crate::error::FeedError;

pub const FRAME_START: &str = "##gbStart##";
pub const FRAME_SPLIT: &str = "##splitKeyValue##";
pub const FRAME_END: &str = "##gbEnd##";

/// Output channel the bot routes a table to.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Tag {
  /// Failed-job listing.
  FailedJobs,
  /// Single-job detail (log, restart) and calendar notices.
  Table,
  /// Calendar view keyed by organizer.
  Subjects,
  /// Calendar view keyed by attendees.
  Attendees,
}

impl Tag {
  pub fn as_str(self) -> &'static str {
    match self {
      Tag::FailedJobs => "copilot_ctable_data1",
      Tag::Table => "copilot_ctable_data",
      Tag::Subjects => "copilot_ctable1_data",
      Tag::Attendees => "copilot_ctable2_data",
    }
  }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Frame {
  pub tag: Tag,
  /// Pre-serialized payload; JSON text for tables, raw text for framed failures.
  pub payload: String,
}

impl Frame {
  /// Serialize `rows`, substituting `[notice]` when there are none.
  pub fn table<T: Serialize>(tag: Tag, rows: &[T], notice: impl FnOnce() -> Value) -> Result<Frame, serde_json::Error> {
    let payload = if rows.is_empty() {
      serde_json::to_string(&[notice()])?
    } else {
      serde_json::to_string(rows)?
    };

    Ok(Frame { tag, payload })
  }

  pub fn text(tag: Tag, text: impl Into<String>) -> Frame {
    Frame { tag, payload: text.into() }
  }

  pub fn line(&self) -> String {
    format!("{FRAME_START}{}{FRAME_SPLIT}{}{FRAME_END}", self.tag.as_str(), self.payload)
  }
}

/// How a mode reports failures.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FailurePolicy {
  /// Bare diagnostic line; absence of the start marker signals failure.
  Plain,
  /// Failure text wrapped in a frame under the given tag.
  Framed(Tag),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Emission {
  Frames(Vec<Frame>),
  Plain(String),
}

impl Emission {
  pub fn lines(&self) -> Vec<String> {
    match self {
      Emission::Frames(frames) => frames.iter().map(Frame::line).collect(),
      Emission::Plain(text) => vec![text.clone()],
    }
  }

  pub fn is_framed(&self) -> bool {
    matches!(self, Emission::Frames(_))
  }

  pub fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
    for line in self.lines() {
      writeln!(out, "{line}")?;
    }
    out.flush()
  }
}

/// Single formatting stage: success frames pass through, failures follow the policy.
pub fn settle(result: Result<Vec<Frame>, FeedError>, policy: FailurePolicy) -> Emission {
  match result {
    Ok(frames) => Emission::Frames(frames),
    Err(err) => {
      tracing::warn!(kind = ?err.kind(), "{err}");

      match policy {
        FailurePolicy::Plain => Emission::Plain(err.to_string()),
        FailurePolicy::Framed(tag) => Emission::Frames(vec![Frame::text(tag, err.to_string())]),
      }
    }
  }
}
