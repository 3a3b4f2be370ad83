// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Dispatch a resolved invocation to its backend and transformer, then settle the outcome into wire lines
// role: orchestration
// inputs: EffectiveConfig
// outputs: Emission (frames or a plain diagnostic)
// side_effects: Upstream calls through the selected backend
// invariants:
// - listing uses the raw-token header profile; job-id modes use the console profile
// - only restart failures are framed; every other failure is a plain line
// errors: none surface; upstream failures are folded into the Emission
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::calendar::{self, CalendarQuery};
use crate::calendar_api::{CalendarApi, calendar_backend};
use crate::cli::{EffectiveConfig, Invocation};
use crate::http::HeaderProfile;
use crate::jobs;
use crate::render::{Emission, FailurePolicy, Tag, settle};
use crate::scheduler_api::{SchedulerApi, scheduler_backend};
use crate::window::{TimePeriod, effective_now, failed_jobs_window, lookup_window};

/// Run one invocation against the backend selected for it.
pub fn run(cfg: &EffectiveConfig) -> Emission {
  tracing::info!(mode = cfg.invocation.name(), base = %cfg.base_url, "starting");

  let now = effective_now(cfg.now_override);
  let scheduler = |profile| scheduler_backend(&cfg.base_url, &cfg.token, profile, cfg.timeout);

  match &cfg.invocation {
    Invocation::FailedJobs { period } => {
      failed_jobs_mode(scheduler(HeaderProfile::RawToken).as_ref(), *period, cfg.zone, now)
    }
    Invocation::JobLog { job_id } => job_log_mode(scheduler(HeaderProfile::Console).as_ref(), *job_id, now),
    Invocation::RestartJob { job_id } => restart_mode(scheduler(HeaderProfile::Console).as_ref(), *job_id, now),
    Invocation::Calendar(query) => {
      let api = calendar_backend(&cfg.base_url, &cfg.token, cfg.timeout);
      calendar_mode(api.as_ref(), query)
    }
  }
}

pub fn failed_jobs_mode(api: &dyn SchedulerApi, period: TimePeriod, zone: Tz, now: DateTime<Utc>) -> Emission {
  let window = failed_jobs_window(period, zone, now);
  tracing::debug!(?period, start = %window.start, end = %window.end, "failed-jobs window");
  settle(jobs::failed_jobs(api, &window, zone), FailurePolicy::Plain)
}

pub fn job_log_mode(api: &dyn SchedulerApi, job_id: i64, now: DateTime<Utc>) -> Emission {
  settle(jobs::job_log(api, job_id, &lookup_window(now)), FailurePolicy::Plain)
}

/// Restart failures are framed under the job table tag.
pub fn restart_mode(api: &dyn SchedulerApi, job_id: i64, now: DateTime<Utc>) -> Emission {
  settle(jobs::restart_job(api, job_id, &lookup_window(now)), FailurePolicy::Framed(Tag::Table))
}

pub fn calendar_mode(api: &dyn CalendarApi, query: &CalendarQuery) -> Emission {
  settle(calendar::meetings(api, query), FailurePolicy::Plain)
}
