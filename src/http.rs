// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: One blocking request builder shared by every upstream call (headers, timeout, status capture)
// role: http/transport
// inputs: token, HeaderProfile, timeout; per-call URL, query pairs or JSON body
// outputs: ApiReply { status, body } for any HTTP status; FeedError::Transport for network failures
// side_effects: Network calls
// invariants:
// - non-2xx responses are data, not errors (status is inspected by callers)
// - every request carries the same header set for a given profile
// - requests are bounded by the configured global timeout
// errors: Transport errors carry the endpoint label and the underlying ureq error
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::time::Duration;

use serde_json::Value;
use ureq::RequestBuilder;

use crate::error::FeedError;
use crate::ext::serde_json::JsonFetch;

const CONSOLE_ORIGIN: &str = "https://symphony4cloud.com";
const CONSOLE_SEC_CH_UA: &str = r#""Not(A:Brand";v="99", "Google Chrome";v="133", "Chromium";v="133""#;
const CONSOLE_USER_AGENT: &str =
  "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/133.0.0.0 Safari/537.36";

/// Header sets the upstreams expect.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum HeaderProfile {
  /// `Authorization: <token>` only.
  RawToken,
  /// What the scheduler web console sends alongside the raw token.
  Console,
  /// `Authorization: Bearer <token>` with a JSON content type.
  Bearer,
}

impl HeaderProfile {
  pub fn headers(self, token: &str) -> Vec<(&'static str, String)> {
    match self {
      HeaderProfile::RawToken => vec![("Authorization", token.to_string())],
      HeaderProfile::Console => vec![
        ("accept", "application/json, text/plain, */*".to_string()),
        ("accept-language", "en-US,en;q=0.9".to_string()),
        ("authorization", token.to_string()),
        ("msalauthorization", String::new()),
        ("origin", CONSOLE_ORIGIN.to_string()),
        ("priority", "u=1, i".to_string()),
        ("referer", format!("{CONSOLE_ORIGIN}/")),
        ("sec-ch-ua", CONSOLE_SEC_CH_UA.to_string()),
        ("sec-ch-ua-mobile", "?0".to_string()),
        ("sec-ch-ua-platform", r#""Windows""#.to_string()),
        ("sec-fetch-dest", "empty".to_string()),
        ("sec-fetch-mode", "cors".to_string()),
        ("sec-fetch-site", "cross-site".to_string()),
        ("user-agent", CONSOLE_USER_AGENT.to_string()),
      ],
      HeaderProfile::Bearer => vec![
        ("Authorization", format!("Bearer {token}")),
        ("Content-Type", "application/json".to_string()),
      ],
    }
  }
}

/// Status and raw body of one upstream response.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ApiReply {
  pub status: u16,
  pub body: String,
}

impl ApiReply {
  pub fn new(status: u16, body: impl Into<String>) -> Self {
    Self { status, body: body.into() }
  }

  pub fn is_ok(&self) -> bool {
    self.status == 200
  }

  pub fn json(&self) -> Option<Value> {
    serde_json::from_str(&self.body).ok()
  }

  /// The scheduler's application-level success marker: `"flag": "success"`.
  pub fn flagged_success(&self) -> bool {
    self
      .json()
      .and_then(|v| v.fetch("flag").to::<String>())
      .is_some_and(|flag| flag == "success")
  }
}

pub struct HttpClient {
  agent: ureq::Agent,
  token: String,
  profile: HeaderProfile,
}

impl HttpClient {
  pub fn new(token: impl Into<String>, profile: HeaderProfile, timeout: Duration) -> Self {
    let agent: ureq::Agent = ureq::Agent::config_builder()
      .timeout_global(Some(timeout))
      .http_status_as_error(false)
      .build()
      .into();

    Self { agent, token: token.into(), profile }
  }

  fn decorate<B>(&self, mut req: RequestBuilder<B>) -> RequestBuilder<B> {
    for (name, value) in self.profile.headers(&self.token) {
      req = req.header(name, value.as_str());
    }
    req
  }

  pub fn get(&self, url: &str, query: &[(&str, String)]) -> Result<ApiReply, FeedError> {
    tracing::debug!(%url, profile = ?self.profile, "GET");

    let mut req = self.decorate(self.agent.get(url));
    for (name, value) in query {
      req = req.query(name, value);
    }

    let resp = req.call().map_err(|source| transport(url, source))?;
    read_reply(url, resp)
  }

  pub fn post_json(&self, url: &str, body: &Value) -> Result<ApiReply, FeedError> {
    tracing::debug!(%url, profile = ?self.profile, "POST");

    let resp = self
      .decorate(self.agent.post(url))
      .send_json(body)
      .map_err(|source| transport(url, source))?;

    read_reply(url, resp)
  }
}

/// Canned reply for env-backed backends: `CTB_TEST_<CALL>_JSON` is the body and
/// `CTB_TEST_<CALL>_STATUS` the status (default 200; 404 when no body is set).
pub(crate) fn env_reply(call: &str) -> ApiReply {
  let status = std::env::var(format!("CTB_TEST_{call}_STATUS"))
    .ok()
    .and_then(|s| s.trim().parse::<u16>().ok());

  match std::env::var(format!("CTB_TEST_{call}_JSON")) {
    Ok(body) => ApiReply::new(status.unwrap_or(200), body),
    Err(_) => ApiReply::new(status.unwrap_or(404), ""),
  }
}

pub(crate) fn env_mock_present(call: &str) -> bool {
  std::env::var(format!("CTB_TEST_{call}_JSON")).is_ok() || std::env::var(format!("CTB_TEST_{call}_STATUS")).is_ok()
}

fn transport(url: &str, source: ureq::Error) -> FeedError {
  FeedError::Transport { endpoint: url.to_string(), source }
}

fn read_reply(url: &str, mut resp: ureq::http::Response<ureq::Body>) -> Result<ApiReply, FeedError> {
  let status = resp.status().as_u16();
  let body = resp.body_mut().read_to_string().map_err(|source| transport(url, source))?;

  tracing::debug!(%url, status, bytes = body.len(), "response");

  Ok(ApiReply { status, body })
}
