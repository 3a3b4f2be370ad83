// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Path lookups into upstream JSON payloads ("data.0.totalData") with typed and "N/A" extraction
// role: extension/serde_json
// outputs: JsonFetch trait and JsonFetched wrapper
// invariants: No panics; missing paths and JSON nulls both count as absent
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Placeholder written for any field the upstream row does not carry.
pub const NOT_AVAILABLE: &str = "N/A";

/// A located (or missing) JSON value, extracted in a second step.
pub struct JsonFetched<'a> {
  inner: Option<&'a Value>,
}

impl<'a> JsonFetched<'a> {
  /// The located value, treating JSON `null` as absent.
  pub fn value(&self) -> Option<&'a Value> {
    self.inner.filter(|v| !v.is_null())
  }

  pub fn to<T>(&self) -> Option<T>
  where
    T: DeserializeOwned,
  {
    self.value().and_then(|v| serde_json::from_value::<T>(v.clone()).ok())
  }

  pub fn to_or_default<T>(&self) -> T
  where
    T: DeserializeOwned + Default,
  {
    self.to::<T>().unwrap_or_default()
  }

  /// The value as-is, or the string "N/A" when absent.
  pub fn or_na(&self) -> Value {
    self
      .value()
      .cloned()
      .unwrap_or_else(|| Value::String(NOT_AVAILABLE.to_string()))
  }

  /// Render a scalar for use inside a URL path; strings stay verbatim, numbers use decimal form.
  pub fn as_segment(&self) -> Option<String> {
    match self.value()? {
      Value::String(s) if !s.is_empty() => Some(s.clone()),
      Value::Number(n) => Some(n.to_string()),
      _ => None,
    }
  }
}

/// Fetch nested values via dotted paths; numeric segments index into arrays.
pub trait JsonFetch {
  fn fetch(&self, path: &str) -> JsonFetched<'_>;
}

impl JsonFetch for Value {
  fn fetch(&self, path: &str) -> JsonFetched<'_> {
    if path.is_empty() {
      return JsonFetched { inner: Some(self) };
    }

    let mut cur = self;

    for key in path.split('.') {
      let next = match cur {
        Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => cur.get(key),
      };

      match next {
        Some(v) => cur = v,
        None => return JsonFetched { inner: None },
      }
    }

    JsonFetched { inner: Some(cur) }
  }
}
