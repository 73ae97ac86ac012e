//! Decide whether a resource already matches what the caller describes.

use crate::constants::MOID_FIELD;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

static SECRET_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)p(ass)?w(or)?d").expect("secret key pattern must be valid"));

/// Outcome of comparing a desired value with an observed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// Every compared field is equal.
    Match,
    /// At least one compared field differs.
    Mismatch,
    /// A falsy desired value differs from what is observed, so no verdict
    /// can be given.
    Incomparable,
}

/// Whether the resource should exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetState {
    /// The resource should exist with the desired body.
    #[default]
    Present,
    /// The resource should not exist.
    Absent,
}

/// What needs to happen to reach the target state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Nothing to do.
    NoopMatch,
    /// The resource does not exist yet.
    NeedsCreate,
    /// The resource exists but differs.
    NeedsUpdate {
        /// Moid of the existing resource.
        moid: String,
    },
    /// The resource exists and must go.
    NeedsDelete {
        /// Moid of the existing resource.
        moid: String,
    },
}

impl Action {
    /// Whether executing this action changes the server.
    pub fn is_change(&self) -> bool {
        !matches!(self, Action::NoopMatch)
    }
}

/// Keys that hold credentials are never compared: the API does not return
/// them.
pub fn is_secret_key(key: &str) -> bool {
    SECRET_KEY.is_match(key)
}

/// Compare `desired` against `observed`.
///
/// Objects are compared key by key for the keys in `desired` only, so extra
/// observed fields never matter. Secret keys and keys whose observed value
/// is missing or falsy are skipped.
pub fn compare(desired: &Value, observed: &Value) -> Comparison {
    if let (Value::Object(desired), Value::Object(observed)) = (desired, observed) {
        let mut result = Comparison::Match;
        for (key, value) in desired {
            if is_secret_key(key) {
                continue;
            }
            let Some(actual) = observed.get(key).filter(|v| is_truthy(v)) else {
                continue;
            };
            match compare(value, actual) {
                Comparison::Match => {}
                Comparison::Mismatch => return Comparison::Mismatch,
                Comparison::Incomparable => result = Comparison::Incomparable,
            }
        }
        return result;
    }

    if values_equal(desired, observed) {
        Comparison::Match
    } else if is_truthy(desired) {
        Comparison::Mismatch
    } else {
        Comparison::Incomparable
    }
}

/// Decide the action that brings `observed` to `desired` in `state`.
///
/// `observed` is the object returned by the lookup GET; it exists when it
/// carries a Moid.
pub fn converge(desired: &Value, observed: &Value, state: TargetState) -> Action {
    let moid = observed
        .get(MOID_FIELD)
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty());

    match (state, moid) {
        (TargetState::Present, _) if !is_truthy(desired) => Action::NoopMatch,
        (TargetState::Present, None) => Action::NeedsCreate,
        (TargetState::Present, Some(moid)) => match compare(desired, observed) {
            Comparison::Mismatch => Action::NeedsUpdate {
                moid: moid.to_string(),
            },
            // Without a verdict the resource is left alone.
            Comparison::Match | Comparison::Incomparable => Action::NoopMatch,
        },
        (TargetState::Absent, Some(moid)) => Action::NeedsDelete {
            moid: moid.to_string(),
        },
        (TargetState::Absent, None) => Action::NoopMatch,
    }
}

fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}
