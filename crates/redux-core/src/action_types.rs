//! Private action types reserved by the store.
//!
//! For any unknown action a reducer must return the current state. Reducers
//! should never match on these types directly; they only exist so the store
//! can seed state (INIT), announce a reducer swap (REPLACE), and check that a
//! reducer ignores types it does not know (PROBE_UNKNOWN_ACTION).
//!
//! Each type carries a random suffix so it will not collide with a type
//! string written by hand. The suffix is not guaranteed unique.

use std::sync::LazyLock;

const PREFIX: &str = "@@redux/";
const INIT: &str = "@@redux/INIT";
const REPLACE: &str = "@@redux/REPLACE";
const PROBE_UNKNOWN_ACTION: &str = "@@redux/PROBE_UNKNOWN_ACTION";

/// Base-36 digits drawn from the random fraction
const SUFFIX_DIGITS: usize = 10;
/// Leading digits dropped from the suffix
const SKIPPED_DIGITS: usize = 4;

static ACTION_TYPES: LazyLock<ActionTypes> = LazyLock::new(|| ActionTypes {
    init: format!("{INIT}{}", random_string()),
    replace: format!("{REPLACE}{}", random_string()),
});

/// The reserved types, fixed for the lifetime of the process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionTypes {
    pub init: String,
    pub replace: String,
}

impl ActionTypes {
    /// The process-wide reserved types, computed on first access
    pub fn get() -> &'static ActionTypes {
        &ACTION_TYPES
    }

    /// A fresh probe type, different on every call
    pub fn probe_unknown_action() -> String {
        format!("{PROBE_UNKNOWN_ACTION}{}", random_string())
    }
}

/// A reserved action the store may emit on its own
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservedAction {
    Init,
    Replace,
    ProbeUnknown(String),
}

impl ReservedAction {
    /// Build a probe action with a freshly generated type
    pub fn probe() -> Self {
        Self::ProbeUnknown(ActionTypes::probe_unknown_action())
    }

    pub fn action_type(&self) -> &str {
        match self {
            Self::Init => &ActionTypes::get().init,
            Self::Replace => &ActionTypes::get().replace,
            Self::ProbeUnknown(action_type) => action_type,
        }
    }
}

/// Whether a type string lives in the reserved namespace
pub fn is_reserved_type(action_type: &str) -> bool {
    action_type.starts_with(PREFIX)
}

/// Random suffix such as `7.u.a.7.n.p`
fn random_string() -> String {
    let mut fraction: f64 = rand::random();
    let digits: Vec<String> = (0..SUFFIX_DIGITS)
        .map(|_| {
            fraction *= 36.0;
            let digit = fraction.trunc();
            fraction -= digit;
            std::char::from_digit(digit as u32, 36).unwrap_or('0')
        })
        .skip(SKIPPED_DIGITS)
        .map(String::from)
        .collect();

    digits.join(".")
}
