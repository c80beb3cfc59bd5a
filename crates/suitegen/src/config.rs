//! Runtime switches.
//!
//! Only the one-time advisories about legacy registry use are configurable.
//! They are logged by default and silenced when:
//!
//! - an in-process override says so ([`set_advisories_enabled`]),
//! - `SUITEGEN_ADVISORIES` holds a false value,
//! - `SUITEGEN_ENV` is `test` or `production`.
//!
//! The first rule that applies wins. Duplicate-registration warnings are not
//! advisories and are always logged.

use std::sync::atomic::{AtomicU8, Ordering};

/// Names the kind of process running the suites.
pub const ENV_MARKER: &str = "SUITEGEN_ENV";
/// Turns advisories on or off, ahead of [`ENV_MARKER`].
pub const ADVISORIES_VAR: &str = "SUITEGEN_ADVISORIES";

/// `SUITEGEN_ENV` values in which advisories stay quiet.
const QUIET_ENVIRONMENTS: [&str; 2] = ["test", "production"];

const TRUTHY: [&str; 4] = ["1", "true", "yes", "on"];
const FALSY: [&str; 4] = ["0", "false", "no", "off"];

/// Override slot: 0 unset, 1 disabled, 2 enabled.
static OVERRIDE: AtomicU8 = AtomicU8::new(0);

fn encode(setting: Option<bool>) -> u8 {
    match setting {
        None => 0,
        Some(false) => 1,
        Some(true) => 2,
    }
}

fn decode(raw: u8) -> Option<bool> {
    match raw {
        1 => Some(false),
        2 => Some(true),
        _ => None,
    }
}

fn flag(value: &str) -> Option<bool> {
    let value = value.trim();
    let matches = |word: &&str| word.eq_ignore_ascii_case(value);
    if TRUTHY.iter().any(matches) {
        Some(true)
    } else if FALSY.iter().any(matches) {
        Some(false)
    } else {
        None
    }
}

fn quiet_environment(value: &str) -> bool {
    let value = value.trim();
    QUIET_ENVIRONMENTS
        .iter()
        .any(|quiet| quiet.eq_ignore_ascii_case(value))
}

fn from_environment() -> bool {
    if let Some(enabled) = std::env::var(ADVISORIES_VAR).ok().as_deref().and_then(flag) {
        return enabled;
    }
    !std::env::var(ENV_MARKER).is_ok_and(|marker| quiet_environment(&marker))
}

/// Whether advisories are currently logged.
#[must_use]
pub fn advisories_enabled() -> bool {
    decode(OVERRIDE.load(Ordering::Relaxed)).unwrap_or_else(from_environment)
}

/// Force advisories on or off for this process, ignoring the environment.
pub fn set_advisories_enabled(enabled: bool) {
    OVERRIDE.store(encode(Some(enabled)), Ordering::Relaxed);
}

/// Drop the override so the environment decides again.
pub fn clear_advisories_override() {
    OVERRIDE.store(encode(None), Ordering::Relaxed);
}
