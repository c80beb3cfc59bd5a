//! Suites generated from `tests/features` by the build script.

include!(concat!(env!("OUT_DIR"), "/suitegen_features.rs"));
