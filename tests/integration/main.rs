//! Integration test binary: every integration suite compiled into one binary.

// Allow unwrap/expect in test code
#![allow(clippy::unwrap_used, clippy::expect_used)]

mod helpers;

mod config_roundtrip;
mod host_bridge;
mod remote_classifier;
mod scenarios;
