//! Host-facing command contract and stdio bridge for native app integration.

pub mod contract;
pub mod handler;
pub mod stdio;
