//! Shared utilities for the Mitsumori workspace.

pub mod logger;
pub mod time;
