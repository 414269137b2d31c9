//! Cross-module tests for daemon threads, pools and interruption.

mod helpers;
mod property;
