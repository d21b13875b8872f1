//! Utility modules for common functionality
//!
//! This module provides logging and coordinate parsing helpers used by the
//! library facade and the CLI commands.

pub mod logger;
pub mod coordinate_utils;
