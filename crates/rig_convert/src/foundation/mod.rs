//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the converter:
//! - Math types shared by the parsers and the document builder
//! - Logging setup

pub mod math;
pub mod logging;
