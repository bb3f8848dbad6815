//! Frameguide Core Library
//!
//! Configuration and logging for the `frameguide` binary.

pub mod colored_logger;
pub mod config;
