//! Library entry point for the modsweep CLI.
//!
//! The pipeline is [`scanner::TreeScanner`] feeding
//! [`cleanup::CleanupExecutor`], composed by [`cleanup::CleanupOrchestrator`].
//! Everything under [`commands`] is presentation around it.

pub mod cleanup;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod model;
pub mod path;
pub mod progress;
pub mod project;
pub mod scanner;
pub mod size;
