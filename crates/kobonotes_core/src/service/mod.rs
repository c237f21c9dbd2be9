//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate source, dictionary and pipeline stages into one run.
//! - Keep the command line decoupled from stage details.

pub mod extract_service;
