//! Library crate for employee-directory.
//!
//! This crate exposes the building blocks of the TUI:
//! - Application state and update loop (`app`)
//! - Employee sources: REST profiles and in-memory data (`backend`)
//! - Startup options (`cli`) and log setup (`logging`)
//! - The table container that owns records and view state (`directory`)
//! - Error and result types (`error`)
//! - Filter, sort and pagination pipeline (`search`)
//! - UI rendering and widgets (`ui`)
//!
//! It is used by the `employee-directory` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod app;
pub mod backend;
pub mod cli;
pub mod directory;
pub mod error;
pub mod logging;
pub mod search;
pub mod ui;

// Re-export commonly used items at the crate root for convenience
/// Convenient error and result types shared across the crate.
pub use error::{DynError, Result};
