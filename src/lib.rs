//! Scan a source tree and report files that do not contain a required license header.
//!
//! - [`auditor`] — directory walk and containment check.
//! - [`template`] — the expected header text.
//! - [`config`] — config file discovery and CLI merge.
//! - [`report`] — terminal rendering.

pub mod auditor;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod report;
pub mod template;

pub use auditor::{audit, audit_with, AuditOptions};
pub use error::AuditError;
pub use models::{AuditReport, SkippedEntry, UnreadablePolicy};
pub use template::LicenseTemplate;
