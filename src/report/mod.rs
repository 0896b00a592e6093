//! Report renderers for audit results.
//!
//! - [`terminal`] — the plain result lines on stdout plus a colored summary on
//!   stderr; respects `--quiet`.
//!
//! The JSON report is the serialized [`AuditReport`](crate::models::AuditReport).

pub mod terminal;
