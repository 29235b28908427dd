//! OpenTelemetry tracing with file-based export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK TracerProvider
//!                                              → OtlpFileExporter → RotatingFile
//! ```
//!
//! Every finished span is written as an OTLP/JSON line to
//! `<data_dir>/quicklaunch-otlp.json`. The file rotates at 10 MiB and keeps
//! three numbered backups.
//!
//! The filter comes from `RUST_LOG` when set, otherwise from the
//! `trace_level` config key (default `info`).
//!
//! ```rust,no_run
//! use quicklaunch::observability::init_tracing;
//! use quicklaunch::Config;
//!
//! init_tracing(&Config::default());
//! tracing::info!("palette ready");
//! ```
//!
//! # Modules
//!
//! - [`init`]: subscriber setup
//! - [`exporter`]: span exporter and tracer provider
//! - [`otlp`]: OTLP/JSON encoding
//! - [`rotation`]: size-rotated line file

pub mod exporter;
pub mod init;
pub mod otlp;
pub mod rotation;

pub use init::{init_tracing, TRACE_FILE};
