//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing, store and node subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters)
//!
//! Consumers:
//!     → stdout (pretty, compact or JSON)
//!     → whichever metrics recorder the host installs
//! ```
//!
//! # Design Decisions
//! - Structured fields rather than formatted messages
//! - The library installs no metrics exporter; without a recorder counters are no-ops
//! - Logging init is idempotent

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
