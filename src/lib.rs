#![forbid(unsafe_code)]

//! `modulog` - Module-routed asynchronous file logging.
//!
//! Callers emit leveled, module-tagged messages; modulog filters them by
//! level, buffers them, and persists them to rotating log files without
//! blocking the caller's thread on I/O. Features:
//! - Multiple independent destinations, each owning one or more modules
//! - A dedicated background writer per destination (producer threads only
//!   pay for formatting and a queue push)
//! - Size-based file rotation with date-time or numbered naming
//! - Buffering of messages that arrive before their destination exists,
//!   replayed in order at registration
//! - Process-wide pause/resume and level/mode/size overrides
//!
//! # Example
//!
//! ```no_run
//! use modulog::{Destination, Level, Registry};
//!
//! let registry = Registry::new();
//! registry.add_destination(
//!     Destination::new("net.log")
//!         .module("net")
//!         .level(Level::Info),
//! );
//!
//! registry.info("net", "Connection established");
//! registry.debug("net", "Handshake detail");     // below threshold, dropped
//! registry.warning("net", "Connection timeout");
//!
//! registry.shutdown(); // drains every queue before returning
//! ```
//!
//! Messages for modules with no destination yet are buffered (up to 100 per
//! module) and written once a matching destination is registered. The
//! `log_*!` macros forward source coordinates from the call site.

pub mod cleanup;
pub mod config;
pub mod fmt;
pub mod level;
pub mod record;
pub mod registry;
pub mod rotate;
pub mod writer;

mod error;
mod macros;

// Re-exports for convenience
pub use cleanup::{
    CleanupOptions, CleanupResult, LogFileInfo, LogStats, cleanup, clear_folder, format_size,
    parse_size, stats,
};
pub use config::Config;
pub use error::Error;
pub use fmt::DisplayOptions;
pub use level::{FileHandling, FileTag, Level, Mode};
pub use record::Record;
pub use registry::{Destination, Registry};
pub use rotate::RotationPolicy;
pub use writer::Writer;
