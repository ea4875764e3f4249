//! Logger setup for binaries that host the setlist view.
//!
//! Library code only talks to the `log` facade; installing a backend is the
//! host's call.

mod init;

pub use init::{init_logging, LoggingConfig};
