//! Lifecycle management.
//!
//! # Data Flow
//! ```text
//! Startup (main):
//!     parse args → validate config → load TLS → bind listener → serve
//!
//! Shutdown (signals.rs):
//!     SIGINT/SIGTERM → stop accepting → drain in-flight requests → exit
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal, the process never half-listens
//! - Shutdown drains with a bounded grace period, then forces the exit

pub mod signals;
