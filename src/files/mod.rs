//! File access layer.
//!
//! # Data Flow
//! ```text
//! request path (percent-decoded)
//!     → resolve.rs (lexical resolution, escape rejection)
//!     → resolve.rs (canonicalization containment against the served root)
//!     → store.rs (reads with index fallback / create-or-truncate writes)
//! ```
//!
//! # Design Decisions
//! - One resolver serves both the read and the upload paths, so traversal
//!   protection cannot drift between them.
//! - Lexical rejection happens before touching the filesystem; symlink
//!   escapes are caught by canonicalizing the nearest existing ancestor.
//! - No in-process locking: concurrent writes to the same path race and the
//!   last writer wins.

pub mod resolve;
pub mod store;
