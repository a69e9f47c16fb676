//! Response compaction tests
//!
//! Exercise the public `safe_compact` entry point with upstream-shaped
//! payloads, the way the tools call it.

mod isolation;
