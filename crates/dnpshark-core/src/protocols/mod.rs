//! Protocol decoding modules.
//!
//! Each protocol follows a layered structure:
//! - `layout`: byte offsets, masks and constants (source of truth)
//! - `reader`: safe byte access and protocol conventions
//! - `parser`: the decode pipeline (no direct byte indexing)
//! - `error`: explicit, actionable errors
//!
//! Parsers are pure and contain no I/O.

pub mod dnp3;
