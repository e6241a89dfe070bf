//! Pipeline stages for Markdown stripping.
//!
//! Each submodule implements exactly one step. Only [`strip`] has real logic;
//! the other two are the plumbing that gets text in and out.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ strip ──▶ download
//! (read/decode)  (15 rewrites)  (name + write)
//! ```
//!
//! 1. [`input`]    — validate a path, read bytes, decode UTF-8 leniently
//! 2. [`strip`]    — the ordered rewrite table; pure `&str → String`
//! 3. [`download`] — derive the `_cleaned` output name, write atomically

pub mod download;
pub mod input;
pub mod strip;
