//! Vesper IR - identifier types shared by every Vesper crate.
//!
//! Symbols are interned once and compared as 32-bit [`Name`]s. The
//! interner is the only process-wide mutable structure in the runtime and
//! is safe to share between threads; everything built on top of it is
//! single-threaded.

mod interner;
mod name;

pub use interner::{InternError, SharedInterner, StringInterner};
pub use name::Name;
