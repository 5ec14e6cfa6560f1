//! Interned symbol identifier.

use std::fmt;

/// A symbol as the runtime sees it: a 32-bit handle into the interner.
///
/// The high bits select the interner shard, the rest index into it. Names
/// from one interner are equal exactly when their text is equal; only the
/// interner can mint them, apart from [`Name::EMPTY`].
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// The empty string, interned into shard 0 at construction.
    pub const EMPTY: Name = Name(0);

    const SHARD_BITS: u32 = 4;
    const LOCAL_BITS: u32 = u32::BITS - Self::SHARD_BITS;

    pub(crate) const NUM_SHARDS: usize = 1 << Self::SHARD_BITS;
    pub(crate) const MAX_LOCAL: u32 = (1 << Self::LOCAL_BITS) - 1;

    #[inline]
    pub(crate) const fn new(shard: u32, local: u32) -> Self {
        debug_assert!((shard as usize) < Self::NUM_SHARDS);
        debug_assert!(local <= Self::MAX_LOCAL);
        Name((shard << Self::LOCAL_BITS) | local)
    }

    #[inline]
    pub(crate) const fn shard(self) -> usize {
        (self.0 >> Self::LOCAL_BITS) as usize
    }

    #[inline]
    pub(crate) const fn local(self) -> usize {
        (self.0 & Self::MAX_LOCAL) as usize
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::EMPTY
    }
}

// Text needs the interner; print the handle.
impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({}:{})", self.shard(), self.local())
    }
}
