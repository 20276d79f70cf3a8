//! Strongly typed, zero-cost identifier wrappers.
//!
//! IDs are `Copy + Ord + Hash` so they sort and key maps without ceremony.
//! The inner integer is `pub` so a `BirdId` can index the flock's parallel
//! `Vec`s directly, but callers should prefer the `.index()` helper.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID", equal to the inner `MAX`.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Index of a bird in the flock.  Birds are never removed, so the id is
    /// stable for the whole session.
    pub struct BirdId(u32);
}

typed_id! {
    /// Index of a roost (tree) in the scene layout.
    pub struct RoostId(u16);
}
