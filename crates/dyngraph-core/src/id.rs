//! Generational keys for native graph objects and the [`Time`] alias.
//!
//! A key packs a slot index (upper 32 bits) and a generation counter
//! (lower 32 bits). The graph bumps the generation of a slot whenever the
//! object stored there is destroyed, so a key that outlives its object is
//! detected instead of resolving to whatever reuses the slot.

use std::fmt;

/// Discrete graph time. Signals record the time of their last update.
pub type Time = i64;

fn pack(slot: u32, generation: u32) -> u64 {
    ((slot as u64) << 32) | (generation as u64)
}

macro_rules! generational_key {
    ($(#[$meta:meta])* $name:ident, $tag:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u64);

        impl $name {
            /// Build a key from a slot index and a generation.
            pub fn new(slot: u32, generation: u32) -> Self {
                Self(pack(slot, generation))
            }

            /// Rebuild a key from its packed representation.
            pub fn from_bits(bits: u64) -> Self {
                Self(bits)
            }

            /// Packed representation, suitable for crossing an FFI boundary.
            pub fn to_bits(self) -> u64 {
                self.0
            }

            /// Slot index part of the key.
            pub fn slot(self) -> u32 {
                (self.0 >> 32) as u32
            }

            /// Generation part of the key.
            pub fn generation(self) -> u32 {
                self.0 as u32
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{}v{}", $tag, self.slot(), self.generation())
            }
        }
    };
}

generational_key!(
    /// Identifies a signal owned by the native graph.
    SignalKey,
    "signal"
);

generational_key!(
    /// Identifies an entity owned by the native graph.
    EntityKey,
    "entity"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_and_generation_are_recovered() {
        let k = SignalKey::new(7, 3);
        assert_eq!(k.slot(), 7);
        assert_eq!(k.generation(), 3);
        assert_eq!(SignalKey::from_bits(k.to_bits()), k);
    }

    #[test]
    fn extreme_values_do_not_bleed() {
        let k = EntityKey::new(u32::MAX, 0);
        assert_eq!(k.slot(), u32::MAX);
        assert_eq!(k.generation(), 0);
        let k = EntityKey::new(0, u32::MAX);
        assert_eq!(k.slot(), 0);
        assert_eq!(k.generation(), u32::MAX);
    }

    #[test]
    fn display_names_the_object_kind() {
        assert_eq!(SignalKey::new(1, 2).to_string(), "signal#1v2");
        assert_eq!(EntityKey::new(4, 0).to_string(), "entity#4v0");
    }
}
