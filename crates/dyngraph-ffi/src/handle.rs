//! Tagged, generational handles for native graph objects.
//!
//! A [`DgHandle`] is what crosses the boundary in place of a pointer. It
//! carries a [`HandleKind`] tag next to the packed generational key, and
//! unboxing checks three things before any native object is touched: the
//! value is a handle at all, its tag is the expected kind, and the object
//! is still alive. A handle never owns its object; the graph does.

use std::fmt;

use dyngraph_core::{EntityKey, SignalKey};
use dyngraph_engine::Graph;

use crate::error::{BridgeError, ErrorKind};

/// Native type a handle refers to.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandleKind {
    /// A signal.
    Signal = 1,
    /// An entity.
    Entity = 2,
}

impl HandleKind {
    /// Decode a raw tag. `None` for anything but a known kind.
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            1 => Some(Self::Signal),
            2 => Some(Self::Entity),
            _ => None,
        }
    }

    /// Lower-case name used in messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Signal => "signal",
            Self::Entity => "entity",
        }
    }
}

/// Opaque handle passed across the boundary by value.
///
/// `kind` is a [`HandleKind`] tag (0 never names an object); `bits` is the
/// packed slot/generation key.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DgHandle {
    /// Kind tag.
    pub kind: u32,
    /// Packed key.
    pub bits: u64,
}

impl DgHandle {
    /// A handle that refers to nothing.
    pub const NULL: DgHandle = DgHandle { kind: 0, bits: 0 };

    /// Box a signal key.
    pub fn signal(key: SignalKey) -> Self {
        Self {
            kind: HandleKind::Signal as u32,
            bits: key.to_bits(),
        }
    }

    /// Box an entity key.
    pub fn entity(key: EntityKey) -> Self {
        Self {
            kind: HandleKind::Entity as u32,
            bits: key.to_bits(),
        }
    }

    /// Decoded kind tag.
    pub fn kind(self) -> Option<HandleKind> {
        HandleKind::from_raw(self.kind)
    }

    fn bits_of(self, expected: HandleKind) -> Result<u64, BridgeError> {
        match self.kind() {
            Some(kind) if kind == expected => Ok(self.bits),
            Some(kind) => Err(BridgeError::new(
                ErrorKind::TypeMismatch,
                format!(
                    "expected {} handle, got {} handle",
                    expected.name(),
                    kind.name()
                ),
            )),
            None => Err(BridgeError::new(
                ErrorKind::InvalidHandle,
                format!("not a dyngraph handle (kind tag {})", self.kind),
            )),
        }
    }
}

impl fmt::Display for DgHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            Some(HandleKind::Signal) => write!(f, "{}", SignalKey::from_bits(self.bits)),
            Some(HandleKind::Entity) => write!(f, "{}", EntityKey::from_bits(self.bits)),
            None => write!(f, "invalid#{:#x}", self.bits),
        }
    }
}

/// Unbox a signal handle against `graph`.
pub fn unbox_signal(graph: &Graph, handle: DgHandle) -> Result<SignalKey, BridgeError> {
    let key = SignalKey::from_bits(handle.bits_of(HandleKind::Signal)?);
    if !graph.contains_signal(key) {
        return Err(BridgeError::new(
            ErrorKind::InvalidHandle,
            format!("{key} refers to a destroyed signal"),
        ));
    }
    Ok(key)
}

/// Unbox an entity handle against `graph`.
pub fn unbox_entity(graph: &Graph, handle: DgHandle) -> Result<EntityKey, BridgeError> {
    let key = EntityKey::from_bits(handle.bits_of(HandleKind::Entity)?);
    if !graph.contains_entity(key) {
        return Err(BridgeError::new(
            ErrorKind::InvalidHandle,
            format!("{key} refers to a destroyed entity"),
        ));
    }
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dyngraph_core::ValueType;
    use proptest::prelude::*;

    #[test]
    fn null_handle_is_not_a_handle() {
        let graph = Graph::default();
        let err = unbox_signal(&graph, DgHandle::NULL).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidHandle);
        let forged = DgHandle { kind: 99, bits: 0 };
        assert_eq!(
            unbox_entity(&graph, forged).unwrap_err().kind(),
            ErrorKind::InvalidHandle
        );
    }

    #[test]
    fn wrong_kind_is_a_type_mismatch() {
        let mut graph = Graph::default();
        let s = DgHandle::signal(graph.create_signal("s", ValueType::Int));
        let err = unbox_entity(&graph, s).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(err.message(), "expected entity handle, got signal handle");
    }

    #[test]
    fn destroyed_objects_fail_liveness() {
        let mut graph = Graph::default();
        let key = graph.create_signal("s", ValueType::Int);
        let h = DgHandle::signal(key);
        assert_eq!(unbox_signal(&graph, h).unwrap(), key);
        graph.destroy_signal(key).unwrap();
        let err = unbox_signal(&graph, h).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidHandle);
        assert!(err.message().contains("destroyed signal"));
    }

    #[test]
    fn display_names_the_kind() {
        let h = DgHandle::signal(SignalKey::new(2, 5));
        assert_eq!(h.to_string(), "signal#2v5");
        assert_eq!(DgHandle::NULL.to_string(), "invalid#0x0");
    }

    proptest! {
        #[test]
        fn unknown_tags_are_never_handles(kind in 3u32.., bits in any::<u64>()) {
            let graph = Graph::default();
            let h = DgHandle { kind, bits };
            prop_assert_eq!(unbox_signal(&graph, h).unwrap_err().kind(), ErrorKind::InvalidHandle);
            prop_assert_eq!(unbox_entity(&graph, h).unwrap_err().kind(), ErrorKind::InvalidHandle);
        }

        #[test]
        fn forged_keys_only_unbox_to_live_signals(bits in any::<u64>()) {
            let mut graph = Graph::default();
            let live = graph.create_signal("live", ValueType::Int);
            let forged = DgHandle { kind: HandleKind::Signal as u32, bits };
            match unbox_signal(&graph, forged) {
                Ok(key) => prop_assert_eq!(key, live),
                Err(e) => prop_assert_eq!(e.kind(), ErrorKind::InvalidHandle),
            }
        }
    }
}
