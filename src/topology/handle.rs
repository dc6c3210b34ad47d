//! Typed handles for mesh records.
//!
//! Nodes, edges and faces are keys into the mesh's `slotmap` arenas. A key
//! carries the slot's version, so a handle kept past removal stops resolving
//! once the slot is freed or reused and every accessor rejects it.
//!
//! Half-edges have no arena of their own: the two sides of an edge live inside
//! the edge record and a [`HalfedgeId`] is the edge key plus a [`Side`]. `pair`
//! flips the side, so `pair(pair(h)) == h` holds by construction.

use serde::{Deserialize, Serialize};
use slotmap::{Key, new_key_type};
use std::fmt;

new_key_type! {
    /// Handle of a mesh node.
    pub struct NodeId;
    /// Handle of an undirected edge.
    pub struct EdgeId;
    /// Handle of a triangular face.
    pub struct FaceId;
}

/// Which of the two half-edges of an edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    /// The half-edge leaving the first endpoint given to `add_edge`.
    First,
    Second,
}

impl Side {
    #[inline]
    pub const fn flip(self) -> Self {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }
}

/// One directed side of an edge.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HalfedgeId {
    edge: EdgeId,
    side: Side,
}

impl HalfedgeId {
    #[inline]
    pub const fn new(edge: EdgeId, side: Side) -> Self {
        Self { edge, side }
    }

    /// The twin half-edge: same edge, opposite direction.
    #[inline]
    pub const fn pair(self) -> Self {
        Self::new(self.edge, self.side.flip())
    }

    /// The undirected edge this half-edge belongs to.
    #[inline]
    pub const fn edge(self) -> EdgeId {
        self.edge
    }

    #[inline]
    pub const fn side(self) -> Side {
        self.side
    }
}

impl EdgeId {
    /// First half-edge of the edge (the one returned by `add_edge`).
    #[inline]
    pub const fn he1(self) -> HalfedgeId {
        HalfedgeId::new(self, Side::First)
    }

    /// Second half-edge of the edge.
    #[inline]
    pub const fn he2(self) -> HalfedgeId {
        HalfedgeId::new(self, Side::Second)
    }

    /// Both half-edges, `[he1, he2]`.
    #[inline]
    pub const fn halfedges(self) -> [HalfedgeId; 2] {
        [self.he1(), self.he2()]
    }
}

macro_rules! display_as_key_data {
    ($($id:ty),*) => {
        $(
            /// Prints the slot and version, e.g. `3v1`.
            impl fmt::Display for $id {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{:?}", self.data())
                }
            }
        )*
    };
}

display_as_key_data!(NodeId, EdgeId, FaceId);

/// Prints the edge and side, e.g. `3v1:1`.
impl fmt::Display for HalfedgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.edge, self.side.index())
    }
}

impl fmt::Debug for HalfedgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HalfedgeId({self})")
    }
}

#[cfg(test)]
mod layout_tests {
    use super::*;
    use static_assertions::assert_eq_size;

    assert_eq_size!(NodeId, u64);
    assert_eq_size!(Option<NodeId>, u64);
    assert_eq_size!(Option<HalfedgeId>, HalfedgeId);
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::{KeyData, SlotMap};

    #[test]
    fn pair_is_an_involution() {
        let e = EdgeId::from(KeyData::from_ffi((3u64 << 32) | 5));
        let h = e.he1();
        assert_ne!(h, h.pair());
        assert_eq!(h.pair().pair(), h);
        assert_eq!(h.pair(), e.he2());
        assert_eq!(h.edge(), e);
        assert_eq!(h.pair().edge(), e);
        assert_eq!(h.side(), Side::First);
        assert_eq!(h.pair().side(), Side::Second);
    }

    #[test]
    fn version_participates_in_identity() {
        let mut nodes: SlotMap<NodeId, ()> = SlotMap::with_key();
        let a = nodes.insert(());
        nodes.remove(a);
        let b = nodes.insert(());
        assert_ne!(a, b);
        assert!(!nodes.contains_key(a));
        let mut set = std::collections::HashSet::new();
        set.insert(a);
        set.insert(b);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn debug_and_display() {
        let n = NodeId::from(KeyData::from_ffi((1u64 << 32) | 7));
        assert_eq!(format!("{n:?}"), "NodeId(7v1)");
        assert_eq!(format!("{n}"), "7v1");
        let e = EdgeId::from(KeyData::from_ffi((3u64 << 32) | 2));
        assert_eq!(format!("{}", e.he2()), "2v3:1");
        assert_eq!(format!("{:?}", e.he1()), "HalfedgeId(2v3:0)");
    }

    #[test]
    fn serde_round_trip() {
        let h = EdgeId::from(KeyData::from_ffi((9u64 << 32) | 4)).he2();
        let json = serde_json::to_string(&h).unwrap();
        let back: HalfedgeId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, h);
    }

    #[test]
    fn unknown_side_is_rejected() {
        let json = r#"{"edge":{"idx":4,"version":1},"side":"Third"}"#;
        assert!(serde_json::from_str::<HalfedgeId>(json).is_err());
    }
}
