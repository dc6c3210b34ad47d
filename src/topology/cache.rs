//! Invalidation of data the mesh derives from node positions.
//!
//! [`Mesh`](crate::topology::mesh::Mesh) caches its bounding box in a
//! `OnceCell`. `add_node` and `remove_node` clear it through this trait; edge
//! and face operators leave it alone because they never move or drop nodes.

/// A value holding results derived from node positions.
pub trait InvalidateCache {
    /// Drop every cached result; the next query recomputes it.
    fn invalidate_cache(&mut self);
}

/// Boxed meshes invalidate the mesh they own.
impl<T: InvalidateCache + ?Sized> InvalidateCache for Box<T> {
    #[inline]
    fn invalidate_cache(&mut self) {
        (**self).invalidate_cache();
    }
}
