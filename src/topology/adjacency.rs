//! Adjacency engine: the pointer splices behind the Euler operators.
//!
//! All routines keep the incidence cycle `h -> next(pair(h))` of every node
//! closed. They never allocate or free records.
//!
//! The free-slot searches walk an incidence cycle; each walk is bounded by the
//! number of live half-edges and reports [`MeshError::InvariantViolation`] if a
//! corrupted cycle never returns to its start.

use crate::mesh_error::{MeshError, TopologyError};
use crate::topology::handle::{HalfedgeId, NodeId};
use crate::topology::mesh::Mesh;

impl<K> Mesh<K> {
    /// Splice `h` into the incidence cycle of `n` and make `n` its origin.
    ///
    /// `h` must currently form a 2-cycle with its twin on the `pair(h) -> h`
    /// side (as a fresh half-edge does).
    pub(crate) fn attach(&mut self, h: HalfedgeId, n: NodeId) -> Result<(), MeshError> {
        let representative = self.node(n)?.halfedge;
        self.halfedge_mut(h)?.origin = n;

        match representative {
            None => {
                self.node_mut(n)?.halfedge = Some(h);
                self.link(h.pair(), h)?;
                log::trace!("attach {h} to isolated node {n}");
            }
            Some(_) => {
                let free_in = self.find_free_incident_halfedge(n)?;
                let free_out = self.next(free_in)?;
                self.link(free_in, h)?;
                self.link(h.pair(), free_out)?;
                log::trace!("attach {h} to node {n} after {free_in}");
            }
        }
        Ok(())
    }

    /// Re-splice the cycle at `origin(out)` so that `next(incoming) == out`.
    ///
    /// `incoming` must end where `out` starts. No-op if already adjacent.
    pub(crate) fn merge_adjacent(
        &mut self,
        incoming: HalfedgeId,
        out: HalfedgeId,
    ) -> Result<(), MeshError> {
        let b = self.next(incoming)?;
        if b == out {
            return Ok(());
        }
        let d = self.prev(out)?;
        let g = self.find_free_between(out.pair(), incoming)?;
        let h = self.next(g)?;

        self.link(incoming, out)?;
        self.link(g, b)?;
        self.link(d, h)?;
        log::trace!("merge_adjacent {incoming} -> {out} (free slot {g})");
        Ok(())
    }

    /// Remove `h` from the cycle of its origin.
    ///
    /// The origin's representative moves to the next outgoing half-edge, or is
    /// cleared when `h` was the only one.
    pub(crate) fn detach(&mut self, h: HalfedgeId) -> Result<(), MeshError> {
        let n = self.origin(h)?;
        let after = self.next(h.pair())?;
        if self.node(n)?.halfedge == Some(h) {
            self.node_mut(n)?.halfedge = (after != h).then_some(after);
        }
        let before = self.prev(h)?;
        self.link(before, after)?;
        log::trace!("detach {h} from node {n}");
        Ok(())
    }

    /// A boundary half-edge arriving at `n`.
    ///
    /// Fails with [`TopologyError::NoFreeSlot`] when every incoming half-edge
    /// borders a face.
    pub(crate) fn find_free_incident_halfedge(&self, n: NodeId) -> Result<HalfedgeId, MeshError> {
        let representative = self.node(n)?.halfedge.ok_or_else(|| {
            MeshError::InvariantViolation(format!("free-slot search at isolated node {n}"))
        })?;
        let start = representative.pair();
        let mut current = start;
        for _ in 0..=self.halfedge_count() {
            if self.is_boundary(current)? {
                return Ok(current);
            }
            current = self.next(current)?.pair();
            if current == start {
                return Err(TopologyError::NoFreeSlot { node: n }.into());
            }
        }
        Err(open_cycle(n))
    }

    /// First boundary half-edge from `from` up to (excluding) `until`, walking
    /// the incoming half-edges of their common target.
    pub(crate) fn find_free_between(
        &self,
        from: HalfedgeId,
        until: HalfedgeId,
    ) -> Result<HalfedgeId, MeshError> {
        let node = self.target(from)?;
        let mut current = from;
        for _ in 0..=self.halfedge_count() {
            if self.is_boundary(current)? {
                return Ok(current);
            }
            current = self.next(current)?.pair();
            if current == until {
                return Err(TopologyError::NoFreeSlot { node }.into());
            }
        }
        Err(open_cycle(node))
    }
}

fn open_cycle(n: NodeId) -> MeshError {
    MeshError::InvariantViolation(format!("incidence cycle at node {n} does not close"))
}

#[cfg(test)]
mod tests {
    use crate::geometry::kernel::Point2;
    use crate::mesh_error::{MeshError, TopologyError};
    use crate::topology::mesh::Mesh;

    #[test]
    fn star_cycle_enumerates_every_spoke() {
        let mut mesh = Mesh::new();
        let centre = mesh.add_node(Point2::ZERO);
        let spokes: Vec<_> = (0..4)
            .map(|i| {
                let angle = f64::from(i) * std::f64::consts::FRAC_PI_2;
                let n = mesh.add_node(Point2::new(angle.cos(), angle.sin()));
                mesh.add_edge(centre, n).unwrap()
            })
            .collect();

        let start = mesh.node(centre).unwrap().halfedge().unwrap();
        let mut seen = vec![start];
        let mut h = mesh.next(start.pair()).unwrap();
        while h != start {
            seen.push(h);
            h = mesh.next(h.pair()).unwrap();
        }
        seen.sort();
        let mut expected = spokes.clone();
        expected.sort();
        assert_eq!(seen, expected);
    }

    #[test]
    fn detach_last_halfedge_isolates_node() {
        let mut mesh = Mesh::new();
        let a = mesh.add_node(Point2::ZERO);
        let b = mesh.add_node(Point2::X);
        let h = mesh.add_edge(a, b).unwrap();
        mesh.remove_edge(h.edge()).unwrap();
        assert!(mesh.is_isolated(a).unwrap());
        assert!(mesh.is_isolated(b).unwrap());
    }

    #[test]
    fn free_slot_search_fails_on_enclosed_node() {
        let mut mesh = Mesh::new();
        let o = mesh.add_node(Point2::ZERO);
        let a = mesh.add_node(Point2::new(1.0, 0.0));
        let b = mesh.add_node(Point2::new(-0.5, 1.0));
        let c = mesh.add_node(Point2::new(-0.5, -1.0));
        mesh.add_triangle(o, a, b).unwrap();
        mesh.add_triangle(o, b, c).unwrap();
        assert!(mesh.find_free_incident_halfedge(o).is_ok());
        mesh.add_triangle(o, c, a).unwrap();
        assert_eq!(
            mesh.find_free_incident_halfedge(o),
            Err(MeshError::Topology(TopologyError::NoFreeSlot { node: o }))
        );
        // Rim nodes still have the outer boundary.
        let free = mesh.find_free_incident_halfedge(a).unwrap();
        assert!(mesh.is_boundary(free).unwrap());
        assert_eq!(mesh.target(free).unwrap(), a);
    }
}
