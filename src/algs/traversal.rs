//! DFS/BFS flood traversal over face adjacency.

use crate::mesh_error::MeshError;
use crate::topology::handle::FaceId;
use crate::topology::mesh::Mesh;
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

/// Which faces count as neighbours.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Adjacency {
    /// Faces sharing an edge.
    Edge,
    /// Faces sharing at least a node.
    Vertex,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    DFS,
    BFS,
}

pub struct TraversalBuilder<'a, K> {
    mesh: &'a Mesh<K>,
    seeds: Vec<FaceId>,
    adjacency: Adjacency,
    strat: Strategy,
    max_depth: Option<u32>,
    /// If returns true on a discovered face, traversal stops early.
    early_stop: Option<&'a dyn Fn(FaceId) -> bool>,
}

impl<'a, K> TraversalBuilder<'a, K> {
    pub fn new(mesh: &'a Mesh<K>) -> Self {
        Self {
            mesh,
            seeds: Vec::new(),
            adjacency: Adjacency::Edge,
            strat: Strategy::DFS,
            max_depth: None,
            early_stop: None,
        }
    }
    pub fn seeds<I: IntoIterator<Item = FaceId>>(mut self, it: I) -> Self {
        self.seeds = it.into_iter().collect();
        self
    }
    pub fn adjacency(mut self, a: Adjacency) -> Self {
        self.adjacency = a;
        self
    }
    pub fn dfs(mut self) -> Self {
        self.strat = Strategy::DFS;
        self
    }
    pub fn bfs(mut self) -> Self {
        self.strat = Strategy::BFS;
        self
    }
    pub fn max_depth(mut self, d: Option<u32>) -> Self {
        self.max_depth = d;
        self
    }
    pub fn early_stop(mut self, f: &'a dyn Fn(FaceId) -> bool) -> Self {
        self.early_stop = Some(f);
        self
    }

    /// Faces reached from the seeds (seeds included), sorted.
    ///
    /// Fails with [`MeshError::InvalidFace`] if a seed is stale.
    pub fn run(self) -> Result<Vec<FaceId>, MeshError> {
        let TraversalBuilder {
            mesh,
            seeds,
            adjacency,
            strat,
            max_depth,
            early_stop,
        } = self;
        for &f in &seeds {
            mesh.face(f)?;
        }
        let mut seen: HashSet<FaceId> = seeds.iter().copied().collect();
        let mut work: VecDeque<(FaceId, u32)> = seeds.into_iter().map(|f| (f, 0)).collect();

        loop {
            let item = match strat {
                Strategy::DFS => work.pop_back(),
                Strategy::BFS => work.pop_front(),
            };
            let Some((f, d)) = item else { break };
            if let Some(stop) = early_stop {
                if stop(f) {
                    break;
                }
            }
            if max_depth.is_some_and(|md| d >= md) {
                continue;
            }
            for g in step_neighbors(mesh, adjacency, f)? {
                if seen.insert(g) {
                    work.push_back((g, d + 1));
                }
            }
        }
        let mut out: Vec<_> = seen.into_iter().collect();
        out.sort_unstable();
        Ok(out)
    }
}

fn step_neighbors<K>(mesh: &Mesh<K>, adjacency: Adjacency, f: FaceId) -> Result<Vec<FaceId>, MeshError> {
    match adjacency {
        Adjacency::Edge => mesh.face_neighbors(f),
        Adjacency::Vertex => {
            let mut out = BTreeSet::new();
            for n in mesh.face_nodes(f)? {
                out.extend(mesh.incident_faces(n)?);
            }
            out.remove(&f);
            Ok(out.into_iter().collect())
        }
    }
}

/// Edge-connected face components, each sorted, ordered by smallest face.
pub fn connected_components<K>(mesh: &Mesh<K>) -> Result<Vec<Vec<FaceId>>, MeshError> {
    let mut assigned: HashSet<FaceId> = HashSet::new();
    let mut components = Vec::new();
    for f in mesh.faces() {
        if assigned.contains(&f) {
            continue;
        }
        let component = TraversalBuilder::new(mesh).bfs().seeds([f]).run()?;
        assigned.extend(component.iter().copied());
        components.push(component);
    }
    Ok(components)
}

/// BFS distance (in edge-adjacent steps) from `seed` to every reachable face.
pub fn depth_map<K>(mesh: &Mesh<K>, seed: FaceId) -> Result<Vec<(FaceId, u32)>, MeshError> {
    mesh.face(seed)?;
    let mut depth = HashMap::new();
    let mut q = VecDeque::from([(seed, 0u32)]);
    while let Some((f, d)) = q.pop_front() {
        if depth.contains_key(&f) {
            continue;
        }
        depth.insert(f, d);
        for g in mesh.face_neighbors(f)? {
            if !depth.contains_key(&g) {
                q.push_back((g, d + 1));
            }
        }
    }
    let mut v: Vec<_> = depth.into_iter().collect();
    v.sort_by_key(|&(f, _)| f);
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algs::meshgen::{from_triangles, structured_rectangle};
    use crate::geometry::kernel::Point2;

    #[test]
    fn flood_reaches_every_face_of_rectangle() {
        let mesh = structured_rectangle(3, 3, Point2::ZERO, Point2::splat(3.0)).unwrap();
        let seed = mesh.faces().next().unwrap();
        let all: Vec<_> = {
            let mut v: Vec<_> = mesh.faces().collect();
            v.sort_unstable();
            v
        };
        assert_eq!(TraversalBuilder::new(&mesh).seeds([seed]).run().unwrap(), all);
        assert_eq!(
            TraversalBuilder::new(&mesh).bfs().seeds([seed]).run().unwrap(),
            all
        );
        let near = TraversalBuilder::new(&mesh)
            .bfs()
            .max_depth(Some(1))
            .seeds([seed])
            .run()
            .unwrap();
        assert_eq!(near.len(), 1 + mesh.face_neighbors(seed).unwrap().len());
        let vertex_near = TraversalBuilder::new(&mesh)
            .adjacency(Adjacency::Vertex)
            .max_depth(Some(1))
            .seeds([seed])
            .run()
            .unwrap();
        assert!(vertex_near.len() >= near.len());
    }

    #[test]
    fn components_of_disjoint_triangles() {
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(5.0, 0.0),
            Point2::new(6.0, 0.0),
            Point2::new(5.0, 1.0),
        ];
        let mesh = from_triangles(&points, &[[0, 1, 2], [3, 4, 5]]).unwrap();
        let components = connected_components(&mesh).unwrap();
        assert_eq!(components.len(), 2);
        assert!(components.iter().all(|c| c.len() == 1));
    }

    #[test]
    fn depth_map_of_strip() {
        let mesh = structured_rectangle(2, 1, Point2::ZERO, Point2::new(2.0, 1.0)).unwrap();
        let seed = mesh.faces().next().unwrap();
        let depths = depth_map(&mesh, seed).unwrap();
        assert_eq!(depths.len(), 4);
        // Strip order is T1 - T0 - T3 - T2 and the seed is T0.
        let max = depths.iter().map(|&(_, d)| d).max().unwrap();
        assert_eq!(max, 2);
    }
}
