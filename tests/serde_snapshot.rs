mod util;

use mesh_hds::prelude::*;
use util::*;

#[test]
fn mesh_snapshot_round_trip() {
    let mut mesh = grid(2);
    let f = mesh.faces().nth(2).unwrap();
    mesh.split_face(f, mesh.face_centroid(f).unwrap()).unwrap();
    // Leave a vacant slot in the face arena.
    let victim = mesh.faces().next().unwrap();
    mesh.remove_face(victim).unwrap();

    let json = serde_json::to_string(&mesh).unwrap();
    let mut back: Mesh = serde_json::from_str(&json).unwrap();

    assert_eq!(back.node_count(), mesh.node_count());
    assert_eq!(back.edge_count(), mesh.edge_count());
    assert_eq!(back.face_count(), mesh.face_count());
    assert_eq!(back.nodes().collect::<Vec<_>>(), mesh.nodes().collect::<Vec<_>>());
    assert_eq!(back.faces().collect::<Vec<_>>(), mesh.faces().collect::<Vec<_>>());
    for h in mesh.halfedges() {
        assert_eq!(back.halfedge(h).unwrap(), mesh.halfedge(h).unwrap());
    }
    assert_eq!(back.bounding_box(), mesh.bounding_box());
    assert_valid(&back);

    // The stale face handle stays stale, and its slot is reused under a new version.
    assert!(back.face(victim).is_err());
    let [a, b, c] = {
        let h = back.boundary_halfedge().unwrap();
        let loop_: Vec<_> = back.loop_halfedges(h).unwrap().collect();
        assert_eq!(loop_.len(), 3);
        [loop_[0], loop_[1], loop_[2]]
    };
    let refilled = back.add_face(a, b, c).unwrap();
    assert_eq!(slot_of(refilled), slot_of(victim));
    assert_ne!(refilled, victim);
}

#[test]
fn locations_and_options_serialize() {
    let (_, [a, ..], f) = unit_triangle();
    for location in [PointLocation::InFace(f), PointLocation::OnNode(a)] {
        let json = serde_json::to_string(&location).unwrap();
        assert_eq!(serde_json::from_str::<PointLocation>(&json).unwrap(), location);
    }
    let options = LocateOptions::with_max_steps(7);
    let json = serde_json::to_string(&options).unwrap();
    assert_eq!(serde_json::from_str::<LocateOptions>(&json).unwrap(), options);
}

#[test]
fn empty_snapshot_loads_and_accepts_inserts() {
    let json = serde_json::to_string(&Mesh::new()).unwrap();
    let mut back: Mesh = serde_json::from_str(&json).unwrap();
    assert!(back.is_empty());
    let n = back.add_node(p(1.0, 2.0));
    assert_eq!(back.position(n).unwrap(), p(1.0, 2.0));
    assert_eq!(slot_of(n), 1);
}

#[test]
fn snapshot_with_inconsistent_slot_is_rejected() {
    let mut value = serde_json::to_value(grid(1)).unwrap();
    // An occupied slot must carry an odd version.
    value["nodes"][1]["version"] = serde_json::json!(2);
    assert!(serde_json::from_value::<Mesh>(value.clone()).is_err());

    // And a vacant one must not carry a value.
    value["nodes"][1]["version"] = serde_json::json!(1);
    value["faces"][1]["version"] = serde_json::json!(4);
    assert!(serde_json::from_value::<Mesh>(value).is_err());
}

#[test]
fn snapshot_with_broken_topology_is_rejected() {
    let mut value = serde_json::to_value(grid(1)).unwrap();
    // Drop a corner node while its edges still start there.
    value["nodes"][1] = serde_json::json!({ "value": null, "version": 2 });
    let err = serde_json::from_value::<Mesh>(value).unwrap_err();
    assert!(err.to_string().contains("dead node"), "{err}");
}

#[test]
fn snapshot_with_missing_representative_is_rejected() {
    let mut value = serde_json::to_value(grid(1)).unwrap();
    value["nodes"][1]["value"]["halfedge"] = serde_json::Value::Null;
    let err = serde_json::from_value::<Mesh>(value).unwrap_err();
    assert!(err.to_string().contains("cover"), "{err}");
}
