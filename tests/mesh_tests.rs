use tether::{TubeMesh, TubeMeshBuilder, Vec3};

fn straight_points(count: usize) -> Vec<Vec3<f32>> {
    (0..count).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect()
}

fn assert_outward_winding(mesh: &TubeMesh<f32>) {
    for tri in mesh.triangles.chunks(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let face = (mesh.vertices[b] - mesh.vertices[a]).cross(mesh.vertices[c] - mesh.vertices[a]);
        let normal = mesh.normals[a] + mesh.normals[b] + mesh.normals[c];
        assert!(face.dot(normal) > 0.0, "triangle {:?} faces inward", tri);
    }
}

#[test]
fn buffer_sizes_match_topology() {
    for &sides in &[3usize, 6, 16] {
        for &segments in &[1usize, 4, 10] {
            let builder = TubeMeshBuilder::new(0.1f32, sides, 1.0);
            let mesh = builder.build(&straight_points(segments + 1));

            let vertex_count = (sides + 1) * (segments + 1);
            assert_eq!(mesh.vertex_count(), vertex_count);
            assert_eq!(mesh.normals.len(), vertex_count);
            assert_eq!(mesh.tangents.len(), vertex_count);
            assert_eq!(mesh.uvs.len(), vertex_count);
            assert_eq!(mesh.index_count(), segments * sides * 6);
            assert_eq!(builder.vertex_count(segments + 1), vertex_count);
            assert_eq!(builder.index_count(segments), segments * sides * 6);
            assert!(mesh.triangles.iter().all(|&i| (i as usize) < vertex_count));
        }
    }
}

#[test]
fn rings_sit_on_the_tube_surface() {
    let width = 0.4f32;
    let points = straight_points(4);
    let mesh = TubeMeshBuilder::new(width, 8, 1.0).build(&points);

    for (v, vertex) in mesh.vertices.iter().enumerate() {
        let ring = v / 9;
        let radial = *vertex - points[ring];
        assert!((radial.length() - width * 0.5).abs() < 1e-5);
        assert!(radial.x.abs() < 1e-6, "ring should be perpendicular to the cable");

        let normal = mesh.normals[v];
        assert!((normal.length() - 1.0).abs() < 1e-5);
        assert!(normal.dot(mesh.tangents[v]).abs() < 1e-5);
        assert_eq!(mesh.tangents[v], Vec3::new(1.0, 0.0, 0.0));
    }
}

#[test]
fn seam_vertex_duplicates_the_first() {
    let mesh = TubeMeshBuilder::new(0.2f32, 6, 1.0).build(&straight_points(3));
    for ring in 0..3 {
        let first = mesh.vertices[ring * 7];
        let last = mesh.vertices[ring * 7 + 6];
        assert!(first.distance(last) < 1e-5);
        assert_eq!(mesh.uvs[ring * 7][1], 0.0);
        assert_eq!(mesh.uvs[ring * 7 + 6][1], 1.0);
    }
}

#[test]
fn uvs_tile_along_the_cable() {
    let mesh = TubeMeshBuilder::new(0.2f32, 4, 3.0).build(&straight_points(5));
    assert_eq!(mesh.uvs[0][0], 0.0);
    assert!((mesh.uvs[2 * 5][0] - 1.5).abs() < 1e-6);
    assert!((mesh.uvs[4 * 5][0] - 3.0).abs() < 1e-6);
    assert!((mesh.uvs[2][1] - 0.5).abs() < 1e-6);
}

#[test]
fn triangles_face_outward() {
    let mesh = TubeMeshBuilder::new(0.3f32, 6, 1.0).build(&straight_points(5));
    assert_outward_winding(&mesh);

    let curved = vec![
        Vec3::new(0.0f32, 0.0, 0.0),
        Vec3::new(1.0, -0.5, 0.2),
        Vec3::new(2.0, -0.6, 0.1),
        Vec3::new(2.5, 0.3, -0.4),
    ];
    assert_outward_winding(&TubeMeshBuilder::new(0.1f32, 5, 1.0).build(&curved));
}

#[test]
fn first_quad_index_layout() {
    let mesh = TubeMeshBuilder::new(0.1f32, 4, 1.0).build(&straight_points(2));
    // tl = 0, bl = 1, tr = 5, br = 6
    assert_eq!(&mesh.triangles[..6], &[0, 1, 5, 5, 1, 6]);
}

#[test]
fn interior_tangent_uses_both_neighbours() {
    let points = vec![
        Vec3::new(0.0f32, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
    ];
    let mesh = TubeMeshBuilder::new(0.1f32, 3, 1.0).build(&points);
    let h = core::f32::consts::FRAC_1_SQRT_2;

    let start = mesh.tangents[0];
    let middle = mesh.tangents[4];
    let end = mesh.tangents[8];
    assert!(start.distance(Vec3::new(1.0, 0.0, 0.0)) < 1e-6);
    assert!(middle.distance(Vec3::new(h, h, 0.0)) < 1e-6);
    assert!(end.distance(Vec3::new(0.0, 1.0, 0.0)) < 1e-6);
}

#[test]
fn vertical_cable_still_gets_a_valid_frame() {
    let points: Vec<Vec3<f32>> = (0..4).map(|i| Vec3::new(0.0, -(i as f32), 0.0)).collect();
    let mesh = TubeMeshBuilder::new(0.2f32, 6, 1.0).build(&points);

    for (v, normal) in mesh.normals.iter().enumerate() {
        assert!(normal.is_finite());
        assert!((normal.length() - 1.0).abs() < 1e-5, "normal {} is {:?}", v, normal);
        assert!(normal.y.abs() < 1e-5);
    }
    assert_outward_winding(&mesh);
}

#[test]
fn coincident_points_reuse_previous_direction() {
    let points = vec![
        Vec3::new(0.0f32, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 0.0),
    ];
    let mesh = TubeMeshBuilder::new(0.2f32, 3, 1.0).build(&points);
    assert!(mesh.vertices.iter().all(|v| v.is_finite()));
    assert!(mesh.normals.iter().all(|n| (n.length() - 1.0).abs() < 1e-5));
}

#[test]
fn origin_offsets_every_vertex() {
    let points = straight_points(3);
    let origin = Vec3::new(1.0f32, 2.0, 3.0);
    let world = TubeMeshBuilder::new(0.2f32, 4, 1.0).build(&points);
    let local = TubeMeshBuilder::new(0.2f32, 4, 1.0).with_origin(origin).build(&points);

    for (w, l) in world.vertices.iter().zip(&local.vertices) {
        assert!((*w - origin).distance(*l) < 1e-6);
    }
    assert_eq!(world.normals, local.normals);
}

#[test]
fn rebuild_reuses_buffers_in_place() {
    let builder = TubeMeshBuilder::new(0.2f32, 8, 1.0);
    let mut mesh = builder.build(&straight_points(6));
    let capacity = mesh.vertices.capacity();

    let moved: Vec<Vec3<f32>> = straight_points(6)
        .into_iter()
        .map(|p| p + Vec3::new(0.0, 1.0, 0.0))
        .collect();
    builder.rebuild(&moved, &mut mesh);

    assert_eq!(mesh.vertices.capacity(), capacity);
    assert_eq!(mesh, builder.build(&moved));
}

#[test]
fn empty_input_gives_empty_mesh() {
    let mesh = TubeMeshBuilder::new(0.2f32, 8, 1.0).build(&[]);
    assert_eq!(mesh.vertex_count(), 0);
    assert_eq!(mesh.index_count(), 0);
}
