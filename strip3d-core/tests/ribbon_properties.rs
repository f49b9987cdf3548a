use approx::assert_relative_eq;
use nalgebra::Point3;
use strip3d_core::{
    generate_ribbon, CatmullRom, ControlPointStore, Curve, GeometryError, LineCurve, RibbonOptions,
    RibbonParams, StripMesh,
};

fn road_store() -> ControlPointStore {
    ControlPointStore::from_positions([
        Point3::new(-20.0, 0.0, 10.0),
        Point3::new(-5.0, 2.0, -4.0),
        Point3::new(8.0, -1.0, 3.0),
        Point3::new(22.0, 3.0, -12.0),
        Point3::new(30.0, 0.0, 5.0),
    ])
}

fn unique_vertices(mesh: &StripMesh) -> Vec<strip3d_core::Vertex> {
    match mesh {
        StripMesh::Indexed(mesh) => mesh.vertices.clone(),
        StripMesh::Flat(_) => panic!("expected indexed output"),
    }
}

#[test]
fn vertex_count_is_two_per_section() {
    let store = road_store();
    let curve = CatmullRom::through_all(&store, false).unwrap();
    for n in [2, 3, 10, 57, 300] {
        let mesh = generate_ribbon(&curve, &RibbonParams::new(n, 1.5), &RibbonOptions::default()).unwrap();
        assert_eq!(mesh.vertex_count(), 2 * n, "n = {n}");
        assert_eq!(mesh.to_buffers().positions.len(), 6 * n);
    }
}

#[test]
fn triangle_counts_match_in_both_encodings() {
    let store = road_store();
    let curve = CatmullRom::through_all(&store, false).unwrap();
    for n in [2, 4, 25, 120] {
        let params = RibbonParams::new(n, 2.0);

        let indexed = generate_ribbon(&curve, &params, &RibbonOptions::default()).unwrap();
        let indices = indexed.to_buffers().indices.unwrap();
        assert_eq!(indices.len(), 6 * (n - 1));
        assert!(indices.iter().all(|&i| (i as usize) < 2 * n));

        let flat = generate_ribbon(&curve, &params, &RibbonOptions::default().flat()).unwrap();
        assert_eq!(flat.vertex_count(), 6 * (n - 1));
        assert_eq!(flat.triangle_count(), 2 * (n - 1));
        assert_eq!(flat.to_mesh(), indexed.to_mesh());
    }
}

#[test]
fn triangles_are_not_collinear() {
    let store = road_store();
    let curve = CatmullRom::through_all(&store, false).unwrap();
    let mesh = generate_ribbon(&curve, &RibbonParams::new(80, 0.5), &RibbonOptions::default())
        .unwrap()
        .to_mesh();
    for tri in &mesh.triangles {
        assert!(tri.area() > 0.0);
    }
}

#[test]
fn generation_is_bit_identical() {
    let store = road_store();
    let curve = CatmullRom::through_all(&store, false).unwrap();
    let params = RibbonParams::new(64, 3.25);
    let options = RibbonOptions::default();

    let first = generate_ribbon(&curve, &params, &options).unwrap().to_buffers();
    let second = generate_ribbon(&curve, &params, &options).unwrap().to_buffers();

    let bits = |v: &[f32]| v.iter().map(|f| f.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(&first.positions), bits(&second.positions));
    assert_eq!(bits(&first.normals), bits(&second.normals));
    assert_eq!(bits(&first.uvs), bits(&second.uvs));
    assert_eq!(first.indices, second.indices);
}

#[test]
fn edges_are_equidistant_from_curve() {
    let store = road_store();
    let curve = CatmullRom::through_all(&store, false).unwrap();
    let n = 40;
    let thickness = 2.5;
    let mesh = generate_ribbon(&curve, &RibbonParams::new(n, thickness), &RibbonOptions::default()).unwrap();
    let vertices = unique_vertices(&mesh);

    for i in 0..n {
        let t = i as f32 / (n - 1) as f32;
        let pt = curve.point_at(t);
        let left = vertices[2 * i].position;
        let right = vertices[2 * i + 1].position;

        assert_relative_eq!((left - pt).norm(), thickness, epsilon = 1e-4);
        assert_relative_eq!((right - pt).norm(), thickness, epsilon = 1e-4);
        // Opposite sides: the curve point is the midpoint
        assert_relative_eq!(nalgebra::center(&left, &right), pt, epsilon = 1e-4);
        // Offset is perpendicular to the direction of travel
        assert_relative_eq!((right - left).dot(&curve.tangent_at(t)), 0.0, epsilon = 1e-3);
    }
}

#[test]
fn two_sections_make_one_quad() {
    let line = LineCurve::new(Point3::origin(), Point3::new(0.0, 0.0, -1.0));
    let mesh = generate_ribbon(&line, &RibbonParams::new(2, 1.0), &RibbonOptions::default()).unwrap();
    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.triangle_count(), 2);
    assert_eq!(mesh.to_buffers().indices.unwrap(), vec![0, 1, 2, 1, 3, 2]);
}

#[test]
fn straight_line_example() {
    let line = LineCurve::new(Point3::origin(), Point3::new(0.0, 0.0, -10.0));
    let mesh = generate_ribbon(&line, &RibbonParams::new(3, 1.0), &RibbonOptions::default()).unwrap();
    let positions = mesh.to_buffers().positions;
    assert_eq!(
        positions,
        vec![
            -1.0, 0.0, 0.0, 1.0, 0.0, 0.0, //
            -1.0, 0.0, -5.0, 1.0, 0.0, -5.0, //
            -1.0, 0.0, -10.0, 1.0, 0.0, -10.0,
        ]
    );
}

#[test]
fn invalid_params_produce_no_geometry() {
    let line = LineCurve::new(Point3::origin(), Point3::new(0.0, 0.0, -10.0));
    let result = generate_ribbon(&line, &RibbonParams::new(1, 1.0), &RibbonOptions::default());
    assert!(matches!(result, Err(GeometryError::InvalidParameter { .. })));
}

#[test]
fn moving_a_control_point_reshapes_the_road() {
    let mut store = road_store();
    let before = {
        let curve = CatmullRom::through_all(&store, false).unwrap();
        generate_ribbon(&curve, &RibbonParams::new(20, 1.0), &RibbonOptions::default()).unwrap()
    };

    let first = store.ids().next().unwrap();
    store.translate(first, nalgebra::Vector3::new(0.0, 0.0, 5.0)).unwrap();

    let curve = CatmullRom::through_all(&store, false).unwrap();
    let after = generate_ribbon(&curve, &RibbonParams::new(20, 1.0), &RibbonOptions::default()).unwrap();
    assert_ne!(before, after);
    assert_eq!(before.vertex_count(), after.vertex_count());
}
