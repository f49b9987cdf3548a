use strip3d_core::{generate_ring, GeometryError, RingParams, StripMesh, MIN_RING_SEGMENTS};

fn spiral(num_segments: usize, closed: bool) -> RingParams {
    RingParams {
        num_segments,
        closed,
        ..RingParams::default()
    }
}

fn bits(values: &[f32]) -> Vec<u32> {
    values.iter().map(|f| f.to_bits()).collect()
}

#[test]
fn ring_generation_is_bit_identical() {
    for closed in [false, true] {
        for indexed in [true, false] {
            let params = spiral(64, closed);
            let first = generate_ring(&params, indexed).unwrap().to_buffers();
            let second = generate_ring(&params, indexed).unwrap().to_buffers();

            assert_eq!(bits(&first.positions), bits(&second.positions));
            assert_eq!(bits(&first.normals), bits(&second.normals));
            assert_eq!(bits(&first.uvs), bits(&second.uvs));
            assert_eq!(first.indices, second.indices);
        }
    }
}

#[test]
fn ring_triangles_are_not_collinear() {
    for closed in [false, true] {
        for n in [MIN_RING_SEGMENTS, 4, 7, 100, 300] {
            let mesh = generate_ring(&spiral(n, closed), true).unwrap().to_mesh();
            assert!(!mesh.is_empty());
            for tri in &mesh.triangles {
                assert!(tri.area() > 1e-4, "n = {n}, closed = {closed}");
            }
        }
    }
}

#[test]
fn ring_counts_in_both_encodings() {
    for closed in [false, true] {
        let n = 30;
        let boundaries = if closed { n } else { n - 1 };

        let indexed = generate_ring(&spiral(n, closed), true).unwrap();
        assert!(matches!(indexed, StripMesh::Indexed(_)));
        assert_eq!(indexed.vertex_count(), 2 * n);
        assert_eq!(indexed.to_buffers().indices.unwrap().len(), 6 * boundaries);

        let flat = generate_ring(&spiral(n, closed), false).unwrap();
        assert_eq!(flat.vertex_count(), 6 * boundaries);
        assert_eq!(flat.to_mesh(), indexed.to_mesh());
    }
}

#[test]
fn two_section_ring_is_rejected() {
    let result = generate_ring(&spiral(2, false), true);
    assert!(matches!(
        result,
        Err(GeometryError::InvalidParameter { name: "num_segments", .. })
    ));
}
