/// Geometry primitives and the two mesh encodings produced by the strip generators
use nalgebra::{Point3, Vector2, Vector3};

/// A 3D vertex with position, normal and an optional UV coordinate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
    pub uv: Option<Vector2<f32>>,
}

impl Vertex {
    pub fn new(x: f32, y: f32, z: f32, nx: f32, ny: f32, nz: f32) -> Self {
        Self {
            position: Point3::new(x, y, z),
            normal: Vector3::new(nx, ny, nz),
            uv: None,
        }
    }

    pub fn from_parts(position: Point3<f32>, normal: Vector3<f32>, uv: Option<Vector2<f32>>) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }

    pub fn with_uv(mut self, u: f32, v: f32) -> Self {
        self.uv = Some(Vector2::new(u, v));
        self
    }
}

/// A triangle face defined by three vertices
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    fn edge_cross(&self) -> Vector3<f32> {
        let v0 = self.vertices[0].position;
        let edge1 = self.vertices[1].position - v0;
        let edge2 = self.vertices[2].position - v0;
        edge1.cross(&edge2)
    }

    /// Calculate the face normal from the triangle's winding.
    ///
    /// Collinear vertices have no face normal and yield the zero vector.
    pub fn calculate_normal(&self) -> Vector3<f32> {
        self.edge_cross()
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vector3::zeros)
    }

    pub fn area(&self) -> f32 {
        self.edge_cross().norm() * 0.5
    }
}

/// Non-indexed mesh: every triangle carries its own three vertices
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(
            self.triangles
                .iter()
                .flat_map(|tri| tri.vertices.iter().map(|v| v.position)),
        )
    }
}

/// Indexed mesh: unique vertices plus a triangle list of `u32` indices
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexedMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl IndexedMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Expand into a triangle soup. Triples referencing missing vertices are skipped.
    pub fn flatten(&self) -> Mesh {
        let mut mesh = Mesh::with_capacity(self.triangle_count());
        for tri in self.indices.chunks_exact(3) {
            let fetch = |i: u32| self.vertices.get(i as usize).copied();
            if let (Some(a), Some(b), Some(c)) = (fetch(tri[0]), fetch(tri[1]), fetch(tri[2])) {
                mesh.add_triangle(Triangle::new(a, b, c));
            }
        }
        mesh
    }

    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.vertices.iter().map(|v| v.position))
    }
}

/// Output of the strip generators, in whichever encoding was requested
#[derive(Debug, Clone, PartialEq)]
pub enum StripMesh {
    Indexed(IndexedMesh),
    Flat(Mesh),
}

impl StripMesh {
    /// Number of vertices in the vertex buffer.
    ///
    /// For the indexed form these are the `2 * num_segments` unique
    /// cross-section vertices. The flat form repeats them per triangle.
    pub fn vertex_count(&self) -> usize {
        match self {
            StripMesh::Indexed(mesh) => mesh.vertices.len(),
            StripMesh::Flat(mesh) => mesh.triangles.len() * 3,
        }
    }

    pub fn triangle_count(&self) -> usize {
        match self {
            StripMesh::Indexed(mesh) => mesh.triangle_count(),
            StripMesh::Flat(mesh) => mesh.triangles.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.triangle_count() == 0
    }

    pub fn to_mesh(&self) -> Mesh {
        match self {
            StripMesh::Indexed(mesh) => mesh.flatten(),
            StripMesh::Flat(mesh) => mesh.clone(),
        }
    }

    pub fn to_buffers(&self) -> MeshBuffers {
        match self {
            StripMesh::Indexed(mesh) => {
                let mut buffers = MeshBuffers::from_vertices(mesh.vertices.iter());
                buffers.indices = Some(mesh.indices.clone());
                buffers
            }
            StripMesh::Flat(mesh) => {
                MeshBuffers::from_vertices(mesh.triangles.iter().flat_map(|t| t.vertices.iter()))
            }
        }
    }

    pub fn bounds(&self) -> Option<Aabb> {
        match self {
            StripMesh::Indexed(mesh) => mesh.bounds(),
            StripMesh::Flat(mesh) => mesh.bounds(),
        }
    }
}

impl Default for StripMesh {
    fn default() -> Self {
        StripMesh::Indexed(IndexedMesh::new())
    }
}

/// Flat numeric channels, ready for upload by any rendering layer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffers {
    /// 3 floats per vertex
    pub positions: Vec<f32>,
    /// 3 floats per vertex
    pub normals: Vec<f32>,
    /// 2 floats per vertex, or empty when any vertex lacks a UV
    pub uvs: Vec<f32>,
    pub indices: Option<Vec<u32>>,
}

impl MeshBuffers {
    fn from_vertices<'a>(vertices: impl Iterator<Item = &'a Vertex>) -> Self {
        let mut buffers = MeshBuffers::default();
        let mut all_uvs = true;
        for vertex in vertices {
            buffers.positions.extend_from_slice(vertex.position.coords.as_slice());
            buffers.normals.extend_from_slice(vertex.normal.as_slice());
            match vertex.uv {
                Some(uv) if all_uvs => buffers.uvs.extend_from_slice(uv.as_slice()),
                _ => all_uvs = false,
            }
        }
        if !all_uvs {
            buffers.uvs.clear();
        }
        buffers
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl Aabb {
    pub fn from_points(points: impl IntoIterator<Item = Point3<f32>>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut aabb = Aabb {
            min: first,
            max: first,
        };
        for p in points {
            aabb.min = aabb.min.inf(&p);
            aabb.max = aabb.max.sup(&p);
        }
        Some(aabb)
    }

    pub fn center(&self) -> Point3<f32> {
        nalgebra::center(&self.min, &self.max)
    }

    pub fn extent(&self) -> Vector3<f32> {
        self.max - self.min
    }

    /// Radius of the sphere enclosing the box
    pub fn radius(&self) -> f32 {
        self.extent().norm() * 0.5
    }
}

/// One line segment per vertex, from its position along its normal.
///
/// Meant for drawing normal guides. The result always matches the mesh's current
/// vertex buffer, so it grows and shrinks with regeneration.
pub fn normal_segments(mesh: &StripMesh, size: f32) -> Vec<(Point3<f32>, Point3<f32>)> {
    let segment = |v: &Vertex| {
        let dir = v.normal.try_normalize(f32::EPSILON).unwrap_or_else(Vector3::zeros);
        (v.position, v.position + dir * size)
    };
    match mesh {
        StripMesh::Indexed(mesh) => mesh.vertices.iter().map(segment).collect(),
        StripMesh::Flat(mesh) => mesh
            .triangles
            .iter()
            .flat_map(|t| t.vertices.iter())
            .map(segment)
            .collect(),
    }
}
