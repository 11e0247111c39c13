use std::f32::consts::PI;

use glam::Vec3;

/// Index into the MeshStore.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MeshHandle(pub usize);

/// CPU-side triangle mesh: interleaved position + normal, 6 floats per vertex.
/// Uploading to a GPU is the host renderer's job, not ours.
pub struct MeshData {
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshData {
    #[allow(dead_code)]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 6
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate vertex positions, skipping the interleaved normals.
    #[allow(dead_code)]
    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.vertices
            .chunks_exact(6)
            .map(|v| Vec3::new(v[0], v[1], v[2]))
    }
}

/// Built-in proxy geometry kinds. Each is authored at a fixed reference size
/// so shape parameters map onto the proxy's local scale:
/// cube 1x1x1, sphere of diameter 1, capsule of radius 0.5 and end-to-end
/// height 2 along +Y.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Primitive {
    Cube,
    Sphere,
    Capsule,
}

/// Holds all loaded meshes. Entities reference meshes by MeshHandle index.
pub struct MeshStore {
    meshes: Vec<MeshData>,
    primitives: [Option<MeshHandle>; 3],
}

impl MeshStore {
    pub fn new() -> Self {
        Self {
            meshes: Vec::new(),
            primitives: [None; 3],
        }
    }

    pub fn add(&mut self, mesh: MeshData) -> MeshHandle {
        let handle = MeshHandle(self.meshes.len());
        self.meshes.push(mesh);
        handle
    }

    pub fn get(&self, handle: MeshHandle) -> &MeshData {
        &self.meshes[handle.0]
    }

    /// Handle for a built-in primitive mesh, generated on first use and
    /// shared between all entities that reference it.
    pub fn primitive(&mut self, kind: Primitive) -> MeshHandle {
        let slot = kind as usize;
        if let Some(handle) = self.primitives[slot] {
            return handle;
        }
        let mesh = match kind {
            Primitive::Cube => create_box(1.0, 1.0, 1.0),
            Primitive::Sphere => create_sphere(0.5, 16, 32),
            Primitive::Capsule => create_capsule(0.5, 1.0, 32, 16),
        };
        let handle = self.add(mesh);
        self.primitives[slot] = Some(handle);
        handle
    }
}

pub fn create_sphere(radius: f32, stacks: u32, sectors: u32) -> MeshData {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for i in 0..=stacks {
        let stack_angle = PI / 2.0 - (i as f32) * PI / (stacks as f32);
        let ring = radius * stack_angle.cos();
        let y = radius * stack_angle.sin();

        for j in 0..=sectors {
            let sector_angle = 2.0 * PI * (j as f32) / (sectors as f32);
            let x = ring * sector_angle.cos();
            let z = ring * sector_angle.sin();

            vertices.push(x);
            vertices.push(y);
            vertices.push(z);

            let nx = stack_angle.cos() * sector_angle.cos();
            let ny = stack_angle.sin();
            let nz = stack_angle.cos() * sector_angle.sin();
            vertices.push(nx);
            vertices.push(ny);
            vertices.push(nz);
        }
    }

    for i in 0..stacks {
        for j in 0..sectors {
            let first = i * (sectors + 1) + j;
            let second = first + sectors + 1;

            indices.push(first);
            indices.push(second);
            indices.push(first + 1);

            indices.push(first + 1);
            indices.push(second);
            indices.push(second + 1);
        }
    }

    MeshData { vertices, indices }
}

/// `height` is the straight cylindrical section between the hemisphere caps;
/// the full end-to-end extent along +Y is `height + 2 * radius`.
pub fn create_capsule(radius: f32, height: f32, sectors: u32, stacks: u32) -> MeshData {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    let half_height = height * 0.5;
    let half_stacks = stacks / 2;

    // Top hemisphere (offset up by half_height)
    for i in 0..=half_stacks {
        let stack_angle = PI / 2.0 - (i as f32) * (PI / 2.0) / (half_stacks as f32);
        let ring = radius * stack_angle.cos();
        let y = radius * stack_angle.sin() + half_height;

        for j in 0..=sectors {
            let sector_angle = 2.0 * PI * (j as f32) / (sectors as f32);
            let x = ring * sector_angle.cos();
            let z = ring * sector_angle.sin();

            vertices.push(x);
            vertices.push(y);
            vertices.push(z);

            let nx = stack_angle.cos() * sector_angle.cos();
            let ny = stack_angle.sin();
            let nz = stack_angle.cos() * sector_angle.sin();
            vertices.push(nx);
            vertices.push(ny);
            vertices.push(nz);
        }
    }

    let top_rows = half_stacks + 1;

    // Bottom hemisphere (offset down by half_height)
    for i in 0..=half_stacks {
        let stack_angle = -(i as f32) * (PI / 2.0) / (half_stacks as f32);
        let ring = radius * stack_angle.cos();
        let y = radius * stack_angle.sin() - half_height;

        for j in 0..=sectors {
            let sector_angle = 2.0 * PI * (j as f32) / (sectors as f32);
            let x = ring * sector_angle.cos();
            let z = ring * sector_angle.sin();

            vertices.push(x);
            vertices.push(y);
            vertices.push(z);

            let nx = stack_angle.cos() * sector_angle.cos();
            let ny = stack_angle.sin();
            let nz = stack_angle.cos() * sector_angle.sin();
            vertices.push(nx);
            vertices.push(ny);
            vertices.push(nz);
        }
    }

    let total_rows = top_rows + half_stacks + 1;

    // One quad strip over all rows; the seam between the hemispheres forms
    // the cylinder side.
    for i in 0..(total_rows - 1) {
        for j in 0..sectors {
            let first = i * (sectors + 1) + j;
            let second = first + sectors + 1;

            indices.push(first);
            indices.push(second);
            indices.push(first + 1);

            indices.push(first + 1);
            indices.push(second);
            indices.push(second + 1);
        }
    }

    MeshData { vertices, indices }
}

pub fn create_box(width: f32, height: f32, depth: f32) -> MeshData {
    let hw = width * 0.5;
    let hh = height * 0.5;
    let hd = depth * 0.5;

    #[rustfmt::skip]
    let vertices: Vec<f32> = vec![
        // Front face (+Z)
        -hw, -hh,  hd,  0.0,  0.0,  1.0,
         hw, -hh,  hd,  0.0,  0.0,  1.0,
         hw,  hh,  hd,  0.0,  0.0,  1.0,
        -hw,  hh,  hd,  0.0,  0.0,  1.0,
        // Back face (-Z)
         hw, -hh, -hd,  0.0,  0.0, -1.0,
        -hw, -hh, -hd,  0.0,  0.0, -1.0,
        -hw,  hh, -hd,  0.0,  0.0, -1.0,
         hw,  hh, -hd,  0.0,  0.0, -1.0,
        // Top face (+Y)
        -hw,  hh,  hd,  0.0,  1.0,  0.0,
         hw,  hh,  hd,  0.0,  1.0,  0.0,
         hw,  hh, -hd,  0.0,  1.0,  0.0,
        -hw,  hh, -hd,  0.0,  1.0,  0.0,
        // Bottom face (-Y)
        -hw, -hh, -hd,  0.0, -1.0,  0.0,
         hw, -hh, -hd,  0.0, -1.0,  0.0,
         hw, -hh,  hd,  0.0, -1.0,  0.0,
        -hw, -hh,  hd,  0.0, -1.0,  0.0,
        // Right face (+X)
         hw, -hh,  hd,  1.0,  0.0,  0.0,
         hw, -hh, -hd,  1.0,  0.0,  0.0,
         hw,  hh, -hd,  1.0,  0.0,  0.0,
         hw,  hh,  hd,  1.0,  0.0,  0.0,
        // Left face (-X)
        -hw, -hh, -hd, -1.0,  0.0,  0.0,
        -hw, -hh,  hd, -1.0,  0.0,  0.0,
        -hw,  hh,  hd, -1.0,  0.0,  0.0,
        -hw,  hh, -hd, -1.0,  0.0,  0.0,
    ];

    let mut indices = Vec::new();
    for face in 0..6u32 {
        let base = face * 4;
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    MeshData { vertices, indices }
}
