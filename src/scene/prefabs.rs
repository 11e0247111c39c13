use glam::{Mat4, Vec3};
use hecs::{Entity, World};

use crate::components::{
    CapsuleAxis, Collider, GlobalTransform, Layer, LocalTransform, Material, Name, RenderMesh,
    Renderer,
};
use crate::mesh::{create_box, create_sphere, MeshStore, Primitive};

/// Spawn a built-in render primitive, the engine way: a fresh entity with the
/// shared primitive mesh, a default renderer, and the matching unit collider
/// already attached. Callers that want a render-only object must strip the
/// collider themselves.
pub fn spawn_primitive(world: &mut World, meshes: &mut MeshStore, kind: Primitive) -> Entity {
    let handle = meshes.primitive(kind);
    let (name, collider) = match kind {
        Primitive::Cube => (
            "Cube",
            Collider::Box {
                center: Vec3::ZERO,
                size: Vec3::ONE,
            },
        ),
        Primitive::Sphere => (
            "Sphere",
            Collider::Sphere {
                center: Vec3::ZERO,
                radius: 0.5,
            },
        ),
        Primitive::Capsule => (
            "Capsule",
            Collider::Capsule {
                center: Vec3::ZERO,
                radius: 0.5,
                height: 2.0,
                axis: CapsuleAxis::Y,
            },
        ),
    };
    world.spawn((
        Name(name.to_string()),
        LocalTransform::new(Vec3::ZERO),
        GlobalTransform(Mat4::IDENTITY),
        RenderMesh(handle),
        Renderer::default(),
        collider,
    ))
}

/// Spawn an invisible boundary collider box. No render pair: players never
/// see these, which is exactly why the visualizer exists.
pub fn spawn_boundary_wall(
    world: &mut World,
    layer: u32,
    name: &str,
    pos: Vec3,
    size: Vec3,
) -> Entity {
    world.spawn((
        Name(name.to_string()),
        Layer(layer),
        LocalTransform::new(pos),
        GlobalTransform(Mat4::IDENTITY),
        Collider::Box {
            center: Vec3::ZERO,
            size,
        },
    ))
}

/// Spawn an invisible boundary capsule (rope lines, fallen logs).
pub fn spawn_boundary_capsule(
    world: &mut World,
    layer: u32,
    name: &str,
    pos: Vec3,
    radius: f32,
    height: f32,
    axis: CapsuleAxis,
) -> Entity {
    world.spawn((
        Name(name.to_string()),
        Layer(layer),
        LocalTransform::new(pos),
        GlobalTransform(Mat4::IDENTITY),
        Collider::Capsule {
            center: Vec3::ZERO,
            radius,
            height,
            axis,
        },
    ))
}

/// Spawn an invisible boundary sphere (summit triggers).
pub fn spawn_boundary_sphere(
    world: &mut World,
    layer: u32,
    name: &str,
    pos: Vec3,
    center: Vec3,
    radius: f32,
) -> Entity {
    world.spawn((
        Name(name.to_string()),
        Layer(layer),
        LocalTransform::new(pos),
        GlobalTransform(Mat4::IDENTITY),
        Collider::Sphere { center, radius },
    ))
}

/// Spawn a respawn volume. Rendered as a faint unit cube stretched by the
/// transform, with a matching unit box collider — so its proxy inherits the
/// stretch from the parent transform.
pub fn spawn_reset_box(
    world: &mut World,
    meshes: &mut MeshStore,
    name: &str,
    pos: Vec3,
    size: Vec3,
) -> Entity {
    let handle = meshes.primitive(Primitive::Cube);
    let mut transform = LocalTransform::new(pos);
    transform.scale = size;
    world.spawn((
        Name(name.to_string()),
        transform,
        GlobalTransform(Mat4::IDENTITY),
        RenderMesh(handle),
        Renderer {
            material: Material::flat(Vec3::new(0.2, 0.25, 0.6)),
        },
        Collider::Box {
            center: Vec3::ZERO,
            size: Vec3::ONE,
        },
    ))
}

/// Spawn a rock: rendered as a sphere, collided against a coarse box hull.
/// The hull mesh is what a mesh-collider rebuild will surface.
pub fn spawn_rock(
    world: &mut World,
    meshes: &mut MeshStore,
    layer: u32,
    name: &str,
    pos: Vec3,
) -> Entity {
    let render = meshes.add(create_sphere(2.0, 10, 14));
    let hull = meshes.add(create_box(3.2, 2.4, 3.2));
    world.spawn((
        Name(name.to_string()),
        Layer(layer),
        LocalTransform::new(pos),
        GlobalTransform(Mat4::IDENTITY),
        RenderMesh(render),
        Renderer {
            material: Material::flat(Vec3::new(0.45, 0.42, 0.4)),
        },
        Collider::Mesh { mesh: hull },
    ))
}

/// Spawn the ground slab. Plane collider: real collision in the host game,
/// deliberately not a shape the visualizer knows how to proxy.
pub fn spawn_ground(world: &mut World, meshes: &mut MeshStore) -> Entity {
    let handle = meshes.add(create_box(1.0, 1.0, 1.0));
    let mut transform = LocalTransform::new(Vec3::new(0.0, -1.0, 0.0));
    transform.scale = Vec3::new(200.0, 2.0, 200.0);
    world.spawn((
        Name("Ground".to_string()),
        transform,
        GlobalTransform(Mat4::IDENTITY),
        RenderMesh(handle),
        Renderer {
            material: Material::flat(Vec3::new(0.35, 0.5, 0.3)),
        },
        Collider::Plane {
            normal: Vec3::Y,
            offset: 0.0,
        },
    ))
}
