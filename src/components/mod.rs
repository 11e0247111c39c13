use glam::{Mat4, Quat, Vec3};
use hecs::{Entity, World};

use crate::mesh::MeshHandle;

/// Spatial transform with position, rotation, and scale (local space).
pub struct LocalTransform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl LocalTransform {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

/// Computed world-space transform matrix, updated by the propagation system.
pub struct GlobalTransform(pub Mat4);

/// Points to the parent entity in the transform hierarchy.
pub struct Parent(pub Entity);

/// Lists child entities in the transform hierarchy.
pub struct Children(pub Vec<Entity>);

/// Attach `child` under `parent` in the transform hierarchy.
pub fn add_child(world: &mut World, parent: Entity, child: Entity) {
    let has_children = world.get::<&Children>(parent).is_ok();
    if has_children {
        let mut children = world.get::<&mut Children>(parent).unwrap();
        if !children.0.contains(&child) {
            children.0.push(child);
        }
    } else {
        world.insert_one(parent, Children(vec![child])).unwrap();
    }

    let _ = world.insert_one(child, Parent(parent));
}

/// Detach `child` from `parent` in the transform hierarchy.
#[allow(dead_code)]
pub fn remove_child(world: &mut World, parent: Entity, child: Entity) {
    if let Ok(mut children) = world.get::<&mut Children>(parent) {
        children.0.retain(|&e| e != child);
    }
    let _ = world.remove_one::<Parent>(child);
}

/// Object name as it appears in the scene listing.
pub struct Name(pub String);

/// Index of the classification layer the entity belongs to (see scene::Layers).
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Layer(pub u32);

/// Geometry source for rendering. One half of the render pair; without a
/// Renderer alongside it, nothing is drawn.
#[derive(Clone, Copy)]
pub struct RenderMesh(pub MeshHandle);

/// Draws the entity's RenderMesh with a material. The other half of the
/// render pair.
pub struct Renderer {
    pub material: Material,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            material: Material::default(),
        }
    }
}

/// Flat surface appearance. `unlit` materials ignore scene lighting.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Material {
    pub color: Vec3,
    pub unlit: bool,
}

impl Material {
    pub fn flat(color: Vec3) -> Self {
        Self { color, unlit: false }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::flat(Vec3::splat(0.8))
    }
}

/// Principal axis of a capsule collider.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CapsuleAxis {
    X,
    Y,
    Z,
}

/// Collision shape attached to an entity. Shape centers are in entity-local
/// space. Closed set: the visualization pass matches exhaustively over it.
#[derive(Clone, Copy)]
pub enum Collider {
    Box {
        center: Vec3,
        size: Vec3,
    },
    Sphere {
        center: Vec3,
        radius: f32,
    },
    /// `height` is the end-to-end extent along `axis`, hemispheres included.
    Capsule {
        center: Vec3,
        radius: f32,
        height: f32,
        axis: CapsuleAxis,
    },
    /// Collides against an arbitrary triangle mesh, which may differ from
    /// what the entity renders.
    Mesh {
        mesh: MeshHandle,
    },
    Plane {
        normal: Vec3,
        offset: f32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_child_links_both_directions() {
        let mut world = World::new();
        let parent = world.spawn((LocalTransform::new(Vec3::ZERO),));
        let child = world.spawn((LocalTransform::new(Vec3::ONE),));

        add_child(&mut world, parent, child);

        assert_eq!(world.get::<&Parent>(child).unwrap().0, parent);
        assert_eq!(world.get::<&Children>(parent).unwrap().0, vec![child]);
    }

    #[test]
    fn add_child_is_idempotent() {
        let mut world = World::new();
        let parent = world.spawn(());
        let child = world.spawn(());

        add_child(&mut world, parent, child);
        add_child(&mut world, parent, child);

        assert_eq!(world.get::<&Children>(parent).unwrap().0.len(), 1);
    }

    #[test]
    fn remove_child_unlinks() {
        let mut world = World::new();
        let parent = world.spawn(());
        let child = world.spawn(());

        add_child(&mut world, parent, child);
        remove_child(&mut world, parent, child);

        assert!(world.get::<&Parent>(child).is_err());
        assert!(world.get::<&Children>(parent).unwrap().0.is_empty());
    }
}
