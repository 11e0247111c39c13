use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec3};
use hecs::{Entity, World};

use crate::components::{
    add_child, CapsuleAxis, Collider, Layer, LocalTransform, Material, Name, Parent, RenderMesh,
    Renderer,
};
use crate::mesh::{MeshHandle, MeshStore, Primitive};
use crate::scene::{Layers, SceneLoaded};

/// Layer carrying the course-boundary colliders worth visualizing.
const BOUNDARY_LAYER: &str = "PeakBoundary";

/// Scenes the pass never touches.
const EXCLUDED_SCENES: [&str; 3] = ["Cabin", "Category4_1_Cabin", "Alps_Main"];

/// An object also qualifies when its lowercased name starts with one of these.
const RESET_BOX_PREFIXES: [&str; 2] = ["resetbox", "reset box"];

const HIGHLIGHT_COLOR: Vec3 = Vec3::new(1.0, 0.0, 0.0);

fn highlight_material() -> Material {
    Material {
        color: HIGHLIGHT_COLOR,
        unlit: true,
    }
}

/// Entities touched by one visualization pass.
#[derive(Default)]
pub struct VisualizeSummary {
    /// Newly spawned proxy entities (box/sphere/capsule colliders).
    pub proxies: Vec<Entity>,
    /// Existing entities whose render pair was rebuilt in place (mesh colliders).
    pub rebuilt: Vec<Entity>,
}

/// Snapshot of one qualifying object, taken before any mutation starts.
struct Candidate {
    entity: Entity,
    name: String,
    collider: Collider,
}

/// Synthesize visible proxy geometry for every qualifying collider in the
/// scene. Runs once per scene load and keeps no state between invocations;
/// running it twice over the same world duplicates the proxies.
pub fn visualize_colliders_system(
    world: &mut World,
    meshes: &mut MeshStore,
    layers: &Layers,
    scene: &SceneLoaded,
) -> VisualizeSummary {
    let Some(boundary) = layers.index_of(BOUNDARY_LAYER) else {
        log::debug!("collider pass skipped: no '{BOUNDARY_LAYER}' layer registered");
        return VisualizeSummary::default();
    };
    if EXCLUDED_SCENES.contains(&scene.name.as_str()) {
        log::debug!("collider pass skipped: scene '{}' is excluded", scene.name);
        return VisualizeSummary::default();
    }

    let candidates = select_candidates(world, boundary);

    let mut summary = VisualizeSummary::default();
    for candidate in candidates {
        match candidate.collider {
            Collider::Box { center, size } => {
                let proxy = spawn_proxy(world, meshes, Primitive::Cube, &candidate);
                place_proxy(world, proxy, center, Quat::IDENTITY, size);
                summary.proxies.push(proxy);
            }
            Collider::Sphere { center, radius } => {
                let proxy = spawn_proxy(world, meshes, Primitive::Sphere, &candidate);
                place_proxy(world, proxy, center, Quat::IDENTITY, Vec3::splat(radius * 2.0));
                summary.proxies.push(proxy);
            }
            Collider::Capsule {
                center,
                radius,
                height,
                axis,
            } => {
                let proxy = spawn_proxy(world, meshes, Primitive::Capsule, &candidate);
                let (rotation, scale) = capsule_proxy_pose(radius, height, axis);
                place_proxy(world, proxy, center, rotation, scale);
                summary.proxies.push(proxy);
            }
            Collider::Mesh { mesh } => {
                reset_render_geometry(world, candidate.entity, mesh);
                apply_highlight(world, candidate.entity, false);
                summary.rebuilt.push(candidate.entity);
            }
            // No primitive counterpart; leave these objects alone.
            Collider::Plane { .. } => {}
        }
    }

    log::info!(
        "scene '{}': {} collider proxies created, {} render meshes rebuilt",
        scene.name,
        summary.proxies.len(),
        summary.rebuilt.len()
    );
    summary
}

/// Filter the scene down to objects worth visualizing: on the boundary layer
/// or reset-box-named, and actually carrying a collider. Collider data is
/// copied out so the caller can mutate the world while iterating.
fn select_candidates(world: &World, boundary: u32) -> Vec<Candidate> {
    world
        .query::<(Option<&Name>, Option<&Layer>, Option<&Collider>)>()
        .iter()
        .filter(|(_, (name, layer, _))| {
            layer.is_some_and(|l| l.0 == boundary)
                || name.is_some_and(|n| {
                    let lower = n.0.to_lowercase();
                    RESET_BOX_PREFIXES.iter().any(|p| lower.starts_with(p))
                })
        })
        .filter_map(|(entity, (name, _, collider))| {
            collider.map(|c| Candidate {
                entity,
                name: name.map(|n| n.0.clone()).unwrap_or_default(),
                collider: *c,
            })
        })
        .collect()
}

/// Create the render primitive for a proxy, strip the collider the primitive
/// ships with (a proxy must never add physical volume to the scene), name it
/// after the object it visualizes, and parent it there.
fn spawn_proxy(
    world: &mut World,
    meshes: &mut MeshStore,
    kind: Primitive,
    candidate: &Candidate,
) -> Entity {
    let proxy = crate::scene::prefabs::spawn_primitive(world, meshes, kind);
    let _ = world.remove_one::<Collider>(proxy);
    let _ = world.insert_one(proxy, Name(format!("ColliderVisual_{}", candidate.name)));
    add_child(world, candidate.entity, proxy);
    apply_highlight(world, proxy, true);
    proxy
}

/// Only the local transform encodes shape parameters; world pose comes from
/// the parent via transform propagation.
fn place_proxy(world: &mut World, proxy: Entity, position: Vec3, rotation: Quat, scale: Vec3) {
    if let Ok(mut local) = world.get::<&mut LocalTransform>(proxy) {
        local.position = position;
        local.rotation = rotation;
        local.scale = scale;
    }
}

/// A capsule collider is a cylinder of `max(0, height - 2r)` capped by two
/// hemispheres of radius `r`. The primitive capsule mesh is authored two
/// units tall, so the Y scale is half the true end-to-end height.
fn capsule_proxy_pose(radius: f32, height: f32, axis: CapsuleAxis) -> (Quat, Vec3) {
    let diameter = radius * 2.0;
    let cylinder = (height - 2.0 * radius).max(0.0);
    let total_height = cylinder + 2.0 * radius;
    let scale = Vec3::new(diameter, total_height / 2.0, diameter);

    let rotation = match axis {
        CapsuleAxis::X => Quat::from_rotation_z(FRAC_PI_2),
        CapsuleAxis::Y => Quat::IDENTITY,
        CapsuleAxis::Z => Quat::from_rotation_x(FRAC_PI_2),
    };

    (rotation, scale)
}

/// Swap an entity's render pair out for one sourcing `mesh`, as a single
/// reset operation. Used for mesh colliders, where the true collision
/// silhouette replaces whatever the object was rendering before.
fn reset_render_geometry(world: &mut World, entity: Entity, mesh: MeshHandle) {
    let _ = world.remove::<(RenderMesh, Renderer)>(entity);
    let _ = world.insert(entity, (RenderMesh(mesh), Renderer::default()));
}

/// Give `visual`'s renderer the highlight material. A child proxy also costs
/// its parent the original renderer, so the real mesh cannot draw over the
/// highlight. A visual without a renderer is left as bare geometry.
fn apply_highlight(world: &mut World, visual: Entity, child_proxy: bool) {
    if child_proxy {
        let parent = world.get::<&Parent>(visual).map(|p| p.0).ok();
        if let Some(parent) = parent {
            let _ = world.remove_one::<Renderer>(parent);
        }
    }

    if let Ok(mut renderer) = world.get::<&mut Renderer>(visual) {
        renderer.material = highlight_material();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::GlobalTransform;
    use crate::systems::transform_propagation_system;
    use approx::assert_relative_eq;
    use glam::Mat4;

    fn test_layers() -> (Layers, u32) {
        let mut layers = Layers::new();
        layers.register("Default");
        let boundary = layers.register("PeakBoundary");
        (layers, boundary)
    }

    fn loaded(name: &str) -> SceneLoaded {
        SceneLoaded {
            index: 0,
            name: name.to_string(),
        }
    }

    fn spawn_boundary_object(world: &mut World, boundary: u32, name: &str, collider: Collider) -> Entity {
        world.spawn((
            Name(name.to_string()),
            Layer(boundary),
            LocalTransform::new(Vec3::new(1.0, 2.0, 3.0)),
            GlobalTransform(Mat4::IDENTITY),
            collider,
        ))
    }

    fn assert_quat_eq(actual: Quat, expected: Quat) {
        // glam's `angle_between` uses an approximate acos whose error blows up
        // near identical quaternions (dot ~= 1), so even bit-identical inputs
        // can report a few 1e-4 rad of "angle" here; 1e-5 is tighter than the
        // library itself can guarantee.
        assert!(
            actual.angle_between(expected) < 1e-3,
            "rotation mismatch: {actual:?} vs {expected:?}"
        );
    }

    #[test]
    fn box_proxy_takes_center_and_size() {
        let (layers, boundary) = test_layers();
        let mut world = World::new();
        let mut meshes = MeshStore::new();
        let center = Vec3::new(0.5, 1.0, -0.5);
        let size = Vec3::new(2.0, 4.0, 6.0);
        let wall = spawn_boundary_object(
            &mut world,
            boundary,
            "Boundary North",
            Collider::Box { center, size },
        );

        let summary =
            visualize_colliders_system(&mut world, &mut meshes, &layers, &loaded("Summit_Test"));

        assert_eq!(summary.proxies.len(), 1);
        let proxy = summary.proxies[0];
        let local = world.get::<&LocalTransform>(proxy).unwrap();
        assert_eq!(local.position, center);
        assert_quat_eq(local.rotation, Quat::IDENTITY);
        assert_eq!(local.scale, size);
        drop(local);
        assert_eq!(world.get::<&Parent>(proxy).unwrap().0, wall);
        assert_eq!(
            world.get::<&Name>(proxy).unwrap().0,
            "ColliderVisual_Boundary North"
        );
    }

    #[test]
    fn sphere_proxy_scales_to_diameter() {
        let (layers, boundary) = test_layers();
        let mut world = World::new();
        let mut meshes = MeshStore::new();
        let center = Vec3::new(0.0, 0.5, 0.0);
        spawn_boundary_object(
            &mut world,
            boundary,
            "Summit Trigger",
            Collider::Sphere { center, radius: 1.5 },
        );

        let summary =
            visualize_colliders_system(&mut world, &mut meshes, &layers, &loaded("Summit_Test"));

        let proxy = summary.proxies[0];
        let local = world.get::<&LocalTransform>(proxy).unwrap();
        assert_eq!(local.position, center);
        assert_quat_eq(local.rotation, Quat::IDENTITY);
        assert_eq!(local.scale, Vec3::splat(3.0));
    }

    #[test]
    fn capsule_proxy_upright() {
        // r=1, h=4: cylinder section 2, total height 4, Y scale 4/2.
        let (rotation, scale) = capsule_proxy_pose(1.0, 4.0, CapsuleAxis::Y);
        assert_quat_eq(rotation, Quat::IDENTITY);
        assert_eq!(scale, Vec3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn capsule_shorter_than_its_caps_degenerates_to_sphere_height() {
        // r=1, h=1: cylinder section clamps to 0, total height 2r.
        let (rotation, scale) = capsule_proxy_pose(1.0, 1.0, CapsuleAxis::X);
        assert_quat_eq(rotation, Quat::from_rotation_z(FRAC_PI_2));
        assert_eq!(scale, Vec3::new(2.0, 1.0, 2.0));
    }

    #[test]
    fn capsule_z_axis_pitches_forward() {
        let (rotation, _) = capsule_proxy_pose(0.5, 3.0, CapsuleAxis::Z);
        assert_quat_eq(rotation, Quat::from_rotation_x(FRAC_PI_2));
    }

    #[test]
    fn capsule_proxy_spans_collider_extent_in_world() {
        let (layers, boundary) = test_layers();
        let mut world = World::new();
        let mut meshes = MeshStore::new();
        spawn_boundary_object(
            &mut world,
            boundary,
            "Marker Post",
            Collider::Capsule {
                center: Vec3::ZERO,
                radius: 0.25,
                height: 3.0,
                axis: CapsuleAxis::Y,
            },
        );

        let summary =
            visualize_colliders_system(&mut world, &mut meshes, &layers, &loaded("Summit_Test"));
        transform_propagation_system(&mut world);

        // The authored capsule spans Y in [-1, 1]; scaled by total/2 = 1.5 and
        // carried to the parent's position, it must span exactly `height`.
        let proxy = summary.proxies[0];
        let global = world.get::<&GlobalTransform>(proxy).unwrap().0;
        let top = global.transform_point3(Vec3::new(0.0, 1.0, 0.0));
        let bottom = global.transform_point3(Vec3::new(0.0, -1.0, 0.0));
        assert_relative_eq!(top.y - bottom.y, 3.0, epsilon = 1e-5);
        assert_relative_eq!(top.y, 2.0 + 1.5, epsilon = 1e-5);
    }

    #[test]
    fn mesh_collider_rebuilds_render_pair_in_place() {
        let (layers, boundary) = test_layers();
        let mut world = World::new();
        let mut meshes = MeshStore::new();
        let render = meshes.add(crate::mesh::create_sphere(2.0, 6, 8));
        let hull = meshes.add(crate::mesh::create_box(3.0, 2.0, 3.0));
        let rock = world.spawn((
            Name("Scree Rock".to_string()),
            Layer(boundary),
            LocalTransform::new(Vec3::new(4.0, 1.0, 4.0)),
            GlobalTransform(Mat4::IDENTITY),
            RenderMesh(render),
            Renderer::default(),
            Collider::Mesh { mesh: hull },
        ));
        let entities_before = world.len();

        let summary =
            visualize_colliders_system(&mut world, &mut meshes, &layers, &loaded("Summit_Test"));

        // No child proxy: the object itself now renders its collision hull.
        assert!(summary.proxies.is_empty());
        assert_eq!(summary.rebuilt, vec![rock]);
        assert_eq!(world.len(), entities_before);
        assert_eq!(world.get::<&RenderMesh>(rock).unwrap().0, hull);
        assert_eq!(
            world.get::<&Renderer>(rock).unwrap().material,
            highlight_material()
        );
        // The entity's own transform is not the proxy's to touch.
        let local = world.get::<&LocalTransform>(rock).unwrap();
        assert_eq!(local.position, Vec3::new(4.0, 1.0, 4.0));
        assert_eq!(local.scale, Vec3::ONE);
    }

    #[test]
    fn excluded_scene_is_left_untouched() {
        let (layers, boundary) = test_layers();
        let mut world = World::new();
        let mut meshes = MeshStore::new();
        let wall = world.spawn((
            Name("Cabin Yard Fence".to_string()),
            Layer(boundary),
            LocalTransform::new(Vec3::ZERO),
            GlobalTransform(Mat4::IDENTITY),
            Renderer::default(),
            Collider::Box {
                center: Vec3::ZERO,
                size: Vec3::ONE,
            },
        ));
        let entities_before = world.len();

        let summary =
            visualize_colliders_system(&mut world, &mut meshes, &layers, &loaded("Cabin"));

        assert!(summary.proxies.is_empty());
        assert!(summary.rebuilt.is_empty());
        assert_eq!(world.len(), entities_before);
        // No component removals either: the renderer survives.
        assert!(world.get::<&Renderer>(wall).is_ok());
    }

    #[test]
    fn missing_boundary_layer_skips_every_scene() {
        let mut layers = Layers::new();
        layers.register("Default");
        let mut world = World::new();
        let mut meshes = MeshStore::new();
        world.spawn((
            Name("ResetBox Crevasse".to_string()),
            LocalTransform::new(Vec3::ZERO),
            GlobalTransform(Mat4::IDENTITY),
            Collider::Box {
                center: Vec3::ZERO,
                size: Vec3::ONE,
            },
        ));
        let entities_before = world.len();

        let summary =
            visualize_colliders_system(&mut world, &mut meshes, &layers, &loaded("Summit_Test"));

        assert!(summary.proxies.is_empty());
        assert!(summary.rebuilt.is_empty());
        assert_eq!(world.len(), entities_before);
    }

    #[test]
    fn reset_box_names_qualify_without_the_layer() {
        let (layers, _) = test_layers();
        let mut world = World::new();
        let mut meshes = MeshStore::new();
        for name in ["ResetBox Crevasse", "reset box ledge", "RESETBOX 3"] {
            world.spawn((
                Name(name.to_string()),
                LocalTransform::new(Vec3::ZERO),
                GlobalTransform(Mat4::IDENTITY),
                Collider::Box {
                    center: Vec3::ZERO,
                    size: Vec3::ONE,
                },
            ));
        }
        // Close but not a prefix match
        world.spawn((
            Name("reset boulder".to_string()),
            LocalTransform::new(Vec3::ZERO),
            GlobalTransform(Mat4::IDENTITY),
            Collider::Box {
                center: Vec3::ZERO,
                size: Vec3::ONE,
            },
        ));

        let summary =
            visualize_colliders_system(&mut world, &mut meshes, &layers, &loaded("Summit_Test"));

        assert_eq!(summary.proxies.len(), 3);
    }

    #[test]
    fn colliderless_and_off_layer_objects_are_skipped() {
        let (layers, boundary) = test_layers();
        let mut world = World::new();
        let mut meshes = MeshStore::new();
        // On the layer, no collider
        world.spawn((
            Name("Boundary Marker".to_string()),
            Layer(boundary),
            LocalTransform::new(Vec3::ZERO),
            GlobalTransform(Mat4::IDENTITY),
        ));
        // Collider, but neither layer nor qualifying name
        world.spawn((
            Name("Flagpole".to_string()),
            Layer(0),
            LocalTransform::new(Vec3::ZERO),
            GlobalTransform(Mat4::IDENTITY),
            Collider::Box {
                center: Vec3::ZERO,
                size: Vec3::ONE,
            },
        ));

        let summary =
            visualize_colliders_system(&mut world, &mut meshes, &layers, &loaded("Summit_Test"));

        assert!(summary.proxies.is_empty());
        assert!(summary.rebuilt.is_empty());
    }

    #[test]
    fn plane_colliders_are_ignored_by_dispatch() {
        let (layers, boundary) = test_layers();
        let mut world = World::new();
        let mut meshes = MeshStore::new();
        spawn_boundary_object(
            &mut world,
            boundary,
            "Kill Plane",
            Collider::Plane {
                normal: Vec3::Y,
                offset: -10.0,
            },
        );

        let summary =
            visualize_colliders_system(&mut world, &mut meshes, &layers, &loaded("Summit_Test"));

        assert!(summary.proxies.is_empty());
        assert!(summary.rebuilt.is_empty());
    }

    #[test]
    fn no_proxy_keeps_a_collider() {
        let (layers, boundary) = test_layers();
        let mut world = World::new();
        let mut meshes = MeshStore::new();
        spawn_boundary_object(
            &mut world,
            boundary,
            "Wall",
            Collider::Box {
                center: Vec3::ZERO,
                size: Vec3::ONE,
            },
        );
        spawn_boundary_object(
            &mut world,
            boundary,
            "Trigger",
            Collider::Sphere {
                center: Vec3::ZERO,
                radius: 1.0,
            },
        );
        spawn_boundary_object(
            &mut world,
            boundary,
            "Post",
            Collider::Capsule {
                center: Vec3::ZERO,
                radius: 0.5,
                height: 2.0,
                axis: CapsuleAxis::Y,
            },
        );

        let summary =
            visualize_colliders_system(&mut world, &mut meshes, &layers, &loaded("Summit_Test"));

        assert_eq!(summary.proxies.len(), 3);
        for &proxy in &summary.proxies {
            assert!(world.get::<&Collider>(proxy).is_err());
        }
    }

    #[test]
    fn parent_renderer_is_removed_under_a_proxy() {
        let (layers, boundary) = test_layers();
        let mut world = World::new();
        let mut meshes = MeshStore::new();
        let visible = world.spawn((
            Name("ResetBox Porch".to_string()),
            Layer(boundary),
            LocalTransform::new(Vec3::ZERO),
            GlobalTransform(Mat4::IDENTITY),
            Renderer::default(),
            Collider::Box {
                center: Vec3::ZERO,
                size: Vec3::ONE,
            },
        ));
        // Renderer-less candidate: the removal step must be a no-op, not a failure
        let invisible = spawn_boundary_object(
            &mut world,
            boundary,
            "Boundary East",
            Collider::Box {
                center: Vec3::ZERO,
                size: Vec3::ONE,
            },
        );

        let summary =
            visualize_colliders_system(&mut world, &mut meshes, &layers, &loaded("Summit_Test"));

        assert_eq!(summary.proxies.len(), 2);
        assert!(world.get::<&Renderer>(visible).is_err());
        assert!(world.get::<&Renderer>(invisible).is_err());
        for &proxy in &summary.proxies {
            assert_eq!(
                world.get::<&Renderer>(proxy).unwrap().material,
                highlight_material()
            );
        }
    }

    #[test]
    fn rerunning_the_pass_duplicates_proxies() {
        // Known limitation, pinned here so a future dedup guard is a
        // deliberate change rather than an accident.
        let (layers, boundary) = test_layers();
        let mut world = World::new();
        let mut meshes = MeshStore::new();
        let wall = spawn_boundary_object(
            &mut world,
            boundary,
            "Wall",
            Collider::Box {
                center: Vec3::ZERO,
                size: Vec3::ONE,
            },
        );

        let first =
            visualize_colliders_system(&mut world, &mut meshes, &layers, &loaded("Summit_Test"));
        let second =
            visualize_colliders_system(&mut world, &mut meshes, &layers, &loaded("Summit_Test"));

        assert_eq!(first.proxies.len(), 1);
        assert_eq!(second.proxies.len(), 1);
        let children = world.get::<&crate::components::Children>(wall).unwrap();
        assert_eq!(children.0.len(), 2);
    }
}
