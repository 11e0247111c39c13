use glam::{Mat4, Vec3};
use hecs::World;

use crate::components::{CapsuleAxis, Collider, GlobalTransform, Layer, LocalTransform, Name};
use crate::mesh::MeshStore;
use crate::scene::layers::Layers;
use crate::scene::prefabs::{
    spawn_boundary_capsule, spawn_boundary_sphere, spawn_boundary_wall, spawn_ground,
    spawn_reset_box, spawn_rock,
};
use crate::scene::SceneLoaded;

const SCENES: [&str; 3] = ["Summit_Test", "Gully_Ascent", "Cabin"];

/// Names of the built-in demo scenes, in build-index order.
pub fn scene_names() -> &'static [&'static str] {
    &SCENES
}

/// Build the named demo scene into `world` and report it loaded.
/// Returns None for a name no demo scene carries.
pub fn load_scene(
    name: &str,
    world: &mut World,
    meshes: &mut MeshStore,
    layers: &mut Layers,
) -> Option<SceneLoaded> {
    let index = SCENES.iter().position(|s| *s == name)? as i32;
    match name {
        "Summit_Test" => build_summit(world, meshes, layers),
        "Gully_Ascent" => build_gully(world, meshes, layers),
        "Cabin" => build_cabin(world, meshes, layers),
        _ => unreachable!(),
    }
    Some(SceneLoaded {
        index,
        name: name.to_string(),
    })
}

fn register_standard_layers(layers: &mut Layers) -> u32 {
    layers.register("Default");
    layers.register("Terrain");
    layers.register("PeakBoundary")
}

/// The full kit: boundary boxes, capsules on all three axes, a summit
/// trigger sphere, both reset-box name spellings, and a mesh-collider rock.
fn build_summit(world: &mut World, meshes: &mut MeshStore, layers: &mut Layers) {
    let boundary = register_standard_layers(layers);

    spawn_ground(world, meshes);

    // Invisible kill-walls boxing in the climbable area
    spawn_boundary_wall(
        world,
        boundary,
        "Boundary North",
        Vec3::new(0.0, 10.0, -40.0),
        Vec3::new(80.0, 20.0, 1.0),
    );
    spawn_boundary_wall(
        world,
        boundary,
        "Boundary South",
        Vec3::new(0.0, 10.0, 40.0),
        Vec3::new(80.0, 20.0, 1.0),
    );
    spawn_boundary_wall(
        world,
        boundary,
        "Boundary West",
        Vec3::new(-40.0, 10.0, 0.0),
        Vec3::new(1.0, 20.0, 80.0),
    );
    spawn_boundary_wall(
        world,
        boundary,
        "Boundary East",
        Vec3::new(40.0, 10.0, 0.0),
        Vec3::new(1.0, 20.0, 80.0),
    );

    // Fallen log across the gully floor (capsule along X)
    spawn_boundary_capsule(
        world,
        boundary,
        "Log Barrier",
        Vec3::new(4.0, 0.6, -12.0),
        0.6,
        7.0,
        CapsuleAxis::X,
    );
    // Rope line running into the screen (capsule along Z)
    spawn_boundary_capsule(
        world,
        boundary,
        "Rope Line",
        Vec3::new(-6.0, 2.0, 0.0),
        0.1,
        14.0,
        CapsuleAxis::Z,
    );
    // Upright marker post (default Y axis)
    spawn_boundary_capsule(
        world,
        boundary,
        "Marker Post",
        Vec3::new(10.0, 1.5, 8.0),
        0.25,
        3.0,
        CapsuleAxis::Y,
    );

    spawn_boundary_sphere(
        world,
        boundary,
        "Summit Trigger",
        Vec3::new(0.0, 24.0, 0.0),
        Vec3::new(0.0, 0.5, 0.0),
        1.5,
    );

    spawn_rock(world, meshes, boundary, "Scree Rock", Vec3::new(-14.0, 1.2, 6.0));

    // Respawn volumes qualify by name alone, no boundary layer needed
    spawn_reset_box(
        world,
        meshes,
        "ResetBox Crevasse",
        Vec3::new(8.0, -4.0, 20.0),
        Vec3::new(12.0, 2.0, 6.0),
    );
    spawn_reset_box(
        world,
        meshes,
        "Reset Box Ledge",
        Vec3::new(-10.0, 6.0, -18.0),
        Vec3::new(5.0, 1.0, 5.0),
    );

    // Neither layered nor reset-named: the pass must leave it alone
    world.spawn((
        Name("Flagpole".to_string()),
        Layer(layers.register("Default")),
        LocalTransform::new(Vec3::new(0.0, 26.0, 0.0)),
        GlobalTransform(Mat4::IDENTITY),
        Collider::Box {
            center: Vec3::new(0.0, 1.5, 0.0),
            size: Vec3::new(0.1, 3.0, 0.1),
        },
    ));

    // On the boundary layer but collider-less: dropped silently
    world.spawn((
        Name("Boundary Marker".to_string()),
        Layer(boundary),
        LocalTransform::new(Vec3::new(12.0, 0.0, 12.0)),
        GlobalTransform(Mat4::IDENTITY),
    ));
}

/// Smaller ascent scene: one wall, one reset volume.
fn build_gully(world: &mut World, meshes: &mut MeshStore, layers: &mut Layers) {
    let boundary = register_standard_layers(layers);

    spawn_ground(world, meshes);
    spawn_boundary_wall(
        world,
        boundary,
        "Gully Mouth",
        Vec3::new(0.0, 6.0, -15.0),
        Vec3::new(30.0, 12.0, 1.0),
    );
    spawn_reset_box(
        world,
        meshes,
        "resetbox gully floor",
        Vec3::new(0.0, -3.0, 0.0),
        Vec3::new(20.0, 2.0, 20.0),
    );
}

/// Interior scene. Its name sits in the visualizer's exclusion set, so the
/// pass must leave every one of these colliders untouched.
fn build_cabin(world: &mut World, meshes: &mut MeshStore, layers: &mut Layers) {
    let boundary = register_standard_layers(layers);

    spawn_ground(world, meshes);
    spawn_boundary_wall(
        world,
        boundary,
        "Cabin Yard Fence",
        Vec3::new(0.0, 1.0, -8.0),
        Vec3::new(16.0, 2.0, 0.5),
    );
    spawn_reset_box(
        world,
        meshes,
        "ResetBox Porch",
        Vec3::new(3.0, -1.0, 3.0),
        Vec3::new(4.0, 1.0, 4.0),
    );
}
