mod components;
mod mesh;
mod scene;
mod systems;

use anyhow::bail;
use clap::Parser;
use hecs::World;

use components::{GlobalTransform, Name, RenderMesh, Renderer};
use mesh::MeshStore;
use scene::{demo, Layers};
use systems::{transform_propagation_system, visualize_colliders_system};

#[derive(Parser)]
#[command(name = "xray", about = "Makes collision volumes visible for debugging")]
struct Args {
    /// Demo scene to load
    #[arg(long, default_value = "Summit_Test")]
    scene: String,

    /// List the available demo scenes and exit
    #[arg(long)]
    list: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.list {
        for name in demo::scene_names() {
            println!("{name}");
        }
        return Ok(());
    }

    let mut world = World::new();
    let mut meshes = MeshStore::new();
    let mut layers = Layers::new();

    let Some(loaded) = demo::load_scene(&args.scene, &mut world, &mut meshes, &mut layers) else {
        bail!(
            "unknown demo scene '{}' (try --list for the available ones)",
            args.scene
        );
    };
    log::info!("scene '{}' loaded (index {})", loaded.name, loaded.index);

    // The host fires its scene-loaded notification; everything the tool does
    // happens synchronously inside this one call.
    let summary = visualize_colliders_system(&mut world, &mut meshes, &layers, &loaded);
    transform_propagation_system(&mut world);

    for &proxy in &summary.proxies {
        if let (Ok(name), Ok(global), Ok(renderer)) = (
            world.get::<&Name>(proxy),
            world.get::<&GlobalTransform>(proxy),
            world.get::<&Renderer>(proxy),
        ) {
            let (scale, _, pos) = global.0.to_scale_rotation_translation();
            let color = renderer.material.color;
            println!(
                "{}  at ({:.1}, {:.1}, {:.1})  extents ({:.1}, {:.1}, {:.1})  {} rgb({:.0}, {:.0}, {:.0})",
                name.0,
                pos.x,
                pos.y,
                pos.z,
                scale.x,
                scale.y,
                scale.z,
                if renderer.material.unlit { "unlit" } else { "lit" },
                color.x * 255.0,
                color.y * 255.0,
                color.z * 255.0
            );
        }
    }
    for &entity in &summary.rebuilt {
        if let (Ok(name), Ok(render)) = (
            world.get::<&Name>(entity),
            world.get::<&RenderMesh>(entity),
        ) {
            let hull = meshes.get(render.0);
            println!(
                "{}  now renders its collision mesh ({} triangles)",
                name.0,
                hull.triangle_count()
            );
        }
    }

    Ok(())
}
