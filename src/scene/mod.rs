pub mod demo;
pub mod layers;
pub mod prefabs;

pub use layers::Layers;

/// Host notification that a scene finished loading. The visualization pass
/// runs once per one of these.
pub struct SceneLoaded {
    pub index: i32,
    pub name: String,
}
