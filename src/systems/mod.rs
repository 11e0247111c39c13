mod transform;
mod visualize;

pub use transform::transform_propagation_system;
pub use visualize::{visualize_colliders_system, VisualizeSummary};
