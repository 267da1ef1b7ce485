//! Culling module — sprite bounding boxes and frustum cullers.

mod aabb;
mod culler;
mod orthographic;
mod perspective;

pub use aabb::{Aabb2d, AABB};
pub use culler::{FrustumCuller, CullerKind, CullStats, create_culler};
pub use orthographic::OrthographicFrustumCuller;
pub use perspective::{PerspectiveFrustumCuller, SPRITE_SLAB_HALF_DEPTH};
