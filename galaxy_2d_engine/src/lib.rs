/*!
# Galaxy 2D Engine

Sprite rendering core of the Galaxy engine family.

The crate turns read-only scene data (sprites, transforms, tilemap chunks)
into as few GPU draw calls as possible, for a fixed game resolution scaled to
any viewport. It is API-agnostic: the GPU is reached only through the
`GpuBackend` and `Shader` traits.

## Architecture

- **CameraSystem**: game resolution, viewport, coordinate conversions
- **Camera**: orthographic or perspective view of the world
- **FrustumCuller**: per-frame visibility tests (orthographic / perspective)
- **SpriteBatch**: sorts quads and batches them by texture
- **Renderer2d**: ordered sprite passes (screen, offscreen framebuffers)

Everything public lives under the `galaxy2d` namespace module.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
mod sprite;
mod camera;
mod culling;
mod render;

// Main galaxy2d namespace module
pub mod galaxy2d {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging facade
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
        // Note: engine_* macros are NOT re-exported here - they are internal only
    }

    // Scene data read by the renderer
    pub mod sprite {
        pub use crate::sprite::*;
    }

    // Cameras and coordinate spaces
    pub mod camera {
        pub use crate::camera::*;
    }

    // Visibility
    pub mod culling {
        pub use crate::culling::*;
    }

    // Batching and passes
    pub mod render {
        pub use crate::render::*;
    }
}

// Re-export math library at crate root
pub use glam;
