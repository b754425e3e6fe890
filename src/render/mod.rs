pub mod device;
pub mod quad;

pub use device::{GlDevice, GraphicsDevice};
pub use quad::QuadMesh;
