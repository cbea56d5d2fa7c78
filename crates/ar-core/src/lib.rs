pub mod bounds;
pub mod camera;
pub mod catalog;
pub mod constants;
pub mod controls;
pub mod error;
pub mod framer;
pub mod gestures;
pub mod mesh;
pub mod options;
pub mod session;
pub mod texture;

pub use bounds::*;
pub use camera::*;
pub use catalog::*;
pub use controls::*;
pub use error::*;
pub use framer::*;
pub use gestures::*;
pub use mesh::*;
pub use options::*;
pub use session::*;
pub use texture::*;
