pub mod calibrate;
pub mod config;
pub mod matrix;
pub mod render;
pub mod slice;

pub use calibrate::*;
pub use config::*;
pub use matrix::*;
pub use render::*;
pub use slice::*;
