//! Drawing: the surface abstraction the game draws onto, an in-memory
//! canvas implementing it, and the terminal layout around that canvas.

pub mod canvas;
pub mod renderer;
pub mod surface;

pub use canvas::PixelCanvas;
pub use renderer::Renderer;
pub use surface::{Color, DrawSurface, PixelRect};
