//! Feedback renderer that grows reaction-diffusion-like textures by
//! blurring and unsharp-masking its own output every tick.

pub mod blur;
pub mod clock;
pub mod draw;
pub mod error;
pub mod export;
pub mod input;
pub mod overlay;
pub mod params;
pub mod pipeline;
pub mod seed;
pub mod settings;
pub mod sim;
pub mod status;
pub mod store;
pub mod text;
pub mod types;
pub mod unsharp;

pub use error::Error;
pub use sim::{Effect, Simulation};
