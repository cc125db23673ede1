//! # Graphics Module
//!
//! All rendering machinery for the Croft visualiser: the per-window viewport
//! (surface, camera, depth and shadow buffers), the forward renderer, the
//! procedural geometry generators, and the material/light definitions the
//! house builder styles are made of.
//!
//! ## Architecture Overview
//!
//! - **Viewport** ([`viewport`]) - one per window; owns surface, camera and renderer
//! - **Renderer** ([`renderer`]) - shadow pass + forward pass over a house graph
//! - **Geometry** ([`geometry`]) - procedural primitives (box, sphere, cone, prism, plane)
//! - **Materials** ([`material`]) - standard surface properties as GPU uniforms
//! - **Lights** ([`lights`]) - the fixed per-variant light rigs

pub mod camera;
pub mod geometry;
pub mod lights;
pub mod material;
pub mod renderer;
pub mod texture;
pub mod vertex;
pub mod viewport;

// Re-export commonly used types
pub use camera::ViewCamera;
pub use viewport::{ViewConfig, Viewport};
