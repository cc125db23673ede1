// src/lib.rs
//! Croft 3D house visualiser
//!
//! Renders a procedurally generated house in two independent windows (a
//! stylized variant and a realistic variant) built on wgpu and winit. The
//! house is a pure function of three numeric inputs: bedroom count, bathroom
//! count, and floor area.

pub mod app;
pub mod engine;
pub mod gfx;
pub mod house;
pub mod params;
pub mod ui;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::CroftApp;
pub use params::HouseParams;

/// Creates a default Croft application instance
pub fn default() -> CroftApp {
    CroftApp::new()
}
