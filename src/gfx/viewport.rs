//! One window's view of the house
//!
//! A viewport ties together a surface, a fixed camera, a light rig, and its
//! own [`HouseGraph`]. The two viewports share one GPU device but nothing
//! else; each owns its parts, pipelines, and shadow map outright.

use std::sync::Arc;

use anyhow::Context as _;
use cgmath::Point3;

use crate::engine::GpuEngine;
use crate::gfx::camera::ViewCamera;
use crate::gfx::geometry::generate_plane;
use crate::gfx::lights::LightRig;
use crate::gfx::material::StandardMaterial;
use crate::gfx::renderer::SceneRenderer;
use crate::gfx::texture::TextureResource;
use crate::house::{self, HouseGraph, HouseStyle, Part};
use crate::params::HouseParams;
use crate::ui::{panel, UiManager};

/// Fixed per-variant presentation: camera placement, clear color, lights
pub struct ViewConfig {
    pub title: &'static str,
    pub style: HouseStyle,
    pub eye: Point3<f32>,
    pub fov_y_deg: f32,
    pub background: wgpu::Color,
    pub rig: LightRig,
}

impl ViewConfig {
    /// The toy-like scene with orbiting bathroom markers
    pub fn stylized() -> Self {
        Self {
            title: "Croft - Stylized",
            style: HouseStyle::Stylized,
            eye: Point3::new(8.0, 6.0, 12.0),
            fov_y_deg: 45.0,
            // 0x0a0a0a
            background: wgpu::Color {
                r: 10.0 / 255.0,
                g: 10.0 / 255.0,
                b: 10.0 / 255.0,
                a: 1.0,
            },
            rig: LightRig::stylized(),
        }
    }

    /// The architectural scene with a static marker ring
    pub fn realistic() -> Self {
        Self {
            title: "Croft - Realistic",
            style: HouseStyle::Realistic,
            eye: Point3::new(10.0, 8.0, 16.0),
            fov_y_deg: 45.0,
            // 0x101014
            background: wgpu::Color {
                r: 16.0 / 255.0,
                g: 16.0 / 255.0,
                b: 20.0 / 255.0,
                a: 1.0,
            },
            rig: LightRig::realistic(),
        }
    }
}

/// A window with its surface, renderer, and house graph
pub struct Viewport {
    window: Arc<winit::window::Window>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    camera: ViewCamera,
    renderer: SceneRenderer,
    background: wgpu::Color,
    frame_counter: u64,
    /// Scene fixture outside the house graph; the root scale must not apply
    /// to the ground plane.
    ground: Part,
    pub graph: HouseGraph,
}

impl Viewport {
    pub fn new(
        engine: &GpuEngine,
        window: Arc<winit::window::Window>,
        view: ViewConfig,
        params: &HouseParams,
    ) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let (width, height) = (size.width.max(1), size.height.max(1));

        let surface = engine
            .instance
            .create_surface(window.clone())
            .context("failed to create window surface")?;

        let surface_capabilities = surface.get_capabilities(&engine.adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .unwrap_or(surface_capabilities.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: surface_capabilities.present_modes[0],
            alpha_mode: surface_capabilities.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&engine.device, &config);

        let depth_texture =
            TextureResource::create_depth_texture(&engine.device, &config, "depth_texture");

        let camera = ViewCamera::new(
            view.eye,
            Point3::new(0.0, 0.0, 0.0),
            view.fov_y_deg,
            width as f32 / height as f32,
        );

        let renderer = SceneRenderer::new(engine, format, view.rig);

        let mut graph = house::build(view.style);
        house::apply(&mut graph, params);

        // 0x1a4d1a lawn, well below the house so the shadow lands on it
        let ground = Part::new(
            "ground",
            generate_plane(50.0, 50.0),
            StandardMaterial::new(26.0 / 255.0, 77.0 / 255.0, 26.0 / 255.0, 0.9),
        )
        .at(0.0, -2.0, 0.0);

        log::info!(
            "viewport '{}' ready ({}x{}, {:?})",
            view.title,
            width,
            height,
            format
        );

        Ok(Self {
            window,
            device: engine.device.clone(),
            queue: engine.queue.clone(),
            surface,
            config,
            depth_texture,
            camera,
            renderer,
            background: view.background,
            frame_counter: 0,
            ground,
            graph,
        })
    }

    pub fn window(&self) -> &winit::window::Window {
        &self.window
    }

    pub fn window_id(&self) -> winit::window::WindowId {
        self.window.id()
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Re-derives the graph from a new parameter set
    pub fn apply_params(&mut self, params: &HouseParams) {
        house::apply(&mut self.graph, params);
    }

    /// Reconfigures the surface for a new window size
    ///
    /// Zero-sized updates (minimized window) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
        self.camera.resize_projection(width, height);
    }

    /// Advances the animation one tick and renders the frame
    ///
    /// When `overlay` is given the parameter panel is drawn on top; the
    /// return value reports whether the user changed a parameter.
    pub fn render_frame(
        &mut self,
        overlay: Option<(&mut UiManager, &mut HouseParams)>,
    ) -> Result<bool, wgpu::SurfaceError> {
        self.frame_counter += 1;
        house::animate::advance(&mut self.graph, self.frame_counter);

        self.renderer.update_globals(self.camera.uniform());

        let root = self.graph.root_matrix();
        for part in &mut self.graph.structure {
            let model = root * part.local_matrix();
            self.renderer.prepare_part(part, model);
        }
        for window in &mut self.graph.windows {
            let frame_model = root * window.frame.local_matrix();
            self.renderer.prepare_part(&mut window.frame, frame_model);
            let glass_model = root * window.glass.local_matrix();
            self.renderer.prepare_part(&mut window.glass, glass_model);
        }
        for marker in self.graph.markers.iter_mut().filter(|m| m.visible) {
            // Markers orbit outside the house root; world transform only.
            let model = marker.part.local_matrix();
            self.renderer.prepare_part(&mut marker.part, model);
        }
        let ground_model = self.ground.local_matrix();
        self.renderer.prepare_part(&mut self.ground, ground_model);

        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return Ok(false);
            }
            Err(err) => return Err(err),
        };
        let color_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Viewport Encoder"),
            });

        let casters: Vec<&Part> = self.graph.structure.iter().collect();
        self.renderer.shadow_pass(&mut encoder, &casters);

        let mut opaque: Vec<&Part> = Vec::new();
        let mut transparent: Vec<&Part> = Vec::new();
        opaque.push(&self.ground);
        opaque.extend(self.graph.structure.iter());
        for window in &self.graph.windows {
            opaque.push(&window.frame);
            if window.glass.material.is_transparent() {
                transparent.push(&window.glass);
            } else {
                opaque.push(&window.glass);
            }
        }
        opaque.extend(
            self.graph
                .markers
                .iter()
                .filter(|m| m.visible)
                .map(|m| &m.part),
        );

        self.renderer.main_pass(
            &mut encoder,
            &color_view,
            &self.depth_texture.view,
            self.background,
            &opaque,
            &transparent,
        );

        let mut changed = false;
        if let Some((ui, params)) = overlay {
            ui.draw(
                &self.device,
                &self.queue,
                &mut encoder,
                &self.window,
                &color_view,
                |frame_ui| {
                    changed = panel::house_controls(frame_ui, params);
                },
            );
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();

        Ok(changed)
    }
}
