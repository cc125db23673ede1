//! Application shell and event loop
//!
//! Opens the two viewport windows up front, kicks off the background engine
//! load, and attaches a [`Viewport`] to each window once the engine reports
//! ready. Both viewports read the same [`HouseParams`]; the stylized window
//! additionally carries the parameter panel.

use std::sync::Arc;
use std::time::Instant;

use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

use crate::engine::{loader, ReadyPoll, POLL_TIMEOUT};
use crate::gfx::{ViewConfig, Viewport};
use crate::params::HouseParams;
use crate::ui::UiManager;

pub struct CroftApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

/// Which of the two views a window belongs to
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum ViewRole {
    Stylized,
    Realistic,
}

struct AppState {
    params: HouseParams,
    stylized_window: Option<Arc<Window>>,
    realistic_window: Option<Arc<Window>>,
    /// Window ids tracked separately so event routing and teardown stay
    /// checkable without live window handles.
    stylized_id: Option<WindowId>,
    realistic_id: Option<WindowId>,
    stylized: Option<Viewport>,
    realistic: Option<Viewport>,
    ui_manager: Option<UiManager>,
    poll: Option<ReadyPoll>,
    engine_gave_up: bool,
}

impl CroftApp {
    pub fn new() -> Self {
        let event_loop = EventLoop::new().expect("Failed to create event loop");

        Self {
            event_loop: Some(event_loop),
            app_state: AppState::empty(),
        }
    }

    /// Run the application (consumes self and starts the event loop)
    pub fn run(mut self) {
        let event_loop = self.event_loop.take().expect("Event loop already consumed");
        event_loop.set_control_flow(ControlFlow::Poll);

        event_loop
            .run_app(&mut self.app_state)
            .expect("Failed to run event loop");
    }
}

impl Default for CroftApp {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    fn empty() -> Self {
        Self {
            params: HouseParams::default(),
            stylized_window: None,
            realistic_window: None,
            stylized_id: None,
            realistic_id: None,
            stylized: None,
            realistic: None,
            ui_manager: None,
            poll: None,
            engine_gave_up: false,
        }
    }

    fn create_window(
        event_loop: &ActiveEventLoop,
        title: &str,
        width: u32,
        height: u32,
    ) -> Option<Arc<Window>> {
        match event_loop.create_window(
            WindowAttributes::default()
                .with_title(title)
                .with_inner_size(LogicalSize::new(width, height)),
        ) {
            Ok(window) => Some(Arc::new(window)),
            Err(err) => {
                log::error!("failed to create window '{title}': {err}");
                None
            }
        }
    }

    /// Which view the window id belongs to, if any
    ///
    /// Ids of closed windows resolve to `None`, so stale events cannot reach
    /// the other viewport.
    fn view_role(&self, window_id: WindowId) -> Option<ViewRole> {
        if self.stylized_id == Some(window_id) {
            Some(ViewRole::Stylized)
        } else if self.realistic_id == Some(window_id) {
            Some(ViewRole::Realistic)
        } else {
            None
        }
    }

    /// Drops everything the window owns: viewport, panel, handle, id
    ///
    /// Returns true when no windows remain open. Pure state transition; the
    /// caller decides whether to exit the event loop.
    fn release_window(&mut self, window_id: WindowId) -> bool {
        match self.view_role(window_id) {
            Some(ViewRole::Stylized) => {
                self.stylized = None;
                self.ui_manager = None;
                self.stylized_window = None;
                self.stylized_id = None;
                log::info!("stylized window closed");
            }
            Some(ViewRole::Realistic) => {
                self.realistic = None;
                self.realistic_window = None;
                self.realistic_id = None;
                log::info!("realistic window closed");
            }
            None => {}
        }

        self.stylized_id.is_none() && self.realistic_id.is_none()
    }

    /// True when the window still has a live viewport to draw
    fn needs_redraw(&self, window_id: WindowId) -> bool {
        match self.view_role(window_id) {
            Some(ViewRole::Stylized) => self.stylized.is_some(),
            Some(ViewRole::Realistic) => self.realistic.is_some(),
            None => false,
        }
    }

    /// Attaches viewports to the open windows once the engine is available
    ///
    /// Runs at most once per poll interval; after the timeout the windows
    /// simply stay empty.
    fn try_init_viewports(&mut self) {
        if self.engine_gave_up {
            return;
        }
        let Some(poll) = self.poll.as_mut() else {
            return;
        };

        let now = Instant::now();
        if poll.expired(now) {
            log::error!(
                "GPU engine not ready after {POLL_TIMEOUT:?} ({} checks), scenes stay empty",
                poll.attempts()
            );
            self.engine_gave_up = true;
            self.poll = None;
            return;
        }
        if !poll.due(now) {
            return;
        }
        let Some(engine) = loader().ready() else {
            return;
        };

        if let Some(window) = self.stylized_window.clone() {
            match Viewport::new(&engine, window.clone(), ViewConfig::stylized(), &self.params) {
                Ok(viewport) => {
                    self.ui_manager = Some(UiManager::new(
                        &engine.device,
                        &engine.queue,
                        viewport.surface_format(),
                        &window,
                    ));
                    self.stylized = Some(viewport);
                }
                Err(err) => log::error!("stylized viewport init failed: {err:#}"),
            }
        }
        if let Some(window) = self.realistic_window.clone() {
            match Viewport::new(&engine, window, ViewConfig::realistic(), &self.params) {
                Ok(viewport) => self.realistic = Some(viewport),
                Err(err) => log::error!("realistic viewport init failed: {err:#}"),
            }
        }

        self.poll = None;
    }

    /// Pushes the current parameters into every live viewport
    fn propagate_params(&mut self) {
        let params = self.params;
        if let Some(viewport) = self.stylized.as_mut() {
            viewport.apply_params(&params);
        }
        if let Some(viewport) = self.realistic.as_mut() {
            viewport.apply_params(&params);
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.stylized_window.is_some() || self.realistic_window.is_some() {
            return;
        }

        self.stylized_window = Self::create_window(event_loop, "Croft - Stylized", 1200, 800);
        self.realistic_window = Self::create_window(event_loop, "Croft - Realistic", 1200, 800);
        self.stylized_id = self.stylized_window.as_ref().map(|w| w.id());
        self.realistic_id = self.realistic_window.as_ref().map(|w| w.id());

        if self.stylized_window.is_none() && self.realistic_window.is_none() {
            event_loop.exit();
            return;
        }

        loader().ensure_started();
        self.poll = Some(ReadyPoll::new(Instant::now()));
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(role) = self.view_role(window_id) else {
            return;
        };

        // Escape always quits, even while a panel widget holds keyboard
        // focus, so it must run before the capture check.
        if let WindowEvent::KeyboardInput {
            event:
                winit::event::KeyEvent {
                    physical_key:
                        winit::keyboard::PhysicalKey::Code(winit::keyboard::KeyCode::Escape),
                    ..
                },
            ..
        } = &event
        {
            event_loop.exit();
            return;
        }

        // Panel input only exists on the stylized window.
        if role == ViewRole::Stylized {
            if let (Some(ui_manager), Some(window)) =
                (self.ui_manager.as_mut(), self.stylized_window.as_ref())
            {
                if ui_manager.handle_window_event(window, window_id, &event) {
                    window.request_redraw();
                    return;
                }
            }
        }

        match event {
            WindowEvent::Resized(PhysicalSize { width, height }) => match role {
                ViewRole::Stylized => {
                    if let Some(viewport) = self.stylized.as_mut() {
                        viewport.resize(width, height);
                    }
                    if let Some(ui_manager) = self.ui_manager.as_mut() {
                        ui_manager.resize(width, height);
                    }
                }
                ViewRole::Realistic => {
                    if let Some(viewport) = self.realistic.as_mut() {
                        viewport.resize(width, height);
                    }
                }
            },
            WindowEvent::CloseRequested => {
                if self.release_window(window_id) {
                    event_loop.exit();
                }
            }
            WindowEvent::RedrawRequested => match role {
                ViewRole::Stylized => {
                    let Some(viewport) = self.stylized.as_mut() else {
                        return;
                    };
                    let overlay = self
                        .ui_manager
                        .as_mut()
                        .map(|ui_manager| (ui_manager, &mut self.params));

                    match viewport.render_frame(overlay) {
                        Ok(true) => self.propagate_params(),
                        Ok(false) => {}
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("out of GPU memory, exiting");
                            event_loop.exit();
                        }
                        Err(err) => log::warn!("stylized frame skipped: {err}"),
                    }
                }
                ViewRole::Realistic => {
                    let Some(viewport) = self.realistic.as_mut() else {
                        return;
                    };
                    match viewport.render_frame(None) {
                        Ok(_) => {}
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("out of GPU memory, exiting");
                            event_loop.exit();
                        }
                        Err(err) => log::warn!("realistic frame skipped: {err}"),
                    }
                }
            },
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        self.try_init_viewports();

        for window in [self.stylized_window.as_ref(), self.realistic_window.as_ref()]
            .into_iter()
            .flatten()
        {
            if self.needs_redraw(window.id()) {
                window.request_redraw();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_both_windows() -> AppState {
        let mut state = AppState::empty();
        state.stylized_id = Some(WindowId::from(1));
        state.realistic_id = Some(WindowId::from(2));
        state
    }

    #[test]
    fn test_view_role_matches_window_ids_exactly() {
        let state = state_with_both_windows();
        assert_eq!(state.view_role(WindowId::from(1)), Some(ViewRole::Stylized));
        assert_eq!(
            state.view_role(WindowId::from(2)),
            Some(ViewRole::Realistic)
        );
        // An id belonging to neither window routes nowhere.
        assert_eq!(state.view_role(WindowId::from(3)), None);
    }

    #[test]
    fn test_closing_a_window_releases_its_state() {
        let mut state = state_with_both_windows();

        // Closing the first window must not end the app.
        assert!(!state.release_window(WindowId::from(1)));
        assert!(state.stylized.is_none());
        assert!(state.ui_manager.is_none());
        assert_eq!(state.stylized_id, None);
        // The other view is untouched.
        assert_eq!(state.realistic_id, Some(WindowId::from(2)));

        // Closing the last window reports that nothing remains.
        assert!(state.release_window(WindowId::from(2)));
        assert!(state.realistic.is_none());
    }

    #[test]
    fn test_closed_window_gets_no_further_events_or_redraws() {
        let mut state = state_with_both_windows();
        state.release_window(WindowId::from(1));

        // The stale id no longer routes to any view, so its per-frame tick
        // (and frame counter) stops with the viewport.
        assert_eq!(state.view_role(WindowId::from(1)), None);
        assert!(!state.needs_redraw(WindowId::from(1)));
        // The surviving view still resolves normally.
        assert_eq!(
            state.view_role(WindowId::from(2)),
            Some(ViewRole::Realistic)
        );
    }

    #[test]
    fn test_release_ignores_unknown_window_id() {
        let mut state = state_with_both_windows();
        assert!(!state.release_window(WindowId::from(99)));
        assert_eq!(state.stylized_id, Some(WindowId::from(1)));
        assert_eq!(state.realistic_id, Some(WindowId::from(2)));
    }
}
