//! Platform layer: window, event loop and the showcase driver.
//!
//! The load runs on a worker thread (see `viewer`); the event loop only
//! drains completions and draws, so frame pacing never waits on I/O.

pub mod viewer;

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

use asset::reference::AssetReference;
use asset::{Environment, ModelFormat};
use corelib::content::{self, ViewMode};
use corelib::state::LoadState;
use renderer::GpuState;

use crate::viewer::RotatingViewer;

/// Everything the showcase needs to start, assembled by the binary.
#[derive(Clone, Debug)]
pub struct ShowcaseConfig {
    pub backends: wgpu::Backends,
    pub width: u32,
    pub height: u32,
    pub environment: Environment,
    pub base_path: String,
    pub model_file: String,
    pub format: ModelFormat,
    pub view_mode: ViewMode,
}

impl ShowcaseConfig {
    /// Window title carries the selected audience's headline.
    pub fn window_title(&self) -> String {
        let section = content::section_for(self.view_mode);
        format!("VAULT — {}", section.title)
    }

    pub fn model_reference(&self) -> AssetReference {
        AssetReference::resolve(&self.base_path, self.environment, &self.model_file)
    }
}

struct App {
    config: ShowcaseConfig,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    viewer: RotatingViewer,
    last_frame: Instant,
}

impl App {
    fn new(config: ShowcaseConfig) -> Self {
        Self {
            config,
            window: None,
            gpu: None,
            viewer: RotatingViewer::new(),
            last_frame: Instant::now(),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title(self.config.window_title())
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .expect("Failed to create window"),
        );
        log::info!(
            "Window created: {}x{}",
            window.inner_size().width,
            window.inner_size().height
        );

        let gpu = pollster::block_on(GpuState::new(window.clone(), self.config.backends));

        let reference = self.config.model_reference();
        log::info!(
            "mounting viewer for {} ({})",
            reference,
            self.config.format.label()
        );
        self.viewer.mount(self.config.format, reference);

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.last_frame = Instant::now();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested. Exiting event loop.");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => gpu.resize(size.width, size.height),
            WindowEvent::RedrawRequested => {
                if self.viewer.poll() {
                    match self.viewer.state() {
                        LoadState::Loaded(model) => gpu.install_model(model),
                        // Failure stays silent on screen: nothing to draw.
                        LoadState::Failed(_) => gpu.clear_model(),
                        _ => {}
                    }
                }

                let now = Instant::now();
                let dt = (now - self.last_frame).as_secs_f32();
                self.last_frame = now;
                self.viewer.advance(dt);

                match gpu.render(self.viewer.model_matrix()) {
                    Ok(()) => {}
                    Err(err) if GpuState::is_surface_lost(&err) => gpu.recreate_surface(),
                    Err(err) => log::error!("Unable to render: {err}"),
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        // Continuous animation: ask for the next frame as soon as the
        // queue drains.
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Run the showcase window until closed.
pub fn run(config: ShowcaseConfig) -> Result<()> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ShowcaseConfig {
        ShowcaseConfig {
            backends: wgpu::Backends::all(),
            width: 1280,
            height: 720,
            environment: Environment::Production,
            base_path: "https://vault.example".into(),
            model_file: "swirl.glb".into(),
            format: ModelFormat::GlbBinary,
            view_mode: ViewMode::Retail,
        }
    }

    #[test]
    fn config_resolves_the_model_reference() {
        let reference = config().model_reference();
        assert_eq!(reference.as_str(), "https://vault.example/models/swirl.glb");
    }

    #[test]
    fn window_title_follows_the_view_mode() {
        assert!(config().window_title().contains("Retail"));
    }
}
