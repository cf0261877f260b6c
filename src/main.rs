//! Seaglow - an interactive glowing wave surface
//!
//! A flat grid displaced by layered sine waves plus trough-biased noise,
//! glowing from below, viewed through a two-mode camera rig: an authored
//! default camera and an orbitable debug camera.

use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use seaglow::camera::{CameraMode, CameraRig};
use seaglow::cli::Args;
use seaglow::debug_ui::{DebugPanel, DebugUi};
use seaglow::params::{CameraConfig, RenderConfig, SurfaceGeometry};
use seaglow::rendering::{RenderSystem, Uniforms};
use seaglow::resources::Resources;
use seaglow::scene::Scene;
use seaglow::world::World;

/// Main application state
struct App {
    render_config: RenderConfig,
    initial_mode: CameraMode,

    // Window and rendering (created on resume)
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,
    debug_ui: Option<DebugUi>,
    camera: Option<CameraRig>,

    // Scene state
    panel: DebugPanel,
    world: World,
    scene: Scene,
    resources: Resources,

    // Time tracking
    start_time: Instant,
}

impl App {
    fn new(args: &Args) -> Self {
        Self {
            render_config: args.render_config(),
            initial_mode: args.parse_mode(),
            window: None,
            render_system: None,
            debug_ui: None,
            camera: None,
            panel: DebugPanel::new(),
            world: World::new(SurfaceGeometry::default()),
            scene: Scene::new(),
            resources: Resources::new(),
            start_time: Instant::now(),
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &winit::event_loop::ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &winit::event_loop::ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        let window_attributes = Window::default_attributes()
            .with_title("Seaglow")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = Arc::new(event_loop.create_window(window_attributes).unwrap());

        let render_system = pollster::block_on(RenderSystem::new(Arc::clone(&window))).unwrap();

        let debug_ui = self.render_config.debug_panel.then(|| {
            DebugUi::new(&window, &render_system.device, render_system.surface_format())
        });

        let mut camera = CameraRig::new(render_system.aspect_ratio(), &CameraConfig::default());
        camera.set_active_mode(self.initial_mode);

        // The scene owns no real assets; the empty base group still gates
        // construction so the build order matches a loaded scene
        self.resources.declare_group("base", 0);

        log::info!("seaglow running, press ESC to quit");

        self.window = Some(window);
        self.render_system = Some(render_system);
        self.debug_ui = debug_ui;
        self.camera = Some(camera);
    }

    fn window_event(
        &mut self,
        event_loop: &winit::event_loop::ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // The overlay gets first refusal; events it consumes must not
        // reach the orbit controller
        if let (Some(ui), Some(window)) = (&mut self.debug_ui, &self.window) {
            if ui.on_window_event(window, &event) {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => {
                if let Some(camera) = &mut self.camera {
                    camera.teardown();
                }
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(render_system) = &mut self.render_system {
                    render_system.resize(size.width, size.height);
                    if let Some(camera) = &mut self.camera {
                        camera.resize(render_system.aspect_ratio());
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(camera) = &mut self.camera {
                    camera.on_mouse_button(button, state == ElementState::Pressed);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(camera) = &mut self.camera {
                    camera.on_cursor_moved(position.x as f32, position.y as f32);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let amount = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 60.0,
                };
                if let Some(camera) = &mut self.camera {
                    camera.on_scroll(amount);
                }
            }
            WindowEvent::RedrawRequested => {
                self.render_frame();
            }
            _ => {}
        }
    }
}

impl App {
    /// Render a single frame
    fn render_frame(&mut self) {
        let App {
            window,
            render_system,
            debug_ui,
            camera,
            panel,
            world,
            scene,
            resources,
            start_time,
            ..
        } = self;
        let (Some(window), Some(render_system), Some(camera)) = (window, render_system, camera)
        else {
            return;
        };

        // Dispatch asset-group completions; the base group builds the
        // light and the wave surface exactly once
        for event in resources.drain_events() {
            world.handle_group_end(&event.name, scene);
        }
        if let Some(surface) = scene.surfaces.first() {
            if !render_system.has_mesh() {
                render_system.upload_surface(&surface.grid);
            }
        }

        camera.update();

        let time_s = start_time.elapsed().as_secs_f32();
        let light = scene.light.unwrap_or_default();
        let uniforms = Uniforms::compose(
            camera.view_proj(),
            camera.camera.transform.position,
            &world.waves,
            &light,
            time_s,
        );
        render_system.update_uniforms(&uniforms);

        let overlay = debug_ui.as_mut().map(|ui| {
            let output = ui.run(window, |ctx| panel.draw(ctx, camera, &mut world.waves));
            (ui, output)
        });

        match render_system.render(overlay) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                render_system.reconfigure();
            }
            Err(e) => log::error!("render error: {:?}", e),
        }
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut app = App::new(&args);
    let event_loop = EventLoop::new().unwrap();
    let _ = event_loop.run_app(&mut app);
}
