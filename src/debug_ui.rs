//! egui debug overlay: camera mode switching, transform sync, and live
//! wave-uniform editing.

use std::time::{Duration, Instant};

use winit::event::WindowEvent;
use winit::window::Window;

use crate::camera::{CameraMode, CameraRig};
use crate::params::WaveParams;

/// How long the sync button shows its confirmation label.
const SYNC_FEEDBACK: Duration = Duration::from_secs(1);

/// egui context + winit/wgpu glue for the overlay pass.
pub struct DebugUi {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

impl DebugUi {
    pub fn new(window: &Window, device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let ctx = egui::Context::default();
        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let renderer = egui_wgpu::Renderer::new(device, format, None, 1, false);

        Self {
            ctx,
            state,
            renderer,
        }
    }

    /// Feed a window event to egui. Returns true when egui consumed it
    /// (the orbit controller must not see those).
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    /// Run one egui frame with the given panel contents.
    pub fn run(
        &mut self,
        window: &Window,
        mut build: impl FnMut(&egui::Context),
    ) -> egui::FullOutput {
        let raw_input = self.state.take_egui_input(window);
        let mut output = self.ctx.run(raw_input, |ctx| build(ctx));
        self.state
            .handle_platform_output(window, std::mem::take(&mut output.platform_output));
        output
    }

    /// Paint a frame's output on top of the scene pass.
    pub fn paint(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        size_in_pixels: [u32; 2],
        output: egui::FullOutput,
    ) {
        let paint_jobs = self.ctx.tessellate(output.shapes, output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels,
            pixels_per_point: output.pixels_per_point,
        };

        for (id, image_delta) in &output.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, image_delta);
        }
        self.renderer
            .update_buffers(device, queue, encoder, &paint_jobs, &screen_descriptor);

        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Overlay Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                })
                .forget_lifetime();
            self.renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
        }

        for id in &output.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }
}

/// The panel widgets, separate from the GPU plumbing so the wiring logic
/// stays testable.
#[derive(Default)]
pub struct DebugPanel {
    synced_at: Option<Instant>,
}

impl DebugPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draw(&mut self, ctx: &egui::Context, rig: &mut CameraRig, waves: &mut WaveParams) {
        egui::Window::new("Camera")
            .default_width(220.0)
            .show(ctx, |ui| {
                let mut mode = rig.active_mode();
                egui::ComboBox::from_label("Camera Mode")
                    .selected_text(mode.label())
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut mode, CameraMode::Default, "default");
                        ui.selectable_value(&mut mode, CameraMode::Debug, "debug");
                    });
                if mode != rig.active_mode() {
                    rig.set_active_mode(mode);
                }

                if ui.button(self.sync_label()).clicked() {
                    rig.sync_default_from_debug();
                    self.synced_at = Some(Instant::now());
                }
            });

        egui::Window::new("Waves")
            .default_width(260.0)
            .show(ctx, |ui| {
                ui.label("Emissive");
                ui.color_edit_button_rgb(&mut waves.emissive_color);
                ui.add(egui::Slider::new(&mut waves.emissive_low, -1.0..=0.0).text("low"));
                ui.add(egui::Slider::new(&mut waves.emissive_high, 0.0..=1.0).text("high"));
                ui.add(egui::Slider::new(&mut waves.emissive_power, 1.0..=16.0).text("power"));

                ui.separator();
                ui.label("Large waves");
                ui.add(
                    egui::Slider::new(&mut waves.large_frequency[0], 0.0..=10.0)
                        .text("frequency x"),
                );
                ui.add(
                    egui::Slider::new(&mut waves.large_frequency[1], 0.0..=10.0)
                        .text("frequency z"),
                );
                ui.add(egui::Slider::new(&mut waves.large_speed, 0.0..=5.0).text("speed"));
                ui.add(egui::Slider::new(&mut waves.large_multiplier, 0.0..=1.0).text("multiplier"));

                ui.separator();
                ui.label("Small waves");
                ui.add(egui::Slider::new(&mut waves.small_iterations, 1..=8).text("iterations"));
                ui.add(egui::Slider::new(&mut waves.small_frequency, 0.0..=10.0).text("frequency"));
                ui.add(egui::Slider::new(&mut waves.small_speed, 0.0..=2.0).text("speed"));
                ui.add(egui::Slider::new(&mut waves.small_multiplier, 0.0..=1.0).text("multiplier"));

                ui.separator();
                ui.add(
                    egui::Slider::new(&mut waves.normal_shift, 0.001..=0.05)
                        .logarithmic(true)
                        .text("normal shift"),
                );
            });
    }

    /// Button title, reverting from the confirmation text one second
    /// after a click.
    fn sync_label(&self) -> &'static str {
        match self.synced_at {
            Some(at) if at.elapsed() < SYNC_FEEDBACK => "Synced!",
            _ => "Sync Transform",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_label_reverts_after_a_second() {
        let mut panel = DebugPanel::new();
        assert_eq!(panel.sync_label(), "Sync Transform");

        panel.synced_at = Some(Instant::now());
        assert_eq!(panel.sync_label(), "Synced!");

        panel.synced_at = Some(Instant::now() - Duration::from_millis(1100));
        assert_eq!(panel.sync_label(), "Sync Transform");
    }
}
