//! Interactive Lorenz attractor viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the simulation state
//! (ensemble, configuration, rng) and implements [`eframe::App`] to
//! render the particles and their trails through an egui UI.

use eframe::App;
use glam::{DMat3, DVec3};
use rand::rng;
use sim_core::{
    config::{Config, LorenzParams},
    ensemble::ParticleEnsemble,
};

/// Where the orbit camera looks; roughly the attractor's centroid for
/// the classical parameters.
const ORBIT_TARGET: DVec3 = DVec3::new(0.0, 0.0, 27.0);

/// Main application state for the interactive viewer.
///
/// [`Viewer`] glues together:
/// - The simulation core: [`ParticleEnsemble`] and [`Config`].
/// - Camera state (orbit angles, zoom, pan) for the 3D → screen mapping.
/// - eframe/egui callbacks for drawing and user interaction.
///
/// The typical per-frame update is:
/// 1. Handle UI interactions / input.
/// 2. If `running` is `true`, advance the ensemble by one tick.
/// 3. Project and draw every particle and its visible trail prefix.
///
/// ### Fields
/// - `ensemble` - The particles being simulated.
/// - `cfg` - Simulation configuration, edited live through the UI.
/// - `rng` - Random number generator used when spawning particles.
///
/// - `running` - Whether the simulation auto-advances each frame.
/// - `requested_count` - Particle count asked for in the UI; applied
///   through `resize` whenever it differs from the ensemble.
///
/// - `yaw`, `pitch` - Orbit angles (radians) around the attractor.
/// - `zoom` - World-to-screen scale factor in pixels per unit.
/// - `pan` - Screen-space pan offset in pixels.
///
/// - `last_tick_time` - Time stamp of the last tick (egui time).
/// - `last_tick_dt` - Wall-clock delta between the last two ticks.
/// - `last_error` - Most recent rejected configuration, for the status bar.
pub struct Viewer {
    ensemble: ParticleEnsemble,
    cfg: Config,

    rng: rand::rngs::ThreadRng,

    running: bool,
    requested_count: usize,

    yaw: f32,
    pitch: f32,
    zoom: f32,
    pan: egui::Vec2,

    last_tick_time: f64,
    last_tick_dt: f64,
    last_error: Option<String>,
}

impl Viewer {
    /// Creates a viewer with the default configuration and 100 particles
    /// scattered in the spawn cube.
    ///
    /// ### Returns
    /// A fully-initialized [`Viewer`], or the [`sim_core::config::ConfigError`]
    /// if the initial configuration is rejected.
    pub fn new() -> Result<Self, sim_core::config::ConfigError> {
        let mut rng = rng();
        let cfg = Config::default();
        let ensemble = ParticleEnsemble::new(100, &cfg, &mut rng)?;

        Ok(Self {
            ensemble,
            cfg,
            rng,
            running: true,
            requested_count: 100,
            yaw: 0.0,
            pitch: -0.4,
            zoom: 5.0,
            pan: egui::vec2(0.0, 0.0),
            last_tick_time: 0.0,
            last_tick_dt: 0.0,
            last_error: None,
        })
    }

    /// Drops all particles and recreates `requested_count` fresh ones.
    ///
    /// Keeps the current configuration and camera. Also the only path
    /// that applies a changed trail capacity, since buffers are sized
    /// at particle construction.
    fn reset(&mut self) {
        let result = self
            .ensemble
            .reset(self.requested_count, &self.cfg, &mut self.rng);
        self.record_result(result);
    }

    /// Advances the simulation by one tick.
    fn tick_once(&mut self) {
        self.ensemble.tick(&self.cfg);
    }

    /// Applies a UI-requested particle count change, if any.
    fn apply_requested_count(&mut self) {
        if self.requested_count != self.ensemble.len() {
            let result = self
                .ensemble
                .resize(self.requested_count, &self.cfg, &mut self.rng);
            self.record_result(result);
        }
    }

    /// Stores a rejected configuration for the status bar, or clears it.
    fn record_result(&mut self, result: Result<(), sim_core::config::ConfigError>) {
        match result {
            Ok(()) => self.last_error = None,
            Err(e) => {
                log::warn!("configuration rejected: {e}");
                self.last_error = Some(e.to_string());
            }
        }
    }

    /// Rotates a world point into camera space.
    ///
    /// World z is the attractor's vertical axis: yaw spins around it,
    /// pitch then tilts the result toward the screen plane. The camera
    /// x axis maps to screen right and the camera z axis to screen up.
    fn to_camera(&self, p: DVec3) -> DVec3 {
        let rel = p - ORBIT_TARGET;
        let spun = DMat3::from_rotation_z(self.yaw as f64) * rel;
        DMat3::from_rotation_x(self.pitch as f64) * spun
    }

    /// Converts a world-space position to screen-space.
    ///
    /// The camera-space point is projected orthographically, scaled by
    /// `zoom`, offset by `pan`, and centered inside `rect`. Screen y
    /// grows downward, so camera "up" is negated.
    ///
    /// ### Parameters
    /// - `p` - World-space position.
    /// - `rect` - Screen-space rectangle representing the drawing area.
    ///
    /// ### Returns
    /// The corresponding egui position in screen-space.
    fn world_to_screen(&self, p: DVec3, rect: egui::Rect) -> egui::Pos2 {
        let cam = self.to_camera(p);
        let center = rect.center();
        egui::pos2(
            center.x + (cam.x as f32) * self.zoom + self.pan.x,
            center.y - (cam.z as f32) * self.zoom + self.pan.y,
        )
    }

    /// Stable display color for the particle at `index`.
    fn particle_color(index: usize) -> egui::Color32 {
        // Golden-ratio hue steps keep adjacent indices far apart.
        let hue = (index as f32 * 0.618_034) % 1.0;
        egui::ecolor::Hsva::new(hue, 0.85, 1.0, 1.0).into()
    }

    /// Helper to draw a labeled `usize` [`egui::DragValue`].
    fn labeled_drag_usize(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut usize,
        range: std::ops::RangeInclusive<usize>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Helper to draw a labeled `f64` [`egui::DragValue`].
    fn labeled_drag_f64(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut f64,
        range: std::ops::RangeInclusive<f64>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Builds the top panel UI (run controls, stepping, zoom).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if self.running { "⏸ Pause" } else { "▶ Run" })
                    .clicked()
                {
                    self.running = !self.running;
                }

                if ui.button("Step").clicked() {
                    self.tick_once();
                }

                if ui.button("Reset").clicked() {
                    self.reset();
                }

                ui.separator();
                ui.add(egui::Slider::new(&mut self.zoom, 1.0..=30.0).text("Zoom"));
            });
        });
    }

    /// Builds the bottom status bar (particle count, tick timing, errors).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("frame dt = {:.1} ms", self.last_tick_dt * 1000.0));
                ui.separator();
                ui.label(format!("particles = {}", self.ensemble.len()));

                if let Some(err) = &self.last_error {
                    ui.separator();
                    ui.colored_label(egui::Color32::LIGHT_RED, err);
                }
            });
        });
    }

    /// Builds the right-hand configuration panel for simulation parameters.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Config");

                ui.separator();
                ui.label("Ensemble");
                Self::labeled_drag_usize(
                    ui,
                    "particles:",
                    &mut self.requested_count,
                    0..=1000,
                    1.0,
                );

                ui.separator();
                ui.label("Integration");
                Self::labeled_drag_f64(ui, "dt:", &mut self.cfg.dt, 0.0001..=0.02, 0.0001);

                ui.separator();
                ui.label("Lorenz parameters");
                Self::labeled_drag_f64(ui, "sigma:", &mut self.cfg.params.sigma, 0.0..=30.0, 0.1);
                Self::labeled_drag_f64(ui, "rho:", &mut self.cfg.params.rho, 0.0..=60.0, 0.1);
                Self::labeled_drag_f64(ui, "beta:", &mut self.cfg.params.beta, 0.0..=10.0, 0.05);

                ui.separator();
                ui.label("Trails");
                let mut show = self.cfg.trails_enabled;
                if ui.checkbox(&mut show, "show trails").changed() {
                    self.cfg.trails_enabled = show;
                    if show {
                        // Drop history accumulated while hidden.
                        self.ensemble.reset_trails();
                    }
                }
                Self::labeled_drag_f64(
                    ui,
                    "trail_scale:",
                    &mut self.cfg.trail_scale,
                    0.0..=30.0,
                    0.5,
                );
                Self::labeled_drag_usize(
                    ui,
                    "capacity (on reset):",
                    &mut self.cfg.trail_capacity,
                    1..=1000,
                    1.0,
                );

                ui.separator();
                ui.label("Spawning");
                Self::labeled_drag_f64(
                    ui,
                    "half width:",
                    &mut self.cfg.spawn_half_width,
                    0.0..=15.0,
                    0.5,
                );

                ui.separator();
                if ui.button("Reset cfg to default").clicked() {
                    self.cfg = Config::default();
                    self.last_error = None;
                }
                if ui.button("Classic chaos params").clicked() {
                    self.cfg.params = LorenzParams::default();
                }
            });
    }

    /// Builds the central panel: orbit input, particle dots, trail lines.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::click_and_drag());
            let rect = response.rect;
            let painter = ui.painter_at(rect);

            // Orbit with primary drag, pan with secondary drag.
            if response.dragged_by(egui::PointerButton::Primary) {
                let delta = response.drag_delta();
                self.yaw += delta.x * 0.01;
                self.pitch = (self.pitch + delta.y * 0.01)
                    .clamp(-std::f32::consts::FRAC_PI_2, std::f32::consts::FRAC_PI_2);
            }
            if response.dragged_by(egui::PointerButton::Secondary) {
                self.pan += response.drag_delta();
            }

            // Zoom about the cursor: keep the hovered point fixed on screen.
            let scroll = ui.ctx().input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                let pointer = response.hover_pos().unwrap_or(rect.center());
                let center = rect.center();

                let factor = (1.0 + scroll * 0.001).clamp(0.5, 2.0);
                let new_zoom = (self.zoom * factor).clamp(1.0, 30.0);

                let scale = new_zoom / self.zoom;
                self.pan = (self.pan - (pointer - center)) * scale + (pointer - center);
                self.zoom = new_zoom;
            }

            // Trails first so particle dots draw on top of them.
            if self.cfg.trails_enabled {
                for (i, p) in self.ensemble.particles().iter().enumerate() {
                    if p.trail().visible_len() < 2 {
                        continue;
                    }
                    let points: Vec<egui::Pos2> = p
                        .trail()
                        .visible_prefix()
                        .map(|pos| self.world_to_screen(pos, rect))
                        .collect();
                    painter.add(egui::Shape::line(
                        points,
                        egui::Stroke::new(1.0, Self::particle_color(i)),
                    ));
                }
            }

            for (i, p) in self.ensemble.particles().iter().enumerate() {
                let pos = self.world_to_screen(p.pos(), rect);
                let r = (0.2 * self.zoom).max(1.5);
                painter.circle_filled(pos, r, Self::particle_color(i));
            }

            // Auto-run: one tick per animation frame.
            if self.running {
                let now = ctx.input(|i| i.time);
                if self.last_tick_time > 0.0 {
                    self.last_tick_dt = now - self.last_tick_time;
                }
                self.tick_once();
                self.last_tick_time = now;

                ctx.request_repaint();
            }
        });
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_requested_count();

        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_rect() -> egui::Rect {
        egui::Rect::from_min_size(egui::Pos2::new(0.0, 0.0), egui::vec2(800.0, 600.0))
    }

    #[test]
    fn new_viewer_starts_with_default_ensemble() {
        let viewer = Viewer::new().unwrap();

        assert_eq!(viewer.ensemble.len(), 100);
        assert_eq!(viewer.requested_count, 100);
        assert!(viewer.running);
        assert!(viewer.last_error.is_none());
    }

    #[test]
    fn orbit_target_projects_to_rect_center_plus_pan() {
        let mut viewer = Viewer::new().unwrap();
        viewer.yaw = 1.3;
        viewer.pitch = -0.7;
        viewer.pan = egui::vec2(12.0, -4.0);
        let rect = test_rect();

        let screen = viewer.world_to_screen(ORBIT_TARGET, rect);
        let center = rect.center();

        assert!((screen.x - (center.x + 12.0)).abs() < 1e-4);
        assert!((screen.y - (center.y - 4.0)).abs() < 1e-4);
    }

    #[test]
    fn zoom_scales_screen_offsets_linearly() {
        let mut viewer = Viewer::new().unwrap();
        viewer.yaw = 0.0;
        viewer.pitch = 0.0;
        viewer.pan = egui::vec2(0.0, 0.0);
        viewer.zoom = 2.0;
        let rect = test_rect();

        let p = ORBIT_TARGET + DVec3::new(3.0, 0.0, 0.0);
        let center = rect.center();

        let s1 = viewer.world_to_screen(p, rect);
        assert!((s1.x - center.x - 6.0).abs() < 1e-4);

        viewer.zoom = 4.0;
        let s2 = viewer.world_to_screen(p, rect);
        assert!((s2.x - center.x - 12.0).abs() < 1e-4);
    }

    #[test]
    fn world_z_maps_to_screen_up_at_rest() {
        let mut viewer = Viewer::new().unwrap();
        viewer.yaw = 0.0;
        viewer.pitch = 0.0;
        viewer.pan = egui::vec2(0.0, 0.0);
        viewer.zoom = 1.0;
        let rect = test_rect();

        let above = ORBIT_TARGET + DVec3::new(0.0, 0.0, 5.0);
        let screen = viewer.world_to_screen(above, rect);

        // Screen y grows downward, so "above" must be smaller y.
        assert!(screen.y < rect.center().y);
    }

    #[test]
    fn tick_once_moves_particles() {
        let mut viewer = Viewer::new().unwrap();
        let before: Vec<DVec3> = viewer.ensemble.particles().iter().map(|p| p.pos()).collect();

        viewer.tick_once();

        let moved = viewer
            .ensemble
            .particles()
            .iter()
            .zip(&before)
            .any(|(p, old)| p.pos() != *old);
        assert!(moved);
    }

    #[test]
    fn apply_requested_count_resizes_ensemble() {
        let mut viewer = Viewer::new().unwrap();

        viewer.requested_count = 3;
        viewer.apply_requested_count();
        assert_eq!(viewer.ensemble.len(), 3);

        viewer.requested_count = 12;
        viewer.apply_requested_count();
        assert_eq!(viewer.ensemble.len(), 12);
        assert!(viewer.last_error.is_none());
    }

    #[test]
    fn invalid_config_is_reported_not_applied() {
        let mut viewer = Viewer::new().unwrap();

        viewer.cfg.dt = 0.0;
        viewer.requested_count = 5;
        viewer.apply_requested_count();

        // The resize was rejected; the ensemble is unchanged and the
        // error is surfaced for the status bar.
        assert_eq!(viewer.ensemble.len(), 100);
        assert!(viewer.last_error.is_some());
    }

    #[test]
    fn reset_recreates_requested_count_particles() {
        let mut viewer = Viewer::new().unwrap();
        viewer.requested_count = 25;

        viewer.reset();

        assert_eq!(viewer.ensemble.len(), 25);
        for p in viewer.ensemble.particles() {
            assert_eq!(p.trail().filled_len(), 0);
        }
    }
}
