//! Playback window for a recorded trajectory
//!
//! Orthographic view of the fixed world box, camera slowly orbiting
//! the vertical axis while the frames play.

use eframe::egui;
use nbody_core::{DVec3, Trajectory};

/// Half width of the drawn world box
const WORLD_EXTENT: f64 = 200.0;
/// Camera elevation in degrees
const ELEVATION_DEG: f64 = 30.0;
/// Camera azimuth advance per frame in degrees
const AZIMUTH_STEP_DEG: f64 = 0.3;

/// Camera orientation for one frame
#[derive(Debug, Clone, Copy)]
struct View {
    azimuth: f64,
    elevation: f64,
}

impl View {
    fn for_frame(frame: usize) -> Self {
        Self {
            azimuth: (AZIMUTH_STEP_DEG * frame as f64).to_radians(),
            elevation: ELEVATION_DEG.to_radians(),
        }
    }

    /// Screen-plane coordinates (right, up) and depth toward the viewer
    fn project(&self, p: DVec3) -> (f64, f64, f64) {
        let (sa, ca) = self.azimuth.sin_cos();
        let (se, ce) = self.elevation.sin_cos();
        let right = -sa * p.x + ca * p.y;
        let up = -se * ca * p.x - se * sa * p.y + ce * p.z;
        let depth = ce * ca * p.x + ce * sa * p.y + se * p.z;
        (right, up, depth)
    }
}

pub struct PlaybackApp {
    trajectory: Trajectory,
    masses: Vec<f64>,
    frame_rate: f32,
    frame: usize,
    clock: f32,
    playing: bool,
    speed_multiplier: f32,
}

impl PlaybackApp {
    pub fn new(
        trajectory: Trajectory,
        masses: Vec<f64>,
        frame_rate: u32,
        _cc: &eframe::CreationContext<'_>,
    ) -> Self {
        Self {
            trajectory,
            masses,
            frame_rate: frame_rate.max(1) as f32,
            frame: 0,
            clock: 0.0,
            playing: true,
            speed_multiplier: 1.0,
        }
    }

    fn advance(&mut self, frames: usize) {
        if self.trajectory.is_empty() {
            return;
        }
        self.frame = (self.frame + frames) % self.trajectory.len();
    }

    fn reset(&mut self) {
        self.frame = 0;
        self.clock = 0.0;
    }

    fn draw_box(&self, painter: &egui::Painter, to_screen: &impl Fn(DVec3) -> egui::Pos2) {
        let e = WORLD_EXTENT;
        let corner = |i: usize| {
            DVec3::new(
                if i & 1 == 0 { -e } else { e },
                if i & 2 == 0 { -e } else { e },
                if i & 4 == 0 { -e } else { e },
            )
        };
        let stroke = egui::Stroke::new(1.0, egui::Color32::DARK_GRAY);
        for i in 0..8 {
            for bit in [1, 2, 4] {
                let j = i | bit;
                if j != i {
                    painter.line_segment([to_screen(corner(i)), to_screen(corner(j))], stroke);
                }
            }
        }
    }
}

impl eframe::App for PlaybackApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Top bar with controls
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button(if self.playing { "⏸ Pause" } else { "▶ Play" }).clicked() {
                    self.playing = !self.playing;
                }

                if ui.button("⏮ Reset").clicked() {
                    self.reset();
                    self.playing = false;
                }

                if ui.button("⏭ Step").clicked() {
                    self.advance(1);
                }

                ui.separator();

                ui.label("Speed:");
                ui.add(egui::Slider::new(&mut self.speed_multiplier, 0.1..=10.0));

                ui.separator();

                ui.label(format!(
                    "Frame: {} / {}",
                    (self.frame + 1).min(self.trajectory.len()),
                    self.trajectory.len()
                ));
            });
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                let painter = ui.painter().clone();

                // The box diagonal has to fit at any azimuth
                let center = rect.center();
                let scale =
                    (rect.width().min(rect.height()) as f64 / (2.0 * WORLD_EXTENT * 3f64.sqrt())) * 0.95;
                let view = View::for_frame(self.frame);
                let to_screen = |p: DVec3| {
                    let (x, y, _) = view.project(p);
                    center + egui::vec2((x * scale) as f32, (-y * scale) as f32)
                };

                self.draw_box(&painter, &to_screen);

                let Some(positions) = self.trajectory.frame(self.frame) else {
                    ui.centered_and_justified(|ui| ui.label("No frames recorded"));
                    return;
                };

                // Far bodies first so near ones are drawn on top
                let mut order: Vec<(usize, f64)> = positions
                    .iter()
                    .enumerate()
                    .map(|(i, p)| (i, view.project(*p).2))
                    .collect();
                order.sort_by(|a, b| a.1.total_cmp(&b.1));

                for (i, _) in order {
                    let mass = self.masses.get(i).copied().unwrap_or(1.0);
                    let radius = ((mass / 5.0) as f32).clamp(1.0, 20.0);
                    let screen_pos = to_screen(positions[i]);
                    if !rect.contains(screen_pos) {
                        continue;
                    }
                    painter.circle_filled(screen_pos, radius, egui::Color32::LIGHT_BLUE);
                    painter.circle_stroke(
                        screen_pos,
                        radius,
                        egui::Stroke::new(1.0, egui::Color32::BLUE),
                    );
                }
            });

        if self.playing && !self.trajectory.is_empty() {
            let dt = ctx.input(|i| i.stable_dt);
            self.clock += dt * self.frame_rate * self.speed_multiplier;
            let whole = self.clock.floor();
            if whole >= 1.0 {
                self.clock -= whole;
                self.advance(whole as usize);
            }
            ctx.request_repaint();
        }
    }
}
