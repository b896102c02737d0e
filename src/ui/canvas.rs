// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Slide drawing surface.
//!
//! This module paints a composed slide view: background, balloons, the
//! content block under its poses, and the confetti layer. The presenter
//! stage and the editor preview both draw through [`paint_slide`].

use super::images::{ImageCache, ImageState};
use crate::presentation::player::{Player, PlayerCommand};
use crate::presentation::registry::{BackgroundFill, Pose, Rgb};
use crate::presentation::render::{confetti_schedule, Balloon, ConfettiBurst, MediaView, SlideView};
use crate::util::geometry::fit_within;
use egui::{Align2, Color32, FontId, Pos2, Rect, Vec2};
use rand::Rng;
use std::time::Instant;

const CONFETTI_LIFETIME: f32 = 3.0;
const CONFETTI_GRAVITY: f32 = 1.2;
const CONFETTI_COLORS: [Rgb; 6] = [
    [255, 214, 10],
    [255, 89, 94],
    [138, 201, 38],
    [25, 130, 196],
    [106, 76, 147],
    [255, 146, 76],
];

fn rgb(c: Rgb, opacity: f32) -> Color32 {
    Color32::from_rgb(c[0], c[1], c[2]).gamma_multiply(opacity.clamp(0.0, 1.0))
}

/// Rect of the whole slide after applying the outer pose.
fn posed_rect(rect: Rect, pose: Pose) -> Rect {
    let flip = pose.rotate_y.to_radians().cos().abs();
    let size = Vec2::new(rect.width() * pose.scale * flip, rect.height() * pose.scale);
    Rect::from_center_size(rect.center() + Vec2::new(pose.offset_x, pose.offset_y), size)
}

fn paint_background(painter: &egui::Painter, rect: Rect, fill: BackgroundFill, opacity: f32) {
    match fill {
        BackgroundFill::Solid(c) => {
            painter.rect_filled(rect, 0.0, rgb(c, opacity));
        }
        BackgroundFill::Gradient([a, b, c]) => {
            let mut mesh = egui::Mesh::default();
            mesh.colored_vertex(rect.left_top(), rgb(a, opacity));
            mesh.colored_vertex(rect.right_top(), rgb(b, opacity));
            mesh.colored_vertex(rect.right_bottom(), rgb(c, opacity));
            mesh.colored_vertex(rect.left_bottom(), rgb(b, opacity));
            mesh.add_triangle(0, 1, 2);
            mesh.add_triangle(0, 2, 3);
            painter.add(egui::Shape::mesh(mesh));
        }
    }
}

fn paint_balloons(painter: &egui::Painter, rect: Rect, balloons: &[Balloon], elapsed: f32, opacity: f32) {
    for balloon in balloons {
        let Some(rise) = balloon.rise(elapsed) else {
            continue;
        };
        let travel = rect.height() + balloon.size * 2.0 + 80.0;
        let sway = (elapsed * 0.8 + balloon.hue).sin() * 12.0;
        let center = Pos2::new(
            rect.left() + balloon.left * rect.width() + sway,
            rect.bottom() + 80.0 - rise * travel,
        );
        let color = Color32::from(egui::ecolor::Hsva::new(balloon.hue / 360.0, 0.65, 0.97, 0.8 * opacity));
        painter.circle_filled(center, balloon.size / 2.0, color);
    }
}

/// One laid-out block of the content column.
enum Block {
    Text(std::sync::Arc<egui::Galley>),
    Image { texture: egui::TextureId, size: Vec2 },
    Panel { label: std::sync::Arc<egui::Galley>, size: Vec2 },
}

impl Block {
    fn size(&self) -> Vec2 {
        match self {
            Block::Text(galley) => galley.size(),
            Block::Image { size, .. } | Block::Panel { size, .. } => *size,
        }
    }
}

/// Paint one slide into `rect`.
///
/// `outer` is the whole-slide transition pose, `inner` the content effect
/// pose. `elapsed` drives the balloon layer.
#[allow(clippy::too_many_arguments)]
pub fn paint_slide(
    painter: &egui::Painter,
    rect: Rect,
    view: &SlideView,
    outer: Pose,
    inner: Pose,
    balloons: &[Balloon],
    elapsed: f32,
    images: &mut ImageCache,
) {
    let slide_rect = posed_rect(rect, outer);
    let painter = painter.with_clip_rect(rect);
    let opacity = outer.opacity;
    if opacity <= 0.0 || slide_rect.width() <= 1.0 {
        return;
    }

    paint_background(&painter, slide_rect, view.background, opacity);

    if let Some(location) = &view.background_image {
        if let ImageState::Ready { texture, .. } = images.get(location) {
            painter.image(
                texture,
                slide_rect,
                Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                Color32::WHITE.gamma_multiply(0.4 * opacity),
            );
        }
    }

    if view.balloons {
        paint_balloons(&painter, slide_rect, balloons, elapsed, opacity);
    }

    // Content column, centred and nested inside the outer pose.
    let content = outer.compose(inner);
    let unit = (slide_rect.height() / 720.0).max(0.2) * view.font_scale * inner.scale;
    let text_color = rgb(view.background.text_color(), content.opacity);
    let wrap = slide_rect.width() * 0.8;
    let mut blocks = Vec::new();

    let text_block = |text: &str, size: f32| {
        Block::Text(painter.layout(text.to_string(), FontId::proportional(size * unit), text_color, wrap))
    };

    if let Some(heading) = &view.heading {
        blocks.push(text_block(heading.as_str(), 52.0));
    }
    if let Some(media) = &view.media {
        let area = (slide_rect.width() * 0.7, slide_rect.height() * 0.55);
        let panel = |label: &str| Block::Panel {
            label: painter.layout(label.to_string(), FontId::proportional(20.0 * unit), text_color, wrap),
            size: Vec2::new(area.0 * 0.6, area.1 * 0.5),
        };
        blocks.push(match media {
            MediaView::Image(location) => match images.get(location) {
                ImageState::Ready { texture, size } => {
                    let (w, h) = fit_within(size.0, size.1, area);
                    Block::Image {
                        texture,
                        size: Vec2::new(w, h),
                    }
                }
                ImageState::Loading => panel("Loading image…"),
                ImageState::Unavailable => panel("(Image unavailable)"),
            },
            MediaView::Video(location) => panel(&format!("▶ {}", location)),
            MediaView::Placeholder(label) => panel(*label),
        });
    }
    if let Some(body) = &view.body {
        blocks.push(text_block(body.as_str(), 26.0));
    }
    if let Some(caption) = &view.caption {
        blocks.push(text_block(caption.as_str(), 24.0));
    }

    let gap = 16.0 * unit;
    let total: f32 = blocks.iter().map(|b| b.size().y).sum::<f32>() + gap * blocks.len().saturating_sub(1) as f32;
    let center = slide_rect.center() + Vec2::new(inner.offset_x * outer.scale, inner.offset_y * outer.scale);
    let mut y = center.y - total / 2.0;
    let panel_fill = Color32::WHITE.gamma_multiply(0.15 * content.opacity);

    for block in &blocks {
        let size = block.size();
        let top_left = Pos2::new(center.x - size.x / 2.0, y);
        match block {
            Block::Text(galley) => {
                let mut shape = egui::epaint::TextShape::new(top_left, galley.clone(), text_color);
                shape.angle = content.rotate.to_radians();
                painter.add(shape);
            }
            Block::Image { texture, size } => {
                painter.image(
                    *texture,
                    Rect::from_min_size(top_left, *size),
                    Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                    Color32::WHITE.gamma_multiply(content.opacity),
                );
            }
            Block::Panel { label, size } => {
                let panel_rect = Rect::from_min_size(top_left, *size);
                painter.rect_filled(panel_rect, 16.0, panel_fill);
                let label_pos = panel_rect.center() - label.size() / 2.0;
                painter.galley(label_pos, label.clone(), text_color);
            }
        }
        y += size.y + gap;
    }
}

/// A confetti particle, simulated analytically from its launch.
struct Particle {
    origin: Pos2,
    velocity: Vec2,
    launched: Instant,
    color: Color32,
    size: f32,
}

/// Fire-and-forget confetti layer.
#[derive(Default)]
pub struct ConfettiField {
    pending: Vec<(Instant, ConfettiBurst)>,
    particles: Vec<Particle>,
}

impl ConfettiField {
    /// Queue the standard burst schedule starting at `now`.
    pub fn fire(&mut self, now: Instant) {
        for burst in confetti_schedule() {
            self.pending.push((now + burst.delay, burst));
        }
    }

    /// Launch due bursts and drop particles past their lifetime.
    pub fn update<R: Rng>(&mut self, now: Instant, rng: &mut R) {
        let mut due = Vec::new();
        self.pending.retain(|(at, burst)| {
            if *at <= now {
                due.push(*burst);
                false
            } else {
                true
            }
        });

        for burst in due {
            let half_spread = burst.spread_degrees / 2.0;
            for _ in 0..burst.particle_count {
                let angle = (-90.0 + rng.gen_range(-half_spread..half_spread)).to_radians();
                let speed: f32 = rng.gen_range(0.6..1.1);
                let color = CONFETTI_COLORS[rng.gen_range(0..CONFETTI_COLORS.len())];
                self.particles.push(Particle {
                    origin: Pos2::new(burst.origin_x, burst.origin_y),
                    velocity: Vec2::new(angle.cos(), angle.sin()) * speed,
                    launched: now,
                    color: rgb(color, 1.0),
                    size: rng.gen_range(3.0..6.0),
                });
            }
        }

        self.particles
            .retain(|p| now.saturating_duration_since(p.launched).as_secs_f32() < CONFETTI_LIFETIME);
    }

    pub fn paint(&self, painter: &egui::Painter, rect: Rect, now: Instant) {
        let h = rect.height();
        for p in &self.particles {
            let t = now.saturating_duration_since(p.launched).as_secs_f32();
            let pos = Pos2::new(
                rect.left() + p.origin.x * rect.width() + p.velocity.x * t * h,
                rect.top() + p.origin.y * h + (p.velocity.y * t + 0.5 * CONFETTI_GRAVITY * t * t) * h,
            );
            let fade = 1.0 - (t / CONFETTI_LIFETIME).clamp(0.0, 1.0);
            painter.rect_filled(
                Rect::from_center_size(pos, Vec2::splat(p.size)),
                1.0,
                p.color.gamma_multiply(fade),
            );
        }
    }
}

/// Presenter-side drawing state: the active and leaving slide views plus
/// the decorative layers.
pub struct Stage {
    started: Instant,
    current: Option<(SlideView, Instant)>,
    leaving: Option<(SlideView, Instant)>,
    /// The first slide has nothing to wait for.
    entered_directly: bool,
    balloons: Vec<Balloon>,
    pub confetti: ConfettiField,
}

impl Stage {
    pub fn new(balloons: Vec<Balloon>, now: Instant) -> Self {
        Self {
            started: now,
            current: None,
            leaving: None,
            entered_directly: true,
            balloons,
            confetti: ConfettiField::default(),
        }
    }

    /// Show `view` as the active slide; the previous one starts leaving.
    pub fn activate(&mut self, view: SlideView, now: Instant) {
        self.leaving = self.current.take().map(|(v, _)| (v, now));
        self.entered_directly = self.leaving.is_none();
        self.current = Some((view, now));
    }

    /// Draw the stage and the on-screen controls. Returns a clicked control.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        player: &Player,
        images: &mut ImageCache,
        now: Instant,
    ) -> Option<PlayerCommand> {
        let rect = ui.max_rect();
        let painter = ui.painter().clone();
        painter.rect_filled(rect, 0.0, Color32::BLACK);

        let config = player.config();
        let crossfade = config.crossfade();
        let transition = config.transition_length();
        let elapsed_total = now.saturating_duration_since(self.started).as_secs_f32();

        let left_done = match &self.leaving {
            Some((_, left_at)) => now.saturating_duration_since(*left_at) >= crossfade,
            None => false,
        };
        if left_done {
            self.leaving = None;
        }

        // The entering slide waits for the leaving one to clear.
        if let Some((view, left_at)) = &self.leaving {
            let since = now.saturating_duration_since(*left_at);
            let outer = view.exit_pose(since, crossfade.as_secs_f32());
            paint_slide(&painter, rect, view, outer, Pose::SETTLED, &self.balloons, elapsed_total, images);
        } else if let Some((view, activated)) = &self.current {
            let start = if self.entered_directly {
                *activated
            } else {
                activated.checked_add(crossfade).unwrap_or(*activated)
            };
            let since = now.saturating_duration_since(start);
            let outer = view.entry_pose(since, transition);
            let inner = view.content_pose(since, transition);
            paint_slide(&painter, rect, view, outer, inner, &self.balloons, elapsed_total, images);
        }

        self.confetti.paint(&painter, rect, now);

        controls(ui, rect, player, now)
    }
}

fn controls(ui: &mut egui::Ui, rect: Rect, player: &Player, now: Instant) -> Option<PlayerCommand> {
    let mut command = None;

    // Hold progress of the current slide.
    if let Some(deadline) = player.next_deadline() {
        let hold = player.slide_hold(player.index()).as_secs_f32();
        let remaining = deadline.saturating_duration_since(now).as_secs_f32();
        let fraction = if hold > 0.0 { (1.0 - remaining / hold).clamp(0.0, 1.0) } else { 1.0 };
        let bar = Rect::from_min_size(
            Pos2::new(rect.left(), rect.bottom() - 4.0),
            Vec2::new(rect.width() * fraction, 4.0),
        );
        ui.painter().rect_filled(bar, 0.0, Color32::from_white_alpha(90));
    }

    let button = |text: &str| {
        egui::Button::new(egui::RichText::new(text).size(20.0).color(Color32::WHITE))
            .fill(Color32::from_white_alpha(50))
    };

    let bar = Rect::from_center_size(
        Pos2::new(rect.center().x, rect.bottom() - 48.0),
        Vec2::new(200.0, 44.0),
    );
    let third = bar.width() / 3.0;
    let slot = |i: f32| {
        Rect::from_min_size(
            Pos2::new(bar.left() + third * i + 4.0, bar.top()),
            Vec2::new(third - 8.0, bar.height()),
        )
    };

    if ui.put(slot(0.0), button("⬅")).clicked() {
        command = Some(PlayerCommand::Previous);
    }
    let pause_label = if player.state().is_playing() { "⏸" } else { "▶" };
    if ui.put(slot(1.0), button(pause_label)).clicked() {
        command = Some(PlayerCommand::TogglePause);
    }
    if ui.put(slot(2.0), button("➡")).clicked() {
        command = Some(PlayerCommand::Next);
    }

    let exit_rect = Rect::from_min_size(
        Pos2::new(rect.right() - 96.0, rect.top() + 16.0),
        Vec2::new(80.0, 36.0),
    );
    if ui.put(exit_rect, button("Exit")).clicked() {
        command = Some(PlayerCommand::Exit);
    }

    ui.painter().text(
        Pos2::new(rect.left() + 16.0, rect.top() + 16.0),
        Align2::LEFT_TOP,
        format!("{} / {}", player.index() + 1, player.deck().len()),
        FontId::proportional(14.0),
        Color32::from_white_alpha(120),
    );

    command
}
