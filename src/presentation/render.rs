// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Slide composition.
//!
//! Turns a slide plus the deck's global settings into a resolved view:
//! the texts after celebrant interpolation, the media to show, the
//! background, the decorative layers and the poses over time. Drawing
//! the view is left to the host.

use super::registry::{
    resolve_background, resolve_effect, resolve_font_scale, resolve_transition, BackgroundFill,
    Easing, EffectDescriptor, Pose, TransitionDescriptor,
};
use crate::models::deck::Theme;
use crate::models::slide::{non_empty, Slide, SlideKind};
use crate::util::geometry::{ease_out_cubic, progress, spring};
use rand::Rng;
use std::time::Duration;

/// Media block of an image or video slide.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaView {
    Image(String),
    Video(String),
    /// Shown when the slide has no media url yet.
    Placeholder(&'static str),
}

/// Everything needed to draw one slide.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideView {
    pub slide_id: String,
    pub kind: SlideKind,
    pub transition: TransitionDescriptor,
    pub effect: EffectDescriptor,
    pub background: BackgroundFill,
    pub background_image: Option<String>,
    pub font_scale: f32,
    pub heading: Option<String>,
    pub body: Option<String>,
    pub media: Option<MediaView>,
    pub caption: Option<String>,
    pub balloons: bool,
    pub confetti: bool,
}

/// Resolve a slide against the celebrant name and theme.
pub fn compose(slide: &Slide, celebrant_name: &str, theme: &Theme) -> SlideView {
    let celebrant = celebrant_name.trim();
    let (heading, body, media) = match slide.kind() {
        SlideKind::Title => (
            Some(
                non_empty(&slide.title)
                    .map(str::to_string)
                    .unwrap_or_else(|| birthday_headline(celebrant)),
            ),
            Some(text_or(&slide.subtitle, "Wishing you all the best")),
            None,
        ),
        SlideKind::Message => (
            greeting(celebrant),
            slide.text.clone().filter(|t| !t.is_empty()),
            None,
        ),
        SlideKind::Image => (
            None,
            None,
            Some(match non_empty(&slide.image_url) {
                Some(url) => MediaView::Image(url.to_string()),
                None => MediaView::Placeholder("(Add an image URL)"),
            }),
        ),
        SlideKind::Video => (
            None,
            None,
            Some(match non_empty(&slide.video_url) {
                Some(url) => MediaView::Video(url.to_string()),
                None => MediaView::Placeholder("(Add a video URL)"),
            }),
        ),
        SlideKind::Outro => (
            Some(text_or(&slide.title, "Thank you for watching")),
            Some(text_or(&slide.subtitle, "Have a wonderful day!")),
            None,
        ),
    };

    let caption = match slide.kind() {
        SlideKind::Image | SlideKind::Video => non_empty(&slide.caption).map(str::to_string),
        _ => None,
    };
    let background_name = non_empty(&slide.background_style).unwrap_or(&theme.background_style);

    SlideView {
        slide_id: slide.id().to_string(),
        kind: slide.kind(),
        transition: resolve_transition(&slide.transition_name),
        effect: resolve_effect(&slide.effect_name),
        background: resolve_background(background_name),
        background_image: non_empty(&slide.background_image_url).map(str::to_string),
        font_scale: resolve_font_scale(&theme.font_size_scale),
        heading,
        body,
        media,
        caption,
        balloons: slide.show_balloons,
        confetti: slide.fire_confetti,
    }
}

/// Title fallback: "Happy Birthday {name}!", with a cake when no name is set.
pub fn birthday_headline(celebrant: &str) -> String {
    let name = if celebrant.is_empty() { "🎂" } else { celebrant };
    format!("Happy Birthday {}!", name)
}

/// Message greeting, only when a celebrant name is set.
pub fn greeting(celebrant: &str) -> Option<String> {
    if celebrant.is_empty() {
        None
    } else {
        Some(format!("Dear {},", celebrant))
    }
}

fn text_or(field: &Option<String>, fallback: &str) -> String {
    non_empty(field).unwrap_or(fallback).to_string()
}

impl SlideView {
    /// Outer pose `elapsed` after activation, over a transition of `duration`.
    pub fn entry_pose(&self, elapsed: Duration, duration: f32) -> Pose {
        let t = ease_out_cubic(progress(elapsed.as_secs_f32(), duration));
        self.transition.initial.lerp(self.transition.animate, t)
    }

    /// Outer pose `elapsed` into leaving, over a transition of `duration`.
    pub fn exit_pose(&self, elapsed: Duration, duration: f32) -> Pose {
        let t = ease_out_cubic(progress(elapsed.as_secs_f32(), duration));
        self.transition.animate.lerp(self.transition.exit, t)
    }

    /// Inner content pose `elapsed` after activation.
    pub fn content_pose(&self, elapsed: Duration, duration: f32) -> Pose {
        let p = progress(elapsed.as_secs_f32(), duration);
        let t = match self.effect.easing {
            Easing::EaseOut => ease_out_cubic(p),
            Easing::Spring { bounce } => spring(p, bounce),
        };
        self.effect.initial.lerp(self.effect.animate, t)
    }
}

/// One balloon of the background layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Balloon {
    /// Horizontal position as a fraction of the width.
    pub left: f32,
    /// Diameter in logical pixels.
    pub size: f32,
    /// Seconds before the first rise.
    pub delay: f32,
    /// Seconds per rise.
    pub duration: f32,
    /// Hue in degrees.
    pub hue: f32,
}

impl Balloon {
    /// Vertical rise progress at `elapsed` seconds, looping; `None` before the first rise.
    pub fn rise(&self, elapsed: f32) -> Option<f32> {
        let t = elapsed - self.delay;
        if t < 0.0 || self.duration <= 0.0 {
            return None;
        }
        Some((t / self.duration).fract())
    }
}

/// Scatter `count` balloons.
pub fn balloon_field<R: Rng>(count: usize, rng: &mut R) -> Vec<Balloon> {
    (0..count)
        .map(|i| Balloon {
            left: rng.gen_range(0.0..1.0),
            size: 24.0 + rng.gen_range(0.0..36.0),
            delay: rng.gen_range(0.0..5.0),
            duration: 12.0 + rng.gen_range(0.0..10.0),
            hue: ((i * 47) % 360) as f32,
        })
        .collect()
}

/// One confetti burst.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfettiBurst {
    /// Launch point as fractions of the surface.
    pub origin_x: f32,
    pub origin_y: f32,
    /// Delay after the slide activation.
    pub delay: Duration,
    pub particle_count: u32,
    /// Cone width in degrees around straight up.
    pub spread_degrees: f32,
}

/// Bursts fired for one confetti activation.
pub fn confetti_schedule() -> Vec<ConfettiBurst> {
    let burst = |origin_x: f32, delay_ms: u64| ConfettiBurst {
        origin_x,
        origin_y: 0.8,
        delay: Duration::from_millis(delay_ms),
        particle_count: 90,
        spread_degrees: 70.0,
    };
    vec![
        burst(0.2, 0),
        burst(0.5, 0),
        burst(0.8, 0),
        burst(0.35, 350),
        burst(0.65, 550),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::slide::SlidePatch;
    use crate::presentation::registry::{EffectKind, TransitionKind};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn theme() -> Theme {
        Theme::default()
    }

    #[test]
    fn test_title_falls_back_to_birthday_headline() {
        let mut slide = Slide::new(SlideKind::Title);
        slide.title = Some(String::new());
        slide.subtitle = None;

        let view = compose(&slide, "Ada", &theme());
        assert_eq!(view.heading.as_deref(), Some("Happy Birthday Ada!"));
        assert_eq!(view.body.as_deref(), Some("Wishing you all the best"));

        let view = compose(&slide, "", &theme());
        assert_eq!(view.heading.as_deref(), Some("Happy Birthday 🎂!"));
    }

    #[test]
    fn test_message_greeting_only_with_name() {
        let slide = Slide::new(SlideKind::Message);
        assert_eq!(
            compose(&slide, "Ada", &theme()).heading.as_deref(),
            Some("Dear Ada,")
        );
        assert_eq!(compose(&slide, "  ", &theme()).heading, None);
        assert!(compose(&slide, "", &theme()).body.is_some());
    }

    #[test]
    fn test_media_placeholders_and_caption() {
        let mut image = Slide::new(SlideKind::Image);
        let view = compose(&image, "", &theme());
        assert_eq!(view.media, Some(MediaView::Placeholder("(Add an image URL)")));
        assert_eq!(view.caption, None);

        image.apply(SlidePatch {
            image_url: Some("photos/cake.png".to_string()),
            caption: Some("Cake!".to_string()),
            ..Default::default()
        });
        let view = compose(&image, "", &theme());
        assert_eq!(view.media, Some(MediaView::Image("photos/cake.png".to_string())));
        assert_eq!(view.caption.as_deref(), Some("Cake!"));

        let video = Slide::new(SlideKind::Video);
        assert_eq!(
            compose(&video, "", &theme()).media,
            Some(MediaView::Placeholder("(Add a video URL)"))
        );
    }

    #[test]
    fn test_outro_fallbacks_and_layers() {
        let mut outro = Slide::new(SlideKind::Outro);
        outro.title = None;
        outro.subtitle = None;
        let view = compose(&outro, "", &theme());
        assert_eq!(view.heading.as_deref(), Some("Thank you for watching"));
        assert_eq!(view.body.as_deref(), Some("Have a wonderful day!"));
        assert!(view.confetti);
        assert!(view.balloons);
    }

    #[test]
    fn test_background_override_and_registry_fallbacks() {
        let mut slide = Slide::new(SlideKind::Message);
        slide.transition_name = "wobble".to_string();
        slide.effect_name = "sparkle".to_string();

        let view = compose(&slide, "", &theme());
        assert_eq!(view.transition.kind, TransitionKind::Fade);
        assert_eq!(view.effect.kind, EffectKind::None);
        assert_eq!(view.background, resolve_background("gradient-candy"));
        assert_eq!(view.font_scale, 1.25);

        slide.background_style = Some("solid-dark".to_string());
        let view = compose(&slide, "", &theme());
        assert_eq!(view.background, BackgroundFill::Solid([23, 23, 23]));
    }

    #[test]
    fn test_poses_settle_after_duration() {
        let mut slide = Slide::new(SlideKind::Title);
        slide.transition_name = "zoom".to_string();
        slide.effect_name = "bounce".to_string();
        let view = compose(&slide, "", &theme());

        assert_eq!(view.entry_pose(Duration::ZERO, 0.6), view.transition.initial);
        assert_eq!(view.entry_pose(Duration::from_secs(1), 0.6), Pose::SETTLED);
        assert_eq!(view.content_pose(Duration::from_secs(1), 0.6), Pose::SETTLED);
        assert_eq!(view.exit_pose(Duration::from_secs(1), 0.6), view.transition.exit);
    }

    #[test]
    fn test_balloon_field_shape() {
        let mut rng = StdRng::seed_from_u64(42);
        let balloons = balloon_field(14, &mut rng);
        assert_eq!(balloons.len(), 14);
        assert_eq!(balloons[1].hue, 47.0);
        assert_eq!(balloons[8].hue, 16.0);
        for b in &balloons {
            assert!((0.0..1.0).contains(&b.left));
            assert!((24.0..60.0).contains(&b.size));
            assert!((12.0..22.0).contains(&b.duration));
            assert_eq!(b.rise(b.delay - 0.1), None);
            assert!(b.rise(b.delay + 1.0).is_some());
        }
    }

    #[test]
    fn test_confetti_schedule() {
        let bursts = confetti_schedule();
        assert_eq!(bursts.len(), 5);
        assert!(bursts.iter().all(|b| b.particle_count == 90));
        assert_eq!(bursts[3].delay, Duration::from_millis(350));
        assert_eq!(bursts[4].origin_x, 0.65);
    }
}
