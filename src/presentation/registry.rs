// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Transition, effect and theme catalogs.
//!
//! Every lookup here is lenient: an unknown or empty name resolves to the
//! catalog default instead of failing, so hand-edited or imported decks
//! always play.

use crate::util::geometry::lerp;

pub const DEFAULT_TRANSITION: &str = "fade";
pub const DEFAULT_EFFECT: &str = "none";

/// A visual pose: opacity, offsets in logical pixels, scale and rotations in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub opacity: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    pub scale: f32,
    pub rotate: f32,
    pub rotate_y: f32,
}

impl Pose {
    /// Fully visible, untransformed.
    pub const SETTLED: Pose = Pose {
        opacity: 1.0,
        offset_x: 0.0,
        offset_y: 0.0,
        scale: 1.0,
        rotate: 0.0,
        rotate_y: 0.0,
    };

    /// Invisible, otherwise untransformed.
    pub const HIDDEN: Pose = Pose {
        opacity: 0.0,
        ..Pose::SETTLED
    };

    const fn shifted_x(self, offset_x: f32) -> Pose {
        Pose { offset_x, ..self }
    }

    const fn shifted_y(self, offset_y: f32) -> Pose {
        Pose { offset_y, ..self }
    }

    const fn scaled(self, scale: f32) -> Pose {
        Pose { scale, ..self }
    }

    const fn rotated(self, rotate: f32) -> Pose {
        Pose { rotate, ..self }
    }

    const fn flipped(self, rotate_y: f32) -> Pose {
        Pose { rotate_y, ..self }
    }

    /// Interpolate every component towards `to`. `t` may exceed 1 for overshoot.
    pub fn lerp(self, to: Pose, t: f32) -> Pose {
        Pose {
            opacity: lerp(self.opacity, to.opacity, t).clamp(0.0, 1.0),
            offset_x: lerp(self.offset_x, to.offset_x, t),
            offset_y: lerp(self.offset_y, to.offset_y, t),
            scale: lerp(self.scale, to.scale, t),
            rotate: lerp(self.rotate, to.rotate, t),
            rotate_y: lerp(self.rotate_y, to.rotate_y, t),
        }
    }

    /// Nest `inner` inside this pose.
    pub fn compose(self, inner: Pose) -> Pose {
        Pose {
            opacity: self.opacity * inner.opacity,
            offset_x: self.offset_x + inner.offset_x * self.scale,
            offset_y: self.offset_y + inner.offset_y * self.scale,
            scale: self.scale * inner.scale,
            rotate: self.rotate + inner.rotate,
            rotate_y: self.rotate_y + inner.rotate_y,
        }
    }
}

/// How an animation approaches its settled pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    EaseOut,
    Spring { bounce: f32 },
}

/// Whole-slide transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    Fade,
    SlideLeft,
    SlideRight,
    Zoom,
    Flip,
}

impl TransitionKind {
    pub const ALL: [TransitionKind; 5] = [
        TransitionKind::Fade,
        TransitionKind::SlideLeft,
        TransitionKind::SlideRight,
        TransitionKind::Zoom,
        TransitionKind::Flip,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name.trim())
    }

    pub fn name(self) -> &'static str {
        match self {
            TransitionKind::Fade => "fade",
            TransitionKind::SlideLeft => "slide-left",
            TransitionKind::SlideRight => "slide-right",
            TransitionKind::Zoom => "zoom",
            TransitionKind::Flip => "flip",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TransitionKind::Fade => "Fade",
            TransitionKind::SlideLeft => "Slide Left",
            TransitionKind::SlideRight => "Slide Right",
            TransitionKind::Zoom => "Zoom",
            TransitionKind::Flip => "Flip",
        }
    }

    pub fn descriptor(self) -> TransitionDescriptor {
        let hidden = Pose::HIDDEN;
        let (initial, exit) = match self {
            TransitionKind::Fade => (hidden, hidden),
            TransitionKind::SlideLeft => (hidden.shifted_x(80.0), hidden.shifted_x(-80.0)),
            TransitionKind::SlideRight => (hidden.shifted_x(-80.0), hidden.shifted_x(80.0)),
            TransitionKind::Zoom => (hidden.scaled(0.92), hidden.scaled(0.92)),
            TransitionKind::Flip => (hidden.flipped(90.0), hidden.flipped(-90.0)),
        };
        TransitionDescriptor {
            kind: self,
            initial,
            animate: Pose::SETTLED,
            exit,
            preserve_3d: self == TransitionKind::Flip,
        }
    }
}

/// Entry, settled and exit pose of a whole slide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionDescriptor {
    pub kind: TransitionKind,
    pub initial: Pose,
    pub animate: Pose,
    pub exit: Pose,
    /// Rotation happens around the vertical axis in 3-D.
    pub preserve_3d: bool,
}

/// Inner content effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    None,
    Bounce,
    FadeUp,
    RotateIn,
}

impl EffectKind {
    pub const ALL: [EffectKind; 4] = [
        EffectKind::None,
        EffectKind::Bounce,
        EffectKind::FadeUp,
        EffectKind::RotateIn,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name.trim())
    }

    pub fn name(self) -> &'static str {
        match self {
            EffectKind::None => "none",
            EffectKind::Bounce => "bounce",
            EffectKind::FadeUp => "fade-up",
            EffectKind::RotateIn => "rotate-in",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EffectKind::None => "None",
            EffectKind::Bounce => "Bounce",
            EffectKind::FadeUp => "Fade Up",
            EffectKind::RotateIn => "Rotate In",
        }
    }

    pub fn descriptor(self) -> EffectDescriptor {
        let hidden = Pose::HIDDEN;
        let (initial, easing) = match self {
            EffectKind::None => (hidden.shifted_y(10.0), Easing::EaseOut),
            EffectKind::Bounce => (hidden.scaled(0.9), Easing::Spring { bounce: 0.45 }),
            EffectKind::FadeUp => (hidden.shifted_y(24.0), Easing::EaseOut),
            EffectKind::RotateIn => (hidden.rotated(-8.0), Easing::EaseOut),
        };
        EffectDescriptor {
            kind: self,
            initial,
            animate: Pose::SETTLED,
            easing,
        }
    }
}

/// Entry and settled pose of a slide's content block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectDescriptor {
    pub kind: EffectKind,
    pub initial: Pose,
    pub animate: Pose,
    pub easing: Easing,
}

/// Look up a transition, falling back to `fade`.
pub fn resolve_transition(name: &str) -> TransitionDescriptor {
    TransitionKind::from_name(name)
        .unwrap_or_else(|| {
            log::debug!("Unknown transition {:?}, using {}", name, DEFAULT_TRANSITION);
            TransitionKind::Fade
        })
        .descriptor()
}

/// Look up a content effect, falling back to `none`.
pub fn resolve_effect(name: &str) -> EffectDescriptor {
    EffectKind::from_name(name)
        .unwrap_or_else(|| {
            log::debug!("Unknown effect {:?}, using {}", name, DEFAULT_EFFECT);
            EffectKind::None
        })
        .descriptor()
}

/// RGB colour.
pub type Rgb = [u8; 3];

/// Slide background fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundFill {
    /// Diagonal gradient from the top-left corner to the bottom-right one.
    Gradient([Rgb; 3]),
    Solid(Rgb),
}

impl BackgroundFill {
    /// Text colour readable on this fill.
    pub fn text_color(&self) -> Rgb {
        match self {
            BackgroundFill::Solid([r, g, b]) if (*r as u32 + *g as u32 + *b as u32) > 600 => {
                [23, 23, 23]
            }
            _ => [255, 255, 255],
        }
    }
}

/// Named background styles offered by the editor, with labels.
pub const BACKGROUND_STYLES: [(&str, &str); 5] = [
    ("gradient-candy", "Gradient Candy"),
    ("gradient-ocean", "Gradient Ocean"),
    ("gradient-sunset", "Gradient Sunset"),
    ("solid-dark", "Solid Dark"),
    ("solid-light", "Solid Light"),
];

/// Look up a background style, falling back to a violet gradient.
pub fn resolve_background(name: &str) -> BackgroundFill {
    match name.trim() {
        "gradient-candy" => BackgroundFill::Gradient([[236, 72, 153], [217, 70, 239], [99, 102, 241]]),
        "gradient-ocean" => BackgroundFill::Gradient([[56, 189, 248], [37, 99, 235], [55, 48, 163]]),
        "gradient-sunset" => BackgroundFill::Gradient([[252, 211, 77], [251, 113, 133], [192, 38, 211]]),
        "solid-dark" => BackgroundFill::Solid([23, 23, 23]),
        "solid-light" => BackgroundFill::Solid([245, 245, 245]),
        other => {
            log::debug!("Unknown background style {:?}, using default gradient", other);
            BackgroundFill::Gradient([[139, 92, 246], [217, 70, 239], [236, 72, 153]])
        }
    }
}

/// Named font size scales offered by the editor, with labels.
pub const FONT_SCALES: [(&str, &str); 4] = [
    ("base", "Base"),
    ("lg", "Large"),
    ("xl", "XL"),
    ("2xl", "2XL"),
];

/// Multiplier applied to slide text sizes.
pub fn resolve_font_scale(name: &str) -> f32 {
    match name.trim() {
        "lg" => 1.125,
        "xl" => 1.25,
        "2xl" => 1.5,
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_transition_falls_back_to_fade() {
        let t = resolve_transition("wobble");
        assert_eq!(t, TransitionKind::Fade.descriptor());
        assert_eq!(t.initial.opacity, 0.0);
        assert_eq!(t.animate, Pose::SETTLED);
        assert_eq!(resolve_transition("").kind, TransitionKind::Fade);
    }

    #[test]
    fn test_unknown_effect_falls_back_to_none() {
        assert_eq!(resolve_effect("sparkle").kind, EffectKind::None);
        assert_eq!(resolve_effect("").kind, EffectKind::None);
    }

    #[test]
    fn test_transition_poses() {
        let slide = resolve_transition("slide-left");
        assert_eq!(slide.initial.offset_x, 80.0);
        assert_eq!(slide.exit.offset_x, -80.0);

        let zoom = resolve_transition("zoom");
        assert_eq!(zoom.initial.scale, 0.92);

        let flip = resolve_transition("flip");
        assert!(flip.preserve_3d);
        assert_eq!(flip.initial.rotate_y, 90.0);
        assert_eq!(flip.exit.rotate_y, -90.0);
    }

    #[test]
    fn test_effect_poses() {
        let bounce = resolve_effect("bounce");
        assert_eq!(bounce.easing, Easing::Spring { bounce: 0.45 });
        assert_eq!(bounce.initial.scale, 0.9);
        assert_eq!(resolve_effect("fade-up").initial.offset_y, 24.0);
        assert_eq!(resolve_effect("rotate-in").initial.rotate, -8.0);
        assert_eq!(resolve_effect("none").initial.offset_y, 10.0);
    }

    #[test]
    fn test_names_round_trip() {
        for kind in TransitionKind::ALL {
            assert_eq!(TransitionKind::from_name(kind.name()), Some(kind));
        }
        for kind in EffectKind::ALL {
            assert_eq!(EffectKind::from_name(kind.name()), Some(kind));
        }
    }

    #[test]
    fn test_pose_compose_and_lerp() {
        let outer = Pose::SETTLED.shifted_x(10.0).scaled(2.0);
        let inner = Pose::HIDDEN.shifted_y(5.0);
        let nested = outer.compose(inner);
        assert_eq!(nested.opacity, 0.0);
        assert_eq!(nested.offset_x, 10.0);
        assert_eq!(nested.offset_y, 10.0);
        assert_eq!(nested.scale, 2.0);

        let mid = Pose::HIDDEN.lerp(Pose::SETTLED, 0.5);
        assert_eq!(mid.opacity, 0.5);
    }

    #[test]
    fn test_theme_catalog_fallbacks() {
        assert_eq!(resolve_background("solid-dark"), BackgroundFill::Solid([23, 23, 23]));
        assert!(matches!(resolve_background("plaid"), BackgroundFill::Gradient(_)));
        assert_eq!(resolve_font_scale("2xl"), 1.5);
        assert_eq!(resolve_font_scale("huge"), 1.0);
        assert_eq!(resolve_background("solid-light").text_color(), [23, 23, 23]);
    }
}
