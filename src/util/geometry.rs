// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric and timing utility functions.
//!
//! This module provides interpolation curves for slide animations and
//! the aspect-ratio fitting used when drawing media.

use std::f32::consts::PI;

/// Linear interpolation between `a` and `b`.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Progress of an animation of `duration` seconds after `elapsed` seconds, in 0..=1.
pub fn progress(elapsed: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        return 1.0;
    }
    (elapsed / duration).clamp(0.0, 1.0)
}

/// Cubic ease-out curve.
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Damped spring curve that overshoots before settling at 1.
///
/// Higher `bounce` means a faster oscillation and a larger overshoot.
pub fn spring(t: f32, bounce: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    let frequency = PI * (1.0 + 2.0 * bounce.max(0.0));
    1.0 - (-6.0 * t).exp() * (frequency * t).cos()
}

/// Size of an image scaled to fit inside `available` while keeping its aspect ratio.
pub fn fit_within(image_width: u32, image_height: u32, available: (f32, f32)) -> (f32, f32) {
    if image_width == 0 || image_height == 0 {
        return (0.0, 0.0);
    }
    let img_aspect = image_width as f32 / image_height as f32;
    let available_aspect = available.0 / available.1;

    if img_aspect > available_aspect {
        // Image is wider - fit to width
        (available.0, available.0 / img_aspect)
    } else {
        // Image is taller - fit to height
        (available.1 * img_aspect, available.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_clamps() {
        assert_eq!(progress(-1.0, 0.6), 0.0);
        assert_eq!(progress(0.3, 0.6), 0.5);
        assert_eq!(progress(5.0, 0.6), 1.0);
        assert_eq!(progress(0.1, 0.0), 1.0);
    }

    #[test]
    fn test_ease_out_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!(ease_out_cubic(0.5) > 0.5);
    }

    #[test]
    fn test_spring_overshoots_and_settles() {
        assert_eq!(spring(0.0, 0.45), 0.0);
        assert_eq!(spring(1.0, 0.45), 1.0);

        let peak = (1..100)
            .map(|i| spring(i as f32 / 100.0, 0.45))
            .fold(f32::MIN, f32::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn test_fit_within_wide_and_tall() {
        // Wide image in a square box
        let (w, h) = fit_within(1920, 1080, (100.0, 100.0));
        assert!((w - 100.0).abs() < 0.0001);
        assert!((h - 56.25).abs() < 0.0001);

        // Tall image in a square box
        let (w, h) = fit_within(1080, 1920, (100.0, 100.0));
        assert!((w - 56.25).abs() < 0.0001);
        assert!((h - 100.0).abs() < 0.0001);
    }
}
