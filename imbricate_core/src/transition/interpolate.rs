// Copyright 2026 the Imbricate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Card and header style interpolators.
//!
//! An interpolator is a pure function from sampled progress (plus layout
//! context) to the visual properties of one card or of the floating header.
//! The host calls the resolved interpolator every frame with fresh samples;
//! nothing here retains state between calls.
//!
//! Interpolators are plain `fn` pointers so resolved configuration stays
//! `Copy` and hosts can install their own presets alongside the built-ins.

use kurbo::Vec2;

use crate::geometry::{Insets, Layout};

/// Sampled inputs for a card style interpolator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardInterpolationInputs {
    /// This scene's own progress sample.
    pub current: f64,
    /// The scene above's progress sample, if any.
    pub next: Option<f64>,
    /// Scene position in the stack.
    pub index: usize,
    /// Whether the scene is currently closing.
    pub closing: bool,
    /// Whether a gesture is driving the progress right now.
    pub swiping: bool,
    /// Container layout.
    pub layout: Layout,
    /// Safe-area insets.
    pub insets: Insets,
}

/// Visual properties of one card for the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardInterpolation {
    /// Translation applied to the card container.
    pub translate: Vec2,
    /// Card opacity.
    pub opacity: f64,
    /// Uniform card scale.
    pub scale: f64,
    /// Opacity of the dimming overlay behind the card.
    pub overlay_opacity: f64,
    /// Opacity of the card's edge shadow.
    pub shadow_opacity: f64,
}

impl CardInterpolation {
    /// The settled, fully-presented card: no offset, full opacity, no
    /// overlay or shadow.
    pub const SETTLED: Self = Self {
        translate: Vec2::ZERO,
        opacity: 1.0,
        scale: 1.0,
        overlay_opacity: 0.0,
        shadow_opacity: 0.0,
    };
}

/// A card style interpolator.
pub type CardStyleInterpolator = fn(&CardInterpolationInputs) -> CardInterpolation;

/// Sampled inputs for a header style interpolator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeaderInterpolationInputs {
    /// The focused scene's progress sample.
    pub current: f64,
    /// The scene above's progress sample, if any.
    pub next: Option<f64>,
    /// Container layout.
    pub layout: Layout,
    /// The focused route's header height.
    pub header_height: f64,
}

/// Visual properties of the floating header for the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeaderInterpolation {
    /// Header opacity.
    pub opacity: f64,
    /// Translation applied to the header container.
    pub translate: Vec2,
}

/// A header style interpolator.
pub type HeaderStyleInterpolator = fn(&HeaderInterpolationInputs) -> HeaderInterpolation;

/// Piecewise-linear interpolation of `t` over matched breakpoint arrays,
/// clamping outside the input range.
fn interpolate(t: f64, input: &[f64], output: &[f64]) -> f64 {
    debug_assert!(
        input.len() == output.len() && input.len() >= 2,
        "breakpoint arrays must match and hold at least two stops"
    );
    if t <= input[0] {
        return output[0];
    }
    for i in 0..input.len() - 1 {
        if t <= input[i + 1] {
            let span = input[i + 1] - input[i];
            let fraction = if span == 0.0 { 1.0 } else { (t - input[i]) / span };
            return output[i] + fraction * (output[i + 1] - output[i]);
        }
    }
    output[output.len() - 1]
}

/// Slide in from the trailing edge with parallax on the outgoing card.
///
/// The focused card travels the full container width; the card beneath
/// drifts 30% of the width in the opposite direction. A dimming overlay and
/// edge shadow fade in with progress.
pub fn for_horizontal(inputs: &CardInterpolationInputs) -> CardInterpolation {
    let width = inputs.layout.size.width;
    let focused = interpolate(inputs.current, &[0.0, 1.0], &[width, 0.0]);
    let unfocused = inputs
        .next
        .map_or(0.0, |next| interpolate(next, &[0.0, 1.0], &[0.0, width * -0.3]));
    CardInterpolation {
        translate: Vec2::new(focused + unfocused, 0.0),
        overlay_opacity: interpolate(inputs.current, &[0.0, 1.0], &[0.0, 0.07]),
        shadow_opacity: interpolate(inputs.current, &[0.0, 1.0], &[0.0, 0.3]),
        ..CardInterpolation::SETTLED
    }
}

/// Slide in from the bottom edge (modal presentation).
pub fn for_vertical(inputs: &CardInterpolationInputs) -> CardInterpolation {
    let height = inputs.layout.size.height;
    CardInterpolation {
        translate: Vec2::new(0.0, interpolate(inputs.current, &[0.0, 1.0], &[height, 0.0])),
        ..CardInterpolation::SETTLED
    }
}

/// Fade in while rising 8% of the container height.
pub fn for_fade_from_bottom(inputs: &CardInterpolationInputs) -> CardInterpolation {
    let height = inputs.layout.size.height;
    CardInterpolation {
        translate: Vec2::new(
            0.0,
            interpolate(inputs.current, &[0.0, 1.0], &[height * 0.08, 0.0]),
        ),
        opacity: interpolate(
            inputs.current,
            &[0.0, 0.5, 0.9, 1.0],
            &[0.0, 0.25, 0.7, 1.0],
        ),
        ..CardInterpolation::SETTLED
    }
}

/// Scale up from the center while fading in; the outgoing card keeps
/// scaling past rest so the pair reads as one continuous zoom.
pub fn for_scale_from_center(inputs: &CardInterpolationInputs) -> CardInterpolation {
    let combined = inputs.current + inputs.next.unwrap_or(0.0);
    CardInterpolation {
        scale: interpolate(combined, &[0.0, 1.0, 2.0], &[0.9, 1.0, 1.1]),
        opacity: interpolate(combined, &[0.0, 0.8, 1.0, 1.2, 2.0], &[0.0, 0.5, 1.0, 0.33, 0.0]),
        ..CardInterpolation::SETTLED
    }
}

/// No card animation: the card is presented settled at every progress.
pub fn for_no_animation(_inputs: &CardInterpolationInputs) -> CardInterpolation {
    CardInterpolation::SETTLED
}

/// Cross-fade the header as focus moves between routes.
///
/// Uses the combined progress of the focused scene and the scene above, so
/// the header fades out symmetrically whether the focused screen is leaving
/// or being covered.
pub fn for_header_fade(inputs: &HeaderInterpolationInputs) -> HeaderInterpolation {
    let combined = inputs.current + inputs.next.unwrap_or(0.0);
    HeaderInterpolation {
        opacity: interpolate(combined, &[0.0, 1.0, 2.0], &[0.0, 1.0, 0.0]),
        translate: Vec2::ZERO,
    }
}

/// Slide the header horizontally in step with the cards.
pub fn for_header_slide(inputs: &HeaderInterpolationInputs) -> HeaderInterpolation {
    let width = inputs.layout.size.width;
    let combined = inputs.current + inputs.next.unwrap_or(0.0);
    HeaderInterpolation {
        opacity: 1.0,
        translate: Vec2::new(
            interpolate(combined, &[0.0, 1.0, 2.0], &[width, 0.0, -width]),
            0.0,
        ),
    }
}

/// No header animation: fully opaque, no offset.
///
/// Forced for every scene when the header mode is
/// [`Screen`](crate::descriptor::HeaderMode::Screen), where headers belong
/// to the cards and must not animate independently.
pub fn for_header_no_animation(_inputs: &HeaderInterpolationInputs) -> HeaderInterpolation {
    HeaderInterpolation {
        opacity: 1.0,
        translate: Vec2::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card_inputs(current: f64, next: Option<f64>) -> CardInterpolationInputs {
        CardInterpolationInputs {
            current,
            next,
            index: 0,
            closing: false,
            swiping: false,
            layout: Layout::from_dimensions(400.0, 800.0),
            insets: Insets::default(),
        }
    }

    fn header_inputs(current: f64, next: Option<f64>) -> HeaderInterpolationInputs {
        HeaderInterpolationInputs {
            current,
            next,
            layout: Layout::from_dimensions(400.0, 800.0),
            header_height: 44.0,
        }
    }

    #[test]
    fn interpolate_clamps_and_lerps() {
        assert_eq!(interpolate(-0.5, &[0.0, 1.0], &[10.0, 20.0]), 10.0);
        assert_eq!(interpolate(0.5, &[0.0, 1.0], &[10.0, 20.0]), 15.0);
        assert_eq!(interpolate(1.5, &[0.0, 1.0], &[10.0, 20.0]), 20.0);
        // Multi-segment.
        assert_eq!(interpolate(0.75, &[0.0, 0.5, 1.0], &[0.0, 1.0, 3.0]), 2.0);
    }

    #[test]
    fn horizontal_travels_full_width() {
        let off = for_horizontal(&card_inputs(0.0, None));
        assert_eq!(off.translate.x, 400.0);
        assert_eq!(off.overlay_opacity, 0.0);

        let settled = for_horizontal(&card_inputs(1.0, None));
        assert_eq!(settled.translate.x, 0.0);
        assert!((settled.overlay_opacity - 0.07).abs() < 1e-9);
        assert!((settled.shadow_opacity - 0.3).abs() < 1e-9);
    }

    #[test]
    fn horizontal_parallax_under_incoming_card() {
        // Settled card with the next screen fully presented above it.
        let covered = for_horizontal(&card_inputs(1.0, Some(1.0)));
        assert_eq!(covered.translate.x, 400.0 * -0.3);

        // Mid-transition, the drift is proportional.
        let mid = for_horizontal(&card_inputs(1.0, Some(0.5)));
        assert_eq!(mid.translate.x, 400.0 * -0.15);
    }

    #[test]
    fn vertical_travels_full_height() {
        assert_eq!(for_vertical(&card_inputs(0.0, None)).translate.y, 800.0);
        assert_eq!(for_vertical(&card_inputs(1.0, None)).translate.y, 0.0);
    }

    #[test]
    fn fade_from_bottom_endpoints() {
        let off = for_fade_from_bottom(&card_inputs(0.0, None));
        assert_eq!(off.opacity, 0.0);
        assert_eq!(off.translate.y, 800.0 * 0.08);

        let on = for_fade_from_bottom(&card_inputs(1.0, None));
        assert_eq!(on.opacity, 1.0);
        assert_eq!(on.translate.y, 0.0);
    }

    #[test]
    fn scale_from_center_rests_at_identity() {
        let on = for_scale_from_center(&card_inputs(1.0, None));
        assert_eq!(on.scale, 1.0);
        assert_eq!(on.opacity, 1.0);

        let off = for_scale_from_center(&card_inputs(0.0, None));
        assert_eq!(off.scale, 0.9);
        assert_eq!(off.opacity, 0.0);

        // Fully covered: keeps zooming out of frame.
        let covered = for_scale_from_center(&card_inputs(1.0, Some(1.0)));
        assert!((covered.scale - 1.1).abs() < 1e-9);
        assert_eq!(covered.opacity, 0.0);
    }

    #[test]
    fn no_animation_is_settled() {
        assert_eq!(for_no_animation(&card_inputs(0.0, None)), CardInterpolation::SETTLED);
        assert_eq!(for_no_animation(&card_inputs(0.4, Some(0.9))), CardInterpolation::SETTLED);
    }

    #[test]
    fn header_fade_is_symmetric_around_focus() {
        assert_eq!(for_header_fade(&header_inputs(0.0, None)).opacity, 0.0);
        assert_eq!(for_header_fade(&header_inputs(1.0, None)).opacity, 1.0);
        assert_eq!(for_header_fade(&header_inputs(1.0, Some(1.0))).opacity, 0.0);
        assert_eq!(for_header_fade(&header_inputs(1.0, Some(0.5))).opacity, 0.5);
    }

    #[test]
    fn header_slide_tracks_width() {
        assert_eq!(for_header_slide(&header_inputs(0.0, None)).translate.x, 400.0);
        assert_eq!(for_header_slide(&header_inputs(1.0, None)).translate.x, 0.0);
        assert_eq!(
            for_header_slide(&header_inputs(1.0, Some(1.0))).translate.x,
            -400.0
        );
    }

    #[test]
    fn header_no_animation_is_opaque_everywhere() {
        let out = for_header_no_animation(&header_inputs(0.0, Some(0.7)));
        assert_eq!(out.opacity, 1.0);
        assert_eq!(out.translate, Vec2::ZERO);
    }
}
