// Copyright 2026 the Imbricate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-scene transition configuration resolution.
//!
//! Each field resolves descriptor override → mode-default preset. On top of
//! that sits the look-ahead rule: for every scene except the topmost, the
//! animation fields (`spec` and both interpolators) are replaced by the
//! NEXT scene's resolved values. An outgoing screen's exit must visually
//! match the incoming screen's entry preset — a slide exiting under a modal
//! entering reads as two unrelated animations — so the scene above always
//! dictates the animation, while gesture parameters stay the scene's own.

use alloc::rc::Rc;

use crate::capabilities::PlatformCapabilities;
use crate::descriptor::{HeaderMode, Presentation};
use crate::scene::Scene;

use super::interpolate::{
    CardStyleInterpolator, HeaderStyleInterpolator, for_fade_from_bottom, for_header_fade,
    for_header_no_animation, for_horizontal, for_vertical,
};
use super::{
    DEFAULT_GESTURE_VELOCITY_IMPACT, GestureDirection, GestureResponseDistance, TransitionSpec,
};

/// The mode-default bundle a scene's unset options fall through to.
#[derive(Clone, Copy, Debug)]
pub struct TransitionPreset {
    /// Default animation specification.
    pub spec: TransitionSpec,
    /// Default card style interpolator.
    pub card_style_interpolator: CardStyleInterpolator,
    /// Default header style interpolator.
    pub header_style_interpolator: HeaderStyleInterpolator,
    /// Default gesture direction.
    pub gesture_direction: GestureDirection,
}

impl TransitionPreset {
    /// The default preset for card (push) presentation on the given
    /// platform.
    #[must_use]
    pub fn card(capabilities: &PlatformCapabilities) -> Self {
        if capabilities.supports_native_screen_optimization {
            Self {
                spec: TransitionSpec::fade_from_bottom(),
                card_style_interpolator: for_fade_from_bottom,
                header_style_interpolator: for_header_fade,
                gesture_direction: GestureDirection::Horizontal,
            }
        } else {
            Self {
                spec: TransitionSpec::slide(),
                card_style_interpolator: for_horizontal,
                header_style_interpolator: for_header_fade,
                gesture_direction: GestureDirection::Horizontal,
            }
        }
    }

    /// The default preset for modal presentation.
    #[must_use]
    pub fn modal(_capabilities: &PlatformCapabilities) -> Self {
        Self {
            spec: TransitionSpec::slide(),
            card_style_interpolator: for_vertical,
            header_style_interpolator: for_header_fade,
            gesture_direction: GestureDirection::Vertical,
        }
    }

    /// Selects the preset for a presentation mode.
    #[must_use]
    pub fn for_mode(presentation: Presentation, capabilities: &PlatformCapabilities) -> Self {
        match presentation {
            Presentation::Card => Self::card(capabilities),
            Presentation::Modal => Self::modal(capabilities),
        }
    }
}

/// Fully-resolved transition configuration for one scene in one render
/// pass. Every field is concrete; nothing is left for the host to default.
#[derive(Clone, Copy, Debug)]
pub struct TransitionConfig {
    /// Animation specification for the external driver.
    pub spec: TransitionSpec,
    /// Card style interpolator.
    pub card_style_interpolator: CardStyleInterpolator,
    /// Header style interpolator.
    pub header_style_interpolator: HeaderStyleInterpolator,
    /// Gesture direction.
    pub gesture_direction: GestureDirection,
    /// Gesture response distance.
    pub gesture_response_distance: GestureResponseDistance,
    /// Gesture velocity impact.
    pub gesture_velocity_impact: f64,
}

/// Resolves a scene's configuration from its own descriptor only (no
/// look-ahead).
///
/// Also used for the floating header, which follows the focused route's own
/// interpolator rather than the look-ahead one.
#[must_use]
pub fn resolve_own(
    scene: &Scene,
    presentation: Presentation,
    header_mode: HeaderMode,
    capabilities: &PlatformCapabilities,
) -> TransitionConfig {
    let preset = TransitionPreset::for_mode(presentation, capabilities);
    let options = &scene.descriptor.options;
    let header_style_interpolator = match header_mode {
        // Screen-mode headers are mounted inside the cards; the floating
        // interpolator must not animate them a second time.
        HeaderMode::Screen => for_header_no_animation,
        HeaderMode::Float => options
            .header_style_interpolator
            .unwrap_or(preset.header_style_interpolator),
    };
    TransitionConfig {
        spec: options.transition_spec.unwrap_or(preset.spec),
        card_style_interpolator: options
            .card_style_interpolator
            .unwrap_or(preset.card_style_interpolator),
        header_style_interpolator,
        gesture_direction: options.gesture_direction.unwrap_or(preset.gesture_direction),
        gesture_response_distance: options.gesture_response_distance.unwrap_or_default(),
        gesture_velocity_impact: options
            .gesture_velocity_impact
            .unwrap_or(DEFAULT_GESTURE_VELOCITY_IMPACT),
    }
}

/// Resolves the effective configuration for the scene at `index`.
///
/// Animation fields come from the next scene up when one exists (the
/// look-ahead rule); gesture fields always come from the scene itself.
#[must_use]
pub fn resolve(
    scenes: &[Rc<Scene>],
    index: usize,
    presentation: Presentation,
    header_mode: HeaderMode,
    capabilities: &PlatformCapabilities,
) -> TransitionConfig {
    let own = resolve_own(&scenes[index], presentation, header_mode, capabilities);
    match scenes.get(index + 1) {
        None => own,
        Some(next) => {
            let ahead = resolve_own(next, presentation, header_mode, capabilities);
            TransitionConfig {
                spec: ahead.spec,
                card_style_interpolator: ahead.card_style_interpolator,
                header_style_interpolator: ahead.header_style_interpolator,
                ..own
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::descriptor::{Descriptor, StackOptions};
    use crate::geometry::{Insets, Layout};
    use crate::progress::ProgressValue;
    use crate::route::Route;
    use crate::scene::ProgressTriple;
    use crate::transition::interpolate::{
        CardInterpolation, CardInterpolationInputs, for_no_animation,
    };

    fn scene_with_options(key: &str, options: StackOptions) -> Rc<Scene> {
        Rc::new(Scene {
            route: Rc::new(Route::new(key, key)),
            descriptor: Rc::new(Descriptor::new(options)),
            progress: ProgressTriple {
                previous: None,
                current: ProgressValue::new(1.0),
                next: None,
            },
        })
    }

    fn stack(options: Vec<StackOptions>) -> Vec<Rc<Scene>> {
        options
            .into_iter()
            .enumerate()
            .map(|(i, o)| scene_with_options(&alloc::format!("r{i}"), o))
            .collect()
    }

    fn card_sample() -> CardInterpolationInputs {
        CardInterpolationInputs {
            current: 0.5,
            next: None,
            index: 0,
            closing: false,
            swiping: false,
            layout: Layout::from_dimensions(400.0, 800.0),
            insets: Insets::default(),
        }
    }

    #[test]
    fn unset_options_fall_through_to_preset() {
        let scenes = stack(alloc::vec![StackOptions::default()]);
        let caps = PlatformCapabilities::cocoa_touch();
        let config = resolve(&scenes, 0, Presentation::Card, HeaderMode::Float, &caps);

        assert_eq!(config.spec, TransitionSpec::slide());
        assert_eq!(config.gesture_direction, GestureDirection::Horizontal);
        assert_eq!(
            config.gesture_velocity_impact,
            DEFAULT_GESTURE_VELOCITY_IMPACT
        );
        // Preset card interpolator slides horizontally.
        let out = (config.card_style_interpolator)(&card_sample());
        assert_eq!(out.translate.x, 200.0);
    }

    #[test]
    fn modal_preset_slides_vertically() {
        let scenes = stack(alloc::vec![StackOptions::default()]);
        let caps = PlatformCapabilities::cocoa_touch();
        let config = resolve(&scenes, 0, Presentation::Modal, HeaderMode::Float, &caps);

        assert_eq!(config.gesture_direction, GestureDirection::Vertical);
        let out = (config.card_style_interpolator)(&card_sample());
        assert_eq!(out.translate.y, 400.0);
        assert_eq!(out.translate.x, 0.0);
    }

    #[test]
    fn own_options_override_preset_for_top_scene() {
        let scenes = stack(alloc::vec![StackOptions {
            transition_spec: Some(TransitionSpec::scale_from_center()),
            card_style_interpolator: Some(for_no_animation),
            ..StackOptions::default()
        }]);
        let caps = PlatformCapabilities::cocoa_touch();
        let config = resolve(&scenes, 0, Presentation::Card, HeaderMode::Float, &caps);

        assert_eq!(config.spec, TransitionSpec::scale_from_center());
        let out = (config.card_style_interpolator)(&card_sample());
        assert_eq!(out, CardInterpolation::SETTLED);
    }

    #[test]
    fn next_scene_dictates_animation_fields() {
        // B carries its own options; C's differ. B must resolve C's
        // animation fields, not its own.
        let scenes = stack(alloc::vec![
            StackOptions::default(),
            StackOptions {
                transition_spec: Some(TransitionSpec::slide()),
                ..StackOptions::default()
            },
            StackOptions {
                transition_spec: Some(TransitionSpec::scale_from_center()),
                card_style_interpolator: Some(for_no_animation),
                ..StackOptions::default()
            },
        ]);
        let caps = PlatformCapabilities::cocoa_touch();
        let config = resolve(&scenes, 1, Presentation::Card, HeaderMode::Float, &caps);

        assert_eq!(config.spec, TransitionSpec::scale_from_center());
        let out = (config.card_style_interpolator)(&card_sample());
        assert_eq!(out, CardInterpolation::SETTLED);
    }

    #[test]
    fn gesture_fields_stay_the_scenes_own() {
        let scenes = stack(alloc::vec![
            StackOptions {
                gesture_direction: Some(GestureDirection::VerticalInverted),
                gesture_velocity_impact: Some(0.5),
                ..StackOptions::default()
            },
            StackOptions {
                gesture_direction: Some(GestureDirection::Horizontal),
                ..StackOptions::default()
            },
        ]);
        let caps = PlatformCapabilities::cocoa_touch();
        let config = resolve(&scenes, 0, Presentation::Card, HeaderMode::Float, &caps);

        assert_eq!(config.gesture_direction, GestureDirection::VerticalInverted);
        assert_eq!(config.gesture_velocity_impact, 0.5);
    }

    #[test]
    fn screen_header_mode_forces_no_header_animation() {
        let scenes = stack(alloc::vec![StackOptions {
            header_style_interpolator: Some(crate::transition::for_header_slide),
            ..StackOptions::default()
        }]);
        let caps = PlatformCapabilities::cocoa_touch();
        let config = resolve(&scenes, 0, Presentation::Card, HeaderMode::Screen, &caps);

        let out = (config.header_style_interpolator)(&crate::transition::HeaderInterpolationInputs {
            current: 0.0,
            next: None,
            layout: Layout::from_dimensions(400.0, 800.0),
            header_height: 44.0,
        });
        // Slide would offset by the full width at progress 0; forcing wins.
        assert_eq!(out.translate.x, 0.0);
        assert_eq!(out.opacity, 1.0);
    }

    #[test]
    fn recycling_platform_prefers_fade_preset() {
        let scenes = stack(alloc::vec![StackOptions::default()]);
        let caps = PlatformCapabilities::android();
        let config = resolve(&scenes, 0, Presentation::Card, HeaderMode::Float, &caps);

        assert_eq!(config.spec, TransitionSpec::fade_from_bottom());
        let out = (config.card_style_interpolator)(&card_sample());
        // Fade preset keeps the card on the horizontal axis.
        assert_eq!(out.translate.x, 0.0);
        assert!(out.opacity < 1.0);
    }
}
