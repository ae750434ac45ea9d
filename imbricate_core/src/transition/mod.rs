// Copyright 2026 the Imbricate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transition configuration: animation specs, easing, gesture parameters,
//! mode presets, and per-scene resolution.
//!
//! The engine never runs animations itself — an [`AnimationSpec`] is
//! configuration handed to the external driver, and interpolators are pure
//! functions the host calls with sampled progress each frame. What this
//! module owns is the *composition*: which spec, interpolators, and gesture
//! parameters apply to each scene, resolved from descriptor overrides and
//! capability-flavored mode presets (see [`resolve()`]).

mod interpolate;
mod resolve;

pub use interpolate::{
    CardInterpolation, CardInterpolationInputs, CardStyleInterpolator, HeaderInterpolation,
    HeaderInterpolationInputs, HeaderStyleInterpolator, for_fade_from_bottom, for_header_fade,
    for_header_no_animation, for_header_slide, for_horizontal, for_no_animation,
    for_scale_from_center, for_vertical,
};
pub use resolve::{TransitionConfig, TransitionPreset, resolve, resolve_own};

use core::time::Duration;

use kurbo::{CubicBez, ParamCurve};

/// Default edge distance (logical pixels) within which a horizontal
/// dismissal gesture may begin.
pub const DEFAULT_GESTURE_RESPONSE_DISTANCE_HORIZONTAL: f64 = 50.0;

/// Default edge distance (logical pixels) within which a vertical dismissal
/// gesture may begin.
pub const DEFAULT_GESTURE_RESPONSE_DISTANCE_VERTICAL: f64 = 135.0;

/// Default weight of gesture release velocity when deciding whether a
/// half-finished gesture completes or rolls back.
pub const DEFAULT_GESTURE_VELOCITY_IMPACT: f64 = 0.3;

/// Which way a dismissal gesture travels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureDirection {
    /// Leading edge → trailing edge (standard push dismissal).
    Horizontal,
    /// Trailing edge → leading edge.
    HorizontalInverted,
    /// Top → bottom (standard modal dismissal).
    Vertical,
    /// Bottom → top.
    VerticalInverted,
}

impl GestureDirection {
    /// Returns whether gestures in this direction travel vertically.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Vertical | Self::VerticalInverted)
    }
}

/// Edge distances within which a dismissal gesture may begin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureResponseDistance {
    /// Distance from the leading edge, for horizontal gestures.
    pub horizontal: f64,
    /// Distance from the top edge, for vertical gestures.
    pub vertical: f64,
}

impl Default for GestureResponseDistance {
    fn default() -> Self {
        Self {
            horizontal: DEFAULT_GESTURE_RESPONSE_DISTANCE_HORIZONTAL,
            vertical: DEFAULT_GESTURE_RESPONSE_DISTANCE_VERTICAL,
        }
    }
}

/// A progress-shaping curve for timed animations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    /// Constant velocity.
    Linear,
    /// CSS-style cubic Bézier through `(0,0)`, `(x1,y1)`, `(x2,y2)`, `(1,1)`.
    CubicBezier {
        /// First control point, x.
        x1: f64,
        /// First control point, y.
        y1: f64,
        /// Second control point, x.
        x2: f64,
        /// Second control point, y.
        y2: f64,
    },
}

impl Easing {
    /// The standard ease curve.
    pub const EASE: Self = Self::CubicBezier {
        x1: 0.25,
        y1: 0.1,
        x2: 0.25,
        y2: 1.0,
    };

    /// Accelerating from zero velocity.
    pub const EASE_IN: Self = Self::CubicBezier {
        x1: 0.42,
        y1: 0.0,
        x2: 1.0,
        y2: 1.0,
    };

    /// Decelerating to zero velocity.
    pub const EASE_OUT: Self = Self::CubicBezier {
        x1: 0.0,
        y1: 0.0,
        x2: 0.58,
        y2: 1.0,
    };

    /// Accelerating then decelerating.
    pub const EASE_IN_OUT: Self = Self::CubicBezier {
        x1: 0.42,
        y1: 0.0,
        x2: 0.58,
        y2: 1.0,
    };

    /// Evaluates the curve at time fraction `t`, clamped to `[0, 1]`.
    #[must_use]
    pub fn eval(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::CubicBezier { x1, y1, x2, y2 } => {
                let curve = CubicBez::new((0.0, 0.0), (x1, y1), (x2, y2), (1.0, 1.0));
                // Invert x(u) = t by bisection; x(u) is monotone for control
                // points with x in [0, 1].
                let mut lo = 0.0_f64;
                let mut hi = 1.0_f64;
                for _ in 0..32 {
                    let mid = 0.5 * (lo + hi);
                    if curve.eval(mid).x < t {
                        lo = mid;
                    } else {
                        hi = mid;
                    }
                }
                curve.eval(0.5 * (lo + hi)).y
            }
        }
    }
}

/// How the external driver should animate one direction of a transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimationSpec {
    /// Fixed-duration animation shaped by an easing curve.
    Timing {
        /// Total animation duration.
        duration: Duration,
        /// Progress-shaping curve.
        easing: Easing,
    },
    /// Physical spring toward the target value.
    Spring {
        /// Damping coefficient.
        damping: f64,
        /// Attached mass.
        mass: f64,
        /// Spring stiffness.
        stiffness: f64,
        /// Whether the spring may overshoot the target.
        overshoot_clamping: bool,
        /// Displacement below which the spring is considered at rest.
        rest_displacement_threshold: f64,
        /// Speed below which the spring is considered at rest.
        rest_speed_threshold: f64,
    },
}

/// Animation specifications for a scene's entry and exit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionSpec {
    /// Spec used while the screen is opening.
    pub open: AnimationSpec,
    /// Spec used while the screen is closing.
    pub close: AnimationSpec,
}

impl TransitionSpec {
    /// Spring-driven slide, matching platform push navigation feel.
    #[must_use]
    pub const fn slide() -> Self {
        const SPRING: AnimationSpec = AnimationSpec::Spring {
            damping: 500.0,
            mass: 3.0,
            stiffness: 1000.0,
            overshoot_clamping: true,
            rest_displacement_threshold: 10.0,
            rest_speed_threshold: 10.0,
        };
        Self {
            open: SPRING,
            close: SPRING,
        }
    }

    /// Fade-and-rise entry with a quick fade-out exit.
    #[must_use]
    pub const fn fade_from_bottom() -> Self {
        Self {
            open: AnimationSpec::Timing {
                duration: Duration::from_millis(350),
                easing: Easing::EASE_OUT,
            },
            close: AnimationSpec::Timing {
                duration: Duration::from_millis(150),
                easing: Easing::EASE_IN,
            },
        }
    }

    /// Symmetric scale-from-center entry and exit.
    #[must_use]
    pub const fn scale_from_center() -> Self {
        const TIMING: AnimationSpec = AnimationSpec::Timing {
            duration: Duration::from_millis(400),
            easing: Easing::CubicBezier {
                x1: 0.35,
                y1: 0.45,
                x2: 0.0,
                y2: 1.0,
            },
        };
        Self {
            open: TIMING,
            close: TIMING,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_easing_is_identity() {
        assert_eq!(Easing::Linear.eval(0.0), 0.0);
        assert_eq!(Easing::Linear.eval(0.25), 0.25);
        assert_eq!(Easing::Linear.eval(1.0), 1.0);
        // Out-of-range inputs clamp.
        assert_eq!(Easing::Linear.eval(-1.0), 0.0);
        assert_eq!(Easing::Linear.eval(2.0), 1.0);
    }

    #[test]
    fn bezier_easing_hits_endpoints() {
        for easing in [
            Easing::EASE,
            Easing::EASE_IN,
            Easing::EASE_OUT,
            Easing::EASE_IN_OUT,
        ] {
            assert!(easing.eval(0.0).abs() < 1e-6);
            assert!((easing.eval(1.0) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn bezier_easing_is_monotone() {
        let mut last = 0.0;
        for i in 0..=100 {
            let y = Easing::EASE_IN_OUT.eval(f64::from(i) / 100.0);
            assert!(y >= last - 1e-9, "easing must not reverse");
            last = y;
        }
    }

    #[test]
    fn ease_in_lags_ease_out() {
        let t = 0.3;
        assert!(Easing::EASE_IN.eval(t) < Easing::EASE_OUT.eval(t));
    }

    #[test]
    fn fade_spec_closes_faster_than_it_opens() {
        let spec = TransitionSpec::fade_from_bottom();
        let (open, close) = match (spec.open, spec.close) {
            (
                AnimationSpec::Timing { duration: o, .. },
                AnimationSpec::Timing { duration: c, .. },
            ) => (o, c),
            _ => panic!("fade spec is timing-driven"),
        };
        assert!(close < open);
    }

    #[test]
    fn gesture_direction_axis() {
        assert!(GestureDirection::Vertical.is_vertical());
        assert!(GestureDirection::VerticalInverted.is_vertical());
        assert!(!GestureDirection::Horizontal.is_vertical());
    }

    #[test]
    fn response_distance_defaults() {
        let d = GestureResponseDistance::default();
        assert_eq!(d.horizontal, DEFAULT_GESTURE_RESPONSE_DISTANCE_HORIZONTAL);
        assert_eq!(d.vertical, DEFAULT_GESTURE_RESPONSE_DISTANCE_VERTICAL);
    }
}
