// Copyright 2026 the Imbricate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Screen activation policy.
//!
//! Activation decides which screens stay mounted and rendering versus
//! suspended, bounding the cost of off-screen content. The topmost screen is
//! always active. What happens below it depends on the platform:
//!
//! - Without native screen containers, the screen directly beneath the top
//!   is kept eagerly active so an incoming dismissal gesture reveals
//!   pre-rendered content; everything deeper is inactive.
//! - With native screen containers
//!   ([`supports_native_screen_optimization`]), a screen below the top is
//!   active only while the transition above it is still in flight. That is
//!   a *live* condition over the neighbor's progress, re-evaluated per
//!   animation tick, not a static boolean.
//!
//! [`supports_native_screen_optimization`]:
//!     crate::capabilities::PlatformCapabilities::supports_native_screen_optimization

use crate::capabilities::PlatformCapabilities;
use crate::progress::ProgressValue;

/// Whether a screen is kept mounted and rendering.
#[derive(Clone, Debug)]
pub enum Activation {
    /// Suspended.
    Inactive,
    /// Unconditionally active.
    Active,
    /// Active while the given progress (the neighbor above's) has not yet
    /// settled at 1. Hosts re-evaluate this on every animation tick.
    UntilSettled(ProgressValue),
}

impl Activation {
    /// Samples the activation state right now.
    #[must_use]
    pub fn evaluate(&self) -> bool {
        match self {
            Self::Inactive => false,
            Self::Active => true,
            Self::UntilSettled(next) => next.get() != 1.0,
        }
    }
}

/// Decides the activation state for the screen at `index` of `total`.
///
/// `next` is the progress of the scene directly above, absent for the top
/// scene.
#[must_use]
pub fn activation(
    index: usize,
    total: usize,
    next: Option<&ProgressValue>,
    capabilities: &PlatformCapabilities,
) -> Activation {
    if index + 1 == total {
        return Activation::Active;
    }
    if capabilities.supports_native_screen_optimization {
        match next {
            Some(next) => Activation::UntilSettled(next.clone()),
            None => Activation::Active,
        }
    } else if index + 2 == total {
        // Eagerly pre-render the screen a dismissal gesture would reveal.
        Activation::Active
    } else {
        Activation::Inactive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_screen_is_always_active() {
        for caps in [
            PlatformCapabilities::cocoa_touch(),
            PlatformCapabilities::android(),
            PlatformCapabilities::desktop(),
        ] {
            let state = activation(3, 4, None, &caps);
            assert!(state.evaluate());
        }
    }

    #[test]
    fn without_recycling_only_top_two_are_active() {
        let caps = PlatformCapabilities::cocoa_touch();
        let next = ProgressValue::new(0.5);

        assert!(activation(3, 4, None, &caps).evaluate());
        assert!(activation(2, 4, Some(&next), &caps).evaluate());
        assert!(!activation(1, 4, Some(&next), &caps).evaluate());
        assert!(!activation(0, 4, Some(&next), &caps).evaluate());
    }

    #[test]
    fn second_from_top_stays_active_regardless_of_progress() {
        let caps = PlatformCapabilities::desktop();
        for value in [0.0, 0.5, 1.0] {
            let next = ProgressValue::new(value);
            assert!(activation(2, 4, Some(&next), &caps).evaluate());
        }
    }

    #[test]
    fn with_recycling_activation_follows_the_transition() {
        let caps = PlatformCapabilities::android();
        let next = ProgressValue::new(0.3);
        let state = activation(2, 4, Some(&next), &caps);

        assert!(state.evaluate(), "active while the screen above animates");
        next.set(1.0);
        assert!(!state.evaluate(), "inactive once the screen above settles");
        // A reversing gesture re-activates the same state object.
        next.set(0.96);
        assert!(state.evaluate());
    }
}
