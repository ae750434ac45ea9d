// Copyright 2026 the Imbricate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Platform capability descriptor.
//!
//! Host platforms differ in how screens are mounted and how headers are
//! sized, but the engine never branches on platform identity. Instead the
//! host supplies a [`PlatformCapabilities`] at construction and policy code
//! (activation, header metrics, transition presets) branches on the
//! capabilities it describes.

/// What the host platform can do, as far as this engine cares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlatformCapabilities {
    /// The platform mounts screens in native containers that can suspend
    /// off-screen content. When set, screens below the top are kept active
    /// only while a transition above them is in flight; when unset, the
    /// screen beneath the top stays eagerly active so an incoming gesture
    /// can reveal pre-rendered content.
    pub supports_native_screen_optimization: bool,
    /// The platform presents compact landscape layouts (phone-style
    /// rotation) and expects a shorter header when rotated.
    pub is_landscape_capable: bool,
}

impl PlatformCapabilities {
    /// Capabilities of a Cocoa-touch-style phone platform.
    #[must_use]
    pub const fn cocoa_touch() -> Self {
        Self {
            supports_native_screen_optimization: false,
            is_landscape_capable: true,
        }
    }

    /// Capabilities of an Android-style platform with native screen
    /// containers.
    #[must_use]
    pub const fn android() -> Self {
        Self {
            supports_native_screen_optimization: true,
            is_landscape_capable: false,
        }
    }

    /// Capabilities of a desktop or embedded host with neither native
    /// screen containers nor compact rotation.
    #[must_use]
    pub const fn desktop() -> Self {
        Self {
            supports_native_screen_optimization: false,
            is_landscape_capable: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_differ_where_it_matters() {
        assert!(PlatformCapabilities::android().supports_native_screen_optimization);
        assert!(!PlatformCapabilities::cocoa_touch().supports_native_screen_optimization);
        assert!(PlatformCapabilities::cocoa_touch().is_landscape_capable);
        assert!(!PlatformCapabilities::desktop().is_landscape_capable);
    }
}
