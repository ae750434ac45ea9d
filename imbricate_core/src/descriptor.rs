// Copyright 2026 the Imbricate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-route configuration supplied by the external navigation state.
//!
//! A [`Descriptor`] bundles a route's [`StackOptions`] with optional
//! transition lifecycle callbacks. Descriptors are read-only to the engine
//! and may be momentarily absent while a route is being removed; derivation
//! falls back first to the previous render's descriptor for that key and
//! finally to one frozen empty-options placeholder shared across all such
//! fallbacks.
//!
//! Every option is optional. An unset field falls through to the
//! mode-default transition preset, so a malformed or missing configuration
//! can degrade the presentation but never fault the engine.

use alloc::rc::Rc;
use core::fmt;

use smallvec::SmallVec;

use crate::route::{Route, RouteKey, SurfaceId};
use crate::geometry::Layout;
use crate::transition::{
    CardStyleInterpolator, GestureDirection, GestureResponseDistance, HeaderStyleInterpolator,
    TransitionSpec,
};

/// Route key → descriptor, as supplied by the navigation state each render.
pub type DescriptorMap = hashbrown::HashMap<RouteKey, Rc<Descriptor>>;

/// How the header is presented relative to the screens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HeaderMode {
    /// One floating header rendered above the stack, re-styled per focused
    /// route and animated independently of screen mounting.
    Float,
    /// Each screen mounts its own header; the floating header is not
    /// emitted and header style interpolation is suppressed.
    Screen,
}

/// How incoming screens are presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Presentation {
    /// Standard push: screens slide in over the previous card.
    Card,
    /// Modal: screens rise from the bottom edge.
    Modal,
}

/// `position` of a styled container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StylePosition {
    /// Laid out in flow (the only supported value for header backgrounds).
    Relative,
    /// Taken out of flow.
    Absolute,
}

/// The subset of container styling the engine inspects.
///
/// Hosts may attach richer styling out of band; the engine only validates
/// the fields that can break header layout.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ContainerStyle {
    /// Positioning mode, if explicitly styled.
    pub position: Option<StylePosition>,
    /// Opacity override, if explicitly styled.
    pub opacity: Option<f64>,
}

/// Inputs handed to a [`HeaderSlot::Render`] function.
#[derive(Debug)]
pub struct HeaderSlotProps<'a> {
    /// The route the header is being rendered for.
    pub route: &'a Route,
    /// Current container layout.
    pub layout: Layout,
}

/// A header widget slot: either a ready-made node or a render function.
///
/// Resolved once per frame via [`resolve`](Self::resolve), so downstream
/// code never branches on which form the caller supplied.
#[derive(Clone, Copy, Debug)]
pub enum HeaderSlot {
    /// An externally-created node, referenced by surface.
    Node(SurfaceId),
    /// A function producing the node from the current route and layout.
    Render(fn(&HeaderSlotProps<'_>) -> SurfaceId),
}

impl HeaderSlot {
    /// Resolves the slot to a concrete surface.
    #[must_use]
    pub fn resolve(&self, props: &HeaderSlotProps<'_>) -> SurfaceId {
        match self {
            Self::Node(id) => *id,
            Self::Render(render) => render(props),
        }
    }
}

/// Payload for transition lifecycle callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionEvent {
    /// Whether the route is transitioning out (closing) rather than in.
    pub closing: bool,
}

/// A transition lifecycle callback declared on a descriptor.
pub type TransitionCallback = Rc<dyn Fn(TransitionEvent)>;

/// Per-route transition, gesture, and header options.
///
/// Unset fields resolve through the mode-default preset chain; see the
/// `transition` module.
#[derive(Clone, Debug, Default)]
pub struct StackOptions {
    /// Overrides the preset's animation specification.
    pub transition_spec: Option<TransitionSpec>,
    /// Overrides the preset's card style interpolator.
    pub card_style_interpolator: Option<CardStyleInterpolator>,
    /// Overrides the preset's header style interpolator.
    pub header_style_interpolator: Option<HeaderStyleInterpolator>,
    /// Overrides the preset's gesture direction.
    pub gesture_direction: Option<GestureDirection>,
    /// Overrides the default edge distance within which a gesture may begin.
    pub gesture_response_distance: Option<GestureResponseDistance>,
    /// Overrides how strongly gesture velocity shortens the remaining
    /// transition.
    pub gesture_velocity_impact: Option<f64>,
    /// Whether dismissal gestures are recognized for this route.
    pub gesture_enabled: Option<bool>,
    /// Set to `Some(false)` to mount this route without an entry animation.
    pub animation_enabled: Option<bool>,
    /// Whether a header is rendered for this route.
    pub header_shown: Option<bool>,
    /// Leading header widget.
    pub header_left: Option<HeaderSlot>,
    /// Header title widget.
    pub header_title: Option<HeaderSlot>,
    /// Styling for the floating header's background container.
    pub header_background_style: Option<ContainerStyle>,
}

/// A route's descriptor: options plus lifecycle interest.
#[derive(Clone)]
pub struct Descriptor {
    /// The route's options.
    pub options: StackOptions,
    /// Invoked when this route's transition starts, if declared.
    pub on_transition_start: Option<TransitionCallback>,
    /// Invoked when this route's transition settles, if declared.
    pub on_transition_end: Option<TransitionCallback>,
}

impl Descriptor {
    /// Creates a descriptor with the given options and no lifecycle
    /// callbacks.
    #[must_use]
    pub fn new(options: StackOptions) -> Self {
        Self {
            options,
            on_transition_start: None,
            on_transition_end: None,
        }
    }

    /// Creates the shared empty-options fallback descriptor.
    ///
    /// The returned descriptor must never be mutated; one instance is
    /// shared across every route whose real descriptor is absent.
    #[must_use]
    pub fn empty() -> Rc<Self> {
        Rc::new(Self::new(StackOptions::default()))
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("options", &self.options)
            .field("on_transition_start", &self.on_transition_start.is_some())
            .field("on_transition_end", &self.on_transition_end.is_some())
            .finish()
    }
}

/// Checks an option bag for combinations the engine cannot honor.
///
/// Returns one message per finding. Nothing here is fatal: every flagged
/// option is ignored or degraded at resolution time, and callers emit the
/// messages as development-build warnings only.
#[must_use]
pub fn option_warnings(options: &StackOptions) -> SmallVec<[&'static str; 2]> {
    let mut warnings = SmallVec::new();
    if options
        .header_background_style
        .is_some_and(|s| s.position == Some(StylePosition::Absolute))
    {
        warnings.push(
            "`position: absolute` on the header background style is not supported and will be ignored",
        );
    }
    if options.gesture_enabled == Some(true) && options.animation_enabled == Some(false) {
        warnings.push(
            "`gesture_enabled` has no effect while animation is disabled; the screen will snap instead of tracking the gesture",
        );
    }
    warnings
}
