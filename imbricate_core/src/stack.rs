// Copyright 2026 the Imbricate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The stack orchestrator.
//!
//! [`StackState`] composes the progress store, scene builder, header
//! ledger, activation policy, and transition resolver behind three
//! triggers:
//!
//! - [`set_navigation`](StackState::set_navigation) — the route list,
//!   focus, opening/closing sets, or descriptors changed;
//! - [`set_layout`](StackState::set_layout) — the container was
//!   (re-)measured;
//! - [`report_header_height`](StackState::report_header_height) — one
//!   route's header content was measured.
//!
//! Each trigger runs one synchronous derivation; [`frame`](StackState::frame)
//! then reads the derived state into render instructions. Because
//! derivation completes before any frame is read, no frame ever observes a
//! route list paired with another list's progress values.
//!
//! # Host loop pseudocode
//!
//! ```rust,ignore
//! // Navigation state changed:
//! let changes = stack.set_navigation(props, &mut tracer);
//! if !changes.is_empty() {
//!     let frame = stack.frame();
//!     for instruction in &frame.scenes {
//!         // mount/suspend per instruction.activation, style the card via
//!         // instruction.config.card_style_interpolator
//!     }
//!     // render frame.header once, above the cards
//! }
//!
//! // Animation tick (no re-derivation, values are shared):
//! let styles = (instruction.config.card_style_interpolator)(
//!     &instruction.card_inputs(frame.layout, frame.insets, false),
//! );
//! ```

use alloc::rc::Rc;
use alloc::vec::Vec;

use bitflags::bitflags;
use smallvec::SmallVec;

use crate::activation::{Activation, activation};
use crate::capabilities::PlatformCapabilities;
use crate::descriptor::{
    Descriptor, DescriptorMap, HeaderMode, HeaderSlotProps, Presentation, TransitionEvent,
    option_warnings,
};
use crate::geometry::{Insets, Layout};
use crate::header::{HeaderLedger, HeaderMetrics, default_header_height};
use crate::progress::{ProgressStore, ProgressValue};
use crate::route::{KeySet, Route, RouteKey, SurfaceId};
use crate::scene::{Scene, build_scenes};
use crate::trace::{
    DeriveEvent, DeriveTrigger, Tracer, TransitionEndEvent, TransitionStartEvent, WarningEvent,
};
use crate::transition::{
    CardInterpolationInputs, HeaderInterpolationInputs, HeaderStyleInterpolator, TransitionConfig,
    resolve, resolve_own,
};

bitflags! {
    /// What a derivation changed, for hosts applying incremental updates.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct DeriveChanges: u8 {
        /// The scene list changed (identity at one or more indices).
        const SCENES = 1 << 0;
        /// The container layout changed.
        const LAYOUT = 1 << 1;
        /// One or more header heights changed.
        const HEADER_HEIGHTS = 1 << 2;
    }
}

/// The navigation-state snapshot consumed by
/// [`set_navigation`](StackState::set_navigation).
///
/// Owned by the external navigation state; the engine only reacts to it.
#[derive(Clone, Debug)]
pub struct NavigationProps {
    /// Ordered route list, bottom to top.
    pub routes: Vec<Rc<Route>>,
    /// Index of the focused route.
    pub focused_index: usize,
    /// Keys of routes currently opening.
    pub opening: KeySet,
    /// Keys of routes currently closing.
    pub closing: KeySet,
    /// Per-route descriptors.
    pub descriptors: DescriptorMap,
}

/// Construction-time configuration for a [`StackState`].
#[derive(Clone, Copy, Debug)]
pub struct StackConfig {
    /// How incoming screens are presented.
    pub presentation: Presentation,
    /// How the header is presented.
    pub header_mode: HeaderMode,
    /// What the host platform can do.
    pub capabilities: PlatformCapabilities,
    /// Platform-default header heights.
    pub header_metrics: HeaderMetrics,
    /// Layout to assume until the container is measured (typically window
    /// dimensions).
    pub initial_layout: Layout,
    /// Insets to assume until the container is measured.
    pub initial_insets: Insets,
}

/// Render instruction for one scene.
#[derive(Clone, Debug)]
pub struct SceneInstruction {
    /// The scene to render.
    pub scene: Rc<Scene>,
    /// Position in the stack.
    pub index: usize,
    /// Whether the scene's route is currently closing.
    pub closing: bool,
    /// Whether the screen is kept mounted and rendering.
    pub activation: Activation,
    /// Resolved transition configuration (with look-ahead applied).
    pub config: TransitionConfig,
    /// Whether dismissal gestures are recognized for this screen.
    pub gesture_enabled: bool,
    /// Header height for this route.
    pub header_height: f64,
}

impl SceneInstruction {
    /// Samples this scene's progress into card interpolator inputs.
    #[must_use]
    pub fn card_inputs(&self, layout: Layout, insets: Insets, swiping: bool) -> CardInterpolationInputs {
        CardInterpolationInputs {
            current: self.scene.progress.current.get(),
            next: self.scene.progress.next.as_ref().map(ProgressValue::get),
            index: self.index,
            closing: self.closing,
            swiping,
            layout,
            insets,
        }
    }
}

/// Render instruction for the floating header, emitted once per frame.
#[derive(Clone, Debug)]
pub struct HeaderInstruction {
    /// The focused route's own header style interpolator (no look-ahead).
    pub style_interpolator: HeaderStyleInterpolator,
    /// The focused route's progress.
    pub current: ProgressValue,
    /// Progress of the scene above the focused one, or the settled
    /// sentinel when the focused scene is topmost.
    pub next: ProgressValue,
    /// The focused route's header height.
    pub height: f64,
    /// Resolved leading widget, if configured.
    pub left: Option<SurfaceId>,
    /// Resolved title widget, if configured.
    pub title: Option<SurfaceId>,
}

impl HeaderInstruction {
    /// Samples the header progress into header interpolator inputs.
    #[must_use]
    pub fn inputs(&self, layout: Layout) -> HeaderInterpolationInputs {
        HeaderInterpolationInputs {
            current: self.current.get(),
            next: Some(self.next.get()),
            layout,
            header_height: self.height,
        }
    }
}

/// One frame's render instructions.
#[derive(Clone, Debug)]
pub struct StackFrame {
    /// Per-scene instructions, bottom to top.
    pub scenes: Vec<SceneInstruction>,
    /// The floating header, when header mode is
    /// [`Float`](HeaderMode::Float) and the focused route shows one.
    pub header: Option<HeaderInstruction>,
    /// Layout the instructions were derived under.
    pub layout: Layout,
    /// Insets the instructions were derived under.
    pub insets: Insets,
    /// Index of the focused scene.
    pub focused_index: usize,
}

/// Retained state of one card stack.
///
/// All derivation is synchronous and single-threaded; the only state
/// mutated outside the three triggers is the progress values themselves,
/// which the external driver moves between derivations and this type only
/// reads.
#[derive(Debug)]
pub struct StackState {
    config: StackConfig,
    layout: Layout,
    insets: Insets,
    routes: Vec<Rc<Route>>,
    focused_index: usize,
    opening: KeySet,
    closing: KeySet,
    descriptors: DescriptorMap,
    progress: ProgressStore,
    scenes: Vec<Rc<Scene>>,
    headers: HeaderLedger,
    // Shared fallback for routes with no descriptor; never mutated.
    placeholder: Rc<Descriptor>,
    // Permanently-settled sentinel standing in for "no next scene"; seeded
    // at 1.0 and never written.
    settled: ProgressValue,
}

impl StackState {
    /// Creates an empty stack.
    #[must_use]
    pub fn new(config: StackConfig) -> Self {
        Self {
            layout: config.initial_layout,
            insets: config.initial_insets,
            config,
            routes: Vec::new(),
            focused_index: 0,
            opening: KeySet::new(),
            closing: KeySet::new(),
            descriptors: DescriptorMap::new(),
            progress: ProgressStore::new(),
            scenes: Vec::new(),
            headers: HeaderLedger::new(),
            placeholder: Descriptor::empty(),
            settled: ProgressValue::new(1.0),
        }
    }

    /// Applies a navigation-state change and re-derives all dependent
    /// state.
    ///
    /// Progress values for persisting keys are reused untouched, scenes are
    /// rebuilt with identity-preserving memoization, and header heights are
    /// carried over (new routes get defaults). Transition-start events fire
    /// for keys newly entering the opening or closing sets.
    pub fn set_navigation(&mut self, props: NavigationProps, tracer: &mut Tracer<'_>) -> DeriveChanges {
        let progress = self
            .progress
            .ensure(&props.routes, &props.opening, &props.descriptors);
        let scenes = build_scenes(
            &props.routes,
            &props.descriptors,
            &self.descriptors,
            &progress,
            &self.scenes,
            &self.placeholder,
        );
        let headers = self.headers.update(
            &props.routes,
            self.layout,
            self.insets,
            &self.config.capabilities,
            &self.config.header_metrics,
        );

        let reused = scenes
            .iter()
            .zip(&self.scenes)
            .filter(|(new, old)| Rc::ptr_eq(new, old))
            .count();
        let rebuilt = scenes.len() - reused;
        let headers_changed = headers.len() != self.headers.len()
            || props.routes.iter().any(|r| self.headers.get(&r.key).is_none());
        let mut changes = DeriveChanges::empty();
        if rebuilt > 0 || scenes.len() != self.scenes.len() {
            changes |= DeriveChanges::SCENES;
        }
        if headers_changed {
            changes |= DeriveChanges::HEADER_HEIGHTS;
        }

        if cfg!(debug_assertions) {
            for (key, descriptor) in &props.descriptors {
                let seen = self
                    .descriptors
                    .get(key)
                    .is_some_and(|prev| Rc::ptr_eq(prev, descriptor));
                if !seen {
                    for message in option_warnings(&descriptor.options) {
                        tracer.warning(&WarningEvent {
                            key: Some(key.clone()),
                            message,
                        });
                    }
                }
            }
        }

        let mut started: SmallVec<[(RouteKey, bool); 4]> = SmallVec::new();
        for key in &props.opening {
            if !self.opening.contains(key) {
                started.push((key.clone(), false));
            }
        }
        for key in &props.closing {
            if !self.closing.contains(key) {
                started.push((key.clone(), true));
            }
        }

        let focused_index = if props.routes.is_empty() {
            0
        } else if props.focused_index < props.routes.len() {
            props.focused_index
        } else {
            if cfg!(debug_assertions) {
                tracer.warning(&WarningEvent {
                    key: None,
                    message: "focused index is out of range; falling back to the top scene",
                });
            }
            props.routes.len() - 1
        };

        self.routes = props.routes;
        self.focused_index = focused_index;
        self.opening = props.opening;
        self.closing = props.closing;
        self.descriptors = props.descriptors;
        self.progress = progress;
        self.scenes = scenes;
        self.headers = headers;

        tracer.derive(&DeriveEvent {
            trigger: DeriveTrigger::Navigation,
            routes: self.routes.len(),
            scenes_rebuilt: rebuilt,
            scenes_reused: reused,
        });
        for (key, closing) in started {
            tracer.transition_start(&TransitionStartEvent {
                key: key.clone(),
                closing,
            });
            if let Some(descriptor) = self.descriptors.get(&key) {
                if let Some(callback) = &descriptor.on_transition_start {
                    callback(TransitionEvent { closing });
                }
            }
        }

        changes
    }

    /// Applies a container measurement.
    ///
    /// A changed layout invalidates every prior header measurement (an
    /// orientation change resizes all header content), so the ledger is
    /// reset to defaults for the new layout.
    pub fn set_layout(&mut self, layout: Layout, insets: Insets, tracer: &mut Tracer<'_>) -> DeriveChanges {
        if layout == self.layout && insets == self.insets {
            return DeriveChanges::empty();
        }
        self.layout = layout;
        self.insets = insets;
        self.headers = HeaderLedger::reset(
            &self.routes,
            layout,
            insets,
            &self.config.capabilities,
            &self.config.header_metrics,
        );
        tracer.derive(&DeriveEvent {
            trigger: DeriveTrigger::Layout,
            routes: self.routes.len(),
            scenes_rebuilt: 0,
            scenes_reused: self.scenes.len(),
        });
        DeriveChanges::LAYOUT | DeriveChanges::HEADER_HEIGHTS
    }

    /// Records one route's measured header height, touching no other entry.
    pub fn report_header_height(
        &mut self,
        key: &RouteKey,
        height: f64,
        tracer: &mut Tracer<'_>,
    ) -> DeriveChanges {
        if !self.headers.report(key, height) {
            return DeriveChanges::empty();
        }
        tracer.derive(&DeriveEvent {
            trigger: DeriveTrigger::HeaderMeasurement,
            routes: self.routes.len(),
            scenes_rebuilt: 0,
            scenes_reused: self.scenes.len(),
        });
        DeriveChanges::HEADER_HEIGHTS
    }

    /// Reports that a route's transition settled.
    ///
    /// Called by the external driver when a progress value reaches its
    /// target. Dispatches the route's transition-end callback when one is
    /// declared.
    pub fn notify_transition_end(&self, key: &RouteKey, closing: bool, tracer: &mut Tracer<'_>) {
        tracer.transition_end(&TransitionEndEvent {
            key: key.clone(),
            closing,
        });
        if let Some(descriptor) = self.descriptors.get(key) {
            if let Some(callback) = &descriptor.on_transition_end {
                callback(TransitionEvent { closing });
            }
        }
    }

    /// Emits render instructions for the current derived state.
    #[must_use]
    pub fn frame(&self) -> StackFrame {
        let total = self.scenes.len();
        let scenes = self
            .scenes
            .iter()
            .enumerate()
            .map(|(index, scene)| {
                let config = resolve(
                    &self.scenes,
                    index,
                    self.config.presentation,
                    self.config.header_mode,
                    &self.config.capabilities,
                );
                let gesture_enabled = scene
                    .descriptor
                    .options
                    .gesture_enabled
                    .unwrap_or(!self.config.capabilities.supports_native_screen_optimization);
                SceneInstruction {
                    index,
                    closing: self.closing.contains(&scene.route.key),
                    activation: activation(
                        index,
                        total,
                        scene.progress.next.as_ref(),
                        &self.config.capabilities,
                    ),
                    config,
                    gesture_enabled,
                    header_height: self.header_height_for(&scene.route.key),
                    scene: scene.clone(),
                }
            })
            .collect();

        StackFrame {
            scenes,
            header: self.floating_header(),
            layout: self.layout,
            insets: self.insets,
            focused_index: self.focused_index,
        }
    }

    /// Returns the current scene list.
    #[must_use]
    pub fn scenes(&self) -> &[Rc<Scene>] {
        &self.scenes
    }

    /// Returns the focused scene, if the stack is non-empty.
    #[must_use]
    pub fn focused_scene(&self) -> Option<&Rc<Scene>> {
        self.scenes.get(self.focused_index)
    }

    /// Returns the progress store.
    #[must_use]
    pub fn progress(&self) -> &ProgressStore {
        &self.progress
    }

    /// Returns the current layout.
    #[must_use]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Returns the shared permanently-settled progress sentinel.
    ///
    /// Must never be written; it stands in for "no next scene" wherever an
    /// interpolation input needs a value.
    #[must_use]
    pub fn settled_progress(&self) -> &ProgressValue {
        &self.settled
    }

    fn header_height_for(&self, key: &RouteKey) -> f64 {
        self.headers.get(key).unwrap_or_else(|| {
            default_header_height(
                self.layout,
                self.insets,
                &self.config.capabilities,
                &self.config.header_metrics,
            )
        })
    }

    fn floating_header(&self) -> Option<HeaderInstruction> {
        if self.config.header_mode != HeaderMode::Float {
            return None;
        }
        let focused = self.scenes.get(self.focused_index)?;
        if focused.descriptor.options.header_shown == Some(false) {
            return None;
        }
        // The floating header follows the focused route's own interpolator
        // (mode default when its descriptor is absent), not the look-ahead
        // one the card layer uses.
        let config = resolve_own(
            focused,
            self.config.presentation,
            self.config.header_mode,
            &self.config.capabilities,
        );
        let next = focused
            .progress
            .next
            .clone()
            .unwrap_or_else(|| self.settled.clone());
        let props = HeaderSlotProps {
            route: &focused.route,
            layout: self.layout,
        };
        Some(HeaderInstruction {
            style_interpolator: config.header_style_interpolator,
            current: focused.progress.current.clone(),
            next,
            height: self.header_height_for(&focused.route.key),
            left: focused
                .descriptor
                .options
                .header_left
                .as_ref()
                .map(|slot| slot.resolve(&props)),
            title: focused
                .descriptor
                .options
                .header_title
                .as_ref()
                .map(|slot| slot.resolve(&props)),
        })
    }
}
