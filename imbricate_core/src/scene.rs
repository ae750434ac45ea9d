// Copyright 2026 the Imbricate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene derivation and memoization.
//!
//! A [`Scene`] is the derived view of one route: the route itself, its
//! resolved descriptor, and the progress triple linking it to its
//! neighbors. Scenes are rebuilt on every route or descriptor change (never
//! on pure progress ticks) and memoized by reference identity: when a
//! scene's route, descriptor, and all three progress references are
//! unchanged, the previous `Rc<Scene>` is returned as-is. Downstream
//! retained-rendering hosts rely on that identity to skip re-rendering
//! unchanged screens, so the memoization is part of the contract, not an
//! optimization.

use alloc::rc::Rc;
use alloc::vec::Vec;

use crate::descriptor::{Descriptor, DescriptorMap};
use crate::progress::{ProgressStore, ProgressValue};
use crate::route::Route;

/// Progress values of a scene and its immediate neighbors.
#[derive(Clone, Debug)]
pub struct ProgressTriple {
    /// The route below (index - 1), if any.
    pub previous: Option<ProgressValue>,
    /// This route's own progress.
    pub current: ProgressValue,
    /// The route above (index + 1), if any.
    pub next: Option<ProgressValue>,
}

impl ProgressTriple {
    fn same_as(&self, other: &Self) -> bool {
        fn same_opt(a: Option<&ProgressValue>, b: Option<&ProgressValue>) -> bool {
            match (a, b) {
                (None, None) => true,
                (Some(a), Some(b)) => a.same(b),
                _ => false,
            }
        }
        self.current.same(&other.current)
            && same_opt(self.previous.as_ref(), other.previous.as_ref())
            && same_opt(self.next.as_ref(), other.next.as_ref())
    }
}

/// The derived view of one route in the stack.
#[derive(Clone, Debug)]
pub struct Scene {
    /// The route this scene presents.
    pub route: Rc<Route>,
    /// The route's resolved descriptor (possibly the previous render's, or
    /// the shared empty placeholder, while the real one is absent).
    pub descriptor: Rc<Descriptor>,
    /// Progress of this scene and its neighbors.
    pub progress: ProgressTriple,
}

impl Scene {
    fn matches(&self, route: &Rc<Route>, descriptor: &Rc<Descriptor>, progress: &ProgressTriple) -> bool {
        Rc::ptr_eq(&self.route, route)
            && Rc::ptr_eq(&self.descriptor, descriptor)
            && self.progress.same_as(progress)
    }
}

/// Derives the ordered scene list for the given routes.
///
/// `progress` must already contain a value for every route (the caller runs
/// [`ProgressStore::ensure`] first). Descriptor resolution per key: fresh
/// `descriptors` entry → `previous_descriptors` entry (stale but better
/// than nothing while a route is being removed) → the shared `placeholder`.
///
/// # Panics
///
/// Panics if a route key has no progress value; deriving scenes from an
/// un-ensured store is a caller bug.
#[must_use]
pub fn build_scenes(
    routes: &[Rc<Route>],
    descriptors: &DescriptorMap,
    previous_descriptors: &DescriptorMap,
    progress: &ProgressStore,
    previous_scenes: &[Rc<Scene>],
    placeholder: &Rc<Descriptor>,
) -> Vec<Rc<Scene>> {
    let value_for = |route: &Rc<Route>| -> ProgressValue {
        progress
            .get(&route.key)
            .unwrap_or_else(|| panic!("no progress value for live route {:?}", route.key))
            .clone()
    };

    routes
        .iter()
        .enumerate()
        .map(|(i, route)| {
            let triple = ProgressTriple {
                previous: i.checked_sub(1).map(|j| value_for(&routes[j])),
                current: value_for(route),
                next: routes.get(i + 1).map(|r| value_for(r)),
            };
            let descriptor = descriptors
                .get(&route.key)
                .or_else(|| previous_descriptors.get(&route.key))
                .unwrap_or(placeholder)
                .clone();

            if let Some(old) = previous_scenes.get(i) {
                if old.matches(route, &descriptor, &triple) {
                    return old.clone();
                }
            }
            Rc::new(Scene {
                route: route.clone(),
                descriptor,
                progress: triple,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::descriptor::StackOptions;
    use crate::route::{KeySet, RouteKey};

    fn routes(keys: &[&str]) -> Vec<Rc<Route>> {
        keys.iter().map(|k| Rc::new(Route::new(k, k))).collect()
    }

    fn descriptors(keys: &[&str]) -> DescriptorMap {
        keys.iter()
            .map(|k| {
                (
                    RouteKey::new(k),
                    Rc::new(Descriptor::new(StackOptions::default())),
                )
            })
            .collect()
    }

    fn ensured(routes: &[Rc<Route>]) -> ProgressStore {
        ProgressStore::new().ensure(routes, &KeySet::new(), &DescriptorMap::new())
    }

    #[test]
    fn triple_links_neighbors() {
        let routes = routes(&["a", "b", "c"]);
        let progress = ensured(&routes);
        let scenes = build_scenes(
            &routes,
            &descriptors(&["a", "b", "c"]),
            &DescriptorMap::new(),
            &progress,
            &[],
            &Descriptor::empty(),
        );

        assert_eq!(scenes.len(), 3);
        assert!(scenes[0].progress.previous.is_none());
        assert!(scenes[2].progress.next.is_none());

        let b = progress.get(&RouteKey::new("b")).unwrap();
        assert!(scenes[0].progress.next.as_ref().unwrap().same(b));
        assert!(scenes[2].progress.previous.as_ref().unwrap().same(b));
        assert!(scenes[1].progress.current.same(b));
    }

    #[test]
    fn unchanged_scenes_are_reference_identical() {
        let routes = routes(&["a", "b"]);
        let descriptors = descriptors(&["a", "b"]);
        let progress = ensured(&routes);

        let first = build_scenes(
            &routes,
            &descriptors,
            &DescriptorMap::new(),
            &progress,
            &[],
            &Descriptor::empty(),
        );
        let second = build_scenes(
            &routes,
            &descriptors,
            &DescriptorMap::new(),
            &progress,
            &first,
            &Descriptor::empty(),
        );

        for (a, b) in first.iter().zip(&second) {
            assert!(Rc::ptr_eq(a, b), "unchanged scene must keep its identity");
        }
    }

    #[test]
    fn progress_ticks_do_not_invalidate_memoization() {
        let routes = routes(&["a", "b"]);
        let descriptors = descriptors(&["a", "b"]);
        let progress = ensured(&routes);

        let first = build_scenes(
            &routes,
            &descriptors,
            &DescriptorMap::new(),
            &progress,
            &[],
            &Descriptor::empty(),
        );

        // The driver moves a value; identity is what matters, not content.
        progress.get(&RouteKey::new("b")).unwrap().set(0.4);
        let second = build_scenes(
            &routes,
            &descriptors,
            &DescriptorMap::new(),
            &progress,
            &first,
            &Descriptor::empty(),
        );
        assert!(Rc::ptr_eq(&first[1], &second[1]));
    }

    #[test]
    fn changed_descriptor_rebuilds_only_that_scene() {
        let routes = routes(&["a", "b"]);
        let mut fresh = descriptors(&["a", "b"]);
        let progress = ensured(&routes);

        let first = build_scenes(
            &routes,
            &fresh,
            &DescriptorMap::new(),
            &progress,
            &[],
            &Descriptor::empty(),
        );

        fresh.insert(
            RouteKey::new("b"),
            Rc::new(Descriptor::new(StackOptions::default())),
        );
        let second = build_scenes(
            &routes,
            &fresh,
            &DescriptorMap::new(),
            &progress,
            &first,
            &Descriptor::empty(),
        );

        assert!(Rc::ptr_eq(&first[0], &second[0]));
        assert!(!Rc::ptr_eq(&first[1], &second[1]));
    }

    #[test]
    fn missing_descriptor_falls_back_to_previous_then_placeholder() {
        let routes = routes(&["a"]);
        let progress = ensured(&routes);
        let placeholder = Descriptor::empty();

        // Previous render still has a's descriptor; reuse it.
        let stale = descriptors(&["a"]);
        let scenes = build_scenes(
            &routes,
            &DescriptorMap::new(),
            &stale,
            &progress,
            &[],
            &placeholder,
        );
        assert!(Rc::ptr_eq(
            &scenes[0].descriptor,
            stale.get(&RouteKey::new("a")).unwrap()
        ));

        // Nothing anywhere: the shared placeholder steps in.
        let scenes = build_scenes(
            &routes,
            &DescriptorMap::new(),
            &DescriptorMap::new(),
            &progress,
            &[],
            &placeholder,
        );
        assert!(Rc::ptr_eq(&scenes[0].descriptor, &placeholder));
    }

    #[test]
    fn inserted_route_shifts_neighbor_triples() {
        let two = routes(&["a", "b"]);
        let descriptors_two = descriptors(&["a", "b"]);
        let progress = ensured(&two);
        let first = build_scenes(
            &two,
            &descriptors_two,
            &DescriptorMap::new(),
            &progress,
            &[],
            &Descriptor::empty(),
        );

        // Insert c between a and b: a's `next` changes, so a rebuilds even
        // though its own route and descriptor are untouched.
        let three: Vec<Rc<Route>> =
            alloc::vec![two[0].clone(), Rc::new(Route::new("c", "c")), two[1].clone()];
        let progress = progress.ensure(&three, &KeySet::new(), &DescriptorMap::new());
        let second = build_scenes(
            &three,
            &descriptors_two,
            &DescriptorMap::new(),
            &progress,
            &first,
            &Descriptor::empty(),
        );

        assert!(!Rc::ptr_eq(&first[0], &second[0]));
        assert!(
            second[0]
                .progress
                .next
                .as_ref()
                .unwrap()
                .same(progress.get(&RouteKey::new("c")).unwrap())
        );
    }
}
