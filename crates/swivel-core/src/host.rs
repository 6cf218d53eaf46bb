//! The boundary to the host animation runtime.
//!
//! The engine does not play animations. It decides when one starts, when a
//! stale one is committed and cancelled, and what styles finalize a finished
//! one. Everything else (frame-by-frame interpolation, easing evaluation,
//! scheduling) belongs to whatever implements [`HostRuntime`]: a browser's
//! animation API behind FFI, a scene renderer, or the in-memory host used by
//! this workspace's tests and demo.

use serde::{Deserialize, Serialize};

use crate::keyframes::KeyframeSequence;
use crate::style::StyleMap;
use crate::timing::TimingOptions;

/// Play state the host reports for a live animation.
///
/// The engine treats exactly one state, `Running`, as "this animation is in
/// flight". Everything else, including whatever host-specific condition an
/// implementation maps onto these variants, makes reconciliation fall back to
/// starting fresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayState {
    /// Created but not yet playing (e.g. waiting out a delay).
    Pending,
    /// Actively playing.
    Running,
    /// Paused by the host or its embedder.
    Paused,
    /// Reached natural completion.
    Finished,
    /// Cancelled before completion.
    Cancelled,
}

/// Where an animation attached to an element came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Started by this engine. Subject to reconciliation.
    Direct,
    /// Created by the host's declarative styling layer (style-sheet
    /// transitions and animations). Never cancelled or inspected further.
    Declarative,
}

/// The continuation registered with a started animation.
///
/// On natural completion, and only then, the host applies `styles` to
/// `element` through its style-application primitive. Cancellation must drop
/// the action unfired. Modeled as data rather than a closure so a host can
/// journal, inspect and replay completions deterministically.
#[derive(Debug, Clone, PartialEq)]
pub struct FinishAction<E> {
    /// The element to finalize.
    pub element: E,
    /// The styles that finalize the transition.
    pub styles: StyleMap,
}

/// The host animation runtime the engine orchestrates.
///
/// Contract the engine's correctness leans on:
/// - start times are non-decreasing in start order per element (the engine
///   breaks exact ties by enumeration order, later entry wins);
/// - [`cancel`](Self::cancel) never fires the finish action;
/// - the finish action fires at most once, on natural completion, as a
///   scheduled continuation, never synchronously inside
///   [`start`](Self::start);
/// - enumeration returns every animation still attached to the element,
///   whatever its provenance; the engine does its own filtering.
///
/// Queries on a handle the host has since discarded should return inert
/// values (`Cancelled`, `None`) rather than panic; the engine re-queries
/// rather than caching handles across calls.
pub trait HostRuntime {
    /// An addressable UI element. Cloned into finish actions, so keep it a
    /// cheap identifier.
    type Element: Clone;
    /// Opaque reference to one live animation.
    type Handle: Copy + PartialEq;

    /// Enumerate the animations currently attached to an element, oldest
    /// first.
    fn animations_of(&self, element: &Self::Element) -> Vec<Self::Handle>;

    /// Where the animation came from.
    fn provenance(&self, handle: Self::Handle) -> Provenance;

    /// Current play state.
    fn play_state(&self, handle: Self::Handle) -> PlayState;

    /// When the animation started, in host-timeline milliseconds. `None` for
    /// an animation that has no resolved start time yet.
    fn start_time(&self, handle: Self::Handle) -> Option<f64>;

    /// The identity tag set via [`set_tag`](Self::set_tag), if any.
    fn tag(&self, handle: Self::Handle) -> Option<String>;

    /// Start a native animation on an element.
    fn start(
        &mut self,
        element: &Self::Element,
        sequence: &KeyframeSequence,
        options: &TimingOptions,
    ) -> Self::Handle;

    /// Tag an animation with an identity string.
    fn set_tag(&mut self, handle: Self::Handle, tag: &str);

    /// Register the completion continuation, replacing any previous one.
    fn set_finish_action(&mut self, handle: Self::Handle, action: FinishAction<Self::Element>);

    /// Detach the completion continuation so it can never fire.
    fn clear_finish_action(&mut self, handle: Self::Handle);

    /// Freeze the animation's current computed styles onto the element's
    /// plain style state.
    fn commit_styles(&mut self, handle: Self::Handle);

    /// Cancel the animation, removing it from the element's active set
    /// without firing its finish action.
    fn cancel(&mut self, handle: Self::Handle);

    /// The style-application primitive: set each declared property on the
    /// element, leaving unmentioned properties untouched.
    fn apply_styles(&mut self, element: &Self::Element, styles: &StyleMap);
}
