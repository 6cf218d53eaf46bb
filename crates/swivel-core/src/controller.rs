//! The orchestration entry point for transition requests.
//!
//! [`Controller::animate`] turns one [`TransitionRequest`] into at most one
//! native animation per target element: it synthesizes or adopts the keyframe
//! sequence, merges timing options over the controller's defaults, derives
//! the request fingerprint, and walks the elements through lifecycle
//! reconciliation before starting anything. Re-issuing an identical in-flight
//! request (a re-render loop calling back into the engine) is a per-element
//! no-op.

use crate::fingerprint::fingerprint;
use crate::host::{FinishAction, HostRuntime};
use crate::keyframes::{KeyframeSequence, build_keyframes};
use crate::lifecycle::{Verdict, reconcile};
use crate::style::StyleMap;
use crate::timing::TimingOptions;

/// The caller's description of the visual state to reach.
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionTarget {
    /// Endpoint styles; the engine merges them with the request's initial
    /// styles into a two-point sequence.
    Styles(StyleMap),
    /// A ready-made multi-point sequence, used as-is.
    Sequence(KeyframeSequence),
}

impl TransitionTarget {
    /// True iff the caller supplied an explicit multi-point sequence: a
    /// [`Sequence`](Self::Sequence) with at least one sampled track. A
    /// sequence containing only fixed tracks carries endpoint semantics and
    /// goes through the same merge as plain styles.
    pub fn is_explicit_sequence(&self) -> bool {
        match self {
            Self::Styles(_) => false,
            Self::Sequence(sequence) => sequence.has_sampled_track(),
        }
    }

    /// The target viewed as endpoint styles, for the non-explicit path.
    fn endpoint_styles(&self) -> StyleMap {
        match self {
            Self::Styles(styles) => styles.clone(),
            Self::Sequence(sequence) => sequence.as_endpoint_styles(),
        }
    }
}

impl From<StyleMap> for TransitionTarget {
    fn from(styles: StyleMap) -> Self {
        Self::Styles(styles)
    }
}

impl From<KeyframeSequence> for TransitionTarget {
    fn from(sequence: KeyframeSequence) -> Self {
        Self::Sequence(sequence)
    }
}

/// One transition request, constructed per call and not retained.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionRequest {
    /// Styles the element starts from. For a built two-point transition they
    /// seed the sequence's first samples; for an explicit sequence they are
    /// applied directly before the animation starts, since the sequence's
    /// first keyframe need not equal the snapshot the caller wants visible at
    /// frame zero.
    pub initial: Option<StyleMap>,
    /// The state to reach.
    pub target: TransitionTarget,
    /// Per-request timing overrides, merged per key over the controller's
    /// defaults.
    pub options: Option<TimingOptions>,
}

impl TransitionRequest {
    /// Request a transition to the given target.
    pub fn to(target: impl Into<TransitionTarget>) -> Self {
        Self {
            initial: None,
            target: target.into(),
            options: None,
        }
    }

    /// Set the initial styles.
    pub fn from(mut self, initial: StyleMap) -> Self {
        self.initial = Some(initial);
        self
    }

    /// Set timing overrides.
    pub fn with_options(mut self, options: TimingOptions) -> Self {
        self.options = Some(options);
        self
    }
}

/// Handles produced by one [`Controller::animate`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimateOutcome<Handle> {
    /// The handle started on the last element processed, if any element
    /// needed a fresh start.
    pub primary: Option<Handle>,
    /// Every handle started this call, in element order. Elements whose
    /// request was already in flight contribute nothing.
    pub handles: Vec<Handle>,
}

impl<Handle> AnimateOutcome<Handle> {
    /// An outcome with nothing started.
    pub fn empty() -> Self {
        Self {
            primary: None,
            handles: Vec::new(),
        }
    }

    /// True when the call started nothing: the element set was empty or every
    /// element already ran the requested transition.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Number of animations started by the call.
    pub fn started_count(&self) -> usize {
        self.handles.len()
    }
}

/// Dispatches transition requests against a host runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct Controller {
    defaults: TimingOptions,
}

impl Controller {
    /// Create a controller with the given default timing options.
    pub fn new(defaults: TimingOptions) -> Self {
        Self { defaults }
    }

    /// Create a controller with the library's stock defaults.
    pub fn standard() -> Self {
        Self::new(TimingOptions::standard())
    }

    /// The defaults this controller merges requests over.
    pub fn defaults(&self) -> &TimingOptions {
        &self.defaults
    }

    /// Resolve a request's effective timing options.
    pub fn resolve_options(&self, overrides: Option<&TimingOptions>) -> TimingOptions {
        match overrides {
            Some(overrides) => TimingOptions::merge(&self.defaults, overrides),
            None => self.defaults.clone(),
        }
    }

    /// Run one transition request against every element in the set.
    ///
    /// Elements are processed in the collection's iteration order, each one
    /// synchronously: reconcile, then either skip (the identical request is
    /// already in flight) or start a tagged animation whose finish action
    /// applies the request's final styles. An empty element set yields an
    /// empty outcome; diagnosing that is the caller's registry layer's job.
    pub fn animate<H: HostRuntime>(
        &self,
        host: &mut H,
        elements: impl IntoIterator<Item = H::Element>,
        request: &TransitionRequest,
    ) -> AnimateOutcome<H::Handle> {
        let explicit = request.target.is_explicit_sequence();

        let sequence = match (explicit, &request.target) {
            (true, TransitionTarget::Sequence(sequence)) => sequence.clone(),
            _ => build_keyframes(request.initial.as_ref(), &request.target.endpoint_styles()),
        };

        let options = self.resolve_options(request.options.as_ref());
        let id = fingerprint(&sequence, &options);

        // The state the completion handler settles each element into: the
        // sequence's extracted tail for an explicit request, the exact target
        // styles for a built two-point transition.
        let final_styles = if explicit {
            sequence.final_styles()
        } else {
            request.target.endpoint_styles()
        };

        let mut outcome = AnimateOutcome::empty();

        for element in elements {
            if reconcile(host, &element, &id) == Verdict::Running {
                continue;
            }

            if explicit {
                if let Some(initial) = &request.initial {
                    host.apply_styles(&element, initial);
                }
            }

            let handle = host.start(&element, &sequence, &options);
            host.set_tag(handle, &id);
            host.set_finish_action(
                handle,
                FinishAction {
                    element: element.clone(),
                    styles: final_styles.clone(),
                },
            );

            outcome.primary = Some(handle);
            outcome.handles.push(handle);
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::PlayState;
    use crate::style::StyleValue;
    use crate::timing::EasingFunction;
    use swivel_headless::{HeadlessHost, HostOp};

    fn fade_request() -> TransitionRequest {
        TransitionRequest::to(StyleMap::new().set("opacity", 1.0))
            .from(StyleMap::new().set("opacity", 0.0))
            .with_options(TimingOptions::new().duration_ms(100.0))
    }

    #[test]
    fn test_animate_starts_one_animation_per_element() {
        let mut host = HeadlessHost::new();
        let controller = Controller::standard();
        let a = host.create_element("a");
        let b = host.create_element("b");

        let outcome = controller.animate(&mut host, [a.clone(), b.clone()], &fade_request());

        assert_eq!(outcome.started_count(), 2);
        assert_eq!(outcome.primary, outcome.handles.last().copied());
        assert_eq!(host.animations_of(&a).len(), 1);
        assert_eq!(host.animations_of(&b).len(), 1);
    }

    #[test]
    fn test_animate_is_idempotent_for_in_flight_requests() {
        let mut host = HeadlessHost::new();
        let controller = Controller::standard();
        let element = host.create_element("panel");
        let request = fade_request();

        let first = controller.animate(&mut host, [element.clone()], &request);
        assert_eq!(first.started_count(), 1);

        let second = controller.animate(&mut host, [element.clone()], &request);
        assert!(second.is_empty());
        assert_eq!(host.animations_of(&element).len(), 1);
    }

    #[test]
    fn test_animate_replaces_different_in_flight_request() {
        let mut host = HeadlessHost::new();
        let controller = Controller::standard();
        let element = host.create_element("panel");

        let first = controller.animate(&mut host, [element.clone()], &fade_request());
        let old = first.primary.expect("first animation started");

        host.advance(10.0);
        let request = TransitionRequest::to(StyleMap::new().set("opacity", 0.0))
            .with_options(TimingOptions::new().duration_ms(100.0));
        let second = controller.animate(&mut host, [element.clone()], &request);

        assert_eq!(second.started_count(), 1);
        assert_eq!(host.play_state(old), PlayState::Cancelled);
        assert!(
            host.journal()
                .contains(&HostOp::Committed { handle: old })
        );
    }

    #[test]
    fn test_built_sequence_and_merged_options_reach_the_host() {
        let mut host = HeadlessHost::new();
        let controller = Controller::standard();
        let element = host.create_element("panel");

        let outcome = controller.animate(&mut host, [element.clone()], &fade_request());
        let handle = outcome.primary.expect("animation started");

        let record = host.record(handle).expect("host keeps the start record");
        assert_eq!(
            record.sequence,
            KeyframeSequence::new().sampled("opacity", [0.0, 1.0])
        );
        // Request override wins for duration; defaults fill the rest.
        assert_eq!(record.options.duration_ms, Some(100.0));
        assert_eq!(record.options.easing, Some(EasingFunction::EaseOut));
    }

    #[test]
    fn test_explicit_sequence_applies_initial_styles_before_start() {
        let mut host = HeadlessHost::new();
        let controller = Controller::standard();
        let element = host.create_element("panel");

        let request = TransitionRequest::to(
            KeyframeSequence::new().sampled("opacity", [0.3, 0.7, 1.0]),
        )
        .from(StyleMap::new().set("opacity", 0.0));

        let outcome = controller.animate(&mut host, [element.clone()], &request);
        let handle = outcome.primary.expect("animation started");

        let applied = host
            .journal()
            .iter()
            .position(|op| {
                *op == HostOp::StylesApplied {
                    element: element.clone(),
                }
            })
            .expect("initial styles applied");
        let started = host
            .journal()
            .iter()
            .position(|op| *op == HostOp::Started { handle })
            .expect("animation started");
        assert!(applied < started, "initial styles precede the start");
    }

    #[test]
    fn test_built_transition_finalizes_to_exact_target() {
        let mut host = HeadlessHost::new();
        let controller = Controller::standard();
        let element = host.create_element("panel");

        controller.animate(&mut host, [element.clone()], &fade_request());
        host.advance(150.0);

        assert_eq!(
            host.styles_of(&element).get("opacity"),
            Some(&StyleValue::Number(1.0))
        );
    }

    #[test]
    fn test_explicit_sequence_finalizes_to_extracted_tail() {
        let mut host = HeadlessHost::new();
        let controller = Controller::standard();
        let element = host.create_element("panel");

        let request = TransitionRequest::to(
            KeyframeSequence::new()
                .sampled("opacity", [0.0, 0.4, 0.9])
                .fixed("easing", "ease-in"),
        )
        .with_options(TimingOptions::new().duration_ms(50.0));

        controller.animate(&mut host, [element.clone()], &request);
        host.advance(60.0);

        let styles = host.styles_of(&element);
        assert_eq!(styles.get("opacity"), Some(&StyleValue::Number(0.9)));
        // Meta keys never reach the element.
        assert_eq!(styles.get("easing"), None);
    }

    #[test]
    fn test_fixed_track_only_sequence_degrades_to_style_semantics() {
        let mut host = HeadlessHost::new();
        let controller = Controller::standard();
        let element = host.create_element("panel");

        let request = TransitionRequest::to(KeyframeSequence::new().fixed("opacity", 1.0))
            .from(StyleMap::new().set("opacity", 0.0));
        assert!(!request.target.is_explicit_sequence());

        let outcome = controller.animate(&mut host, [element.clone()], &request);
        let record = host
            .record(outcome.primary.expect("started"))
            .expect("record");
        // Merged like endpoint styles: the initial pass seeded the track.
        assert_eq!(
            record.sequence,
            KeyframeSequence::new().sampled("opacity", [0.0, 1.0])
        );
    }

    #[test]
    fn test_empty_element_set_is_a_silent_noop() {
        let mut host = HeadlessHost::new();
        let controller = Controller::standard();

        let outcome = controller.animate(&mut host, [], &fade_request());
        assert!(outcome.is_empty());
        assert_eq!(outcome.primary, None);
        assert!(host.journal().is_empty());
    }
}
