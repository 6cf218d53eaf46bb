//! Per-element animation lifecycle reconciliation.
//!
//! An element accumulates native animation instances across rapid repeated
//! requests faster than the host retires finished ones. Reconciliation looks
//! at what is actually attached right now and produces a verdict: the
//! requested transition is already in flight (skip it), or the element is
//! ready for a fresh start (after the stale instances have been committed and
//! cancelled). The engine keeps no index of its own; the host's enumeration
//! is the single source of truth, re-queried on every request.

use crate::host::{HostRuntime, PlayState, Provenance};

/// Reconciliation verdict for one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The requested transition is already running on this element; the
    /// caller must not start another.
    Running,
    /// The element is clear for a new animation; prior direct instances have
    /// been committed and cancelled.
    Ready,
}

/// Decide whether an element's current animations satisfy a request.
///
/// Only animations this engine started ([`Provenance::Direct`]) are
/// candidates; declarative style-sheet animations belong to the styling layer
/// and are never touched. Among the candidates, the most recently started one
/// speaks for the element:
///
/// - If it is running and tagged with the requested fingerprint, the request
///   is already satisfied. Every *other* candidate gets its finish action
///   detached (superseded instances must not commit stale final styles when
///   they eventually complete) and the verdict is [`Verdict::Running`].
/// - Otherwise every candidate is committed and then cancelled, in that
///   order per instance: committing first freezes the in-progress frame as
///   plain styles, so removing the animation causes no visible snap-back.
///   The verdict is [`Verdict::Ready`].
///
/// A play state other than [`PlayState::Running`] on the most recent
/// candidate (paused, finished, or any host-specific condition) falls
/// through to the commit-and-cancel path; starting fresh is always the safe
/// answer to host-state oddities.
pub fn reconcile<H: HostRuntime>(host: &mut H, element: &H::Element, fingerprint: &str) -> Verdict {
    let direct: Vec<H::Handle> = host
        .animations_of(element)
        .into_iter()
        .filter(|&handle| host.provenance(handle) == Provenance::Direct)
        .collect();

    let Some(latest) = most_recent(host, &direct) else {
        return Verdict::Ready;
    };

    let satisfied = host.play_state(latest) == PlayState::Running
        && host.tag(latest).as_deref() == Some(fingerprint);

    if satisfied {
        for &handle in &direct {
            if handle != latest {
                host.clear_finish_action(handle);
            }
        }
        return Verdict::Running;
    }

    for &handle in &direct {
        host.commit_styles(handle);
        host.cancel(handle);
    }
    Verdict::Ready
}

/// The candidate with the greatest start time. Ties are broken by enumeration
/// order with the later entry winning: enumeration is oldest-first, so the
/// later entry is the newer instance. A missing start time sorts earliest.
fn most_recent<H: HostRuntime>(host: &H, handles: &[H::Handle]) -> Option<H::Handle> {
    let mut latest: Option<(f64, H::Handle)> = None;
    for &handle in handles {
        let started = host.start_time(handle).unwrap_or(f64::NEG_INFINITY);
        match latest {
            Some((best, _)) if started < best => {}
            _ => latest = Some((started, handle)),
        }
    }
    latest.map(|(_, handle)| handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingerprint::fingerprint;
    use crate::host::FinishAction;
    use crate::keyframes::KeyframeSequence;
    use crate::style::{StyleMap, StyleValue};
    use crate::timing::TimingOptions;
    use swivel_headless::{HeadlessHost, HostOp};

    fn fade() -> (KeyframeSequence, TimingOptions, String) {
        let sequence = KeyframeSequence::new().sampled("opacity", [0.0, 1.0]);
        let options = TimingOptions::standard().duration_ms(100.0);
        let id = fingerprint(&sequence, &options);
        (sequence, options, id)
    }

    #[test]
    fn test_element_without_animations_is_ready() {
        let mut host = HeadlessHost::new();
        let element = host.create_element("panel");
        assert_eq!(reconcile(&mut host, &element, "anything"), Verdict::Ready);
        assert!(host.journal().is_empty());
    }

    #[test]
    fn test_matching_running_animation_reports_running() {
        let mut host = HeadlessHost::new();
        let element = host.create_element("panel");
        let (sequence, options, id) = fade();

        let handle = host.start(&element, &sequence, &options);
        host.set_tag(handle, &id);

        assert_eq!(reconcile(&mut host, &element, &id), Verdict::Running);
        // The in-flight animation is left alone.
        assert_eq!(host.play_state(handle), PlayState::Running);
    }

    #[test]
    fn test_running_verdict_silences_superseded_finish_actions() {
        let mut host = HeadlessHost::new();
        let element = host.create_element("panel");
        let (sequence, options, id) = fade();

        let stale = host.start(&element, &sequence, &options);
        host.set_tag(stale, "stale-request");
        host.set_finish_action(
            stale,
            FinishAction {
                element: element.clone(),
                styles: StyleMap::new().set("opacity", 0.25),
            },
        );

        host.advance(10.0);
        let current = host.start(&element, &sequence, &options);
        host.set_tag(current, &id);

        assert_eq!(reconcile(&mut host, &element, &id), Verdict::Running);

        // The stale instance still runs to completion, but its detached
        // finish action must not mutate styles anymore.
        host.advance(200.0);
        assert_eq!(host.styles_of(&element).get("opacity"), None);
    }

    #[test]
    fn test_mismatched_fingerprint_commits_then_cancels_everything() {
        let mut host = HeadlessHost::new();
        let element = host.create_element("panel");
        let (sequence, options, _) = fade();

        let a = host.start(&element, &sequence, &options);
        host.set_tag(a, "old-request");
        host.advance(10.0);
        let b = host.start(&element, &sequence, &options);
        host.set_tag(b, "old-request");

        assert_eq!(reconcile(&mut host, &element, "new-request"), Verdict::Ready);

        for handle in [a, b] {
            assert_eq!(host.play_state(handle), PlayState::Cancelled);
            let committed = host
                .journal()
                .iter()
                .position(|op| *op == HostOp::Committed { handle })
                .expect("styles committed");
            let cancelled = host
                .journal()
                .iter()
                .position(|op| *op == HostOp::Cancelled { handle })
                .expect("animation cancelled");
            assert!(committed < cancelled, "commit must precede cancel");
        }
        assert!(host.animations_of(&element).is_empty());
    }

    #[test]
    fn test_commit_freezes_in_progress_styles() {
        let mut host = HeadlessHost::new();
        let element = host.create_element("panel");
        let sequence = KeyframeSequence::new().sampled("opacity", [0.0, 1.0]);
        let options = TimingOptions::new()
            .duration_ms(100.0)
            .easing(crate::timing::EasingFunction::Linear);
        let handle = host.start(&element, &sequence, &options);
        host.set_tag(handle, "fade");

        host.advance(50.0);
        assert_eq!(reconcile(&mut host, &element, "other"), Verdict::Ready);

        let frozen = host
            .styles_of(&element)
            .get("opacity")
            .and_then(StyleValue::as_number)
            .expect("opacity frozen by commit");
        assert!((frozen - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_non_running_latest_falls_through_to_ready() {
        let mut host = HeadlessHost::new();
        let element = host.create_element("panel");
        let (sequence, options, id) = fade();

        let handle = host.start(&element, &sequence, &options);
        host.set_tag(handle, &id);
        host.pause(handle);

        // Same fingerprint, but not running: safe default is a fresh start.
        assert_eq!(reconcile(&mut host, &element, &id), Verdict::Ready);
        assert_eq!(host.play_state(handle), PlayState::Cancelled);
    }

    #[test]
    fn test_declarative_animations_are_never_touched() {
        let mut host = HeadlessHost::new();
        let element = host.create_element("panel");
        let (sequence, options, _) = fade();

        let declarative = host.start_declarative(&element, &sequence, &options);

        assert_eq!(reconcile(&mut host, &element, "request"), Verdict::Ready);
        assert_eq!(host.play_state(declarative), PlayState::Running);
        assert_eq!(host.animations_of(&element), vec![declarative]);
    }

    #[test]
    fn test_equal_start_times_prefer_later_enumeration() {
        let mut host = HeadlessHost::new();
        let element = host.create_element("panel");
        let (sequence, options, id) = fade();

        // Started within the same clock instant: identical start times.
        let first = host.start(&element, &sequence, &options);
        host.set_tag(first, "earlier");
        let second = host.start(&element, &sequence, &options);
        host.set_tag(second, &id);

        // The later entry wins the tie, so the request reads as in flight and
        // the earlier instance is merely silenced, not cancelled.
        assert_eq!(reconcile(&mut host, &element, &id), Verdict::Running);
        assert_eq!(host.play_state(first), PlayState::Running);
    }
}
