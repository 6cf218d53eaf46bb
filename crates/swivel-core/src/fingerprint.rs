//! Transition fingerprints.
//!
//! A fingerprint is the identity string tagged onto every animation this
//! engine starts. Reconciliation compares the tag on a live animation against
//! the fingerprint of an incoming request to decide whether the request is
//! already in flight. Equality comparison only, nothing cryptographic.

use serde::Serialize;

use crate::keyframes::KeyframeSequence;
use crate::timing::TimingOptions;

/// Derive the identity string for a (sequence, options) pair.
///
/// Canonical structural serialization of both arguments, concatenated.
/// Structurally identical inputs (including key order) always produce the
/// same string; any value difference produces a different one. Reordering
/// properties is not normalized away: callers that build sequences the same
/// way each time naturally get stable key order, which is the case the
/// equality check serves.
pub fn fingerprint(sequence: &KeyframeSequence, options: &TimingOptions) -> String {
    let mut id = canonical(sequence);
    id.push_str(&canonical(options));
    id
}

fn canonical<T: Serialize>(value: &T) -> String {
    // Total over the engine's types: string keys throughout, and non-finite
    // floats serialize as null rather than erroring.
    serde_json::to_string(value).unwrap_or_default()
}
