//! Declarative from/to transitions over a host animation runtime.
//!
//! This crate provides:
//! - **Keyframe synthesis**: sparse `from`/`to` style maps merged into one
//!   canonical per-property sequence
//! - **Fingerprinting**: a stable identity string per (sequence, timing)
//!   pair, used to recognize a transition already in flight
//! - **Lifecycle reconciliation**: per-element commit/cancel of stale
//!   animations and silencing of superseded completion handlers
//! - **A controller and name-addressed facade** dispatching requests against
//!   any [`HostRuntime`] implementation
//!
//! # Architecture
//!
//! ```text
//! Animator (named groups)
//!   └── Controller.animate(elements, request)
//!         ├── build_keyframes / explicit sequence
//!         ├── fingerprint(sequence, merged options)
//!         └── per element: reconcile → skip | commit+cancel → start
//!                                                  └── finish action → final styles
//! ```
//!
//! The engine plays nothing itself: interpolation, easing and scheduling are
//! owned by the host behind the [`HostRuntime`] trait, and `animate` returns
//! as soon as the start calls are issued. Because every request re-derives
//! element state from the host's own animation enumeration, the engine can be
//! invoked repeatedly (every re-render, if need be) and stays idempotent
//! per element.

pub mod animator;
pub mod controller;
pub mod fingerprint;
pub mod host;
pub mod keyframes;
pub mod lifecycle;
pub mod registry;
pub mod style;
pub mod timing;

pub use animator::Animator;
pub use controller::{AnimateOutcome, Controller, TransitionRequest, TransitionTarget};
pub use fingerprint::fingerprint;
pub use host::{FinishAction, HostRuntime, PlayState, Provenance};
pub use keyframes::{KeyframeSequence, PropertyTrack, build_keyframes, is_meta_key};
pub use lifecycle::{Verdict, reconcile};
pub use registry::ElementBank;
pub use style::{StyleMap, StyleValue};
pub use timing::{
    EasingFunction, FillMode, IterationCount, PlaybackDirection, TimingOptions,
};
