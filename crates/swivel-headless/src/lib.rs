//! A deterministic in-memory host runtime.
//!
//! [`HeadlessHost`] implements [`HostRuntime`] without a browser, a window or
//! a real clock: elements are plain identifiers with an applied style map,
//! time only moves when [`advance`](HeadlessHost::advance) is called, and
//! every externally visible operation lands in an inspectable [`HostOp`]
//! journal. That makes it the reference host for the engine's tests (journal
//! order proves commit-before-cancel, manual ticks deliver finish actions on
//! demand) and a serviceable backend for headless embedders.
//!
//! Playback math the engine itself must not contain (easing evaluation,
//! track sampling for committed styles) lives in [`sampling`].

pub mod sampling;

use std::fmt;

use indexmap::IndexMap;

use swivel_core::host::{FinishAction, HostRuntime, PlayState, Provenance};
use swivel_core::keyframes::{KeyframeSequence, is_meta_key};
use swivel_core::style::StyleMap;
use swivel_core::timing::{EasingFunction, TimingOptions};

use crate::sampling::{eased_progress, sample_track};

/// Identifier of a host element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementId(String);

impl ElementId {
    /// The element's name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque reference to one animation instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandleId(u64);

/// What an animation was started with, kept for inspection.
#[derive(Debug, Clone, PartialEq)]
pub struct StartRecord {
    /// The element the animation is attached to.
    pub element: ElementId,
    /// The keyframe sequence driving it.
    pub sequence: KeyframeSequence,
    /// The timing options it plays with.
    pub options: TimingOptions,
}

/// One externally visible host operation, in execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostOp {
    /// An animation was started.
    Started { handle: HandleId },
    /// An animation's current computed styles were frozen onto its element.
    Committed { handle: HandleId },
    /// An animation was cancelled.
    Cancelled { handle: HandleId },
    /// An animation reached natural completion.
    Finished { handle: HandleId },
    /// A style map was applied to an element.
    StylesApplied { element: ElementId },
}

#[derive(Debug, Clone)]
struct HostAnimation {
    record: StartRecord,
    provenance: Provenance,
    tag: Option<String>,
    state: PlayState,
    started_at_ms: f64,
    finish_action: Option<FinishAction<ElementId>>,
}

impl HostAnimation {
    fn duration_ms(&self) -> f64 {
        self.record.options.duration_ms.unwrap_or(0.0)
    }

    fn delay_ms(&self) -> f64 {
        self.record.options.delay_ms.unwrap_or(0.0)
    }

    fn easing(&self) -> EasingFunction {
        self.record.options.easing.unwrap_or(EasingFunction::Linear)
    }

    /// Eased progress at the given clock, clamped to [0, 1].
    fn progress_at(&self, clock_ms: f64) -> f32 {
        let active = clock_ms - self.started_at_ms - self.delay_ms();
        let duration = self.duration_ms();
        let linear = if duration > 0.0 {
            (active / duration).clamp(0.0, 1.0) as f32
        } else {
            1.0
        };
        eased_progress(self.easing(), linear)
    }

    fn is_due(&self, clock_ms: f64) -> bool {
        clock_ms - self.started_at_ms >= self.delay_ms() + self.duration_ms()
    }
}

/// In-memory [`HostRuntime`] with a manual clock and an operation journal.
#[derive(Debug, Clone, Default)]
pub struct HeadlessHost {
    clock_ms: f64,
    elements: IndexMap<ElementId, StyleMap>,
    animations: IndexMap<HandleId, HostAnimation>,
    journal: Vec<HostOp>,
    next_handle: u64,
    empty_styles: StyleMap,
}

impl HeadlessHost {
    /// Create a host with an empty scene and the clock at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create (or look up) an element by name.
    pub fn create_element(&mut self, name: &str) -> ElementId {
        let id = ElementId(name.to_string());
        self.elements.entry(id.clone()).or_default();
        id
    }

    /// The styles currently applied to an element.
    pub fn styles_of(&self, element: &ElementId) -> &StyleMap {
        self.elements.get(element).unwrap_or(&self.empty_styles)
    }

    /// The host clock in milliseconds.
    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    /// The journal of host operations since creation.
    pub fn journal(&self) -> &[HostOp] {
        &self.journal
    }

    /// What an animation was started with, if the handle is still known.
    pub fn record(&self, handle: HandleId) -> Option<&StartRecord> {
        self.animations.get(&handle).map(|a| &a.record)
    }

    /// Pause a running animation.
    pub fn pause(&mut self, handle: HandleId) {
        if let Some(animation) = self.animations.get_mut(&handle) {
            if matches!(animation.state, PlayState::Running | PlayState::Pending) {
                animation.state = PlayState::Paused;
            }
        }
    }

    /// Attach a declarative-layer animation, as a style-sheet transition
    /// would. The engine must never touch these.
    pub fn start_declarative(
        &mut self,
        element: &ElementId,
        sequence: &KeyframeSequence,
        options: &TimingOptions,
    ) -> HandleId {
        self.attach(element, sequence, options, Provenance::Declarative)
    }

    /// Move the clock forward, finishing every animation whose delay and
    /// duration have fully elapsed and delivering its finish action.
    pub fn advance(&mut self, delta_ms: f64) {
        self.clock_ms += delta_ms;
        let clock = self.clock_ms;

        let mut due: Vec<HandleId> = Vec::new();
        for (handle, animation) in &mut self.animations {
            match animation.state {
                PlayState::Pending if clock - animation.started_at_ms >= animation.delay_ms() => {
                    animation.state = PlayState::Running;
                    if animation.is_due(clock) {
                        due.push(*handle);
                    }
                }
                PlayState::Running if animation.is_due(clock) => due.push(*handle),
                _ => {}
            }
        }

        for handle in due {
            let action = self.animations.get_mut(&handle).and_then(|animation| {
                animation.state = PlayState::Finished;
                animation.finish_action.take()
            });
            self.journal.push(HostOp::Finished { handle });
            if let Some(action) = action {
                self.apply_styles(&action.element, &action.styles);
            }
        }
    }

    fn attach(
        &mut self,
        element: &ElementId,
        sequence: &KeyframeSequence,
        options: &TimingOptions,
        provenance: Provenance,
    ) -> HandleId {
        self.next_handle += 1;
        let handle = HandleId(self.next_handle);

        let delay = options.delay_ms.unwrap_or(0.0);
        let animation = HostAnimation {
            record: StartRecord {
                element: element.clone(),
                sequence: sequence.clone(),
                options: options.clone(),
            },
            provenance,
            tag: None,
            state: if delay > 0.0 {
                PlayState::Pending
            } else {
                PlayState::Running
            },
            started_at_ms: self.clock_ms,
            finish_action: None,
        };

        self.animations.insert(handle, animation);
        self.journal.push(HostOp::Started { handle });
        handle
    }
}

impl HostRuntime for HeadlessHost {
    type Element = ElementId;
    type Handle = HandleId;

    fn animations_of(&self, element: &ElementId) -> Vec<HandleId> {
        self.animations
            .iter()
            .filter(|(_, animation)| {
                animation.record.element == *element && animation.state != PlayState::Cancelled
            })
            .map(|(handle, _)| *handle)
            .collect()
    }

    fn provenance(&self, handle: HandleId) -> Provenance {
        self.animations
            .get(&handle)
            .map(|a| a.provenance)
            .unwrap_or(Provenance::Declarative)
    }

    fn play_state(&self, handle: HandleId) -> PlayState {
        self.animations
            .get(&handle)
            .map(|a| a.state)
            .unwrap_or(PlayState::Cancelled)
    }

    fn start_time(&self, handle: HandleId) -> Option<f64> {
        self.animations.get(&handle).map(|a| a.started_at_ms)
    }

    fn tag(&self, handle: HandleId) -> Option<String> {
        self.animations.get(&handle).and_then(|a| a.tag.clone())
    }

    fn start(
        &mut self,
        element: &ElementId,
        sequence: &KeyframeSequence,
        options: &TimingOptions,
    ) -> HandleId {
        self.attach(element, sequence, options, Provenance::Direct)
    }

    fn set_tag(&mut self, handle: HandleId, tag: &str) {
        if let Some(animation) = self.animations.get_mut(&handle) {
            animation.tag = Some(tag.to_string());
        }
    }

    fn set_finish_action(&mut self, handle: HandleId, action: FinishAction<ElementId>) {
        if let Some(animation) = self.animations.get_mut(&handle) {
            animation.finish_action = Some(action);
        }
    }

    fn clear_finish_action(&mut self, handle: HandleId) {
        if let Some(animation) = self.animations.get_mut(&handle) {
            animation.finish_action = None;
        }
    }

    fn commit_styles(&mut self, handle: HandleId) {
        let Some(animation) = self.animations.get(&handle) else {
            return;
        };

        let progress = animation.progress_at(self.clock_ms);
        let element = animation.record.element.clone();
        let mut frozen = StyleMap::new();
        for (property, track) in animation.record.sequence.iter() {
            if is_meta_key(property) {
                continue;
            }
            if let Some(value) = sample_track(track, progress) {
                frozen.insert(property, value);
            }
        }

        if let Some(styles) = self.elements.get_mut(&element) {
            for (property, value) in frozen.iter() {
                styles.insert(property, value.clone());
            }
        }
        self.journal.push(HostOp::Committed { handle });
    }

    fn cancel(&mut self, handle: HandleId) {
        if let Some(animation) = self.animations.get_mut(&handle) {
            animation.state = PlayState::Cancelled;
            animation.finish_action = None;
            self.journal.push(HostOp::Cancelled { handle });
        }
    }

    fn apply_styles(&mut self, element: &ElementId, styles: &StyleMap) {
        if let Some(applied) = self.elements.get_mut(element) {
            for (property, value) in styles.iter() {
                applied.insert(property, value.clone());
            }
        }
        self.journal.push(HostOp::StylesApplied {
            element: element.clone(),
        });
    }
}
