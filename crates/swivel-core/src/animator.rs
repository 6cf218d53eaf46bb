//! Name-addressed entry points over the controller.
//!
//! An [`Animator`] pairs an [`ElementBank`] with a [`Controller`] so callers
//! can speak in logical group names: register elements once, then `set`,
//! `to`, or `from_to` against the name. Requests against an unregistered or
//! emptied name warn and no-op; the core engine below this layer stays
//! silent and treats an empty element set as a clean no-op.

use std::hash::Hash;

use tracing::warn;

use crate::controller::{AnimateOutcome, Controller, TransitionRequest, TransitionTarget};
use crate::host::HostRuntime;
use crate::registry::ElementBank;
use crate::style::StyleMap;
use crate::timing::TimingOptions;

/// Facade dispatching style application and transitions to named groups.
#[derive(Debug, Clone)]
pub struct Animator<E> {
    bank: ElementBank<E>,
    controller: Controller,
}

impl<E: Clone + Eq + Hash> Animator<E> {
    /// Create an animator whose requests merge over the given defaults.
    pub fn new(defaults: TimingOptions) -> Self {
        Self {
            bank: ElementBank::new(),
            controller: Controller::new(defaults),
        }
    }

    /// Create an animator with the library's stock defaults.
    pub fn standard() -> Self {
        Self::new(TimingOptions::standard())
    }

    /// Register an element under a group name.
    pub fn register(&mut self, group: impl Into<String>, element: E) {
        self.bank.register(group, element);
    }

    /// Remove an element from a group.
    pub fn release(&mut self, group: &str, element: &E) {
        self.bank.release(group, element);
    }

    /// The underlying element bank.
    pub fn bank(&self) -> &ElementBank<E> {
        &self.bank
    }

    /// The underlying controller.
    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Apply styles directly to every element in a group, no animation.
    pub fn set<H>(&self, host: &mut H, group: &str, styles: &StyleMap)
    where
        H: HostRuntime<Element = E>,
    {
        let Some(elements) = self.group_elements(group) else {
            return;
        };
        for element in elements {
            host.apply_styles(&element, styles);
        }
    }

    /// Transition a group to a target state from wherever it is now.
    pub fn to<H>(
        &self,
        host: &mut H,
        group: &str,
        target: impl Into<TransitionTarget>,
        options: Option<TimingOptions>,
    ) -> AnimateOutcome<H::Handle>
    where
        H: HostRuntime<Element = E>,
    {
        let mut request = TransitionRequest::to(target);
        request.options = options;
        self.run(host, group, &request)
    }

    /// Transition a group from an initial state to a target state.
    pub fn from_to<H>(
        &self,
        host: &mut H,
        group: &str,
        initial: StyleMap,
        target: impl Into<TransitionTarget>,
        options: Option<TimingOptions>,
    ) -> AnimateOutcome<H::Handle>
    where
        H: HostRuntime<Element = E>,
    {
        let mut request = TransitionRequest::to(target).from(initial);
        request.options = options;
        self.run(host, group, &request)
    }

    /// Run a full transition request against a group.
    pub fn run<H>(
        &self,
        host: &mut H,
        group: &str,
        request: &TransitionRequest,
    ) -> AnimateOutcome<H::Handle>
    where
        H: HostRuntime<Element = E>,
    {
        let Some(elements) = self.group_elements(group) else {
            return AnimateOutcome::empty();
        };
        self.controller.animate(host, elements, request)
    }

    fn group_elements(&self, group: &str) -> Option<Vec<E>> {
        match self.bank.elements(group) {
            Some(elements) if !elements.is_empty() => Some(elements.iter().cloned().collect()),
            _ => {
                warn!(group, "no elements registered under this name; register the group before addressing it");
                None
            }
        }
    }
}
