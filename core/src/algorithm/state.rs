//! Execution state of the augmenting-path framework
//!
//! The framework moves through `Searching -> Augmenting -> Searching -> ...`
//! until a search exhausts the residual graph, at which point it is
//! `Saturated` and no further transition exists. Transitions are checked so
//! that a driver bug shows up as an error instead of a silently wrong flow.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{Capacity, FlowError, NodeId};

/// Phase of one max-flow computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlowPhase {
    /// Looking for an augmenting path in the residual graph
    Searching,
    /// Pushing the bottleneck along a found path
    Augmenting,
    /// No augmenting path remains (terminal)
    Saturated,
}

impl FlowPhase {
    /// Whether `self -> next` is a legal transition
    pub fn can_transition_to(self, next: FlowPhase) -> bool {
        matches!(
            (self, next),
            (FlowPhase::Searching, FlowPhase::Augmenting)
                | (FlowPhase::Searching, FlowPhase::Saturated)
                | (FlowPhase::Augmenting, FlowPhase::Searching)
        )
    }

    pub fn is_terminal(self) -> bool {
        self == FlowPhase::Saturated
    }
}

impl fmt::Display for FlowPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FlowPhase::Searching => "searching",
            FlowPhase::Augmenting => "augmenting",
            FlowPhase::Saturated => "saturated",
        };
        f.write_str(name)
    }
}

/// One augmentation: the vertices visited from source to sink and the amount pushed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowPath {
    /// Path vertices
    pub path: Vec<NodeId>,
    /// Flow amount along path
    pub flow: Capacity,
}

/// Mutable bookkeeping for one run of the framework
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowState {
    phase: FlowPhase,
    augmentations: usize,
    pushed: Capacity,
    trace: Option<Vec<FlowPath>>,
}

impl FlowState {
    /// Fresh state in `Searching`; `record_trace` keeps every augmenting path
    pub fn new(record_trace: bool) -> Self {
        Self {
            phase: FlowPhase::Searching,
            augmentations: 0,
            pushed: 0,
            trace: record_trace.then(Vec::new),
        }
    }

    pub fn phase(&self) -> FlowPhase {
        self.phase
    }

    /// Number of completed augmentations
    pub fn augmentations(&self) -> usize {
        self.augmentations
    }

    /// Sum of all bottlenecks pushed so far
    pub fn pushed(&self) -> Capacity {
        self.pushed
    }

    pub fn transition(&mut self, next: FlowPhase) -> Result<(), FlowError> {
        if !self.phase.can_transition_to(next) {
            return Err(FlowError::InvariantViolation(format!(
                "illegal phase transition {} -> {}",
                self.phase, next
            )));
        }
        self.phase = next;
        Ok(())
    }

    /// Records a finished augmentation; `path` is only evaluated when tracing
    pub fn record_augmentation<F>(&mut self, bottleneck: Capacity, path: F) -> Result<(), FlowError>
    where
        F: FnOnce() -> Result<Vec<NodeId>, FlowError>,
    {
        self.augmentations += 1;
        self.pushed += bottleneck;
        if let Some(trace) = self.trace.as_mut() {
            trace.push(FlowPath { path: path()?, flow: bottleneck });
        }
        Ok(())
    }

    /// Augmentations recorded so far (empty when tracing is off)
    pub fn trace(&self) -> &[FlowPath] {
        self.trace.as_deref().unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legal_cycle() {
        let mut state = FlowState::new(false);
        assert_eq!(state.phase(), FlowPhase::Searching);

        state.transition(FlowPhase::Augmenting).unwrap();
        state.transition(FlowPhase::Searching).unwrap();
        state.transition(FlowPhase::Saturated).unwrap();
        assert!(state.phase().is_terminal());
    }

    #[test]
    fn test_saturated_is_terminal() {
        let mut state = FlowState::new(false);
        state.transition(FlowPhase::Saturated).unwrap();

        assert!(state.transition(FlowPhase::Searching).is_err());
        assert!(state.transition(FlowPhase::Augmenting).is_err());
    }

    #[test]
    fn test_cannot_skip_search() {
        let mut state = FlowState::new(false);
        state.transition(FlowPhase::Augmenting).unwrap();
        assert!(matches!(
            state.transition(FlowPhase::Saturated),
            Err(FlowError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_trace_only_when_enabled() {
        let mut quiet = FlowState::new(false);
        quiet.record_augmentation(3, || unreachable!("path built without tracing")).unwrap();
        assert_eq!(quiet.augmentations(), 1);
        assert_eq!(quiet.pushed(), 3);
        assert!(quiet.trace().is_empty());

        let mut traced = FlowState::new(true);
        traced.record_augmentation(2, || Ok(vec![NodeId(0), NodeId(1)])).unwrap();
        traced.record_augmentation(1, || Ok(vec![NodeId(0), NodeId(2), NodeId(1)])).unwrap();
        assert_eq!(traced.pushed(), 3);
        let trace = traced.trace();
        assert_eq!(trace.len(), 2);
        assert_eq!(trace[0].path, vec![NodeId(0), NodeId(1)]);
        assert_eq!(trace[1].flow, 1);
    }
}
