//! Application state for the lab scene
//!
//! The only asynchronous step of the app is loading the lab asset, so the
//! state machine is small:
//!
//! ```text
//! [Loading] → [Ready]
//!     ↓
//! [Unavailable]
//! ```
//!
//! Pour input and contents rebuilding only run in `Ready`. `Unavailable` keeps
//! the static scene (floor, lights, panel) alive without containers.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

/// Primary lab state
#[derive(Clone, Copy, Resource, PartialEq, Eq, Hash, Debug, Default, States, Reflect)]
pub enum LabState {
    /// The glTF asset is being loaded
    #[default]
    Loading,

    /// Flask and tube were found and classified
    Ready,

    /// The asset failed to load or lacked both containers
    Unavailable,
}

/// Whether a transition follows the loading state machine
pub fn is_valid_state_transition(from: LabState, to: LabState) -> bool {
    match (from, to) {
        (LabState::Loading, LabState::Ready) => true,
        (LabState::Loading, LabState::Unavailable) => true,
        (from, to) if from == to => true,
        _ => false,
    }
}

/// System to validate and log state transitions
pub fn validate_and_log_state_transitions(
    mut transition_events: MessageReader<StateTransitionEvent<LabState>>,
) {
    for event in transition_events.read() {
        match (event.exited, event.entered) {
            (Some(exited), Some(entered)) => {
                if is_valid_state_transition(exited, entered) {
                    info!("[TRANSITION] {:?} -> {:?}", exited, entered);
                } else {
                    error!(
                        "[TRANSITION] INVALID: {:?} -> {:?} (state may be inconsistent)",
                        exited, entered
                    );
                }
            }
            (None, Some(entered)) => {
                debug!("[TRANSITION] Enter: {:?}", entered);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lab_state_default() {
        assert_eq!(LabState::default(), LabState::Loading);
    }

    #[test]
    fn test_loading_transitions() {
        assert!(is_valid_state_transition(LabState::Loading, LabState::Ready));
        assert!(is_valid_state_transition(LabState::Loading, LabState::Unavailable));
        assert!(is_valid_state_transition(LabState::Ready, LabState::Ready));
    }

    #[test]
    fn test_no_way_back_to_loading() {
        assert!(!is_valid_state_transition(LabState::Ready, LabState::Loading));
        assert!(!is_valid_state_transition(LabState::Unavailable, LabState::Ready));
    }
}
