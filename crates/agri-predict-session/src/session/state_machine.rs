/*
[INPUT]:  SessionStatus and SessionAction enums
[OUTPUT]: Validated state transitions for a task session
[POS]:    Session domain logic - submission lifecycle
[UPDATE]: When session states or transitions change
*/

use thiserror::Error;

/// Lifecycle of one task session.
///
/// Transitions:
/// - Idle/Succeeded/Failed -> Submitting (on submit)
/// - Submitting -> Succeeded (on resolve) or Failed (on reject)
/// - Idle/Succeeded/Failed -> Idle (on reset)
///
/// There is no cancelled state; a submission only ends with a response or
/// with the session being dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Actions that can trigger session state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    Submit,
    Resolve,
    Reject,
    Reset,
}

/// Errors occurring during state transitions
#[derive(Debug, Clone, Error)]
pub enum StateError {
    #[error("Invalid transition: {from:?} -> {action:?}")]
    InvalidTransition {
        from: SessionStatus,
        action: SessionAction,
    },
}

/// State machine managing session lifecycle transitions
#[derive(Debug)]
pub struct SessionStateMachine {
    current_state: SessionStatus,
}

impl Default for SessionStateMachine {
    fn default() -> Self {
        Self::new(SessionStatus::Idle)
    }
}

impl SessionStateMachine {
    pub fn new(initial: SessionStatus) -> Self {
        Self {
            current_state: initial,
        }
    }

    /// Target state for an action, if the action is allowed
    fn next_state(&self, action: SessionAction) -> Option<SessionStatus> {
        use SessionStatus::*;
        match (self.current_state, action) {
            (Idle | Succeeded | Failed, SessionAction::Submit) => Some(Submitting),
            (Submitting, SessionAction::Resolve) => Some(Succeeded),
            (Submitting, SessionAction::Reject) => Some(Failed),
            (Idle | Succeeded | Failed, SessionAction::Reset) => Some(Idle),
            _ => None,
        }
    }

    pub fn can_transition(&self, action: SessionAction) -> bool {
        self.next_state(action).is_some()
    }

    pub fn transition(&mut self, action: SessionAction) -> Result<SessionStatus, StateError> {
        let next = self
            .next_state(action)
            .ok_or(StateError::InvalidTransition {
                from: self.current_state,
                action,
            })?;
        self.current_state = next;
        Ok(next)
    }

    pub fn state(&self) -> SessionStatus {
        self.current_state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let machine = SessionStateMachine::default();
        assert_eq!(machine.state(), SessionStatus::Idle);
    }

    #[test]
    fn test_valid_transitions() {
        let mut machine = SessionStateMachine::default();
        assert!(machine.transition(SessionAction::Submit).is_ok());
        assert_eq!(machine.state(), SessionStatus::Submitting);

        assert!(machine.transition(SessionAction::Resolve).is_ok());
        assert_eq!(machine.state(), SessionStatus::Succeeded);

        assert!(machine.transition(SessionAction::Submit).is_ok());
        assert!(machine.transition(SessionAction::Reject).is_ok());
        assert_eq!(machine.state(), SessionStatus::Failed);

        assert!(machine.transition(SessionAction::Submit).is_ok());
        assert_eq!(machine.state(), SessionStatus::Submitting);
    }

    #[test]
    fn test_submitting_only_exits_on_response() {
        let mut machine = SessionStateMachine::new(SessionStatus::Submitting);
        assert!(!machine.can_transition(SessionAction::Submit));
        assert!(!machine.can_transition(SessionAction::Reset));

        let result = machine.transition(SessionAction::Submit);
        if let Err(StateError::InvalidTransition { from, action }) = result {
            assert_eq!(from, SessionStatus::Submitting);
            assert_eq!(action, SessionAction::Submit);
        } else {
            panic!("double submit must be rejected");
        }
        assert_eq!(machine.state(), SessionStatus::Submitting);
    }

    #[test]
    fn test_reset_from_settled_states() {
        for initial in [SessionStatus::Idle, SessionStatus::Succeeded, SessionStatus::Failed] {
            let mut machine = SessionStateMachine::new(initial);
            assert!(machine.transition(SessionAction::Reset).is_ok());
            assert_eq!(machine.state(), SessionStatus::Idle);
        }
    }

    #[test]
    fn test_responses_rejected_outside_submitting() {
        let mut machine = SessionStateMachine::new(SessionStatus::Succeeded);
        assert!(machine.transition(SessionAction::Resolve).is_err());
        assert!(machine.transition(SessionAction::Reject).is_err());
    }
}
