//! Wi-Fi link state machine and association budget
//!
//! Association is driven on demand before each network action and is
//! strictly bounded: a join attempt may poll for link/DHCP status only
//! [`JOIN_MAX_POLLS`] times before giving up for this attempt. The next
//! periodic action retries naturally.

/// Maximum status polls per association attempt
pub const JOIN_MAX_POLLS: u16 = 100;

/// Delay between status polls in milliseconds
pub const JOIN_POLL_DELAY_MS: u64 = 200;

/// Why the link went down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DownReason {
    /// The access point rejected the join
    JoinRejected,
    /// The poll budget ran out before the stack came up
    BudgetExhausted,
    /// A previously-up link was lost
    Lost,
}

/// Link lifecycle events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkEvent {
    JoinStarted,
    JoinSucceeded,
    JoinFailed(DownReason),
    LinkLost,
}

/// Association state of the wireless interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkState {
    /// Never associated
    #[default]
    Idle,
    /// Join in progress
    Joining,
    /// Associated and configured
    Up,
    /// Last attempt failed
    Down(DownReason),
}

impl LinkState {
    pub fn is_up(&self) -> bool {
        matches!(self, LinkState::Up)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: LinkEvent) -> Self {
        use LinkEvent::*;
        use LinkState::*;

        match (self, event) {
            (Idle | Down(_), JoinStarted) => Joining,
            (Joining, JoinSucceeded) => Up,
            (Joining, JoinFailed(reason)) => Down(reason),
            (Up, LinkLost) => Down(DownReason::Lost),
            // Re-joining while already up is a no-op
            (Up, JoinStarted) => Up,
            (state, _) => state,
        }
    }
}

/// Countdown of status polls for one association attempt
#[derive(Debug)]
pub struct JoinBudget {
    polls_left: u16,
}

impl JoinBudget {
    pub const fn new() -> Self {
        Self {
            polls_left: JOIN_MAX_POLLS,
        }
    }

    /// Spend one poll; false once the budget is exhausted
    pub fn try_poll(&mut self) -> bool {
        if self.polls_left == 0 {
            false
        } else {
            self.polls_left -= 1;
            true
        }
    }

    pub fn exhausted(&self) -> bool {
        self.polls_left == 0
    }
}

impl Default for JoinBudget {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_lifecycle() {
        let state = LinkState::Idle;
        let state = state.transition(LinkEvent::JoinStarted);
        assert_eq!(state, LinkState::Joining);
        let state = state.transition(LinkEvent::JoinSucceeded);
        assert!(state.is_up());
        let state = state.transition(LinkEvent::LinkLost);
        assert_eq!(state, LinkState::Down(DownReason::Lost));
    }

    #[test]
    fn test_failed_join_can_retry() {
        let state = LinkState::Joining.transition(LinkEvent::JoinFailed(DownReason::JoinRejected));
        assert_eq!(state, LinkState::Down(DownReason::JoinRejected));
        assert_eq!(
            state.transition(LinkEvent::JoinStarted),
            LinkState::Joining
        );
    }

    #[test]
    fn test_rejoin_while_up_is_noop() {
        assert_eq!(LinkState::Up.transition(LinkEvent::JoinStarted), LinkState::Up);
    }

    #[test]
    fn test_budget_is_bounded() {
        let mut budget = JoinBudget::new();
        for _ in 0..JOIN_MAX_POLLS {
            assert!(budget.try_poll());
        }
        assert!(!budget.try_poll());
        assert!(budget.exhausted());
    }
}
