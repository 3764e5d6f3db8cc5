/// Discovery state definitions for the scroll-and-count loop
///
/// The loop's termination logic lives entirely in [`DiscoveryState::advance`],
/// a pure function, so it can be exercised without a browser.
use std::fmt;

/// Represents where the discovery loop stands after an iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscoveryState {
    // ===== Active States =====
    /// More listings may still load; keep scrolling
    Scanning,

    // ===== Terminal States =====
    /// Scrolling stopped producing new listings before the target was reached
    Plateaued,

    /// At least the requested number of listings is rendered
    Satisfied,

    /// The shared retry budget ran out
    RetryExhausted,
}

/// What one loop iteration saw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// The iteration finished and this many listing anchors are rendered
    Rendered(usize),

    /// The iteration hit a transient error (navigation, timeout, stale element)
    Failed,
}

/// What the loop must do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryAction {
    /// Scroll again and compare against the new baseline
    ScrollAgain,

    /// Collect listing containers, keeping at most `limit` (all of them when `None`)
    Collect { limit: Option<usize> },

    /// Reload the page, settle, then carry on scrolling
    Reload,

    /// Stop without collecting anything
    GiveUp,
}

/// Result of one state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub state: DiscoveryState,
    pub action: DiscoveryAction,
    /// Rendered count to compare the next observation against
    pub baseline: usize,
    /// Retries consumed so far, including this transition
    pub retries_used: u32,
}

impl DiscoveryState {
    /// Returns true if the loop must stop in this state
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Scanning)
    }

    /// Computes the next state from the previous baseline and a new observation
    ///
    /// Checks run in order: a failure consumes one retry (the budget is shared
    /// across the whole discovery phase), reaching `target` wins over a
    /// plateau, and an unchanged count is a plateau. Anything else becomes the
    /// new baseline.
    ///
    /// # Arguments
    ///
    /// * `baseline` - Rendered count seen on the previous successful iteration
    /// * `observation` - What the current iteration saw
    /// * `target` - Number of listings requested
    /// * `retries_used` - Retries consumed before this iteration
    /// * `max_retries` - Size of the shared retry budget
    pub fn advance(
        baseline: usize,
        observation: Observation,
        target: usize,
        retries_used: u32,
        max_retries: u32,
    ) -> Transition {
        match observation {
            Observation::Failed => {
                let retries_used = retries_used.saturating_add(1);
                if retries_used >= max_retries {
                    Transition {
                        state: Self::RetryExhausted,
                        action: DiscoveryAction::GiveUp,
                        baseline,
                        retries_used,
                    }
                } else {
                    Transition {
                        state: Self::Scanning,
                        action: DiscoveryAction::Reload,
                        baseline,
                        retries_used,
                    }
                }
            }
            Observation::Rendered(count) if count >= target => Transition {
                state: Self::Satisfied,
                action: DiscoveryAction::Collect {
                    limit: Some(target),
                },
                baseline: count,
                retries_used,
            },
            Observation::Rendered(count) if count == baseline => Transition {
                state: Self::Plateaued,
                action: DiscoveryAction::Collect { limit: None },
                baseline: count,
                retries_used,
            },
            Observation::Rendered(count) => Transition {
                state: Self::Scanning,
                action: DiscoveryAction::ScrollAgain,
                baseline: count,
                retries_used,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scanning => "scanning",
            Self::Plateaued => "plateaued",
            Self::Satisfied => "satisfied",
            Self::RetryExhausted => "retry_exhausted",
        }
    }
}

impl fmt::Display for DiscoveryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
