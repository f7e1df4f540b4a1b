// ABOUTME: Page lifecycle state machine
// ABOUTME: Tracks a page instance from construction through invocation, view resolution, and rendering

use std::fmt;

use super::error::{PageError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Constructed,
    Invoked,
    ViewResolved,
    ViewNotFound,
    Rendered,
}

impl Lifecycle {
    pub fn can_transition_to(self, next: Lifecycle) -> bool {
        matches!(
            (self, next),
            (Lifecycle::Constructed, Lifecycle::Invoked)
                | (Lifecycle::Invoked, Lifecycle::ViewResolved)
                | (Lifecycle::Invoked, Lifecycle::ViewNotFound)
                | (Lifecycle::ViewResolved, Lifecycle::Rendered)
                | (Lifecycle::ViewNotFound, Lifecycle::Rendered)
        )
    }

    /// Move to `next`, rejecting anything the state machine does not allow
    pub fn advance(&mut self, next: Lifecycle) -> Result<()> {
        if !self.can_transition_to(next) {
            return Err(PageError::InvalidTransition {
                from: *self,
                to: next,
            });
        }
        *self = next;
        Ok(())
    }

    pub fn is_terminal(self) -> bool {
        self == Lifecycle::Rendered
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Lifecycle::Constructed => "constructed",
            Lifecycle::Invoked => "invoked",
            Lifecycle::ViewResolved => "view_resolved",
            Lifecycle::ViewNotFound => "view_not_found",
            Lifecycle::Rendered => "rendered",
        };
        f.write_str(name)
    }
}
