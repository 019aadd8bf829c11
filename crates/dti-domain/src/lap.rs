//! Learning action plan evaluation state machine.

wire_enum! {
    /// Evaluation state of a learning action plan.
    ///
    /// `to_evaluate` → `approved` | `rejected`. Both outcomes are terminal.
    LapStatus as "learning action plan status" {
        ToEvaluate => "to_evaluate",
        Approved => "approved",
        Rejected => "rejected",
    }
}

impl Default for LapStatus {
    fn default() -> Self {
        Self::ToEvaluate
    }
}

/// Rejected status change on a learning action plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot move learning action plan from {from} to {to}")]
pub struct LapTransitionError {
    pub from: LapStatus,
    pub to: LapStatus,
}

impl LapStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::ToEvaluate)
    }

    /// Validate a status change. Re-sending the current status is always allowed.
    pub fn transition(self, to: LapStatus) -> Result<LapStatus, LapTransitionError> {
        if self == to || !self.is_terminal() {
            Ok(to)
        } else {
            Err(LapTransitionError { from: self, to })
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::ToEvaluate => "To be Evaluated",
            Self::Approved => "Action Plan Approved",
            Self::Rejected => "Action Plan Rejected",
        }
    }
}
