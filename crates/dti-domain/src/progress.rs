//! Per-employee progress tracking status.

wire_enum! {
    /// Free-form progress status. Any value may be set at any time; it is not
    /// derived from the linked learning action plan.
    ProgressStatus as "progress status" {
        ToEvaluate => "to_evaluate",
        TrainingAttended => "training_attended",
        TrainingNotAttended => "training_not_attended",
        LapApproved => "lap_approved",
        LapRejected => "lap_rejected",
        Successful => "successful",
        Failed => "failed",
    }
}

impl Default for ProgressStatus {
    fn default() -> Self {
        Self::ToEvaluate
    }
}

impl ProgressStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::ToEvaluate => "To be Evaluated",
            Self::TrainingAttended => "Training Attended",
            Self::TrainingNotAttended => "Training Not Attended",
            Self::LapApproved => "Action Plan Approved",
            Self::LapRejected => "Action Plan Rejected",
            Self::Successful => "Successful",
            Self::Failed => "Failed",
        }
    }
}
