//! Training catalog types and the date-driven lifecycle.

use chrono::NaiveDate;

wire_enum! {
    TrainingType as "training type" {
        Technical => "technical",
        Financial => "financial",
        Supervisorial => "supervisorial",
        Hr => "hr",
        Administrative => "administrative",
    }
}

wire_enum! {
    TrainingCategory as "training category" {
        Mandatory => "mandatory",
        Optional => "optional",
    }
}

wire_enum! {
    /// Lifecycle state of a training, derived from its date.
    TrainingStatus as "training status" {
        Scheduled => "scheduled",
        Ongoing => "ongoing",
        Completed => "completed",
    }
}

impl Default for TrainingStatus {
    fn default() -> Self {
        Self::Scheduled
    }
}

impl TrainingStatus {
    /// Lifecycle state of a training held on `date`, as seen on `today`.
    pub fn for_date(date: NaiveDate, today: NaiveDate) -> Self {
        match date.cmp(&today) {
            std::cmp::Ordering::Less => Self::Completed,
            std::cmp::Ordering::Equal => Self::Ongoing,
            std::cmp::Ordering::Greater => Self::Scheduled,
        }
    }

    /// Ongoing and completed trainings no longer accept assignments.
    pub fn is_closed(self) -> bool {
        matches!(self, Self::Ongoing | Self::Completed)
    }
}

/// Inclusive date window used to filter catalog listings. Either bound may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }
}
