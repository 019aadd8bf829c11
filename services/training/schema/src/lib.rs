//! sea-orm entities for the training service tables.

pub mod assignments;
pub mod competencies;
pub mod enrollments;
pub mod learning_action_plans;
pub mod progress;
pub mod supervision_links;
pub mod trainings;
pub mod users;
