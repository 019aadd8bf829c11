pub mod assignment;
pub mod auth;
pub mod competency;
pub mod enrollment;
pub mod lap;
pub mod ledger;
pub mod progress;
pub mod supervision;
pub mod training;
pub mod user;

use dti_core::error::FieldErrors;
use dti_domain::user::UserRole;

use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::TrainingServiceError;

/// Field message for an id that names no stored row.
pub fn missing_reference(id: i32) -> String {
    format!("Invalid pk \"{id}\" - object does not exist.")
}

/// Field message for a user who exists but holds another role.
pub fn wrong_role(username: &str, role: UserRole) -> String {
    format!("User \"{username}\" does not have the {role} role.")
}

/// Fails on `field` unless `user` is an employee.
pub fn ensure_employee(user: &User, field: &str) -> Result<(), TrainingServiceError> {
    if user.profile.role != UserRole::Employee {
        return Err(TrainingServiceError::field(
            field,
            wrong_role(&user.username, UserRole::Employee),
        ));
    }
    Ok(())
}

/// Records an error on `field` unless `id` names a stored user holding `role`.
pub async fn check_user_role<U: UserRepository>(
    users: &U,
    errors: &mut FieldErrors,
    field: &str,
    id: i32,
    role: UserRole,
) -> Result<(), TrainingServiceError> {
    match users.find_by_id(id).await? {
        None => errors.add(field, missing_reference(id)),
        Some(user) if user.profile.role != role => {
            errors.add(field, wrong_role(&user.username, role))
        }
        Some(_) => {}
    }
    Ok(())
}
