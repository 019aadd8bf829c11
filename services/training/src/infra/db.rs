use anyhow::{Context as _, anyhow};
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set},
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, TransactionTrait,
    sea_query::Expr,
};

use dti_core::sea_ext::{ConstraintViolation, constraint_violation};
use dti_domain::WireEnum;
use dti_domain::competency::Rating;
use dti_domain::training::{DateRange, TrainingStatus};
use dti_domain::user::UserRole;
use dti_training_schema::{
    assignments, competencies, enrollments, learning_action_plans, progress, supervision_links,
    trainings, users,
};

use crate::domain::repository::{
    CompetencyRepository, LapRepository, LedgerRepository, ProgressRepository,
    SupervisionRepository, TrainingRepository, UserRepository,
};
use crate::domain::types::{
    Competency, Lap, LapTexts, LedgerEntry, NewLap, NewProgress, NewUser, Progress, Ratings,
    SupervisionLink, Training, TrainingFields, User, UserProfile, UserSummary,
};
use crate::error::TrainingServiceError;

fn parse_column<T: WireEnum>(value: &str) -> anyhow::Result<T> {
    Ok(T::parse_wire(value)?)
}

fn internal(err: DbErr, op: &'static str) -> TrainingServiceError {
    anyhow::Error::new(err).context(op).into()
}

/// Map a write failure: unique violations to `conflict`, everything else to `Internal`.
fn conflict_or_internal(
    err: DbErr,
    conflict: TrainingServiceError,
    op: &'static str,
) -> TrainingServiceError {
    match constraint_violation(&err) {
        Some(ConstraintViolation::Unique(_)) => conflict,
        _ => internal(err, op),
    }
}

/// Map a write failure: any constraint violation to `Integrity`.
fn integrity_or_internal(err: DbErr, op: &'static str) -> TrainingServiceError {
    match constraint_violation(&err) {
        Some(ConstraintViolation::Unique(msg) | ConstraintViolation::ForeignKey(msg)) => {
            TrainingServiceError::Integrity(msg)
        }
        None => internal(err, op),
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, TrainingServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, TrainingServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find user by username")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, TrainingServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        model.map(user_from_model).transpose()
    }

    async fn find_summaries(&self, ids: &[i32]) -> Result<Vec<UserSummary>, TrainingServiceError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let models = users::Entity::find()
            .filter(users::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .context("find user summaries")?;
        models
            .into_iter()
            .map(|m| user_from_model(m).map(|u| UserSummary::from(&u)))
            .collect()
    }

    async fn list(&self, role: Option<UserRole>) -> Result<Vec<User>, TrainingServiceError> {
        let mut query = users::Entity::find();
        if let Some(role) = role {
            query = query.filter(users::Column::Role.eq(role.as_str()));
        }
        let models = query
            .order_by_asc(users::Column::Id)
            .all(&self.db)
            .await
            .context("list users")?;
        models.into_iter().map(user_from_model).collect()
    }

    async fn create(&self, user: &NewUser) -> Result<User, TrainingServiceError> {
        let now = Utc::now();
        let p = &user.profile;
        let model = users::ActiveModel {
            id: NotSet,
            username: Set(user.username.clone()),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            first_name: Set(p.first_name.clone()),
            middle_name: Set(p.middle_name.clone()),
            last_name: Set(p.last_name.clone()),
            contact: Set(p.contact.clone()),
            role: Set(p.role.as_str().to_owned()),
            status: Set(p.status.as_str().to_owned()),
            department: Set(p.department.as_str().to_owned()),
            specialization: Set(p.specialization.as_str().to_owned()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| user_write_error(e, "create user"))?;
        user_from_model(model)
    }

    async fn update_profile(
        &self,
        user: &User,
        password_hash: Option<&str>,
    ) -> Result<User, TrainingServiceError> {
        let p = &user.profile;
        let model = users::ActiveModel {
            id: Set(user.id),
            username: Set(user.username.clone()),
            email: Set(user.email.clone()),
            first_name: Set(p.first_name.clone()),
            middle_name: Set(p.middle_name.clone()),
            last_name: Set(p.last_name.clone()),
            contact: Set(p.contact.clone()),
            role: Set(p.role.as_str().to_owned()),
            status: Set(p.status.as_str().to_owned()),
            department: Set(p.department.as_str().to_owned()),
            specialization: Set(p.specialization.as_str().to_owned()),
            password_hash: password_hash.map_or(NotSet, |hash| Set(hash.to_owned())),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| user_write_error(e, "update user profile"))?;
        user_from_model(model)
    }

    async fn delete(&self, id: i32) -> Result<bool, TrainingServiceError> {
        let deleted = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                Box::pin(async move {
                    let lap_ids: Vec<i32> = learning_action_plans::Entity::find()
                        .select_only()
                        .column(learning_action_plans::Column::Id)
                        .filter(learning_action_plans::Column::EmployeeId.eq(id))
                        .into_tuple()
                        .all(txn)
                        .await?;
                    progress::Entity::delete_many()
                        .filter(
                            Condition::any()
                                .add(progress::Column::EmployeeId.eq(id))
                                .add(progress::Column::LapId.is_in(lap_ids)),
                        )
                        .exec(txn)
                        .await?;
                    learning_action_plans::Entity::delete_many()
                        .filter(learning_action_plans::Column::EmployeeId.eq(id))
                        .exec(txn)
                        .await?;
                    competencies::Entity::delete_many()
                        .filter(competencies::Column::EmployeeId.eq(id))
                        .exec(txn)
                        .await?;
                    assignments::Entity::delete_many()
                        .filter(assignments::Column::UserId.eq(id))
                        .exec(txn)
                        .await?;
                    enrollments::Entity::delete_many()
                        .filter(enrollments::Column::UserId.eq(id))
                        .exec(txn)
                        .await?;
                    supervision_links::Entity::delete_many()
                        .filter(
                            Condition::any()
                                .add(supervision_links::Column::SupervisorId.eq(id))
                                .add(supervision_links::Column::EmployeeId.eq(id)),
                        )
                        .exec(txn)
                        .await?;
                    let result = users::Entity::delete_by_id(id).exec(txn).await?;
                    Ok(result.rows_affected > 0)
                })
            })
            .await
            .context("delete user")?;
        Ok(deleted)
    }
}

fn user_write_error(err: DbErr, op: &'static str) -> TrainingServiceError {
    match constraint_violation(&err) {
        Some(ConstraintViolation::Unique(msg)) if msg.contains("email") => {
            TrainingServiceError::EmailTaken
        }
        Some(ConstraintViolation::Unique(_)) => TrainingServiceError::UsernameTaken,
        _ => internal(err, op),
    }
}

fn user_from_model(model: users::Model) -> Result<User, TrainingServiceError> {
    let profile = UserProfile {
        first_name: model.first_name,
        middle_name: model.middle_name,
        last_name: model.last_name,
        contact: model.contact,
        role: parse_column(&model.role)?,
        status: parse_column(&model.status)?,
        department: parse_column(&model.department)?,
        specialization: parse_column(&model.specialization)?,
    };
    Ok(User {
        id: model.id,
        username: model.username,
        email: model.email,
        password_hash: model.password_hash,
        profile,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Training repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTrainingRepository {
    pub db: DatabaseConnection,
}

impl TrainingRepository for DbTrainingRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Training>, TrainingServiceError> {
        let model = trainings::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find training by id")?;
        model.map(training_from_model).transpose()
    }

    async fn find_many(&self, ids: &[i32]) -> Result<Vec<Training>, TrainingServiceError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let models = trainings::Entity::find()
            .filter(trainings::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(trainings::Column::Id)
            .all(&self.db)
            .await
            .context("find trainings by ids")?;
        models.into_iter().map(training_from_model).collect()
    }

    async fn list(&self, range: DateRange) -> Result<Vec<Training>, TrainingServiceError> {
        let mut query = trainings::Entity::find();
        if let Some(start) = range.start {
            query = query.filter(trainings::Column::TrainingDate.gte(start));
        }
        if let Some(end) = range.end {
            query = query.filter(trainings::Column::TrainingDate.lte(end));
        }
        let models = query
            .order_by_asc(trainings::Column::Id)
            .all(&self.db)
            .await
            .context("list trainings")?;
        models.into_iter().map(training_from_model).collect()
    }

    async fn create(&self, fields: &TrainingFields) -> Result<Training, TrainingServiceError> {
        let model = training_active_model(NotSet, fields)
            .insert(&self.db)
            .await
            .context("create training")?;
        training_from_model(model)
    }

    async fn update(&self, training: &Training) -> Result<Training, TrainingServiceError> {
        let model = training_active_model(Set(training.id), &training.fields)
            .update(&self.db)
            .await
            .context("update training")?;
        training_from_model(model)
    }

    async fn delete(&self, id: i32) -> Result<bool, TrainingServiceError> {
        let deleted = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                Box::pin(async move {
                    let lap_ids: Vec<i32> = learning_action_plans::Entity::find()
                        .select_only()
                        .column(learning_action_plans::Column::Id)
                        .filter(learning_action_plans::Column::TrainingId.eq(id))
                        .into_tuple()
                        .all(txn)
                        .await?;
                    progress::Entity::delete_many()
                        .filter(
                            Condition::any()
                                .add(progress::Column::TrainingId.eq(id))
                                .add(progress::Column::LapId.is_in(lap_ids)),
                        )
                        .exec(txn)
                        .await?;
                    learning_action_plans::Entity::delete_many()
                        .filter(learning_action_plans::Column::TrainingId.eq(id))
                        .exec(txn)
                        .await?;
                    assignments::Entity::delete_many()
                        .filter(assignments::Column::TrainingId.eq(id))
                        .exec(txn)
                        .await?;
                    enrollments::Entity::delete_many()
                        .filter(enrollments::Column::TrainingId.eq(id))
                        .exec(txn)
                        .await?;
                    let result = trainings::Entity::delete_by_id(id).exec(txn).await?;
                    Ok(result.rows_affected > 0)
                })
            })
            .await
            .context("delete training")?;
        Ok(deleted)
    }

    async fn reconcile_statuses(&self, today: NaiveDate) -> Result<u64, TrainingServiceError> {
        let changed = self
            .db
            .transaction::<_, u64, DbErr>(|txn| {
                Box::pin(async move {
                    let mut changed = 0;
                    for status in TrainingStatus::ALL {
                        let on_date = match status {
                            TrainingStatus::Completed => {
                                trainings::Column::TrainingDate.lt(today)
                            }
                            TrainingStatus::Ongoing => trainings::Column::TrainingDate.eq(today),
                            TrainingStatus::Scheduled => {
                                trainings::Column::TrainingDate.gt(today)
                            }
                        };
                        let result = trainings::Entity::update_many()
                            .col_expr(trainings::Column::Status, Expr::value(status.as_str()))
                            .filter(on_date)
                            .filter(trainings::Column::Status.ne(status.as_str()))
                            .exec(txn)
                            .await?;
                        changed += result.rows_affected;
                    }
                    Ok(changed)
                })
            })
            .await
            .context("reconcile training statuses")?;
        Ok(changed)
    }
}

fn training_active_model(
    id: sea_orm::ActiveValue<i32>,
    fields: &TrainingFields,
) -> trainings::ActiveModel {
    trainings::ActiveModel {
        id,
        title: Set(fields.title.clone()),
        venue: Set(fields.venue.clone()),
        training_date: Set(fields.date),
        training_type: Set(fields.training_type.as_str().to_owned()),
        category: Set(fields.category.as_str().to_owned()),
        status: Set(fields.status.as_str().to_owned()),
    }
}

fn training_from_model(model: trainings::Model) -> Result<Training, TrainingServiceError> {
    Ok(Training {
        id: model.id,
        fields: TrainingFields {
            title: model.title,
            venue: model.venue,
            date: model.training_date,
            training_type: parse_column(&model.training_type)?,
            category: parse_column(&model.category)?,
            status: parse_column(&model.status)?,
        },
    })
}

// ── Assignment & enrollment repositories ────────────────────────────────────

// Both tables share one shape; only the entity and the duplicate error differ.
macro_rules! ledger_repository {
    ($repo:ident, $table:ident, $conflict:expr, $label:literal) => {
        #[derive(Clone)]
        pub struct $repo {
            pub db: DatabaseConnection,
        }

        impl $repo {
            fn entry(model: $table::Model) -> LedgerEntry {
                LedgerEntry {
                    id: model.id,
                    user_id: model.user_id,
                    training_id: model.training_id,
                    created_at: model.created_at,
                }
            }
        }

        impl LedgerRepository for $repo {
            async fn find_by_id(
                &self,
                id: i32,
            ) -> Result<Option<LedgerEntry>, TrainingServiceError> {
                let model = $table::Entity::find_by_id(id)
                    .one(&self.db)
                    .await
                    .context(concat!("find ", $label, " by id"))?;
                Ok(model.map(Self::entry))
            }

            async fn find_pair(
                &self,
                user_id: i32,
                training_id: i32,
            ) -> Result<Option<LedgerEntry>, TrainingServiceError> {
                let model = $table::Entity::find()
                    .filter($table::Column::UserId.eq(user_id))
                    .filter($table::Column::TrainingId.eq(training_id))
                    .one(&self.db)
                    .await
                    .context(concat!("find ", $label, " pair"))?;
                Ok(model.map(Self::entry))
            }

            async fn list(
                &self,
                user_id: Option<i32>,
            ) -> Result<Vec<LedgerEntry>, TrainingServiceError> {
                let mut query = $table::Entity::find();
                if let Some(user_id) = user_id {
                    query = query.filter($table::Column::UserId.eq(user_id));
                }
                let models = query
                    .order_by_asc($table::Column::Id)
                    .all(&self.db)
                    .await
                    .context(concat!("list ", $label, "s"))?;
                Ok(models.into_iter().map(Self::entry).collect())
            }

            async fn list_for_training(
                &self,
                training_id: i32,
            ) -> Result<Vec<LedgerEntry>, TrainingServiceError> {
                let models = $table::Entity::find()
                    .filter($table::Column::TrainingId.eq(training_id))
                    .order_by_asc($table::Column::Id)
                    .all(&self.db)
                    .await
                    .context(concat!("list ", $label, "s for training"))?;
                Ok(models.into_iter().map(Self::entry).collect())
            }

            async fn create(
                &self,
                user_id: i32,
                training_id: i32,
            ) -> Result<LedgerEntry, TrainingServiceError> {
                let model = $table::ActiveModel {
                    id: NotSet,
                    user_id: Set(user_id),
                    training_id: Set(training_id),
                    created_at: Set(Utc::now()),
                }
                .insert(&self.db)
                .await
                .map_err(|e| conflict_or_internal(e, $conflict, concat!("create ", $label)))?;
                Ok(Self::entry(model))
            }

            async fn update(
                &self,
                entry: &LedgerEntry,
            ) -> Result<LedgerEntry, TrainingServiceError> {
                let model = $table::ActiveModel {
                    id: Set(entry.id),
                    user_id: Set(entry.user_id),
                    training_id: Set(entry.training_id),
                    created_at: NotSet,
                }
                .update(&self.db)
                .await
                .map_err(|e| conflict_or_internal(e, $conflict, concat!("update ", $label)))?;
                Ok(Self::entry(model))
            }

            async fn delete(&self, id: i32) -> Result<bool, TrainingServiceError> {
                let result = $table::Entity::delete_by_id(id)
                    .exec(&self.db)
                    .await
                    .context(concat!("delete ", $label))?;
                Ok(result.rows_affected > 0)
            }
        }
    };
}

ledger_repository!(
    DbAssignmentRepository,
    assignments,
    TrainingServiceError::AlreadyAssigned,
    "assignment"
);
ledger_repository!(
    DbEnrollmentRepository,
    enrollments,
    TrainingServiceError::AlreadyEnrolled,
    "enrollment"
);

// ── Supervision repository ───────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSupervisionRepository {
    pub db: DatabaseConnection,
}

impl SupervisionRepository for DbSupervisionRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<SupervisionLink>, TrainingServiceError> {
        let model = supervision_links::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find supervision link by id")?;
        Ok(model.map(link_from_model))
    }

    async fn list(&self) -> Result<Vec<SupervisionLink>, TrainingServiceError> {
        let models = supervision_links::Entity::find()
            .order_by_asc(supervision_links::Column::Id)
            .all(&self.db)
            .await
            .context("list supervision links")?;
        Ok(models.into_iter().map(link_from_model).collect())
    }

    async fn create(
        &self,
        supervisor_id: i32,
        employee_id: i32,
    ) -> Result<SupervisionLink, TrainingServiceError> {
        let model = supervision_links::ActiveModel {
            id: NotSet,
            supervisor_id: Set(supervisor_id),
            employee_id: Set(employee_id),
        }
        .insert(&self.db)
        .await
        .map_err(|e| integrity_or_internal(e, "create supervision link"))?;
        Ok(link_from_model(model))
    }

    async fn update(
        &self,
        link: &SupervisionLink,
    ) -> Result<SupervisionLink, TrainingServiceError> {
        let model = supervision_links::ActiveModel {
            id: Set(link.id),
            supervisor_id: Set(link.supervisor_id),
            employee_id: Set(link.employee_id),
        }
        .update(&self.db)
        .await
        .map_err(|e| integrity_or_internal(e, "update supervision link"))?;
        Ok(link_from_model(model))
    }

    async fn delete(&self, id: i32) -> Result<bool, TrainingServiceError> {
        let result = supervision_links::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete supervision link")?;
        Ok(result.rows_affected > 0)
    }
}

fn link_from_model(model: supervision_links::Model) -> SupervisionLink {
    SupervisionLink {
        id: model.id,
        supervisor_id: model.supervisor_id,
        employee_id: model.employee_id,
    }
}

// ── Competency repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCompetencyRepository {
    pub db: DatabaseConnection,
}

impl CompetencyRepository for DbCompetencyRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Competency>, TrainingServiceError> {
        let model = competencies::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find competency by id")?;
        model.map(competency_from_model).transpose()
    }

    async fn list(
        &self,
        employee_id: Option<i32>,
    ) -> Result<Vec<Competency>, TrainingServiceError> {
        let query = match employee_id {
            Some(employee_id) => competencies::Entity::find()
                .filter(competencies::Column::EmployeeId.eq(employee_id))
                .order_by_desc(competencies::Column::CreatedAt)
                .order_by_desc(competencies::Column::Id),
            None => competencies::Entity::find().order_by_asc(competencies::Column::Id),
        };
        let models = query.all(&self.db).await.context("list competencies")?;
        models.into_iter().map(competency_from_model).collect()
    }

    async fn create(
        &self,
        employee_id: i32,
        ratings: Ratings,
    ) -> Result<Competency, TrainingServiceError> {
        let mut am = competency_active_model(NotSet, employee_id, &ratings);
        am.created_at = Set(Utc::now());
        let model = am
            .insert(&self.db)
            .await
            .map_err(|e| integrity_or_internal(e, "create competency"))?;
        competency_from_model(model)
    }

    async fn update(&self, competency: &Competency) -> Result<Competency, TrainingServiceError> {
        let model = competency_active_model(
            Set(competency.id),
            competency.employee_id,
            &competency.ratings,
        )
        .update(&self.db)
        .await
        .map_err(|e| integrity_or_internal(e, "update competency"))?;
        competency_from_model(model)
    }

    async fn delete(&self, id: i32) -> Result<bool, TrainingServiceError> {
        let result = competencies::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete competency")?;
        Ok(result.rows_affected > 0)
    }
}

fn competency_active_model(
    id: sea_orm::ActiveValue<i32>,
    employee_id: i32,
    ratings: &Ratings,
) -> competencies::ActiveModel {
    let col = |r: Rating| Set(i16::from(r.as_u8()));
    competencies::ActiveModel {
        id,
        employee_id: Set(employee_id),
        global: col(ratings.global),
        solutions: col(ratings.solutions),
        networking: col(ratings.networking),
        delivering: col(ratings.delivering),
        collaboration: col(ratings.collaboration),
        agility: col(ratings.agility),
        professionalism: col(ratings.professionalism),
        created_at: NotSet,
    }
}

fn rating_from_column(value: i16) -> anyhow::Result<Rating> {
    u8::try_from(value)
        .ok()
        .and_then(Rating::from_u8)
        .ok_or_else(|| anyhow!("stored rating {value} is out of range"))
}

fn competency_from_model(model: competencies::Model) -> Result<Competency, TrainingServiceError> {
    Ok(Competency {
        id: model.id,
        employee_id: model.employee_id,
        ratings: Ratings {
            global: rating_from_column(model.global)?,
            solutions: rating_from_column(model.solutions)?,
            networking: rating_from_column(model.networking)?,
            delivering: rating_from_column(model.delivering)?,
            collaboration: rating_from_column(model.collaboration)?,
            agility: rating_from_column(model.agility)?,
            professionalism: rating_from_column(model.professionalism)?,
        },
        created_at: model.created_at,
    })
}

// ── LAP repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbLapRepository {
    pub db: DatabaseConnection,
}

impl LapRepository for DbLapRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Lap>, TrainingServiceError> {
        let model = learning_action_plans::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find learning action plan by id")?;
        model.map(lap_from_model).transpose()
    }

    async fn list(&self, employee_id: Option<i32>) -> Result<Vec<Lap>, TrainingServiceError> {
        let mut query = learning_action_plans::Entity::find();
        if let Some(employee_id) = employee_id {
            query = query.filter(learning_action_plans::Column::EmployeeId.eq(employee_id));
        }
        let models = query
            .order_by_asc(learning_action_plans::Column::Id)
            .all(&self.db)
            .await
            .context("list learning action plans")?;
        models.into_iter().map(lap_from_model).collect()
    }

    async fn create(&self, lap: &NewLap) -> Result<Lap, TrainingServiceError> {
        let t = &lap.texts;
        let model = learning_action_plans::ActiveModel {
            id: NotSet,
            employee_id: Set(lap.employee_id),
            training_id: Set(lap.training_id),
            submitted_on: Set(lap.submitted_on),
            takeaways: Set(t.takeaways.clone()),
            goal: Set(t.goal.clone()),
            plan: Set(t.plan.clone()),
            timeframe: Set(t.timeframe.clone()),
            support: Set(t.support.clone()),
            outcome: Set(t.outcome.clone()),
            status: Set(dti_domain::lap::LapStatus::default().as_str().to_owned()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| integrity_or_internal(e, "create learning action plan"))?;
        lap_from_model(model)
    }

    async fn update(&self, lap: &Lap) -> Result<Lap, TrainingServiceError> {
        let t = &lap.texts;
        let model = learning_action_plans::ActiveModel {
            id: Set(lap.id),
            takeaways: Set(t.takeaways.clone()),
            goal: Set(t.goal.clone()),
            plan: Set(t.plan.clone()),
            timeframe: Set(t.timeframe.clone()),
            support: Set(t.support.clone()),
            outcome: Set(t.outcome.clone()),
            status: Set(lap.status.as_str().to_owned()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update learning action plan")?;
        lap_from_model(model)
    }

    async fn delete(&self, id: i32) -> Result<bool, TrainingServiceError> {
        let deleted = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                Box::pin(async move {
                    progress::Entity::delete_many()
                        .filter(progress::Column::LapId.eq(id))
                        .exec(txn)
                        .await?;
                    let result = learning_action_plans::Entity::delete_by_id(id)
                        .exec(txn)
                        .await?;
                    Ok(result.rows_affected > 0)
                })
            })
            .await
            .context("delete learning action plan")?;
        Ok(deleted)
    }
}

fn lap_from_model(model: learning_action_plans::Model) -> Result<Lap, TrainingServiceError> {
    Ok(Lap {
        id: model.id,
        employee_id: model.employee_id,
        training_id: model.training_id,
        submitted_on: model.submitted_on,
        texts: LapTexts {
            takeaways: model.takeaways,
            goal: model.goal,
            plan: model.plan,
            timeframe: model.timeframe,
            support: model.support,
            outcome: model.outcome,
        },
        status: parse_column(&model.status)?,
    })
}

// ── Progress repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbProgressRepository {
    pub db: DatabaseConnection,
}

impl ProgressRepository for DbProgressRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Progress>, TrainingServiceError> {
        let model = progress::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find progress by id")?;
        model.map(progress_from_model).transpose()
    }

    async fn list(&self, employee_id: Option<i32>) -> Result<Vec<Progress>, TrainingServiceError> {
        let mut query = progress::Entity::find();
        if let Some(employee_id) = employee_id {
            query = query.filter(progress::Column::EmployeeId.eq(employee_id));
        }
        let models = query
            .order_by_asc(progress::Column::Id)
            .all(&self.db)
            .await
            .context("list progress")?;
        models.into_iter().map(progress_from_model).collect()
    }

    async fn list_by_lap(&self, lap_id: i32) -> Result<Vec<Progress>, TrainingServiceError> {
        let models = progress::Entity::find()
            .filter(progress::Column::LapId.eq(lap_id))
            .order_by_asc(progress::Column::Id)
            .all(&self.db)
            .await
            .context("list progress by lap")?;
        models.into_iter().map(progress_from_model).collect()
    }

    async fn create(&self, new: &NewProgress) -> Result<Progress, TrainingServiceError> {
        let model = progress::ActiveModel {
            id: NotSet,
            employee_id: Set(new.employee_id),
            training_id: Set(new.training_id),
            lap_id: Set(new.lap_id),
            status: Set(new.status.as_str().to_owned()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| integrity_or_internal(e, "create progress"))?;
        progress_from_model(model)
    }

    async fn update(&self, item: &Progress) -> Result<Progress, TrainingServiceError> {
        let model = progress::ActiveModel {
            id: Set(item.id),
            employee_id: Set(item.employee_id),
            training_id: Set(item.training_id),
            lap_id: Set(item.lap_id),
            status: Set(item.status.as_str().to_owned()),
        }
        .update(&self.db)
        .await
        .map_err(|e| integrity_or_internal(e, "update progress"))?;
        progress_from_model(model)
    }

    async fn delete(&self, id: i32) -> Result<bool, TrainingServiceError> {
        let result = progress::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete progress")?;
        Ok(result.rows_affected > 0)
    }
}

fn progress_from_model(model: progress::Model) -> Result<Progress, TrainingServiceError> {
    Ok(Progress {
        id: model.id,
        employee_id: model.employee_id,
        training_id: model.training_id,
        lap_id: model.lap_id,
        status: parse_column(&model.status)?,
    })
}
