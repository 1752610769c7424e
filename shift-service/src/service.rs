//! Shift service
//!
//! Business logic for shift tracking: create, list, update, delete and
//! statistics, with ownership enforced on every operation that touches an
//! existing shift.

use chrono::{DateTime, NaiveDate};
use thiserror::Error;

use error::{AppError, AuthError, ErrorResponse};

use crate::guard;
use crate::models::{Shift, ShiftDraft, User};
use crate::repository::{
    InMemoryShiftRepository, InMemoryUserRepository, ShiftRepository, UserRepository,
};
use crate::stats::{self, ShiftStats};
use crate::ShiftConfig;

/// Service errors
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Shift not found: {0}")]
    ShiftNotFound(i64),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Shift {shift_id} is not owned by user {user_id}")]
    NotOwner { shift_id: i64, user_id: String },

    #[error("Repository error: {0}")]
    Repository(String),
}

impl From<ServiceError> for ErrorResponse {
    fn from(err: ServiceError) -> Self {
        let code = match &err {
            ServiceError::ShiftNotFound(_) => "SHIFT_NOT_FOUND",
            ServiceError::UserNotFound(_) => "USER_NOT_FOUND",
            ServiceError::InvalidInput(_) => "INVALID_INPUT",
            ServiceError::NotOwner { .. } => "NOT_OWNER",
            ServiceError::Repository(_) => "REPOSITORY_FAILED",
        };
        Self::new(code, err.to_string())
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::ShiftNotFound(id) => AppError::NotFound(format!("shift {id}")),
            ServiceError::UserNotFound(id) => AppError::NotFound(format!("user {id}")),
            ServiceError::InvalidInput(msg) => AppError::Validation(msg),
            ServiceError::NotOwner { .. } => AppError::Auth(AuthError::Forbidden),
            ServiceError::Repository(msg) => AppError::Internal(msg),
        }
    }
}

/// Shift service for business operations
pub struct ShiftService {
    shifts: InMemoryShiftRepository,
    users: InMemoryUserRepository,
    tax_rate: f64,
}

impl ShiftService {
    /// Create a new shift service with in-memory repositories and the
    /// reference tax rate.
    pub fn new() -> Self {
        Self::with_config(ShiftConfig::default())
    }

    /// Create a service using the given configuration.
    pub fn with_config(config: ShiftConfig) -> Self {
        Self {
            shifts: InMemoryShiftRepository::new(),
            users: InMemoryUserRepository::new(),
            tax_rate: config.tax_rate,
        }
    }

    /// Register or update a user record from the external user store.
    pub async fn upsert_user(&self, id: &str, hourly_rate: f64) -> Result<User, ServiceError> {
        if !hourly_rate.is_finite() || hourly_rate < 0.0 {
            return Err(ServiceError::InvalidInput(format!(
                "hourly rate must be a non-negative number, got {hourly_rate}"
            )));
        }
        self.users
            .upsert(&User {
                id: id.to_string(),
                hourly_rate,
            })
            .await
            .map_err(|e| ServiceError::Repository(e.to_string()))
    }

    /// All shifts for a user, newest date first.
    pub async fn list_shifts(&self, user_id: &str) -> Result<Vec<Shift>, ServiceError> {
        self.shifts
            .find_by_user(user_id)
            .await
            .map_err(|e| ServiceError::Repository(e.to_string()))
    }

    /// Record a new shift for a user.
    pub async fn create_shift(
        &self,
        user_id: &str,
        draft: &ShiftDraft,
    ) -> Result<Shift, ServiceError> {
        validate_draft(draft)?;
        let date = normalize_date(&draft.date)?;
        let rate = self.hourly_rate_of(user_id).await?;

        let mut shift = Shift::new(
            user_id.to_string(),
            date,
            draft.hours_worked,
            draft.cash_tips,
            draft.card_tips,
        );
        shift
            .recalculate(rate)
            .map_err(|e| ServiceError::InvalidInput(e.to_string()))?;

        self.shifts
            .create(&shift)
            .await
            .map_err(|e| ServiceError::Repository(e.to_string()))
    }

    /// Replace the editable fields of a shift and recompute its income
    /// against the owner's current hourly rate.
    pub async fn update_shift(
        &self,
        user_id: &str,
        shift_id: i64,
        draft: &ShiftDraft,
    ) -> Result<Shift, ServiceError> {
        validate_draft(draft)?;
        let date = normalize_date(&draft.date)?;

        let mut shift = self.find_owned(user_id, shift_id).await?;
        let rate = self.hourly_rate_of(user_id).await?;

        shift.date = date;
        shift.hours_worked = draft.hours_worked;
        shift.cash_tips = draft.cash_tips;
        shift.card_tips = draft.card_tips;
        shift
            .recalculate(rate)
            .map_err(|e| ServiceError::InvalidInput(e.to_string()))?;

        self.shifts
            .update(&shift)
            .await
            .map_err(|e| ServiceError::Repository(e.to_string()))
    }

    /// Delete a shift owned by the user.
    pub async fn delete_shift(&self, user_id: &str, shift_id: i64) -> Result<(), ServiceError> {
        self.find_owned(user_id, shift_id).await?;
        self.shifts
            .delete(shift_id)
            .await
            .map_err(|e| ServiceError::Repository(e.to_string()))
    }

    /// Summary statistics over all of a user's shifts.
    pub async fn statistics(&self, user_id: &str) -> Result<ShiftStats, ServiceError> {
        let shifts = self.list_shifts(user_id).await?;
        Ok(stats::aggregate(&shifts, self.tax_rate))
    }

    async fn hourly_rate_of(&self, user_id: &str) -> Result<f64, ServiceError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(|e| ServiceError::Repository(e.to_string()))?
            .ok_or_else(|| ServiceError::UserNotFound(user_id.to_string()))?;
        Ok(user.hourly_rate)
    }

    async fn find_owned(&self, user_id: &str, shift_id: i64) -> Result<Shift, ServiceError> {
        let shift = self
            .shifts
            .find_by_id(shift_id)
            .await
            .map_err(|e| ServiceError::Repository(e.to_string()))?
            .ok_or(ServiceError::ShiftNotFound(shift_id))?;

        if !guard::owns(&shift, user_id) {
            tracing::warn!("User {} denied access to shift {}", user_id, shift_id);
            return Err(ServiceError::NotOwner {
                shift_id,
                user_id: user_id.to_string(),
            });
        }
        Ok(shift)
    }
}

impl Default for ShiftService {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_draft(draft: &ShiftDraft) -> Result<(), ServiceError> {
    if !draft.hours_worked.is_finite() || draft.hours_worked <= 0.0 {
        return Err(ServiceError::InvalidInput(format!(
            "hours worked must be greater than zero, got {}",
            draft.hours_worked
        )));
    }
    for (field, value) in [("cash tips", draft.cash_tips), ("card tips", draft.card_tips)] {
        if !value.is_finite() || value < 0.0 {
            return Err(ServiceError::InvalidInput(format!(
                "{field} must be a non-negative number, got {value}"
            )));
        }
    }
    Ok(())
}

/// Parse a client-supplied date and normalize it to its calendar day.
fn normalize_date(input: &str) -> Result<NaiveDate, ServiceError> {
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(input)
        .map(|dt| dt.date_naive())
        .map_err(|_| ServiceError::InvalidInput(format!("invalid date: {input}")))
}
