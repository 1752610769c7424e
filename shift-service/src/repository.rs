//! Shift and user repositories
//!
//! Persistence seam for the document store. Query details stay behind the
//! traits; the in-memory implementations back tests and development.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::RwLock;

use anyhow::Result;
use error::StoreError;

use crate::models::{Shift, User};

/// Shift repository trait for store operations
#[allow(async_fn_in_trait)]
pub trait ShiftRepository: Send + Sync {
    /// Find a shift by its store id
    async fn find_by_id(&self, id: i64) -> Result<Option<Shift>>;

    /// All shifts for a user, newest date first
    async fn find_by_user(&self, user_id: &str) -> Result<Vec<Shift>>;

    /// Create a new shift
    async fn create(&self, shift: &Shift) -> Result<Shift>;

    /// Update an existing shift
    async fn update(&self, shift: &Shift) -> Result<Shift>;

    /// Delete a shift
    async fn delete(&self, id: i64) -> Result<()>;
}

/// User repository trait for the external user store
#[allow(async_fn_in_trait)]
pub trait UserRepository: Send + Sync {
    /// Find a user by id
    async fn find_by_id(&self, id: &str) -> Result<Option<User>>;

    /// Insert or replace a user record
    async fn upsert(&self, user: &User) -> Result<User>;
}

/// In-memory shift store for testing and development
pub struct InMemoryShiftRepository {
    shifts: RwLock<Vec<Shift>>,
    next_id: AtomicI64,
}

impl InMemoryShiftRepository {
    pub fn new() -> Self {
        Self {
            shifts: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryShiftRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ShiftRepository for InMemoryShiftRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Shift>> {
        let shifts = self.shifts.read().unwrap();
        Ok(shifts.iter().find(|s| s.id == Some(id)).cloned())
    }

    async fn find_by_user(&self, user_id: &str) -> Result<Vec<Shift>> {
        let shifts = self.shifts.read().unwrap();
        let mut found: Vec<Shift> = shifts
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(found)
    }

    async fn create(&self, shift: &Shift) -> Result<Shift> {
        let mut shifts = self.shifts.write().unwrap();
        let mut new_shift = shift.clone();
        new_shift.id = Some(self.next_id.fetch_add(1, Ordering::SeqCst));
        new_shift.created_at = Some(chrono::Utc::now());
        shifts.push(new_shift.clone());
        Ok(new_shift)
    }

    async fn update(&self, shift: &Shift) -> Result<Shift> {
        let mut shifts = self.shifts.write().unwrap();
        if let Some(id) = shift.id {
            if let Some(existing) = shifts.iter_mut().find(|s| s.id == Some(id)) {
                // user_id and created_at stay as written at creation
                existing.date = shift.date;
                existing.hours_worked = shift.hours_worked;
                existing.cash_tips = shift.cash_tips;
                existing.card_tips = shift.card_tips;
                existing.total_tips = shift.total_tips;
                existing.base_income = shift.base_income;
                existing.total_income = shift.total_income;
                existing.adjusted_hourly_rate = shift.adjusted_hourly_rate;
                return Ok(existing.clone());
            }
        }
        Err(StoreError::NotFound.into())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut shifts = self.shifts.write().unwrap();
        let len_before = shifts.len();
        shifts.retain(|s| s.id != Some(id));
        if shifts.len() == len_before {
            return Err(StoreError::NotFound.into());
        }
        Ok(())
    }
}

/// In-memory user store for testing and development
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        let users = self.users.read().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn upsert(&self, user: &User) -> Result<User> {
        let mut users = self.users.write().unwrap();
        if let Some(existing) = users.iter_mut().find(|u| u.id == user.id) {
            *existing = user.clone();
        } else {
            users.push(user.clone());
        }
        Ok(user.clone())
    }
}
