//! User profile rows (`profiles` table) and their form validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fieldsales_core::{DomainError, DomainResult, Entity, UserId};

use crate::Role;

/// Profile attached to an authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    pub role: Role,
    /// Sales commission in basis points (500 = 5%).
    pub commission_bps: u32,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn toggle_role(&mut self) -> Role {
        self.role = self.role.toggled();
        self.role
    }

    /// Update the commission from a percentage typed by an admin.
    ///
    /// The profile is unchanged if the text does not parse.
    pub fn set_commission(&mut self, text: &str) -> DomainResult<()> {
        self.commission_bps = parse_commission(text)?;
        Ok(())
    }
}

impl Entity for UserProfile {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// New-user form as typed in the admin console.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUserProfile {
    pub full_name: String,
    pub email: String,
    /// Percentage as text; empty means zero.
    pub commission: String,
    pub admin: bool,
}

impl NewUserProfile {
    /// Validate the form into the profile row to upsert for `id`.
    pub fn validate(&self, id: UserId, created_at: DateTime<Utc>) -> DomainResult<UserProfile> {
        let full_name = self.full_name.trim();
        let email = self.email.trim();

        if full_name.is_empty() {
            return Err(DomainError::validation("full name is required"));
        }
        if !email.contains('@') {
            return Err(DomainError::validation("a valid email is required"));
        }

        Ok(UserProfile {
            id,
            full_name: full_name.to_string(),
            email: email.to_string(),
            role: if self.admin { Role::Admin } else { Role::Seller },
            commission_bps: parse_commission(&self.commission)?,
            created_at,
        })
    }
}

/// Parse a commission percentage (`"5"`, `"2.5"`, `"2,75"`) into basis points.
///
/// Empty input is zero. Negative values, more than two decimals and anything
/// that is not a number are rejected.
pub fn parse_commission(text: &str) -> DomainResult<u32> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(0);
    }

    let invalid = || DomainError::validation(format!("invalid commission: {text}"));
    let normalized = text.replace(',', ".");
    let (whole, frac) = normalized.split_once('.').unwrap_or((&normalized, ""));

    if (whole.is_empty() && frac.is_empty())
        || frac.len() > 2
        || !whole.chars().all(|c| c.is_ascii_digit())
        || !frac.chars().all(|c| c.is_ascii_digit())
    {
        return Err(invalid());
    }

    let whole: u32 = if whole.is_empty() { 0 } else { whole.parse().map_err(|_| invalid())? };
    let frac: u32 = format!("{frac:0<2}").parse().map_err(|_| invalid())?;

    whole
        .checked_mul(100)
        .and_then(|w| w.checked_add(frac))
        .ok_or_else(invalid)
}
