//! User account data model.
//!
//! The roster stores canonical [`User`] records; the session projection is a
//! cached copy of one of them. Both are plain records; the write-through
//! discipline that keeps them identical lives in the engine, not here.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned by the user newtypes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Identifier is empty after trimming whitespace.
    #[error("user id must not be empty")]
    EmptyId,
    /// Identifier has leading or trailing whitespace.
    #[error("user id must not contain surrounding whitespace")]
    PaddedId,
    /// Email is empty after trimming whitespace.
    #[error("email address must not be empty")]
    EmptyEmail,
    /// Email is missing an `@` separator or a local part.
    #[error("email address must contain a local part and a domain")]
    MalformedEmail,
}

/// Opaque, stable user identifier.
///
/// Generated identifiers are UUIDs, but seeded accounts use fixed short ids
/// (`admin`, `u1`, `u2`), so the type accepts any non-empty trimmed string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = id.into();
        if raw.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if raw.trim() != raw {
            return Err(UserValidationError::PaddedId);
        }
        Ok(Self(raw))
    }

    /// Generate a fresh random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Validated email address.
///
/// The raw form is preserved for display; uniqueness and lookups use the
/// case-insensitive [`EmailAddress::normalized`] form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = email.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        let Some((local, domain)) = trimmed.split_once('@') else {
            return Err(UserValidationError::MalformedEmail);
        };
        if local.is_empty() || domain.is_empty() {
            return Err(UserValidationError::MalformedEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the raw address as entered.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Lowercased form used for uniqueness checks and roster lookups.
    pub fn normalized(&self) -> String {
        self.0.to_lowercase()
    }

    /// Case-insensitive comparison against another address.
    pub fn matches(&self, other: &Self) -> bool {
        self.normalized() == other.normalized()
    }

    /// The part before the `@`, used to derive provisioned display names.
    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or_default()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Colour scheme preference carried on the account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    /// Light theme.
    Light,
    /// Dark theme (the provisioning default).
    #[default]
    Dark,
}

impl ThemePreference {
    /// The opposite preference, used by the theme toggle.
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Premium subscription lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    /// Subscription is live.
    Active,
    /// No subscription, or a lapsed one.
    #[default]
    Inactive,
}

/// Canonical user account record.
///
/// ## Invariants
/// - `points` never goes negative; the ledger primitives validate before
///   mutating.
/// - At most one session projection of this record exists at a time, and it
///   is field-for-field equal to the roster entry sharing `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Opaque stable identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Unique (case-insensitively) contact address.
    pub email: EmailAddress,
    /// Live point balance.
    pub points: i64,
    /// Whether the account has the paid tier.
    pub is_premium: bool,
    /// Avatar image reference; may be empty.
    pub avatar: String,
    /// Whether the account holds administrator rights.
    pub is_admin: bool,
    /// When the account was created.
    pub joined_date: DateTime<Utc>,
    /// Colour scheme preference.
    pub theme_preference: ThemePreference,
    /// Premium subscription state.
    pub subscription_status: SubscriptionStatus,
    /// When the subscription was started, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_date: Option<DateTime<Utc>>,
    /// Opaque external payment transaction id, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_id: Option<String>,
}

/// Shallow field patch applied to the session user and its roster entry in
/// one step.
///
/// Absent fields are left untouched. Identity (`id`), balances, and
/// subscription state are deliberately not patchable through this path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    /// Replacement display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Replacement email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<EmailAddress>,
    /// Replacement avatar reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Replacement theme preference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_preference: Option<ThemePreference>,
}

impl UserPatch {
    /// True when the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.avatar.is_none()
            && self.theme_preference.is_none()
    }
}
