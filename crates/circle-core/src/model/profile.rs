use serde::{Deserialize, Serialize};
use std::{fmt, num::ParseIntError, str::FromStr};

/// Network-assigned profile identifier.
///
/// Ids are handed out in strictly increasing order and never reused, even
/// after the profile they named is removed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// The identity triple that decides whether two profiles are duplicates.
///
/// Ids play no part: two profiles with equal `(name, email, phone)` are the
/// same person as far as duplicate detection is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProfileKey {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl ProfileKey {
    pub fn new(name: impl Into<String>, email: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }
}

/// One user of the network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    id: UserId,
    name: String,
    email: String,
    phone: String,
}

impl UserProfile {
    pub(crate) fn from_key(id: UserId, key: ProfileKey) -> Self {
        Self {
            id,
            name: key.name,
            email: key.email,
            phone: key.phone,
        }
    }

    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Owned copy of the duplicate-detection triple.
    #[must_use]
    pub fn key(&self) -> ProfileKey {
        ProfileKey::new(&self.name, &self.email, &self.phone)
    }

    /// Returns `true` if `other` carries the same `(name, email, phone)`.
    #[must_use]
    pub fn is_duplicate_of(&self, other: &Self) -> bool {
        self.name == other.name && self.email == other.email && self.phone == other.phone
    }

    /// Overwrite the identity fields with `key`. The id is untouched.
    pub(crate) fn set_key(&mut self, key: ProfileKey) {
        self.name = key.name;
        self.email = key.email;
        self.phone = key.phone;
    }
}

impl fmt::Display for UserProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name:  {}", self.name)?;
        writeln!(f, "Email: {}", self.email)?;
        write!(f, "Phone: {}", self.phone)
    }
}

/// A partial edit of a profile: `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl ProfileUpdate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Returns `true` if no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none()
    }

    /// The key a profile currently keyed by `current` would have after this
    /// update.
    #[must_use]
    pub fn apply_to(&self, current: &ProfileKey) -> ProfileKey {
        ProfileKey {
            name: self.name.clone().unwrap_or_else(|| current.name.clone()),
            email: self.email.clone().unwrap_or_else(|| current.email.clone()),
            phone: self.phone.clone().unwrap_or_else(|| current.phone.clone()),
        }
    }
}
