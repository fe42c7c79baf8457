/// Reply text when no row has the requested id.
pub const USER_NOT_FOUND: &str = "User not found";
/// Reply text when the lookup itself failed.
pub const LOOKUP_FAILED: &str = "An error occurred while retrieving the user.";
/// Delete status text on success (including "no such row").
pub const USER_DELETED: &str = "User deleted successfully";
/// Delete status text on failure.
pub const CANNOT_DELETE: &str = "Cannot delete user";

/// Pure user model for inter-module communication (no serde)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub country: String,
}

/// The five text fields of a user, without its id.
///
/// A `None` field is stored as NULL and is rejected by the table constraints,
/// so the whole insert or update fails.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub country: Option<String>,
}

impl NewUser {
    /// All five fields present.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            phone: Some(phone.into()),
            address: Some(address.into()),
            country: Some(country.into()),
        }
    }
}

/// Full replacement of an existing user's fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserUpdate {
    pub user_id: i64,
    pub fields: NewUser,
}

/// Outcome of a single-user read, insert or update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserReply {
    Found(User),
    NotFound,
    LookupFailed,
    /// The mutation failed and was rolled back.
    Empty,
}

impl UserReply {
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Found(user) => Some(user),
            _ => None,
        }
    }

    /// Fixed error text for the lookup sentinels.
    pub fn error_message(&self) -> Option<&'static str> {
        match self {
            Self::NotFound => Some(USER_NOT_FOUND),
            Self::LookupFailed => Some(LOOKUP_FAILED),
            Self::Found(_) | Self::Empty => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteStatus {
    Deleted,
    CannotDelete,
}

impl DeleteStatus {
    pub fn message(self) -> &'static str {
        match self {
            Self::Deleted => USER_DELETED,
            Self::CannotDelete => CANNOT_DELETE,
        }
    }
}
