use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::contract::model::{DeleteStatus, NewUser, User, UserReply, UserUpdate};

/// Keys an add request must carry.
pub const REQUIRED_FIELDS: [&str; 5] = ["name", "email", "phone", "address", "country"];

/// REST DTO for user representation with serde/utoipa
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub country: String,
}

/// REST DTO for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateUserReq {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub country: String,
}

/// REST DTO for replacing a user
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateUserReq {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusDto {
    pub status: String,
}

/// Serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EmptyDto {}

/// Body of every single-user reply: the user, a fixed error, or `{}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum UserReplyDto {
    User(UserDto),
    Error(ErrorDto),
    Empty(EmptyDto),
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            address: user.address,
            country: user.country,
        }
    }
}

impl From<UserReply> for UserReplyDto {
    fn from(reply: UserReply) -> Self {
        if let Some(message) = reply.error_message() {
            return Self::Error(ErrorDto {
                error: message.to_string(),
            });
        }
        match reply {
            UserReply::Found(user) => Self::User(user.into()),
            _ => Self::Empty(EmptyDto::default()),
        }
    }
}

impl From<DeleteStatus> for StatusDto {
    fn from(status: DeleteStatus) -> Self {
        Self {
            status: status.message().to_string(),
        }
    }
}

/// Text stored for a JSON field value.
///
/// Strings are stored as-is, numbers as their decimal text and booleans as
/// `1`/`0`. `null`, arrays and objects have no text form and map to `None`,
/// which the table rejects.
pub fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Build insert input from a JSON object.
///
/// `None` when the body is not an object or any required key is absent.
pub fn new_user_from_json(body: &Value) -> Option<NewUser> {
    let obj = body.as_object()?;
    if !REQUIRED_FIELDS.iter().all(|key| obj.contains_key(*key)) {
        return None;
    }
    Some(fields_from_object(obj))
}

/// What a well-formed update body asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateBody {
    /// Replace the fields of the row with this id.
    Replace(UserUpdate),
    /// The id can never equal an integer key, so no row changes and the
    /// read-back finds nothing.
    NoMatchingRow,
}

/// How a JSON id compares against the integer `user_id` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IdMatch {
    Key(i64),
    NoRow,
    Unbindable,
}

/// Integral floats and numeric text compare equal to the integer key under
/// the column's integer affinity; booleans bind as 1/0.
fn id_match(value: &Value) -> IdMatch {
    match value {
        Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(id), _, _) => IdMatch::Key(id),
            // integers past i64 cannot be bound
            (None, Some(_), _) => IdMatch::Unbindable,
            (None, None, Some(f)) => integral(f).map_or(IdMatch::NoRow, IdMatch::Key),
            (None, None, None) => IdMatch::NoRow,
        },
        Value::String(s) => {
            let s = s.trim();
            match s.parse::<i64>() {
                Ok(id) => IdMatch::Key(id),
                Err(_) => s
                    .parse::<f64>()
                    .ok()
                    .and_then(integral)
                    .map_or(IdMatch::NoRow, IdMatch::Key),
            }
        }
        Value::Bool(b) => IdMatch::Key(i64::from(*b)),
        Value::Null => IdMatch::NoRow,
        Value::Array(_) | Value::Object(_) => IdMatch::Unbindable,
    }
}

fn integral(f: f64) -> Option<i64> {
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (f.is_finite() && f.fract() == 0.0 && in_range).then_some(f as i64)
}

/// Build update input from a JSON object.
///
/// `None` (answered with `{}`) when the body is not an object, `user_id` or
/// a field key is absent, or a value cannot be bound at all.
pub fn user_update_from_json(body: &Value) -> Option<UpdateBody> {
    let obj = body.as_object()?;
    let id = obj.get("user_id")?;
    if !REQUIRED_FIELDS.iter().all(|key| obj.contains_key(*key)) {
        return None;
    }
    let unbindable_field = REQUIRED_FIELDS
        .iter()
        .any(|key| matches!(obj.get(*key), Some(Value::Array(_) | Value::Object(_))));
    if unbindable_field {
        return None;
    }

    match id_match(id) {
        IdMatch::Key(user_id) => Some(UpdateBody::Replace(UserUpdate {
            user_id,
            fields: fields_from_object(obj),
        })),
        IdMatch::NoRow => Some(UpdateBody::NoMatchingRow),
        IdMatch::Unbindable => None,
    }
}

/// Id from a path segment. Only plain ASCII digits name a row, as with an
/// unsigned integer route converter.
pub fn path_id(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

fn fields_from_object(obj: &serde_json::Map<String, Value>) -> NewUser {
    let text = |key: &str| obj.get(key).and_then(field_text);
    NewUser {
        name: text("name"),
        email: text("email"),
        phone: text("phone"),
        address: text("address"),
        country: text("country"),
    }
}
