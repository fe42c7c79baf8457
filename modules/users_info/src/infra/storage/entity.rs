use crate::contract::model::User;

/// Row shape of the `users` table.
#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct UserRow {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub country: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            user_id: row.user_id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            address: row.address,
            country: row.country,
        }
    }
}
