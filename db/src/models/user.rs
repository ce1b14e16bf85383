use diesel::{self, ExpressionMethods, OptionalExtension, QueryDsl, RunQueryDsl, SqliteConnection};
use serde::{Deserialize, Serialize};

use auth::{hash_password, verify_password, RoleFlags};
use errors::Error;

use crate::schema::users::{self, table};

#[derive(Clone, Debug, Deserialize, Identifiable, Queryable, Serialize)]
#[diesel(table_name = users)]
pub struct User {
    pub id: i32,
    pub name: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub expert: bool,
    pub admin: bool,
}

#[derive(Insertable)]
#[diesel(table_name = users)]
pub struct NewUser<'a> {
    pub name: &'a str,
    pub password: &'a str,
    pub expert: bool,
    pub admin: bool,
}

/// A user row without the password hash, for the user management page.
#[derive(Debug, Deserialize, Queryable, Serialize)]
pub struct UserDetails {
    pub id: i32,
    pub name: String,
    pub expert: bool,
    pub admin: bool,
}

#[derive(Debug, Deserialize, Queryable, Serialize)]
pub struct Expert {
    pub id: i32,
    pub name: String,
}

impl RoleFlags for User {
    fn is_expert(&self) -> bool {
        self.expert
    }

    fn is_admin(&self) -> bool {
        self.admin
    }
}

impl User {
    /// Registers a plain user: neither expert nor admin.
    pub fn create(conn: &mut SqliteConnection, name: &str, password: &str) -> Result<User, Error> {
        let password = hash_password(password)?;

        diesel::insert_into(table)
            .values(NewUser {
                name,
                password: &password,
                expert: false,
                admin: false,
            })
            .execute(conn)?;

        let user = table.filter(users::name.eq(name)).first::<User>(conn)?;

        Ok(user)
    }

    pub fn find_by_name(conn: &mut SqliteConnection, name: &str) -> Result<Option<User>, Error> {
        let user = table
            .filter(users::name.eq(name))
            .first::<User>(conn)
            .optional()?;

        Ok(user)
    }

    pub fn find(conn: &mut SqliteConnection, user_id: i32) -> Result<User, Error> {
        let user = table.find(user_id).first::<User>(conn)?;

        Ok(user)
    }

    pub fn find_all(conn: &mut SqliteConnection) -> Result<Vec<UserDetails>, Error> {
        use crate::schema::users::dsl::{admin, expert, id, name, users};

        let results = users
            .select((id, name, expert, admin))
            .order(id)
            .get_results::<UserDetails>(conn)?;

        Ok(results)
    }

    pub fn find_experts(conn: &mut SqliteConnection) -> Result<Vec<Expert>, Error> {
        use crate::schema::users::dsl::{expert, id, name, users};

        let results = users
            .select((id, name))
            .filter(expert.eq(true))
            .order(id)
            .get_results::<Expert>(conn)?;

        Ok(results)
    }

    /// Returns the number of rows touched, zero when the id is unknown.
    pub fn promote(conn: &mut SqliteConnection, user_id: i32) -> Result<usize, Error> {
        let updated = diesel::update(table.find(user_id))
            .set(users::expert.eq(true))
            .execute(conn)?;

        Ok(updated)
    }

    pub fn grant_admin(conn: &mut SqliteConnection, user_id: i32) -> Result<usize, Error> {
        let updated = diesel::update(table.find(user_id))
            .set(users::admin.eq(true))
            .execute(conn)?;

        Ok(updated)
    }

    pub fn verify_password(&self, password: &str) -> bool {
        verify_password(&self.password, password)
    }
}
