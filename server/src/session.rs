use actix_identity::Identity;
use actix_web::{
    http::header,
    web::{block, Data},
    HttpResponse,
};

use db::{get_conn, models::User, Connection, DbPool};
use errors::Error;

/// Checks a connection out for the request and resolves the signed in user
/// from the session cookie. A session naming a user that no longer exists
/// counts as no session.
pub async fn load_session(
    id: &Identity,
    pool: &Data<DbPool>,
) -> Result<(Connection, Option<User>), Error> {
    let session_name = id.identity();
    let pool = pool.clone();

    block(move || -> Result<_, Error> {
        let mut conn = get_conn(&pool)?;
        let user = match session_name {
            Some(name) => User::find_by_name(&mut conn, &name)?,
            None => None,
        };
        Ok((conn, user))
    })
    .await?
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}
