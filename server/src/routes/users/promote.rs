use actix_identity::Identity;
use actix_web::{
    web::{block, Data, Path},
    HttpResponse,
};

use auth::{authorize, Denied, Requirement};
use db::{models::User, DbPool};
use errors::Error;

use crate::session::{load_session, redirect};

/// Only admins may promote; a bare session is not enough.
pub async fn promote(
    id: Identity,
    pool: Data<DbPool>,
    path: Path<i32>,
) -> Result<HttpResponse, Error> {
    let user_id = path.into_inner();
    let (mut conn, user) = load_session(&id, &pool).await?;
    let user = match authorize(user, Requirement::Admin) {
        Ok(user) => user,
        Err(denied) => {
            if denied == Denied::Home {
                warn!("Non-admin tried to promote user {}", user_id);
            }
            return Ok(redirect(denied.location()));
        }
    };

    let updated = block(move || User::promote(&mut conn, user_id)).await??;
    if updated > 0 {
        info!("{} promoted user {} to expert", user.name, user_id);
    }

    Ok(redirect("/users"))
}
