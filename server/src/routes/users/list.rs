use actix_identity::Identity;
use actix_web::{
    web::{block, Data},
    HttpResponse,
};
use minijinja::context;

use auth::{authorize, Requirement};
use db::{models::User, DbPool};
use errors::Error;

use crate::session::{load_session, redirect};
use crate::templates::Templates;

pub async fn list(
    id: Identity,
    pool: Data<DbPool>,
    templates: Data<Templates>,
) -> Result<HttpResponse, Error> {
    let (mut conn, user) = load_session(&id, &pool).await?;
    let user = match authorize(user, Requirement::Admin) {
        Ok(user) => user,
        Err(denied) => return Ok(redirect(denied.location())),
    };

    let users = block(move || User::find_all(&mut conn)).await??;

    templates.render("users.html", context! { user => user, users => users })
}
