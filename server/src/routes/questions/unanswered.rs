use actix_identity::Identity;
use actix_web::{
    web::{block, Data},
    HttpResponse,
};
use minijinja::context;

use auth::{authorize, Requirement};
use db::{models::Question, DbPool};
use errors::Error;

use crate::session::{load_session, redirect};
use crate::templates::Templates;

pub async fn unanswered(
    id: Identity,
    pool: Data<DbPool>,
    templates: Data<Templates>,
) -> Result<HttpResponse, Error> {
    let (mut conn, user) = load_session(&id, &pool).await?;
    let user = match authorize(user, Requirement::Expert) {
        Ok(user) => user,
        Err(denied) => return Ok(redirect(denied.location())),
    };

    let expert_id = user.id;
    let questions =
        block(move || Question::find_unanswered_for_expert(&mut conn, expert_id)).await??;

    templates.render(
        "unanswered.html",
        context! { user => user, questions => questions },
    )
}
