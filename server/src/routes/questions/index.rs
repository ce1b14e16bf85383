use actix_identity::Identity;
use actix_web::{
    web::{block, Data},
    HttpResponse,
};
use minijinja::context;

use db::{models::Question, DbPool};
use errors::Error;

use crate::session::load_session;
use crate::templates::Templates;

pub async fn index(
    id: Identity,
    pool: Data<DbPool>,
    templates: Data<Templates>,
) -> Result<HttpResponse, Error> {
    let (mut conn, user) = load_session(&id, &pool).await?;
    let questions = block(move || Question::find_answered(&mut conn)).await??;

    templates.render("home.html", context! { user => user, questions => questions })
}
