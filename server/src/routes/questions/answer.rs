use actix_identity::Identity;
use actix_web::{
    web::{block, Data, Form, Path},
    HttpResponse,
};
use minijinja::context;
use serde::Deserialize;
use validator::Validate;

use auth::{authorize, Requirement};
use db::{models::Question, DbPool};
use errors::Error;

use crate::session::{load_session, redirect};
use crate::templates::Templates;
use crate::validate::validate;

#[derive(Deserialize, Validate)]
pub struct AnswerRequest {
    #[validate(length(min = 1, message = "Answer is required"))]
    answer: String,
}

pub async fn answer_form(
    id: Identity,
    pool: Data<DbPool>,
    templates: Data<Templates>,
    path: Path<i32>,
) -> Result<HttpResponse, Error> {
    let question_id = path.into_inner();
    let (mut conn, user) = load_session(&id, &pool).await?;
    let user = match authorize(user, Requirement::Expert) {
        Ok(user) => user,
        Err(denied) => return Ok(redirect(denied.location())),
    };

    let question = block(move || Question::find(&mut conn, question_id)).await??;

    templates.render("answer.html", context! { user => user, question => question })
}

/// Any expert may answer any question, not only the ones addressed to them.
/// The body is only looked at once the session passes the expert check.
pub async fn answer(
    id: Identity,
    pool: Data<DbPool>,
    templates: Data<Templates>,
    path: Path<i32>,
    params: Option<Form<AnswerRequest>>,
) -> Result<HttpResponse, Error> {
    let question_id = path.into_inner();
    let (mut conn, user) = load_session(&id, &pool).await?;
    let user = match authorize(user, Requirement::Expert) {
        Ok(user) => user,
        Err(denied) => return Ok(redirect(denied.location())),
    };
    let params = params.ok_or_else(|| Error::BadRequest("Missing answer".to_string()))?;

    if let Err(err) = validate(&params) {
        let question = block(move || Question::find(&mut conn, question_id)).await??;
        return templates.render(
            "answer.html",
            context! { user => user, question => question, error => err.first_message() },
        );
    }

    let answer_text = params.into_inner().answer;
    let updated = block(move || Question::answer(&mut conn, question_id, &answer_text)).await??;
    if updated == 0 {
        warn!("{} answered unknown question {}", user.name, question_id);
    } else {
        info!("{} answered question {}", user.name, question_id);
    }

    Ok(redirect("/unanswered"))
}
