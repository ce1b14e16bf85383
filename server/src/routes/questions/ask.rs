use actix_identity::Identity;
use actix_web::{
    web::{block, Data, Form},
    HttpResponse,
};
use minijinja::context;
use serde::Deserialize;
use validator::Validate;

use auth::{authorize, Requirement};
use db::{
    models::{Question, User},
    DbPool,
};
use errors::Error;

use crate::session::{load_session, redirect};
use crate::templates::Templates;
use crate::validate::validate;

pub const NOT_AN_EXPERT: &str = "Please choose one of the listed experts";

#[derive(Deserialize, Validate)]
pub struct AskRequest {
    #[validate(length(min = 1, message = "Question is required"))]
    question: String,
    expert: i32,
}

pub async fn ask_form(
    id: Identity,
    pool: Data<DbPool>,
    templates: Data<Templates>,
) -> Result<HttpResponse, Error> {
    let (mut conn, user) = load_session(&id, &pool).await?;
    let user = match authorize(user, Requirement::Session) {
        Ok(user) => user,
        Err(denied) => return Ok(redirect(denied.location())),
    };

    let experts = block(move || User::find_experts(&mut conn)).await??;

    templates.render("ask.html", context! { user => user, experts => experts })
}

/// The chosen expert is checked against the expert list, so a hand crafted
/// form cannot address a question to a regular user. The body is only looked
/// at once the session is known.
pub async fn ask(
    id: Identity,
    pool: Data<DbPool>,
    templates: Data<Templates>,
    params: Option<Form<AskRequest>>,
) -> Result<HttpResponse, Error> {
    let (mut conn, user) = load_session(&id, &pool).await?;
    let user = match authorize(user, Requirement::Session) {
        Ok(user) => user,
        Err(denied) => return Ok(redirect(denied.location())),
    };
    let params =
        params.ok_or_else(|| Error::BadRequest("Missing question or expert".to_string()))?;

    let validation = validate(&params).map_err(|err| err.first_message());
    let AskRequest { question, expert } = params.into_inner();
    let asked_by_id = user.id;

    let (experts, outcome, question) = block(move || -> Result<_, Error> {
        let experts = User::find_experts(&mut conn)?;
        let outcome = match validation {
            Err(message) => Err(message),
            Ok(()) if !experts.iter().any(|candidate| candidate.id == expert) => {
                Err(NOT_AN_EXPERT.to_string())
            }
            Ok(()) => {
                Question::create(&mut conn, &question, asked_by_id, expert)?;
                Ok(())
            }
        };
        Ok((experts, outcome, question))
    })
    .await??;

    match outcome {
        Ok(()) => {
            info!("{} asked a question of user {}", user.name, expert);
            Ok(redirect("/"))
        }
        Err(message) => {
            if message == NOT_AN_EXPERT {
                warn!("{} tried to ask non-expert user {}", user.name, expert);
            }
            templates.render(
                "ask.html",
                context! {
                    user => user,
                    experts => experts,
                    question => question,
                    error => message,
                },
            )
        }
    }
}
