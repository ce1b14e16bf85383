use actix_identity::Identity;
use actix_web::{
    web::{block, Data, Form},
    HttpResponse,
};
use minijinja::context;

use db::{models::User, DbPool};
use errors::Error;

use crate::routes::users::Credentials;
use crate::session::{load_session, redirect};
use crate::templates::Templates;
use crate::validate::validate;

pub const INVALID_PASSWORD: &str = "Invalid password";
pub const INVALID_USERNAME: &str = "Invalid username";

pub async fn login_form(
    id: Identity,
    pool: Data<DbPool>,
    templates: Data<Templates>,
) -> Result<HttpResponse, Error> {
    let (_, user) = load_session(&id, &pool).await?;

    templates.render("login.html", context! { user => user })
}

pub async fn login(
    id: Identity,
    pool: Data<DbPool>,
    templates: Data<Templates>,
    params: Form<Credentials>,
) -> Result<HttpResponse, Error> {
    let (mut conn, user) = load_session(&id, &pool).await?;
    if let Err(err) = validate(&params) {
        return templates.render(
            "login.html",
            context! {
                user => user,
                name => params.name.as_str(),
                error => err.first_message(),
            },
        );
    }

    let Credentials { name, password } = params.into_inner();
    let verified = block(move || -> Result<_, Error> {
        let found = User::find_by_name(&mut conn, &name)?;
        Ok(match found {
            Some(found) if found.verify_password(&password) => Ok(found.name),
            Some(found) => Err((found.name, INVALID_PASSWORD)),
            None => Err((name, INVALID_USERNAME)),
        })
    })
    .await??;

    match verified {
        Ok(name) => {
            id.remember(name);
            Ok(redirect("/"))
        }
        Err((name, message)) => {
            warn!("Failed login for {} - {}", name, message);
            templates.render(
                "login.html",
                context! { user => user, name => name, error => message },
            )
        }
    }
}
