use actix_identity::Identity;
use actix_web::{
    web::{block, Data, Form},
    HttpResponse,
};
use minijinja::context;
use serde::Deserialize;
use validator::Validate;

use db::{models::User, DbPool};
use errors::Error;

use crate::session::{load_session, redirect};
use crate::templates::Templates;
use crate::validate::validate;

pub const USER_EXISTS: &str = "User already exists!";

#[derive(Clone, Deserialize, Validate)]
pub struct Credentials {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

pub async fn register_form(
    id: Identity,
    pool: Data<DbPool>,
    templates: Data<Templates>,
) -> Result<HttpResponse, Error> {
    let (_, user) = load_session(&id, &pool).await?;

    templates.render("register.html", context! { user => user })
}

/// New accounts are neither experts nor admins, and are signed in straight away.
/// A taken name is reported before any other problem with the form.
pub async fn register(
    id: Identity,
    pool: Data<DbPool>,
    templates: Data<Templates>,
    params: Form<Credentials>,
) -> Result<HttpResponse, Error> {
    let (mut conn, user) = load_session(&id, &pool).await?;

    let name = params.name.clone();
    let (mut conn, taken) = block(move || -> Result<_, Error> {
        let taken = User::find_by_name(&mut conn, &name)?.is_some();
        Ok((conn, taken))
    })
    .await??;

    let error = if taken {
        Some(USER_EXISTS.to_string())
    } else {
        validate(&params).err().map(|err| err.first_message())
    };
    if let Some(error) = error {
        return templates.render(
            "register.html",
            context! { user => user, name => params.name.as_str(), error => error },
        );
    }

    let Credentials { name, password } = params.into_inner();
    let created = block(move || -> Result<_, Error> {
        // the unique index still catches a registration racing this one
        match User::create(&mut conn, &name, &password) {
            Ok(created) => Ok(Some(created)),
            Err(Error::BadRequest(_)) => Ok(None),
            Err(err) => Err(err),
        }
    })
    .await??;

    match created {
        Some(created) => {
            info!("Registered user {}", created.name);
            id.remember(created.name);
            Ok(redirect("/"))
        }
        None => templates.render("register.html", context! { user => user, error => USER_EXISTS }),
    }
}
