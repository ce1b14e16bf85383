use actix_web::{http::header::ContentType, HttpResponse};
use minijinja::Environment;
use serde::Serialize;

use errors::Error;

const PAGES: [(&str, &str); 9] = [
    ("layout.html", include_str!("../templates/layout.html")),
    ("home.html", include_str!("../templates/home.html")),
    ("register.html", include_str!("../templates/register.html")),
    ("login.html", include_str!("../templates/login.html")),
    ("question.html", include_str!("../templates/question.html")),
    ("answer.html", include_str!("../templates/answer.html")),
    ("ask.html", include_str!("../templates/ask.html")),
    ("unanswered.html", include_str!("../templates/unanswered.html")),
    ("users.html", include_str!("../templates/users.html")),
];

/// Page templates compiled into the binary. `.html` names are auto-escaped.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Result<Templates, Error> {
        let mut env = Environment::new();
        for (name, source) in PAGES {
            env.add_template(name, source)
                .map_err(|e| Error::TemplateError(format!("{}: {}", name, e)))?;
        }

        Ok(Templates { env })
    }

    pub fn render<S: Serialize>(&self, name: &str, context: S) -> Result<HttpResponse, Error> {
        let page = self
            .env
            .get_template(name)
            .and_then(|template| template.render(context))
            .map_err(|e| Error::TemplateError(format!("{}: {}", name, e)))?;

        Ok(HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(page))
    }
}
