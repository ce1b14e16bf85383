use actix_web::web;

pub mod questions;
pub mod users;

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(questions::index))
        .route("/question/{id}", web::get().to(questions::view))
        .service(
            web::resource("/ask")
                .route(web::get().to(questions::ask_form))
                .route(web::post().to(questions::ask)),
        )
        .service(
            web::resource("/answer/{id}")
                .route(web::get().to(questions::answer_form))
                .route(web::post().to(questions::answer)),
        )
        .route("/unanswered", web::get().to(questions::unanswered))
        .service(
            web::resource("/register")
                .route(web::get().to(users::register_form))
                .route(web::post().to(users::register)),
        )
        .service(
            web::resource("/login")
                .route(web::get().to(users::login_form))
                .route(web::post().to(users::login)),
        )
        .route("/logout", web::get().to(users::logout))
        .route("/users", web::get().to(users::list))
        .route("/promote/{id}", web::get().to(users::promote));
}
