#[macro_use]
extern crate log;

use std::io;

use actix_web::{
    http::header::ContentType, middleware::Logger, web, web::Data, App, HttpResponse, HttpServer,
};
use dotenv::dotenv;

mod config;
mod routes;
mod session;
mod templates;
mod tests;
mod validate;

use crate::config::Config;
use crate::routes::routes;
use crate::templates::Templates;

fn into_io_error(err: errors::Error) -> io::Error {
    io::Error::new(io::ErrorKind::Other, err.to_string())
}

#[actix_rt::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    let pool = db::new_pool(&config.database_url).map_err(into_io_error)?;
    db::run_migrations(&pool).map_err(into_io_error)?;

    let pool = Data::new(pool);
    let templates = Data::new(Templates::new().map_err(into_io_error)?);
    let session_key = config.session_key;

    info!("Listening on {}", config.bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(auth::get_identity_service(&session_key))
            .wrap(Logger::default())
            .app_data(pool.clone())
            .app_data(templates.clone())
            .configure(routes)
            .default_service(web::route().to(|| async {
                HttpResponse::NotFound()
                    .content_type(ContentType::plaintext())
                    .body("Not Found")
            }))
    })
    .bind(&config.bind_address)?
    .run()
    .await
}
