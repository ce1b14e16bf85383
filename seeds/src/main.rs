#[macro_use]
extern crate log;

use std::{env, process};

use dotenv::dotenv;

use db::{get_conn, models::User, new_pool, run_migrations};
use errors::Error;

fn required_var(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        error!("{} must be set", key);
        process::exit(1);
    })
}

/// Creates the admin account if needed, then flags it as admin and expert.
fn seed_admin(database_url: &str, name: &str, password: &str) -> Result<User, Error> {
    let pool = new_pool(database_url)?;
    run_migrations(&pool)?;
    let mut conn = get_conn(&pool)?;

    let user = match User::find_by_name(&mut conn, name)? {
        Some(user) => {
            info!("User {} already exists, updating flags", name);
            user
        }
        None => User::create(&mut conn, name, password)?,
    };
    User::grant_admin(&mut conn, user.id)?;
    User::promote(&mut conn, user.id)?;

    User::find(&mut conn, user.id)
}

fn main() {
    dotenv().ok();
    env_logger::init();

    let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| "qa.db".to_string());
    let name = required_var("ADMIN_NAME");
    let password = required_var("ADMIN_PASSWORD");

    match seed_admin(&database_url, &name, &password) {
        Ok(user) => info!("Seeded admin {} (id {})", user.name, user.id),
        Err(err) => {
            error!("Failed to seed admin - {}", err);
            process::exit(1);
        }
    }
}
