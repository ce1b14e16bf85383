#[macro_use]
extern crate diesel;
#[macro_use]
extern crate log;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use errors::Error;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type Connection = PooledConnection<ConnectionManager<SqliteConnection>>;
pub mod models;
pub mod schema;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[derive(Debug)]
struct ConnectionOptions;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

pub fn get_conn(pool: &DbPool) -> Result<Connection, Error> {
    pool.get().map_err(|err| {
        error!("Failed to get connection - {}", err.to_string());
        err.into()
    })
}

pub fn new_pool(database_url: &str) -> Result<DbPool, Error> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);

    Pool::builder()
        .connection_customizer(Box::new(ConnectionOptions))
        .build(manager)
        .map_err(|err| {
            error!("Failed to create db pool - {}", err.to_string());
            err.into()
        })
}

pub fn run_migrations(pool: &DbPool) -> Result<(), Error> {
    let mut conn = get_conn(pool)?;
    let applied = conn.run_pending_migrations(MIGRATIONS).map_err(|err| {
        error!("Failed to run migrations - {}", err);
        Error::InternalServerError(err.to_string())
    })?;

    for version in applied {
        info!("Applied migration {}", version);
    }

    Ok(())
}
