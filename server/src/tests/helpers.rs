use actix_http::Request;
use actix_service::Service;
use actix_web::{
    body::MessageBody, cookie::Cookie, dev::ServiceResponse, http::header, test, web::Data, App,
    Error,
};
use serde::Serialize;
use tempfile::TempDir;

use auth::{get_identity_service, SESSION_NAME};
use db::{get_conn, models::User, new_pool, run_migrations, DbPool};

use crate::routes::routes;
use crate::templates::Templates;

const TEST_SESSION_KEY: [u8; 64] = [7; 64];

/// A migrated database in a temporary directory, removed on drop.
pub struct TestDb {
    pub pool: DbPool,
    _dir: TempDir,
}

pub fn test_db() -> TestDb {
    let dir = tempfile::tempdir().unwrap();
    let url = dir.path().join("test.db");
    let pool = new_pool(url.to_str().unwrap()).unwrap();
    run_migrations(&pool).unwrap();

    TestDb { pool, _dir: dir }
}

pub async fn get_service(
    pool: &DbPool,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
    test::init_service(
        App::new()
            .wrap(get_identity_service(&TEST_SESSION_KEY))
            .app_data(Data::new(pool.clone()))
            .app_data(Data::new(Templates::new().unwrap()))
            .configure(routes),
    )
    .await
}

pub struct TestResponse {
    pub status: u16,
    pub location: Option<String>,
    pub body: String,
    pub session: Option<Cookie<'static>>,
}

async fn read_response<B: MessageBody>(res: ServiceResponse<B>) -> TestResponse {
    let status = res.status().as_u16();
    let location = res
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(String::from);
    let session = res
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_NAME)
        .map(|cookie| cookie.into_owned());
    let body = test::read_body(res).await;

    TestResponse {
        status,
        location,
        body: String::from_utf8(body.to_vec()).unwrap(),
        session,
    }
}

/// Helper for HTTP GET integration tests
pub async fn test_get<S, B>(
    app: &S,
    route: &str,
    session: Option<&Cookie<'static>>,
) -> TestResponse
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let mut req = test::TestRequest::get().uri(route);
    if let Some(cookie) = session {
        req = req.cookie(cookie.clone());
    }

    let res = test::call_service(app, req.to_request()).await;
    read_response(res).await
}

/// Helper for HTTP POST integration tests, sending `params` as a url encoded form
pub async fn test_post<S, B, T>(
    app: &S,
    route: &str,
    params: T,
    session: Option<&Cookie<'static>>,
) -> TestResponse
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
    T: Serialize,
{
    let mut req = test::TestRequest::post().uri(route).set_form(&params);
    if let Some(cookie) = session {
        req = req.cookie(cookie.clone());
    }

    let res = test::call_service(app, req.to_request()).await;
    read_response(res).await
}

pub fn create_user(pool: &DbPool, name: &str, expert: bool, admin: bool) -> User {
    let mut conn = get_conn(pool).unwrap();
    let user = User::create(&mut conn, name, "password").unwrap();
    if expert {
        User::promote(&mut conn, user.id).unwrap();
    }
    if admin {
        User::grant_admin(&mut conn, user.id).unwrap();
    }

    User::find(&mut conn, user.id).unwrap()
}

/// Logs in a user made by [`create_user`] and returns the session cookie.
pub async fn login<S, B>(app: &S, name: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let res = test_post(
        app,
        "/login",
        [("name", name), ("password", "password")],
        None,
    )
    .await;
    assert_eq!(res.status, 302, "login failed: {}", res.body);

    res.session.expect("login did not set a session cookie")
}
