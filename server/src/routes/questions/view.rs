use actix_identity::Identity;
use actix_web::{
    web::{block, Data, Path},
    HttpResponse,
};
use minijinja::context;

use db::{models::Question, DbPool};
use errors::Error;

use crate::session::load_session;
use crate::templates::Templates;

/// An unknown or non-numeric id renders the page without a question rather
/// than a 404.
pub async fn view(
    id: Identity,
    pool: Data<DbPool>,
    templates: Data<Templates>,
    path: Path<String>,
) -> Result<HttpResponse, Error> {
    let question_id = path.into_inner().parse::<i32>().ok();
    let (mut conn, user) = load_session(&id, &pool).await?;
    let question = match question_id {
        Some(question_id) => {
            block(move || Question::find_with_names(&mut conn, question_id)).await??
        }
        None => None,
    };

    templates.render("question.html", context! { user => user, question => question })
}

#[cfg(test)]
mod tests {
    use db::{get_conn, models::Question};

    use crate::tests::helpers::{create_user, get_service, test_db, test_get};

    #[actix_rt::test]
    async fn test_view_question() {
        let db = test_db();
        let asker = create_user(&db.pool, "asker", false, false);
        let expert = create_user(&db.pool, "maru", true, false);
        let question_id = {
            let mut conn = get_conn(&db.pool).unwrap();
            Question::create(&mut conn, "Who expands first?", asker.id, expert.id).unwrap();
            Question::find_unanswered_for_expert(&mut conn, expert.id).unwrap()[0].id
        };
        let app = get_service(&db.pool).await;

        let res = test_get(&app, &format!("/question/{}", question_id), None).await;
        assert_eq!(res.status, 200);
        assert!(res.body.contains("Who expands first?"));
        assert!(res.body.contains("Asked by asker to maru"));
        assert!(res.body.contains("Not answered yet."));
    }

    #[actix_rt::test]
    async fn test_view_missing_question_renders_empty() {
        let db = test_db();
        let app = get_service(&db.pool).await;

        let res = test_get(&app, "/question/42", None).await;
        assert_eq!(res.status, 200);
        assert!(!res.body.contains("Asked by"));
    }

    #[actix_rt::test]
    async fn test_view_non_numeric_id_renders_empty() {
        let db = test_db();
        let app = get_service(&db.pool).await;

        let res = test_get(&app, "/question/abc", None).await;
        assert_eq!(res.status, 200);
        assert!(!res.body.contains("Asked by"));
        assert!(res.body.contains("href=\"/login\""));
    }
}
