use diesel::{
    self, ExpressionMethods, JoinOnDsl, OptionalExtension, QueryDsl, RunQueryDsl, SqliteConnection,
};
use serde::{Deserialize, Serialize};

use errors::Error;

use crate::schema::questions::{self, table};
use crate::schema::users;

#[derive(Debug, Deserialize, Identifiable, Queryable, Serialize)]
#[diesel(table_name = questions)]
pub struct Question {
    pub id: i32,
    pub question_text: String,
    pub answer_text: Option<String>,
    pub asked_by_id: i32,
    pub expert_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = questions)]
pub struct NewQuestion<'a> {
    pub question_text: &'a str,
    pub asked_by_id: i32,
    pub expert_id: i32,
}

/// Row of the home page listing.
#[derive(Debug, Deserialize, Queryable, Serialize)]
pub struct AnsweredQuestion {
    pub question_id: i32,
    pub question_text: String,
    pub asker_name: String,
    pub expert_name: String,
}

#[derive(Debug, Deserialize, Queryable, Serialize)]
pub struct QuestionDetails {
    pub question_text: String,
    pub answer_text: Option<String>,
    pub asker_name: String,
    pub expert_name: String,
}

#[derive(Debug, Deserialize, Queryable, Serialize)]
pub struct UnansweredQuestion {
    pub id: i32,
    pub question_text: String,
    pub asker_name: String,
}

impl Question {
    pub fn create(
        conn: &mut SqliteConnection,
        question_text: &str,
        asked_by_id: i32,
        expert_id: i32,
    ) -> Result<usize, Error> {
        let inserted = diesel::insert_into(table)
            .values(NewQuestion {
                question_text,
                asked_by_id,
                expert_id,
            })
            .execute(conn)?;

        Ok(inserted)
    }

    pub fn find(conn: &mut SqliteConnection, question_id: i32) -> Result<Option<Question>, Error> {
        let question = table.find(question_id).first::<Question>(conn).optional()?;

        Ok(question)
    }

    pub fn answer(
        conn: &mut SqliteConnection,
        question_id: i32,
        answer_text: &str,
    ) -> Result<usize, Error> {
        let updated = diesel::update(table.find(question_id))
            .set(questions::answer_text.eq(answer_text))
            .execute(conn)?;

        Ok(updated)
    }

    pub fn find_answered(conn: &mut SqliteConnection) -> Result<Vec<AnsweredQuestion>, Error> {
        let (askers, experts) = diesel::alias!(users as askers, users as experts);

        let results = table
            .inner_join(askers.on(askers.field(users::id).eq(questions::asked_by_id)))
            .inner_join(experts.on(experts.field(users::id).eq(questions::expert_id)))
            .filter(questions::answer_text.is_not_null())
            .select((
                questions::id,
                questions::question_text,
                askers.field(users::name),
                experts.field(users::name),
            ))
            .order(questions::id)
            .load::<AnsweredQuestion>(conn)?;

        Ok(results)
    }

    pub fn find_with_names(
        conn: &mut SqliteConnection,
        question_id: i32,
    ) -> Result<Option<QuestionDetails>, Error> {
        let (askers, experts) = diesel::alias!(users as askers, users as experts);

        let details = table
            .inner_join(askers.on(askers.field(users::id).eq(questions::asked_by_id)))
            .inner_join(experts.on(experts.field(users::id).eq(questions::expert_id)))
            .filter(questions::id.eq(question_id))
            .select((
                questions::question_text,
                questions::answer_text,
                askers.field(users::name),
                experts.field(users::name),
            ))
            .first::<QuestionDetails>(conn)
            .optional()?;

        Ok(details)
    }

    pub fn find_unanswered_for_expert(
        conn: &mut SqliteConnection,
        expert_id: i32,
    ) -> Result<Vec<UnansweredQuestion>, Error> {
        let results = table
            .inner_join(users::table.on(users::id.eq(questions::asked_by_id)))
            .filter(questions::answer_text.is_null())
            .filter(questions::expert_id.eq(expert_id))
            .select((questions::id, questions::question_text, users::name))
            .order(questions::id)
            .load::<UnansweredQuestion>(conn)?;

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::Question;
    use crate::get_conn;
    use crate::models::User;
    use crate::test_helpers::test_db;

    #[test]
    fn test_unanswered_then_answered() {
        let db = test_db();
        let mut conn = get_conn(&db.pool).unwrap();

        let asker = User::create(&mut conn, "asker", "secret").unwrap();
        let expert = User::create(&mut conn, "expert", "secret").unwrap();
        User::promote(&mut conn, expert.id).unwrap();

        Question::create(&mut conn, "Who wins?", asker.id, expert.id).unwrap();
        assert!(Question::find_answered(&mut conn).unwrap().is_empty());

        let pending = Question::find_unanswered_for_expert(&mut conn, expert.id).unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].question_text, "Who wins?");
        assert_eq!(pending[0].asker_name, "asker");

        assert_eq!(Question::answer(&mut conn, pending[0].id, "Serral").unwrap(), 1);
        assert!(Question::find_unanswered_for_expert(&mut conn, expert.id)
            .unwrap()
            .is_empty());

        let answered = Question::find_answered(&mut conn).unwrap();
        assert_eq!(answered.len(), 1);
        assert_eq!(answered[0].question_id, pending[0].id);
        assert_eq!(answered[0].asker_name, "asker");
        assert_eq!(answered[0].expert_name, "expert");
    }

    #[test]
    fn test_unanswered_is_scoped_to_expert() {
        let db = test_db();
        let mut conn = get_conn(&db.pool).unwrap();

        let asker = User::create(&mut conn, "asker", "secret").unwrap();
        let first = User::create(&mut conn, "first", "secret").unwrap();
        let second = User::create(&mut conn, "second", "secret").unwrap();

        Question::create(&mut conn, "For first", asker.id, first.id).unwrap();
        Question::create(&mut conn, "For second", asker.id, second.id).unwrap();

        let pending = Question::find_unanswered_for_expert(&mut conn, second.id).unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].question_text, "For second");
    }

    #[test]
    fn test_find_with_names() {
        let db = test_db();
        let mut conn = get_conn(&db.pool).unwrap();

        let asker = User::create(&mut conn, "asker", "secret").unwrap();
        let expert = User::create(&mut conn, "expert", "secret").unwrap();
        Question::create(&mut conn, "Who wins?", asker.id, expert.id).unwrap();
        let question = Question::find_unanswered_for_expert(&mut conn, expert.id)
            .unwrap()
            .remove(0);

        let details = Question::find_with_names(&mut conn, question.id)
            .unwrap()
            .unwrap();
        assert_eq!(details.question_text, "Who wins?");
        assert_eq!(details.answer_text, None);
        assert_eq!(details.asker_name, "asker");
        assert_eq!(details.expert_name, "expert");

        assert!(Question::find_with_names(&mut conn, 9999).unwrap().is_none());
        assert!(Question::find(&mut conn, 9999).unwrap().is_none());
    }

    #[test]
    fn test_unknown_users_are_rejected() {
        let db = test_db();
        let mut conn = get_conn(&db.pool).unwrap();

        assert!(Question::create(&mut conn, "Anyone?", 1, 2).is_err());
    }
}
