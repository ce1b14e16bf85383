table! {
    questions (id) {
        id -> Integer,
        question_text -> Text,
        answer_text -> Nullable<Text>,
        asked_by_id -> Integer,
        expert_id -> Integer,
    }
}

table! {
    users (id) {
        id -> Integer,
        name -> Text,
        password -> Text,
        expert -> Bool,
        admin -> Bool,
    }
}

allow_tables_to_appear_in_same_query!(questions, users,);
