use crate::framework::{Resource, ResourceEntity, Value};
use serde::Serialize;

/// A knowledge-based authentication quiz generated for a person.
pub struct QuestionSet;

impl ResourceEntity for QuestionSet {
    const NAME: &'static str = "question_set";
    const PATH: &'static str = "/question_sets";
}

/// One answer submitted when scoring a question set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Answer {
    pub question_id: i64,
    pub answer_id: i64,
}

impl Resource<QuestionSet> {
    pub fn person_id(&self) -> Option<&str> {
        self.get_str("person_id")
    }

    /// Percentage of correct answers, present once scored.
    pub fn score(&self) -> Option<f64> {
        self.get_f64("score")
    }

    pub fn questions(&self) -> &[Value] {
        self.get_list("questions")
    }

    /// Seconds allowed to answer.
    pub fn time_limit(&self) -> Option<i64> {
        self.get_i64("time_limit")
    }

    pub fn is_expired(&self) -> bool {
        self.get_bool("expired").unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accessors() {
        let set = Resource::<QuestionSet>::from_json(json!({
            "id": "qs_1",
            "person_id": "p_1",
            "score": 80.0,
            "questions": [{ "id": 1 }, { "id": 2 }],
            "time_limit": 0
        }))
        .unwrap();

        assert_eq!(set.person_id(), Some("p_1"));
        assert_eq!(set.score(), Some(80.0));
        assert_eq!(set.questions().len(), 2);
        assert_eq!(set.time_limit(), Some(0));
        assert!(!set.is_expired());
    }
}
