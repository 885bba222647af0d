use serde::{Deserialize, Serialize};

use super::{Entity, Resource};
use crate::database::Collection;
use crate::validation::{self, Schema};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    #[serde(rename = "Subject_ID")]
    pub subject_id: i64,
    #[serde(rename = "SubjectName")]
    pub subject_name: String,
    #[serde(rename = "SubjectDescription")]
    pub subject_description: String,
    #[serde(rename = "Course_ID")]
    pub course_id: i64,
}

impl Entity for Subject {
    const COLLECTION: Collection = Collection::Subjects;

    fn key(&self) -> String {
        self.subject_id.to_string()
    }
}

impl Resource for Subject {
    const LABEL: &'static str = "Subject";
    const ID_FIELD: &'static str = "Subject_ID";

    fn id(&self) -> i64 {
        self.subject_id
    }

    fn schema() -> &'static Schema {
        &validation::SUBJECT
    }
}
