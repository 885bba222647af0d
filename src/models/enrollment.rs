use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Entity, Resource};
use crate::database::Collection;
use crate::validation::{self, Schema};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    #[serde(rename = "Enrollment_ID")]
    pub enrollment_id: i64,
    #[serde(rename = "Student_ID")]
    pub student_id: i64,
    #[serde(rename = "Course_ID")]
    pub course_id: i64,
    #[serde(rename = "EnrollmentDate")]
    pub enrollment_date: NaiveDate,
}

impl Entity for Enrollment {
    const COLLECTION: Collection = Collection::Enrollments;

    fn key(&self) -> String {
        self.enrollment_id.to_string()
    }
}

impl Resource for Enrollment {
    const LABEL: &'static str = "Enrollment";
    const ID_FIELD: &'static str = "Enrollment_ID";

    fn id(&self) -> i64 {
        self.enrollment_id
    }

    fn schema() -> &'static Schema {
        &validation::ENROLLMENT
    }
}
