use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Entity, Resource};
use crate::database::Collection;
use crate::validation::{self, Schema};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StudentStatus {
    Active,
    Inactive,
    Graduated,
    Dropped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CivilStatus {
    Single,
    Married,
    Divorced,
    Widowed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Student {
    #[serde(rename = "Student_ID")]
    pub student_id: i64,
    pub student_status: StudentStatus,
    pub year_level: u8,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    pub address: String,
    pub email: String,
    pub phone: i64,
    pub date_of_birth: NaiveDate,
    pub place_of_birth: String,
    pub sex: Sex,
    pub religion: String,
    pub nationality: String,
    pub civil_status: CivilStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_address: Option<String>,
    #[serde(rename = "Course_ID")]
    pub course_id: i64,
    #[serde(rename = "Subject_ID")]
    pub subject_id: i64,
    #[serde(rename = "Enrollment_ID")]
    pub enrollment_id: i64,
}

impl Entity for Student {
    const COLLECTION: Collection = Collection::Students;

    fn key(&self) -> String {
        self.student_id.to_string()
    }
}

impl Resource for Student {
    const LABEL: &'static str = "Student";
    const ID_FIELD: &'static str = "Student_ID";

    fn id(&self) -> i64 {
        self.student_id
    }

    fn schema() -> &'static Schema {
        &validation::STUDENT
    }
}
