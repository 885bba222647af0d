use super::{FieldKind, FieldRule, Schema};

const ID: FieldKind = FieldKind::Integer { min: None, max: None };

const fn text(max: usize) -> FieldKind {
    FieldKind::Text {
        min_len: None,
        max_len: Some(max),
    }
}

pub static STUDENT: Schema = Schema::new(&[
    FieldRule::required("Student_ID", "Student ID", ID),
    FieldRule::required(
        "StudentStatus",
        "Student Status",
        FieldKind::OneOf(&["Active", "Inactive", "Graduated", "Dropped"]),
    ),
    FieldRule::required("YearLevel", "Year Level", FieldKind::Integer { min: Some(1), max: Some(6) }),
    FieldRule::required("FirstName", "First name", text(50)),
    FieldRule::required("LastName", "Last name", text(50)),
    FieldRule::optional("MiddleName", "Middle name", text(50)),
    FieldRule::required("Address", "Address", text(255)),
    FieldRule::required("Email", "Email", FieldKind::Email),
    FieldRule::required("Phone", "Phone number", ID)
        .with_type_message("Phone number must be a valid number"),
    FieldRule::required("DateOfBirth", "Date of Birth", FieldKind::Date),
    FieldRule::required("PlaceOfBirth", "Place of Birth", text(100)),
    FieldRule::required("Sex", "Sex", FieldKind::OneOf(&["Male", "Female", "Other"])),
    FieldRule::required("Religion", "Religion", text(50)),
    FieldRule::required("Nationality", "Nationality", text(50)),
    FieldRule::required(
        "CivilStatus",
        "Civil Status",
        FieldKind::OneOf(&["Single", "Married", "Divorced", "Widowed"]),
    ),
    FieldRule::optional("Occupation", "Occupation", text(100)),
    FieldRule::optional("WorkAddress", "Work Address", text(255)),
    FieldRule::required("Course_ID", "Course ID", ID),
    FieldRule::required("Subject_ID", "Subject ID", ID),
    FieldRule::required("Enrollment_ID", "Enrollment ID", ID),
]);

pub static ENROLLMENT: Schema = Schema::new(&[
    FieldRule::required("Enrollment_ID", "Enrollment_ID", ID),
    FieldRule::required("Student_ID", "Student_ID", ID),
    FieldRule::required("Course_ID", "Course_ID", ID),
    FieldRule::required("EnrollmentDate", "EnrollmentDate", FieldKind::Date),
]);

pub static SUBJECT: Schema = Schema::new(&[
    FieldRule::required("Subject_ID", "Subject ID", ID),
    FieldRule::required("SubjectName", "Subject Name", text(100)),
    FieldRule::required("SubjectDescription", "Subject Description", text(500)),
    FieldRule::required("Course_ID", "Course ID", ID),
]);

pub static REGISTER: Schema = Schema::new(&[
    FieldRule::required(
        "username",
        "Username",
        FieldKind::Text {
            min_len: Some(3),
            max_len: Some(50),
        },
    ),
    FieldRule::required(
        "password",
        "Password",
        FieldKind::Text {
            min_len: Some(8),
            max_len: Some(128),
        },
    ),
]);

pub static LOGIN: Schema = Schema::new(&[
    FieldRule::required("username", "Username", text(50)),
    FieldRule::required("password", "Password", text(128)),
]);
