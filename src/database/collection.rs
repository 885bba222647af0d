use std::fmt;

/// Secondary uniqueness constraint over one or more top-level document fields.
#[derive(Debug)]
pub struct UniqueKey {
    /// Stable name; the Postgres index is `<collection>_<name>_key`.
    pub name: &'static str,
    pub fields: &'static [&'static str],
    pub message: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Students,
    Enrollments,
    Subjects,
    Credentials,
}

const STUDENT_KEYS: &[UniqueKey] = &[UniqueKey {
    name: "email",
    fields: &["Email"],
    message: "Email already exists",
}];

const ENROLLMENT_KEYS: &[UniqueKey] = &[UniqueKey {
    name: "student_course",
    fields: &["Student_ID", "Course_ID"],
    message: "Enrollment already exists",
}];

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Students,
        Collection::Enrollments,
        Collection::Subjects,
        Collection::Credentials,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Collection::Students => "students",
            Collection::Enrollments => "enrollments",
            Collection::Subjects => "subjects",
            Collection::Credentials => "credentials",
        }
    }

    pub fn unique_keys(&self) -> &'static [UniqueKey] {
        match self {
            Collection::Students => STUDENT_KEYS,
            Collection::Enrollments => ENROLLMENT_KEYS,
            Collection::Subjects | Collection::Credentials => &[],
        }
    }

    /// Message for a duplicate document key (the entity's own identifier).
    pub fn key_conflict_message(&self) -> &'static str {
        match self {
            Collection::Students => "Student ID already exists",
            Collection::Enrollments => "Enrollment ID already exists",
            Collection::Subjects => "Subject already exists",
            Collection::Credentials => "Username already exists",
        }
    }

    /// Conflict message for a violated constraint; `None` means the document key.
    pub fn conflict_message(&self, unique_key: Option<&str>) -> &'static str {
        unique_key
            .and_then(|name| self.unique_keys().iter().find(|k| k.name == name))
            .map(|k| k.message)
            .unwrap_or_else(|| self.key_conflict_message())
    }

    pub fn index_name(&self, key: &UniqueKey) -> String {
        format!("{}_{}_key", self.name(), key.name)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
