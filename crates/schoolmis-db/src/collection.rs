use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Schools,
    Students,
    Teachers,
    Classes,
    Levels,
    Courses,
    Users,
}

impl Collection {
    pub const ALL: [Collection; 7] = [
        Collection::Schools,
        Collection::Students,
        Collection::Teachers,
        Collection::Classes,
        Collection::Levels,
        Collection::Courses,
        Collection::Users,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Collection::Schools => "schools",
            Collection::Students => "students",
            Collection::Teachers => "teachers",
            Collection::Classes => "classes",
            Collection::Levels => "levels",
            Collection::Courses => "courses",
            Collection::Users => "users",
        }
    }

    /// Singular, capitalised name used in "not found" messages.
    pub fn entity_name(self) -> &'static str {
        match self {
            Collection::Schools => "School",
            Collection::Students => "Student",
            Collection::Teachers => "Teacher",
            Collection::Classes => "Class",
            Collection::Levels => "Level",
            Collection::Courses => "Course",
            Collection::Users => "User",
        }
    }

    /// Fields holding the id of another record. The document store keeps
    /// these as native ids when the value parses as one.
    pub fn reference_fields(self) -> &'static [&'static str] {
        match self {
            Collection::Schools | Collection::Users => &[],
            Collection::Students => &["school", "class", "level"],
            Collection::Teachers => &["school", "courses"],
            Collection::Classes => &["school", "level", "classTeacher"],
            Collection::Levels => &["school"],
            Collection::Courses => &["school", "level", "teacher"],
        }
    }

    pub fn is_reference(self, field: &str) -> bool {
        self.reference_fields().contains(&field)
    }

    /// Fields holding a calendar date, stored natively by the document store.
    pub fn date_fields(self) -> &'static [&'static str] {
        match self {
            Collection::Students => &["dateOfBirth", "enrollmentDate"],
            _ => &[],
        }
    }

    pub fn is_date(self, field: &str) -> bool {
        self.date_fields().contains(&field)
    }

    /// Fields whose non-empty values may appear at most once per collection.
    pub fn unique_fields(self) -> &'static [&'static str] {
        match self {
            Collection::Students => &["admissionNumber", "studentId"],
            Collection::Teachers => &["employeeId"],
            Collection::Users => &["username"],
            _ => &[],
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
