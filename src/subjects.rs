use serde::Serialize;

/// A topical category materials are filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Subject {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub const SUBJECTS: &[Subject] = &[
    Subject {
        id: "computer-science",
        name: "Computer Science",
        description: "Algorithms, data structures, and the theoretical foundations of computation.",
    },
    Subject {
        id: "mathematics",
        name: "Mathematics",
        description: "Calculus, linear algebra, statistics, and discrete mathematics essentials.",
    },
];

/// Shown for slugs outside the catalogue
pub const UNKNOWN_SUBJECT: Subject = Subject {
    id: "unknown",
    name: "Unknown Subject",
    description: "No details available.",
};

pub fn find(id: &str) -> Option<&'static Subject> {
    SUBJECTS.iter().find(|s| s.id == id)
}

/// Catalogue entry for a slug, or the unknown-subject placeholder.
pub fn lookup(id: &str) -> &'static Subject {
    find(id).unwrap_or(&UNKNOWN_SUBJECT)
}
