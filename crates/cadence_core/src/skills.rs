//! Skill vocabulary scanning over CV text.

/// Technologies recognised in a CV.
pub const SKILL_VOCABULARY: &[&str] = &[
    "Java",
    "Spring Boot",
    "Microservices",
    "Kafka",
    "Docker",
    "Kubernetes",
    "AWS",
    "Azure",
    "GCP",
    "SQL",
    "NoSQL",
    "MongoDB",
    "PostgreSQL",
    "MySQL",
    "Redis",
    "React",
    "Angular",
    "Vue",
    "JavaScript",
    "TypeScript",
    "HTML",
    "CSS",
    "Node.js",
    "Python",
    "Go",
    "C++",
    "C#",
    ".NET",
    "Rest API",
    "GraphQL",
    "CI/CD",
    "Jenkins",
    "Git",
    "Maven",
    "Gradle",
    "Hibernate",
    "JPA",
    "Design Patterns",
    "System Design",
    "Agile",
    "Scrum",
];

/// Vocabulary entries that occur anywhere in `text`, ignoring case.
///
/// Matching is plain substring search, so "Java" is also found inside
/// "JavaScript". Results follow vocabulary order with no duplicates.
///
/// # Examples
///
/// ```
/// use cadence_core::extract_skills;
///
/// let skills = extract_skills("Built microservices on KUBERNETES with docker");
/// assert_eq!(skills, vec!["Microservices", "Docker", "Kubernetes"]);
/// assert!(extract_skills("").is_empty());
/// ```
pub fn extract_skills(text: &str) -> Vec<&'static str> {
    if text.is_empty() {
        return Vec::new();
    }

    let haystack = text.to_lowercase();
    SKILL_VOCABULARY
        .iter()
        .copied()
        .filter(|skill| haystack.contains(&skill.to_lowercase()))
        .collect()
}
