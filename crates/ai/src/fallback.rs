//! Deterministic fallbacks used when the generation API is unavailable or
//! returns something unusable.

use crate::client::{GeneratedChallenge, LearningResources};

/// Keyword table for guessing the technology a task is about.
const TECH_KEYWORDS: &[(&str, &[&str])] = &[
    ("React", &["react", "jsx", "component", "hooks"]),
    ("Javascript", &["javascript", "js", "es6", "node"]),
    ("Python", &["python", "django", "flask"]),
    ("Database", &["mysql", "mongodb", "postgres", "sql"]),
    ("Html", &["html", "css", "frontend"]),
    ("Api", &["api", "rest", "graphql"]),
];

/// Guess the technology focus of a free-text task title/description.
///
/// First table entry with any keyword match wins; defaults to
/// `"Programming"`.
pub fn detect_technology(text: &str) -> &'static str {
    let lower = text.to_lowercase();
    TECH_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(tech, _)| *tech)
        .unwrap_or("Programming")
}

/// Default challenge when generation fails: practice in the user's primary
/// stack entry (or "General").
pub fn fallback_challenge(tech_stack: &[String]) -> GeneratedChallenge {
    let primary = tech_stack.first().map(String::as_str).unwrap_or("General");
    GeneratedChallenge {
        title: format!("Code in {primary}"),
        description: format!("Write a small program in {primary} to practice your skills."),
        xp_bonus: 50,
        kind: "daily_code".to_string(),
    }
}

/// Default learning resources for a task, templated on the detected
/// technology.
pub fn fallback_resources(task_name: &str, tech: &str) -> LearningResources {
    let focus = match tech {
        "React" => "components, state, and hooks",
        "Python" => "syntax, functions, and libraries",
        _ => "basic programming principles",
    };
    let starter = match tech {
        "React" => "simple counter component",
        "Python" => "basic script to process data",
        _ => "small application",
    };

    LearningResources {
        explanation: format!(
            "This task involves learning {tech} to enhance your programming skills. \
             Start by understanding the core concepts of {tech}, such as {focus}. \
             This will help you build a strong foundation for solving tasks like \
             \"{task_name}\"."
        ),
        solution: format!(
            "No specific solution available. Try building a small {tech} project, such as a \
             {starter}. Break the task into smaller steps, implement each, and test thoroughly."
        ),
        concept: format!("Learn about {tech} development"),
        tutorials: vec![
            format!("MDN Web Docs - {tech} Guide"),
            format!("FreeCodeCamp - {tech} Tutorial"),
            format!("W3Schools - {tech} Basics"),
        ],
        videos: vec![
            format!("YouTube: {tech} Crash Course"),
            format!("YouTube: {tech} for Beginners"),
            format!("YouTube: {tech} Best Practices"),
        ],
        documentation: vec![
            format!("Official {tech} Documentation"),
            format!("{tech} API Reference"),
            format!("Community {tech} Examples"),
        ],
        exercises: vec![
            format!("Build a simple {tech} project"),
            format!("Practice {tech} concepts on CodePen"),
            format!("Solve {tech} challenges on LeetCode"),
        ],
        tips: vec![
            format!("Start with small {tech} projects to build confidence"),
            format!("Read {tech} documentation for deeper understanding"),
            format!("Join {tech} communities on Discord or Reddit"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_technology_from_keywords() {
        assert_eq!(detect_technology("Build a React component"), "React");
        assert_eq!(detect_technology("learn DJANGO basics"), "Python");
        assert_eq!(detect_technology("write a postgres query"), "Database");
        assert_eq!(detect_technology("knit a sweater"), "Programming");
    }

    #[test]
    fn fallback_challenge_uses_primary_stack_entry() {
        let c = fallback_challenge(&["Rust".to_string(), "Go".to_string()]);
        assert_eq!(c.title, "Code in Rust");
        assert_eq!(c.xp_bonus, 50);
        assert_eq!(c.kind, "daily_code");

        let c = fallback_challenge(&[]);
        assert_eq!(c.title, "Code in General");
    }

    #[test]
    fn fallback_resources_are_complete() {
        let r = fallback_resources("Build a todo app", "React");
        assert!(r.explanation.contains("React"));
        assert!(r.explanation.contains("Build a todo app"));
        assert!(!r.solution.is_empty());
        assert_eq!(r.tutorials.len(), 3);
        assert_eq!(r.tips.len(), 3);
    }

    #[test]
    fn fallback_is_deterministic() {
        let a = fallback_resources("X", "Python");
        let b = fallback_resources("X", "Python");
        assert_eq!(a.explanation, b.explanation);
        assert_eq!(a.tutorials, b.tutorials);
    }
}
