use crate::screening::models::AnalysisResult;

/// Plain-text rendering of a screening result for terminals.
pub fn render_report(result: &AnalysisResult) -> String {
    let mut lines = vec![format!(
        "Score: {}/100 ({})",
        result.score,
        result.band().label()
    )];

    for (title, items, empty) in [
        ("Strengths", &result.strengths, "No strengths to display."),
        ("Missing skills", &result.missing_skills, "No missing skills to display."),
        ("Suggestions", &result.suggestions, "No suggestions to display."),
    ] {
        lines.push(String::new());
        lines.push(format!("{title}:"));
        if items.is_empty() {
            lines.push(format!("  {empty}"));
        }
        lines.extend(items.iter().map(|item| format!("  - {item}")));
    }

    lines.join("\n") + "\n"
}
