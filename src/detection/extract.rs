use super::types::FaceIssue;
use crate::{Error, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct IssuesPayload {
    issues: Vec<FaceIssue>,
}

/// Pulls the issue list out of a model reply.
///
/// Models are told to answer with bare JSON but regularly wrap it in
/// commentary or code fences. The whole reply is tried first, then the
/// substring from the first `{` to the last `}`.
pub fn extract_issues(reply: &str) -> Result<Vec<FaceIssue>> {
    if let Some(payload) = parse_payload(reply) {
        return Ok(payload.issues);
    }

    match brace_substring(reply) {
        Some(candidate) => parse_payload(candidate)
            .map(|payload| payload.issues)
            .ok_or_else(|| Error::processing("model reply contained malformed JSON")),
        None => Err(Error::processing("no JSON object found in model reply")),
    }
}

fn parse_payload(text: &str) -> Option<IssuesPayload> {
    serde_json::from_str(text.trim()).ok()
}

/// Greedy span. Nested braces inside the object stay intact; a second
/// object after the first makes the span unparsable, which is reported as
/// malformed rather than guessed at.
fn brace_substring(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Legacy extraction: scan the reply for known issue names instead of
/// parsing JSON. Descriptions are fixed since the model's own wording is
/// not recoverable this way. Never fails; an unrecognized reply just
/// yields no issues.
pub fn scan_keywords(reply: &str) -> Vec<FaceIssue> {
    let lower = reply.to_lowercase();
    let mut issues = Vec::new();

    if lower.contains("dark circles") {
        issues.push(FaceIssue::new(
            "Dark Circles",
            "Dark circles and discoloration below eyes",
        ));
    }
    if lower.contains("flyaways") {
        issues.push(FaceIssue::new(
            "Flyaways",
            "Hair strands visibly sticking out",
        ));
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn parses_bare_json_reply() {
        let reply = r#"{"issues": [{"issue": "Dark Circles", "description": "Dark discoloration under eyes"}]}"#;

        let issues = extract_issues(reply).unwrap();

        assert_eq!(
            issues,
            vec![FaceIssue::new(
                "Dark Circles",
                "Dark discoloration under eyes"
            )]
        );
    }

    #[test]
    fn parses_json_wrapped_in_commentary() {
        let reply = "Here is the result:\n{\"issues\": [{\"issue\": \"Dark Circles\", \"description\": \"Dark discoloration under eyes\"}]}";

        let issues = extract_issues(reply).unwrap();

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].issue, "Dark Circles");
    }

    #[test]
    fn parses_json_inside_a_code_fence() {
        let reply = "```json\n{\"issues\": [{\"issue\": \"Flyaways\", \"description\": \"Strands near the crown\"}]}\n```";

        let issues = extract_issues(reply).unwrap();

        assert_eq!(issues, vec![FaceIssue::new("Flyaways", "Strands near the crown")]);
    }

    #[test]
    fn preserves_reply_order() {
        let reply = r#"{"issues": [
            {"issue": "Flyaways", "description": "b"},
            {"issue": "Dark Circles", "description": "a"}
        ]}"#;

        let issues = extract_issues(reply).unwrap();

        assert_eq!(issues[0].issue, "Flyaways");
        assert_eq!(issues[1].issue, "Dark Circles");
    }

    #[test]
    fn empty_issue_list_is_not_an_error() {
        assert_eq!(extract_issues(r#"{"issues": []}"#).unwrap(), vec![]);
    }

    #[test]
    fn ignores_extra_fields_in_the_payload() {
        let reply = r#"{"issues": [{"issue": "Flyaways", "description": "d", "severity": 3}], "confidence": 0.9}"#;

        let issues = extract_issues(reply).unwrap();

        assert_eq!(issues, vec![FaceIssue::new("Flyaways", "d")]);
    }

    #[test]
    fn keeps_braces_inside_string_values() {
        let reply = r#"The model says: {"issues": [{"issue": "Dark Circles", "description": "seen at {inner corner}"}]}"#;

        let issues = extract_issues(reply).unwrap();

        assert_eq!(issues[0].description, "seen at {inner corner}");
    }

    #[rstest]
    #[case("no json here at all")]
    #[case("")]
    #[case("only a closing brace }")]
    #[case("} {")]
    fn fails_when_no_json_object_present(#[case] reply: &str) {
        let err = extract_issues(reply).unwrap_err();
        assert!(err.to_string().contains("no JSON object"));
    }

    #[rstest]
    #[case("{\"issues\": [{\"issue\": \"Dark Circles\",}]}")]
    #[case("prefix {\"unrelated\": true} suffix")]
    #[case("first {\"issues\": []} then {\"issues\": []}")]
    fn fails_on_malformed_or_mismatched_json(#[case] reply: &str) {
        let err = extract_issues(reply).unwrap_err();
        assert!(err.to_string().contains("malformed JSON"));
    }

    #[rstest]
    #[case("I can see dark circles under both eyes.", &["Dark Circles"])]
    #[case("Several FLYAWAYS are visible near the crown.", &["Flyaways"])]
    #[case("Dark Circles and flyaways are both present.", &["Dark Circles", "Flyaways"])]
    #[case("The face looks clear to me.", &[])]
    fn scans_keywords_case_insensitively(#[case] reply: &str, #[case] expected: &[&str]) {
        let issues = scan_keywords(reply);
        let names: Vec<&str> = issues.iter().map(|issue| issue.issue.as_str()).collect();

        assert_eq!(names, expected);
    }

    #[test]
    fn keyword_scan_uses_fixed_descriptions() {
        let issues = scan_keywords("dark circles");

        assert_eq!(
            issues,
            vec![FaceIssue::new(
                "Dark Circles",
                "Dark circles and discoloration below eyes"
            )]
        );
    }
}
