// All prompt text for document generation.
// Only fields the user actually supplied are written into a prompt.

use crate::models::CandidateRecord;

/// Resume prompt template.
/// Replace: {page_instruction}, {personal_info}, {target_info}, {background}
pub const RESUME_PROMPT_TEMPLATE: &str = r#"Create a professional, ATS-friendly resume based on the following information. {page_instruction}

Personal Information:
{personal_info}

{target_info}

{background}

Requirements:
1. Create well-structured sections appropriate for the content length
2. Use professional language and action verbs
3. Include quantifiable achievements
4. Make it ATS-friendly
5. Organize content logically
6. {page_instruction}

Structure with these sections:
- Professional Summary (2-3 lines)
- Core Skills (bullet points)
- Professional Experience (reverse chronological)
- Education
- Additional sections if relevant (Certifications, Languages)

Put each section title on its own line and separate sections with a blank line."#;

/// Cover letter prompt template. Replace: {details}
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Create a compelling, professional cover letter based on the following information:

{details}

Create a personalized, engaging cover letter that highlights relevant experience."#;

/// Extra fields a cover letter request carries on top of the candidate record.
#[derive(Debug, Clone, Copy, Default)]
pub struct LetterTarget<'a> {
    pub company: Option<&'a str>,
    pub position: Option<&'a str>,
    pub job_description: Option<&'a str>,
    pub interest: Option<&'a str>,
}

pub fn page_instruction(page_limit: u32) -> String {
    if page_limit == 1 {
        "Keep content concise for a 1-page resume.".to_string()
    } else {
        format!("You can use up to {page_limit} pages for detailed content.")
    }
}

pub fn build_resume_prompt(record: &CandidateRecord, page_limit: u32) -> String {
    let links = record.social_links_text();
    let personal_info = bullet_lines(&[
        ("Name", record.name.as_deref()),
        ("Email", record.email.as_deref()),
        ("Phone", record.phone.as_deref()),
        ("Location", record.location.as_deref()),
        ("Professional Links", non_empty(&links)),
    ]);

    let target_info = labeled_lines(&[
        ("Target Position", record.job_title.as_deref()),
        ("Years of Experience", record.experience_years.as_deref()),
        ("Industry", record.industry.as_deref()),
    ]);

    let background = labeled_lines(&[
        ("Professional Summary", record.professional_summary.as_deref()),
        ("Professional Experience", record.experience.as_deref()),
        ("Skills", record.skills.as_deref()),
        ("Education", record.education.as_deref()),
        ("Certifications", record.certifications.as_deref()),
        ("Languages", record.languages.as_deref()),
        ("Career Objectives", record.career_goals.as_deref()),
    ]);

    fill_template(
        RESUME_PROMPT_TEMPLATE,
        &[
            ("{page_instruction}", page_instruction(page_limit).as_str()),
            ("{personal_info}", personal_info.as_str()),
            ("{target_info}", target_info.as_str()),
            ("{background}", background.as_str()),
        ],
    )
}

pub fn build_cover_letter_prompt(record: &CandidateRecord, target: LetterTarget<'_>) -> String {
    let contact = [record.email.as_deref(), record.phone.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" | ");
    let links = record.social_links_text();

    let details = labeled_lines(&[
        ("Applicant", record.name.as_deref()),
        ("Contact", non_empty(&contact)),
        ("Professional Links", non_empty(&links)),
        ("Target Company", target.company),
        ("Position", target.position),
        ("Job Requirements", target.job_description),
        ("Experience", record.experience.as_deref()),
        ("Skills", record.skills.as_deref()),
        ("Interest", target.interest),
    ]);

    fill_template(COVER_LETTER_PROMPT_TEMPLATE, &[("{details}", details.as_str())])
}

/// Substitutes placeholders in a single left-to-right pass, so braces inside
/// user-supplied values are never expanded.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match values.iter().find(|(placeholder, _)| tail.starts_with(placeholder)) {
            Some((placeholder, value)) => {
                out.push_str(value);
                rest = &tail[placeholder.len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}

fn labeled_lines(fields: &[(&str, Option<&str>)]) -> String {
    fields
        .iter()
        .filter_map(|(label, value)| value.map(|v| format!("{label}: {v}")))
        .collect::<Vec<_>>()
        .join("\n")
}

fn bullet_lines(fields: &[(&str, Option<&str>)]) -> String {
    fields
        .iter()
        .filter_map(|(label, value)| value.map(|v| format!("- {label}: {v}")))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> CandidateRecord {
        CandidateRecord {
            name: Some("Jane Doe".to_string()),
            email: Some("jane@example.com".to_string()),
            github: Some("https://github.com/jane".to_string()),
            job_title: Some("Backend Engineer".to_string()),
            skills: Some("Rust, Postgres".to_string()),
            experience_years: Some("6".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_page_instruction_differs_for_single_page() {
        assert_eq!(page_instruction(1), "Keep content concise for a 1-page resume.");
        assert_eq!(
            page_instruction(2),
            "You can use up to 2 pages for detailed content."
        );
    }

    #[test]
    fn test_resume_prompt_includes_only_present_fields() {
        let prompt = build_resume_prompt(&record(), 1);

        assert!(prompt.contains("- Name: Jane Doe"));
        assert!(prompt.contains("- Email: jane@example.com"));
        assert!(prompt.contains("- Professional Links: GitHub: https://github.com/jane"));
        assert!(prompt.contains("Target Position: Backend Engineer"));
        assert!(prompt.contains("Years of Experience: 6"));
        assert!(prompt.contains("Skills: Rust, Postgres"));

        assert!(!prompt.contains("Phone:"));
        assert!(!prompt.contains("Education:"));
        assert!(!prompt.contains("Industry:"));
        assert_eq!(
            prompt.matches("Keep content concise for a 1-page resume.").count(),
            2
        );
        assert!(!prompt.contains('{'), "unreplaced placeholder in prompt");
    }

    #[test]
    fn test_resume_prompt_multi_page() {
        let prompt = build_resume_prompt(&record(), 3);
        assert!(prompt.contains("You can use up to 3 pages for detailed content."));
    }

    #[test]
    fn test_placeholders_in_user_text_are_left_alone() {
        let record = CandidateRecord {
            name: Some("{background}".to_string()),
            skills: Some("Templating with {page_instruction} and {target_info}".to_string()),
            ..Default::default()
        };
        let prompt = build_resume_prompt(&record, 1);

        assert!(prompt.contains("- Name: {background}"));
        assert!(prompt.contains("Skills: Templating with {page_instruction} and {target_info}"));
        assert_eq!(
            prompt.matches("Keep content concise for a 1-page resume.").count(),
            2
        );

        let letter = build_cover_letter_prompt(
            &record,
            LetterTarget {
                company: Some("{details}"),
                ..Default::default()
            },
        );
        assert!(letter.contains("Target Company: {details}"));
    }

    #[test]
    fn test_fill_template_keeps_unknown_braces() {
        assert_eq!(
            fill_template("a {x} {y} {", &[("{x}", "1")]),
            "a 1 {y} {"
        );
    }

    #[test]
    fn test_cover_letter_prompt_includes_target() {
        let target = LetterTarget {
            company: Some("Acme"),
            position: Some("Platform Engineer"),
            job_description: None,
            interest: Some("I love infrastructure"),
        };
        let prompt = build_cover_letter_prompt(&record(), target);

        assert!(prompt.contains("Applicant: Jane Doe"));
        assert!(prompt.contains("Contact: jane@example.com"));
        assert!(prompt.contains("Target Company: Acme"));
        assert!(prompt.contains("Position: Platform Engineer"));
        assert!(prompt.contains("Interest: I love infrastructure"));
        assert!(!prompt.contains("Job Requirements:"));
        assert!(!prompt.contains("Contact: jane@example.com |"));
    }
}
