use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Personal and career data submitted with a generation request.
///
/// Every field is optional. Blank strings are treated as absent so that form
/// submissions with empty inputs behave like omitted keys.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateRecord {
    #[serde(default, deserialize_with = "non_blank")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "non_blank")]
    pub job_title: Option<String>,
    #[serde(default, deserialize_with = "non_blank")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "non_blank")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "non_blank")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "non_blank")]
    pub linkedin: Option<String>,
    #[serde(default, deserialize_with = "non_blank")]
    pub github: Option<String>,
    #[serde(default, deserialize_with = "non_blank")]
    pub portfolio: Option<String>,
    #[serde(default, deserialize_with = "non_blank")]
    pub experience: Option<String>,
    #[serde(default, deserialize_with = "non_blank")]
    pub skills: Option<String>,
    #[serde(default, deserialize_with = "non_blank")]
    pub education: Option<String>,
    #[serde(default, deserialize_with = "non_blank")]
    pub certifications: Option<String>,
    #[serde(default, deserialize_with = "non_blank")]
    pub languages: Option<String>,
    #[serde(default, deserialize_with = "non_blank")]
    pub career_goals: Option<String>,
    #[serde(default, deserialize_with = "non_blank")]
    pub professional_summary: Option<String>,
    /// Accepted as a string or a number.
    #[serde(default, deserialize_with = "non_blank")]
    pub experience_years: Option<String>,
    #[serde(default, deserialize_with = "non_blank")]
    pub industry: Option<String>,
}

/// The three social profiles a record can carry, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialKind {
    LinkedIn,
    GitHub,
    Portfolio,
}

impl SocialKind {
    /// Short label used by most layouts.
    pub fn label(self) -> &'static str {
        match self {
            SocialKind::LinkedIn => "LinkedIn",
            SocialKind::GitHub => "GitHub",
            SocialKind::Portfolio => "Portfolio",
        }
    }
}

impl CandidateRecord {
    /// Name, or the empty string when absent.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Job title, or the empty string when absent.
    pub fn display_title(&self) -> &str {
        self.job_title.as_deref().unwrap_or("")
    }

    /// Email, phone and location, skipping the absent ones.
    pub fn contact_items(&self) -> Vec<&str> {
        [&self.email, &self.phone, &self.location]
            .into_iter()
            .filter_map(|v| v.as_deref())
            .collect()
    }

    /// Present social profiles as `(kind, url)` pairs.
    pub fn social_links(&self) -> Vec<(SocialKind, &str)> {
        [
            (SocialKind::LinkedIn, &self.linkedin),
            (SocialKind::GitHub, &self.github),
            (SocialKind::Portfolio, &self.portfolio),
        ]
        .into_iter()
        .filter_map(|(kind, url)| url.as_deref().map(|u| (kind, u)))
        .collect()
    }

    /// `LinkedIn: <url> | GitHub: <url>` line used inside prompts.
    pub fn social_links_text(&self) -> String {
        self.social_links()
            .iter()
            .map(|(kind, url)| format!("{}: {}", kind.label(), url))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// Deserializes an optional string-ish value, mapping blanks and nulls to `None`.
/// Numbers and booleans are accepted and rendered as text.
pub fn non_blank<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let text = match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(other) => {
            return Err(serde::de::Error::custom(format!(
                "expected a string, got {other}"
            )))
        }
    };
    Ok(text.filter(|s| !s.trim().is_empty()))
}
