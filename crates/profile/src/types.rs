use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The complete read-only portfolio dataset.
///
/// Loaded once at startup, never mutated by consumers. The presentation layer
/// receives it by reference and renders straight from these records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub name: String,
    pub title: String,
    pub contact: ContactInfo,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub skills: Vec<SkillCategory>,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    #[serde(default)]
    pub publications: Vec<Publication>,
    #[serde(default)]
    pub personal_info: PersonalInfo,
}

impl Portfolio {
    /// Returns the contact-form endpoint advertised by this profile.
    ///
    /// The receiving service lives under the portfolio site, so the endpoint
    /// is derived from `portfolio_url` rather than configured separately.
    pub fn contact_endpoint_url(&self) -> String {
        format!(
            "{}/contact",
            self.contact.portfolio_url.trim().trim_end_matches('/')
        )
    }
}

/// How to reach the portfolio owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub location: String,
    pub phone: String,
    pub email: String,
    pub github: String,
    pub linkedin: String,
    pub portfolio_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub score: String,
    pub duration: String,
    pub logo: String,
    pub location: String,
    #[serde(default)]
    pub highlight: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub company: String,
    pub role: String,
    pub duration: String,
    pub description: String,
    #[serde(default)]
    pub highlights: Vec<String>,
    /// Named external links (e.g. "demo", "report") in stable order.
    #[serde(default)]
    pub links: BTreeMap<String, String>,
    #[serde(default)]
    pub color: Vec<String>,
    pub logo: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    #[serde(default)]
    pub tech: Vec<String>,
    #[serde(default)]
    pub achievement: String,
    #[serde(default)]
    pub links: Vec<ProjectLink>,
    pub image: String,
    #[serde(default)]
    pub gradient: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectLink {
    pub label: String,
    pub url: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub title: String,
    pub icon: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub color: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub title: String,
    pub event: String,
    pub description: String,
    pub icon: String,
    #[serde(default)]
    pub color: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub icon: String,
    pub description: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PersonalInfo {
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_with_url(url: &str) -> Portfolio {
        Portfolio {
            name: "Test Person".to_string(),
            title: "Developer".to_string(),
            contact: ContactInfo {
                location: String::new(),
                phone: String::new(),
                email: "test@example.com".to_string(),
                github: String::new(),
                linkedin: String::new(),
                portfolio_url: url.to_string(),
            },
            education: Vec::new(),
            experience: Vec::new(),
            projects: Vec::new(),
            skills: Vec::new(),
            achievements: Vec::new(),
            publications: Vec::new(),
            personal_info: PersonalInfo::default(),
        }
    }

    #[test]
    fn contact_endpoint_derives_from_portfolio_url() {
        let profile = profile_with_url("https://portfolio.example.dev");
        assert_eq!(
            profile.contact_endpoint_url(),
            "https://portfolio.example.dev/contact"
        );
    }

    #[test]
    fn contact_endpoint_tolerates_trailing_slash_and_whitespace() {
        let profile = profile_with_url("  https://portfolio.example.dev/  ");
        assert_eq!(
            profile.contact_endpoint_url(),
            "https://portfolio.example.dev/contact"
        );
    }

    #[test]
    fn project_link_type_keeps_wire_name() {
        let link = ProjectLink {
            label: "Live Demo".to_string(),
            url: "https://demo.example.dev".to_string(),
            kind: Some("demo".to_string()),
        };

        let value = serde_json::to_value(&link).expect("serialize project link");
        assert_eq!(value["type"], "demo");
    }
}
