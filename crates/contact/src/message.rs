use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// The address pattern the form has always accepted: a bounded local part,
/// an `@`, and one or more dot-separated domain labels.
const EMAIL_PATTERN: &str =
    r"^[a-zA-Z0-9+._%\-]{1,256}@[a-zA-Z0-9][a-zA-Z0-9\-]{0,64}(\.[a-zA-Z0-9][a-zA-Z0-9\-]{0,25})+$";

fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"))
}

/// The form field a validation issue points at, for inline display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl ContactField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationIssue {
    NameEmpty,
    EmailEmpty,
    EmailInvalid,
    MessageEmpty,
}

impl ValidationIssue {
    pub fn field(&self) -> ContactField {
        match self {
            Self::NameEmpty => ContactField::Name,
            Self::EmailEmpty | Self::EmailInvalid => ContactField::Email,
            Self::MessageEmpty => ContactField::Message,
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            Self::NameEmpty => "name must not be empty",
            Self::EmailEmpty => "email must not be empty",
            Self::EmailInvalid => "email is not a valid address",
            Self::MessageEmpty => "message must not be empty",
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.reason())
    }
}

/// Non-empty, field-ordered set of validation failures for one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssues(Vec<ValidationIssue>);

impl ValidationIssues {
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.0
    }

    pub fn contains(&self, issue: ValidationIssue) -> bool {
        self.0.contains(&issue)
    }

    /// First issue affecting `field`, if any.
    pub fn for_field(&self, field: ContactField) -> Option<ValidationIssue> {
        self.0.iter().copied().find(|issue| issue.field() == field)
    }
}

impl fmt::Display for ValidationIssues {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, issue) in self.0.iter().enumerate() {
            if index > 0 {
                formatter.write_str("; ")?;
            }
            write!(formatter, "{issue}")?;
        }
        Ok(())
    }
}

/// One outbound contact message. Transient: built fresh per submission
/// attempt, serialized as the `{name, email, message}` wire body, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    /// Checks the message against the form rules.
    ///
    /// Synchronous and side-effect free, so the presentation layer can call
    /// it on every keystroke. Whitespace-only input counts as empty.
    pub fn validate(&self) -> Result<(), ValidationIssues> {
        let mut issues = Vec::new();

        if self.name.trim().is_empty() {
            issues.push(ValidationIssue::NameEmpty);
        }

        let email = self.email.trim();
        if email.is_empty() {
            issues.push(ValidationIssue::EmailEmpty);
        } else if !email_regex().is_match(email) {
            issues.push(ValidationIssue::EmailInvalid);
        }

        if self.message.trim().is_empty() {
            issues.push(ValidationIssue::MessageEmpty);
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationIssues(issues))
        }
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_message_passes() {
        let message = ContactMessage::new("Ann", "ann@example.com", "Hi");
        assert!(message.validate().is_ok());
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for email in [
            "not-an-email",
            "missing-domain@",
            "@missing-local.com",
            "no-tld@host",
            "two@@example.com",
            "spaces in@example.com",
        ] {
            let message = ContactMessage::new("Ann", email, "Hi");
            let issues = message.validate().expect_err("email should be rejected");
            assert!(
                issues.contains(ValidationIssue::EmailInvalid),
                "expected EmailInvalid for {email:?}, got {issues:?}"
            );
        }
    }

    #[test]
    fn accepted_email_shapes() {
        for email in [
            "ann@example.com",
            "first.last@example.co.uk",
            "user+tag@sub.example.dev",
            "u_1%x-y@host-name.org",
        ] {
            let message = ContactMessage::new("Ann", email, "Hi");
            assert!(message.validate().is_ok(), "expected {email:?} to pass");
        }
    }

    #[test]
    fn whitespace_only_fields_count_as_empty() {
        let message = ContactMessage::new("   ", "  ", "\t\n");
        let issues = message.validate().expect_err("all fields empty");

        assert!(issues.contains(ValidationIssue::NameEmpty));
        assert!(issues.contains(ValidationIssue::EmailEmpty));
        assert!(issues.contains(ValidationIssue::MessageEmpty));
        assert_eq!(issues.issues().len(), 3);
    }

    #[test]
    fn issues_map_back_to_their_fields() {
        let message = ContactMessage::new("", "bad", "Hi");
        let issues = message.validate().expect_err("two issues expected");

        assert_eq!(
            issues.for_field(ContactField::Name),
            Some(ValidationIssue::NameEmpty)
        );
        assert_eq!(
            issues.for_field(ContactField::Email),
            Some(ValidationIssue::EmailInvalid)
        );
        assert_eq!(issues.for_field(ContactField::Message), None);
    }

    #[test]
    fn validation_is_repeatable() {
        let message = ContactMessage::new("Ann", "not-an-email", "Hi");
        let first = message.validate();
        let second = message.validate();
        assert_eq!(first, second);
    }

    #[test]
    fn wire_body_uses_the_three_contract_fields() {
        let message = ContactMessage::new("Ann", "ann@example.com", "Hi");
        let value = serde_json::to_value(&message).expect("serialize contact message");

        assert_eq!(
            value,
            serde_json::json!({
                "name": "Ann",
                "email": "ann@example.com",
                "message": "Hi",
            })
        );
    }
}
