use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;
use url::Url;

use super::error::FormError;

// Same shape a browser accepts for <input type="email">.
const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$";

const YEARS: &[&str] = &["1st Year", "2nd Year", "3rd Year", "4th Year"];

const ROLES: &[&str] = &[
    "Technical Lead",
    "Web Developer",
    "App Developer",
    "Content Writer",
    "Graphic Designer",
    "Event Coordinator",
    "Social Media Manager",
];

/// Input shape of a registered field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    ShortText,
    Email,
    Phone,
    Url,
    SingleSelect(&'static [&'static str]),
    MultilineText { rows: u32 },
}

/// Why a single field blocked a submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldIssue {
    #[error("This field is required")]
    Missing,
    #[error("Enter a valid email address")]
    InvalidEmail,
    #[error("Enter a full URL, e.g. https://example.com")]
    InvalidUrl,
    #[error("Pick one of the listed options")]
    UnknownOption,
}

impl FieldKind {
    /// The `type` attribute for kinds rendered as a plain `<input>`.
    pub fn input_type(&self) -> &'static str {
        match self {
            FieldKind::Email => "email",
            FieldKind::Phone => "tel",
            FieldKind::Url => "url",
            FieldKind::ShortText | FieldKind::SingleSelect(_) | FieldKind::MultilineText { .. } => {
                "text"
            }
        }
    }

    /// The value as it is submitted. Email and URL inputs drop surrounding
    /// whitespace the way a browser sanitizes them.
    pub fn sanitize<'a>(&self, value: &'a str) -> &'a str {
        match self {
            FieldKind::Email | FieldKind::Url => value.trim(),
            FieldKind::ShortText
            | FieldKind::Phone
            | FieldKind::SingleSelect(_)
            | FieldKind::MultilineText { .. } => value,
        }
    }

    /// Applies the constraints a browser would enforce on submit.
    ///
    /// Optional fields left empty always pass; the type check only runs
    /// once there is something to check.
    pub fn validate(&self, value: &str, required: bool) -> Result<(), FieldIssue> {
        if value.trim().is_empty() {
            return if required {
                Err(FieldIssue::Missing)
            } else {
                Ok(())
            };
        }

        match self {
            FieldKind::Email => {
                if email_pattern().is_match(self.sanitize(value)) {
                    Ok(())
                } else {
                    Err(FieldIssue::InvalidEmail)
                }
            }
            FieldKind::Url => match Url::parse(self.sanitize(value)) {
                Ok(_) => Ok(()),
                Err(_) => Err(FieldIssue::InvalidUrl),
            },
            FieldKind::SingleSelect(options) => {
                if options.contains(&value) {
                    Ok(())
                } else {
                    Err(FieldIssue::UnknownOption)
                }
            }
            FieldKind::ShortText | FieldKind::Phone | FieldKind::MultilineText { .. } => Ok(()),
        }
    }
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    pub id: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub icon: Option<&'static str>,
}

impl FieldDefinition {
    pub fn validate(&self, value: &str) -> Result<(), FieldIssue> {
        self.kind.validate(value, self.required)
    }
}

static FIELDS: &[FieldDefinition] = &[
    FieldDefinition {
        id: "name",
        kind: FieldKind::ShortText,
        required: true,
        label: "Full Name",
        placeholder: "Enter your full name",
        icon: Some("👤"),
    },
    FieldDefinition {
        id: "email",
        kind: FieldKind::Email,
        required: true,
        label: "Email Address",
        placeholder: "your@email.com",
        icon: Some("✉️"),
    },
    FieldDefinition {
        id: "phone",
        kind: FieldKind::Phone,
        required: true,
        label: "Phone Number",
        placeholder: "+91 98765 43210",
        icon: Some("📞"),
    },
    FieldDefinition {
        id: "year",
        kind: FieldKind::SingleSelect(YEARS),
        required: true,
        label: "Year of Study",
        placeholder: "Select Year",
        icon: Some("🎓"),
    },
    FieldDefinition {
        id: "branch",
        kind: FieldKind::ShortText,
        required: true,
        label: "Branch/Department",
        placeholder: "e.g., Computer Science",
        icon: Some("💻"),
    },
    FieldDefinition {
        id: "skills",
        kind: FieldKind::ShortText,
        required: true,
        label: "Technical Skills",
        placeholder: "e.g., React, Python, Node.js",
        icon: Some("💻"),
    },
    FieldDefinition {
        id: "experience",
        kind: FieldKind::MultilineText { rows: 3 },
        required: true,
        label: "Experience",
        placeholder: "Describe your relevant experience...",
        icon: Some("📅"),
    },
    FieldDefinition {
        id: "motivation",
        kind: FieldKind::MultilineText { rows: 3 },
        required: true,
        label: "Why do you want to join?",
        placeholder: "Tell us about your motivation...",
        icon: Some("💬"),
    },
    FieldDefinition {
        id: "role",
        kind: FieldKind::SingleSelect(ROLES),
        required: true,
        label: "Preferred Role",
        placeholder: "Select Role",
        icon: Some("👤"),
    },
    FieldDefinition {
        id: "portfolio",
        kind: FieldKind::Url,
        required: false,
        label: "Portfolio URL (optional)",
        placeholder: "https://yourportfolio.com",
        icon: None,
    },
    FieldDefinition {
        id: "github",
        kind: FieldKind::Url,
        required: false,
        label: "GitHub Profile",
        placeholder: "https://github.com/username",
        icon: None,
    },
];

pub fn resolve(id: &str) -> Result<&'static FieldDefinition, FormError> {
    FIELDS
        .iter()
        .find(|field| field.id == id)
        .ok_or_else(|| FormError::UnknownField(id.to_string()))
}

/// Every registered id, in registry order.
pub fn field_ids() -> impl Iterator<Item = &'static str> {
    FIELDS.iter().map(|field| field.id)
}
