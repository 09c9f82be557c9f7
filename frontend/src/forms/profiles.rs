use log::debug;

use super::error::FormError;
use super::fields::{self, FieldDefinition};

const EVENT_PLACEHOLDER: &str = "{event}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FormType {
    #[default]
    JoinClub,
    JoinTeam,
    EventRegister,
}

impl FormType {
    pub const ALL: [FormType; 3] = [FormType::JoinClub, FormType::JoinTeam, FormType::EventRegister];

    pub fn tag(self) -> &'static str {
        match self {
            FormType::JoinClub => "join-club",
            FormType::JoinTeam => "join-team",
            FormType::EventRegister => "event-register",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|form_type| form_type.tag() == tag)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct FormProfile {
    pub form_type: FormType,
    pub title_template: &'static str,
    pub subtitle: &'static str,
    pub fields: &'static [&'static str],
    pub storage_bucket: &'static str,
}

impl FormProfile {
    /// Renders the heading. A missing event name leaves the slot empty.
    pub fn title(&self, event_title: Option<&str>) -> String {
        self.title_template
            .replace(EVENT_PLACEHOLDER, event_title.unwrap_or_default())
    }

    /// Looks up every field in render order.
    pub fn definitions(&self) -> Result<Vec<&'static FieldDefinition>, FormError> {
        self.fields.iter().map(|id| fields::resolve(id)).collect()
    }
}

static PROFILES: [FormProfile; 3] = [
    FormProfile {
        form_type: FormType::JoinClub,
        title_template: "Join Code Vimarsh",
        subtitle: "Become a part of our coding community",
        fields: &["name", "email", "phone", "year", "branch", "motivation"],
        storage_bucket: "member_applications",
    },
    FormProfile {
        form_type: FormType::JoinTeam,
        title_template: "Join Our Team",
        subtitle: "Help us build something amazing",
        fields: &[
            "name",
            "email",
            "phone",
            "year",
            "branch",
            "role",
            "skills",
            "experience",
            "portfolio",
            "github",
        ],
        storage_bucket: "team_applications",
    },
    FormProfile {
        form_type: FormType::EventRegister,
        title_template: "Register for {event}",
        subtitle: "Secure your spot now",
        fields: &["name", "email", "phone", "year", "branch"],
        storage_bucket: "event_registrations",
    },
];

pub fn resolve(form_type: FormType) -> &'static FormProfile {
    match form_type {
        FormType::JoinClub => &PROFILES[0],
        FormType::JoinTeam => &PROFILES[1],
        FormType::EventRegister => &PROFILES[2],
    }
}

/// Resolves a wire tag such as `"join-team"`. Unknown tags get the
/// membership form.
pub fn resolve_tag(tag: &str) -> &'static FormProfile {
    match FormType::from_tag(tag) {
        Some(form_type) => resolve(form_type),
        None => {
            debug!("Unknown form type {:?}, using {}", tag, FormType::default().tag());
            resolve(FormType::default())
        }
    }
}

/// Startup check that every profile is renderable.
pub fn check_profiles() -> Result<(), FormError> {
    for profile in PROFILES.iter() {
        let name = profile.form_type.tag();
        if profile.fields.is_empty() {
            return Err(FormError::EmptyProfile(name));
        }
        for (i, id) in profile.fields.iter().enumerate() {
            if profile.fields[..i].contains(id) {
                return Err(FormError::DuplicateField {
                    profile: name,
                    field: id.to_string(),
                });
            }
        }
        profile.definitions()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_profile_field_is_registered() {
        check_profiles().unwrap();
        for form_type in FormType::ALL {
            let profile = resolve(form_type);
            assert_eq!(profile.form_type, form_type);
            assert_eq!(profile.definitions().unwrap().len(), profile.fields.len());
        }
    }

    #[test]
    fn tags_round_trip() {
        for form_type in FormType::ALL {
            assert_eq!(FormType::from_tag(form_type.tag()), Some(form_type));
        }
        assert_eq!(FormType::from_tag("newsletter"), None);
    }

    #[test]
    fn unknown_tag_falls_back_to_membership_form() {
        let profile = resolve_tag("newsletter");
        assert_eq!(profile.form_type, FormType::JoinClub);
        assert_eq!(profile.storage_bucket, "member_applications");
        assert_eq!(
            profile.fields,
            &["name", "email", "phone", "year", "branch", "motivation"]
        );
    }

    #[test]
    fn event_title_is_substituted() {
        let profile = resolve(FormType::EventRegister);
        assert_eq!(profile.title(Some("Hack Night")), "Register for Hack Night");
        assert_eq!(profile.title(None), "Register for ");
        assert_eq!(resolve(FormType::JoinTeam).title(Some("ignored")), "Join Our Team");
    }

    #[test]
    fn buckets_are_distinct() {
        let buckets: Vec<_> = PROFILES.iter().map(|p| p.storage_bucket).collect();
        assert_eq!(
            buckets,
            ["member_applications", "team_applications", "event_registrations"]
        );
    }
}
