use std::collections::BTreeMap;

use log::{debug, warn};

use super::error::FormError;
use super::fields::{FieldDefinition, FieldIssue};
use super::profiles::{self, FormProfile, FormType};
use super::store::{SubmissionRecord, SubmissionStore};
use super::timing::Clock;

/// Per-field failures from a rejected submit, keyed by field id.
pub type ValidationErrors = BTreeMap<&'static str, FieldIssue>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Editing,
    Submitting,
    Success,
}

#[derive(Debug, PartialEq)]
pub enum SubmitAttempt {
    Started,
    Rejected(ValidationErrors),
    /// A submit arrived while not editing and was ignored.
    Busy,
}

/// Live state of one open form.
///
/// Moves forward only: `Editing -> Submitting -> Success`, after which
/// `reset` hands back a blank `Editing` form.
pub struct FormMachine {
    profile: &'static FormProfile,
    fields: Vec<&'static FieldDefinition>,
    event_title: Option<String>,
    values: BTreeMap<&'static str, String>,
    errors: ValidationErrors,
    phase: Phase,
}

impl FormMachine {
    pub fn new(form_type: FormType, event_title: Option<String>) -> Result<Self, FormError> {
        let profile = profiles::resolve(form_type);
        let fields = profile.definitions()?;
        let values = fields.iter().map(|f| (f.id, String::new())).collect();
        let event_title = match form_type {
            FormType::EventRegister => Some(event_title.unwrap_or_default()),
            FormType::JoinClub | FormType::JoinTeam => None,
        };
        Ok(Self {
            profile,
            fields,
            event_title,
            values,
            errors: ValidationErrors::new(),
            phase: Phase::Editing,
        })
    }

    pub fn profile(&self) -> &'static FormProfile {
        self.profile
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn title(&self) -> String {
        self.profile.title(self.event_title.as_deref())
    }

    pub fn fields(&self) -> &[&'static FieldDefinition] {
        &self.fields
    }

    pub fn value(&self, id: &str) -> &str {
        self.values.get(id).map(String::as_str).unwrap_or_default()
    }

    pub fn error(&self, id: &str) -> Option<FieldIssue> {
        self.errors.get(id).copied()
    }

    /// Records a keystroke or selection. Ignored outside `Editing` and for
    /// ids that are not part of this form.
    pub fn set_value(&mut self, id: &str, value: String) -> bool {
        if self.phase != Phase::Editing {
            return false;
        }
        match self.values.get_mut(id) {
            Some(slot) => {
                *slot = value;
                self.errors.remove(id);
                true
            }
            None => false,
        }
    }

    pub fn validate(&self) -> ValidationErrors {
        self.fields
            .iter()
            .filter_map(|field| {
                field
                    .validate(self.value(field.id))
                    .err()
                    .map(|issue| (field.id, issue))
            })
            .collect()
    }

    pub fn begin_submit(&mut self) -> SubmitAttempt {
        if self.phase != Phase::Editing {
            return SubmitAttempt::Busy;
        }
        let errors = self.validate();
        if !errors.is_empty() {
            debug!("{} submit rejected: {} invalid field(s)", self.profile.form_type.tag(), errors.len());
            self.errors = errors.clone();
            return SubmitAttempt::Rejected(errors);
        }
        self.errors.clear();
        self.phase = Phase::Submitting;
        debug!("{} submitting", self.profile.form_type.tag());
        SubmitAttempt::Started
    }

    fn record(&self, clock: &dyn Clock) -> SubmissionRecord {
        SubmissionRecord {
            values: self
                .fields
                .iter()
                .map(|field| (field.id.to_string(), field.kind.sanitize(self.value(field.id)).to_string()))
                .collect(),
            submitted_at: clock.now(),
            event_title: self.event_title.clone(),
        }
    }

    /// Writes the submission through to its bucket and enters `Success`.
    ///
    /// A storage failure loses the record but not the transition. Returns
    /// `None` when called outside `Submitting`.
    pub fn complete_submit(
        &mut self,
        store: &dyn SubmissionStore,
        clock: &dyn Clock,
    ) -> Option<SubmissionRecord> {
        if self.phase != Phase::Submitting {
            return None;
        }
        let record = self.record(clock);
        if let Err(e) = store.append(self.profile.storage_bucket, &record) {
            warn!("Submission to {} was not stored: {}", self.profile.storage_bucket, e);
        }
        self.phase = Phase::Success;
        debug!("{} submitted", self.profile.form_type.tag());
        Some(record)
    }

    /// Clears every value after a success so the form can be reused.
    pub fn reset(&mut self) -> bool {
        if self.phase != Phase::Success {
            return false;
        }
        for value in self.values.values_mut() {
            value.clear();
        }
        self.errors.clear();
        self.phase = Phase::Editing;
        true
    }
}
