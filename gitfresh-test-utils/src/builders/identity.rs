//! Builder for identity records

use gitfresh_core::IdentityRecord;

/// Builder for [`IdentityRecord`] test fixtures
#[derive(Debug, Clone)]
pub struct IdentityRecordBuilder {
    record: IdentityRecord,
}

impl IdentityRecordBuilder {
    /// Start from a record with only the handle set
    pub fn new(handle: &str) -> Self {
        Self {
            record: IdentityRecord::new(handle),
        }
    }

    /// Start from a record that passes validation and names an organization
    pub fn complete(handle: &str) -> Self {
        Self::new(handle)
            .with_display_name(&format!("User {handle}"))
            .with_email(&format!("{handle}@example.com"))
            .with_organization("Acme")
            .with_summary(&format!("Profile of {handle}"))
    }

    pub fn with_display_name(mut self, name: &str) -> Self {
        self.record.display_name = Some(name.to_string());
        self
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.record.email = Some(email.to_string());
        self
    }

    pub fn with_organization(mut self, organization: &str) -> Self {
        self.record.organization = Some(organization.to_string());
        self
    }

    pub fn with_summary(mut self, summary: &str) -> Self {
        self.record.summary = Some(summary.to_string());
        self
    }

    pub fn without_display_name(mut self) -> Self {
        self.record.display_name = None;
        self
    }

    pub fn without_email(mut self) -> Self {
        self.record.email = None;
        self
    }

    pub fn without_organization(mut self) -> Self {
        self.record.organization = None;
        self
    }

    pub fn without_summary(mut self) -> Self {
        self.record.summary = None;
        self
    }

    pub fn build(self) -> IdentityRecord {
        self.record
    }
}
