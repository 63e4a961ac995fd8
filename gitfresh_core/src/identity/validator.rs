//! Identity record validation

use super::types::{IdentityRecord, ValidatedRecord};
use crate::error::{IdentityError, Result};

/// Check that a fetched record carries the fields needed downstream
///
/// Checks run in a fixed order: absence, then email, then display name, so
/// the caller always sees the most relevant single error.
pub fn validate(handle: &str, record: Option<IdentityRecord>) -> Result<ValidatedRecord> {
    let record = record.ok_or_else(|| IdentityError::not_found(handle))?;

    let email = non_empty(record.email).ok_or_else(|| IdentityError::missing_field("email"))?;
    let display_name = non_empty(record.display_name)
        .ok_or_else(|| IdentityError::missing_field("display_name"))?;

    Ok(ValidatedRecord {
        handle: record.handle,
        display_name,
        email,
        organization: record.organization,
        summary: record.summary,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ErrorKind};

    fn complete() -> IdentityRecord {
        IdentityRecord {
            handle: "octocat".into(),
            display_name: Some("The Octocat".into()),
            email: Some("octocat@github.com".into()),
            organization: Some("GitHub".into()),
            summary: None,
        }
    }

    #[test]
    fn test_absent_record_is_not_found() {
        let err = validate("octocat", None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IdentityNotFound);
    }

    #[test]
    fn test_missing_email() {
        let mut record = complete();
        record.email = None;
        let err = validate("octocat", Some(record)).unwrap_err();
        assert!(matches!(
            err,
            Error::Identity(IdentityError::MissingField { ref field }) if field == "email"
        ));
    }

    #[test]
    fn test_empty_email() {
        let mut record = complete();
        record.email = Some(String::new());
        let err = validate("octocat", Some(record)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IdentityMissingField);
    }

    #[test]
    fn test_missing_display_name() {
        let mut record = complete();
        record.display_name = Some(String::new());
        let err = validate("octocat", Some(record)).unwrap_err();
        assert!(matches!(
            err,
            Error::Identity(IdentityError::MissingField { ref field }) if field == "display_name"
        ));
    }

    #[test]
    fn test_email_checked_before_display_name() {
        let mut record = complete();
        record.email = None;
        record.display_name = None;
        let err = validate("octocat", Some(record)).unwrap_err();
        assert!(matches!(
            err,
            Error::Identity(IdentityError::MissingField { ref field }) if field == "email"
        ));
    }

    #[test]
    fn test_valid_record_keeps_optional_fields() {
        let validated = validate("octocat", Some(complete())).unwrap();
        assert_eq!(validated.email(), "octocat@github.com");
        assert_eq!(validated.display_name(), "The Octocat");
        assert_eq!(validated.organization(), Some("GitHub"));
        assert_eq!(validated.summary(), None);
    }
}
