//! Identity attributes supplied when a user signs up.

use thiserror::Error;

/// Validation errors returned by [`RegistrationData::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistrationValidationError {
    /// No external auth id was supplied.
    #[error("external id must not be empty")]
    EmptyExternalId,
    /// No email was supplied.
    #[error("email must not be empty")]
    EmptyEmail,
}

/// Registration attributes for one sign-up attempt.
///
/// ## Invariants
/// - `external_id` and `email` are non-blank. The email format is left to
///   the remote API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationData {
    external_id: String,
    email: String,
    name: Option<String>,
    image_url: Option<String>,
}

impl RegistrationData {
    /// Validate the required attributes.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationValidationError`] when the external id or email
    /// is blank.
    pub fn new(
        external_id: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, RegistrationValidationError> {
        let external_id = external_id.into();
        let email = email.into();
        if external_id.trim().is_empty() {
            return Err(RegistrationValidationError::EmptyExternalId);
        }
        if email.trim().is_empty() {
            return Err(RegistrationValidationError::EmptyEmail);
        }
        Ok(Self {
            external_id,
            email,
            name: None,
            image_url: None,
        })
    }

    /// Attach a display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach an avatar URL.
    #[must_use]
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Identity-provider user id.
    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    /// Primary email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Display name, if supplied.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Avatar URL, if supplied.
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Name for a new candidate profile: the display name when it is not
    /// blank, otherwise everything before the first `@` of the email. An
    /// email without a usable local part is used whole.
    pub fn candidate_full_name(&self) -> String {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name.to_owned(),
            _ => self.email_local_part().to_owned(),
        }
    }

    fn email_local_part(&self) -> &str {
        match self.email.split_once('@') {
            Some((local, _)) if !local.is_empty() => local,
            _ => &self.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "ada@example.com", RegistrationValidationError::EmptyExternalId)]
    #[case("   ", "ada@example.com", RegistrationValidationError::EmptyExternalId)]
    #[case("user_1", "", RegistrationValidationError::EmptyEmail)]
    #[case("user_1", "  ", RegistrationValidationError::EmptyEmail)]
    fn rejects_invalid_registration(
        #[case] external_id: &str,
        #[case] email: &str,
        #[case] expected: RegistrationValidationError,
    ) {
        let error = RegistrationData::new(external_id, email).expect_err("should be rejected");
        assert_eq!(error, expected);
    }

    #[rstest]
    #[case(None, "john.doe")]
    #[case(Some(""), "john.doe")]
    #[case(Some("   "), "john.doe")]
    #[case(Some("John Doe"), "John Doe")]
    fn candidate_name_falls_back_to_email_local_part(
        #[case] name: Option<&str>,
        #[case] expected: &str,
    ) {
        let base = RegistrationData::new("user_1", "john.doe@example.com").expect("registration");
        let registration = match name {
            Some(name) => base.with_name(name),
            None => base,
        };

        assert_eq!(registration.candidate_full_name(), expected);
    }

    #[rstest]
    #[case::no_at_sign("ada.example.com", "ada.example.com")]
    #[case::empty_local_part("@example.com", "@example.com")]
    fn email_without_local_part_is_accepted_and_used_whole(
        #[case] email: &str,
        #[case] expected: &str,
    ) {
        let registration = RegistrationData::new("user_1", email).expect("email is accepted");
        assert_eq!(registration.candidate_full_name(), expected);
    }

    #[rstest]
    fn local_part_stops_at_first_at_sign() {
        let registration =
            RegistrationData::new("user_1", "first@second@example.com").expect("registration");
        assert_eq!(registration.candidate_full_name(), "first");
    }
}
