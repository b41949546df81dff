use serde::Serialize;
use thiserror::Error;

/// Field-level rejection from the signup form checks.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignupError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("Please enter a valid email address")]
    Email,
    #[error("Please enter a valid 10-digit mobile number")]
    Mobile,
    #[error("Roll number must contain only numbers")]
    RollnoNotNumeric,
    #[error("Roll number must be between 3 and 15 digits")]
    RollnoLength,
    #[error("Password must be at least 6 characters long")]
    PasswordTooShort,
    #[error("Passwords do not match")]
    PasswordMismatch,
}

/// Account-creation form, serialized as the register endpoint's request body.
/// The confirmation password is checked locally and never sent.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Signup {
    pub name: String,
    pub rollno: String,
    pub mobile: String,
    pub batch: String,
    pub branch: String,
    pub college: String,
    pub email: String,
    pub password: String,
}

impl Signup {
    pub fn validate(&self, confirm_password: &str) -> Result<(), SignupError> {
        for (label, value) in [
            ("Name", &self.name),
            ("Batch", &self.batch),
            ("Branch", &self.branch),
            ("College", &self.college),
        ] {
            if value.trim().is_empty() {
                return Err(SignupError::MissingField(label));
            }
        }
        validate_email(&self.email)?;
        validate_mobile(&self.mobile)?;
        validate_rollno(&self.rollno)?;
        if self.password.len() < 6 {
            return Err(SignupError::PasswordTooShort);
        }
        if self.password != confirm_password {
            return Err(SignupError::PasswordMismatch);
        }
        Ok(())
    }
}

/// Minimal shape check: one `@`, non-empty local part, a dot in the domain.
pub fn validate_email(email: &str) -> Result<(), SignupError> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err(SignupError::Email);
    };
    let well_formed = !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(|c| c.is_whitespace())
        && !domain.contains('@');
    if well_formed {
        Ok(())
    } else {
        Err(SignupError::Email)
    }
}

/// Indian mobile number: exactly 10 digits, leading digit 6-9.
pub fn validate_mobile(mobile: &str) -> Result<(), SignupError> {
    let mut chars = mobile.chars();
    let valid = matches!(chars.next(), Some('6'..='9'))
        && mobile.len() == 10
        && mobile.chars().all(|c| c.is_ascii_digit());
    if valid { Ok(()) } else { Err(SignupError::Mobile) }
}

pub fn validate_rollno(rollno: &str) -> Result<(), SignupError> {
    if rollno.is_empty() || !rollno.chars().all(|c| c.is_ascii_digit()) {
        return Err(SignupError::RollnoNotNumeric);
    }
    if rollno.len() < 3 || rollno.len() > 15 {
        return Err(SignupError::RollnoLength);
    }
    Ok(())
}
