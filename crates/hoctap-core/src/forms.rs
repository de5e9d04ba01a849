//! Authentication form payloads and their client-side checks.
//!
//! A form that fails validation is never sent. Register and forgot-password
//! additionally require the bot-check token.

use serde::Serialize;

use crate::error::{ApiError, ValidationError};

pub const MIN_PASSWORD_LEN: usize = 6;

fn check_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::EmptyEmail);
    }
    let Some((local, domain)) = email.split_once('@') else {
        return Err(ValidationError::InvalidEmail);
    };
    if local.is_empty()
        || domain.starts_with('.')
        || domain.ends_with('.')
        || !domain.contains('.')
        || email.contains(char::is_whitespace)
    {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

fn check_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

fn check_captcha(token: &Option<String>) -> Result<(), ApiError> {
    match token.as_deref().map(str::trim) {
        Some(t) if !t.is_empty() => Ok(()),
        _ => Err(ApiError::MissingCaptcha),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), ApiError> {
        check_email(&self.email)?;
        if self.password.is_empty() {
            return Err(ValidationError::Required("password").into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    #[serde(skip)]
    pub confirm_password: String,
    pub captcha_token: Option<String>,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.full_name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        check_email(&self.email)?;
        check_password(&self.password)?;
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch.into());
        }
        check_captcha(&self.captcha_token)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordForm {
    pub email: String,
    pub captcha_token: Option<String>,
}

impl ForgotPasswordForm {
    pub fn validate(&self) -> Result<(), ApiError> {
        check_email(&self.email)?;
        check_captcha(&self.captcha_token)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordForm {
    pub token: String,
    pub password: String,
    #[serde(skip)]
    pub confirm_password: String,
}

impl ResetPasswordForm {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.token.trim().is_empty() {
            return Err(ValidationError::Required("reset token").into());
        }
        check_password(&self.password)?;
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch.into());
        }
        Ok(())
    }
}
