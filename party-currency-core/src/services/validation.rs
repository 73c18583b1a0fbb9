//! Form validation
//!
//! Client-side checks run before a request is sent. Messages are keyed by
//! the backend field name so they render the same way backend field errors do.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::validation::ValidationErrors;

pub const PASSWORDS_DONT_MATCH: &str = "Passwords don't match";
pub const LOGIN_EMAIL_REQUIRED: &str = "Please enter a valid email address for login";

const PHONE_PREFIX: &str = "+234";

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
    })
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email.trim())
}

/// Counts characters as typed; surrounding whitespace is not stripped
fn check_min_len(errors: &mut ValidationErrors, field: &str, value: &str, min: usize, message: &str) {
    if value.chars().count() < min {
        errors.add(field, message);
    }
}

fn check_email(errors: &mut ValidationErrors, field: &str, email: &str, message: &str) {
    if !is_valid_email(email) {
        errors.add(field, message);
    }
}

fn check_phone(errors: &mut ValidationErrors, phone: &str) {
    if !phone.starts_with(PHONE_PREFIX) {
        errors.add("phone_number", "Phone number must start with +234");
    }
    let len = phone.chars().count();
    if len < 13 {
        errors.add("phone_number", "Phone number must be at least 10 digits long");
    } else if len > 14 {
        errors.add("phone_number", "Phone number must be 10-11 digits long");
    }
}

fn check_confirmation(errors: &mut ValidationErrors, password: &str, confirm: &str) {
    if password != confirm {
        errors.add("confirm_password", PASSWORDS_DONT_MATCH);
    }
}

/// Merchant registration form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MerchantSignup {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing, default)]
    pub confirm_password: String,
    pub business_type: String,
    pub country: String,
    pub state: String,
    pub city: String,
    pub phone_number: String,
}

impl MerchantSignup {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_min_len(
            &mut errors,
            "first_name",
            &self.first_name,
            2,
            "First name must be at least 2 characters",
        );
        check_min_len(
            &mut errors,
            "last_name",
            &self.last_name,
            2,
            "Last name must be at least 2 characters",
        );
        check_email(&mut errors, "email", &self.email, "Invalid email address");
        check_min_len(
            &mut errors,
            "password",
            &self.password,
            8,
            "Password must be at least 8 characters",
        );
        for (field, value, message) in [
            ("business_type", &self.business_type, "Please select a business type"),
            ("country", &self.country, "Please select a country"),
            ("state", &self.state, "Please select a state"),
            ("city", &self.city, "Please select a city"),
        ] {
            check_min_len(&mut errors, field, value, 1, message);
        }
        check_phone(&mut errors, &self.phone_number);
        check_confirmation(&mut errors, &self.password, &self.confirm_password);
        errors.into_result()
    }
}

/// Customer (celebrant) registration form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CelebrantSignup {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing, default)]
    pub confirm_password: String,
    pub phone_number: String,
}

impl CelebrantSignup {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_min_len(&mut errors, "first_name", &self.first_name, 2, "First name is required");
        check_min_len(&mut errors, "last_name", &self.last_name, 2, "Last name is required");
        check_email(&mut errors, "email", &self.email, "Invalid email address");
        check_min_len(
            &mut errors,
            "password",
            &self.password,
            8,
            "Password must be at least 8 characters",
        );
        check_min_len(
            &mut errors,
            "confirm_password",
            &self.confirm_password,
            8,
            "Please confirm your password",
        );
        check_phone(&mut errors, &self.phone_number);
        check_confirmation(&mut errors, &self.password, &self.confirm_password);
        errors.into_result()
    }
}

/// Login accepts only email addresses as the identifier
pub fn validate_login_identifier(identifier: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if !identifier.contains('@') {
        errors.add("identifier", LOGIN_EMAIL_REQUIRED);
    }
    errors.into_result()
}

/// Signed-in password change
#[derive(Debug, Clone, Default)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl PasswordChange {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.current_password.is_empty() {
            errors.add("current_password", "Current password is required");
        }

        let new = &self.new_password;
        if new.chars().count() < 8 {
            errors.add("new_password", "Password must be at least 8 characters");
        }
        if !new.chars().any(|c| c.is_ascii_uppercase()) {
            errors.add("new_password", "Password must contain at least 1 uppercase letter");
        }
        if !new.chars().any(|c| c.is_ascii_lowercase()) {
            errors.add("new_password", "Password must contain at least 1 lowercase letter");
        }
        if !new.chars().any(|c| c.is_ascii_digit()) {
            errors.add("new_password", "Password must contain at least 1 number");
        }

        if self.confirm_password.is_empty() {
            errors.add("confirm_password", "Please confirm your password");
        } else {
            check_confirmation(&mut errors, new, &self.confirm_password);
        }
        errors.into_result()
    }
}

/// Forgotten-password flow: request a code by email
pub fn validate_reset_email(email: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    check_email(&mut errors, "email", email, "Please enter a valid email address");
    errors.into_result()
}

/// Forgotten-password flow: the emailed verification code
pub fn validate_reset_code(code: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    check_min_len(&mut errors, "code", code, 4, "Please enter the verification code");
    errors.into_result()
}

/// Forgotten-password flow: the replacement password
pub fn validate_new_password(password: &str, confirm: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    check_min_len(
        &mut errors,
        "password",
        password,
        8,
        "Password must be at least 8 characters",
    );
    check_confirmation(&mut errors, password, confirm);
    errors.into_result()
}
