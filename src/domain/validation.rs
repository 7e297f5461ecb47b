//! Client-side checks run before a form is submitted.
//!
//! The backend stays authoritative; these only catch the obvious mistakes so
//! the user sees them inline without a round trip.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

use crate::api::error::ValidationErrors;
use crate::models::{ClientInput, EmployeeInput};

lazy_static! {
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();

    /// Digits with optional leading +, spaces, dots and dashes
    static ref PHONE_REGEX: Regex =
        Regex::new(r"^\+?[0-9][0-9 .\-]{7,18}[0-9]$").unwrap();
}

pub fn validate_name(name: &str) -> Result<(), String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Name is required".to_string());
    }
    if name.chars().count() > 255 {
        return Err("Name is too long (max 255 characters)".to_string());
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }
    if email.len() > 255 {
        return Err("Email is too long (max 255 characters)".to_string());
    }
    if !EMAIL_REGEX.is_match(email) {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// Optional field; empty counts as absent
pub fn validate_phone(phone: &Option<String>) -> Result<(), String> {
    match phone.as_deref().map(str::trim) {
        None | Some("") => Ok(()),
        Some(p) if PHONE_REGEX.is_match(p) => Ok(()),
        Some(_) => Err("Invalid phone number".to_string()),
    }
}

/// A subscription price may be zero
pub fn validate_price(price: f64) -> Result<(), String> {
    if !price.is_finite() || price < 0.0 {
        return Err("Price cannot be negative".to_string());
    }
    Ok(())
}

/// Money actually paid, as for a renewal
pub fn validate_amount(amount: f64) -> Result<(), String> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err("Amount must be greater than zero".to_string());
    }
    Ok(())
}

pub fn validate_period(start: NaiveDate, end: NaiveDate) -> Result<(), String> {
    if end < start {
        return Err("End date must be on or after the start date".to_string());
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), String> {
    if password.chars().count() < 8 {
        return Err("Password must be at least 8 characters".to_string());
    }
    Ok(())
}

pub fn validate_client(input: &ClientInput) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::builder();
    if let Err(e) = validate_name(&input.name) {
        errors.add("name", e);
    }
    if let Some(email) = input.email.as_deref().filter(|e| !e.is_empty()) {
        if let Err(e) = validate_email(email) {
            errors.add("email", e);
        }
    }
    if let Err(e) = validate_phone(&input.phone) {
        errors.add("phone", e);
    }
    errors.finish()
}

/// `creating` makes the password mandatory
pub fn validate_employee(input: &EmployeeInput, creating: bool) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::builder();
    if let Err(e) = validate_name(&input.name) {
        errors.add("name", e);
    }
    if let Err(e) = validate_email(&input.email) {
        errors.add("email", e);
    }
    if let Err(e) = validate_phone(&input.phone) {
        errors.add("phone", e);
    }
    match input.password.as_deref() {
        Some(password) => {
            if let Err(e) = validate_password(password) {
                errors.add("password", e);
            }
        }
        None if creating => {
            errors.add("password", "Password is required");
        }
        None => {}
    }
    errors.finish()
}
