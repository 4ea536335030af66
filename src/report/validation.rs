//! Request validation with readable, per-field messages.

use std::fmt;

use super::models::GenerateReportRequest;
use crate::student::models::Student;

/// Trait for validating request objects.
pub trait Validator {
    fn validate(&self) -> Result<(), String>;
}

#[derive(Debug, Clone)]
pub struct ValidationError {
    /// The field that failed validation
    pub field: String,
    pub message: String,
    /// How to fix it
    pub suggestion: Option<String>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn missing(field: &str, label: &str) -> Self {
        Self::new(field, format!("{} is required", label))
    }

    pub fn empty_field(field: &str, label: &str) -> Self {
        Self::new(field, format!("{} must not be empty", label))
            .with_suggestion(format!("Provide a {}", label.to_lowercase()))
    }

    pub fn invalid_email(field: &str, value: &str) -> Self {
        Self::new(field, format!("'{}' is not a valid email address", value))
            .with_suggestion("Use an address such as ann@example.com")
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.field, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, ". {}", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Default)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|e| e.field.as_str())
    }

    /// One line per error, prefixed with the error count.
    pub fn to_message(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }

        let mut parts = vec![format!("Validation failed: {} error(s)", self.errors.len())];
        for (i, error) in self.errors.iter().enumerate() {
            parts.push(format!("{}. {}", i + 1, error));
        }
        parts.join("\n")
    }

    pub fn into_result(self) -> Result<(), String> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.to_message())
        }
    }
}

pub fn validate_required(value: &str, field: &str, label: &str, errors: &mut ValidationErrors) {
    if value.trim().is_empty() {
        errors.add(ValidationError::empty_field(field, label));
    }
}

pub fn validate_email(value: &str, field: &str, errors: &mut ValidationErrors) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(ValidationError::empty_field(field, "Email"));
        return;
    }

    let valid = match trimmed.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    };
    if !valid {
        errors.add(ValidationError::invalid_email(field, trimmed));
    }
}

fn validate_student(student: &Student, errors: &mut ValidationErrors) {
    validate_required(&student.name, "student.name", "Student name", errors);
    validate_email(&student.email, "student.email", errors);
    validate_required(&student.order_number, "student.orderNumber", "Order number", errors);
}

impl Validator for GenerateReportRequest {
    fn validate(&self) -> Result<(), String> {
        let mut errors = ValidationErrors::new();

        match &self.student {
            Some(student) => validate_student(student, &mut errors),
            None => errors.add(ValidationError::missing("student", "Student")),
        }

        match &self.report_content {
            Some(content) => validate_required(content, "reportContent", "Report content", &mut errors),
            None => errors.add(ValidationError::missing("reportContent", "Report content")),
        }

        match &self.password {
            Some(password) => validate_required(password, "password", "Password", &mut errors),
            None => errors.add(ValidationError::missing("password", "Password")),
        }

        errors.into_result()
    }
}
