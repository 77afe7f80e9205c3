//! Input validation for the waypoint table.
//!
//! Checks structural integrity of the loaded waypoints before any
//! optimization work starts. Detects:
//! - Duplicate identifiers
//! - A depot identifier that matches no row
//! - Coordinates outside the valid latitude/longitude ranges
//! - Too few waypoints to route at all

use crate::models::Waypoint;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two waypoints share the same identifier.
    DuplicateId,
    /// The chosen depot does not appear in the table.
    MissingDepot,
    /// Latitude or longitude outside its valid range.
    CoordinateOutOfRange,
    /// Not enough waypoints for a route.
    TooFewWaypoints,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the waypoint table against the injected depot.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with every detected issue.
pub fn validate_waypoints(waypoints: &[Waypoint], depot_id: &str) -> ValidationResult {
    let mut errors = Vec::new();

    if waypoints.len() < 2 {
        errors.push(ValidationError::new(
            ValidationErrorKind::TooFewWaypoints,
            format!("need at least 2 waypoints, got {}", waypoints.len()),
        ));
    }

    let mut seen = std::collections::HashSet::new();
    for wp in waypoints {
        if !seen.insert(wp.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("duplicate waypoint identifier: {}", wp.id),
            ));
        }
        if !(-90.0..=90.0).contains(&wp.latitude) {
            errors.push(ValidationError::new(
                ValidationErrorKind::CoordinateOutOfRange,
                format!("waypoint '{}' latitude {} outside [-90, 90]", wp.id, wp.latitude),
            ));
        }
        if !(-180.0..=180.0).contains(&wp.longitude) {
            errors.push(ValidationError::new(
                ValidationErrorKind::CoordinateOutOfRange,
                format!(
                    "waypoint '{}' longitude {} outside [-180, 180]",
                    wp.id, wp.longitude
                ),
            ));
        }
    }

    if !waypoints.iter().any(|wp| wp.id == depot_id) {
        errors.push(ValidationError::new(
            ValidationErrorKind::MissingDepot,
            format!("depot '{depot_id}' not found in the waypoint table"),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
