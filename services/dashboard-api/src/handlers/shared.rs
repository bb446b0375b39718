//! Shared handler utilities
//!
//! Form field helpers and metrics used across handlers.

use std::time::Instant;

use crate::error::ValidationError;

// ============================================================================
// Form Fields
// ============================================================================

/// Take a required form field, recording an error when it was not submitted.
pub fn required<'a>(
    value: &'a Option<String>,
    field: &'static str,
    errors: &mut ValidationError,
) -> Option<&'a str> {
    match value {
        Some(v) => Some(v.as_str()),
        None => {
            errors.add(field, format!("{field} is required"));
            None
        }
    }
}

// ============================================================================
// Metrics Helpers
// ============================================================================

/// Record HTTP operation duration with result label.
///
/// Labels: operation, result (ok/err)
#[inline]
pub fn record_op_duration(operation: &'static str, start: Instant, success: bool) {
    let result = if success { "ok" } else { "err" };
    metrics::histogram!(
        "dashboard_operation_duration_seconds",
        "operation" => operation,
        "result" => result
    )
    .record(start.elapsed().as_secs_f64());
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_present() {
        let mut errors = ValidationError::default();
        let value = Some(String::new());

        assert_eq!(required(&value, "customerId", &mut errors), Some(""));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_required_missing() {
        let mut errors = ValidationError::default();

        assert_eq!(required(&None, "status", &mut errors), None);
        assert_eq!(errors.field("status"), Some("status is required"));
    }
}
