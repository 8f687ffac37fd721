use serde::{Deserialize, Serialize};

/// Outcome of validating a full mapping configuration.
///
/// Errors block compilation; warnings are advisory and never affect
/// validity. Both lists are ordered and deterministic: the same
/// configuration always yields the same messages in the same order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Build a report from accumulated findings; `valid` is derived, never
    /// set independently.
    pub fn from_findings(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_do_not_affect_validity() {
        let report =
            ValidationReport::from_findings(Vec::new(), vec!["advisory".to_string()]);
        assert!(report.valid);
        assert!(!report.has_errors());
        assert_eq!(report.warning_count(), 1);
    }
}
