//! Validated cron expressions for recurring schedules.

use cron::Schedule;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::OrchestrationDomainError;

/// A cron expression validated at construction.
///
/// Both the standard five-field form and the seconds-bearing six/seven
/// field form are accepted; five-field expressions are parsed with an
/// implicit `0` seconds column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CronSpec(String);

impl CronSpec {
    /// Creates a validated cron expression.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestrationDomainError::InvalidCronExpression`] when
    /// the expression does not parse in either form.
    pub fn new(expression: impl Into<String>) -> Result<Self, OrchestrationDomainError> {
        let expression = expression.into().trim().to_owned();
        match Schedule::from_str(&expression) {
            Ok(_) => Ok(Self(expression)),
            Err(first_error) => {
                let field_count = expression.split_whitespace().count();
                if field_count == 5 && Schedule::from_str(&format!("0 {expression}")).is_ok() {
                    return Ok(Self(expression));
                }
                Err(OrchestrationDomainError::InvalidCronExpression {
                    expression,
                    reason: first_error.to_string(),
                })
            }
        }
    }

    /// Returns the expression as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CronSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
