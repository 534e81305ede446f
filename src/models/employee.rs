//! Employee model and related types.
//!
//! This module defines the Employee struct and Role enum
//! for representing staff whose attendance is valued.

use serde::{Deserialize, Serialize};

/// The staff role, used to pick the monthly short-leave quota.
///
/// Role strings the engine does not know deserialize to [`Role::Other`]
/// so that extra catalog roles never break loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Trainee associate.
    Trainee,
    /// Junior associate.
    Junior,
    /// Contract staff.
    Contract,
    /// Any other role.
    #[serde(other)]
    Other,
}

impl Role {
    /// Returns the key used for this role in rule and settings maps.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Trainee => "trainee",
            Role::Junior => "junior",
            Role::Contract => "contract",
            Role::Other => "other",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents an employee whose attendance is tracked.
///
/// Immutable once loaded as far as the valuation engine is concerned.
///
/// # Examples
///
/// ```
/// use attendance_engine::models::{Employee, Role};
///
/// let employee = Employee {
///     id: "EMP003".to_string(),
///     name: "Mike Johnson".to_string(),
///     designation: None,
///     role: Role::Contract,
///     is_contract: true,
/// };
/// assert!(employee.is_contract);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Job title shown on reports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    /// The staff role.
    pub role: Role,
    /// Whether the employee is on a contract (overtime is reported for these).
    #[serde(default)]
    pub is_contract: bool,
}
