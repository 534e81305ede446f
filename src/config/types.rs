//! Configuration types for attendance valuation.
//!
//! This module contains the strongly-typed rule set and roles catalog. Both
//! are deserialized from YAML configuration files at startup and from the
//! persisted `attendanceRules` / `attendanceSettings` collections at runtime.
//! Missing fields fall back to documented defaults rather than failing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{EngineError, EngineResult};
use crate::models::Role;

/// Quota used when neither the role nor the `default` entry sets one.
pub const FALLBACK_SHORT_LEAVE_QUOTA: u32 = 2;

fn default_full_day() -> Decimal {
    Decimal::ONE
}

fn default_half_day() -> Decimal {
    Decimal::new(5, 1)
}

fn default_short_leave_value() -> Decimal {
    Decimal::ONE
}

fn default_short_leave_penalty() -> Decimal {
    Decimal::new(5, 1)
}

/// Monthly short-leave quotas keyed by role, with an optional fallback.
///
/// Serialized as a flat map, e.g. `{"trainee": 2, "junior": 2, "default": 2}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortLeaveThresholds {
    /// Quota for roles without their own entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<u32>,
    /// Quota per role key.
    #[serde(flatten)]
    pub per_role: BTreeMap<String, u32>,
}

impl ShortLeaveThresholds {
    /// Returns the quota for a role: its own entry, else `default`, else 2.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::config::ShortLeaveThresholds;
    /// use attendance_engine::models::Role;
    /// use std::collections::BTreeMap;
    ///
    /// let thresholds = ShortLeaveThresholds {
    ///     default: Some(3),
    ///     per_role: BTreeMap::from([("trainee".to_string(), 1)]),
    /// };
    /// assert_eq!(thresholds.max_allowed(Role::Trainee), 1);
    /// assert_eq!(thresholds.max_allowed(Role::Junior), 3);
    /// ```
    pub fn max_allowed(&self, role: Role) -> u32 {
        self.per_role
            .get(role.as_str())
            .copied()
            .or(self.default)
            .unwrap_or(FALLBACK_SHORT_LEAVE_QUOTA)
    }
}

impl Default for ShortLeaveThresholds {
    fn default() -> Self {
        let per_role = [Role::Trainee, Role::Junior, Role::Contract]
            .iter()
            .map(|role| (role.as_str().to_string(), FALLBACK_SHORT_LEAVE_QUOTA))
            .collect();
        Self {
            default: Some(FALLBACK_SHORT_LEAVE_QUOTA),
            per_role,
        }
    }
}

/// The attendance rule set.
///
/// Every field has a documented default, so a partially configured rule set
/// is completed silently instead of being rejected.
///
/// # Example
///
/// ```
/// use attendance_engine::config::AttendanceRules;
/// use rust_decimal::Decimal;
///
/// let rules: AttendanceRules = serde_json::from_str(r#"{"halfDay": 0.4}"#).unwrap();
/// assert_eq!(rules.full_day, Decimal::ONE);
/// assert_eq!(rules.half_day, Decimal::new(4, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRules {
    /// Value of a full day (default 1.0).
    #[serde(default = "default_full_day")]
    pub full_day: Decimal,
    /// Value of a half day (default 0.5).
    #[serde(default = "default_half_day")]
    pub half_day: Decimal,
    /// Monthly short-leave quotas.
    #[serde(default)]
    pub short_leaves: ShortLeaveThresholds,
    /// Value of a short leave within quota (default 1.0).
    #[serde(default = "default_short_leave_value")]
    pub short_leave_value: Decimal,
    /// Value of a short leave beyond quota (default 0.5).
    #[serde(default = "default_short_leave_penalty")]
    pub short_leave_penalty: Decimal,
}

impl Default for AttendanceRules {
    fn default() -> Self {
        Self {
            full_day: default_full_day(),
            half_day: default_half_day(),
            short_leaves: ShortLeaveThresholds::default(),
            short_leave_value: default_short_leave_value(),
            short_leave_penalty: default_short_leave_penalty(),
        }
    }
}

impl AttendanceRules {
    /// Returns the short-leave quota for a role.
    pub fn max_short_leaves(&self, role: Role) -> u32 {
        self.short_leaves.max_allowed(role)
    }

    /// Checks that every value is non-negative.
    ///
    /// Thresholds are unsigned by construction.
    pub fn validate(&self) -> EngineResult<()> {
        let values = [
            ("fullDay", self.full_day),
            ("halfDay", self.half_day),
            ("shortLeaveValue", self.short_leave_value),
            ("shortLeavePenalty", self.short_leave_penalty),
        ];

        for (field, value) in values {
            if value < Decimal::ZERO {
                return Err(EngineError::InvalidRules {
                    field: field.to_string(),
                    message: format!("must not be negative, got {}", value),
                });
            }
        }
        Ok(())
    }
}

/// One entry of the roles catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleSetting {
    /// Role key (e.g. "trainee").
    pub id: String,
    /// Display name (e.g. "Trainee Associate").
    pub name: String,
    /// Pay rate: per day for staff, per month for contract roles.
    pub salary: Decimal,
    /// Monthly short-leave quota shown to administrators.
    #[serde(default)]
    pub short_leaves: u32,
    /// Whether the role is a contract role.
    #[serde(default)]
    pub is_contract: bool,
}

/// The roles catalog consumed by report and UI collaborators.
///
/// The valuation rules never read this; quotas used for valuation live in
/// [`AttendanceRules::short_leaves`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSettings {
    /// Configured roles.
    #[serde(default)]
    pub roles: Vec<RoleSetting>,
}

impl AttendanceSettings {
    /// Looks up a role entry by key.
    pub fn role(&self, id: &str) -> Option<&RoleSetting> {
        self.roles.iter().find(|r| r.id == id)
    }
}

impl Default for AttendanceSettings {
    fn default() -> Self {
        let role = |id: &str, name: &str, salary: i64, is_contract: bool| RoleSetting {
            id: id.to_string(),
            name: name.to_string(),
            salary: Decimal::from(salary),
            short_leaves: FALLBACK_SHORT_LEAVE_QUOTA,
            is_contract,
        };
        Self {
            roles: vec![
                role("trainee", "Trainee Associate", 1500, false),
                role("junior", "Junior Associate", 2000, false),
                role("contract", "Contract Staff", 80000, true),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_default_rules() {
        let rules = AttendanceRules::default();
        assert_eq!(rules.full_day, dec("1"));
        assert_eq!(rules.half_day, dec("0.5"));
        assert_eq!(rules.short_leave_value, dec("1"));
        assert_eq!(rules.short_leave_penalty, dec("0.5"));
        assert_eq!(rules.max_short_leaves(Role::Trainee), 2);
        assert_eq!(rules.max_short_leaves(Role::Other), 2);
    }

    #[test]
    fn test_empty_object_yields_defaults() {
        let rules: AttendanceRules = serde_json::from_str("{}").unwrap();
        assert_eq!(rules, AttendanceRules::default());
    }

    #[test]
    fn test_deserialize_stored_rules() {
        let json = r#"{
            "fullDay": 1,
            "halfDay": 0.5,
            "shortLeaves": {"trainee": 1, "junior": 3, "contract": 2, "default": 4},
            "shortLeaveValue": 1,
            "shortLeavePenalty": 0.25
        }"#;

        let rules: AttendanceRules = serde_json::from_str(json).unwrap();
        assert_eq!(rules.short_leave_penalty, dec("0.25"));
        assert_eq!(rules.max_short_leaves(Role::Trainee), 1);
        assert_eq!(rules.max_short_leaves(Role::Junior), 3);
        assert_eq!(rules.max_short_leaves(Role::Other), 4);
        assert!(!rules.short_leaves.per_role.contains_key("default"));
    }

    #[test]
    fn test_threshold_fallback_chain() {
        let no_default = ShortLeaveThresholds {
            default: None,
            per_role: BTreeMap::new(),
        };
        assert_eq!(no_default.max_allowed(Role::Junior), FALLBACK_SHORT_LEAVE_QUOTA);

        let zero_quota = ShortLeaveThresholds {
            default: Some(5),
            per_role: BTreeMap::from([("junior".to_string(), 0)]),
        };
        assert_eq!(zero_quota.max_allowed(Role::Junior), 0);
        assert_eq!(zero_quota.max_allowed(Role::Contract), 5);
    }

    #[test]
    fn test_negative_threshold_is_rejected_by_type() {
        let json = r#"{"shortLeaves": {"trainee": -1}}"#;
        assert!(serde_json::from_str::<AttendanceRules>(json).is_err());
    }

    #[test]
    fn test_validate_rejects_negative_value() {
        let rules = AttendanceRules {
            half_day: dec("-0.5"),
            ..AttendanceRules::default()
        };
        match rules.validate().unwrap_err() {
            EngineError::InvalidRules { field, .. } => assert_eq!(field, "halfDay"),
            other => panic!("Expected InvalidRules, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_accepts_zero_values() {
        let rules = AttendanceRules {
            short_leave_penalty: Decimal::ZERO,
            ..AttendanceRules::default()
        };
        assert!(rules.validate().is_ok());
    }

    #[test]
    fn test_serialize_rules_flattens_thresholds() {
        let json = serde_json::to_value(AttendanceRules::default()).unwrap();
        assert_eq!(json["shortLeaves"]["default"], 2);
        assert_eq!(json["shortLeaves"]["trainee"], 2);
        assert_eq!(json["fullDay"], "1");
    }

    #[test]
    fn test_default_settings_roles() {
        let settings = AttendanceSettings::default();
        assert_eq!(settings.roles.len(), 3);
        let contract = settings.role("contract").unwrap();
        assert!(contract.is_contract);
        assert_eq!(contract.salary, dec("80000"));
        assert!(settings.role("manager").is_none());
    }

    #[test]
    fn test_deserialize_stored_settings() {
        let json = r#"{
            "roles": [
                {"id": "trainee", "name": "Trainee Associate", "salary": 1500, "shortLeaves": 2},
                {"id": "contract", "name": "Contract Staff", "salary": 80000, "shortLeaves": 2, "isContract": true}
            ]
        }"#;
        let settings: AttendanceSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.roles.len(), 2);
        assert!(!settings.roles[0].is_contract);
        assert!(settings.roles[1].is_contract);
    }
}
