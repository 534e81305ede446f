//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the startup
//! rule set and roles catalog from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::Employee;

use super::types::{AttendanceRules, AttendanceSettings};

/// Loads and provides access to the attendance configuration.
///
/// The configuration is read once at startup and handed to the store by
/// value; nothing looks it up globally afterwards.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── rules.yaml      # Attendance rule set (camelCase keys, all optional)
/// ├── settings.yaml   # Roles catalog
/// └── employees.yaml  # Optional staff list seeded on first start
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Full day value: {}", loader.rules().full_day);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    rules: AttendanceRules,
    settings: AttendanceSettings,
    employees: Vec<Employee>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/default")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `rules.yaml` or `settings.yaml` is missing
    /// - Any file contains invalid YAML
    /// - The rule set contains negative values
    ///
    /// Fields omitted from `rules.yaml` take their documented defaults. A
    /// missing `employees.yaml` means no staff are seeded.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let rules = Self::load_yaml::<AttendanceRules>(&path.join("rules.yaml"))?;
        rules.validate()?;

        let settings = Self::load_yaml::<AttendanceSettings>(&path.join("settings.yaml"))?;

        let employees_path = path.join("employees.yaml");
        let employees = if employees_path.exists() {
            Self::load_yaml::<Vec<Employee>>(&employees_path)?
        } else {
            Vec::new()
        };

        debug!(
            path = %path.display(),
            roles = settings.roles.len(),
            employees = employees.len(),
            "Loaded attendance configuration"
        );

        Ok(Self {
            rules,
            settings,
            employees,
        })
    }

    /// Creates a loader holding the built-in defaults.
    pub fn defaults() -> Self {
        Self::default()
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the configured rule set.
    pub fn rules(&self) -> &AttendanceRules {
        &self.rules
    }

    /// Returns the configured roles catalog.
    pub fn settings(&self) -> &AttendanceSettings {
        &self.settings
    }

    /// Returns the staff list seeded into an empty store.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Consumes the loader, returning the rule set, roles catalog and seed staff.
    pub fn into_parts(self) -> (AttendanceRules, AttendanceSettings, Vec<Employee>) {
        (self.rules, self.settings, self.employees)
    }
}
