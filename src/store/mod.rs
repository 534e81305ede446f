//! The attendance store.
//!
//! [`AttendanceStore`] owns the persisted collections (employees, rules,
//! attendance records, roles catalog) through an injected
//! [`AttendanceRepository`]. It keeps the `(employee_id, date)` key unique
//! and derives worked hours when a record gains both check times.
//!
//! The store does not check that an employee exists before recording
//! attendance for it; such records are accepted and logged.

mod repository;

pub use repository::{
    ATTENDANCE_KEY, AttendanceRepository, EMPLOYEES_KEY, InMemoryRepository, JsonFileRepository,
    RULES_KEY, SETTINGS_KEY,
};

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::calculation::{compute_hours, format_clock_time};
use crate::config::{AttendanceRules, AttendanceSettings, ConfigLoader};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, AttendanceType, CheckDirection, CheckMethod, Employee,
};

/// Typed access to the attendance collections.
///
/// # Example
///
/// ```
/// use attendance_engine::config::ConfigLoader;
/// use attendance_engine::models::CheckDirection;
/// use attendance_engine::store::{AttendanceStore, InMemoryRepository};
/// use chrono::NaiveDate;
///
/// let mut store = AttendanceStore::new(InMemoryRepository::new(), ConfigLoader::defaults());
/// let at = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap().and_hms_opt(9, 0, 0).unwrap();
/// let record = store.record_check_event("EMP001", CheckDirection::In, at)?;
/// assert_eq!(record.check_in.as_deref(), Some("09:00 AM"));
/// # Ok::<(), attendance_engine::error::EngineError>(())
/// ```
pub struct AttendanceStore {
    repository: Box<dyn AttendanceRepository>,
    default_rules: AttendanceRules,
    default_settings: AttendanceSettings,
}

impl std::fmt::Debug for AttendanceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttendanceStore")
            .field("default_rules", &self.default_rules)
            .field("default_settings", &self.default_settings)
            .finish_non_exhaustive()
    }
}

impl AttendanceStore {
    /// Creates a store over a repository.
    ///
    /// The loaded configuration supplies the rules and roles catalog returned
    /// while the repository holds none of its own.
    ///
    /// Nothing is written; see [`AttendanceStore::open`] for first-start seeding.
    pub fn new<R: AttendanceRepository + 'static>(repository: R, config: ConfigLoader) -> Self {
        let (default_rules, default_settings, _) = config.into_parts();
        Self {
            repository: Box::new(repository),
            default_rules,
            default_settings,
        }
    }

    /// Creates a store and seeds the configured staff list if the repository
    /// holds no employees yet.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Persistence`] if the repository cannot be read
    /// or written.
    pub fn open<R: AttendanceRepository + 'static>(
        repository: R,
        config: ConfigLoader,
    ) -> EngineResult<Self> {
        let employees = config.employees().to_vec();
        let mut store = Self::new(repository, config);
        store.seed_employees(employees)?;
        Ok(store)
    }

    /// Writes `employees` if the employees collection is empty.
    ///
    /// Returns the number of employees written.
    pub fn seed_employees(&mut self, employees: Vec<Employee>) -> EngineResult<usize> {
        if employees.is_empty() || !self.repository.load_employees()?.is_empty() {
            return Ok(0);
        }
        self.repository.save_employees(&employees)?;
        info!(count = employees.len(), "Seeded default employees");
        Ok(employees.len())
    }

    /// Looks up an employee by id.
    pub fn get_employee(&self, id: &str) -> EngineResult<Option<Employee>> {
        Ok(self
            .repository
            .load_employees()?
            .into_iter()
            .find(|e| e.id == id))
    }

    /// Returns every employee.
    pub fn list_employees(&self) -> EngineResult<Vec<Employee>> {
        self.repository.load_employees()
    }

    /// Inserts an employee, replacing any existing one with the same id.
    pub fn save_employee(&mut self, employee: Employee) -> EngineResult<()> {
        let mut employees = self.repository.load_employees()?;
        match employees.iter_mut().find(|e| e.id == employee.id) {
            Some(existing) => *existing = employee,
            None => employees.push(employee),
        }
        self.repository.save_employees(&employees)
    }

    /// Returns the persisted rule set, or the configured defaults if none was saved.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidRules`] if the persisted rule set holds a
    /// negative value.
    pub fn get_rules(&self) -> EngineResult<AttendanceRules> {
        let Some(rules) = self.repository.load_rules()? else {
            return Ok(self.default_rules.clone());
        };
        rules.validate().inspect_err(|err| {
            warn!(error = %err, "Persisted attendance rules are invalid");
        })?;
        Ok(rules)
    }

    /// Validates and persists a new rule set.
    pub fn update_rules(&mut self, rules: AttendanceRules) -> EngineResult<()> {
        rules.validate()?;
        self.repository.save_rules(&rules)?;
        info!("Attendance rules updated");
        Ok(())
    }

    /// Returns the persisted roles catalog, or the configured one.
    pub fn get_settings(&self) -> EngineResult<AttendanceSettings> {
        Ok(self
            .repository
            .load_settings()?
            .unwrap_or_else(|| self.default_settings.clone()))
    }

    /// Persists a new roles catalog.
    pub fn update_settings(&mut self, settings: AttendanceSettings) -> EngineResult<()> {
        self.repository.save_settings(&settings)
    }

    /// Records a check-in or check-out captured through an attendance link.
    ///
    /// See [`AttendanceStore::record_check_event_via`].
    pub fn record_check_event(
        &mut self,
        employee_id: &str,
        direction: CheckDirection,
        timestamp: NaiveDateTime,
    ) -> EngineResult<AttendanceRecord> {
        self.record_check_event_via(employee_id, direction, timestamp, CheckMethod::Link)
    }

    /// Records a check-in or check-out.
    ///
    /// Finds or creates the record for `(employee_id, timestamp.date())` and
    /// sets the check time for `direction`, overwriting any earlier value.
    /// Once both check times are present, `hours` is recomputed. A check-out
    /// earlier than the check-in (including a shift crossing midnight) sets
    /// `hours` to zero.
    ///
    /// `method` is only recorded when the record is created.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidTime`] if a stored check time cannot be parsed;
    ///   nothing is persisted in that case
    /// - [`EngineError::Persistence`] if the repository fails
    pub fn record_check_event_via(
        &mut self,
        employee_id: &str,
        direction: CheckDirection,
        timestamp: NaiveDateTime,
        method: CheckMethod,
    ) -> EngineResult<AttendanceRecord> {
        if self.get_employee(employee_id)?.is_none() {
            warn!(employee_id, "Recording attendance for unknown employee");
        }

        let time = format_clock_time(timestamp.time());
        let record = self.update_record(employee_id, timestamp.date(), method, |record| {
            match direction {
                CheckDirection::In => record.check_in = Some(time),
                CheckDirection::Out => record.check_out = Some(time),
            }

            if let (Some(check_in), Some(check_out)) = (&record.check_in, &record.check_out) {
                let hours = compute_hours(check_in, check_out)?;
                record.hours = if hours < Decimal::ZERO {
                    warn!(
                        employee_id = %record.employee_id,
                        date = %record.date,
                        check_in = %check_in,
                        check_out = %check_out,
                        "Check-out precedes check-in; hours set to zero"
                    );
                    Decimal::ZERO
                } else {
                    hours
                };
            }
            Ok(())
        })?;

        info!(
            employee_id,
            date = %record.date,
            direction = ?direction,
            hours = %record.hours,
            "Recorded check event"
        );
        Ok(record)
    }

    /// Sets or clears the type of an employee's record for a date.
    pub fn set_record_type(
        &mut self,
        employee_id: &str,
        date: NaiveDate,
        attendance_type: Option<AttendanceType>,
    ) -> EngineResult<AttendanceRecord> {
        self.update_record(employee_id, date, CheckMethod::Manual, |record| {
            record.attendance_type = attendance_type;
            Ok(())
        })
    }

    /// Sets the overtime hours of an employee's record for a date.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidRecord`] if `ot_hours` is negative.
    pub fn set_ot_hours(
        &mut self,
        employee_id: &str,
        date: NaiveDate,
        ot_hours: Decimal,
    ) -> EngineResult<AttendanceRecord> {
        if ot_hours < Decimal::ZERO {
            return Err(EngineError::InvalidRecord {
                field: "otHours".to_string(),
                message: format!("must not be negative, got {}", ot_hours),
            });
        }
        self.update_record(employee_id, date, CheckMethod::Manual, |record| {
            record.ot_hours = Some(ot_hours);
            Ok(())
        })
    }

    /// Returns an employee's records for a calendar month, oldest first.
    pub fn get_records_for_month(
        &self,
        employee_id: &str,
        year: i32,
        month: u32,
    ) -> EngineResult<Vec<AttendanceRecord>> {
        let mut records: Vec<AttendanceRecord> = self
            .repository
            .load_records()?
            .into_iter()
            .filter(|r| r.employee_id == employee_id && r.is_in_month(year, month))
            .collect();
        records.sort_by_key(|r| r.date);
        Ok(records)
    }

    /// Returns every employee's record for one date.
    pub fn get_records_for_date(&self, date: NaiveDate) -> EngineResult<Vec<AttendanceRecord>> {
        Ok(self
            .repository
            .load_records()?
            .into_iter()
            .filter(|r| r.date == date)
            .collect())
    }

    /// Applies `update` to the record keyed by `(employee_id, date)`,
    /// creating it first if needed, then persists the collection.
    fn update_record<F>(
        &mut self,
        employee_id: &str,
        date: NaiveDate,
        method: CheckMethod,
        update: F,
    ) -> EngineResult<AttendanceRecord>
    where
        F: FnOnce(&mut AttendanceRecord) -> EngineResult<()>,
    {
        let mut records = self.repository.load_records()?;

        let index = match records.iter().position(|r| r.matches_key(employee_id, date)) {
            Some(index) => index,
            None => {
                debug!(employee_id, date = %date, "Creating attendance record");
                let mut record = AttendanceRecord::new(employee_id, date);
                record.method = method;
                records.push(record);
                records.len() - 1
            }
        };

        update(&mut records[index])?;
        let updated = records[index].clone();
        self.repository.save_records(&records)?;
        Ok(updated)
    }
}
