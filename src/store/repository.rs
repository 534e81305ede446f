//! Repository abstraction over the persisted collections.
//!
//! The store never touches storage directly; it goes through an
//! [`AttendanceRepository`], which exposes typed load/save access per
//! collection. [`InMemoryRepository`] backs tests and demos and
//! [`JsonFileRepository`] keeps one JSON file per collection key.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::{AttendanceRules, AttendanceSettings};
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, Employee};

/// Collection key for the employee list.
pub const EMPLOYEES_KEY: &str = "employees";
/// Collection key for the attendance rule set.
pub const RULES_KEY: &str = "attendanceRules";
/// Collection key for attendance records.
pub const ATTENDANCE_KEY: &str = "attendance";
/// Collection key for the roles catalog.
pub const SETTINGS_KEY: &str = "attendanceSettings";

/// Typed access to the persisted collections.
///
/// Collections that were never written load as empty (lists) or `None`
/// (single objects). Storage failures are reported as
/// [`EngineError::Persistence`].
pub trait AttendanceRepository: Send {
    /// Loads all employees.
    fn load_employees(&self) -> EngineResult<Vec<Employee>>;
    /// Replaces all employees.
    fn save_employees(&mut self, employees: &[Employee]) -> EngineResult<()>;
    /// Loads the rule set, if one was ever saved.
    fn load_rules(&self) -> EngineResult<Option<AttendanceRules>>;
    /// Replaces the rule set.
    fn save_rules(&mut self, rules: &AttendanceRules) -> EngineResult<()>;
    /// Loads all attendance records.
    fn load_records(&self) -> EngineResult<Vec<AttendanceRecord>>;
    /// Replaces all attendance records.
    fn save_records(&mut self, records: &[AttendanceRecord]) -> EngineResult<()>;
    /// Loads the roles catalog, if one was ever saved.
    fn load_settings(&self) -> EngineResult<Option<AttendanceSettings>>;
    /// Replaces the roles catalog.
    fn save_settings(&mut self, settings: &AttendanceSettings) -> EngineResult<()>;
}

/// Repository holding every collection in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    employees: Vec<Employee>,
    rules: Option<AttendanceRules>,
    records: Vec<AttendanceRecord>,
    settings: Option<AttendanceSettings>,
}

impl InMemoryRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository seeded with employees.
    pub fn with_employees(employees: Vec<Employee>) -> Self {
        Self {
            employees,
            ..Self::default()
        }
    }

    /// Seeds attendance records.
    pub fn with_records(mut self, records: Vec<AttendanceRecord>) -> Self {
        self.records = records;
        self
    }
}

impl AttendanceRepository for InMemoryRepository {
    fn load_employees(&self) -> EngineResult<Vec<Employee>> {
        Ok(self.employees.clone())
    }

    fn save_employees(&mut self, employees: &[Employee]) -> EngineResult<()> {
        self.employees = employees.to_vec();
        Ok(())
    }

    fn load_rules(&self) -> EngineResult<Option<AttendanceRules>> {
        Ok(self.rules.clone())
    }

    fn save_rules(&mut self, rules: &AttendanceRules) -> EngineResult<()> {
        self.rules = Some(rules.clone());
        Ok(())
    }

    fn load_records(&self) -> EngineResult<Vec<AttendanceRecord>> {
        Ok(self.records.clone())
    }

    fn save_records(&mut self, records: &[AttendanceRecord]) -> EngineResult<()> {
        self.records = records.to_vec();
        Ok(())
    }

    fn load_settings(&self) -> EngineResult<Option<AttendanceSettings>> {
        Ok(self.settings.clone())
    }

    fn save_settings(&mut self, settings: &AttendanceSettings) -> EngineResult<()> {
        self.settings = Some(settings.clone());
        Ok(())
    }
}

/// Repository keeping each collection in `<dir>/<key>.json`.
///
/// Writes go to `<key>.json.tmp` first and are renamed into place, so a
/// reader never sees a half-written collection.
///
/// # Example
///
/// ```no_run
/// use attendance_engine::store::{AttendanceRepository, JsonFileRepository};
///
/// let repository = JsonFileRepository::new("./data");
/// let records = repository.load_records()?;
/// # Ok::<(), attendance_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    dir: PathBuf,
}

impl JsonFileRepository {
    /// Creates a repository rooted at `dir`. The directory is created on first write.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Returns the file path backing a collection key.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> EngineResult<Option<T>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path).map_err(|e| EngineError::Persistence {
            key: key.to_string(),
            message: format!("failed to read {}: {}", path.display(), e),
        })?;

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| EngineError::Persistence {
                key: key.to_string(),
                message: format!("corrupted JSON in {}: {}", path.display(), e),
            })
    }

    fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> EngineResult<()> {
        let persistence = |message: String| EngineError::Persistence {
            key: key.to_string(),
            message,
        };

        fs::create_dir_all(&self.dir).map_err(|e| {
            persistence(format!("failed to create {}: {}", self.dir.display(), e))
        })?;

        let content = serde_json::to_string_pretty(value)
            .map_err(|e| persistence(format!("failed to serialize: {}", e)))?;

        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{}.json.tmp", key));
        write_and_sync(&tmp, content.as_bytes())
            .map_err(|e| persistence(format!("failed to write {}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, &path)
            .map_err(|e| persistence(format!("failed to replace {}: {}", path.display(), e)))
    }
}

fn write_and_sync(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

impl AttendanceRepository for JsonFileRepository {
    fn load_employees(&self) -> EngineResult<Vec<Employee>> {
        Ok(self.read(EMPLOYEES_KEY)?.unwrap_or_default())
    }

    fn save_employees(&mut self, employees: &[Employee]) -> EngineResult<()> {
        self.write(EMPLOYEES_KEY, employees)
    }

    fn load_rules(&self) -> EngineResult<Option<AttendanceRules>> {
        self.read(RULES_KEY)
    }

    fn save_rules(&mut self, rules: &AttendanceRules) -> EngineResult<()> {
        self.write(RULES_KEY, rules)
    }

    fn load_records(&self) -> EngineResult<Vec<AttendanceRecord>> {
        Ok(self.read(ATTENDANCE_KEY)?.unwrap_or_default())
    }

    fn save_records(&mut self, records: &[AttendanceRecord]) -> EngineResult<()> {
        self.write(ATTENDANCE_KEY, records)
    }

    fn load_settings(&self) -> EngineResult<Option<AttendanceSettings>> {
        self.read(SETTINGS_KEY)
    }

    fn save_settings(&mut self, settings: &AttendanceSettings) -> EngineResult<()> {
        self.write(SETTINGS_KEY, settings)
    }
}
