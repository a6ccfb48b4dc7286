// Tracker context: owns the storage handle and the in-memory registry and
// is passed to every operation instead of living in globals.

use crate::config::TrackerConfig;
use crate::error::{Result, TrackerError};
use crate::registry::{normalize_course_id, parse_credit, parse_score, Course, Registry};
use crate::report::{Report, ReportOptions};
use crate::storage::Storage;
use log::info;

#[derive(Debug)]
pub struct Tracker {
    storage: Storage,
    registry: Registry,
    report_options: ReportOptions,
}

impl Tracker {
    /// Load the registry once from `storage`. A corrupt snapshot is returned
    /// as an error and nothing is overwritten.
    pub fn open(storage: Storage, report_options: ReportOptions) -> Result<Self> {
        let registry = storage.load()?;
        info!(
            "opened {} with {} course(s)",
            storage.path().display(),
            registry.len()
        );
        Ok(Tracker {
            storage,
            registry,
            report_options,
        })
    }

    pub fn from_config(config: &TrackerConfig) -> Result<Self> {
        Self::open(Storage::new(config.data_file.clone()), config.report)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// True if a course with this (un-normalized) name already exists.
    pub fn has_course(&self, name: &str) -> bool {
        normalize_course_id(name)
            .map(|id| self.registry.contains(&id))
            .unwrap_or(false)
    }

    /// Add a course from raw user input and persist.
    pub fn add_course(&mut self, name: &str, credit: &str) -> Result<Course> {
        let id = normalize_course_id(name)?;
        if self.registry.contains(&id) {
            return Err(TrackerError::DuplicateCourse(id));
        }
        let credit = parse_credit(credit)?;
        let course = self.commit(|registry| registry.add_course(&id, credit).cloned())?;
        info!("added course {} (credit {})", course.id, course.credit);
        Ok(course)
    }

    /// Append a score from raw user input and persist.
    pub fn add_score(&mut self, name: &str, score: &str) -> Result<Course> {
        let id = normalize_course_id(name)?;
        if !self.registry.contains(&id) {
            return Err(TrackerError::CourseNotFound(id));
        }
        let score = parse_score(score)?;
        let course = self.commit(|registry| registry.add_score(&id, score).cloned())?;
        info!("added score {score} to {}", course.id);
        Ok(course)
    }

    pub fn report(&self) -> Report {
        Report::build(&self.registry, self.report_options)
    }

    // Apply a mutation to a copy, save it, and only then replace the live
    // registry, so a failed save leaves memory and disk in agreement.
    fn commit<T, F>(&mut self, mutate: F) -> Result<T>
    where
        F: FnOnce(&mut Registry) -> Result<T>,
    {
        let mut next = self.registry.clone();
        let out = mutate(&mut next)?;
        self.storage.save(&next)?;
        self.registry = next;
        Ok(out)
    }
}
