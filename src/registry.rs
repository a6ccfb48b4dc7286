// In-memory course registry plus the typed parsers for user input.
//
// Courses are kept in a Vec so iteration (and the JSON object written by
// `storage`) follows insertion order. Identifiers are unique after
// normalization; that is the only structural invariant.

use crate::error::{Result, TrackerError};
use serde::de::{Error as _, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Lowest and highest score accepted for a course.
pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 100.0;

/// One course: normalized identifier, credit weight and recorded scores.
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub id: String,
    pub credit: u32,
    pub scores: Vec<f64>,
}

/// Trim and uppercase a course name so `mth101 ` and `MTH101` are the same
/// course.
pub fn normalize_course_id(raw: &str) -> Result<String> {
    let id = raw.trim().to_uppercase();
    if id.is_empty() {
        return Err(TrackerError::InvalidCourseName);
    }
    Ok(id)
}

/// Parse a credit typed by the user. Only plain digits are accepted, and
/// the value must be at least 1.
pub fn parse_credit(raw: &str) -> Result<u32> {
    let text = raw.trim();
    let invalid = || TrackerError::InvalidCredit(text.to_string());
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    match text.parse::<u32>() {
        Ok(credit) if credit > 0 => Ok(credit),
        _ => Err(invalid()),
    }
}

/// Parse a score typed by the user and check it lies in 0-100.
pub fn parse_score(raw: &str) -> Result<f64> {
    let text = raw.trim();
    let value: f64 = text
        .parse()
        .map_err(|_| TrackerError::InvalidScore(text.to_string()))?;
    check_score(value)
}

fn check_score(value: f64) -> Result<f64> {
    if (SCORE_MIN..=SCORE_MAX).contains(&value) {
        Ok(value)
    } else {
        Err(TrackerError::ScoreOutOfRange(value))
    }
}

/// Ordered mapping from course identifier to course.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registry {
    courses: Vec<Course>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Courses in insertion order.
    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.courses.iter()
    }

    /// Look up a course by an already-normalized identifier.
    pub fn get(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Create a course with no scores.
    pub fn add_course(&mut self, id: &str, credit: u32) -> Result<&Course> {
        let id = normalize_course_id(id)?;
        if self.contains(&id) {
            return Err(TrackerError::DuplicateCourse(id));
        }
        if credit == 0 {
            return Err(TrackerError::InvalidCredit(credit.to_string()));
        }
        self.courses.push(Course {
            id,
            credit,
            scores: Vec::new(),
        });
        Ok(&self.courses[self.courses.len() - 1])
    }

    /// Append a score to an existing course.
    pub fn add_score(&mut self, id: &str, value: f64) -> Result<&Course> {
        let id = normalize_course_id(id)?;
        let value = check_score(value)?;
        let course = self
            .courses
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(TrackerError::CourseNotFound(id))?;
        course.scores.push(value);
        Ok(course)
    }
}

// On-disk shape of a single course; the identifier is the map key.
#[derive(Deserialize)]
struct CourseRecord {
    credit: u32,
    #[serde(default)]
    scores: Vec<f64>,
}

#[derive(Serialize)]
struct CourseRecordRef<'a> {
    credit: u32,
    scores: &'a [f64],
}

impl Serialize for Registry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.courses.len()))?;
        for course in &self.courses {
            map.serialize_entry(
                &course.id,
                &CourseRecordRef {
                    credit: course.credit,
                    scores: &course.scores,
                },
            )?;
        }
        map.end()
    }
}

struct RegistryVisitor;

impl<'de> Visitor<'de> for RegistryVisitor {
    type Value = Registry;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of course identifiers to {credit, scores}")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Registry, A::Error> {
        let mut registry = Registry::new();
        while let Some((key, record)) = access.next_entry::<String, CourseRecord>()? {
            let id = normalize_course_id(&key).map_err(A::Error::custom)?;
            if id != key {
                return Err(A::Error::custom(format!(
                    "course identifier {key:?} is not normalized"
                )));
            }
            let in_course = |e: TrackerError| A::Error::custom(format!("course {id}: {e}"));
            registry.add_course(&id, record.credit).map_err(in_course)?;
            for score in record.scores {
                registry.add_score(&id, score).map_err(in_course)?;
            }
        }
        Ok(registry)
    }
}

impl<'de> Deserialize<'de> for Registry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(RegistryVisitor)
    }
}
