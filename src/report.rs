// Progress report: per-course averages and the credit-weighted overall.
// Building a `Report` never touches storage or mutates the registry.

use crate::grading::{grade, Grade};
use crate::registry::Registry;
use crossterm::style::Stylize;
use std::fmt::{self, Write};

/// Arithmetic mean, or `None` for an empty slice.
pub fn average(scores: &[f64]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    Some(scores.iter().sum::<f64>() / scores.len() as f64)
}

/// Switches for report output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Show letter grade and remark per course and for the overall average.
    pub show_course_grades: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            show_course_grades: true,
        }
    }
}

/// Motivational message chosen from the overall average.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Warning,
    Encouragement,
    Congratulation,
}

impl Tier {
    pub fn from_overall(overall: f64) -> Self {
        if overall < 50.0 {
            Tier::Warning
        } else if overall < 70.0 {
            Tier::Encouragement
        } else {
            Tier::Congratulation
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Tier::Warning => "⚠ Warning: Your overall average is low. Time to lock in.",
            Tier::Encouragement => "Keep pushing, you’re on your way up.",
            Tier::Congratulation => "🔥 Strong performance. Keep it up.",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CourseLine {
    pub id: String,
    pub credit: u32,
    pub average: Option<f64>,
    pub grade: Grade,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Overall {
    pub average: f64,
    pub grade: Grade,
    pub tier: Tier,
    pub total_credits: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub courses: Vec<CourseLine>,
    /// Absent when no course has a score yet.
    pub overall: Option<Overall>,
    pub options: ReportOptions,
}

impl Report {
    pub fn build(registry: &Registry, options: ReportOptions) -> Self {
        let mut courses = Vec::with_capacity(registry.len());
        let mut weighted_sum = 0.0;
        let mut total_credits: u64 = 0;

        for course in registry.courses() {
            let avg = average(&course.scores);
            if let Some(avg) = avg {
                weighted_sum += avg * f64::from(course.credit);
                total_credits += u64::from(course.credit);
            }
            courses.push(CourseLine {
                id: course.id.clone(),
                credit: course.credit,
                average: avg,
                grade: grade(avg),
            });
        }

        let overall = (total_credits > 0).then(|| {
            let avg = weighted_sum / total_credits as f64;
            Overall {
                average: avg,
                grade: grade(Some(avg)),
                tier: Tier::from_overall(avg),
                total_credits,
            }
        });

        Report {
            courses,
            overall,
            options,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Render as text. `styled` colours the tier line for a terminal.
    pub fn render(&self, styled: bool) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_to(&mut out, styled);
        out
    }

    fn write_to(&self, out: &mut String, styled: bool) -> fmt::Result {
        if self.is_empty() {
            return writeln!(out, "No courses yet.");
        }
        let graded = self.options.show_course_grades;

        writeln!(out, "=== COURSE REPORT ===")?;
        for line in &self.courses {
            match line.average {
                None => writeln!(out, "{}: no scores yet (credit {})", line.id, line.credit)?,
                Some(avg) if graded => writeln!(
                    out,
                    "{}: avg = {:.2}, grade = {}, {} (credit {})",
                    line.id, avg, line.grade.letter, line.grade.remark, line.credit
                )?,
                Some(avg) => writeln!(out, "{}: avg = {:.2} (credit {})", line.id, avg, line.credit)?,
            }
        }

        if let Some(overall) = &self.overall {
            writeln!(out)?;
            writeln!(out, "=== OVERALL PERFORMANCE ===")?;
            writeln!(out, "Weighted average: {:.2}", overall.average)?;
            if graded {
                writeln!(out, "Overall grade: {}", overall.grade)?;
            }
            let message = overall.tier.message();
            if styled {
                let styled = match overall.tier {
                    Tier::Warning => message.red(),
                    Tier::Encouragement => message.yellow(),
                    Tier::Congratulation => message.green(),
                };
                writeln!(out, "{styled}")?;
            } else {
                writeln!(out, "{message}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(entries: &[(&str, u32, Vec<f64>)]) -> Registry {
        let mut registry = Registry::new();
        for (id, credit, scores) in entries {
            registry.add_course(id, *credit).unwrap();
            for s in scores {
                registry.add_score(id, *s).unwrap();
            }
        }
        registry
    }

    #[test]
    fn average_of_nothing_is_absent() {
        assert_eq!(average(&[]), None);
        assert_eq!(average(&[70.0, 80.0]), Some(75.0));
    }

    #[test]
    fn empty_registry_reports_no_courses() {
        let report = Report::build(&Registry::new(), ReportOptions::default());
        assert!(report.overall.is_none());
        assert_eq!(report.to_string(), "No courses yet.\n");
    }

    #[test]
    fn single_course_scenario() {
        let reg = registry(&[("MTH101", 3, vec![80.0, 60.0])]);
        let report = Report::build(&reg, ReportOptions::default());

        assert_eq!(report.courses[0].average, Some(70.0));
        assert_eq!(report.courses[0].grade.letter, "A");
        let overall = report.overall.as_ref().unwrap();
        assert_eq!(overall.average, 70.0);
        assert_eq!(overall.tier, Tier::Congratulation);

        let text = report.to_string();
        assert!(text.contains("MTH101: avg = 70.00, grade = A, Excellent (credit 3)"));
        assert!(text.contains("Weighted average: 70.00"));
        assert!(text.contains("Overall grade: A (Excellent)"));
        assert!(text.contains(Tier::Congratulation.message()));
    }

    #[test]
    fn courses_without_scores_do_not_weigh_in() {
        let reg = registry(&[("MTH101", 3, vec![40.0]), ("PHY102", 10, vec![]), ("CHM201", 1, vec![80.0])]);
        let report = Report::build(&reg, ReportOptions::default());

        let overall = report.overall.unwrap();
        assert_eq!(overall.total_credits, 4);
        assert!((overall.average - 50.0).abs() < 1e-9);
        assert_eq!(overall.tier, Tier::Encouragement);
        assert_eq!(report.courses[1].average, None);
        assert_eq!(report.courses[1].grade.remark, "No scores yet");
    }

    #[test]
    fn no_scores_anywhere_has_no_overall() {
        let reg = registry(&[("MTH101", 3, vec![])]);
        let report = Report::build(&reg, ReportOptions::default());
        assert!(report.overall.is_none());
        let text = report.to_string();
        assert!(text.contains("MTH101: no scores yet (credit 3)"));
        assert!(!text.contains("OVERALL"));
    }

    #[test]
    fn grades_can_be_hidden() {
        let reg = registry(&[("MTH101", 2, vec![30.0])]);
        let report = Report::build(
            &reg,
            ReportOptions {
                show_course_grades: false,
            },
        );
        let text = report.to_string();
        assert!(text.contains("MTH101: avg = 30.00 (credit 2)"));
        assert!(!text.contains("grade"));
        assert!(text.contains(Tier::Warning.message()));
    }

    #[test]
    fn lines_follow_insertion_order() {
        let reg = registry(&[("ZOO100", 1, vec![50.0]), ("ART200", 1, vec![60.0])]);
        let text = Report::build(&reg, ReportOptions::default()).to_string();
        assert!(text.find("ZOO100").unwrap() < text.find("ART200").unwrap());
    }

    #[test]
    fn tier_messages() {
        assert_eq!(
            Tier::Warning.message(),
            "⚠ Warning: Your overall average is low. Time to lock in."
        );
        assert_eq!(
            Tier::Encouragement.message(),
            "Keep pushing, you’re on your way up."
        );
        assert_eq!(
            Tier::Congratulation.message(),
            "🔥 Strong performance. Keep it up."
        );
    }

    #[test]
    fn tier_thresholds() {
        assert_eq!(Tier::from_overall(49.99), Tier::Warning);
        assert_eq!(Tier::from_overall(50.0), Tier::Encouragement);
        assert_eq!(Tier::from_overall(69.99), Tier::Encouragement);
        assert_eq!(Tier::from_overall(70.0), Tier::Congratulation);
    }
}
