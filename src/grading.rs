// Grade bands. Pure lookup from an average to a letter and a remark.

use std::fmt;

/// Letter plus remark for one average.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grade {
    pub letter: &'static str,
    pub remark: &'static str,
}

impl Grade {
    const fn new(letter: &'static str, remark: &'static str) -> Self {
        Grade { letter, remark }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.letter, self.remark)
    }
}

/// Map an optional average to its grade. `None` means no scores recorded.
///
/// The 70 boundary belongs to A. Values outside 0-100 (and NaN) cannot come
/// from validated scores but still get a grade rather than a panic.
pub fn grade(average: Option<f64>) -> Grade {
    let Some(avg) = average else {
        return Grade::new("-", "No scores yet");
    };
    match avg {
        a if (70.0..=100.0).contains(&a) => Grade::new("A", "Excellent"),
        a if (60.0..70.0).contains(&a) => Grade::new("B", "Very Good"),
        a if (50.0..60.0).contains(&a) => Grade::new("C", "Good"),
        a if (45.0..50.0).contains(&a) => Grade::new("D", "Pass"),
        a if (0.0..45.0).contains(&a) => Grade::new("F", "Fail"),
        _ => Grade::new("-", "Invalid score"),
    }
}
