// src/gpa/grade.rs
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Letter grades accepted by the institution, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Grade {
    APlus,
    A,
    AMinus,
    BPlus,
    B,
    BMinus,
    CPlus,
    C,
    F,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown grade '{0}'")]
pub struct InvalidGradeError(pub String);

impl Grade {
    pub const ALL: [Grade; 9] = [
        Grade::APlus,
        Grade::A,
        Grade::AMinus,
        Grade::BPlus,
        Grade::B,
        Grade::BMinus,
        Grade::CPlus,
        Grade::C,
        Grade::F,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::BMinus => "B-",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::F => "F",
        }
    }

    pub fn point(self) -> f64 {
        match self {
            Grade::APlus | Grade::A => 4.00,
            Grade::AMinus => 3.67,
            Grade::BPlus => 3.33,
            Grade::B => 3.00,
            Grade::BMinus => 2.67,
            Grade::CPlus => 2.33,
            Grade::C => 2.00,
            Grade::F => 0.00,
        }
    }

    pub fn is_pass(self) -> bool {
        self != Grade::F
    }
}

impl FromStr for Grade {
    type Err = InvalidGradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Grade::ALL
            .into_iter()
            .find(|g| g.as_str() == trimmed)
            .ok_or_else(|| InvalidGradeError(s.to_string()))
    }
}

impl TryFrom<String> for Grade {
    type Error = InvalidGradeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Grade> for String {
    fn from(grade: Grade) -> Self {
        grade.as_str().to_string()
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Looks a letter grade up in the fixed grade-point table.
///
/// Grades outside the table are rejected instead of defaulting to zero.
pub fn grade_to_point(grade: &str) -> Result<f64, InvalidGradeError> {
    grade.parse::<Grade>().map(Grade::point)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_institution_scale() {
        let expected = [
            ("A+", 4.00),
            ("A", 4.00),
            ("A-", 3.67),
            ("B+", 3.33),
            ("B", 3.00),
            ("B-", 2.67),
            ("C+", 2.33),
            ("C", 2.00),
            ("F", 0.00),
        ];
        for (letter, point) in expected {
            assert_eq!(grade_to_point(letter), Ok(point), "grade {letter}");
        }
    }

    #[test]
    fn unknown_grade_is_an_error() {
        assert_eq!(grade_to_point("D"), Err(InvalidGradeError("D".into())));
        assert_eq!(grade_to_point(""), Err(InvalidGradeError(String::new())));
        assert!(grade_to_point("a+").is_err());
    }

    #[test]
    fn letter_and_variant_map_both_ways() {
        for grade in Grade::ALL {
            assert_eq!(grade.as_str().parse::<Grade>(), Ok(grade));
        }
    }

    #[test]
    fn deserializes_from_letter() {
        let grade: Grade = serde_json::from_str("\"B+\"").unwrap();
        assert_eq!(grade, Grade::BPlus);
        assert!(serde_json::from_str::<Grade>("\"Z\"").is_err());
        assert_eq!(serde_json::to_string(&Grade::AMinus).unwrap(), "\"A-\"");
    }

    #[test]
    fn only_f_fails() {
        assert!(Grade::ALL.iter().filter(|g| !g.is_pass()).eq([Grade::F].iter()));
    }
}
