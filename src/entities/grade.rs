// Grade labels
//
// A closed set of nine labels. Ordering carries no meaning.

use crate::error::RegistryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Grade {
    A,
    B,
    C,
    D,
    E,
    F,
    /// Not assessed
    NA,
    Absent,
    Special,
}

impl Grade {
    pub const ALL: [Grade; 9] = [
        Grade::A,
        Grade::B,
        Grade::C,
        Grade::D,
        Grade::E,
        Grade::F,
        Grade::NA,
        Grade::Absent,
        Grade::Special,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::E => "E",
            Grade::F => "F",
            Grade::NA => "NA",
            Grade::Absent => "ABSENT",
            Grade::Special => "SPECIAL",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = RegistryError;

    /// Exact, case-sensitive match on the label
    fn from_str(label: &str) -> Result<Self, Self::Err> {
        Grade::ALL
            .iter()
            .copied()
            .find(|grade| grade.as_str() == label)
            .ok_or_else(|| RegistryError::InvalidGrade(label.to_string()))
    }
}
