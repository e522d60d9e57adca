//! The three documents derived from one syllabus

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the derivative documents produced from a syllabus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// The full work program without the assessment-fund page
    WorkProgram,
    /// The short annotation of the work program
    Annotation,
    /// The assessment fund (section 6 onwards)
    AssessmentFund,
}

impl Variant {
    /// All variants, in output order
    pub const ALL: [Variant; 3] = [
        Variant::WorkProgram,
        Variant::Annotation,
        Variant::AssessmentFund,
    ];

    /// Output file name without extension
    pub fn file_stem(self) -> &'static str {
        match self {
            Variant::WorkProgram => "Work Program",
            Variant::Annotation => "Annotation",
            Variant::AssessmentFund => "Assessment Fund",
        }
    }

    /// Title page text used when none is configured
    pub fn default_title(self) -> &'static str {
        match self {
            Variant::WorkProgram => "Рабочая программа",
            Variant::Annotation => "Аннотация рабочей программы",
            Variant::AssessmentFund => "Фонд оценочных средств",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_stem())
    }
}

/// Title page text per variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Titles {
    pub work_program: String,
    pub annotation: String,
    pub assessment_fund: String,
}

impl Default for Titles {
    fn default() -> Self {
        Self {
            work_program: Variant::WorkProgram.default_title().to_string(),
            annotation: Variant::Annotation.default_title().to_string(),
            assessment_fund: Variant::AssessmentFund.default_title().to_string(),
        }
    }
}

impl Titles {
    /// Title text for a variant
    pub fn get(&self, variant: Variant) -> &str {
        match variant {
            Variant::WorkProgram => &self.work_program,
            Variant::Annotation => &self.annotation,
            Variant::AssessmentFund => &self.assessment_fund,
        }
    }
}
