//! Per-variant extraction recipes
//!
//! A recipe is a fixed list of range steps applied in order to one copy of
//! the source body. The phrases and block counts below are tied to the
//! layout of the faculty's syllabus template:
//!
//! * pages 1-3: cover, approval sheet, revision history
//! * page 4: "Содержание (рабочая программа)" table of contents and its caption
//! * page 5: assessment-fund summary page
//! * page 6 on: "Место дисциплины в структуре ...", the program sections, and
//!   section 6 "Фонд оценочных средств по дисциплине" nested inside the
//!   sections table

use crate::block::Block;
use crate::error::{ExtractError, Result, SplitError};
use crate::extract::{
    excise_subsection, keep_then_truncate, skip_then_truncate, take_leading, truncate_leading,
    truncate_leading_past_first, SubsectionRange,
};
use crate::variant::Variant;

/// Normalized section headings of the source template
pub mod phrases {
    /// "Содержание (рабочая программа)", the page-4 contents heading
    pub const CONTENTS_WORK_PROGRAM: &str = "содержание(рабочаяпрограмма)";
    /// "Место дисциплины в структуре ...", the first program section
    pub const DISCIPLINE_PLACE: &str = "местодисциплинывструктуре";
    /// "Фонд оценочных средств по дисциплине", section 6
    pub const ASSESSMENT_FUND: &str = "фондоценочныхсредствподисциплине";
}

/// Page 4 is two body blocks: the contents table and the caption paragraph
/// that follows it.
pub const CONTENTS_PAGE_BLOCKS: usize = 2;

/// In the assessment-fund copy, once page 4 is gone, the two outline blocks
/// heading page 5 stay in front of section 6.
pub const OUTLINE_BLOCKS: usize = 2;

/// One range operation of a recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Remove everything before the first block containing `stop`
    TruncateLeading { stop: &'static str },
    /// As `TruncateLeading`, but block 0 is always removed
    TruncateLeadingPastFirst { stop: &'static str },
    /// Remove `skip` blocks, then everything before the next `stop`
    SkipThenTruncate { skip: usize, stop: &'static str },
    /// Keep `keep` blocks, then remove everything before the next `stop`
    KeepThenTruncate { keep: usize, stop: &'static str },
    /// Remove the first `count` blocks
    TakeLeading { count: usize },
    /// Remove part of the children of the section containing `section`
    ExciseSubsection {
        section: &'static str,
        range: SubsectionRange,
    },
}

impl Step {
    /// Apply the step, returning the number of blocks removed
    pub fn apply<B: Block>(&self, blocks: &mut Vec<B>) -> std::result::Result<usize, ExtractError> {
        match *self {
            Step::TruncateLeading { stop } => truncate_leading(blocks, stop),
            Step::TruncateLeadingPastFirst { stop } => truncate_leading_past_first(blocks, stop),
            Step::SkipThenTruncate { skip, stop } => skip_then_truncate(blocks, skip, stop),
            Step::KeepThenTruncate { keep, stop } => keep_then_truncate(blocks, keep, stop),
            Step::TakeLeading { count } => take_leading(blocks, count),
            Step::ExciseSubsection { section, range } => excise_subsection(blocks, section, range),
        }
    }
}

/// The fixed step list for one variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recipe {
    pub variant: Variant,
    pub steps: &'static [Step],
}

/// Work program: drop pages 1-3 and the assessment-fund page 5
pub const WORK_PROGRAM: Recipe = Recipe {
    variant: Variant::WorkProgram,
    steps: &[
        Step::TruncateLeading {
            stop: phrases::CONTENTS_WORK_PROGRAM,
        },
        Step::KeepThenTruncate {
            keep: CONTENTS_PAGE_BLOCKS,
            stop: phrases::DISCIPLINE_PLACE,
        },
    ],
};

/// Annotation: drop pages 1-5 and section 6 onwards
pub const ANNOTATION: Recipe = Recipe {
    variant: Variant::Annotation,
    steps: &[
        Step::TruncateLeading {
            stop: phrases::CONTENTS_WORK_PROGRAM,
        },
        Step::TruncateLeadingPastFirst {
            stop: phrases::DISCIPLINE_PLACE,
        },
        Step::ExciseSubsection {
            section: phrases::ASSESSMENT_FUND,
            range: SubsectionRange::HeadingToEnd,
        },
    ],
};

/// Assessment fund: drop pages 1-4 and everything before section 6
pub const ASSESSMENT_FUND: Recipe = Recipe {
    variant: Variant::AssessmentFund,
    steps: &[
        Step::TruncateLeading {
            stop: phrases::CONTENTS_WORK_PROGRAM,
        },
        Step::TakeLeading {
            count: CONTENTS_PAGE_BLOCKS,
        },
        Step::KeepThenTruncate {
            keep: OUTLINE_BLOCKS,
            stop: phrases::ASSESSMENT_FUND,
        },
        Step::ExciseSubsection {
            section: phrases::ASSESSMENT_FUND,
            range: SubsectionRange::BeforeHeading,
        },
    ],
};

impl Recipe {
    /// The recipe producing a variant
    pub fn for_variant(variant: Variant) -> &'static Recipe {
        match variant {
            Variant::WorkProgram => &WORK_PROGRAM,
            Variant::Annotation => &ANNOTATION,
            Variant::AssessmentFund => &ASSESSMENT_FUND,
        }
    }

    /// Apply every step in order, returning the total number of blocks removed
    ///
    /// Stops at the first failing step; earlier steps have already been
    /// applied to `blocks` at that point.
    pub fn apply<B: Block>(&self, blocks: &mut Vec<B>) -> Result<usize> {
        let mut total = 0;
        for (index, step) in self.steps.iter().enumerate() {
            let removed = step.apply(blocks).map_err(|source| SplitError::Recipe {
                variant: self.variant,
                step: index + 1,
                source,
            })?;
            tracing::debug!(
                variant = %self.variant,
                step = index + 1,
                ?step,
                removed,
                remaining = blocks.len(),
                "applied recipe step"
            );
            total += removed;
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syllabus_ooxml::{XmlElement, XmlNode};

    fn p(text: &str) -> XmlNode {
        XmlNode::Element(
            XmlElement::new("w:p").with_child(
                XmlElement::new("w:r").with_child(XmlElement::new("w:t").with_text(text)),
            ),
        )
    }

    fn table(rows: &[&str]) -> XmlNode {
        let mut tbl = XmlElement::new("w:tbl");
        for row in rows {
            tbl = tbl.with_child(XmlElement::new("w:tr").with_child(p(row)));
        }
        XmlNode::Element(tbl)
    }

    fn texts(blocks: &[XmlNode]) -> Vec<String> {
        blocks.iter().map(XmlNode::text_content).collect()
    }

    #[test]
    fn test_work_program_scenario() {
        let mut blocks: Vec<XmlNode> = [
            "p1",
            "p2",
            "Содержание (рабочая программа)",
            "a",
            "b",
            "Место дисциплины в структуре",
            "c",
            "d",
        ]
        .iter()
        .map(|t| p(t))
        .collect();

        let removed = WORK_PROGRAM.apply(&mut blocks).unwrap();

        assert_eq!(removed, 3);
        assert_eq!(
            texts(&blocks),
            vec![
                "Содержание (рабочая программа)",
                "a",
                "Место дисциплины в структуре",
                "c",
                "d"
            ]
        );
    }

    #[test]
    fn test_annotation_recipe() {
        let mut blocks = vec![
            p("Cover"),
            // Contents lists every heading, including the stop phrases
            table(&[
                "Содержание (рабочая программа)",
                "Место дисциплины в структуре",
                "Фонд оценочных средств по дисциплине",
            ]),
            p("Contents caption"),
            p("Assessment fund summary"),
            p("Место дисциплины в структуре ОП"),
            table(&[
                "1. Цели",
                "5. Содержание дисциплины",
                "6. Фонд оценочных средств по дисциплине",
                "6.1 Задания",
            ]),
            p("Signatures"),
        ];

        ANNOTATION.apply(&mut blocks).unwrap();

        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].text_content(), "Место дисциплины в структуре ОП");
        assert_eq!(blocks[1].text_content(), "1. Цели5. Содержание дисциплины");
        assert_eq!(blocks[2].text_content(), "Signatures");
    }

    #[test]
    fn test_assessment_fund_recipe() {
        let mut blocks = vec![
            p("Cover"),
            table(&["Содержание (рабочая программа)"]),
            p("Contents caption"),
            p("Outline 1"),
            p("Outline 2"),
            p("Место дисциплины в структуре ОП"),
            table(&[
                "1. Цели",
                "6. Фонд оценочных средств по дисциплине",
                "6.1 Задания",
            ]),
            p("Signatures"),
        ];

        let removed = ASSESSMENT_FUND.apply(&mut blocks).unwrap();

        assert_eq!(removed, 1 + 2 + 1 + 1);
        assert_eq!(
            texts(&blocks),
            vec![
                "Outline 1",
                "Outline 2",
                "6. Фонд оценочных средств по дисциплине6.1 Задания",
                "Signatures"
            ]
        );
    }

    #[test]
    fn test_failure_names_variant_and_step() {
        let mut blocks = vec![p("Содержание (рабочая программа)"), p("x"), p("y")];
        let err = WORK_PROGRAM.apply(&mut blocks).unwrap_err();

        match err {
            SplitError::Recipe {
                variant,
                step,
                source,
            } => {
                assert_eq!(variant, Variant::WorkProgram);
                assert_eq!(step, 2);
                assert_eq!(
                    source,
                    ExtractError::BoundaryNotFound {
                        phrase: phrases::DISCIPLINE_PLACE.to_string()
                    }
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_for_variant() {
        for variant in Variant::ALL {
            assert_eq!(Recipe::for_variant(variant).variant, variant);
        }
    }

    #[test]
    fn test_skip_then_truncate_step() {
        let mut blocks = vec![p("a"), p("b"), p("c"), p("Место дисциплины в структуре")];
        let step = Step::SkipThenTruncate {
            skip: 1,
            stop: phrases::DISCIPLINE_PLACE,
        };
        assert_eq!(step.apply(&mut blocks).unwrap(), 3);
        assert_eq!(blocks.len(), 1);
    }
}
