//! Section-range extraction over an ordered block sequence
//!
//! Every operation is a single linear scan that stops at the first block
//! whose normalized text contains a phrase. Operations either succeed and
//! report how many blocks they removed, or fail with an [`ExtractError`]
//! and leave the sequence exactly as it was.
//!
//! The boundary conventions differ per operation and are load-bearing:
//!
//! | operation | removed range |
//! |---|---|
//! | [`truncate_leading`] | `0..m`, `m` = first match |
//! | [`truncate_leading_past_first`] | `0..m`, `m` = first match at index >= 1 |
//! | [`skip_then_truncate`] | `0..m`, `m` = first match at index >= `skip` |
//! | [`keep_then_truncate`] | `keep..m`, `m` = first match at index >= `keep` |
//! | [`take_leading`] | `0..count` |
//! | [`excise_subsection`] | a range of the matched section's children |

use std::ops::Range;

use crate::block::Block;
use crate::error::ExtractError;

/// Which part of a located section's children [`excise_subsection`] removes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubsectionRange {
    /// From the nested heading (inclusive) to the end of the section
    HeadingToEnd,
    /// From the start of the section up to the nested heading (exclusive)
    BeforeHeading,
}

/// Outcome of scanning for a section boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Boundary {
    /// Index of the first matching block at or after the scan start
    Found(usize),
    /// No block matched; an unguarded "remove until found" scan would have
    /// removed `legacy_removal`, i.e. everything from the scan start on
    NotFound { legacy_removal: Range<usize> },
}

/// Index of the first block at or after `start` containing `phrase`
pub fn find_from<B: Block>(blocks: &[B], start: usize, phrase: &str) -> Option<usize> {
    blocks
        .iter()
        .enumerate()
        .skip(start)
        .find(|(_, block)| block.contains_phrase(phrase))
        .map(|(i, _)| i)
}

/// Plan a "remove until `phrase`" scan starting at `start` without mutating
pub fn leading_span<B: Block>(blocks: &[B], start: usize, phrase: &str) -> Boundary {
    match find_from(blocks, start, phrase) {
        Some(index) => Boundary::Found(index),
        None => Boundary::NotFound {
            legacy_removal: start.min(blocks.len())..blocks.len(),
        },
    }
}

/// Remove every block before the first one containing `phrase`
///
/// The matching block is kept and becomes the new first block.
pub fn truncate_leading<B: Block>(blocks: &mut Vec<B>, phrase: &str) -> Result<usize, ExtractError> {
    let end = require_boundary(blocks, 0, phrase)?;
    blocks.drain(..end);
    Ok(end)
}

/// Like [`truncate_leading`], but block 0 is always part of the removed
/// prefix even when it contains `phrase`
///
/// Used when the leading block is a table of contents that lists the very
/// heading the scan stops at.
pub fn truncate_leading_past_first<B: Block>(
    blocks: &mut Vec<B>,
    phrase: &str,
) -> Result<usize, ExtractError> {
    require_len(blocks, 1)?;
    let end = require_boundary(blocks, 1, phrase)?;
    blocks.drain(..end);
    Ok(end)
}

/// Remove `skip` blocks unconditionally, then everything up to the next
/// block containing `phrase`
///
/// Afterwards the first block contains `phrase` and at least `skip` blocks
/// were removed.
pub fn skip_then_truncate<B: Block>(
    blocks: &mut Vec<B>,
    skip: usize,
    phrase: &str,
) -> Result<usize, ExtractError> {
    require_len(blocks, skip)?;
    let end = require_boundary(blocks, skip, phrase)?;
    blocks.drain(..end);
    Ok(end)
}

/// Keep the first `keep` blocks, then remove everything up to the next
/// block containing `phrase`
pub fn keep_then_truncate<B: Block>(
    blocks: &mut Vec<B>,
    keep: usize,
    phrase: &str,
) -> Result<usize, ExtractError> {
    require_len(blocks, keep)?;
    let end = require_boundary(blocks, keep, phrase)?;
    blocks.drain(keep..end);
    Ok(end - keep)
}

/// Remove exactly the first `count` blocks
pub fn take_leading<B: Block>(blocks: &mut Vec<B>, count: usize) -> Result<usize, ExtractError> {
    require_len(blocks, count)?;
    blocks.drain(..count);
    Ok(count)
}

/// Drill into the first top-level block containing `phrase` and remove part
/// of its children, split at the first child that repeats `phrase`
pub fn excise_subsection<B: Block>(
    blocks: &mut [B],
    phrase: &str,
    range: SubsectionRange,
) -> Result<usize, ExtractError> {
    let section = find_from(blocks, 0, phrase).ok_or_else(|| ExtractError::SectionNotFound {
        phrase: phrase.to_string(),
    })?;

    let nested_missing = || ExtractError::NestedHeadingNotFound {
        phrase: phrase.to_string(),
    };
    let children = blocks[section].children_mut().ok_or_else(nested_missing)?;
    let heading = find_from(&children[..], 0, phrase).ok_or_else(nested_missing)?;

    let removed = match range {
        SubsectionRange::HeadingToEnd => children.drain(heading..).count(),
        SubsectionRange::BeforeHeading => children.drain(..heading).count(),
    };

    tracing::trace!(section, heading, removed, ?range, "excised subsection");
    Ok(removed)
}

fn require_boundary<B: Block>(blocks: &[B], start: usize, phrase: &str) -> Result<usize, ExtractError> {
    match leading_span(blocks, start, phrase) {
        Boundary::Found(index) => Ok(index),
        Boundary::NotFound { legacy_removal } => {
            tracing::debug!(
                phrase,
                would_remove = legacy_removal.len(),
                "section boundary not found"
            );
            Err(ExtractError::BoundaryNotFound {
                phrase: phrase.to_string(),
            })
        }
    }
}

fn require_len<B>(blocks: &[B], needed: usize) -> Result<(), ExtractError> {
    if blocks.len() < needed {
        return Err(ExtractError::NotEnoughBlocks {
            needed,
            available: blocks.len(),
        });
    }
    Ok(())
}
