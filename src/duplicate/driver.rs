//! Command entry points and the per-step copy/reconnect pass.

use crate::error::EngineError;
use crate::geometry::Vector3;
use crate::host::{Document, ElementId, HostError, HostResult};
use crate::network::Inventory;
use crate::splice::{find_pairs, find_split_points, repair};

use super::{CopyOutcome, DirectionCopy, LevelCopy, Progress, StepCopy, StepOutcome, offsets};

/// Copies the batch once per selected level and repairs the splices.
///
/// # Errors
///
/// Returns [`EngineError::EmptySelection`] or [`EngineError::NoLevels`]
/// for unusable parameters, [`EngineError::Cancelled`] when the progress
/// sink cancels, and host failures otherwise. Any error rolls back the
/// whole transaction.
pub fn copy_to_levels(
    doc: &mut Document,
    batch: &[ElementId],
    params: &LevelCopy,
    progress: &mut dyn Progress,
) -> Result<CopyOutcome, EngineError> {
    if batch.is_empty() {
        return Err(EngineError::EmptySelection);
    }
    if params.levels.is_empty() {
        return Err(EngineError::NoLevels);
    }
    let offsets = offsets::level_offsets(doc, batch, &params.levels)?;
    run(doc, batch, &offsets, "copy to levels", progress)
}

/// Copies the batch at a fixed vertical step, upward and/or downward.
///
/// # Errors
///
/// Same contract as [`copy_to_levels`], minus the level validation.
pub fn copy_by_step(
    doc: &mut Document,
    batch: &[ElementId],
    params: &StepCopy,
    progress: &mut dyn Progress,
) -> Result<CopyOutcome, EngineError> {
    if batch.is_empty() {
        return Err(EngineError::EmptySelection);
    }
    let offsets = offsets::step_offsets(params.step, params.count, params.upward, params.downward);
    run(doc, batch, &offsets, "copy by step", progress)
}

/// Copies the batch along a user-picked reference direction.
///
/// # Errors
///
/// Same contract as [`copy_to_levels`], with direction derivation
/// failures surfacing as host geometry errors.
pub fn copy_along_direction(
    doc: &mut Document,
    batch: &[ElementId],
    params: &DirectionCopy,
    progress: &mut dyn Progress,
) -> Result<CopyOutcome, EngineError> {
    if batch.is_empty() {
        return Err(EngineError::EmptySelection);
    }
    let offsets =
        offsets::direction_offsets(doc, batch, &params.reference, params.step, params.count)?;
    run(doc, batch, &offsets, "copy along direction", progress)
}

/// Runs the offset steps inside one transaction.
fn run(
    doc: &mut Document,
    batch: &[ElementId],
    offsets: &[Vector3],
    name: &str,
    progress: &mut dyn Progress,
) -> Result<CopyOutcome, EngineError> {
    let total = offsets.len();
    let mut tx = doc.transaction(name);
    let mut inventory = Inventory::build(tx.document());

    let mut outcome = CopyOutcome::default();
    for (index, &offset) in offsets.iter().enumerate() {
        if progress.is_cancelled() {
            // Dropping the transaction guard restores the document.
            return Err(EngineError::Cancelled {
                completed: index,
                total,
            });
        }

        match copy_and_reconnect(tx.document(), batch, offset, &mut inventory) {
            Ok(step) => outcome.steps.push(step),
            Err(HostError::CopyFailed { requested, produced }) => {
                tracing::warn!(
                    step = index,
                    requested,
                    produced,
                    "copy primitive failed; offset step skipped"
                );
                outcome.skipped_steps += 1;
            }
            Err(error) => return Err(error.into()),
        }
        progress.advance(index + 1, total);
    }

    tx.commit();
    tracing::info!(
        command = name,
        steps = outcome.steps.len(),
        skipped = outcome.skipped_steps,
        created = outcome.created(),
        splices = outcome.splices(),
        "duplication finished"
    );
    Ok(outcome)
}

/// One offset step: translate-copy the batch, then detect, pair and
/// repair the splices the copy produced.
///
/// # Errors
///
/// Propagates host failures; [`HostError::CopyFailed`] in particular is
/// recoverable by skipping the step.
pub fn copy_and_reconnect(
    doc: &mut Document,
    batch: &[ElementId],
    offset: Vector3,
    inventory: &mut Inventory,
) -> HostResult<StepOutcome> {
    let created = doc.copy_elements(batch, offset)?;

    let splits = find_split_points(doc, &created, inventory)?;
    if splits.len() < 2 {
        tracing::debug!(count = splits.len(), "nothing to repair");
        return Ok(StepOutcome {
            offset,
            created,
            splices: 0,
        });
    }

    let mut splices = 0;
    for pair in find_pairs(splits) {
        if repair(doc, inventory, &pair)?.is_some() {
            splices += 1;
        }
    }
    Ok(StepOutcome {
        offset,
        created,
        splices,
    })
}
