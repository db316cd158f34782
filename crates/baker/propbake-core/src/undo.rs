//! Undo grouping for bulk mutations.

use crate::host::Composition;

/// Run `f` inside one host undo group labelled `label`. The group is closed
/// after `f` returns whatever it did, so the user reverts the whole batch
/// with a single undo.
pub fn undoable<C, R, F>(comp: &mut C, label: &str, f: F) -> R
where
    C: Composition,
    F: FnOnce(&mut C) -> R,
{
    comp.begin_undo_group(label);
    let out = f(comp);
    comp.end_undo_group();
    out
}
