use rusqlite::Connection;
use std::collections::HashMap;
use tracing::{debug, info};

use crate::{ledger, DataPatch, DataSetup, Error, PatchResult};

/// Applies all pending patches in dependency order.
///
/// This function:
/// 1. Ensures the `_patches` ledger table exists
/// 2. Linearizes the registered patches by their declared dependencies
/// 3. Skips patches the ledger already holds, by id or by alias
/// 4. Runs each pending patch inside its own transaction and records it as
///    applied in the same transaction
///
/// A patch either commits together with its ledger entry or leaves no trace:
/// any failure rolls the transaction back and aborts the remaining sequence.
///
/// # Errors
/// Returns an error if:
/// - A declared dependency is not registered, or the dependencies form a cycle
/// - A patch fails to execute
/// - Database operations fail
pub fn apply_all(conn: &mut Connection, patches: &[&dyn DataPatch]) -> PatchResult<()> {
    ledger::ensure_ledger_table(conn)?;
    let applied = ledger::applied_patches(conn)?;

    for patch in linearize(patches)? {
        let id = patch.id();
        if applied.contains(id) || patch.aliases().iter().any(|alias| applied.contains(*alias)) {
            debug!(patch = id, "patch already applied, skipping");
            continue;
        }

        let tx = conn.transaction()?;
        {
            let mut setup = DataSetup::new(&tx);
            patch.apply(&mut setup).map_err(|e| Error::PatchFailed {
                id: id.to_string(),
                message: e.to_string(),
            })?;
        }
        ledger::record_applied(&tx, id)?;
        tx.commit()?;
        info!(patch = id, "patch applied");
    }

    Ok(())
}

/// Orders patches so every patch comes after its declared dependencies.
///
/// Depth-first over the dependency edges; registration order is preserved
/// among patches with no ordering constraint between them.
fn linearize<'a>(patches: &[&'a dyn DataPatch]) -> PatchResult<Vec<&'a dyn DataPatch>> {
    let index: HashMap<&str, usize> = patches
        .iter()
        .enumerate()
        .map(|(i, patch)| (patch.id(), i))
        .collect();

    const UNVISITED: u8 = 0;
    const VISITING: u8 = 1;
    const DONE: u8 = 2;

    fn visit<'a>(
        i: usize,
        patches: &[&'a dyn DataPatch],
        index: &HashMap<&str, usize>,
        state: &mut [u8],
        order: &mut Vec<&'a dyn DataPatch>,
    ) -> PatchResult<()> {
        match state[i] {
            DONE => return Ok(()),
            VISITING => {
                return Err(Error::DependencyCycle {
                    id: patches[i].id().to_string(),
                })
            }
            _ => {}
        }
        state[i] = VISITING;
        for dependency in patches[i].dependencies() {
            let Some(&dep_index) = index.get(dependency) else {
                return Err(Error::UnknownDependency {
                    id: patches[i].id().to_string(),
                    dependency: dependency.to_string(),
                });
            };
            visit(dep_index, patches, index, state, order)?;
        }
        state[i] = DONE;
        order.push(patches[i]);
        Ok(())
    }

    let mut state = vec![UNVISITED; patches.len()];
    let mut order = Vec::with_capacity(patches.len());
    for i in 0..patches.len() {
        visit(i, patches, &index, &mut state, &mut order)?;
    }
    Ok(order)
}
