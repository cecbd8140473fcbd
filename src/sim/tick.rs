//! The per-tick update entry point
//!
//! One call per host frame: refresh the derived input counts, relax the
//! circuit to a fixed point, then check the scenario against the settled
//! board. Card and placement operations happen outside the tick, driven
//! directly by input handling, but always between ticks, never during one.

use super::propagate::propagate;
use super::state::SimState;

/// Advance the simulation by one tick.
///
/// `_dt` exists for symmetry with a frame-based host loop; the simulation
/// is discrete and does not integrate time.
pub fn update(state: &mut SimState, _dt: f32) {
    state.time_ticks += 1;

    // Slot contents are the source of truth for the connected-input counts
    for elem in state.elements.iter_mut().filter(|e| e.active) {
        elem.connected_inputs = elem.derive_connected_inputs();
    }

    state.last_propagation = propagate(&mut state.elements);
    state.evaluate_scenario();
}
