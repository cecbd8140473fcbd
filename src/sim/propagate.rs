//! Fixed-point signal propagation
//!
//! A discrete boolean-network evaluator that tolerates cycles: it repeatedly
//! sweeps the arena in storage order, recomputing each active element's
//! output, until a full sweep changes nothing or the sweep cap is hit.
//! Within a sweep an element sees values already updated earlier in the same
//! sweep (Gauss-Seidel relaxation), so results are deterministic for a fixed
//! storage order. Propagation never fails; a circuit still changing at the
//! cap is reported unstable and keeps whatever the last sweep produced.

use serde::{Deserialize, Serialize};

use super::state::{Element, ElementKind};
use crate::consts::{MAX_INPUTS_PER_ELEMENT, MAX_PROPAGATION_SWEEPS};

/// How the most recent propagation pass ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropagationOutcome {
    /// A sweep produced no output changes
    Settled {
        /// Sweeps run, including the final changeless one
        sweeps: u32,
    },
    /// Outputs were still changing when the sweep cap was reached
    Unstable,
}

impl Default for PropagationOutcome {
    fn default() -> Self {
        PropagationOutcome::Settled { sweeps: 0 }
    }
}

/// Relax the arena to a fixed point (or the sweep cap)
pub fn propagate(elements: &mut [Element]) -> PropagationOutcome {
    let mut sweeps = 0;
    let mut changed = true;

    while changed && sweeps < MAX_PROPAGATION_SWEEPS {
        changed = false;
        sweeps += 1;

        for i in 0..elements.len() {
            if !elements[i].active {
                continue;
            }
            let previous = elements[i].output;
            let (output, levels) = evaluate(elements, i);

            let elem = &mut elements[i];
            elem.input_levels = levels;
            elem.output = output;
            if output != previous {
                changed = true;
            }
        }
    }

    if changed {
        log::warn!(
            "circuit still changing after {MAX_PROPAGATION_SWEEPS} sweeps, keeping last values"
        );
        PropagationOutcome::Unstable
    } else {
        PropagationOutcome::Settled { sweeps }
    }
}

/// Compute one element's next output and observed input levels.
///
/// Reads the arena as it currently stands, including outputs already updated
/// earlier in the running sweep. Slots whose driver does not resolve keep
/// their previous observed level and do not count as driven.
fn evaluate(elements: &[Element], index: usize) -> (bool, [bool; MAX_INPUTS_PER_ELEMENT]) {
    let elem = &elements[index];
    let mut levels = elem.input_levels;

    let mut resolved = 0u8;
    let mut any_high = false;
    let mut all_high = true;
    for (slot, input) in elem.inputs.iter().enumerate() {
        let Some(driver_id) = input else { continue };
        let Some(driver) = elements.iter().find(|e| e.active && e.id == *driver_id) else {
            continue;
        };
        levels[slot] = driver.output;
        resolved += 1;
        if driver.output {
            any_high = true;
        } else {
            all_high = false;
        }
    }

    let output = match elem.kind {
        ElementKind::Source => true,
        // A sensor is a pure sink; scenario logic observes its inputs
        ElementKind::Sensor => false,
        // Externally driven by interact/release, never recomputed here
        ElementKind::Button | ElementKind::Switch => elem.output,
        ElementKind::And => resolved > 0 && elem.connected_inputs >= 2 && all_high,
        ElementKind::Or => resolved > 0 && any_high,
        // Reserved kinds hold their output until they get a rule
        ElementKind::Not
        | ElementKind::Bus
        | ElementKind::FlipFlop
        | ElementKind::Mux
        | ElementKind::Tape
        | ElementKind::Sequencer => elem.output,
    };
    (output, levels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ElementId;
    use glam::IVec2;

    fn element(id: u32, kind: ElementKind) -> Element {
        Element::new(ElementId(id), kind, IVec2::new(id as i32, 0))
    }

    fn wire(elem: &mut Element, slot: usize, from: u32) {
        elem.inputs[slot] = Some(ElementId(from));
        elem.connected_inputs = elem.derive_connected_inputs();
    }

    #[test]
    fn test_source_drives_or() {
        let mut arena = vec![element(1, ElementKind::Source), element(2, ElementKind::Or)];
        wire(&mut arena[1], 0, 1);

        let outcome = propagate(&mut arena);
        assert!(matches!(outcome, PropagationOutcome::Settled { .. }));
        assert!(arena[0].output);
        assert!(arena[1].output);
        assert!(arena[1].input_levels[0]);
    }

    #[test]
    fn test_and_with_single_input_stays_low() {
        let mut arena = vec![element(1, ElementKind::Source), element(2, ElementKind::And)];
        wire(&mut arena[1], 0, 1);

        propagate(&mut arena);
        // one connected input is never enough, even when it reads high
        assert!(!arena[1].output);
        assert!(arena[1].input_levels[0]);
    }

    #[test]
    fn test_and_with_two_high_inputs_goes_high() {
        let mut arena = vec![
            element(1, ElementKind::Source),
            element(2, ElementKind::Source),
            element(3, ElementKind::And),
        ];
        wire(&mut arena[2], 0, 1);
        wire(&mut arena[2], 1, 2);

        propagate(&mut arena);
        assert!(arena[2].output);
    }

    #[test]
    fn test_and_goes_low_when_any_input_is_low() {
        let mut arena = vec![
            element(1, ElementKind::Source),
            element(2, ElementKind::Switch),
            element(3, ElementKind::And),
        ];
        wire(&mut arena[2], 0, 1);
        wire(&mut arena[2], 1, 2);

        propagate(&mut arena);
        assert!(!arena[2].output);

        arena[1].output = true; // switch toggled on
        propagate(&mut arena);
        assert!(arena[2].output);
    }

    #[test]
    fn test_or_without_inputs_stays_low() {
        let mut arena = vec![element(1, ElementKind::Or)];
        propagate(&mut arena);
        assert!(!arena[0].output);
    }

    #[test]
    fn test_sensor_output_is_always_low() {
        let mut arena = vec![
            element(1, ElementKind::Source),
            element(2, ElementKind::Sensor),
        ];
        wire(&mut arena[1], 0, 1);

        propagate(&mut arena);
        assert!(!arena[1].output);
        // but the incoming level is observed
        assert!(arena[1].input_levels[0]);
    }

    #[test]
    fn test_acyclic_chain_settles_within_element_count_sweeps() {
        // or <- or <- ... <- switch, with the switch stored last so each
        // sweep can only advance the signal one storage position
        let len = 8usize;
        let mut arena: Vec<Element> =
            (1..len as u32).map(|i| element(i, ElementKind::Or)).collect();
        arena.push(element(len as u32, ElementKind::Switch));
        for i in 0..len - 1 {
            let from = arena[i + 1].id.0;
            wire(&mut arena[i], 0, from);
        }
        arena[len - 1].output = true;

        match propagate(&mut arena) {
            PropagationOutcome::Settled { sweeps } => {
                assert!(sweeps as usize <= len, "took {sweeps} sweeps for {len} elements")
            }
            PropagationOutcome::Unstable => panic!("acyclic circuit reported unstable"),
        }
        assert!(arena.iter().all(|e| e.output));
    }

    #[test]
    fn test_or_feedback_cycle_settles() {
        // switch -> or <-> or: the cycle holds the signal it was fed
        let mut arena = vec![
            element(1, ElementKind::Switch),
            element(2, ElementKind::Or),
            element(3, ElementKind::Or),
        ];
        wire(&mut arena[1], 0, 1);
        wire(&mut arena[1], 1, 3);
        wire(&mut arena[2], 0, 2);

        propagate(&mut arena);
        assert!(!arena[1].output);
        assert!(!arena[2].output);

        arena[0].output = true;
        let outcome = propagate(&mut arena);
        assert!(matches!(outcome, PropagationOutcome::Settled { .. }));
        assert!(arena[1].output);
        assert!(arena[2].output);
    }

    #[test]
    fn test_dangling_driver_reads_low() {
        let mut arena = vec![element(1, ElementKind::Or)];
        wire(&mut arena[0], 0, 99);

        propagate(&mut arena);
        // the bound slot counts as occupied but never resolves
        assert!(!arena[0].output);
    }
}
