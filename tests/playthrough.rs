//! End-to-end playthroughs against the public surface: starting conditions,
//! gate behavior on a live board, and the full scenario progression.

use enjenir::consts::*;
use enjenir::sim::{CardKind, ConditionKind, ElementKind, ScenarioId, SimState, update};
use glam::IVec2;

const DT: f32 = 1.0 / 60.0;

#[test]
fn fresh_state_matches_the_rulebook() {
    let sim = SimState::new(0xBEEF);

    assert_eq!(sim.deck.len(), 25);
    assert_eq!(sim.cursor, INITIAL_HAND_SIZE);
    assert_eq!(sim.hand.len(), INITIAL_HAND_SIZE);
    assert!(sim.discard.is_empty());
    assert_eq!(sim.score, 0);
    assert_eq!(sim.card_total(), 25);

    assert_eq!(sim.scenario_id, ScenarioId::BasicCircuit);
    let conditions = &sim.scenario.conditions;
    assert_eq!(conditions.len(), 2);
    assert!(conditions.iter().all(|c| c.kind == ConditionKind::MinElements));
    assert_eq!(conditions[0].element, ElementKind::Switch);
    assert_eq!(conditions[0].target, 1);
    assert_eq!(conditions[1].element, ElementKind::And);
    assert_eq!(conditions[1].target, 1);
}

#[test]
fn single_input_and_gate_stays_low_even_when_driven() {
    let mut sim = SimState::new(2024);
    let switch = sim
        .place(ElementKind::Switch, IVec2::new(2, 3))
        .expect("cell (2,3) is free");
    let and = sim
        .place(ElementKind::And, IVec2::new(2, 4))
        .expect("cell (2,4) is free");
    sim.connect(switch, and, 0).expect("slot 0 is free");

    sim.interact(switch);
    update(&mut sim, DT);

    assert!(sim.find_active(switch).unwrap().output);
    let and_elem = sim.find_active(and).unwrap();
    assert!(and_elem.input_levels[0], "the wire carries the signal");
    assert!(!and_elem.output, "one connected input can never satisfy AND");
}

#[test]
fn scenario_progression_runs_to_the_terminal_state() {
    let mut sim = SimState::new(31337);

    // Basic Circuit: a switch and an AND gate
    sim.place(ElementKind::Switch, IVec2::new(0, 0)).unwrap();
    sim.place(ElementKind::And, IVec2::new(1, 0)).unwrap();
    update(&mut sim, DT);
    assert_eq!(sim.score, 100);
    assert_eq!(sim.scenario_id, ScenarioId::SimpleLogic);

    // Simple Logic: the board keeps its switch and gate, add a source
    sim.place(ElementKind::Source, IVec2::new(2, 0)).unwrap();
    update(&mut sim, DT);
    assert_eq!(sim.score, 200);
    assert_eq!(sim.scenario_id, ScenarioId::ToggleSwitch);

    // Toggle Switch: a second switch and an OR gate
    sim.place(ElementKind::Switch, IVec2::new(3, 0)).unwrap();
    sim.place(ElementKind::Or, IVec2::new(4, 0)).unwrap();
    update(&mut sim, DT);
    assert_eq!(sim.score, 300);
    assert_eq!(sim.scenario_id, ScenarioId::MultiInput);

    // Multi Input forbids switches, so the board has to go
    update(&mut sim, DT);
    assert_eq!(sim.score, 300, "leftover switches block the max condition");
    sim.reset_scenario();
    assert!(sim.elements.is_empty());

    sim.place(ElementKind::Source, IVec2::new(0, 0)).unwrap();
    sim.place(ElementKind::Button, IVec2::new(1, 0)).unwrap();
    sim.place(ElementKind::Or, IVec2::new(2, 0)).unwrap();
    update(&mut sim, DT);
    assert_eq!(sim.score, 400);
    assert_eq!(sim.scenario_id, ScenarioId::ComplexLogic);

    // Complex Logic: both gate kinds and two sources
    sim.place(ElementKind::And, IVec2::new(3, 0)).unwrap();
    sim.place(ElementKind::Source, IVec2::new(4, 0)).unwrap();
    update(&mut sim, DT);
    assert_eq!(sim.score, 500);
    assert_eq!(sim.scenario_id, ScenarioId::ComplexLogic);
    assert!(sim.scenario.completed, "the last scenario stays completed");
    assert!(sim.scenarios_completed.iter().all(|&done| done));

    // Terminal: further ticks change nothing, and there is nowhere to go
    update(&mut sim, DT);
    assert_eq!(sim.score, 500);
    assert!(!sim.advance_scenario());
    assert_eq!(sim.scenario_id, ScenarioId::ComplexLogic);
}

#[test]
fn cards_stay_in_circulation_through_a_full_session() {
    let mut sim = SimState::new(9);
    let total = sim.card_total();

    let mut cell = 0;
    for _ in 0..8 {
        // play every element card the turn budget allows
        loop {
            let Some(index) = sim
                .hand
                .iter()
                .position(|card| matches!(card.kind, CardKind::Element(_)))
            else {
                break;
            };
            if sim
                .play_element_card(index, IVec2::new(cell, 0))
                .is_err()
            {
                break;
            }
            cell += 1;
        }
        while sim.draw_card().is_ok() {}
        sim.end_turn();
        update(&mut sim, DT);
        assert_eq!(sim.card_total(), total);
    }
}
