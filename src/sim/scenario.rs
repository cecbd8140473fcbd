//! Scenario definitions, condition evaluation and progression
//!
//! A scenario is a goal: a handful of conditions checked against the live
//! element graph after every propagation pass. Condition flags are
//! recomputed from scratch each evaluation and may flip back off when the
//! board changes; scenario completion is monotonic for a loaded instance
//! and pays its reward exactly once.

use serde::{Deserialize, Serialize};

use super::state::{ElementKind, SimState};
use crate::consts::*;

/// Reward paid for completing any scenario
const SCENARIO_REWARD: u32 = 100;

/// The closed set of condition checks
///
/// The three state-based kinds are declared but have no evaluation rule yet;
/// they are deterministically unsatisfied rather than silently passing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionKind {
    /// At least `target` active elements of the filtered kind
    MinElements,
    /// At most `target` active elements of the filtered kind
    MaxElements,
    MinUniqueStates,
    MaxUniqueStates,
    SpecificState,
}

/// One requirement of a scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub kind: ConditionKind,
    /// Element kind the check counts
    pub element: ElementKind,
    pub target: u32,
    /// Recomputed every evaluation; not monotonic
    pub met: bool,
    pub description: String,
}

/// A goal the player is working toward
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: String,
    pub conditions: Vec<Condition>,
    /// Set once all conditions hold; never cleared within a loaded instance
    pub completed: bool,
    pub reward: u32,
}

impl Scenario {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            conditions: Vec::new(),
            completed: false,
            reward: SCENARIO_REWARD,
        }
    }

    /// Append a condition; fails when the scenario already carries the
    /// maximum number.
    pub fn add_condition(
        &mut self,
        kind: ConditionKind,
        element: ElementKind,
        target: u32,
        description: &str,
    ) -> bool {
        if self.conditions.len() >= MAX_CONDITIONS_PER_SCENARIO {
            return false;
        }
        self.conditions.push(Condition {
            kind,
            element,
            target,
            met: false,
            description: description.to_string(),
        });
        true
    }
}

/// The fixed scenario progression, in play order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScenarioId {
    BasicCircuit,
    SimpleLogic,
    ToggleSwitch,
    MultiInput,
    ComplexLogic,
}

impl ScenarioId {
    pub const COUNT: usize = 5;

    /// Position in the progression, also the completion-flag index
    pub fn index(self) -> usize {
        match self {
            ScenarioId::BasicCircuit => 0,
            ScenarioId::SimpleLogic => 1,
            ScenarioId::ToggleSwitch => 2,
            ScenarioId::MultiInput => 3,
            ScenarioId::ComplexLogic => 4,
        }
    }

    /// The scenario after this one, if any
    pub fn next(self) -> Option<ScenarioId> {
        match self {
            ScenarioId::BasicCircuit => Some(ScenarioId::SimpleLogic),
            ScenarioId::SimpleLogic => Some(ScenarioId::ToggleSwitch),
            ScenarioId::ToggleSwitch => Some(ScenarioId::MultiInput),
            ScenarioId::MultiInput => Some(ScenarioId::ComplexLogic),
            ScenarioId::ComplexLogic => None,
        }
    }

    /// Build a fresh instance of this scenario's definition
    pub fn definition(self) -> Scenario {
        match self {
            ScenarioId::BasicCircuit => {
                let mut s = Scenario::new(
                    "Basic Circuit",
                    "Learn the basics: place a switch and a gate",
                );
                s.add_condition(
                    ConditionKind::MinElements,
                    ElementKind::Switch,
                    1,
                    "Place at least 1 switch",
                );
                s.add_condition(
                    ConditionKind::MinElements,
                    ElementKind::And,
                    1,
                    "Place at least 1 AND gate",
                );
                s
            }
            ScenarioId::SimpleLogic => {
                let mut s = Scenario::new(
                    "Simple Logic",
                    "Build a working circuit: connect a source to an AND gate",
                );
                s.add_condition(
                    ConditionKind::MinElements,
                    ElementKind::Source,
                    1,
                    "Place at least 1 source",
                );
                s.add_condition(
                    ConditionKind::MinElements,
                    ElementKind::And,
                    1,
                    "Place at least 1 AND gate",
                );
                s.add_condition(
                    ConditionKind::MinElements,
                    ElementKind::Switch,
                    1,
                    "Place at least 1 switch",
                );
                s
            }
            ScenarioId::ToggleSwitch => {
                let mut s = Scenario::new(
                    "Toggle Switch",
                    "Master switching: use multiple switches with gates",
                );
                s.add_condition(
                    ConditionKind::MinElements,
                    ElementKind::Switch,
                    2,
                    "Place at least 2 switches",
                );
                s.add_condition(
                    ConditionKind::MinElements,
                    ElementKind::Or,
                    1,
                    "Place at least 1 OR gate",
                );
                s
            }
            ScenarioId::MultiInput => {
                let mut s = Scenario::new(
                    "Multi Input",
                    "Advanced logic: combine multiple input types",
                );
                s.add_condition(
                    ConditionKind::MinElements,
                    ElementKind::Source,
                    1,
                    "Place at least 1 source",
                );
                s.add_condition(
                    ConditionKind::MinElements,
                    ElementKind::Button,
                    1,
                    "Place at least 1 button",
                );
                s.add_condition(
                    ConditionKind::MinElements,
                    ElementKind::Or,
                    1,
                    "Place at least 1 OR gate",
                );
                s.add_condition(
                    ConditionKind::MaxElements,
                    ElementKind::Switch,
                    0,
                    "Use no switches",
                );
                s
            }
            ScenarioId::ComplexLogic => {
                let mut s = Scenario::new(
                    "Complex Logic",
                    "Expert challenge: build circuits with both gate types",
                );
                s.add_condition(
                    ConditionKind::MinElements,
                    ElementKind::And,
                    1,
                    "Place at least 1 AND gate",
                );
                s.add_condition(
                    ConditionKind::MinElements,
                    ElementKind::Or,
                    1,
                    "Place at least 1 OR gate",
                );
                s.add_condition(
                    ConditionKind::MinElements,
                    ElementKind::Source,
                    2,
                    "Place at least 2 sources",
                );
                s
            }
        }
    }
}

impl SimState {
    /// Install a fresh instance of the given scenario
    pub fn load_scenario(&mut self, id: ScenarioId) {
        self.scenario_id = id;
        self.scenario = id.definition();
        log::info!("loaded scenario '{}'", self.scenario.name);
    }

    /// Recompute every condition from the current element graph and handle
    /// completion: pay the reward once, record the completion flag and move
    /// on to the next scenario in sequence.
    pub fn evaluate_scenario(&mut self) {
        let elements = &self.elements;
        let count = |kind: ElementKind| {
            elements
                .iter()
                .filter(|e| e.active && e.kind == kind)
                .count() as u32
        };

        let mut all_met = true;
        for condition in self.scenario.conditions.iter_mut() {
            condition.met = match condition.kind {
                ConditionKind::MinElements => count(condition.element) >= condition.target,
                ConditionKind::MaxElements => count(condition.element) <= condition.target,
                // No evaluation rule yet; unsatisfied rather than passing
                ConditionKind::MinUniqueStates
                | ConditionKind::MaxUniqueStates
                | ConditionKind::SpecificState => false,
            };
            if !condition.met {
                all_met = false;
            }
        }

        if all_met && !self.scenario.completed {
            self.scenario.completed = true;
            self.score += u64::from(self.scenario.reward);
            log::info!(
                "scenario '{}' completed, score {}",
                self.scenario.name,
                self.score
            );
            if self.advance_scenario() {
                log::info!("advanced to scenario '{}'", self.scenario.name);
            }
        }
    }

    /// Move to the next scenario in sequence. Requires the current scenario
    /// to be completed; returns false at the end of the progression.
    pub fn advance_scenario(&mut self) -> bool {
        if !self.scenario.completed {
            return false;
        }
        self.scenarios_completed[self.scenario_id.index()] = true;

        match self.scenario_id.next() {
            Some(next) => {
                self.load_scenario(next);
                true
            }
            None => {
                log::info!("all scenarios completed");
                false
            }
        }
    }

    /// Clear the canvas, return discarded cards to the hand (dropping any
    /// overflow beyond hand capacity) and reload the current scenario fresh.
    pub fn reset_scenario(&mut self) {
        self.elements.clear();
        self.connections.clear();

        for card in self.discard.drain(..) {
            if self.hand.len() < MAX_CARDS_IN_HAND {
                self.hand.push(card);
            }
        }

        let id = self.scenario_id;
        self.load_scenario(id);
        log::info!("reset scenario '{}'", self.scenario.name);
    }
}
