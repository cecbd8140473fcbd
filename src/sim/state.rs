//! Core simulation types and the aggregate state
//!
//! Everything the host needs for display and determinism lives here. The
//! aggregate is the single unit of exclusive mutation: every core operation
//! takes `&mut SimState` and runs to completion before returning.

use std::fmt;

use glam::IVec2;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::cards::{Card, starter_deck};
use super::propagate::PropagationOutcome;
use super::scenario::{Scenario, ScenarioId};
use crate::consts::*;

/// Unique identifier of a placed element, monotonically increasing per state
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ElementId(pub u32);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The closed set of circuit element kinds
///
/// Only the first six are reachable through cards today; the rest are
/// reserved kinds that already participate in exhaustive matches so that
/// giving one behavior is a compile-time checked change, not a forgotten
/// `default` branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    /// Single output, always high
    Source,
    /// Single output, high while held
    Button,
    /// Single output, toggled by interaction
    Switch,
    /// Pure sink; its activation is observed by scenario logic, not its output
    Sensor,
    /// Output high iff at least two inputs are connected and all are high
    And,
    /// Output high iff at least one input is connected and any is high
    Or,
    // Reserved kinds, no evaluation rule yet
    Not,
    Bus,
    FlipFlop,
    Mux,
    Tape,
    Sequencer,
}

impl ElementKind {
    /// Display name, matching the card names shown to the player
    pub fn display_name(self) -> &'static str {
        match self {
            ElementKind::Source => "Source",
            ElementKind::Button => "Button",
            ElementKind::Switch => "Switch",
            ElementKind::Sensor => "Sensor",
            ElementKind::And => "AND Gate",
            ElementKind::Or => "OR Gate",
            ElementKind::Not => "NOT Gate",
            ElementKind::Bus => "Bus",
            ElementKind::FlipFlop => "Flip-Flop",
            ElementKind::Mux => "MUX",
            ElementKind::Tape => "Tape",
            ElementKind::Sequencer => "Sequencer",
        }
    }
}

/// A placed circuit element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    pub kind: ElementKind,
    /// Grid cell the element occupies; at most one active element per cell
    pub cell: IVec2,
    /// Current boolean output
    pub output: bool,
    /// Driving element per input slot, `None` when unconnected
    pub inputs: [Option<ElementId>; MAX_INPUTS_PER_ELEMENT],
    /// Last observed value per input slot, for wire display
    pub input_levels: [bool; MAX_INPUTS_PER_ELEMENT],
    /// Count of occupied input slots, re-derived from `inputs` every tick
    pub connected_inputs: u8,
    /// Whether this arena slot is logically present
    pub active: bool,
}

impl Element {
    pub fn new(id: ElementId, kind: ElementKind, cell: IVec2) -> Self {
        Self {
            id,
            kind,
            cell,
            output: false,
            inputs: [None; MAX_INPUTS_PER_ELEMENT],
            input_levels: [false; MAX_INPUTS_PER_ELEMENT],
            connected_inputs: 0,
            active: true,
        }
    }

    /// Occupied input slot count derived from the slot contents
    pub fn derive_connected_inputs(&self) -> u8 {
        self.inputs.iter().flatten().count() as u8
    }
}

/// A directed edge from one element's output into another's input slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub from: ElementId,
    pub to: ElementId,
    pub slot: usize,
    pub active: bool,
}

/// Complete simulator state (deterministic, serializable)
///
/// Owns the element graph, the connection set, the card economy, the active
/// scenario and the cumulative score. Constructed once per run with
/// [`SimState::new`] and advanced with [`super::tick::update`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// RNG consumed by deck shuffles
    pub(crate) rng: Pcg32,

    /// Arena of placed elements, in placement order
    pub elements: Vec<Element>,
    /// Connections, in creation order
    pub connections: Vec<Connection>,
    next_element_id: u32,

    /// Draw pile; cards before `cursor` are already drawn
    pub deck: Vec<Card>,
    /// Index of the next drawable card
    pub cursor: usize,
    /// Cards in hand, insertion order (meaningful for display only)
    pub hand: Vec<Card>,
    /// Discard pile
    pub discard: Vec<Card>,
    /// Card plays spent this turn, reset by [`SimState::end_turn`]
    pub actions_this_turn: u8,

    /// Scenario the player is currently working on
    pub scenario: Scenario,
    pub scenario_id: ScenarioId,
    /// Which scenarios have been completed, by scenario id
    pub scenarios_completed: [bool; ScenarioId::COUNT],
    /// Cumulative score across completed scenarios
    pub score: u64,

    /// Outcome of the most recent propagation pass
    pub last_propagation: PropagationOutcome,
    /// Update ticks since construction
    pub time_ticks: u64,
}

impl SimState {
    /// Create a fresh state: starter deck shuffled, opening hand drawn,
    /// first scenario loaded.
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            elements: Vec::new(),
            connections: Vec::new(),
            next_element_id: 1,
            deck: starter_deck(),
            cursor: 0,
            hand: Vec::new(),
            discard: Vec::new(),
            actions_this_turn: 0,
            scenario: ScenarioId::BasicCircuit.definition(),
            scenario_id: ScenarioId::BasicCircuit,
            scenarios_completed: [false; ScenarioId::COUNT],
            score: 0,
            last_propagation: PropagationOutcome::default(),
            time_ticks: 0,
        };

        if state.deck.len() > 1 {
            state.deck.shuffle(&mut state.rng);
            log::info!("initial deck shuffled ({} cards)", state.deck.len());
        }
        for _ in 0..INITIAL_HAND_SIZE {
            let _ = state.draw_card();
        }

        state
    }

    /// Allocate the next element id
    pub(crate) fn alloc_element_id(&mut self) -> ElementId {
        let id = ElementId(self.next_element_id);
        self.next_element_id += 1;
        id
    }

    /// Cards left to draw before a reshuffle is needed
    pub fn deck_remaining(&self) -> usize {
        self.deck.len() - self.cursor
    }

    /// Active elements of the given kind currently on the canvas
    pub fn count_active(&self, kind: ElementKind) -> u32 {
        self.elements
            .iter()
            .filter(|e| e.active && e.kind == kind)
            .count() as u32
    }
}
