//! Enjenir - logic core for a turn-based circuit-puzzle game
//!
//! The player places circuit elements on a grid canvas, wires them together
//! and satisfies scenario goals while managing a deck/hand/discard card
//! economy. This crate owns all of that logic and none of the presentation:
//! a host loop feeds input events into the operations on [`sim::SimState`]
//! and calls [`sim::tick::update`] once per frame, then renders the state
//! read-only.

pub mod sim;

pub use sim::cards::{Card, CardKind};
pub use sim::scenario::{ConditionKind, Scenario, ScenarioId};
pub use sim::state::{Element, ElementId, ElementKind, SimState};
pub use sim::tick::update;

/// Fixed capacities of the simulation
pub mod consts {
    /// Maximum number of elements the canvas arena can hold
    pub const MAX_ELEMENTS_ON_CANVAS: usize = 100;
    /// Input slots per element (sized for the widest reserved kind, MUX)
    pub const MAX_INPUTS_PER_ELEMENT: usize = 5;
    /// Maximum number of connections (every slot of every element bound)
    pub const MAX_CONNECTIONS: usize = MAX_ELEMENTS_ON_CANVAS * MAX_INPUTS_PER_ELEMENT;

    /// Maximum cards a hand can hold
    pub const MAX_CARDS_IN_HAND: usize = 10;
    /// Maximum cards the deck (and the discard pile) can hold
    pub const MAX_CARDS_IN_DECK: usize = 60;
    /// Cards drawn when a fresh state is created
    pub const INITIAL_HAND_SIZE: usize = 5;
    /// Card plays allowed per turn
    pub const MAX_ACTIONS_PER_TURN: u8 = 3;

    /// Conditions a single scenario may carry
    pub const MAX_CONDITIONS_PER_SCENARIO: usize = 8;

    /// Relaxation sweeps before signal propagation gives up on a circuit
    pub const MAX_PROPAGATION_SWEEPS: u32 = 10;
}
