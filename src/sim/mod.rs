//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only (the deck shuffle is the sole consumer)
//! - Stable iteration order (elements in placement order)
//! - Single-threaded, exclusively owned state, no interior globals
//! - No rendering or platform dependencies
//!
//! The host drives the core through the operations on [`SimState`] plus one
//! [`tick::update`] call per frame. Every mutating operation validates before
//! it mutates: a failed call returns an error and leaves the state untouched.

pub mod cards;
pub mod graph;
pub mod propagate;
pub mod scenario;
pub mod state;
pub mod tick;

pub use cards::{ActionKind, Card, CardKind, DrawError, PlayCardError, UseCardError};
pub use graph::{ConnectError, PlaceError};
pub use propagate::{PropagationOutcome, propagate};
pub use scenario::{Condition, ConditionKind, Scenario, ScenarioId};
pub use state::{Connection, Element, ElementId, ElementKind, SimState};
pub use tick::update;
