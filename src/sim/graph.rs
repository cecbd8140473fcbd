//! Element graph and connection manager
//!
//! Placement, wiring and lookup over the bounded canvas arena. Elements and
//! connections are never individually deleted; the arena only empties on a
//! scenario reset. Lookups are linear scans, acceptable for an arena capped
//! at [`MAX_ELEMENTS_ON_CANVAS`].

use glam::IVec2;
use thiserror::Error;

use super::state::{Connection, Element, ElementId, ElementKind, SimState};
use crate::consts::*;

/// Why an element could not be placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlaceError {
    #[error("canvas arena is full ({MAX_ELEMENTS_ON_CANVAS} elements)")]
    CanvasFull,
    #[error("grid cell ({}, {}) already holds an element", .cell.x, .cell.y)]
    CellOccupied { cell: IVec2 },
}

/// Why a connection could not be created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error("connection table is full ({MAX_CONNECTIONS} connections)")]
    CapacityExceeded,
    #[error("an element cannot drive itself")]
    SelfConnection,
    #[error("no active element {0}")]
    ElementNotFound(ElementId),
    #[error("input slot {0} is out of range")]
    InvalidSlot(usize),
    #[error("input slot {0} is already driven")]
    SlotOccupied(usize),
}

impl SimState {
    /// Place a new element on the canvas.
    ///
    /// Allocates the next id and inserts the element with all input slots
    /// unconnected and output low. The target cell must be empty and the
    /// arena below capacity.
    pub fn place(&mut self, kind: ElementKind, cell: IVec2) -> Result<ElementId, PlaceError> {
        if self.elements.len() >= MAX_ELEMENTS_ON_CANVAS {
            return Err(PlaceError::CanvasFull);
        }
        if self.elements.iter().any(|e| e.active && e.cell == cell) {
            return Err(PlaceError::CellOccupied { cell });
        }

        let id = self.alloc_element_id();
        self.elements.push(Element::new(id, kind, cell));
        log::info!(
            "placed {} {} at ({}, {})",
            kind.display_name(),
            id,
            cell.x,
            cell.y
        );
        Ok(id)
    }

    /// Wire `from`'s output into input slot `slot` of `to`.
    ///
    /// The destination slot is bound and the destination's connected-input
    /// count re-derived. The source id is not required to resolve yet; an
    /// unresolved driver simply reads low during propagation.
    pub fn connect(
        &mut self,
        from: ElementId,
        to: ElementId,
        slot: usize,
    ) -> Result<(), ConnectError> {
        if self.connections.len() >= MAX_CONNECTIONS {
            return Err(ConnectError::CapacityExceeded);
        }
        if from == to {
            return Err(ConnectError::SelfConnection);
        }

        let target = self
            .elements
            .iter_mut()
            .find(|e| e.active && e.id == to)
            .ok_or(ConnectError::ElementNotFound(to))?;
        if slot >= MAX_INPUTS_PER_ELEMENT {
            return Err(ConnectError::InvalidSlot(slot));
        }
        if target.inputs[slot].is_some() {
            return Err(ConnectError::SlotOccupied(slot));
        }

        target.inputs[slot] = Some(from);
        target.connected_inputs = target.derive_connected_inputs();
        self.connections.push(Connection {
            from,
            to,
            slot,
            active: true,
        });
        log::info!(
            "connected {} -> {} slot {} ({} connections total)",
            from,
            to,
            slot,
            self.connections.len()
        );
        Ok(())
    }

    /// Look up an active element by id
    pub fn find_active(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.active && e.id == id)
    }

    fn find_active_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.active && e.id == id)
    }

    /// Momentary activation of an element: a button is held high, a switch
    /// is toggled. Other kinds have no interaction.
    pub fn interact(&mut self, id: ElementId) {
        let Some(elem) = self.find_active_mut(id) else {
            log::warn!("element {id} not found for interaction");
            return;
        };
        match elem.kind {
            ElementKind::Button => elem.output = true,
            ElementKind::Switch => {
                elem.output = !elem.output;
                log::info!(
                    "switch {} toggled {}",
                    elem.id,
                    if elem.output { "on" } else { "off" }
                );
            }
            ElementKind::Source
            | ElementKind::Sensor
            | ElementKind::And
            | ElementKind::Or
            | ElementKind::Not
            | ElementKind::Bus
            | ElementKind::FlipFlop
            | ElementKind::Mux
            | ElementKind::Tape
            | ElementKind::Sequencer => {
                log::debug!("element {} ({:?}) has no interaction", elem.id, elem.kind);
            }
        }
    }

    /// End of a momentary activation: a button goes low again. Switches keep
    /// their toggled state.
    pub fn release(&mut self, id: ElementId) {
        let Some(elem) = self.find_active_mut(id) else {
            log::warn!("element {id} not found for release");
            return;
        };
        if elem.kind == ElementKind::Button {
            elem.output = false;
        }
    }
}
