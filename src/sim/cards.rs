//! Card definitions and the deck/hand/discard economy
//!
//! Cards are immutable definitions moved by value between three sequences:
//! the deck (with a read cursor), the hand and the discard pile. A card's
//! identity is its definition id; duplicates are expected. Cards are never
//! created or destroyed in play, so `hand + undrawn deck + discard` is a
//! conserved quantity across every operation here.

use glam::IVec2;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::graph::PlaceError;
use super::state::{ElementId, ElementKind, SimState};
use crate::consts::*;

/// The closed set of action card effects
///
/// Only `Requisition` and `ReOrg` have behavior today; the rest are declared
/// so the deck format is complete, and using one fails with an explicit
/// error instead of silently succeeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// Draw 3 cards
    Requisition,
    /// Discard any number of cards, draw that many
    Recycle,
    /// Discard the hand, draw back to a full hand
    ReOrg,
    /// Pick 1 of 3 cards to add to the deck
    JobFair,
    /// Add an input/output to an element
    ContinuousImprovement,
    /// Permanently remove a card
    EndOfLife,
    /// Copy an element in play
    PartsBin,
    /// Copy and replay modules/nodes
    Blueprint,
    /// Copy and replay modules/nodes
    Schematic,
}

impl ActionKind {
    pub fn name(self) -> &'static str {
        match self {
            ActionKind::Requisition => "Requisition",
            ActionKind::Recycle => "Recycle",
            ActionKind::ReOrg => "Re-Org",
            ActionKind::JobFair => "Job Fair",
            ActionKind::ContinuousImprovement => "Continuous Improvement",
            ActionKind::EndOfLife => "End of Life",
            ActionKind::PartsBin => "Parts Bin",
            ActionKind::Blueprint => "Blueprint",
            ActionKind::Schematic => "Schematic",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ActionKind::Requisition => "Draw 3 cards from deck.",
            ActionKind::Recycle => "Discard any cards, draw that many.",
            ActionKind::ReOrg => "Discard hand, draw to full hand.",
            ActionKind::JobFair => "Pick 1 of 3 cards to add to deck.",
            ActionKind::ContinuousImprovement => "Add input/output to element.",
            ActionKind::EndOfLife => "Permanently remove a card.",
            ActionKind::PartsBin => "Copy an element in play.",
            ActionKind::Blueprint => "Copy and replay modules/nodes.",
            ActionKind::Schematic => "Copy and replay modules/nodes.",
        }
    }
}

/// What a card does when played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    /// Places an element of the given kind on the canvas
    Element(ElementKind),
    /// Performs a one-shot action
    Action(ActionKind),
}

/// A card definition; moved by value between deck, hand and discard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Definition id; equal for every copy of the same card
    pub id: u16,
    pub kind: CardKind,
}

impl Card {
    pub fn element(id: u16, kind: ElementKind) -> Self {
        Self {
            id,
            kind: CardKind::Element(kind),
        }
    }

    pub fn action(id: u16, kind: ActionKind) -> Self {
        Self {
            id,
            kind: CardKind::Action(kind),
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self.kind {
            CardKind::Element(kind) => kind.display_name(),
            CardKind::Action(kind) => kind.name(),
        }
    }

    /// Rules text
    pub fn description(&self) -> &'static str {
        match self.kind {
            CardKind::Element(kind) => match kind {
                ElementKind::Source => "Places a Source.",
                ElementKind::Button => "Places a Button.",
                ElementKind::Switch => "Places a Switch.",
                ElementKind::Sensor => "Places a Sensor.",
                ElementKind::And => "Places an AND Gate.",
                ElementKind::Or => "Places an OR Gate.",
                ElementKind::Not => "Places a NOT Gate.",
                ElementKind::Bus => "Places a Bus.",
                ElementKind::FlipFlop => "Places a Flip-Flop.",
                ElementKind::Mux => "Places a MUX.",
                ElementKind::Tape => "Places a Tape.",
                ElementKind::Sequencer => "Places a Sequencer.",
            },
            CardKind::Action(kind) => kind.description(),
        }
    }
}

/// The fixed starter deck: 4 copies of each of the four common element
/// cards, 2 of the two uncommon ones, 3 Requisitions and 2 Re-Orgs.
pub fn starter_deck() -> Vec<Card> {
    let composition = [
        (Card::element(1, ElementKind::Button), 4),
        (Card::element(2, ElementKind::Switch), 4),
        (Card::element(3, ElementKind::And), 4),
        (Card::element(4, ElementKind::Or), 4),
        (Card::element(5, ElementKind::Source), 2),
        (Card::element(6, ElementKind::Sensor), 2),
        (Card::action(7, ActionKind::Requisition), 3),
        (Card::action(8, ActionKind::ReOrg), 2),
    ];

    let mut deck = Vec::new();
    for (card, copies) in composition {
        for _ in 0..copies {
            if deck.len() < MAX_CARDS_IN_DECK {
                deck.push(card);
            }
        }
    }
    deck
}

/// Why a draw failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DrawError {
    #[error("hand is full ({MAX_CARDS_IN_HAND} cards)")]
    HandFull,
    #[error("deck and discard pile are both empty")]
    EconomyEmpty,
}

/// Why a card could not be used from the hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UseCardError {
    #[error("hand index {0} is out of range")]
    InvalidIndex(usize),
    #[error("discard pile is full")]
    DiscardFull,
    #[error("no actions remaining this turn")]
    NoActionsRemaining,
    #[error("action '{}' is not implemented yet", .0.name())]
    Unimplemented(ActionKind),
}

/// Why an element card could not be played onto the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlayCardError {
    #[error("hand index {0} is out of range")]
    InvalidIndex(usize),
    #[error("card is not an element card")]
    NotAnElementCard,
    #[error("discard pile is full")]
    DiscardFull,
    #[error("no actions remaining this turn")]
    NoActionsRemaining,
    #[error(transparent)]
    Place(#[from] PlaceError),
}

impl SimState {
    /// Draw the next card into the hand, reshuffling the discard pile back
    /// into the deck if the deck is exhausted.
    pub fn draw_card(&mut self) -> Result<(), DrawError> {
        if self.hand.len() >= MAX_CARDS_IN_HAND {
            return Err(DrawError::HandFull);
        }
        if self.cursor >= self.deck.len() {
            if self.discard.is_empty() {
                return Err(DrawError::EconomyEmpty);
            }
            log::info!(
                "deck exhausted, moving discard pile ({} cards) back in",
                self.discard.len()
            );
            self.deck = std::mem::take(&mut self.discard);
            self.cursor = 0;
            if self.deck.len() > 1 {
                self.deck.shuffle(&mut self.rng);
                log::info!("deck reshuffled");
            }
        }

        let card = self.deck[self.cursor];
        self.cursor += 1;
        self.hand.push(card);
        log::debug!("drew '{}', hand size {}", card.name(), self.hand.len());
        Ok(())
    }

    /// Use the card at `index` in the hand.
    ///
    /// Action cards execute their effect first and reach the discard pile
    /// only if the effect succeeds; they also consume one of the turn's
    /// actions. Element cards simply move to the discard pile: the placement
    /// they pay for is either done by the caller beforehand or, preferably,
    /// through [`SimState::play_element_card`].
    pub fn use_card(&mut self, index: usize) -> Result<(), UseCardError> {
        let card = *self
            .hand
            .get(index)
            .ok_or(UseCardError::InvalidIndex(index))?;
        if self.discard.len() >= MAX_CARDS_IN_DECK {
            return Err(UseCardError::DiscardFull);
        }

        match card.kind {
            CardKind::Action(action) => {
                if self.actions_this_turn >= MAX_ACTIONS_PER_TURN {
                    return Err(UseCardError::NoActionsRemaining);
                }
                self.execute_action(index, action)?;
                self.actions_this_turn += 1;
                log::info!(
                    "played action card '{}' ({}/{} actions)",
                    card.name(),
                    self.actions_this_turn,
                    MAX_ACTIONS_PER_TURN
                );
            }
            CardKind::Element(_) => {
                let card = self.hand.remove(index);
                self.discard.push(card);
                log::info!("discarded element card '{}'", card.name());
            }
        }
        Ok(())
    }

    /// Execute an action card's effect, moving the played card into the
    /// discard pile as part of the effect. The hand is untouched on failure.
    fn execute_action(&mut self, index: usize, action: ActionKind) -> Result<(), UseCardError> {
        match action {
            ActionKind::Requisition => {
                for _ in 0..3 {
                    if self.draw_card().is_err() {
                        break;
                    }
                }
                // drawing only appends, so the played card is still at `index`
                let played = self.hand.remove(index);
                self.discard.push(played);
                Ok(())
            }
            ActionKind::ReOrg => {
                let played = self.hand.remove(index);
                self.discard.push(played);
                while self.discard.len() < MAX_CARDS_IN_DECK {
                    match self.hand.pop() {
                        Some(card) => self.discard.push(card),
                        None => break,
                    }
                }
                while self.draw_card().is_ok() {}
                Ok(())
            }
            ActionKind::Recycle
            | ActionKind::JobFair
            | ActionKind::ContinuousImprovement
            | ActionKind::EndOfLife
            | ActionKind::PartsBin
            | ActionKind::Blueprint
            | ActionKind::Schematic => {
                log::warn!("action '{}' is not implemented yet", action.name());
                Err(UseCardError::Unimplemented(action))
            }
        }
    }

    /// Play an element card from the hand onto the canvas in one step.
    ///
    /// Placement is validated before the card is consumed, so a failed
    /// placement never costs the card or an action.
    pub fn play_element_card(
        &mut self,
        index: usize,
        cell: IVec2,
    ) -> Result<ElementId, PlayCardError> {
        let card = *self
            .hand
            .get(index)
            .ok_or(PlayCardError::InvalidIndex(index))?;
        let CardKind::Element(kind) = card.kind else {
            return Err(PlayCardError::NotAnElementCard);
        };
        if self.discard.len() >= MAX_CARDS_IN_DECK {
            return Err(PlayCardError::DiscardFull);
        }
        if self.actions_this_turn >= MAX_ACTIONS_PER_TURN {
            return Err(PlayCardError::NoActionsRemaining);
        }

        let id = self.place(kind, cell)?;
        let card = self.hand.remove(index);
        self.discard.push(card);
        self.actions_this_turn += 1;
        log::info!(
            "played '{}' ({}/{} actions)",
            card.name(),
            self.actions_this_turn,
            MAX_ACTIONS_PER_TURN
        );
        Ok(id)
    }

    /// End the turn, restoring the action budget
    pub fn end_turn(&mut self) {
        log::info!("turn ended after {} actions", self.actions_this_turn);
        self.actions_this_turn = 0;
    }

    /// Total cards in circulation: hand + undrawn deck + discard.
    /// Conserved across draw, use and reshuffle.
    pub fn card_total(&self) -> usize {
        self.hand.len() + self.deck_remaining() + self.discard.len()
    }
}
