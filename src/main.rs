//! Headless demo driver
//!
//! Plays a short scripted session against the logic core and dumps the
//! final state as JSON. Useful for eyeballing log output and as a smoke
//! run; the real host (rendering, input) lives outside this crate.

use enjenir::{CardKind, SimState, update};
use glam::IVec2;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xE17E);
    let mut sim = SimState::new(seed);
    println!(
        "seed {seed}: scenario '{}', {} cards in hand",
        sim.scenario.name,
        sim.hand.len()
    );

    // Put down whatever element cards come up, daisy-chain each new element
    // to the previous one, keep the hand topped up, and tick once per turn.
    let mut previous = None;
    for turn in 1..=6 {
        loop {
            let Some(index) = sim
                .hand
                .iter()
                .position(|card| matches!(card.kind, CardKind::Element(_)))
            else {
                break;
            };
            let cell = IVec2::new(sim.elements.len() as i32, 0);
            match sim.play_element_card(index, cell) {
                Ok(id) => {
                    if let Some(prev) = previous {
                        let _ = sim.connect(prev, id, 0);
                    }
                    previous = Some(id);
                }
                Err(err) => {
                    log::info!("turn {turn}: {err}");
                    break;
                }
            }
        }
        while sim.draw_card().is_ok() {}
        sim.end_turn();
        update(&mut sim, 1.0 / 60.0);

        println!(
            "turn {turn}: {} elements, score {}, scenario '{}'",
            sim.elements.len(),
            sim.score,
            sim.scenario.name
        );
    }

    match serde_json::to_string_pretty(&sim) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("state dump failed: {err}"),
    }
}
