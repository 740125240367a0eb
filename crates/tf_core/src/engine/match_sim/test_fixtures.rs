//! Test Fixtures Module
//!
//! Squad builders shared by the engine, morale and odds tests.
//!
//! ## Usage
//! ```rust,ignore
//! use crate::engine::match_sim::test_fixtures::*;
//! ```

use crate::models::{Personality, Player, Position, Roster};

/// 4-4-2 positions in roster order.
pub const STANDARD_442: [Position; 11] = [
    Position::Goalkeeper,
    Position::Defender,
    Position::Defender,
    Position::Defender,
    Position::Defender,
    Position::Midfielder,
    Position::Midfielder,
    Position::Midfielder,
    Position::Midfielder,
    Position::Forward,
    Position::Forward,
];

/// Eleven players at `skill`, full shape. Ids start at `id_base + 1`.
pub fn squad_with_skill(name: &str, id_base: u32, skill: u8) -> Roster {
    let players = STANDARD_442
        .iter()
        .enumerate()
        .map(|(i, &position)| {
            Player::new(id_base + i as u32 + 1, format!("{} {}", name, i + 1), position, skill, 100)
                .with_shirt_number(i as u8 + 1)
        })
        .collect();
    Roster::new(name, players)
}

pub fn squad(name: &str, id_base: u32) -> Roster {
    squad_with_skill(name, id_base, 60)
}

/// Eleven starters plus `bench` substitutes at lower skill.
pub fn squad_with_bench(name: &str, id_base: u32, bench: usize) -> Roster {
    let mut roster = squad(name, id_base);
    for i in 0..bench {
        let position = STANDARD_442[1 + i % 10];
        roster.players.push(
            Player::new(id_base + 50 + i as u32, format!("{} Sub {}", name, i + 1), position, 40, 100)
                .with_morale(40),
        );
    }
    roster
}

/// A squad of ten: one outfield player short.
pub fn short_squad(name: &str, id_base: u32) -> Roster {
    let mut roster = squad(name, id_base);
    roster.players.pop();
    roster
}

pub fn with_personality(mut roster: Roster, personality: Personality) -> Roster {
    for p in &mut roster.players {
        p.personality = personality;
    }
    roster
}
