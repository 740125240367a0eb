//! # Match Narration
//!
//! Renders structured [`MatchEvent`]s as commentary lines. The simulation
//! never formats text; everything a reader sees is produced here from the
//! event data and the two team names.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::{
    EventKind, EventMetadata, Importance, MatchEvent, MatchResult, ShotRoll, ShotType, Side, TeamInfo,
};

/// One line of the rendered match log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NarratedEvent {
    pub minute: u8,
    pub message: String,
    pub importance: Importance,
    pub event_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub metadata: EventMetadata,
}

impl MatchResult {
    /// The event log rendered as commentary, in event order.
    pub fn narrated_log(&self) -> Vec<NarratedEvent> {
        self.events.iter().map(|event| narrate(event, &self.home, &self.away)).collect()
    }
}

pub fn narrate(event: &MatchEvent, home: &TeamInfo, away: &TeamInfo) -> NarratedEvent {
    NarratedEvent {
        minute: event.minute,
        message: describe(&event.kind, home, away),
        importance: event.importance,
        event_type: event.event_type().to_string(),
        details: details(event),
        metadata: event.metadata,
    }
}

/// Headline text for an event.
pub fn describe(kind: &EventKind, home: &TeamInfo, away: &TeamInfo) -> String {
    let team = |side: Side| match side {
        Side::Home => home.name.as_str(),
        Side::Away => away.name.as_str(),
    };

    match kind {
        EventKind::Kickoff { scheduled_free_kicks } => {
            format!("Kickoff! (Total FKs scheduled: {})", scheduled_free_kicks)
        }
        EventKind::Abandoned { home_available, away_available } => {
            if *home_available > 11 || *away_available > 11 {
                format!("Match abandoned: invalid lineup ({} vs {} players).", home_available, away_available)
            } else {
                "Match abandoned due to insufficient players.".to_string()
            }
        }
        EventKind::HalfTime => "Halftime".to_string(),
        EventKind::FullTime { home: h, away: a } => format!("Full Time! Final score: {} - {}", h, a),
        EventKind::MidfieldAdvance { side, .. } => format!("{} advances.", team(*side)),
        EventKind::BallWon { side, .. } => format!("{} wins the ball.", team(*side)),
        EventKind::ShotOpportunity { side, .. } => format!("{} creates a chance!", team(*side)),
        EventKind::DefensiveStop { side, .. } => format!("{}'s defense holds firm.", team(*side)),
        EventKind::Goal { shot, scorer, home: h, away: a, .. } => match shot {
            ShotType::Penalty => format!("GOAL! {} converts! ({}-{})", scorer, h, a),
            _ => format!("GOAL! {}! ({}-{})", scorer, h, a),
        },
        EventKind::ShotMissed { shot, shooter, keeper, saved, .. } => match (shot, saved) {
            (ShotType::Penalty, true) => format!("MISSED! {} saves {}'s penalty!", keeper, shooter),
            (ShotType::Penalty, false) => format!("MISSED! {}'s penalty goes wide!", shooter),
            (ShotType::DirectFreeKick, true) => format!("NO GOAL! {} saves the free kick.", keeper),
            (ShotType::DirectFreeKick, false) => "NO GOAL! The free kick sails wide.".to_string(),
            (ShotType::OpenPlay, true) => format!("SAVED! {} denies {}.", keeper, shooter),
            (ShotType::OpenPlay, false) => format!("NO GOAL! {} fires just wide.", shooter),
        },
        EventKind::FreeKickAwarded { side, zone } => {
            format!("Free Kick to {} in a {} position.", team(*side), zone.label())
        }
        EventKind::DirectFreeKick { taker, .. } => {
            format!("{} steps up to take the direct free kick.", taker)
        }
        EventKind::IndirectFreeKick { side } => {
            format!("{} sends a cross or pass into the attacking zone.", team(*side))
        }
        EventKind::FreeKickRestart { side } => format!("{} restarts play safely.", team(*side)),
        EventKind::PenaltyAwarded { side } => format!("PENALTY to {}!", team(*side)),
        EventKind::ShootoutStart => {
            "The match is drawn. A penalty shootout will decide the winner!".to_string()
        }
        EventKind::ShootoutRound { round, sudden_death: false } => {
            format!("--- Shootout Round {} ---", round)
        }
        EventKind::ShootoutRound { round, sudden_death: true } => {
            format!("--- Sudden Death Round {} ---", round)
        }
        EventKind::ShootoutKick { taker, keeper, roll, .. } => {
            if roll.is_goal() {
                format!("GOAL! {} scores.", taker)
            } else if keeper.is_empty() {
                format!("MISSED! {} puts it wide!", taker)
            } else {
                format!("SAVED! {} denies {}!", keeper, taker)
            }
        }
        EventKind::ShootoutScore { home: h, away: a } => {
            format!("Score: {} {} - {} {}", home.name, h, a, away.name)
        }
        EventKind::ShootoutEnd { winner, home: h, away: a, decided_by_lot } => {
            if *decided_by_lot {
                format!("{} wins the shootout {}-{} after the drawing of lots!", team(*winner), h, a)
            } else {
                format!("{} wins the shootout {}-{}!", team(*winner), h, a)
            }
        }
        EventKind::MoraleChange { player, delta, .. } => format!("{} morale change: {:+}", player, delta),
        EventKind::MoraleCommitted { players } => {
            format!("Post-match morale updates committed ({} players).", players)
        }
        EventKind::MoraleCommitFailed { reason } => format!("Error committing morale updates: {}", reason),
    }
}

/// Debug breakdown of the numbers behind an event, where there are any.
pub fn details(event: &MatchEvent) -> Option<String> {
    match &event.kind {
        EventKind::MidfieldAdvance { contest, .. }
        | EventKind::BallWon { contest, .. }
        | EventKind::DefensiveStop { contest, .. } => Some(format!(
            "Contest: {:.1} vs {:.1}\n- Prob: {:.1}%, Roll: {:.3}",
            contest.attack,
            contest.defense,
            contest.probability * 100.0,
            contest.roll
        )),
        EventKind::ShotOpportunity { contest, defense_modifier, .. } => Some(format!(
            "Attack: {:.1} vs gate {:.1} (modifier {:.2})\n- Prob: {:.1}%, Roll: {:.3}",
            contest.attack,
            contest.defense,
            defense_modifier,
            contest.probability * 100.0,
            contest.roll
        )),
        EventKind::Goal { shot, scorer, keeper, roll, .. } => {
            Some(shot_details(*shot, scorer, keeper, roll, &event.metadata))
        }
        EventKind::ShotMissed { shot, shooter, keeper, roll, .. } => {
            Some(shot_details(*shot, shooter, keeper, roll, &event.metadata))
        }
        EventKind::ShootoutKick { taker, keeper, roll, .. } => {
            Some(shot_details(ShotType::Penalty, taker, keeper, roll, &event.metadata))
        }
        EventKind::MoraleChange { personality, old, new, .. } => {
            Some(format!("Personality: {}. Morale: {} -> {}", personality.label(), old, new))
        }
        _ => None,
    }
}

fn shot_details(shot: ShotType, shooter: &str, keeper: &str, roll: &ShotRoll, metadata: &EventMetadata) -> String {
    let label = match shot {
        ShotType::OpenPlay => "Shot",
        ShotType::DirectFreeKick => "Direct FK",
        ShotType::Penalty => "Penalty",
    };
    let mut text = format!(
        "{}: {} ({:.1}) vs {} ({:.1})",
        label, shooter, roll.shooter_rating, keeper, roll.keeper_rating
    );
    if let Some(distance) = metadata.distance {
        text.push_str(&format!(", {:.0}m", distance));
    }
    text.push_str(&format!(
        "\n- Prob: {:.1}%, Roll: {:.3} -> {}",
        roll.probability * 100.0,
        roll.roll,
        if roll.is_goal() { "GOAL" } else { "NO GOAL" }
    ));
    if let Some(danger) = metadata.danger {
        text.push_str(&format!(" [{:?}]", danger));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FreeKickZone, PlayerId};

    fn teams() -> (TeamInfo, TeamInfo) {
        (
            TeamInfo { name: "Rovers".into(), color: "#ff0000".into() },
            TeamInfo { name: "United".into(), color: "#0000ff".into() },
        )
    }

    fn event(kind: EventKind, metadata: EventMetadata) -> MatchEvent {
        MatchEvent { minute: 10, importance: kind.importance(), kind, metadata }
    }

    #[test]
    fn test_team_names_follow_side() {
        let (home, away) = teams();
        let kind = EventKind::FreeKickAwarded { side: Side::Away, zone: FreeKickZone::Dangerous };
        assert_eq!(describe(&kind, &home, &away), "Free Kick to United in a dangerous position.");
        let kind = EventKind::PenaltyAwarded { side: Side::Home };
        assert_eq!(describe(&kind, &home, &away), "PENALTY to Rovers!");
    }

    #[test]
    fn test_goal_line_and_details() {
        let (home, away) = teams();
        let roll = ShotRoll { shooter_rating: 66.0, keeper_rating: 58.5, probability: 0.42, roll: 0.1 };
        let kind = EventKind::Goal {
            side: Side::Home,
            shot: ShotType::OpenPlay,
            scorer_id: PlayerId(9),
            scorer: "Striker".into(),
            keeper: "Keeper".into(),
            roll,
            home: 2,
            away: 1,
        };
        let metadata = EventMetadata { dominance: 0.2, distance: Some(14.0), danger: None };
        let narrated = narrate(&event(kind, metadata), &home, &away);

        assert_eq!(narrated.message, "GOAL! Striker! (2-1)");
        assert_eq!(narrated.event_type, "GOAL");
        assert_eq!(narrated.importance, Importance::Goal);
        let details = narrated.details.unwrap();
        assert!(details.contains("Prob: 42.0%"), "{}", details);
        assert!(details.contains("14m"), "{}", details);
        assert!(details.ends_with("GOAL"), "{}", details);
    }

    #[test]
    fn test_miss_distinguishes_save_from_wide() {
        let (home, away) = teams();
        let roll = ShotRoll { shooter_rating: 60.0, keeper_rating: 60.0, probability: 0.3, roll: 0.35 };
        let missed = |saved| EventKind::ShotMissed {
            side: Side::Home,
            shot: ShotType::OpenPlay,
            shooter_id: PlayerId(9),
            shooter: "Striker".into(),
            keeper: "Keeper".into(),
            roll,
            saved,
        };
        assert_eq!(describe(&missed(true), &home, &away), "SAVED! Keeper denies Striker.");
        assert_eq!(describe(&missed(false), &home, &away), "NO GOAL! Striker fires just wide.");
    }

    #[test]
    fn test_narrated_log_preserves_order_and_shape() {
        let (home, away) = teams();
        let result = MatchResult {
            home,
            away,
            score_home: 0,
            score_away: 0,
            knockout: false,
            seed: 1,
            abandoned: false,
            events: vec![
                event(EventKind::Kickoff { scheduled_free_kicks: 12 }, EventMetadata::default()),
                event(EventKind::HalfTime, EventMetadata::default()),
                event(EventKind::FullTime { home: 0, away: 0 }, EventMetadata::default()),
            ],
            goals: Vec::new(),
            statistics: Default::default(),
            shootout: None,
            morale_updates: None,
        };
        let log = result.narrated_log();
        let messages: Vec<&str> = log.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, ["Kickoff! (Total FKs scheduled: 12)", "Halftime", "Full Time! Final score: 0 - 0"]);
        assert!(log.iter().all(|e| e.details.is_none()));

        let json = serde_json::to_value(&log[0]).unwrap();
        assert_eq!(json["event_type"], "KICKOFF");
        assert_eq!(json["importance"], "info");
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_morale_change_is_signed() {
        let (home, away) = teams();
        let kind = EventKind::MoraleChange {
            side: Side::Away,
            player_id: PlayerId(3),
            player: "Back".into(),
            personality: crate::models::Personality::Volatile,
            old: 70,
            new: 52,
            delta: -18,
        };
        assert_eq!(describe(&kind, &home, &away), "Back morale change: -18");
    }
}
