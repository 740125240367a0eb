//! # Effective Ratings
//!
//! Raw attributes are turned into the numbers the probability models use.
//! The base formulas only look at shape:
//!
//! - general skill keeps a 30% floor: `skill * (0.3 + 0.7 * shape/100)`
//! - specialties keep a 50% floor: `attr * (0.5 + 0.5 * shape/100)`
//!
//! Optional layers ([`SpecialistBonus`], [`MoraleModifier`]) wrap the base
//! value. Each one is a [`RatingModifier`] and is toggled independently from
//! [`RatingConfig`].

use std::fmt;

use crate::engine::config::{MoraleEffectConfig, RatingConfig, SpecialistBonusConfig};
use crate::models::Player;

/// Which derived rating is being asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum Rating {
    Skill,
    FreeKick,
    PenaltyTaking,
    PenaltySaving,
}

impl Rating {
    /// Raw attribute behind a specialty rating. `None` for general skill.
    pub fn specialty_attribute(self, player: &Player) -> Option<u8> {
        match self {
            Rating::Skill => None,
            Rating::FreeKick => Some(player.free_kick_ability),
            Rating::PenaltyTaking => Some(player.penalty_taking),
            Rating::PenaltySaving => Some(player.penalty_saving),
        }
    }
}

fn shape_fraction(shape: u8) -> f32 {
    shape.min(100) as f32 / 100.0
}

pub fn effective_skill(player: &Player) -> f32 {
    player.skill as f32 * (0.3 + 0.7 * shape_fraction(player.shape))
}

fn specialty(attr: u8, shape: u8) -> f32 {
    attr as f32 * (0.5 + 0.5 * shape_fraction(shape))
}

pub fn effective_free_kick(player: &Player) -> f32 {
    specialty(player.free_kick_ability, player.shape)
}

pub fn effective_penalty_taking(player: &Player) -> f32 {
    specialty(player.penalty_taking, player.shape)
}

pub fn effective_penalty_saving(player: &Player) -> f32 {
    specialty(player.penalty_saving, player.shape)
}

/// Base rating with no modifiers applied.
pub fn base_rating(player: &Player, rating: Rating) -> f32 {
    match rating {
        Rating::Skill => effective_skill(player),
        Rating::FreeKick => effective_free_kick(player),
        Rating::PenaltyTaking => effective_penalty_taking(player),
        Rating::PenaltySaving => effective_penalty_saving(player),
    }
}

/// A layer over the base rating. Layers run in insertion order.
pub trait RatingModifier: Send + Sync + fmt::Debug {
    fn apply(&self, player: &Player, rating: Rating, value: f32) -> f32;
}

/// Step bonus for specialists: at or above the threshold the specialty
/// rating jumps by a fixed factor.
#[derive(Debug, Clone, Copy)]
pub struct SpecialistBonus {
    pub threshold: u8,
    pub factor: f32,
}

impl From<&SpecialistBonusConfig> for SpecialistBonus {
    fn from(cfg: &SpecialistBonusConfig) -> Self {
        Self { threshold: cfg.threshold, factor: cfg.factor }
    }
}

impl RatingModifier for SpecialistBonus {
    fn apply(&self, player: &Player, rating: Rating, value: f32) -> f32 {
        match rating.specialty_attribute(player) {
            Some(attr) if attr >= self.threshold => value * self.factor,
            _ => value,
        }
    }
}

/// Scales general skill by morale: neutral at 100, `1 - max_penalty` at 0.
#[derive(Debug, Clone, Copy)]
pub struct MoraleModifier {
    pub max_penalty: f32,
}

impl From<&MoraleEffectConfig> for MoraleModifier {
    fn from(cfg: &MoraleEffectConfig) -> Self {
        Self { max_penalty: cfg.max_penalty }
    }
}

impl RatingModifier for MoraleModifier {
    fn apply(&self, player: &Player, rating: Rating, value: f32) -> f32 {
        if rating != Rating::Skill {
            return value;
        }
        let missing = (100 - player.morale.min(100)) as f32 / 100.0;
        value * (1.0 - self.max_penalty * missing)
    }
}

/// Base formulas plus whichever modifiers are switched on.
#[derive(Debug, Default)]
pub struct RatingModel {
    modifiers: Vec<Box<dyn RatingModifier>>,
}

impl RatingModel {
    pub fn base() -> Self {
        Self::default()
    }

    pub fn from_config(cfg: &RatingConfig) -> Self {
        let mut model = Self::base();
        if cfg.specialist_bonus.enabled {
            model = model.with_modifier(SpecialistBonus::from(&cfg.specialist_bonus));
        }
        if cfg.morale_effect.enabled {
            model = model.with_modifier(MoraleModifier::from(&cfg.morale_effect));
        }
        model
    }

    pub fn with_modifier(mut self, modifier: impl RatingModifier + 'static) -> Self {
        self.modifiers.push(Box::new(modifier));
        self
    }

    pub fn modifier_count(&self) -> usize {
        self.modifiers.len()
    }

    pub fn rating(&self, player: &Player, rating: Rating) -> f32 {
        self.modifiers
            .iter()
            .fold(base_rating(player, rating), |value, m| m.apply(player, rating, value))
    }

    #[inline]
    pub fn skill(&self, player: &Player) -> f32 {
        self.rating(player, Rating::Skill)
    }

    #[inline]
    pub fn free_kick(&self, player: &Player) -> f32 {
        self.rating(player, Rating::FreeKick)
    }

    #[inline]
    pub fn penalty_taking(&self, player: &Player) -> f32 {
        self.rating(player, Rating::PenaltyTaking)
    }

    #[inline]
    pub fn penalty_saving(&self, player: &Player) -> f32 {
        self.rating(player, Rating::PenaltySaving)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Position;
    use proptest::prelude::*;
    use strum::IntoEnumIterator;

    fn player(skill: u8, shape: u8) -> Player {
        Player::new(1, "Test", Position::Midfielder, skill, shape)
    }

    #[test]
    fn test_effective_skill_endpoints() {
        let p = player(80, 0);
        assert!((effective_skill(&p) - 24.0).abs() < 1e-4);
        let p = player(80, 100);
        assert!((effective_skill(&p) - 80.0).abs() < 1e-4);
    }

    #[test]
    fn test_shape_above_hundred_is_not_rewarded() {
        assert_eq!(effective_skill(&player(70, 150)), effective_skill(&player(70, 100)));
    }

    #[test]
    fn test_specialty_floor_is_half() {
        let p = player(60, 0).with_free_kick(80).with_penalties(70, 90);
        assert!((effective_free_kick(&p) - 40.0).abs() < 1e-4);
        assert!((effective_penalty_taking(&p) - 35.0).abs() < 1e-4);
        assert!((effective_penalty_saving(&p) - 45.0).abs() < 1e-4);
    }

    #[test]
    fn test_specialist_bonus_is_a_step() {
        let model = RatingModel::base().with_modifier(SpecialistBonus { threshold: 65, factor: 1.15 });
        let below = player(60, 100).with_free_kick(64);
        let at = player(60, 100).with_free_kick(65);
        assert!((model.free_kick(&below) - 64.0).abs() < 1e-4);
        assert!((model.free_kick(&at) - 65.0 * 1.15).abs() < 1e-3);
        // skill is never boosted
        assert!((model.skill(&at) - 60.0).abs() < 1e-4);
    }

    #[test]
    fn test_morale_modifier_only_touches_skill() {
        let model = RatingModel::base().with_modifier(MoraleModifier { max_penalty: 0.10 });
        let low = player(80, 100).with_morale(0).with_penalties(70, 70);
        let full = player(80, 100).with_morale(100);
        assert!((model.skill(&full) - 80.0).abs() < 1e-4);
        assert!((model.skill(&low) - 72.0).abs() < 1e-4);
        assert!((model.penalty_taking(&low) - 70.0).abs() < 1e-4);
    }

    #[test]
    fn test_from_config_respects_toggles() {
        let mut cfg = RatingConfig::default();
        assert_eq!(RatingModel::from_config(&cfg).modifier_count(), 0);
        cfg.morale_effect.enabled = true;
        assert_eq!(RatingModel::from_config(&cfg).modifier_count(), 1);
        cfg.specialist_bonus.enabled = true;
        assert_eq!(RatingModel::from_config(&cfg).modifier_count(), 2);
    }

    proptest! {
        #[test]
        fn prop_ratings_monotonic_in_shape(skill in 0u8..=100, attr in 0u8..=100, shape in 0u8..100) {
            let model = RatingModel::from_config(&RatingConfig {
                specialist_bonus: SpecialistBonusConfig { enabled: true, ..Default::default() },
                morale_effect: MoraleEffectConfig { enabled: true, ..Default::default() },
            });
            let lo = player(skill, shape).with_free_kick(attr).with_penalties(attr, attr);
            let hi = player(skill, shape + 1).with_free_kick(attr).with_penalties(attr, attr);
            for rating in Rating::iter() {
                prop_assert!(model.rating(&hi, rating) >= model.rating(&lo, rating));
            }
        }

        #[test]
        fn prop_ratings_monotonic_in_attribute(attr in 0u8..100, shape in 0u8..=100) {
            let model = RatingModel::base().with_modifier(SpecialistBonus { threshold: 65, factor: 1.15 });
            let lo = player(attr, shape).with_free_kick(attr).with_penalties(attr, attr);
            let hi = player(attr + 1, shape).with_free_kick(attr + 1).with_penalties(attr + 1, attr + 1);
            for rating in Rating::iter() {
                prop_assert!(model.rating(&hi, rating) >= model.rating(&lo, rating));
            }
        }

        #[test]
        fn prop_effective_skill_bounded(skill in 0u8..=100, shape in 0u8..=100) {
            let p = player(skill, shape);
            let eff = effective_skill(&p);
            prop_assert!(eff >= 0.3 * skill as f32 - 1e-3);
            prop_assert!(eff <= skill as f32 + 1e-3);
        }
    }
}
