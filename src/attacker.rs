//! Attacker state: transient per-battle stats mutated by part rewards

use crate::config::RewardKind;
use rand::Rng;

/// Per-battle attacker state, created fresh for every simulated battle
#[derive(Debug, Clone)]
pub struct AttackerState {
    /// Current crit probability as a fraction
    pub crit_rate: f64,
    /// Bonus on top of base damage when a hit crits; 1.0 means a crit deals 2x
    pub crit_damage_bonus: f64,
    /// Flat damage bonus as a fraction of base damage
    pub damage_bonus: f64,
    /// Hits landed so far this battle
    pub hits: u32,
}

impl AttackerState {
    pub fn new(base_crit_rate_percent: f64) -> Self {
        Self {
            crit_rate: base_crit_rate_percent / 100.0,
            crit_damage_bonus: 1.0,
            damage_bonus: 0.0,
            hits: 0,
        }
    }

    /// Land one hit: roll for crit and return the damage dealt
    pub fn roll_hit(&mut self, base_damage: f64, rng: &mut impl Rng) -> f64 {
        self.hits += 1;
        let mut damage = base_damage * (1.0 + self.damage_bonus);
        if rng.gen::<f64>() < self.crit_rate {
            damage *= 1.0 + self.crit_damage_bonus;
        }
        damage
    }

    /// Apply a part's destruction reward. Rewards stack additively and last
    /// for the rest of the battle.
    pub fn apply_reward(&mut self, reward: RewardKind) {
        match reward {
            RewardKind::Dmg => self.damage_bonus += 0.10,
            RewardKind::CritDmg => self.crit_damage_bonus += 0.50,
            RewardKind::CritRate => self.crit_rate += 0.20,
        }
    }
}
