//! Purchase strategies. Each variant is a pure predicate over the current
//! balance and the property being considered.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::PurchaseRules;
use crate::property::Property;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Buys anything it can afford.
    Impulsive,
    /// Buys only properties with rent above the configured threshold.
    Demanding,
    /// Buys only when a reserve remains after paying.
    Cautious,
    /// Buys affordable properties on a coin flip.
    Random,
}

impl Strategy {
    pub const ALL: [Self; 4] = [
        Self::Impulsive,
        Self::Demanding,
        Self::Cautious,
        Self::Random,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Impulsive => "impulsive",
            Self::Demanding => "demanding",
            Self::Cautious => "cautious",
            Self::Random => "random",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Impulsive => "Impulsive",
            Self::Demanding => "Demanding",
            Self::Cautious => "Cautious",
            Self::Random => "Random",
        }
    }

    /// Labels used by the original Portuguese reports.
    #[must_use]
    pub const fn reference_label(self) -> &'static str {
        match self {
            Self::Impulsive => "Impulsivo",
            Self::Demanding => "Exigente",
            Self::Cautious => "Cauteloso",
            Self::Random => "Aleatório",
        }
    }

    /// Position of this variant in [`Strategy::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Impulsive => 0,
            Self::Demanding => 1,
            Self::Cautious => 2,
            Self::Random => 3,
        }
    }

    /// Whether `decide` consults a coin flip.
    #[must_use]
    pub const fn needs_coin(self) -> bool {
        matches!(self, Self::Random)
    }

    /// Purchase decision. Never mutates; `coin_flip` is ignored by every
    /// variant except `Random`.
    #[must_use]
    pub fn decide(
        self,
        balance: i64,
        property: &Property,
        coin_flip: bool,
        rules: &PurchaseRules,
    ) -> bool {
        if property.is_owned() {
            return false;
        }
        let cost = i64::from(property.sale_cost);
        match self {
            Self::Impulsive => balance >= cost,
            Self::Demanding => balance >= cost && property.rent_value > rules.demanding_min_rent,
            Self::Cautious => balance - i64::from(rules.cautious_reserve) >= cost,
            Self::Random => balance >= cost && coin_flip,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerId;

    fn rules() -> PurchaseRules {
        PurchaseRules::default()
    }

    #[test]
    fn impulsive_buys_whenever_affordable() {
        let property = Property::new(150, 10);
        assert!(Strategy::Impulsive.decide(150, &property, false, &rules()));
        assert!(!Strategy::Impulsive.decide(149, &property, true, &rules()));
    }

    #[test]
    fn demanding_requires_rent_strictly_above_threshold() {
        let cheap_rent = Property::new(100, 50);
        let rich_rent = Property::new(100, 51);
        assert!(!Strategy::Demanding.decide(300, &cheap_rent, true, &rules()));
        assert!(Strategy::Demanding.decide(300, &rich_rent, false, &rules()));
        assert!(!Strategy::Demanding.decide(99, &rich_rent, true, &rules()));
    }

    #[test]
    fn cautious_keeps_reserve() {
        let property = Property::new(200, 40);
        assert!(Strategy::Cautious.decide(280, &property, false, &rules()));
        assert!(!Strategy::Cautious.decide(279, &property, true, &rules()));
    }

    #[test]
    fn random_follows_coin_when_affordable() {
        let property = Property::new(100, 40);
        assert!(Strategy::Random.decide(100, &property, true, &rules()));
        assert!(!Strategy::Random.decide(100, &property, false, &rules()));
        assert!(!Strategy::Random.decide(99, &property, true, &rules()));
    }

    #[test]
    fn nobody_buys_owned_property() {
        let property = Property {
            owner: Some(PlayerId(2)),
            ..Property::new(70, 100)
        };
        for strategy in Strategy::ALL {
            assert!(!strategy.decide(10_000, &property, true, &rules()));
        }
    }

    #[test]
    fn decide_is_repeatable_and_pure() {
        let property = Property::new(120, 60);
        let snapshot = property;
        for strategy in Strategy::ALL {
            for coin in [true, false] {
                let first = strategy.decide(200, &property, coin, &rules());
                let second = strategy.decide(200, &property, coin, &rules());
                assert_eq!(first, second);
            }
        }
        assert_eq!(property, snapshot);
    }

    #[test]
    fn labels_and_indices_are_stable() {
        for (idx, strategy) in Strategy::ALL.iter().enumerate() {
            assert_eq!(strategy.index(), idx);
        }
        assert_eq!(Strategy::Random.to_string(), "Random");
        assert_eq!(Strategy::Random.reference_label(), "Aleatório");
        assert_eq!(Strategy::Demanding.key(), "demanding");
    }
}
