//! Board cells that can be bought and rented.
use serde::{Deserialize, Serialize};

use crate::player::PlayerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub sale_cost: u32,
    pub rent_value: u32,
    /// Back-reference into the table's players; never owning.
    #[serde(default)]
    pub owner: Option<PlayerId>,
}

impl Property {
    #[must_use]
    pub const fn new(sale_cost: u32, rent_value: u32) -> Self {
        Self {
            sale_cost,
            rent_value,
            owner: None,
        }
    }

    #[must_use]
    pub const fn is_owned(&self) -> bool {
        self.owner.is_some()
    }

    #[must_use]
    pub fn is_owned_by(&self, player: PlayerId) -> bool {
        self.owner == Some(player)
    }
}
