//! Consumption pipeline state.
//!
//! [`ConsumptionPipeline`] owns the collision feed subscription that delivers
//! player/coin contacts. It is built once while the simulation is set up, so
//! the [`consume_coins`](crate::systems::consumption::consume_coins) system
//! never has to subscribe lazily on its first run.

use bevy_ecs::prelude::{Entity, Resource};

use crate::components::tags::{COIN_TAG, Tags};
use crate::resources::collisionfeed::{CollisionFeed, CollisionSubscription};

/// Name of the player/coin subscription in the collision feed.
pub const PLAYER_COIN_SUBSCRIPTION: &str = "player-coin";

#[derive(Resource, Debug)]
pub struct ConsumptionPipeline {
    player: Entity,
    subscription: CollisionSubscription,
}

impl ConsumptionPipeline {
    /// Subscribe to contacts where one side is `player` and the other side
    /// carries the `"coin"` tag.
    ///
    /// Fails if the feed already holds a player/coin subscription.
    pub fn new(feed: &mut CollisionFeed, player: Entity) -> Result<Self, String> {
        let subscription = feed.subscribe(
            PLAYER_COIN_SUBSCRIPTION,
            move |event, this_tags, other_tags| {
                let is_coin = |tags: Option<&Tags>| tags.is_some_and(|t| t.has(COIN_TAG));
                (event.this == player && is_coin(other_tags))
                    || (event.other == player && is_coin(this_tags))
            },
        )?;
        Ok(Self {
            player,
            subscription,
        })
    }

    pub fn player(&self) -> Entity {
        self.player
    }

    pub fn subscription(&self) -> &CollisionSubscription {
        &self.subscription
    }
}
