//! Score change notification.
//!
//! The consumption pipeline triggers a [`ScoreChanged`] event after every
//! consumed coin. [`observe_score_changed`] mirrors the new total into
//! [`WorldSignals`] and raises the `"score_dirty"` flag so the presentation
//! layer knows to refresh its score display. Presentation clears the flag
//! once it has redrawn.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::warn;

use crate::resources::worldsignals::WorldSignals;

/// Signal key holding the current score.
pub const SCORE_SIGNAL: &str = "score";
/// Flag raised whenever the score changes.
pub const SCORE_DIRTY_FLAG: &str = "score_dirty";

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreChanged {
    /// Score after the change.
    pub total: u64,
    /// Amount awarded by the change.
    pub delta: u64,
}

pub fn observe_score_changed(trigger: On<ScoreChanged>, mut signals: ResMut<WorldSignals>) {
    let total = trigger.event().total;
    signals.set_integer(SCORE_SIGNAL, score_signal_value(total));
    signals.set_flag(SCORE_DIRTY_FLAG);
}

/// Integer signal value for a score total. Totals past `i32::MAX` saturate
/// with a warning; [`Score`](crate::resources::score::Score) keeps the exact
/// value.
pub fn score_signal_value(total: u64) -> i32 {
    match i32::try_from(total) {
        Ok(value) => value,
        Err(_) => {
            warn!(
                "Score {} exceeds the integer signal range, publishing {}",
                total,
                i32::MAX
            );
            i32::MAX
        }
    }
}
