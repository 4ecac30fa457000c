//! Battle replay
//!
//! Plays a finished battle log back at a chosen speed without any graphical
//! output, then hands the result to the result store.
//!
//! ## Usage
//!
//! ```bash
//! devcard-arena battle --challenger ada --opponent linus --speed double
//! ```

pub mod playback;

pub use playback::{describe, BattleReplay};

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;

use crate::battle::BattleResult;
use crate::store::{record_battle, ResultStore};

/// Fastest accepted playback, in events per second
pub const MAX_PLAYBACK_SPEED: f32 = 100.0;

/// Controls the speed of battle playback
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct PlaybackSpeed {
    /// Events per second (0.0 = instant, 0.5 = half speed, 1.0 = normal, 2.0 = double, 3.0 = triple)
    pub multiplier: f32,
}

impl Default for PlaybackSpeed {
    fn default() -> Self {
        Self { multiplier: 1.0 }
    }
}

impl PlaybackSpeed {
    /// A finite, non-negative speed, capped at [`MAX_PLAYBACK_SPEED`]
    pub fn new(multiplier: f32) -> Result<Self, String> {
        if !multiplier.is_finite() || multiplier < 0.0 {
            return Err(format!(
                "playback speed must be a finite number >= 0, got {}",
                multiplier
            ));
        }
        Ok(Self {
            multiplier: multiplier.min(MAX_PLAYBACK_SPEED),
        })
    }

    pub fn instant() -> Self {
        Self { multiplier: 0.0 }
    }

    pub fn half_speed() -> Self {
        Self { multiplier: 0.5 }
    }

    pub fn double_speed() -> Self {
        Self { multiplier: 2.0 }
    }

    pub fn triple_speed() -> Self {
        Self { multiplier: 3.0 }
    }

    /// Same speed, safe to scale a timer with: NaN stops playback, the rest
    /// is clamped into `[0, MAX_PLAYBACK_SPEED]`
    pub fn clamped(self) -> Self {
        let multiplier = if self.multiplier.is_nan() {
            0.0
        } else {
            self.multiplier.clamp(0.0, MAX_PLAYBACK_SPEED)
        };
        Self { multiplier }
    }

    pub fn is_paused(&self) -> bool {
        !(self.multiplier > 0.0)
    }
}

impl FromStr for PlaybackSpeed {
    type Err = String;

    /// Accepts a preset name or a number of events per second
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "instant" | "skip" => Ok(Self::instant()),
            "half" => Ok(Self::half_speed()),
            "normal" => Ok(Self::default()),
            "double" => Ok(Self::double_speed()),
            "triple" => Ok(Self::triple_speed()),
            other => {
                let multiplier: f32 = other.parse().map_err(|_| {
                    format!(
                        "expected instant, half, normal, double, triple or a number, got '{}'",
                        s
                    )
                })?;
                Self::new(multiplier)
            }
        }
    }
}

/// Fires once per event at normal speed
#[derive(Resource)]
pub struct ReplayClock(pub Timer);

impl Default for ReplayClock {
    fn default() -> Self {
        Self(Timer::from_seconds(1.0, TimerMode::Repeating))
    }
}

/// Where a finished replay hands its result
#[derive(Resource, Clone)]
pub struct ResultSink(pub Arc<dyn ResultStore>);

/// Tracks the hand-off so it happens exactly once
#[derive(Resource, Default)]
pub struct ReplayState {
    pub handed_off: bool,
    pub battle_id: Option<String>,
}

/// Plugin that drives a [`BattleReplay`] from the app clock
pub struct ReplayPlugin {
    pub replay: BattleReplay,
    pub speed: PlaybackSpeed,
    pub sink: Option<Arc<dyn ResultStore>>,
}

impl Plugin for ReplayPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.replay.clone())
            .insert_resource(self.speed.clamped())
            .init_resource::<ReplayClock>()
            .init_resource::<ReplayState>();

        if let Some(store) = &self.sink {
            app.insert_resource(ResultSink(Arc::clone(store)));
        }

        app.add_systems(Update, (advance_replay, hand_off_result).chain());
    }
}

/// Advance the replay by as many events as the scaled clock allows
fn advance_replay(
    time: Res<Time>,
    speed: Res<PlaybackSpeed>,
    mut clock: ResMut<ReplayClock>,
    mut replay: ResMut<BattleReplay>,
) {
    if speed.is_paused() || replay.is_complete() {
        return;
    }

    clock.0.tick(time.delta().mul_f32(speed.clamped().multiplier));
    for _ in 0..clock.0.times_finished_this_tick() {
        match replay.advance() {
            Some(event) => println!("{}", describe(event)),
            None => break,
        }
    }
    debug!("Replay {:.0}% played", replay.progress() * 100.0);
}

/// Save the result once playback finishes, then exit
fn hand_off_result(
    replay: Res<BattleReplay>,
    sink: Option<Res<ResultSink>>,
    mut state: ResMut<ReplayState>,
    mut exit: EventWriter<AppExit>,
) {
    if state.handed_off || !replay.is_complete() {
        return;
    }

    state.handed_off = true;
    if let Some(sink) = sink {
        state.battle_id = record_battle(sink.0.as_ref(), replay.result());
    }
    info!(
        "Replay complete: {} wins after {} turns",
        replay.result().winner.profile.login,
        replay.result().total_turns
    );
    exit.send(AppExit::Success);
}

/// Print every event at once and save the result.
///
/// Used when playback speed is zero ("skip animation").
pub fn replay_instantly(mut replay: BattleReplay, sink: Option<&dyn ResultStore>) -> Option<String> {
    while let Some(event) = replay.advance() {
        println!("{}", describe(event));
    }
    sink.and_then(|store| record_battle(store, replay.result()))
}

/// Play a finished battle back in a headless app
pub fn run_replay(
    result: BattleResult,
    challenger_login: &str,
    max_hp: f64,
    speed: PlaybackSpeed,
    sink: Option<Arc<dyn ResultStore>>,
) -> AppExit {
    let replay = BattleReplay::new(result, challenger_login, max_hp);
    let speed = speed.clamped();

    if speed.is_paused() {
        replay_instantly(replay, sink.as_deref());
        return AppExit::Success;
    }

    App::new()
        // Minimal plugins - no window, no rendering
        .add_plugins(
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
                1.0 / 60.0,
            ))),
        )
        .add_plugins(ReplayPlugin {
            replay,
            speed,
            sink,
        })
        .run()
}
