//! Animation state machine component.
//!
//! [`AnimationState`] is the single owned value that decides which animation a
//! character is playing. It is mutated only through two entry points:
//!
//! - [`AnimationState::request`] – an explicit "play animation X" from the
//!   input boundary, subject to crouch gating, action locks and the restart
//!   policy.
//! - [`AnimationState::advance`] – called once per tick; expires finished
//!   timed animations, follows the walking flag and updates the jump arc.
//!
//! Completion is always derived from elapsed time (`now - start_ms`), never
//! from scheduled callbacks, so switching animation implicitly cancels
//! whatever the previous one was doing.
//!
//! # Related
//!
//! - [`crate::resources::animationstore::AnimationStore`] – sprite-sheet catalog and frame calculator
//! - [`crate::resources::animationpolicy::AnimationPolicy`] – lock, restart and loop sets
//! - [`crate::systems::animation::animation`] – the system calling `advance`

use std::fmt;
use std::str::FromStr;

use bevy_ecs::prelude::Component;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::resources::animationpolicy::AnimationPolicy;
use crate::resources::animationstore::{AnimationStore, Millis, jump_height};

/// Closed set of animations available on the samurai sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnimationId {
    Idle,
    Walk,
    MiddleParry,
    UpParry,
    DownParry,
    Attack,
    Thrust,
    DownAttack,
    Death,
    Jump,
    Crouch,
}

impl AnimationId {
    pub const COUNT: usize = 11;

    /// Every id, in declaration order. `ALL[id.index()] == id`.
    pub const ALL: [AnimationId; Self::COUNT] = [
        AnimationId::Idle,
        AnimationId::Walk,
        AnimationId::MiddleParry,
        AnimationId::UpParry,
        AnimationId::DownParry,
        AnimationId::Attack,
        AnimationId::Thrust,
        AnimationId::DownAttack,
        AnimationId::Death,
        AnimationId::Jump,
        AnimationId::Crouch,
    ];

    /// Position of this id inside [`AnimationId::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Name used in config files and catalogs.
    pub fn name(self) -> &'static str {
        match self {
            AnimationId::Idle => "idle",
            AnimationId::Walk => "walk",
            AnimationId::MiddleParry => "middleParry",
            AnimationId::UpParry => "upParry",
            AnimationId::DownParry => "downParry",
            AnimationId::Attack => "attack",
            AnimationId::Thrust => "thrust",
            AnimationId::DownAttack => "downAttack",
            AnimationId::Death => "death",
            AnimationId::Jump => "jump",
            AnimationId::Crouch => "crouch",
        }
    }
}

impl fmt::Display for AnimationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AnimationId {
    type Err = String;

    /// Case-insensitive, since INI keys come back lowercased.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        AnimationId::ALL
            .iter()
            .copied()
            .find(|id| id.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Unknown animation id '{}'", wanted))
    }
}

/// Why a request left the state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Only `idle` may be requested while crouched.
    Crouching,
    /// An action animation is still in flight.
    Locked { current: AnimationId },
    /// Same animation requested again and it is not restartable.
    AlreadyActive,
}

/// Result of [`AnimationState::request`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// A new animation started.
    Started,
    /// The current animation restarted from its first frame.
    Restarted,
    Rejected(RejectReason),
}

impl RequestOutcome {
    pub fn is_accepted(self) -> bool {
        !matches!(self, RequestOutcome::Rejected(_))
    }
}

/// A change of animation taken by [`AnimationState::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationTransition {
    pub from: AnimationId,
    pub to: AnimationId,
}

/// Per-character animation state.
///
/// Invariant: with the default policy, `locked` implies `current` is one of
/// `attack`, `jump`, `thrust` or `downAttack`.
#[derive(Debug, Clone, Component, PartialEq)]
pub struct AnimationState {
    /// Animation currently shown.
    pub current: AnimationId,
    /// Timestamp at which `current` started.
    pub start_ms: Millis,
    /// True while a non-interruptible action animation is in flight.
    pub locked: bool,
    /// Vertical offset of the jump arc, `>= 0`.
    pub jump_height: f32,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::new(0)
    }
}

impl AnimationState {
    /// Spawn state: idle, unlocked, on the ground.
    pub fn new(now: Millis) -> Self {
        Self {
            current: AnimationId::Idle,
            start_ms: now,
            locked: false,
            jump_height: 0.0,
        }
    }

    /// Time spent in the current animation. Clamped to zero if `now` went backwards.
    pub fn elapsed(&self, now: Millis) -> Millis {
        now.saturating_sub(self.start_ms)
    }

    /// Ask for animation `id`.
    ///
    /// Rules, in order:
    /// 1. While crouched only `idle` (stand up) is accepted.
    /// 2. While locked, any *different* animation is rejected: an action in
    ///    flight is not cut short by parries, crouching or standing.
    /// 3. Re-requesting the current animation is a no-op unless the policy
    ///    marks it restartable.
    /// 4. Otherwise the animation (re)starts at `now`, the jump arc resets and
    ///    the lock follows the policy.
    ///
    /// `is_walking_hint` turns a stand-up (`idle`) into `walk` when a
    /// direction is still held.
    pub fn request(
        &mut self,
        id: AnimationId,
        is_walking_hint: bool,
        now: Millis,
        policy: &AnimationPolicy,
    ) -> RequestOutcome {
        if self.current == AnimationId::Crouch && id != AnimationId::Idle {
            trace!("request {} rejected: crouching", id);
            return RequestOutcome::Rejected(RejectReason::Crouching);
        }

        let target = if id == AnimationId::Idle && is_walking_hint {
            AnimationId::Walk
        } else {
            id
        };

        if self.locked && target != self.current {
            trace!("request {} rejected: {} holds the lock", target, self.current);
            return RequestOutcome::Rejected(RejectReason::Locked {
                current: self.current,
            });
        }

        let restart = target == self.current;
        if restart && !policy.restarts(target) {
            return RequestOutcome::Rejected(RejectReason::AlreadyActive);
        }

        debug!(
            "animation {} -> {} at {}ms{}",
            self.current,
            target,
            now,
            if restart { " (restart)" } else { "" }
        );
        self.switch_to(target, now);
        self.locked = policy.locks(target);

        if restart {
            RequestOutcome::Restarted
        } else {
            RequestOutcome::Started
        }
    }

    /// Per-tick update.
    ///
    /// - A finished timed animation (anything but a looping one) reverts to
    ///   `walk` or `idle` and releases the lock.
    /// - When unlocked, walking starts `walk` (unless crouched) and stopping
    ///   returns `walk` to `idle`.
    /// - While jumping, `jump_height` follows `50 * sin(pi * progress)`.
    ///
    /// Returns the transition taken, if any.
    pub fn advance(
        &mut self,
        now: Millis,
        is_walking: bool,
        store: &AnimationStore,
        policy: &AnimationPolicy,
    ) -> Option<AnimationTransition> {
        let from = self.current;
        let rest = if is_walking {
            AnimationId::Walk
        } else {
            AnimationId::Idle
        };

        if !policy.loops(self.current) && store.is_complete(self.current, self.start_ms, now) {
            self.locked = false;
            self.switch_to(rest, now);
        } else if !self.locked {
            if is_walking && self.current != AnimationId::Walk && self.current != AnimationId::Crouch
            {
                self.switch_to(AnimationId::Walk, now);
            } else if !is_walking && self.current == AnimationId::Walk {
                self.switch_to(AnimationId::Idle, now);
            }
        }

        if self.current == AnimationId::Jump {
            let duration = store.spec(AnimationId::Jump).duration_ms;
            self.jump_height = jump_height(self.elapsed(now), duration);
        } else {
            self.jump_height = 0.0;
        }

        if self.current != from {
            debug!("animation {} -> {} at {}ms (auto)", from, self.current, now);
            Some(AnimationTransition {
                from,
                to: self.current,
            })
        } else {
            None
        }
    }

    /// Absolute sprite-sheet column to draw at `now`.
    pub fn frame(&self, now: Millis, store: &AnimationStore) -> u32 {
        store.current_frame(self.current, self.start_ms, now)
    }

    fn switch_to(&mut self, id: AnimationId, now: Millis) {
        self.current = id;
        self.start_ms = now;
        self.jump_height = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-3;

    fn setup() -> (AnimationState, AnimationStore, AnimationPolicy) {
        (
            AnimationState::new(0),
            AnimationStore::builtin(),
            AnimationPolicy::default(),
        )
    }

    #[test]
    fn test_spawn_is_idle_unlocked() {
        let state = AnimationState::new(0);
        assert_eq!(state.current, AnimationId::Idle);
        assert!(!state.locked);
        assert_eq!(state.jump_height, 0.0);
    }

    #[test]
    fn test_parse_names_case_insensitive() {
        assert_eq!("downAttack".parse::<AnimationId>(), Ok(AnimationId::DownAttack));
        assert_eq!("downattack".parse::<AnimationId>(), Ok(AnimationId::DownAttack));
        assert_eq!(" Jump ".parse::<AnimationId>(), Ok(AnimationId::Jump));
        assert!("fly".parse::<AnimationId>().is_err());
    }

    #[test]
    fn test_all_matches_index() {
        for (i, id) in AnimationId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i);
            assert_eq!(id.name().parse::<AnimationId>(), Ok(*id));
        }
    }

    #[test]
    fn test_attack_locks() {
        let (mut state, _, policy) = setup();
        let outcome = state.request(AnimationId::Attack, false, 100, &policy);
        assert_eq!(outcome, RequestOutcome::Started);
        assert_eq!(state.current, AnimationId::Attack);
        assert_eq!(state.start_ms, 100);
        assert!(state.locked);
    }

    #[test]
    fn test_parry_does_not_lock() {
        let (mut state, _, policy) = setup();
        state.request(AnimationId::UpParry, false, 10, &policy);
        assert_eq!(state.current, AnimationId::UpParry);
        assert!(!state.locked);
    }

    #[test]
    fn test_attack_rejected_while_jumping() {
        let (mut state, _, policy) = setup();
        state.request(AnimationId::Jump, false, 0, &policy);
        let before = state.clone();
        let outcome = state.request(AnimationId::Attack, false, 100, &policy);
        assert_eq!(
            outcome,
            RequestOutcome::Rejected(RejectReason::Locked {
                current: AnimationId::Jump
            })
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_jump_not_cut_short_by_crouch_parry_or_idle() {
        let (mut state, store, policy) = setup();
        state.request(AnimationId::Jump, false, 0, &policy);
        state.advance(250, false, &store, &policy);
        let before = state.clone();
        assert!((before.jump_height - 50.0).abs() < EPSILON);

        for id in [
            AnimationId::Crouch,
            AnimationId::MiddleParry,
            AnimationId::UpParry,
            AnimationId::Idle,
        ] {
            let outcome = state.request(id, false, 250, &policy);
            assert_eq!(
                outcome,
                RequestOutcome::Rejected(RejectReason::Locked {
                    current: AnimationId::Jump
                })
            );
            assert_eq!(state, before);
        }

        // A held direction does not turn the idle request into a walk either
        let outcome = state.request(AnimationId::Idle, true, 250, &policy);
        assert!(matches!(outcome, RequestOutcome::Rejected(RejectReason::Locked { .. })));
        assert_eq!(state, before);
    }

    #[test]
    fn test_attack_not_cut_short_by_parry_or_crouch() {
        let (mut state, store, policy) = setup();
        state.request(AnimationId::Attack, false, 0, &policy);

        for (id, t) in [(AnimationId::MiddleParry, 100), (AnimationId::Crouch, 150)] {
            let outcome = state.request(id, false, t, &policy);
            assert_eq!(
                outcome,
                RequestOutcome::Rejected(RejectReason::Locked {
                    current: AnimationId::Attack
                })
            );
            assert_eq!(state.current, AnimationId::Attack);
            assert_eq!(state.start_ms, 0);
            assert!(state.locked);
        }

        // Once the swing is over the parry goes through
        state.advance(300, false, &store, &policy);
        let outcome = state.request(AnimationId::MiddleParry, false, 310, &policy);
        assert_eq!(outcome, RequestOutcome::Started);
        assert_eq!(state.current, AnimationId::MiddleParry);
    }

    #[test]
    fn test_jump_restarts_itself() {
        let (mut state, store, policy) = setup();
        state.request(AnimationId::Jump, false, 0, &policy);
        state.advance(200, false, &store, &policy);
        assert!(state.jump_height > 0.0);

        let outcome = state.request(AnimationId::Jump, false, 200, &policy);
        assert_eq!(outcome, RequestOutcome::Restarted);
        assert_eq!(state.start_ms, 200);
        assert_eq!(state.jump_height, 0.0);
        assert!(state.locked);
    }

    #[test]
    fn test_non_restartable_same_request_is_noop() {
        let (mut state, _, policy) = setup();
        state.request(AnimationId::Thrust, false, 0, &policy);
        let outcome = state.request(AnimationId::Thrust, false, 50, &policy);
        assert_eq!(outcome, RequestOutcome::Rejected(RejectReason::AlreadyActive));
        assert_eq!(state.start_ms, 0);

        let (mut state, _, policy) = setup();
        let outcome = state.request(AnimationId::Idle, false, 50, &policy);
        assert_eq!(outcome, RequestOutcome::Rejected(RejectReason::AlreadyActive));
    }

    #[test]
    fn test_restart_set_is_configurable() {
        let (mut state, _, _) = setup();
        let policy = AnimationPolicy::default().with_restartable(&[AnimationId::Jump]);
        state.request(AnimationId::Attack, false, 0, &policy);
        let outcome = state.request(AnimationId::Attack, false, 50, &policy);
        assert_eq!(outcome, RequestOutcome::Rejected(RejectReason::AlreadyActive));
        assert_eq!(state.start_ms, 0);
    }

    #[test]
    fn test_crouch_only_accepts_idle() {
        let (mut state, _, policy) = setup();
        state.request(AnimationId::Crouch, false, 0, &policy);
        for id in [
            AnimationId::Attack,
            AnimationId::Jump,
            AnimationId::MiddleParry,
            AnimationId::Walk,
            AnimationId::Crouch,
        ] {
            let outcome = state.request(id, false, 10, &policy);
            assert_eq!(outcome, RequestOutcome::Rejected(RejectReason::Crouching));
            assert_eq!(state.current, AnimationId::Crouch);
        }
        assert!(state.request(AnimationId::Idle, false, 20, &policy).is_accepted());
        assert_eq!(state.current, AnimationId::Idle);
    }

    #[test]
    fn test_stand_up_while_walking_goes_to_walk() {
        let (mut state, _, policy) = setup();
        state.request(AnimationId::Crouch, false, 0, &policy);
        state.request(AnimationId::Idle, true, 10, &policy);
        assert_eq!(state.current, AnimationId::Walk);
        assert!(!state.locked);
    }

    #[test]
    fn test_lock_expires_to_idle() {
        let (mut state, store, policy) = setup();
        state.request(AnimationId::Attack, false, 0, &policy);
        assert_eq!(state.advance(299, false, &store, &policy), None);
        assert!(state.locked);

        let t = state.advance(300, false, &store, &policy);
        assert_eq!(
            t,
            Some(AnimationTransition {
                from: AnimationId::Attack,
                to: AnimationId::Idle
            })
        );
        assert!(!state.locked);
        assert_eq!(state.start_ms, 300);
    }

    #[test]
    fn test_lock_expires_to_walk_when_walking() {
        let (mut state, store, policy) = setup();
        state.request(AnimationId::Thrust, false, 0, &policy);
        state.advance(100, true, &store, &policy);
        assert_eq!(state.current, AnimationId::Thrust);
        state.advance(400, true, &store, &policy);
        assert_eq!(state.current, AnimationId::Walk);
    }

    #[test]
    fn test_parry_reverts_after_duration() {
        let (mut state, store, policy) = setup();
        state.request(AnimationId::DownParry, false, 0, &policy);
        state.advance(399, false, &store, &policy);
        assert_eq!(state.current, AnimationId::DownParry);
        state.advance(400, false, &store, &policy);
        assert_eq!(state.current, AnimationId::Idle);
    }

    #[test]
    fn test_static_poses_persist() {
        let (mut state, store, policy) = setup();
        state.request(AnimationId::Death, false, 0, &policy);
        state.advance(1_000_000, false, &store, &policy);
        assert_eq!(state.current, AnimationId::Death);

        let (mut state, store, policy) = setup();
        state.request(AnimationId::Crouch, false, 0, &policy);
        state.advance(1_000_000, true, &store, &policy);
        assert_eq!(state.current, AnimationId::Crouch);
    }

    #[test]
    fn test_walking_drives_walk_and_idle() {
        let (mut state, store, policy) = setup();
        state.advance(10, true, &store, &policy);
        assert_eq!(state.current, AnimationId::Walk);
        assert_eq!(state.start_ms, 10);

        // Looping walk never expires.
        state.advance(5_000, true, &store, &policy);
        assert_eq!(state.current, AnimationId::Walk);
        assert_eq!(state.start_ms, 10);

        state.advance(5_010, false, &store, &policy);
        assert_eq!(state.current, AnimationId::Idle);
    }

    #[test]
    fn test_walking_does_not_break_lock() {
        let (mut state, store, policy) = setup();
        state.request(AnimationId::Jump, false, 0, &policy);
        state.advance(100, true, &store, &policy);
        assert_eq!(state.current, AnimationId::Jump);
        assert!(state.locked);
    }

    #[test]
    fn test_jump_arc() {
        let (mut state, store, policy) = setup();
        state.request(AnimationId::Jump, false, 0, &policy);

        state.advance(0, false, &store, &policy);
        assert!(state.jump_height.abs() < EPSILON);

        state.advance(250, false, &store, &policy);
        assert!((state.jump_height - 50.0).abs() < EPSILON);

        state.advance(500, false, &store, &policy);
        assert_eq!(state.current, AnimationId::Idle);
        assert_eq!(state.jump_height, 0.0);
    }

    #[test]
    fn test_backwards_time_clamps_to_zero() {
        let (mut state, store, policy) = setup();
        state.request(AnimationId::Jump, false, 1_000, &policy);
        state.advance(900, false, &store, &policy);
        assert_eq!(state.elapsed(900), 0);
        assert_eq!(state.current, AnimationId::Jump);
        assert!(state.jump_height.abs() < EPSILON);
    }

    #[test]
    fn test_locked_implies_action() {
        let (mut state, store, policy) = setup();
        let script = [
            (AnimationId::Attack, 0),
            (AnimationId::MiddleParry, 50),
            (AnimationId::Jump, 100),
            (AnimationId::Thrust, 150),
            (AnimationId::Crouch, 700),
            (AnimationId::DownAttack, 750),
            (AnimationId::Idle, 800),
            (AnimationId::DownAttack, 850),
        ];
        for (id, t) in script {
            state.request(id, false, t, &policy);
            state.advance(t + 10, false, &store, &policy);
            if state.locked {
                assert!(policy.locks(state.current));
            }
        }
    }
}
