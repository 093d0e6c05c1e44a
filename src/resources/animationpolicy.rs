//! Interruption policy for the animation state machine.
//!
//! Which animations hold the action lock, which may restart themselves when
//! requested again, and which loop instead of completing. Kept as data so the
//! restart rule can be tuned from the config file.

use bevy_ecs::prelude::Resource;
use smallvec::{SmallVec, smallvec};

use crate::components::animation::AnimationId;

type IdSet = SmallVec<[AnimationId; 4]>;

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct AnimationPolicy {
    /// Action animations that cannot be pre-empted by a different action.
    pub locking: IdSet,
    /// Animations that restart from frame 0 when requested while active.
    pub restartable: IdSet,
    /// Animations that cycle forever and never auto-revert.
    pub looping: IdSet,
}

impl Default for AnimationPolicy {
    fn default() -> Self {
        Self {
            locking: smallvec![
                AnimationId::Attack,
                AnimationId::Jump,
                AnimationId::Thrust,
                AnimationId::DownAttack
            ],
            restartable: smallvec![AnimationId::Attack, AnimationId::Jump],
            looping: smallvec![AnimationId::Walk],
        }
    }
}

impl AnimationPolicy {
    pub fn with_restartable(mut self, ids: &[AnimationId]) -> Self {
        self.restartable = ids.iter().copied().collect();
        self
    }

    pub fn locks(&self, id: AnimationId) -> bool {
        self.locking.contains(&id)
    }

    pub fn restarts(&self, id: AnimationId) -> bool {
        self.restartable.contains(&id)
    }

    pub fn loops(&self, id: AnimationId) -> bool {
        self.looping.contains(&id)
    }
}
