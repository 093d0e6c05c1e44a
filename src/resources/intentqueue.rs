//! Queue between input producers and the tick.
//!
//! Producers hold an [`IntentSender`] (cheap to clone, `Send`) and push
//! [`InputMessage`]s whenever their events fire. The
//! [`translate_input`](crate::systems::input::translate_input) system drains
//! the queue once at the start of every tick.

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};

use crate::events::input::InputMessage;

#[derive(Resource)]
pub struct IntentQueue {
    tx: Sender<InputMessage>,
    rx: Receiver<InputMessage>,
}

impl Default for IntentQueue {
    fn default() -> Self {
        let (tx, rx) = unbounded::<InputMessage>();
        Self { tx, rx }
    }
}

impl IntentQueue {
    pub fn sender(&self) -> IntentSender {
        IntentSender(self.tx.clone())
    }

    /// Non-blocking iterator over everything queued so far.
    pub fn drain(&self) -> impl Iterator<Item = InputMessage> + '_ {
        self.rx.try_iter()
    }

    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

/// Producer handle for the [`IntentQueue`].
#[derive(Clone, Debug)]
pub struct IntentSender(Sender<InputMessage>);

impl IntentSender {
    /// Queue a message. Returns false once the queue has been dropped.
    pub fn send(&self, msg: InputMessage) -> bool {
        self.0.send(msg).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::animation::AnimationId;

    #[test]
    fn test_messages_drain_in_order() {
        let queue = IntentQueue::default();
        let tx = queue.sender();
        tx.send(InputMessage::Request(AnimationId::Jump));
        tx.send(InputMessage::Directional {
            left: true,
            right: false,
        });
        assert_eq!(queue.len(), 2);
        let drained: Vec<InputMessage> = queue.drain().collect();
        assert_eq!(drained[0], InputMessage::Request(AnimationId::Jump));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_sender_works_from_another_thread() {
        let queue = IntentQueue::default();
        let tx = queue.sender();
        let handle = std::thread::spawn(move || {
            for _ in 0..10 {
                tx.send(InputMessage::Request(AnimationId::Attack));
            }
        });
        handle.join().unwrap();
        assert_eq!(queue.drain().count(), 10);
    }

    #[test]
    fn test_send_fails_after_drop() {
        let queue = IntentQueue::default();
        let tx = queue.sender();
        drop(queue);
        assert!(!tx.send(InputMessage::Request(AnimationId::Idle)));
    }
}
