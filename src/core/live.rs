//! Push-based live values
//!
//! A [`Publisher`] fans each new value out to every open [`Subscription`].
//! A subscription starts out holding the value that was current when it was
//! created, so late subscribers never observe an empty gap. Dropping the
//! subscription tears it down; the publisher prunes it on the next publish.

use std::sync::{Mutex, MutexGuard};

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};

/// Fan-out side of a live value
#[derive(Debug)]
pub struct Publisher<T> {
    senders: Mutex<Vec<Sender<T>>>,
}

impl<T: Clone> Publisher<T> {
    pub fn new() -> Self {
        Self {
            senders: Mutex::new(Vec::new()),
        }
    }

    /// Open a subscription seeded with `current`
    pub fn subscribe(&self, current: T) -> Subscription<T> {
        let (tx, rx) = unbounded();
        self.lock().push(tx);
        Subscription {
            rx,
            latest: current,
        }
    }

    /// Deliver `value` to every live subscriber, dropping the disconnected ones
    pub fn publish(&self, value: T) {
        let mut senders = self.lock();
        let before = senders.len();
        senders.retain(|tx| tx.send(value.clone()).is_ok());
        let pruned = before - senders.len();
        if pruned > 0 {
            tracing::debug!(pruned, remaining = senders.len(), "dropped closed subscriptions");
        }
    }

    /// True when at least one subscriber may still be listening
    pub fn has_subscribers(&self) -> bool {
        !self.lock().is_empty()
    }

    /// Number of registered subscribers (closed ones are counted until the next publish)
    pub fn subscriber_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Sender<T>>> {
        // The sender list is never left half-written, so a poisoned lock is still usable
        self.senders.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<T: Clone> Default for Publisher<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving side of a live value
#[derive(Debug)]
pub struct Subscription<T> {
    rx: Receiver<T>,
    latest: T,
}

impl<T> Subscription<T> {
    /// Drain pending emissions, keeping the newest
    ///
    /// Returns true if at least one new value arrived.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        loop {
            match self.rx.try_recv() {
                Ok(value) => {
                    self.latest = value;
                    changed = true;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        changed
    }

    /// The newest value, after draining anything pending
    pub fn latest(&mut self) -> &T {
        self.poll();
        &self.latest
    }

    /// The newest value already received, without draining
    pub fn current(&self) -> &T {
        &self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscription_starts_with_current_value() {
        let publisher = Publisher::new();
        let mut sub = publisher.subscribe(7);
        assert_eq!(*sub.current(), 7);
        assert!(!sub.poll());
        assert_eq!(*sub.latest(), 7);
    }

    #[test]
    fn test_publish_reaches_every_subscriber() {
        let publisher = Publisher::new();
        let mut a = publisher.subscribe(0);
        let mut b = publisher.subscribe(0);

        publisher.publish(1);
        publisher.publish(2);

        assert_eq!(*a.latest(), 2);
        assert_eq!(*b.latest(), 2);
    }

    #[test]
    fn test_late_subscriber_gets_replay_not_history() {
        let publisher = Publisher::new();
        publisher.publish(1);
        let mut late = publisher.subscribe(5);
        assert!(!late.poll());
        assert_eq!(*late.current(), 5);
    }

    #[test]
    fn test_dropped_subscription_is_pruned() {
        let publisher = Publisher::new();
        let keep = publisher.subscribe(0);
        let gone = publisher.subscribe(0);
        assert_eq!(publisher.subscriber_count(), 2);

        drop(gone);
        publisher.publish(1);

        assert_eq!(publisher.subscriber_count(), 1);
        assert!(publisher.has_subscribers());
        drop(keep);
        publisher.publish(2);
        assert!(!publisher.has_subscribers());
    }
}
