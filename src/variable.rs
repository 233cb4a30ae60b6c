//! A mutable value cell with synchronous change notification.
//!
//! [`Variable`] is the only way state leaves the coordinators: every write
//! calls each subscriber in the order it subscribed, on the writer's thread,
//! before `set` returns.  There is no locking, so a `Variable` must stay on
//! the thread that owns the [`Shell`](crate::shell::Shell).

use std::fmt;

/// Handle returned by [`Variable::subscribe`], used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback<T> = Box<dyn FnMut(&T)>;

/// A value plus an ordered list of subscribers notified on every write.
pub struct Variable<T> {
    value: T,
    subscribers: Vec<(SubscriptionId, Callback<T>)>,
    next_id: u64,
}

impl<T> Variable<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replace the value and notify subscribers.
    ///
    /// Subscribers are notified even when the new value equals the old one.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.notify();
    }

    /// Mutate the value in place and notify subscribers once.
    pub fn update(&mut self, f: impl FnOnce(&mut T)) {
        f(&mut self.value);
        self.notify();
    }

    /// Register `f` to be called with the new value after every write.
    pub fn subscribe(&mut self, f: impl FnMut(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(f)));
        id
    }

    /// Remove a subscriber.  Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn notify(&mut self) {
        for (_, f) in &mut self.subscribers {
            f(&self.value);
        }
    }
}

impl<T: Copy> Variable<T> {
    /// Copy out the current value.
    pub fn value(&self) -> T {
        self.value
    }
}

impl<T: Default> Default for Variable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Variable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variable")
            .field("value", &self.value)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn set_notifies_in_subscription_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut v = Variable::new(0);

        let l1 = log.clone();
        v.subscribe(move |x| l1.borrow_mut().push(("first", *x)));
        let l2 = log.clone();
        v.subscribe(move |x| l2.borrow_mut().push(("second", *x)));

        v.set(7);
        assert_eq!(*log.borrow(), vec![("first", 7), ("second", 7)]);
        assert_eq!(v.value(), 7);
    }

    #[test]
    fn writing_same_value_still_notifies() {
        let hits = Rc::new(RefCell::new(0));
        let mut v = Variable::new(true);
        let h = hits.clone();
        v.subscribe(move |_| *h.borrow_mut() += 1);

        v.set(true);
        v.set(true);
        assert_eq!(*hits.borrow(), 2);
    }

    #[test]
    fn update_mutates_in_place_and_notifies_once() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut v = Variable::new(vec![1, 2]);
        let s = seen.clone();
        v.subscribe(move |xs: &Vec<i32>| s.borrow_mut().push(xs.clone()));

        v.update(|xs| {
            xs.push(3);
            xs[0] = 9;
        });
        assert_eq!(*seen.borrow(), vec![vec![9, 2, 3]]);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let hits = Rc::new(RefCell::new(0));
        let mut v = Variable::new(0u8);
        let h = hits.clone();
        let id = v.subscribe(move |_| *h.borrow_mut() += 1);

        v.set(1);
        assert!(v.unsubscribe(id));
        assert!(!v.unsubscribe(id));
        v.set(2);

        assert_eq!(*hits.borrow(), 1);
        assert_eq!(v.subscriber_count(), 0);
    }

    #[test]
    fn no_subscribers_is_fine() {
        let mut v = Variable::<bool>::default();
        v.set(true);
        assert!(v.value());
    }
}
