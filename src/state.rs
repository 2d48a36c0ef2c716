//! Observable product list state.
//!
//! [`ProductListState`] is the single cell the fetch collaborator writes to and
//! the rendering layer reads from. Every write replaces the whole
//! [`ProductUiState`] snapshot and is delivered to subscribers in the order it
//! was published.
//!
//! The holder is built on `Rc<RefCell<..>>` and is therefore `!Send`: updates
//! can only be published from the thread that owns it, which is the UI thread.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::models::Product;

/// Immutable snapshot of the product fetch status.
///
/// Built only through [`ProductUiState::loading`], [`ProductUiState::ready`]
/// and [`ProductUiState::failed`], so `is_loading` and `error` are never set
/// together.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUiState {
    is_loading: bool,
    error: Option<String>,
    products: Vec<Product>,
}

/// Borrowed view of a snapshot, for exhaustive matching in renderers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProductPhase<'a> {
    Loading,
    Failed(&'a str),
    Ready(&'a [Product]),
}

impl ProductUiState {
    /// A fetch is in flight. Carries no products.
    pub fn loading() -> Self {
        Self {
            is_loading: true,
            error: None,
            products: Vec::new(),
        }
    }

    pub fn ready(products: Vec<Product>) -> Self {
        Self {
            is_loading: false,
            error: None,
            products,
        }
    }

    /// The fetch failed. The product list is cleared.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            is_loading: false,
            error: Some(message.into()),
            products: Vec::new(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn phase(&self) -> ProductPhase<'_> {
        if self.is_loading {
            ProductPhase::Loading
        } else if let Some(ref error) = self.error {
            ProductPhase::Failed(error)
        } else {
            ProductPhase::Ready(&self.products)
        }
    }
}

impl Default for ProductUiState {
    fn default() -> Self {
        Self::loading()
    }
}

type Callback = Rc<dyn Fn(&ProductUiState)>;

struct Shared {
    snapshot: ProductUiState,
    subscribers: Vec<(u64, Callback)>,
    next_id: u64,
    pending: VecDeque<ProductUiState>,
    delivering: bool,
}

impl Shared {
    fn is_subscribed(&self, id: u64) -> bool {
        self.subscribers.iter().any(|(sub_id, _)| *sub_id == id)
    }
}

/// Holder of the latest [`ProductUiState`] with change notification.
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use rayna_store::ProductListState;
///
/// let state = ProductListState::new();
/// let seen = Rc::new(Cell::new(0));
/// let counter = Rc::clone(&seen);
/// let _sub = state.subscribe(move |_| counter.set(counter.get() + 1));
///
/// state.set_ready(Vec::new());
/// assert_eq!(seen.get(), 1);
/// assert!(!state.current().is_loading());
/// ```
pub struct ProductListState {
    shared: Rc<RefCell<Shared>>,
}

impl ProductListState {
    /// Start in the `Loading` phase with no subscribers.
    pub fn new() -> Self {
        Self {
            shared: Rc::new(RefCell::new(Shared {
                snapshot: ProductUiState::loading(),
                subscribers: Vec::new(),
                next_id: 0,
                pending: VecDeque::new(),
                delivering: false,
            })),
        }
    }

    /// Latest delivered snapshot.
    pub fn current(&self) -> ProductUiState {
        self.shared.borrow().snapshot.clone()
    }

    /// Register `on_change` for every subsequent transition.
    ///
    /// Delivery stops when the returned [`Subscription`] is dropped or
    /// explicitly unsubscribed.
    pub fn subscribe<F>(&self, on_change: F) -> Subscription
    where
        F: Fn(&ProductUiState) + 'static,
    {
        let mut shared = self.shared.borrow_mut();
        let id = shared.next_id;
        shared.next_id += 1;
        shared.subscribers.push((id, Rc::new(on_change)));
        tracing::debug!(subscription = id, "product state subscriber added");
        Subscription {
            id,
            shared: Rc::downgrade(&self.shared),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.shared.borrow().subscribers.len()
    }

    /// Replace the snapshot and notify subscribers.
    ///
    /// A publish made from inside a subscriber callback is queued and
    /// delivered once the current round has reached every subscriber.
    pub fn publish(&self, next: ProductUiState) {
        {
            let mut shared = self.shared.borrow_mut();
            shared.pending.push_back(next);
            if shared.delivering {
                return;
            }
            shared.delivering = true;
        }
        let _delivery = Delivery(&self.shared);

        loop {
            let (snapshot, callbacks) = {
                let mut shared = self.shared.borrow_mut();
                let Some(next) = shared.pending.pop_front() else {
                    break;
                };
                shared.snapshot = next.clone();
                (next, shared.subscribers.clone())
            };

            tracing::debug!(
                phase = %PhaseLabel(snapshot.phase()),
                products = snapshot.products().len(),
                subscribers = callbacks.len(),
                "product state transition"
            );

            for (id, callback) in callbacks {
                // A subscriber may have been dropped by an earlier callback in this round.
                if self.shared.borrow().is_subscribed(id) {
                    callback(&snapshot);
                }
            }
        }
    }

    pub fn set_loading(&self) {
        self.publish(ProductUiState::loading());
    }

    pub fn set_ready(&self, products: Vec<Product>) {
        self.publish(ProductUiState::ready(products));
    }

    pub fn set_failed(&self, message: impl Into<String>) {
        self.publish(ProductUiState::failed(message));
    }
}

impl Default for ProductListState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ProductListState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shared = self.shared.borrow();
        f.debug_struct("ProductListState")
            .field("snapshot", &shared.snapshot)
            .field("subscribers", &shared.subscribers.len())
            .finish()
    }
}

/// Ends a delivery round, including when a callback panics. Updates still
/// queued behind a panicking round are discarded.
struct Delivery<'a>(&'a RefCell<Shared>);

impl Drop for Delivery<'_> {
    fn drop(&mut self) {
        if let Ok(mut shared) = self.0.try_borrow_mut() {
            shared.delivering = false;
            shared.pending.clear();
        }
    }
}

struct PhaseLabel<'a>(ProductPhase<'a>);

impl fmt::Display for PhaseLabel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            ProductPhase::Loading => f.write_str("loading"),
            ProductPhase::Failed(_) => f.write_str("failed"),
            ProductPhase::Ready(_) => f.write_str("ready"),
        }
    }
}

/// Handle returned by [`ProductListState::subscribe`].
///
/// Dropping it unsubscribes. Notifications already delivered are not affected.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    shared: Weak<RefCell<Shared>>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.upgrade() {
            let removed = {
                let mut shared = shared.borrow_mut();
                let position = shared.subscribers.iter().position(|(id, _)| *id == self.id);
                position.map(|index| shared.subscribers.remove(index))
            };
            // The callback may own other subscriptions; release it unborrowed.
            drop(removed);
            tracing::debug!(subscription = self.id, "product state subscriber removed");
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::panic::{catch_unwind, AssertUnwindSafe};

    fn product(name: &str) -> Product {
        Product {
            name: name.to_string(),
            description: String::new(),
            price: 1.0,
            picture_url: String::new(),
        }
    }

    fn recorder(state: &ProductListState) -> (Rc<RefCell<Vec<ProductUiState>>>, Subscription) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let sub = state.subscribe(move |s| sink.borrow_mut().push(s.clone()));
        (log, sub)
    }

    #[test]
    fn starts_loading() {
        let state = ProductListState::new();
        let snapshot = state.current();
        assert!(snapshot.is_loading());
        assert_eq!(snapshot.error(), None);
        assert!(snapshot.products().is_empty());
        assert_eq!(snapshot.phase(), ProductPhase::Loading);
    }

    #[test]
    fn ready_replaces_snapshot() {
        let state = ProductListState::new();
        state.set_ready(vec![product("p1"), product("p2")]);

        let snapshot = state.current();
        assert!(!snapshot.is_loading());
        assert_eq!(snapshot.products(), &[product("p1"), product("p2")]);
    }

    #[test]
    fn failed_carries_message_and_clears_products() {
        let state = ProductListState::new();
        state.set_ready(vec![product("p1")]);
        state.set_failed("network error");

        let snapshot = state.current();
        assert_eq!(snapshot.error(), Some("network error"));
        assert!(!snapshot.is_loading());
        assert!(snapshot.products().is_empty());
        assert_eq!(snapshot.phase(), ProductPhase::Failed("network error"));
    }

    #[test]
    fn subscribers_receive_transitions_in_order() {
        let state = ProductListState::new();
        let (log, _sub) = recorder(&state);

        state.set_loading();
        state.set_ready(vec![product("a")]);
        state.set_failed("boom");

        let log = log.borrow();
        assert_eq!(log.len(), 3);
        assert!(log[0].is_loading());
        assert_eq!(log[1].products(), &[product("a")]);
        assert_eq!(log[2].error(), Some("boom"));
    }

    #[test]
    fn subscribing_does_not_replay_current_state() {
        let state = ProductListState::new();
        state.set_ready(vec![product("a")]);
        let (log, _sub) = recorder(&state);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn unsubscribe_stops_delivery_but_keeps_history() {
        let state = ProductListState::new();
        let (log, sub) = recorder(&state);

        state.set_ready(vec![]);
        sub.unsubscribe();
        state.set_failed("later");

        assert_eq!(log.borrow().len(), 1);
        assert_eq!(state.subscriber_count(), 0);
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let state = ProductListState::new();
        let count = Rc::new(Cell::new(0));
        {
            let counter = Rc::clone(&count);
            let _sub = state.subscribe(move |_| counter.set(counter.get() + 1));
            state.set_loading();
        }
        state.set_loading();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn callback_can_read_current_snapshot() {
        let state = Rc::new(ProductListState::new());
        let seen = Rc::new(RefCell::new(None));
        let reader = Rc::downgrade(&state);
        let sink = Rc::clone(&seen);
        let _sub = state.subscribe(move |_| {
            if let Some(state) = reader.upgrade() {
                *sink.borrow_mut() = Some(state.current());
            }
        });

        state.set_ready(vec![product("x")]);
        let seen = seen.borrow();
        assert_eq!(seen.as_ref().unwrap().products(), &[product("x")]);
    }

    #[test]
    fn publish_from_callback_is_delivered_after_current_round() {
        let state = Rc::new(ProductListState::new());
        let order = Rc::new(RefCell::new(Vec::new()));

        let writer = Rc::downgrade(&state);
        let first_log = Rc::clone(&order);
        let _first = state.subscribe(move |s| {
            first_log.borrow_mut().push(("first", s.is_loading()));
            if s.is_loading() {
                if let Some(state) = writer.upgrade() {
                    state.set_ready(vec![]);
                }
            }
        });
        let second_log = Rc::clone(&order);
        let _second = state.subscribe(move |s| {
            second_log.borrow_mut().push(("second", s.is_loading()));
        });

        state.set_loading();

        assert_eq!(
            *order.borrow(),
            vec![
                ("first", true),
                ("second", true),
                ("first", false),
                ("second", false),
            ]
        );
        assert!(!state.current().is_loading());
    }

    #[test]
    fn subscriber_dropped_mid_round_is_skipped() {
        let state = ProductListState::new();
        let victim_calls = Rc::new(Cell::new(0));
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let killer_slot = Rc::clone(&slot);
        let _killer = state.subscribe(move |_| {
            killer_slot.borrow_mut().take();
        });
        let counter = Rc::clone(&victim_calls);
        *slot.borrow_mut() = Some(state.subscribe(move |_| counter.set(counter.get() + 1)));

        state.set_loading();
        assert_eq!(victim_calls.get(), 0);
        assert_eq!(state.subscriber_count(), 1);
    }

    #[test]
    fn subscriber_added_mid_round_starts_with_next_transition() {
        let state = Rc::new(ProductListState::new());
        let late_log = Rc::new(RefCell::new(Vec::new()));
        let late_sub: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let owner = Rc::downgrade(&state);
        let sink = Rc::clone(&late_log);
        let slot = Rc::clone(&late_sub);
        let _early = state.subscribe(move |_| {
            if slot.borrow().is_some() {
                return;
            }
            if let Some(state) = owner.upgrade() {
                let sink = Rc::clone(&sink);
                let sub = state.subscribe(move |s| sink.borrow_mut().push(s.clone()));
                *slot.borrow_mut() = Some(sub);
            }
        });

        state.set_loading();
        assert!(late_log.borrow().is_empty());
        assert_eq!(state.subscriber_count(), 2);

        state.set_ready(vec![product("a")]);
        let log = late_log.borrow();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].products(), &[product("a")]);
    }

    #[test]
    fn callback_can_drop_its_own_subscription() {
        let state = ProductListState::new();
        let calls = Rc::new(Cell::new(0));
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let own = Rc::clone(&slot);
        let counter = Rc::clone(&calls);
        *slot.borrow_mut() = Some(state.subscribe(move |_| {
            counter.set(counter.get() + 1);
            own.borrow_mut().take();
        }));
        let (log, _other) = recorder(&state);

        state.set_loading();
        state.set_ready(vec![]);

        assert_eq!(calls.get(), 1);
        assert_eq!(log.borrow().len(), 2);
        assert_eq!(state.subscriber_count(), 1);
    }

    #[test]
    fn dropping_subscription_that_owns_another_releases_both() {
        let state = ProductListState::new();
        let inner = state.subscribe(|_| {});
        let outer = state.subscribe(move |_| {
            let _keep = &inner;
        });
        assert_eq!(state.subscriber_count(), 2);

        drop(outer);
        assert_eq!(state.subscriber_count(), 0);
    }

    #[test]
    fn panicking_subscriber_does_not_block_later_publishes() {
        let state = ProductListState::new();
        let failing = state.subscribe(|s| {
            if s.is_loading() {
                panic!("subscriber failed");
            }
        });
        let (log, _sub) = recorder(&state);

        let result = catch_unwind(AssertUnwindSafe(|| state.set_loading()));
        assert!(result.is_err());
        drop(failing);

        state.set_ready(vec![product("a")]);
        assert_eq!(state.current().products(), &[product("a")]);
        let log = log.borrow();
        assert_eq!(log.last().map(|s| s.products().len()), Some(1));
    }
}
