//! Room transition notifications
//!
//! Following Game Engine Architecture Ch 16.8 (registration, only interested
//! handlers are notified), but delivery is strictly immediate: `publish`
//! returns only after every subscriber ran, in subscription order. There is
//! no deferred queue and no consumption; every subscriber sees every event
//! of the kind it registered for.

/// Event type identification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoomEventKind {
    /// The camera started moving to another room
    TransitionEnter,
    /// The camera arrived in the new room
    TransitionExit,
}

/// Room transition notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomEvent {
    /// Transition started
    TransitionEnter {
        /// Room the camera is leaving (`None` = outside every room)
        from: Option<usize>,
        /// Room the camera is heading to
        to: Option<usize>,
    },
    /// Transition finished
    TransitionExit {
        /// Room the camera is now in
        room: Option<usize>,
    },
}

impl RoomEvent {
    /// Kind of this event
    pub fn kind(&self) -> RoomEventKind {
        match self {
            Self::TransitionEnter { .. } => RoomEventKind::TransitionEnter,
            Self::TransitionExit { .. } => RoomEventKind::TransitionExit,
        }
    }
}

/// Event handler trait
pub trait EventHandler {
    /// Handle an event
    fn on_event(&mut self, event: &RoomEvent);
}

impl<F: FnMut(&RoomEvent)> EventHandler for F {
    fn on_event(&mut self, event: &RoomEvent) {
        self(event);
    }
}

/// Handle returned by [`EventBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscription {
    id: SubscriptionId,
    kinds: Vec<RoomEventKind>,
    handler: Box<dyn EventHandler>,
}

/// Observer list with synchronous, in-order delivery
#[derive(Default)]
pub struct EventBus {
    subscriptions: Vec<Subscription>,
    next_id: u64,
}

impl EventBus {
    /// Create an empty bus
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for the given event kinds
    pub fn subscribe(&mut self, kinds: &[RoomEventKind], handler: Box<dyn EventHandler>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription {
            id,
            kinds: kinds.to_vec(),
            handler,
        });
        id
    }

    /// Register a handler for both transition kinds
    pub fn subscribe_all(&mut self, handler: Box<dyn EventHandler>) -> SubscriptionId {
        self.subscribe(&[RoomEventKind::TransitionEnter, RoomEventKind::TransitionExit], handler)
    }

    /// Remove a handler; returns whether it was registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Deliver an event to every interested handler before returning
    pub fn publish(&mut self, event: &RoomEvent) {
        let kind = event.kind();
        for subscription in &mut self.subscriptions {
            if subscription.kinds.contains(&kind) {
                subscription.handler.on_event(event);
            }
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriptions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder(log: &Rc<RefCell<Vec<(u32, RoomEvent)>>>, tag: u32) -> Box<dyn EventHandler> {
        let log = Rc::clone(log);
        Box::new(move |event: &RoomEvent| log.borrow_mut().push((tag, *event)))
    }

    #[test]
    fn test_delivery_in_subscription_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();
        bus.subscribe_all(recorder(&log, 1));
        bus.subscribe_all(recorder(&log, 2));

        let event = RoomEvent::TransitionEnter { from: Some(0), to: Some(1) };
        bus.publish(&event);

        assert_eq!(*log.borrow(), vec![(1, event), (2, event)]);
    }

    #[test]
    fn test_only_interested_handlers_notified() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();
        bus.subscribe(&[RoomEventKind::TransitionExit], recorder(&log, 7));

        bus.publish(&RoomEvent::TransitionEnter { from: None, to: Some(0) });
        assert!(log.borrow().is_empty());

        bus.publish(&RoomEvent::TransitionExit { room: Some(0) });
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_unsubscribe() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();
        let id = bus.subscribe_all(recorder(&log, 1));

        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        assert_eq!(bus.subscriber_count(), 0);

        bus.publish(&RoomEvent::TransitionExit { room: None });
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_publish_with_no_subscribers() {
        let mut bus = EventBus::new();
        bus.publish(&RoomEvent::TransitionExit { room: Some(3) });
    }
}
