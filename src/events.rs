//! Lifecycle event bus
//!
//! An explicitly constructed publish/subscribe hub shared (via `Rc`) between
//! the engine and its collaborators. Publishing never fails, whether or not
//! anyone is listening. Handlers may publish or subscribe from inside a
//! dispatch; they run against the subscriber list as it was when the event
//! was published.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Events exchanged between the engine, the shell and persistence.
///
/// Serialized as `{"type": "<name>", ...payload}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum GameEvent {
    LevelChanged { level: u8 },
    /// Published after every tick that moves the score (most frames at
    /// levels 2 and 3) and on reset. Throttle in the subscriber if needed.
    ScoreChanged { score: u64 },
    LivesChanged { lives: u8 },
    GameOver { score: u64 },
    ScoreSubmitRequested { score: u64, initials: String },
}

impl GameEvent {
    /// Stable event name
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::LevelChanged { .. } => "level-changed",
            GameEvent::ScoreChanged { .. } => "score-changed",
            GameEvent::LivesChanged { .. } => "lives-changed",
            GameEvent::GameOver { .. } => "game-over",
            GameEvent::ScoreSubmitRequested { .. } => "score-submit-requested",
        }
    }
}

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Rc<dyn Fn(&GameEvent)>;

/// Single-threaded pub/sub hub
#[derive(Default)]
pub struct EventBus {
    subscribers: RefCell<Vec<(SubscriptionId, Handler)>>,
    next_id: Cell<u64>,
}

impl EventBus {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Register a handler for every event
    pub fn subscribe(&self, handler: impl Fn(&GameEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.subscribers.borrow_mut().push((id, Rc::new(handler)));
        id
    }

    /// Remove a handler. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subs = self.subscribers.borrow_mut();
        let before = subs.len();
        subs.retain(|(sid, _)| *sid != id);
        subs.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    /// Deliver an event to every current subscriber in subscription order
    pub fn publish(&self, event: GameEvent) {
        let handlers: Vec<Handler> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, h)| Rc::clone(h))
            .collect();
        log::debug!("{} -> {} subscriber(s)", event.name(), handlers.len());
        for handler in handlers {
            handler(&event);
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder(bus: &EventBus) -> Rc<RefCell<Vec<GameEvent>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        bus.subscribe(move |e| sink.borrow_mut().push(e.clone()));
        log
    }

    #[test]
    fn test_publish_without_subscribers() {
        let bus = EventBus::new();
        bus.publish(GameEvent::GameOver { score: 10 });
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_every_subscriber_sees_event() {
        let bus = EventBus::new();
        let a = recorder(&bus);
        let b = recorder(&bus);
        bus.publish(GameEvent::LivesChanged { lives: 2 });
        assert_eq!(*a.borrow(), vec![GameEvent::LivesChanged { lives: 2 }]);
        assert_eq!(*b.borrow(), vec![GameEvent::LivesChanged { lives: 2 }]);
    }

    #[test]
    fn test_unsubscribe() {
        let bus = EventBus::new();
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        let id = bus.subscribe(move |_| c.set(c.get() + 1));
        bus.publish(GameEvent::ScoreChanged { score: 1 });
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.publish(GameEvent::ScoreChanged { score: 2 });
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_reentrant_publish() {
        let bus = EventBus::new();
        let log = recorder(&bus);
        let weak = Rc::downgrade(&bus);
        bus.subscribe(move |e| {
            if let GameEvent::GameOver { score } = e {
                if let Some(bus) = weak.upgrade() {
                    bus.publish(GameEvent::ScoreSubmitRequested {
                        score: *score,
                        initials: "ABC".into(),
                    });
                }
            }
        });

        bus.publish(GameEvent::GameOver { score: 42 });
        assert_eq!(
            *log.borrow(),
            vec![
                GameEvent::GameOver { score: 42 },
                GameEvent::ScoreSubmitRequested {
                    score: 42,
                    initials: "ABC".into()
                },
            ]
        );
    }

    #[test]
    fn test_payload_shape() {
        let json = serde_json::to_value(GameEvent::ScoreSubmitRequested {
            score: 120,
            initials: "ZED".into(),
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "score-submit-requested", "score": 120, "initials": "ZED"})
        );

        let event: GameEvent =
            serde_json::from_str(r#"{"type":"level-changed","level":3}"#).unwrap();
        assert_eq!(event, GameEvent::LevelChanged { level: 3 });
        assert_eq!(event.name(), "level-changed");
    }
}
