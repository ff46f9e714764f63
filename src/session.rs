//! Game-over to leaderboard glue
//!
//! On `game-over` the session asks for initials and publishes
//! `score-submit-requested`; on `score-submit-requested` it stamps the date
//! and saves the entry. Both halves only talk through the bus, so a shell can
//! replace either one.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::events::{EventBus, GameEvent, SubscriptionId};
use crate::highscores::{HighScoreEntry, ScoreStore, normalize_initials, now_iso8601};

/// Asks the player for initials once a run ends
pub trait InitialsPrompt {
    /// `None` means the player dismissed the prompt
    fn ask(&self, score: u64) -> Option<String>;
}

impl<F> InitialsPrompt for F
where
    F: Fn(u64) -> Option<String>,
{
    fn ask(&self, score: u64) -> Option<String> {
        self(score)
    }
}

/// Prompt that always answers with the same initials
#[derive(Debug, Clone)]
pub struct FixedInitials(pub String);

impl InitialsPrompt for FixedInitials {
    fn ask(&self, _score: u64) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Publish `score-submit-requested` after every `game-over`
pub fn prompt_on_game_over(
    bus: &Rc<EventBus>,
    prompt: impl InitialsPrompt + 'static,
) -> SubscriptionId {
    let weak: Weak<EventBus> = Rc::downgrade(bus);
    bus.subscribe(move |event| {
        let &GameEvent::GameOver { score } = event else {
            return;
        };
        let initials = normalize_initials(&prompt.ask(score).unwrap_or_default());
        if let Some(bus) = weak.upgrade() {
            bus.publish(GameEvent::ScoreSubmitRequested { score, initials });
        }
    })
}

/// Save every `score-submit-requested` into `store`, dated by `now`
pub fn record_submitted_scores<S>(
    bus: &EventBus,
    store: Rc<RefCell<S>>,
    now: impl Fn() -> String + 'static,
) -> SubscriptionId
where
    S: ScoreStore + 'static,
{
    bus.subscribe(move |event| {
        if let GameEvent::ScoreSubmitRequested { score, initials } = event {
            let entry = HighScoreEntry::new(initials, *score, now());
            log::info!("recording {} for {}", entry.score, entry.initials);
            store.borrow_mut().save_score(entry);
        }
    })
}

/// Both halves wired to one bus and store; unsubscribes on drop
pub struct Session<S: ScoreStore + 'static> {
    bus: Rc<EventBus>,
    store: Rc<RefCell<S>>,
    subscriptions: Vec<SubscriptionId>,
}

impl<S: ScoreStore + 'static> Session<S> {
    pub fn new(bus: Rc<EventBus>, store: S, prompt: impl InitialsPrompt + 'static) -> Self {
        Self::with_clock(bus, store, prompt, now_iso8601)
    }

    /// Like `new`, with a custom date source
    pub fn with_clock(
        bus: Rc<EventBus>,
        store: S,
        prompt: impl InitialsPrompt + 'static,
        now: impl Fn() -> String + 'static,
    ) -> Self {
        let store = Rc::new(RefCell::new(store));
        let subscriptions = vec![
            prompt_on_game_over(&bus, prompt),
            record_submitted_scores(&bus, Rc::clone(&store), now),
        ];
        Self {
            bus,
            store,
            subscriptions,
        }
    }

    /// Current leaderboard
    pub fn scores(&self) -> Vec<HighScoreEntry> {
        self.store.borrow().get_scores()
    }

    pub fn store(&self) -> &Rc<RefCell<S>> {
        &self.store
    }
}

impl<S: ScoreStore + 'static> Drop for Session<S> {
    fn drop(&mut self) {
        for id in self.subscriptions.drain(..) {
            self.bus.unsubscribe(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::HighScoreStore;
    use crate::persistence::MemoryStorage;

    const DATE: &str = "2026-10-18T12:00:00.000Z";

    fn session(prompt: impl InitialsPrompt + 'static) -> (Rc<EventBus>, Session<HighScoreStore<MemoryStorage>>) {
        let bus = EventBus::new();
        let session = Session::with_clock(
            Rc::clone(&bus),
            HighScoreStore::new(MemoryStorage::new()),
            prompt,
            || DATE.to_string(),
        );
        (bus, session)
    }

    #[test]
    fn test_game_over_records_score() {
        let (bus, session) = session(FixedInitials("ace".into()));
        bus.publish(GameEvent::GameOver { score: 321 });
        assert_eq!(
            session.scores(),
            vec![HighScoreEntry {
                initials: "ACE".into(),
                score: 321,
                date: DATE.into()
            }]
        );
    }

    #[test]
    fn test_dismissed_prompt_uses_default_initials() {
        let (bus, session) = session(|_score: u64| -> Option<String> { None });
        bus.publish(GameEvent::GameOver { score: 5 });
        assert_eq!(session.scores()[0].initials, "YOU");
    }

    #[test]
    fn test_prompt_sees_final_score() {
        let asked = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&asked);
        let (bus, _session) = session(move |score: u64| {
            sink.borrow_mut().push(score);
            Some("BOB".to_string())
        });
        bus.publish(GameEvent::GameOver { score: 77 });
        bus.publish(GameEvent::ScoreChanged { score: 78 });
        assert_eq!(*asked.borrow(), vec![77]);
    }

    #[test]
    fn test_external_submissions_are_recorded() {
        let (bus, session) = session(FixedInitials("AAA".into()));
        bus.publish(GameEvent::ScoreSubmitRequested {
            score: 10,
            initials: "zz".into(),
        });
        assert_eq!(session.scores()[0].initials, "ZZ");
    }

    #[test]
    fn test_drop_unsubscribes() {
        let (bus, session) = session(FixedInitials("AAA".into()));
        assert_eq!(bus.subscriber_count(), 2);
        drop(session);
        assert_eq!(bus.subscriber_count(), 0);
        bus.publish(GameEvent::GameOver { score: 1 });
    }
}
