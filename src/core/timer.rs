//=========================================================================
// Timers
//=========================================================================
//
// One-shot delayed events driven by the frame clock.
//
// Architecture:
//   schedule(delay, event) → pending list → advance(dt) → due events
//
// A `Timers` value is owned by whoever scheduled into it (a scene, a
// puzzle, the scene manager). Dropping or `cancel_all()`-ing it is the
// only cancellation needed: nothing fires after its owner is gone.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== TimerId =============================================================

/// Handle for cancelling a scheduled event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

//=== Timers ==============================================================

struct Pending<E> {
    id: TimerId,
    due: Duration,
    event: E,
}

/// One-shot timer list keyed by elapsed frame time.
pub struct Timers<E> {
    now: Duration,
    next_id: u64,
    pending: Vec<Pending<E>>,
}

impl<E> Timers<E> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            pending: Vec::new(),
        }
    }

    //--- Scheduling -------------------------------------------------------

    /// Schedules `event` to fire once `delay` has elapsed.
    pub fn schedule(&mut self, delay: Duration, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            id,
            due: self.now + delay,
            event,
        });
        id
    }

    /// Cancels a pending event. Returns `false` if it already fired.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        self.pending.len() != before
    }

    /// Drops every pending event.
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    //--- Advancing --------------------------------------------------------

    /// Moves the clock forward and returns the events that came due.
    ///
    /// Events are ordered by due time, then by scheduling order.
    pub fn advance(&mut self, dt: Duration) -> Vec<E> {
        self.now += dt;

        let now = self.now;
        let (mut due, rest): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.pending).into_iter().partition(|p| p.due <= now);
        self.pending = rest;

        due.sort_by_key(|p| (p.due, p.id.0));
        due.into_iter().map(|p| p.event).collect()
    }

    //--- Queries ----------------------------------------------------------

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Total time advanced since creation.
    pub fn now(&self) -> Duration {
        self.now
    }
}

impl<E> Default for Timers<E> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn fires_only_when_due() {
        let mut timers = Timers::new();
        timers.schedule(ms(100), "a");

        assert!(timers.advance(ms(99)).is_empty());
        assert_eq!(timers.advance(ms(1)), vec!["a"]);
        assert!(timers.is_empty());
    }

    #[test]
    fn fires_in_due_order_then_schedule_order() {
        let mut timers = Timers::new();
        timers.schedule(ms(300), 3);
        timers.schedule(ms(100), 1);
        timers.schedule(ms(200), 2);
        timers.schedule(ms(100), 10);

        assert_eq!(timers.advance(ms(1000)), vec![1, 10, 2, 3]);
    }

    #[test]
    fn cancel_prevents_firing() {
        let mut timers = Timers::new();
        let keep = timers.schedule(ms(10), "keep");
        let drop = timers.schedule(ms(10), "drop");

        assert!(timers.cancel(drop));
        assert!(!timers.cancel(drop));
        assert!(timers.is_pending(keep));
        assert_eq!(timers.advance(ms(10)), vec!["keep"]);
    }

    #[test]
    fn cancel_all_clears_everything() {
        let mut timers = Timers::new();
        timers.schedule(ms(10), 1);
        timers.schedule(ms(20), 2);

        timers.cancel_all();

        assert!(timers.advance(ms(100)).is_empty());
    }

    #[test]
    fn delay_is_relative_to_current_time() {
        let mut timers = Timers::new();
        timers.advance(ms(500));
        timers.schedule(ms(100), "late");

        assert!(timers.advance(ms(50)).is_empty());
        assert_eq!(timers.advance(ms(50)), vec!["late"]);
        assert_eq!(timers.now(), ms(600));
    }

    #[test]
    fn zero_delay_fires_on_next_advance() {
        let mut timers = Timers::new();
        timers.schedule(Duration::ZERO, ());
        assert_eq!(timers.advance(Duration::ZERO).len(), 1);
    }
}
