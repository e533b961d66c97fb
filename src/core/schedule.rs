//! Deferred actions driven by the tick loop.
//!
//! Anything that should happen "a few seconds from now" is queued here with
//! a deadline and handed back by [`Schedule::advance`] once the tick loop
//! has moved time past it. Nothing sleeps and nothing is cancelled: a queued
//! action always comes back exactly once.

/// A queue of actions keyed by the time they become due.
#[derive(Debug, Clone)]
pub struct Schedule<A> {
    now: f64,
    next_seq: u64,
    pending: Vec<Scheduled<A>>,
}

#[derive(Debug, Clone)]
struct Scheduled<A> {
    due_at: f64,
    seq: u64,
    action: A,
}

impl<A> Default for Schedule<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Schedule<A> {
    pub fn new() -> Self {
        Self {
            now: 0.0,
            next_seq: 0,
            pending: Vec::new(),
        }
    }

    /// Queues `action` to come due `delay` seconds from now.
    pub fn after(&mut self, delay: f64, action: A) {
        let delay = if delay.is_finite() { delay.max(0.0) } else { 0.0 };
        self.pending.push(Scheduled {
            due_at: self.now + delay,
            seq: self.next_seq,
            action,
        });
        self.next_seq += 1;
    }

    /// Moves time forward and returns every action now due, earliest first.
    ///
    /// Actions sharing a deadline come back in the order they were queued.
    pub fn advance(&mut self, dt: f64) -> Vec<A> {
        if dt.is_finite() && dt > 0.0 {
            self.now += dt;
        }

        let now = self.now;
        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|s| s.due_at <= now);
        self.pending = waiting;

        due.sort_by(|a, b| a.due_at.total_cmp(&b.due_at).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|s| s.action).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// True if any queued action matches `pred`.
    pub fn contains(&self, pred: impl Fn(&A) -> bool) -> bool {
        self.pending.iter().any(|s| pred(&s.action))
    }

    /// Seconds until the earliest queued action matching `pred` comes due.
    pub fn time_until(&self, pred: impl Fn(&A) -> bool) -> Option<f64> {
        self.pending
            .iter()
            .filter(|s| pred(&s.action))
            .map(|s| (s.due_at - self.now).max(0.0))
            .min_by(|a, b| a.total_cmp(b))
    }
}
