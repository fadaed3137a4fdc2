//! Virtual millisecond clock driving the game's timed events.
//!
//! Each [`TimerKind`] owns exactly one slot. Arming a kind replaces whatever
//! was in its slot, so a re-armed trigger can never fire on its old schedule.

/// The independently scheduled triggers of a session.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum TimerKind {
    /// Advances the snake; period is the current tick interval.
    Movement,
    /// Moves food to a fresh cell.
    FoodRelocation,
    /// Rolls for a new special item.
    SpecialItemSpawn,
    /// One-shot deadline clearing an uneaten special item.
    SpecialItemDespawn,
}

impl TimerKind {
    /// Fire order for triggers due at the same instant.
    pub const ALL: [Self; 4] = [
        Self::Movement,
        Self::FoodRelocation,
        Self::SpecialItemSpawn,
        Self::SpecialItemDespawn,
    ];

    fn slot(self) -> usize {
        match self {
            Self::Movement => 0,
            Self::FoodRelocation => 1,
            Self::SpecialItemSpawn => 2,
            Self::SpecialItemDespawn => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
struct Timer {
    due_at: u64,
    /// `None` for one-shot deadlines.
    period: Option<u64>,
}

/// Cooperative scheduler with one cancellable slot per trigger kind.
#[derive(Debug, Clone, Default)]
pub struct SimulationClock {
    now_ms: u64,
    slots: [Option<Timer>; 4],
}

impl SimulationClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.now_ms
    }

    /// Schedules `kind` to fire every `period_ms`, first one period from now.
    pub fn arm_periodic(&mut self, kind: TimerKind, period_ms: u64) {
        let period_ms = period_ms.max(1);
        self.slots[kind.slot()] = Some(Timer {
            due_at: self.now_ms.saturating_add(period_ms),
            period: Some(period_ms),
        });
    }

    /// Schedules `kind` to fire once, `delay_ms` from now.
    pub fn arm_once(&mut self, kind: TimerKind, delay_ms: u64) {
        self.slots[kind.slot()] = Some(Timer {
            due_at: self.now_ms.saturating_add(delay_ms),
            period: None,
        });
    }

    pub fn cancel(&mut self, kind: TimerKind) {
        self.slots[kind.slot()] = None;
    }

    pub fn cancel_all(&mut self) {
        self.slots = [None; 4];
    }

    #[must_use]
    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.slots[kind.slot()].is_some()
    }

    /// Period of an armed periodic trigger.
    #[must_use]
    pub fn period(&self, kind: TimerKind) -> Option<u64> {
        self.slots[kind.slot()].and_then(|timer| timer.period)
    }

    /// Absolute time at which `kind` next fires.
    #[must_use]
    pub fn due_at(&self, kind: TimerKind) -> Option<u64> {
        self.slots[kind.slot()].map(|timer| timer.due_at)
    }

    /// Pops the earliest trigger due at or before `until_ms`.
    ///
    /// Moves `now` to that trigger's due time, reschedules periodic triggers
    /// one period later and clears one-shots. A periodic trigger whose next
    /// due time would pass `u64::MAX` is cleared too. The caller handles the returned
    /// kind to completion before popping again, so anything the handler
    /// re-arms or cancels is honoured by the next pop.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<TimerKind> {
        let (kind, timer) = TimerKind::ALL
            .iter()
            .filter_map(|kind| self.slots[kind.slot()].map(|timer| (*kind, timer)))
            .filter(|(_, timer)| timer.due_at <= until_ms)
            .min_by_key(|(kind, timer)| (timer.due_at, kind.slot()))?;

        self.now_ms = self.now_ms.max(timer.due_at);
        self.slots[kind.slot()] = timer.period.and_then(|period| {
            let due_at = timer.due_at.checked_add(period)?;
            Some(Timer {
                due_at,
                period: Some(period),
            })
        });

        tracing::trace!(?kind, at_ms = self.now_ms, "timer fired");
        Some(kind)
    }

    /// Moves `now` forward to `until_ms` once nothing else is due.
    pub fn settle(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }
}
