/// Reset-on-keystroke debounce. Each keystroke issues a ticket; only the
/// newest ticket may fire, and it fires at most once.
#[derive(Debug, Default)]
pub struct Debouncer {
    latest: u64,
    fired: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl Debouncer {
    pub fn touch(&mut self) -> Ticket {
        self.latest += 1;
        self.fired = false;
        Ticket(self.latest)
    }

    /// Called when a ticket's timer elapses; true if the work should run now.
    pub fn fire(&mut self, ticket: Ticket) -> bool {
        if ticket.0 != self.latest || self.fired {
            return false;
        }
        self.fired = true;
        true
    }

    /// Drop whatever is pending.
    pub fn cancel(&mut self) {
        self.latest += 1;
        self.fired = false;
    }
}

#[cfg(target_arch = "wasm32")]
pub use timer::DebounceTimer;

#[cfg(target_arch = "wasm32")]
mod timer {
    use super::Debouncer;
    use gloo_timers::callback::Timeout;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Browser wiring: a `Debouncer` plus the pending `Timeout`.
    /// Replacing the timeout drops, and so clears, the previous one.
    #[derive(Default)]
    pub struct DebounceTimer {
        state: Rc<RefCell<Debouncer>>,
        pending: Option<Timeout>,
    }

    impl DebounceTimer {
        pub fn schedule<F>(&mut self, millis: u32, work: F)
        where
            F: FnOnce() + 'static,
        {
            let ticket = self.state.borrow_mut().touch();
            let state = self.state.clone();
            self.pending = Some(Timeout::new(millis, move || {
                if state.borrow_mut().fire(ticket) {
                    work();
                }
            }));
        }

        pub fn cancel(&mut self) {
            self.state.borrow_mut().cancel();
            self.pending = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_of_keystrokes_fires_once_for_the_last() {
        let mut d = Debouncer::default();
        let tickets: Vec<Ticket> = (0..5).map(|_| d.touch()).collect();
        let fired: Vec<bool> = tickets.iter().map(|t| d.fire(*t)).collect();
        assert_eq!(fired, vec![false, false, false, false, true]);
        assert!(!d.fire(tickets[4]));
    }

    #[test]
    fn separate_idle_gaps_fire_separately() {
        let mut d = Debouncer::default();
        let a = d.touch();
        assert!(d.fire(a));
        let b = d.touch();
        assert!(d.fire(b));
    }

    #[test]
    fn cancel_drops_pending_ticket() {
        let mut d = Debouncer::default();
        let t = d.touch();
        d.cancel();
        assert!(!d.fire(t));
    }
}
