use chrono::{DateTime, Utc};
use gloo_timers::callback::Timeout;

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Runs a task once after a delay. Scheduled tasks cannot be cancelled.
pub trait Scheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>);
}

pub struct GlooScheduler;

impl Scheduler for GlooScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        Timeout::new(delay_ms, task).forget();
    }
}

#[cfg(test)]
pub use self::manual::{FixedClock, ManualScheduler};

#[cfg(test)]
mod manual {
    use std::cell::{Cell, RefCell};

    use chrono::{DateTime, Duration, Utc};

    use super::{Clock, Scheduler};

    /// Reports whatever time the test last set.
    pub struct FixedClock(pub Cell<DateTime<Utc>>);

    impl FixedClock {
        pub fn at(at: DateTime<Utc>) -> Self {
            Self(Cell::new(at))
        }

        pub fn tick(&self, millis: i64) {
            self.0.set(self.0.get() + Duration::milliseconds(millis));
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0.get()
        }
    }

    struct Pending {
        due_ms: u64,
        seq: u64,
        task: Box<dyn FnOnce()>,
    }

    /// Virtual timer queue. Nothing runs until `advance` is called.
    #[derive(Default)]
    pub struct ManualScheduler {
        now_ms: Cell<u64>,
        next_seq: Cell<u64>,
        pending: RefCell<Vec<Pending>>,
    }

    impl ManualScheduler {
        pub fn pending(&self) -> usize {
            self.pending.borrow().len()
        }

        pub fn advance(&self, millis: u64) {
            let target = self.now_ms.get() + millis;
            loop {
                let next = {
                    let mut pending = self.pending.borrow_mut();
                    let due = pending
                        .iter()
                        .enumerate()
                        .filter(|(_, p)| p.due_ms <= target)
                        .min_by_key(|(_, p)| (p.due_ms, p.seq))
                        .map(|(i, _)| i);
                    due.map(|i| pending.remove(i))
                };
                match next {
                    Some(p) => {
                        self.now_ms.set(p.due_ms);
                        (p.task)();
                    }
                    None => break,
                }
            }
            self.now_ms.set(target);
        }
    }

    impl Scheduler for ManualScheduler {
        fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
            let seq = self.next_seq.get();
            self.next_seq.set(seq + 1);
            self.pending.borrow_mut().push(Pending {
                due_ms: self.now_ms.get() + u64::from(delay_ms),
                seq,
                task,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn manual_scheduler_runs_tasks_in_due_order() {
        let scheduler = Rc::new(ManualScheduler::default());
        let log = Rc::new(RefCell::new(Vec::new()));

        for (delay, label) in [(300, "c"), (100, "a"), (200, "b")] {
            let log = log.clone();
            scheduler.schedule(delay, Box::new(move || log.borrow_mut().push(label)));
        }

        scheduler.advance(150);
        assert_eq!(*log.borrow(), ["a"]);
        scheduler.advance(1_000);
        assert_eq!(*log.borrow(), ["a", "b", "c"]);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn tasks_scheduled_from_tasks_respect_virtual_time() {
        let scheduler = Rc::new(ManualScheduler::default());
        let fired = Rc::new(RefCell::new(Vec::new()));
        {
            let inner = scheduler.clone();
            let fired = fired.clone();
            scheduler.schedule(
                1_000,
                Box::new(move || {
                    fired.borrow_mut().push("outer");
                    let fired = fired.clone();
                    inner.schedule(2_000, Box::new(move || fired.borrow_mut().push("inner")));
                }),
            );
        }

        scheduler.advance(2_999);
        assert_eq!(*fired.borrow(), ["outer"]);
        scheduler.advance(1);
        assert_eq!(*fired.borrow(), ["outer", "inner"]);
    }
}
