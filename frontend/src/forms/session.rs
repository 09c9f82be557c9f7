use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

use log::debug;
use yew::Callback;

use crate::config;

use super::error::FormError;
use super::machine::{FormMachine, Phase, SubmitAttempt};
use super::profiles::FormType;
use super::store::{open_default_store, SubmissionStore};
use super::timing::{Clock, GlooScheduler, Scheduler, SystemClock};

/// What a form needs from its surroundings: where submissions go, what
/// time it is and how to wait.
#[derive(Clone)]
pub struct FormServices {
    pub store: Rc<dyn SubmissionStore>,
    pub clock: Rc<dyn Clock>,
    pub scheduler: Rc<dyn Scheduler>,
    pub submit_delay_ms: u32,
    pub success_display_ms: u32,
}

impl FormServices {
    pub fn browser() -> Self {
        Self {
            store: open_default_store(),
            clock: Rc::new(SystemClock),
            scheduler: Rc::new(GlooScheduler),
            submit_delay_ms: config::SUBMIT_DELAY_MS,
            success_display_ms: config::SUCCESS_DISPLAY_MS,
        }
    }
}

impl PartialEq for FormServices {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.store, &other.store)
            && Rc::ptr_eq(&self.clock, &other.clock)
            && Rc::ptr_eq(&self.scheduler, &other.scheduler)
            && self.submit_delay_ms == other.submit_delay_ms
            && self.success_display_ms == other.success_display_ms
    }
}

struct SessionInner {
    machine: RefCell<FormMachine>,
    services: FormServices,
    on_change: Callback<()>,
    on_close: Callback<()>,
    dismissed: Cell<bool>,
}

/// An open form plus its pending timers.
///
/// `on_change` fires after each timer-driven transition, `on_close` once
/// the success message has been shown. Dismissing does not recall a
/// submission already in flight: the record is still written, but the
/// session stays silent afterwards.
#[derive(Clone)]
pub struct FormSession {
    inner: Rc<SessionInner>,
}

impl FormSession {
    pub fn open(
        form_type: FormType,
        event_title: Option<String>,
        services: FormServices,
        on_change: Callback<()>,
        on_close: Callback<()>,
    ) -> Result<Self, FormError> {
        let machine = FormMachine::new(form_type, event_title)?;
        debug!("Opened {} form", form_type.tag());
        Ok(Self {
            inner: Rc::new(SessionInner {
                machine: RefCell::new(machine),
                services,
                on_change,
                on_close,
                dismissed: Cell::new(false),
            }),
        })
    }

    pub fn machine(&self) -> Ref<'_, FormMachine> {
        self.inner.machine.borrow()
    }

    pub fn phase(&self) -> Phase {
        self.inner.machine.borrow().phase()
    }

    pub fn input(&self, id: &str, value: String) -> bool {
        self.inner.machine.borrow_mut().set_value(id, value)
    }

    pub fn submit(&self) -> SubmitAttempt {
        let attempt = self.inner.machine.borrow_mut().begin_submit();
        if attempt == SubmitAttempt::Started {
            let inner = self.inner.clone();
            self.inner
                .services
                .scheduler
                .schedule(self.inner.services.submit_delay_ms, Box::new(move || inner.complete()));
        }
        attempt
    }

    pub fn dismiss(&self) {
        if !self.inner.dismissed.replace(true) {
            debug!("Form dismissed while {:?}", self.phase());
        }
    }
}

impl SessionInner {
    fn complete(self: Rc<Self>) {
        let stored = self
            .machine
            .borrow_mut()
            .complete_submit(self.services.store.as_ref(), self.services.clock.as_ref());
        if stored.is_none() || self.dismissed.get() {
            return;
        }
        self.on_change.emit(());

        let inner = self.clone();
        self.services
            .scheduler
            .schedule(self.services.success_display_ms, Box::new(move || inner.finish()));
    }

    fn finish(self: Rc<Self>) {
        if self.dismissed.get() {
            return;
        }
        self.on_close.emit(());
        self.machine.borrow_mut().reset();
        self.on_change.emit(());
    }
}
