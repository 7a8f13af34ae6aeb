//! Test helper that logs an observable's transitions and checks them in order.
//!
//! ```
//! use juncture_core::Controller;
//! use juncture_core::recorder::Recorder;
//!
//! let power = Controller::<String>::new();
//! let recorder = Recorder::record(&power);
//!
//! power.set("on".into());
//! recorder.verify().opened("on").end();
//! power.reset();
//! recorder.verify().closed("on").end();
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt::Debug;
use std::rc::Rc;

use crate::observable::Observable;
use crate::scope::Scope;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<T> {
    Opened(T),
    Closed(T),
}

pub struct Recorder<T: 'static> {
    events: Rc<RefCell<VecDeque<Event<T>>>>,
    watch: RefCell<Option<Scope>>,
}

impl<T: Clone + Debug + PartialEq + 'static> Recorder<T> {
    pub fn record(observable: &Observable<T>) -> Self {
        let events: Rc<RefCell<VecDeque<Event<T>>>> = Rc::default();
        let watch = observable.watch({
            let events = events.clone();
            move |value: &T| {
                events.borrow_mut().push_back(Event::Opened(value.clone()));
                let events = events.clone();
                let value = value.clone();
                Scope::new(move || events.borrow_mut().push_back(Event::Closed(value)))
            }
        });
        Self {
            events,
            watch: RefCell::new(Some(watch)),
        }
    }

    /// Starts a check over the events recorded since the previous check.
    pub fn verify(&self) -> Verifier<'_, T> {
        Verifier { recorder: self }
    }

    /// Stops recording; an open activation is logged as closed.
    pub fn stop(&self) {
        if let Some(watch) = self.watch.borrow_mut().take() {
            watch.close();
        }
    }
}

pub struct Verifier<'a, T: 'static> {
    recorder: &'a Recorder<T>,
}

impl<T: Debug + PartialEq + 'static> Verifier<'_, T> {
    #[track_caller]
    pub fn opened(self, expected: impl Into<T>) -> Self {
        self.expect(Event::Opened(expected.into()))
    }

    #[track_caller]
    pub fn closed(self, expected: impl Into<T>) -> Self {
        self.expect(Event::Closed(expected.into()))
    }

    /// Asserts nothing else was recorded.
    #[track_caller]
    pub fn end(self) {
        let rest: Vec<Event<T>> = self.recorder.events.borrow_mut().drain(..).collect();
        assert!(rest.is_empty(), "unexpected events: {rest:?}");
    }

    #[track_caller]
    fn expect(self, expected: Event<T>) -> Self {
        let actual = self.recorder.events.borrow_mut().pop_front();
        assert_eq!(actual.as_ref(), Some(&expected), "expected {expected:?}");
        self
    }
}
