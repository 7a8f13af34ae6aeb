use std::fmt;
use std::ops::Deref;

use crate::error::ActivationError;
use crate::observable::Observable;

/// Write side of an activation source.
///
/// A controller starts inactive. `set` activates it with a value, `reset` ends
/// the activation. Both are fail-fast: calling `set` while active or `reset`
/// while inactive panics, since it means the caller's lifecycle wiring is
/// wrong. Use [`Controller::try_set`] / [`Controller::try_reset`] to get the
/// error back instead.
///
/// The controller dereferences to its [`Observable`], so `watch` and
/// `and_then` are available directly.
pub struct Controller<T: 'static> {
    observable: Observable<T>,
}

impl<T: 'static> Controller<T> {
    pub fn new() -> Self {
        Self {
            observable: Observable::new(),
        }
    }

    /// Read-only handle to hand out to consumers.
    pub fn observable(&self) -> Observable<T> {
        self.observable.clone()
    }

    #[track_caller]
    pub fn set(&self, value: T) {
        if let Err(err) = self.try_set(value) {
            panic!("{err}");
        }
    }

    #[track_caller]
    pub fn reset(&self) {
        if let Err(err) = self.try_reset() {
            panic!("{err}");
        }
    }

    pub fn try_set(&self, value: T) -> Result<(), ActivationError> {
        self.observable.core.activate(value)
    }

    pub fn try_reset(&self) -> Result<(), ActivationError> {
        self.observable.core.deactivate()
    }

    /// Ends the current activation, if any, then activates with `value`.
    pub fn replace(&self, value: T) {
        if self.observable.is_active() {
            self.reset();
        }
        self.set(value);
    }
}

impl<T: 'static> Default for Controller<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Clone for Controller<T> {
    fn clone(&self) -> Self {
        Self {
            observable: self.observable.clone(),
        }
    }
}

impl<T: 'static> Deref for Controller<T> {
    type Target = Observable<T>;

    fn deref(&self) -> &Observable<T> {
        &self.observable
    }
}

impl<T: 'static> AsRef<Observable<T>> for Controller<T> {
    fn as_ref(&self) -> &Observable<T> {
        &self.observable
    }
}

impl<T: 'static> From<Controller<T>> for Observable<T> {
    fn from(controller: Controller<T>) -> Self {
        controller.observable
    }
}

impl<T: 'static> fmt::Debug for Controller<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Controller").field(&self.observable).finish()
    }
}
