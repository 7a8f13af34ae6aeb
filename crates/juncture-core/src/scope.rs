use std::fmt;

/// Deferred cleanup tied to one activation.
///
/// A `Scope` is closed at most once: [`Scope::close`] consumes it and the type is
/// not `Clone`. Dropping a `Scope` without closing it discards the cleanup.
pub struct Scope(Box<dyn FnOnce()>);

impl Scope {
    pub fn new(f: impl FnOnce() + 'static) -> Self {
        Self(Box::new(f))
    }

    /// A scope whose close does nothing.
    pub fn noop() -> Self {
        Self::new(|| {})
    }

    pub fn close(self) {
        (self.0)()
    }

    /// Closes `self`, then `next`.
    pub fn then(self, next: Scope) -> Scope {
        Scope::new(move || {
            self.close();
            next.close();
        })
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Scope")
    }
}

/// Values an observer may hand back from `enter`.
pub trait IntoExit {
    fn into_exit(self) -> Option<Scope>;
}

impl IntoExit for () {
    fn into_exit(self) -> Option<Scope> {
        None
    }
}

impl IntoExit for Scope {
    fn into_exit(self) -> Option<Scope> {
        Some(self)
    }
}

impl IntoExit for Option<Scope> {
    fn into_exit(self) -> Option<Scope> {
        self
    }
}
