use std::rc::Rc;

use crate::scope::{IntoExit, Scope};

/// Reacts to an observable entering activation.
///
/// The returned scope, if any, is closed when that activation ends. One
/// observer type can serve observables of several value types by implementing
/// `Observer<T>` generically:
///
/// ```
/// use std::fmt::Display;
/// use juncture_core::{Controller, Observer, Scope};
///
/// struct Announce;
///
/// impl<T: Display> Observer<T> for Announce {
///     fn enter(&self, value: &T) -> Option<Scope> {
///         println!("enter {value}");
///         None
///     }
/// }
///
/// let names = Controller::<String>::new();
/// let counts = Controller::<u32>::new();
/// let shared = std::rc::Rc::new(Announce);
/// names.watch(shared.clone());
/// counts.watch(shared);
/// ```
pub trait Observer<T: ?Sized> {
    fn enter(&self, value: &T) -> Option<Scope>;
}

impl<T, F, R> Observer<T> for F
where
    T: ?Sized,
    F: Fn(&T) -> R,
    R: IntoExit,
{
    fn enter(&self, value: &T) -> Option<Scope> {
        self(value).into_exit()
    }
}

impl<T: ?Sized, O: Observer<T> + ?Sized> Observer<T> for Rc<O> {
    fn enter(&self, value: &T) -> Option<Scope> {
        (**self).enter(value)
    }
}
