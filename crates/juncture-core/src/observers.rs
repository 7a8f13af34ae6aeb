//! Ready-made [`Observer`]s built from plain handlers.
//!
//! Handlers come in three shapes, picked by the closure's signature:
//!
//! - `Fn(&T)` receives the activation value,
//! - `Fn()` ignores it,
//! - `Fn(&A, &B)` receives both halves of a [`Both<A, B>`] value.
//!
//! Only one level of `Both` is destructured. Deeper `and_then` chains hand the
//! nested pair to the handler as `&Both<..>` for explicit access.

use std::marker::PhantomData;
use std::rc::Rc;

use crate::both::Both;
use crate::observer::Observer;
use crate::scope::Scope;

/// A handler callable with a `&T`, in one of the shapes listed in the module
/// docs. `Args` only disambiguates the shapes and is inferred.
pub trait Handler<T, Args> {
    fn call(&self, value: &T);
}

impl<T, F> Handler<T, (T,)> for F
where
    F: Fn(&T),
{
    fn call(&self, value: &T) {
        self(value)
    }
}

impl<T, F> Handler<T, ()> for F
where
    F: Fn(),
{
    fn call(&self, _: &T) {
        self()
    }
}

impl<A, B, F> Handler<Both<A, B>, (A, B)> for F
where
    F: Fn(&A, &B),
{
    fn call(&self, value: &Both<A, B>) {
        self(&value.first, &value.second)
    }
}

pub struct OnEnter<H, Args> {
    handler: H,
    _args: PhantomData<fn(Args)>,
}

/// Runs `handler` when the observable activates. Deactivation does nothing.
pub fn on_enter<H, Args>(handler: H) -> OnEnter<H, Args> {
    OnEnter {
        handler,
        _args: PhantomData,
    }
}

impl<T, Args, H> Observer<T> for OnEnter<H, Args>
where
    H: Handler<T, Args>,
{
    fn enter(&self, value: &T) -> Option<Scope> {
        self.handler.call(value);
        None
    }
}

pub struct OnExit<H, Args> {
    handler: Rc<H>,
    _args: PhantomData<fn(Args)>,
}

/// Runs `handler` with the activation's value when that activation ends.
pub fn on_exit<H, Args>(handler: H) -> OnExit<H, Args> {
    OnExit {
        handler: Rc::new(handler),
        _args: PhantomData,
    }
}

impl<T, Args, H> Observer<T> for OnExit<H, Args>
where
    T: Clone + 'static,
    Args: 'static,
    H: Handler<T, Args> + 'static,
{
    fn enter(&self, value: &T) -> Option<Scope> {
        let value = value.clone();
        let handler = self.handler.clone();
        Some(Scope::new(move || handler.call(&value)))
    }
}

/// A resource acquired on activation and released when it ends.
///
/// Constructing the resource performs the enter side effect; `release`
/// performs the exit side effect.
pub trait Release: 'static {
    fn release(self);
}

pub struct Scoped<C> {
    acquire: C,
}

/// Adapts a resource constructor into an observer: each activation acquires
/// a resource through `acquire`, and its end releases that resource.
pub fn scoped<C>(acquire: C) -> Scoped<C> {
    Scoped { acquire }
}

impl<T, R, C> Observer<T> for Scoped<C>
where
    C: Fn(&T) -> R,
    R: Release,
{
    fn enter(&self, value: &T) -> Option<Scope> {
        let resource = (self.acquire)(value);
        Some(Scope::new(move || resource.release()))
    }
}
