//! # Activations, Observers, and Scopes
//!
//! Juncture tracks whether a typed value is currently *active* and composes
//! several such signals into ones that are active only while all of their
//! parts are. There are four main pieces:
//!
//! - `Controller<T>`: write side, `set(value)` starts an activation and
//!   `reset()` ends it.
//! - `Observable<T>`: read side, `watch(observer)` and `and_then(other)`.
//! - `Observer<T>`: runs when an activation starts and may return a `Scope`.
//! - `Scope`: cleanup that runs exactly once, when that activation ends.
//!
//! ## Watching
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use juncture_core::*;
//!
//! let ready = Controller::<String>::new();
//! let log = Rc::new(RefCell::new(Vec::new()));
//!
//! ready.watch({
//!     let log = log.clone();
//!     move |device: &String| {
//!         log.borrow_mut().push(format!("up {device}"));
//!         let log = log.clone();
//!         let device = device.clone();
//!         Scope::new(move || log.borrow_mut().push(format!("down {device}")))
//!     }
//! });
//!
//! ready.set("tv".into());
//! ready.reset();
//! assert_eq!(*log.borrow(), vec!["up tv", "down tv"]);
//! ```
//!
//! - `watch` only reacts to activations that start after it was called; an
//!   activation already in progress is not replayed.
//! - `set` while active and `reset` while inactive panic. They indicate broken
//!   lifecycle wiring; `try_set` / `try_reset` return an `ActivationError`
//!   instead.
//!
//! ## Composition
//!
//! `a.and_then(&b)` is an `Observable<Both<A, B>>` that activates when `b`
//! activates while `a` is already active, and deactivates as soon as either
//! side does. Activating `b` first and `a` second produces nothing.
//!
//! The same join can be written by hand, because an observer may `watch`
//! another observable and return the handle as its exit scope:
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use juncture_core::*;
//!
//! let a = Controller::<Unit>::new();
//! let b = Controller::<Unit>::new();
//! let joined = Rc::new(RefCell::new(0));
//!
//! a.watch({
//!     let b = b.clone();
//!     let joined = joined.clone();
//!     move |_: &Unit| {
//!         let joined = joined.clone();
//!         b.watch(move |_: &Unit| *joined.borrow_mut() += 1)
//!     }
//! });
//!
//! a.set(Unit);
//! b.set(Unit);
//! assert_eq!(*joined.borrow(), 1);
//! ```
//!
//! Closing the outer activation closes the inner `watch` handle, which tears
//! down whatever the inner activation set up.
//!
//! Everything is single-threaded and synchronous: `set` and `reset` run the
//! whole downstream graph before returning.

pub mod both;
pub mod controller;
pub mod error;
pub mod observable;
pub mod observer;
pub mod observers;
pub mod prelude;
pub mod recorder;
pub mod scope;
pub mod unit;

pub use both::*;
pub use controller::*;
pub use error::*;
pub use observable::*;
pub use observer::*;
pub use prelude::*;
pub use unit::*;
