use std::any::type_name;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

use crate::both::Both;
use crate::controller::Controller;
use crate::error::ActivationError;
use crate::observer::Observer;
use crate::scope::Scope;

new_key_type! {
    struct WatcherKey;
}

struct Watcher<T: 'static> {
    observer: Rc<dyn Observer<T>>,
    /// Exit returned by the last `enter`, pending until the activation ends.
    exit: Option<Scope>,
}

struct State<T: 'static> {
    value: Option<Rc<T>>,
    /// Bumped on every activation so late exits can tell theirs has ended.
    generation: u64,
    /// Set while `reset` closes exits; the value stays visible until they finish.
    deactivating: bool,
    watchers: SlotMap<WatcherKey, Watcher<T>>,
    /// Attachment order.
    order: SmallVec<[WatcherKey; 4]>,
}

impl<T: 'static> State<T> {
    fn is_live(&self, generation: u64) -> bool {
        self.value.is_some() && !self.deactivating && self.generation == generation
    }
}

pub(crate) struct Core<T: 'static> {
    state: RefCell<State<T>>,
}

impl<T: 'static> Core<T> {
    fn new() -> Self {
        Self {
            state: RefCell::new(State {
                value: None,
                generation: 0,
                deactivating: false,
                watchers: SlotMap::with_key(),
                order: SmallVec::new(),
            }),
        }
    }

    fn attach(&self, observer: Rc<dyn Observer<T>>) -> WatcherKey {
        let mut state = self.state.borrow_mut();
        let key = state.watchers.insert(Watcher {
            observer,
            exit: None,
        });
        state.order.push(key);
        key
    }

    fn detach(&self, key: WatcherKey) {
        let exit = {
            let mut state = self.state.borrow_mut();
            match state.watchers.remove(key) {
                Some(watcher) => {
                    state.order.retain(|k| *k != key);
                    watcher.exit
                }
                None => None,
            }
        };
        if let Some(exit) = exit {
            exit.close();
        }
    }

    pub(crate) fn activate(&self, value: T) -> Result<(), ActivationError> {
        // No borrow is held while observers run; they may re-enter this core.
        let (value, generation, observers) = {
            let mut state = self.state.borrow_mut();
            if state.value.is_some() {
                return Err(ActivationError::AlreadyActive);
            }
            let value = Rc::new(value);
            state.value = Some(value.clone());
            state.generation += 1;
            let observers: SmallVec<[(WatcherKey, Rc<dyn Observer<T>>); 4]> = state
                .order
                .iter()
                .filter_map(|key| Some((*key, state.watchers.get(*key)?.observer.clone())))
                .collect();
            (value, state.generation, observers)
        };

        log::trace!(
            "activate {} ({} watchers)",
            type_name::<T>(),
            observers.len()
        );

        for (key, observer) in observers {
            {
                let state = self.state.borrow();
                if !state.is_live(generation) {
                    break;
                }
                if !state.watchers.contains_key(key) {
                    continue;
                }
            }
            let Some(exit) = observer.enter(&value) else {
                continue;
            };
            let stale = {
                let mut state = self.state.borrow_mut();
                let live = state.is_live(generation);
                match state.watchers.get_mut(key) {
                    Some(watcher) if live => {
                        watcher.exit = Some(exit);
                        None
                    }
                    _ => Some(exit),
                }
            };
            // The activation ended (or the watcher left) while it was entering.
            if let Some(exit) = stale {
                log::debug!("closing stale exit for {}", type_name::<T>());
                exit.close();
            }
        }
        Ok(())
    }

    pub(crate) fn deactivate(&self) -> Result<(), ActivationError> {
        let exits: SmallVec<[Scope; 4]> = {
            let mut state = self.state.borrow_mut();
            if state.value.is_none() || state.deactivating {
                return Err(ActivationError::NotActive);
            }
            state.deactivating = true;
            let State {
                watchers, order, ..
            } = &mut *state;
            order
                .iter()
                .filter_map(|key| watchers.get_mut(*key)?.exit.take())
                .collect()
        };

        log::trace!("deactivate {} ({} exits)", type_name::<T>(), exits.len());

        // Still active while exits run: a reentrant `set` fails, `reset` reports NotActive.
        for exit in exits {
            exit.close();
        }

        let mut state = self.state.borrow_mut();
        state.value = None;
        state.deactivating = false;
        Ok(())
    }
}

/// Read side of an activation source.
///
/// Cloning an `Observable` yields another handle to the same source.
pub struct Observable<T: 'static> {
    pub(crate) core: Rc<Core<T>>,
}

impl<T: 'static> Observable<T> {
    pub(crate) fn new() -> Self {
        Self {
            core: Rc::new(Core::new()),
        }
    }

    /// Registers `observer` for activations that start after this call.
    ///
    /// An activation already in progress is not replayed. Closing the returned
    /// scope detaches the observer and closes its pending exit, if any; it can
    /// also simply be dropped when the observer should stay attached.
    pub fn watch(&self, observer: impl Observer<T> + 'static) -> Scope {
        let key = self.core.attach(Rc::new(observer));
        let core: Weak<Core<T>> = Rc::downgrade(&self.core);
        Scope::new(move || {
            if let Some(core) = core.upgrade() {
                core.detach(key);
            }
        })
    }

    /// Derives an observable that is active while both sides are, entered only
    /// when `other` activates while `self` is already active.
    ///
    /// ```
    /// use std::cell::RefCell;
    /// use std::rc::Rc;
    /// use juncture_core::{Controller, observers};
    ///
    /// let device = Controller::<String>::new();
    /// let network = Controller::<String>::new();
    /// let seen = Rc::new(RefCell::new(Vec::new()));
    ///
    /// device.and_then(&network).watch(observers::on_enter({
    ///     let seen = seen.clone();
    ///     move |d: &String, n: &String| seen.borrow_mut().push(format!("{d}+{n}"))
    /// }));
    ///
    /// network.set("wifi".to_string());
    /// device.set("tv".to_string());
    /// assert!(seen.borrow().is_empty());
    ///
    /// network.reset();
    /// network.set("ethernet".to_string());
    /// assert_eq!(*seen.borrow(), vec!["tv+ethernet"]);
    /// ```
    pub fn and_then<B>(&self, other: &Observable<B>) -> Observable<Both<T, B>>
    where
        T: Clone,
        B: Clone + 'static,
    {
        let joined = Controller::<Both<T, B>>::new();
        let other = other.clone();
        let target = joined.clone();
        let _ = self.watch(move |first: &T| {
            let first = first.clone();
            let target = target.clone();
            other.watch(move |second: &B| {
                target.set(Both::new(first.clone(), second.clone()));
                let target = target.clone();
                Scope::new(move || target.reset())
            })
        });
        joined.observable()
    }

    /// Whether an activation is in progress. Stays `true` while `reset` is
    /// still closing the exits of that activation.
    pub fn is_active(&self) -> bool {
        self.core.state.borrow().value.is_some()
    }

    /// Clone of the current activation's value, if active.
    pub fn value(&self) -> Option<T>
    where
        T: Clone,
    {
        self.core.state.borrow().value.as_deref().cloned()
    }

    /// Attached watchers, whether or not they hold an exit.
    pub(crate) fn watcher_count(&self) -> usize {
        self.core.state.borrow().watchers.len()
    }
}

impl<T: 'static> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
        }
    }
}

impl<T: 'static> AsRef<Observable<T>> for Observable<T> {
    fn as_ref(&self) -> &Observable<T> {
        self
    }
}

impl<T: 'static> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.core.state.borrow();
        f.debug_struct("Observable")
            .field("type", &type_name::<T>())
            .field("active", &state.value.is_some())
            .field("watchers", &state.watchers.len())
            .finish()
    }
}
