pub use crate::both::Both;
pub use crate::controller::Controller;
pub use crate::error::ActivationError;
pub use crate::observable::Observable;
pub use crate::observer::Observer;
pub use crate::observers::{self, Release, on_enter, on_exit, scoped};
pub use crate::scope::{IntoExit, Scope};
pub use crate::unit::Unit;
