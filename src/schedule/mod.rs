//! Explicit scheduling over a virtual clock.
//!
//! The engine never sleeps or spawns timers. Delayed work (match
//! resolution) and periodic work (the elapsed-time tick) are queued on a
//! [`Scheduler`] and fire when the host advances time. Every task has a
//! [`TaskId`] handle that can be cancelled.

mod scheduler;

pub use scheduler::{Fired, Scheduler, TaskId};
pub(crate) use scheduler::periods;
