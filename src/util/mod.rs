//! Utility types shared by the datapack builder.

pub mod compile;
pub(crate) mod pack_format;
mod registration_queue;

#[doc(inline)]
pub use registration_queue::{Drain, RegistrationQueue, SameIdentity};
