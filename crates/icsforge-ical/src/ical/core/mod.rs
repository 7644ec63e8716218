//! Content-line tree rendered by the serializer.
//!
//! The model types are lowered into `Component`s holding already-encoded
//! `ContentLine`s. Properties and nested components share one ordered list
//! because readers are sensitive to where `VALARM` blocks sit relative to the
//! trailing change-management properties.

mod component;
mod parameter;
mod property;

pub use component::{Component, ComponentKind, Entry};
pub use parameter::Parameter;
pub use property::{ContentLine, names};
