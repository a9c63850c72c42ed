pub mod activity;
pub mod client;
pub mod compare;
pub mod project;
pub mod slot;

pub use activity::Activity;
pub use client::{Client, ClientFilter};
pub use compare::CompareOperator;
pub use project::{Project, ProjectFilter};
pub use slot::{Slot, SlotFilter};
