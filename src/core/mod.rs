pub mod client;
pub mod project;
pub mod slot;

pub use client::ClientService;
pub use project::ProjectService;
pub use slot::SlotService;
