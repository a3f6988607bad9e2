//! Controller layer: UI events, submission coordination, notifications and command orchestration.

pub mod coordinator;
pub mod events;
pub mod notifications;
pub mod orchestration;
