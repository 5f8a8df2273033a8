//! Resource operations, one module per API area.
//!
//! Every module adds an `impl EvercamClient` block; nothing here is public on
//! its own.

mod apps;
mod archives;
mod camera_models;
mod cameras;
mod logs;
mod public;
mod shares;
mod snapmails;
mod snapshots;
mod users;
mod vendors;
mod webhooks;
