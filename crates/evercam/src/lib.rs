//! Evercam API client.
//!
//! [`EvercamClient`] exposes one async method per API operation (cameras,
//! shares, snapshots, users, vendors, models, logs, public cameras, webhooks,
//! archives, snapmails and apps). Every method follows the same shape: build
//! parameters, run the request through [`evercam_core::ApiClient`], check that
//! the reply holds the expected key, and return the value under it.
//!
//! ```rust,no_run
//! use evercam::{EvercamClient, EvercamConfig};
//!
//! # async fn run() -> evercam::Result<()> {
//! let config = EvercamConfig::new().with_credentials("my-api-id", "my-api-key");
//! let client = EvercamClient::new(config)?;
//! let camera = client.get_camera("front-door", false).await?;
//! println!("{:?}", camera.get("name"));
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

mod api;
pub mod client;
pub mod models;

pub use client::{EvercamClient, EvercamClientBuilder};
pub use evercam_core::{
    ApiError, EvercamConfig, NullLogger, Params, RequestLogger, TracingLogger, Verb,
};
pub use models::{
    ArchiveUpdate, CameraSettings, LogPage, LogQuery, NewArchive, NewSnapmail, NewUser,
    PublicCameraQuery, PublicCameras, Record, ShareOptions, ShareOutcome, ShareRequestStatus,
    SnapmailUpdate, Snapshot, SnapshotLookup, SnapshotRangeOptions, UserUpdate,
};

/// Convenient result alias that reuses the shared Evercam error type.
pub type Result<T> = evercam_core::Result<T>;
