//! Request options and response shapes for the Evercam resources.
//!
//! Most responses are handed back as loosely typed [`Record`]s because the
//! server adds fields freely. Request options are typed and rendered into
//! [`Params`] with unset values left out.

use chrono::{DateTime, NaiveTime, Utc, Weekday};
use evercam_core::Params;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::{self, Display};

/// A JSON object returned by the API.
pub type Record = Map<String, Value>;

fn join(values: &[String]) -> Option<String> {
    if values.is_empty() {
        None
    } else {
        Some(values.join(","))
    }
}

/// Camera attributes accepted by `create_camera` and `update_camera`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CameraSettings {
    /// Display name.
    pub name: Option<String>,
    /// Whether the camera is publicly listed.
    pub is_public: Option<bool>,
    /// Whether the camera shows up in discovery.
    pub discoverable: Option<bool>,
    /// Public host name or address.
    pub external_host: Option<String>,
    /// LAN host name or address.
    pub internal_host: Option<String>,
    /// Public HTTP port.
    pub external_http_port: Option<u16>,
    /// LAN HTTP port.
    pub internal_http_port: Option<u16>,
    /// Public RTSP port.
    pub external_rtsp_port: Option<u16>,
    /// LAN RTSP port.
    pub internal_rtsp_port: Option<u16>,
    /// Snapshot path on the camera.
    pub jpg_url: Option<String>,
    /// MJPEG stream path.
    pub mjpg_url: Option<String>,
    /// H.264 stream path.
    pub h264_url: Option<String>,
    /// Camera login.
    pub cam_username: Option<String>,
    /// Camera password.
    pub cam_password: Option<String>,
    /// Vendor identifier.
    pub vendor: Option<String>,
    /// Model identifier.
    pub model: Option<String>,
    /// IANA time zone name.
    pub timezone: Option<String>,
    /// Hardware address.
    pub mac_address: Option<String>,
    /// Latitude.
    pub location_lat: Option<f64>,
    /// Longitude.
    pub location_lng: Option<f64>,
    /// Any other attribute, sent as given.
    pub extra: Params,
}

impl CameraSettings {
    /// Render the set attributes.
    #[must_use]
    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        params.push_opt("name", self.name.as_ref());
        params.push_opt("is_public", self.is_public);
        params.push_opt("discoverable", self.discoverable);
        params.push_opt("external_host", self.external_host.as_ref());
        params.push_opt("internal_host", self.internal_host.as_ref());
        params.push_opt("external_http_port", self.external_http_port);
        params.push_opt("internal_http_port", self.internal_http_port);
        params.push_opt("external_rtsp_port", self.external_rtsp_port);
        params.push_opt("internal_rtsp_port", self.internal_rtsp_port);
        params.push_opt("jpg_url", self.jpg_url.as_ref());
        params.push_opt("mjpg_url", self.mjpg_url.as_ref());
        params.push_opt("h264_url", self.h264_url.as_ref());
        params.push_opt("cam_username", self.cam_username.as_ref());
        params.push_opt("cam_password", self.cam_password.as_ref());
        params.push_opt("vendor", self.vendor.as_ref());
        params.push_opt("model", self.model.as_ref());
        params.push_opt("timezone", self.timezone.as_ref());
        params.push_opt("mac_address", self.mac_address.as_ref());
        params.push_opt("location_lat", self.location_lat);
        params.push_opt("location_lng", self.location_lng);
        params.extend(self.extra.clone());
        params
    }

    /// Returns true when no attribute is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_params().is_empty()
    }
}

/// Optional extras for `share_camera`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ShareOptions {
    /// User granting the share.
    pub grantor: Option<String>,
    /// Message included in the notification email.
    pub message: Option<String>,
    /// Whether to notify the recipient.
    pub notify: Option<bool>,
}

impl ShareOptions {
    pub(crate) fn to_params(&self) -> Params {
        let mut params = Params::new();
        params.push_opt("grantor", self.grantor.as_ref());
        params.push_opt("message", self.message.as_ref());
        params.push_opt("notify", self.notify);
        params
    }
}

/// Filter for pending share requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareRequestStatus {
    /// Not yet accepted.
    Pending,
    /// Accepted by the recipient.
    Used,
    /// Withdrawn by the owner.
    Cancelled,
}

impl ShareRequestStatus {
    /// Wire form of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Used => "USED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl Display for ShareRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of `share_camera`: shares created plus per-recipient failures.
#[derive(Debug, Clone, PartialEq)]
pub struct ShareOutcome {
    /// Shares or share requests that were created.
    pub shares: Vec<Value>,
    /// Recipients that could not be shared with.
    pub errors: Vec<Value>,
}

/// A stored snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Capture time.
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: DateTime<Utc>,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Base64 image data, only present when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    /// Remaining fields as returned by the server.
    #[serde(flatten)]
    pub extra: Record,
}

/// Options for `get_snapshots_in_date_range`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotRangeOptions {
    /// Include image data.
    pub with_data: bool,
    /// Page size; 10 with data and 100 without when unset.
    pub limit: Option<u32>,
    /// Page number.
    pub page: Option<u32>,
}

impl SnapshotRangeOptions {
    pub(crate) fn effective_limit(&self) -> u32 {
        self.limit
            .unwrap_or(if self.with_data { 10 } else { 100 })
    }
}

/// Options for `get_snapshot_at`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotLookup {
    /// Include image data.
    pub with_data: bool,
    /// Search window in seconds around the timestamp.
    pub range: Option<u32>,
}

/// Changes for `update_user`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UserUpdate {
    /// First name.
    pub firstname: Option<String>,
    /// Last name.
    pub lastname: Option<String>,
    /// User name.
    pub username: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Country code.
    pub country: Option<String>,
}

impl UserUpdate {
    /// Render the set fields.
    #[must_use]
    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        params.push_opt("firstname", self.firstname.as_ref());
        params.push_opt("lastname", self.lastname.as_ref());
        params.push_opt("username", self.username.as_ref());
        params.push_opt("email", self.email.as_ref());
        params.push_opt("country", self.country.as_ref());
        params
    }

    /// Returns true when nothing would change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_params().is_empty()
    }
}

/// Registration details for `create_user`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// First name.
    pub firstname: String,
    /// Last name.
    pub lastname: String,
    /// User name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
    /// Sign-up token.
    pub token: String,
    /// Country code.
    pub country: Option<String>,
    /// Share request being accepted by signing up.
    pub share_request_key: Option<String>,
    /// Page the user was referred from.
    pub referral_url: Option<String>,
}

impl NewUser {
    pub(crate) fn to_params(&self) -> Params {
        let mut params = Params::new()
            .with("firstname", &self.firstname)
            .with("lastname", &self.lastname)
            .with("username", &self.username)
            .with("email", &self.email)
            .with("password", &self.password)
            .with("token", &self.token);
        params.push_opt("country", self.country.as_ref());
        params.push_opt("share_request_key", self.share_request_key.as_ref());
        params.push_opt("referral_url", self.referral_url.as_ref());
        params
    }
}

/// Filters for `get_logs`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LogQuery {
    /// Earliest entry.
    pub from: Option<DateTime<Utc>>,
    /// Latest entry.
    pub to: Option<DateTime<Utc>>,
    /// Page size.
    pub limit: Option<u32>,
    /// Page number.
    pub page: Option<u32>,
    /// Entry types to include.
    pub types: Vec<String>,
    /// Return entries as objects rather than strings.
    pub objects: Option<bool>,
}

impl LogQuery {
    /// Convert to request parameters.
    #[must_use]
    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        params.push_opt_with("from", self.from, |at| at.timestamp().to_string());
        params.push_opt_with("to", self.to, |at| at.timestamp().to_string());
        params.push_opt("limit", self.limit);
        params.push_opt("page", self.page);
        params.push_opt("types", join(&self.types));
        params.push_opt("objects", self.objects);
        params
    }
}

/// One page of camera log entries.
#[derive(Debug, Clone, PartialEq)]
pub struct LogPage {
    /// Entries on this page.
    pub logs: Vec<Value>,
    /// Page count as reported by the server.
    pub pages: Value,
}

/// Search criteria for `get_public_cameras`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PublicCameraQuery {
    /// Number of results to skip.
    pub offset: Option<u32>,
    /// Maximum number of results.
    pub limit: Option<u32>,
    /// Match identifiers case-sensitively.
    pub case_sensitive: Option<bool>,
    /// Identifier prefix.
    pub id_starts_with: Option<String>,
    /// Identifier substring.
    pub id_contains: Option<String>,
    /// Identifier suffix.
    pub id_ends_with: Option<String>,
    /// Address or `lat,lng` to search around.
    pub is_near_to: Option<String>,
    /// Search radius in kilometres.
    pub within_distance: Option<f64>,
}

impl PublicCameraQuery {
    /// Convert to request parameters.
    #[must_use]
    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        params.push_opt("offset", self.offset);
        params.push_opt("limit", self.limit);
        params.push_opt("case_sensitive", self.case_sensitive);
        params.push_opt("id_starts_with", self.id_starts_with.as_ref());
        params.push_opt("id_contains", self.id_contains.as_ref());
        params.push_opt("id_ends_with", self.id_ends_with.as_ref());
        params.push_opt("is_near_to", self.is_near_to.as_ref());
        params.push_opt("within_distance", self.within_distance);
        params
    }
}

/// Public camera search results.
#[derive(Debug, Clone, PartialEq)]
pub struct PublicCameras {
    /// Matching cameras.
    pub cameras: Vec<Value>,
    /// Page count, when the server reports one.
    pub pages: Option<Value>,
}

/// Details for `create_archive`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArchive {
    /// Archive title.
    pub title: String,
    /// Start of the archived period.
    pub from_date: DateTime<Utc>,
    /// End of the archived period.
    pub to_date: DateTime<Utc>,
    /// User requesting the archive.
    pub requested_by: String,
    /// Burn the timestamp into each frame.
    pub embed_time: Option<bool>,
    /// Make the archive public.
    pub public: Option<bool>,
}

impl NewArchive {
    pub(crate) fn to_params(&self) -> Params {
        let mut params = Params::new()
            .with("title", &self.title)
            .with("from_date", self.from_date.timestamp())
            .with("to_date", self.to_date.timestamp())
            .with("requested_by", &self.requested_by);
        params.push_opt("embed_time", self.embed_time);
        params.push_opt("public", self.public);
        params
    }
}

/// Changes for `update_archive`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ArchiveUpdate {
    /// Archive title.
    pub title: Option<String>,
    /// Processing status.
    pub status: Option<String>,
    /// Burn the timestamp into each frame.
    pub embed_time: Option<bool>,
    /// Make the archive public.
    pub public: Option<bool>,
}

impl ArchiveUpdate {
    /// Render the set fields.
    #[must_use]
    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        params.push_opt("title", self.title.as_ref());
        params.push_opt("status", self.status.as_ref());
        params.push_opt("embed_time", self.embed_time);
        params.push_opt("public", self.public);
        params
    }

    /// Returns true when nothing would change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_params().is_empty()
    }
}

fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn join_days(days: &[Weekday]) -> Option<String> {
    let names: Vec<String> = days.iter().map(|d| day_name(*d).to_string()).collect();
    join(&names)
}

fn notify_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Details for `create_snapmail`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSnapmail {
    /// Email subject.
    pub subject: String,
    /// Cameras included in the mail.
    pub camera_exids: Vec<String>,
    /// Recipient addresses.
    pub recipients: Vec<String>,
    /// Days the mail goes out.
    pub notify_days: Vec<Weekday>,
    /// Time of day the mail goes out.
    pub notify_time: NaiveTime,
    /// IANA time zone for `notify_time`.
    pub timezone: Option<String>,
    /// Owner of the snapmail.
    pub user_id: Option<String>,
}

impl NewSnapmail {
    pub(crate) fn to_params(&self) -> Params {
        let mut params = Params::new()
            .with("subject", &self.subject)
            .with("camera_exids", self.camera_exids.join(","))
            .with("recipients", self.recipients.join(","))
            .with(
                "notify_days",
                join_days(&self.notify_days).unwrap_or_default(),
            )
            .with("notify_time", notify_time(self.notify_time));
        params.push_opt("timezone", self.timezone.as_ref());
        params.push_opt("user_id", self.user_id.as_ref());
        params
    }
}

/// Changes for `update_snapmail`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SnapmailUpdate {
    /// Email subject.
    pub subject: Option<String>,
    /// Cameras included in the mail; left alone when empty.
    pub camera_exids: Vec<String>,
    /// Recipient addresses; left alone when empty.
    pub recipients: Vec<String>,
    /// Days the mail goes out; left alone when empty.
    pub notify_days: Vec<Weekday>,
    /// Time of day the mail goes out.
    pub notify_time: Option<NaiveTime>,
    /// IANA time zone for `notify_time`.
    pub timezone: Option<String>,
    /// Pause or resume delivery.
    pub is_paused: Option<bool>,
}

impl SnapmailUpdate {
    /// Render the set fields.
    #[must_use]
    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        params.push_opt("subject", self.subject.as_ref());
        params.push_opt("camera_exids", join(&self.camera_exids));
        params.push_opt("recipients", join(&self.recipients));
        params.push_opt("notify_days", join_days(&self.notify_days));
        params.push_opt_with("notify_time", self.notify_time, notify_time);
        params.push_opt("timezone", self.timezone.as_ref());
        params.push_opt("is_paused", self.is_paused);
        params
    }

    /// Returns true when nothing would change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_params().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn camera_settings_skip_unset_fields() {
        let settings = CameraSettings {
            name: Some("blah_camera".into()),
            cam_password: Some("different".into()),
            ..CameraSettings::default()
        };
        let params = settings.to_params();
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("name"), Some("blah_camera"));
        assert_eq!(params.get("cam_password"), Some("different"));
        assert!(CameraSettings::default().is_empty());
    }

    #[test]
    fn camera_settings_extra_overrides_typed_value() {
        let settings = CameraSettings {
            name: Some("typed".into()),
            extra: Params::new().with("name", "extra").with("cloud_recording", "on"),
            ..CameraSettings::default()
        };
        let params = settings.to_params();
        assert_eq!(params.get("name"), Some("extra"));
        assert_eq!(params.get("cloud_recording"), Some("on"));
    }

    #[test]
    fn snapshot_converts_epoch_seconds() {
        let snapshot: Snapshot = serde_json::from_value(json!({
            "created_at": 1_400_000_000,
            "notes": "front",
            "camera": "test_camera"
        }))
        .unwrap();
        assert_eq!(
            snapshot.created_at,
            Utc.timestamp_opt(1_400_000_000, 0).unwrap()
        );
        assert_eq!(snapshot.notes.as_deref(), Some("front"));
        assert!(snapshot.data.is_none());
        assert_eq!(snapshot.extra.get("camera"), Some(&json!("test_camera")));
    }

    #[test]
    fn snapshot_range_limit_depends_on_data() {
        assert_eq!(SnapshotRangeOptions::default().effective_limit(), 100);
        let with_data = SnapshotRangeOptions {
            with_data: true,
            ..SnapshotRangeOptions::default()
        };
        assert_eq!(with_data.effective_limit(), 10);
        let explicit = SnapshotRangeOptions {
            with_data: true,
            limit: Some(3),
            page: None,
        };
        assert_eq!(explicit.effective_limit(), 3);
    }

    #[test]
    fn log_query_renders_epoch_and_joined_types() {
        let query = LogQuery {
            from: Some(Utc.timestamp_opt(1_000, 0).unwrap()),
            types: vec!["online".into(), "offline".into()],
            objects: Some(true),
            ..LogQuery::default()
        };
        let params = query.to_params();
        assert_eq!(params.get("from"), Some("1000"));
        assert_eq!(params.get("types"), Some("online,offline"));
        assert_eq!(params.get("objects"), Some("true"));
        assert!(!params.contains("to"));
        assert!(LogQuery::default().to_params().is_empty());
    }

    #[test]
    fn share_request_status_wire_names() {
        assert_eq!(ShareRequestStatus::Pending.to_string(), "PENDING");
        assert_eq!(ShareRequestStatus::Used.as_str(), "USED");
        assert_eq!(ShareRequestStatus::Cancelled.as_str(), "CANCELLED");
    }

    #[test]
    fn new_snapmail_formats_days_and_time() {
        let snapmail = NewSnapmail {
            subject: "Daily".into(),
            camera_exids: vec!["a".into(), "b".into()],
            recipients: vec!["x@example.com".into()],
            notify_days: vec![Weekday::Mon, Weekday::Fri],
            notify_time: NaiveTime::from_hms_opt(9, 5, 0).unwrap(),
            timezone: None,
            user_id: None,
        };
        let params = snapmail.to_params();
        assert_eq!(params.get("camera_exids"), Some("a,b"));
        assert_eq!(params.get("notify_days"), Some("Monday,Friday"));
        assert_eq!(params.get("notify_time"), Some("09:05"));
        assert!(!params.contains("timezone"));
    }

    #[test]
    fn updates_report_emptiness() {
        assert!(SnapmailUpdate::default().is_empty());
        assert!(ArchiveUpdate::default().is_empty());
        assert!(UserUpdate::default().is_empty());
        let update = SnapmailUpdate {
            is_paused: Some(true),
            ..SnapmailUpdate::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn new_archive_sends_epoch_dates() {
        let archive = NewArchive {
            title: "Morning".into(),
            from_date: Utc.timestamp_opt(100, 0).unwrap(),
            to_date: Utc.timestamp_opt(200, 0).unwrap(),
            requested_by: "joe".into(),
            embed_time: Some(false),
            public: None,
        };
        let params = archive.to_params();
        assert_eq!(params.get("from_date"), Some("100"));
        assert_eq!(params.get("to_date"), Some("200"));
        assert_eq!(params.get("embed_time"), Some("false"));
        assert!(!params.contains("public"));
    }
}
