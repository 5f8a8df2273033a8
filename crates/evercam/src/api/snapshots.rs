use bytes::Bytes;
use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, Utc};
use evercam_core::{Params, Verb};
use serde_json::Value;

use crate::client::EvercamClient;
use crate::models::{Snapshot, SnapshotLookup, SnapshotRangeOptions};
use crate::Result;

impl EvercamClient {
    /// Fetch a live frame as base64 data.
    pub async fn get_live_image(&self, camera_id: &str) -> Result<Value> {
        let data = self
            .fetch(&format!("/cameras/{camera_id}/live"), Verb::Get, Params::new())
            .await?;
        self.expect_value(data, "data")
    }

    /// List stored snapshots for a camera.
    pub async fn get_snapshots(&self, camera_id: &str) -> Result<Vec<Snapshot>> {
        let data = self
            .fetch(
                &format!("/cameras/{camera_id}/recordings/snapshots"),
                Verb::Get,
                Params::new(),
            )
            .await?;
        self.snapshot_list(data)
    }

    /// Capture and store a snapshot, optionally annotated.
    pub async fn store_snapshot(&self, camera_id: &str, notes: Option<&str>) -> Result<Snapshot> {
        let mut params = Params::new();
        params.push_opt("notes", notes);
        let data = self
            .fetch(
                &format!("/cameras/{camera_id}/recordings/snapshots"),
                Verb::Post,
                params,
            )
            .await?;
        let first = self.expect_first(data, "snapshots")?;
        self.parse_snapshot(Value::Object(first))
    }

    /// Most recent stored snapshot, or `None` if the camera has none.
    /// `complete` asks for the image data as well.
    pub async fn get_latest_snapshot(
        &self,
        camera_id: &str,
        complete: bool,
    ) -> Result<Option<Snapshot>> {
        let mut params = Params::new();
        if complete {
            params.push("with_data", true);
        }
        let data = self
            .fetch(
                &format!("/cameras/{camera_id}/recordings/snapshots/latest"),
                Verb::Get,
                params,
            )
            .await?;
        self.expect_list(data, "snapshots")?
            .into_iter()
            .next()
            .map(|entry| self.parse_snapshot(entry))
            .transpose()
    }

    /// Snapshots captured between `from` and `to`.
    pub async fn get_snapshots_in_date_range(
        &self,
        camera_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        options: &SnapshotRangeOptions,
    ) -> Result<Vec<Snapshot>> {
        let mut params = Params::new()
            .with("from", from.timestamp())
            .with("to", to.timestamp())
            .with("with_data", options.with_data)
            .with("limit", options.effective_limit());
        params.push_opt("page", options.page);
        let data = self
            .fetch(
                &format!("/cameras/{camera_id}/recordings/snapshots"),
                Verb::Get,
                params,
            )
            .await?;
        self.snapshot_list(data)
    }

    /// Days of a month that hold snapshots. Month and year default to the
    /// current local date.
    pub async fn get_snapshot_dates(
        &self,
        camera_id: &str,
        month: Option<u32>,
        year: Option<i32>,
    ) -> Result<Vec<NaiveDate>> {
        let today = Local::now().date_naive();
        let month = month.unwrap_or_else(|| today.month());
        let year = year.unwrap_or_else(|| today.year());
        let data = self
            .fetch(
                &format!("/cameras/{camera_id}/recordings/snapshots/{year}/{month}/days"),
                Verb::Get,
                Params::new(),
            )
            .await?;
        self.expect_list(data, "days")?
            .iter()
            .map(|day| {
                day.as_u64()
                    .and_then(|day| u32::try_from(day).ok())
                    .and_then(|day| NaiveDate::from_ymd_opt(year, month, day))
                    .ok_or_else(|| self.invalid_response())
            })
            .collect()
    }

    /// Hours of `date` that hold snapshots.
    pub async fn get_snapshots_by_hour(
        &self,
        camera_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<NaiveDateTime>> {
        let data = self
            .fetch(
                &format!(
                    "/cameras/{camera_id}/recordings/snapshots/{}/{}/{}/hours",
                    date.year(),
                    date.month(),
                    date.day()
                ),
                Verb::Get,
                Params::new(),
            )
            .await?;
        self.expect_list(data, "hours")?
            .iter()
            .map(|hour| {
                hour.as_u64()
                    .and_then(|hour| u32::try_from(hour).ok())
                    .and_then(|hour| date.and_hms_opt(hour, 0, 0))
                    .ok_or_else(|| self.invalid_response())
            })
            .collect()
    }

    /// Snapshot nearest to `timestamp`.
    pub async fn get_snapshot_at(
        &self,
        camera_id: &str,
        timestamp: DateTime<Utc>,
        lookup: &SnapshotLookup,
    ) -> Result<Snapshot> {
        let mut params = Params::new().with("with_data", lookup.with_data);
        params.push_opt("range", lookup.range);
        let data = self
            .fetch(
                &format!(
                    "/cameras/{camera_id}/recordings/snapshots/{}",
                    timestamp.timestamp()
                ),
                Verb::Get,
                params,
            )
            .await?;
        let first = self.expect_first(data, "snapshots")?;
        self.parse_snapshot(Value::Object(first))
    }

    /// Delete the snapshot taken at `timestamp`.
    pub async fn delete_snapshot(&self, camera_id: &str, timestamp: DateTime<Utc>) -> Result<()> {
        self.fetch(
            &format!(
                "/cameras/{camera_id}/recordings/snapshots/{}",
                timestamp.timestamp()
            ),
            Verb::Delete,
            Params::new(),
        )
        .await?;
        Ok(())
    }

    /// Current JPEG frame, byte for byte.
    pub async fn get_snapshot(&self, camera_id: &str) -> Result<Bytes> {
        self.fetch_raw(&format!("/cameras/{camera_id}/live/snapshot.jpg"))
            .await
    }

    fn snapshot_list(&self, data: Option<Value>) -> Result<Vec<Snapshot>> {
        self.expect_list(data, "snapshots")?
            .into_iter()
            .map(|entry| self.parse_snapshot(entry))
            .collect()
    }

    fn parse_snapshot(&self, entry: Value) -> Result<Snapshot> {
        serde_json::from_value(entry).map_err(|_| self.invalid_response())
    }
}
