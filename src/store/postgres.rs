use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{Postgres, QueryBuilder};

use super::{Store, StoreResult};
use crate::config::Config;
use crate::models::{
    Event, EventAttendance, EventPatch, EventStatus, Location, Photo, Role, User, UserPatch,
};
use crate::utils::error::StoreError;

const EVENT_COLUMNS: &str = "event_id, title, description, start_time, end_time, \
     family_friendly, trash_collected, number_of_attendees, status_id, location_id, \
     is_deleted, version";
const USER_COLUMNS: &str =
    "user_id, name, email, password_hash, role_id, created_date, is_deleted, version";
const PHOTO_COLUMNS: &str = "photo_id, event_id, photo_data, caption, version";
const ATTENDANCE_COLUMNS: &str = "event_id, user_id, check_in";

/// [`Store`] backed by a Postgres pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    statement_timeout: Duration,
}

impl PgStore {
    pub fn new(pool: PgPool, statement_timeout: Duration) -> Self {
        Self {
            pool,
            statement_timeout,
        }
    }

    pub async fn connect(config: &Config) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.statement_timeout)
            .connect(&config.database_url)
            .await?;
        Ok(Self::new(pool, config.statement_timeout))
    }

    /// Runs one statement, treating an expired timeout as cancellation.
    async fn timed<T, F>(&self, statement: F) -> StoreResult<T>
    where
        F: Future<Output = Result<T, sqlx::Error>> + Send,
    {
        match tokio::time::timeout(self.statement_timeout, statement).await {
            Ok(result) => result.map_err(StoreError::from),
            Err(_) => Err(StoreError::Cancelled),
        }
    }

    async fn statuses(&self) -> StoreResult<HashMap<i32, EventStatus>> {
        let rows: Vec<EventStatus> = self
            .timed(sqlx::query_as("SELECT status_id, name FROM statuses").fetch_all(&self.pool))
            .await?;
        Ok(rows.into_iter().map(|s| (s.status_id, s)).collect())
    }

    async fn roles(&self) -> StoreResult<HashMap<i32, Role>> {
        let rows: Vec<Role> = self
            .timed(sqlx::query_as("SELECT role_id, name FROM roles").fetch_all(&self.pool))
            .await?;
        Ok(rows.into_iter().map(|r| (r.role_id, r)).collect())
    }

    async fn users_by_id(&self, ids: Vec<i32>) -> StoreResult<HashMap<i32, User>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = ANY($1)");
        let rows: Vec<User> = self
            .timed(sqlx::query_as(&sql).bind(ids).fetch_all(&self.pool))
            .await?;
        Ok(rows.into_iter().map(|u| (u.user_id, u)).collect())
    }

    async fn events_by_id(&self, ids: Vec<i32>) -> StoreResult<HashMap<i32, Event>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let sql = format!("SELECT {EVENT_COLUMNS} FROM events WHERE event_id = ANY($1)");
        let rows: Vec<Event> = self
            .timed(sqlx::query_as(&sql).bind(ids).fetch_all(&self.pool))
            .await?;
        Ok(rows.into_iter().map(|e| (e.event_id, e)).collect())
    }

    /// Fills status, location, photos and attendances (with users) for a
    /// batch of events using one query per relation.
    async fn load_event_navigations(&self, events: &mut [Event]) -> StoreResult<()> {
        if events.is_empty() {
            return Ok(());
        }
        let event_ids: Vec<i32> = events.iter().map(|e| e.event_id).collect();
        let location_ids: Vec<i32> = events.iter().map(|e| e.location_id).collect();

        let statuses = self.statuses().await?;
        let locations: Vec<Location> = self
            .timed(
                sqlx::query_as(
                    "SELECT location_id, latitude, longitude FROM locations \
                     WHERE location_id = ANY($1)",
                )
                .bind(location_ids)
                .fetch_all(&self.pool),
            )
            .await?;
        let locations: HashMap<i32, Location> =
            locations.into_iter().map(|l| (l.location_id, l)).collect();

        let photo_sql = format!(
            "SELECT {PHOTO_COLUMNS} FROM photos WHERE event_id = ANY($1) ORDER BY photo_id"
        );
        let photos: Vec<Photo> = self
            .timed(
                sqlx::query_as(&photo_sql)
                    .bind(event_ids.clone())
                    .fetch_all(&self.pool),
            )
            .await?;

        let attendance_sql = format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM event_attendances WHERE event_id = ANY($1) \
             ORDER BY event_id, user_id"
        );
        let mut attendances: Vec<EventAttendance> = self
            .timed(
                sqlx::query_as(&attendance_sql)
                    .bind(event_ids)
                    .fetch_all(&self.pool),
            )
            .await?;
        let users = self
            .users_by_id(attendances.iter().map(|a| a.user_id).collect())
            .await?;
        for attendance in &mut attendances {
            attendance.user = users.get(&attendance.user_id).cloned();
        }

        for event in events.iter_mut() {
            event.status = statuses.get(&event.status_id).cloned();
            event.location = locations.get(&event.location_id).cloned();
            event.photos = photos
                .iter()
                .filter(|p| p.event_id == event.event_id)
                .cloned()
                .collect();
            event.attendances = attendances
                .iter()
                .filter(|a| a.event_id == event.event_id)
                .cloned()
                .collect();
        }
        Ok(())
    }

    async fn load_attendance_navigations(
        &self,
        attendances: &mut [EventAttendance],
    ) -> StoreResult<()> {
        let events = self
            .events_by_id(attendances.iter().map(|a| a.event_id).collect())
            .await?;
        let users = self
            .users_by_id(attendances.iter().map(|a| a.user_id).collect())
            .await?;
        for attendance in attendances.iter_mut() {
            attendance.event = events.get(&attendance.event_id).cloned().map(Box::new);
            attendance.user = users.get(&attendance.user_id).cloned();
        }
        Ok(())
    }

    async fn attendances_where(
        &self,
        column: &str,
        id: Option<i32>,
    ) -> StoreResult<Vec<EventAttendance>> {
        let mut attendances: Vec<EventAttendance> = match id {
            Some(id) => {
                let sql = format!(
                    "SELECT {ATTENDANCE_COLUMNS} FROM event_attendances WHERE {column} = $1 \
                     ORDER BY event_id, user_id"
                );
                self.timed(sqlx::query_as(&sql).bind(id).fetch_all(&self.pool))
                    .await?
            }
            None => {
                let sql = format!(
                    "SELECT {ATTENDANCE_COLUMNS} FROM event_attendances ORDER BY event_id, user_id"
                );
                self.timed(sqlx::query_as(&sql).fetch_all(&self.pool))
                    .await?
            }
        };
        self.load_attendance_navigations(&mut attendances).await?;
        Ok(attendances)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn fetch_status(&self, status_id: i32) -> StoreResult<Option<EventStatus>> {
        self.timed(
            sqlx::query_as("SELECT status_id, name FROM statuses WHERE status_id = $1")
                .bind(status_id)
                .fetch_optional(&self.pool),
        )
        .await
    }

    async fn fetch_location(&self, location_id: i32) -> StoreResult<Option<Location>> {
        self.timed(
            sqlx::query_as(
                "SELECT location_id, latitude, longitude FROM locations WHERE location_id = $1",
            )
            .bind(location_id)
            .fetch_optional(&self.pool),
        )
        .await
    }

    async fn fetch_role(&self, role_id: i32) -> StoreResult<Option<Role>> {
        self.timed(
            sqlx::query_as("SELECT role_id, name FROM roles WHERE role_id = $1")
                .bind(role_id)
                .fetch_optional(&self.pool),
        )
        .await
    }

    async fn insert_event(&self, event: &Event, location: &Location) -> StoreResult<Event> {
        let sql = format!(
            "WITH new_location AS ( \
                 INSERT INTO locations (latitude, longitude) VALUES ($1, $2) \
                 RETURNING location_id \
             ) \
             INSERT INTO events (title, description, start_time, end_time, family_friendly, \
                 trash_collected, number_of_attendees, status_id, location_id, is_deleted, version) \
             SELECT $3, $4, $5, $6, $7, $8, $9, $10, new_location.location_id, FALSE, 1 \
             FROM new_location \
             RETURNING {EVENT_COLUMNS}"
        );
        self.timed(
            sqlx::query_as(&sql)
                .bind(location.latitude)
                .bind(location.longitude)
                .bind(&event.title)
                .bind(&event.description)
                .bind(event.start_time)
                .bind(event.end_time)
                .bind(event.family_friendly)
                .bind(event.trash_collected)
                .bind(event.number_of_attendees)
                .bind(event.status_id)
                .fetch_one(&self.pool),
        )
        .await
    }

    async fn fetch_event(&self, event_id: i32) -> StoreResult<Option<Event>> {
        let sql = format!("SELECT {EVENT_COLUMNS} FROM events WHERE event_id = $1");
        let event: Option<Event> = self
            .timed(
                sqlx::query_as(&sql)
                    .bind(event_id)
                    .fetch_optional(&self.pool),
            )
            .await?;
        let Some(event) = event else {
            return Ok(None);
        };
        let mut events = [event];
        self.load_event_navigations(&mut events).await?;
        let [event] = events;
        Ok(Some(event))
    }

    async fn fetch_events(&self) -> StoreResult<Vec<Event>> {
        let sql = format!("SELECT {EVENT_COLUMNS} FROM events ORDER BY event_id");
        let mut events: Vec<Event> = self
            .timed(sqlx::query_as(&sql).fetch_all(&self.pool))
            .await?;
        self.load_event_navigations(&mut events).await?;
        Ok(events)
    }

    async fn update_event(
        &self,
        event_id: i32,
        expected_version: i32,
        patch: &EventPatch,
    ) -> StoreResult<u64> {
        let mut query = QueryBuilder::<Postgres>::new("UPDATE events SET ");
        let mut columns = query.separated(", ");
        if let Some(title) = &patch.title {
            columns.push("title = ").push_bind_unseparated(title.clone());
        }
        if let Some(description) = &patch.description {
            columns
                .push("description = ")
                .push_bind_unseparated(description.clone());
        }
        if let Some(start_time) = patch.start_time {
            columns.push("start_time = ").push_bind_unseparated(start_time);
        }
        if let Some(end_time) = patch.end_time {
            columns.push("end_time = ").push_bind_unseparated(end_time);
        }
        if let Some(family_friendly) = patch.family_friendly {
            columns
                .push("family_friendly = ")
                .push_bind_unseparated(family_friendly);
        }
        if let Some(trash_collected) = patch.trash_collected {
            columns
                .push("trash_collected = ")
                .push_bind_unseparated(trash_collected);
        }
        if let Some(status_id) = patch.status_id {
            columns.push("status_id = ").push_bind_unseparated(status_id);
        }
        if let Some(location_id) = patch.location_id {
            columns.push("location_id = ").push_bind_unseparated(location_id);
        }
        columns.push("version = version + 1");
        query
            .push(" WHERE event_id = ")
            .push_bind(event_id)
            .push(" AND version = ")
            .push_bind(expected_version)
            .push(" AND is_deleted = FALSE");

        let result = self.timed(query.build().execute(&self.pool)).await?;
        Ok(result.rows_affected())
    }

    async fn soft_delete_event(&self, event_id: i32, expected_version: i32) -> StoreResult<u64> {
        let result = self
            .timed(
                sqlx::query(
                    "UPDATE events SET is_deleted = TRUE, version = version + 1 \
                     WHERE event_id = $1 AND version = $2 AND is_deleted = FALSE",
                )
                .bind(event_id)
                .bind(expected_version)
                .execute(&self.pool),
            )
            .await?;
        Ok(result.rows_affected())
    }

    async fn insert_user(&self, user: &User) -> StoreResult<User> {
        let sql = format!(
            "INSERT INTO users (name, email, password_hash, role_id, created_date, is_deleted, \
                 version) \
             VALUES ($1, $2, $3, $4, $5, FALSE, 1) \
             RETURNING {USER_COLUMNS}"
        );
        self.timed(
            sqlx::query_as(&sql)
                .bind(&user.name)
                .bind(&user.email)
                .bind(&user.password_hash)
                .bind(user.role_id)
                .bind(user.created_date)
                .fetch_one(&self.pool),
        )
        .await
    }

    async fn fetch_user(&self, user_id: i32) -> StoreResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = $1");
        let user: Option<User> = self
            .timed(sqlx::query_as(&sql).bind(user_id).fetch_optional(&self.pool))
            .await?;
        let Some(mut user) = user else {
            return Ok(None);
        };
        user.role = self.fetch_role(user.role_id).await?;
        Ok(Some(user))
    }

    async fn fetch_users(&self) -> StoreResult<Vec<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY user_id");
        let mut users: Vec<User> = self
            .timed(sqlx::query_as(&sql).fetch_all(&self.pool))
            .await?;
        let roles = self.roles().await?;
        for user in &mut users {
            user.role = roles.get(&user.role_id).cloned();
        }
        Ok(users)
    }

    async fn fetch_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        self.timed(sqlx::query_as(&sql).bind(email).fetch_optional(&self.pool))
            .await
    }

    async fn update_user(
        &self,
        user_id: i32,
        expected_version: i32,
        patch: &UserPatch,
    ) -> StoreResult<u64> {
        let mut query = QueryBuilder::<Postgres>::new("UPDATE users SET ");
        let mut columns = query.separated(", ");
        if let Some(name) = &patch.name {
            columns.push("name = ").push_bind_unseparated(name.clone());
        }
        if let Some(email) = &patch.email {
            columns.push("email = ").push_bind_unseparated(email.clone());
        }
        if let Some(password_hash) = &patch.password_hash {
            columns
                .push("password_hash = ")
                .push_bind_unseparated(password_hash.clone());
        }
        if let Some(role_id) = patch.role_id {
            columns.push("role_id = ").push_bind_unseparated(role_id);
        }
        columns.push("version = version + 1");
        query
            .push(" WHERE user_id = ")
            .push_bind(user_id)
            .push(" AND version = ")
            .push_bind(expected_version)
            .push(" AND is_deleted = FALSE");

        let result = self.timed(query.build().execute(&self.pool)).await?;
        Ok(result.rows_affected())
    }

    async fn soft_delete_user(&self, user_id: i32, expected_version: i32) -> StoreResult<u64> {
        let result = self
            .timed(
                sqlx::query(
                    "UPDATE users SET is_deleted = TRUE, version = version + 1 \
                     WHERE user_id = $1 AND version = $2 AND is_deleted = FALSE",
                )
                .bind(user_id)
                .bind(expected_version)
                .execute(&self.pool),
            )
            .await?;
        Ok(result.rows_affected())
    }

    async fn insert_photo(&self, photo: &Photo) -> StoreResult<Photo> {
        let sql = format!(
            "INSERT INTO photos (event_id, photo_data, caption, version) VALUES ($1, $2, $3, 1) \
             RETURNING {PHOTO_COLUMNS}"
        );
        self.timed(
            sqlx::query_as(&sql)
                .bind(photo.event_id)
                .bind(&photo.photo_data)
                .bind(&photo.caption)
                .fetch_one(&self.pool),
        )
        .await
    }

    async fn fetch_photo(&self, photo_id: i32) -> StoreResult<Option<Photo>> {
        let sql = format!("SELECT {PHOTO_COLUMNS} FROM photos WHERE photo_id = $1");
        self.timed(sqlx::query_as(&sql).bind(photo_id).fetch_optional(&self.pool))
            .await
    }

    async fn fetch_photos(&self) -> StoreResult<Vec<Photo>> {
        let sql = format!("SELECT {PHOTO_COLUMNS} FROM photos ORDER BY photo_id");
        self.timed(sqlx::query_as(&sql).fetch_all(&self.pool)).await
    }

    async fn fetch_photos_by_event(&self, event_id: i32) -> StoreResult<Vec<Photo>> {
        let sql =
            format!("SELECT {PHOTO_COLUMNS} FROM photos WHERE event_id = $1 ORDER BY photo_id");
        self.timed(sqlx::query_as(&sql).bind(event_id).fetch_all(&self.pool))
            .await
    }

    async fn update_photo_caption(
        &self,
        photo_id: i32,
        expected_version: i32,
        caption: Option<&str>,
    ) -> StoreResult<u64> {
        let result = self
            .timed(
                sqlx::query(
                    "UPDATE photos SET caption = $1, version = version + 1 \
                     WHERE photo_id = $2 AND version = $3",
                )
                .bind(caption)
                .bind(photo_id)
                .bind(expected_version)
                .execute(&self.pool),
            )
            .await?;
        Ok(result.rows_affected())
    }

    async fn delete_photo(&self, photo_id: i32, expected_version: i32) -> StoreResult<u64> {
        let result = self
            .timed(
                sqlx::query("DELETE FROM photos WHERE photo_id = $1 AND version = $2")
                    .bind(photo_id)
                    .bind(expected_version)
                    .execute(&self.pool),
            )
            .await?;
        Ok(result.rows_affected())
    }

    async fn insert_attendance(
        &self,
        attendance: &EventAttendance,
    ) -> StoreResult<EventAttendance> {
        let sql = format!(
            "INSERT INTO event_attendances (event_id, user_id, check_in) VALUES ($1, $2, $3) \
             RETURNING {ATTENDANCE_COLUMNS}"
        );
        self.timed(
            sqlx::query_as(&sql)
                .bind(attendance.event_id)
                .bind(attendance.user_id)
                .bind(attendance.check_in)
                .fetch_one(&self.pool),
        )
        .await
    }

    async fn fetch_attendance(
        &self,
        event_id: i32,
        user_id: i32,
    ) -> StoreResult<Option<EventAttendance>> {
        let sql = format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM event_attendances \
             WHERE event_id = $1 AND user_id = $2"
        );
        let attendance: Option<EventAttendance> = self
            .timed(
                sqlx::query_as(&sql)
                    .bind(event_id)
                    .bind(user_id)
                    .fetch_optional(&self.pool),
            )
            .await?;
        let Some(attendance) = attendance else {
            return Ok(None);
        };
        let mut attendances = [attendance];
        self.load_attendance_navigations(&mut attendances).await?;
        let [attendance] = attendances;
        Ok(Some(attendance))
    }

    async fn fetch_attendances(&self) -> StoreResult<Vec<EventAttendance>> {
        self.attendances_where("event_id", None).await
    }

    async fn fetch_attendances_by_event(&self, event_id: i32) -> StoreResult<Vec<EventAttendance>> {
        self.attendances_where("event_id", Some(event_id)).await
    }

    async fn fetch_attendances_by_user(&self, user_id: i32) -> StoreResult<Vec<EventAttendance>> {
        self.attendances_where("user_id", Some(user_id)).await
    }

    async fn update_attendance_check_in(
        &self,
        event_id: i32,
        user_id: i32,
        expected: Option<DateTime<Utc>>,
        check_in: Option<DateTime<Utc>>,
    ) -> StoreResult<u64> {
        let result = self
            .timed(
                sqlx::query(
                    "UPDATE event_attendances SET check_in = $1 \
                     WHERE event_id = $2 AND user_id = $3 AND check_in IS NOT DISTINCT FROM $4",
                )
                .bind(check_in)
                .bind(event_id)
                .bind(user_id)
                .bind(expected)
                .execute(&self.pool),
            )
            .await?;
        Ok(result.rows_affected())
    }

    async fn delete_attendance(&self, event_id: i32, user_id: i32) -> StoreResult<u64> {
        let result = self
            .timed(
                sqlx::query("DELETE FROM event_attendances WHERE event_id = $1 AND user_id = $2")
                    .bind(event_id)
                    .bind(user_id)
                    .execute(&self.pool),
            )
            .await?;
        Ok(result.rows_affected())
    }

    async fn run_nightly_cleanup(&self) -> StoreResult<()> {
        self.timed(sqlx::query("CALL nightly_cleanup()").execute(&self.pool))
            .await?;
        Ok(())
    }

    async fn run_status_update(&self) -> StoreResult<()> {
        self.timed(sqlx::query("CALL update_event_statuses()").execute(&self.pool))
            .await?;
        Ok(())
    }
}
