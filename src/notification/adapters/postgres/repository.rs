//! `PostgreSQL` repository implementation for notification preferences.

use super::{
    models::{PreferencesChanges, PreferencesRow},
    schema::notification_preferences,
};
use crate::account::domain::AccountId;
use crate::notification::{
    domain::{NotificationPreferences, PersistedPreferencesData},
    ports::{PreferencesRepository, PreferencesRepositoryError, PreferencesRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by preference adapters.
pub type PreferencesPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed preferences repository.
#[derive(Debug, Clone)]
pub struct PostgresPreferencesRepository {
    pool: PreferencesPgPool,
}

impl PostgresPreferencesRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PreferencesPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> PreferencesRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> PreferencesRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool
                .get()
                .map_err(PreferencesRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(PreferencesRepositoryError::persistence)?
    }
}

#[async_trait]
impl PreferencesRepository for PostgresPreferencesRepository {
    async fn insert(
        &self,
        preferences: &NotificationPreferences,
    ) -> PreferencesRepositoryResult<()> {
        let account_id = preferences.account_id();
        let row = to_row(preferences);

        self.run_blocking(move |connection| {
            diesel::insert_into(notification_preferences::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        PreferencesRepositoryError::DuplicatePreferences(account_id)
                    }
                    _ => PreferencesRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(
        &self,
        preferences: &NotificationPreferences,
    ) -> PreferencesRepositoryResult<()> {
        let account_id = preferences.account_id();
        let changes = to_changes(preferences);

        self.run_blocking(move |connection| {
            let affected = diesel::update(
                notification_preferences::table
                    .filter(notification_preferences::account_id.eq(account_id.into_inner())),
            )
            .set(&changes)
            .execute(connection)
            .map_err(PreferencesRepositoryError::persistence)?;

            if affected == 0 {
                return Err(PreferencesRepositoryError::NotFound(account_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_active_by_account(
        &self,
        account_id: AccountId,
    ) -> PreferencesRepositoryResult<Option<NotificationPreferences>> {
        self.run_blocking(move |connection| {
            let row = notification_preferences::table
                .filter(notification_preferences::account_id.eq(account_id.into_inner()))
                .filter(notification_preferences::active.eq(true))
                .select(PreferencesRow::as_select())
                .first::<PreferencesRow>(connection)
                .optional()
                .map_err(PreferencesRepositoryError::persistence)?;
            Ok(row.map(row_to_preferences))
        })
        .await
    }
}

fn to_row(preferences: &NotificationPreferences) -> PreferencesRow {
    PreferencesRow {
        account_id: preferences.account_id().into_inner(),
        email_enabled: preferences.channel_enabled(crate::notification::domain::Channel::Email),
        push_enabled: preferences.channel_enabled(crate::notification::domain::Channel::Push),
        sms_enabled: preferences.channel_enabled(crate::notification::domain::Channel::Sms),
        active: preferences.is_active(),
        created_at: preferences.created_at(),
        updated_at: preferences.updated_at(),
    }
}

fn to_changes(preferences: &NotificationPreferences) -> PreferencesChanges {
    PreferencesChanges {
        email_enabled: preferences.channel_enabled(crate::notification::domain::Channel::Email),
        push_enabled: preferences.channel_enabled(crate::notification::domain::Channel::Push),
        sms_enabled: preferences.channel_enabled(crate::notification::domain::Channel::Sms),
        active: preferences.is_active(),
        updated_at: preferences.updated_at(),
    }
}

fn row_to_preferences(row: PreferencesRow) -> NotificationPreferences {
    NotificationPreferences::from_persisted(PersistedPreferencesData {
        account_id: AccountId::from_uuid(row.account_id),
        email_enabled: row.email_enabled,
        push_enabled: row.push_enabled,
        sms_enabled: row.sms_enabled,
        active: row.active,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}
