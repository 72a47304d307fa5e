//! `PostgreSQL` repository implementation for reset-token storage.

use super::{models::ResetTokenRow, schema::password_reset_tokens};
use crate::account::domain::AccountId;
use crate::password_reset::{
    domain::{
        PasswordResetToken, PasswordResetTokenId, PersistedResetTokenData, ResetTokenDigest,
    },
    ports::{PasswordResetTokenRepository, ResetTokenRepositoryError, ResetTokenRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by reset-token adapters.
pub type ResetTokenPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed reset-token repository.
#[derive(Debug, Clone)]
pub struct PostgresResetTokenRepository {
    pool: ResetTokenPgPool,
}

impl PostgresResetTokenRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ResetTokenPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ResetTokenRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ResetTokenRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ResetTokenRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ResetTokenRepositoryError::persistence)?
    }
}

#[async_trait]
impl PasswordResetTokenRepository for PostgresResetTokenRepository {
    async fn insert(&self, token: &PasswordResetToken) -> ResetTokenRepositoryResult<()> {
        let token_id = token.id();
        let row = to_row(token);

        self.run_blocking(move |connection| {
            diesel::insert_into(password_reset_tokens::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ResetTokenRepositoryError::DuplicateToken(token_id)
                    }
                    _ => ResetTokenRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, token: &PasswordResetToken) -> ResetTokenRepositoryResult<()> {
        let token_id = token.id();
        let is_used = token.is_used();

        self.run_blocking(move |connection| {
            let affected = diesel::update(
                password_reset_tokens::table
                    .filter(password_reset_tokens::id.eq(token_id.into_inner())),
            )
            .set(password_reset_tokens::is_used.eq(is_used))
            .execute(connection)
            .map_err(ResetTokenRepositoryError::persistence)?;

            if affected == 0 {
                return Err(ResetTokenRepositoryError::NotFound(token_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: PasswordResetTokenId,
    ) -> ResetTokenRepositoryResult<Option<PasswordResetToken>> {
        self.run_blocking(move |connection| {
            let row = password_reset_tokens::table
                .filter(password_reset_tokens::id.eq(id.into_inner()))
                .select(ResetTokenRow::as_select())
                .first::<ResetTokenRow>(connection)
                .optional()
                .map_err(ResetTokenRepositoryError::persistence)?;
            Ok(row.map(row_to_token))
        })
        .await
    }

    async fn find_latest_by_account(
        &self,
        account_id: AccountId,
    ) -> ResetTokenRepositoryResult<Option<PasswordResetToken>> {
        self.run_blocking(move |connection| {
            let row = password_reset_tokens::table
                .filter(password_reset_tokens::account_id.eq(account_id.into_inner()))
                .order((
                    password_reset_tokens::expires_at.desc(),
                    password_reset_tokens::id.desc(),
                ))
                .select(ResetTokenRow::as_select())
                .first::<ResetTokenRow>(connection)
                .optional()
                .map_err(ResetTokenRepositoryError::persistence)?;
            Ok(row.map(row_to_token))
        })
        .await
    }
}

fn to_row(token: &PasswordResetToken) -> ResetTokenRow {
    ResetTokenRow {
        id: token.id().into_inner(),
        account_id: token.account_id().into_inner(),
        token_digest: token.digest().as_str().to_owned(),
        expires_at: token.expires_at(),
        is_used: token.is_used(),
        created_at: token.created_at(),
    }
}

fn row_to_token(row: ResetTokenRow) -> PasswordResetToken {
    PasswordResetToken::from_persisted(PersistedResetTokenData {
        id: PasswordResetTokenId::from_uuid(row.id),
        account_id: AccountId::from_uuid(row.account_id),
        digest: ResetTokenDigest::from_phc_string(row.token_digest),
        expires_at: row.expires_at,
        is_used: row.is_used,
        created_at: row.created_at,
    })
}
