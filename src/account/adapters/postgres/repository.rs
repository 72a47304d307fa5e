//! `PostgreSQL` repository implementation for account storage.

use super::{
    models::{AccountChanges, AccountRow, NewAccountRow},
    schema::accounts,
};
use crate::account::{
    domain::{
        Account, AccountId, AccountProfile, HashedPassword, PersistedAccountData, PhoneNumber,
        Username,
    },
    ports::{AccountRepository, AccountRepositoryError, AccountRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by account adapters.
pub type AccountPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed account repository.
#[derive(Debug, Clone)]
pub struct PostgresAccountRepository {
    pool: AccountPgPool,
}

impl PostgresAccountRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: AccountPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> AccountRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> AccountRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(AccountRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(AccountRepositoryError::persistence)?
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn insert(&self, account: &Account) -> AccountRepositoryResult<()> {
        let account_id = account.id();
        let username = account.username().cloned();
        let phone_number = account.phone_number().cloned();
        let new_row = to_new_row(account);

        self.run_blocking(move |connection| {
            diesel::insert_into(accounts::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info) => {
                        map_unique_violation(info.as_ref(), account_id, &username, &phone_number)
                    }
                    _ => AccountRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, account: &Account) -> AccountRepositoryResult<()> {
        let account_id = account.id();
        let changes = to_changes(account);

        self.run_blocking(move |connection| {
            let affected = diesel::update(
                accounts::table.filter(accounts::id.eq(account_id.into_inner())),
            )
            .set(&changes)
            .execute(connection)
            .map_err(AccountRepositoryError::persistence)?;

            if affected == 0 {
                return Err(AccountRepositoryError::NotFound(account_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_active_by_id(&self, id: AccountId) -> AccountRepositoryResult<Option<Account>> {
        self.run_blocking(move |connection| {
            let row = accounts::table
                .filter(accounts::id.eq(id.into_inner()))
                .filter(accounts::active.eq(true))
                .select(AccountRow::as_select())
                .first::<AccountRow>(connection)
                .optional()
                .map_err(AccountRepositoryError::persistence)?;
            row.map(row_to_account).transpose()
        })
        .await
    }

    async fn find_active_by_username(
        &self,
        username: &Username,
    ) -> AccountRepositoryResult<Option<Account>> {
        let lookup = username.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = accounts::table
                .filter(accounts::username.eq(&lookup))
                .filter(accounts::active.eq(true))
                .select(AccountRow::as_select())
                .first::<AccountRow>(connection)
                .optional()
                .map_err(AccountRepositoryError::persistence)?;
            row.map(row_to_account).transpose()
        })
        .await
    }

    async fn find_active_by_phone_number(
        &self,
        phone_number: &PhoneNumber,
    ) -> AccountRepositoryResult<Option<Account>> {
        let country_code = phone_number.country_code().to_owned();
        let local_number = phone_number.local_number().to_owned();
        self.run_blocking(move |connection| {
            let row = accounts::table
                .filter(accounts::phone_country_code.eq(&country_code))
                .filter(accounts::phone_local_number.eq(&local_number))
                .filter(accounts::active.eq(true))
                .select(AccountRow::as_select())
                .first::<AccountRow>(connection)
                .optional()
                .map_err(AccountRepositoryError::persistence)?;
            row.map(row_to_account).transpose()
        })
        .await
    }
}

const USERNAME_UNIQUE_INDEX: &str = "accounts_active_username_idx";
const PHONE_UNIQUE_INDEX: &str = "accounts_active_phone_idx";

fn map_unique_violation(
    info: &dyn DatabaseErrorInformation,
    account_id: AccountId,
    username: &Option<Username>,
    phone_number: &Option<PhoneNumber>,
) -> AccountRepositoryError {
    let constraint = info.constraint_name().unwrap_or_default();
    if constraint == USERNAME_UNIQUE_INDEX
        && let Some(username) = username
    {
        return AccountRepositoryError::DuplicateUsername(username.clone());
    }
    if constraint == PHONE_UNIQUE_INDEX
        && let Some(phone_number) = phone_number
    {
        return AccountRepositoryError::DuplicatePhoneNumber(phone_number.clone());
    }
    AccountRepositoryError::DuplicateAccount(account_id)
}

fn to_new_row(account: &Account) -> NewAccountRow {
    NewAccountRow {
        id: account.id().into_inner(),
        first_name: account.profile().first_name.clone(),
        last_name: account.profile().last_name.clone(),
        hashed_password: account
            .hashed_password()
            .map(|digest| digest.as_str().to_owned()),
        username: account.username().map(|u| u.as_str().to_owned()),
        phone_country_code: account
            .phone_number()
            .map(|p| p.country_code().to_owned()),
        phone_local_number: account
            .phone_number()
            .map(|p| p.local_number().to_owned()),
        active: account.is_active(),
        created_at: account.created_at(),
        updated_at: account.updated_at(),
    }
}

fn to_changes(account: &Account) -> AccountChanges {
    AccountChanges {
        first_name: account.profile().first_name.clone(),
        last_name: account.profile().last_name.clone(),
        hashed_password: account
            .hashed_password()
            .map(|digest| digest.as_str().to_owned()),
        active: account.is_active(),
        updated_at: account.updated_at(),
    }
}

fn row_to_account(row: AccountRow) -> AccountRepositoryResult<Account> {
    let AccountRow {
        id,
        first_name,
        last_name,
        hashed_password,
        username,
        phone_country_code,
        phone_local_number,
        active,
        created_at,
        updated_at,
    } = row;

    let username = username
        .map(Username::new)
        .transpose()
        .map_err(AccountRepositoryError::persistence)?;
    let phone_number = match (phone_country_code, phone_local_number) {
        (Some(country_code), Some(local_number)) => Some(
            PhoneNumber::from_parts(country_code, local_number)
                .map_err(AccountRepositoryError::persistence)?,
        ),
        _ => None,
    };

    Ok(Account::from_persisted(PersistedAccountData {
        id: AccountId::from_uuid(id),
        profile: AccountProfile::new(first_name, last_name),
        hashed_password: hashed_password.map(HashedPassword::from_phc_string),
        username,
        phone_number,
        active,
        created_at,
        updated_at,
    }))
}
