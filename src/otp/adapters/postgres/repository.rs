//! `PostgreSQL` repository implementation for OTP storage.

use super::{
    models::{OtpChanges, OtpRow},
    schema::otps,
};
use crate::account::domain::PhoneNumber;
use crate::otp::{
    domain::{Otp, OtpCode, OtpId, OtpStatus, PersistedOtpData},
    ports::{OtpRepository, OtpRepositoryError, OtpRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by OTP adapters.
pub type OtpPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed OTP repository.
#[derive(Debug, Clone)]
pub struct PostgresOtpRepository {
    pool: OtpPgPool,
}

impl PostgresOtpRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: OtpPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> OtpRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> OtpRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(OtpRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(OtpRepositoryError::persistence)?
    }
}

#[async_trait]
impl OtpRepository for PostgresOtpRepository {
    async fn insert(&self, otp: &Otp) -> OtpRepositoryResult<()> {
        let otp_id = otp.id();
        let row = to_row(otp);

        self.run_blocking(move |connection| {
            diesel::insert_into(otps::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        OtpRepositoryError::DuplicateOtp(otp_id)
                    }
                    _ => OtpRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, otp: &Otp) -> OtpRepositoryResult<()> {
        let otp_id = otp.id();
        let changes = OtpChanges {
            status: otp.status().as_str().to_owned(),
            active: otp.is_active(),
        };

        self.run_blocking(move |connection| {
            let affected = diesel::update(otps::table.filter(otps::id.eq(otp_id.into_inner())))
                .set(&changes)
                .execute(connection)
                .map_err(OtpRepositoryError::persistence)?;

            if affected == 0 {
                return Err(OtpRepositoryError::NotFound(otp_id));
            }
            Ok(())
        })
        .await
    }

    async fn list_active_by_phone(
        &self,
        phone_number: &PhoneNumber,
    ) -> OtpRepositoryResult<Vec<Otp>> {
        let country_code = phone_number.country_code().to_owned();
        let local_number = phone_number.local_number().to_owned();

        self.run_blocking(move |connection| {
            let rows = otps::table
                .filter(otps::phone_country_code.eq(&country_code))
                .filter(otps::phone_local_number.eq(&local_number))
                .filter(otps::active.eq(true))
                .select(OtpRow::as_select())
                .load::<OtpRow>(connection)
                .map_err(OtpRepositoryError::persistence)?;
            rows.into_iter().map(row_to_otp).collect()
        })
        .await
    }

    async fn find_latest_by_phone_and_code(
        &self,
        phone_number: &PhoneNumber,
        code: &OtpCode,
    ) -> OtpRepositoryResult<Option<Otp>> {
        let country_code = phone_number.country_code().to_owned();
        let local_number = phone_number.local_number().to_owned();
        let code = code.as_str().to_owned();

        self.run_blocking(move |connection| {
            let row = otps::table
                .filter(otps::phone_country_code.eq(&country_code))
                .filter(otps::phone_local_number.eq(&local_number))
                .filter(otps::otp_code.eq(&code))
                .order((otps::created_at.desc(), otps::id.desc()))
                .select(OtpRow::as_select())
                .first::<OtpRow>(connection)
                .optional()
                .map_err(OtpRepositoryError::persistence)?;
            row.map(row_to_otp).transpose()
        })
        .await
    }
}

fn to_row(otp: &Otp) -> OtpRow {
    OtpRow {
        id: otp.id().into_inner(),
        phone_country_code: otp.phone_number().country_code().to_owned(),
        phone_local_number: otp.phone_number().local_number().to_owned(),
        otp_code: otp.code().as_str().to_owned(),
        status: otp.status().as_str().to_owned(),
        active: otp.is_active(),
        created_at: otp.created_at(),
    }
}

fn row_to_otp(row: OtpRow) -> OtpRepositoryResult<Otp> {
    let OtpRow {
        id,
        phone_country_code,
        phone_local_number,
        otp_code,
        status,
        active,
        created_at,
    } = row;

    let phone_number = PhoneNumber::from_parts(phone_country_code, phone_local_number)
        .map_err(OtpRepositoryError::persistence)?;
    let code = OtpCode::new(otp_code).map_err(OtpRepositoryError::persistence)?;
    let status = OtpStatus::try_from(status.as_str()).map_err(OtpRepositoryError::persistence)?;

    Ok(Otp::from_persisted(PersistedOtpData {
        id: OtpId::from_uuid(id),
        phone_number,
        code,
        status,
        active,
        created_at,
    }))
}
