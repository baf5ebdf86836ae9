//! Transaction helpers shared by the repositories
//!
//! Every transaction either commits or is explicitly rolled back before the
//! error is returned. A failed rollback is logged and never replaces the
//! original error.

use log::error;
use sea_orm::{
    AccessMode, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbBackend, DbErr,
    IsolationLevel, RuntimeErr, TransactionTrait,
};

use crate::domain::{BookingError, DomainResult};

/// Database error codes meaning "a concurrent transaction made this one
/// unserializable, try again":
/// - `40001` PostgreSQL `serialization_failure`
/// - `5` / `517` SQLite `SQLITE_BUSY` / `SQLITE_BUSY_SNAPSHOT`
const SERIALIZATION_FAILURE_CODES: &[&str] = &["40001", "5", "517"];

/// Whether the driver reported a serialization failure.
pub fn is_serialization_failure(err: &DbErr) -> bool {
    let runtime = match err {
        DbErr::Exec(e) | DbErr::Query(e) | DbErr::Conn(e) => e,
        _ => return false,
    };

    match runtime {
        RuntimeErr::SqlxError(e) => e
            .as_database_error()
            .and_then(|db| db.code())
            .map(|code| SERIALIZATION_FAILURE_CODES.contains(&code.as_ref()))
            .unwrap_or(false),
        _ => false,
    }
}

/// Map a driver error to the domain taxonomy.
pub fn classify(err: DbErr) -> BookingError {
    if is_serialization_failure(&err) {
        BookingError::SerializationFailure(err)
    } else {
        BookingError::Storage(err)
    }
}

/// Options actually sent with `BEGIN`. SQLite has no per-transaction
/// isolation or access mode (writers are serialized by its file lock), and
/// the driver warns on every transaction that sets them.
fn transaction_options(
    backend: DbBackend,
    isolation: Option<IsolationLevel>,
    access: AccessMode,
) -> (Option<IsolationLevel>, Option<AccessMode>) {
    match backend {
        DbBackend::Sqlite => (None, None),
        _ => (isolation, Some(access)),
    }
}

/// Open a transaction with explicit isolation and access mode.
pub async fn begin(
    db: &DatabaseConnection,
    isolation: Option<IsolationLevel>,
    access: AccessMode,
) -> DomainResult<DatabaseTransaction> {
    let (isolation, access) = transaction_options(db.get_database_backend(), isolation, access);
    db.begin_with_config(isolation, access)
        .await
        .map_err(classify)
}

/// Commit on success, roll back on failure.
pub async fn finish<T>(txn: DatabaseTransaction, result: DomainResult<T>) -> DomainResult<T> {
    match result {
        Ok(value) => {
            txn.commit().await.map_err(classify)?;
            Ok(value)
        }
        Err(err) => {
            rollback(txn).await;
            Err(err)
        }
    }
}

async fn rollback(txn: DatabaseTransaction) {
    if let Err(e) = txn.rollback().await {
        error!("Failed to roll back transaction: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_errors_are_not_transient() {
        let err = DbErr::Custom("boom".into());
        assert!(!is_serialization_failure(&err));
        assert!(matches!(classify(err), BookingError::Storage(_)));
    }

    #[test]
    fn internal_runtime_errors_are_not_transient() {
        let err = DbErr::Exec(RuntimeErr::Internal("40001".into()));
        assert!(!is_serialization_failure(&err));
    }

    #[test]
    fn sqlite_transactions_carry_no_options() {
        let opts = transaction_options(
            DbBackend::Sqlite,
            Some(IsolationLevel::Serializable),
            AccessMode::ReadWrite,
        );
        assert!(matches!(opts, (None, None)));
    }

    #[test]
    fn postgres_transactions_keep_isolation_and_access() {
        let opts = transaction_options(
            DbBackend::Postgres,
            Some(IsolationLevel::ReadCommitted),
            AccessMode::ReadOnly,
        );
        assert!(matches!(
            opts,
            (Some(IsolationLevel::ReadCommitted), Some(AccessMode::ReadOnly))
        ));
    }

    #[test]
    fn record_not_found_is_storage_error() {
        let err = DbErr::RecordNotFound("reservations".into());
        assert!(matches!(classify(err), BookingError::Storage(_)));
    }
}
