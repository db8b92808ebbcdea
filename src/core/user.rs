//! User account business logic - Registration, lookup, and deletion.
//!
//! Usernames are derived from the person's name (`first.last`, lowercased,
//! whitespace stripped) with a numeric suffix probing away collisions.
//! Deleting a user takes the overtime, time clock, and absence rows with it
//! in one transaction.

use crate::{
    entities::{
        AbsenceRecord, OvertimeRecord, TimeClockRecord, User, UserRole, absence_record,
        overtime_record, time_clock_record, user,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use uuid::Uuid;

/// Registers a new account.
///
/// Names and email must be non-blank and the email unused. The generated
/// username starts from `first.last` and appends 1, 2, ... until free.
///
/// # Errors
/// `Validation` for blank inputs, `EmailTaken` for a duplicate email.
pub async fn register(
    db: &DatabaseConnection,
    first_name: &str,
    last_name: &str,
    email: &str,
    role: UserRole,
) -> Result<user::Model> {
    let first_name = first_name.trim();
    let last_name = last_name.trim();
    let email = email.trim();
    if first_name.is_empty() || last_name.is_empty() {
        return Err(Error::Validation {
            message: "First and last name cannot be empty".to_string(),
        });
    }
    if email.is_empty() {
        return Err(Error::Validation {
            message: "Email cannot be empty".to_string(),
        });
    }

    if get_by_email(db, email).await?.is_some() {
        return Err(Error::EmailTaken {
            email: email.to_string(),
        });
    }

    let base = format!("{}.{}", squash_name(first_name), squash_name(last_name));
    let mut username = base.clone();
    let mut suffix = 1;
    while get_by_username(db, &username).await?.is_some() {
        username = format!("{base}{suffix}");
        suffix += 1;
    }

    let account = user::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        first_name: Set(first_name.to_string()),
        last_name: Set(last_name.to_string()),
        email: Set(email.to_string()),
        username: Set(username),
        role: Set(role),
        created_at: Set(chrono::Utc::now()),
    };

    account.insert(db).await.map_err(Into::into)
}

/// Lowercases a name part and strips every whitespace run.
fn squash_name(part: &str) -> String {
    part.to_lowercase().split_whitespace().collect()
}

/// Deletes a user together with all dependent rows, atomically.
pub async fn delete(db: &DatabaseConnection, user_id: &str) -> Result<()> {
    let txn = db.begin().await?;

    OvertimeRecord::delete_many()
        .filter(overtime_record::Column::UserId.eq(user_id))
        .exec(&txn)
        .await?;
    TimeClockRecord::delete_many()
        .filter(time_clock_record::Column::UserId.eq(user_id))
        .exec(&txn)
        .await?;
    AbsenceRecord::delete_many()
        .filter(absence_record::Column::UserId.eq(user_id))
        .exec(&txn)
        .await?;

    let result = User::delete_by_id(user_id).exec(&txn).await?;
    if result.rows_affected == 0 {
        // Dropping the transaction rolls the child deletes back
        return Err(Error::NotFound {
            what: "User",
            id: user_id.to_string(),
        });
    }

    txn.commit().await?;
    Ok(())
}

/// Finds a user by id.
pub async fn get(db: &DatabaseConnection, user_id: &str) -> Result<Option<user::Model>> {
    User::find_by_id(user_id).one(db).await.map_err(Into::into)
}

/// Finds a user by email.
pub async fn get_by_email(db: &DatabaseConnection, email: &str) -> Result<Option<user::Model>> {
    User::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a user by username.
pub async fn get_by_username(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Option<user::Model>> {
    User::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Every account, alphabetical by username.
pub async fn all(db: &DatabaseConnection) -> Result<Vec<user::Model>> {
    User::find()
        .order_by_asc(user::Column::Username)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Employee-role accounts only, alphabetical by username.
pub async fn employees(db: &DatabaseConnection) -> Result<Vec<user::Model>> {
    User::find()
        .filter(user::Column::Role.eq(UserRole::Employee))
        .order_by_asc(user::Column::Username)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{core::overtime, test_utils::*};

    #[tokio::test]
    async fn test_register_generates_username_from_name() -> Result<()> {
        let db = setup_test_db().await?;

        let account = register(&db, "Ana Maria", "Silva", "ana@example.com", UserRole::Employee)
            .await?;
        assert_eq!(account.username, "anamaria.silva");
        assert!(Uuid::parse_str(&account.id).is_ok());
        assert_eq!(account.role, UserRole::Employee);

        Ok(())
    }

    #[tokio::test]
    async fn test_register_probes_username_collisions() -> Result<()> {
        let db = setup_test_db().await?;

        register(&db, "Ana Maria", "Silva", "ana1@example.com", UserRole::Employee).await?;
        let second =
            register(&db, "Ana  Maria", "Silva", "ana2@example.com", UserRole::Employee).await?;
        assert_eq!(second.username, "anamaria.silva1");

        let third =
            register(&db, "ANA MARIA", "silva", "ana3@example.com", UserRole::Admin).await?;
        assert_eq!(third.username, "anamaria.silva2");

        Ok(())
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() -> Result<()> {
        let db = setup_test_db().await?;

        register(&db, "Ana", "Silva", "ana@example.com", UserRole::Employee).await?;
        let result = register(&db, "Other", "Person", "ana@example.com", UserRole::Employee).await;
        assert!(matches!(result.unwrap_err(), Error::EmailTaken { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_register_rejects_blank_inputs() -> Result<()> {
        let db = setup_test_db().await?;

        let result = register(&db, "  ", "Silva", "x@example.com", UserRole::Employee).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        let result = register(&db, "Ana", "Silva", "", UserRole::Employee).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_lookups() -> Result<()> {
        let db = setup_test_db().await?;

        let account = register(&db, "Ana", "Silva", "ana@example.com", UserRole::Employee).await?;

        assert_eq!(get(&db, &account.id).await?.unwrap().id, account.id);
        assert_eq!(
            get_by_email(&db, "ana@example.com").await?.unwrap().id,
            account.id
        );
        assert_eq!(
            get_by_username(&db, "ana.silva").await?.unwrap().id,
            account.id
        );
        assert!(get_by_email(&db, "nobody@example.com").await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_employees_excludes_admins() -> Result<()> {
        let db = setup_test_db().await?;

        register(&db, "Ana", "Silva", "ana@example.com", UserRole::Employee).await?;
        register(&db, "Root", "Admin", "admin@example.com", UserRole::Admin).await?;

        let everyone = all(&db).await?;
        assert_eq!(everyone.len(), 2);

        let staff = employees(&db).await?;
        assert_eq!(staff.len(), 1);
        assert_eq!(staff[0].email, "ana@example.com");

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_takes_dependent_rows_along() -> Result<()> {
        let (db, account, holiday) = setup_with_user_and_holiday().await?;

        overtime::create_record(&db, &account.id, holiday.id, "8h_18h").await?;
        crate::core::time_clock::clock_in(
            &db,
            &account.id,
            holiday.id,
            chrono::Utc::now().date_naive(),
            "07:00",
        )
        .await?;
        crate::core::absence::create(
            &db,
            &account.id,
            crate::entities::AbsenceReason::Personal,
            None,
            vec![chrono::Utc::now().date_naive()],
            None,
        )
        .await?;

        delete(&db, &account.id).await?;

        assert!(get(&db, &account.id).await?.is_none());
        assert!(overtime::records_for_user(&db, &account.id).await?.is_empty());
        assert!(
            crate::core::time_clock::records_for_user(&db, &account.id)
                .await?
                .is_empty()
        );
        assert!(
            crate::core::absence::records_for_user(&db, &account.id)
                .await?
                .is_empty()
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_user() -> Result<()> {
        let db = setup_test_db().await?;

        let result = delete(&db, "no-such-id").await;
        assert!(matches!(result.unwrap_err(), Error::NotFound { .. }));

        Ok(())
    }
}
