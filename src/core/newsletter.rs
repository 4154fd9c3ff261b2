//! Newsletter signups.
//!
//! Addresses are stored trimmed and lowercased, so `A@x.com` and ` a@x.com`
//! count as the same subscriber.

use crate::{
    entities::{NewsletterSubscriber, NewsletterSubscriberColumn, newsletter_subscriber},
    errors::{Error, Result},
    models::Subscriber,
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{info, instrument};

/// Collection name reported in conflicts.
const COLLECTION: &str = "newsletter";

fn normalize_email(email: &str) -> Result<String> {
    let email = email.trim().to_lowercase();
    if email.is_empty() {
        return Err(Error::validation("Email is required"));
    }
    if !email.contains('@') {
        return Err(Error::validation(format!("'{email}' is not an email address")));
    }
    Ok(email)
}

fn to_subscriber(row: newsletter_subscriber::Model) -> Subscriber {
    Subscriber {
        id: row.id,
        email: row.email,
        subscribed_at: row.subscribed_at,
    }
}

/// Subscribes `email` to the newsletter.
///
/// # Errors
/// Returns `Error::Validation` for an empty or malformed address and
/// `Error::Conflict` if it is already subscribed.
#[instrument(skip(db))]
pub async fn subscribe(db: &DatabaseConnection, email: &str) -> Result<Subscriber> {
    let email = normalize_email(email)?;

    let txn = db.begin().await?;
    let existing = NewsletterSubscriber::find()
        .filter(NewsletterSubscriberColumn::Email.eq(email.as_str()))
        .one(&txn)
        .await?;
    if existing.is_some() {
        return Err(Error::Conflict {
            collection: COLLECTION.to_string(),
            field: "email",
            value: email,
        });
    }

    let row = newsletter_subscriber::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        email: Set(email),
        subscribed_at: Set(chrono::Utc::now()),
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    info!("New newsletter subscriber {}", row.email);
    Ok(to_subscriber(row))
}

/// All subscribers, oldest first.
pub async fn list_subscribers(db: &DatabaseConnection) -> Result<Vec<Subscriber>> {
    Ok(NewsletterSubscriber::find()
        .order_by_asc(NewsletterSubscriberColumn::SubscribedAt)
        .all(db)
        .await?
        .into_iter()
        .map(to_subscriber)
        .collect())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_subscribe_normalizes_address() -> Result<()> {
        let db = setup_test_db().await?;
        let subscriber = subscribe(&db, "  Fan@Example.COM ").await?;
        assert_eq!(subscriber.email, "fan@example.com");
        assert!(!subscriber.id.is_empty());

        let all = list_subscribers(&db).await?;
        assert_eq!(all, vec![subscriber]);
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_subscription_is_conflict() -> Result<()> {
        let db = setup_test_db().await?;
        subscribe(&db, "fan@example.com").await?;

        let again = subscribe(&db, "FAN@example.com").await;
        assert!(matches!(
            again.unwrap_err(),
            Error::Conflict { field: "email", .. }
        ));
        assert_eq!(list_subscribers(&db).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_addresses_are_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        for email in ["", "   ", "not-an-address"] {
            let result = subscribe(&db, email).await;
            assert!(matches!(result.unwrap_err(), Error::Validation { .. }), "{email:?}");
        }
        assert!(list_subscribers(&db).await?.is_empty());
        Ok(())
    }
}
