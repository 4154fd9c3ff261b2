//! Entity module - Contains all SeaORM entity definitions for the database.
//! Catalog records of every collection share one table and are told apart by
//! their collection name; the site settings live in a singleton table.
//! Newsletter subscribers and the data history have tables of their own.

pub mod catalog_record;
pub mod data_history;
pub mod newsletter_subscriber;
pub mod site_settings;

// Re-export specific types to avoid conflicts
pub use catalog_record::{
    Column as CatalogRecordColumn, Entity as CatalogRecord, Model as CatalogRecordModel,
};
pub use data_history::{
    Column as DataHistoryColumn, Entity as DataHistory, Model as DataHistoryModel,
};
pub use newsletter_subscriber::{
    Column as NewsletterSubscriberColumn, Entity as NewsletterSubscriber,
    Model as NewsletterSubscriberModel,
};
pub use site_settings::{
    Column as SiteSettingsColumn, Entity as SiteSettings, Model as SiteSettingsModel,
};
