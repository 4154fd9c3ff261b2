//! Typed domain records.
//!
//! These are the shapes exchanged over HTTP, embedded in the seed dataset and
//! carried in theme export bundles. Storage keeps them as JSON bodies; see
//! [`crate::entities`].

pub mod bundle;
pub mod catalog;
pub mod data;
pub mod history;
pub mod newsletter;
pub mod settings;

pub use bundle::{EXPORT_VERSION, ThemeExportBundle};
pub use catalog::{CatalogItem, Category, Collection, GiftBox, HeroSlide, Product, Testimonial};
pub use data::{
    CollectionChanges, DATA_EXPORT_VERSION, DataSnapshot, ImportChanges, SettingsChanges,
};
pub use history::{HistoryAction, HistoryEntry};
pub use newsletter::{SubscribeRequest, Subscriber};
pub use settings::{PageName, PageStyles, SiteSettings, StyleMap, Theme};
