//! Catalog records: categories, products, hero slides, testimonials and gift boxes.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::collections::BTreeMap;
use std::fmt;

/// The catalog collections governed by the store, seed loader and theme bundles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Collection {
    /// Product categories
    Categories,
    /// Products
    Products,
    /// Home page hero banners
    HeroSlides,
    /// Customer testimonials
    Testimonials,
    /// Gift boxes
    GiftBoxes,
}

impl Collection {
    /// All collections, in the order import replaces them.
    pub const ALL: [Self; 5] = [
        Self::Categories,
        Self::Products,
        Self::HeroSlides,
        Self::Testimonials,
        Self::GiftBoxes,
    ];

    /// Name used as the storage discriminator and as the bundle key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Categories => "categories",
            Self::Products => "products",
            Self::HeroSlides => "heroSlides",
            Self::Testimonials => "testimonials",
            Self::GiftBoxes => "giftBoxes",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Behaviour shared by every catalog record type so the store can stay generic.
pub trait CatalogItem: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection this record type lives in.
    const COLLECTION: Collection;

    /// Stable identifier of the record.
    fn id(&self) -> &str;

    /// Overwrites the identifier (used when creating records without one).
    fn set_id(&mut self, id: String);

    /// URL slug, for collections that are addressable by slug.
    fn slug(&self) -> Option<&str> {
        None
    }
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Category {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Unique URL slug, referenced by [`Product::category`]
    pub slug: String,
    /// Banner image URL
    pub image: String,
    /// Small icon URL
    pub icon: String,
}

impl CatalogItem for Category {
    const COLLECTION: Collection = Collection::Categories;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn slug(&self) -> Option<&str> {
        Some(&self.slug)
    }
}

/// A product. `category` is a soft reference to [`Category::slug`]; dangling
/// references are allowed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Unique URL slug
    pub slug: String,
    /// Slug of the owning category
    pub category: String,
    /// Product type label (e.g. "Almonds")
    #[serde(rename = "type")]
    pub product_type: String,
    /// Price of the base pack
    pub base_price: f64,
    /// Main image URL
    pub image: String,
    /// Gallery image URLs
    pub images: Vec<String>,
    /// Stock keeping unit
    pub sku: String,
    /// One-line summary
    pub short_description: String,
    /// Long description
    pub description: String,
    /// Health benefit bullet points
    pub benefits: Vec<String>,
    /// Feature badges
    pub features: Vec<String>,
    /// Variant label (e.g. "500g") to price
    pub price_variants: BTreeMap<String, f64>,
}

impl CatalogItem for Product {
    const COLLECTION: Collection = Collection::Products;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn slug(&self) -> Option<&str> {
        Some(&self.slug)
    }
}

/// A hero banner on the home page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeroSlide {
    /// Unique identifier
    pub id: String,
    /// Headline
    pub title: String,
    /// Sub headline
    pub subtitle: String,
    /// Body text
    pub description: String,
    /// Background image URL
    pub image: String,
    /// Call-to-action button label
    pub cta: String,
}

impl CatalogItem for HeroSlide {
    const COLLECTION: Collection = Collection::HeroSlides;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

/// A customer testimonial.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Testimonial {
    /// Unique identifier
    pub id: String,
    /// Customer name
    pub name: String,
    /// Review text
    pub review: String,
    /// Avatar image URL
    pub avatar: String,
}

impl CatalogItem for Testimonial {
    const COLLECTION: Collection = Collection::Testimonials;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

/// A gift box offering.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GiftBox {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Image URL
    pub image: String,
    /// Price
    pub price: f64,
}

impl CatalogItem for GiftBox {
    const COLLECTION: Collection = Collection::GiftBoxes;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}
