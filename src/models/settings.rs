//! The site-settings document.
//!
//! One typed structure serves both as the stored document and as the patch
//! sent to `PUT /site-settings`: every field is optional, an absent field in a
//! patch leaves the stored value alone and an absent field in an imported
//! document stays cleared.
//!
//! Merge rules ([`SiteSettings::merge`]):
//! - scalars and lists are replaced wholesale when present in the patch;
//! - `theme` and `pageStyles` are merged one level deep, each named
//!   sub-section present in the patch replacing the stored sub-section.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Style key (e.g. `"headerBg"`) to CSS value (e.g. `"#2d1810"`).
pub type StyleMap = BTreeMap<String, String>;

/// A headline figure on the About page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AboutStat {
    /// The figure, e.g. "50K+"
    pub number: String,
    /// What the figure counts
    pub label: String,
}

/// A company value card on the About page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueCard {
    /// Card heading
    pub title: String,
    /// Card text
    pub desc: String,
}

/// A "why choose us" entry on the About page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReasonCard {
    /// Entry heading
    pub name: String,
    /// Entry text
    pub desc: String,
}

/// Global theme: each section is a flat style map.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    /// Palette (`primary`, `accent`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<StyleMap>,
    /// Font family and sizes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typography: Option<StyleMap>,
    /// Header bar colours
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<StyleMap>,
    /// Footer colours
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<StyleMap>,
    /// Button shape and colours
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buttons: Option<StyleMap>,
    /// Product and content card styling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cards: Option<StyleMap>,
}

impl Theme {
    /// Replaces every section present in `patch`; other sections are kept.
    pub fn merge(&mut self, patch: Self) {
        replace_if_present(&mut self.colors, patch.colors);
        replace_if_present(&mut self.typography, patch.typography);
        replace_if_present(&mut self.header, patch.header);
        replace_if_present(&mut self.footer, patch.footer);
        replace_if_present(&mut self.buttons, patch.buttons);
        replace_if_present(&mut self.cards, patch.cards);
    }
}

/// The pages that accept style overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PageName {
    /// Applies to every page
    Global,
    /// Landing page
    Home,
    /// Product listing
    Products,
    /// Single product page
    ProductDetail,
    /// Bulk order form
    BulkOrder,
    /// Careers page
    Career,
    /// About page
    AboutUs,
    /// Contact page
    Contact,
}

impl PageName {
    /// Every recognised page.
    pub const ALL: [Self; 8] = [
        Self::Global,
        Self::Home,
        Self::Products,
        Self::ProductDetail,
        Self::BulkOrder,
        Self::Career,
        Self::AboutUs,
        Self::Contact,
    ];

    /// Key used in the JSON document.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Home => "home",
            Self::Products => "products",
            Self::ProductDetail => "productDetail",
            Self::BulkOrder => "bulkOrder",
            Self::Career => "career",
            Self::AboutUs => "aboutUs",
            Self::Contact => "contact",
        }
    }
}

impl fmt::Display for PageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-page CSS overrides, one optional style map per [`PageName`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageStyles {
    /// Overrides applied to every page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global: Option<StyleMap>,
    /// Landing page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home: Option<StyleMap>,
    /// Product listing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<StyleMap>,
    /// Single product page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_detail: Option<StyleMap>,
    /// Bulk order form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bulk_order: Option<StyleMap>,
    /// Careers page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub career: Option<StyleMap>,
    /// About page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about_us: Option<StyleMap>,
    /// Contact page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<StyleMap>,
}

impl PageStyles {
    /// Style overrides for `page`, if any were set.
    #[must_use]
    pub const fn get(&self, page: PageName) -> Option<&StyleMap> {
        self.slot(page).as_ref()
    }

    const fn slot(&self, page: PageName) -> &Option<StyleMap> {
        match page {
            PageName::Global => &self.global,
            PageName::Home => &self.home,
            PageName::Products => &self.products,
            PageName::ProductDetail => &self.product_detail,
            PageName::BulkOrder => &self.bulk_order,
            PageName::Career => &self.career,
            PageName::AboutUs => &self.about_us,
            PageName::Contact => &self.contact,
        }
    }

    fn slot_mut(&mut self, page: PageName) -> &mut Option<StyleMap> {
        match page {
            PageName::Global => &mut self.global,
            PageName::Home => &mut self.home,
            PageName::Products => &mut self.products,
            PageName::ProductDetail => &mut self.product_detail,
            PageName::BulkOrder => &mut self.bulk_order,
            PageName::Career => &mut self.career,
            PageName::AboutUs => &mut self.about_us,
            PageName::Contact => &mut self.contact,
        }
    }

    /// Sets the overrides for a single page.
    pub fn set(&mut self, page: PageName, styles: StyleMap) {
        *self.slot_mut(page) = Some(styles);
    }

    /// Pages that currently carry overrides.
    pub fn pages(&self) -> impl Iterator<Item = PageName> + '_ {
        PageName::ALL
            .into_iter()
            .filter(|page| self.slot(*page).is_some())
    }

    /// Replaces every page present in `patch`; other pages are kept.
    pub fn merge(&mut self, mut patch: Self) {
        for page in PageName::ALL {
            replace_if_present(self.slot_mut(page), patch.slot_mut(page).take());
        }
    }
}

/// The singleton site-settings document (also used as its own patch type).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slogan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub career_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_link: Option<String>,

    /// Product types offered in the bulk order form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bulk_order_product_types: Option<Vec<String>>,
    /// Benefit bullets on the bulk order page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bulk_order_benefits: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about_hero_subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about_story_paragraphs: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about_story_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about_stats: Option<Vec<AboutStat>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about_vision: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about_vision_points: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about_mission: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about_mission_points: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about_values: Option<Vec<ValueCard>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about_why_choose_us: Option<Vec<ReasonCard>>,

    /// Global theme
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    /// Per-page style overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_styles: Option<PageStyles>,
}

impl SiteSettings {
    /// Merges `patch` into this document.
    ///
    /// Scalars and lists present in the patch replace the stored value;
    /// `theme` and `pageStyles` are merged per sub-section.
    pub fn merge(&mut self, patch: Self) {
        replace_if_present(&mut self.business_name, patch.business_name);
        replace_if_present(&mut self.slogan, patch.slogan);
        replace_if_present(&mut self.logo, patch.logo);
        replace_if_present(&mut self.phone, patch.phone);
        replace_if_present(&mut self.email, patch.email);
        replace_if_present(&mut self.career_email, patch.career_email);
        replace_if_present(&mut self.whatsapp_link, patch.whatsapp_link);
        replace_if_present(&mut self.facebook_link, patch.facebook_link);
        replace_if_present(&mut self.instagram_link, patch.instagram_link);
        replace_if_present(&mut self.twitter_link, patch.twitter_link);
        replace_if_present(&mut self.youtube_link, patch.youtube_link);

        replace_if_present(
            &mut self.bulk_order_product_types,
            patch.bulk_order_product_types,
        );
        replace_if_present(&mut self.bulk_order_benefits, patch.bulk_order_benefits);

        replace_if_present(&mut self.about_hero_subtitle, patch.about_hero_subtitle);
        replace_if_present(
            &mut self.about_story_paragraphs,
            patch.about_story_paragraphs,
        );
        replace_if_present(&mut self.about_story_image, patch.about_story_image);
        replace_if_present(&mut self.about_stats, patch.about_stats);
        replace_if_present(&mut self.about_vision, patch.about_vision);
        replace_if_present(&mut self.about_vision_points, patch.about_vision_points);
        replace_if_present(&mut self.about_mission, patch.about_mission);
        replace_if_present(&mut self.about_mission_points, patch.about_mission_points);
        replace_if_present(&mut self.about_values, patch.about_values);
        replace_if_present(&mut self.about_why_choose_us, patch.about_why_choose_us);

        if let Some(theme) = patch.theme {
            self.theme.get_or_insert_with(Theme::default).merge(theme);
        }
        if let Some(page_styles) = patch.page_styles {
            self.page_styles
                .get_or_insert_with(PageStyles::default)
                .merge(page_styles);
        }
    }
}

fn replace_if_present<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}
