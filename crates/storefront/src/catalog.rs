//! Static product catalog.
//!
//! The catalog is built once at startup, either from the built-in product
//! line or from a JSON file, and is read-only afterwards. Lookups are by
//! product slug and never fail beyond "not found".

use std::collections::HashMap;
use std::path::Path;

use aictronics_core::{Price, ProductId, Theme};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while building a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("duplicate product id in catalog: {0}")]
    DuplicateId(ProductId),
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A purchasable product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Headline used by the full-screen hero section.
    pub hero_title: String,
    pub tagline: String,
    pub description_short: String,
    pub description_long: String,
    pub price: Price,
    /// Path of the display asset.
    pub image: String,
    pub theme: Theme,
    /// Small marketing label shown above the hero title ("New").
    #[serde(default)]
    pub eyebrow: Option<String>,
}

/// Label of the hero link to the product page.
pub const PRIMARY_CTA: &str = "Learn more";
/// Label of the hero add-to-cart button.
pub const SECONDARY_CTA: &str = "Buy";

/// Hero-section projection of a product for the home page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeaturedSection<'a> {
    pub id: &'a ProductId,
    pub title: &'a str,
    pub tagline: &'a str,
    pub description: &'a str,
    pub theme: Theme,
    pub eyebrow: Option<&'a str>,
    pub primary_cta: &'static str,
    pub secondary_cta: &'static str,
    pub image: &'a str,
}

/// Ordered, immutable set of products indexed by id.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Build a catalog from an ordered list of products.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] if two products share an id.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            if index.insert(product.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
        }
        Ok(Self { products, index })
    }

    /// Load a catalog from a JSON file containing an array of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if it
    /// contains duplicate ids.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        let products: Vec<Product> = serde_json::from_str(&content)?;
        let catalog = Self::new(products)?;
        tracing::info!(path = %path.display(), products = catalog.len(), "Loaded catalog");
        Ok(catalog)
    }

    /// The store's built-in product line.
    #[must_use]
    pub fn builtin() -> Self {
        let products = vec![
            Product {
                id: ProductId::new("iphone-17-pro"),
                name: "Aictronics Phone Pro".to_string(),
                hero_title: "Aictronics Phone Pro".to_string(),
                tagline: "All out Pro.".to_string(),
                description_short: "Stunning triple-camera system. OLED display. Built for creators and power users.".to_string(),
                description_long: "Aictronics Phone Pro features a pro-grade triple-camera system, a 120Hz OLED display, and all-day battery life. Designed for creators, gamers, and anyone who wants the very best.".to_string(),
                price: Price::from_whole(1199),
                image: "/images/image.png".to_string(),
                theme: Theme::Dark,
                eyebrow: Some("New".to_string()),
            },
            Product {
                id: ProductId::new("iphone-air"),
                name: "Aictronics Phone Air".to_string(),
                hero_title: "Aictronics Phone Air".to_string(),
                tagline: "Thin. Light. Powerful.".to_string(),
                description_short: "The thinnest Aictronics phone ever, with all-day battery life.".to_string(),
                description_long: "Phone Air packs serious performance into an incredibly thin and light design. Perfect for people who want power that practically disappears in your hand.".to_string(),
                price: Price::from_whole(999),
                image: "/images/iphone-air.jpeg".to_string(),
                theme: Theme::Light,
                eyebrow: Some("New".to_string()),
            },
            Product {
                id: ProductId::new("macbook-pro-m5"),
                name: "Aictronics ProBook M5".to_string(),
                hero_title: "Aictronics ProBook M5".to_string(),
                tagline: "Supercharged by M5.".to_string(),
                description_short: "Next-gen performance and battery life in a sleek aluminum body.".to_string(),
                description_long: "ProBook M5 brings workstation-class performance to a slim notebook. Edit 8K video, build games, and run heavy workflows with ease.".to_string(),
                price: Price::from_whole(1999),
                image: "/images/macbookprom5.jpeg".to_string(),
                theme: Theme::Dark,
                eyebrow: Some("Powerhouse".to_string()),
            },
            Product {
                id: ProductId::new("airpods-pro-3"),
                name: "Aictronics Buds Pro 3".to_string(),
                hero_title: "Aictronics Buds Pro 3".to_string(),
                tagline: "Hear the future.".to_string(),
                description_short: "Immersive sound with Active Noise Cancellation and AI voice clarity.".to_string(),
                description_long: "Buds Pro 3 deliver rich, immersive audio with powerful ANC, transparency mode, and AI-powered voice isolation so you sound clear on every call.".to_string(),
                price: Price::from_whole(299),
                image: "/images/airpodspro-3.jpeg".to_string(),
                theme: Theme::Light,
                eyebrow: Some("Now available".to_string()),
            },
        ];

        let index = products
            .iter()
            .enumerate()
            .map(|(position, product)| (product.id.clone(), position))
            .collect();
        Self { products, index }
    }

    /// Look up a product by id.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&Product> {
        self.index
            .get(id)
            .and_then(|&position| self.products.get(position))
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Hero sections for the home page, one per product in catalog order.
    pub fn featured(&self) -> impl Iterator<Item = FeaturedSection<'_>> {
        self.products.iter().map(|product| FeaturedSection {
            id: &product.id,
            title: &product.hero_title,
            tagline: &product.tagline,
            description: &product.description_short,
            theme: product.theme,
            eyebrow: product.eyebrow.as_deref(),
            primary_cta: PRIMARY_CTA,
            secondary_cta: SECONDARY_CTA,
            image: &product.image,
        })
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use super::*;

    fn product(id: &str, price: u32) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            hero_title: format!("Product {id}"),
            tagline: String::new(),
            description_short: String::new(),
            description_long: String::new(),
            price: Price::from_whole(price),
            image: String::new(),
            theme: Theme::Light,
            eyebrow: None,
        }
    }

    #[test]
    fn test_builtin_order_and_prices() {
        let catalog = Catalog::builtin();
        let ids: Vec<&str> = catalog.products().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(
            ids,
            ["iphone-17-pro", "iphone-air", "macbook-pro-m5", "airpods-pro-3"]
        );
        assert_eq!(
            catalog.find_by_id("iphone-17-pro").unwrap().price,
            Price::from_whole(1199)
        );
    }

    #[test]
    fn test_builtin_passes_validation() {
        let products = Catalog::builtin().products().to_vec();
        assert!(Catalog::new(products).is_ok());
    }

    #[test]
    fn test_find_by_id_not_found() {
        assert!(Catalog::builtin().find_by_id("nonexistent-id").is_none());
    }

    #[test]
    fn test_new_rejects_duplicate_ids() {
        let result = Catalog::new(vec![product("a", 1), product("b", 2), product("a", 3)]);
        assert!(matches!(result, Err(CatalogError::DuplicateId(id)) if id.as_str() == "a"));
    }

    #[test]
    fn test_featured_follows_catalog_order() {
        let catalog = Catalog::builtin();
        let featured: Vec<_> = catalog.featured().collect();
        assert_eq!(featured.len(), 4);
        assert_eq!(featured[0].title, "Aictronics Phone Pro");
        assert!(featured[0].theme.is_dark());
        assert_eq!(featured[3].eyebrow, Some("Now available"));
        assert!(
            featured
                .iter()
                .all(|section| section.primary_cta == "Learn more" && section.secondary_cta == "Buy")
        );
    }

    #[test]
    fn test_load_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":"case","name":"Case","heroTitle":"Case","tagline":"t",
                "descriptionShort":"s","descriptionLong":"l","price":19.99,
                "image":"/c.png","theme":"light"}}]"#
        )
        .unwrap();

        let catalog = Catalog::load(file.path()).unwrap();
        let case = catalog.find_by_id("case").unwrap();
        assert_eq!(case.price, Price::from_cents(1999));
        assert_eq!(case.eyebrow, None);
    }

    #[test]
    fn test_load_rejects_negative_price() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":"case","name":"Case","heroTitle":"Case","tagline":"t",
                "descriptionShort":"s","descriptionLong":"l","price":-1,
                "image":"/c.png","theme":"light"}}]"#
        )
        .unwrap();

        assert!(matches!(
            Catalog::load(file.path()),
            Err(CatalogError::Parse(_))
        ));
    }
}
