//! Domain types for the commerce backend.
//!
//! These types provide a clean, ergonomic shape separate from the raw REST
//! records. Raw records tolerate the backend's quirks (empty strings for
//! absent prices, ratings as decimal strings); the normalized types are what
//! the rest of the storefront consumes.

use chrono::NaiveDateTime;
use padma_core::{CategoryId, CurrencyCode, CustomerId, ImageId, OrderId, OrderStatus, Price, ProductId, ProductStatus};
use serde::{Deserialize, Serialize};

/// Image shown when a product has no images of its own.
pub const PLACEHOLDER_IMAGE: &str = "/static/images/placeholder-product.svg";

// =============================================================================
// Image Types
// =============================================================================

/// Product or category image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Backend image ID.
    pub id: Option<ImageId>,
    /// Image URL.
    pub url: String,
    /// Alt text for accessibility.
    pub alt: Option<String>,
}

// =============================================================================
// Product Types
// =============================================================================

/// A catalog product.
///
/// Read-only snapshot fetched per request; never mutated by the storefront.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub slug: String,
    pub name: String,
    /// Current price as a decimal string (preserves backend precision).
    pub price: String,
    /// Pre-sale price as a decimal string.
    pub regular_price: String,
    /// Sale price, when the product is on sale.
    pub sale_price: Option<String>,
    /// Short description HTML from the backend.
    pub short_description: String,
    /// Ordered image sequence; first image is the featured one.
    pub images: Vec<Image>,
    /// IDs of the categories this product belongs to.
    pub categories: Vec<CategoryId>,
    pub status: ProductStatus,
    /// Average review rating, when the product has reviews.
    pub average_rating: Option<f64>,
    /// Lifetime sales count (drives "best sellers" ordering backend-side).
    pub total_sales: i64,
}

impl Product {
    /// URL of the featured image, or the documented placeholder when the
    /// product has no images. Never panics.
    #[must_use]
    pub fn featured_image(&self) -> &str {
        self.images
            .first()
            .map_or(PLACEHOLDER_IMAGE, |img| img.url.as_str())
    }

    /// Formatted display price in the store currency.
    ///
    /// Falls back to the raw backend string when it does not parse as a
    /// decimal (the backend sends `""` for price-on-request products).
    #[must_use]
    pub fn display_price(&self) -> String {
        Price::parse(&self.price, CurrencyCode::BDT)
            .map_or_else(|_| self.price.clone(), |p| p.to_string())
    }

    /// Whether the product currently has a sale price.
    #[must_use]
    pub fn on_sale(&self) -> bool {
        self.sale_price.as_ref().is_some_and(|p| !p.is_empty())
    }
}

/// A catalog category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub image: Option<Image>,
    /// Number of published products in this category.
    pub count: i64,
}

/// One page of products plus the backend's total count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    /// Total matching products across all pages (from `X-WP-Total`).
    pub total: u64,
}

// =============================================================================
// Account Types
// =============================================================================

/// A registered customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// An authenticated session issued by the backend's JWT endpoint.
///
/// Stored server-side in the session; the token never reaches the browser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    /// Bearer token for authenticated backend calls.
    pub token: String,
    pub email: String,
    pub display_name: String,
}

/// A line item on an order, as shown in order history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub name: String,
    pub quantity: u32,
    /// Line total as a decimal string.
    pub total: String,
}

/// An order summary for the account order-history page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSummary {
    pub id: OrderId,
    /// Customer-facing order number (not always the numeric ID).
    pub number: String,
    pub status: OrderStatus,
    /// Backend timestamps carry no zone; they are store-local.
    pub date_created: NaiveDateTime,
    /// Order total as a decimal string.
    pub total: String,
    pub currency: String,
    pub line_items: Vec<OrderLineItem>,
}

// =============================================================================
// Raw REST Records
// =============================================================================

/// Raw product record as the backend sends it.
#[derive(Debug, Deserialize)]
pub(crate) struct RawProduct {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub status: ProductStatus,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub regular_price: String,
    #[serde(default)]
    pub sale_price: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub images: Vec<RawImage>,
    #[serde(default)]
    pub categories: Vec<RawCategoryRef>,
    #[serde(default)]
    pub average_rating: String,
    #[serde(default)]
    pub total_sales: i64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawImage {
    #[serde(default)]
    pub id: Option<i64>,
    pub src: String,
    #[serde(default)]
    pub alt: String,
}

/// Category reference embedded in a product record.
#[derive(Debug, Deserialize)]
pub(crate) struct RawCategoryRef {
    pub id: i64,
}

/// Raw category record as the backend sends it.
#[derive(Debug, Deserialize)]
pub(crate) struct RawCategory {
    pub id: i64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<RawImage>,
    #[serde(default)]
    pub count: i64,
}

/// Raw order record for order history.
#[derive(Debug, Deserialize)]
pub(crate) struct RawOrder {
    pub id: i64,
    pub number: String,
    pub status: OrderStatus,
    pub date_created: NaiveDateTime,
    pub total: String,
    pub currency: String,
    #[serde(default)]
    pub line_items: Vec<RawOrderLineItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawOrderLineItem {
    pub name: String,
    pub quantity: u32,
    #[serde(default)]
    pub total: String,
}

// =============================================================================
// Conversions
// =============================================================================

impl From<RawImage> for Image {
    fn from(raw: RawImage) -> Self {
        Self {
            id: raw.id.map(ImageId::new),
            url: raw.src,
            alt: if raw.alt.is_empty() {
                None
            } else {
                Some(raw.alt)
            },
        }
    }
}

impl From<RawProduct> for Product {
    fn from(raw: RawProduct) -> Self {
        // "0.00" means unrated, not a zero-star product
        let average_rating = raw
            .average_rating
            .parse::<f64>()
            .ok()
            .filter(|r| *r > 0.0);

        Self {
            id: ProductId::new(raw.id),
            slug: raw.slug,
            name: raw.name,
            price: raw.price,
            regular_price: raw.regular_price,
            sale_price: if raw.sale_price.is_empty() {
                None
            } else {
                Some(raw.sale_price)
            },
            short_description: raw.short_description,
            images: raw.images.into_iter().map(Image::from).collect(),
            categories: raw
                .categories
                .into_iter()
                .map(|c| CategoryId::new(c.id))
                .collect(),
            status: raw.status,
            average_rating,
            total_sales: raw.total_sales,
        }
    }
}

impl From<RawCategory> for Category {
    fn from(raw: RawCategory) -> Self {
        Self {
            id: CategoryId::new(raw.id),
            slug: raw.slug,
            name: raw.name,
            description: raw.description,
            image: raw.image.map(Image::from),
            count: raw.count,
        }
    }
}

impl From<RawOrder> for OrderSummary {
    fn from(raw: RawOrder) -> Self {
        Self {
            id: OrderId::new(raw.id),
            number: raw.number,
            status: raw.status,
            date_created: raw.date_created,
            total: raw.total,
            currency: raw.currency,
            line_items: raw
                .line_items
                .into_iter()
                .map(|li| OrderLineItem {
                    name: li.name,
                    quantity: li.quantity,
                    total: li.total,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product_with_images(images: Vec<Image>) -> Product {
        Product {
            id: ProductId::new(1),
            slug: "rickshaw-art-tote".to_string(),
            name: "Rickshaw Art Tote".to_string(),
            price: "850.00".to_string(),
            regular_price: "850.00".to_string(),
            sale_price: None,
            short_description: String::new(),
            images,
            categories: vec![CategoryId::new(9)],
            status: ProductStatus::Publish,
            average_rating: None,
            total_sales: 0,
        }
    }

    #[test]
    fn test_featured_image_placeholder_when_empty() {
        let product = product_with_images(Vec::new());
        assert_eq!(product.featured_image(), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_featured_image_uses_first_image() {
        let product = product_with_images(vec![
            Image {
                id: None,
                url: "https://cdn.test/tote-front.jpg".to_string(),
                alt: None,
            },
            Image {
                id: None,
                url: "https://cdn.test/tote-back.jpg".to_string(),
                alt: None,
            },
        ]);
        assert_eq!(product.featured_image(), "https://cdn.test/tote-front.jpg");
    }

    #[test]
    fn test_display_price_formats_decimal() {
        let product = product_with_images(Vec::new());
        assert_eq!(product.display_price(), "\u{09f3}850.00");
    }

    #[test]
    fn test_display_price_falls_back_to_raw() {
        let mut product = product_with_images(Vec::new());
        product.price = String::new();
        assert_eq!(product.display_price(), "");
    }

    #[test]
    fn test_raw_product_conversion() {
        let raw: RawProduct = serde_json::from_str(
            r#"{
                "id": 42,
                "name": "Jamdani Scarf",
                "slug": "jamdani-scarf",
                "status": "publish",
                "price": "1250.00",
                "regular_price": "1500.00",
                "sale_price": "1250.00",
                "short_description": "<p>Handwoven.</p>",
                "images": [{"id": 7, "src": "https://cdn.test/scarf.jpg", "alt": ""}],
                "categories": [{"id": 3, "name": "Scarves", "slug": "scarves"}],
                "average_rating": "4.50",
                "total_sales": 87
            }"#,
        )
        .expect("valid product payload");

        let product = Product::from(raw);
        assert_eq!(product.id, ProductId::new(42));
        assert_eq!(product.sale_price.as_deref(), Some("1250.00"));
        assert!(product.on_sale());
        assert_eq!(product.categories, vec![CategoryId::new(3)]);
        assert_eq!(product.average_rating, Some(4.5));
        assert_eq!(product.images.len(), 1);
        assert_eq!(product.images[0].alt, None);
    }

    #[test]
    fn test_unrated_product_has_no_rating() {
        let raw: RawProduct = serde_json::from_str(
            r#"{"id": 1, "name": "New Item", "average_rating": "0.00"}"#,
        )
        .expect("valid product payload");
        let product = Product::from(raw);
        assert_eq!(product.average_rating, None);
        assert!(!product.on_sale());
    }

    #[test]
    fn test_raw_order_conversion() {
        let raw: RawOrder = serde_json::from_str(
            r#"{
                "id": 901,
                "number": "901",
                "status": "processing",
                "date_created": "2026-07-14T09:30:00",
                "total": "2100.00",
                "currency": "BDT",
                "line_items": [{"name": "Jamdani Scarf", "quantity": 2, "total": "2100.00"}]
            }"#,
        )
        .expect("valid order payload");

        let order = OrderSummary::from(raw);
        assert_eq!(order.id, OrderId::new(901));
        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(order.line_items.len(), 1);
    }
}
