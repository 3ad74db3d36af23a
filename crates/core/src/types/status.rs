//! Status enums for catalog and order entities.
//!
//! Values map to the commerce backend's status strings verbatim.

use serde::{Deserialize, Serialize};

/// Product publication status.
///
/// The storefront only ever requests `publish` products, but the backend
/// returns the field and admin previews may surface drafts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    #[default]
    Publish,
    Draft,
    Pending,
    Private,
}

impl ProductStatus {
    /// Backend query-parameter value for this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Publish => "publish",
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Private => "private",
        }
    }
}

/// Order status as reported by the commerce backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    OnHold,
    Completed,
    Cancelled,
    Refunded,
    Failed,
}

impl OrderStatus {
    /// Human-readable label for account pages.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending payment",
            Self::Processing => "Processing",
            Self::OnHold => "On hold",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
            Self::Refunded => "Refunded",
            Self::Failed => "Failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_status_serde() {
        let status: ProductStatus = serde_json::from_str("\"publish\"").expect("valid status");
        assert_eq!(status, ProductStatus::Publish);
        assert_eq!(
            serde_json::to_string(&ProductStatus::Draft).expect("serialize"),
            "\"draft\""
        );
    }

    #[test]
    fn test_order_status_kebab_case() {
        let status: OrderStatus = serde_json::from_str("\"on-hold\"").expect("valid status");
        assert_eq!(status, OrderStatus::OnHold);
        assert_eq!(status.label(), "On hold");
    }

    #[test]
    fn test_product_status_query_value() {
        assert_eq!(ProductStatus::Publish.as_str(), "publish");
    }
}
