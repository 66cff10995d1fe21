use serde::Serialize;

/// Placeholder for any field that could not be located on the page.
pub const NOT_AVAILABLE: &str = "N/A";

/// Column names of an exported record, in export order.
pub const FIELD_NAMES: [&str; 8] = [
    "Product ID",
    "Title",
    "Rating",
    "Rating Count",
    "Monthly Sales",
    "Selling Price",
    "MRP",
    "Discount",
];

/// One product listing scraped from a search-results page.
///
/// Every field holds either the trimmed text found on the page or
/// [`NOT_AVAILABLE`]. Values are opaque strings: ratings such as
/// `"4.3 out of 5 stars"` and prices such as `"₹1,299"` are kept as rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRecord {
    #[serde(rename = "Product ID")]
    pub product_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Rating")]
    pub rating: String,
    #[serde(rename = "Rating Count")]
    pub rating_count: String,
    /// Marketplace "bought in past month" badge text.
    #[serde(rename = "Monthly Sales")]
    pub monthly_sales: String,
    /// Selling price with the currency symbol prepended.
    #[serde(rename = "Selling Price")]
    pub selling_price: String,
    /// List price (struck-through), as displayed.
    #[serde(rename = "MRP")]
    pub mrp: String,
    #[serde(rename = "Discount")]
    pub discount: String,
}

impl ProductRecord {
    /// Field values in [`FIELD_NAMES`] order.
    #[must_use]
    pub fn values(&self) -> [&str; 8] {
        [
            self.product_id.as_str(),
            self.title.as_str(),
            self.rating.as_str(),
            self.rating_count.as_str(),
            self.monthly_sales.as_str(),
            self.selling_price.as_str(),
            self.mrp.as_str(),
            self.discount.as_str(),
        ]
    }

    /// Returns the number of fields that fell back to [`NOT_AVAILABLE`].
    #[must_use]
    pub fn missing_field_count(&self) -> usize {
        self.values()
            .iter()
            .filter(|v| **v == NOT_AVAILABLE)
            .count()
    }
}
