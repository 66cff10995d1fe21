//! Product-record extraction from a rendered search-results page.
//!
//! Each listing on the page is a `div` carrying a `data-asin` attribute. Fields
//! are located with fixed structural selectors scoped to that container; the
//! discount badge varies too much across listings for a fixed selector and is
//! found with [`scan_span_text`] instead.

use std::sync::LazyLock;

use pricewatch_core::{ProductRecord, NOT_AVAILABLE};
use scraper::{ElementRef, Html, Selector};

use crate::readiness::SEARCH_RESULTS_MARKER;

/// Prepended to the whole-number part of the selling price.
pub const CURRENCY_SYMBOL: &str = "₹";

struct ProductSelectors {
    container: Selector,
    title: Selector,
    rating: Selector,
    rating_count: Selector,
    monthly_sales: Selector,
    price_whole: Selector,
    /// Struck-through list price wrapper.
    mrp_outer: Selector,
    /// Screen-reader text inside [`Self::mrp_outer`] carrying the formatted list price.
    mrp_inner: Selector,
    span: Selector,
}

impl ProductSelectors {
    fn compile() -> Self {
        let parse = |css: &str| Selector::parse(css).expect("static selector is valid CSS");
        Self {
            container: parse("div[data-asin]"),
            title: parse(SEARCH_RESULTS_MARKER),
            rating: parse("span.a-icon-alt"),
            rating_count: parse("span.a-size-base.s-underline-text"),
            monthly_sales: parse("span.a-size-base.a-color-secondary"),
            price_whole: parse("span.a-price-whole"),
            mrp_outer: parse("span.a-price.a-text-price"),
            mrp_inner: parse("span.a-offscreen"),
            span: parse("span"),
        }
    }
}

static SELECTORS: LazyLock<ProductSelectors> = LazyLock::new(ProductSelectors::compile);

pub(crate) fn title_selector() -> &'static Selector {
    &SELECTORS.title
}

/// Extracts one [`ProductRecord`] per product container in `document`.
///
/// Containers whose `data-asin` attribute is empty (ad slots, layout
/// placeholders) are skipped. Returns an empty `Vec` when the document has no
/// qualifying containers.
#[must_use]
pub fn extract_products(document: &Html) -> Vec<ProductRecord> {
    document
        .select(&SELECTORS.container)
        .filter_map(|container| {
            let product_id = container.value().attr("data-asin")?.trim();
            if product_id.is_empty() {
                return None;
            }
            Some(extract_record(product_id, container))
        })
        .collect()
}

fn extract_record(product_id: &str, container: ElementRef<'_>) -> ProductRecord {
    let s = &*SELECTORS;

    let selling_price = first_text(container, &s.price_whole)
        .map(|whole| format!("{CURRENCY_SYMBOL}{whole}"));

    let mrp = container
        .select(&s.mrp_outer)
        .next()
        .and_then(|outer| first_text(outer, &s.mrp_inner));

    let discount = scan_span_text(container, |text| text.contains('%'));

    ProductRecord {
        product_id: product_id.to_owned(),
        title: or_na(first_text(container, &s.title)),
        rating: or_na(first_text(container, &s.rating)),
        rating_count: or_na(first_text(container, &s.rating_count)),
        monthly_sales: or_na(first_text(container, &s.monthly_sales)),
        selling_price: or_na(selling_price),
        mrp: or_na(mrp),
        discount: or_na(discount),
    }
}

/// Trimmed text of the first element under `scope` matching `selector`.
fn first_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope.select(selector).next().map(element_text)
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_owned()
}

fn or_na(value: Option<String>) -> String {
    value.unwrap_or_else(|| NOT_AVAILABLE.to_owned())
}

/// Fuzzy fallback lookup: the trimmed own text of the first `span` under
/// `scope` whose own text satisfies `predicate`.
///
/// "Own text" is the span's direct text children only, so a wrapper span does
/// not match on the strength of a nested badge. Position in the container is
/// irrelevant; the first match in document order wins.
pub(crate) fn scan_span_text<P>(scope: ElementRef<'_>, predicate: P) -> Option<String>
where
    P: Fn(&str) -> bool,
{
    scope.select(&SELECTORS.span).find_map(|span| {
        let own: String = span
            .children()
            .filter_map(|node| node.value().as_text().map(|text| &**text))
            .collect();
        predicate(&own).then(|| own.trim().to_owned())
    })
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
