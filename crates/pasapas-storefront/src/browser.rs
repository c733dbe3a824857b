//! Catalog browser: load, search, filter, paginate.

use crate::error::{Result, StorefrontError};
use futures::future::join_all;
use pasapas_commerce::catalog::Product;
use pasapas_commerce::search::{
    FilterOptions, FilterState, SearchQuery, SearchResults, Selection, PAGE_SIZE,
};
use pasapas_data::StorefrontApi;

/// Message shown when the catalog cannot be fetched.
pub const LOAD_FAILED_MESSAGE: &str = "Unable to load products.";

/// A filter dimension the shopper can set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Brand,
    Color,
    Size,
    Gender,
}

/// State of the sneakers page.
///
/// Every change to the term or a filter sends the shopper back to page 1
/// and re-derives the filter options from the catalog.
#[derive(Debug, Clone)]
pub struct CatalogBrowser {
    catalog: Vec<Product>,
    query: SearchQuery,
    options: FilterOptions,
    page: usize,
}

impl Default for CatalogBrowser {
    fn default() -> Self {
        Self::with_catalog(Vec::new())
    }
}

impl CatalogBrowser {
    /// Browse an already loaded catalog.
    pub fn with_catalog(catalog: Vec<Product>) -> Self {
        let mut browser = Self {
            catalog,
            query: SearchQuery::new(),
            options: FilterOptions::default(),
            page: 1,
        };
        browser.refresh();
        browser
    }

    /// Fetch the catalog, then every product's stocks concurrently.
    ///
    /// A product whose stocks cannot be fetched is kept with no stocks.
    pub async fn load(api: &dyn StorefrontApi) -> Result<Self> {
        let products = api.list_products().await.map_err(|e| {
            tracing::error!(error = %e, "catalog fetch failed");
            StorefrontError::remote(LOAD_FAILED_MESSAGE, e)
        })?;

        let stocks = join_all(products.iter().map(|p| api.product_stocks(&p.id))).await;
        let catalog = products
            .into_iter()
            .zip(stocks)
            .map(|(mut product, stocks)| {
                product.stocks = stocks.unwrap_or_else(|e| {
                    tracing::warn!(product = %product.id, error = %e, "stock fetch failed");
                    Vec::new()
                });
                product
            })
            .collect::<Vec<_>>();

        tracing::debug!(products = catalog.len(), "catalog loaded");
        Ok(Self::with_catalog(catalog))
    }

    pub fn catalog(&self) -> &[Product] {
        &self.catalog
    }

    pub fn filters(&self) -> &FilterState {
        &self.query.filters
    }

    pub fn term(&self) -> &str {
        &self.query.term
    }

    /// Options for the current selections.
    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// Whether the price inputs should be enabled.
    pub fn price_enabled(&self) -> bool {
        self.options.price_range.has_values
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Products matching the term and filters, in catalog order.
    pub fn matching(&self) -> Vec<&Product> {
        self.query.apply(&self.catalog, &self.options.price_range)
    }

    /// The current page of matches.
    pub fn results(&self) -> SearchResults<&Product> {
        SearchResults::paginate(&self.matching(), self.page, PAGE_SIZE)
    }

    pub fn set_term(&mut self, term: &str) {
        self.query = std::mem::take(&mut self.query).with_term(term);
        self.page = 1;
        self.refresh();
    }

    pub fn select(&mut self, dimension: Dimension, value: impl Into<Selection>) {
        let value = value.into();
        let filters = &mut self.query.filters;
        match dimension {
            Dimension::Brand => filters.brand = value,
            Dimension::Color => filters.color = value,
            Dimension::Size => filters.size = value,
            Dimension::Gender => filters.gender = value,
        }
        self.page = 1;
        self.refresh();
    }

    pub fn set_price(&mut self, min: Option<f64>, max: Option<f64>) {
        self.query.filters.price_min = min;
        self.query.filters.price_max = max;
        self.page = 1;
        self.refresh();
    }

    /// Every dimension back to "all", price to the full range.
    pub fn reset_filters(&mut self) {
        let range = FilterOptions::derive(&self.catalog, &FilterState::new()).price_range;
        self.query.filters = FilterState::reset(&range);
        self.page = 1;
        self.refresh();
    }

    /// Jump to `page`, clamped to the available pages.
    pub fn go_to_page(&mut self, page: usize) {
        self.page = page;
        self.clamp_page();
    }

    fn refresh(&mut self) {
        self.options = self.query.filters.reconcile(&self.catalog);
        self.clamp_page();
    }

    fn clamp_page(&mut self) {
        let total = self.matching().len();
        let total_pages = total.div_ceil(PAGE_SIZE).max(1);
        self.page = self.page.clamp(1, total_pages);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pasapas_commerce::catalog::Stock;

    fn product(id: usize, brand: &str, model: &str, color: &str, size: &str, price: &str) -> Product {
        let mut p = Product::new(id.to_string());
        p.brand = Some(brand.into());
        p.model = Some(model.into());
        p.color = Some(color.into());
        let mut s = Stock::new(format!("{}0", id));
        s.size = Some(size.into());
        s.gender = Some("Homme".into());
        s.price = Some(price.into());
        p.stocks.push(s);
        p
    }

    fn two() -> CatalogBrowser {
        CatalogBrowser::with_catalog(vec![
            product(1, "Nike", "Air", "Red", "42", "100€"),
            product(2, "Adidas", "Zoom", "Blue", "43", "150€"),
        ])
    }

    #[test]
    fn test_brand_narrows_colors_and_results() {
        let mut browser = two();
        browser.select(Dimension::Brand, "Nike");
        assert_eq!(browser.options().colors, vec!["Red"]);
        assert_eq!(browser.options().brands, vec!["Adidas", "Nike"]);
        let ids: Vec<_> = browser.matching().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1"]);
    }

    #[test]
    fn test_term_search() {
        let mut browser = two();
        browser.set_term("  AIR ");
        assert_eq!(browser.term(), "air");
        assert_eq!(browser.matching().len(), 1);
    }

    #[test]
    fn test_changes_reset_page() {
        let catalog = (0..45)
            .map(|i| product(i, "Nike", &format!("M{}", i), "Red", "42", "10€"))
            .collect();
        let mut browser = CatalogBrowser::with_catalog(catalog);
        browser.go_to_page(3);
        assert_eq!(browser.page(), 3);
        assert_eq!(browser.results().items.len(), 5);

        browser.select(Dimension::Color, "Red");
        assert_eq!(browser.page(), 1);
    }

    #[test]
    fn test_page_clamps() {
        let mut browser = two();
        browser.go_to_page(9);
        assert_eq!(browser.page(), 1);
        browser.go_to_page(0);
        assert_eq!(browser.page(), 1);
    }

    #[test]
    fn test_unoffered_selection_resets() {
        let mut browser = two();
        browser.select(Dimension::Brand, "Puma");
        assert!(browser.filters().brand.is_all());
    }

    #[test]
    fn test_lowercase_color_keeps_filter() {
        let mut browser = two();
        browser.select(Dimension::Color, "red");
        assert_eq!(browser.filters().color, Selection::Value("Red".into()));
        assert_eq!(browser.options().sizes, vec!["42"]);
        let ids: Vec<_> = browser.matching().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1"]);
    }

    #[test]
    fn test_reset_filters() {
        let mut browser = two();
        browser.select(Dimension::Brand, "Nike");
        browser.set_price(Some(120.0), None);
        browser.reset_filters();
        assert!(browser.filters().brand.is_all());
        assert_eq!(browser.filters().price_min, Some(100.0));
        assert_eq!(browser.filters().price_max, Some(150.0));
        assert_eq!(browser.matching().len(), 2);
    }

    #[test]
    fn test_price_disabled_without_prices() {
        let mut p = Product::new("1");
        p.brand = Some("Vans".into());
        let browser = CatalogBrowser::with_catalog(vec![p]);
        assert!(!browser.price_enabled());
        assert_eq!(browser.matching().len(), 1);
    }
}
