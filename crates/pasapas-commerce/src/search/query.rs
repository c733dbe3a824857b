//! Search term plus filters, applied to a catalog.

use crate::catalog::Product;
use crate::search::filter::{FilterState, Selection};
use crate::search::options::PriceRange;
use serde::{Deserialize, Serialize};

/// A catalog search: free-text term and filter selections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Normalized term (trimmed, lowercase). Empty matches everything.
    pub term: String,
    /// Filter selections.
    pub filters: FilterState,
}

impl SearchQuery {
    /// Create an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search term.
    pub fn with_term(mut self, term: &str) -> Self {
        self.term = normalize_term(term);
        self
    }

    /// Set the filters.
    pub fn with_filters(mut self, filters: FilterState) -> Self {
        self.filters = filters;
        self
    }

    /// Products matching the query, in catalog order.
    ///
    /// Unset price bounds fall back to `range`, which should be the range
    /// derived for the same filters.
    pub fn apply<'a>(&self, catalog: &'a [Product], range: &PriceRange) -> Vec<&'a Product> {
        let (min, max) = self.filters.price_bounds(range);
        let bounds = PriceRange {
            min,
            max,
            has_values: range.has_values,
        };
        catalog.iter().filter(|p| self.matches(p, &bounds)).collect()
    }

    /// Whether one product passes the term and every filter.
    pub fn matches(&self, product: &Product, bounds: &PriceRange) -> bool {
        self.matches_term(product)
            && self.matches_brand(product)
            && member(&self.filters.color, |c| product.has_color(c))
            && member(&self.filters.size, |s| product.has_size(s))
            && member(&self.filters.gender, |g| product.has_gender(g))
            && matches_price(product, bounds)
    }

    fn matches_term(&self, product: &Product) -> bool {
        if self.term.is_empty() {
            return true;
        }
        [product.brand.as_deref(), product.model.as_deref()]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&self.term))
    }

    fn matches_brand(&self, product: &Product) -> bool {
        match self.filters.brand.value() {
            None => true,
            Some(brand) => product.brand_name() == Some(brand),
        }
    }
}

/// Trim and lowercase a raw search term.
pub fn normalize_term(raw: &str) -> String {
    raw.trim().to_lowercase()
}

// Same predicates the option deriver narrows with.
fn member(selection: &Selection, has: impl Fn(&str) -> bool) -> bool {
    selection.value().map_or(true, has)
}

// A product without any parseable price is never excluded by price.
fn matches_price(product: &Product, bounds: &PriceRange) -> bool {
    let prices = product.price_candidates();
    prices.is_empty() || prices.into_iter().any(|p| bounds.contains(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Stock;
    use crate::search::options::FilterOptions;

    fn product(id: &str, brand: &str, model: &str, color: &str, size: &str, price: &str) -> Product {
        let mut p = Product::new(id);
        p.brand = Some(brand.into());
        p.model = Some(model.into());
        p.color = Some(color.into());
        let mut s = Stock::new(format!("{id}0"));
        s.size = Some(size.into());
        s.gender = Some("Homme".into());
        s.price = Some(price.into());
        p.stocks.push(s);
        p
    }

    fn catalog() -> Vec<Product> {
        vec![
            product("1", "Nike", "Air", "Red", "42", "100€"),
            product("2", "Adidas", "Zoom", "Blue", "43", "150€"),
            product("3", "Asics", "Gel Kayano", "White", "44", "120€"),
            product("4", "Nike", "Dunk Low", "White", "42", "n/a"),
        ]
    }

    fn run(query: &SearchQuery, items: &[Product]) -> Vec<String> {
        let opts = FilterOptions::derive(items, &query.filters);
        query
            .apply(items, &opts.price_range)
            .into_iter()
            .map(|p| p.id.to_string())
            .collect()
    }

    #[test]
    fn test_term_matches_brand_or_model() {
        let items = vec![
            product("1", "Nike", "Air Max", "Red", "42", "100€"),
            product("2", "Adidas", "Zoom", "Blue", "43", "150€"),
            product("3", "Fairfax", "Runner", "Blue", "43", "90€"),
        ];
        let q = SearchQuery::new().with_term("  AIR ");
        assert_eq!(q.term, "air");
        assert_eq!(run(&q, &items), vec!["1", "3"]);
    }

    #[test]
    fn test_brand_filter_example() {
        let items = vec![
            product("1", "Nike", "Air", "Red", "42", "100€"),
            product("2", "Adidas", "Zoom", "Blue", "43", "150€"),
        ];
        let q = SearchQuery::new().with_filters(FilterState::new().with_brand("Nike"));
        let opts = FilterOptions::derive(&items, &q.filters);
        assert_eq!(opts.colors, vec!["Red"]);
        assert_eq!(run(&q, &items), vec!["1"]);
    }

    #[test]
    fn test_catalog_order_preserved() {
        let q = SearchQuery::new().with_filters(FilterState::new().with_color("White"));
        assert_eq!(run(&q, &catalog()), vec!["3", "4"]);
    }

    #[test]
    fn test_size_and_gender_membership() {
        let q = SearchQuery::new().with_filters(FilterState::new().with_size("42").with_gender("Homme"));
        assert_eq!(run(&q, &catalog()), vec!["1", "4"]);
        let q = SearchQuery::new().with_filters(FilterState::new().with_gender("Femme"));
        assert!(run(&q, &catalog()).is_empty());
    }

    #[test]
    fn test_color_and_gender_ignore_case() {
        let q = SearchQuery::new().with_filters(FilterState::new().with_color("white").with_gender("HOMME"));
        assert_eq!(run(&q, &catalog()), vec!["3", "4"]);
    }

    #[test]
    fn test_price_bounds() {
        let q = SearchQuery::new().with_filters(FilterState::new().with_price(Some(110.0), Some(160.0)));
        // "n/a" has no parseable price, so it is never excluded.
        assert_eq!(run(&q, &catalog()), vec!["2", "3", "4"]);
    }

    #[test]
    fn test_any_price_candidate_in_range_passes() {
        let mut p = product("1", "Nike", "Air", "Red", "42", "300€");
        p.price = Some("95".into());
        let bounds = PriceRange {
            min: 90.0,
            max: 100.0,
            has_values: true,
        };
        assert!(SearchQuery::new().matches(&p, &bounds));
    }

    #[test]
    fn test_unset_bounds_use_range() {
        let q = SearchQuery::new();
        assert_eq!(run(&q, &catalog()), vec!["1", "2", "3", "4"]);
    }
}
