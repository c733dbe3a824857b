//! Filter option derivation.
//!
//! Options cascade in a fixed precedence: brand, color, size, gender. Each
//! dimension's choices come from the catalog narrowed by the dimensions
//! before it, never by itself or anything after it. Picking a brand
//! therefore never hides the other brands, but does narrow the colors,
//! sizes and genders on offer. The price range is taken from the set
//! narrowed through gender.

use crate::catalog::Product;
use crate::search::collate::normalize_options;
use crate::search::filter::FilterState;
use serde::{Deserialize, Serialize};

/// Observed price range of a product set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    /// Floor of the lowest price.
    pub min: f64,
    /// Ceiling of the highest price.
    pub max: f64,
    /// False when no product in the set has a parseable price.
    pub has_values: bool,
}

impl PriceRange {
    /// Range over every price candidate of `products`.
    pub fn of<'a>(products: impl IntoIterator<Item = &'a Product>) -> Self {
        let mut prices = products
            .into_iter()
            .flat_map(Product::price_candidates)
            .filter(|p| p.is_finite())
            .peekable();

        if prices.peek().is_none() {
            return Self::default();
        }

        let (min, max) = prices.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p), hi.max(p))
        });
        Self {
            min: min.floor(),
            max: max.ceil(),
            has_values: true,
        }
    }

    /// Whether `price` lies inside `[min, max]`.
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

/// Choices currently offered for each filter dimension.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub brands: Vec<String>,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    pub genders: Vec<String>,
    pub price_range: PriceRange,
}

impl FilterOptions {
    /// Derive the options for `filters` over `catalog`.
    pub fn derive(catalog: &[Product], filters: &FilterState) -> Self {
        let candidates: Vec<&Product> = catalog.iter().collect();
        let brands = normalize_options(candidates.iter().filter_map(|p| p.brand_name()));

        let candidates = narrow(candidates, filters.brand.value(), |p, brand| {
            p.brand_name() == Some(brand.trim())
        });
        let colors = normalize_options(candidates.iter().flat_map(|p| p.colors()));

        let candidates = narrow(candidates, filters.color.value(), Product::has_color);
        let sizes = normalize_options(candidates.iter().flat_map(|p| p.sizes()));

        let candidates = narrow(candidates, filters.size.value(), Product::has_size);
        let genders = normalize_options(candidates.iter().flat_map(|p| p.genders()));

        let candidates = narrow(candidates, filters.gender.value(), Product::has_gender);
        let price_range = PriceRange::of(candidates);

        Self {
            brands,
            colors,
            sizes,
            genders,
            price_range,
        }
    }
}

fn narrow<'a>(
    candidates: Vec<&'a Product>,
    selected: Option<&str>,
    keep: impl Fn(&Product, &str) -> bool,
) -> Vec<&'a Product> {
    match selected {
        None => candidates,
        Some(value) => candidates.into_iter().filter(|p| keep(*p, value)).collect(),
    }
}
