//! Filter selections and price bound normalization.

use crate::catalog::Product;
use crate::search::options::{FilterOptions, PriceRange};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire/CLI spelling of the "no filter" selection.
pub const ALL: &str = "all";

/// One filter dimension's selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Selection {
    /// No narrowing on this dimension.
    #[default]
    All,
    /// Narrow to this value.
    Value(String),
}

impl Selection {
    /// Parse a selection; blank or "all" means no narrowing.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL) {
            Selection::All
        } else {
            Selection::Value(trimmed.to_string())
        }
    }

    /// Selected value, if any.
    pub fn value(&self) -> Option<&str> {
        match self {
            Selection::All => None,
            Selection::Value(v) => Some(v),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    /// Adopt the offered spelling of a value typed in another case.
    ///
    /// Returns true when the value was respelled.
    pub fn respell(&mut self, options: &[String]) -> bool {
        let Selection::Value(v) = self else {
            return false;
        };
        if options.iter().any(|o| o == v) {
            return false;
        }
        let wanted = v.trim().to_lowercase();
        match options.iter().find(|o| o.to_lowercase() == wanted) {
            Some(offered) => {
                *v = offered.clone();
                true
            }
            None => false,
        }
    }

    /// Whether this selection is still offered by `options`.
    pub fn is_offered(&self, options: &[String]) -> bool {
        match self {
            Selection::All => true,
            Selection::Value(v) => options.iter().any(|o| o == v),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value().unwrap_or(ALL))
    }
}

impl From<String> for Selection {
    fn from(value: String) -> Self {
        Selection::parse(&value)
    }
}

impl From<&str> for Selection {
    fn from(value: &str) -> Self {
        Selection::parse(value)
    }
}

impl From<Selection> for String {
    fn from(value: Selection) -> Self {
        value.to_string()
    }
}

/// The shopper's current filter selections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub brand: Selection,
    #[serde(default)]
    pub color: Selection,
    #[serde(default)]
    pub size: Selection,
    #[serde(default)]
    pub gender: Selection,
    /// Lower price bound; `None` means the range minimum.
    #[serde(default)]
    pub price_min: Option<f64>,
    /// Upper price bound; `None` means the range maximum.
    #[serde(default)]
    pub price_max: Option<f64>,
}

impl FilterState {
    /// Create an empty filter state.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_brand(mut self, brand: impl Into<Selection>) -> Self {
        self.brand = brand.into();
        self
    }

    pub fn with_color(mut self, color: impl Into<Selection>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_size(mut self, size: impl Into<Selection>) -> Self {
        self.size = size.into();
        self
    }

    pub fn with_gender(mut self, gender: impl Into<Selection>) -> Self {
        self.gender = gender.into();
        self
    }

    pub fn with_price(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.price_min = min;
        self.price_max = max;
        self
    }

    /// Every dimension back to "all", price bounds to `range`.
    ///
    /// With no price data the bounds are left unset.
    pub fn reset(range: &PriceRange) -> Self {
        let (price_min, price_max) = if range.has_values {
            (Some(range.min), Some(range.max))
        } else {
            (None, None)
        };
        Self {
            price_min,
            price_max,
            ..Self::default()
        }
    }

    /// Effective price bounds: the selected ones, falling back to `range`.
    pub fn price_bounds(&self, range: &PriceRange) -> (f64, f64) {
        (
            self.price_min.unwrap_or(range.min),
            self.price_max.unwrap_or(range.max),
        )
    }

    /// Pull the price bounds back inside `range`.
    ///
    /// Unset bounds take the range edges, set ones are clamped, and a
    /// crossed pair is swapped. Without price data both bounds are cleared.
    /// Returns whether anything changed.
    pub fn normalize_price(&mut self, range: &PriceRange) -> bool {
        let before = (self.price_min, self.price_max);

        if !range.has_values {
            self.price_min = None;
            self.price_max = None;
            return before != (None, None);
        }

        let clamp = |v: f64| v.max(range.min).min(range.max);
        let next_min = self.price_min.map_or(range.min, clamp);
        let next_max = self
            .price_max
            .map_or(range.max, |v| range.min.max(clamp(v)));

        self.price_min = Some(next_min.min(next_max));
        self.price_max = Some(next_min.max(next_max));
        before != (self.price_min, self.price_max)
    }

    /// Reset selections the catalog no longer offers, then normalize price.
    ///
    /// A value offered under another case takes the offered spelling.
    /// Clearing one dimension can widen the options of the ones after it,
    /// so this repeats until nothing changes. Returns the options for the
    /// settled state.
    pub fn reconcile(&mut self, catalog: &[Product]) -> FilterOptions {
        loop {
            let options = FilterOptions::derive(catalog, self);
            let mut changed = false;

            for (selection, offered) in [
                (&mut self.brand, &options.brands),
                (&mut self.color, &options.colors),
                (&mut self.size, &options.sizes),
                (&mut self.gender, &options.genders),
            ] {
                // Later option lists were derived from the old spelling.
                if selection.respell(offered) {
                    changed = true;
                    break;
                }
                if !selection.is_offered(offered) {
                    tracing::debug!(selection = %selection, "filter value no longer offered, resetting");
                    *selection = Selection::All;
                    changed = true;
                }
            }

            if changed {
                continue;
            }

            // Price does not feed back into the option lists.
            self.normalize_price(&options.price_range);
            return options;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(min: f64, max: f64) -> PriceRange {
        PriceRange {
            min,
            max,
            has_values: true,
        }
    }

    #[test]
    fn test_selection_parse() {
        assert_eq!(Selection::parse("all"), Selection::All);
        assert_eq!(Selection::parse(" ALL "), Selection::All);
        assert_eq!(Selection::parse(""), Selection::All);
        assert_eq!(Selection::parse(" Nike "), Selection::Value("Nike".into()));
        assert_eq!(Selection::Value("Red".into()).to_string(), "Red");
    }

    #[test]
    fn test_respell_adopts_offered_case() {
        let offered = vec!["Blue".to_string(), "Red".to_string()];
        let mut sel = Selection::parse("red");
        assert!(sel.respell(&offered));
        assert_eq!(sel, Selection::Value("Red".into()));
        assert!(!sel.respell(&offered));

        let mut missing = Selection::parse("green");
        assert!(!missing.respell(&offered));
        assert!(!missing.is_offered(&offered));
    }

    #[test]
    fn test_reconcile_keeps_value_typed_in_lowercase() {
        let mut red = Product::new("1");
        red.brand = Some("Nike".into());
        red.color = Some("Red".into());
        let mut blue = Product::new("2");
        blue.brand = Some("Adidas".into());
        blue.color = Some("Blue".into());

        let mut f = FilterState::new().with_brand("nike").with_color("red");
        let options = f.reconcile(&[red, blue]);
        assert_eq!(f.brand, Selection::Value("Nike".into()));
        assert_eq!(f.color, Selection::Value("Red".into()));
        assert_eq!(options.colors, vec!["Red"]);
    }

    #[test]
    fn test_unset_bounds_take_range() {
        let mut f = FilterState::new();
        assert!(f.normalize_price(&range(50.0, 200.0)));
        assert_eq!((f.price_min, f.price_max), (Some(50.0), Some(200.0)));
    }

    #[test]
    fn test_bounds_clamp_into_shrunk_range() {
        let mut f = FilterState::new().with_price(Some(10.0), Some(500.0));
        f.normalize_price(&range(50.0, 200.0));
        assert_eq!((f.price_min, f.price_max), (Some(50.0), Some(200.0)));
    }

    #[test]
    fn test_crossed_bounds_are_swapped() {
        let mut f = FilterState::new().with_price(Some(180.0), Some(60.0));
        f.normalize_price(&range(50.0, 200.0));
        assert_eq!((f.price_min, f.price_max), (Some(60.0), Some(180.0)));
    }

    #[test]
    fn test_no_price_data_clears_bounds() {
        let mut f = FilterState::new().with_price(Some(10.0), Some(20.0));
        let empty = PriceRange::default();
        assert!(f.normalize_price(&empty));
        assert_eq!((f.price_min, f.price_max), (None, None));
        assert!(!f.normalize_price(&empty));
    }

    #[test]
    fn test_normalize_is_stable() {
        let mut f = FilterState::new().with_price(Some(70.0), Some(90.0));
        assert!(!f.normalize_price(&range(50.0, 200.0)));
    }

    #[test]
    fn test_reset() {
        let f = FilterState::reset(&range(20.0, 80.0));
        assert!(f.brand.is_all() && f.color.is_all() && f.size.is_all() && f.gender.is_all());
        assert_eq!(f.price_bounds(&PriceRange::default()), (20.0, 80.0));
        assert_eq!(FilterState::reset(&PriceRange::default()).price_min, None);
    }
}
