//! Catalog view engine: multi-predicate filtering plus a stable sort.

use crate::catalog::sort::{self, SortOrder};
use crate::domain::{Pesos, Product, ProductStatus};
use serde::{Deserialize, Serialize};

/// Sentinel price meaning "no upper bound" on the range filter. The
/// slider's nominal maximum is open-ended, not a hard ceiling.
pub const PRICE_OPEN_ENDED: Pesos = Pesos(300_000);

/// Who is looking at the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Audience {
    /// Customer-facing view: sold-out products are never shown,
    /// regardless of any other filter.
    Public,
    /// Staff view: everything is visible.
    BackOffice,
}

/// Filter and sort specification for one catalog view.
///
/// All predicates combine with logical AND; `None` on the exact-match
/// filters is the "All" sentinel meaning no constraint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogQuery {
    pub audience: Audience,
    pub search: String,
    pub price_min: Pesos,
    /// [`PRICE_OPEN_ENDED`] disables the upper bound.
    pub price_max: Pesos,
    pub status: Option<ProductStatus>,
    pub category: Option<String>,
    pub collection: Option<String>,
    pub sort: SortOrder,
}

impl CatalogQuery {
    pub fn public() -> Self {
        CatalogQuery {
            audience: Audience::Public,
            search: String::new(),
            price_min: Pesos::ZERO,
            price_max: PRICE_OPEN_ENDED,
            status: None,
            category: None,
            collection: None,
            sort: SortOrder::Newest,
        }
    }

    pub fn back_office() -> Self {
        CatalogQuery {
            audience: Audience::BackOffice,
            ..CatalogQuery::public()
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_price_range(mut self, min: Pesos, max: Pesos) -> Self {
        self.price_min = min;
        self.price_max = max;
        self
    }

    pub fn with_status(mut self, status: ProductStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }
}

/// Apply the query to a product collection, returning the filtered,
/// sorted view. Pure: the input collection is never mutated.
pub fn view(products: &[Product], query: &CatalogQuery) -> Vec<Product> {
    let needle = query.search.trim().to_lowercase();
    let mut out: Vec<Product> = products
        .iter()
        .filter(|p| matches(p, query, &needle))
        .cloned()
        .collect();
    sort::apply(&mut out, query.sort);
    out
}

fn matches(product: &Product, query: &CatalogQuery, needle: &str) -> bool {
    if query.audience == Audience::Public && product.status == ProductStatus::SoldOut {
        return false;
    }

    if !needle.is_empty()
        && !product.name.to_lowercase().contains(needle)
        && !product.description.to_lowercase().contains(needle)
    {
        return false;
    }

    if product.price < query.price_min {
        return false;
    }
    if query.price_max != PRICE_OPEN_ENDED && product.price > query.price_max {
        return false;
    }

    if let Some(status) = query.status {
        if product.status != status {
            return false;
        }
    }
    if let Some(category) = &query.category {
        if &product.category != category {
            return false;
        }
    }
    if let Some(collection) = &query.collection {
        if &product.collection != collection {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Product> {
        vec![
            Product::new("Anillo Sol", Pesos::new(80_000), "anillos", "verano")
                .with_description("Oro 18k con citrino"),
            Product::new("Collar Luna", Pesos::new(120_000), "collares", "clasica")
                .with_status(ProductStatus::SoldOut),
            Product::new("Brazalete Mar", Pesos::new(450_000), "brazaletes", "verano")
                .with_status(ProductStatus::MadeToOrder),
        ]
    }

    #[test]
    fn test_public_view_never_shows_sold_out() {
        let products = sample();
        let shown = view(&products, &CatalogQuery::public());
        assert!(shown.iter().all(|p| p.status != ProductStatus::SoldOut));

        // even when the filter would otherwise match it exactly
        let query = CatalogQuery::public()
            .with_search("luna")
            .with_status(ProductStatus::SoldOut);
        assert!(view(&products, &query).is_empty());
    }

    #[test]
    fn test_back_office_sees_sold_out() {
        let products = sample();
        let shown = view(&products, &CatalogQuery::back_office());
        assert_eq!(shown.len(), 3);
    }

    #[test]
    fn test_search_is_case_insensitive_over_name_and_description() {
        let products = sample();
        let by_name = view(&products, &CatalogQuery::public().with_search("ANILLO"));
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Anillo Sol");

        let by_description = view(&products, &CatalogQuery::public().with_search("citrino"));
        assert_eq!(by_description.len(), 1);

        let empty_query = view(&products, &CatalogQuery::public().with_search("   "));
        assert_eq!(empty_query.len(), 2);
    }

    #[test]
    fn test_price_range_with_open_ended_max() {
        let products = sample();
        // 450_000 is far above the slider's nominal maximum
        let query = CatalogQuery::public().with_price_range(Pesos::new(100_000), PRICE_OPEN_ENDED);
        let shown = view(&products, &query);
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].name, "Brazalete Mar");

        let query = CatalogQuery::public().with_price_range(Pesos::ZERO, Pesos::new(100_000));
        let shown = view(&products, &query);
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].name, "Anillo Sol");
    }

    #[test]
    fn test_predicates_combine_with_and() {
        let products = sample();
        let query = CatalogQuery::back_office()
            .with_collection("verano")
            .with_status(ProductStatus::MadeToOrder);
        let shown = view(&products, &query);
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].name, "Brazalete Mar");
    }

    #[test]
    fn test_view_does_not_mutate_input() {
        let products = sample();
        let before = products.clone();
        let _ = view(
            &products,
            &CatalogQuery::public().with_sort(SortOrder::PriceDesc),
        );
        assert_eq!(products, before);
    }
}
