//! Optional narrowing predicates for the list endpoints.
//!
//! Every scope appends ` AND <predicate>` to a query whose base already ends in
//! `WHERE 1=1`, so scopes compose conjunctively in any order. Bounds that are
//! missing or do not parse leave the corresponding scope out; they are never
//! reported as errors.

use crate::domain::requests::{category::FindAllCategories, product::FindAllProducts};
use sqlx::{Postgres, QueryBuilder};

pub trait Scope: Send + Sync {
    fn apply(&self, builder: &mut QueryBuilder<'_, Postgres>);
}

/// Case-insensitive substring match on a name column.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchByName {
    column: &'static str,
    term: String,
}

impl SearchByName {
    pub fn new(column: &'static str, term: impl Into<String>) -> Self {
        Self {
            column,
            term: term.into(),
        }
    }

    /// Empty terms match everything and produce no scope.
    pub fn parse(column: &'static str, term: Option<&str>) -> Option<Self> {
        term.filter(|t| !t.is_empty()).map(|t| Self::new(column, t))
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    /// `%`, `_` and `\` in the term match literally.
    pub fn pattern(&self) -> String {
        let mut escaped = String::with_capacity(self.term.len() + 2);
        escaped.push('%');
        for ch in self.term.chars() {
            if matches!(ch, '%' | '_' | '\\') {
                escaped.push('\\');
            }
            escaped.push(ch);
        }
        escaped.push('%');
        escaped
    }

    pub fn matches(&self, name: &str) -> bool {
        name.to_lowercase().contains(&self.term.to_lowercase())
    }
}

impl Scope for SearchByName {
    fn apply(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        builder
            .push(" AND ")
            .push(self.column)
            .push(" ILIKE ")
            .push_bind(self.pattern())
            .push(" ESCAPE '\\'");
    }
}

/// Products priced within `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterByPrice {
    pub min: f64,
    pub max: f64,
}

impl FilterByPrice {
    pub fn parse(min: Option<&str>, max: Option<&str>) -> Option<Self> {
        let min = parse_finite(min?)?;
        let max = parse_finite(max?)?;
        Some(Self { min, max })
    }

    pub fn matches(&self, price: f64) -> bool {
        self.min <= price && price <= self.max
    }
}

fn parse_finite(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

impl Scope for FilterByPrice {
    fn apply(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        builder
            .push(" AND p.price BETWEEN ")
            .push_bind(self.min)
            .push(" AND ")
            .push_bind(self.max);
    }
}

/// Categories owning between `min` and `max` products, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterByProductCount {
    pub min: i64,
    pub max: i64,
}

impl FilterByProductCount {
    pub fn parse(min: Option<&str>, max: Option<&str>) -> Option<Self> {
        let min = min?.trim().parse::<i64>().ok()?;
        let max = max?.trim().parse::<i64>().ok()?;
        Some(Self { min, max })
    }

    pub fn matches(&self, count: i64) -> bool {
        self.min <= count && count <= self.max
    }
}

impl Scope for FilterByProductCount {
    fn apply(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        builder
            .push(" AND (SELECT COUNT(*) FROM products cp WHERE cp.category_id = c.id) BETWEEN ")
            .push_bind(self.min)
            .push(" AND ")
            .push_bind(self.max);
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilters {
    pub search: Option<SearchByName>,
    pub price: Option<FilterByPrice>,
}

impl ProductFilters {
    pub fn from_params(params: &FindAllProducts) -> Self {
        Self {
            search: SearchByName::parse("p.name", params.search.as_deref()),
            price: FilterByPrice::parse(params.min_price.as_deref(), params.max_price.as_deref()),
        }
    }

    pub fn scopes(&self) -> Vec<&dyn Scope> {
        let mut scopes: Vec<&dyn Scope> = Vec::new();
        if let Some(search) = &self.search {
            scopes.push(search);
        }
        if let Some(price) = &self.price {
            scopes.push(price);
        }
        scopes
    }

    pub fn apply(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        for scope in self.scopes() {
            scope.apply(builder);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryFilters {
    pub search: Option<SearchByName>,
    pub product_count: Option<FilterByProductCount>,
}

impl CategoryFilters {
    pub fn from_params(params: &FindAllCategories) -> Self {
        Self {
            search: SearchByName::parse("c.name", params.search.as_deref()),
            product_count: FilterByProductCount::parse(
                params.min_products.as_deref(),
                params.max_products.as_deref(),
            ),
        }
    }

    pub fn scopes(&self) -> Vec<&dyn Scope> {
        let mut scopes: Vec<&dyn Scope> = Vec::new();
        if let Some(search) = &self.search {
            scopes.push(search);
        }
        if let Some(count) = &self.product_count {
            scopes.push(count);
        }
        scopes
    }

    pub fn apply(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        for scope in self.scopes() {
            scope.apply(builder);
        }
    }
}
