//! Pagination request and response types
//!
//! Query parameters follow the Spring `Pageable` convention: a zero-based
//! `page`, a `size`, and any number of `sort=property[,asc|desc]` pairs.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::{book::Book, library::Library};
use crate::{config::PaginationConfig, error::AppError};

/// Raw pagination query string
#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Zero-based page index (default: 0)
    pub page: Option<i64>,
    /// Page size (default: 20)
    pub size: Option<i64>,
    /// Sort order, `property[,asc|desc]`; repeatable. Properties: `id`, `nombre`
    #[serde(default)]
    pub sort: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    fn as_sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// Sortable columns, shared by both tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortProperty {
    Id,
    Nombre,
}

impl SortProperty {
    fn column(self) -> &'static str {
        match self {
            SortProperty::Id => "id",
            SortProperty::Nombre => "nombre",
        }
    }
}

impl std::str::FromStr for SortProperty {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(SortProperty::Id),
            "nombre" => Ok(SortProperty::Nombre),
            other => Err(AppError::BadRequest(format!("Unknown sort property '{}'", other))),
        }
    }
}

/// Normalized page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
    pub sort: Vec<(SortProperty, Direction)>,
}

impl PageRequest {
    /// Clamp `page`/`size` into range and parse the sort list.
    ///
    /// Negative pages become 0, sizes below 1 take the default and sizes
    /// above the maximum are capped.
    pub fn from_params(params: &PageParams, limits: &PaginationConfig) -> Result<Self, AppError> {
        let page = params.page.unwrap_or(0).max(0);
        let size = match params.size {
            Some(size) if size >= 1 => size.min(limits.max_size),
            _ => limits.default_size,
        };

        let mut sort = Vec::new();
        for entry in &params.sort {
            let mut parts = entry.split(',').map(str::trim).filter(|p| !p.is_empty());
            let Some(property) = parts.next() else {
                continue;
            };
            let property: SortProperty = property.parse()?;
            let direction = match parts.next().map(|d| d.to_ascii_lowercase()) {
                None => Direction::Asc,
                Some(d) if d == "asc" => Direction::Asc,
                Some(d) if d == "desc" => Direction::Desc,
                Some(d) => {
                    return Err(AppError::BadRequest(format!("Unknown sort direction '{}'", d)));
                }
            };
            if parts.next().is_some() {
                return Err(AppError::BadRequest(format!("Malformed sort '{}'", entry)));
            }
            sort.push((property, direction));
        }

        Ok(Self { page, size, sort })
    }

    pub fn offset(&self) -> i64 {
        self.page.saturating_mul(self.size)
    }

    /// `ORDER BY` clause built from whitelisted columns only.
    ///
    /// Always ends with `id ASC` unless `id` was already requested, so page
    /// boundaries are stable.
    pub fn order_by(&self) -> String {
        let mut terms: Vec<String> = self
            .sort
            .iter()
            .map(|(property, direction)| format!("{} {}", property.column(), direction.as_sql()))
            .collect();
        if !self.sort.iter().any(|(p, _)| *p == SortProperty::Id) {
            terms.push("id ASC".to_string());
        }
        format!("ORDER BY {}", terms.join(", "))
    }
}

/// One page of results
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[aliases(LibraryPage = Page<Library>, BookPage = Page<Book>)]
pub struct Page<T>
where
    T: for<'a> ToSchema<'a>,
{
    pub content: Vec<T>,
    pub total_elements: i64,
    pub total_pages: i64,
    /// Zero-based index of this page
    pub number: i64,
    pub size: i64,
    pub number_of_elements: i64,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl<T> Page<T>
where
    T: for<'a> ToSchema<'a>,
{
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: i64) -> Self {
        let total_pages = if total_elements == 0 {
            0
        } else {
            (total_elements + request.size - 1) / request.size
        };
        let number_of_elements = content.len() as i64;
        Self {
            first: request.page == 0,
            last: request.page.saturating_add(1) >= total_pages,
            empty: content.is_empty(),
            content,
            total_elements,
            total_pages,
            number: request.page,
            size: request.size,
            number_of_elements,
        }
    }
}
