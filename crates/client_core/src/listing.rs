//! Client-side search, filter and slicing for management screens that load
//! a whole list at once.

use serde::Serialize;
use shared::{
    envelope::total_pages,
    protocol::{
        Appointment, Customer, Inventory, ServiceCenter, ServiceItem, SparePart, Staff, Technician,
        Vehicle, VehicleModel,
    },
};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// A record that a list screen can search and filter.
pub trait Searchable {
    /// Text fields matched by the search box.
    fn search_fields(&self) -> Vec<&str>;

    /// Value compared against the dropdown filter, if the screen has one.
    fn category(&self) -> Option<&str> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub search: String,
    pub category: Option<String>,
    /// One-based, like the pagination controls.
    pub page: usize,
    pub page_size: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSlice<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

pub fn record_matches<T: Searchable>(record: &T, query: &ListQuery) -> bool {
    let needle = query.search.trim().to_lowercase();
    let search_ok = needle.is_empty()
        || record
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle));

    let category_ok = match query.category.as_deref().map(str::trim) {
        None | Some("") => true,
        Some(wanted) => record
            .category()
            .map(|category| category.eq_ignore_ascii_case(wanted))
            .unwrap_or(false),
    };

    search_ok && category_ok
}

/// Filters then slices. A page past the end clamps to the last page; an empty
/// result reports zero pages and page 1.
pub fn apply<T: Searchable + Clone>(records: &[T], query: &ListQuery) -> PageSlice<T> {
    let filtered: Vec<&T> = records
        .iter()
        .filter(|record| record_matches(*record, query))
        .collect();

    let page_size = query.page_size.max(1);
    let total_items = filtered.len();
    let total_pages = total_pages(total_items as u64, page_size as u32) as usize;
    let page = query.page.clamp(1, total_pages.max(1));

    let items = filtered
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .cloned()
        .collect();

    PageSlice {
        items,
        page,
        page_size,
        total_items,
        total_pages,
    }
}

/// Stable sort used by screens with sortable columns.
pub fn sort_by_key<T, K: Ord>(records: &mut [T], descending: bool, key: impl Fn(&T) -> K) {
    records.sort_by(|a, b| {
        let ordering = key(a).cmp(&key(b));
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
}

fn opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}

impl Searchable for Appointment {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            opt(&self.customer_name),
            opt(&self.license_plate),
            opt(&self.center_name),
            opt(&self.technician_name),
        ]
    }

    fn category(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}

impl Searchable for Vehicle {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.license_plate.as_str(), opt(&self.vin), opt(&self.model_name)]
    }
}

impl Searchable for VehicleModel {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.model_name.as_str(), opt(&self.brand)]
    }

    fn category(&self) -> Option<&str> {
        self.brand.as_deref()
    }
}

impl Searchable for SparePart {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), opt(&self.part_number), opt(&self.manufacturer)]
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

impl Searchable for Inventory {
    fn search_fields(&self) -> Vec<&str> {
        vec![opt(&self.spare_part_name), opt(&self.center_name)]
    }

    fn category(&self) -> Option<&str> {
        Some(if self.is_low_stock() { "low" } else { "ok" })
    }
}

impl Searchable for ServiceItem {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), opt(&self.description)]
    }
}

impl Searchable for ServiceCenter {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), opt(&self.address), opt(&self.phone), opt(&self.email)]
    }
}

impl Searchable for Customer {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.full_name.as_str(), opt(&self.email), opt(&self.phone)]
    }
}

impl Searchable for Staff {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.full_name.as_str(), opt(&self.email), opt(&self.phone)]
    }

    fn category(&self) -> Option<&str> {
        Some(self.role.as_str())
    }
}

impl Searchable for Technician {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.full_name.as_str(), opt(&self.specialization), opt(&self.phone)]
    }
}
