//! Paging primitives for list/history read models.
//!
//! # Responsibility
//! - Translate the boundary's 1-based page requests into 0-based windows.
//! - Carry page content together with totals for the response envelope.
//!
//! # Invariants
//! - `page_number` and `page_size` are both at least 1.

use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejected page request parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidPageRequest {
    pub page_number: u32,
    pub page_size: u32,
}

impl Display for InvalidPageRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "page number and page size must both be at least 1, got page_number={} page_size={}",
            self.page_number, self.page_size
        )
    }
}

impl Error for InvalidPageRequest {}

/// A bounded window over an ordered scan, requested by 1-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page_number: u32,
    page_size: u32,
}

impl PageRequest {
    /// Builds a validated page request from 1-based boundary parameters.
    pub fn new(page_number: u32, page_size: u32) -> Result<Self, InvalidPageRequest> {
        if page_number < 1 || page_size < 1 {
            return Err(InvalidPageRequest {
                page_number,
                page_size,
            });
        }
        Ok(Self {
            page_number,
            page_size,
        })
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// 0-based row offset of this window.
    pub fn offset(&self) -> u32 {
        (self.page_number - 1) * self.page_size
    }
}

/// One page of records plus the totals the boundary layer exposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_number: u32,
    pub page_size: u32,
    pub total_items: u64,
}

impl<T> Page<T> {
    /// Assembles a page from window content and the unpaged record count.
    pub fn new(items: Vec<T>, request: &PageRequest, total_items: u64) -> Self {
        Self {
            items,
            page_number: request.page_number(),
            page_size: request.page_size(),
            total_items,
        }
    }

    /// Total number of pages at this page size.
    pub fn total_pages(&self) -> u64 {
        self.total_items.div_ceil(u64::from(self.page_size))
    }

    /// Projects page content while preserving paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_items: self.total_items,
        }
    }
}
