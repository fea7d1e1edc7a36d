// src/pagination.rs

//! Process-wide pagination defaults.
//!
//! Installed once at startup and read by anything that renders a paged
//! listing. Page link computation itself lives with the consumers.

use std::{str::FromStr, sync::OnceLock};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, ConfigError};

/// Upper bound for a client-requested page size.
pub const MAX_ITEMS_PER_PAGE: u32 = 100;

/// How many page links a pagination control shows in each region.
///
/// Serialized as `[edge_start, before_current, after_current, edge_end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "[u32; 4]", try_from = "[u32; 4]")]
pub struct PageWindow {
    /// Links pinned at the start (page 1, 2, ...).
    pub edge_start: u32,
    pub before_current: u32,
    pub after_current: u32,
    /// Links pinned at the end (last page, ...).
    pub edge_end: u32,
}

impl Default for PageWindow {
    fn default() -> Self {
        Self {
            edge_start: 1,
            before_current: 4,
            after_current: 4,
            edge_end: 1,
        }
    }
}

impl TryFrom<[u32; 4]> for PageWindow {
    type Error = ConfigError;

    fn try_from(parts: [u32; 4]) -> Result<Self, Self::Error> {
        if parts.contains(&0) {
            return Err(ConfigError::NotPositive("page window entry"));
        }
        let [edge_start, before_current, after_current, edge_end] = parts;
        Ok(Self {
            edge_start,
            before_current,
            after_current,
            edge_end,
        })
    }
}

impl From<PageWindow> for [u32; 4] {
    fn from(w: PageWindow) -> Self {
        [w.edge_start, w.before_current, w.after_current, w.edge_end]
    }
}

/// Parses `"1,4,4,1"`. Whitespace around entries is ignored.
impl FromStr for PageWindow {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidPageWindow(s.to_string());

        let parts = s
            .split(',')
            .map(|part| part.trim().parse::<u32>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>, _>>()?;
        let parts: [u32; 4] = parts.try_into().map_err(|_| invalid())?;

        PageWindow::try_from(parts).map_err(|_| invalid())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPaginationDefaults")]
pub struct PaginationDefaults {
    /// Items per page.
    pub items: u32,
    pub size: PageWindow,
}

impl Default for PaginationDefaults {
    fn default() -> Self {
        Self {
            items: 6,
            size: PageWindow::default(),
        }
    }
}

impl PaginationDefaults {
    pub fn new(items: u32, size: PageWindow) -> Result<Self, ConfigError> {
        if items == 0 {
            return Err(ConfigError::NotPositive("items per page"));
        }
        Ok(Self { items, size })
    }
}

/// Unchecked wire form; deserialization goes through [`PaginationDefaults::new`].
#[derive(Deserialize)]
struct RawPaginationDefaults {
    items: u32,
    size: PageWindow,
}

impl TryFrom<RawPaginationDefaults> for PaginationDefaults {
    type Error = ConfigError;

    fn try_from(raw: RawPaginationDefaults) -> Result<Self, Self::Error> {
        PaginationDefaults::new(raw.items, raw.size)
    }
}

static DEFAULTS: OnceLock<PaginationDefaults> = OnceLock::new();

/// Sets the process-wide defaults. Only the first call wins; later calls get
/// their value back as the error.
pub fn install(defaults: PaginationDefaults) -> Result<(), PaginationDefaults> {
    DEFAULTS.set(defaults)
}

/// The installed defaults, or the built-in ones if nothing was installed.
pub fn defaults() -> PaginationDefaults {
    DEFAULTS.get().copied().unwrap_or_default()
}

/// Query parameters for a paged listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    /// 1-based page number (default: 1).
    pub page: Option<u32>,

    /// Items per page (default: installed defaults, max: 100).
    pub items: Option<u32>,
}

/// Page parameters after applying defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPage {
    pub page: u32,
    pub items: u32,
    pub size: PageWindow,
}

impl PageParams {
    pub fn resolve(&self, defaults: &PaginationDefaults) -> Result<ResolvedPage, AppError> {
        let page = match self.page {
            Some(0) => return Err(AppError::BadRequest("page must be at least 1".to_string())),
            Some(page) => page,
            None => 1,
        };
        let items = match self.items {
            Some(0) => return Err(AppError::BadRequest("items must be at least 1".to_string())),
            Some(items) => items.min(MAX_ITEMS_PER_PAGE),
            None => defaults.items,
        };

        Ok(ResolvedPage {
            page,
            items,
            size: defaults.size,
        })
    }
}
