use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

pub(crate) mod auth;
pub(crate) mod posts;
pub(crate) mod roles;
pub(crate) mod users;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct PageQuery {
    #[validate(range(min = 1))]
    pub(crate) page: Option<u32>,
    #[validate(range(min = 1, max = 100))]
    pub(crate) page_size: Option<u32>,
}

impl PageQuery {
    pub(crate) fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    pub(crate) fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(20)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PaginationDto {
    pub(crate) page: u32,
    pub(crate) page_size: u32,
    pub(crate) total_count: i64,
    pub(crate) total_pages: i64,
}

impl PaginationDto {
    pub(crate) fn new(page: u32, page_size: u32, total_count: i64) -> Self {
        let page_size_i64 = page_size.max(1) as i64;
        Self {
            page,
            page_size,
            total_count,
            total_pages: (total_count + page_size_i64 - 1) / page_size_i64,
        }
    }
}
