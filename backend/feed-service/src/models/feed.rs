use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::Post;

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const MAX_PAGE_SIZE: usize = 100;

/// Query string of `GET /api/v1/feeds/{user_id}`
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FeedQuery {
    /// Page number, starting at 1
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: usize,
    /// Items per page
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100))]
    pub page_size: usize,
}

fn default_page() -> usize {
    DEFAULT_PAGE
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for FeedQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Like and comment totals for a single post
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngagementCount {
    pub likes: u64,
    pub comments: u64,
}

/// A scored candidate post
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FeedItem {
    pub post: Post,
    pub score: f64,
    #[serde(rename = "likes_count")]
    pub like_count: u64,
    #[serde(rename = "comments_count")]
    pub comment_count: u64,
    #[serde(rename = "tag_matches")]
    pub tag_match_count: usize,
    pub time_decay: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationInfo {
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

impl PaginationInfo {
    /// Derive page metadata from the requested window and the total item count.
    ///
    /// `page` and `page_size` are expected to be at least 1.
    pub fn new(page: usize, page_size: usize, total_items: usize) -> Self {
        let total_pages = total_items.div_ceil(page_size.max(1));
        Self {
            page,
            page_size,
            total_items,
            total_pages,
            has_next: page < total_pages,
            has_previous: page > 1,
        }
    }

    /// Start index of this page in the full ranked list
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }
}

/// Engine output: one page of ranked items plus pagination metadata
#[derive(Debug, Clone)]
pub struct FeedPage {
    pub items: Vec<FeedItem>,
    pub pagination: PaginationInfo,
}

impl FeedPage {
    pub fn empty(page: usize, page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            pagination: PaginationInfo::new(page, page_size, 0),
        }
    }
}

/// Body of a successful feed response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FeedResponse {
    pub data: Vec<FeedItem>,
    pub pagination: PaginationInfo,
    pub success: bool,
    pub message: String,
}

impl From<FeedPage> for FeedResponse {
    fn from(page: FeedPage) -> Self {
        Self {
            data: page.items,
            pagination: page.pagination,
            success: true,
            message: "Personalized feed retrieved successfully".to_string(),
        }
    }
}
