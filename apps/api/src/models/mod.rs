pub mod company;
pub mod engagement;
pub mod prospect;
pub mod template;

use serde::Deserialize;

pub const MAX_PAGE_SIZE: i64 = 100;

/// Common skip/limit query parameters for list endpoints.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ListParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl ListParams {
    pub fn offset(&self) -> i64 {
        self.skip.unwrap_or(0).max(0)
    }

    /// Effective page size: defaults to and is capped at `MAX_PAGE_SIZE`.
    pub fn page_size(&self) -> i64 {
        self.limit.unwrap_or(MAX_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_max_page_size() {
        let params = ListParams::default();
        assert_eq!(params.offset(), 0);
        assert_eq!(params.page_size(), 100);
    }

    #[test]
    fn test_limit_capped_at_max() {
        let params = ListParams {
            skip: Some(10),
            limit: Some(5000),
        };
        assert_eq!(params.offset(), 10);
        assert_eq!(params.page_size(), 100);
    }

    #[test]
    fn test_negative_values_clamped() {
        let params = ListParams {
            skip: Some(-5),
            limit: Some(-1),
        };
        assert_eq!(params.offset(), 0);
        assert_eq!(params.page_size(), 1);
    }
}
