//! Response envelopes used by every endpoint

use serde::{Deserialize, Serialize};

/// Single-resource envelope: `{ success, data, message? }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    pub data: T,
    #[serde(default)]
    pub message: Option<String>,
}

/// Bare `{ data }` envelope (map markers)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

/// Paginated list envelope: `{ success, data: [...], meta }`
///
/// `M` defaults to plain [`PaginationMeta`]; proximity search uses
/// [`SearchMeta`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T, M = PaginationMeta> {
    #[serde(default)]
    pub success: bool,
    pub data: Vec<T>,
    pub meta: M,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
}

/// Pagination metadata of `/v1/teachers/nearby`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchMeta {
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
    /// Radius the server actually searched, in kilometres
    pub search_radius_km: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_meta_decodes() {
        let json = r#"{"success":true,"data":[1,2],"meta":{"total":42,"page":2,"per_page":20,"total_pages":3,"search_radius_km":10}}"#;
        let page: PaginatedResponse<u32, SearchMeta> = serde_json::from_str(json).unwrap();
        assert_eq!(page.data, vec![1, 2]);
        assert_eq!(page.meta.total, 42);
        assert_eq!(page.meta.total_pages, 3);
        assert!((page.meta.search_radius_km - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_success_defaults_false() {
        let json = r#"{"data":"x"}"#;
        let resp: ApiResponse<String> = serde_json::from_str(json).unwrap();
        assert!(!resp.success);
        assert_eq!(resp.data, "x");
        assert!(resp.message.is_none());
    }
}
