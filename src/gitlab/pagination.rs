// Pagination options and response metadata.
// GitLab pages through `page`/`per_page` and reports position in X-* headers.

use serde::Serialize;

use super::transport::HttpResponse;

/// Page selection shared by every list endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ListOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

impl ListOptions {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
        }
    }

    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            per_page: None,
        }
    }
}

/// Position of a list response within the full result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageInfo {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub total: Option<u64>,
    pub total_pages: Option<u32>,
    pub next_page: Option<u32>,
    pub prev_page: Option<u32>,
}

impl PageInfo {
    /// Read the X-Page family of headers. Missing or blank headers stay `None`.
    pub fn from_response(response: &HttpResponse) -> Self {
        fn parse<T: std::str::FromStr>(response: &HttpResponse, name: &str) -> Option<T> {
            response
                .header(name)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .and_then(|v| v.parse().ok())
        }

        Self {
            page: parse(response, "x-page"),
            per_page: parse(response, "x-per-page"),
            total: parse(response, "x-total"),
            total_pages: parse(response, "x-total-pages"),
            next_page: parse(response, "x-next-page"),
            prev_page: parse(response, "x-prev-page"),
        }
    }
}

/// One page of a list endpoint, items in response order.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub info: PageInfo,
}

impl<T> Page<T> {
    /// Page number to request next, if the server reported one.
    pub fn next_page(&self) -> Option<u32> {
        self.info.next_page
    }

    pub fn is_last(&self) -> bool {
        self.info.next_page.is_none()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(headers: &[(&str, &str)]) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: b"[]".to_vec(),
        }
    }

    #[test]
    fn test_page_info_from_headers() {
        let info = PageInfo::from_response(&response(&[
            ("X-Page", "2"),
            ("X-Per-Page", "20"),
            ("X-Total", "45"),
            ("X-Total-Pages", "3"),
            ("X-Next-Page", "3"),
            ("X-Prev-Page", "1"),
        ]));

        assert_eq!(info.page, Some(2));
        assert_eq!(info.per_page, Some(20));
        assert_eq!(info.total, Some(45));
        assert_eq!(info.total_pages, Some(3));
        assert_eq!(info.next_page, Some(3));
        assert_eq!(info.prev_page, Some(1));
    }

    #[test]
    fn test_last_page_has_blank_next() {
        let info = PageInfo::from_response(&response(&[("X-Page", "3"), ("X-Next-Page", "")]));
        let page = Page {
            items: vec![1, 2],
            info,
        };
        assert_eq!(page.next_page(), None);
        assert!(page.is_last());
        assert_eq!(page.into_iter().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_list_options_omit_unset_fields() {
        let json = serde_json::to_value(ListOptions::page(4)).unwrap();
        assert_eq!(json, serde_json::json!({"page": 4}));

        let json = serde_json::to_value(ListOptions::default()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }
}
