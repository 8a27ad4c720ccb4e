pub mod auth;
pub mod detection;
pub mod device;
pub mod job;

use serde::{Deserialize, Serialize};

pub use auth::{LoginRequest, RegisterRequest};
pub use detection::{AudioFile, AudioUploadForm};
pub use device::{Device, DeviceRegisterRequest, DeviceStatus};
pub use job::{
    CreateUploadJobRequest, CreateUploadJobResponse, ListJobsQuery, UploadCompletionNotification, UploadJob,
    UploadJobStatus,
};

/// One page of a listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub data: Vec<T>,
}

impl<T> PaginatedResponse<T> {
    /// Slice `items` to the requested 1-based page
    pub fn paginate(items: Vec<T>, page: usize, page_size: usize) -> Self {
        let page = page.max(1);
        let page_size = page_size.max(1);
        let total = items.len();
        let total_pages = total.div_ceil(page_size);

        // A page far past the end (or one whose offset overflows) is just empty
        let data = match (page - 1).checked_mul(page_size) {
            Some(offset) => items.into_iter().skip(offset).take(page_size).collect(),
            None => Vec::new(),
        };

        Self {
            total,
            page,
            page_size,
            total_pages,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paginate_slices_requested_page() {
        let page = PaginatedResponse::paginate((1..=5).collect::<Vec<_>>(), 2, 2);
        assert_eq!(page.total, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.data, vec![3, 4]);
    }

    #[test]
    fn paginate_past_the_end_is_empty() {
        let page = PaginatedResponse::paginate(vec![1, 2], 4, 20);
        assert_eq!(page.total, 2);
        assert_eq!(page.total_pages, 1);
        assert!(page.data.is_empty());
    }

    #[test]
    fn paginate_huge_page_does_not_overflow() {
        let page = PaginatedResponse::paginate(vec![1, 2, 3], usize::MAX, 100);
        assert_eq!(page.total, 3);
        assert_eq!(page.page, usize::MAX);
        assert!(page.data.is_empty());
    }

    #[test]
    fn paginate_empty_has_no_pages() {
        let page = PaginatedResponse::<u8>::paginate(Vec::new(), 1, 20);
        assert_eq!(page.total_pages, 0);
    }
}
