use crate::models::feed::MAX_PAGE_SIZE;
use crate::models::PaginationInfo;

/// Clamp a requested window to `page >= 1` and `1 <= page_size <= max_page_size`.
pub fn clamp_page_request(page: usize, page_size: usize, max_page_size: usize) -> (usize, usize) {
    let ceiling = max_page_size.clamp(1, MAX_PAGE_SIZE);
    (page.max(1), page_size.clamp(1, ceiling))
}

/// Cut one page out of a fully ranked list. Pages past the end are empty.
pub fn paginate<T>(items: Vec<T>, page: usize, page_size: usize) -> (Vec<T>, PaginationInfo) {
    let pagination = PaginationInfo::new(page, page_size, items.len());
    let window = items
        .into_iter()
        .skip(pagination.offset())
        .take(page_size)
        .collect();
    (window, pagination)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp_page_request(0, 0, 100), (1, 1));
        assert_eq!(clamp_page_request(3, 500, 100), (3, 100));
        assert_eq!(clamp_page_request(1, 80, 50), (1, 50));
        assert_eq!(clamp_page_request(1, 80, 1_000), (1, 80));
    }

    #[test]
    fn test_middle_and_last_page() {
        let items: Vec<u32> = (0..45).collect();

        let (page_two, info) = paginate(items.clone(), 2, 20);
        assert_eq!(page_two, (20..40).collect::<Vec<_>>());
        assert!(info.has_next && info.has_previous);

        let (last, info) = paginate(items, 3, 20);
        assert_eq!(last, (40..45).collect::<Vec<_>>());
        assert_eq!(info.total_pages, 3);
        assert!(!info.has_next);
    }

    #[test]
    fn test_out_of_range_page_is_empty() {
        let (window, info) = paginate(vec![1, 2, 3], 9, 2);
        assert!(window.is_empty());
        assert_eq!(info.total_items, 3);
        assert_eq!(info.total_pages, 2);
        assert!(!info.has_next);
        assert!(info.has_previous);
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let (window, _) = paginate(vec![1, 2, 3], usize::MAX, 100);
        assert!(window.is_empty());
    }
}
