//! Windowed page numbers for rendering a pager.

const LEFT_EDGE: u32 = 2;
const LEFT_CURRENT: u32 = 2;
const RIGHT_CURRENT: u32 = 4;
const RIGHT_EDGE: u32 = 2;

fn windowed_pages(
    total_pages: u32,
    current_page: u32,
    left_edge: u32,
    left_current: u32,
    right_current: u32,
    right_edge: u32,
) -> Vec<Option<u32>> {
    if total_pages == 0 {
        return vec![];
    }

    // Bounds are computed in u64 so `last_page + 1` cannot overflow.
    let last_page = u64::from(total_pages);
    let current_page = u64::from(current_page);
    let mut pages: Vec<Option<u64>> = Vec::new();

    let left_end = (1 + u64::from(left_edge)).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(u64::from(left_current)));
    let mid_end = (current_page + u64::from(right_current) + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(u64::from(right_edge)) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    // Every entry is at most `total_pages`, so it fits back into u32.
    pages
        .into_iter()
        .map(|page| page.and_then(|p| u32::try_from(p).ok()))
        .collect()
}

/// Page numbers to show around `current_page`; `None` marks a gap.
pub fn page_links(total_pages: u32, current_page: u32) -> Vec<Option<u32>> {
    let current_page = current_page.clamp(1, total_pages.max(1));
    windowed_pages(
        total_pages,
        current_page,
        LEFT_EDGE,
        LEFT_CURRENT,
        RIGHT_CURRENT,
        RIGHT_EDGE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_pages_for_empty_results() {
        assert!(page_links(0, 1).is_empty());
    }

    #[test]
    fn short_lists_have_no_gaps() {
        assert_eq!(page_links(4, 2), vec![Some(1), Some(2), Some(3), Some(4)]);
    }

    #[test]
    fn gaps_surround_the_current_window() {
        assert_eq!(
            page_links(20, 10),
            vec![
                Some(1),
                Some(2),
                None,
                Some(8),
                Some(9),
                Some(10),
                Some(11),
                Some(12),
                Some(13),
                Some(14),
                None,
                Some(19),
                Some(20),
            ]
        );
    }

    #[test]
    fn huge_page_counts_do_not_overflow() {
        let last = u32::MAX;
        assert_eq!(
            page_links(last, 1),
            vec![
                Some(1),
                Some(2),
                Some(3),
                Some(4),
                Some(5),
                None,
                Some(last - 1),
                Some(last),
            ]
        );
        assert_eq!(
            page_links(last, last),
            vec![Some(1), Some(2), None, Some(last - 2), Some(last - 1), Some(last)]
        );
    }

    #[test]
    fn out_of_range_current_page_is_clamped() {
        assert_eq!(page_links(3, 0), page_links(3, 1));
        assert_eq!(page_links(3, 99), page_links(3, 3));
    }
}
