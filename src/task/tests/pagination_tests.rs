//! Pagination contract tests.

use rstest::rstest;

use crate::task::domain::{Page, PageRequest, TaskDomainError};

#[test]
fn zero_page_or_size_is_rejected() {
    assert_eq!(
        PageRequest::new(0, 10),
        Err(TaskDomainError::InvalidPagination)
    );
    assert_eq!(
        PageRequest::new(1, 0),
        Err(TaskDomainError::InvalidPagination)
    );
}

#[rstest]
#[case(1, 10, 0, 0)]
#[case(2, 10, 0, 10)]
#[case(3, 7, 0, 14)]
#[case(2, 10, 5, 15)]
fn skip_is_page_boundary_plus_offset(
    #[case] page: u32,
    #[case] size: u32,
    #[case] offset: u32,
    #[case] expected: u64,
) {
    let request = PageRequest::new(page, size)
        .expect("valid request")
        .with_offset(offset);
    assert_eq!(request.skip(), expected);
}

#[rstest]
#[case(0, 10, 0)]
#[case(1, 10, 1)]
#[case(10, 10, 1)]
#[case(11, 10, 2)]
#[case(25, 10, 3)]
fn total_pages_is_ceiling_of_count_over_size(
    #[case] total_count: u64,
    #[case] size: u32,
    #[case] expected: u64,
) {
    let request = PageRequest::new(1, size).expect("valid request");
    let page: Page<u8> = Page::assemble(Vec::new(), request, total_count);
    assert_eq!(page.total_pages, expected);
}
