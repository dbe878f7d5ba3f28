use serde::Serialize;

/// Zero-based page coordinates for a listing query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub number: u32,
    pub size: u32,
}

impl PageRequest {
    pub fn new(number: u32, size: u32) -> Self {
        Self { number, size }
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }

    /// Rows to skip, or `None` when the offset does not fit a signed 64-bit integer.
    pub fn offset(&self) -> Option<i64> {
        i64::from(self.number).checked_mul(i64::from(self.size))
    }
}

/// One slice of an ordered result set plus the totals of the whole set.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub number: u32,
    pub size: u32,
    pub total_elements: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: i64) -> Self {
        let size = i64::from(request.size.max(1));
        Self {
            content,
            number: request.number,
            size: request.size,
            total_elements,
            total_pages: (total_elements + size - 1) / size,
        }
    }
}
