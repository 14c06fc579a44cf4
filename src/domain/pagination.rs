pub const DEFAULT_LIMIT: i64 = 20;
pub const MAX_LIMIT: i64 = 100;
pub const DEFAULT_OFFSET: i64 = 0;

/// A validated page window: `limit` is in `1..=MAX_LIMIT`, `offset` is non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    limit: i64,
    offset: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
        }
    }
}

impl Pagination {
    pub fn new(limit: i64, offset: i64) -> anyhow::Result<Self> {
        if limit < 1 {
            return Err(anyhow::anyhow!("limit must be positive, got {limit}"));
        }
        if offset < 0 {
            return Err(anyhow::anyhow!("offset must not be negative, got {offset}"));
        }

        Ok(Self {
            limit: limit.min(MAX_LIMIT),
            offset,
        })
    }

    /// Parses raw query-string values, falling back to the defaults for missing ones.
    pub fn parse(limit: Option<&str>, offset: Option<&str>) -> anyhow::Result<Self> {
        let limit = match limit.map(str::trim) {
            Some(raw) => raw
                .parse::<i64>()
                .map_err(|e| anyhow::anyhow!("limit {raw:?} is not an integer: {e}"))?,
            None => DEFAULT_LIMIT,
        };
        let offset = match offset.map(str::trim) {
            Some(raw) => raw
                .parse::<i64>()
                .map_err(|e| anyhow::anyhow!("offset {raw:?} is not an integer: {e}"))?,
            None => DEFAULT_OFFSET,
        };

        Self::new(limit, offset)
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_use_defaults() {
        let page = Pagination::parse(None, None).unwrap();
        assert_eq!(page.limit(), 20);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn parses_numeric_strings() {
        let page = Pagination::parse(Some("10"), Some(" 20 ")).unwrap();
        assert_eq!(page, Pagination::new(10, 20).unwrap());
    }

    #[test]
    fn clamps_large_limits() {
        let page = Pagination::parse(Some("5000"), None).unwrap();
        assert_eq!(page.limit(), MAX_LIMIT);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Pagination::parse(Some("ten"), None).is_err());
        assert!(Pagination::parse(Some("0"), None).is_err());
        assert!(Pagination::parse(Some("-3"), None).is_err());
        assert!(Pagination::parse(None, Some("-1")).is_err());
        assert!(Pagination::parse(None, Some("1.5")).is_err());
    }
}
