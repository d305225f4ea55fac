// src/common/pagination.rs

const DEFAULT_LIMIT: i64 = 20;
const MAX_LIMIT: i64 = 100;

/// Normaliza `?page=` e `?limit=` em (limit, offset) prontos para o SQL.
/// Página começa em 1; limit é travado em 1..=100.
pub fn clamp(page: Option<i64>, limit: Option<i64>) -> (i64, i64) {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let page = page.unwrap_or(1).max(1);
    (limit, (page - 1) * limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_absent() {
        assert_eq!(clamp(None, None), (20, 0));
    }

    #[test]
    fn offset_follows_page() {
        assert_eq!(clamp(Some(3), Some(10)), (10, 20));
    }

    #[test]
    fn rejects_nonsense_values() {
        assert_eq!(clamp(Some(0), Some(0)), (1, 0));
        assert_eq!(clamp(Some(-2), Some(9999)), (100, 0));
    }
}
