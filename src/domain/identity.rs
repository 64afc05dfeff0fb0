/// Canonical form of an external competitor id: upper-cased, whitespace removed.
/// Every comparison against roster keys goes through this.
pub fn normalize_competitor_id(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_competitor_id() {
        assert_eq!(normalize_competitor_id("#2pq 8v\tlc"), "#2PQ8VLC");
        assert_eq!(normalize_competitor_id("ABC"), "ABC");
        assert_eq!(normalize_competitor_id("   "), "");
    }
}
