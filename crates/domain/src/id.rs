//! ID generation utilities.

use uuid::Uuid;

/// Generates a new environment identifier.
///
/// UUID v7 embeds a millisecond timestamp plus random bits, so ids are
/// unique for the lifetime of a store and sort by creation time.
#[must_use]
pub fn generate_id() -> String {
    Uuid::now_v7().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_format() {
        let id = generate_id();
        // 8-4-4-4-12 = 36 chars
        assert_eq!(id.len(), 36);
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn test_generate_id_uniqueness() {
        let id1 = generate_id();
        let id2 = generate_id();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_generate_id_sorts_by_creation() {
        let first = generate_id();
        let second = generate_id();
        assert!(first < second);
    }
}
