//! Bucket/table name mangling.
//!
//! A physical table name is the configured prefix concatenated with the
//! logical resource (bucket) name. Both directions are pure string
//! utilities with no side effects.

/// Convert a bucket name to its physical table name.
#[must_use]
pub fn bucket_to_tablename(prefix: &str, bucket: &str) -> String {
    format!("{prefix}{bucket}")
}

/// Convert a physical table name back to its bucket name.
///
/// Strips the prefix once if present. A table name that does not start
/// with the prefix has no mapping and yields `None`; that is an absence,
/// not an error.
#[must_use]
pub fn tablename_to_bucket(prefix: &str, tablename: &str) -> Option<String> {
    tablename.strip_prefix(prefix).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_to_tablename() {
        assert_eq!(bucket_to_tablename("prefix_", "articles"), "prefix_articles");
        assert_eq!(bucket_to_tablename("", "articles"), "articles");
    }

    #[test]
    fn test_tablename_to_bucket() {
        assert_eq!(
            tablename_to_bucket("prefix_", "prefix_articles"),
            Some("articles".to_string())
        );
        assert_eq!(tablename_to_bucket("prefix_", "other_articles"), None);
    }

    #[test]
    fn test_prefix_idempotence() {
        for prefix in ["", "p_", "prefix_"] {
            for bucket in ["articles", "comments", "a"] {
                let tablename = bucket_to_tablename(prefix, bucket);
                assert_eq!(
                    tablename_to_bucket(prefix, &tablename),
                    Some(bucket.to_string())
                );
            }
        }
    }

    #[test]
    fn test_prefix_stripped_once_only() {
        assert_eq!(
            tablename_to_bucket("p_", "p_p_articles"),
            Some("p_articles".to_string())
        );
    }

    #[test]
    fn test_empty_prefix_always_maps() {
        assert_eq!(
            tablename_to_bucket("", "anything"),
            Some("anything".to_string())
        );
    }
}
