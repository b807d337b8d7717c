pub const SUCCESSFUL: &str = "Successful";
pub const UNSUCCESSFUL: &str = "Unsuccessful";
pub const SOFT_REPETITION: &str = "soft.repetition";
pub const HARD_REPETITION: &str = "hard.repetition";
pub const LONG_USER_INTERACTION: &str = "long_user_interaction";
pub const LONG_DURATION: &str = "long_duration";

/// Ordered tag list without duplicates.
///
/// Once the verdict tag is appended with [`TagSet::seal`] the set is frozen,
/// so the verdict is always the last element and appears exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: Vec<String>,
    sealed: bool,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `tag` unless it is already present. Returns whether it was added.
    pub fn insert(&mut self, tag: &str) -> bool {
        if self.sealed || self.contains(tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Append the verdict tag and freeze the set.
    pub fn seal(&mut self, successful: bool) {
        if self.sealed {
            return;
        }
        let verdict = if successful { SUCCESSFUL } else { UNSUCCESSFUL };
        self.tags.push(verdict.to_string());
        self.sealed = true;
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_order_and_skips_duplicates() {
        let mut tags = TagSet::new();
        assert!(tags.insert("frustration"));
        assert!(tags.insert(LONG_DURATION));
        assert!(!tags.insert("frustration"));
        assert_eq!(tags.iter().collect::<Vec<_>>(), vec!["frustration", LONG_DURATION]);
    }

    #[test]
    fn test_seal_appends_verdict_once_and_last() {
        let mut tags = TagSet::new();
        tags.insert(LONG_DURATION);
        tags.seal(false);
        tags.seal(true);
        assert!(!tags.insert("late"));

        let tags = tags.into_vec();
        assert_eq!(tags, vec![LONG_DURATION.to_string(), UNSUCCESSFUL.to_string()]);
    }
}
