use crate::utils::error::Result;

/// Server-side warnings collected over a chain of calls, in call order.
/// Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Warnings(Vec<String>);

impl Warnings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, warning: impl Into<String>) {
        self.0.push(warning.into());
    }

    pub fn extend(&mut self, other: Warnings) {
        self.0.extend(other.0);
    }

    /// Appends the warnings of `reported` and hands back its result.
    pub fn absorb<T>(&mut self, reported: Reported<T>) -> Result<T> {
        self.extend(reported.warnings);
        reported.result
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for Warnings {
    fn from(warnings: Vec<String>) -> Self {
        Self(warnings)
    }
}

impl<'a> IntoIterator for &'a Warnings {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A result together with the warnings gathered while producing it. Warnings
/// survive a failure so they can be shown before the error.
#[derive(Debug)]
pub struct Reported<T> {
    pub result: Result<T>,
    pub warnings: Warnings,
}

impl<T> Reported<T> {
    pub fn new(result: Result<T>, warnings: Warnings) -> Self {
        Self { result, warnings }
    }

    pub fn ok(value: T, warnings: Warnings) -> Self {
        Self::new(Ok(value), warnings)
    }

    pub fn into_parts(self) -> (Result<T>, Warnings) {
        (self.result, self.warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::PolicyError;

    #[test]
    fn test_absorb_keeps_order_and_duplicates() {
        let mut warnings = Warnings::from(vec!["first".to_string()]);

        let value = warnings
            .absorb(Reported::ok(7, Warnings::from(vec!["dup".to_string(), "dup".to_string()])))
            .unwrap();
        assert_eq!(value, 7);

        let failed: Result<()> = warnings.absorb(Reported::new(
            Err(PolicyError::PolicyNotExist),
            Warnings::from(vec!["last".to_string()]),
        ));
        assert!(failed.is_err());

        assert_eq!(warnings.into_vec(), vec!["first", "dup", "dup", "last"]);
    }
}
