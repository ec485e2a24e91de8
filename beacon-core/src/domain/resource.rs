//! Identified resources

use serde::{Deserialize, Serialize};

/// Stable external identifier of a node API resource
///
/// The identifier is opaque: it is never parsed or interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Jaid {
    id: String,
}

impl Jaid {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }
}

impl From<&str> for Jaid {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for Jaid {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for Jaid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_id() {
        let jaid = Jaid::new("1");
        assert_eq!(jaid.id(), "1");
    }

    #[test]
    fn test_set_id() {
        let mut jaid = Jaid::default();
        jaid.set_id("1");
        assert_eq!(jaid.id(), "1");
    }

    #[test]
    fn test_id_is_opaque() {
        let jaid = Jaid::from(" 0x01/abc ");
        assert_eq!(jaid.to_string(), " 0x01/abc ");
    }
}
