/// One named float parameter.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CustomParam {
    pub key: String,
    pub value: f32,
}

/// Order-preserving key → float store.
///
/// Insertion order is kept for iteration; the wire record uses
/// [`sorted`](Self::sorted) so equal stores always encode identically.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CustomParams {
    entries: Vec<CustomParam>,
}

impl CustomParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites an existing key in place, otherwise appends.
    pub fn set(&mut self, key: impl Into<String>, value: f32) {
        let key = key.into();
        match self.entries.iter_mut().find(|p| p.key == key) {
            Some(param) => param.value = value,
            None => self.entries.push(CustomParam { key, value }),
        }
    }

    pub fn get(&self, key: &str, default: f32) -> f32 {
        self.entries
            .iter()
            .find(|p| p.key == key)
            .map_or(default, |p| p.value)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|p| p.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CustomParam> {
        self.entries.iter()
    }

    /// Entries in ascending byte order of their keys.
    pub fn sorted(&self) -> Vec<&CustomParam> {
        let mut sorted: Vec<_> = self.entries.iter().collect();
        sorted.sort_by(|a, b| a.key.cmp(&b.key));
        sorted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_overwrites_without_reordering() {
        let mut params = CustomParams::new();
        params.set("b", 1.0);
        params.set("a", 2.0);
        params.set("b", 3.0);

        let keys: Vec<_> = params.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(params.get("b", 0.0), 3.0);
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn missing_key_yields_default() {
        let params = CustomParams::new();
        assert_eq!(params.get("Mechanic.Pierce.Count", 7.5), 7.5);
        assert!(!params.contains("Mechanic.Pierce.Count"));
    }

    #[test]
    fn sorted_is_case_sensitive_byte_order() {
        let mut params = CustomParams::new();
        params.set("b", 1.0);
        params.set("B", 1.0);
        params.set("a", 1.0);

        let keys: Vec<_> = params.sorted().into_iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["B", "a", "b"]);
    }
}
