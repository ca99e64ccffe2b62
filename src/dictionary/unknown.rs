//! Case-insensitive, insertion-ordered storage for headers absent from
//! the registry (§3 "Dictionary instance", the `unknown` field).
//!
//! Grounded on the teacher's historical `header/internals/vec_map.rs`:
//! a small linear `Vec`-backed map, chosen deliberately over a
//! `HashMap` because the unknown set is typically empty or tiny and a
//! linear scan over a handful of entries beats hashing.

#[derive(Debug, Default, Clone)]
pub(crate) struct UnknownMap {
    entries: Vec<(String, Vec<String>)>,
}

impl UnknownMap {
    pub(crate) fn get(&self, name: &str) -> Option<&[String]> {
        self.find(name).map(|(_, values)| values.as_slice())
    }

    pub(crate) fn set(&mut self, name: &str, value: String) {
        if let Some(idx) = self.position(name) {
            self.entries[idx].1 = vec![value];
        } else {
            self.entries.push((name.to_string(), vec![value]));
        }
    }

    pub(crate) fn append(&mut self, name: &str, value: String) {
        if let Some(idx) = self.position(name) {
            self.entries[idx].1.push(value);
        } else {
            self.entries.push((name.to_string(), vec![value]));
        }
    }

    /// Returns `true` if the value was inserted, `false` if `name`
    /// already held a value (used by `add`, which must not overwrite).
    pub(crate) fn add(&mut self, name: &str, value: String) -> bool {
        if self.position(name).is_some() {
            false
        } else {
            self.entries.push((name.to_string(), vec![value]));
            true
        }
    }

    pub(crate) fn remove(&mut self, name: &str) -> bool {
        if let Some(idx) = self.position(name) {
            self.entries.remove(idx);
            true
        } else {
            false
        }
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(key, _)| key.eq_ignore_ascii_case(name))
    }

    fn find(&self, name: &str) -> Option<&(String, Vec<String>)> {
        self.entries.iter().find(|(key, _)| key.eq_ignore_ascii_case(name))
    }
}
