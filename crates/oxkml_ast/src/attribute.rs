//! Ordered attribute storage for elements.
use std::borrow::Borrow;

use smallvec::SmallVec;

#[derive(Clone, Debug, PartialEq, Eq)]
/// An ordered mapping of attribute names to values.
///
/// Insertion order is kept, and inserting an existing name replaces its value in place.
/// Elements rarely have more than a couple of attributes, so lookups are linear.
pub struct AttributeMap<K> {
    entries: SmallVec<[(K, String); 2]>,
}

impl<K> Default for AttributeMap<K> {
    fn default() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }
}

impl<K> AttributeMap<K> {
    /// Returns the value of the attribute with the given name
    pub fn get<Q>(&self, name: &Q) -> Option<&str>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.entries
            .iter()
            .find(|(key, _)| <K as Borrow<Q>>::borrow(key) == name)
            .map(|(_, value)| value.as_str())
    }

    /// Whether an attribute with the given name is present
    pub fn contains<Q>(&self, name: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.get(name).is_some()
    }

    /// Sets the value of an attribute, returning the value it replaced
    pub fn insert(&mut self, name: K, value: String) -> Option<String>
    where
        K: PartialEq,
    {
        if let Some((_, existing)) = self.entries.iter_mut().find(|(key, _)| *key == name) {
            return Some(std::mem::replace(existing, value));
        }
        self.entries.push((name, value));
        None
    }

    /// Removes an attribute, returning its value
    pub fn remove<Q>(&mut self, name: &Q) -> Option<String>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        let index = self
            .entries
            .iter()
            .position(|(key, _)| <K as Borrow<Q>>::borrow(key) == name)?;
        Some(self.entries.remove(index).1)
    }

    /// Returns the attributes in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&K, &str)> {
        self.entries.iter().map(|(key, value)| (key, value.as_str()))
    }

    /// Returns the number of attributes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no attributes
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::AttributeMap;

    #[test]
    fn keeps_insertion_order() {
        let mut attributes: AttributeMap<Box<str>> = AttributeMap::default();
        attributes.insert("xmlns".into(), "http://www.opengis.net/kml/2.2".into());
        attributes.insert("xmlns:gx".into(), "http://www.google.com/kml/ext/2.2".into());
        assert_eq!(
            attributes.insert("xmlns".into(), "other".into()).as_deref(),
            Some("http://www.opengis.net/kml/2.2")
        );

        let names: Vec<_> = attributes.iter().map(|(name, _)| &**name).collect();
        assert_eq!(names, ["xmlns", "xmlns:gx"]);
        assert_eq!(attributes.get("xmlns"), Some("other"));
        assert_eq!(attributes.remove("xmlns:gx").as_deref(), Some("http://www.google.com/kml/ext/2.2"));
        assert_eq!(attributes.len(), 1);
        assert!(!attributes.contains("xmlns:gx"));
    }
}
