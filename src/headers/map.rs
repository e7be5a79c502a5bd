use super::{HeaderError, HeaderName, HeaderValue};

/// HTTP header multimap preserving insertion order.
///
/// Lookups are ASCII case-insensitive; iteration yields headers in the
/// order they were inserted.
#[derive(Clone, Default)]
pub struct HeaderMap {
    entries: Vec<(HeaderName, HeaderValue)>,
}

impl HeaderMap {
    /// Create new empty [`HeaderMap`].
    ///
    /// This function does not allocate.
    #[inline]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Create new empty [`HeaderMap`] with at least the specified capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: Vec::with_capacity(capacity) }
    }

    /// Returns headers length.
    #[inline]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if headers has no element.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if the map contains a header value for the given
    /// header name.
    ///
    /// Matching is ASCII case-insensitive.
    #[inline]
    pub fn contains_key(&self, name: impl AsRef<str>) -> bool {
        self.get(name).is_some()
    }

    /// Returns a reference to the first header value corresponding to the
    /// given header name.
    ///
    /// Matching is ASCII case-insensitive.
    pub fn get(&self, name: impl AsRef<str>) -> Option<&HeaderValue> {
        let name = name.as_ref();
        self.entries
            .iter()
            .find(|(key, _)| key.as_str().eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }

    /// Returns the header at the given insertion index.
    #[inline]
    pub fn get_index(&self, index: usize) -> Option<(&HeaderName, &HeaderValue)> {
        self.entries.get(index).map(|(name, value)| (name, value))
    }

    /// Inserts a name-value pair into the map.
    ///
    /// If the name is already present, the first value is replaced in
    /// place, keeping its insertion position, and the old value is
    /// returned.
    pub fn insert(&mut self, name: HeaderName, value: HeaderValue) -> Option<HeaderValue> {
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    /// Appends a name-value pair to the map.
    ///
    /// Unlike [`insert`][HeaderMap::insert], a header that is already
    /// present gets an extra value.
    #[inline]
    pub fn append(&mut self, name: HeaderName, value: HeaderValue) {
        self.entries.push((name, value));
    }

    /// Returns an iterator over headers as name and value pairs, in
    /// insertion order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&HeaderName, &HeaderValue)> {
        self.entries.iter().map(|(name, value)| (name, value))
    }

    /// Clear the header map, removing all values.
    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Parse a raw header block, appending each `Name: Value` line.
    ///
    /// Lines are separated by CRLF; empty lines are skipped. Values are
    /// trimmed of surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error on a line without a `:` separator or with an
    /// invalid name or value.
    pub fn parse(&mut self, raw: &str) -> Result<(), HeaderError> {
        for line in raw.split("\r\n") {
            if line.is_empty() {
                continue;
            }
            let (name, value) = line.split_once(':').ok_or(HeaderError::InvalidLine)?;
            let name = HeaderName::from_slice(name.as_bytes())?;
            let value = HeaderValue::from_slice(value.trim_ascii())?;
            self.append(name, value);
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a HeaderMap {
    type Item = (&'a HeaderName, &'a HeaderValue);
    type IntoIter = Iter<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        Iter { inner: self.entries.iter() }
    }
}

/// Iterator over [`HeaderMap`] entries in insertion order.
#[derive(Debug)]
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, (HeaderName, HeaderValue)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a HeaderName, &'a HeaderValue);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(name, value)| (name, value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl std::fmt::Debug for HeaderMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod test {
    use super::super::standard::{CONTENT_LENGTH, HOST};
    use super::*;

    #[test]
    fn insertion_order() {
        let mut map = HeaderMap::new();
        map.insert(HOST, HeaderValue::from_static(b"example.com"));
        map.append(
            HeaderName::from_slice(b"Accept").unwrap(),
            HeaderValue::from_static(b"*/*"),
        );
        map.insert(CONTENT_LENGTH, HeaderValue::from_static(b"0"));

        let names: Vec<_> = map.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, ["host", "accept", "content-length"]);
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut map = HeaderMap::new();
        map.insert(HOST, HeaderValue::from_static(b"a"));
        map.insert(CONTENT_LENGTH, HeaderValue::from_static(b"0"));

        let old = map.insert(HOST, HeaderValue::from_static(b"b"));
        assert_eq!(old.unwrap().as_str(), "a");
        assert_eq!(map.len(), 2);
        assert_eq!(map.get_index(0).unwrap().1.as_str(), "b");
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let mut map = HeaderMap::new();
        map.insert(
            HeaderName::from_slice(b"Content-Type").unwrap(),
            HeaderValue::from_static(b"text/html"),
        );
        assert!(map.contains_key("content-type"));
        assert!(map.contains_key("Content-Type"));
        assert_eq!(map.get("CONTENT-TYPE").unwrap().as_str(), "text/html");
    }

    #[test]
    fn parse_block() {
        let mut map = HeaderMap::new();
        map.parse("Content-Length: 5\r\nConnection: close\r\n").unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("content-length").unwrap().as_str(), "5");
        assert_eq!(map.get("connection").unwrap().as_str(), "close");

        assert_eq!(map.parse("no separator"), Err(HeaderError::InvalidLine));
    }
}
