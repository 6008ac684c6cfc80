//! Shared primitives for the concierge workspace crates.
//!
//! ```rust
//! use ccommon::{MetadataMap, Registry, SessionId};
//!
//! let session = SessionId::from("session-1");
//! let mut metadata = MetadataMap::new();
//! metadata.insert("channel".to_string(), "cli".to_string());
//!
//! let mut registry = Registry::new();
//! registry.insert("webSearch".to_string(), 1_u8);
//!
//! assert_eq!(session.as_str(), "session-1");
//! assert!(registry.contains_key("webSearch"));
//! ```

pub mod future {
    //! Shared async future aliases.
    //!
    //! ```rust
    //! use ccommon::BoxFuture;
    //!
    //! fn shout<'a>(value: &'a str) -> BoxFuture<'a, String> {
    //!     Box::pin(async move { value.to_uppercase() })
    //! }
    //!
    //! let _future = shout("hello");
    //! ```

    use std::future::Future;
    use std::pin::Pin;

    pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
}

pub mod context {
    //! Session identifier newtype and cross-crate metadata map.
    //!
    //! ```rust
    //! use ccommon::SessionId;
    //!
    //! let session = SessionId::new("session-42");
    //! assert_eq!(session.to_string(), "session-42");
    //! ```

    use std::collections::HashMap;
    use std::fmt::{Display, Formatter};

    pub type MetadataMap = HashMap<String, String>;

    /// Stable identifier for one conversation thread.
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct SessionId(String);

    impl SessionId {
        pub fn new(value: impl Into<String>) -> Self {
            Self(value.into())
        }

        pub fn as_str(&self) -> &str {
            self.0.as_str()
        }

        pub fn into_string(self) -> String {
            self.0
        }
    }

    impl Display for SessionId {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.0)
        }
    }

    impl From<String> for SessionId {
        fn from(value: String) -> Self {
            Self(value)
        }
    }

    impl From<&str> for SessionId {
        fn from(value: &str) -> Self {
            Self(value.to_string())
        }
    }
}

pub mod registry {
    //! Generic keyed registry wrapper used by runtime lookup tables.
    //!
    //! ```rust
    //! use ccommon::Registry;
    //!
    //! let mut registry = Registry::new();
    //! registry.insert("getWeather".to_string(), 7_u32);
    //!
    //! assert_eq!(registry.get("getWeather"), Some(&7));
    //! assert_eq!(registry.len(), 1);
    //! ```

    use std::borrow::Borrow;
    use std::collections::HashMap;
    use std::hash::Hash;

    #[derive(Debug, Clone)]
    pub struct Registry<K, V> {
        entries: HashMap<K, V>,
    }

    impl<K, V> Default for Registry<K, V>
    where
        K: Eq + Hash,
    {
        fn default() -> Self {
            Self {
                entries: HashMap::new(),
            }
        }
    }

    impl<K, V> Registry<K, V>
    where
        K: Eq + Hash,
    {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn insert(&mut self, key: K, value: V) -> Option<V> {
            self.entries.insert(key, value)
        }

        pub fn get<Q>(&self, key: &Q) -> Option<&V>
        where
            K: Borrow<Q>,
            Q: Eq + Hash + ?Sized,
        {
            self.entries.get(key)
        }

        pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
        where
            K: Borrow<Q>,
            Q: Eq + Hash + ?Sized,
        {
            self.entries.remove(key)
        }

        pub fn contains_key<Q>(&self, key: &Q) -> bool
        where
            K: Borrow<Q>,
            Q: Eq + Hash + ?Sized,
        {
            self.entries.contains_key(key)
        }

        pub fn values(&self) -> impl Iterator<Item = &V> {
            self.entries.values()
        }

        pub fn len(&self) -> usize {
            self.entries.len()
        }

        pub fn is_empty(&self) -> bool {
            self.entries.is_empty()
        }
    }
}

pub use context::{MetadataMap, SessionId};
pub use future::BoxFuture;
pub use registry::Registry;

#[cfg(test)]
mod tests {
    use super::{Registry, SessionId};

    #[test]
    fn session_id_round_trips_strings() {
        let session = SessionId::new("session-1");
        assert_eq!(session.as_str(), "session-1");
        assert_eq!(session.to_string(), "session-1");
        assert_eq!(SessionId::from("session-1"), session);
        assert_eq!(session.into_string(), "session-1");
    }

    #[test]
    fn registry_basic_lifecycle() {
        let mut registry = Registry::new();
        assert!(registry.is_empty());

        registry.insert("searchFlights".to_string(), 3_u32);
        assert_eq!(registry.get("searchFlights"), Some(&3));
        assert!(registry.contains_key("searchFlights"));
        assert_eq!(registry.values().count(), 1);

        let removed = registry.remove("searchFlights");
        assert_eq!(removed, Some(3));
        assert!(registry.is_empty());
    }
}
