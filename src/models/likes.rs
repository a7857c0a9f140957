use std::rc::Rc;

use log::{debug, warn};

use crate::error::Result;
use crate::model::LikeEntry;
use crate::storage::Storage;

/// Storage key the liked recipes are persisted under.
pub const LIKES_KEY: &str = "likes";

/// Liked recipes, written through to storage on every change.
pub struct Likes {
    likes: Vec<LikeEntry>,
    storage: Rc<dyn Storage>,
}

impl Likes {
    pub fn new(storage: Rc<dyn Storage>) -> Self {
        Likes {
            likes: Vec::new(),
            storage,
        }
    }

    /// Position of `id` in the list, if liked.
    pub fn is_liked(&self, id: &str) -> Option<usize> {
        self.likes.iter().position(|like| like.id == id)
    }

    /// Like a recipe. Liking an already liked recipe returns the existing entry.
    pub fn add_like(
        &mut self,
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        img: impl Into<String>,
    ) -> Result<LikeEntry> {
        let id = id.into();
        if let Some(index) = self.is_liked(&id) {
            debug!("recipe {} is already liked", id);
            return Ok(self.likes[index].clone());
        }

        let like = LikeEntry {
            id,
            title: title.into(),
            author: author.into(),
            img: img.into(),
        };
        let mut likes = self.likes.clone();
        likes.push(like.clone());
        self.persist(&likes)?;
        self.likes = likes;
        Ok(like)
    }

    /// Unlike a recipe. Unknown ids are ignored.
    pub fn delete_like(&mut self, id: &str) -> Result<()> {
        let Some(index) = self.is_liked(id) else {
            return Ok(());
        };
        let mut likes = self.likes.clone();
        likes.remove(index);
        self.persist(&likes)?;
        self.likes = likes;
        Ok(())
    }

    pub fn num_likes(&self) -> usize {
        self.likes.len()
    }

    pub fn likes(&self) -> &[LikeEntry] {
        &self.likes
    }

    /// Restore persisted likes. Missing or corrupt data leaves the list empty.
    pub fn read_storage(&mut self) {
        self.likes = match self.storage.get(LIKES_KEY) {
            Ok(Some(bytes)) => serde_json::from_slice(&bytes).unwrap_or_else(|err| {
                warn!("ignoring corrupt persisted likes: {}", err);
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!("could not read persisted likes: {}", err);
                Vec::new()
            }
        };
        debug!("restored {} likes", self.likes.len());
    }

    fn persist(&self, likes: &[LikeEntry]) -> Result<()> {
        let bytes = serde_json::to_vec(likes)?;
        self.storage.set(LIKES_KEY, &bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn likes_with(storage: &Rc<MemoryStorage>) -> Likes {
        let mut likes = Likes::new(storage.clone());
        likes.read_storage();
        likes
    }

    fn persisted(storage: &MemoryStorage) -> Vec<LikeEntry> {
        serde_json::from_slice(&storage.get(LIKES_KEY).unwrap().unwrap()).unwrap()
    }

    #[test]
    fn test_add_then_delete_like() {
        let storage = Rc::new(MemoryStorage::new());
        let mut likes = likes_with(&storage);

        likes.add_like("1", "Pizza", "Closet Cooking", "img").unwrap();
        assert_eq!(likes.is_liked("1"), Some(0));

        likes.delete_like("1").unwrap();
        assert_eq!(likes.is_liked("1"), None);
        assert_eq!(likes.num_likes(), 0);
    }

    #[test]
    fn test_add_like_is_idempotent() {
        let storage = Rc::new(MemoryStorage::new());
        let mut likes = likes_with(&storage);

        let first = likes.add_like("1", "Pizza", "a", "img").unwrap();
        let second = likes.add_like("1", "Other title", "b", "img2").unwrap();

        assert_eq!(first, second);
        assert_eq!(likes.num_likes(), 1);
        assert_eq!(persisted(&storage).len(), 1);
    }

    #[test]
    fn test_persisted_copy_matches_memory() {
        let storage = Rc::new(MemoryStorage::new());
        let mut likes = likes_with(&storage);

        likes.add_like("1", "Pizza", "a", "img").unwrap();
        likes.add_like("2", "Pasta", "b", "img").unwrap();
        assert_eq!(persisted(&storage), likes.likes());

        likes.delete_like("1").unwrap();
        assert_eq!(persisted(&storage), likes.likes());
    }

    #[test]
    fn test_restart_restores_in_order() {
        let storage = Rc::new(MemoryStorage::new());
        let mut likes = likes_with(&storage);
        for id in ["3", "1", "2"] {
            likes.add_like(id, format!("Recipe {id}"), "a", "img").unwrap();
        }

        let restored = likes_with(&storage);
        assert_eq!(restored.likes(), likes.likes());
        let ids: Vec<&str> = restored.likes().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["3", "1", "2"]);
    }

    #[test]
    fn test_corrupt_storage_reads_as_empty() {
        let storage = Rc::new(MemoryStorage::new());
        storage.set(LIKES_KEY, b"{not json").unwrap();

        let likes = likes_with(&storage);
        assert_eq!(likes.num_likes(), 0);
    }

    /// Accepts reads, refuses every write.
    struct ReadOnlyStorage {
        inner: MemoryStorage,
    }

    impl Storage for ReadOnlyStorage {
        fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
            self.inner.get(key)
        }

        fn set(&self, _key: &str, _value: &[u8]) -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
        }
    }

    #[test]
    fn test_failed_write_leaves_likes_unchanged() {
        let inner = MemoryStorage::new();
        let saved = vec![LikeEntry {
            id: "1".to_string(),
            title: "Pizza".to_string(),
            author: "a".to_string(),
            img: "img".to_string(),
        }];
        inner
            .set(LIKES_KEY, &serde_json::to_vec(&saved).unwrap())
            .unwrap();
        let mut likes = Likes::new(Rc::new(ReadOnlyStorage { inner }));
        likes.read_storage();

        let added = likes.add_like("2", "Pasta", "b", "img");
        assert!(matches!(added, Err(crate::error::BrowserError::Storage(_))));
        assert_eq!(likes.likes(), saved.as_slice());
        assert_eq!(likes.is_liked("2"), None);

        let deleted = likes.delete_like("1");
        assert!(matches!(deleted, Err(crate::error::BrowserError::Storage(_))));
        assert_eq!(likes.likes(), saved.as_slice());
        assert_eq!(likes.is_liked("1"), Some(0));
    }

    #[test]
    fn test_delete_unknown_like_does_not_write() {
        let storage = Rc::new(MemoryStorage::new());
        let mut likes = likes_with(&storage);

        likes.delete_like("missing").unwrap();
        assert!(storage.get(LIKES_KEY).unwrap().is_none());
    }
}
