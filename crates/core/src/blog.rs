//! Blog entity and the rules applied when blogs are created or edited.

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::{DomainError, DomainResult};
use crate::id::{BlogId, UserId};

pub const TITLE_OR_URL_MISSING: &str = "title or url missing";
pub const NEGATIVE_LIKES: &str = "likes must be a non-negative integer";

/// A stored blog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blog {
    pub id: BlogId,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: u64,
    /// Owning user, set from the authenticated caller at creation.
    pub user: Option<UserId>,
}

impl Entity for Blog {
    type Id = BlogId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Blog {
    /// Whether `user_id` is the recorded owner. Ownerless blogs belong to nobody.
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user == Some(user_id)
    }

    /// Fail with [`DomainError::Unauthorized`] unless `user_id` owns this blog.
    pub fn ensure_owned_by(&self, user_id: UserId) -> DomainResult<()> {
        if self.is_owned_by(user_id) {
            Ok(())
        } else {
            Err(DomainError::Unauthorized)
        }
    }

    /// Replace every editable field. A `None` author clears the stored one.
    pub fn apply(&mut self, changes: BlogChanges) {
        self.title = changes.title;
        self.author = changes.author;
        self.url = changes.url;
        self.likes = changes.likes;
    }
}

/// Validated input for a new blog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBlog {
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: u64,
}

impl NewBlog {
    /// Check required fields and normalize `likes`.
    ///
    /// `title` and `url` must be present and non-empty. Absent, null and zero
    /// likes all become `0`.
    pub fn parse(
        title: Option<String>,
        author: Option<String>,
        url: Option<String>,
        likes: Option<i64>,
    ) -> DomainResult<Self> {
        let (Some(title), Some(url)) = (non_empty(title), non_empty(url)) else {
            return Err(DomainError::validation(TITLE_OR_URL_MISSING));
        };

        Ok(Self {
            title,
            author,
            url,
            likes: normalize_likes(likes)?,
        })
    }

    pub fn into_blog(self, id: BlogId, owner: UserId) -> Blog {
        Blog {
            id,
            title: self.title,
            author: self.author,
            url: self.url,
            likes: self.likes,
            user: Some(owner),
        }
    }
}

/// Full replacement of a blog's editable fields.
///
/// Validated with the same rules as creation: `title` and `url` required,
/// likes normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogChanges {
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: u64,
}

impl BlogChanges {
    pub fn parse(
        title: Option<String>,
        author: Option<String>,
        url: Option<String>,
        likes: Option<i64>,
    ) -> DomainResult<Self> {
        NewBlog::parse(title, author, url, likes).map(Self::from)
    }
}

impl From<NewBlog> for BlogChanges {
    fn from(blog: NewBlog) -> Self {
        Self {
            title: blog.title,
            author: blog.author,
            url: blog.url,
            likes: blog.likes,
        }
    }
}

/// Likes default to zero when absent or falsy; negatives are rejected.
pub fn normalize_likes(likes: Option<i64>) -> DomainResult<u64> {
    match likes {
        None | Some(0) => Ok(0),
        Some(n) if n < 0 => Err(DomainError::validation(NEGATIVE_LIKES)),
        Some(n) => Ok(n as u64),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn parse(title: Option<&str>, url: Option<&str>, likes: Option<i64>) -> DomainResult<NewBlog> {
        NewBlog::parse(
            title.map(str::to_string),
            Some("Edsger W. Dijkstra".to_string()),
            url.map(str::to_string),
            likes,
        )
    }

    #[test]
    fn missing_likes_default_to_zero() {
        let blog = parse(
            Some("Canonical string reduction"),
            Some("http://www.cs.utexas.edu/~EWD/transcriptions/EWD08xx/EWD808.html"),
            None,
        )
        .unwrap();
        assert_eq!(blog.likes, 0);
    }

    #[test]
    fn missing_title_or_url_is_rejected() {
        for (title, url) in [(None, Some("http://a")), (Some("A"), None), (Some(""), Some("http://a")), (Some("A"), Some("  "))] {
            let err = parse(title, url, Some(3)).unwrap_err();
            assert_eq!(err, DomainError::validation(TITLE_OR_URL_MISSING));
        }
    }

    #[test]
    fn negative_likes_are_rejected() {
        let err = parse(Some("A"), Some("http://a"), Some(-1)).unwrap_err();
        assert_eq!(err, DomainError::validation(NEGATIVE_LIKES));
    }

    #[test]
    fn into_blog_records_owner() {
        let owner = UserId::new();
        let blog = parse(Some("A"), Some("http://a"), Some(4))
            .unwrap()
            .into_blog(BlogId::new(), owner);

        assert!(blog.is_owned_by(owner));
        assert!(!blog.is_owned_by(UserId::new()));
    }

    #[test]
    fn ownerless_blog_is_owned_by_nobody() {
        let blog = Blog {
            id: BlogId::new(),
            title: "React patterns".to_string(),
            author: Some("Michael Chan".to_string()),
            url: "https://reactpatterns.com/".to_string(),
            likes: 7,
            user: None,
        };
        assert!(!blog.is_owned_by(UserId::new()));
    }

    #[test]
    fn changes_replace_every_field() {
        let mut blog = parse(Some("Old"), Some("http://old"), Some(5))
            .unwrap()
            .into_blog(BlogId::new(), UserId::new());
        let owner = blog.user;

        let changes = BlogChanges::parse(Some("New".to_string()), None, Some("http://new".to_string()), None).unwrap();
        blog.apply(changes);

        assert_eq!(blog.title, "New");
        assert_eq!(blog.author, None);
        assert_eq!(blog.url, "http://new");
        assert_eq!(blog.likes, 0);
        assert_eq!(blog.user, owner);
    }

    #[test]
    fn changes_require_title_and_url() {
        for (title, url) in [(None, Some("http://a")), (Some("A"), None), (Some("A"), Some(""))] {
            let err = BlogChanges::parse(title.map(str::to_string), None, url.map(str::to_string), Some(1)).unwrap_err();
            assert_eq!(err, DomainError::validation(TITLE_OR_URL_MISSING));
        }
    }

    #[test]
    fn changes_reject_negative_likes() {
        let err = BlogChanges::parse(Some("A".to_string()), None, Some("http://a".to_string()), Some(-3)).unwrap_err();
        assert_eq!(err, DomainError::validation(NEGATIVE_LIKES));
    }

    #[test]
    fn only_the_owner_passes_the_ownership_check() {
        let owner = UserId::new();
        let blog = parse(Some("A"), Some("http://a"), None)
            .unwrap()
            .into_blog(BlogId::new(), owner);

        assert_eq!(blog.ensure_owned_by(owner), Ok(()));
        assert_eq!(blog.ensure_owned_by(UserId::new()), Err(DomainError::Unauthorized));
    }

    proptest! {
        #[test]
        fn non_negative_likes_pass_through(likes in 0i64..i64::MAX) {
            prop_assert_eq!(normalize_likes(Some(likes)).unwrap(), likes as u64);
        }

        #[test]
        fn negative_likes_never_normalize(likes in i64::MIN..0i64) {
            prop_assert!(normalize_likes(Some(likes)).is_err());
        }
    }
}
