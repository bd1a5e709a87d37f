//! Aggregate figures over a list of blogs.

use std::collections::HashMap;

use serde::Serialize;

use crate::blog::Blog;

/// Author with the largest number of blogs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorBlogs {
    pub author: Option<String>,
    pub blogs: u64,
}

/// Author whose blogs have collected the most likes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorLikes {
    pub author: Option<String>,
    pub likes: u64,
}

/// Saturates at `u64::MAX` rather than overflowing.
pub fn total_likes(blogs: &[Blog]) -> u64 {
    blogs.iter().fold(0, |sum, b| sum.saturating_add(b.likes))
}

/// The most liked blog. On a tie the later blog wins.
pub fn favourite_blog(blogs: &[Blog]) -> Option<&Blog> {
    blogs
        .iter()
        .reduce(|best, current| if best.likes > current.likes { best } else { current })
}

/// On a tie the author who reached the count first wins.
pub fn most_blogs(blogs: &[Blog]) -> Option<AuthorBlogs> {
    leader_by(blogs, |_| 1).map(|(author, blogs)| AuthorBlogs { author, blogs })
}

/// On a tie the author who reached the total first wins.
pub fn most_likes(blogs: &[Blog]) -> Option<AuthorLikes> {
    leader_by(blogs, |b| b.likes).map(|(author, likes)| AuthorLikes { author, likes })
}

/// Running per-author totals; the leader only changes on a strictly higher total.
fn leader_by(blogs: &[Blog], weight: impl Fn(&Blog) -> u64) -> Option<(Option<String>, u64)> {
    let mut totals: HashMap<Option<&str>, u64> = HashMap::new();
    let mut leader: Option<(Option<&str>, u64)> = None;

    for blog in blogs {
        let author = blog.author.as_deref();
        let total = totals.entry(author).or_insert(0);
        *total = total.saturating_add(weight(blog));

        if leader.is_none_or(|(_, best)| *total > best) {
            leader = Some((author, *total));
        }
    }

    leader.map(|(author, total)| (author.map(str::to_string), total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::BlogId;
    use proptest::prelude::*;

    fn blog(title: &str, author: &str, likes: u64) -> Blog {
        Blog {
            id: BlogId::new(),
            title: title.to_string(),
            author: Some(author.to_string()),
            url: format!("https://example.com/{}", title.replace(' ', "-")),
            likes,
            user: None,
        }
    }

    fn reference_blogs() -> Vec<Blog> {
        vec![
            blog("React patterns", "Michael Chan", 7),
            blog("Go To Statement Considered Harmful", "Edsger W. Dijkstra", 5),
            blog("Canonical string reduction", "Edsger W. Dijkstra", 12),
            blog("First class tests", "Robert C. Martin", 10),
            blog("TDD harms architecture", "Robert C. Martin", 0),
            blog("Type wars", "Robert C. Martin", 2),
        ]
    }

    #[test]
    fn empty_list() {
        assert_eq!(total_likes(&[]), 0);
        assert!(favourite_blog(&[]).is_none());
        assert!(most_blogs(&[]).is_none());
        assert!(most_likes(&[]).is_none());
    }

    #[test]
    fn single_blog_totals_its_own_likes() {
        let blogs = vec![blog("Go To Statement Considered Harmful", "Edsger W. Dijkstra", 5)];
        assert_eq!(total_likes(&blogs), 5);
    }

    #[test]
    fn reference_list() {
        let blogs = reference_blogs();

        assert_eq!(total_likes(&blogs), 36);
        assert_eq!(favourite_blog(&blogs).unwrap().title, "Canonical string reduction");
        assert_eq!(
            most_blogs(&blogs),
            Some(AuthorBlogs {
                author: Some("Robert C. Martin".to_string()),
                blogs: 3
            })
        );
        assert_eq!(
            most_likes(&blogs),
            Some(AuthorLikes {
                author: Some("Edsger W. Dijkstra".to_string()),
                likes: 17
            })
        );
    }

    #[test]
    fn favourite_tie_goes_to_later_blog() {
        let blogs = vec![blog("first", "a", 3), blog("second", "b", 3)];
        assert_eq!(favourite_blog(&blogs).unwrap().title, "second");
    }

    #[test]
    fn most_blogs_tie_goes_to_first_author() {
        let blogs = vec![blog("1", "a", 0), blog("2", "b", 0), blog("3", "b", 0), blog("4", "a", 0)];
        assert_eq!(most_blogs(&blogs).unwrap().author.as_deref(), Some("b"));
    }

    #[test]
    fn huge_like_counts_saturate() {
        let huge = i64::MAX as u64;
        let blogs = vec![blog("a", "x", huge), blog("b", "x", huge), blog("c", "x", huge)];

        assert_eq!(total_likes(&blogs), u64::MAX);
        assert_eq!(most_likes(&blogs).unwrap().likes, u64::MAX);
        assert_eq!(most_blogs(&blogs).unwrap().blogs, 3);
    }

    proptest! {
        #[test]
        fn favourite_has_maximum_likes(likes in proptest::collection::vec(0u64..1000, 1..20)) {
            let blogs: Vec<Blog> = likes.iter().enumerate().map(|(i, l)| blog(&i.to_string(), "x", *l)).collect();
            let max = likes.iter().copied().max().unwrap();
            prop_assert_eq!(favourite_blog(&blogs).unwrap().likes, max);
        }

        #[test]
        fn single_author_owns_every_total(likes in proptest::collection::vec(0u64..1000, 1..20)) {
            let blogs: Vec<Blog> = likes.iter().enumerate().map(|(i, l)| blog(&i.to_string(), "solo", *l)).collect();
            prop_assert_eq!(most_blogs(&blogs).unwrap().blogs, blogs.len() as u64);
            prop_assert_eq!(most_likes(&blogs).unwrap().likes, total_likes(&blogs));
        }
    }
}
