//! In-memory stores backing `AppState::fake()`.

use std::sync::Mutex;

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::repo::{StoreError, UserStore};
use crate::auth::repo_types::{NewUser, ProfileUpdate, User};
use crate::comments::repo::CommentStore;
use crate::comments::repo_types::{Comment, NewComment};
use crate::posts::repo::PostStore;
use crate::posts::repo_types::{NewPost, Post, PostChanges};

#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
    posts: Mutex<Vec<Post>>,
    comments: Mutex<Vec<Comment>>,
}

impl MemoryStore {
    fn author(&self, id: Uuid) -> anyhow::Result<(String, Option<String>)> {
        let users = self.users.lock().unwrap();
        let u = users
            .iter()
            .find(|u| u.id == id)
            .ok_or_else(|| anyhow::anyhow!("unknown author {id}"))?;
        Ok((u.name.clone(), u.profile_picture.clone()))
    }

    fn with_author_post(&self, mut p: Post) -> Post {
        if let Ok((name, pic)) = self.author(p.author_id) {
            p.author_name = name;
            p.author_profile_picture = pic;
        }
        p
    }

    fn with_author_comment(&self, mut c: Comment) -> Comment {
        if let Ok((name, pic)) = self.author(c.author_id) {
            c.author_name = name;
            c.author_profile_picture = pic;
        }
        c
    }
}

fn newest_first<T, F: Fn(&T) -> OffsetDateTime>(mut rows: Vec<T>, created: F) -> Vec<T> {
    rows.reverse();
    rows.sort_by(|a, b| created(b).cmp(&created(a)));
    rows
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::DuplicateEmail);
        }
        let row = User {
            id: Uuid::new_v4(),
            email: user.email,
            password_hash: user.password_hash,
            name: user.name,
            profile_picture: None,
            created_at: OffsetDateTime::now_utc(),
        };
        users.push(row.clone());
        Ok(row)
    }

    async fn update_profile(&self, id: Uuid, update: &ProfileUpdate) -> anyhow::Result<User> {
        let mut users = self.users.lock().unwrap();
        let u = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| anyhow::anyhow!("user {id} not found"))?;
        if let Some(name) = &update.name {
            u.name = name.clone();
        }
        if let Some(pic) = &update.profile_picture {
            u.profile_picture = Some(pic.clone());
        }
        Ok(u.clone())
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn insert(&self, post: NewPost) -> anyhow::Result<Post> {
        let (author_name, author_profile_picture) = self.author(post.author_id)?;
        let now = OffsetDateTime::now_utc();
        let row = Post {
            id: Uuid::new_v4(),
            title: post.title,
            content: post.content,
            excerpt: post.excerpt,
            category: post.category,
            author_id: post.author_id,
            author_name,
            author_profile_picture,
            created_at: now,
            updated_at: now,
        };
        self.posts.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn list(&self) -> anyhow::Result<Vec<Post>> {
        let rows = self.posts.lock().unwrap().clone();
        Ok(newest_first(rows, |p| p.created_at)
            .into_iter()
            .map(|p| self.with_author_post(p))
            .collect())
    }

    async fn list_by_author(&self, author_id: Uuid) -> anyhow::Result<Vec<Post>> {
        let rows: Vec<Post> = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect();
        Ok(newest_first(rows, |p| p.created_at)
            .into_iter()
            .map(|p| self.with_author_post(p))
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Post>> {
        let row = self.posts.lock().unwrap().iter().find(|p| p.id == id).cloned();
        Ok(row.map(|p| self.with_author_post(p)))
    }

    async fn update(&self, id: Uuid, changes: &PostChanges) -> anyhow::Result<Post> {
        let row = {
            let mut posts = self.posts.lock().unwrap();
            let p = posts
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or_else(|| anyhow::anyhow!("post {id} not found"))?;
            if let Some(v) = &changes.title {
                p.title = v.clone();
            }
            if let Some(v) = &changes.content {
                p.content = v.clone();
            }
            if let Some(v) = &changes.excerpt {
                p.excerpt = Some(v.clone());
            }
            if let Some(v) = &changes.category {
                p.category = Some(v.clone());
            }
            p.updated_at = OffsetDateTime::now_utc();
            p.clone()
        };
        Ok(self.with_author_post(row))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<()> {
        self.posts.lock().unwrap().retain(|p| p.id != id);
        self.comments.lock().unwrap().retain(|c| c.post_id != id);
        Ok(())
    }
}

#[async_trait]
impl CommentStore for MemoryStore {
    async fn insert(&self, comment: NewComment) -> anyhow::Result<Comment> {
        let (author_name, author_profile_picture) = self.author(comment.author_id)?;
        let now = OffsetDateTime::now_utc();
        let row = Comment {
            id: Uuid::new_v4(),
            content: comment.content,
            post_id: comment.post_id,
            author_id: comment.author_id,
            author_name,
            author_profile_picture,
            created_at: now,
            updated_at: now,
        };
        self.comments.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn list_by_post(&self, post_id: Uuid) -> anyhow::Result<Vec<Comment>> {
        let rows: Vec<Comment> = self
            .comments
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        Ok(newest_first(rows, |c| c.created_at)
            .into_iter()
            .map(|c| self.with_author_comment(c))
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Comment>> {
        let row = self
            .comments
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned();
        Ok(row.map(|c| self.with_author_comment(c)))
    }

    async fn update_content(&self, id: Uuid, content: &str) -> anyhow::Result<Comment> {
        let row = {
            let mut comments = self.comments.lock().unwrap();
            let c = comments
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or_else(|| anyhow::anyhow!("comment {id} not found"))?;
            c.content = content.to_string();
            c.updated_at = OffsetDateTime::now_utc();
            c.clone()
        };
        Ok(self.with_author_comment(row))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<()> {
        self.comments.lock().unwrap().retain(|c| c.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Duration;

    #[test]
    fn newest_first_orders_by_created_at_then_insertion() {
        let t0 = OffsetDateTime::now_utc();
        let rows = vec![
            ("old", t0 - Duration::minutes(5)),
            ("tie-first", t0),
            ("tie-second", t0),
            ("older", t0 - Duration::minutes(10)),
        ];
        let names: Vec<&str> = newest_first(rows, |r| r.1)
            .into_iter()
            .map(|r| r.0)
            .collect();
        assert_eq!(names, ["tie-second", "tie-first", "old", "older"]);
    }
}
