use anyhow::Context;
use async_trait::async_trait;
use uuid::Uuid;

use crate::db::PgStore;
use crate::posts::repo_types::{NewPost, Post, PostChanges};

#[async_trait]
pub trait PostStore: Send + Sync {
    async fn insert(&self, post: NewPost) -> anyhow::Result<Post>;
    /// Newest first.
    async fn list(&self) -> anyhow::Result<Vec<Post>>;
    /// Newest first.
    async fn list_by_author(&self, author_id: Uuid) -> anyhow::Result<Vec<Post>>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Post>>;
    async fn update(&self, id: Uuid, changes: &PostChanges) -> anyhow::Result<Post>;
    async fn delete(&self, id: Uuid) -> anyhow::Result<()>;
}

const SELECT_POST: &str = r#"
    SELECT p.id, p.title, p.content, p.excerpt, p.category, p.author_id,
           u.name AS author_name, u.profile_picture AS author_profile_picture,
           p.created_at, p.updated_at
      FROM posts p
      JOIN users u ON u.id = p.author_id
"#;

#[async_trait]
impl PostStore for PgStore {
    async fn insert(&self, post: NewPost) -> anyhow::Result<Post> {
        let row = sqlx::query_as::<_, Post>(
            r#"
            WITH p AS (
                INSERT INTO posts (id, title, content, excerpt, category, author_id)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
            )
            SELECT p.id, p.title, p.content, p.excerpt, p.category, p.author_id,
                   u.name AS author_name, u.profile_picture AS author_profile_picture,
                   p.created_at, p.updated_at
              FROM p
              JOIN users u ON u.id = p.author_id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.excerpt)
        .bind(&post.category)
        .bind(post.author_id)
        .fetch_one(&self.db)
        .await
        .context("insert post")?;
        Ok(row)
    }

    async fn list(&self) -> anyhow::Result<Vec<Post>> {
        let rows = sqlx::query_as::<_, Post>(&format!("{SELECT_POST} ORDER BY p.created_at DESC"))
            .fetch_all(&self.db)
            .await
            .context("list posts")?;
        Ok(rows)
    }

    async fn list_by_author(&self, author_id: Uuid) -> anyhow::Result<Vec<Post>> {
        let rows = sqlx::query_as::<_, Post>(&format!(
            "{SELECT_POST} WHERE p.author_id = $1 ORDER BY p.created_at DESC"
        ))
        .bind(author_id)
        .fetch_all(&self.db)
        .await
        .context("list posts by author")?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Post>> {
        let row = sqlx::query_as::<_, Post>(&format!("{SELECT_POST} WHERE p.id = $1"))
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .context("find post")?;
        Ok(row)
    }

    async fn update(&self, id: Uuid, changes: &PostChanges) -> anyhow::Result<Post> {
        let row = sqlx::query_as::<_, Post>(
            r#"
            WITH p AS (
                UPDATE posts
                   SET title = COALESCE($2, title),
                       content = COALESCE($3, content),
                       excerpt = COALESCE($4, excerpt),
                       category = COALESCE($5, category),
                       updated_at = now()
                 WHERE id = $1
                RETURNING *
            )
            SELECT p.id, p.title, p.content, p.excerpt, p.category, p.author_id,
                   u.name AS author_name, u.profile_picture AS author_profile_picture,
                   p.created_at, p.updated_at
              FROM p
              JOIN users u ON u.id = p.author_id
            "#,
        )
        .bind(id)
        .bind(changes.title.as_deref())
        .bind(changes.content.as_deref())
        .bind(changes.excerpt.as_deref())
        .bind(changes.category.as_deref())
        .fetch_one(&self.db)
        .await
        .context("update post")?;
        Ok(row)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .context("delete post")?;
        Ok(())
    }
}
