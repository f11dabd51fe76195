use anyhow::Context;
use async_trait::async_trait;
use uuid::Uuid;

use crate::comments::repo_types::{Comment, NewComment};
use crate::db::PgStore;

#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn insert(&self, comment: NewComment) -> anyhow::Result<Comment>;
    /// Newest first.
    async fn list_by_post(&self, post_id: Uuid) -> anyhow::Result<Vec<Comment>>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Comment>>;
    async fn update_content(&self, id: Uuid, content: &str) -> anyhow::Result<Comment>;
    async fn delete(&self, id: Uuid) -> anyhow::Result<()>;
}

const SELECT_COMMENT: &str = r#"
    SELECT c.id, c.content, c.post_id, c.author_id,
           u.name AS author_name, u.profile_picture AS author_profile_picture,
           c.created_at, c.updated_at
      FROM comments c
      JOIN users u ON u.id = c.author_id
"#;

#[async_trait]
impl CommentStore for PgStore {
    async fn insert(&self, comment: NewComment) -> anyhow::Result<Comment> {
        let row = sqlx::query_as::<_, Comment>(
            r#"
            WITH c AS (
                INSERT INTO comments (id, content, post_id, author_id)
                VALUES ($1, $2, $3, $4)
                RETURNING *
            )
            SELECT c.id, c.content, c.post_id, c.author_id,
                   u.name AS author_name, u.profile_picture AS author_profile_picture,
                   c.created_at, c.updated_at
              FROM c
              JOIN users u ON u.id = c.author_id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&comment.content)
        .bind(comment.post_id)
        .bind(comment.author_id)
        .fetch_one(&self.db)
        .await
        .context("insert comment")?;
        Ok(row)
    }

    async fn list_by_post(&self, post_id: Uuid) -> anyhow::Result<Vec<Comment>> {
        let rows = sqlx::query_as::<_, Comment>(&format!(
            "{SELECT_COMMENT} WHERE c.post_id = $1 ORDER BY c.created_at DESC"
        ))
        .bind(post_id)
        .fetch_all(&self.db)
        .await
        .context("list comments by post")?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Comment>> {
        let row = sqlx::query_as::<_, Comment>(&format!("{SELECT_COMMENT} WHERE c.id = $1"))
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .context("find comment")?;
        Ok(row)
    }

    async fn update_content(&self, id: Uuid, content: &str) -> anyhow::Result<Comment> {
        let row = sqlx::query_as::<_, Comment>(
            r#"
            WITH c AS (
                UPDATE comments
                   SET content = $2,
                       updated_at = now()
                 WHERE id = $1
                RETURNING *
            )
            SELECT c.id, c.content, c.post_id, c.author_id,
                   u.name AS author_name, u.profile_picture AS author_profile_picture,
                   c.created_at, c.updated_at
              FROM c
              JOIN users u ON u.id = c.author_id
            "#,
        )
        .bind(id)
        .bind(content)
        .fetch_one(&self.db)
        .await
        .context("update comment")?;
        Ok(row)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .context("delete comment")?;
        Ok(())
    }
}
