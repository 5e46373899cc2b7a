use sqlx::{Postgres, QueryBuilder};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::application::repos::{CreatePostParams, RepoError, UpdatePostParams};
use crate::domain::entities::PostRecord;
use crate::infra::db::map_sqlx_error;

use super::super::PostgresRepositories;
use super::types::{POST_COLUMNS, PostRow};

impl PostgresRepositories {
    pub(super) async fn insert_post(
        &self,
        params: CreatePostParams,
    ) -> Result<PostRecord, RepoError> {
        let CreatePostParams {
            title,
            slug,
            content,
            author,
        } = params;

        let id = Uuid::new_v4();
        let now = OffsetDateTime::now_utc();
        let sql = format!(
            "INSERT INTO posts (id, title, slug, content, author, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $6) RETURNING {POST_COLUMNS}"
        );

        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(id)
            .bind(title)
            .bind(slug)
            .bind(content)
            .bind(author)
            .bind(now)
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(PostRecord::from(row))
    }

    pub(super) async fn apply_update(
        &self,
        params: UpdatePostParams,
    ) -> Result<PostRecord, RepoError> {
        let mut qb: QueryBuilder<'_, Postgres> = QueryBuilder::new("UPDATE posts SET updated_at = ");
        qb.push_bind(OffsetDateTime::now_utc());

        for (column, value) in [
            ("title", params.title),
            ("slug", params.slug),
            ("content", params.content),
            ("author", params.author),
        ] {
            if let Some(value) = value {
                qb.push(", ");
                qb.push(column);
                qb.push(" = ");
                qb.push_bind(value);
            }
        }

        qb.push(" WHERE id = ");
        qb.push_bind(params.id);
        qb.push(" RETURNING ");
        qb.push(POST_COLUMNS);

        let row = qb
            .build_query_as::<PostRow>()
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_error)?
            .ok_or(RepoError::NotFound)?;

        Ok(PostRecord::from(row))
    }

    pub(super) async fn remove_post(&self, id: Uuid) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}
