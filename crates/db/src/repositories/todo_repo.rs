//! Repository for the `todos` table.

use chrono::Utc;
use labsite_core::todo::{CreateTodo, TodoItem, UpdateTodo};
use labsite_core::types::DbId;

use super::decode_all;
use crate::models::todo::TodoRow;
use crate::models::to_flag;
use crate::DbPool;

/// Column list for `todos` queries.
const COLUMNS: &str = "\
    id, text, deadline, completed, priority, created_by, created_at, completed_at";

/// Provides CRUD operations for admin todo items.
pub struct TodoRepo;

impl TodoRepo {
    /// List every todo, newest first.
    pub async fn list(pool: &DbPool) -> Result<Vec<TodoItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM todos ORDER BY created_at DESC, id DESC");
        let rows = sqlx::query_as::<_, TodoRow>(&query).fetch_all(pool).await?;
        decode_all(rows)
    }

    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<TodoItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM todos WHERE id = $1");
        sqlx::query_as::<_, TodoRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .map(TodoItem::try_from)
            .transpose()
    }

    pub async fn create(pool: &DbPool, input: &CreateTodo) -> Result<TodoItem, sqlx::Error> {
        let now = Utc::now();
        let draft = input.clone().into_todo(0, now);
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO todos (\
                text, deadline, completed, priority, created_by, created_at, \
                completed_at, updated_at\
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $6) \
             RETURNING id",
        )
        .bind(&draft.text)
        .bind(draft.deadline)
        .bind(to_flag(draft.completed))
        .bind(draft.priority.as_str())
        .bind(draft.created_by)
        .bind(draft.created_at)
        .bind(draft.completed_at)
        .fetch_one(pool)
        .await?;

        Ok(TodoItem { id, ..draft })
    }

    pub async fn update(
        pool: &DbPool,
        id: DbId,
        patch: UpdateTodo,
    ) -> Result<Option<TodoItem>, sqlx::Error> {
        let Some(mut todo) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        todo.apply(patch, Utc::now());
        Self::write(pool, todo).await
    }

    /// Flip `completed`, stamping `completedAt` when it becomes true and
    /// clearing it otherwise.
    pub async fn toggle(pool: &DbPool, id: DbId) -> Result<Option<TodoItem>, sqlx::Error> {
        let Some(mut todo) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        todo.toggle(Utc::now());
        Self::write(pool, todo).await
    }

    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(pool: &DbPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM todos")
            .fetch_one(pool)
            .await
    }

    async fn write(pool: &DbPool, todo: TodoItem) -> Result<Option<TodoItem>, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE todos SET \
                text = $1, deadline = $2, completed = $3, priority = $4, \
                completed_at = $5, updated_at = $6 \
             WHERE id = $7",
        )
        .bind(&todo.text)
        .bind(todo.deadline)
        .bind(to_flag(todo.completed))
        .bind(todo.priority.as_str())
        .bind(todo.completed_at)
        .bind(Utc::now())
        .bind(todo.id)
        .execute(pool)
        .await?;

        Ok((result.rows_affected() > 0).then_some(todo))
    }
}
