//! Question repository
//!
//! Handles question CRUD with these patterns:
//! - every mutation is one statement with RETURNING (no read-modify-write)
//! - missing rows surface as `DbError::NotFound`

use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::{ListOrder, Question, QuestionId, QuestionText, VoteCount};

const QUESTION_COLUMNS: &str = "id, text, votes, hidden, created_at";

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("{resource} '{id}' is hidden")]
    Hidden { resource: &'static str, id: String },
}

impl DbError {
    fn question_not_found(id: QuestionId) -> Self {
        Self::NotFound {
            resource: "question",
            id: id.to_string(),
        }
    }
}

/// Question repository
pub struct QuestionRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> QuestionRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new question with zero votes, visible, stamped now (UTC).
    pub async fn create(&self, text: QuestionText) -> Result<Question, DbError> {
        let sql = format!(
            "INSERT INTO questions (text, votes, hidden, created_at) \
             VALUES (?, 0, 0, ?) RETURNING {QUESTION_COLUMNS}"
        );

        let question = sqlx::query_as::<_, Question>(&sql)
            .bind(text.as_str())
            .bind(Utc::now())
            .fetch_one(self.pool)
            .await?;

        Ok(question)
    }

    /// List questions in the given order.
    ///
    /// Hidden questions are only returned when `include_hidden` is set.
    pub async fn list(
        &self,
        order: ListOrder,
        include_hidden: bool,
    ) -> Result<Vec<Question>, DbError> {
        let filter = if include_hidden { "" } else { "WHERE hidden = 0" };
        let sql = format!(
            "SELECT {QUESTION_COLUMNS} FROM questions {filter} ORDER BY {}",
            order.order_by()
        );

        let questions = sqlx::query_as::<_, Question>(&sql)
            .fetch_all(self.pool)
            .await?;

        Ok(questions)
    }

    /// Get a single question, hidden or not.
    pub async fn get(&self, id: QuestionId) -> Result<Question, DbError> {
        let sql = format!("SELECT {QUESTION_COLUMNS} FROM questions WHERE id = ?");

        sqlx::query_as::<_, Question>(&sql)
            .bind(id.get())
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::question_not_found(id))
    }

    /// Add one vote to a visible question and return the new count.
    ///
    /// The increment happens inside a single UPDATE, so concurrent voters
    /// serialize on SQLite's write lock and no increment is lost.
    pub async fn vote(&self, id: QuestionId) -> Result<VoteCount, DbError> {
        let updated = sqlx::query_as::<_, VoteCount>(
            r#"
            UPDATE questions SET votes = votes + 1
            WHERE id = ? AND hidden = 0
            RETURNING id, votes
            "#,
        )
        .bind(id.get())
        .fetch_optional(self.pool)
        .await?;

        match updated {
            Some(count) => Ok(count),
            // Nothing updated: either the row is gone or it's hidden.
            None => {
                self.get(id).await?;
                Err(DbError::Hidden {
                    resource: "question",
                    id: id.to_string(),
                })
            }
        }
    }

    /// Hide a question from default listings. Idempotent.
    pub async fn hide(&self, id: QuestionId) -> Result<Question, DbError> {
        self.set_hidden(id, true).await
    }

    /// Make a hidden question visible again. Idempotent.
    pub async fn unhide(&self, id: QuestionId) -> Result<Question, DbError> {
        self.set_hidden(id, false).await
    }

    async fn set_hidden(&self, id: QuestionId, hidden: bool) -> Result<Question, DbError> {
        let sql = format!("UPDATE questions SET hidden = ? WHERE id = ? RETURNING {QUESTION_COLUMNS}");

        sqlx::query_as::<_, Question>(&sql)
            .bind(hidden)
            .bind(id.get())
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::question_not_found(id))
    }

    /// Permanently remove a question.
    pub async fn delete(&self, id: QuestionId) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM questions WHERE id = ?")
            .bind(id.get())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::question_not_found(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open;
    use tempfile::TempDir;

    async fn test_pool() -> (TempDir, SqlitePool) {
        let dir = tempfile::tempdir().unwrap();
        let pool = open(dir.path().join("questions.db")).await.unwrap();
        (dir, pool)
    }

    fn text(s: &str) -> QuestionText {
        QuestionText::new(s).unwrap()
    }

    fn qid(id: i64) -> QuestionId {
        QuestionId::new(id).unwrap()
    }

    #[tokio::test]
    async fn create_starts_visible_with_zero_votes() {
        let (_dir, pool) = test_pool().await;
        let repo = QuestionRepo::new(&pool);

        let q = repo.create(text("Hello?")).await.unwrap();

        assert_eq!(q.id, 1);
        assert_eq!(q.text, "Hello?");
        assert_eq!(q.votes, 0);
        assert!(!q.hidden);
        assert_eq!(repo.get(qid(q.id)).await.unwrap(), q);
    }

    #[tokio::test]
    async fn create_accepts_max_length_text() {
        let (_dir, pool) = test_pool().await;
        let repo = QuestionRepo::new(&pool);

        let long = "x".repeat(500);
        let q = repo.create(text(&long)).await.unwrap();
        assert_eq!(q.text.chars().count(), 500);
    }

    #[tokio::test]
    async fn vote_increments_by_one() {
        let (_dir, pool) = test_pool().await;
        let repo = QuestionRepo::new(&pool);
        let q = repo.create(text("vote me")).await.unwrap();

        let first = repo.vote(qid(q.id)).await.unwrap();
        let second = repo.vote(qid(q.id)).await.unwrap();

        assert_eq!(first, VoteCount { id: q.id, votes: 1 });
        assert_eq!(second.votes, 2);
    }

    #[tokio::test]
    async fn vote_missing_is_not_found() {
        let (_dir, pool) = test_pool().await;
        let repo = QuestionRepo::new(&pool);

        let err = repo.vote(qid(99)).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn vote_hidden_is_rejected() {
        let (_dir, pool) = test_pool().await;
        let repo = QuestionRepo::new(&pool);
        let q = repo.create(text("shh")).await.unwrap();
        repo.hide(qid(q.id)).await.unwrap();

        let err = repo.vote(qid(q.id)).await.unwrap_err();
        assert!(matches!(err, DbError::Hidden { .. }));
        assert_eq!(repo.get(qid(q.id)).await.unwrap().votes, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_votes_are_not_lost() {
        let (_dir, pool) = test_pool().await;
        let q = QuestionRepo::new(&pool).create(text("popular")).await.unwrap();
        let id = qid(q.id);

        const VOTERS: i64 = 25;
        let handles: Vec<_> = (0..VOTERS)
            .map(|_| {
                let pool = pool.clone();
                tokio::spawn(async move { QuestionRepo::new(&pool).vote(id).await })
            })
            .collect();

        for handle in handles {
            handle.await.expect("task panicked").expect("vote failed");
        }

        let q = QuestionRepo::new(&pool).get(id).await.unwrap();
        assert_eq!(q.votes, VOTERS);
    }

    #[tokio::test]
    async fn list_new_is_newest_first() {
        let (_dir, pool) = test_pool().await;
        let repo = QuestionRepo::new(&pool);
        for t in ["first", "second", "third"] {
            repo.create(text(t)).await.unwrap();
        }

        let ids: Vec<i64> = repo
            .list(ListOrder::New, false)
            .await
            .unwrap()
            .into_iter()
            .map(|q| q.id)
            .collect();

        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn list_top_orders_by_votes_then_id() {
        let (_dir, pool) = test_pool().await;
        let repo = QuestionRepo::new(&pool);
        for t in ["a", "b", "c", "d"] {
            repo.create(text(t)).await.unwrap();
        }
        // votes: a=1, b=2, c=1, d=0
        for id in [1, 2, 2, 3] {
            repo.vote(qid(id)).await.unwrap();
        }

        let ids: Vec<i64> = repo
            .list(ListOrder::Top, false)
            .await
            .unwrap()
            .into_iter()
            .map(|q| q.id)
            .collect();

        assert_eq!(ids, vec![2, 1, 3, 4]);
    }

    #[tokio::test]
    async fn list_respects_include_hidden() {
        let (_dir, pool) = test_pool().await;
        let repo = QuestionRepo::new(&pool);
        let visible = repo.create(text("visible")).await.unwrap();
        let hidden = repo.create(text("hidden")).await.unwrap();
        repo.hide(qid(hidden.id)).await.unwrap();

        let public = repo.list(ListOrder::New, false).await.unwrap();
        assert_eq!(public.len(), 1);
        assert_eq!(public[0].id, visible.id);
        assert!(public.iter().all(|q| !q.hidden));

        let all = repo.list(ListOrder::New, true).await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().any(|q| q.id == hidden.id && q.hidden));
    }

    #[tokio::test]
    async fn hide_is_idempotent_and_unhide_restores() {
        let (_dir, pool) = test_pool().await;
        let repo = QuestionRepo::new(&pool);
        let q = repo.create(text("moderate me")).await.unwrap();
        let id = qid(q.id);

        let once = repo.hide(id).await.unwrap();
        let twice = repo.hide(id).await.unwrap();
        assert!(once.hidden);
        assert_eq!(once, twice);

        let restored = repo.unhide(id).await.unwrap();
        assert!(!restored.hidden);
        assert_eq!(restored.created_at, q.created_at);
        assert_eq!(restored.text, q.text);
    }

    #[tokio::test]
    async fn moderation_on_missing_is_not_found() {
        let (_dir, pool) = test_pool().await;
        let repo = QuestionRepo::new(&pool);

        assert!(matches!(repo.hide(qid(7)).await, Err(DbError::NotFound { .. })));
        assert!(matches!(repo.unhide(qid(7)).await, Err(DbError::NotFound { .. })));
        assert!(matches!(repo.delete(qid(7)).await, Err(DbError::NotFound { .. })));
    }

    #[tokio::test]
    async fn delete_invalidates_id() {
        let (_dir, pool) = test_pool().await;
        let repo = QuestionRepo::new(&pool);
        let q = repo.create(text("gone soon")).await.unwrap();
        let id = qid(q.id);

        repo.delete(id).await.unwrap();

        assert!(matches!(repo.get(id).await, Err(DbError::NotFound { .. })));
        assert!(matches!(repo.vote(id).await, Err(DbError::NotFound { .. })));
        assert!(matches!(repo.hide(id).await, Err(DbError::NotFound { .. })));
        assert!(matches!(repo.unhide(id).await, Err(DbError::NotFound { .. })));
        assert!(matches!(repo.delete(id).await, Err(DbError::NotFound { .. })));
    }

    #[tokio::test]
    async fn deleted_ids_are_not_reused() {
        let (_dir, pool) = test_pool().await;
        let repo = QuestionRepo::new(&pool);
        let first = repo.create(text("one")).await.unwrap();
        let second = repo.create(text("two")).await.unwrap();
        repo.delete(qid(second.id)).await.unwrap();

        let third = repo.create(text("three")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(third.id, 3);
    }
}
