//! One zero-sized repository per table. Every function takes the pool and
//! returns the decoded domain entity.

mod news_repo;
mod patent_repo;
mod project_repo;
mod publication_repo;
mod research_item_repo;
mod team_member_repo;
mod todo_repo;
mod user_repo;

pub use news_repo::NewsRepo;
pub use patent_repo::PatentRepo;
pub use project_repo::ProjectRepo;
pub use publication_repo::PublicationRepo;
pub use research_item_repo::SqliteResearchStore;
pub use team_member_repo::TeamMemberRepo;
pub use todo_repo::TodoRepo;
pub use user_repo::UserRepo;

/// Decode every row, stopping at the first malformed one.
pub(crate) fn decode_all<R, T>(rows: Vec<R>) -> Result<Vec<T>, sqlx::Error>
where
    T: TryFrom<R, Error = sqlx::Error>,
{
    rows.into_iter().map(T::try_from).collect()
}
