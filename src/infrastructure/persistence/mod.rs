mod pg_pool;
mod pg_summary_repository;

pub use pg_pool::create_pool;
pub use pg_summary_repository::PgSummaryRepository;
