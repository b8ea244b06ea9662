mod pg_key_repository;
mod pg_source_repository;

pub use pg_key_repository::PgKeyRepository;
pub use pg_source_repository::PgSourceRepository;
