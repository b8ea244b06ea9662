pub mod doc_id;
pub mod random_key;
