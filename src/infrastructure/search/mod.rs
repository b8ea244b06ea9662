mod es_store;
mod store;

pub use es_store::EsDocumentStore;
pub use store::{DocumentStore, DocumentStoreError};

#[cfg(test)]
pub use store::MockDocumentStore;
