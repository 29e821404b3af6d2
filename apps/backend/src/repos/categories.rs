use crate::errors::domain::DomainError;
use crate::store::{Collection, Document, DocumentStore, Filter};

pub async fn list_all(store: &dyn DocumentStore) -> Result<Vec<Document>, DomainError> {
    store.find(Collection::Category, &Filter::all()).await
}
