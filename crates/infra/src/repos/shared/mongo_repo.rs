use super::repo::{DeleteResult, UpdateResult};
use anyhow::Result;
use futures::stream::StreamExt;
use mongodb::{
    bson::{self, doc, oid::ObjectId, Document},
    options::FindOptions,
    Collection, Cursor,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::error;

pub trait MongoDocument<E>: Serialize + DeserializeOwned {
    fn into_domain(self) -> E;
    fn from_domain(entity: &E) -> Self;
}

fn get_id_filter(oid: &ObjectId) -> Document {
    doc! {
        "_id": oid
    }
}

fn entity_to_persistence<E, D: MongoDocument<E>>(entity: &E) -> Result<Document> {
    let raw = D::from_domain(entity);
    Ok(bson::to_document(&raw)?)
}

fn persistence_to_entity<E, D: MongoDocument<E>>(doc: Document) -> Result<E> {
    let raw: D = bson::from_document(doc)?;
    Ok(raw.into_domain())
}

pub async fn insert<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    entity: &E,
) -> Result<()> {
    let doc = entity_to_persistence::<E, D>(entity)?;
    collection.insert_one(doc, None).await?;
    Ok(())
}

pub async fn update_one(
    collection: &Collection<Document>,
    filter: Document,
    update: Document,
) -> Result<UpdateResult> {
    let res = collection.update_one(filter, update, None).await?;
    Ok(UpdateResult {
        matched_count: res.matched_count,
    })
}

pub async fn update_many(
    collection: &Collection<Document>,
    filter: Document,
    update: Document,
) -> Result<UpdateResult> {
    let res = collection.update_many(filter, update, None).await?;
    Ok(UpdateResult {
        matched_count: res.matched_count,
    })
}

pub async fn find<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    id: &ObjectId,
) -> Result<Option<E>> {
    find_one_by::<E, D>(collection, get_id_filter(id)).await
}

pub async fn find_one_by<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    filter: Document,
) -> Result<Option<E>> {
    collection
        .find_one(filter, None)
        .await?
        .map(persistence_to_entity::<E, D>)
        .transpose()
}

pub async fn find_many_by<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    filter: Document,
    options: Option<FindOptions>,
) -> Result<Vec<E>> {
    let cursor = collection.find(filter, options).await?;
    Ok(consume_cursor::<E, D>(cursor).await)
}

pub async fn count(collection: &Collection<Document>, filter: Document) -> Result<u64> {
    Ok(collection.count_documents(filter, None).await?)
}

pub async fn delete<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    id: &ObjectId,
) -> Result<Option<E>> {
    collection
        .find_one_and_delete(get_id_filter(id), None)
        .await?
        .map(persistence_to_entity::<E, D>)
        .transpose()
}

pub async fn delete_many_by(
    collection: &Collection<Document>,
    filter: Document,
) -> Result<DeleteResult> {
    let res = collection.delete_many(filter, None).await?;
    Ok(DeleteResult {
        deleted_count: res.deleted_count,
    })
}

async fn consume_cursor<E, D: MongoDocument<E>>(mut cursor: Cursor<Document>) -> Vec<E> {
    let mut documents = vec![];
    while let Some(result) = cursor.next().await {
        match result.map_err(anyhow::Error::new).and_then(persistence_to_entity::<E, D>) {
            Ok(entity) => documents.push(entity),
            Err(e) => {
                error!("Error reading document from cursor: {:?}", e);
            }
        }
    }

    documents
}
