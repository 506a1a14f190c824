//! Generic resource collections (`posts`, `pages`, `tags`, `members`, ...).

use serde_json::{Map, Value};

use crate::admin::{AdminClient, RequestOptions};
use crate::content::ContentClient;
use crate::endpoint::Params;
use crate::error::Result;

use reqwest::Method;

/// A resource collection on the Admin API.
///
/// Write bodies are wrapped in the platform envelope, e.g. `{"posts": [data]}`.
pub struct AdminResource {
    client: AdminClient,
    name: String,
}

impl AdminResource {
    pub(crate) fn new(client: AdminClient, name: String) -> Self {
        Self { client, name }
    }

    /// Collection name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// List items.
    pub async fn browse(&self, params: impl Into<Params>) -> Result<Value> {
        self.client.get(&collection_path(&self.name), params.into()).await
    }

    /// Get an item by ID.
    pub async fn read(&self, id: &str, params: impl Into<Params>) -> Result<Value> {
        self.client
            .get(&item_path(&self.name, id), params.into())
            .await
    }

    /// Get an item by slug.
    pub async fn read_by_slug(&self, slug: &str, params: impl Into<Params>) -> Result<Value> {
        self.client
            .get(&slug_path(&self.name, slug), params.into())
            .await
    }

    /// Create an item.
    pub async fn add(&self, data: Value, params: impl Into<Params>) -> Result<Value> {
        let options = RequestOptions::new(Method::POST)
            .body(self.envelope(data))
            .params(params.into());
        self.client
            .request(&collection_path(&self.name), options)
            .await
    }

    /// Update an item. `data` usually needs the current `updated_at`.
    pub async fn edit(&self, id: &str, data: Value, params: impl Into<Params>) -> Result<Value> {
        let options = RequestOptions::new(Method::PUT)
            .body(self.envelope(data))
            .params(params.into());
        self.client.request(&item_path(&self.name, id), options).await
    }

    /// Delete an item.
    pub async fn delete(&self, id: &str) -> Result<Value> {
        self.client.delete(&item_path(&self.name, id)).await
    }

    fn envelope(&self, data: Value) -> Value {
        let mut body = Map::new();
        body.insert(self.name.clone(), Value::Array(vec![data]));
        Value::Object(body)
    }
}

/// A read-only resource collection on the Content API.
pub struct ContentResource {
    client: ContentClient,
    name: String,
}

impl ContentResource {
    pub(crate) fn new(client: ContentClient, name: String) -> Self {
        Self { client, name }
    }

    /// Collection name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// List items.
    pub async fn browse(&self, params: impl Into<Params>) -> Result<Value> {
        self.client
            .get(&collection_path(&self.name), params.into(), None)
            .await
    }

    /// Get an item by ID.
    pub async fn read(&self, id: &str, params: impl Into<Params>) -> Result<Value> {
        self.client
            .get(&item_path(&self.name, id), params.into(), None)
            .await
    }

    /// Get an item by slug.
    pub async fn read_by_slug(&self, slug: &str, params: impl Into<Params>) -> Result<Value> {
        self.client
            .get(&slug_path(&self.name, slug), params.into(), None)
            .await
    }
}

fn collection_path(name: &str) -> String {
    format!("/{}/", name)
}

fn item_path(name: &str, id: &str) -> String {
    format!("/{}/{}/", name, id)
}

fn slug_path(name: &str, slug: &str) -> String {
    format!("/{}/slug/{}/", name, slug)
}
