use thiserror::Error;

#[derive(Debug, Error)]
pub enum JsonStoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed subscription file {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl From<JsonStoreError> for campaign_store::StoreError {
    fn from(e: JsonStoreError) -> Self {
        match e {
            JsonStoreError::Io { source, .. } => campaign_store::StoreError::Io(source),
            JsonStoreError::Json { .. } => {
                campaign_store::StoreError::Serialization(e.to_string())
            }
        }
    }
}
