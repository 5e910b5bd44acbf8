use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaLoadError {
    #[error("failed to read schema source `{source_id}`: {message}")]
    FileRead {
        message: String,
        source_id: String,
    },

    #[error("schema source `{source_id}` is not valid SDL: {message}")]
    InvalidSdl {
        message: String,
        source_id: String,
    },

    #[error(
        "schema registry manifest `{source_id}` is malformed: {message}"
    )]
    MalformedManifest {
        message: String,
        source_id: String,
    },

    #[error("remote fetch failed for schema source `{source_id}`: {message}")]
    RemoteFetch {
        message: String,
        source_id: String,
    },

    #[error(
        "schema source `{source_id}` is a URL but no fetch hook was \
        configured"
    )]
    UrlFetchUnsupported {
        source_id: String,
    },
}
