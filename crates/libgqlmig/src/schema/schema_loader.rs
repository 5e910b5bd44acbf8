use crate::ast;
use crate::file_reader;
use crate::schema::SchemaLoadError;
use moka::sync::Cache;
use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

/// Caller-supplied hook for resolving URL schema sources. The core never
/// performs network I/O itself.
pub type FetchHook = Box<dyn Fn(&str) -> Result<String, String> + Send + Sync>;

#[derive(Clone, Debug)]
pub struct SchemaLoaderConfig {
    /// Cache capacity in SDL bytes; entries are weighed by text size.
    pub capacity_bytes: u64,
    /// Bypass the cache entirely (`--no-cache`).
    pub no_cache: bool,
    pub ttl: Duration,
}
impl Default for SchemaLoaderConfig {
    fn default() -> Self {
        Self {
            capacity_bytes: 16 * 1024 * 1024,
            no_cache: false,
            ttl: Duration::from_secs(300),
        }
    }
}

/// A loaded, validated SDL document. `cached` distinguishes cache hits so
/// callers can report load behavior.
#[derive(Clone, Debug)]
pub struct LoadedSchema {
    pub cached: bool,
    pub load_time: Duration,
    pub sdl: Arc<String>,
}
impl LoadedSchema {
    pub fn document(&self) -> Result<ast::schema::Document, ast::schema::ParseError> {
        ast::schema::parse(&self.sdl)
    }
}

/// Loads schema SDL by path or URL, with an in-process cache (LRU by SDL
/// byte size, TTL-based expiry).
///
/// Two load strategies: a registry-aware loader for `.json` manifests
/// carrying an `sdl` field (and URL sources via the fetch hook), and a
/// raw-file fallback for plain SDL files. Callers own their loader
/// instance; the process-wide default belongs to the composition root.
pub struct SchemaLoader {
    cache: Cache<String, Arc<String>>,
    config: SchemaLoaderConfig,
    fetch: Option<FetchHook>,
}
impl SchemaLoader {
    pub fn new(config: SchemaLoaderConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.capacity_bytes)
            .weigher(|_source: &String, sdl: &Arc<String>| {
                sdl.len().min(u32::MAX as usize) as u32
            })
            .time_to_live(config.ttl)
            .build();
        Self {
            cache,
            config,
            fetch: None,
        }
    }

    pub fn with_fetch_hook(mut self, fetch: FetchHook) -> Self {
        self.fetch = Some(fetch);
        self
    }

    pub fn load(&self, source: &str) -> Result<LoadedSchema, SchemaLoadError> {
        let started = Instant::now();

        if !self.config.no_cache
            && let Some(sdl) = self.cache.get(source) {
            log::debug!("Schema cache hit for `{source}`.");
            return Ok(LoadedSchema {
                cached: true,
                load_time: started.elapsed(),
                sdl,
            });
        }

        let sdl = self.fetch_sdl(source)?;
        ast::schema::parse(&sdl).map_err(|err| SchemaLoadError::InvalidSdl {
            message: err.to_string(),
            source_id: source.to_string(),
        })?;

        let sdl = Arc::new(sdl);
        if !self.config.no_cache {
            self.cache.insert(source.to_string(), Arc::clone(&sdl));
        }
        Ok(LoadedSchema {
            cached: false,
            load_time: started.elapsed(),
            sdl,
        })
    }

    fn fetch_sdl(&self, source: &str) -> Result<String, SchemaLoadError> {
        if source.starts_with("http://") || source.starts_with("https://") {
            let fetch = self.fetch.as_ref().ok_or_else(|| {
                SchemaLoadError::UrlFetchUnsupported {
                    source_id: source.to_string(),
                }
            })?;
            return fetch(source).map_err(|message| SchemaLoadError::RemoteFetch {
                message,
                source_id: source.to_string(),
            });
        }

        let content = file_reader::read_content(source).map_err(|err| {
            SchemaLoadError::FileRead {
                message: err.to_string(),
                source_id: source.to_string(),
            }
        })?;

        if source.ends_with(".json") {
            return extract_manifest_sdl(source, &content);
        }
        Ok(content)
    }
}
impl std::fmt::Debug for SchemaLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaLoader")
            .field("config", &self.config)
            .field("has_fetch_hook", &self.fetch.is_some())
            .finish()
    }
}

/// Registry manifests carry the SDL under `sdl` or `data.sdl`.
fn extract_manifest_sdl(source: &str, content: &str) -> Result<String, SchemaLoadError> {
    let manifest: serde_json::Value =
        serde_json::from_str(content).map_err(|err| {
            SchemaLoadError::MalformedManifest {
                message: err.to_string(),
                source_id: source.to_string(),
            }
        })?;

    manifest
        .get("sdl")
        .or_else(|| manifest.get("data").and_then(|data| data.get("sdl")))
        .and_then(|sdl| sdl.as_str())
        .map(|sdl| sdl.to_string())
        .ok_or_else(|| SchemaLoadError::MalformedManifest {
            message: "no `sdl` field found".to_string(),
            source_id: source.to_string(),
        })
}
