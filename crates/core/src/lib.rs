pub mod catalog;
pub mod config;
pub mod importer;
pub mod normalizer;
pub mod resolver;
pub mod sink;
pub mod source;
pub mod testing;

pub use catalog::{
    CandidateMatch, CatalogCandidate, CatalogError, ExternalId, MediaKind, MetadataCatalog,
    TmdbClient, TmdbConfig,
};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, OutputConfig,
    SanitizedConfig,
};
pub use importer::{HistoryImporter, ImportOutput, ImportSummary, TraktEntry};
pub use normalizer::{Normalizer, NormalizerConfig, ParsedTitle};
pub use resolver::{CacheKey, CacheStats, ResolverConfig, TitleResolver};
pub use sink::{EntrySink, JsonFileSink, SinkError};
pub use source::{
    Download, DownloadSource, DownloadSourceError, DownloadStats, RealDebridClient,
    RealDebridConfig,
};
