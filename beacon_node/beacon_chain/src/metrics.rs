pub use lighthouse_metrics::*;
use lazy_static::lazy_static;

lazy_static! {
    pub static ref ATTESTATION_CACHE_HIT_COUNT: std::result::Result<Counter, Error> =
        try_create_int_counter(
            "attestation_cache_hit_total",
            "Count of times the attestation-data cache returned a cached response"
        );
    pub static ref ATTESTATION_CACHE_MISS_COUNT: std::result::Result<Counter, Error> =
        try_create_int_counter(
            "attestation_cache_miss_total",
            "Count of times the attestation-data cache had no response for a fingerprint"
        );
    pub static ref ATTESTATION_CACHE_SIZE: std::result::Result<Gauge, Error> = try_create_int_gauge(
        "attestation_cache_size",
        "Number of entries currently held in the attestation-data cache"
    );
    pub static ref SYNC_COMMITTEE_INDEX_CACHE_HIT_COUNT: std::result::Result<Counter, Error> =
        try_create_int_counter(
            "sync_committee_index_cache_hit_total",
            "Count of times the sync-committee positional cache had an entry for the queried root"
        );
    pub static ref SYNC_COMMITTEE_INDEX_CACHE_MISS_COUNT: std::result::Result<Counter, Error> =
        try_create_int_counter(
            "sync_committee_index_cache_miss_total",
            "Count of times the sync-committee positional cache had no entry for the queried root"
        );
}
