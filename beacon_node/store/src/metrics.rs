pub use lighthouse_metrics::*;
use lazy_static::lazy_static;

lazy_static! {
    pub static ref BEACON_STATE_READ_COUNT: std::result::Result<Counter, Error> =
        try_create_int_counter(
            "store_beacon_state_read_total",
            "Total number of beacon states read from the hot/cold store"
        );
    pub static ref BEACON_STATE_WRITE_COUNT: std::result::Result<Counter, Error> =
        try_create_int_counter(
            "store_beacon_state_write_total",
            "Total number of beacon states written to the hot/cold store"
        );
    pub static ref BEACONDB_STATE_SIZE_BYTES: std::result::Result<Histogram, Error> =
        try_create_histogram(
            "beacondb_state_size_bytes",
            "Size in bytes of a single encoded beacon state"
        );
    pub static ref DISK_DB_READ_COUNT: std::result::Result<Counter, Error> = try_create_int_counter(
        "store_disk_db_read_total",
        "Total number of disk-db get() calls"
    );
    pub static ref DISK_DB_WRITE_COUNT: std::result::Result<Counter, Error> = try_create_int_counter(
        "store_disk_db_write_total",
        "Total number of disk-db put() calls"
    );
}
