//! External representations. Only JSON Lines is implemented at the core
//! (feature `jsonl`); other formats would live alongside it the way
//! ironbeam gates `io-csv`/`io-parquet`/`io-avro` behind their own features.

#[cfg(feature = "jsonl")]
pub mod jsonl;
