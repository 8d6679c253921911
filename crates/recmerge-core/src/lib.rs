//! recmerge-core: duplicate detection and smart merge for business records.
//!
//! Pure engine crate: receives pre-loaded records, returns duplicate groups
//! and merged field sets. No storage or network dependencies.
//!
//! - **Similarity**: case-insensitive normalized Levenshtein similarity (0–100)
//! - **Scoring**: weighted multi-field scorers for contacts, orders and products
//! - **Cluster**: greedy anchor-based grouping over a caller-chosen record set
//! - **Classify**: coarse match type (`email`, `sku`, `multiple`, ...) per group
//! - **Merge**: field-level conflict resolution into one canonical record
//! - **Config**: thresholds and field rules, loadable from TOML
//!
//! # Flow
//!
//! ```text
//! records ─► Scorer + cluster ─► DuplicateGroup[] ─► pick primary ─► smart merge ─► caller persists
//! ```

pub mod blank;
pub mod classify;
pub mod cluster;
pub mod config;
pub mod error;
pub mod merge;
pub mod model;
pub mod scoring;
pub mod similarity;

pub use classify::{classify, MatchType};
pub use cluster::{
    cluster, find_duplicate_contacts, find_duplicate_orders, find_duplicate_products,
    pair_consecutive, DuplicateGroup, DEFAULT_THRESHOLD,
};
pub use config::RecmergeConfig;
pub use error::{RecmergeError, Result};
pub use merge::{
    plan_merge, smart_merge_contact, smart_merge_order, smart_merge_product, MergeOutcome,
    MergePlan, Mergeable,
};
pub use model::{Contact, MergedContact, MergedOrder, MergedProduct, Order, Product, Record};
pub use scoring::{
    ContactScorer, MatchCategory, MatchReason, OrderScorer, ProductScorer, ScoredPair, Scorer,
    Similarity,
};
pub use similarity::similarity;
