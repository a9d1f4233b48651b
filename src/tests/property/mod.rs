//! Property-based tests for the gambit editor core
//!
//! Property tests verify invariants that hold for all inputs rather than
//! specific cases.
//!
//! ## Test Modules
//!
//! - `template_props`: script rendering
//!   - Output is a pure function of its inputs
//!   - One timeline block per entry, in entry order
//!   - Class name is always a valid C++ identifier
//!   - Sentinel selection always yields the placeholder
//!
//! - `gambit_props`: the ordered selection list
//!   - Never fewer than one entry
//!   - Ordinals are always `1..=len`
//!   - Adding then removing n entries restores the list
//!
//! - `catalog_props`: lookup data
//!   - Visible choices never contain sentinels and keep source order
//!   - Unknown identifiers resolve to the fallback record
//!   - Unparseable files yield an empty data set
//!
//! ## Configuration
//!
//! By default, proptest runs 256 cases per property. This can be configured
//! via the `PROPTEST_CASES` environment variable:
//!
//! ```sh
//! PROPTEST_CASES=1000 cargo test property --release
//! ```

mod catalog_props;
mod gambit_props;
mod template_props;
