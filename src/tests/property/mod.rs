//! Property-based tests for Folio
//!
//! Property tests verify invariants that should hold for all inputs, rather
//! than testing specific cases.
//!
//! ## Running Property Tests
//!
//! ```sh
//! cargo test property --release
//! ```
//!
//! ## Test Modules
//!
//! - `filter_props`: Tests for the catalog filter engine
//!   - Results keep catalog order and only contain matching entries
//!   - Nothing that matches is left out
//!   - Query padding and letter case do not change results
//!   - Chip counts agree with filtering by that chip
//!
//! - `contact_props`: Tests for contact form validation
//!   - Blank required fields are always reported
//!   - Message length threshold counts trimmed characters
//!   - A rejected submit never starts sending
//!
//! By default, proptest runs 256 cases per property. Override with
//! `PROPTEST_CASES`.

mod contact_props;
mod filter_props;
