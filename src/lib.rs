//! # Solar Fan
//!
//! `solar_fan` bundles the fan chart engine and its numeric helpers behind
//! one dependency.
//!
//! ## Example
//!
//! ```
//! use solar_fan::chart::generate_fan_chart_with_seed;
//!
//! let result = generate_fan_chart_with_seed(&[1.0, 2.0, 3.0], &[], None, 7);
//! assert!(result.success);
//! assert_eq!(result.actual_line.len(), 3);
//! ```

pub use fan_chart::*;

/// Order statistics and forecast error measures
pub mod math {
    pub use fan_math::*;
}
