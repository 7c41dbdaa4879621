//! Prelude module - common imports for ripple-sheets users
//!
//! ```rust
//! use ripple_sheets::prelude::*;
//! ```

pub use crate::{
    // Cell types
    Address,
    Cell,
    // Error types
    Error,
    Expression,
    Result,
    Sheet,
    // Update protocol
    SheetUpdateExt,
    Subject,
    UpdateStats,
};
