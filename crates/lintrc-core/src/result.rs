//! Result type alias for configuration operations

use crate::error::LintrcError;

/// Standard Result type for lintrc operations
pub type Result<T> = std::result::Result<T, LintrcError>;
