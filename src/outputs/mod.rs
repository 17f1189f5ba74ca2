//! Output generation.
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! ├── 2025-11-22.json
//! └── 2025-11-23.json
//! ```

pub mod json;
