//! # Entity Loading Module
//!
//! Entities (source files and the file references extracted from them) are
//! produced by an external extractor and handed to cycle-radar as JSON
//! manifests. This module finds and parses those manifests.
//!
//! A manifest is a JSON array of entities:
//!
//! ```json
//! [
//!   { "filePath": "src/app.ts", "dependencies": ["src/util.ts"] },
//!   { "filePath": "src/util.ts", "dependencies": [] }
//! ]
//! ```
//!
//! ## Example
//!
//! ```
//! use std::io::Write;
//!
//! use cycle_radar::analyzer::EntityAnalyzer;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut manifest = tempfile::NamedTempFile::new()?;
//! write!(
//!     manifest,
//!     r#"[{{"filePath": "src/a.ts", "dependencies": ["src/b.ts"]}}]"#
//! )?;
//!
//! let mut analyzer = EntityAnalyzer::new();
//! analyzer.load_entities(&[manifest.path().to_path_buf()], None)?;
//!
//! assert_eq!(analyzer.entities().len(), 1);
//! assert_eq!(analyzer.entities()[0].file_path, "src/a.ts");
//! # Ok(())
//! # }
//! ```

mod analyzer_impl;

pub use analyzer_impl::*;
