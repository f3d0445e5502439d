//! # TagForge
//!
//! A pure-Rust library for reading, writing and upgrading blam engine tags.
//!
//! ## Supported Formats
//!
//! - **First-generation shaders** - Environment (`senv`) and model (`soso`) shaders, big-endian
//! - **Second-generation shaders** - Template-driven `shad` tags in all three historical layouts, little-endian
//! - **Function curves** - All eleven animation curve variants, scalar or color output
//!
//! ## Quick Start
//!
//! ### Upgrading a Shader
//!
//! ```no_run
//! use tagforge::upgrade::{PatchOverrides, upgrade};
//!
//! let source = std::fs::read("tags/levels/rock.shader_environment")?;
//! let output = upgrade(&source, &PatchOverrides::new())?;
//! println!("Upgraded to {}", output.template);
//! std::fs::write("tags/levels/rock.shader", &output.bytes)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ### Upgrading a Directory
//!
//! ```no_run
//! use std::path::Path;
//! use tagforge::batch::{batch_upgrade, find_source_tags};
//! use tagforge::upgrade::PatchOverrides;
//!
//! let files = find_source_tags("tags");
//! let result = batch_upgrade(
//!     &files,
//!     Path::new("tags"),
//!     Path::new("upgraded"),
//!     &PatchOverrides::new(),
//!     |progress| println!("{}/{} {}", progress.current, progress.total, progress.current_file),
//! );
//! println!("{} upgraded, {} failed", result.success_count, result.fail_count);
//! ```
//!
//! ### Using the Prelude
//!
//! ```
//! use tagforge::prelude::*;
//!
//! // Now you have access to:
//! // - ShaderV1, ShaderTag, Parameter, FunctionCurve
//! // - upgrade, PatchOverrides, ShaderTemplate
//! // - Error, Result, and more
//! ```

mod macros;

pub mod batch;
pub mod error;
pub mod formats;
pub mod remap;
pub mod upgrade;

// Re-exports for convenience
pub use error::{ConversionError, Diagnostic, Error, Result, Stage};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{ConversionError, Diagnostic, Error, Result, Stage};
    pub use crate::formats::common::{ColorRgb, FourCC, Reference, TagHeader};
    pub use crate::formats::function::{CurveOutput, CurveShape, FunctionCurve};
    pub use crate::formats::gen1::{ShaderEnvironment, ShaderModel, ShaderV1};
    pub use crate::formats::gen2::{AnimationProperty, Parameter, ShaderTag};
    pub use crate::formats::ParsedTag;

    pub use crate::remap::material_name;
    pub use crate::upgrade::{
        PatchOverrides, ShaderTemplate, Upgrade, UpgradeOutput, classify_shader, upgrade,
    };

    pub use crate::batch::{BatchUpgradeResult, batch_upgrade, find_source_tags};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
