use std::path::PathBuf;

use typed_builder::TypedBuilder;

/// Load-time policy for a cartridge.
///
/// ```
/// use cartboy_gb::LoadOptions;
///
/// let opts = LoadOptions::builder().strict_checksum(true).build();
/// assert!(opts.battery);
/// ```
#[derive(TypedBuilder, Clone, Debug)]
pub struct LoadOptions {
    /// Treat a global checksum mismatch as a load failure instead of a
    /// warning.
    #[builder(default = false)]
    pub strict_checksum: bool,
    /// Read battery RAM at load and write it back on detach.
    #[builder(default = true)]
    pub battery: bool,
    /// Override the battery save file location. By default it sits next to
    /// the ROM with a `.sav` extension.
    #[builder(default, setter(strip_option, into))]
    pub save_path: Option<PathBuf>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}
