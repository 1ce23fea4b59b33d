//! Binary metadata descriptor generation
//!
//! Renders the VSVersionInfo document the packager embeds into the executable
//! as its Windows version resource. Pure templating over the version
//! identifier and the fixed application identity; the only side effect is one
//! file write, truncating any previous descriptor.

use crate::core::config::AppConfig;
use crate::core::error::ShipResult;
use crate::core::version::VersionId;
use std::fs;
use std::path::Path;

/// File name of the generated descriptor, consumed once by the packager
pub const VERSION_RESOURCE_FILE: &str = "file_version_info.txt";

/// Render the VSVersionInfo document for a version and identity
pub fn render(app: &AppConfig, version: &VersionId) -> String {
  let (major, minor, patch) = version.tuple();

  format!(
    r#"# UTF-8
VSVersionInfo(
  ffi=FixedFileInfo(
    filevers=({major}, {minor}, {patch}, 0),
    prodvers=({major}, {minor}, {patch}, 0),
    mask=0x3f,
    flags=0x0,
    OS=0x40004,
    fileType=0x1,
    subtype=0x0,
    date=(0, 0)
  ),
  kids=[
    StringFileInfo([
      StringTable(
        '040904B0',
        [StringStruct('CompanyName', '{company}'),
         StringStruct('FileDescription', '{name}'),
         StringStruct('FileVersion', '{version}'),
         StringStruct('InternalName', '{name}'),
         StringStruct('LegalCopyright', '{copyright}'),
         StringStruct('OriginalFilename', '{executable}'),
         StringStruct('ProductName', '{name}'),
         StringStruct('ProductVersion', '{version}')])
    ]),
    VarFileInfo([VarStruct('Translation', [1033, 1200])])
  ]
)
"#,
    major = major,
    minor = minor,
    patch = patch,
    company = app.company,
    name = app.name,
    version = version,
    copyright = app.copyright(),
    executable = app.executable(),
  )
}

/// Write the descriptor to `output_path`, overwriting any existing file
pub fn generate(app: &AppConfig, version: &VersionId, output_path: &Path) -> ShipResult<()> {
  fs::write(output_path, render(app, version))?;
  Ok(())
}
