use std::collections::HashSet;
use std::path::Path;

use crate::error::AppError;
use crate::model::VendorRecord;

/// Load the vendor catalog from a JSON file and validate it.
///
/// The catalog is read once at startup and treated as immutable for the
/// process lifetime.
pub fn load_catalog(path: &Path) -> Result<Vec<VendorRecord>, AppError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| AppError::Catalog(format!("failed to read {}: {e}", path.display())))?;
    let vendors: Vec<VendorRecord> = serde_json::from_str(&raw)
        .map_err(|e| AppError::Catalog(format!("failed to parse {}: {e}", path.display())))?;
    validate(&vendors)?;
    Ok(vendors)
}

/// Reject catalogs that would make matching or lookup ambiguous: duplicate
/// ids, blank ids/names, and empty alias strings (an empty alias is a
/// substring of everything).
fn validate(vendors: &[VendorRecord]) -> Result<(), AppError> {
    let mut seen_ids: HashSet<&str> = HashSet::new();
    for vendor in vendors {
        if vendor.id.trim().is_empty() {
            return Err(AppError::Catalog(format!(
                "vendor \"{}\" has an empty id",
                vendor.name
            )));
        }
        if !seen_ids.insert(vendor.id.as_str()) {
            return Err(AppError::Catalog(format!(
                "duplicate vendor id: {}",
                vendor.id
            )));
        }
        if vendor.name.trim().is_empty() {
            return Err(AppError::Catalog(format!(
                "vendor {} has an empty name",
                vendor.id
            )));
        }
        if vendor.aliases.iter().any(|a| a.trim().is_empty()) {
            return Err(AppError::Catalog(format!(
                "vendor {} has an empty alias",
                vendor.id
            )));
        }
    }
    Ok(())
}
