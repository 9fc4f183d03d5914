//! Import catalog command

use colored::Colorize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use crate::interfaces::cli::CliError;
use crate::services::{CatalogImport, CatalogService};
use crate::storage::SeaOrmStorage;

/// 读取并解析 JSON 目录文件
pub fn read_catalog_file(file_path: &str) -> Result<CatalogImport, CliError> {
    if !Path::new(file_path).exists() {
        return Err(CliError::CommandError(format!(
            "Import file not found: {}",
            file_path
        )));
    }

    let file = File::open(file_path).map_err(|e| {
        CliError::CommandError(format!("Failed to open import file '{}': {}", file_path, e))
    })?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| CliError::ParseError(format!("Invalid catalog file '{}': {}", file_path, e)))
}

pub async fn import_catalog(storage: Arc<SeaOrmStorage>, file_path: String) -> Result<(), CliError> {
    let import = read_catalog_file(&file_path)?;

    println!("{} Importing catalog from {}", "→".bold().blue(), file_path.cyan());
    let summary = CatalogService::new(storage).import_catalog(import).await;

    for error in &summary.errors {
        println!("  {} {}", "✗".bold().red(), error);
    }

    println!(
        "{} Import finished: {} created, {} failed",
        if summary.failed == 0 {
            "✓".bold().green()
        } else {
            "!".bold().yellow()
        },
        summary.created.to_string().green(),
        summary.failed.to_string().red()
    );

    if summary.created == 0 && summary.failed > 0 {
        return Err(CliError::CommandError("no row could be imported".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_catalog_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"aerolineas": [{{"nombre": "LATAM", "codigo": "LA"}}], "paquetes": []}}"#
        )
        .unwrap();

        let import = read_catalog_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(import.aerolineas.len(), 1);
        assert!(import.hoteles.is_empty());
    }

    #[test]
    fn test_read_catalog_file_errors() {
        assert!(matches!(
            read_catalog_file("/nonexistent/catalogo.json"),
            Err(CliError::CommandError(_))
        ));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            read_catalog_file(file.path().to_str().unwrap()),
            Err(CliError::ParseError(_))
        ));
    }
}
