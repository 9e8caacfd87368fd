//! The `export` and `import` commands.

use pricebook_core::PriceBook;
use pricebook_model::ExportDocument;
use std::fs;
use std::path::Path;

/// Writes the collection to a JSON export file.
pub fn export(book: &PriceBook, file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let document = book.export();
    fs::write(file, document.to_json()?)?;
    println!("exported {} item(s) to {}", document.items.len(), file.display());
    Ok(())
}

/// Replaces the collection with the content of a JSON export file.
pub async fn import(book: &PriceBook, file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let text = fs::read_to_string(file)?;
    let document = ExportDocument::from_json(&text)?;
    let count = book.import_all(document.items).await?;
    println!("imported {} item(s) from {}", count, file.display());
    Ok(())
}
