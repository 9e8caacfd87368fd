//! The `add`, `update`, and `remove` commands.

use pricebook_core::PriceBook;
use uuid::Uuid;

/// Adds a new item and prints it.
pub async fn add(
    book: &PriceBook,
    name: &str,
    price: f64,
    gross_price: Option<f64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let item = book.add(name, price, gross_price).await?;
    println!("added {} ({})", item.name, item.id);
    Ok(())
}

/// Updates an existing item and prints the result.
pub async fn update(
    book: &PriceBook,
    id: Uuid,
    name: &str,
    price: f64,
    gross_price: Option<f64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let item = book.update(id, name, price, gross_price).await?;
    match item.last_edited_at {
        Some(edited) => println!("updated {} (edited {})", item.name, edited.to_rfc3339()),
        None => println!("no changes for {}", item.name),
    }
    Ok(())
}

/// Removes an item by id.
pub async fn remove(book: &PriceBook, id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
    book.remove(id).await?;
    println!("removed {id}");
    Ok(())
}
