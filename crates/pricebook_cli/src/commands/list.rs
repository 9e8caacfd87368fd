//! The `list` command.

use pricebook_core::{PriceBook, SortOption};

/// Prints the collection, filtered and sorted.
pub fn run(
    book: &PriceBook,
    query: &str,
    sort: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let option: SortOption = sort.parse()?;
    let items = book.search(query, option);

    if items.is_empty() {
        println!("(no items)");
        return Ok(());
    }

    println!("{:<36}  {:>10}  {:>10}  NAME", "ID", "PRICE", "GROSS");
    for item in &items {
        println!(
            "{:<36}  {:>10.2}  {:>10.2}  {}",
            item.id, item.price, item.gross_price, item.name
        );
    }
    println!("{} item(s)", items.len());
    Ok(())
}
