//! Subscription plan listing

use anyhow::Result;
use gracie_services::PRODUCTS;

pub fn run() -> Result<()> {
    for (i, product) in PRODUCTS.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", product);
    }
    Ok(())
}
