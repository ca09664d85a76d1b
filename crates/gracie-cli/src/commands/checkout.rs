//! Checkout session command

use anyhow::{anyhow, Result};
use gracie_services::{
    product_by_price_id, CheckoutClient, CheckoutFlow, CredentialStore, HttpCheckoutGateway,
    StaticCredentials,
};

use super::analyze::load_config;

pub fn run(price_id: &str, token: Option<String>, config_path: Option<&str>) -> Result<()> {
    let product = product_by_price_id(price_id)
        .ok_or_else(|| anyhow!(gracie_core::GracieError::UnknownProduct(price_id.to_string())))?;
    let config = load_config(config_path)?;
    let gateway = HttpCheckoutGateway::from_config(&config)?;
    let client = CheckoutClient::new(gateway);

    let credentials: Box<dyn CredentialStore> = match token {
        Some(t) => Box::new(StaticCredentials(Some(t))),
        None => Box::new(config),
    };

    let mut flow = CheckoutFlow::new();
    println!("Starting checkout for {}...", product.name);
    match flow.purchase(&client, product, credentials.as_ref()) {
        Some(url) => {
            println!("Continue to checkout: {}", url);
            Ok(())
        }
        None => {
            let notice = flow
                .take_notices()
                .pop()
                .map(|n| n.to_string())
                .unwrap_or_else(|| "Checkout Error".to_string());
            Err(anyhow!(notice))
        }
    }
}
