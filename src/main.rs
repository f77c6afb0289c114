//! Storefront command line

use std::io::{self, Write};

use anyhow::{Context, Result};
use storefront::{
    catalog::CategoryFilter,
    fixtures::Fixture,
    inventory::InventoryCart,
    products::ProductId,
    report,
    session::{Script, Session},
};
use tracing::info;

use crate::config::{Command, Config};

mod config;
mod observability;

/// Storefront entry point
pub fn main() -> Result<()> {
    let config = Config::load().unwrap_or_else(|err| err.exit());

    observability::init_subscriber(&config.logging)?;

    let inventory = load_inventory(&config)?;

    info!(
        products = inventory.products().len(),
        currency = inventory.currency().iso_alpha_code,
        "store ready"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &config.command {
        Command::List { category } => {
            let filter = CategoryFilter::new(category.as_str());

            report::write_overview(&mut out, &inventory)?;
            report::write_product_grid(&mut out, &inventory, &filter)?;
            report::write_summary(&mut out, &inventory.summary()?, inventory.currency())?;
        }
        Command::Show { id } => {
            let product_id = ProductId::new(*id);
            let product = inventory
                .product(product_id)
                .with_context(|| format!("product {product_id} not found"))?;

            report::write_product_detail(&mut out, product, inventory.currency())?;
        }
        Command::Categories => {
            report::write_categories(&mut out, &inventory.categories(), &CategoryFilter::All)?;
        }
        Command::Run { script } => {
            let script = Script::load(script)
                .with_context(|| format!("loading session script {}", script.display()))?;

            let mut session = Session::new(inventory);
            let notices = session.run(&script);

            report::write_notices(&mut out, &notices)?;
            report::write_product_grid(&mut out, session.inventory(), session.filter())?;
            report::write_cart(&mut out, session.inventory())?;
            report::write_summary(
                &mut out,
                &session.inventory().summary()?,
                session.inventory().currency(),
            )?;
        }
    }

    out.flush()?;

    Ok(())
}

fn load_inventory(config: &Config) -> Result<InventoryCart> {
    let fixture = match &config.fixture {
        Some(path) => {
            let mut fixture = Fixture::new();

            fixture
                .load_products_file(path)
                .with_context(|| format!("loading products from {}", path.display()))?;

            fixture
        }
        None => Fixture::sample()?,
    };

    Ok(fixture.inventory()?)
}
