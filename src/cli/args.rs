use clap::{Parser, Subcommand};

use crate::models::cart::LineItem;

#[derive(Parser)]
#[command(name = "checkout-login")]
#[command(about = "Shopping-cart checkout and login flow demos")]
#[command(version = "0.1.0")]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check out a cart of items
    Checkout {
        /// Line item as NAME:PRICE:QTY (repeatable)
        #[arg(short, long = "item", value_name = "NAME:PRICE:QTY", required = true)]
        items: Vec<LineItem>,
        /// Percentage discount (0-100); falls back to DISCOUNT_PERCENT
        #[arg(short, long)]
        discount: Option<f64>,
        /// Print the payment receipt as JSON
        #[arg(long)]
        json: bool,
    },
    /// Log in against the configured demo user
    Login {
        /// Username (prompted when omitted)
        #[arg(short, long)]
        username: Option<String>,
        /// Password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Run the fruit-basket checkout and a demo login
    Demo,
}
