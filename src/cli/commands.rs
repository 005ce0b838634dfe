use std::sync::Arc;
use std::time::Duration;
use anyhow::{Context, Result};
use console::{style, Emoji};
use dialoguer::{theme::ColorfulTheme, Input, Password};
use tracing::{error, info, warn};
use validator::Validate;

use crate::{
    cli::args::*,
    models::cart::{Cart, LineItem},
    presenters::LoginPresenter,
    services::{
        Checkout, ConsolePaymentSink, DiscountPolicy, InMemoryUserService,
        PercentageDiscountPolicy,
    },
    utils::{
        formatting::{format_cart_table, format_summary},
        validate_discount_percent, Config,
    },
    views::{ConsoleLoginView, LoginScreen},
};

static CROSS: Emoji<'_, '_> = Emoji("❌ ", "");
static CART: Emoji<'_, '_> = Emoji("🛒 ", "");
static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "");

pub struct CliApp {
    config: Config,
    login_screen: LoginScreen,
}

impl CliApp {
    pub fn new(config: Config) -> Result<Self> {
        let user_service = InMemoryUserService::new()
            .with_cost(config.bcrypt_cost)
            .with_latency(Duration::from_millis(config.login_latency_ms))
            .with_user(&config.demo_username, &config.demo_password)
            .context("Failed to initialize user service")?;

        let presenter = LoginPresenter::new(Arc::new(ConsoleLoginView::new()), Arc::new(user_service));

        Ok(Self {
            config,
            login_screen: LoginScreen::new(presenter),
        })
    }

    pub async fn run(&self, args: Args) -> Result<()> {
        match args.command {
            Commands::Checkout { items, discount, json } => {
                self.handle_checkout(items, discount, json)
            }
            Commands::Login { username, password } => self.handle_login(username, password).await,
            Commands::Demo => self.handle_demo().await,
        }
    }

    fn handle_checkout(&self, items: Vec<LineItem>, discount: Option<f64>, json: bool) -> Result<()> {
        for item in &items {
            if let Err(e) = item.validate() {
                println!("{} Invalid item '{}': {}", CROSS, item.name, style(&e).red());
                warn!("Rejected item {:?}: {}", item, e);
                return Err(anyhow::anyhow!("Invalid item '{}'", item.name));
            }
        }

        let percentage = discount.or(self.config.discount_percent);
        if let Some(percent) = percentage {
            if let Err(e) = validate_discount_percent(percent) {
                println!("{} Invalid discount: {}", CROSS, style(&e).red());
                warn!("Rejected discount {}: {}", percent, e);
                return Err(anyhow::anyhow!("Invalid discount {}", percent));
            }
        }

        let cart: Cart = items.into_iter().collect();
        let receipt = self.checkout(cart, percentage)?;

        if json {
            println!("{}", serde_json::to_string_pretty(&receipt.payments())?);
        }

        Ok(())
    }

    fn checkout(&self, cart: Cart, percentage: Option<f64>) -> Result<Arc<ConsolePaymentSink>> {
        println!("{} {}", CART, style("Checkout").bold().cyan());
        println!("{}", format_cart_table(cart.as_slice()));

        let sink = Arc::new(ConsolePaymentSink::new());
        let discount = percentage
            .map(|p| Arc::new(PercentageDiscountPolicy::new(p)) as Arc<dyn DiscountPolicy>);
        let checkout = Checkout::new(cart, sink.clone(), discount);

        Self::pay(&checkout, &sink)?;
        Ok(sink)
    }

    /// Runs the checkout and prints the summary from the recorded payment,
    /// so the discount policy is applied only once.
    fn pay(checkout: &Checkout, sink: &ConsolePaymentSink) -> Result<f64> {
        checkout.process().map_err(|e| {
            println!("{} Checkout failed: {}", CROSS, style(&e).red());
            error!("Checkout failed: {}", e);
            e
        })?;

        let paid = sink
            .payments()
            .last()
            .map(|payment| payment.amount)
            .context("Checkout finished without a recorded payment")?;
        print!("{}", format_summary(checkout.cart().subtotal(), paid));

        info!("Checkout completed for total: {}", paid);
        Ok(paid)
    }

    async fn handle_login(&self, username: Option<String>, password: Option<String>) -> Result<()> {
        println!("{} {}", ROCKET, style("User Login").bold().cyan());

        let theme = ColorfulTheme::default();

        let username = match username {
            Some(username) => username,
            None => Input::with_theme(&theme)
                .with_prompt("Username")
                .allow_empty(true)
                .interact_text()?,
        };

        let password = match password {
            Some(password) => password,
            None => Password::with_theme(&theme)
                .with_prompt("Password")
                .allow_empty_password(true)
                .interact()?,
        };

        self.login(&username, &password).await
    }

    async fn login(&self, username: &str, password: &str) -> Result<()> {
        match self.login_screen.login(username, password).outcome().await {
            Ok(authenticated) => {
                info!("Login for {} finished, authenticated: {}", username, authenticated);
                Ok(())
            }
            Err(e) => {
                println!("{} Login could not be completed: {}", CROSS, style(&e).red());
                error!("Login could not be completed: {}", e);
                Err(e.into())
            }
        }
    }

    async fn handle_demo(&self) -> Result<()> {
        let cart: Cart = [LineItem::new("Apple", 1.0, 3), LineItem::new("Banana", 2.0, 2)]
            .into_iter()
            .collect();
        self.checkout(cart, Some(10.0))?;

        println!();
        println!("{} {}", ROCKET, style("Demo Login").bold().cyan());
        let username = self.config.demo_username.clone();
        let password = self.config.demo_password.clone();
        self.login(&username, &password).await
    }
}
