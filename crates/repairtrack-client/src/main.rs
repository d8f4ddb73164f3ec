use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use repairtrack_client::notify::ConsoleSink;
use repairtrack_client::views::{self, TableView};
use repairtrack_client::{App, AppError, ClientConfig, ImageFile, OrderForm, ProviderForm};
use serde::Serialize;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "repairtrack")]
#[command(about = "Track equipment sent out to repair providers", long_about = None)]
#[command(version)]
struct Cli {
    /// Only show orders whose number, client, or provider contains TEXT
    #[arg(long, short = 's', global = true, value_name = "TEXT")]
    search: Option<String>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Status summary of active orders
    #[command(alias = "d")]
    Dashboard,

    /// Active orders grouped by status
    #[command(alias = "k")]
    Kanban,

    /// Manage service orders
    #[command(subcommand, alias = "o")]
    Orders(OrdersCommand),

    /// Manage service providers
    #[command(subcommand, alias = "p")]
    Providers(ProvidersCommand),

    /// Attach or remove order photos
    #[command(subcommand)]
    Images(ImagesCommand),
}

#[derive(Subcommand)]
enum OrdersCommand {
    /// List active (or archived) orders
    List {
        #[arg(long)]
        archived: bool,
    },

    /// Create an order
    Add(OrderArgs),

    /// Edit an order, by id or order number
    Edit {
        order: String,

        #[command(flatten)]
        fields: OrderArgs,

        /// Date the equipment actually came back
        #[arg(long, value_name = "DATE")]
        actual_return: Option<NaiveDate>,
    },

    /// Archive an active order, or restore an archived one
    Archive { order: String },

    /// Delete an order permanently
    Delete { order: String },
}

#[derive(Args)]
struct OrderArgs {
    /// Service order number
    #[arg(long, short = 'n')]
    number: Option<String>,

    #[arg(long, short = 'c')]
    client: Option<String>,

    /// Provider id or name
    #[arg(long, short = 'p')]
    provider: Option<String>,

    /// Departure date (YYYY-MM-DD, default today)
    #[arg(long, value_name = "DATE")]
    departure: Option<NaiveDate>,

    /// Estimated duration in days
    #[arg(long, value_name = "DAYS")]
    duration: Option<String>,

    /// Expected return date (YYYY-MM-DD)
    #[arg(long = "return", value_name = "DATE")]
    expected_return: Option<NaiveDate>,

    #[arg(long)]
    description: Option<String>,

    #[arg(long)]
    notes: Option<String>,
}

#[derive(Subcommand)]
enum ProvidersCommand {
    List,

    /// Register a provider
    Add {
        name: String,

        #[command(flatten)]
        details: ProviderDetails,
    },

    /// Edit a provider, by id or name
    Edit {
        provider: String,

        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        details: ProviderDetails,
    },

    /// Delete a provider that no order references
    Delete { provider: String },
}

#[derive(Args)]
struct ProviderDetails {
    #[arg(long)]
    contact: Option<String>,

    #[arg(long)]
    phone: Option<String>,

    #[arg(long)]
    email: Option<String>,

    #[arg(long)]
    address: Option<String>,
}

#[derive(Subcommand)]
enum ImagesCommand {
    /// Upload photos and attach them to an order
    Add {
        order: String,

        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Detach the photo at INDEX (0-based) from an order
    Remove { order: String, index: usize },
}

#[tokio::main]
async fn main() -> ExitCode {
    repairtrack_client::init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Lifecycle failures have already been shown by the console sink.
            if e.downcast_ref::<AppError>().is_none() {
                eprintln!("error: {e:#}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = ClientConfig::from_env();
    tracing::debug!(
        db = %config.db_path.display(),
        images = %config.image_dir.display(),
        "Loaded configuration"
    );

    let backend = Arc::new(
        config
            .open_backend()
            .await
            .with_context(|| format!("failed to open {}", config.db_path.display()))?,
    );
    let mut app = App::new(backend.clone(), backend, Arc::new(ConsoleSink))
        .with_max_image_size(config.max_image_size);
    app.refresh().await?;

    let out = Output { json: cli.json };
    let search = cli.search.as_deref();

    match cli.command {
        Commands::Dashboard => {
            let orders = views::filter_orders(app.store().orders(), search);
            out.show(&views::dashboard(orders, app.now()))
        }
        Commands::Kanban => {
            let orders = views::filter_orders(app.store().orders(), search);
            out.show(&views::kanban(orders))
        }
        Commands::Orders(cmd) => orders(&mut app, cmd, search, out).await,
        Commands::Providers(cmd) => providers(&mut app, cmd, out).await,
        Commands::Images(cmd) => images(&mut app, cmd).await,
    }
}

async fn orders(app: &mut App, cmd: OrdersCommand, search: Option<&str>, out: Output) -> Result<()> {
    match cmd {
        OrdersCommand::List { archived } => {
            let view = if archived {
                TableView::Archived
            } else {
                TableView::Active
            };
            let orders = views::filter_orders(app.store().orders(), search);
            out.show(&views::table(orders, view))
        }
        OrdersCommand::Add(fields) => {
            let mut form = OrderForm::new(app.today());
            fields.fill(app, &mut form)?;
            let order = app.submit_order_form(&form).await?;
            println!("{}", order.id);
            Ok(())
        }
        OrdersCommand::Edit {
            order,
            fields,
            actual_return,
        } => {
            let id = find_order(app, &order)?;
            let current = app
                .store()
                .order(id)
                .with_context(|| format!("no service order {id}"))?;
            let mut form = OrderForm::edit(current);
            fields.fill(app, &mut form)?;
            if actual_return.is_some() {
                form.set_actual_return(actual_return)?;
            }
            app.submit_order_form(&form).await?;
            Ok(())
        }
        OrdersCommand::Archive { order } => {
            let id = find_order(app, &order)?;
            app.archive_toggle(id).await?;
            Ok(())
        }
        OrdersCommand::Delete { order } => {
            let id = find_order(app, &order)?;
            app.delete_service_order(id).await?;
            Ok(())
        }
    }
}

async fn providers(app: &mut App, cmd: ProvidersCommand, out: Output) -> Result<()> {
    match cmd {
        ProvidersCommand::List => {
            if out.json {
                println!("{}", serde_json::to_string_pretty(app.store().providers())?);
                return Ok(());
            }
            println!("{:<24} {:<20} {:<16} {:<28} {}", "NAME", "CONTACT", "PHONE", "EMAIL", "ORDERS");
            for p in app.store().providers() {
                println!(
                    "{:<24} {:<20} {:<16} {:<28} {}",
                    p.name,
                    p.contact.as_deref().unwrap_or("-"),
                    p.phone.as_deref().unwrap_or("-"),
                    p.email.as_deref().unwrap_or("-"),
                    app.store().orders_for_provider(p.id).count()
                );
            }
            Ok(())
        }
        ProvidersCommand::Add { name, details } => {
            let mut form = ProviderForm::new();
            form.set_name(name);
            details.fill(&mut form);
            let provider = app.submit_provider_form(&form).await?;
            println!("{}", provider.id);
            Ok(())
        }
        ProvidersCommand::Edit {
            provider,
            name,
            details,
        } => {
            let id = find_provider(app, &provider)?;
            let current = app
                .store()
                .provider(id)
                .with_context(|| format!("no service provider {id}"))?;
            let mut form = ProviderForm::edit(current);
            if let Some(name) = name {
                form.set_name(name);
            }
            details.fill(&mut form);
            app.submit_provider_form(&form).await?;
            Ok(())
        }
        ProvidersCommand::Delete { provider } => {
            let id = find_provider(app, &provider)?;
            if let Err(e) = app.delete_service_provider(id).await {
                if let AppError::HasDependents { orders, .. } = &e {
                    eprintln!("Still referenced by:");
                    for o in orders {
                        let state = if o.archived { " (archived)" } else { "" };
                        eprintln!("  {}  {}{state}", o.service_order_number, o.client_name);
                    }
                }
                return Err(e.into());
            }
            Ok(())
        }
    }
}

async fn images(app: &mut App, cmd: ImagesCommand) -> Result<()> {
    match cmd {
        ImagesCommand::Add { order, files } => {
            let id = find_order(app, &order)?;
            let mut picked = Vec::with_capacity(files.len());
            for path in &files {
                let file = ImageFile::read(path)
                    .await
                    .with_context(|| format!("failed to read {}", path.display()))?;
                picked.push(file);
            }
            let order = app.attach_images(id, picked).await?;
            for (i, uri) in order.images.iter().enumerate() {
                println!("{i}: {uri}");
            }
            Ok(())
        }
        ImagesCommand::Remove { order, index } => {
            let id = find_order(app, &order)?;
            app.remove_image(id, index).await?;
            Ok(())
        }
    }
}

impl OrderArgs {
    fn fill(self, app: &App, form: &mut OrderForm) -> Result<()> {
        if let Some(number) = self.number {
            form.set_service_order_number(number);
        }
        if let Some(client) = self.client {
            form.set_client_name(client);
        }
        if let Some(provider) = self.provider {
            form.set_provider(find_provider(app, &provider)?);
        }
        if let Some(departure) = self.departure {
            form.set_departure(departure)?;
        }
        if let Some(duration) = self.duration {
            form.set_duration_input(&duration)?;
        }
        if let Some(date) = self.expected_return {
            form.set_expected_return(date)?;
        }
        if self.description.is_some() {
            form.set_description(self.description);
        }
        if self.notes.is_some() {
            form.set_notes(self.notes);
        }
        Ok(())
    }
}

impl ProviderDetails {
    fn fill(self, form: &mut ProviderForm) {
        if self.contact.is_some() {
            form.set_contact(self.contact);
        }
        if self.phone.is_some() {
            form.set_phone(self.phone);
        }
        if self.email.is_some() {
            form.set_email(self.email);
        }
        if self.address.is_some() {
            form.set_address(self.address);
        }
    }
}

/// Resolve an order by id or exact order number.
fn find_order(app: &App, key: &str) -> Result<Uuid> {
    if let Ok(id) = key.parse::<Uuid>() {
        return Ok(id);
    }
    let hits: Vec<_> = app
        .store()
        .orders()
        .iter()
        .filter(|o| o.service_order_number == key)
        .collect();
    match hits.as_slice() {
        [one] => Ok(one.id),
        [] => bail!("no service order numbered {key}"),
        _ => bail!("{} orders are numbered {key}, use the id instead", hits.len()),
    }
}

/// Resolve a provider by id or case-insensitive name.
fn find_provider(app: &App, key: &str) -> Result<Uuid> {
    if let Ok(id) = key.parse::<Uuid>() {
        return Ok(id);
    }
    let hits: Vec<_> = app
        .store()
        .providers()
        .iter()
        .filter(|p| p.name.eq_ignore_ascii_case(key.trim()))
        .collect();
    match hits.as_slice() {
        [one] => Ok(one.id),
        [] => bail!("no service provider named {key}"),
        _ => bail!("{} providers are named {key}, use the id instead", hits.len()),
    }
}

#[derive(Clone, Copy)]
struct Output {
    json: bool,
}

impl Output {
    fn show<T: Serialize + std::fmt::Display>(self, value: &T) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            print!("{value}");
        }
        Ok(())
    }
}
