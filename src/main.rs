use std::env;
use std::fmt::Display;
use std::path::Path;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use dotenvy::dotenv;

use clinic_client::domain::kardex::{KardexFilters, KardexMovementType};
use clinic_client::domain::product::ProductFilters;
use clinic_client::domain::types::{CategoryId, ProductId};
use clinic_client::models::config::ClientConfig;
use clinic_client::pagination::{PaginationController, PaginationOptions, PaginationState};
use clinic_client::services::{kardex, patient, product};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    debug: bool,
}

#[derive(clap::Args)]
struct PageArgs {
    /// Page to show (1-based)
    #[arg(short, long, default_value_t = 1)]
    page: u32,

    /// Items per page (defaults to the configured page size)
    #[arg(short, long)]
    limit: Option<u32>,

    /// Free text search
    #[arg(short, long)]
    search: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum MovementArg {
    Entry,
    Exit,
}

impl From<MovementArg> for KardexMovementType {
    fn from(arg: MovementArg) -> Self {
        match arg {
            MovementArg::Entry => KardexMovementType::Entry,
            MovementArg::Exit => KardexMovementType::Exit,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List patients
    Patients {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Show a patient with its statistics
    Patient { id: i64 },
    /// List products
    Products {
        #[command(flatten)]
        page: PageArgs,

        #[arg(long)]
        category_id: Option<i64>,
    },
    /// List inventory movements
    #[command(visible_alias = "k")]
    Kardex {
        #[command(flatten)]
        page: PageArgs,

        #[arg(long)]
        product_id: Option<i64>,

        #[arg(long = "type", value_enum)]
        movement_type: Option<MovementArg>,

        /// First day to include (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Last day to include (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
    },
}

fn controller<T>(args: &PageArgs, config: &ClientConfig) -> PaginationController<T> {
    let controller = PaginationController::new(PaginationOptions {
        initial_page_size: Some(args.limit.unwrap_or(config.page_size)),
        ..PaginationOptions::default()
    });
    if let Some(search) = &args.search {
        controller.set_search_term(search.as_str());
    }
    controller
}

/// Moves to the requested page once the first load has reported how many
/// pages exist. Returns whether another load is needed.
fn seek<T>(controller: &PaginationController<T>, page: u32) -> bool {
    if page <= 1 || controller.error().is_some() {
        return false;
    }
    controller.go_to_page(i64::from(page));
    controller.current_page() > 1
}

/// Prints the loaded rows and pager, or reports the load error.
fn render<T>(state: PaginationState<T>, row: impl Fn(&T) -> String) -> ExitCode {
    if let Some(error) = state.error {
        log::error!("{error}");
        return ExitCode::FAILURE;
    }

    for item in &state.data {
        println!("{}", row(item));
    }

    let pager: Vec<String> = state
        .page_links()
        .into_iter()
        .map(|link| match link {
            Some(page) if page == state.current_page => format!("[{page}]"),
            Some(page) => page.to_string(),
            None => "...".to_string(),
        })
        .collect();
    println!(
        "Page {} of {} ({} items)  {}",
        state.current_page,
        state.total_pages.max(1),
        state.total_items,
        pager.join(" ")
    );
    ExitCode::SUCCESS
}

fn fail(context: &str, err: impl Display) -> ExitCode {
    log::error!("{context}: {err}");
    ExitCode::FAILURE
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok(); // Load .env file
    let cli = Cli::parse();
    env_logger::init_from_env(
        env_logger::Env::default().default_filter_or(if cli.debug { "debug" } else { "info" }),
    );

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let config = match ClientConfig::load(Path::new("config"), &app_env) {
        Ok(config) => config,
        Err(err) => return fail("Error loading client config", err),
    };

    let repo = match clinic_client::connect(&config) {
        Ok(repo) => repo,
        Err(err) => return fail("Error creating HTTP client", err),
    };

    match cli.command {
        Commands::Patients { page } => {
            let controller = controller(&page, &config);
            patient::load_patients(&repo, &controller).await;
            if seek(&controller, page.page) {
                patient::load_patients(&repo, &controller).await;
            }
            render(controller.state(), |p| {
                format!("{:>6}  {:<32} {:>10.2}", p.id.get(), p.full_name(), p.balance)
            })
        }
        Commands::Patient { id } => match patient::load_patient_page(&repo, id).await {
            Ok(data) => {
                let stats = &data.statistics;
                println!("{} (#{})", data.patient.full_name(), data.patient.id);
                println!("Balance:      {:.2}", data.patient.balance);
                println!("Appointments: {}", stats.total_appointments);
                println!("Sales:        {} ({:.2})", stats.total_sales, stats.total_spent);
                if let Some(last_visit) = stats.last_visit {
                    println!("Last visit:   {}", last_visit.format("%Y-%m-%d"));
                }
                ExitCode::SUCCESS
            }
            Err(err) => fail("Error loading patient", err),
        },
        Commands::Products { page, category_id } => {
            let category_id = match category_id.map(CategoryId::new).transpose() {
                Ok(category_id) => category_id,
                Err(err) => return fail("Invalid category id", err),
            };
            let controller = controller(&page, &config);
            product::filter_products(&repo, &controller, ProductFilters { category_id }).await;
            if seek(&controller, page.page) {
                product::load_products(&repo, &controller).await;
            }
            render(controller.state(), |p| {
                format!("{:>6}  {:<32} {:>10.2} {:>6}", p.id.get(), p.name, p.price, p.stock)
            })
        }
        Commands::Kardex {
            page,
            product_id,
            movement_type,
            from,
            to,
        } => {
            let product_id = match product_id.map(ProductId::new).transpose() {
                Ok(product_id) => product_id,
                Err(err) => return fail("Invalid product id", err),
            };
            let filters = KardexFilters {
                product_id,
                movement_type: movement_type.map(Into::into),
                start_date: from,
                end_date: to,
            };
            let controller = controller(&page, &config);
            if let Err(err) = kardex::filter_kardex_movements(&repo, &controller, filters).await {
                return fail("Invalid filters", err);
            }
            if seek(&controller, page.page) {
                kardex::load_kardex_movements(&repo, &controller).await;
            }
            render(controller.state(), |m| {
                format!(
                    "{:>6}  product {:<6} {:<5} {:>6}",
                    m.id.get(),
                    m.product_id.get(),
                    m.movement_type.as_str(),
                    m.quantity
                )
            })
        }
    }
}
