use std::error::Error;
use std::path::Path;
use std::process::exit;
use std::sync::{Arc, Mutex};

use clap::Parser;
use rusqlite::Connection;

use cashcard::{
    CashCardStore, PageRequest, PasswordHash, SQLiteCashCardStore, SortDirection, SortField,
    SortOrder, initialize_db, seed_demo_data,
};

/// A utility for creating a test database for the cash card API server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

const PRINT_PAGE_SIZE: u64 = 100;

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating demo users and cash cards...");
    seed_demo_data(&conn, PasswordHash::DEFAULT_COST)?;

    let store = SQLiteCashCardStore::new(Arc::new(Mutex::new(conn)));
    print_cash_cards(&store)?;

    println!("Success!");

    Ok(())
}

fn print_cash_cards(store: &impl CashCardStore) -> Result<(), cashcard::Error> {
    let mut page = PageRequest {
        page: 0,
        size: PRINT_PAGE_SIZE,
        sort: SortOrder {
            field: SortField::Id,
            direction: SortDirection::Ascending,
        },
    };

    loop {
        let cash_cards = store.list_page(&page)?;

        for cash_card in &cash_cards {
            println!(
                "  #{} {:>10.2} owned by {}",
                cash_card.id, cash_card.amount, cash_card.owner
            );
        }

        if (cash_cards.len() as u64) < page.size {
            return Ok(());
        }

        page.page += 1;
    }
}
