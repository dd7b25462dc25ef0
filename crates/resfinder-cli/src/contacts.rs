//! `contacts` subcommands.

use clap::Subcommand;
use resfinder_core::AppConfig;
use resfinder_store::{ContactStore, JsonFileStore};

#[derive(Debug, Subcommand)]
pub enum ContactsCommands {
    /// List saved emergency contacts
    List,
    /// Save a new emergency contact
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
    },
}

pub fn run_contacts(config: &AppConfig, command: ContactsCommands) -> anyhow::Result<()> {
    let mut store = ContactStore::open(JsonFileStore::open(config.store_path()));
    match command {
        ContactsCommands::List => {
            for contact in store.list() {
                println!("{:<24} {:<16} (id {})", contact.name, contact.phone, contact.id);
            }
        }
        ContactsCommands::Add { name, phone } => {
            let contact = store.add(&name, &phone)?;
            println!("Saved {} ({})", contact.name, contact.phone);
        }
    }
    Ok(())
}
