use crate::{config::Config, gateways};
use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use doorstep_core::{
    entities::*,
    gateways::postal::PostalCodeLookup,
    usecases::{
        autofill_from_postal_code, AddressBookManager, LocateOutcome, SaveOutcome, SyncMode,
    },
};
use doorstep_gateways::postal_codes::SamplePostalCodes;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;

#[derive(Parser)]
#[command(version, about = "Resolve, save and select delivery addresses", long_about = None)]
pub struct Args {
    /// Configuration file
    #[arg(long, short, env = "DOORSTEP_CONFIG")]
    config: Option<PathBuf>,

    /// Bearer token of the account
    #[arg(long, env = "DOORSTEP_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Use the current position as delivery address
    Locate {
        /// Latitude in decimal degrees
        #[arg(long, requires = "lng", allow_negative_numbers = true)]
        lat: Option<f64>,
        /// Longitude in decimal degrees
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lng: Option<f64>,
    },
    /// Save a manually entered address
    Save {
        /// home, work, other or current
        slot: SlotType,
        #[arg(long)]
        line: String,
        #[arg(long, default_value = "")]
        city: String,
        #[arg(long, default_value = "")]
        state: String,
        #[arg(long)]
        postal_code: String,
        #[arg(long)]
        landmark: Option<String>,
        /// Complete city and state from the postal code
        #[arg(long)]
        autofill: bool,
    },
    /// Select the address for the next request
    Select { slot: SlotType },
    /// Show all addresses
    Show,
    /// Look up the city and state of a postal code
    Lookup { postal_code: String },
}

pub async fn run(args: Args) -> Result<()> {
    let Args {
        config,
        token,
        command,
    } = args;
    let session = token
        .filter(|t| !t.trim().is_empty())
        .map(|t| Session::authenticated(BearerToken::new(t)))
        .unwrap_or_default();
    let config = config.as_deref();

    match command {
        Command::Lookup { postal_code } => {
            let Some(area) = SamplePostalCodes.lookup(&postal_code) else {
                bail!("Unknown postal code '{postal_code}'");
            };
            println!("{postal_code}: {}, {}", area.city, area.state);
        }
        Command::Locate { lat, lng } => {
            let position = match (lat, lng) {
                (Some(lat), Some(lng)) => Some(Coordinate::try_new(lat, lng)?),
                _ => None,
            };
            let mut manager = load_address_book(config, session, position).await?;
            let cancel = CancellationToken::new();
            tokio::spawn(cancel_on_ctrl_c(cancel.clone()));
            match manager.use_current_location(&cancel).await? {
                LocateOutcome::Located(slot) => {
                    println!("Delivering to your current location: {}", slot.formatted_address);
                }
                LocateOutcome::Abandoned => println!("Cancelled"),
            }
        }
        Command::Save {
            slot,
            line,
            city,
            state,
            postal_code,
            landmark,
            autofill,
        } => {
            let mut addr = StructuredAddress {
                address_line: line,
                city,
                state,
                postal_code,
                landmark,
            };
            if autofill {
                addr = autofill_from_postal_code(&SamplePostalCodes, addr);
            }
            let mut manager = load_address_book(config, session, None).await?;
            match manager.save_slot(slot, addr).await? {
                SaveOutcome::Synced => println!("Saved the {slot} address in your account"),
                SaveOutcome::SessionOnly => println!("Saved the {slot} address for this session"),
                SaveOutcome::LocalOnly => println!(
                    "Saved the {slot} address on this device only: it will be lost on restart"
                ),
            }
        }
        Command::Select { slot } => {
            let mut manager = load_address_book(config, session, None).await?;
            manager.select_active(slot)?;
            print_active(&manager);
        }
        Command::Show => {
            let manager = load_address_book(config, session, None).await?;
            print_book(&manager);
        }
    }
    Ok(())
}

async fn load_address_book(
    config: Option<&Path>,
    session: Session,
    position: Option<Coordinate>,
) -> Result<AddressBookManager> {
    let cfg = Config::try_load_from_file_or_default(config)?;
    let mut manager = gateways::address_book_manager(&cfg, session, position)?;
    let outcome = manager.load().await?;
    log::debug!("{outcome:?}");
    Ok(manager)
}

async fn cancel_on_ctrl_c(cancel: CancellationToken) {
    if tokio::signal::ctrl_c().await.is_ok() {
        log::info!("Abandoning the pending request");
        cancel.cancel();
    }
}

fn print_active(manager: &AddressBookManager) {
    match manager.active() {
        Some(slot) => println!("Delivering to {}: {}", slot.slot_type, slot.formatted_address),
        None => println!("No address selected: set a location before proceeding"),
    }
}

fn print_book(manager: &AddressBookManager) {
    let active = manager.book().active_slot_type();
    for slot in manager.book().slots() {
        let marker = if Some(slot.slot_type) == active { '*' } else { ' ' };
        println!("{marker} {:<8} {}", slot.slot_type, slot.formatted_address);
    }
    if manager.sync_mode() == SyncMode::LocalOnly {
        println!("(not signed in: saved addresses are kept on this device only)");
    }
    print_active(manager);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Args::command().debug_assert();
    }

    #[test]
    fn parse_save_command() {
        let args = Args::try_parse_from([
            "doorstep",
            "save",
            "home",
            "--line",
            "221B Janpath",
            "--postal-code",
            "110001",
            "--autofill",
        ])
        .unwrap();
        let Command::Save {
            slot,
            city,
            autofill,
            ..
        } = args.command
        else {
            panic!("unexpected command");
        };
        assert_eq!(SlotType::Home, slot);
        assert!(city.is_empty());
        assert!(autofill);
    }

    #[test]
    fn reject_unknown_slot() {
        assert!(Args::try_parse_from(["doorstep", "select", "office"]).is_err());
    }

    #[test]
    fn locate_requires_both_coordinates() {
        assert!(Args::try_parse_from(["doorstep", "locate", "--lat", "12.9"]).is_err());
        assert!(
            Args::try_parse_from(["doorstep", "locate", "--lat", "-12.9", "--lng", "77.5"]).is_ok()
        );
    }
}
