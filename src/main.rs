// Interactive front-desk shell: parses menu input, calls into the engine,
// renders the results. Every pricing and occupancy rule lives in the
// library; this loop only reads, dispatches, and prints.

use std::io::{self, BufRead, StdinLock, Write};
use std::sync::Arc;

use anyhow::Context;
use hotel_desk::{
    Booking, ClientLedger, GroupBookingCoordinator, RoomInventory, RoomListing, ServiceCatalog,
};
use tracing_subscriber::EnvFilter;

// Room re-prompts per group slot before the slot is skipped.
const MAX_ROOM_ATTEMPTS: u32 = 3;

type Input = io::Lines<StdinLock<'static>>;

enum MenuChoice {
    ListAvailable,
    BookRoom,
    GroupBooking,
    ReleaseRoom,
    Quit,
}

impl MenuChoice {
    // Anything else is an invalid choice and re-prompts.
    fn parse(input: &str) -> Option<MenuChoice> {
        match input.trim() {
            "1" => Some(MenuChoice::ListAvailable),
            "2" => Some(MenuChoice::BookRoom),
            "3" => Some(MenuChoice::GroupBooking),
            "4" => Some(MenuChoice::ReleaseRoom),
            "0" => Some(MenuChoice::Quit),
            _ => None,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let inventory =
        RoomInventory::load_sample_rooms().context("failed to load the room catalog")?;
    let ledger = Arc::new(ClientLedger::new());
    let catalog = ServiceCatalog::new();

    let mut input = io::stdin().lock().lines();

    loop {
        println!("Current occupancy: {:.2}%", inventory.occupancy_rate());
        println!("Menu:");
        println!("1. List available rooms");
        println!("2. Book a room");
        println!("3. Group booking");
        println!("4. Release a room");
        println!("0. Quit");

        let Some(choice) = prompt(&mut input, "Your choice: ")? else {
            break;
        };
        match MenuChoice::parse(&choice) {
            Some(MenuChoice::ListAvailable) => list_available(&inventory),
            Some(MenuChoice::BookRoom) => book_room(&mut input, &inventory, &ledger, &catalog)?,
            Some(MenuChoice::GroupBooking) => {
                group_booking(&mut input, &inventory, &ledger, &catalog)?
            }
            Some(MenuChoice::ReleaseRoom) => release_room(&mut input, &inventory)?,
            Some(MenuChoice::Quit) => break,
            None => println!("Invalid choice. Try again."),
        }
        println!();
    }

    Ok(())
}

// Reads one line after a prompt; None means end of input.
fn prompt(input: &mut Input, message: &str) -> anyhow::Result<Option<String>> {
    print!("{message}");
    io::stdout().flush()?;
    match input.next() {
        Some(line) => Ok(Some(line?)),
        None => Ok(None),
    }
}

fn print_rooms(rooms: &[RoomListing]) {
    for room in rooms {
        println!(
            "Room: {} Type: {} Rate: {:.2}/night",
            room.id, room.class, room.rate
        );
    }
}

fn list_available(inventory: &RoomInventory) {
    println!("Available rooms:");
    print_rooms(&inventory.available_rooms());
}

fn read_nights(input: &mut Input) -> anyhow::Result<Option<u32>> {
    loop {
        let Some(line) = prompt(input, "Nights: ")? else {
            return Ok(None);
        };
        match line.trim().parse::<u32>() {
            Ok(nights) if nights > 0 => return Ok(Some(nights)),
            _ => println!("Enter a positive number of nights."),
        }
    }
}

// Numbered service menu; codes come in whitespace-separated, 0 or end of
// line finishes the selection, unknown codes are reported and skipped.
fn select_services(
    input: &mut Input,
    catalog: &ServiceCatalog,
    booking: &mut Booking,
) -> anyhow::Result<()> {
    println!("Extra services (0 to finish):");
    for (code, kind, price) in catalog.menu() {
        println!("{code}. {kind} - {price:.2}");
    }

    let Some(line) = prompt(input, "Service codes: ")? else {
        return Ok(());
    };
    for token in line.split_whitespace() {
        let Ok(code) = token.parse::<u8>() else {
            println!("Not a service code: {token}");
            continue;
        };
        if code == 0 {
            break;
        }
        if let Err(err) = booking.add_service_code(catalog, code) {
            println!("{err}");
        }
    }
    Ok(())
}

fn book_room(
    input: &mut Input,
    inventory: &RoomInventory,
    ledger: &Arc<ClientLedger>,
    catalog: &ServiceCatalog,
) -> anyhow::Result<()> {
    list_available(inventory);

    let Some(room_id) = prompt(input, "Room id: ")? else {
        return Ok(());
    };
    let room_id = room_id.trim().to_string();
    if !inventory.is_available(&room_id) {
        println!("Room {room_id} is not available.");
        return Ok(());
    }
    let Some(nights) = read_nights(input)? else {
        return Ok(());
    };
    let Some(name) = prompt(input, "Client name (leave empty for anonymous): ")? else {
        return Ok(());
    };
    let client = ClientLedger::get_or_create(ledger, name.trim());

    let mut booking = match Booking::for_room(inventory, &room_id, nights, client) {
        Ok(booking) => booking,
        Err(err) => {
            println!("{err}");
            return Ok(());
        }
    };
    select_services(input, catalog, &mut booking)?;

    println!("{}", booking.summary());
    if let Err(err) = inventory.try_check_in(&room_id) {
        println!("{err}");
    }
    Ok(())
}

fn group_booking(
    input: &mut Input,
    inventory: &RoomInventory,
    ledger: &Arc<ClientLedger>,
    catalog: &ServiceCatalog,
) -> anyhow::Result<()> {
    list_available(inventory);

    let Some(line) = prompt(input, "Rooms to book: ")? else {
        return Ok(());
    };
    let Ok(count) = line.trim().parse::<u32>() else {
        println!("Enter a positive number of rooms.");
        return Ok(());
    };
    if count == 0 {
        println!("Enter a positive number of rooms.");
        return Ok(());
    }

    let mut group = GroupBookingCoordinator::new();
    'slots: for slot in 1..=count {
        // Bounded re-prompting so an unavailable room never loops forever.
        let mut attempts = 0;
        let room_id = loop {
            if attempts == MAX_ROOM_ATTEMPTS {
                println!("No available room selected; skipping booking {slot}.");
                continue 'slots;
            }
            attempts += 1;

            let Some(line) = prompt(input, &format!("Room id for booking {slot}: "))? else {
                break 'slots;
            };
            let room_id = line.trim().to_string();
            if group.is_room_free(inventory, &room_id) {
                break room_id;
            }
            println!("Room {room_id} is not available.");
        };

        let Some(nights) = read_nights(input)? else {
            break 'slots;
        };
        let Some(name) = prompt(input, "Client name (leave empty for anonymous): ")? else {
            break 'slots;
        };
        let client = ClientLedger::get_or_create(ledger, name.trim());

        match group.book_slot(inventory, &room_id, nights, client) {
            Ok(booking) => select_services(input, catalog, booking)?,
            Err(err) => println!("{err}"),
        }
    }

    if group.is_empty() {
        println!("No rooms were booked.");
        return Ok(());
    }

    let receipt = group.finalize(inventory);
    println!("Group total: {:.2}", receipt.total);
    for summary in &receipt.summaries {
        println!("{summary}");
        println!();
    }
    Ok(())
}

fn release_room(input: &mut Input, inventory: &RoomInventory) -> anyhow::Result<()> {
    let occupied = match inventory.occupied_rooms() {
        Ok(rooms) => rooms,
        Err(err) => {
            // Nothing to release.
            println!("{err}");
            return Ok(());
        }
    };
    println!("Occupied rooms:");
    print_rooms(&occupied);

    let Some(room_id) = prompt(input, "Room id to release: ")? else {
        return Ok(());
    };
    let room_id = room_id.trim();
    match inventory.try_check_out(room_id) {
        Ok(()) => println!("Room {room_id} released."),
        Err(err) => println!("{err}"),
    }
    Ok(())
}
