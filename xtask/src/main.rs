// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask - Developer Utilities
//!
//! Workspace automation for local development. Currently this provides a
//! single command:
//!
//! - `cargo xtask seed` — populates a database file with demo marketplace
//!   data: one tutor and one student account, a weekly availability, the
//!   generated slots for the next Monday-anchored week, and one booked
//!   lesson.
//!
//! Seeding goes through the same operations the HTTP server exposes, so a
//! seeded database is indistinguishable from one built up through the API.
//! Running `seed` against an already-seeded database reuses the existing
//! accounts and skips days that already have slots.

#![deny(
    clippy::pedantic,
    //clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use chrono::{Datelike, Days, Local, NaiveDate};
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{
    eyre::{Context, OptionExt},
    Result,
};
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;
use tutoria_api::{
    book_slots, create_availability, generate_week, list_slots, list_subjects, login, register,
    ApiError, AuthenticatedUser, BookLessonsRequest, CreateAvailabilityRequest,
    GenerateWeekRequest, LoginRequest, RegisterRequest, Role, TimeBlockInfo,
};
use tutoria_persistence::Persistence;

/// Password for every seeded demo account.
const DEMO_PASSWORD: &str = "Demo-pass1234";

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask")]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<()> {
        self.command.run()
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Seed a database file with demo marketplace data
    #[command(visible_alias = "s")]
    Seed {
        /// Path to the `SQLite` database file to seed
        #[arg(short, long, default_value = "tutoria.db")]
        database: String,

        /// Monday anchor date (YYYY-MM-DD) for the generated week.
        /// Defaults to the next Monday.
        #[arg(short, long)]
        monday: Option<String>,

        /// How many consecutive weeks to generate
        #[arg(short, long, default_value_t = 1)]
        weeks: u8,
    },
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::Seed {
                database,
                monday,
                weeks,
            } => seed(&database, monday.as_deref(), weeks),
        }
    }
}

/// Seed demo data through the public operations.
fn seed(database: &str, monday: Option<&str>, weeks: u8) -> Result<()> {
    let mut persistence =
        Persistence::new_with_file(database).wrap_err("failed to open database")?;
    info!("Seeding {database}");

    let tutor = ensure_account(
        &mut persistence,
        "ana.tutor@tutoria.test",
        "Ana",
        "Suarez",
        Role::Tutor,
    )?;
    let student = ensure_account(
        &mut persistence,
        "leo.student@tutoria.test",
        "Leo",
        "Fernandez",
        Role::Student,
    )?;

    // Monday, Wednesday, and Friday mornings
    let pattern = CreateAvailabilityRequest {
        weekdays: vec![1, 3, 5],
        time_blocks: vec![
            TimeBlockInfo {
                start: String::from("09:00"),
                end: String::from("10:00"),
            },
            TimeBlockInfo {
                start: String::from("10:00"),
                end: String::from("11:00"),
            },
        ],
    };
    let created = create_availability(&mut persistence, &pattern, &tutor)?;
    let availability_id = created.availability.availability_id;
    info!("Created availability {availability_id}");

    let anchor: NaiveDate = match monday {
        Some(date) => NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .wrap_err("monday must be a YYYY-MM-DD date")?,
        None => next_monday(),
    };
    let monday_dates: Vec<String> = (0..weeks)
        .map(|week| {
            (anchor + Days::new(7 * u64::from(week)))
                .format("%Y-%m-%d")
                .to_string()
        })
        .collect();

    let generated = generate_week(
        &mut persistence,
        &GenerateWeekRequest {
            availability_id,
            monday_dates,
        },
        &tutor,
    )?;
    info!(
        "Generated {} slots from {anchor} ({} days already had slots)",
        generated.created,
        generated.skipped_days.len()
    );

    let subjects = list_subjects(&mut persistence)?;
    let subject = subjects
        .subjects
        .first()
        .ok_or_eyre("no subjects in the database")?;

    let open = list_slots(&mut persistence, Some(tutor.id), Some("AVAILABLE"))?;
    if let Some(slot) = open.slots.first() {
        let booking = book_slots(
            &mut persistence,
            &BookLessonsRequest {
                slot_ids: vec![slot.class_slot_id],
                subject_id: subject.subject_id,
                modality: String::from("ONLINE"),
                tutor_id: None,
            },
            &student,
        )?;
        info!(
            "Booked {} demo lesson(s) in {} on {}",
            booking.booked, subject.name, slot.slot_date
        );
    }

    info!("Demo accounts use password '{DEMO_PASSWORD}'");
    Ok(())
}

/// Register an account, or recover it via login if it already exists.
fn ensure_account(
    persistence: &mut Persistence,
    email: &str,
    first_name: &str,
    last_name: &str,
    role: Role,
) -> Result<AuthenticatedUser> {
    let request = RegisterRequest {
        email: String::from(email),
        password: String::from(DEMO_PASSWORD),
        first_name: String::from(first_name),
        last_name: String::from(last_name),
        role: String::from(role.as_str()),
    };
    match register(persistence, request) {
        Ok(response) => {
            info!("Registered {} ({})", response.user.email, response.user.role);
            Ok(AuthenticatedUser::new(response.user.user_id, role))
        }
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "unique_email" => {
            let response = login(
                persistence,
                &LoginRequest {
                    email: String::from(email),
                    password: String::from(DEMO_PASSWORD),
                },
            )?;
            info!("Account {} already present", response.user.email);
            Ok(AuthenticatedUser::new(response.user.user_id, role))
        }
        Err(err) => Err(err.into()),
    }
}

/// The next Monday strictly after today.
fn next_monday() -> NaiveDate {
    let today: NaiveDate = Local::now().date_naive();
    let days_ahead: u64 = u64::from(7 - today.weekday().num_days_from_monday());
    today + Days::new(days_ahead)
}
