#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use permanence::{
    io,
    model::DateRange,
    notification::{prepare_invites, TextInvite},
    scheduler::{build_shifts, ScheduleConfig, Scheduler},
    storage::{JsonStorage, Storage},
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste de planification de gardes (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Répertoire de données (people.json, ledger.json, ...)
    #[arg(long, global = true, default_value = ".")]
    data: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Planifier une période : écrit schedule.json et met à jour ledger.json
    Plan {
        /// Date de début (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,
        /// Date de fin incluse (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,
        /// Graine du tirage des ex æquo (rejouable)
        #[arg(long)]
        seed: Option<u64>,
        /// Export CSV du planning
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Prévisualiser le découpage en créneaux, sans assigner
    Shifts {
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
    },

    /// Importer des personnes depuis un CSV vers people.json
    ImportPeople {
        #[arg(long)]
        csv: String,
    },

    /// Générer les invitations texte du planning courant
    Invites {
        /// Fichier de sortie (texte brut) ; stdout sinon
        #[arg(long)]
        out: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.data)?;

    match cli.cmd {
        Commands::Plan {
            start,
            end,
            seed,
            out_csv,
        } => {
            let people = storage.load_people()?;
            let mut ledger = storage.load_ledger()?;
            if let Some(seed) = seed {
                ledger = ledger.with_seed(seed);
            }
            let previous = storage.load_previous_schedule()?;
            let holidays = storage.load_holidays()?;
            let dates = DateRange::new(start, end).map_err(anyhow::Error::msg)?;

            let scheduler = Scheduler::new(
                dates,
                people.clone(),
                ledger,
                previous,
                &holidays,
                ScheduleConfig::default(),
            )?;
            let (schedule, ledger) = scheduler.schedule()?;

            storage.save_schedule(&schedule)?;
            storage.save_ledger(&ledger, Some(&people))?;
            if let Some(path) = out_csv {
                io::export_schedule_csv(path, &schedule)?;
            }

            for shift in &schedule.shifts {
                let person = shift
                    .person
                    .as_ref()
                    .map(|p| p.full_name.as_str())
                    .unwrap_or("-");
                let backup = shift
                    .backup_person
                    .as_ref()
                    .map(|p| p.full_name.as_str())
                    .unwrap_or("-");
                println!("{} | {} | {} / {}", shift.dates, shift.title, person, backup);
            }
            println!(
                "Wrote {} and {}",
                storage.schedule_path().display(),
                storage.ledger_path().display()
            );
        }

        Commands::Shifts { start, end } => {
            let holidays = storage.load_holidays()?;
            let dates = DateRange::new(start, end).map_err(anyhow::Error::msg)?;
            let shifts = build_shifts(&dates, &holidays, &ScheduleConfig::default());
            for shift in &shifts {
                println!("{} | {} | {}", shift.dates, shift.shift_type, shift.title);
            }
        }

        Commands::ImportPeople { csv } => {
            let people = io::import_people_csv(&csv).with_context(|| format!("importing {csv}"))?;
            storage.save_people(&people)?;
            println!(
                "Imported {} people into {}",
                people.len(),
                storage.people_path().display()
            );
        }

        Commands::Invites { out } => {
            let schedule = storage.load_schedule()?;
            let invites = prepare_invites(&schedule, &TextInvite)?;
            if let Some(path) = out {
                let contents: Vec<&str> = invites.iter().map(|i| i.content.as_str()).collect();
                std::fs::write(&path, contents.join("---\n"))?;
                println!("Wrote {} invites to {}", invites.len(), path);
            } else {
                for invite in &invites {
                    println!("{} | {} | {}", invite.dates, invite.title, invite.attendee);
                }
            }
        }
    }

    Ok(())
}
