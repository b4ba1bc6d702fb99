use anyhow::{bail, Context, Result};
use chrono::{Datelike, Local, Utc};
use clap::{Args, Parser, Subcommand};
use inquire::Confirm;
use tracing_subscriber::EnvFilter;

use sata_events::client::{
    api::DEFAULT_BASE_URL,
    form::{resolve_color, DEFAULT_COLOR},
    render::{render_event, render_month, render_upcoming},
    Calendar, EventForm, EventsApi,
};

#[derive(Parser)]
#[command(name = "eventos")]
#[command(about = "Manage SATA calendar events from the terminal")]
struct Cli {
    /// Events endpoint, e.g. http://localhost:3001/eventos
    #[arg(long, env = "EVENTOS_API_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List events, optionally filtered by title, description or type
    List {
        #[arg(short, long)]
        filtro: Option<String>,
    },
    /// Show the next five upcoming events
    Upcoming,
    /// Show a month of events (defaults to the current month)
    Month {
        #[arg(short, long)]
        year: Option<i32>,
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
    },
    /// Show one event
    Show { id: i64 },
    /// Create a new event
    Add(AddArgs),
    /// Delete an event
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Args)]
struct AddArgs {
    #[arg(long)]
    title: String,
    /// Palette label (Azul, Vermelho, Verde, Laranja, Roxo) or its hex value
    #[arg(long, default_value = DEFAULT_COLOR)]
    color: String,
    /// YYYY-MM-DD
    #[arg(long)]
    start_date: String,
    /// HH:MM
    #[arg(long)]
    start_time: String,
    #[arg(long)]
    end_date: String,
    #[arg(long)]
    end_time: String,
    #[arg(long, default_value = "")]
    location: String,
    #[arg(long, default_value = "")]
    description: String,
    /// Store a reminder with the event
    #[arg(long)]
    notify: bool,
    /// Minutes before the event
    #[arg(long, default_value = "60")]
    notify_time: String,
    /// Category, "Social" when blank
    #[arg(long = "type", default_value = "")]
    event_type: String,
}

impl AddArgs {
    fn into_form(self) -> Result<EventForm> {
        let Some(color) = resolve_color(&self.color) else {
            bail!("unknown color {:?}", self.color);
        };
        Ok(EventForm {
            title: self.title,
            color: color.to_string(),
            start_date: self.start_date,
            start_time: self.start_time,
            end_date: self.end_date,
            end_time: self.end_time,
            location: self.location,
            description: self.description,
            notify: self.notify,
            notify_time: self.notify_time,
            event_type: self.event_type,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut calendar = Calendar::new(EventsApi::new(&cli.base_url));

    match cli.command {
        Commands::List { filtro } => {
            let events = calendar
                .api()
                .list(filtro.as_deref())
                .await
                .context("Erro ao buscar eventos")?;
            if events.is_empty() {
                println!("Nenhum evento encontrado.");
            }
            for event in &events {
                print!("#{} {}", event.id, render_event(event, &Local));
            }
        }
        Commands::Upcoming => {
            let upcoming = calendar
                .upcoming(Utc::now())
                .await
                .context("Erro ao buscar eventos")?;
            println!("Próximos Eventos");
            print!("{}", render_upcoming(&upcoming, &Local));
        }
        Commands::Month { year, month } => {
            let today = Local::now();
            let year = year.unwrap_or(today.year());
            let month = month.unwrap_or(today.month());
            let events = calendar.events().await.context("Erro ao buscar eventos")?;
            print!("{}", render_month(events, year, month, &Local));
        }
        Commands::Show { id } => {
            match calendar.find(id).await.context("Erro ao buscar eventos")? {
                Some(event) => print!("{}", render_event(event, &Local)),
                None => bail!("Evento não encontrado"),
            }
        }
        Commands::Add(args) => {
            let input = args.into_form()?.to_input()?;
            let created = calendar
                .create(&input)
                .await
                .context("Erro ao salvar evento")?;
            println!("Evento #{} criado.", created.id);
            print!("{}", render_event(&created, &Local));
        }
        Commands::Delete { id, yes } => {
            let confirmed = yes
                || Confirm::new("Deseja realmente excluir este evento?")
                    .with_default(false)
                    .prompt()?;
            if !confirmed {
                println!("Nada foi excluído.");
                return Ok(());
            }
            calendar.delete(id).await.context("Erro ao excluir evento")?;
            println!("Evento #{} excluído.", id);
        }
    }

    Ok(())
}
