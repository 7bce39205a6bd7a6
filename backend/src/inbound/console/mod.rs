//! Interactive console front-end over the building use cases.
//!
//! The session reads one command per line, runs it against
//! [`BuildingUseCases`], and writes a human-readable transcript. Validation and
//! storage failures are reported inline and the session carries on; only I/O
//! failures and stored data that no longer maps to a building end it.

mod command;
mod format;

use std::io::Write;
use std::sync::Arc;

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

use crate::domain::ports::{BuildingRepository, BuildingRepositoryError};
use crate::domain::validation::parse_address;
use crate::domain::{Building, BuildingId, BuildingUseCases, Parking};
use crate::presentation::TVERSKAYA_QUERY;

pub use command::Command;
pub use format::{format_amount, format_building};

const BANNER: &str = "=== Office Buildings Management Console App ===\n\
Commands: add, list, get, search, tverskaya, update, delete, help, exit";

const HELP: &str = "\
========================================
Office Buildings Management System
========================================
Available commands:

1. add <address> - Add building without parking
   Example: add \"Тверская ул., 25\"

2. add <address>;<parking_spaces>;<monthly_rent> - Add building with parking
   Example: add \"Тверская ул., 25\";100;5000.0

3. list - List all buildings

4. get <id> - Get building by ID

5. search <query> - Search buildings by address

6. tverskaya - Show all buildings on Tverskaya street

7. update <id> <new_address> [parking_spaces monthly_rent] - Update building
   Examples:
   - update abc123 \"Новый адрес, 10\"
   - update abc123 \"Новый адрес, 10\" 120 6000.0

8. delete <id> - Delete building by ID

9. help - Show this help

10. exit - Exit the application
========================================";

/// Reasons a console session stops early.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Reading commands or writing the transcript failed.
    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// Stored data could not be turned back into buildings.
    #[error(transparent)]
    Storage(BuildingRepositoryError),
}

/// Whether the session keeps reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next command.
    Continue,
    /// Stop the session.
    Exit,
}

/// Outcome of looking a building up by id.
enum Lookup {
    Found(Building),
    Absent,
    /// A storage failure was already written to the transcript.
    Reported,
}

/// A single interactive session writing to `W`.
pub struct ConsoleSession<R, W> {
    use_cases: Arc<BuildingUseCases<R>>,
    output: W,
}

impl<R: BuildingRepository, W: Write> ConsoleSession<R, W> {
    /// Session over `use_cases` writing its transcript to `output`.
    pub fn new(use_cases: Arc<BuildingUseCases<R>>, output: W) -> Self {
        Self { use_cases, output }
    }

    /// Give back the transcript sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Print the banner, then run commands until `exit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError`] on I/O failure or when stored data cannot be
    /// mapped to buildings.
    pub async fn run<I>(&mut self, input: I) -> Result<(), ConsoleError>
    where
        I: AsyncBufRead + Unpin,
    {
        info!("console session started");
        writeln!(self.output, "{BANNER}")?;
        let mut lines = input.lines();
        loop {
            write!(self.output, "\n> ")?;
            self.output.flush()?;
            let Some(line) = lines.next_line().await? else {
                debug!("input closed");
                break;
            };
            if self.execute(Command::parse(&line)).await? == Flow::Exit {
                break;
            }
        }
        info!("console session ended");
        Ok(())
    }

    /// Run one command and write its outcome.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError`] on I/O failure or when stored data cannot be
    /// mapped to buildings.
    pub async fn execute(&mut self, command: Command) -> Result<Flow, ConsoleError> {
        debug!(?command, "executing console command");
        match command {
            Command::Exit => {
                writeln!(self.output, "Goodbye!")?;
                return Ok(Flow::Exit);
            }
            Command::List => self.list()?,
            Command::Add(input) => self.add(&input).await?,
            Command::Get(id) => self.get(&id).await?,
            Command::Search(query) => self.search(&query).await?,
            Command::Update {
                id,
                address,
                parking,
            } => self.update(&id, &address, parking).await?,
            Command::Delete(id) => self.delete(&id).await?,
            Command::Tverskaya => self.tverskaya().await?,
            Command::Help => writeln!(self.output, "{HELP}")?,
            Command::Usage(usage) => writeln!(self.output, "{usage}")?,
            Command::Unknown => writeln!(
                self.output,
                "Unknown command. Type 'help' for available commands."
            )?,
        }
        Ok(Flow::Continue)
    }

    fn list(&mut self) -> Result<(), ConsoleError> {
        let buildings = self.use_cases.get_all.execute().current();
        if buildings.is_empty() {
            writeln!(self.output, "No buildings found")?;
            return Ok(());
        }
        writeln!(self.output, "=== All Buildings ===")?;
        self.write_numbered(&buildings)
    }

    async fn add(&mut self, input: &str) -> Result<(), ConsoleError> {
        let building = match self.use_cases.parse.execute(input) {
            Ok(building) => building,
            Err(err) => return self.report(&err),
        };
        match self.use_cases.add.execute(&building).await {
            Ok(()) => writeln!(
                self.output,
                "Building added successfully: {}",
                format_building(&building)
            )?,
            Err(err) => self.storage_failure(err)?,
        }
        Ok(())
    }

    async fn get(&mut self, id: &str) -> Result<(), ConsoleError> {
        match self.find(id).await? {
            Lookup::Found(building) => writeln!(self.output, "{}", format_building(&building))?,
            Lookup::Absent => self.not_found(id)?,
            Lookup::Reported => {}
        }
        Ok(())
    }

    async fn search(&mut self, query: &str) -> Result<(), ConsoleError> {
        let found = match self.use_cases.search.execute(query).await {
            Ok(found) => found,
            Err(err) => return self.storage_failure(err),
        };
        if found.is_empty() {
            writeln!(self.output, "No buildings found for query: '{query}'")?;
            return Ok(());
        }
        writeln!(self.output, "=== Search Results for '{query}' ===")?;
        self.write_numbered(&found)
    }

    async fn update(
        &mut self,
        id: &str,
        address: &str,
        parking: Option<(i32, f64)>,
    ) -> Result<(), ConsoleError> {
        let existing = match self.find(id).await? {
            Lookup::Found(building) => building,
            Lookup::Absent => return self.not_found(id),
            Lookup::Reported => return Ok(()),
        };
        let new_address = match parse_address(address) {
            Ok(valid) => valid,
            Err(err) => return self.report(&err),
        };
        let updated = match parking {
            None => existing.with_address(new_address),
            Some((spaces, rent)) => match Parking::try_from_raw(spaces, rent) {
                Ok(valid) => Building::with_parking(existing.id().clone(), new_address, valid),
                Err(err) => return self.report(&err),
            },
        };
        match self.use_cases.update.execute(&updated).await {
            Ok(()) => writeln!(self.output, "Building updated successfully")?,
            Err(err) => self.storage_failure(err)?,
        }
        Ok(())
    }

    async fn delete(&mut self, id: &str) -> Result<(), ConsoleError> {
        let building = match self.find(id).await? {
            Lookup::Found(building) => building,
            Lookup::Absent => return self.not_found(id),
            Lookup::Reported => return Ok(()),
        };
        match self.use_cases.delete.execute(&building).await {
            Ok(()) => writeln!(self.output, "Building deleted successfully")?,
            Err(err) => self.storage_failure(err)?,
        }
        Ok(())
    }

    async fn tverskaya(&mut self) -> Result<(), ConsoleError> {
        writeln!(self.output, "=== Buildings on Tverskaya ===")?;
        let found = match self.use_cases.search.execute(TVERSKAYA_QUERY).await {
            Ok(found) => found,
            Err(err) => return self.storage_failure(err),
        };
        if found.is_empty() {
            writeln!(self.output, "No buildings found on Tverskaya")?;
            return Ok(());
        }
        for (position, building) in found.iter().enumerate() {
            writeln!(self.output, "{}. {}", position + 1, format_building(building))?;
            if let Some(parking) = building.parking() {
                writeln!(
                    self.output,
                    "   Monthly parking revenue: {}",
                    format_amount(parking.monthly_revenue())
                )?;
            }
            writeln!(self.output)?;
        }
        Ok(())
    }

    /// Look up `id`, treating malformed ids as absent.
    async fn find(&mut self, raw_id: &str) -> Result<Lookup, ConsoleError> {
        let Ok(id) = BuildingId::new(raw_id) else {
            return Ok(Lookup::Absent);
        };
        match self.use_cases.get_by_id.execute(&id).await {
            Ok(Some(building)) => Ok(Lookup::Found(building)),
            Ok(None) => Ok(Lookup::Absent),
            Err(err) => {
                self.storage_failure(err)?;
                Ok(Lookup::Reported)
            }
        }
    }

    fn write_numbered(&mut self, buildings: &[Building]) -> Result<(), ConsoleError> {
        for (position, building) in buildings.iter().enumerate() {
            writeln!(self.output, "{}. {}", position + 1, format_building(building))?;
        }
        Ok(())
    }

    fn not_found(&mut self, id: &str) -> Result<(), ConsoleError> {
        writeln!(self.output, "Building with id '{id}' not found")?;
        Ok(())
    }

    fn report(&mut self, err: &dyn std::error::Error) -> Result<(), ConsoleError> {
        writeln!(self.output, "Error: {err}")?;
        Ok(())
    }

    /// Mapping failures end the session; anything else is reported.
    fn storage_failure(&mut self, err: BuildingRepositoryError) -> Result<(), ConsoleError> {
        if matches!(err, BuildingRepositoryError::Mapping { .. }) {
            return Err(ConsoleError::Storage(err));
        }
        self.report(&err)
    }
}
