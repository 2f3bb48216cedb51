//! Application state for the Pokedex REPL
//!
//! `App` is the context every command runs against: the cache-backed PokeAPI
//! client, the catch registry and the location-area paging cursor. Handlers
//! write to any `std::io::Write` so they can be exercised without a terminal.

use rand::rngs::ThreadRng;
use rand::Rng;
use std::io::Write;
use thiserror::Error;

use crate::commands::{Command, COMMANDS};
use crate::data::{ApiError, LocationAreaPage, PokeApiClient};
use crate::pokedex::{throw_pokeball, Pokedex};

/// Errors that can occur while running a command
#[derive(Debug, Error)]
pub enum CommandError {
    /// Fetching or decoding PokeAPI data failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Writing command output failed
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// What the REPL should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Position in the location-area listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    page_size: usize,
    /// Offset of the page last shown, `None` before the first `map`
    current: Option<usize>,
    /// Whether the page last shown had no successor
    at_last_page: bool,
}

impl Pager {
    /// Creates a pager positioned before the first page
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current: None,
            at_last_page: false,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_offset(&self) -> Option<usize> {
        self.current
    }

    /// Offset `map` should show, or `None` if the last page is already showing
    pub fn next_offset(&self) -> Option<usize> {
        if self.at_last_page {
            return None;
        }
        Some(self.current.map_or(0, |offset| offset + self.page_size))
    }

    /// Offset `mapb` should show, or `None` on (or before) the first page
    pub fn previous_offset(&self) -> Option<usize> {
        match self.current {
            Some(offset) if offset > 0 => Some(offset.saturating_sub(self.page_size)),
            _ => None,
        }
    }

    /// Moves the cursor to a page that was just displayed
    pub fn record(&mut self, offset: usize, page: &LocationAreaPage) {
        self.current = Some(offset);
        self.at_last_page = page.next.is_none();
    }
}

/// Main application struct holding everything commands operate on
pub struct App<R: Rng = ThreadRng> {
    client: PokeApiClient,
    pokedex: Pokedex,
    pager: Pager,
    rng: R,
}

impl App<ThreadRng> {
    /// Creates a new App using the thread-local RNG for catch rolls
    pub fn new(client: PokeApiClient, page_size: usize) -> Self {
        Self::with_rng(client, page_size, rand::thread_rng())
    }
}

impl<R: Rng> App<R> {
    /// Creates a new App with a custom RNG (seeded RNGs make catches repeatable)
    pub fn with_rng(client: PokeApiClient, page_size: usize, rng: R) -> Self {
        Self {
            client,
            pokedex: Pokedex::new(),
            pager: Pager::new(page_size),
            rng,
        }
    }

    pub fn client(&self) -> &PokeApiClient {
        &self.client
    }

    pub fn pokedex(&self) -> &Pokedex {
        &self.pokedex
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    /// Consumes the app, handing back the client so its cache can be shut down
    pub fn into_client(self) -> PokeApiClient {
        self.client
    }

    /// Runs a single command, writing its output to `out`
    ///
    /// # Returns
    /// * `Ok(Flow::Exit)` after `exit`
    /// * `Ok(Flow::Continue)` after any other successful command
    /// * `Err(CommandError)` if a fetch or a write failed
    pub async fn execute<W: Write>(
        &mut self,
        command: Command,
        out: &mut W,
    ) -> Result<Flow, CommandError> {
        match command {
            Command::Help => self.help(out)?,
            Command::Exit => {
                writeln!(out, "Closing the Pokedex... Goodbye!")?;
                return Ok(Flow::Exit);
            }
            Command::Map => self.map_next(out).await?,
            Command::MapBack => self.map_back(out).await?,
            Command::Explore(area) => self.explore(area.as_deref(), out).await?,
            Command::Catch(name) => self.catch(name.as_deref(), out).await?,
            Command::Inspect(name) => self.inspect(name.as_deref(), out)?,
            Command::Pokedex => self.list_pokedex(out)?,
        }
        Ok(Flow::Continue)
    }

    fn help<W: Write>(&self, out: &mut W) -> Result<(), CommandError> {
        writeln!(out, "Welcome to the Pokedex!")?;
        writeln!(out, "Usage:")?;
        writeln!(out)?;
        for (name, description) in COMMANDS {
            writeln!(out, "{}: {}", name, description)?;
        }
        Ok(())
    }

    async fn map_next<W: Write>(&mut self, out: &mut W) -> Result<(), CommandError> {
        match self.pager.next_offset() {
            Some(offset) => self.show_page(offset, out).await,
            None => {
                writeln!(out, "You're on the last page")?;
                Ok(())
            }
        }
    }

    async fn map_back<W: Write>(&mut self, out: &mut W) -> Result<(), CommandError> {
        match self.pager.previous_offset() {
            Some(offset) => self.show_page(offset, out).await,
            None => {
                writeln!(out, "You're on the first page")?;
                Ok(())
            }
        }
    }

    /// Fetches and prints a page, moving the cursor only if the fetch succeeded
    async fn show_page<W: Write>(&mut self, offset: usize, out: &mut W) -> Result<(), CommandError> {
        let page = self
            .client
            .fetch_location_areas(offset, self.pager.page_size())
            .await?;

        for area in &page.results {
            writeln!(out, "{}", area.name)?;
        }
        self.pager.record(offset, &page);
        Ok(())
    }

    async fn explore<W: Write>(&mut self, area: Option<&str>, out: &mut W) -> Result<(), CommandError> {
        let Some(area) = area else {
            writeln!(out, "Please enter a location to explore")?;
            return Ok(());
        };

        writeln!(out, "Exploring {}...", area)?;
        let details = self.client.fetch_location_area(area).await?;

        writeln!(out, "Found Pokemon:")?;
        for encounter in &details.pokemon_encounters {
            writeln!(out, "- {}", encounter.pokemon.name)?;
        }
        Ok(())
    }

    async fn catch<W: Write>(&mut self, name: Option<&str>, out: &mut W) -> Result<(), CommandError> {
        let Some(name) = name else {
            writeln!(out, "Please enter a pokemon to catch")?;
            return Ok(());
        };

        let pokemon = self.client.fetch_pokemon(name).await?;

        writeln!(out, "Throwing a Pokeball at {}...", name)?;
        if throw_pokeball(&mut self.rng, &pokemon) {
            writeln!(out, "{} was caught!", name)?;
            self.pokedex.record(name, pokemon);
        } else {
            writeln!(out, "{} escaped!", name)?;
        }
        Ok(())
    }

    fn inspect<W: Write>(&self, name: Option<&str>, out: &mut W) -> Result<(), CommandError> {
        let Some(name) = name else {
            writeln!(out, "Please enter a pokemon to inspect")?;
            return Ok(());
        };

        let Some(caught) = self.pokedex.get(name) else {
            writeln!(out, "You have not caught that pokemon")?;
            return Ok(());
        };

        let pokemon = &caught.pokemon;
        writeln!(out, "Name: {}", pokemon.name)?;
        writeln!(out, "Height: {}", pokemon.height)?;
        writeln!(out, "Weight: {}", pokemon.weight)?;
        writeln!(out, "Stats:")?;
        for stat in &pokemon.stats {
            writeln!(out, "- {}: {}", stat.stat.name, stat.base_stat)?;
        }
        writeln!(out, "Types:")?;
        for kind in &pokemon.types {
            writeln!(out, "- {}", kind.kind.name)?;
        }
        Ok(())
    }

    fn list_pokedex<W: Write>(&self, out: &mut W) -> Result<(), CommandError> {
        if self.pokedex.is_empty() {
            writeln!(out, "Your Pokedex is empty")?;
            return Ok(());
        }

        writeln!(out, "Your Pokedex:")?;
        for name in self.pokedex.names() {
            writeln!(out, "- {}", name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::Cache;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;

    /// Nothing listens here, so only cache-seeded requests succeed.
    const UNREACHABLE_BASE_URL: &str = "http://127.0.0.1:9/api/v2";

    const PIKACHU_JSON: &str = r#"{
        "id": 25, "name": "pikachu", "base_experience": 0, "height": 4, "weight": 60,
        "stats": [
            {"base_stat": 35, "effort": 0, "stat": {"name": "hp", "url": ""}},
            {"base_stat": 90, "effort": 2, "stat": {"name": "speed", "url": ""}}
        ],
        "types": [{"slot": 1, "type": {"name": "electric", "url": ""}}]
    }"#;

    const MEWTWO_JSON: &str = r#"{
        "id": 150, "name": "mewtwo", "base_experience": 1000, "height": 20, "weight": 1220
    }"#;

    fn test_app(page_size: usize) -> App<StdRng> {
        let cache = Cache::new(Duration::from_secs(300)).expect("Cache should start");
        let client = PokeApiClient::new(cache).with_base_url(UNREACHABLE_BASE_URL);
        App::with_rng(client, page_size, StdRng::seed_from_u64(1))
    }

    fn page_json(names: &[&str], has_next: bool) -> String {
        let results: Vec<String> = names
            .iter()
            .map(|n| format!(r#"{{"name": "{}", "url": ""}}"#, n))
            .collect();
        let next = if has_next { r#""next-page""# } else { "null" };
        format!(
            r#"{{"count": 100, "next": {}, "previous": null, "results": [{}]}}"#,
            next,
            results.join(",")
        )
    }

    fn seed_page(app: &App<StdRng>, offset: usize, names: &[&str], has_next: bool) {
        let url = app.client().location_areas_url(offset, app.pager().page_size());
        app.client().cache().add(url, page_json(names, has_next));
    }

    async fn run(app: &mut App<StdRng>, command: Command) -> (Flow, String) {
        let mut out = Vec::new();
        let flow = app.execute(command, &mut out).await.expect("Command should succeed");
        (flow, String::from_utf8(out).expect("Output should be UTF-8"))
    }

    #[test]
    fn test_pager_starts_before_first_page() {
        let pager = Pager::new(20);
        assert_eq!(pager.current_offset(), None);
        assert_eq!(pager.next_offset(), Some(0));
        assert_eq!(pager.previous_offset(), None);
    }

    #[test]
    fn test_pager_zero_page_size_is_clamped() {
        assert_eq!(Pager::new(0).page_size(), 1);
    }

    #[tokio::test]
    async fn test_help_lists_every_command() {
        let mut app = test_app(20);

        let (flow, output) = run(&mut app, Command::Help).await;

        assert_eq!(flow, Flow::Continue);
        assert!(output.starts_with("Welcome to the Pokedex!\nUsage:\n\n"));
        for (name, description) in COMMANDS {
            assert!(output.contains(&format!("{}: {}", name, description)));
        }
    }

    #[tokio::test]
    async fn test_exit_returns_exit_flow() {
        let mut app = test_app(20);

        let (flow, output) = run(&mut app, Command::Exit).await;

        assert_eq!(flow, Flow::Exit);
        assert_eq!(output, "Closing the Pokedex... Goodbye!\n");
    }

    #[tokio::test]
    async fn test_map_pages_forward_and_back() {
        let mut app = test_app(2);
        seed_page(&app, 0, &["area-1", "area-2"], true);
        seed_page(&app, 2, &["area-3", "area-4"], true);

        let (_, first) = run(&mut app, Command::Map).await;
        assert_eq!(first, "area-1\narea-2\n");

        let (_, second) = run(&mut app, Command::Map).await;
        assert_eq!(second, "area-3\narea-4\n");
        assert_eq!(app.pager().current_offset(), Some(2));

        let (_, back) = run(&mut app, Command::MapBack).await;
        assert_eq!(back, "area-1\narea-2\n");
        assert_eq!(app.pager().current_offset(), Some(0));

        let (_, at_start) = run(&mut app, Command::MapBack).await;
        assert_eq!(at_start, "You're on the first page\n");
    }

    #[tokio::test]
    async fn test_mapb_before_any_map_is_first_page() {
        let mut app = test_app(20);

        let (_, output) = run(&mut app, Command::MapBack).await;

        assert_eq!(output, "You're on the first page\n");
    }

    #[tokio::test]
    async fn test_map_stops_at_last_page() {
        let mut app = test_app(2);
        seed_page(&app, 0, &["only-area"], false);

        run(&mut app, Command::Map).await;
        let (_, output) = run(&mut app, Command::Map).await;

        assert_eq!(output, "You're on the last page\n");
        assert_eq!(app.pager().current_offset(), Some(0));
    }

    #[tokio::test]
    async fn test_failed_map_does_not_advance_pager() {
        let mut app = test_app(2);
        seed_page(&app, 0, &["area-1", "area-2"], true);
        run(&mut app, Command::Map).await;

        // Page at offset 2 is not cached and the API is unreachable.
        let mut out = Vec::new();
        let result = app.execute(Command::Map, &mut out).await;

        assert!(matches!(result, Err(CommandError::Api(_))));
        assert_eq!(app.pager().current_offset(), Some(0));
    }

    #[tokio::test]
    async fn test_explore_lists_encounters() {
        let mut app = test_app(20);
        let url = app.client().location_area_url("pastoria-city-area");
        app.client().cache().add(
            url,
            r#"{"id": 1, "name": "pastoria-city-area", "pokemon_encounters": [
                {"pokemon": {"name": "tentacool", "url": ""}},
                {"pokemon": {"name": "magikarp", "url": ""}}
            ]}"#,
        );

        let (_, output) = run(&mut app, Command::Explore(Some("pastoria-city-area".into()))).await;

        assert_eq!(
            output,
            "Exploring pastoria-city-area...\nFound Pokemon:\n- tentacool\n- magikarp\n"
        );
    }

    #[tokio::test]
    async fn test_commands_without_target_prompt_for_one() {
        let mut app = test_app(20);

        let (_, explore) = run(&mut app, Command::Explore(None)).await;
        let (_, catch) = run(&mut app, Command::Catch(None)).await;
        let (_, inspect) = run(&mut app, Command::Inspect(None)).await;

        assert_eq!(explore, "Please enter a location to explore\n");
        assert_eq!(catch, "Please enter a pokemon to catch\n");
        assert_eq!(inspect, "Please enter a pokemon to inspect\n");
    }

    #[tokio::test]
    async fn test_catch_then_inspect() {
        let mut app = test_app(20);
        let url = app.client().pokemon_url("pikachu");
        app.client().cache().add(url, PIKACHU_JSON);

        let (_, caught) = run(&mut app, Command::Catch(Some("pikachu".into()))).await;
        assert!(caught.starts_with("Throwing a Pokeball at pikachu...\npikachu was caught!\n"));
        assert!(app.pokedex().get("pikachu").is_some());

        let (_, inspected) = run(&mut app, Command::Inspect(Some("pikachu".into()))).await;
        assert_eq!(
            inspected,
            "Name: pikachu\nHeight: 4\nWeight: 60\nStats:\n- hp: 35\n- speed: 90\nTypes:\n- electric\n"
        );
    }

    #[tokio::test]
    async fn test_catch_escape_is_not_recorded() {
        let mut app = test_app(20);
        let url = app.client().pokemon_url("mewtwo");
        app.client().cache().add(url, MEWTWO_JSON);

        let (_, output) = run(&mut app, Command::Catch(Some("mewtwo".into()))).await;

        assert_eq!(output, "Throwing a Pokeball at mewtwo...\nmewtwo escaped!\n");
        assert!(app.pokedex().is_empty());
    }

    #[tokio::test]
    async fn test_inspect_uncaught_pokemon() {
        let mut app = test_app(20);

        let (_, output) = run(&mut app, Command::Inspect(Some("pikachu".into()))).await;

        assert_eq!(output, "You have not caught that pokemon\n");
    }

    #[tokio::test]
    async fn test_pokedex_lists_caught_pokemon() {
        let mut app = test_app(20);

        let (_, empty) = run(&mut app, Command::Pokedex).await;
        assert_eq!(empty, "Your Pokedex is empty\n");

        let url = app.client().pokemon_url("pikachu");
        app.client().cache().add(url, PIKACHU_JSON);
        run(&mut app, Command::Catch(Some("pikachu".into()))).await;

        let (_, listed) = run(&mut app, Command::Pokedex).await;
        assert_eq!(listed, "Your Pokedex:\n- pikachu\n");
    }
}
