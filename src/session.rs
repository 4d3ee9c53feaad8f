//! Persistence boundary: where a game comes from on startup and where it goes
//! after each move.
//!
//! Restoring tries a shared state string first, then the stored state, then
//! falls back to a fresh game. Bad input at either step is logged and skipped;
//! it never fails the session.

use crate::codec::{self, StateError};
use crate::config::Settings;
use crate::game::Game;
use log::{info, warn};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Key the current game is stored under.
pub const STATE_KEY: &str = "state";

/// Key-value storage for state strings.
pub trait StateStore {
    fn read(&self, key: &str) -> io::Result<Option<String>>;
    fn write(&mut self, key: &str, value: &str) -> io::Result<()>;
}

/// In-memory store, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl StateStore for FileStore {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.path(key)) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(key), value)
    }
}

/// Where a restored game came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Origin {
    Shared,
    Stored,
    Fresh,
}

/// A game bound to a store.
#[derive(Debug)]
pub struct Session<S: StateStore> {
    store: S,
    game: Game,
    origin: Origin,
}

fn parse(state: &str, settings: &Settings) -> Result<Game, StateError> {
    let (deck, table) = codec::load(state)?;
    Ok(Game::restore(deck, table, settings.clone()))
}

impl<S: StateStore> Session<S> {
    /// Restore from `shared` (e.g. a link fragment), else from the store,
    /// else start a new game.
    pub fn open(store: S, shared: Option<&str>, settings: Settings) -> Self {
        if let Some(state) = shared {
            match parse(state, &settings) {
                Ok(game) => {
                    info!("restored shared game");
                    return Self { store, game, origin: Origin::Shared };
                }
                Err(e) => warn!("ignoring shared state: {e}"),
            }
        }
        match store.read(STATE_KEY) {
            Ok(Some(state)) => match parse(&state, &settings) {
                Ok(game) => {
                    info!("restored stored game");
                    return Self { store, game, origin: Origin::Stored };
                }
                Err(e) => warn!("ignoring stored state: {e}"),
            },
            Ok(None) => {}
            Err(e) => warn!("could not read stored state: {e}"),
        }
        Self { store, game: Game::new(settings), origin: Origin::Fresh }
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Write the current state under [`STATE_KEY`].
    pub fn save(&mut self) -> io::Result<()> {
        let state = self.game.dump();
        self.store.write(STATE_KEY, &state)
    }

    /// Run `f` against the game, then save.
    pub fn apply<T>(&mut self, f: impl FnOnce(&mut Game) -> T) -> io::Result<T> {
        let out = f(&mut self.game);
        self.save()?;
        Ok(out)
    }

    pub fn into_parts(self) -> (S, Game) {
        (self.store, self.game)
    }
}
