// Copyright (c) 2025 - Cowboy AI, Inc.
//! Schema Registry
//!
//! Read-only map from command name to its decoder, plus the set of event
//! names an aggregate may store. Built once when a runtime is constructed;
//! duplicate or missing registrations fail construction instead of
//! surfacing later on a live stream.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::domain::{decode, Validate, ValidationError};

/// Decodes and validates an untyped payload into a command
pub type CommandDecoder<C> = fn(Value) -> Result<C, ValidationError>;

/// Registration failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Command {0} registered twice")]
    DuplicateCommand(&'static str),

    #[error("Event {0} registered twice")]
    DuplicateEvent(&'static str),

    #[error("No commands registered")]
    NoCommands,

    #[error("No events registered")]
    NoEvents,

    #[error("Event {0} is not registered")]
    MissingEvent(&'static str),
}

fn decode_into<T, C>(payload: Value) -> Result<C, ValidationError>
where
    T: Validate + DeserializeOwned + Into<C>,
{
    decode::<T>(payload).map(Into::into)
}

/// Name → validator registry for one aggregate
pub struct SchemaRegistry<C> {
    commands: BTreeMap<&'static str, CommandDecoder<C>>,
    events: BTreeSet<&'static str>,
}

impl<C> SchemaRegistry<C> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            commands: BTreeMap::new(),
            events: BTreeSet::new(),
        }
    }

    /// Register a command shape under its [`Validate::SHAPE`] name
    pub fn register_command<T>(&mut self) -> Result<&mut Self, RegistryError>
    where
        T: Validate + DeserializeOwned + Into<C>,
    {
        if self.commands.contains_key(T::SHAPE) {
            return Err(RegistryError::DuplicateCommand(T::SHAPE));
        }
        self.commands.insert(T::SHAPE, decode_into::<T, C>);
        Ok(self)
    }

    /// Register the event names an aggregate may store
    pub fn register_events(&mut self, names: &[&'static str]) -> Result<&mut Self, RegistryError> {
        for &name in names {
            if !self.events.insert(name) {
                return Err(RegistryError::DuplicateEvent(name));
            }
        }
        Ok(self)
    }

    /// Check the registry is usable
    pub fn ensure_complete(&self) -> Result<(), RegistryError> {
        if self.commands.is_empty() {
            return Err(RegistryError::NoCommands);
        }
        if self.events.is_empty() {
            return Err(RegistryError::NoEvents);
        }
        Ok(())
    }

    /// Decode a named command payload
    pub fn decode_command(&self, name: &str, payload: Value) -> Result<C, ValidationError> {
        let decoder = self
            .commands
            .get(name)
            .ok_or_else(|| ValidationError::UnknownCommand(name.to_string()))?;
        decoder(payload)
    }

    /// Check every given event name was registered
    pub fn ensure_events(&self, names: &[&'static str]) -> Result<(), RegistryError> {
        match names.iter().find(|name| !self.events.contains(*name)) {
            Some(name) => Err(RegistryError::MissingEvent(*name)),
            None => Ok(()),
        }
    }

    /// Whether events with this name may appear in a stream
    pub fn knows_event(&self, name: &str) -> bool {
        self.events.contains(name)
    }

    /// Registered command names, sorted
    pub fn command_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.keys().copied()
    }
}

impl<C> Default for SchemaRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for SchemaRegistry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaRegistry")
            .field("commands", &self.commands.keys().collect::<Vec<_>>())
            .field("events", &self.events)
            .finish()
    }
}
