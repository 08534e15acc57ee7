// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::Command;
use miette::Diagnostic;
use std::collections::BTreeMap;
use std::fmt;

/// Error data for building the command registry. Any of these stops startup.
#[derive(Debug, Diagnostic)]
pub enum RegistryError {
	#[diagnostic(code(registry::invalid_name))]
	InvalidName(String),
	#[diagnostic(
		code(registry::duplicate_name),
		help("Every command in the registration list needs its own name.")
	)]
	DuplicateName(String),
}

impl fmt::Display for RegistryError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::InvalidName(name) => write!(f, "invalid command name {:?}", name),
			Self::DuplicateName(name) => write!(f, "command name {:?} is registered more than once", name),
		}
	}
}

impl std::error::Error for RegistryError {}

/// Name to command mapping, built once at startup
pub struct CommandRegistry {
	commands: BTreeMap<String, Box<dyn Command>>,
}

impl CommandRegistry {
	pub fn load(commands: Vec<Box<dyn Command>>) -> Result<Self, RegistryError> {
		let mut registry = BTreeMap::new();
		for command in commands {
			let name = command.name();
			if name.is_empty() || name.chars().any(char::is_whitespace) {
				return Err(RegistryError::InvalidName(name.to_string()));
			}
			let name = name.to_lowercase();
			if registry.contains_key(&name) {
				return Err(RegistryError::DuplicateName(name));
			}
			registry.insert(name, command);
		}
		Ok(Self { commands: registry })
	}

	/// Registered command names in sorted order
	pub fn names(&self) -> Vec<&str> {
		self.commands.keys().map(|name| name.as_str()).collect()
	}

	pub fn get(&self, name: &str) -> Option<&dyn Command> {
		self.commands.get(name).map(|command| command.as_ref())
	}
}
