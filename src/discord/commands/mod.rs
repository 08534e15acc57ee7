// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::config::COMMAND_PREFIX;
use crate::discord::context::BotContext;
use crate::discord::incoming_messages::IncomingMessage;
use async_trait::async_trait;

mod help;
mod ping;
mod registry;
mod remind;

pub use registry::{CommandRegistry, RegistryError};

pub const COMMAND_FAILED: &str = "There was an error trying to execute that command!";

/// A prefix command
#[async_trait]
pub trait Command: Send + Sync {
	/// The name the command is invoked with. Must be a single word; it's matched case-insensitively.
	fn name(&self) -> &'static str;

	fn description(&self) -> &'static str;

	async fn execute(&self, context: &CommandContext<'_>, args: &[String]) -> miette::Result<()>;
}

pub fn command_modules() -> Vec<Box<dyn Command>> {
	vec![Box::new(help::Help), Box::new(ping::Ping), Box::new(remind::Remind)]
}

/// The message a command was invoked from, along with everything the command can act on
pub struct CommandContext<'a> {
	pub message: &'a IncomingMessage,
	pub bot: &'a BotContext,
}

impl CommandContext<'_> {
	pub async fn reply(&self, content: &str) -> miette::Result<()> {
		self.bot
			.platform
			.reply_to_message(self.message.channel_id, self.message.message_id, content)
			.await
	}
}

#[derive(Debug, Eq, PartialEq)]
pub struct Invocation {
	pub name: String,
	pub args: Vec<String>,
}

/// Splits command text into a lower-cased command name and its whitespace-separated arguments. There's no quoting.
pub fn parse_invocation(raw_text: &str) -> Option<Invocation> {
	let text = raw_text.strip_prefix(COMMAND_PREFIX).unwrap_or(raw_text);
	let mut tokens = text.split_whitespace();
	let name = tokens.next()?.to_lowercase();
	let args = tokens.map(String::from).collect();
	Some(Invocation { name, args })
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DispatchOutcome {
	/// No command matched, so nothing happened.
	Ignored,
	Executed,
	/// The command returned an error, which was logged and reported to the user.
	Failed,
}

/// Runs the command named in `raw_text`, which must start with the command prefix.
///
/// Errors from the command stop here: they're logged and the user gets a generic failure reply.
pub async fn dispatch(context: &CommandContext<'_>, raw_text: &str) -> DispatchOutcome {
	let Some(invocation) = parse_invocation(raw_text) else {
		return DispatchOutcome::Ignored;
	};
	let Some(command) = context.bot.commands.get(&invocation.name) else {
		tracing::debug!(command = %invocation.name, "Ignoring unknown command");
		return DispatchOutcome::Ignored;
	};

	match command.execute(context, &invocation.args).await {
		Ok(()) => DispatchOutcome::Executed,
		Err(error) => {
			tracing::error!(source = ?error, command = %invocation.name, "Command failed");
			if let Err(reply_error) = context.reply(COMMAND_FAILED).await {
				tracing::warn!(source = ?reply_error, "Failed to report command failure");
			}
			DispatchOutcome::Failed
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::discord::context::tests::test_context;
	use crate::discord::platform::testing::{Operation, PlatformCall, RecordingPlatform};
	use crate::discord::utils::users::UserData;
	use miette::bail;
	use std::sync::Arc;
	use std::sync::atomic::{AtomicUsize, Ordering};
	use twilight_model::id::Id;

	struct Broken;

	#[async_trait]
	impl Command for Broken {
		fn name(&self) -> &'static str {
			"broken"
		}

		fn description(&self) -> &'static str {
			"always fails"
		}

		async fn execute(&self, _context: &CommandContext<'_>, _args: &[String]) -> miette::Result<()> {
			bail!("broken on purpose")
		}
	}

	struct Counting(Arc<AtomicUsize>);

	#[async_trait]
	impl Command for Counting {
		fn name(&self) -> &'static str {
			"count"
		}

		fn description(&self) -> &'static str {
			"counts invocations"
		}

		async fn execute(&self, _context: &CommandContext<'_>, _args: &[String]) -> miette::Result<()> {
			self.0.fetch_add(1, Ordering::SeqCst);
			Ok(())
		}
	}

	fn message(content: &str) -> IncomingMessage {
		IncomingMessage {
			channel_id: Id::new(10),
			message_id: Id::new(11),
			author: UserData {
				id: Id::new(12),
				name: String::from("alice"),
				tag: String::from("alice"),
			},
			content: String::from(content),
		}
	}

	#[test]
	fn invocation_is_split_into_name_and_args() {
		assert_eq!(
			parse_invocation(".ping extra args"),
			Some(Invocation {
				name: String::from("ping"),
				args: vec![String::from("extra"), String::from("args")],
			})
		);
	}

	#[test]
	fn invocation_name_is_lower_cased_and_whitespace_collapsed() {
		let invocation = parse_invocation(".  PiNg   a\t b  ").unwrap();
		assert_eq!(invocation.name, "ping");
		assert_eq!(invocation.args, vec!["a", "b"]);
	}

	#[test]
	fn prefix_alone_is_not_an_invocation() {
		assert_eq!(parse_invocation("."), None);
		assert_eq!(parse_invocation(".   "), None);
	}

	#[tokio::test]
	async fn unknown_command_is_silently_ignored() {
		let platform = Arc::new(RecordingPlatform::new());
		let directory = tempfile::tempdir().unwrap();
		let bot = test_context(Arc::clone(&platform), command_modules(), directory.path());
		let incoming = message(".unknown");
		let context = CommandContext {
			message: &incoming,
			bot: &bot,
		};

		assert_eq!(dispatch(&context, &incoming.content).await, DispatchOutcome::Ignored);
		assert!(platform.calls().is_empty());
	}

	#[tokio::test]
	async fn failing_command_gets_one_generic_reply() {
		let platform = Arc::new(RecordingPlatform::new());
		let directory = tempfile::tempdir().unwrap();
		let bot = test_context(Arc::clone(&platform), vec![Box::new(Broken)], directory.path());
		let incoming = message(".broken now");
		let context = CommandContext {
			message: &incoming,
			bot: &bot,
		};

		assert_eq!(dispatch(&context, &incoming.content).await, DispatchOutcome::Failed);
		let calls = platform.calls();
		assert_eq!(calls.len(), 1);
		assert!(matches!(
			&calls[0],
			PlatformCall::Reply { content, message_id, .. } if content == COMMAND_FAILED && message_id.get() == 11
		));
	}

	#[tokio::test]
	async fn failure_reporting_errors_are_swallowed() {
		let platform = Arc::new(RecordingPlatform::new());
		platform.fail(Operation::Reply);
		let directory = tempfile::tempdir().unwrap();
		let bot = test_context(Arc::clone(&platform), vec![Box::new(Broken)], directory.path());
		let incoming = message(".broken");
		let context = CommandContext {
			message: &incoming,
			bot: &bot,
		};

		assert_eq!(dispatch(&context, &incoming.content).await, DispatchOutcome::Failed);
	}

	#[tokio::test]
	async fn failure_does_not_affect_later_commands() {
		let platform = Arc::new(RecordingPlatform::new());
		let counter = Arc::new(AtomicUsize::new(0));
		let directory = tempfile::tempdir().unwrap();
		let bot = test_context(
			Arc::clone(&platform),
			vec![Box::new(Broken), Box::new(Counting(Arc::clone(&counter)))],
			directory.path(),
		);

		for text in [".broken", ".count", ".broken", ".COUNT"] {
			let incoming = message(text);
			let context = CommandContext {
				message: &incoming,
				bot: &bot,
			};
			dispatch(&context, &incoming.content).await;
		}
		assert_eq!(counter.load(Ordering::SeqCst), 2);
	}
}
