// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory [Platform] that records every call, for tests.

use super::{ChannelRequest, FetchedMessage, FileUpload, InteractionHandle, MessageData, Platform};
use async_trait::async_trait;
use miette::bail;
use std::collections::HashSet;
use std::sync::Mutex;
use tokio::time::Instant;
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, InteractionMarker, MessageMarker};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Operation {
	Reply,
	Send,
	CreateChannel,
	FetchMessages,
	SendFile,
	DeleteChannel,
	Respond,
}

#[derive(Clone, Debug)]
pub enum PlatformCall {
	Reply {
		channel_id: Id<ChannelMarker>,
		message_id: Id<MessageMarker>,
		content: String,
	},
	Send {
		channel_id: Id<ChannelMarker>,
		message: MessageData,
	},
	CreateChannel(ChannelRequest),
	FetchMessages {
		channel_id: Id<ChannelMarker>,
		limit: u16,
	},
	SendFile {
		channel_id: Id<ChannelMarker>,
		content: String,
		file: FileUpload,
	},
	DeleteChannel(Id<ChannelMarker>),
	Respond {
		interaction_id: Id<InteractionMarker>,
		content: String,
		ephemeral: bool,
	},
}

pub const CREATED_CHANNEL_ID: u64 = 900;

#[derive(Default)]
pub struct RecordingPlatform {
	calls: Mutex<Vec<(Instant, PlatformCall)>>,
	failing: Mutex<HashSet<Operation>>,
	history: Mutex<Vec<FetchedMessage>>,
}

impl RecordingPlatform {
	pub fn new() -> Self {
		Self::default()
	}

	/// Makes every later call of the given kind fail after being recorded.
	pub fn fail(&self, operation: Operation) {
		self.failing.lock().unwrap().insert(operation);
	}

	/// Sets the history returned by [Platform::recent_messages]. Pass it most recent first.
	pub fn set_history(&self, messages: Vec<FetchedMessage>) {
		*self.history.lock().unwrap() = messages;
	}

	pub fn calls(&self) -> Vec<PlatformCall> {
		self.calls.lock().unwrap().iter().map(|(_, call)| call.clone()).collect()
	}

	pub fn timed_calls(&self) -> Vec<(Instant, PlatformCall)> {
		self.calls.lock().unwrap().clone()
	}

	fn record(&self, operation: Operation, call: PlatformCall) -> miette::Result<()> {
		self.calls.lock().unwrap().push((Instant::now(), call));
		if self.failing.lock().unwrap().contains(&operation) {
			bail!("{:?} failed", operation);
		}
		Ok(())
	}
}

#[async_trait]
impl Platform for RecordingPlatform {
	async fn reply_to_message(
		&self,
		channel_id: Id<ChannelMarker>,
		message_id: Id<MessageMarker>,
		content: &str,
	) -> miette::Result<()> {
		self.record(
			Operation::Reply,
			PlatformCall::Reply {
				channel_id,
				message_id,
				content: content.to_string(),
			},
		)
	}

	async fn send_message(&self, channel_id: Id<ChannelMarker>, message: &MessageData) -> miette::Result<()> {
		self.record(
			Operation::Send,
			PlatformCall::Send {
				channel_id,
				message: message.clone(),
			},
		)
	}

	async fn create_channel(&self, request: &ChannelRequest) -> miette::Result<Id<ChannelMarker>> {
		self.record(Operation::CreateChannel, PlatformCall::CreateChannel(request.clone()))?;
		Ok(Id::new(CREATED_CHANNEL_ID))
	}

	async fn recent_messages(&self, channel_id: Id<ChannelMarker>, limit: u16) -> miette::Result<Vec<FetchedMessage>> {
		self.record(Operation::FetchMessages, PlatformCall::FetchMessages { channel_id, limit })?;
		let history = self.history.lock().unwrap();
		Ok(history.iter().take(limit.into()).cloned().collect())
	}

	async fn send_file(&self, channel_id: Id<ChannelMarker>, content: &str, file: FileUpload) -> miette::Result<()> {
		self.record(
			Operation::SendFile,
			PlatformCall::SendFile {
				channel_id,
				content: content.to_string(),
				file,
			},
		)
	}

	async fn delete_channel(&self, channel_id: Id<ChannelMarker>) -> miette::Result<()> {
		self.record(Operation::DeleteChannel, PlatformCall::DeleteChannel(channel_id))
	}

	async fn respond_to_interaction(
		&self,
		interaction: &InteractionHandle,
		content: &str,
		ephemeral: bool,
	) -> miette::Result<()> {
		self.record(
			Operation::Respond,
			PlatformCall::Respond {
				interaction_id: interaction.id,
				content: content.to_string(),
				ephemeral,
			},
		)
	}
}
