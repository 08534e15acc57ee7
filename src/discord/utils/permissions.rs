// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use twilight_model::channel::permission_overwrite::{PermissionOverwrite, PermissionOverwriteType};
use twilight_model::guild::Permissions;
use twilight_model::id::Id;
use twilight_model::id::marker::{GuildMarker, UserMarker};

/// Permissions granted to each member of a ticket channel
pub fn ticket_member_permissions() -> Permissions {
	Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES | Permissions::READ_MESSAGE_HISTORY
}

/// Builds the overwrites for a private ticket channel: hidden from everyone, visible to each listed member.
pub fn ticket_channel_overwrites(guild_id: Id<GuildMarker>, members: &[Id<UserMarker>]) -> Vec<PermissionOverwrite> {
	// The @everyone role shares its ID with the guild.
	let everyone = PermissionOverwrite {
		allow: Permissions::empty(),
		deny: Permissions::VIEW_CHANNEL,
		id: guild_id.cast(),
		kind: PermissionOverwriteType::Role,
	};

	let mut overwrites = vec![everyone];
	for member in members {
		if overwrites.iter().any(|overwrite| overwrite.id == member.cast()) {
			continue;
		}
		overwrites.push(PermissionOverwrite {
			allow: ticket_member_permissions(),
			deny: Permissions::empty(),
			id: member.cast(),
			kind: PermissionOverwriteType::Member,
		});
	}
	overwrites
}
