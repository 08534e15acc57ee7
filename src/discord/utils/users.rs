// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use twilight_model::id::Id;
use twilight_model::id::marker::UserMarker;
use twilight_model::user::User;

/// The parts of a user the bot needs to identify them in channels and transcripts
#[derive(Clone, Debug)]
pub struct UserData {
	pub id: Id<UserMarker>,
	pub name: String,
	pub tag: String,
}

impl From<&User> for UserData {
	fn from(user: &User) -> Self {
		Self {
			id: user.id,
			name: user.name.clone(),
			tag: user_tag(user),
		}
	}
}

/// Gets the user's tag: `name#1234` for legacy accounts, or the bare username for accounts migrated to unique usernames.
pub fn user_tag(user: &User) -> String {
	tag_for(&user.name, user.discriminator)
}

fn tag_for(name: &str, discriminator: u16) -> String {
	if discriminator == 0 {
		name.to_string()
	} else {
		format!("{}#{:04}", name, discriminator)
	}
}
