//! World announcement text.

use forge_core::{Announcement, OwnerId};

use crate::oracle::ItemTypeOracleImpl;
use crate::session::SessionDirectory;

/// Renders an announcement for the world channel.
///
/// Owners missing from the session directory are shown by id.
pub(crate) fn render(
    announcement: &Announcement,
    owner: OwnerId,
    sessions: &dyn SessionDirectory,
    item_types: &ItemTypeOracleImpl,
) -> String {
    let player = sessions
        .name_of(owner)
        .unwrap_or_else(|| owner.to_string());

    match announcement {
        Announcement::TierReached {
            item_type, tier, ..
        } => format!(
            "{player} refined {} to +{tier}. Congratulations!",
            item_types.name_of(*item_type)
        ),
        Announcement::SuperQuality { item_type, .. } => format!(
            "{player} upgraded {} to super quality. Congratulations!",
            item_types.name_of(*item_type)
        ),
        Announcement::StarDrill { .. } => {
            format!("{player} was lucky enough to turn tough drills into a Star Drill!")
        }
    }
}

#[cfg(test)]
mod tests {
    use forge_core::{ItemId, ItemTypeDefinition, ItemTypeId};

    use super::*;
    use crate::session::InMemorySessionDirectory;

    #[test]
    fn renders_owner_and_item_names() {
        let sessions = InMemorySessionDirectory::new();
        sessions.register(OwnerId(1), "Aria");
        let item_types = ItemTypeOracleImpl::from_definitions([ItemTypeDefinition::new(
            ItemTypeId(410_339),
            "SuperBlade",
            90,
            3000,
        )]);

        let text = render(
            &Announcement::TierReached {
                item: ItemId(1),
                item_type: ItemTypeId(410_339),
                tier: 9,
            },
            OwnerId(1),
            &sessions,
            &item_types,
        );
        assert_eq!(text, "Aria refined SuperBlade to +9. Congratulations!");
    }

    #[test]
    fn offline_owner_falls_back_to_id() {
        let text = render(
            &Announcement::StarDrill { drill: ItemId(5) },
            OwnerId(7),
            &InMemorySessionDirectory::new(),
            &ItemTypeOracleImpl::new(),
        );
        assert!(text.starts_with("owner#7 "));
    }
}
