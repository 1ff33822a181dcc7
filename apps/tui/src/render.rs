use serde::Serialize;

use crate::domain::Entity;
use crate::roster::RosterEntry;

/// Image reference used for cards whose roster row has no photo.
pub const PLACEHOLDER_PHOTO: &str = "https://placehold.co/300x200?text=No+Image";

/// Value shown for missing text fields other than notes.
pub const MISSING_VALUE: &str = "N/A";

/// Turns one entity and its roster into something displayable.
pub trait FleetRenderer {
    type Output;

    fn render(&self, entity: &Entity, roster: &[RosterEntry]) -> Self::Output;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetHeader {
    pub code: String,
    pub name: String,
    pub rank: u8,
    pub li: f64,
    pub fps: u32,
    pub aircraft: String,
    pub missile: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterCard {
    pub aircraft: String,
    pub aircraft_type: String,
    pub origin: String,
    pub versions: String,
    pub in_service: String,
    pub notes: String,
    pub photo: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetFragment {
    pub header: FleetHeader,
    pub cards: Vec<RosterCard>,
}

impl FleetFragment {
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Header block plus one card per named aircraft.
#[derive(Debug, Clone, Copy, Default)]
pub struct CardRenderer;

impl FleetRenderer for CardRenderer {
    type Output = FleetFragment;

    fn render(&self, entity: &Entity, roster: &[RosterEntry]) -> FleetFragment {
        render_fleet(entity, roster)
    }
}

pub fn render_fleet(entity: &Entity, roster: &[RosterEntry]) -> FleetFragment {
    FleetFragment {
        header: FleetHeader {
            code: entity.code.to_string(),
            name: entity.display_name.to_string(),
            rank: entity.rank,
            li: entity.li,
            fps: entity.fps,
            aircraft: entity.aircraft.to_string(),
            missile: entity.missile.to_string(),
        },
        cards: roster.iter().filter_map(render_card).collect(),
    }
}

fn render_card(entry: &RosterEntry) -> Option<RosterCard> {
    let aircraft = entry
        .aircraft
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())?;
    let or_missing =
        |value: &Option<String>| value.clone().unwrap_or_else(|| MISSING_VALUE.to_string());

    Some(RosterCard {
        aircraft: aircraft.to_string(),
        aircraft_type: or_missing(&entry.aircraft_type),
        origin: or_missing(&entry.origin),
        versions: or_missing(&entry.versions),
        in_service: or_missing(&entry.in_service),
        notes: entry.notes.clone().unwrap_or_default(),
        photo: entry
            .photo
            .clone()
            .unwrap_or_else(|| PLACEHOLDER_PHOTO.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::find_entity;

    fn usa() -> &'static Entity {
        find_entity("us").unwrap_or_else(|| panic!("us missing from leaderboard"))
    }

    #[test]
    fn empty_roster_renders_header_only() {
        let first = render_fleet(usa(), &[]);
        let second = render_fleet(usa(), &[]);

        assert!(first.is_empty());
        assert_eq!(first.header.name, "United States");
        assert_eq!(first.header.rank, 1);
        assert_eq!(first.header.fps, 5766);
        assert_eq!(first, second);
    }

    #[test]
    fn rows_without_aircraft_name_are_skipped() {
        let roster = vec![
            RosterEntry {
                aircraft: Some("F-35A".to_string()),
                aircraft_type: Some("Fighter".to_string()),
                ..RosterEntry::default()
            },
            RosterEntry {
                aircraft: Some(String::new()),
                aircraft_type: Some("Unknown".to_string()),
                ..RosterEntry::default()
            },
            RosterEntry {
                aircraft: Some("   ".to_string()),
                ..RosterEntry::default()
            },
        ];

        let fragment = CardRenderer.render(usa(), &roster);

        assert_eq!(fragment.cards.len(), 1);
        assert_eq!(fragment.cards[0].aircraft, "F-35A");
        assert_eq!(fragment.cards[0].aircraft_type, "Fighter");
    }

    #[test]
    fn missing_optional_fields_use_placeholders() {
        let roster = vec![RosterEntry {
            aircraft: Some("KC-46A".to_string()),
            ..RosterEntry::default()
        }];

        let card = &render_fleet(usa(), &roster).cards[0];

        assert_eq!(card.photo, PLACEHOLDER_PHOTO);
        assert_eq!(card.notes, "");
        assert_eq!(card.origin, MISSING_VALUE);
        assert_eq!(card.in_service, MISSING_VALUE);
    }
}
