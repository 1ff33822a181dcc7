use ratatui::style::Color;

/// One of the six scored capability areas behind the Lethality Index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subsystem {
    SensorReach,
    Signature,
    Missile,
    Network,
    Ecm,
    Sortie,
}

impl Subsystem {
    pub const ALL: [Self; 6] = [
        Self::SensorReach,
        Self::Signature,
        Self::Missile,
        Self::Network,
        Self::Ecm,
        Self::Sortie,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SensorReach => "sensor",
            Self::Signature => "signature",
            Self::Missile => "missile",
            Self::Network => "network",
            Self::Ecm => "ecm",
            Self::Sortie => "sortie",
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::SensorReach),
            1 => Some(Self::Signature),
            2 => Some(Self::Missile),
            3 => Some(Self::Network),
            4 => Some(Self::Ecm),
            5 => Some(Self::Sortie),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::SensorReach => "Sensor Reach",
            Self::Signature => "Signature",
            Self::Missile => "Missile",
            Self::Network => "Network",
            Self::Ecm => "ECM",
            Self::Sortie => "Sortie",
        }
    }

    /// Column header used by the ranking table.
    pub const fn short_label(self) -> &'static str {
        match self {
            Self::SensorReach => "A",
            Self::Signature => "B",
            Self::Missile => "C",
            Self::Network => "D",
            Self::Ecm => "E",
            Self::Sortie => "F",
        }
    }

    /// Scores at or above this value are highlighted in the ranking table.
    pub const fn highlight_threshold(self) -> u8 {
        match self {
            Self::SensorReach | Self::Network => 95,
            Self::Signature | Self::Missile | Self::Ecm => 90,
            Self::Sortie => 85,
        }
    }

    pub const fn color(self) -> Color {
        match self {
            Self::SensorReach => Color::Rgb(59, 130, 246),
            Self::Signature => Color::Rgb(139, 92, 246),
            Self::Missile => Color::Rgb(239, 68, 68),
            Self::Network => Color::Rgb(16, 185, 129),
            Self::Ecm => Color::Rgb(245, 158, 11),
            Self::Sortie => Color::Rgb(6, 182, 212),
        }
    }
}

/// A country on the leaderboard. The scores are precomputed and never change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entity {
    pub code: &'static str,
    pub display_name: &'static str,
    pub rank: u8,
    pub aircraft: &'static str,
    pub missile: &'static str,
    pub scores: [u8; 6],
    pub li: f64,
    pub fps: u32,
}

impl Entity {
    pub const fn score(&self, subsystem: Subsystem) -> u8 {
        self.scores[subsystem as usize]
    }

    pub fn is_highlighted(&self, subsystem: Subsystem) -> bool {
        self.score(subsystem) >= subsystem.highlight_threshold()
    }

    /// Name truncated to `max` characters with a trailing ellipsis, for chart labels.
    pub fn short_name(&self, max: usize) -> String {
        if self.display_name.chars().count() > max {
            let head: String = self.display_name.chars().take(max).collect();
            format!("{head}...")
        } else {
            self.display_name.to_string()
        }
    }

    /// File holding this entity's roster under the roster source.
    pub fn roster_file(&self) -> Option<&'static str> {
        roster_file(self.code)
    }
}

/// Color tier for a Lethality Index value.
pub fn li_color(li: f64) -> Color {
    if li >= 95.0 {
        Color::Rgb(16, 185, 129)
    } else if li >= 90.0 {
        Color::Rgb(59, 130, 246)
    } else if li >= 85.0 {
        Color::Rgb(245, 158, 11)
    } else {
        Color::Rgb(239, 68, 68)
    }
}

const fn entity(
    rank: u8,
    display_name: &'static str,
    code: &'static str,
    aircraft: &'static str,
    missile: &'static str,
    scores: [u8; 6],
    li: f64,
    fps: u32,
) -> Entity {
    Entity {
        code,
        display_name,
        rank,
        aircraft,
        missile,
        scores,
        li,
        fps,
    }
}

/// The leaderboard in rank order.
#[rustfmt::skip]
pub const LEADERBOARD: [Entity; 20] = [
    entity(1, "United States", "us", "F-22A (20) + F-35A Blk-4 (25) + F-15EX (15)", "AIM-120D-3 (180) / AIM-260 (230)", [98, 96, 92, 99, 97, 93], 96.1, 5766),
    entity(2, "Russia", "ru", "Su-57 (12) + Su-35S (28) + Su-30SM2 (20)", "R-77M (200) / R-37M (400)", [95, 88, 100, 96, 94, 85], 94.8, 5688),
    entity(3, "China", "cn", "J-20A (40) + J-35A (20)", "PL-15 (200) / PL-21 (300)", [97, 90, 94, 97, 89, 88], 94.0, 5640),
    entity(4, "Israel", "il", "F-35I (39) + F-15IA (21)", "AIM-120D-3 (180) + Rampage ALBM (250)", [96, 95, 88, 97, 97, 90], 93.9, 5634),
    entity(5, "United Kingdom", "gb", "F-35B (30) + Typhoon FGR4 (30)", "Meteor (150) / AIM-120D-3 (180)", [94, 92, 88, 94, 94, 87], 91.8, 5508),
    entity(6, "Japan", "jp", "F-35A (38) + F-15J MSIP (22)", "AIM-120D-3 (180) / AAM-4B (120)", [95, 92, 85, 94, 93, 86], 91.2, 5472),
    entity(7, "Australia", "au", "F-35A (44) + F/A-18F (16)", "AIM-120D-3 (180) / AIM-120C-7 (120)", [96, 94, 85, 91, 91, 84], 90.8, 5448),
    entity(8, "South Korea", "kr", "F-35A (40) + KF-21 Block-I (20)", "AIM-120D-3 (180) / AIM-120C-7 (120)", [93, 90, 85, 92, 91, 85], 89.8, 5388),
    entity(9, "Italy", "it", "F-35A/B (28) + Typhoon T4 (32)", "AIM-120D-3 (180) / Meteor (150)", [92, 90, 86, 92, 90, 85], 89.7, 5382),
    entity(10, "France", "fr", "Rafale F4 (36) + F3R (24)", "Meteor (150) / MICA-NG (100)", [93, 89, 84, 93, 91, 86], 89.6, 5376),
    entity(11, "Canada", "ca", "CF-18A/B (60)", "AIM-120C-7 (120)", [92, 88, 85, 92, 90, 88], 89.3, 5358),
    entity(12, "Germany", "de", "Eurofighter T4 (40) + Tornado ECR (20)", "Meteor (150) / AIM-120C-5 (105)", [86, 78, 84, 88, 86, 83], 84.6, 5076),
    entity(13, "Pakistan", "pk", "J-10C (20) + JF-17C (26) + F-16AM-52+ (14)", "PL-15E (200) / AIM-120C-5 (105)", [88, 75, 84, 85, 78, 85], 83.3, 4998),
    entity(14, "Spain", "es", "EF-18M (40) + Eurofighter T4 (20)", "AIM-120C-7 (120) / Meteor (150)", [83, 76, 83, 85, 83, 80], 82.2, 4932),
    entity(15, "Saudi Arabia", "sa", "F-15SA (40) + Typhoon T3 (20)", "AIM-120C-7 (120) / Meteor (150)", [82, 78, 83, 79, 80, 82], 80.8, 4848),
    entity(16, "Turkey", "tr", "F-16C/D Block-70 (35) + F-4E-2020 (25)", "AIM-120C-7 (120)", [82, 76, 81, 78, 80, 82], 79.8, 4788),
    entity(17, "Taiwan", "tw", "F-16V (42) + Mirage-2000-5 (18)", "AIM-120C-7 (120) / MICA-EM (80)", [82, 74, 81, 78, 80, 81], 79.5, 4770),
    entity(18, "India", "in", "Rafale F3R (36) + Su-30MKI Super-30 (24)", "Meteor (150) / RVV-AE-PD (120)", [80, 80, 83, 73, 80, 80], 79.3, 4758),
    entity(19, "Greece", "gr", "F-16V (40) + Mirage-2000-5 Mk2 (20)", "AIM-120C-7 (120) / MICA-EM (80)", [81, 74, 81, 77, 79, 80], 78.9, 4734),
    entity(20, "Brazil", "br", "JAS-39E (20) + F-5EM (40)", "Meteor (150) / AIM-120C-5 (105)", [76, 74, 82, 75, 78, 78], 77.3, 4638),
];

/// Roster filenames keyed by entity code.
const ROSTER_FILES: [(&str, &str); 20] = [
    ("us", "usa.csv"),
    ("ru", "rus.csv"),
    ("cn", "chn.csv"),
    ("il", "isr.csv"),
    ("gb", "gbr.csv"),
    ("jp", "jpn.csv"),
    ("au", "aus.csv"),
    ("kr", "kor.csv"),
    ("it", "ita.csv"),
    ("fr", "fra.csv"),
    ("ca", "can.csv"),
    ("de", "deu.csv"),
    ("pk", "pak.csv"),
    ("es", "esp.csv"),
    ("sa", "sau.csv"),
    ("tr", "tur.csv"),
    ("tw", "twn.csv"),
    ("in", "ind.csv"),
    ("gr", "grc.csv"),
    ("br", "bra.csv"),
];

pub fn roster_file(code: &str) -> Option<&'static str> {
    ROSTER_FILES
        .iter()
        .find(|(candidate, _)| *candidate == code)
        .map(|(_, file)| *file)
}

pub fn find_entity(code: &str) -> Option<&'static Entity> {
    let code = code.trim();
    LEADERBOARD
        .iter()
        .find(|entity| entity.code.eq_ignore_ascii_case(code))
}

pub fn entity_index(code: &str) -> Option<usize> {
    LEADERBOARD.iter().position(|entity| entity.code == code)
}

pub fn top(count: usize) -> &'static [Entity] {
    &LEADERBOARD[..count.min(LEADERBOARD.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_entity_has_a_roster_file() {
        for entity in &LEADERBOARD {
            assert!(
                entity.roster_file().is_some(),
                "no roster file for {}",
                entity.code
            );
        }
    }

    #[test]
    fn ranks_are_sequential_and_scores_bounded() {
        for (index, entity) in LEADERBOARD.iter().enumerate() {
            assert_eq!(usize::from(entity.rank), index + 1);
            assert!(entity.scores.iter().all(|score| *score <= 100));
        }
    }

    #[test]
    fn codes_are_unique() {
        for (index, entity) in LEADERBOARD.iter().enumerate() {
            assert_eq!(entity_index(entity.code), Some(index));
        }
    }

    #[test]
    fn subsystem_lookup_matches_table_columns() {
        let russia = find_entity("RU").map(|entity| entity.score(Subsystem::Missile));
        assert_eq!(russia, Some(100));
        assert!(find_entity("zz").is_none());
    }

    #[test]
    fn highlight_uses_per_subsystem_threshold() {
        let canada = find_entity("ca").copied();
        let Some(canada) = canada else {
            panic!("canada missing");
        };
        assert!(!canada.is_highlighted(Subsystem::SensorReach));
        assert!(canada.is_highlighted(Subsystem::Sortie));
    }

    #[test]
    fn short_name_truncates_long_names() {
        let Some(uk) = find_entity("gb") else {
            panic!("uk missing");
        };
        assert_eq!(uk.short_name(10), "United Kin...");
        assert_eq!(uk.short_name(20), "United Kingdom");
    }
}
