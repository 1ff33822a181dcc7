use std::io::Write;

use serde::Serialize;

use crate::roster::FetchError;

/// One row of a fleet roster. Every field may be missing in the source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RosterEntry {
    pub aircraft: Option<String>,
    pub aircraft_type: Option<String>,
    pub origin: Option<String>,
    pub versions: Option<String>,
    pub in_service: Option<String>,
    pub notes: Option<String>,
    pub photo: Option<String>,
}

impl RosterEntry {
    /// Rows without an aircraft name are skipped when rendered.
    pub fn has_aircraft(&self) -> bool {
        self.aircraft
            .as_deref()
            .is_some_and(|name| !name.trim().is_empty())
    }
}

#[derive(Debug, Default)]
struct Columns {
    aircraft: Option<usize>,
    aircraft_type: Option<usize>,
    origin: Option<usize>,
    versions: Option<usize>,
    in_service: Option<usize>,
    notes: Option<usize>,
    photo: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::ByteRecord) -> Self {
        let mut columns = Self::default();
        for (index, header) in headers.iter().enumerate() {
            let slot = match normalize_header(&String::from_utf8_lossy(header)).as_str() {
                "aircraft" => &mut columns.aircraft,
                "type" => &mut columns.aircraft_type,
                "origin" => &mut columns.origin,
                "versions" | "version" => &mut columns.versions,
                "in service" => &mut columns.in_service,
                "notes" => &mut columns.notes,
                "photo" => &mut columns.photo,
                _ => continue,
            };
            slot.get_or_insert(index);
        }
        columns
    }

    fn entry(&self, record: &csv::ByteRecord) -> RosterEntry {
        let field = |column: Option<usize>| {
            column
                .and_then(|index| record.get(index))
                .map(String::from_utf8_lossy)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        RosterEntry {
            aircraft: field(self.aircraft),
            aircraft_type: field(self.aircraft_type),
            origin: field(self.origin),
            versions: field(self.versions),
            in_service: field(self.in_service),
            notes: field(self.notes),
            photo: field(self.photo),
        }
    }
}

fn normalize_header(header: &str) -> String {
    header
        .trim()
        .trim_start_matches('\u{feff}')
        .replace('_', " ")
        .to_lowercase()
}

/// Parse a header-row CSV roster. Rows are kept even when the aircraft
/// name is missing; filtering happens at render time. Invalid UTF-8 is
/// replaced rather than failing the whole roster.
pub fn parse_roster(bytes: &[u8]) -> Result<Vec<RosterEntry>, FetchError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let columns = Columns::from_headers(reader.byte_headers()?);
    let mut entries = Vec::new();
    for record in reader.byte_records() {
        entries.push(columns.entry(&record?));
    }
    Ok(entries)
}

const MERGED_HEADERS: [&str; 8] = [
    "Aircraft",
    "Type",
    "Origin",
    "Versions",
    "In Service",
    "Notes",
    "Photo",
    "country",
];

/// Write every roster into one CSV with a trailing `country` column.
pub fn write_merged<'a, W, I>(writer: W, rosters: I) -> Result<usize, csv::Error>
where
    W: Write,
    I: IntoIterator<Item = (&'a str, &'a [RosterEntry])>,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(MERGED_HEADERS)?;

    let mut rows = 0;
    for (code, entries) in rosters {
        for entry in entries.iter().filter(|entry| entry.has_aircraft()) {
            csv_writer.write_record([
                entry.aircraft.as_deref().unwrap_or_default(),
                entry.aircraft_type.as_deref().unwrap_or_default(),
                entry.origin.as_deref().unwrap_or_default(),
                entry.versions.as_deref().unwrap_or_default(),
                entry.in_service.as_deref().unwrap_or_default(),
                entry.notes.as_deref().unwrap_or_default(),
                entry.photo.as_deref().unwrap_or_default(),
                code,
            ])?;
            rows += 1;
        }
    }

    csv_writer.flush()?;
    Ok(rows)
}
