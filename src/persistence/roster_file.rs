//! Roster CSV: a header row, then `name,base_speed,power_up` per racer.

use std::io::{Read, Write};

use tracing::warn;

use crate::racer::{Competitor, PowerUp, Racer};
use crate::roster::Roster;

pub const ROSTER_HEADER: [&str; 3] = ["Name", "Speed", "PowerUp"];

/// Read racers from CSV, skipping rows that cannot be used.
///
/// Fields are read by position so the header wording does not matter.
/// Returns the roster and the number of skipped rows.
pub fn read_roster<R: Read>(reader: R) -> Result<(Roster, usize), csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut roster = Roster::new();
    let mut skipped = 0;

    for (row, record) in csv_reader.byte_records().enumerate() {
        // Row 1 is the header
        let line = row + 2;
        let record = match csv::StringRecord::from_byte_record(record?) {
            Ok(record) => record,
            Err(err) => {
                warn!(line, %err, "roster row is not UTF-8, skipping");
                skipped += 1;
                continue;
            }
        };

        let (Some(name), Some(speed), Some(power_up)) = (record.get(0), record.get(1), record.get(2))
        else {
            warn!(line, fields = record.len(), "roster row has fewer than 3 fields, skipping");
            skipped += 1;
            continue;
        };

        if name.is_empty() {
            warn!(line, "roster row has an empty name, skipping");
            skipped += 1;
            continue;
        }

        let base_speed = match speed.parse::<u32>() {
            Ok(speed) => speed,
            Err(err) => {
                warn!(line, racer = name, speed, %err, "invalid base speed, skipping");
                skipped += 1;
                continue;
            }
        };

        if let Err(err) = roster.push(Racer::new(name, base_speed, PowerUp::from_name(power_up))) {
            warn!(line, %err, "skipping roster row");
            skipped += 1;
        }
    }

    Ok((roster, skipped))
}

/// Write a roster as CSV, header included.
pub fn write_roster<W: Write>(writer: W, roster: &Roster) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(ROSTER_HEADER)?;
    for racer in roster.iter() {
        let speed = racer.base_speed().to_string();
        csv_writer.write_record([racer.name(), speed.as_str(), racer.power_up().name()])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the built-in roster as CSV.
pub fn write_default_roster<W: Write>(writer: W) -> Result<(), csv::Error> {
    write_roster(writer, &Roster::default_roster())
}
