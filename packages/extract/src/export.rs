//! CSV export of voter records.

use std::io::Write;

use voter_roll_record_models::{Column, VoterRecord};

use crate::ExportError;

/// UTF-8 byte order mark, so spreadsheet tools detect the encoding.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Writes `records` as CSV with a header row in [`Column::ALL`] order.
///
/// Devanagari is written verbatim.  With `bom` set, the output starts with
/// a UTF-8 byte order mark.
///
/// # Errors
///
/// Returns [`ExportError`] if writing to `writer` fails.
pub fn write_csv<W: Write>(
    mut writer: W,
    records: &[VoterRecord],
    bom: bool,
) -> Result<(), ExportError> {
    if bom {
        writer.write_all(UTF8_BOM)?;
    }

    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(Column::ALL.iter().map(|c| c.name()))?;

    for record in records {
        let row = record.row();
        csv.write_record(row.iter().map(|f| f.as_bytes()))?;
    }

    csv.flush()?;
    log::debug!("Wrote {} records as CSV", records.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use voter_roll_record_models::{Gender, HeaderInfo};

    use super::*;

    fn record() -> VoterRecord {
        VoterRecord {
            sr_no: "50".to_string(),
            house_no: "नगर".to_string(),
            voter_name_hindi: "सुनिता".to_string(),
            voter_name: "Sunita".to_string(),
            voter_name_lower: "sunita".to_string(),
            father_or_husband_name_hindi: "राजकुमार".to_string(),
            father_or_husband_name: "Rajkumar".to_string(),
            father_or_husband_name_lower: "rajkumar".to_string(),
            gender: Gender::Female,
            age: 43,
            header: Arc::new(HeaderInfo::unknown()),
            source_file: "roll, part 1.pdf".to_string(),
            tag: "1".to_string(),
        }
    }

    #[test]
    fn writes_header_and_rows_in_column_order() {
        let mut out = Vec::new();
        write_csv(&mut out, &[record()], false).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next().unwrap(),
            "age,bodyNumber,district,fatherOrHusbandName,fatherOrHusbandNameHindi,\
             fatherOrHusbandNameLower,gender,houseNo,locality,partNumber,pollingCenter,\
             roomNumber,sectionNumber,srNo,voterName,voterNameHindi,voterNameLower,ward,\
             sourceFile,tag"
        );
        assert_eq!(
            lines.next().unwrap(),
            "43,UNKNOWN-bodyNumber,UNKNOWN-district,Rajkumar,राजकुमार,rajkumar,F,नगर,\
             UNKNOWN-locality,UNKNOWN-partNumber,UNKNOWN-pollingCenter,UNKNOWN-roomNumber,\
             UNKNOWN-sectionNumber,50,Sunita,सुनिता,sunita,UNKNOWN-ward,\"roll, part 1.pdf\",1"
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn prefixes_bom_when_requested() {
        let mut out = Vec::new();
        write_csv(&mut out, &[], true).unwrap();
        assert!(out.starts_with(UTF8_BOM));
        assert!(String::from_utf8(out[3..].to_vec()).unwrap().starts_with("age,"));
    }

    #[test]
    fn no_bom_by_default() {
        let mut out = Vec::new();
        write_csv(&mut out, &[], false).unwrap();
        assert!(out.starts_with(b"age,"));
    }
}
