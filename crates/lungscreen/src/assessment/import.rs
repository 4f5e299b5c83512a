use std::io::Read;

use super::domain::RawQuestionnaire;

/// Parse questionnaire rows from CSV with the upper-case field names as
/// headers. Empty cells and absent columns become missing answers.
pub fn read_questionnaires<R: Read>(reader: R) -> Result<Vec<RawQuestionnaire>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader
        .deserialize::<RawQuestionnaire>()
        .collect::<Result<Vec<_>, _>>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_rows_with_blank_cells_as_missing() {
        let csv = "AGE,GENDER,SMOKING,ENERGY_LEVEL,OXYGEN_SATURATION\n\
                   64, 1 ,3,2.5,90\n\
                   41,,,7,98\n";

        let rows = read_questionnaires(Cursor::new(csv)).expect("csv parses");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].age, Some(64.0));
        assert_eq!(rows[0].gender, Some(1.0));
        assert_eq!(rows[0].energy_level, Some(2.5));
        assert_eq!(rows[1].smoking, None);
        assert_eq!(rows[1].stress_immune, None);
    }

    #[test]
    fn rejects_non_numeric_cells() {
        let csv = "AGE,SMOKING\nforty,1\n";
        assert!(read_questionnaires(Cursor::new(csv)).is_err());
    }
}
