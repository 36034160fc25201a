use csv::{Terminator, WriterBuilder};
use scout_common::{Lead, LeadColumn};

use crate::MailError;

/// Cell value for a column the model did not provide.
pub const MISSING_MARKER: &str = "Fout: Ontbreekt in AI generatie";

/// Serialize leads as UTF-8 CSV with the fixed nine-column header.
pub fn leads_to_csv(leads: &[Lead]) -> Result<Vec<u8>, MailError> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new());

    writer.write_record(LeadColumn::ALL.iter().map(|c| c.header()))?;
    for lead in leads {
        writer.write_record(
            LeadColumn::ALL
                .iter()
                .map(|c| lead.get(*c).unwrap_or(MISSING_MARKER)),
        )?;
    }

    writer
        .into_inner()
        .map_err(|e| MailError::Csv(csv::Error::from(e.into_error())))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Bedrijfsnaam,Website URL,Locatie,Branche,Emailadres,Telefoonnummer,LinkedIn,Bedrijfsgrootte,AI-Matching";

    fn lines(bytes: Vec<u8>) -> Vec<String> {
        String::from_utf8(bytes)
            .unwrap()
            .split_terminator("\r\n")
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn header_is_fixed_even_without_leads() {
        assert_eq!(lines(leads_to_csv(&[]).unwrap()), vec![HEADER.to_string()]);
    }

    #[test]
    fn key_order_in_source_does_not_matter() {
        let lead: Lead = serde_json::from_str(
            r#"{
                "AI-Matching": "Sterke match.",
                "Bedrijfsgrootte": "10-50",
                "LinkedIn": "https://linkedin.com/company/acme",
                "Telefoonnummer": "030-1234567",
                "Emailadres": "info@acme.nl",
                "Branche": "IT",
                "Locatie": "Utrecht",
                "Website URL": "https://acme.nl",
                "Bedrijfsnaam": "Acme BV"
            }"#,
        )
        .unwrap();

        let rows = lines(leads_to_csv(&[lead]).unwrap());
        assert_eq!(rows[0], HEADER);
        assert_eq!(
            rows[1],
            "Acme BV,https://acme.nl,Utrecht,IT,info@acme.nl,030-1234567,https://linkedin.com/company/acme,10-50,Sterke match."
        );
    }

    #[test]
    fn missing_and_null_keys_render_the_marker() {
        let lead: Lead =
            serde_json::from_str(r#"{"Bedrijfsnaam": "Acme BV", "Locatie": null}"#).unwrap();
        let rows = lines(leads_to_csv(&[lead]).unwrap());
        let cells: Vec<&str> = rows[1].split(',').collect();

        assert_eq!(cells.len(), 9);
        assert_eq!(cells[0], "Acme BV");
        assert!(cells[1..].iter().all(|c| *c == MISSING_MARKER));
    }

    #[test]
    fn commas_and_quotes_are_escaped() {
        let lead = Lead {
            company_name: Some("Jansen, de Vries & \"Zn\"".into()),
            ..Lead::default()
        };
        let text = String::from_utf8(leads_to_csv(&[lead]).unwrap()).unwrap();
        assert!(text.contains("\"Jansen, de Vries & \"\"Zn\"\"\""));
    }

    #[test]
    fn one_row_per_lead() {
        let leads = vec![Lead::default(); 10];
        assert_eq!(lines(leads_to_csv(&leads).unwrap()).len(), 11);
    }
}
