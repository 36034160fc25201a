//! Prompt for the lead extraction call.

use scout_common::{LeadColumn, LeadCriteria};

fn column_hint(column: LeadColumn) -> &'static str {
    match column {
        LeadColumn::Location => " (Stad/Regio)",
        LeadColumn::LinkedIn => " (volledige URL of handle van de bedrijfspagina)",
        LeadColumn::CompanySize => {
            " (bijv. '10-50'; maak een onderbouwde schatting als het niet letterlijk genoemd wordt, NOOIT 'onbekend')"
        }
        LeadColumn::Rationale => {
            " (1 professionele zin waarom juist dit bedrijf aansluit op de criteria van de gebruiker)"
        }
        _ => "",
    }
}

/// Build the single instruction sent to the model.
///
/// The model is asked for a bare JSON array of `expected` objects keyed by the
/// nine [`LeadColumn`] headers; candidates with any unverifiable field must be
/// dropped rather than padded.
pub fn build_extraction_prompt(digest: &str, criteria: &LeadCriteria, expected: usize) -> String {
    let keys = LeadColumn::ALL
        .iter()
        .map(|c| format!("   - \"{}\"{}", c.header(), column_hint(*c)))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Jij bent een analytische B2B Lead Generation Agent.
Er is een internetzoekopdracht uitgevoerd naar bedrijven in de {sector} in {region} met deze extra eisen: {extra}.

Hier is de ruwe data van het internet:
{digest}

Taak:
1. Filter de ruwe data en haal er EXACT {expected} kloppende B2B leads uit. Negeer verzamelsites, startpagina's en vacaturesites.
2. Geef deze leads STRIKT terug als een geldige JSON array van objecten, zonder markdown codeblokken (dus geen ```json aan het begin of einde) en zonder tekst ervoor of erna.
3. Elk JSON object MOET exact de onderstaande sleutels hebben.

Kwaliteitseis: elk veld MOET concrete, controleerbare data uit de bronnen bevatten.
Staat een detail (zoals "Emailadres", "Telefoonnummer" of "LinkedIn") niet expliciet in de tekst? Dan voldoet die lead NIET. Laat die lead volledig weg en zoek verder in de resultaten tot je {expected} leads hebt waarbij alles concreet is ingevuld.
Gebruik nooit opvullers als "Onbekend", "N.v.t.", "-" of gokwerk.

Vereiste sleutels per lead:
{keys}

Retourneer ALLEEN de JSON array met EXACT {expected} resultaten."#,
        sector = criteria.sector,
        region = criteria.region,
        extra = criteria.extra,
        digest = digest,
        expected = expected,
        keys = keys,
    )
}
